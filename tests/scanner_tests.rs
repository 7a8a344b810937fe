// Scanner integration tests
// Walk real folders on disk and check the resulting Entry tree

mod common;

use std::fs;

use diskpie::model::EntryKind;
use diskpie::scanner::{
    CancelToken, NoopProgress, ScanError, ScanOptions, Scanner, SkipReason,
};

fn scan_default(root: &std::path::Path) -> diskpie::scanner::ScanReport {
    Scanner::new(ScanOptions::default())
        .scan(root, &NoopProgress)
        .unwrap()
}

#[test]
fn test_sizes_are_cumulative() {
    let (_dir, root) = common::create_sample_tree();
    let report = scan_default(&root);

    assert!(!report.cancelled);
    assert!(report.skipped.is_empty());
    assert_eq!(report.root.path, root);
    assert_eq!(report.root.size_bytes, 7000);
    assert!(report.root.is_consistent());

    assert_eq!(
        common::child_names(&report.root),
        vec!["media", "src", "notes.txt", "empty"]
    );
    assert_eq!(report.root.find(&["src", "util"]).unwrap().size_bytes, 800);
    assert_eq!(
        report.root.find(&["notes.txt"]).unwrap().kind,
        EntryKind::File
    );
}

#[test]
fn test_stats_match_tree() {
    let (_dir, root) = common::create_sample_tree();
    let report = scan_default(&root);

    assert_eq!(report.stats.files, 5);
    assert_eq!(report.stats.bytes, 7000);
    // root, media, src, src/util, empty
    assert_eq!(report.stats.dirs, 5);
    assert_eq!(report.root.file_count(), 5);
    assert_eq!(report.root.dir_count(), 4);
}

#[test]
fn test_empty_folder() {
    let (_dir, root) = common::create_test_dir();
    let report = scan_default(&root);

    assert_eq!(report.root.size_bytes, 0);
    assert!(report.root.children.is_empty());
    assert!(report.root.is_dir());
}

#[test]
fn test_missing_root_is_an_error() {
    let (_dir, root) = common::create_test_dir();
    let err = Scanner::new(ScanOptions::default())
        .scan(&root.join("nope"), &NoopProgress)
        .unwrap_err();

    assert!(matches!(err, ScanError::RootNotFound(_)));
}

#[test]
fn test_file_root_is_an_error() {
    let (_dir, root) = common::create_test_dir();
    let file = common::write_file(&root, "plain.txt", 10);
    let err = Scanner::new(ScanOptions::default())
        .scan(&file, &NoopProgress)
        .unwrap_err();

    assert!(matches!(err, ScanError::NotADirectory(_)));
}

#[test]
fn test_cancelled_before_start_gives_consistent_partial_tree() {
    let (_dir, root) = common::create_sample_tree();
    let cancel = CancelToken::new();
    cancel.cancel();

    let report = Scanner::new(ScanOptions::default())
        .with_cancel(cancel)
        .scan(&root, &NoopProgress)
        .unwrap();

    assert!(report.cancelled);
    assert!(report.root.is_consistent());
    assert!(report.root.size_bytes <= 7000);
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::{symlink, PermissionsExt};

    // The walker's own unit tests cover this with an injected failure
    #[test]
    #[ignore = "needs a non-root user so that mode 000 denies listing"]
    fn test_unreadable_folder_is_skipped() {
        let (_dir, root) = common::create_sample_tree();
        let locked = root.join("locked");
        common::write_file(&root, "locked/secret.bin", 1000);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        assert!(
            fs::read_dir(&locked).is_err(),
            "permission bits are not enforced for this user"
        );

        let report = scan_default(&root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, locked);
        assert_eq!(report.skipped[0].reason, SkipReason::PermissionDenied);

        // The rest of the tree is intact and the locked folder counts as empty
        assert_eq!(report.root.size_bytes, 7000);
        assert_eq!(report.root.find(&["locked"]).unwrap().size_bytes, 0);
        assert!(report.root.is_consistent());
    }

    #[test]
    fn test_symlinks_not_followed_by_default() {
        let (_dir, root) = common::create_sample_tree();
        symlink(root.join("media"), root.join("media-link")).unwrap();
        symlink(root.join("notes.txt"), root.join("notes-link")).unwrap();

        let report = scan_default(&root);

        assert_eq!(report.root.size_bytes, 7000);
        assert!(report.root.find(&["media-link"]).is_none());
        assert_eq!(report.stats.links_skipped, 2);
    }

    #[test]
    fn test_followed_symlink_cycle_terminates() {
        let (_dir, root) = common::create_sample_tree();
        symlink(&root, root.join("src/util/loop")).unwrap();

        let options = ScanOptions {
            follow_symlinks: true,
            ..ScanOptions::default()
        };
        let report = Scanner::new(options).scan(&root, &NoopProgress).unwrap();

        // The loop points back at the root, which was already visited
        assert_eq!(report.root.size_bytes, 7000);
        assert!(report.stats.links_skipped >= 1);
        assert!(report.root.is_consistent());
    }

    #[test]
    fn test_followed_file_link_counts() {
        let (_dir, root) = common::create_sample_tree();
        symlink(root.join("notes.txt"), root.join("notes-link")).unwrap();

        let options = ScanOptions {
            follow_symlinks: true,
            ..ScanOptions::default()
        };
        let report = Scanner::new(options).scan(&root, &NoopProgress).unwrap();

        assert_eq!(report.root.find(&["notes-link"]).unwrap().size_bytes, 500);
        assert_eq!(report.root.size_bytes, 7500);
    }

    #[test]
    fn test_dangling_link_is_skipped_when_following() {
        let (_dir, root) = common::create_sample_tree();
        symlink(root.join("gone"), root.join("dangling")).unwrap();

        let options = ScanOptions {
            follow_symlinks: true,
            ..ScanOptions::default()
        };
        let report = Scanner::new(options).scan(&root, &NoopProgress).unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::Vanished);
        assert_eq!(report.root.size_bytes, 7000);
    }
}
