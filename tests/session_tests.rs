// Scan session tests
// Background scans driven the way the TUI drives them

mod common;

use std::time::{Duration, Instant};

use diskpie::scanner::{
    CancelToken, ScanError, ScanEvent, ScanOptions, ScanOutcome, ScanSession,
};

fn wait(session: &ScanSession) -> Vec<ScanEvent> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut events = Vec::new();
    while !session.is_finished() && Instant::now() < deadline {
        events.extend(session.events());
        std::thread::sleep(Duration::from_millis(5));
    }
    events.extend(session.events());
    events
}

#[test]
fn test_session_completes() {
    let (_dir, root) = common::create_sample_tree();
    let session = ScanSession::start(&root, ScanOptions::default()).unwrap();
    assert_eq!(session.root(), root);

    let events = wait(&session);
    assert!(matches!(events.first(), Some(ScanEvent::Started { .. })));
    assert!(matches!(events.last(), Some(ScanEvent::Finished(_))));
    assert!(events.iter().any(|e| matches!(e, ScanEvent::Progress(_))));

    match session.join().unwrap() {
        ScanOutcome::Completed(report) => {
            assert_eq!(report.root.size_bytes, 7000);
            assert!(!report.cancelled);
        }
        ScanOutcome::Cancelled => panic!("scan was not cancelled"),
    }
}

#[test]
fn test_missing_root_fails_at_start() {
    let (_dir, root) = common::create_test_dir();
    let err = ScanSession::start(&root.join("missing"), ScanOptions::default())
        .err()
        .unwrap();

    assert!(matches!(err, ScanError::RootNotFound(_)));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_cancel_discards_results_or_completes() {
    let (_dir, root) = common::create_test_dir();
    for i in 0..50 {
        common::write_file(&root, &format!("d{i}/f"), 10);
    }

    let session = ScanSession::start(&root, ScanOptions::default()).unwrap();
    session.cancel();
    assert!(session.is_cancelled());
    wait(&session);

    // The worker may finish before it sees the flag
    match session.join().unwrap() {
        ScanOutcome::Cancelled => {}
        ScanOutcome::Completed(report) => assert_eq!(report.root.size_bytes, 500),
    }
}

#[test]
fn test_cancelled_session_hands_back_nothing() {
    let (_dir, root) = common::create_sample_tree();
    let cancel = CancelToken::new();
    cancel.cancel();

    let session = ScanSession::start_with(&root, ScanOptions::default(), cancel).unwrap();
    assert!(session.is_cancelled());

    let events = wait(&session);
    assert!(matches!(events.last(), Some(ScanEvent::Finished(_))));
    assert!(matches!(session.join().unwrap(), ScanOutcome::Cancelled));
}
