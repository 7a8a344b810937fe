use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures that prevent a scan from starting or finishing.
///
/// Unreadable paths below the root are not errors; they end up in
/// `ScanReport::skipped`.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("folder not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("scan worker panicked")]
    WorkerPanicked,
}

pub type ScanResult<T> = Result<T, ScanError>;

/// Check that `path` names an existing directory and return its canonical form
pub fn validate_root(path: &Path) -> ScanResult<PathBuf> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ScanError::RootNotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ScanError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(path.to_path_buf()));
    }

    std::fs::canonicalize(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = validate_root(&missing).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(p) if p == missing));
    }

    #[test]
    fn test_file_root_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, b"hi").unwrap();

        let err = validate_root(&file).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[test]
    fn test_root_is_canonicalized() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let root = validate_root(&dir.path().join("sub").join("..")).unwrap();
        assert_eq!(root, std::fs::canonicalize(dir.path()).unwrap());
        assert!(root.is_absolute());
    }

    #[test]
    fn test_error_messages() {
        let err = ScanError::RootNotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "folder not found: /missing");
    }
}
