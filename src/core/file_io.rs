//! Atomic file writes and small path helpers.

use std::fs;
use std::io;
use std::path::Path;

use uuid::Uuid;

/// Writes `contents` to `path` atomically: the bytes go to a scratch file in
/// the same directory, which is then renamed into place. A crash mid-write
/// never leaves a half-written file at `path`.
pub fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
    fs::create_dir_all(parent)?;

    // Scratch file lives next to the target so the rename stays on one filesystem.
    let scratch = parent.join(format!(".{}.tmp", Uuid::new_v4()));
    if let Err(e) = fs::write(&scratch, contents) {
        let _ = fs::remove_file(&scratch);
        return Err(e);
    }
    if let Err(e) = fs::rename(&scratch, path) {
        let _ = fs::remove_file(&scratch);
        return Err(e);
    }
    Ok(())
}

/// Returns true when `path` has the given extension (case-insensitive).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_atomic_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("ns").join("1.0.0").join("Model.ttl");
        atomic_write(&target, b"content").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "content");
    }

    #[test]
    fn test_atomic_write_leaves_no_scratch() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Model.ttl");
        atomic_write(&target, b"content").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("Model.ttl")]);
    }

    #[test]
    fn test_has_extension_is_case_insensitive() {
        assert!(has_extension(&PathBuf::from("a/b/Model.TTL"), "ttl"));
        assert!(!has_extension(&PathBuf::from("a/b/Model.txt"), "ttl"));
        assert!(!has_extension(&PathBuf::from("a/b/Model"), "ttl"));
    }
}
