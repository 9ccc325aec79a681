//! Workspace backup: the whole tree copied into a dated archive.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::core::ModelError;
use crate::package::PackageService;

impl PackageService {
    /// Archives the entire workspace tree. A pure copy with no
    /// partial-failure handling: any unreadable file fails the backup loudly
    /// instead of being skipped.
    pub fn backup_archive(&self) -> Result<Vec<u8>, ModelError> {
        let mut files = Vec::new();
        collect_files(self.root(), self.root(), &mut files)?;

        let mut buffer = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(&mut buffer);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (entry_name, path) in files {
            let content = fs::read(&path)
                .map_err(|e| ModelError::file_read(format!("{}: {e}", path.display())))?;
            zip.start_file(entry_name.as_str(), options)
                .map_err(|e| ModelError::file_read(format!("failed to create {entry_name}: {e}")))?;
            zip.write_all(&content)
                .map_err(|e| ModelError::file_read(format!("failed to write {entry_name}: {e}")))?;
        }
        zip.finish()
            .map_err(|e| ModelError::file_read(format!("failed to finalize backup: {e}")))?;
        Ok(buffer.into_inner())
    }

    /// Writes a dated backup archive into `target_dir` and returns its path.
    pub fn write_backup(&self, target_dir: &Path) -> Result<PathBuf, ModelError> {
        let bytes = self.backup_archive()?;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let path = target_dir.join(format!("workspace-backup-{stamp}.zip"));
        fs::write(&path, bytes)
            .map_err(|e| ModelError::file_read(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "wrote workspace backup");
        Ok(path)
    }
}

/// Collects every file under `dir`, with archive entry names relative to
/// `root` using forward slashes.
fn collect_files(
    root: &Path,
    dir: &Path,
    results: &mut Vec<(String, PathBuf)>,
) -> Result<(), ModelError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ModelError::file_read(format!("{}: {e}", dir.display())))?;
    let mut paths: Vec<PathBuf> = entries
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ModelError::file_read(format!("{}: {e}", dir.display())))?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_files(root, &path, results)?;
        } else if path.is_file() {
            let relative = path.strip_prefix(root).map_err(|_| {
                ModelError::file_read(format!("{} escaped the workspace root", path.display()))
            })?;
            let entry_name = relative
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/");
            results.push((entry_name, path));
        }
    }
    Ok(())
}
