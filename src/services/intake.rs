//! Upload validation and the per-request scratch file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::DocumentKind;

/// Rejects anything that is not a pdf, doc or docx by name.
pub fn check_extension(file_name: &str) -> AppResult<DocumentKind> {
    let kind = DocumentKind::from_file_name(file_name);
    if !kind.is_accepted() {
        return Err(AppError::UnsupportedExtension);
    }
    Ok(kind)
}

pub fn check_size(size: usize, max_bytes: usize) -> AppResult<()> {
    if size > max_bytes {
        return Err(AppError::FileTooLarge {
            limit_mb: max_bytes / (1024 * 1024),
        });
    }
    Ok(())
}

/// An uploaded document parked on disk for the extractors.
///
/// The file is removed when the value is dropped, so an aborted request
/// never leaves it behind. [`ScratchFile::discard`] removes it eagerly.
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn discard(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => debug!(path = %path.display(), "Scratch file removed"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove scratch file"),
        }
    }
}

/// Writes the upload under `dir` as `resume_<random>.<ext>`, creating `dir` if needed.
pub fn store(dir: &Path, kind: DocumentKind, content: &[u8]) -> AppResult<ScratchFile> {
    std::fs::create_dir_all(dir).map_err(|e| {
        AppError::file_save(format!("Failed to create upload directory {}: {}", dir.display(), e))
    })?;

    let suffix = format!(".{}", kind.extension());
    let mut file = Builder::new()
        .prefix("resume_")
        .suffix(&suffix)
        .tempfile_in(dir)
        .map_err(|e| AppError::file_save(format!("Failed to create scratch file: {}", e)))?;

    file.write_all(content)
        .and_then(|_| file.flush())
        .map_err(|e| AppError::file_save(format!("Failed to write scratch file: {}", e)))?;

    debug!(
        path = %file.path().display(),
        bytes = content.len(),
        "Upload stored in scratch directory"
    );

    Ok(ScratchFile { file })
}

/// True when the scratch directory exists (or can be created) and is a directory.
pub fn scratch_dir_ready(dir: &Path) -> bool {
    std::fs::create_dir_all(dir).is_ok() && dir.is_dir()
}

/// Removes `resume_*` leftovers from a previous process that died mid-request.
pub fn sweep_stale(dir: &Path) -> usize {
    let stale: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| {
                    path.is_file()
                        && path
                            .file_name()
                            .and_then(|name| name.to_str())
                            .is_some_and(|name| name.starts_with("resume_"))
                })
                .collect()
        })
        .unwrap_or_default();

    stale
        .iter()
        .filter(|path| match std::fs::remove_file(path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove stale scratch file");
                false
            }
        })
        .count()
}
