use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use tokio::io::AsyncReadExt;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

const COVERS_DIR: &str = "covers";
const DOCUMENTS_DIR: &str = "documents";
const PAGES_DIR: &str = "pages";

/// Local, transient storage for in-flight uploads and rendered pages. Files
/// live here only for the duration of one request's processing.
#[derive(Debug, Clone)]
pub struct ScratchStorage {
    root: PathBuf,
}

impl ScratchStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ScratchStorage { root: root.into() }
    }

    /// Creates the scratch directory tree. Called once at startup.
    pub async fn ensure_layout(&self) -> std::io::Result<()> {
        for dir in [COVERS_DIR, DOCUMENTS_DIR, PAGES_DIR] {
            tokio::fs::create_dir_all(self.root.join(dir)).await?;
        }
        Ok(())
    }

    /// Moves an uploaded image into scratch under a collision-resistant name.
    /// Rejects files whose bytes are not an image, whatever their extension.
    pub async fn stash_image(&self, file: &TempFile, field: &str) -> Result<PathBuf, AppError> {
        match sniff(file.file.path()).await? {
            Some(kind) if kind.matcher_type() == infer::MatcherType::Image => {}
            _ => {
                return Err(AppError::ValidationError(vec![crate::errors::FieldError {
                    field: field.to_string(),
                    message: "must be an image file".to_string(),
                }]));
            }
        }
        self.stash(file, COVERS_DIR, field).await
    }

    /// Moves an uploaded PDF into scratch under a collision-resistant name.
    pub async fn stash_document(&self, file: &TempFile, field: &str) -> Result<PathBuf, AppError> {
        match sniff(file.file.path()).await? {
            Some(kind) if kind.extension() == "pdf" => {}
            _ => {
                return Err(AppError::ValidationError(vec![crate::errors::FieldError {
                    field: field.to_string(),
                    message: "must be a PDF document".to_string(),
                }]));
            }
        }
        self.stash(file, DOCUMENTS_DIR, field).await
    }

    /// Scratch names are `{field}_{uuid}{ext}`. The user-supplied filename
    /// only contributes its extension, never the name itself.
    async fn stash(&self, file: &TempFile, subdir: &str, field: &str) -> Result<PathBuf, AppError> {
        let extension = file
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();

        let dest = self
            .root
            .join(subdir)
            .join(format!("{}_{}{}", field, Uuid::new_v4(), extension));

        tokio::fs::copy(file.file.path(), &dest).await?;
        Ok(dest)
    }

    /// Per-document render directory, named after the stashed document's stem
    /// so concurrent requests never share one.
    pub fn pages_dir_for(&self, document: &Path) -> PathBuf {
        let stem = document
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        self.root.join(PAGES_DIR).join(stem)
    }

    /// Best-effort removal of a scratch file.
    pub async fn discard_file(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "failed to remove scratch file");
            }
        }
    }

    /// Best-effort removal of a scratch directory and its contents.
    pub async fn discard_dir(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_dir_all(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "failed to remove scratch directory");
            }
        }
    }
}

async fn sniff(path: &Path) -> Result<Option<infer::Type>, AppError> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut buf = [0u8; 512];
    let n = file.read(&mut buf).await?;
    Ok(infer::get(&buf[..n]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pages_dir_tracks_document_stem() {
        let scratch = ScratchStorage::new("/tmp/scratch");
        let dir = scratch.pages_dir_for(Path::new("/tmp/scratch/documents/document_abc123.pdf"));
        assert_eq!(dir, PathBuf::from("/tmp/scratch/pages/document_abc123"));
    }

    #[tokio::test]
    async fn discard_is_silent_on_missing_paths() {
        let scratch = ScratchStorage::new(std::env::temp_dir());
        scratch.discard_file(Path::new("/nonexistent/file.jpg")).await;
        scratch.discard_dir(Path::new("/nonexistent/dir")).await;
    }
}
