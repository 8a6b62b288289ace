use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::errors::AppError;

/// Raster format for rendered pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Jpeg,
}

impl PageFormat {
    fn flag(&self) -> &'static str {
        match self {
            PageFormat::Jpeg => "-jpeg",
        }
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self {
            PageFormat::Jpeg => &["jpg", "jpeg"],
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: PageFormat,
    pub page_prefix: String,
    /// Longest side of each rendered page is capped at this many pixels.
    pub max_dimension: u32,
    /// The external process is killed once this elapses.
    pub timeout: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            format: PageFormat::Jpeg,
            page_prefix: "page".to_string(),
            max_dimension: 1024,
            timeout: Duration::from_secs(120),
        }
    }
}

/// Rasterizes a document into one image file per page, returned in page order.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(
        &self,
        document: &Path,
        output_dir: &Path,
        options: &RenderOptions,
    ) -> Result<Vec<PathBuf>, AppError>;
}

/// Poppler-based renderer. Which CLI tool is available differs between hosts,
/// so the backend is probed once at startup rather than per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfRenderer {
    Cairo,
    Ppm,
}

impl PdfRenderer {
    pub fn tool(&self) -> &'static str {
        match self {
            PdfRenderer::Cairo => "pdftocairo",
            PdfRenderer::Ppm => "pdftoppm",
        }
    }

    /// Probes the host for a usable backend, preferring pdftocairo.
    pub async fn detect() -> Result<Self, AppError> {
        for candidate in [PdfRenderer::Cairo, PdfRenderer::Ppm] {
            if probe(candidate.tool()).await {
                info!(tool = candidate.tool(), "selected PDF renderer backend");
                return Ok(candidate);
            }
        }
        Err(AppError::InternalError(
            "no PDF renderer found on PATH (need pdftocairo or pdftoppm)".into(),
        ))
    }
}

async fn probe(tool: &str) -> bool {
    Command::new(tool)
        .arg("-v")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}

#[async_trait]
impl DocumentRenderer for PdfRenderer {
    async fn render(
        &self,
        document: &Path,
        output_dir: &Path,
        options: &RenderOptions,
    ) -> Result<Vec<PathBuf>, AppError> {
        tokio::fs::create_dir_all(output_dir).await?;

        let out_prefix = output_dir.join(&options.page_prefix);

        let mut cmd = Command::new(self.tool());
        cmd.arg(options.format.flag())
            .arg("-scale-to")
            .arg(options.max_dimension.to_string())
            .arg(document)
            .arg(&out_prefix)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| AppError::Conversion(format!("failed to spawn {}: {}", self.tool(), e)))?;

        let output = match tokio::time::timeout(options.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| AppError::Conversion(e.to_string()))?,
            Err(_) => {
                return Err(AppError::Conversion(format!(
                    "{} did not finish within {}s",
                    self.tool(),
                    options.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Conversion(format!(
                "{} exited with {}: {}",
                self.tool(),
                output.status,
                stderr.trim()
            )));
        }

        let pages =
            collect_pages(output_dir, &options.page_prefix, options.format.extensions()).await?;
        if pages.is_empty() {
            return Err(AppError::Conversion("renderer produced no pages".into()));
        }
        Ok(pages)
    }
}

/// Lists `prefix-N.ext` files under `dir`, ordered by the numeric page
/// component. Lexicographic ordering would put page-10 before page-2.
async fn collect_pages(
    dir: &Path,
    prefix: &str,
    extensions: &[&str],
) -> Result<Vec<PathBuf>, AppError> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut pages: Vec<(u32, PathBuf)> = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(number) = page_number(name, prefix, extensions) {
            pages.push((number, entry.path()));
        }
    }

    pages.sort_by_key(|(number, _)| *number);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

fn page_number(file_name: &str, prefix: &str, extensions: &[&str]) -> Option<u32> {
    let rest = file_name.strip_prefix(prefix)?.strip_prefix('-')?;
    let (digits, ext) = rest.rsplit_once('.')?;
    if !extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_numbers() {
        assert_eq!(page_number("page-1.jpg", "page", &["jpg", "jpeg"]), Some(1));
        assert_eq!(page_number("page-12.jpeg", "page", &["jpg", "jpeg"]), Some(12));
        // pdftoppm zero-pads page numbers
        assert_eq!(page_number("page-03.jpg", "page", &["jpg", "jpeg"]), Some(3));
    }

    #[test]
    fn rejects_foreign_files() {
        assert_eq!(page_number("page-1.png", "page", &["jpg"]), None);
        assert_eq!(page_number("cover-1.jpg", "page", &["jpg"]), None);
        assert_eq!(page_number("page-x.jpg", "page", &["jpg"]), None);
        assert_eq!(page_number("page.jpg", "page", &["jpg"]), None);
    }

    #[tokio::test]
    async fn orders_pages_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for n in [10, 2, 1, 11] {
            std::fs::write(dir.path().join(format!("page-{n}.jpg")), b"x").unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let pages = collect_pages(dir.path(), "page", &["jpg"]).await.unwrap();
        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["page-1.jpg", "page-2.jpg", "page-10.jpg", "page-11.jpg"]);
    }
}
