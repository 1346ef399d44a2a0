use std::path::{Path, PathBuf};

use crate::foundation::error::{PhotoboothError, PhotoboothResult};

/// Tone of a [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// The action went through.
    Success,
    /// The action failed; nothing was changed.
    Destructive,
}

/// Short user-facing message produced by an export action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Success or failure.
    pub kind: NoticeKind,
    /// Headline.
    pub title: String,
    /// One-sentence detail.
    pub description: String,
}

impl Notice {
    /// A [`NoticeKind::Success`] notice.
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    /// A [`NoticeKind::Destructive`] notice.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }

    /// `kind == Success`.
    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

/// Result of [`LayoutPresenter::print`](crate::LayoutPresenter::print).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrintOutcome {
    /// The document reached the print surface.
    Sent,
    /// The surface refused it; the action was abandoned.
    SurfaceUnavailable,
}

/// Somewhere a print document can be sent.
pub trait PrintSurface {
    /// Hand over a complete HTML document.
    fn print(&mut self, document: &str) -> PhotoboothResult<()>;
}

/// Writes the print document to an HTML file.
#[derive(Clone, Debug)]
pub struct HtmlFilePrintSurface {
    path: PathBuf,
}

impl HtmlFilePrintSurface {
    /// Surface writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintSurface for HtmlFilePrintSurface {
    fn print(&mut self, document: &str) -> PhotoboothResult<()> {
        std::fs::write(&self.path, document).map_err(|e| {
            PhotoboothError::print_surface(format!("{}: {e}", self.path.display()))
        })
    }
}

/// Receives downloaded files.
pub trait DownloadSink {
    /// Store one file under `file_name`.
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> PhotoboothResult<()>;
}

/// Saves downloads into one directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    saved: Vec<PathBuf>,
}

impl DirectorySink {
    /// Sink saving into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            saved: Vec::new(),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in order.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> PhotoboothResult<()> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(PhotoboothError::validation(format!(
                "invalid download file name '{file_name}'"
            )));
        }
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)?;
        self.saved.push(path);
        Ok(())
    }
}

/// System clipboard holding a single image blob.
#[async_trait::async_trait]
pub trait Clipboard: Send {
    /// Replace the clipboard content with one image.
    async fn write_image(&mut self, mime: &str, blob: &[u8]) -> PhotoboothResult<()>;
}

/// Keeps the last written blob in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    content: Option<(String, Vec<u8>)>,
}

impl MemoryClipboard {
    /// Empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// MIME type of the held blob.
    pub fn mime(&self) -> Option<&str> {
        self.content.as_ref().map(|(mime, _)| mime.as_str())
    }

    /// The held blob.
    pub fn blob(&self) -> Option<&[u8]> {
        self.content.as_ref().map(|(_, blob)| blob.as_slice())
    }
}

#[async_trait::async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_image(&mut self, mime: &str, blob: &[u8]) -> PhotoboothResult<()> {
        if blob.is_empty() {
            return Err(PhotoboothError::clipboard("empty image blob"));
        }
        self.content = Some((mime.to_owned(), blob.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/export.rs"]
mod tests;
