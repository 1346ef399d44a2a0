use std::fmt::Write as _;

use crate::{
    assets::decode::JPEG_MIME,
    foundation::error::PhotoboothResult,
    layout::export::{Clipboard, DownloadSink, Notice, PrintOutcome, PrintSurface},
    render::compositor::FinalPhoto,
    session::print_set::PrintSet,
};

/// Columns of the print grid.
pub const GRID_COLUMNS: usize = 2;
/// Rows of the print grid.
pub const GRID_ROWS: usize = 2;

const PRINT_STYLE: &str = "\
body { margin: 0; padding: 20px; background: white; }
.print-layout { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; max-width: 800px; margin: 0 auto; }
.photo-slot { border: 2px dashed #ddd; aspect-ratio: 4/3; display: flex; align-items: center; justify-content: center; overflow: hidden; border-radius: 8px; }
.photo-slot img { width: 100%; height: 100%; object-fit: cover; }
@media print {
  body { padding: 0; }
  .print-layout { gap: 10px; }
}
";

/// `photobooth-{n}-{timestamp}.jpg`, `n` counting from 1.
pub fn download_file_name(index: usize, timestamp_ms: u64) -> String {
    format!("photobooth-{}-{timestamp_ms}.jpg", index + 1)
}

/// Read-only view over a finished print set plus its export actions. None of the actions
/// consume or change the set, so they can run in any order and repeatedly.
#[derive(Clone, Debug)]
pub struct LayoutPresenter {
    set: PrintSet,
}

impl LayoutPresenter {
    /// Presenter over a finished set.
    pub fn new(set: PrintSet) -> Self {
        Self { set }
    }

    /// The presented set.
    pub fn print_set(&self) -> &PrintSet {
        &self.set
    }

    /// Row-major 2×2 grid: capture order fills the top row first.
    pub fn grid(&self) -> [[&FinalPhoto; GRID_COLUMNS]; GRID_ROWS] {
        let p = self.set.photos();
        [[&p[0], &p[1]], [&p[2], &p[3]]]
    }

    /// Photos in capture order, for the on-screen preview.
    pub fn preview(&self) -> &[FinalPhoto] {
        self.set.photos()
    }

    /// Standalone HTML print sheet with every photo inlined.
    pub fn print_html(&self) -> String {
        let mut html = String::with_capacity(
            1024 + self.set.iter().map(|p| p.encoded().len() * 4 / 3 + 128).sum::<usize>(),
        );
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>Photo Print</title>\n<style>\n");
        html.push_str(PRINT_STYLE);
        html.push_str("</style>\n</head>\n<body>\n<div class=\"print-layout\">\n");
        for (i, photo) in self.set.iter().enumerate() {
            let _ = writeln!(
                html,
                "<div class=\"photo-slot\"><img src=\"{}\" alt=\"Photo {}\"></div>",
                photo.to_data_uri(),
                i + 1
            );
        }
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    /// Hand the print sheet to `surface`. An unavailable surface is reported, not raised.
    #[tracing::instrument(skip_all)]
    pub fn print(&self, surface: &mut impl PrintSurface) -> PrintOutcome {
        match surface.print(&self.print_html()) {
            Ok(()) => {
                tracing::info!("print sheet sent");
                PrintOutcome::Sent
            }
            Err(err) => {
                tracing::warn!(error = %err, "print surface unavailable");
                PrintOutcome::SurfaceUnavailable
            }
        }
    }

    /// Save every photo through `sink`, in capture order.
    #[tracing::instrument(skip(self, sink))]
    pub fn download_all(
        &self,
        sink: &mut impl DownloadSink,
        timestamp_ms: u64,
    ) -> PhotoboothResult<Notice> {
        for (i, photo) in self.set.iter().enumerate() {
            sink.save(&download_file_name(i, timestamp_ms), photo.encoded())?;
        }
        tracing::info!(count = self.set.len(), "photos downloaded");
        Ok(Notice::success(
            "All photos downloaded!",
            format!("{} photos saved to your device.", self.set.len()),
        ))
    }

    /// Copy photo 1 to the clipboard. Failures come back as a destructive notice.
    #[tracing::instrument(skip_all)]
    pub async fn copy_first_to_clipboard(&self, clipboard: &mut impl Clipboard) -> Notice {
        match clipboard
            .write_image(JPEG_MIME, self.set.first().encoded())
            .await
        {
            Ok(()) => Notice::success("First photo copied!", "The photo is ready to paste."),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard write failed");
                Notice::destructive("Copy failed", "Could not copy the photo to the clipboard.")
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/presenter.rs"]
mod tests;
