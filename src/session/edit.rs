use crate::{
    assets::decode::RawPhoto,
    border::generate::BorderStyle,
    effects::filter::FilterSpec,
    foundation::error::{PhotoboothError, PhotoboothResult},
    render::compositor::{Compositor, FinalPhoto},
    session::print_set::{PRINT_SET_LEN, PrintSet, PrintSetBuilder},
};

/// Walks the captured photos one at a time. Each photo gets its own border and filter
/// selection; saving or skipping composites it and moves on. Selections reset between
/// photos.
#[derive(Debug)]
pub struct EditSession {
    compositor: Compositor,
    raw: Vec<RawPhoto>,
    index: usize,
    border: BorderStyle,
    filter: FilterSpec,
    done: PrintSetBuilder,
}

impl EditSession {
    /// Start at the first photo. `raw` must hold exactly four photos.
    pub fn new(compositor: Compositor, raw: Vec<RawPhoto>) -> PhotoboothResult<Self> {
        if raw.len() != PRINT_SET_LEN {
            return Err(PhotoboothError::validation(format!(
                "edit session needs {PRINT_SET_LEN} captured photos, got {}",
                raw.len()
            )));
        }
        Ok(Self {
            compositor,
            raw,
            index: 0,
            border: BorderStyle::None,
            filter: FilterSpec::None,
            done: PrintSetBuilder::new(),
        })
    }

    /// 1-based number of the photo under edit.
    pub fn photo_number(&self) -> usize {
        (self.index + 1).min(PRINT_SET_LEN)
    }

    /// The photo under edit is the fourth.
    pub fn is_last(&self) -> bool {
        self.index + 1 == PRINT_SET_LEN
    }

    /// Every photo has been saved or skipped.
    pub fn is_finished(&self) -> bool {
        self.index >= PRINT_SET_LEN
    }

    /// Source of the photo under edit; `None` once finished.
    pub fn current(&self) -> Option<&RawPhoto> {
        self.raw.get(self.index)
    }

    /// Selected border.
    pub fn border(&self) -> BorderStyle {
        self.border
    }

    /// Selected filter.
    pub fn filter(&self) -> FilterSpec {
        self.filter
    }

    /// Change the border for the photo under edit.
    pub fn select_border(&mut self, border: BorderStyle) {
        self.border = border;
    }

    /// Change the filter for the photo under edit.
    pub fn select_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
    }

    /// Composite the current photo with the current selection without advancing.
    pub async fn preview(&self) -> PhotoboothResult<FinalPhoto> {
        let photo = self.current_or_err()?.clone();
        let req = self.compositor.request(photo, self.border, self.filter);
        self.compositor.compose(req).await
    }

    /// Keep the current selection and move to the next photo. Returns the print set once
    /// the last photo is saved.
    #[tracing::instrument(skip(self), fields(photo = self.photo_number(), border = %self.border, filter = %self.filter))]
    pub async fn save(&mut self) -> PhotoboothResult<Option<PrintSet>> {
        let edited = self.preview().await?;
        self.advance(edited)
    }

    /// Accept the photo unedited: no border, no filter.
    pub async fn skip(&mut self) -> PhotoboothResult<Option<PrintSet>> {
        let photo = self.current_or_err()?.clone();
        let req = self
            .compositor
            .request(photo, BorderStyle::None, FilterSpec::None);
        let edited = self.compositor.compose(req).await?;
        self.advance(edited)
    }

    fn current_or_err(&self) -> PhotoboothResult<&RawPhoto> {
        self.current()
            .ok_or_else(|| PhotoboothError::validation("every photo has already been edited"))
    }

    fn advance(&mut self, edited: FinalPhoto) -> PhotoboothResult<Option<PrintSet>> {
        self.done.push(edited)?;
        self.index += 1;
        self.border = BorderStyle::None;
        self.filter = FilterSpec::None;
        if !self.done.is_complete() {
            return Ok(None);
        }
        tracing::info!("all photos edited");
        std::mem::take(&mut self.done).finish().map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/edit.rs"]
mod tests;
