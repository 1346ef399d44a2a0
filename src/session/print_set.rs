use crate::{
    foundation::error::{PhotoboothError, PhotoboothResult},
    render::compositor::FinalPhoto,
};

/// Photos per print sheet.
pub const PRINT_SET_LEN: usize = 4;

/// Exactly four finished photos in capture order.
#[derive(Clone, Debug)]
pub struct PrintSet {
    photos: [FinalPhoto; PRINT_SET_LEN],
}

impl PrintSet {
    /// Fails unless `photos` holds exactly four entries.
    pub fn new(photos: Vec<FinalPhoto>) -> PhotoboothResult<Self> {
        let photos: [FinalPhoto; PRINT_SET_LEN] = photos.try_into().map_err(|rest: Vec<_>| {
            PhotoboothError::validation(format!(
                "print set needs exactly {PRINT_SET_LEN} photos, got {}",
                rest.len()
            ))
        })?;
        Ok(Self { photos })
    }

    /// All four, in capture order.
    pub fn photos(&self) -> &[FinalPhoto] {
        &self.photos
    }

    /// The first captured photo.
    pub fn first(&self) -> &FinalPhoto {
        &self.photos[0]
    }

    /// Photo at a 0-based position.
    pub fn get(&self, index: usize) -> Option<&FinalPhoto> {
        self.photos.get(index)
    }

    /// Iterate in capture order.
    pub fn iter(&self) -> std::slice::Iter<'_, FinalPhoto> {
        self.photos.iter()
    }

    /// Always [`PRINT_SET_LEN`].
    pub fn len(&self) -> usize {
        PRINT_SET_LEN
    }

    /// Always `false`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Vec<FinalPhoto>> for PrintSet {
    type Error = PhotoboothError;

    fn try_from(photos: Vec<FinalPhoto>) -> PhotoboothResult<Self> {
        Self::new(photos)
    }
}

impl<'a> IntoIterator for &'a PrintSet {
    type Item = &'a FinalPhoto;
    type IntoIter = std::slice::Iter<'a, FinalPhoto>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects photos as they come out of the editor.
#[derive(Clone, Debug, Default)]
pub struct PrintSetBuilder {
    photos: Vec<FinalPhoto>,
}

impl PrintSetBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next photo; fails once four are held.
    pub fn push(&mut self, photo: FinalPhoto) -> PhotoboothResult<()> {
        if self.is_complete() {
            return Err(PhotoboothError::validation(format!(
                "print set already holds {PRINT_SET_LEN} photos"
            )));
        }
        self.photos.push(photo);
        Ok(())
    }

    /// Photos collected so far.
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Nothing collected yet.
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Four photos are held.
    pub fn is_complete(&self) -> bool {
        self.photos.len() == PRINT_SET_LEN
    }

    /// Photos still missing.
    pub fn remaining(&self) -> usize {
        PRINT_SET_LEN - self.photos.len()
    }

    /// The completed set; fails while photos are missing.
    pub fn finish(self) -> PhotoboothResult<PrintSet> {
        PrintSet::new(self.photos)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/print_set.rs"]
mod tests;
