use image::RgbaImage;

use crate::foundation::{
    error::{PhotoboothError, PhotoboothResult},
    settings::StreamConstraints,
};

/// A live camera stream. At most one stream is active per camera.
#[async_trait::async_trait]
pub trait Camera: Send {
    /// Acquire the device. Fails with [`PhotoboothError::CameraAccess`] on permission or
    /// device errors.
    async fn acquire(&mut self, constraints: &StreamConstraints) -> PhotoboothResult<()>;

    /// `true` while a stream is open.
    fn is_active(&self) -> bool;

    /// Copy the frame currently on screen.
    fn snapshot(&mut self) -> PhotoboothResult<RgbaImage>;

    /// Stop every track of the stream. Calling this on an inactive camera is a no-op.
    fn release(&mut self);
}

/// Camera that serves a fixed list of frames in rotation.
#[derive(Clone, Debug)]
pub struct StillCamera {
    frames: Vec<RgbaImage>,
    next: usize,
    active: bool,
    acquisitions: usize,
}

impl StillCamera {
    /// Fails on an empty frame list.
    pub fn new(frames: Vec<RgbaImage>) -> PhotoboothResult<Self> {
        if frames.is_empty() {
            return Err(PhotoboothError::validation(
                "still camera needs at least one frame",
            ));
        }
        Ok(Self {
            frames,
            next: 0,
            active: false,
            acquisitions: 0,
        })
    }

    /// How many times the device was opened.
    pub fn acquisitions(&self) -> usize {
        self.acquisitions
    }
}

#[async_trait::async_trait]
impl Camera for StillCamera {
    async fn acquire(&mut self, constraints: &StreamConstraints) -> PhotoboothResult<()> {
        tracing::debug!(
            width = constraints.width,
            height = constraints.height,
            facing = ?constraints.facing,
            "still camera acquired"
        );
        self.active = true;
        self.acquisitions += 1;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn snapshot(&mut self) -> PhotoboothResult<RgbaImage> {
        if !self.active {
            return Err(PhotoboothError::camera("stream is not active"));
        }
        let frame = self.frames[self.next % self.frames.len()].clone();
        self.next += 1;
        Ok(frame)
    }

    fn release(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/camera.rs"]
mod tests;
