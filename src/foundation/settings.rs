use std::{path::Path, time::Duration};

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{PhotoboothError, PhotoboothResult},
};

/// Top-level booth configuration. Every field has a default, so an empty JSON object is valid.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoothSettings {
    /// Countdown and camera.
    pub capture: CaptureSettings,
    /// Output canvas and encoding.
    pub compose: ComposeSettings,
}

/// Capture step configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// Photos per session.
    pub shots: usize,
    /// Countdown start value; the snapshot fires on the tick after `1`.
    pub countdown_ticks: u8,
    /// Milliseconds between ticks; must be non-zero.
    pub tick_interval_ms: u64,
    /// Requested camera stream.
    pub camera: StreamConstraints,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            shots: 4,
            countdown_ticks: 3,
            tick_interval_ms: 1000,
            camera: StreamConstraints::default(),
        }
    }
}

impl CaptureSettings {
    /// Delay between two countdown ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Rejects zero shots, zero ticks and a zero tick interval.
    pub fn validate(&self) -> PhotoboothResult<()> {
        if self.shots == 0 {
            return Err(PhotoboothError::validation("capture.shots must be > 0"));
        }
        if self.countdown_ticks == 0 {
            return Err(PhotoboothError::validation(
                "capture.countdown_ticks must be > 0",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(PhotoboothError::validation(
                "capture.tick_interval_ms must be > 0",
            ));
        }
        Ok(())
    }
}

/// Lossy encoder quality must lie in `1..=100`.
pub(crate) fn validate_jpeg_quality(quality: u8) -> PhotoboothResult<()> {
    if !(1..=100).contains(&quality) {
        return Err(PhotoboothError::validation(format!(
            "jpeg quality {quality} is outside 1..=100"
        )));
    }
    Ok(())
}

/// Which camera to prefer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    /// Front camera, facing the user.
    User,
    /// Rear camera.
    Environment,
}

/// What the capture step asks of the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StreamConstraints {
    /// Ideal frame width.
    pub width: u32,
    /// Ideal frame height.
    pub height: u32,
    /// Preferred camera.
    pub facing: FacingMode,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            facing: FacingMode::User,
        }
    }
}

/// Compositing configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComposeSettings {
    /// Output size, 800×600 by default.
    pub canvas: Canvas,
    /// Photo padding used whenever a border is selected.
    pub border_inset: u32,
    /// Lossy encoder quality in `1..=100`.
    pub jpeg_quality: u8,
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 800,
                height: 600,
            },
            border_inset: 40,
            jpeg_quality: 90,
        }
    }
}

impl BoothSettings {
    /// Load settings from a JSON file, then apply environment overrides.
    pub fn from_path(path: &Path) -> PhotoboothResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse settings '{}'", path.display()))?;
        settings.with_env_overrides().validated()
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> PhotoboothResult<Self> {
        Self::default().with_env_overrides().validated()
    }

    /// `PHOTOBOOTH_JPEG_QUALITY` and `PHOTOBOOTH_TICK_MS` take precedence over file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(q) = std::env::var("PHOTOBOOTH_JPEG_QUALITY")
            .ok()
            .and_then(|v| v.parse::<u8>().ok())
        {
            self.compose.jpeg_quality = q;
        }
        if let Some(ms) = std::env::var("PHOTOBOOTH_TICK_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.capture.tick_interval_ms = ms;
        }
        self
    }

    /// Reject values that would make capture or compositing fail later.
    pub fn validate(&self) -> PhotoboothResult<()> {
        self.capture.validate()?;
        validate_jpeg_quality(self.compose.jpeg_quality)?;
        Canvas::new(self.compose.canvas.width, self.compose.canvas.height)?;
        self.compose.canvas.inset_rect(self.compose.border_inset)?;
        if self.compose.canvas.width > u32::from(u16::MAX)
            || self.compose.canvas.height > u32::from(u16::MAX)
        {
            return Err(PhotoboothError::validation("compose.canvas exceeds u16"));
        }
        Ok(())
    }

    fn validated(self) -> PhotoboothResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/settings.rs"]
mod tests;
