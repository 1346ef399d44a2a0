use crate::{
    assets::decode::RawPhoto,
    capture::camera::Camera,
    foundation::{
        error::{PhotoboothError, PhotoboothResult},
        settings::{CaptureSettings, validate_jpeg_quality},
    },
};

/// Where the capture session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    /// No stream; the camera is released.
    Idle,
    /// Live preview, shutter enabled.
    Streaming,
    /// Counting down; the shutter is disabled.
    Countdown(u8),
    /// Snapshot in progress.
    Capturing,
    /// All shots taken and the camera released.
    Complete,
}

/// What a single timer tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting; holds the value now shown.
    Counting(u8),
    /// A photo was appended and more remain.
    Captured {
        /// 1-based shot number.
        shot: usize,
    },
    /// The last photo was appended and the camera released.
    Complete,
}

/// Multi-shot capture session driven by an explicit countdown state machine.
///
/// `shutter` arms the countdown and every `tick` moves it one step. The snapshot is taken on
/// the tick that leaves `Countdown(1)`. `run_countdown` drives the ticks from one interval
/// timer; tests and UIs with their own clock can call `tick` directly.
pub struct CaptureSequencer<C: Camera> {
    camera: C,
    settings: CaptureSettings,
    jpeg_quality: u8,
    state: CaptureState,
    photos: Vec<RawPhoto>,
}

impl<C: Camera> CaptureSequencer<C> {
    /// Fails if `settings` or `jpeg_quality` are out of range.
    pub fn new(camera: C, settings: CaptureSettings, jpeg_quality: u8) -> PhotoboothResult<Self> {
        settings.validate()?;
        validate_jpeg_quality(jpeg_quality)?;
        Ok(Self {
            camera,
            settings,
            jpeg_quality,
            state: CaptureState::Idle,
            photos: Vec::new(),
        })
    }

    /// Current state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// The owned camera.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Photos taken so far, in capture order.
    pub fn photos(&self) -> &[RawPhoto] {
        &self.photos
    }

    /// Shots still to take.
    pub fn shots_remaining(&self) -> usize {
        self.settings.shots.saturating_sub(self.photos.len())
    }

    /// 1-based number of the shot being taken next (or the last one once complete).
    pub fn photo_number(&self) -> usize {
        (self.photos.len() + 1).min(self.settings.shots)
    }

    /// Whether the shutter is enabled, i.e. the stream is live and no countdown runs.
    pub fn can_shoot(&self) -> bool {
        self.state == CaptureState::Streaming
    }

    /// Acquire the camera. A no-op while a stream is already live.
    #[tracing::instrument(skip(self))]
    pub async fn start_camera(&mut self) -> PhotoboothResult<()> {
        match self.state {
            CaptureState::Streaming | CaptureState::Countdown(_) | CaptureState::Capturing => {
                return Ok(());
            }
            CaptureState::Complete => {
                return Err(PhotoboothError::validation(
                    "capture session is complete; reset before restarting the camera",
                ));
            }
            CaptureState::Idle => {}
        }

        // Never stack a second stream on a device that is still open.
        if self.camera.is_active() {
            self.camera.release();
        }

        match self.camera.acquire(&self.settings.camera).await {
            Ok(()) => {
                self.state = CaptureState::Streaming;
                tracing::info!("camera streaming");
                Ok(())
            }
            Err(err) => {
                self.state = CaptureState::Idle;
                tracing::warn!(error = %err, "camera unavailable");
                Err(err)
            }
        }
    }

    /// Release the stream, e.g. when navigating away. Cancels a running countdown.
    pub fn stop_camera(&mut self) {
        self.camera.release();
        if self.state != CaptureState::Complete {
            self.state = CaptureState::Idle;
        }
    }

    /// Arm the countdown. Rejected unless streaming, so countdowns never overlap.
    pub fn shutter(&mut self) -> PhotoboothResult<()> {
        if self.state != CaptureState::Streaming {
            return Err(PhotoboothError::validation(format!(
                "shutter is disabled in state {:?}",
                self.state
            )));
        }
        self.state = CaptureState::Countdown(self.settings.countdown_ticks);
        Ok(())
    }

    /// Advance the countdown by one tick.
    pub fn tick(&mut self) -> PhotoboothResult<TickOutcome> {
        match self.state {
            CaptureState::Countdown(n) if n > 1 => {
                self.state = CaptureState::Countdown(n - 1);
                Ok(TickOutcome::Counting(n - 1))
            }
            CaptureState::Countdown(_) => self.capture(),
            other => Err(PhotoboothError::validation(format!(
                "no countdown running (state {other:?})"
            ))),
        }
    }

    /// Arm the shutter and tick once per interval until the shot is taken.
    ///
    /// Dropping the future mid-countdown cancels it and re-enables the shutter.
    #[tracing::instrument(skip(self), fields(shot = self.photo_number()))]
    pub async fn run_countdown(&mut self) -> PhotoboothResult<TickOutcome> {
        self.shutter()?;
        let mut interval = tokio::time::interval(self.settings.tick_interval());
        let mut guard = CountdownGuard { seq: self };
        // The first tick of a tokio interval completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            match guard.seq.tick()? {
                TickOutcome::Counting(n) => tracing::debug!(remaining = n, "countdown"),
                done => return Ok(done),
            }
        }
    }

    /// State to fall back to when a countdown or snapshot does not finish.
    fn settled_state(&self) -> CaptureState {
        if self.camera.is_active() {
            CaptureState::Streaming
        } else {
            CaptureState::Idle
        }
    }

    fn capture(&mut self) -> PhotoboothResult<TickOutcome> {
        self.state = CaptureState::Capturing;

        let photo = self
            .camera
            .snapshot()
            .and_then(|frame| RawPhoto::from_rgba(&frame, self.jpeg_quality));
        let photo = match photo {
            Ok(photo) => photo,
            Err(err) => {
                self.state = self.settled_state();
                tracing::warn!(error = %err, "snapshot failed");
                return Err(err);
            }
        };

        self.photos.push(photo);
        let shot = self.photos.len();
        if shot >= self.settings.shots {
            self.camera.release();
            self.state = CaptureState::Complete;
            tracing::info!(shots = shot, "capture session complete");
            Ok(TickOutcome::Complete)
        } else {
            self.state = CaptureState::Streaming;
            tracing::info!(shot, "photo captured");
            Ok(TickOutcome::Captured { shot })
        }
    }

    /// Hand the finished sequence over, in capture order.
    pub fn take_photos(&mut self) -> PhotoboothResult<Vec<RawPhoto>> {
        if self.state != CaptureState::Complete {
            return Err(PhotoboothError::validation(format!(
                "capture incomplete: {} of {} photos",
                self.photos.len(),
                self.settings.shots
            )));
        }
        Ok(std::mem::take(&mut self.photos))
    }

    /// Drop collected photos and return to `Idle` for a new session.
    pub fn reset(&mut self) {
        self.camera.release();
        self.photos.clear();
        self.state = CaptureState::Idle;
    }
}

/// Leaves `Countdown` if a `run_countdown` future is dropped before the shot.
struct CountdownGuard<'a, C: Camera> {
    seq: &'a mut CaptureSequencer<C>,
}

impl<C: Camera> Drop for CountdownGuard<'_, C> {
    fn drop(&mut self) {
        if let CaptureState::Countdown(n) = self.seq.state {
            self.seq.state = self.seq.settled_state();
            tracing::debug!(remaining = n, "countdown cancelled");
        }
    }
}

impl<C: Camera> Drop for CaptureSequencer<C> {
    fn drop(&mut self) {
        self.camera.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sequencer.rs"]
mod tests;
