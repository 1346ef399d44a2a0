use std::sync::Arc;

use image::RgbaImage;

use crate::{
    assets::decode::{JPEG_MIME, RawPhoto, decode_rgba, encode_jpeg, to_data_uri},
    border::generate::{BorderStyle, generate},
    effects::filter::FilterSpec,
    foundation::{
        core::{Canvas, InsetRect, Rgba8},
        error::{PhotoboothError, PhotoboothResult},
        settings::ComposeSettings,
    },
    render::cpu::CpuCanvas,
};

/// Everything needed to produce one edited photo. Consumed by [`Compositor::compose`].
#[derive(Clone, Debug)]
pub struct CompositionRequest {
    /// Encoded source.
    pub photo: RawPhoto,
    /// Applied to the photo pixels only.
    pub filter: FilterSpec,
    /// Drawn on top of the photo.
    pub border: BorderStyle,
    /// Output size.
    pub canvas: Canvas,
    /// Padding between the canvas edge and the photo.
    pub border_inset: u32,
}

impl CompositionRequest {
    /// Padding is `settings.border_inset` when a border is selected, zero otherwise.
    pub fn new(
        photo: RawPhoto,
        border: BorderStyle,
        filter: FilterSpec,
        settings: &ComposeSettings,
    ) -> Self {
        let border_inset = if border.is_none() {
            0
        } else {
            settings.border_inset
        };
        Self {
            photo,
            filter,
            border,
            canvas: settings.canvas,
            border_inset,
        }
    }

    /// Where the photo lands; fails if the inset leaves no area.
    pub fn photo_rect(&self) -> PhotoboothResult<InsetRect> {
        self.canvas.inset_rect(self.border_inset)
    }
}

/// A composited, encoded photo. Cheap to clone.
#[derive(Clone, Debug)]
pub struct FinalPhoto {
    image: Arc<RgbaImage>,
    encoded: Arc<Vec<u8>>,
}

impl FinalPhoto {
    /// Canvas width.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The raster as drawn, before lossy encoding.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// JPEG bytes used for every export path.
    pub fn encoded(&self) -> &[u8] {
        self.encoded.as_slice()
    }

    /// Always [`JPEG_MIME`].
    pub fn mime(&self) -> &'static str {
        JPEG_MIME
    }

    /// The JPEG bytes as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        to_data_uri(JPEG_MIME, self.encoded())
    }
}

/// Photo + filter + border compositing.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    settings: ComposeSettings,
}

impl Compositor {
    /// Compositor rendering with `settings`.
    pub fn new(settings: ComposeSettings) -> Self {
        Self { settings }
    }

    /// Active settings.
    pub fn settings(&self) -> &ComposeSettings {
        &self.settings
    }

    /// [`CompositionRequest::new`] with this compositor's settings.
    pub fn request(
        &self,
        photo: RawPhoto,
        border: BorderStyle,
        filter: FilterSpec,
    ) -> CompositionRequest {
        CompositionRequest::new(photo, border, filter, &self.settings)
    }

    /// Decode, composite and encode on tokio's blocking pool so the calling task never stalls
    /// on pixel work. A decode failure is returned as-is; nothing is retried.
    #[tracing::instrument(skip(self, req), fields(border = %req.border, filter = %req.filter))]
    pub async fn compose(&self, req: CompositionRequest) -> PhotoboothResult<FinalPhoto> {
        let this = self.clone();
        let span = tracing::Span::current();
        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            this.compose_blocking(req)
        })
        .await
        .map_err(|e| PhotoboothError::Other(anyhow::Error::new(e)))?
    }

    /// Synchronous [`Compositor::compose`] for callers without a runtime.
    pub fn compose_blocking(&self, req: CompositionRequest) -> PhotoboothResult<FinalPhoto> {
        let decoded = decode_rgba(req.photo.bytes())?;
        let raster = self.render(&req, &decoded)?;
        self.finish(raster)
    }

    /// Composite an already-decoded source: white background, filtered photo in the inset
    /// rectangle, then the border on top.
    pub fn render(
        &self,
        req: &CompositionRequest,
        photo: &RgbaImage,
    ) -> PhotoboothResult<RgbaImage> {
        let photo_rect = req.photo_rect()?;
        let transform = req.filter.resolve();

        let mut canvas = CpuCanvas::new(req.canvas)?;
        canvas.fill_background(Rgba8::WHITE);
        canvas.draw_photo(photo, photo_rect, &transform)?;

        let mut stamped = 0usize;
        for primitive in generate(
            req.border,
            req.canvas.width,
            req.canvas.height,
            req.border_inset,
        ) {
            canvas.draw_primitive(&primitive);
            stamped += 1;
        }
        tracing::debug!(
            src_w = photo.width(),
            src_h = photo.height(),
            inset = req.border_inset,
            primitives = stamped,
            "composited photo"
        );

        canvas.finish()
    }

    fn finish(&self, raster: RgbaImage) -> PhotoboothResult<FinalPhoto> {
        let encoded = encode_jpeg(&raster, self.settings.jpeg_quality)?;
        Ok(FinalPhoto {
            image: Arc::new(raster),
            encoded: Arc::new(encoded),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
