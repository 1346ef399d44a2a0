use std::sync::Arc;

use base64::Engine as _;
use image::RgbaImage;

use crate::foundation::error::{PhotoboothError, PhotoboothResult};

/// MIME type of every encoded photo.
pub const JPEG_MIME: &str = "image/jpeg";

/// One captured shot, kept in its lossy-encoded form until it is composited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPhoto {
    bytes: Arc<Vec<u8>>,
}

impl RawPhoto {
    /// Wrap already-encoded bytes. Decoding is deferred to the compositor.
    pub fn from_encoded(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Arc::new(bytes.into()),
        }
    }

    /// Encode a snapshot raster the way the capture step stores it.
    pub fn from_rgba(frame: &RgbaImage, quality: u8) -> PhotoboothResult<Self> {
        Ok(Self::from_encoded(encode_jpeg(frame, quality)?))
    }

    /// Wrap the payload of a base64 `data:` URI.
    pub fn from_data_uri(uri: &str) -> PhotoboothResult<Self> {
        Ok(Self::from_encoded(decode_data_uri(uri)?))
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

/// Decode encoded image bytes into a straight-alpha RGBA8 raster.
pub fn decode_rgba(bytes: &[u8]) -> PhotoboothResult<RgbaImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| PhotoboothError::decode(e.to_string()))?;
    Ok(dyn_img.to_rgba8())
}

/// Lossy-encode a raster. Alpha is dropped; callers composite onto an opaque background first.
pub fn encode_jpeg(img: &RgbaImage, quality: u8) -> PhotoboothResult<Vec<u8>> {
    let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality)
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PhotoboothError::encode(e.to_string()))?;
    Ok(buf)
}

/// Base64 `data:` URI for `bytes`.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{b64}")
}

/// Extract the payload of a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> PhotoboothResult<Vec<u8>> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| PhotoboothError::decode("not a data: URI"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| PhotoboothError::decode("data: URI has no payload"))?;
    if !meta.ends_with(";base64") {
        return Err(PhotoboothError::decode("only base64 data: URIs are supported"));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| PhotoboothError::decode(format!("invalid base64 payload: {e}")))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
