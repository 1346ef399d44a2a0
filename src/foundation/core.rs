use crate::foundation::error::{PhotoboothError, PhotoboothResult};

pub use kurbo::{BezPath, Point, Rect};

/// Output raster size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Fails on a zero dimension.
    pub fn new(width: u32, height: u32) -> PhotoboothResult<Self> {
        if width == 0 || height == 0 {
            return Err(PhotoboothError::validation(
                "canvas width and height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Rectangle left after insetting every side by `inset` pixels.
    pub fn inset_rect(self, inset: u32) -> PhotoboothResult<InsetRect> {
        let doubled = inset.saturating_mul(2);
        if doubled >= self.width || doubled >= self.height {
            return Err(PhotoboothError::validation(format!(
                "border inset {inset} leaves no photo area on a {}x{} canvas",
                self.width, self.height
            )));
        }
        Ok(InsetRect {
            x: inset,
            y: inset,
            width: self.width - doubled,
            height: self.height - doubled,
        })
    }
}

/// Integer pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsetRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width; always > 0.
    pub width: u32,
    /// Height; always > 0.
    pub height: u32,
}

/// Straight (non-premultiplied) RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; `255` is opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the canvas background.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Color with full alpha.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Compile-time `#rrggbb` literal. Panics (at const-eval) on malformed input.
    pub const fn hex(s: &str) -> Self {
        const fn nibble(c: u8) -> u8 {
            match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hex digit"),
            }
        }

        let b = s.as_bytes();
        assert!(b.len() == 7 && b[0] == b'#', "hex color must be #RRGGBB");
        Self::opaque(
            nibble(b[1]) * 16 + nibble(b[2]),
            nibble(b[3]) * 16 + nibble(b[4]),
            nibble(b[5]) * 16 + nibble(b[6]),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
