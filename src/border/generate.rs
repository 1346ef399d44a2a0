use std::fmt;

use crate::{
    border::shapes::{BandEdge, DrawPrimitive, FlowerMotif, HeartMotif, MotifShape, StarMotif},
    foundation::core::{Point, Rect, Rgba8},
};

/// Border band width used by the editor.
pub const DEFAULT_BORDER_INSET: u32 = 40;

/// Heart fill.
pub const HEART_PINK: Rgba8 = Rgba8::hex("#ec4899");
/// Star fill.
pub const STAR_AMBER: Rgba8 = Rgba8::hex("#f59e0b");
/// Flower petal fill.
pub const FLOWER_PURPLE: Rgba8 = Rgba8::hex("#a855f7");
/// Flower center dot.
pub const FLOWER_CENTER: Rgba8 = Rgba8::hex("#fbbf24");

/// Red, orange, yellow, green, blue, indigo, violet.
pub const RAINBOW: [Rgba8; 7] = [
    Rgba8::hex("#ef4444"),
    Rgba8::hex("#f97316"),
    Rgba8::hex("#eab308"),
    Rgba8::hex("#22c55e"),
    Rgba8::hex("#3b82f6"),
    Rgba8::hex("#6366f1"),
    Rgba8::hex("#a855f7"),
];

static HEARTS: HeartMotif = HeartMotif {
    size: 12.0,
    color: HEART_PINK,
};
static STARS: StarMotif = StarMotif {
    radius: 10.0,
    color: STAR_AMBER,
};
static FLOWERS: FlowerMotif = FlowerMotif {
    size: 8.0,
    petal: FLOWER_PURPLE,
    center: FLOWER_CENTER,
};

/// Decorative frame drawn around the photo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    /// No border; the photo fills the canvas.
    #[default]
    None,
    /// Pink hearts tiled along every edge.
    Hearts,
    /// Amber five-point stars.
    Stars,
    /// Purple five-petal flowers.
    Flowers,
    /// Seven concentric color bands filling the inset.
    Rainbow,
}

impl BorderStyle {
    /// Every style, in picker order.
    pub const ALL: [BorderStyle; 5] = [
        BorderStyle::None,
        BorderStyle::Hearts,
        BorderStyle::Stars,
        BorderStyle::Flowers,
        BorderStyle::Rainbow,
    ];

    /// Lenient lookup: unknown identifiers fall back to [`BorderStyle::None`].
    pub fn parse(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "hearts" => Self::Hearts,
            "stars" => Self::Stars,
            "flowers" => Self::Flowers,
            "rainbow" => Self::Rainbow,
            _ => Self::None,
        }
    }

    /// Stable identifier, the inverse of [`BorderStyle::parse`].
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Hearts => "hearts",
            Self::Stars => "stars",
            Self::Flowers => "flowers",
            Self::Rainbow => "rainbow",
        }
    }

    /// `true` for [`BorderStyle::None`], which also means zero padding.
    pub fn is_none(self) -> bool {
        self == Self::None
    }

    /// Placement rule for this style.
    pub fn layout(self) -> BorderLayout {
        match self {
            Self::None => BorderLayout::Empty,
            Self::Hearts => BorderLayout::Tiled {
                shape: &HEARTS,
                tiling: PerimeterTiling::new(25.0, 10.0),
            },
            Self::Stars => BorderLayout::Tiled {
                shape: &STARS,
                tiling: PerimeterTiling::new(30.0, 15.0),
            },
            Self::Flowers => BorderLayout::Tiled {
                shape: &FLOWERS,
                tiling: PerimeterTiling::new(25.0, 15.0),
            },
            Self::Rainbow => BorderLayout::Bands { colors: &RAINBOW },
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// How a [`BorderStyle`] places its primitives.
#[derive(Clone, Copy, Debug)]
pub enum BorderLayout {
    /// Nothing is drawn.
    Empty,
    /// One motif stamped repeatedly around the perimeter.
    Tiled {
        /// Motif stamped at every position.
        shape: &'static dyn MotifShape,
        /// Stamp positions.
        tiling: PerimeterTiling,
    },
    /// Nested bands, outermost color first.
    Bands {
        /// Band colors from the canvas edge inwards.
        colors: &'static [Rgba8],
    },
}

/// Where motifs land along the canvas perimeter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerimeterTiling {
    /// Distance between two stamps along an edge.
    pub spacing: f64,
    /// Added to every along-edge step.
    pub lead: f64,
    /// Cross-edge offset from the top/left edge.
    pub near: f64,
    /// Cross-edge offset subtracted from the bottom/right edge.
    pub far: f64,
}

impl PerimeterTiling {
    /// Tiling with the standard 15px/25px cross-edge offsets.
    pub const fn new(spacing: f64, lead: f64) -> Self {
        Self {
            spacing,
            lead,
            near: 15.0,
            far: 25.0,
        }
    }

    /// Number of steps `k` with `k * spacing < extent`.
    fn steps(&self, extent: f64) -> usize {
        if extent <= 0.0 || self.spacing <= 0.0 {
            return 0;
        }
        (extent / self.spacing).ceil() as usize
    }

    /// Tile `shape` along all four edges: top/bottom pairs first, then left/right pairs.
    /// Corner motifs are stamped by both passes.
    pub fn tile(
        self,
        shape: &'static dyn MotifShape,
        width: f64,
        height: f64,
    ) -> TiledMotifs {
        TiledMotifs {
            shape,
            tiling: self,
            width,
            height,
            h_steps: self.steps(width),
            v_steps: self.steps(height),
            next: 0,
        }
    }
}

/// Lazy perimeter tiling. A clone continues from the same cursor.
#[derive(Clone, Debug)]
pub struct TiledMotifs {
    shape: &'static dyn MotifShape,
    tiling: PerimeterTiling,
    width: f64,
    height: f64,
    h_steps: usize,
    v_steps: usize,
    next: usize,
}

impl TiledMotifs {
    fn total(&self) -> usize {
        2 * (self.h_steps + self.v_steps)
    }

    fn anchor_at(&self, i: usize) -> Point {
        let t = &self.tiling;
        let along = |k: usize| (k as f64) * t.spacing + t.lead;
        let horizontal = 2 * self.h_steps;
        if i < horizontal {
            let x = along(i / 2);
            if i % 2 == 0 {
                Point::new(x, t.near)
            } else {
                Point::new(x, self.height - t.far)
            }
        } else {
            let j = i - horizontal;
            let y = along(j / 2);
            if j % 2 == 0 {
                Point::new(t.near, y)
            } else {
                Point::new(self.width - t.far, y)
            }
        }
    }
}

impl Iterator for TiledMotifs {
    type Item = DrawPrimitive;

    fn next(&mut self) -> Option<DrawPrimitive> {
        if self.next >= self.total() {
            return None;
        }
        let at = self.anchor_at(self.next);
        self.next += 1;
        Some(self.shape.stamp(at))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.total() - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for TiledMotifs {}

/// Concentric color bands, one rectangle per edge per color.
#[derive(Clone, Debug)]
pub struct RainbowBands {
    colors: &'static [Rgba8],
    width: f64,
    height: f64,
    inset: f64,
    next: usize,
}

impl RainbowBands {
    const EDGES: [BandEdge; 4] = [BandEdge::Top, BandEdge::Bottom, BandEdge::Left, BandEdge::Right];

    /// Width of one band: the inset split evenly between the colors.
    pub fn stripe_width(&self) -> f64 {
        if self.colors.is_empty() {
            return 0.0;
        }
        self.inset / self.colors.len() as f64
    }

    fn band(&self, i: usize) -> DrawPrimitive {
        let stripe = self.stripe_width();
        let color_idx = i / Self::EDGES.len();
        let edge = Self::EDGES[i % Self::EDGES.len()];
        let offset = color_idx as f64 * stripe;
        let (w, h, inset) = (self.width, self.height, self.inset);

        let rect = match edge {
            BandEdge::Top => Rect::new(0.0, offset, w, offset + stripe),
            BandEdge::Bottom => {
                let y = h - inset + offset;
                Rect::new(0.0, y, w, y + stripe)
            }
            BandEdge::Left => Rect::new(offset, 0.0, offset + stripe, h),
            BandEdge::Right => {
                let x = w - inset + offset;
                Rect::new(x, 0.0, x + stripe, h)
            }
        };
        DrawPrimitive::Band {
            edge,
            rect,
            color: self.colors[color_idx],
        }
    }
}

impl Iterator for RainbowBands {
    type Item = DrawPrimitive;

    fn next(&mut self) -> Option<DrawPrimitive> {
        if self.next >= self.colors.len() * Self::EDGES.len() {
            return None;
        }
        let band = self.band(self.next);
        self.next += 1;
        Some(band)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.colors.len() * Self::EDGES.len() - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RainbowBands {}

/// Primitive stream for one border. A pure function of the `generate` inputs.
#[derive(Clone, Debug)]
pub enum BorderMotifs {
    /// No primitives.
    Empty,
    /// Perimeter-tiled motifs.
    Tiled(TiledMotifs),
    /// Rainbow bands.
    Bands(RainbowBands),
}

impl Iterator for BorderMotifs {
    type Item = DrawPrimitive;

    fn next(&mut self) -> Option<DrawPrimitive> {
        match self {
            BorderMotifs::Empty => None,
            BorderMotifs::Tiled(it) => it.next(),
            BorderMotifs::Bands(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            BorderMotifs::Empty => (0, Some(0)),
            BorderMotifs::Tiled(it) => it.size_hint(),
            BorderMotifs::Bands(it) => it.size_hint(),
        }
    }
}

impl ExactSizeIterator for BorderMotifs {}

/// Lay out the primitives of `style` for a `width`×`height` canvas. `inset` only affects band
/// borders; tiled motifs use fixed offsets.
pub fn generate(style: BorderStyle, width: u32, height: u32, inset: u32) -> BorderMotifs {
    let (w, h) = (f64::from(width), f64::from(height));
    match style.layout() {
        BorderLayout::Empty => BorderMotifs::Empty,
        BorderLayout::Tiled { shape, tiling } => BorderMotifs::Tiled(tiling.tile(shape, w, h)),
        BorderLayout::Bands { colors } => BorderMotifs::Bands(RainbowBands {
            colors,
            width: w,
            height: h,
            inset: f64::from(inset),
            next: 0,
        }),
    }
}

/// [`generate`] keyed by identifier; unknown identifiers draw nothing.
pub fn generate_border(id: &str, width: u32, height: u32, inset: u32) -> BorderMotifs {
    generate(BorderStyle::parse(id), width, height, inset)
}

#[cfg(test)]
#[path = "../../tests/unit/border/generate.rs"]
mod tests;
