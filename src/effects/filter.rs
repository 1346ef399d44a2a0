use std::fmt;

/// Named photo filters offered by the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterSpec {
    /// Identity; pixels pass through untouched.
    #[default]
    None,
    /// Light sepia, more saturation, slight hue shift.
    Warm,
    /// Hue rotated half-way round, slightly brighter.
    Cool,
    /// Stronger sepia, higher contrast, darker.
    Vintage,
    /// Brighter, more contrast and saturation.
    Bright,
}

impl FilterSpec {
    /// Every filter, in picker order.
    pub const ALL: [FilterSpec; 5] = [
        FilterSpec::None,
        FilterSpec::Warm,
        FilterSpec::Cool,
        FilterSpec::Vintage,
        FilterSpec::Bright,
    ];

    /// Lenient lookup: unknown identifiers fall back to [`FilterSpec::None`].
    pub fn parse(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "warm" => Self::Warm,
            "cool" => Self::Cool,
            "vintage" => Self::Vintage,
            "bright" => Self::Bright,
            _ => Self::None,
        }
    }

    /// Stable identifier, the inverse of [`FilterSpec::parse`].
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Vintage => "vintage",
            Self::Bright => "bright",
        }
    }

    /// The ordered op list this filter applies.
    pub fn resolve(self) -> ColorTransformSpec {
        use ColorOp::*;

        let ops = match self {
            Self::None => vec![],
            Self::Warm => vec![Sepia(0.3), Saturate(1.2), HueRotateDeg(10.0)],
            Self::Cool => vec![Saturate(1.1), HueRotateDeg(180.0), Brightness(1.1)],
            Self::Vintage => vec![Sepia(0.5), Contrast(1.2), Brightness(0.9)],
            Self::Bright => vec![Brightness(1.2), Contrast(1.1), Saturate(1.2)],
        };
        ColorTransformSpec { ops }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Resolve a filter identifier; anything unrecognised yields the identity transform.
pub fn resolve_filter(id: &str) -> ColorTransformSpec {
    FilterSpec::parse(id).resolve()
}

/// One step of a filter composite, with its magnitude.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "amount")]
pub enum ColorOp {
    /// Blend towards sepia; `0` is identity, `1` full sepia.
    Sepia(f32),
    /// Saturation factor; `1` is identity.
    Saturate(f32),
    /// Hue rotation in degrees.
    HueRotateDeg(f32),
    /// Linear channel multiplier.
    Brightness(f32),
    /// Scale around mid-gray.
    Contrast(f32),
}

impl ColorOp {
    fn apply(self, rgb: [f32; 3]) -> [f32; 3] {
        let out = match self {
            ColorOp::Sepia(amount) => mul3(sepia_matrix(amount), rgb),
            ColorOp::Saturate(s) => mul3(saturate_matrix(s), rgb),
            ColorOp::HueRotateDeg(deg) => mul3(hue_rotate_matrix(deg), rgb),
            ColorOp::Brightness(k) => rgb.map(|c| c * k),
            ColorOp::Contrast(k) => rgb.map(|c| (c - 0.5) * k + 0.5),
        };
        out.map(|c| c.clamp(0.0, 1.0))
    }

    fn css(self) -> String {
        match self {
            ColorOp::Sepia(v) => format!("sepia({v})"),
            ColorOp::Saturate(v) => format!("saturate({v})"),
            ColorOp::HueRotateDeg(v) => format!("hue-rotate({v}deg)"),
            ColorOp::Brightness(v) => format!("brightness({v})"),
            ColorOp::Contrast(v) => format!("contrast({v})"),
        }
    }
}

/// Ordered color-op composite. An empty list is the identity.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorTransformSpec {
    /// Applied front to back.
    pub ops: Vec<ColorOp>,
}

impl ColorTransformSpec {
    /// Empty composite.
    pub fn identity() -> Self {
        Self::default()
    }

    /// `true` when no op would run.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Normalized sRGB in, normalized sRGB out; every op clamps to `[0, 1]`.
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.ops.iter().fold(rgb, |acc, op| op.apply(acc))
    }

    /// [`ColorTransformSpec::apply_rgb`] on 8-bit channels, rounding back to the nearest value.
    pub fn apply_rgb8(&self, rgb: [u8; 3]) -> [u8; 3] {
        if self.is_identity() {
            return rgb;
        }
        let out = self.apply_rgb(rgb.map(|c| f32::from(c) / 255.0));
        out.map(|c| (c * 255.0).round() as u8)
    }

    /// Transform a straight-alpha RGBA8 buffer. Alpha is left untouched.
    pub fn apply_in_place(&self, rgba: &mut [u8]) {
        if self.is_identity() {
            return;
        }
        for px in rgba.chunks_exact_mut(4) {
            let [r, g, b] = self.apply_rgb8([px[0], px[1], px[2]]);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    }

    /// CSS `filter` string for the same composite (`"none"` for identity).
    pub fn to_css(&self) -> String {
        if self.is_identity() {
            return "none".to_owned();
        }
        self.ops
            .iter()
            .map(|op| op.css())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

type Mat3 = [[f32; 3]; 3];

fn mul3(m: Mat3, v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn sepia_matrix(amount: f32) -> Mat3 {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ]
}

fn saturate_matrix(s: f32) -> Mat3 {
    let s = s.max(0.0);
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(deg: f32) -> Mat3 {
    let (sin, cos) = deg.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
