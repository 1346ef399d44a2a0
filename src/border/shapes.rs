use std::f64::consts::PI;

use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect, Rgba8};

/// Tolerance used when flattening circles into Bézier paths.
const CIRCLE_TOLERANCE: f64 = 0.05;

/// A filled path with its paint.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeFill {
    /// Closed outline, filled non-zero.
    pub path: BezPath,
    /// Opaque paint.
    pub color: Rgba8,
}

/// Canvas edge a rainbow band runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandEdge {
    /// Full-width band at the top.
    Top,
    /// Full-width band at the bottom.
    Bottom,
    /// Full-height band on the left.
    Left,
    /// Full-height band on the right.
    Right,
}

/// One procedural drawing step of a border.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawPrimitive {
    /// Heart whose bounding box starts at `origin` and spans `size` on both axes.
    Heart {
        /// Top-left corner of the bounding box.
        origin: Point,
        /// Edge length of the bounding box.
        size: f64,
        /// Fill.
        color: Rgba8,
    },
    /// Five-point star inscribed in a circle of `radius`.
    Star {
        /// Circumcircle center.
        center: Point,
        /// Circumcircle radius.
        radius: f64,
        /// Fill.
        color: Rgba8,
    },
    /// Five petals at distance `size` plus a center dot.
    Flower {
        /// Center of the dot and of the petal ring.
        center: Point,
        /// Petal distance from `center`; petals have radius `size / 2`.
        size: f64,
        /// Petal fill.
        petal: Rgba8,
        /// Fill of the center dot, radius `size / 3`.
        center_color: Rgba8,
    },
    /// Axis-aligned color band along one canvas edge.
    Band {
        /// Edge the band belongs to.
        edge: BandEdge,
        /// Covered area in canvas pixels.
        rect: Rect,
        /// Fill.
        color: Rgba8,
    },
}

impl DrawPrimitive {
    /// Fills in paint order.
    pub fn fills(&self) -> Vec<ShapeFill> {
        match *self {
            DrawPrimitive::Heart {
                origin,
                size,
                color,
            } => vec![ShapeFill {
                path: heart_path(origin, size),
                color,
            }],
            DrawPrimitive::Star {
                center,
                radius,
                color,
            } => vec![ShapeFill {
                path: star_path(center, radius),
                color,
            }],
            DrawPrimitive::Flower {
                center,
                size,
                petal,
                center_color,
            } => {
                let mut fills = Vec::with_capacity(6);
                for i in 0..5 {
                    let angle = f64::from(i) * 2.0 * PI / 5.0;
                    let petal_center = Point::new(
                        center.x + angle.cos() * size,
                        center.y + angle.sin() * size,
                    );
                    fills.push(ShapeFill {
                        path: circle_path(petal_center, size / 2.0),
                        color: petal,
                    });
                }
                fills.push(ShapeFill {
                    path: circle_path(center, size / 3.0),
                    color: center_color,
                });
                fills
            }
            DrawPrimitive::Band { rect, color, .. } => vec![ShapeFill {
                path: rect.to_path(0.0),
                color,
            }],
        }
    }

    /// Paint that must be current once this primitive has been drawn.
    pub fn trailing_paint(&self) -> Rgba8 {
        match *self {
            DrawPrimitive::Heart { color, .. }
            | DrawPrimitive::Star { color, .. }
            | DrawPrimitive::Band { color, .. } => color,
            DrawPrimitive::Flower { petal, .. } => petal,
        }
    }
}

/// Strategy for a perimeter-tiled motif: turns a stamp position into a primitive.
pub trait MotifShape: std::fmt::Debug + Sync {
    /// Primitive anchored at `at`.
    fn stamp(&self, at: Point) -> DrawPrimitive;
}

/// Stamps [`DrawPrimitive::Heart`].
#[derive(Debug)]
pub struct HeartMotif {
    /// Bounding box edge length.
    pub size: f64,
    /// Fill.
    pub color: Rgba8,
}

impl MotifShape for HeartMotif {
    fn stamp(&self, at: Point) -> DrawPrimitive {
        DrawPrimitive::Heart {
            origin: at,
            size: self.size,
            color: self.color,
        }
    }
}

/// Stamps [`DrawPrimitive::Star`].
#[derive(Debug)]
pub struct StarMotif {
    /// Circumcircle radius.
    pub radius: f64,
    /// Fill.
    pub color: Rgba8,
}

impl MotifShape for StarMotif {
    fn stamp(&self, at: Point) -> DrawPrimitive {
        DrawPrimitive::Star {
            center: at,
            radius: self.radius,
            color: self.color,
        }
    }
}

/// Stamps [`DrawPrimitive::Flower`].
#[derive(Debug)]
pub struct FlowerMotif {
    /// Petal distance from the center.
    pub size: f64,
    /// Petal fill.
    pub petal: Rgba8,
    /// Center dot fill.
    pub center: Rgba8,
}

impl MotifShape for FlowerMotif {
    fn stamp(&self, at: Point) -> DrawPrimitive {
        DrawPrimitive::Flower {
            center: at,
            size: self.size,
            petal: self.petal,
            center_color: self.center,
        }
    }
}

/// Heart outline built from quadratic lobes and a pointed bottom, inside the `size` box at
/// `origin`.
pub fn heart_path(origin: Point, size: f64) -> BezPath {
    let (x, y, s) = (origin.x, origin.y, size);
    let p = Point::new;

    let mut path = BezPath::new();
    path.move_to(p(x, y + s / 4.0));
    path.quad_to(p(x, y), p(x + s / 4.0, y));
    path.quad_to(p(x + s / 2.0, y), p(x + s / 2.0, y + s / 4.0));
    path.quad_to(p(x + s / 2.0, y), p(x + s * 3.0 / 4.0, y));
    path.quad_to(p(x + s, y), p(x + s, y + s / 4.0));
    path.quad_to(p(x + s, y + s / 2.0), p(x + s * 3.0 / 4.0, y + s * 3.0 / 4.0));
    path.line_to(p(x + s / 2.0, y + s));
    path.line_to(p(x + s / 4.0, y + s * 3.0 / 4.0));
    path.quad_to(p(x, y + s / 2.0), p(x, y + s / 4.0));
    path.close_path();
    path
}

/// Star drawn by joining every second vertex of a pentagon (angles `i * 4π/5`).
pub fn star_path(center: Point, radius: f64) -> BezPath {
    let mut path = BezPath::new();
    for i in 0..5 {
        let angle = f64::from(i) * 4.0 * PI / 5.0;
        let v = Point::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        );
        if i == 0 {
            path.move_to(v);
        } else {
            path.line_to(v);
        }
    }
    path.close_path();
    path
}

/// Circle flattened to cubic Béziers.
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    kurbo::Circle::new(center, radius).to_path(CIRCLE_TOLERANCE)
}

#[cfg(test)]
#[path = "../../tests/unit/border/shapes.rs"]
mod tests;
