use image::{RgbaImage, imageops::FilterType};

use crate::{
    assets::decode::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    border::shapes::DrawPrimitive,
    effects::filter::ColorTransformSpec,
    foundation::{
        core::{Canvas, InsetRect, Rgba8},
        error::{PhotoboothError, PhotoboothResult},
    },
};

/// CPU drawing surface backed by `vello_cpu`.
pub struct CpuCanvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    paint: Option<Rgba8>,
}

impl CpuCanvas {
    /// Fails if a dimension does not fit in `u16`.
    pub fn new(canvas: Canvas) -> PhotoboothResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| PhotoboothError::validation("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| PhotoboothError::validation("canvas height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            paint: None,
        })
    }

    /// Paint that the next fill would use.
    pub fn current_paint(&self) -> Option<Rgba8> {
        self.paint
    }

    fn set_paint(&mut self, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.paint = Some(color);
    }

    /// Cover the whole surface with `color`.
    pub fn fill_background(&mut self, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.set_paint(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    /// Resample `photo` to exactly fill `dest`, run the color transform over the resampled
    /// pixels, and paint the result. The transform never touches anything else on the canvas.
    pub fn draw_photo(
        &mut self,
        photo: &RgbaImage,
        dest: InsetRect,
        transform: &ColorTransformSpec,
    ) -> PhotoboothResult<()> {
        let mut fitted = if photo.dimensions() == (dest.width, dest.height) {
            photo.clone()
        } else {
            image::imageops::resize(photo, dest.width, dest.height, FilterType::Triangle)
        };
        transform.apply_in_place(&mut fitted);

        let (w, h) = fitted.dimensions();
        let mut rgba8_premul = fitted.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        let pixmap = premul_bytes_to_pixmap(&rgba8_premul, w, h)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(dest.x),
            f64::from(dest.y),
        )));
        self.ctx.set_paint(paint);
        self.paint = None;
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    /// Fill every shape of `primitive` in paint order.
    pub fn draw_primitive(&mut self, primitive: &DrawPrimitive) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for fill in primitive.fills() {
            if self.paint != Some(fill.color) {
                self.set_paint(fill.color);
            }
            self.ctx.fill_path(&bezpath_to_cpu(&fill.path));
        }
        // Flowers end on the center dot; hand the petal color back explicitly.
        let trailing = primitive.trailing_paint();
        if self.paint != Some(trailing) {
            self.set_paint(trailing);
        }
    }

    /// Rasterize everything recorded so far into a straight-alpha image.
    pub fn finish(mut self) -> PhotoboothResult<RgbaImage> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        RgbaImage::from_raw(u32::from(self.width), u32::from(self.height), data)
            .ok_or_else(|| PhotoboothError::encode("readback byte length mismatch"))
    }
}

fn point_to_cpu(p: crate::foundation::core::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &crate::foundation::core::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PhotoboothResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PhotoboothError::validation("photo width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PhotoboothError::validation("photo height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PhotoboothError::validation("photo byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
