use super::*;
use crate::{
    border::shapes::BandEdge,
    effects::filter::FilterSpec,
    foundation::core::{Point, Rect},
};

fn canvas(w: u32, h: u32) -> CpuCanvas {
    CpuCanvas::new(Canvas::new(w, h).unwrap()).unwrap()
}

fn px(img: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}

#[test]
fn background_fill_is_opaque() {
    let mut c = canvas(8, 8);
    c.fill_background(Rgba8::WHITE);
    let img = c.finish().unwrap();
    assert_eq!(img.dimensions(), (8, 8));
    assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn band_primitive_paints_only_its_rect() {
    let red = Rgba8::opaque(239, 68, 68);
    let mut c = canvas(16, 16);
    c.fill_background(Rgba8::WHITE);
    c.draw_primitive(&DrawPrimitive::Band {
        edge: BandEdge::Top,
        rect: Rect::new(0.0, 0.0, 16.0, 4.0),
        color: red,
    });
    let img = c.finish().unwrap();
    assert_eq!(px(&img, 8, 1), [239, 68, 68, 255]);
    assert_eq!(px(&img, 8, 10), [255, 255, 255, 255]);
}

#[test]
fn photo_lands_in_destination_with_filter_applied() {
    let src = RgbaImage::from_pixel(2, 2, image::Rgba([128, 128, 128, 255]));
    let cool = FilterSpec::Cool.resolve();
    let expected = cool.apply_rgb8([128, 128, 128]);

    let mut c = canvas(8, 8);
    c.fill_background(Rgba8::WHITE);
    c.draw_photo(
        &src,
        InsetRect {
            x: 2,
            y: 2,
            width: 4,
            height: 4,
        },
        &cool,
    )
    .unwrap();
    let img = c.finish().unwrap();

    let inside = px(&img, 3, 4);
    for ch in 0..3 {
        assert!(inside[ch].abs_diff(expected[ch]) <= 2, "got {inside:?}");
    }
    assert_eq!(px(&img, 0, 0), [255, 255, 255, 255]);
    assert_eq!(px(&img, 7, 7), [255, 255, 255, 255]);
}

#[test]
fn flower_leaves_petal_paint_current() {
    let petal = Rgba8::hex("#a855f7");
    let center = Rgba8::hex("#fbbf24");
    let mut c = canvas(40, 40);
    c.draw_primitive(&DrawPrimitive::Flower {
        center: Point::new(20.0, 20.0),
        size: 8.0,
        petal,
        center_color: center,
    });
    assert_eq!(c.current_paint(), Some(petal));

    let img = c.finish().unwrap();
    let dot = px(&img, 20, 20);
    assert_eq!(&dot[..3], &[center.r, center.g, center.b]);
}

#[test]
fn oversized_canvas_is_rejected() {
    let err = CpuCanvas::new(Canvas {
        width: 70_000,
        height: 10,
    })
    .err()
    .unwrap();
    assert!(matches!(err, PhotoboothError::Validation(_)));
}
