use image::RgbaImage;

use super::*;
use crate::{
    assets::decode::RawPhoto,
    border::generate::BorderStyle,
    effects::filter::FilterSpec,
    foundation::{core::Canvas, settings::ComposeSettings},
    render::compositor::Compositor,
};

fn small_compositor() -> Compositor {
    Compositor::new(ComposeSettings {
        canvas: Canvas {
            width: 40,
            height: 30,
        },
        border_inset: 4,
        jpeg_quality: 90,
    })
}

fn finals(n: usize) -> Vec<FinalPhoto> {
    let compositor = small_compositor();
    (0..n)
        .map(|i| {
            let shade = (i * 60) as u8;
            let img = RgbaImage::from_pixel(8, 6, image::Rgba([shade, shade, shade, 255]));
            let raw = RawPhoto::from_rgba(&img, 90).unwrap();
            let req = compositor.request(raw, BorderStyle::None, FilterSpec::None);
            compositor.compose_blocking(req).unwrap()
        })
        .collect()
}

#[test]
fn requires_exactly_four() {
    for n in [0, 1, 3, 5] {
        let err = PrintSet::new(finals(n)).unwrap_err();
        assert!(matches!(err, PhotoboothError::Validation(_)), "{n}");
    }
    let set = PrintSet::try_from(finals(4)).unwrap();
    assert_eq!(set.len(), 4);
    assert!(!set.is_empty());
}

#[test]
fn keeps_capture_order() {
    let photos = finals(4);
    let expected: Vec<u8> = photos.iter().map(|p| p.image().get_pixel(20, 15).0[0]).collect();
    let set = PrintSet::new(photos).unwrap();
    let actual: Vec<u8> = set.iter().map(|p| p.image().get_pixel(20, 15).0[0]).collect();
    assert_eq!(actual, expected);
    assert_eq!(set.first().encoded(), set.photos()[0].encoded());
    assert!(set.get(4).is_none());
}

#[test]
fn builder_fills_then_rejects() {
    let mut builder = PrintSetBuilder::new();
    assert!(builder.is_empty());
    for (i, photo) in finals(4).into_iter().enumerate() {
        assert_eq!(builder.remaining(), 4 - i);
        builder.push(photo).unwrap();
    }
    assert!(builder.is_complete());
    assert!(builder.push(finals(1).remove(0)).is_err());
    assert_eq!(builder.finish().unwrap().len(), 4);
}

#[test]
fn unfinished_builder_cannot_finish() {
    let mut builder = PrintSetBuilder::new();
    builder.push(finals(1).remove(0)).unwrap();
    assert!(builder.finish().is_err());
}
