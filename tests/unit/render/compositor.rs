use super::*;
use crate::border::generate::{HEART_PINK, RAINBOW};

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

fn raw(img: &RgbaImage) -> RawPhoto {
    RawPhoto::from_rgba(img, 90).unwrap()
}

fn near(px: [u8; 4], rgb: [u8; 3], tol: u8) -> bool {
    (0..3).all(|i| px[i].abs_diff(rgb[i]) <= tol)
}

#[test]
fn request_padding_depends_on_border() {
    let settings = ComposeSettings::default();
    let photo = raw(&solid(4, 4, [0, 0, 0]));
    let none = CompositionRequest::new(
        photo.clone(),
        BorderStyle::None,
        FilterSpec::Warm,
        &settings,
    );
    assert_eq!(none.border_inset, 0);
    let hearts = CompositionRequest::new(photo, BorderStyle::Hearts, FilterSpec::None, &settings);
    assert_eq!(hearts.border_inset, 40);
    assert_eq!(hearts.photo_rect().unwrap().width, 720);
}

#[test]
fn output_is_fixed_size_for_any_aspect() {
    let compositor = Compositor::default();
    for (w, h) in [(1280, 720), (300, 900), (17, 17), (800, 600)] {
        let src = solid(w, h, [90, 160, 30]);
        for border in BorderStyle::ALL {
            let req = compositor.request(raw(&src), border, FilterSpec::None);
            let out = compositor.render(&req, &src).unwrap();
            assert_eq!(out.dimensions(), (800, 600), "{w}x{h} {border}");
        }
    }
}

#[test]
fn no_border_means_photo_fills_canvas() {
    let compositor = Compositor::default();
    let src = solid(64, 48, [30, 60, 200]);
    let req = compositor.request(raw(&src), BorderStyle::None, FilterSpec::None);
    let out = compositor.render(&req, &src).unwrap();
    for (x, y) in [(0, 0), (799, 0), (0, 599), (799, 599), (400, 300)] {
        assert!(
            near(out.get_pixel(x, y).0, [30, 60, 200], 2),
            "({x},{y}) = {:?}",
            out.get_pixel(x, y).0
        );
    }
}

#[test]
fn hearts_with_warm_filter_keep_regions_apart() {
    let compositor = Compositor::default();
    let src = solid(640, 480, [120, 140, 160]);
    let warm = FilterSpec::Warm.resolve().apply_rgb8([120, 140, 160]);
    let req = compositor.request(raw(&src), BorderStyle::Hearts, FilterSpec::Warm);
    let out = compositor.render(&req, &src).unwrap();

    // Filtered photo in the inset rectangle.
    assert!(near(out.get_pixel(400, 300).0, warm, 2));
    assert!(near(out.get_pixel(41, 41).0, warm, 2));
    // White background where no heart lands.
    assert_eq!(out.get_pixel(2, 2).0, [255, 255, 255, 255]);
    assert_eq!(out.get_pixel(2, 300).0, [255, 255, 255, 255]);
    // Unfiltered pink inside the first heart.
    assert!(near(
        out.get_pixel(16, 21).0,
        [HEART_PINK.r, HEART_PINK.g, HEART_PINK.b],
        1
    ));
}

#[test]
fn filter_never_tints_border_colors() {
    let compositor = Compositor::default();
    let src = solid(100, 100, [200, 200, 200]);
    let req = compositor.request(raw(&src), BorderStyle::Rainbow, FilterSpec::Vintage);
    let out = compositor.render(&req, &src).unwrap();
    let red = RAINBOW[0];
    assert!(near(out.get_pixel(400, 2).0, [red.r, red.g, red.b], 1));
    let violet = RAINBOW[6];
    assert!(near(out.get_pixel(400, 597).0, [violet.r, violet.g, violet.b], 1));
}

#[test]
fn zero_area_inset_is_a_validation_error() {
    let compositor = Compositor::new(ComposeSettings {
        border_inset: 300,
        ..ComposeSettings::default()
    });
    let src = solid(8, 8, [0, 0, 0]);
    let req = compositor.request(raw(&src), BorderStyle::Stars, FilterSpec::None);
    assert!(matches!(
        compositor.render(&req, &src),
        Err(PhotoboothError::Validation(_))
    ));
}

#[tokio::test]
async fn compose_decodes_and_encodes() {
    let compositor = Compositor::default();
    let src = solid(320, 240, [10, 200, 90]);
    let req = compositor.request(raw(&src), BorderStyle::Flowers, FilterSpec::Bright);
    let photo = compositor.compose(req).await.unwrap();
    assert_eq!((photo.width(), photo.height()), (800, 600));
    assert_eq!(photo.mime(), "image/jpeg");

    let decoded = decode_rgba(photo.encoded()).unwrap();
    assert_eq!(decoded.dimensions(), (800, 600));
    assert!(photo.to_data_uri().starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn compose_surfaces_decode_errors() {
    let compositor = Compositor::default();
    let req = compositor.request(
        RawPhoto::from_encoded(b"\xFF\xD8 truncated".to_vec()),
        BorderStyle::Hearts,
        FilterSpec::Warm,
    );
    let err = compositor.compose(req).await.unwrap_err();
    assert!(matches!(err, PhotoboothError::Decode(_)), "{err}");
}

#[test]
fn compose_blocking_matches_async_dimensions() {
    let compositor = Compositor::default();
    let src = solid(50, 50, [0, 0, 0]);
    let photo = compositor
        .compose_blocking(compositor.request(raw(&src), BorderStyle::None, FilterSpec::None))
        .unwrap();
    assert_eq!((photo.width(), photo.height()), (800, 600));
}

#[tokio::test(flavor = "current_thread")]
async fn compose_runs_whole_pipeline_off_the_runtime_thread() {
    let compositor = Compositor::default();
    let src = solid(640, 480, [120, 140, 160]);
    let req = compositor.request(raw(&src), BorderStyle::Rainbow, FilterSpec::Vintage);

    let on_pool = compositor.compose(req.clone()).await.unwrap();
    let inline = compositor.compose_blocking(req).unwrap();
    assert_eq!(on_pool.encoded(), inline.encoded());
    assert_eq!(on_pool.image().as_raw(), inline.image().as_raw());
}
