use super::*;

fn frame(rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(8, 6, image::Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

#[test]
fn still_camera_rejects_empty_frames() {
    assert!(StillCamera::new(Vec::new()).is_err());
}

#[tokio::test]
async fn snapshot_requires_active_stream() {
    let mut cam = StillCamera::new(vec![frame([1, 2, 3])]).unwrap();
    let err = cam.snapshot().unwrap_err();
    assert!(matches!(err, PhotoboothError::CameraAccess(_)));

    cam.acquire(&StreamConstraints::default()).await.unwrap();
    assert!(cam.is_active());
    assert_eq!(cam.snapshot().unwrap().dimensions(), (8, 6));

    cam.release();
    assert!(!cam.is_active());
    cam.release();
    assert!(!cam.is_active());
}

#[tokio::test]
async fn frames_rotate_in_order() {
    let mut cam = StillCamera::new(vec![frame([10, 0, 0]), frame([0, 20, 0])]).unwrap();
    cam.acquire(&StreamConstraints::default()).await.unwrap();
    let reds: Vec<u8> = (0..3).map(|_| cam.snapshot().unwrap().get_pixel(0, 0).0[0]).collect();
    assert_eq!(reds, vec![10, 0, 10]);
    assert_eq!(cam.acquisitions(), 1);
}
