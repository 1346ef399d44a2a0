use super::*;

#[test]
fn defaults_match_booth_constants() {
    let s = BoothSettings::default();
    assert_eq!(s.capture.shots, 4);
    assert_eq!(s.capture.countdown_ticks, 3);
    assert_eq!(s.capture.tick_interval(), Duration::from_secs(1));
    assert_eq!(
        s.capture.camera,
        StreamConstraints {
            width: 1280,
            height: 720,
            facing: FacingMode::User
        }
    );
    assert_eq!(
        s.compose.canvas,
        Canvas {
            width: 800,
            height: 600
        }
    );
    assert_eq!(s.compose.border_inset, 40);
    assert_eq!(s.compose.jpeg_quality, 90);
    s.validate().unwrap();
}

#[test]
fn partial_json_keeps_remaining_defaults() {
    let s: BoothSettings =
        serde_json::from_str(r#"{"compose": {"jpeg_quality": 75}, "capture": {"camera": {"facing": "environment"}}}"#)
            .unwrap();
    assert_eq!(s.compose.jpeg_quality, 75);
    assert_eq!(s.compose.border_inset, 40);
    assert_eq!(s.capture.camera.facing, FacingMode::Environment);
    assert_eq!(s.capture.camera.width, 1280);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = BoothSettings::default();
    s.compose.jpeg_quality = 0;
    assert!(s.validate().is_err());

    let mut s = BoothSettings::default();
    s.compose.border_inset = 300;
    assert!(s.validate().is_err());

    let mut s = BoothSettings::default();
    s.capture.countdown_ticks = 0;
    assert!(s.validate().is_err());

    let mut s = BoothSettings::default();
    s.capture.tick_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = BoothSettings::default();
    s.capture.shots = 0;
    assert!(s.validate().is_err());
}

#[test]
fn from_path_reads_json_file() {
    let dir = std::path::PathBuf::from("target").join("settings_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("booth.json");
    std::fs::write(&path, r#"{"compose": {"border_inset": 20}}"#).unwrap();

    let s = BoothSettings::from_path(&path).unwrap();
    assert_eq!(s.compose.border_inset, 20);

    std::fs::write(&path, "{not json").unwrap();
    assert!(BoothSettings::from_path(&path).is_err());
}
