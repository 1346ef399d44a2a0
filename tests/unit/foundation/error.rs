use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PhotoboothError::camera("x")
            .to_string()
            .contains("camera access error:")
    );
    assert!(PhotoboothError::decode("x").to_string().contains("decode error:"));
    assert!(PhotoboothError::encode("x").to_string().contains("encode error:"));
    assert!(
        PhotoboothError::clipboard("x")
            .to_string()
            .contains("clipboard error:")
    );
    assert!(
        PhotoboothError::print_surface("x")
            .to_string()
            .contains("print surface unavailable:")
    );
    assert!(
        PhotoboothError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PhotoboothError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn io_errors_convert_with_question_mark() {
    fn fails() -> PhotoboothResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))?;
        Ok(())
    }
    assert!(matches!(fails(), Err(PhotoboothError::Io(_))));
}
