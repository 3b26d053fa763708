use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RasterError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RasterError::pipeline("x")
            .to_string()
            .contains("pipeline error:")
    );
    assert!(RasterError::asset("x").to_string().contains("asset error:"));
    assert!(
        RasterError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn io_and_other_preserve_source() {
    let err = RasterError::from(std::io::Error::other("disk gone"));
    assert!(matches!(err, RasterError::Io(_)));
    assert!(err.to_string().contains("disk gone"));

    let base = std::io::Error::other("boom");
    let err = RasterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
