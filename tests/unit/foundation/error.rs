use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ThumbError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ThumbError::usage("x").to_string().contains("usage error:"));
    assert!(ThumbError::raster("x").to_string().contains("raster error:"));
    assert!(
        ThumbError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn usage_is_distinguishable() {
    assert!(ThumbError::usage("bad brand").is_usage());
    assert!(!ThumbError::validation("bad z").is_usage());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ThumbError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
