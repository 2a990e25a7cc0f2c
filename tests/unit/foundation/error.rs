use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StoryError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(StoryError::story("x").to_string().contains("story error:"));
    assert!(
        StoryError::playback("x")
            .to_string()
            .contains("playback error:")
    );
    assert!(
        StoryError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StoryError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: StoryError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, StoryError::Serde(_)));
}
