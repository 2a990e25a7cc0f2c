use super::*;

#[test]
fn parses_rgb_and_rgba_hex() {
    assert_eq!(Rgba8::from_hex("#FBBF24").unwrap(), Rgba8::rgb(0xFB, 0xBF, 0x24));
    assert_eq!(Rgba8::from_hex("06b6d4").unwrap(), Rgba8::rgb(0x06, 0xB6, 0xD4));
    assert_eq!(
        Rgba8::from_hex("#8B5CF680").unwrap(),
        Rgba8::rgba(0x8B, 0x5C, 0xF6, 0x80)
    );
}

#[test]
fn expands_short_hex() {
    assert_eq!(Rgba8::from_hex("#fb2").unwrap(), Rgba8::rgb(0xFF, 0xBB, 0x22));
    let c: Rgba8 = serde_json::from_str("\"#0AF\"").unwrap();
    assert_eq!(c, Rgba8::rgb(0x00, 0xAA, 0xFF));
}

#[test]
fn rejects_malformed_hex() {
    assert!(Rgba8::from_hex("#FFFF").is_err());
    assert!(Rgba8::from_hex("#GGG").is_err());
    assert!(Rgba8::from_hex("#GGGGGG").is_err());
    assert!(Rgba8::from_hex("#ééé").is_err());
}

#[test]
fn serde_accepts_hex_and_arrays() {
    let c: Rgba8 = serde_json::from_str("\"#A78BFA\"").unwrap();
    assert_eq!(c, Rgba8::rgb(0xA7, 0x8B, 0xFA));
    let c: Rgba8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
    assert!(serde_json::from_str::<Rgba8>("[1, 2]").is_err());
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#010203\"");
}
