use super::*;

fn small_story() -> Story {
    let mut cast = BTreeMap::new();
    cast.insert(
        "Khurshed".to_string(),
        CastMember {
            accent: Rgba8::rgb(0xFB, 0xBF, 0x24),
        },
    );
    Story {
        title: "Tiny".to_string(),
        subtitle: String::new(),
        cast,
        scenes: vec![
            Scene {
                id: 1,
                title: "One".to_string(),
                image_position: ImagePosition::Right,
                image: None,
                lines: vec![
                    Line::Dialogue {
                        speaker: Some("Khurshed".to_string()),
                        text: "Hello".to_string(),
                    },
                    Line::Fact {
                        text: "The Sun is big.".to_string(),
                    },
                ],
            },
            Scene {
                id: 2,
                title: "Two".to_string(),
                image_position: ImagePosition::Left,
                image: Some("art/two.webp".to_string()),
                lines: vec![Line::Stage {
                    text: "(silence)".to_string(),
                }],
            },
        ],
    }
}

#[test]
fn json_roundtrip() {
    let story = small_story();
    let s = story.to_json_pretty().unwrap();
    let de = Story::from_json_str(&s).unwrap();
    assert_eq!(de, story);
}

#[test]
fn lines_use_kind_tags() {
    let line: Line =
        serde_json::from_str(r#"{"kind":"dialogue","speaker":"Mehrob","text":"Why?"}"#).unwrap();
    assert_eq!(line.kind(), LineKind::Dialogue);
    assert_eq!(line.speaker(), Some("Mehrob"));
    assert_eq!(line.text(), "Why?");

    let line: Line = serde_json::from_str(r#"{"kind":"stage","text":"(laughs)"}"#).unwrap();
    assert_eq!(line.kind(), LineKind::Stage);
    assert_eq!(line.speaker(), None);

    assert!(serde_json::from_str::<Line>(r#"{"kind":"song","text":"la"}"#).is_err());
}

#[test]
fn image_path_defaults_from_id() {
    let story = small_story();
    assert_eq!(story.scenes[0].image_path(), "images/scene1.png");
    assert_eq!(story.scenes[1].image_path(), "art/two.webp");
}

#[test]
fn validate_rejects_duplicate_ids() {
    let mut story = small_story();
    story.scenes[1].id = 1;
    assert!(story.validate().is_err());
}

#[test]
fn validate_rejects_unknown_speaker() {
    let mut story = small_story();
    story.scenes[0].lines.push(Line::Dialogue {
        speaker: Some("Nobody".to_string()),
        text: "Hi".to_string(),
    });
    assert!(story.validate().is_err());
}

#[test]
fn empty_cast_allows_any_speaker() {
    let mut story = small_story();
    story.cast.clear();
    story.scenes[0].lines.push(Line::Dialogue {
        speaker: Some("Nobody".to_string()),
        text: "Hi".to_string(),
    });
    story.validate().unwrap();
}

#[test]
fn validate_rejects_blank_text() {
    let mut story = small_story();
    story.scenes[1].lines.push(Line::Narration {
        text: "   ".to_string(),
    });
    assert!(story.validate().is_err());
}

#[test]
fn empty_scene_list_is_valid() {
    let mut story = small_story();
    story.scenes.clear();
    story.validate().unwrap();
    assert!(story.is_empty());
    assert_eq!(story.line_count(0), 0);
    assert!(story.scene(0).is_none());
}

#[test]
fn text_side_is_opposite_of_image() {
    assert_eq!(ImagePosition::Left.text_side(), ImagePosition::Right);
    assert_eq!(ImagePosition::Right.text_side(), ImagePosition::Left);
}

#[test]
fn accent_lookup() {
    let story = small_story();
    assert_eq!(
        story.accent_for("Khurshed"),
        Some(Rgba8::rgb(0xFB, 0xBF, 0x24))
    );
    assert_eq!(story.accent_for("Mehrob"), None);
}
