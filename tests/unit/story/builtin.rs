use super::*;
use crate::story::model::{ImagePosition, LineKind};

#[test]
fn bundled_story_validates() {
    let story = builtin_story().unwrap();
    assert_eq!(story.title, "Stellar Stories");
    assert_eq!(story.len(), 13);
    assert_eq!(story.cast.len(), 3);
}

#[test]
fn scenes_alternate_illustration_sides() {
    let story = builtin_story().unwrap();
    for (i, scene) in story.scenes.iter().enumerate() {
        let expected = if i % 2 == 0 {
            ImagePosition::Right
        } else {
            ImagePosition::Left
        };
        assert_eq!(scene.image_position, expected, "scene {}", scene.id);
        assert_eq!(scene.id as usize, i + 1);
    }
}

#[test]
fn first_scene_matches_known_content() {
    let story = builtin_story().unwrap();
    let first = &story.scenes[0];
    assert_eq!(first.title, "Rooftop Under the Stars");
    assert_eq!(first.lines.len(), 9);
    assert_eq!(first.lines[0].speaker(), Some("Khurshed"));
    assert_eq!(first.lines[8].kind(), LineKind::Fact);
}
