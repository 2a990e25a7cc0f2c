use super::*;
use crate::{
    config::BookConfig,
    foundation::core::Millis,
    narrative::session::NarrativeSession,
    story::builtin::builtin_story,
};

#[test]
fn default_geometry_splits_at_the_spine() {
    let g = BookGeometry::default();
    g.validate().unwrap();
    assert_eq!(g.page_width(), 700.0);
    assert_eq!(g.page(ImagePosition::Left), Rect::new(0.0, 0.0, 700.0, 800.0));
    assert_eq!(g.page(ImagePosition::Right), Rect::new(700.0, 0.0, 1400.0, 800.0));
    assert_eq!(g.spine(), Rect::new(690.0, 0.0, 710.0, 800.0));
    assert_eq!(g.hinge(), Point::new(700.0, 400.0));
}

#[test]
fn geometry_rejects_degenerate_sizes() {
    for g in [
        BookGeometry {
            width: 0.0,
            ..BookGeometry::default()
        },
        BookGeometry {
            height: f64::NAN,
            ..BookGeometry::default()
        },
        BookGeometry {
            spine_width: 1400.0,
            ..BookGeometry::default()
        },
    ] {
        assert!(g.validate().is_err(), "{g:?}");
    }
}

#[test]
fn document_height_has_runway_on_both_ends() {
    let layout = ScrollLayout::new(500.0);
    assert_eq!(layout.document_height(13, 900.0), 6500.0 + 1800.0);
    assert_eq!(layout.document_height(0, 900.0), 1800.0);
}

#[test]
fn preload_window_is_clamped() {
    assert_eq!(preload_window(0, 13), 0..3);
    assert_eq!(preload_window(5, 13), 4..8);
    assert_eq!(preload_window(12, 13), 11..13);
    assert_eq!(preload_window(0, 0), 0..0);
    assert_eq!(preload_window(20, 13), 13..13);
}

#[test]
fn line_styles_follow_kind() {
    let story = builtin_story().unwrap();
    let dialogue = StyledLine::new(
        &story,
        0,
        &Line::Dialogue {
            speaker: Some("Khurshed".to_string()),
            text: "Hi".to_string(),
        },
    );
    assert_eq!(dialogue.prefix.as_deref(), Some("Khurshed: "));
    assert_eq!(dialogue.accent, Some(Rgba8::rgb(0xFB, 0xBF, 0x24)));
    assert!(!dialogue.italic);

    let anonymous = StyledLine::new(
        &story,
        1,
        &Line::Dialogue {
            speaker: None,
            text: "Who?".to_string(),
        },
    );
    assert_eq!(anonymous.prefix, None);

    let fact = StyledLine::new(
        &story,
        2,
        &Line::Fact {
            text: "Sunspots".to_string(),
        },
    );
    assert_eq!(fact.callout, Some("Did you know?"));

    let stage = StyledLine::new(
        &story,
        3,
        &Line::Stage {
            text: "(pause)".to_string(),
        },
    );
    assert!(stage.italic && stage.dimmed);

    let narration = StyledLine::new(
        &story,
        4,
        &Line::Narration {
            text: "Once".to_string(),
        },
    );
    assert!(narration.italic && !narration.dimmed);
}

#[test]
fn closed_book_shows_blank_pages() {
    let story = builtin_story().unwrap();
    let mut s = NarrativeSession::new(story.clone(), BookConfig::default()).unwrap();
    let f = s.on_scroll_fraction(0.02, Millis(0)).frame;
    assert_eq!(PageSpread::resolve(&story, &f), PageSpread::default());
}

#[test]
fn spread_places_illustration_by_scene() {
    let story = builtin_story().unwrap();
    let mut s = NarrativeSession::new(story.clone(), BookConfig::default()).unwrap();
    // Book half open: scene changes snap, so pages show scene 0 right away.
    let f = s.on_scroll_fraction(0.05, Millis(0)).frame;
    let spread = PageSpread::resolve(&story, &f);
    // Scene 1 has its illustration on the right.
    assert_eq!(
        spread.right,
        PageContent::Illustration {
            scene_id: 1,
            path: "images/scene1.png".to_string(),
        }
    );
    assert!(matches!(spread.left, PageContent::Text { scene_id: 1, .. }));
}

#[test]
fn old_page_keeps_its_lines_until_content_swaps() {
    let story = builtin_story().unwrap();
    let mut s = NarrativeSession::new(story.clone(), BookConfig::default()).unwrap();
    // Settle half way through scene index 8 (three lines): lines 0 and 1 are out.
    s.on_scroll_fraction(0.1 + 0.8 * (8.5 / 13.0), Millis(0));
    let settled = s.tick(Millis(10_000)).frame;
    assert_eq!(settled.displayed_scene(), 8);
    assert_eq!(settled.displayed_lines.range(), 0..2);

    // Jump back deep into scene 0 (nine lines); scene 8 stays on the pages until mid-flip.
    let f = s
        .on_scroll_fraction(0.1 + 0.8 * (0.99 / 13.0), Millis(20_000))
        .frame;
    assert_eq!(f.scene_index, 0);
    assert_eq!(f.displayed_scene(), 8);
    assert_eq!(f.visible_lines.range(), 5..9);
    assert_eq!(f.displayed_lines.range(), 0..2);

    let spread = PageSpread::resolve(&story, &f);
    let PageContent::Text { scene_id, lines } = spread.page(ImagePosition::Left) else {
        panic!("expected text on the left page");
    };
    assert_eq!(*scene_id, 9);
    let shown: Vec<_> = lines.iter().map(|l| l.index).collect();
    assert_eq!(shown, [0, 1]);

    // Past the mid checkpoint the pages show scene 0 with its live window.
    let f = s.tick(Millis(20_600)).frame;
    assert_eq!(f.displayed_scene(), 0);
    let spread = PageSpread::resolve(&story, &f);
    let PageContent::Text { scene_id, lines } = spread.page(ImagePosition::Left) else {
        panic!("expected text on the left page");
    };
    assert_eq!(*scene_id, 1);
    let shown: Vec<_> = lines.iter().map(|l| l.index).collect();
    assert_eq!(shown, [5, 6, 7, 8]);
}
