use super::*;
use crate::narrative::flip::FlipDirection;

fn pulse(at: u64) -> FlipPulse {
    FlipPulse {
        from_scene: 0,
        to_scene: 1,
        direction: FlipDirection::Forward,
        at: Millis(at),
    }
}

#[test]
fn same_seed_same_sky() {
    let a = Starfield::new(800.0, 600.0, StarfieldOpts::default());
    let b = Starfield::new(800.0, 600.0, StarfieldOpts::default());
    assert_eq!(a.stars(), b.stars());

    let c = Starfield::new(
        800.0,
        600.0,
        StarfieldOpts {
            seed: 7,
            ..StarfieldOpts::default()
        },
    );
    assert_ne!(a.stars(), c.stars());
}

#[test]
fn story_title_picks_the_layout() {
    let opts = StarfieldOpts::default();
    let a = Starfield::for_story("Stellar Stories", 400.0, 300.0, opts);
    let b = Starfield::for_story("Stellar Stories", 400.0, 300.0, opts);
    let c = Starfield::for_story("Another Book", 400.0, 300.0, opts);
    assert_eq!(a.stars(), b.stars());
    assert_ne!(a.stars(), c.stars());
}

#[test]
fn star_parameters_stay_in_range() {
    let field = Starfield::new(1024.0, 768.0, StarfieldOpts::default());
    assert_eq!(field.stars().len(), 300);
    for s in field.stars() {
        assert!((0.0..1024.0).contains(&s.x));
        assert!((0.0..768.0).contains(&s.y));
        assert!((0.5..2.0).contains(&s.radius));
        assert!((0.5..1.0).contains(&s.opacity));
        assert!((0.01..0.06).contains(&s.speed));
        assert!((0.01..0.03).contains(&s.twinkle_speed));
        let b = s.brightness();
        assert!(b >= s.opacity * 0.4 - 1e-12 && b <= s.opacity + 1e-12);
    }
}

#[test]
fn stars_drift_down_and_wrap() {
    let mut field = Starfield::new(100.0, 10.0, StarfieldOpts::default());
    let before: Vec<f64> = field.stars().iter().map(|s| s.y).collect();
    field.step();
    for (s, y) in field.stars().iter().zip(&before) {
        if s.y != 0.0 {
            assert!((s.y - (y + s.speed)).abs() < 1e-12);
        }
    }

    // Enough frames to push every star past the bottom edge at least once.
    for _ in 0..2000 {
        field.step();
    }
    for s in field.stars() {
        assert!(s.y <= 10.0);
        assert!((0.0..100.0).contains(&s.x));
    }
}

#[test]
fn pulse_brightens_then_decays() {
    let mut field = Starfield::new(200.0, 200.0, StarfieldOpts::default());
    let star = field.stars()[0];
    let base = field.star_brightness(&star, Millis(0));

    field.on_pulse(&pulse(1000));
    assert_eq!(field.pulse_boost(Millis(999)), 0.0);
    assert!((field.pulse_boost(Millis(1000)) - 0.6).abs() < 1e-12);
    assert!((field.pulse_boost(Millis(1450)) - 0.3).abs() < 1e-12);
    assert_eq!(field.pulse_boost(Millis(1900)), 0.0);

    assert!(field.star_brightness(&star, Millis(1000)) > base);
    assert!(field.star_brightness(&star, Millis(1000)) <= 1.0);
    assert_eq!(field.star_brightness(&star, Millis(5000)), base);
}

#[test]
fn listener_feeds_shared_field() {
    let field = Rc::new(RefCell::new(Starfield::new(
        50.0,
        50.0,
        StarfieldOpts::default(),
    )));
    let mut listener = Starfield::pulse_listener(Rc::clone(&field));
    listener(&pulse(10));
    assert!(field.borrow().pulse_boost(Millis(10)) > 0.0);
}

#[test]
fn opts_validate() {
    StarfieldOpts::default().validate().unwrap();
    assert!(
        StarfieldOpts {
            pulse_gain: 1.5,
            ..StarfieldOpts::default()
        }
        .validate()
        .is_err()
    );
    assert!(
        StarfieldOpts {
            pulse_decay_ms: 0,
            ..StarfieldOpts::default()
        }
        .validate()
        .is_err()
    );
}
