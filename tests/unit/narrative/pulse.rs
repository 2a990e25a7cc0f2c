use std::{cell::RefCell, rc::Rc};

use super::*;

fn pulse(to_scene: usize) -> FlipPulse {
    FlipPulse {
        from_scene: 0,
        to_scene,
        direction: FlipDirection::Forward,
        at: Millis(600),
    }
}

#[test]
fn subscribers_receive_pulses_in_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut bus = PulseBus::new();

    let a = Rc::clone(&seen);
    bus.subscribe(move |p| a.borrow_mut().push(("a", p.to_scene)));
    let b = Rc::clone(&seen);
    bus.subscribe(move |p| b.borrow_mut().push(("b", p.to_scene)));

    bus.emit(&pulse(3));
    assert_eq!(*seen.borrow(), vec![("a", 3), ("b", 3)]);
}

#[test]
fn unsubscribe_stops_delivery() {
    let count = Rc::new(RefCell::new(0u32));
    let mut bus = PulseBus::new();
    let c = Rc::clone(&count);
    let id = bus.subscribe(move |_| *c.borrow_mut() += 1);

    bus.emit(&pulse(1));
    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
    bus.emit(&pulse(2));

    assert_eq!(*count.borrow(), 1);
    assert!(bus.is_empty());
}

#[test]
fn ids_are_unique() {
    let mut bus = PulseBus::new();
    let a = bus.subscribe(|_| {});
    let b = bus.subscribe(|_| {});
    assert_ne!(a, b);
    assert_eq!(bus.len(), 2);
}
