use super::*;
use crate::animation::clock::Clock as _;

#[test]
fn stepped_clock_advances_and_honors_limit() {
    let clock = ManualClock::new(0.0);
    let mut src = SteppedClock::new(clock.clone(), 10.0).with_limit(3);
    assert!(src.next_tick());
    assert!(src.next_tick());
    assert!(src.next_tick());
    assert!(!src.next_tick());
    assert_eq!(clock.now_ms(), 30.0);
    assert_eq!(src.clock().now_ms(), 30.0);
}

#[test]
fn display_refresh_coalesces_and_closes() {
    let (mut display, signal) = DisplayRefresh::new();
    assert!(signal.notify());
    assert!(signal.notify());
    assert!(display.next_tick());

    drop(signal);
    assert!(!display.next_tick());
}

#[test]
fn refresh_signal_reports_dropped_source() {
    let (display, signal) = DisplayRefresh::new();
    drop(display);
    assert!(!signal.notify());
}

#[test]
fn fixed_cadence_ticks_repeatedly() {
    let mut timer = FixedCadence::spawn(Duration::from_millis(1)).unwrap();
    for _ in 0..3 {
        assert!(timer.next_tick());
    }
}

#[test]
fn tick_source_kind_is_camel_case() {
    let k: TickSourceKind = serde_json::from_str("\"fixedCadence\"").unwrap();
    assert_eq!(k, TickSourceKind::FixedCadence);
}
