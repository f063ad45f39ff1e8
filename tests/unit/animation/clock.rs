use super::*;

#[test]
fn manual_clock_clones_share_time() {
    let a = ManualClock::new(100.0);
    let b = a.clone();
    assert_eq!(b.now_ms(), 100.0);
    assert_eq!(a.advance(16.5), 116.5);
    assert_eq!(b.now_ms(), 116.5);
    b.set(0.0);
    assert_eq!(a.now_ms(), 0.0);
}

#[test]
fn default_manual_clock_starts_at_zero() {
    assert_eq!(ManualClock::default().now_ms(), 0.0);
}

#[test]
fn monotonic_clock_never_goes_backwards() {
    let c = MonotonicClock::new();
    let t0 = c.now_ms();
    let t1 = c.now_ms();
    assert!(t0 >= 0.0);
    assert!(t1 >= t0);
}
