use strider_core::Countdown;

#[test]
fn countdown_fires_exactly_once() {
    let mut timer = Countdown::idle();
    assert!(!timer.tick(1.0));

    timer.start(0.5);
    assert!(timer.is_running());

    assert!(!timer.tick(0.2));
    assert!(!timer.tick(0.2));
    assert!(timer.tick(0.2));

    // Idle again: no further fires without a restart.
    assert!(!timer.is_running());
    assert!(!timer.tick(10.0));
}

#[test]
fn countdown_zero_duration_fires_on_next_tick() {
    let mut timer = Countdown::idle();
    timer.start(0.0);
    assert!(timer.is_running());
    assert!(timer.tick(0.0));
}

#[test]
fn countdown_restart_replaces_remaining_time() {
    let mut timer = Countdown::idle();
    timer.start(1.0);
    assert!(!timer.tick(0.9));

    timer.start(1.0);
    assert!(!timer.tick(0.9));
    assert!(timer.tick(0.2));
}

#[test]
fn countdown_cancel_discards_pending_fire() {
    let mut timer = Countdown::idle();
    timer.start(0.1);
    timer.cancel();
    assert!(!timer.is_running());
    assert!(!timer.tick(1.0));
}

#[test]
fn countdown_ignores_negative_deltas() {
    let mut timer = Countdown::idle();
    timer.start(0.3);
    assert!(!timer.tick(-1.0));
    assert!(!timer.tick(0.2));
    assert!(timer.tick(0.2));
}
