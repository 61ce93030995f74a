// Host-side tests for the ripple lifecycle state machine.

use glam::Vec2;
use ripple_core::{
    Epoch, OriginPoint, RippleEngine, RippleParams, RipplePhase, RippleState, Session,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn make_engine() -> RippleEngine {
    RippleEngine::new(RippleParams::default(), Vec2::new(1000.0, 600.0), 42)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn engine_starts_idle_and_hidden() {
    let engine = make_engine();
    assert_eq!(engine.state(), RippleState::Idle);
    assert_eq!(engine.phase(), RipplePhase::Idle);
    assert_eq!(engine.epoch(), Epoch::ZERO);
    assert!(engine.pending().is_none());
    assert_eq!(engine.frames().count(), engine.shape().cell_count());
    assert!(engine.frames().all(|f| !f.visible));
}

#[test]
fn trigger_enters_animating_with_fresh_plan() {
    let mut engine = make_engine();
    let scheduled = engine.trigger(OriginPoint::new(500.0, 300.0));

    assert_eq!(engine.state(), RippleState::Animating);
    assert_eq!(engine.phase(), RipplePhase::Animating);
    assert_eq!(scheduled.epoch, Epoch(1));
    assert_eq!(engine.plan().epoch, Epoch(1));
    assert_eq!(engine.plan().origin_index, Some(scheduled.origin_index));
    assert_eq!(engine.plan().len(), engine.shape().cell_count());

    let origin = engine.cell(scheduled.origin_index).unwrap();
    assert!(origin.visible);
    assert_eq!(origin.stagger_delay_sec, 0.0);
    assert!(engine.frames().all(|f| f.visible));
    assert!(engine
        .frames()
        .enumerate()
        .filter(|(i, _)| *i != scheduled.origin_index)
        .all(|(_, f)| f.stagger_delay_sec > 0.0));
}

#[test]
fn epochs_increase_and_only_latest_settles() {
    let mut engine = make_engine();
    let mut epochs = Vec::new();
    for i in 0..5 {
        let s = engine.trigger(OriginPoint::new(100.0 * i as f32, 50.0));
        epochs.push(s.epoch);
    }
    for w in epochs.windows(2) {
        assert!(w[1] > w[0], "epochs not strictly increasing: {:?}", epochs);
    }

    for stale in &epochs[..epochs.len() - 1] {
        assert!(!engine.settle(*stale));
        assert_eq!(engine.state(), RippleState::Animating);
    }

    let latest = *epochs.last().unwrap();
    assert!(engine.settle(latest));
    assert_eq!(engine.state(), RippleState::Idle);
    assert_eq!(engine.phase(), RipplePhase::Settled);
    assert!(engine.frames().all(|f| !f.visible));

    // a repeated settle is a no-op
    assert!(!engine.settle(latest));
}

#[test]
fn click_far_outside_maps_to_edge_cell() {
    let mut engine = make_engine();
    let columns = engine.shape().columns as usize;
    let s = engine.trigger(OriginPoint::new(1000.0 + 1000.0, -500.0));
    assert_eq!(s.origin_index, columns - 1);
    assert!(s.origin_index < engine.shape().cell_count());
    assert_eq!(engine.plan().delays[s.origin_index], 0.0);
}

#[test]
fn tick_settles_exactly_when_due() {
    let params = RippleParams {
        base_delay: 0.0,
        noise: 0.0,
        spring_settle_ms: 600.0,
        fade_buffer_ms: 300.0,
        ..RippleParams::default()
    };
    let mut engine = RippleEngine::new(params, Vec2::new(1000.0, 600.0), 1);
    let s = engine.trigger(OriginPoint::new(10.0, 10.0));
    assert_eq!(s.after, ms(900));

    assert_eq!(engine.tick(ms(899)), None);
    assert_eq!(engine.state(), RippleState::Animating);
    assert_eq!(engine.tick(ms(2)), Some(s.epoch));
    assert_eq!(engine.state(), RippleState::Idle);
    assert!(engine.pending().is_none());
}

#[test]
fn settle_time_tracks_largest_delay() {
    let mut engine = make_engine();
    let s = engine.trigger(OriginPoint::new(0.0, 0.0));
    let max = engine
        .plan()
        .delays
        .iter()
        .copied()
        .fold(0.0_f32, f32::max);
    let expected_ms = max as f64 * 1000.0 + 600.0 + 500.0;
    let got_ms = s.after.as_secs_f64() * 1000.0;
    assert!((got_ms - expected_ms).abs() < 0.01);

    let before = s.after - ms(1);
    assert_eq!(engine.tick(before), None);
    assert_eq!(engine.tick(ms(2)), Some(s.epoch));
}

#[test]
fn retrigger_supersedes_pending_settle() {
    let mut engine = make_engine();
    let first = engine.trigger(OriginPoint::new(50.0, 50.0));
    engine.tick(ms(400));
    let second = engine.trigger(OriginPoint::new(900.0, 500.0));
    assert_ne!(first.epoch, second.epoch);
    assert_eq!(engine.pending(), Some(second));

    // the moment the first ripple would have settled passes without effect
    let until_first = first.due.saturating_sub(engine.clock());
    assert_eq!(engine.tick(until_first), None);
    assert_eq!(engine.state(), RippleState::Animating);

    let until_second = second.due.saturating_sub(engine.clock());
    assert_eq!(engine.tick(until_second + ms(1)), Some(second.epoch));
    assert_eq!(engine.state(), RippleState::Idle);
}

#[test]
fn each_trigger_replaces_the_whole_plan() {
    let mut engine = make_engine();
    engine.trigger(OriginPoint::new(0.0, 0.0));
    let first = engine.plan().clone();
    engine.trigger(OriginPoint::new(999.0, 599.0));
    let second = engine.plan();
    assert_eq!(second.epoch, Epoch(2));
    assert_ne!(first.origin_index, second.origin_index);
    assert_ne!(first.delays, second.delays);
    assert_eq!(second.stagger(second.origin_index.unwrap()), 0.0);
}

#[test]
fn resize_with_new_shape_drops_animation() {
    let mut engine = make_engine();
    let s = engine.trigger(OriginPoint::new(500.0, 300.0));
    assert!(engine.resize(Vec2::new(1920.0, 1080.0)));

    assert_eq!(engine.state(), RippleState::Idle);
    assert_eq!(engine.epoch(), s.epoch);
    assert!(engine.pending().is_none());
    assert_eq!(engine.plan().len(), engine.shape().cell_count());
    assert!(engine.plan().origin_index.is_none());
    assert!(!engine.settle(s.epoch));

    // the next trigger maps against the new shape
    let next = engine.trigger(OriginPoint::new(1919.0, 1079.0));
    assert_eq!(next.origin_index, engine.shape().cell_count() - 1);
}

#[test]
fn resize_with_same_shape_keeps_animating() {
    let mut engine = make_engine();
    engine.trigger(OriginPoint::new(500.0, 300.0));
    assert!(!engine.resize(Vec2::new(1010.0, 605.0)));
    assert_eq!(engine.state(), RippleState::Animating);
    assert!(engine.pending().is_some());
}

#[test]
fn tick_without_trigger_does_nothing() {
    let mut engine = make_engine();
    assert_eq!(engine.tick(Duration::from_secs(10)), None);
    assert_eq!(engine.phase(), RipplePhase::Idle);
}

#[test]
fn published_origin_drives_the_engine() {
    let session = Session::default();
    let engine = Rc::new(RefCell::new(RippleEngine::new(
        session.config().ripple.clone(),
        Vec2::new(1000.0, 600.0),
        9,
    )));

    let engine_for_listener = engine.clone();
    let _subscription = session.subscriber().on_publish(move |p| {
        engine_for_listener.borrow_mut().trigger(p);
    });

    let publisher = session.publisher();
    publisher.publish(10.0, 10.0);
    publisher.publish(990.0, 590.0);

    let engine = engine.borrow();
    assert_eq!(engine.epoch(), Epoch(2));
    assert_eq!(engine.plan().origin_index, Some(engine.shape().cell_count() - 1));
    assert_eq!(engine.state(), RippleState::Animating);
}

#[test]
fn epoch_next_never_goes_backwards() {
    assert_eq!(Epoch::ZERO.next(), Epoch(1));
    assert!(Epoch(7).next() > Epoch(7));
    assert_eq!(Epoch(u64::MAX).next(), Epoch(u64::MAX));
    assert!(Epoch(u64::MAX).next() >= Epoch(u64::MAX - 1).next());
}
