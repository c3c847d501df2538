use super::*;

use crate::{AnimationSpec, Easing, FrameScheduler, SpringSpec, TweenSpec};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME: u64 = 16_666_667; // ~60 FPS

fn run_to_completion(scheduler: &FrameScheduler, max_frames: usize) -> u64 {
    let mut time = 0u64;
    for _ in 0..max_frames {
        if !scheduler.has_pending() {
            break;
        }
        time += FRAME;
        scheduler.drain(time);
    }
    time
}

#[test]
fn tween_emits_monotonic_fractions_and_completes_once() {
    let scheduler = FrameScheduler::new();
    let clock = scheduler.clock();
    let samples = Rc::new(RefCell::new(Vec::new()));
    let completions = Rc::new(Cell::new(0u32));

    let sample_sink = samples.clone();
    let completion_sink = completions.clone();
    let _handle = Transition::run(
        &clock,
        AnimationSpec::Tween(TweenSpec::new(250, Easing::EaseOut)),
        move |fraction| sample_sink.borrow_mut().push(fraction),
        move || completion_sink.set(completion_sink.get() + 1),
    );

    run_to_completion(&scheduler, 64);

    let samples = samples.borrow();
    assert_eq!(*samples.first().expect("at least one frame"), 0.0);
    assert_eq!(*samples.last().expect("final frame"), 1.0);
    for pair in samples.windows(2) {
        assert!(pair[1] >= pair[0], "ease-out fraction regressed: {pair:?}");
    }
    assert_eq!(completions.get(), 1);
    assert!(!scheduler.has_pending());
}

#[test]
fn spring_transition_settles_at_one() {
    let scheduler = FrameScheduler::new();
    let clock = scheduler.clock();
    let last = Rc::new(Cell::new(0.0f32));
    let completions = Rc::new(Cell::new(0u32));

    let last_sink = last.clone();
    let completion_sink = completions.clone();
    let _handle = Transition::run(
        &clock,
        AnimationSpec::Spring(SpringSpec::with_duration_and_damping(300, 0.85)),
        move |fraction| last_sink.set(fraction),
        move || completion_sink.set(completion_sink.get() + 1),
    );

    run_to_completion(&scheduler, 256);

    assert_eq!(last.get(), 1.0);
    assert_eq!(completions.get(), 1);
}

#[test]
fn cancelled_transition_never_completes() {
    let scheduler = FrameScheduler::new();
    let clock = scheduler.clock();
    let completions = Rc::new(Cell::new(0u32));

    let completion_sink = completions.clone();
    let handle = Transition::run(
        &clock,
        AnimationSpec::Tween(TweenSpec::linear(200)),
        |_| {},
        move || completion_sink.set(completion_sink.get() + 1),
    );

    scheduler.drain(FRAME);
    handle.cancel();
    assert!(handle.is_finished());

    run_to_completion(&scheduler, 64);
    assert_eq!(completions.get(), 0);
}

#[test]
fn transition_outlives_dropped_handle() {
    let scheduler = FrameScheduler::new();
    let clock = scheduler.clock();
    let completions = Rc::new(Cell::new(0u32));

    let completion_sink = completions.clone();
    let handle = Transition::run(
        &clock,
        AnimationSpec::Tween(TweenSpec::linear(100)),
        |_| {},
        move || completion_sink.set(completion_sink.get() + 1),
    );
    drop(handle);

    run_to_completion(&scheduler, 64);
    assert_eq!(completions.get(), 1);
}

#[test]
fn zero_duration_tween_completes_on_first_frame() {
    let scheduler = FrameScheduler::new();
    let clock = scheduler.clock();
    let last = Rc::new(Cell::new(-1.0f32));

    let last_sink = last.clone();
    let _handle = Transition::run(
        &clock,
        AnimationSpec::Tween(TweenSpec::linear(0)),
        move |fraction| last_sink.set(fraction),
        || {},
    );

    scheduler.drain(FRAME);
    assert_eq!(last.get(), 1.0);
    assert!(!scheduler.has_pending());
}

#[test]
fn easing_endpoints_are_exact() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ] {
        assert_eq!(easing.transform(0.0), 0.0);
        assert_eq!(easing.transform(1.0), 1.0);
    }
    // EaseOut front-loads movement, EaseIn back-loads it.
    assert!(Easing::EaseOut.transform(0.25) > 0.25);
    assert!(Easing::EaseIn.transform(0.25) < 0.25);
}
