//! Integration tests for the breathing animation driver.
//!
//! Frames arrive through the UI dispatch channel, so the tests drain it
//! directly; compressed schedules keep the natural-completion cases fast.

use std::time::Duration;

use solace::breathing::{BreathingPhase, BreathingTimer, DONE_LABEL, READY_LABEL, TICKS_PER_PHASE};
use solace::dispatch::{UiDispatch, UiEvent};
use tokio::sync::mpsc::UnboundedReceiver;

fn frame_label(event: UiEvent) -> String {
    match event {
        UiEvent::BreathingFrame { label, .. } => label,
        other => panic!("expected BreathingFrame, got {other:?}"),
    }
}

/// Drain whatever is queued right now, without waiting.
fn drain_now(events: &mut UnboundedReceiver<UiEvent>) -> Vec<String> {
    let mut labels = Vec::new();
    while let Ok(event) = events.try_recv() {
        labels.push(frame_label(event));
    }
    labels
}

fn instant_phases() -> Vec<BreathingPhase> {
    vec![
        BreathingPhase { label: "Inhale", duration_secs: 0, target_scale: 1.35 },
        BreathingPhase { label: "Exhale", duration_secs: 0, target_scale: 1.0 },
    ]
}

#[tokio::test]
async fn test_uninterrupted_run_ends_with_done_and_nothing_after() {
    let (dispatch, mut events) = UiDispatch::channel();
    let timer = BreathingTimer::with_phases(dispatch, instant_phases(), 2);

    assert!(timer.start());

    // 2 cycles x 2 phases x 31 ticks, then the terminal frame.
    let expected_frames = 2 * 2 * (TICKS_PER_PHASE as usize + 1);
    let mut labels = Vec::new();
    for _ in 0..=expected_frames {
        let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("timed out waiting for frame")
            .expect("channel closed");
        labels.push(frame_label(event));
    }

    assert_eq!(labels.len(), expected_frames + 1);
    assert_eq!(labels.last().unwrap(), DONE_LABEL);
    assert!(!timer.is_running());

    // No further updates after the terminal frame.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(drain_now(&mut events).is_empty());
}

#[tokio::test]
async fn test_stop_resets_to_ready_within_one_tick() {
    let (dispatch, mut events) = UiDispatch::channel();
    // Real-length phase: one tick sleeps ~133ms, so an immediate stop
    // should see very few frames.
    let phases = vec![BreathingPhase { label: "Inhale", duration_secs: 4, target_scale: 1.35 }];
    let timer = BreathingTimer::with_phases(dispatch, phases, 4);

    assert!(timer.start());
    tokio::time::sleep(Duration::from_millis(10)).await;
    timer.stop();
    assert!(!timer.is_running());

    // Give the worker time to notice the flag and exit.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let labels = drain_now(&mut events);

    let ready_pos = labels
        .iter()
        .position(|l| l == READY_LABEL)
        .expect("no Ready frame after stop");
    // Bounded latency: at most one tick could have been in flight when the
    // flag flipped, and nothing but that may follow the reset.
    assert!(ready_pos <= 2, "too many frames before Ready: {labels:?}");
    assert!(labels.len() - ready_pos - 1 <= 1, "frames after Ready: {labels:?}");
    assert!(!labels.iter().any(|l| l == DONE_LABEL));

    // Cancellation is quiet afterwards.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(drain_now(&mut events).is_empty());
}

#[tokio::test]
async fn test_second_start_while_running_is_a_noop() {
    let (dispatch, mut events) = UiDispatch::channel();
    let phases = vec![BreathingPhase { label: "Inhale", duration_secs: 4, target_scale: 1.35 }];
    let timer = BreathingTimer::with_phases(dispatch, phases, 4);

    assert!(timer.start());
    assert!(timer.is_running());
    assert!(!timer.start(), "second start must not spawn a worker");
    assert!(timer.is_running());

    timer.stop();
    tokio::time::sleep(Duration::from_millis(300)).await;

    // A single worker's worth of frames: tick 0 and maybe one more, plus
    // the reset. A second worker would have doubled the tick frames.
    let labels = drain_now(&mut events);
    let inhale_frames = labels.iter().filter(|l| l.starts_with("Inhale")).count();
    assert!(inhale_frames <= 2, "unexpected frame count: {labels:?}");
    // Cross-sender ordering is not promised, so only presence is checked.
    assert!(labels.iter().any(|l| l == READY_LABEL));
}

#[tokio::test]
async fn test_stop_when_idle_posts_nothing() {
    let (dispatch, mut events) = UiDispatch::channel();
    let timer = BreathingTimer::with_phases(dispatch, instant_phases(), 1);

    timer.stop();
    assert!(drain_now(&mut events).is_empty());
}

#[tokio::test]
async fn test_timer_can_restart_after_completion() {
    let (dispatch, mut events) = UiDispatch::channel();
    let timer = BreathingTimer::with_phases(dispatch, instant_phases(), 1);

    assert!(timer.start());
    // Wait for the run to finish.
    loop {
        let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("timed out")
            .expect("channel closed");
        if frame_label(event) == DONE_LABEL {
            break;
        }
    }
    assert!(!timer.is_running());

    // The flag is free again; a new run may begin.
    assert!(timer.start());
    timer.stop();
}
