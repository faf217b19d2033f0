//! Box-breathing animation driver.
//!
//! Runs on its own worker task, independent of message handling: it never
//! touches the transcript, only posts frames through [`UiDispatch`].
//! Cancellation is cooperative via a single atomic flag checked before
//! every phase and every tick, so stop latency is bounded by one tick's
//! sleep rather than being instantaneous.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::dispatch::{UiDispatch, UiEvent};

/// One step of the breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathingPhase {
    /// Label shown in the circle (remaining seconds get appended per tick)
    pub label: &'static str,
    /// How long the phase lasts
    pub duration_secs: u64,
    /// Circle scale the phase animates toward, starting from 1.0
    pub target_scale: f64,
}

/// The box-breathing sequence: inhale, hold, exhale, hold.
pub const BOX_BREATHING: [BreathingPhase; 4] = [
    BreathingPhase { label: "Inhale", duration_secs: 4, target_scale: 1.35 },
    BreathingPhase { label: "Hold", duration_secs: 4, target_scale: 1.35 },
    BreathingPhase { label: "Exhale", duration_secs: 6, target_scale: 1.0 },
    BreathingPhase { label: "Hold", duration_secs: 4, target_scale: 1.35 },
];

/// How many times the full cycle repeats.
pub const DEFAULT_CYCLES: u32 = 4;

/// Animation sub-steps per phase.
pub const TICKS_PER_PHASE: u32 = 30;

/// Label of the frame posted when all cycles finish uninterrupted.
pub const DONE_LABEL: &str = "Done ✓";

/// Label of the frame posted when the user stops the exercise.
pub const READY_LABEL: &str = "Ready";

/// Cancellable, step-based driver for the guided-breathing animation.
pub struct BreathingTimer {
    dispatch: UiDispatch,
    /// Doubles as the single-instance lock: only one worker may be active
    running: Arc<AtomicBool>,
    phases: Vec<BreathingPhase>,
    cycles: u32,
}

impl BreathingTimer {
    /// Create a timer with the standard box-breathing schedule.
    pub fn new(dispatch: UiDispatch) -> Self {
        Self::with_phases(dispatch, BOX_BREATHING.to_vec(), DEFAULT_CYCLES)
    }

    /// Create a timer with a custom schedule (tests use compressed ones).
    pub fn with_phases(dispatch: UiDispatch, phases: Vec<BreathingPhase>, cycles: u32) -> Self {
        Self {
            dispatch,
            running: Arc::new(AtomicBool::new(false)),
            phases,
            cycles,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Start the exercise on a new worker task.
    ///
    /// Returns false without spawning anything when a run is already
    /// active.
    pub fn start(&self) -> bool {
        if self.running.swap(true, Ordering::Relaxed) {
            tracing::debug!("breathing timer already running, start ignored");
            return false;
        }

        let running = Arc::clone(&self.running);
        let dispatch = self.dispatch.clone();
        let phases = self.phases.clone();
        let cycles = self.cycles;
        tokio::spawn(async move {
            run_cycles(&running, &dispatch, &phases, cycles).await;
        });
        true
    }

    /// Request cancellation and post the "Ready" reset frame.
    ///
    /// The worker exits at its next flag check, at most one tick's sleep
    /// away. Stopping an idle timer does nothing.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::Relaxed) {
            self.dispatch.post(UiEvent::BreathingFrame {
                label: READY_LABEL.to_string(),
                scale: 1.0,
            });
        }
    }
}

async fn run_cycles(
    running: &AtomicBool,
    dispatch: &UiDispatch,
    phases: &[BreathingPhase],
    cycles: u32,
) {
    'cycles: for _ in 0..cycles {
        for phase in phases {
            if !running.load(Ordering::Relaxed) {
                break 'cycles;
            }
            let tick_sleep =
                Duration::from_secs_f64(phase.duration_secs as f64 / f64::from(TICKS_PER_PHASE));
            for tick in 0..=TICKS_PER_PHASE {
                if !running.load(Ordering::Relaxed) {
                    break 'cycles;
                }
                let (label, scale) = tick_frame(phase, tick);
                dispatch.post(UiEvent::BreathingFrame { label, scale });
                tokio::time::sleep(tick_sleep).await;
            }
        }
    }

    // Natural completion keeps the flag set until here; an external stop
    // already cleared it and posted the reset frame.
    if running.swap(false, Ordering::Relaxed) {
        dispatch.post(UiEvent::BreathingFrame {
            label: DONE_LABEL.to_string(),
            scale: 1.0,
        });
    }
}

/// Interpolated scale and remaining-time label for one tick of a phase.
fn tick_frame(phase: &BreathingPhase, tick: u32) -> (String, f64) {
    let progress = f64::from(tick) / f64::from(TICKS_PER_PHASE);
    let scale = 1.0 + (phase.target_scale - 1.0) * progress;
    let elapsed = u64::from(tick) * phase.duration_secs / u64::from(TICKS_PER_PHASE);
    let remaining = phase.duration_secs.saturating_sub(elapsed);
    (format!("{} ({}s)", phase.label, remaining), scale)
}
