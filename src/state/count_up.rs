//! Count-Up Animator - linear integer ramp from 0 to a target
//!
//! State machine: `Idle --(trigger)--> Running --(elapsed >= duration)--> Done`.
//!
//! - `Idle` is initial; `Done` is terminal.
//! - `Running` is entered at most once per instance.
//! - Progress comes from elapsed host time, never from frame count, so
//!   uneven frame intervals only change how many values get displayed.
//! - `current` never decreases, even if the host clock steps backwards.

use num_format::Locale;
use tracing::{debug, trace, warn};

use super::driven::{FrameDecision, FrameDriven};
use super::format::{format_count_with, CountFormat};
use crate::error::{AnimateError, Result};
use crate::types::FrameTime;

/// Where a counter is in its one-shot lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CountUpPhase {
    Idle,
    Running { started_at: FrameTime },
    Done,
}

/// Per-element count-up state.
#[derive(Clone, Debug)]
pub struct CountUpAnimator {
    target: u64,
    duration_ms: f64,
    current: u64,
    started_at: Option<FrameTime>,
    phase: CountUpPhase,
}

impl CountUpAnimator {
    /// Rejects `target < 0` and `duration_ms <= 0`.
    pub fn new(target: i64, duration_ms: i64) -> Result<Self> {
        if target < 0 {
            return Err(AnimateError::NegativeTarget(target));
        }
        if duration_ms <= 0 {
            return Err(AnimateError::InvalidDuration(duration_ms));
        }
        Ok(Self {
            target: target as u64,
            duration_ms: duration_ms as f64,
            current: 0,
            started_at: None,
            phase: CountUpPhase::Idle,
        })
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Currently displayed value.
    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn phase(&self) -> CountUpPhase {
        self.phase
    }

    /// Timestamp of the first running frame, once started.
    pub fn started_at(&self) -> Option<FrameTime> {
        self.started_at
    }

    /// Termination predicate for the frame loop.
    pub fn is_done(&self) -> bool {
        self.phase == CountUpPhase::Done
    }

    /// Fraction of the duration elapsed at `now`, clamped to `0..=1`.
    /// Zero while idle, one once done.
    pub fn progress(&self, now: FrameTime) -> f64 {
        match self.phase {
            CountUpPhase::Idle => 0.0,
            CountUpPhase::Running { started_at } => {
                let p = (now - started_at) / self.duration_ms;
                if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
            }
            CountUpPhase::Done => 1.0,
        }
    }

    /// Evaluate one frame and return the displayed value.
    ///
    /// The first frame that sees `trigger == true` records the start time.
    /// Once `Done`, the value stays at `target` whatever the inputs.
    pub fn animate(&mut self, now: FrameTime, trigger: bool) -> u64 {
        if self.phase == CountUpPhase::Idle {
            if !trigger {
                return self.current;
            }
            debug!(goal = self.target, now, "count-up started");
            self.started_at = Some(now);
            self.phase = CountUpPhase::Running { started_at: now };
        }

        if let CountUpPhase::Running { .. } = self.phase {
            let progress = self.progress(now);
            if progress >= 1.0 {
                self.current = self.target;
                self.phase = CountUpPhase::Done;
                debug!(goal = self.target, now, "count-up done");
            } else {
                let next = (self.target as f64 * progress).floor() as u64;
                if next < self.current {
                    warn!(now, current = self.current, "frame clock went backwards, holding value");
                } else {
                    self.current = next.min(self.target);
                }
                trace!(now, current = self.current, "count-up frame");
            }
        }

        self.current
    }

    /// Drive the animator over `frames` (already triggered) until it is done
    /// or the timestamps run out. Returns how many frames were consumed.
    pub fn run<I>(&mut self, frames: I) -> usize
    where
        I: IntoIterator<Item = FrameTime>,
    {
        let mut consumed = 0;
        for now in frames {
            if self.is_done() {
                break;
            }
            self.animate(now, true);
            consumed += 1;
        }
        consumed
    }

    /// Render the current value.
    pub fn text(&self, format: CountFormat, locale: &Locale) -> String {
        format_count_with(self.current, format, locale)
    }
}

impl FrameDriven for CountUpAnimator {
    fn on_frame(&mut self, now: FrameTime) -> FrameDecision {
        self.animate(now, true);
        if self.is_done() {
            FrameDecision::Stop
        } else {
            FrameDecision::Continue
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
