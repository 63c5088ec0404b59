//! Reveal Transition - fade and slide-in for scroll-revealed cards
//!
//! A card starts transparent and `offset_px` below its resting place, then
//! eases to fully opaque at rest over `duration_ms`, after an optional delay.
//! Grids stagger the delay by item index. Cards may also grow in from a
//! smaller scale or tilt up from a rotation about the x axis.
//!
//! Unlike the count-up ramp, the motion uses an ease-out curve.

use tracing::debug;

use super::driven::{FrameDecision, FrameDriven};
use crate::error::{AnimateError, Result};
use crate::types::FrameTime;

/// Visual state of a revealed element at one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealFrame {
    /// 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f32,
    /// Vertical displacement from the resting position, in pixels.
    pub offset_y: f32,
    /// Uniform scale, 1.0 at rest.
    pub scale: f32,
    /// Rotation about the x axis in degrees, 0.0 at rest.
    pub rotate_x: f32,
}

impl RevealFrame {
    pub const SETTLED: Self = Self { opacity: 1.0, offset_y: 0.0, scale: 1.0, rotate_x: 0.0 };

    /// Transparent and `offset_px` down, unscaled and untilted.
    pub fn hidden(offset_px: f32) -> Self {
        Self { opacity: 0.0, offset_y: offset_px, ..Self::SETTLED }
    }

    /// Channel-wise interpolation towards `to`.
    pub fn lerp(&self, to: &RevealFrame, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            opacity: mix(self.opacity, to.opacity),
            offset_y: mix(self.offset_y, to.offset_y),
            scale: mix(self.scale, to.scale),
            rotate_x: mix(self.rotate_x, to.rotate_x),
        }
    }
}

/// Delay for item `index` of a staggered group.
pub fn stagger(index: usize, step_ms: f64) -> f64 {
    index as f64 * step_ms
}

/// Cubic ease-out on `t` in `0..=1`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// One-shot reveal animation.
#[derive(Clone, Debug)]
pub struct RevealTransition {
    duration_ms: f64,
    delay_ms: f64,
    from: RevealFrame,
    started_at: Option<FrameTime>,
    frame: RevealFrame,
    done: bool,
}

impl RevealTransition {
    pub fn new(duration_ms: i64, offset_px: f32) -> Result<Self> {
        if duration_ms <= 0 {
            return Err(AnimateError::InvalidDuration(duration_ms));
        }
        Ok(Self {
            duration_ms: duration_ms as f64,
            delay_ms: 0.0,
            from: RevealFrame::hidden(offset_px),
            started_at: None,
            frame: RevealFrame::hidden(offset_px),
            done: false,
        })
    }

    /// Wait `delay_ms` after the first frame before moving.
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    /// Grow in from `scale` (e.g. 0.95) instead of full size.
    pub fn with_scale_from(mut self, scale: f32) -> Self {
        self.from.scale = scale;
        self.frame = self.from;
        self
    }

    /// Tilt up from `degrees` about the x axis (e.g. -10).
    pub fn with_rotate_x_from(mut self, degrees: f32) -> Self {
        self.from.rotate_x = degrees;
        self.frame = self.from;
        self
    }

    /// Frame shown before the transition moves.
    pub fn from_frame(&self) -> RevealFrame {
        self.from
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    pub fn frame(&self) -> RevealFrame {
        self.frame
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Frame at `elapsed` ms since the transition started (delay included).
    pub fn sample(&self, elapsed: f64) -> RevealFrame {
        let t = (elapsed - self.delay_ms) / self.duration_ms;
        if t.is_nan() || t <= 0.0 {
            return self.from;
        }
        if t >= 1.0 {
            return RevealFrame::SETTLED;
        }
        self.from.lerp(&RevealFrame::SETTLED, ease_out_cubic(t) as f32)
    }
}

impl FrameDriven for RevealTransition {
    fn on_frame(&mut self, now: FrameTime) -> FrameDecision {
        if self.done {
            return FrameDecision::Stop;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = (now - started_at).max(0.0);
        self.frame = self.sample(elapsed);
        if elapsed >= self.delay_ms + self.duration_ms {
            self.frame = RevealFrame::SETTLED;
            self.done = true;
            debug!(now, "reveal done");
            return FrameDecision::Stop;
        }
        FrameDecision::Continue
    }
}
