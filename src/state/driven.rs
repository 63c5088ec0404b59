//! Frame-driven seam shared by every animator.

use crate::types::FrameTime;

/// What a frame-driven animator wants after handling a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameDecision {
    /// Request another frame.
    Continue,
    /// Terminal: request nothing more.
    Stop,
}

/// Anything advanced once per repaint by a frame loop.
pub trait FrameDriven {
    /// Advance to `now` (host clock, ms).
    fn on_frame(&mut self, now: FrameTime) -> FrameDecision;
}
