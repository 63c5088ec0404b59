//! Surface Module - the host boundary
//!
//! Everything the animation core needs from the rendering surface:
//!
//! - **Frames** - "call this once before the next repaint" ([`FrameScheduler`])
//! - **Intersection** - observe an element against the viewport ([`IntersectionHost`])
//!
//! Both are one-shot registrations returning ids that the caller must release.
//! [`HeadlessSurface`] implements both with a virtual clock and viewport.

mod headless;

pub use headless::HeadlessSurface;

use crate::error::Result;
use crate::types::{ElementId, FrameId, FrameTime, ObserverId};

// =============================================================================
// CALLBACK TYPES
// =============================================================================

/// Frame callback, invoked once with the repaint timestamp.
pub type FrameCallback = Box<dyn FnOnce(FrameTime)>;

/// What an intersection callback wants after a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// Keep delivering notifications.
    Keep,
    /// Unregister this observer; no further notifications.
    Disconnect,
}

/// Intersection callback, invoked with the current "is intersecting" answer
/// whenever the host re-evaluates (on observe, scroll, resize and layout moves).
pub type IntersectionCallback = Box<dyn FnMut(bool) -> Observation>;

// =============================================================================
// HOST TRAITS
// =============================================================================

/// Frame-scheduling primitive.
pub trait FrameScheduler {
    /// Run `callback` once before the next repaint.
    fn request_frame(&self, callback: FrameCallback) -> FrameId;

    /// Drop a pending callback. Unknown or already-fired ids are ignored.
    fn cancel_frame(&self, id: FrameId);
}

/// Viewport-intersection primitive.
pub trait IntersectionHost {
    /// Hosts without intersection support make triggers fire at mount.
    fn supports_intersection(&self) -> bool {
        true
    }

    /// Start observing `element` with the given root margin.
    fn observe(
        &self,
        element: ElementId,
        margin_px: f32,
        callback: IntersectionCallback,
    ) -> Result<ObserverId>;

    /// Stop observing. Unknown ids are ignored.
    fn unobserve(&self, id: ObserverId);

    /// Is `id` still registered? False once the host dropped it, including
    /// when the observed element itself went away.
    fn is_observing(&self, id: ObserverId) -> bool;
}

/// A full rendering surface.
pub trait Surface: FrameScheduler + IntersectionHost {}

impl<T: FrameScheduler + IntersectionHost> Surface for T {}
