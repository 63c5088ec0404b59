//! # spark-reveal
//!
//! Scroll-triggered reveal and count-up animations driven by a frame clock.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals): a
//! trigger's "has fired" flag is a signal, and mounted components start their
//! frame loop from an effect on it.
//!
//! ## Architecture
//!
//! ```text
//! Surface (intersection + frames) → VisibilityTrigger → FrameLoop → animator
//! ```
//!
//! All work happens on the host's frame callbacks, on one thread. Progress is
//! measured in elapsed host time, so uneven frame intervals are harmless.
//!
//! ## Modules
//!
//! - [`types`] - Geometry, ids, frame clock unit
//! - [`surface`] - Host traits and the headless surface
//! - [`state`] - Triggers, animators, formatting, billing toggle
//! - [`pipeline`] - Mounting components with guaranteed teardown
//! - [`config`] - Timing defaults and TOML overrides

pub mod config;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod surface;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::AnimationConfig;
pub use error::{AnimateError, Result};

pub use surface::{
    FrameCallback, FrameScheduler, HeadlessSurface, IntersectionCallback, IntersectionHost,
    Observation, Surface,
};

pub use state::{
    // Triggers and animators
    VisibilityTrigger, CountUpAnimator, CountUpPhase, RevealTransition, RevealFrame,
    FrameDriven, FrameDecision, stagger, ease_out_cubic,
    // Formatting
    CountFormat, format_count, format_count_with,
    // Pricing
    BillingPeriod, BillingToggle, PricingPlan, PLANS,
};

pub use pipeline::{
    mount_driven, mount_reveal, mount_stat_card, mount_staggered, Cleanup, FrameLoop, Held,
    MountGroup, Mounted, Reveal, StatCard, StatCardAnimation, StatCardProps,
};
