//! State Module - per-element animation state
//!
//! - **Visibility** - one-shot "became visible" trigger
//! - **Count-up** - `Idle -> Running -> Done` integer ramp
//! - **Reveal** - eased fade/slide-in with stagger delays
//! - **Format** - count / percentage rendering
//! - **Toggle** - yearly/monthly billing switch
//!
//! Every state value is owned by one element; nothing here is global.

mod count_up;
mod driven;
mod format;
mod reveal;
mod toggle;
mod visibility;

pub use count_up::*;
pub use driven::*;
pub use format::*;
pub use reveal::*;
pub use toggle::*;
pub use visibility::*;
