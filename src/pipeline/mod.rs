//! Pipeline Module - mounting components on a surface
//!
//! ```text
//! element --observe--> VisibilityTrigger --effect--> FrameLoop --frames--> animator
//! ```

mod frame_loop;
mod mount;
mod reveal;
mod stat_card;

pub use frame_loop::{FrameLoop, LoopStarter};
pub use mount::{mount_driven, Cleanup, Held, MountGroup, Mounted};
pub use reveal::{mount_reveal, mount_staggered, Reveal};
pub use stat_card::{mount_stat_card, StatCard, StatCardAnimation, StatCardProps};
