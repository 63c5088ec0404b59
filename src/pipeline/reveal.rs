//! Reveal - fade/slide-in of a card on first view, optionally staggered.

use std::rc::Rc;

use super::mount::{mount_driven, MountGroup, Mounted};
use crate::config::AnimationConfig;
use crate::error::Result;
use crate::state::{stagger, RevealFrame, RevealTransition};
use crate::surface::Surface;
use crate::types::ElementId;

/// A mounted reveal.
pub struct Reveal {
    mounted: Mounted<RevealTransition>,
}

impl Reveal {
    pub fn frame(&self) -> RevealFrame {
        self.mounted.driven().borrow().frame()
    }

    pub fn is_done(&self) -> bool {
        self.mounted.driven().borrow().is_done()
    }

    pub fn has_fired(&self) -> bool {
        self.mounted.has_fired()
    }

    pub fn unmount(self) {
        self.mounted.unmount();
    }

    /// Hand the component over to a group.
    pub fn adopt_into(self, group: &mut MountGroup) {
        group.adopt(self.mounted);
    }
}

/// Mount a reveal on `element`, starting `delay_ms` after it is first seen.
pub fn mount_reveal<S: Surface + 'static>(
    surface: &Rc<S>,
    element: ElementId,
    delay_ms: f64,
    config: &AnimationConfig,
) -> Result<Reveal> {
    let transition = RevealTransition::new(config.reveal_duration_ms, config.reveal_offset_px)?
        .with_delay(delay_ms)
        .with_scale_from(config.reveal_scale_from)
        .with_rotate_x_from(config.reveal_rotate_x_from);
    let mounted = mount_driven(surface, element, config.reveal_margin_px, transition)?;
    Ok(Reveal { mounted })
}

/// Mount reveals for a grid, delaying item `i` by `i * stagger_step_ms`.
///
/// All-or-nothing: if any element fails, the ones already mounted are
/// released before the error is returned.
pub fn mount_staggered<S: Surface + 'static>(
    surface: &Rc<S>,
    elements: &[ElementId],
    config: &AnimationConfig,
) -> Result<Vec<Reveal>> {
    let mut reveals = Vec::with_capacity(elements.len());
    for (index, &element) in elements.iter().enumerate() {
        let delay = stagger(index, config.stagger_step_ms);
        reveals.push(mount_reveal(surface, element, delay, config)?);
    }
    Ok(reveals)
}
