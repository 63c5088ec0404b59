//! Stat card - a count-up number revealed on first view.
//!
//! One trigger drives both halves: the counter starts ramping on the first
//! frame after the card is seen, while the card itself fades in and slides
//! up after its `delay_ms`. The frame loop runs until both have settled.

use std::rc::Rc;

use num_format::Locale;

use super::mount::{mount_driven, Held, Mounted};
use crate::config::AnimationConfig;
use crate::error::Result;
use crate::state::{
    CountFormat, CountUpAnimator, CountUpPhase, FrameDecision, FrameDriven, RevealFrame,
    RevealTransition,
};
use crate::surface::Surface;
use crate::types::{ElementId, FrameTime};

/// Stat card properties.
#[derive(Clone, Debug, PartialEq)]
pub struct StatCardProps {
    pub element: ElementId,
    pub target: i64,
    pub format: CountFormat,
    pub duration_ms: i64,
    pub margin_px: f32,
    pub locale: Locale,
    /// Entrance delay after the card is first seen.
    pub delay_ms: f64,
    pub reveal_duration_ms: i64,
    pub reveal_offset_px: f32,
}

impl StatCardProps {
    /// Plain count with the default timing and `en` grouping.
    pub fn new(element: ElementId, target: i64) -> Self {
        let config = AnimationConfig::default();
        Self {
            element,
            target,
            format: CountFormat::Count,
            duration_ms: config.count_duration_ms,
            margin_px: config.stat_margin_px,
            locale: Locale::en,
            delay_ms: 0.0,
            reveal_duration_ms: config.reveal_duration_ms,
            reveal_offset_px: config.reveal_offset_px,
        }
    }

    /// Props taking timing and locale from `config`. Fails on an unknown locale.
    pub fn from_config(element: ElementId, target: i64, config: &AnimationConfig) -> Result<Self> {
        Ok(Self {
            element,
            target,
            format: CountFormat::Count,
            duration_ms: config.count_duration_ms,
            margin_px: config.stat_margin_px,
            locale: config.locale()?,
            delay_ms: 0.0,
            reveal_duration_ms: config.reveal_duration_ms,
            reveal_offset_px: config.reveal_offset_px,
        })
    }

    pub fn percentage(mut self) -> Self {
        self.format = CountFormat::Percentage;
        self
    }

    pub fn with_duration(mut self, duration_ms: i64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_margin(mut self, margin_px: f32) -> Self {
        self.margin_px = margin_px;
        self
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

// =============================================================================
// Animation
// =============================================================================

/// Counter plus card entrance, advanced on the same frames.
#[derive(Clone, Debug)]
pub struct StatCardAnimation {
    count: CountUpAnimator,
    reveal: RevealTransition,
}

impl StatCardAnimation {
    pub fn new(count: CountUpAnimator, reveal: RevealTransition) -> Self {
        Self { count, reveal }
    }

    pub fn count(&self) -> &CountUpAnimator {
        &self.count
    }

    pub fn reveal(&self) -> &RevealTransition {
        &self.reveal
    }
}

impl FrameDriven for StatCardAnimation {
    fn on_frame(&mut self, now: FrameTime) -> FrameDecision {
        let count = self.count.on_frame(now);
        let reveal = self.reveal.on_frame(now);
        if count == FrameDecision::Stop && reveal == FrameDecision::Stop {
            FrameDecision::Stop
        } else {
            FrameDecision::Continue
        }
    }
}

// =============================================================================
// StatCard
// =============================================================================

/// A mounted stat card.
pub struct StatCard {
    mounted: Mounted<StatCardAnimation>,
    format: CountFormat,
    locale: Locale,
}

/// Mount a stat card. Fails on a negative target, a non-positive duration or
/// an element the surface does not know; nothing stays registered on failure.
pub fn mount_stat_card<S: Surface + 'static>(surface: &Rc<S>, props: StatCardProps) -> Result<StatCard> {
    let count = CountUpAnimator::new(props.target, props.duration_ms)?;
    let reveal = RevealTransition::new(props.reveal_duration_ms, props.reveal_offset_px)?
        .with_delay(props.delay_ms);
    let mounted = mount_driven(
        surface,
        props.element,
        props.margin_px,
        StatCardAnimation::new(count, reveal),
    )?;
    Ok(StatCard {
        mounted,
        format: props.format,
        locale: props.locale,
    })
}

impl StatCard {
    pub fn current(&self) -> u64 {
        self.mounted.driven().borrow().count().current()
    }

    pub fn target(&self) -> u64 {
        self.mounted.driven().borrow().count().target()
    }

    pub fn phase(&self) -> CountUpPhase {
        self.mounted.driven().borrow().count().phase()
    }

    /// Displayed text for the current value.
    pub fn text(&self) -> String {
        self.mounted.driven().borrow().count().text(self.format, &self.locale)
    }

    /// Card entrance state (opacity, slide offset).
    pub fn frame(&self) -> RevealFrame {
        self.mounted.driven().borrow().reveal().frame()
    }

    pub fn has_fired(&self) -> bool {
        self.mounted.has_fired()
    }

    pub fn is_animating(&self) -> bool {
        self.mounted.is_animating()
    }

    pub fn held(&self) -> Held {
        self.mounted.held()
    }

    pub fn frames_run(&self) -> usize {
        self.mounted.frames_run()
    }

    pub fn unmount(self) {
        self.mounted.unmount();
    }
}
