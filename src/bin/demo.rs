//! Terminal demo: scrolls a simulated landing page and renders the hero stat
//! cards, the feature grid reveals and the pricing toggle with crossterm.

use std::error::Error;
use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use spark_reveal::{
    mount_staggered, mount_stat_card, AnimationConfig, BillingToggle, HeadlessSurface, Rect,
    StatCardProps, PLANS,
};

const PAGE_SCROLL_MS: f64 = 3000.0;
const MAX_SCROLL: f32 = 1400.0;
const RUN_MS: f64 = 6000.0;

/// Alternate screen with a hidden cursor, restored on drop so an early
/// return out of the render loop still hands the terminal back.
struct AlternateScreen<W: Write> {
    out: W,
}

impl<W: Write> AlternateScreen<W> {
    fn enter(mut out: W) -> io::Result<Self> {
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self { out })
    }
}

impl<W: Write> Drop for AlternateScreen<W> {
    fn drop(&mut self) {
        // Best effort
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let surface = Rc::new(HeadlessSurface::new(1280.0, 720.0));
    let config = AnimationConfig::default();

    // Hero stats sit just below the fold, the feature grid further down.
    let stats = [("Active visitors", 1247, false), ("Companies", 15, false), ("Uptime", 99, true)];
    let mut cards = Vec::new();
    for (i, &(label, target, percent)) in stats.iter().enumerate() {
        let el = surface.insert_element(Rect::new(100.0 + i as f32 * 360.0, 760.0, 340.0, 90.0));
        let mut props = StatCardProps::from_config(el, target, &config)?.with_delay(i as f64 * 100.0);
        if percent {
            props = props.percentage();
        }
        cards.push((label, mount_stat_card(&surface, props)?));
    }

    let features: Vec<_> = (0..6)
        .map(|i| {
            let (col, row) = (i % 3, i / 3);
            surface.insert_element(Rect::new(
                100.0 + col as f32 * 360.0,
                1500.0 + row as f32 * 260.0,
                340.0,
                240.0,
            ))
        })
        .collect();
    let reveals = mount_staggered(&surface, &features, &config)?;

    let toggle = BillingToggle::default();
    let mut toggled = false;

    let mut screen = AlternateScreen::enter(io::stdout())?;
    let stdout = &mut screen.out;

    let start = Instant::now();
    loop {
        let now = start.elapsed().as_secs_f64() * 1000.0;
        let scroll = ((now / PAGE_SCROLL_MS) as f32 * MAX_SCROLL).min(MAX_SCROLL);
        surface.scroll_to(0.0, scroll);
        surface.advance(now);

        if !toggled && now > PAGE_SCROLL_MS {
            toggle.toggle();
            toggled = true;
        }

        queue!(stdout, Clear(ClearType::All), MoveTo(0, 0), Print(format!("scroll {scroll:>6.0}px")))?;
        for (row, (label, card)) in cards.iter().enumerate() {
            queue!(stdout, MoveTo(2, 2 + row as u16), Print(format!("{label:<16} {:>8}  opacity {:.2}", card.text(), card.frame().opacity)))?;
        }
        for (row, reveal) in reveals.iter().enumerate() {
            let frame = reveal.frame();
            let bar = "#".repeat((frame.opacity * 20.0).round() as usize);
            queue!(
                stdout,
                MoveTo(2, 6 + row as u16),
                Print(format!("feature {row} [{bar:<20}] y+{:>4.1}", frame.offset_y))
            )?;
        }
        for (row, plan) in PLANS.iter().enumerate() {
            let period = if toggle.is_yearly() { "year" } else { "month" };
            queue!(
                stdout,
                MoveTo(2, 13 + row as u16),
                Print(format!("{:<13} ${}/{period}", plan.name, toggle.price(plan)))
            )?;
        }
        stdout.flush()?;

        if now > RUN_MS {
            break;
        }
        thread::sleep(Duration::from_millis(16));
    }

    for (_, card) in cards {
        card.unmount();
    }
    for reveal in reveals {
        reveal.unmount();
    }
    Ok(())
}
