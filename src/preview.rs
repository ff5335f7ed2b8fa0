// Headless previews behind the render, sections and taglines subcommands
//
// Each preview runs the same layout, tracker and presenter code as the TUI,
// but on a fixed width and a virtual clock, and returns plain text so the
// output is reproducible.

use crate::config::Config;
use crate::content::{Portfolio, TaglineSlot};
use crate::tagline::{Fade, ManualTimer, TaglinePresenter, TaglineTiming};
use crate::theme::Theme;
use crate::tracker::{ActiveSectionTracker, ScrollIntersectionSource, Viewport};
use crate::tui::document::Document;
use anyhow::Result;
use std::fmt::Write;
use std::time::Duration;

/// The laid-out page with each rotation showing its first tagline
pub fn render(portfolio: &Portfolio, theme: &Theme, width: u16) -> String {
    let document = Document::layout(portfolio, theme, width);
    let primary = portfolio.taglines.first().map_or("", String::as_str);
    let secondary = portfolio.alt_taglines().first().map_or("", String::as_str);
    document.to_plain_text(primary, secondary)
}

/// Section regions, then every offset at which the active section changes
/// while the viewport scrolls from the top to the end of the page
pub fn sections(portfolio: &Portfolio, config: &Config, width: u16, height: u16) -> Result<String> {
    let theme = Theme::by_name(&config.theme);
    let document = Document::layout(portfolio, &theme, width);
    let height = height.max(1) as usize;

    let mut out = String::new();
    writeln!(out, "{:<12} {:>6} {:>6}", "SECTION", "TOP", "HEIGHT")?;
    for section in document.sections() {
        writeln!(
            out,
            "{:<12} {:>6} {:>6}",
            section.id.as_str(),
            section.region.top,
            section.region.height
        )?;
    }
    writeln!(out)?;

    let mut tracker = ActiveSectionTracker::new(
        ScrollIntersectionSource::new(),
        document.tracker_sections(),
        config.tracker.visibility()?,
    )?;

    let last_top = document
        .sections()
        .last()
        .map_or(0, |s| s.region.top as usize);
    let extent = document.total_height().max(last_top + height);

    writeln!(out, "{:>6}  ACTIVE", "OFFSET")?;
    writeln!(out, "{:>6}  {}", 0, tracker.active())?;
    for offset in 0..=extent - height {
        tracker
            .source_mut()
            .set_viewport(Viewport::new(offset as u32, height as u32));
        if tracker.sync() {
            writeln!(out, "{:>6}  {}", offset, tracker.active())?;
        }
    }
    tracker.disconnect();

    Ok(out)
}

/// Visible-state changes of both rotations up to `until`, in time order
pub fn taglines(portfolio: &Portfolio, timing: TaglineTiming, until: Duration) -> Result<String> {
    let mut events: Vec<(Duration, TaglineSlot, String)> = Vec::new();

    let rotations = [
        (TaglineSlot::Primary, portfolio.taglines.clone()),
        (TaglineSlot::Secondary, portfolio.alt_taglines().to_vec()),
    ];
    for (slot, sequence) in rotations {
        let mut presenter = TaglinePresenter::new(sequence, timing)?;
        let mut timer = ManualTimer::new();
        presenter.start(&mut timer);
        events.push((Duration::ZERO, slot, describe(&presenter)));

        while let Some(fired) = timer.pop_due(until) {
            if presenter.on_timer(fired, &mut timer) {
                events.push((timer.now(), slot, describe(&presenter)));
            }
        }
        presenter.stop(&mut timer);
    }

    // Stable sort keeps primary before secondary at equal times
    events.sort_by_key(|(at, _, _)| *at);

    let mut out = String::new();
    for (at, slot, state) in events {
        let slot = match slot {
            TaglineSlot::Primary => "primary",
            TaglineSlot::Secondary => "secondary",
        };
        writeln!(out, "{:>7}ms  {:<9}  {}", at.as_millis(), slot, state)?;
    }
    Ok(out)
}

fn describe(presenter: &TaglinePresenter) -> String {
    match presenter.fade() {
        Fade::Visible => format!("[{}] {}", presenter.cursor(), presenter.current()),
        Fade::Hidden => format!("[{}] (hidden)", presenter.cursor()),
    }
}
