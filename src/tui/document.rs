//! Page layout
//!
//! Turns a [`Portfolio`] into styled rows for a given width. Each section
//! owns the rows from its title up to the next section's title, so the
//! section regions are contiguous and together cover the whole document.
//! Tagline blocks reserve one empty row; the page draws the presenter's
//! current text there on every frame.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::content::{Block, Portfolio, SectionContent, TaglineSlot};
use crate::theme::Theme;
use crate::tracker::{Region, Section, SectionId};

/// Blank rows after the last block of a section
const SECTION_GAP: usize = 2;
/// Narrower pages are laid out at this width and clipped
const MIN_WIDTH: u16 = 20;
const SKILL_BAR_MAX: usize = 30;

#[derive(Debug, Clone)]
pub struct SectionLayout {
    pub id: SectionId,
    pub icon: Option<String>,
    pub region: Region,
}

/// Row reserved for a rotating tagline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaglineRow {
    pub row: u32,
    pub slot: TaglineSlot,
}

#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line<'static>>,
    sections: Vec<SectionLayout>,
    taglines: Vec<TaglineRow>,
    width: u16,
}

impl Document {
    pub fn layout(portfolio: &Portfolio, theme: &Theme, width: u16) -> Self {
        let width = width.max(MIN_WIDTH);
        let mut writer = Writer::new(theme, width as usize);
        let mut tops = Vec::with_capacity(portfolio.sections.len());
        let mut taglines = Vec::new();

        for section in &portfolio.sections {
            tops.push(writer.row());
            writer.title(section);

            for block in &section.blocks {
                if let Block::Tagline { slot } = block {
                    taglines.push(TaglineRow {
                        row: writer.row() as u32,
                        slot: *slot,
                    });
                }
                writer.block(block);
                writer.blank();
            }

            for _ in 0..SECTION_GAP {
                writer.blank();
            }
        }

        let total = writer.row();
        let sections = portfolio
            .sections
            .iter()
            .zip(&tops)
            .enumerate()
            .map(|(i, (section, &top))| {
                let end = tops.get(i + 1).copied().unwrap_or(total);
                SectionLayout {
                    id: section.id(),
                    icon: section.icon.clone(),
                    region: Region::new(top as u32, (end - top) as u32),
                }
            })
            .collect();

        Self {
            lines: writer.lines,
            sections,
            taglines,
            width,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn total_height(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&Line<'static>> {
        self.lines.get(row)
    }

    pub fn sections(&self) -> &[SectionLayout] {
        &self.sections
    }

    pub fn tagline_rows(&self) -> &[TaglineRow] {
        &self.taglines
    }

    /// Sections in the shape the tracker registers them
    pub fn tracker_sections(&self) -> Vec<Section> {
        self.sections
            .iter()
            .map(|s| Section::new(s.id.clone(), s.region))
            .collect()
    }

    /// Unstyled page with each tagline row filled in
    pub fn to_plain_text(&self, primary: &str, secondary: &str) -> String {
        let mut out = String::new();
        for (row, line) in self.lines.iter().enumerate() {
            let tagline = self.taglines.iter().find(|t| t.row as usize == row);
            match tagline {
                Some(TaglineRow {
                    slot: TaglineSlot::Primary,
                    ..
                }) => out.push_str(primary),
                Some(TaglineRow {
                    slot: TaglineSlot::Secondary,
                    ..
                }) => out.push_str(secondary),
                None => {
                    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                    out.push_str(text.trim_end());
                }
            }
            out.push('\n');
        }
        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Row writer
// ─────────────────────────────────────────────────────────────────────────────

struct Writer<'t> {
    theme: &'t Theme,
    width: usize,
    lines: Vec<Line<'static>>,
}

impl<'t> Writer<'t> {
    fn new(theme: &'t Theme, width: usize) -> Self {
        Self {
            theme,
            width,
            lines: Vec::new(),
        }
    }

    fn row(&self) -> usize {
        self.lines.len()
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn style(&self, color: ratatui::style::Color) -> Style {
        Style::default().fg(color)
    }

    fn bold(&self, color: ratatui::style::Color) -> Style {
        self.style(color).add_modifier(Modifier::BOLD)
    }

    /// Wrap `text` after `prefix`; continuation rows are indented to line up
    fn prefixed(&mut self, prefix: Vec<Span<'static>>, text: &str, style: Style) {
        let indent: usize = prefix.iter().map(Span::width).sum();
        let avail = self.width.saturating_sub(indent).max(1);

        for (i, chunk) in wrap(text, avail).into_iter().enumerate() {
            let mut spans = if i == 0 {
                prefix.clone()
            } else {
                vec![Span::raw(" ".repeat(indent))]
            };
            spans.push(Span::styled(chunk, style));
            self.lines.push(Line::from(spans));
        }
    }

    fn wrapped(&mut self, text: &str, style: Style) {
        self.prefixed(Vec::new(), text, style);
    }

    fn title(&mut self, section: &SectionContent) {
        let prefix = match &section.icon {
            Some(icon) => vec![Span::styled(
                format!("{} ", icon),
                self.style(self.theme.accent),
            )],
            None => Vec::new(),
        };
        let heading = self.bold(self.theme.heading);
        self.prefixed(prefix, &section.title, heading);

        let rule = (section.title.width() + 2).min(self.width);
        self.lines.push(Line::from(Span::styled(
            "━".repeat(rule),
            self.style(self.theme.accent),
        )));
        self.blank();
    }

    fn block(&mut self, block: &Block) {
        let theme = self.theme;
        match block {
            Block::Heading { text } => self.wrapped(text, self.bold(theme.heading)),
            Block::Paragraph { text } => self.wrapped(text, self.style(theme.foreground)),
            Block::Tagline { .. } => self.blank(),
            Block::Facts { items } => {
                let col = self.label_column(items.iter().map(|f| f.label.as_str()));
                for fact in items {
                    let label = Span::styled(pad_to(&fact.label, col), self.bold(theme.muted));
                    self.prefixed(vec![label], &fact.value, self.style(theme.foreground));
                }
            }
            Block::Timeline { items } => {
                for entry in items {
                    let bullet = Span::styled("● ", self.style(theme.accent));
                    self.prefixed(vec![bullet], &entry.title, self.bold(theme.heading));
                    let indent = Span::raw("  ");
                    self.prefixed(vec![indent], &entry.detail, self.style(theme.muted));
                }
            }
            Block::Skills { items } => {
                let col = self.label_column(items.iter().map(|s| s.name.as_str()));
                let bar = self.width.saturating_sub(col + 5).min(SKILL_BAR_MAX);
                for skill in items {
                    let percent = skill.percent.min(100) as usize;
                    let filled = (bar * percent + 50) / 100;
                    self.lines.push(Line::from(vec![
                        Span::styled(pad_to(&skill.name, col), self.style(theme.foreground)),
                        Span::styled("█".repeat(filled), self.style(theme.accent)),
                        Span::styled("░".repeat(bar - filled), self.style(theme.border)),
                        Span::styled(format!(" {:>3}%", percent), self.style(theme.muted)),
                    ]));
                }
            }
            Block::Cards { items } => {
                for (i, card) in items.iter().enumerate() {
                    if i > 0 {
                        self.blank();
                    }
                    let marker = Span::styled("▸ ", self.style(theme.accent));
                    self.prefixed(vec![marker], &card.title, self.bold(theme.heading));
                    let indent = Span::raw("  ");
                    self.prefixed(vec![indent], &card.body, self.style(theme.foreground));
                }
            }
            Block::Links { items } => {
                let labels: Vec<String> = items.iter().map(|l| format!("↗ {}", l.label)).collect();
                let col = self.label_column(labels.iter().map(String::as_str));
                for (label, link) in labels.iter().zip(items) {
                    let label = Span::styled(pad_to(label, col), self.bold(theme.link));
                    self.prefixed(vec![label], &link.url, self.style(theme.muted));
                }
            }
            Block::Contact { email, phone } => {
                let rows = [("✉ Email", email), ("☎ Phone", phone)];
                let col = self.label_column(rows.iter().map(|(label, _)| *label));
                for (label, value) in rows {
                    let label = Span::styled(pad_to(label, col), self.bold(theme.muted));
                    self.prefixed(vec![label], value, self.bold(theme.link));
                }
            }
            Block::Actions { items } => {
                let button = self.bold(theme.accent_fg).bg(theme.accent);
                let buttons: Vec<String> = items
                    .iter()
                    .map(|a| format!(" [{}] {} ", a.key, a.label))
                    .collect();
                let total: usize =
                    buttons.iter().map(|b| b.width()).sum::<usize>() + 2 * buttons.len();

                if total <= self.width {
                    let mut spans = Vec::new();
                    for (i, b) in buttons.into_iter().enumerate() {
                        if i > 0 {
                            spans.push(Span::raw("  "));
                        }
                        spans.push(Span::styled(b, button));
                    }
                    self.lines.push(Line::from(spans));
                } else {
                    for b in buttons {
                        let b = truncate_to(&b, self.width);
                        self.lines.push(Line::from(Span::styled(b, button)));
                    }
                }
            }
        }
    }

    /// Width of a label column: widest label plus a gap, at most half the page
    fn label_column<'a>(&self, labels: impl Iterator<Item = &'a str>) -> usize {
        let widest = labels.map(UnicodeWidthStr::width).max().unwrap_or(0);
        (widest + 2).min(self.width / 2)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Greedy word wrap by display width; words wider than `width` are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cut `text` to at most `width` columns
fn truncate_to(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

/// Pad (or cut) `text` to exactly `col` columns, keeping one trailing space
fn pad_to(text: &str, col: usize) -> String {
    let mut out = truncate_to(text, col.saturating_sub(1));
    let used = out.width();
    out.push_str(&" ".repeat(col - used));
    out
}
