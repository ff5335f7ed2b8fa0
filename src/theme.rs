// Theme support for the TUI
//
// A theme is a small set of semantic colors. "terminal" uses the terminal's
// ANSI palette, the named themes use true color (RGB).

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Names accepted by [`Theme::by_name`], in cycling order
pub const THEME_NAMES: &[&str] = &["Folio Dark", "Folio Light", "Terminal"];

/// Resolved color palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Page
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub heading: Color,

    // Accents: active nav item, section rules, skill bars
    pub accent: Color,
    pub accent_fg: Color,
    pub tagline: Color,
    pub link: Color,

    // Chrome
    pub sidebar_bg: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,
    pub backdrop_warm: Color,
    pub backdrop_cool: Color,
    pub border_type: BorderType,
    /// False when the terminal's own background is kept
    pub use_theme_background: bool,

    // Log levels
    pub error: Color,
    pub warn: Color,
}

impl Theme {
    /// Look up a theme by name (case-insensitive); unknown names fall back
    /// to "Folio Dark"
    pub fn by_name(name: &str) -> Self {
        Self::by_name_with_background(name, true)
    }

    /// Same as [`by_name`](Self::by_name), optionally keeping the terminal's
    /// own background
    pub fn by_name_with_background(name: &str, use_theme_background: bool) -> Self {
        let mut theme = match name.to_lowercase().replace('_', " ").as_str() {
            "folio light" | "light" => Self::folio_light(),
            "terminal" | "auto" => Self::terminal(),
            _ => Self::folio_dark(),
        };
        if !use_theme_background {
            theme.background = Color::Reset;
            theme.sidebar_bg = Color::Reset;
            theme.use_theme_background = false;
        }
        theme
    }

    /// Next theme in [`THEME_NAMES`] order
    pub fn next(&self) -> Self {
        let idx = THEME_NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(&self.name))
            .unwrap_or(0);
        Self::by_name_with_background(
            THEME_NAMES[(idx + 1) % THEME_NAMES.len()],
            self.use_theme_background,
        )
    }

    /// Dark page with a pink accent
    pub fn folio_dark() -> Self {
        Self {
            name: "Folio Dark".to_string(),
            background: Color::Rgb(0x0d, 0x0d, 0x10),
            foreground: Color::Rgb(0xd1, 0xd5, 0xdb),
            muted: Color::Rgb(0x9c, 0xa3, 0xaf),
            heading: Color::Rgb(0xff, 0xff, 0xff),
            accent: Color::Rgb(0xdb, 0x27, 0x77),
            accent_fg: Color::Rgb(0xff, 0xff, 0xff),
            tagline: Color::Rgb(0xf4, 0x72, 0xb6),
            link: Color::Rgb(0xfa, 0xcc, 0x15),
            sidebar_bg: Color::Rgb(0x1a, 0x1a, 0x1a),
            border: Color::Rgb(0x3f, 0x3f, 0x46),
            highlight: Color::Rgb(0xec, 0x48, 0x99),
            status_bar: Color::Rgb(0x9c, 0xa3, 0xaf),
            backdrop_warm: Color::Rgb(0x4a, 0x14, 0x30),
            backdrop_cool: Color::Rgb(0x14, 0x24, 0x4a),
            border_type: BorderType::Rounded,
            use_theme_background: true,
            error: Color::Rgb(0xef, 0x44, 0x44),
            warn: Color::Rgb(0xfa, 0xcc, 0x15),
        }
    }

    pub fn folio_light() -> Self {
        Self {
            name: "Folio Light".to_string(),
            background: Color::Rgb(0xfa, 0xfa, 0xf9),
            foreground: Color::Rgb(0x37, 0x41, 0x51),
            muted: Color::Rgb(0x6b, 0x72, 0x80),
            heading: Color::Rgb(0x11, 0x18, 0x27),
            accent: Color::Rgb(0xdb, 0x27, 0x77),
            accent_fg: Color::Rgb(0xff, 0xff, 0xff),
            tagline: Color::Rgb(0xbe, 0x18, 0x5d),
            link: Color::Rgb(0x1d, 0x4e, 0xd8),
            sidebar_bg: Color::Rgb(0xf0, 0xf0, 0xee),
            border: Color::Rgb(0xd4, 0xd4, 0xd8),
            highlight: Color::Rgb(0xdb, 0x27, 0x77),
            status_bar: Color::Rgb(0x6b, 0x72, 0x80),
            backdrop_warm: Color::Rgb(0xfb, 0xcf, 0xe8),
            backdrop_cool: Color::Rgb(0xbf, 0xdb, 0xfe),
            border_type: BorderType::Rounded,
            use_theme_background: true,
            error: Color::Rgb(0xb9, 0x1c, 0x1c),
            warn: Color::Rgb(0xa1, 0x62, 0x07),
        }
    }

    /// Uses the terminal's ANSI palette
    pub fn terminal() -> Self {
        Self {
            name: "Terminal".to_string(),
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            heading: Color::White,
            accent: Color::Magenta,
            accent_fg: Color::Black,
            tagline: Color::LightMagenta,
            link: Color::Yellow,
            sidebar_bg: Color::Reset,
            border: Color::DarkGray,
            highlight: Color::Magenta,
            status_bar: Color::Gray,
            backdrop_warm: Color::DarkGray,
            backdrop_cool: Color::DarkGray,
            border_type: BorderType::Plain,
            use_theme_background: true,
            error: Color::Red,
            warn: Color::Yellow,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::folio_dark()
    }
}
