//! Parallax backdrop behind the page text
//!
//! Two sparse glyph layers. Both are offset by `scroll * factor` rows: the
//! warm layer drifts up with the content, the cool layer drifts down against
//! it. The offset is recomputed from the scroll position on every frame and
//! never feeds back into layout or section tracking.

use crate::theme::Theme;
use ratatui::{layout::Rect, style::Color, Frame};

/// One glyph per this many cells, on average
const DENSITY: i64 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Warm,
    Cool,
}

impl Layer {
    const ALL: [Layer; 2] = [Layer::Warm, Layer::Cool];

    fn seed(self) -> i64 {
        match self {
            Layer::Warm => 0x5f3,
            Layer::Cool => 0x2c1b,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Layer::Warm => "·",
            Layer::Cool => "∙",
        }
    }

    fn color(self, theme: &Theme) -> Color {
        match self {
            Layer::Warm => theme.backdrop_warm,
            Layer::Cool => theme.backdrop_cool,
        }
    }

    /// Backdrop row shown at screen row `y` when the layer is shifted by `shift`
    pub fn world_row(self, y: i64, shift: i64) -> i64 {
        match self {
            Layer::Warm => y + shift,
            Layer::Cool => y - shift,
        }
    }
}

/// Rows the backdrop has moved for a given scroll offset
pub fn layer_shift(offset: usize, factor: f64) -> i64 {
    (offset as f64 * factor).floor() as i64
}

/// Whether `layer` has a glyph at column `x` of backdrop row `row`
pub fn has_glyph(layer: Layer, x: i64, row: i64) -> bool {
    let h = x
        .wrapping_mul(73_856_093)
        .wrapping_add(row.wrapping_mul(19_349_663))
        ^ layer.seed();
    h.rem_euclid(DENSITY) == 0
}

pub fn render(f: &mut Frame, area: Rect, offset: usize, factor: f64, theme: &Theme) {
    let shift = layer_shift(offset, factor);
    let buf = f.buffer_mut();

    for y in 0..area.height {
        for x in 0..area.width {
            for layer in Layer::ALL {
                let row = layer.world_row(y as i64, shift);
                if has_glyph(layer, x as i64, row) {
                    buf[(area.x + x, area.y + y)]
                        .set_symbol(layer.symbol())
                        .set_fg(layer.color(theme));
                }
            }
        }
    }
}
