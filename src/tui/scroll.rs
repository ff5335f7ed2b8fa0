// Scroll state shared by the page and the log panel
//
// Each component owns one ScrollState. The page uses it in manual mode with
// an optional animation target for smooth jumps; the log panel uses
// auto-follow so new entries stay in view.

/// Fraction of the remaining distance covered per animation step
const SMOOTH_DIVISOR: usize = 4;

/// Scroll state for a single panel
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Current scroll offset (row at top of viewport)
    offset: usize,

    /// Total number of rows in content
    total: usize,

    /// Number of rows visible in viewport
    viewport: usize,

    /// Row an animated jump is heading for
    target: Option<usize>,

    /// Whether reaching the bottom re-enables auto-follow
    follows: bool,

    /// Keep the view pinned to the bottom as content grows
    /// User scrolling up disables this; scrolling to bottom re-enables
    pub auto_follow: bool,
}

impl ScrollState {
    /// Scroll state that follows new content
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            target: None,
            follows: true,
            auto_follow: true,
        }
    }

    /// Scroll state that stays where the user put it
    pub fn manual() -> Self {
        Self {
            follows: false,
            auto_follow: false,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
        if let Some(target) = self.target {
            self.target = Some(target.min(self.max_offset()));
        }
    }

    /// Scroll up by one row
    pub fn scroll_up(&mut self) {
        self.scroll_up_by(1);
    }

    /// Scroll down by one row
    pub fn scroll_down(&mut self) {
        self.scroll_down_by(1);
    }

    pub fn scroll_up_by(&mut self, rows: usize) {
        self.target = None;
        if self.offset > 0 {
            self.offset = self.offset.saturating_sub(rows);
            self.auto_follow = false;
        }
    }

    pub fn scroll_down_by(&mut self, rows: usize) {
        self.target = None;
        self.offset = (self.offset + rows).min(self.max_offset());
        if self.follows && self.total > 0 && self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    /// Scroll up by a page
    pub fn page_up(&mut self) {
        self.scroll_up_by(self.viewport.max(1));
    }

    /// Scroll down by a page
    pub fn page_down(&mut self) {
        self.scroll_down_by(self.viewport.max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.target = None;
        self.offset = 0;
        self.auto_follow = false;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.target = None;
        self.offset = self.max_offset();
        self.auto_follow = self.follows;
    }

    /// Jump straight to `row` (clamped)
    pub fn jump_to(&mut self, row: usize) {
        self.target = None;
        self.offset = row.min(self.max_offset());
        self.auto_follow = false;
    }

    /// Start an animated scroll towards `row` (clamped); see [`step`](Self::step)
    pub fn animate_to(&mut self, row: usize) {
        let row = row.min(self.max_offset());
        self.auto_follow = false;
        self.target = (row != self.offset).then_some(row);
    }

    /// Advance an animated scroll by one frame. Returns true if the offset moved.
    ///
    /// Covers a quarter of the remaining distance per step (at least one row),
    /// so long jumps start fast and ease into the target.
    pub fn step(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let distance = target.abs_diff(self.offset);
        let delta = (distance / SMOOTH_DIVISOR).max(1);
        if target > self.offset {
            self.offset += delta;
        } else {
            self.offset -= delta;
        }

        if self.offset == target {
            self.target = None;
        }
        true
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Where the view is heading: the animation target, else the offset
    pub fn destination(&self) -> usize {
        self.target.unwrap_or(self.offset)
    }

    /// Visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Scroll position as a percentage of the scrollable range
    pub fn percent(&self) -> u8 {
        match self.max_offset() {
            0 => 100,
            max => ((self.offset * 100) / max) as u8,
        }
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn test_scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);
    }

    #[test]
    fn test_manual_scroll_mode_is_clamped() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.offset(), 5);
        assert_eq!(scroll.percent(), 100);

        scroll.update_dimensions(8, 5);
        assert_eq!(scroll.offset(), 3);
    }

    #[test]
    fn test_visible_range() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(100, 10);
        assert_eq!(scroll.visible_range(), (0, 10));

        scroll.scroll_to_bottom();
        assert_eq!(scroll.visible_range(), (90, 100));
    }

    #[test]
    fn test_animate_eases_into_target() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(200, 20);
        scroll.animate_to(100);
        assert_eq!(scroll.destination(), 100);

        let mut offsets = Vec::new();
        while scroll.step() {
            offsets.push(scroll.offset());
        }
        assert_eq!(scroll.offset(), 100);
        assert!(!scroll.is_animating());
        // First step covers a quarter of the distance, later steps get shorter
        assert_eq!(offsets[0], 25);
        assert!(offsets.windows(2).all(|w| w[1] > w[0]));
        assert!(!scroll.step());
        assert_eq!(scroll.destination(), 100);
    }

    #[test]
    fn test_animate_upwards_and_clamps() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(50, 10);
        scroll.jump_to(40);

        scroll.animate_to(1000);
        assert!(!scroll.is_animating(), "already at the clamped target");

        scroll.animate_to(0);
        while scroll.step() {}
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_manual_input_cancels_animation() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(200, 20);
        scroll.animate_to(100);
        scroll.step();

        scroll.scroll_down();
        assert!(!scroll.is_animating());
        assert_eq!(scroll.offset(), 26);
    }
}
