use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The regions of the chat view.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub feed_pane: Rect,
    pub input_pane: Rect,
}

impl AppLayout {
    /// Calculate layout regions from a `Rect` (terminal area).
    pub fn compute(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        AppLayout {
            status_bar: vertical[0],
            feed_pane: vertical[1],
            input_pane: vertical[2],
        }
    }

    /// Rows of text visible inside the feed pane's border.
    pub fn feed_inner_height(&self) -> u16 {
        self.feed_pane.height.saturating_sub(2)
    }

    /// Columns of text visible inside the feed pane's border.
    pub fn feed_inner_width(&self) -> u16 {
        self.feed_pane.width.saturating_sub(2)
    }
}

/// The regions of the landing view: a banner above a centred search box.
#[derive(Debug, Clone, Copy)]
pub struct LandingLayout {
    pub banner: Rect,
    pub search_box: Rect,
    pub hint: Rect,
}

impl LandingLayout {
    pub fn compute(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);
        let width = area.width.min(72);
        let x = area.x + (area.width - width) / 2;
        let centre = |r: Rect| Rect::new(x, r.y, width, r.height);

        LandingLayout {
            banner: centre(vertical[1]),
            search_box: centre(vertical[2]),
            hint: centre(vertical[3]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_layout_fills_the_area() {
        let l = AppLayout::compute(Rect::new(0, 0, 80, 24));
        assert_eq!(l.status_bar.height, 1);
        assert_eq!(l.input_pane.height, 3);
        assert_eq!(l.feed_pane.height, 20);
        assert_eq!(l.feed_inner_height(), 18);
        assert_eq!(l.feed_inner_width(), 78);
    }

    #[test]
    fn landing_search_box_is_centred() {
        let l = LandingLayout::compute(Rect::new(0, 0, 100, 30));
        assert_eq!(l.search_box.width, 72);
        assert_eq!(l.search_box.x, 14);
        assert!(l.banner.y < l.search_box.y && l.search_box.y < l.hint.y);
    }

    #[test]
    fn landing_on_narrow_terminal_uses_full_width() {
        let l = LandingLayout::compute(Rect::new(0, 0, 40, 12));
        assert_eq!(l.search_box.x, 0);
        assert_eq!(l.search_box.width, 40);
    }
}
