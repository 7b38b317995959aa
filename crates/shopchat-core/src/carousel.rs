// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::Serialize;
use shopchat_model::Product;

/// Navigation direction of the carousel's previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// A horizontally scrollable strip of product cards.
///
/// The strip's geometry belongs to whoever draws it, so scrolling takes the
/// largest valid offset (`content - viewport`) as an argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCarousel {
    pub products: Vec<Product>,
    #[serde(skip)]
    offset: u32,
}

impl ProductCarousel {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products, offset: 0 }
    }

    /// Current scroll offset from the left edge of the strip.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Shift the offset by `step` in `dir`, clamped to `[0, max_offset]`.
    /// Returns `false` when the strip was already at that boundary.
    pub fn scroll(&mut self, dir: Direction, step: u32, max_offset: u32) -> bool {
        let target = match dir {
            Direction::Prev => self.offset.saturating_sub(step),
            Direction::Next => self.offset.saturating_add(step),
        }
        .min(max_offset);
        let moved = target != self.offset;
        self.offset = target;
        moved
    }

    /// Pull the offset back inside the strip after the viewport grew.
    pub fn clamp_to(&mut self, max_offset: u32) {
        self.offset = self.offset.min(max_offset);
    }
}

/// Largest scroll offset of a strip `content` units wide shown through a
/// `viewport` units wide window.
pub fn max_offset(content: u32, viewport: u32) -> u32 {
    content.saturating_sub(viewport)
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> ProductCarousel {
        ProductCarousel::new(vec![Product::default(); 6])
    }

    #[test]
    fn next_shifts_by_one_step() {
        let mut c = strip();
        assert!(c.scroll(Direction::Next, 250, 1000));
        assert_eq!(c.offset(), 250);
        assert!(c.scroll(Direction::Next, 250, 1000));
        assert_eq!(c.offset(), 500);
    }

    #[test]
    fn prev_at_left_edge_is_noop() {
        let mut c = strip();
        assert!(!c.scroll(Direction::Prev, 250, 1000));
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn next_stops_at_right_edge() {
        let mut c = strip();
        // 1500 wide strip in a 1100 wide window: 400 is the end.
        let max = max_offset(1500, 1100);
        assert!(c.scroll(Direction::Next, 250, max));
        assert!(c.scroll(Direction::Next, 250, max));
        assert_eq!(c.offset(), 400);
        assert!(!c.scroll(Direction::Next, 250, max));
        assert_eq!(c.offset(), 400);
    }

    #[test]
    fn prev_after_partial_step_reaches_zero() {
        let mut c = strip();
        c.scroll(Direction::Next, 250, 100);
        assert_eq!(c.offset(), 100);
        assert!(c.scroll(Direction::Prev, 250, 100));
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn strip_narrower_than_window_never_moves() {
        let mut c = strip();
        let max = max_offset(300, 800);
        assert_eq!(max, 0);
        assert!(!c.scroll(Direction::Next, 250, max));
        assert!(!c.scroll(Direction::Prev, 250, max));
    }

    #[test]
    fn clamp_to_pulls_offset_back() {
        let mut c = strip();
        c.scroll(Direction::Next, 250, 1000);
        c.scroll(Direction::Next, 250, 1000);
        c.clamp_to(300);
        assert_eq!(c.offset(), 300);
    }
}
