// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Turns feed entries into styled terminal lines.
//!
//! Everything is pre-wrapped to the feed pane's inner width so the pane can
//! scroll by line index.  Carousels are laid out as one long strip of cards
//! and clipped to the pane at the carousel's scroll offset.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use shopchat_core::render::DirectionsLink;
use shopchat_core::{max_offset, FeedEntry, Message, MessageFeed, ProductCarousel, Sender};
use shopchat_model::{Product, Store};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::widgets::border_chars;

/// Carousel scroll units per terminal column.  With the default step of 250
/// one navigation step moves the strip by exactly one card.
pub const UNITS_PER_COLUMN: u32 = 10;
const CARD_WIDTH: usize = 24;
const CARD_STRIDE: usize = CARD_WIDTH + 1;
const CARD_INNER: usize = CARD_WIDTH - 4;
const BOX_MAX_WIDTH: usize = 64;
/// Frame, two name rows, price, features, link, frame.
const CARD_ROWS: usize = 7;

/// Largest scroll offset (in carousel units) of a strip of `products` cards
/// seen through a pane `viewport_cols` columns wide.
pub fn carousel_max_offset(products: usize, viewport_cols: u16) -> u32 {
    let content = (products * CARD_STRIDE) as u32 * UNITS_PER_COLUMN;
    max_offset(content, viewport_cols as u32 * UNITS_PER_COLUMN)
}

/// Render the whole feed.  Entries are separated by one blank line.
pub fn feed_lines(
    feed: &MessageFeed,
    width: u16,
    links: &DirectionsLink,
    ascii: bool,
) -> Vec<Line<'static>> {
    let width = (width as usize).max(CARD_WIDTH);
    let mut out = Vec::new();
    for entry in feed.entries() {
        match entry {
            FeedEntry::Text(m) => text_bubble(&mut out, m, width),
            FeedEntry::Carousel(c) => carousel(&mut out, c, width, ascii),
            FeedEntry::Store(s) => store_card(&mut out, s, links, width, ascii),
            FeedEntry::Details(p) => details_card(&mut out, p, width, ascii),
        }
        out.push(Line::default());
    }
    out
}

// ── Entries ───────────────────────────────────────────────────────────────────

fn text_bubble(out: &mut Vec<Line<'static>>, m: &Message, width: usize) {
    let (who, colour) = match m.sender {
        Sender::User => ("You", Color::LightCyan),
        Sender::Bot => ("Assistant", Color::LightGreen),
    };
    out.push(Line::from(vec![
        Span::styled(who, Style::default().fg(colour).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", m.timestamp), Style::default().fg(Color::DarkGray)),
    ]));
    for line in wrap_words(&m.content, width.saturating_sub(2)) {
        out.push(Line::from(format!("  {line}")));
    }
}

fn carousel(out: &mut Vec<Line<'static>>, c: &ProductCarousel, width: usize, ascii: bool) {
    let b = border_chars(ascii);
    let border = Style::default().fg(Color::DarkGray);
    let cards: Vec<Vec<Segment>> = c
        .products
        .iter()
        .map(|p| {
            let mut name = wrap_words(&p.product_name, CARD_INNER);
            if name.len() > 2 {
                name.truncate(2);
                name[1] = fit(&format!("{}…", name[1]), CARD_INNER);
            }
            name.resize(2, String::new());
            let bold = Style::default().add_modifier(Modifier::BOLD);
            vec![
                (format!("{}{}{}", b.top_left, b.horizontal.repeat(CARD_WIDTH - 2), b.top_right), border),
                (card_row(b.vertical, &name[0]), bold),
                (card_row(b.vertical, &name[1]), bold),
                (card_row(b.vertical, &p.product_mrp), Style::default().fg(Color::Green)),
                (card_row(b.vertical, &p.features.join(" · ")), Style::default().fg(Color::Gray)),
                (card_row(b.vertical, &link_label(&p.product_url)), Style::default().fg(Color::Blue)),
                (format!("{}{}{}", b.bottom_left, b.horizontal.repeat(CARD_WIDTH - 2), b.bottom_right), border),
            ]
        })
        .collect();

    let start = (c.offset() / UNITS_PER_COLUMN) as usize;
    for row in 0..CARD_ROWS {
        let strip: Vec<Segment> = cards
            .iter()
            .flat_map(|card| [card[row].clone(), (" ".to_string(), Style::default())])
            .collect();
        out.push(clip_segments(&strip, start, width));
    }

    let total = c.products.len();
    let first = (start / CARD_STRIDE + 1).min(total);
    let last = ((start + width + 1) / CARD_STRIDE).clamp(first, total);
    let max = carousel_max_offset(total, width as u16);
    let arrow = |on: bool, s: &'static str| {
        Span::styled(s, Style::default().fg(if on { Color::LightBlue } else { Color::DarkGray }))
    };
    out.push(Line::from(vec![
        arrow(c.offset() > 0, "‹ "),
        Span::raw(format!("{first}-{last} of {total}")),
        arrow(c.offset() < max, " ›"),
        Span::styled("  Alt+←/→ or [ ]", Style::default().fg(Color::DarkGray)),
    ]));
}

fn details_card(out: &mut Vec<Line<'static>>, p: &Product, width: usize, ascii: bool) {
    let inner = width.min(BOX_MAX_WIDTH) - 4;
    let info = inner.saturating_sub(9);
    let mut rows: Vec<Segment> = Vec::new();

    // Image column on the left, name / price / link on the right.
    let mut right: Vec<Segment> = wrap_words(&p.product_name, info)
        .into_iter()
        .map(|l| (l, Style::default().add_modifier(Modifier::BOLD)))
        .collect();
    right.push((p.product_mrp.clone(), Style::default().fg(Color::Green)));
    right.push((link_label(&p.product_url), Style::default().fg(Color::Blue)));
    let image = ["┌─────┐", "│ img │", "└─────┘"];
    let image_ascii = ["+-----+", "| img |", "+-----+"];
    for (i, (text, style)) in right.into_iter().enumerate() {
        let col = if i < 3 {
            if ascii { image_ascii[i] } else { image[i] }
        } else {
            "       "
        };
        rows.push((format!("{col}  {}", fit(&text, info)), style));
    }

    if !p.features.is_empty() {
        rows.push((String::new(), Style::default()));
        for f in &p.features {
            for (j, line) in wrap_words(f, inner - 2).into_iter().enumerate() {
                let prefix = if j == 0 { "✔ " } else { "  " };
                rows.push((format!("{prefix}{line}"), Style::default()));
            }
        }
    }
    boxed(out, "Product details", rows, inner, ascii);
}

fn store_card(
    out: &mut Vec<Line<'static>>,
    s: &Store,
    links: &DirectionsLink,
    width: usize,
    ascii: bool,
) {
    let inner = width.min(BOX_MAX_WIDTH) - 4;
    let mut rows: Vec<Segment> = wrap_words(&s.store_name, inner)
        .into_iter()
        .map(|l| (l, Style::default().add_modifier(Modifier::BOLD)))
        .collect();
    rows.extend(wrap_words(&s.full_address(), inner).into_iter().map(|l| (l, Style::default())));
    if !s.timings.is_empty() {
        rows.extend(
            wrap_words(&format!("Timings: {}", s.timings), inner)
                .into_iter()
                .map(|l| (l, Style::default().fg(Color::Yellow))),
        );
    }
    rows.push(("Get Directions:".into(), Style::default().fg(Color::LightBlue)));
    rows.extend(
        wrap_chars(&links.url(&s.address), inner)
            .into_iter()
            .map(|l| (l, Style::default().fg(Color::Blue))),
    );
    boxed(out, "Store", rows, inner, ascii);
}

// ── Layout helpers ────────────────────────────────────────────────────────────

type Segment = (String, Style);

fn card_row(vertical: &str, text: &str) -> String {
    format!("{vertical} {} {vertical}", fit(text, CARD_INNER))
}

/// A titled frame around `rows`, each padded to `inner` columns.
fn boxed(out: &mut Vec<Line<'static>>, title: &str, rows: Vec<Segment>, inner: usize, ascii: bool) {
    let b = border_chars(ascii);
    let border = Style::default().fg(Color::DarkGray);
    let title = format!(" {title} ");
    let fill = (inner + 2).saturating_sub(title.width() + 1);
    out.push(Line::from(vec![
        Span::styled(format!("{}{}", b.top_left, b.horizontal), border),
        Span::styled(title, Style::default().fg(Color::Gray)),
        Span::styled(format!("{}{}", b.horizontal.repeat(fill), b.top_right), border),
    ]));
    for (text, style) in rows {
        out.push(Line::from(vec![
            Span::styled(format!("{} ", b.vertical), border),
            Span::styled(fit(&text, inner), style),
            Span::styled(format!(" {}", b.vertical), border),
        ]));
    }
    out.push(Line::from(Span::styled(
        format!("{}{}{}", b.bottom_left, b.horizontal.repeat(inner + 2), b.bottom_right),
        border,
    )));
}

/// Short label for a product link: host and path without the scheme.
fn link_label(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let bare = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    format!("↗ {bare}")
}

/// Pad or truncate `text` to exactly `width` display columns.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    let total = text.width();
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if total > width && used + w + 1 > width {
            out.push('…');
            used += 1;
            break;
        }
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Greedy word wrap at `width` display columns.  Words longer than a line
/// are split.  Explicit newlines are kept.
pub(crate) fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for para in text.split('\n') {
        let mut line = String::new();
        for word in para.split_whitespace() {
            let sep = usize::from(!line.is_empty());
            if line.width() + sep + word.width() <= width {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if word.width() <= width {
                line.push_str(word);
            } else {
                let mut pieces = wrap_chars(word, width);
                line = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(line);
    }
    lines
}

/// Hard wrap at `width` display columns regardless of word boundaries.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = vec![String::new()];
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            lines.push(String::new());
            used = 0;
        }
        if let Some(last) = lines.last_mut() {
            last.push(c);
        }
        used += w;
    }
    lines
}

/// Keep the display columns `[start, start + width)` of a styled strip.
fn clip_segments(segments: &[Segment], start: usize, width: usize) -> Line<'static> {
    let end = start + width;
    let mut col = 0;
    let mut spans = Vec::new();
    for (text, style) in segments {
        let mut kept = String::new();
        for c in text.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if col >= start && col + w <= end {
                kept.push(c);
            }
            col += w;
        }
        if !kept.is_empty() {
            spans.push(Span::styled(kept, *style));
        }
        if col >= end {
            break;
        }
    }
    Line::from(spans)
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
