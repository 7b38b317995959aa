// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Single-line text input with a byte-index cursor.

use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    pub(crate) buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    pub(crate) cursor: usize,
}

impl InputLine {
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = prev_char_boundary(&self.buffer, self.cursor);
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        self.cursor = prev_char_boundary(&self.buffer, self.cursor);
    }

    pub fn right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn word_left(&mut self) {
        self.cursor = prev_word_boundary(&self.buffer, self.cursor);
    }

    pub fn word_right(&mut self) {
        self.cursor = next_word_boundary(&self.buffer, self.cursor);
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn delete_to_end(&mut self) {
        self.buffer.truncate(self.cursor);
    }

    pub fn delete_to_start(&mut self) {
        self.buffer.drain(..self.cursor);
        self.cursor = 0;
    }

    /// The slice of the buffer visible in a box `width` columns wide, and the
    /// cursor column within it.  The view scrolls so the cursor stays inside.
    pub fn visible(&self, width: usize) -> (String, u16) {
        if width == 0 {
            return (String::new(), 0);
        }
        let before: Vec<(char, usize)> = self.buffer[..self.cursor]
            .chars()
            .map(|c| (c, UnicodeWidthChar::width(c).unwrap_or(1)))
            .collect();
        // Drop leading chars until the cursor fits, keeping one spare column
        // for the cursor itself.
        let mut col: usize = before.iter().map(|(_, w)| w).sum();
        let mut skip = 0;
        while col >= width && skip < before.len() {
            col -= before[skip].1;
            skip += 1;
        }

        let mut shown = String::new();
        let mut used = 0;
        for c in self.buffer.chars().skip(skip) {
            let w = UnicodeWidthChar::width(c).unwrap_or(1);
            if used + w > width {
                break;
            }
            shown.push(c);
            used += w;
        }
        (shown, col as u16)
    }
}

// ── Character and word boundary helpers ──────────────────────────────────────

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    if pos == 0 {
        return 0;
    }
    let mut p = pos - 1;
    while p > 0 && !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}

fn prev_word_boundary(s: &str, pos: usize) -> usize {
    let bytes   = &s.as_bytes()[..pos];
    let trimmed = bytes.iter().rposition(|&b| b != b' ').map(|i| i + 1).unwrap_or(0);
    bytes[..trimmed].iter().rposition(|&b| b == b' ').map(|i| i + 1).unwrap_or(0)
}

fn next_word_boundary(s: &str, pos: usize) -> usize {
    let bytes = &s.as_bytes()[pos..];
    let start = bytes.iter().position(|&b| b != b' ').unwrap_or(0);
    let end   = bytes[start..].iter().position(|&b| b == b' ').unwrap_or(bytes.len() - start);
    pos + start + end
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
