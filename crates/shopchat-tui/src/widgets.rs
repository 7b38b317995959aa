// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::input::InputLine;
use crate::layout::LandingLayout;

// ── Character sets ────────────────────────────────────────────────────────────

fn sep(ascii: bool) -> &'static str {
    if ascii { "|" } else { "│" }
}
fn border_type(ascii: bool) -> BorderType {
    if ascii { BorderType::Plain } else { BorderType::Rounded }
}

/// Braille spinner frames for the typing indicator.
const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
const SPINNER_ASCII: [&str; 4] = ["-", "\\", "|", "/"];

fn spinner(ascii: bool, tick: usize) -> &'static str {
    if ascii {
        SPINNER_ASCII[tick % SPINNER_ASCII.len()]
    } else {
        SPINNER[tick % SPINNER.len()]
    }
}

/// Box-drawing characters for frames drawn inside the feed.
pub(crate) struct BorderChars {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

pub(crate) fn border_chars(ascii: bool) -> BorderChars {
    if ascii {
        BorderChars {
            top_left: "+",
            top_right: "+",
            bottom_left: "+",
            bottom_right: "+",
            horizontal: "-",
            vertical: "|",
        }
    } else {
        BorderChars {
            top_left: "╭",
            top_right: "╮",
            bottom_left: "╰",
            bottom_right: "╯",
            horizontal: "─",
            vertical: "│",
        }
    }
}

// ── Draw functions ────────────────────────────────────────────────────────────

/// Draw the status bar at the top of the chat view.
pub fn draw_status(
    frame: &mut Frame,
    area: Rect,
    session_id: &str,
    endpoint: &str,
    typing: bool,
    tick: usize,
    ascii: bool,
) {
    let separator = sep(ascii);
    let session_short: String = session_id.chars().take(8).collect();

    let typing_span = if typing {
        Span::styled(
            format!(" {} typing… ", spinner(ascii, tick)),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        Span::styled(" shopchat ", Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD)),
        Span::styled(separator, Style::default().fg(Color::Gray)),
        Span::styled(format!(" session {session_short} "), Style::default().fg(Color::White)),
        Span::styled(separator, Style::default().fg(Color::Gray)),
        Span::styled(format!(" {endpoint} "), Style::default().fg(Color::Gray)),
        typing_span,
        Span::styled(
            "  Enter:send  Esc/^x:close  Alt+←/→:products  PgUp/PgDn:scroll  F1:help  ^c:quit",
            Style::default().fg(Color::Gray),
        ),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Draw the scrolling message feed.
pub fn draw_feed(
    frame: &mut Frame,
    area: Rect,
    lines: &[Line<'static>],
    scroll_offset: u16,
    ascii: bool,
) {
    let block = pane_block("Chat", false, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible: Vec<Line<'static>> = lines
        .iter()
        .skip(scroll_offset as usize)
        .take(inner.height as usize)
        .cloned()
        .collect();
    frame.render_widget(Paragraph::new(visible), inner);
}

/// Draw a one-line input box with a cursor.
pub fn draw_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    input: &InputLine,
    placeholder: &str,
    focused: bool,
    ascii: bool,
) {
    let block = pane_block(title, focused, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (shown, cursor_col) = input.visible(inner.width as usize);
    let para = if shown.is_empty() && input.is_empty() {
        Paragraph::new(Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)))
    } else {
        Paragraph::new(shown)
    };
    frame.render_widget(para, inner);

    if focused {
        frame.set_cursor_position((inner.x + cursor_col, inner.y));
    }
}

/// Draw the landing view: banner, search box and a key hint.
pub fn draw_landing(
    frame: &mut Frame,
    layout: &LandingLayout,
    business_name: &str,
    search: &InputLine,
    ascii: bool,
) {
    let banner = vec![
        Line::from(Span::styled(
            business_name.to_string(),
            Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Shopping assistant",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(banner).alignment(Alignment::Center), layout.banner);

    draw_input(
        frame,
        layout.search_box,
        "Search",
        search,
        "What are you looking for?",
        true,
        ascii,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Enter:start chat  F1:help  ^c:quit",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        layout.hint,
    );
}

/// Draw the help overlay.
pub fn draw_help(frame: &mut Frame, ascii: bool) {
    let area = frame.area();
    let bt = border_type(ascii);

    let help_text = vec![
        Line::from(Span::styled(
            "  Key Bindings",
            Style::default().add_modifier(Modifier::BOLD).fg(Color::LightBlue),
        )),
        Line::default(),
        Line::from(" Enter      Search / send message"),
        Line::from(" Esc        Close the chat (starts a new session)"),
        Line::from(" ^x         Close the chat"),
        Line::from(" Alt+← / →  Previous / next products in the newest list"),
        Line::from(" [ / ]      Same, when the input is empty"),
        Line::from(" ↑ / ↓      Scroll chat by one line"),
        Line::from(" PgUp/PgDn  Scroll chat by half a page"),
        Line::from(" ^End       Jump to newest message"),
        Line::from(" ^u / ^k    Delete to start / end of input"),
        Line::from(" ^c         Quit"),
        Line::from(" F1         Toggle this help"),
        Line::default(),
        Line::from(Span::styled(
            " Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let width = 60u16.min(area.width);
    let height = (help_text.len() as u16 + 2).min(area.height);
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    let overlay = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(bt)
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(overlay);
    frame.render_widget(Clear, overlay);
    frame.render_widget(block, overlay);
    frame.render_widget(Paragraph::new(help_text), inner);
}

pub(crate) fn pane_block(title: &str, focused: bool, ascii: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            if focused {
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue)
            } else {
                Style::default().fg(Color::Gray)
            },
        ))
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .border_style(border_style)
}
