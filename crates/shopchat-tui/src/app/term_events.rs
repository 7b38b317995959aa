// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Terminal event handler: keyboard, mouse, paste and resize dispatch.

use crossterm::event::{Event, KeyEventKind, MouseEventKind};
use shopchat_core::ViewState;

use crate::{
    app::App,
    keys::{map_key, Action},
};

impl App {
    // ── Terminal event handler ────────────────────────────────────────────────

    /// Returns `true` when the app should quit.
    pub(crate) fn handle_term_event(&mut self, event: Event) -> bool {
        let chatting = self.controller.state() == ViewState::Chatting;
        match event {
            Event::Key(k) if k.kind == KeyEventKind::Press => {
                if self.show_help {
                    self.show_help = false;
                    return false;
                }
                match map_key(k, chatting, self.focused_input().is_empty()) {
                    Some(action) => self.dispatch(action),
                    None => false,
                }
            }

            Event::Mouse(mouse) if chatting => {
                match mouse.kind {
                    MouseEventKind::ScrollUp => self.scroll_up(3),
                    MouseEventKind::ScrollDown => self.scroll_down(3),
                    MouseEventKind::ScrollLeft => {
                        self.dispatch(Action::CarouselPrev);
                    }
                    MouseEventKind::ScrollRight => {
                        self.dispatch(Action::CarouselNext);
                    }
                    _ => {}
                }
                false
            }

            // Single-line inputs: pasted line breaks become spaces.
            Event::Paste(text) => {
                for c in text.chars() {
                    let c = if c == '\n' || c == '\r' { ' ' } else { c };
                    self.dispatch(Action::InputChar(c));
                }
                false
            }

            Event::Resize(..) => {
                self.feed_dirty = true;
                false
            }

            _ => false,
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use shopchat_model::ScriptedMockBackend;

    use crate::app::App;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn typed_keys_reach_search_input() {
        let mut app = App::for_testing(ScriptedMockBackend::new(vec![]));
        for c in "tv".chars() {
            app.handle_term_event(press(KeyCode::Char(c), KeyModifiers::NONE));
        }
        assert_eq!(app.search_input.as_str(), "tv");
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = App::for_testing(ScriptedMockBackend::new(vec![]));
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        app.handle_term_event(release);
        assert!(app.search_input.is_empty());
    }

    #[test]
    fn any_key_dismisses_help_first() {
        let mut app = App::for_testing(ScriptedMockBackend::new(vec![]));
        app.show_help = true;
        assert!(!app.handle_term_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!app.show_help);
        assert!(app.handle_term_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn paste_flattens_line_breaks() {
        let mut app = App::for_testing(ScriptedMockBackend::new(vec![]));
        app.handle_term_event(Event::Paste("split\nac".into()));
        assert_eq!(app.search_input.as_str(), "split ac");
    }
}
