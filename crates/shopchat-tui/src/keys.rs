use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// All logical actions the TUI can perform, independent of key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Widget
    Submit,
    /// The chat view's close button.
    Close,
    Escape,

    // Feed scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollBottom,

    // Carousel navigation
    CarouselPrev,
    CarouselNext,

    // Input
    InputChar(char),
    InputBackspace,
    InputDelete,
    InputMoveCursorLeft,
    InputMoveCursorRight,
    InputMoveWordLeft,
    InputMoveWordRight,
    InputMoveLineStart,
    InputMoveLineEnd,
    InputDeleteToEnd,
    InputDeleteToStart,

    // App
    Quit,
    Help,
}

/// Map a raw key event to an [`Action`].
///
/// `chatting`: the chat view is showing (feed and carousel keys only apply
/// there).  `input_empty`: the focused input holds no text, which frees
/// `[` and `]` for carousel navigation.
pub fn map_key(event: KeyEvent, chatting: bool, input_empty: bool) -> Option<Action> {
    let ctrl  = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt   = event.modifiers.contains(KeyModifiers::ALT);
    // "plain" = no modifier that would make a char a control sequence
    let plain = !ctrl && !alt;

    match event.code {
        // ── Global bindings ───────────────────────────────────────────────────
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Some(Action::Quit),
        KeyCode::Char('x') if ctrl => Some(Action::Close),
        KeyCode::Esc  => Some(Action::Escape),
        KeyCode::F(1) => Some(Action::Help),
        KeyCode::Enter => Some(Action::Submit),

        // ── Chat view ─────────────────────────────────────────────────────────
        KeyCode::Left  if chatting && alt => Some(Action::CarouselPrev),
        KeyCode::Right if chatting && alt => Some(Action::CarouselNext),
        KeyCode::Char('[') if chatting && plain && input_empty => Some(Action::CarouselPrev),
        KeyCode::Char(']') if chatting && plain && input_empty => Some(Action::CarouselNext),
        KeyCode::Up       if chatting => Some(Action::ScrollUp),
        KeyCode::Down     if chatting => Some(Action::ScrollDown),
        KeyCode::PageUp   if chatting => Some(Action::ScrollPageUp),
        KeyCode::PageDown if chatting => Some(Action::ScrollPageDown),
        KeyCode::End      if chatting && ctrl => Some(Action::ScrollBottom),

        // ── Input line ────────────────────────────────────────────────────────
        KeyCode::Char('u') if ctrl => Some(Action::InputDeleteToStart),
        KeyCode::Char('k') if ctrl => Some(Action::InputDeleteToEnd),
        KeyCode::Backspace => Some(Action::InputBackspace),
        KeyCode::Delete    => Some(Action::InputDelete),
        KeyCode::Left  if ctrl => Some(Action::InputMoveWordLeft),
        KeyCode::Right if ctrl => Some(Action::InputMoveWordRight),
        KeyCode::Left  => Some(Action::InputMoveCursorLeft),
        KeyCode::Right => Some(Action::InputMoveCursorRight),
        KeyCode::Home  => Some(Action::InputMoveLineStart),
        KeyCode::End   => Some(Action::InputMoveLineEnd),
        // Printable characters, only when no ctrl/alt modifier
        KeyCode::Char(c) if plain => Some(Action::InputChar(c)),

        _ => None,
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: mods,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn plain_key(c: char) -> KeyEvent { key(KeyCode::Char(c), KeyModifiers::NONE) }
    fn ctrl_key(c: char)  -> KeyEvent { key(KeyCode::Char(c), KeyModifiers::CONTROL) }

    // ── Widget ────────────────────────────────────────────────────────────────

    #[test]
    fn enter_submits_in_both_views() {
        let ev = key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(map_key(ev, false, false), Some(Action::Submit));
        assert_eq!(map_key(ev, true, true), Some(Action::Submit));
    }

    #[test]
    fn esc_maps_to_escape_everywhere() {
        // The controller decides that Escape on the landing view does nothing.
        let ev = key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(map_key(ev, false, true), Some(Action::Escape));
        assert_eq!(map_key(ev, true, false), Some(Action::Escape));
    }

    #[test]
    fn ctrl_x_is_the_close_button() {
        assert_eq!(map_key(ctrl_key('x'), true, true), Some(Action::Close));
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(map_key(ctrl_key('c'), true, false), Some(Action::Quit));
        assert_eq!(map_key(ctrl_key('c'), false, true), Some(Action::Quit));
    }

    // ── Carousel ──────────────────────────────────────────────────────────────

    #[test]
    fn alt_arrows_scroll_carousel_in_chat() {
        let left = key(KeyCode::Left, KeyModifiers::ALT);
        let right = key(KeyCode::Right, KeyModifiers::ALT);
        assert_eq!(map_key(left, true, false), Some(Action::CarouselPrev));
        assert_eq!(map_key(right, true, false), Some(Action::CarouselNext));
    }

    #[test]
    fn brackets_scroll_carousel_only_with_empty_input() {
        assert_eq!(map_key(plain_key(']'), true, true), Some(Action::CarouselNext));
        assert_eq!(map_key(plain_key('['), true, true), Some(Action::CarouselPrev));
        assert_eq!(map_key(plain_key(']'), true, false), Some(Action::InputChar(']')));
        assert_eq!(map_key(plain_key('['), false, true), Some(Action::InputChar('[')));
    }

    // ── Feed scrolling ────────────────────────────────────────────────────────

    #[test]
    fn page_keys_scroll_feed_in_chat() {
        let pg_up = key(KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(map_key(pg_up, true, true), Some(Action::ScrollPageUp));
        assert_eq!(map_key(pg_up, false, true), None);
    }

    #[test]
    fn end_moves_cursor_ctrl_end_scrolls_bottom() {
        assert_eq!(map_key(key(KeyCode::End, KeyModifiers::NONE), true, false), Some(Action::InputMoveLineEnd));
        assert_eq!(map_key(key(KeyCode::End, KeyModifiers::CONTROL), true, false), Some(Action::ScrollBottom));
    }

    // ── Ctrl/Alt modifiers should NOT type a character ────────────────────────

    #[test]
    fn alt_char_does_not_type() {
        let ev = key(KeyCode::Char('a'), KeyModifiers::ALT);
        assert_eq!(map_key(ev, true, false), None);
    }

    #[test]
    fn ctrl_unbound_does_not_type() {
        assert_eq!(map_key(ctrl_key('z'), false, false), None);
    }

    #[test]
    fn plain_char_types() {
        assert_eq!(map_key(plain_key('h'), false, true), Some(Action::InputChar('h')));
        assert_eq!(map_key(plain_key('j'), true, true), Some(Action::InputChar('j')));
    }

    #[test]
    fn ctrl_word_motion() {
        let ev = key(KeyCode::Left, KeyModifiers::CONTROL);
        assert_eq!(map_key(ev, true, false), Some(Action::InputMoveWordLeft));
        assert_eq!(map_key(ctrl_key('u'), false, false), Some(Action::InputDeleteToStart));
    }
}
