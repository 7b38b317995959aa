/// Shown while a request is outstanding.
///
/// Two states only: any completed request hides it, even when another
/// request is still in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypingIndicator {
    visible: bool,
}

impl TypingIndicator {
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
