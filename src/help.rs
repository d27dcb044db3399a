//! Help panel shown or hidden by hovering its trigger

use tracing::debug;

pub const HELP_TEXT: &str = "\
Work until the countdown reaches 00 : 00, then take the suggested rest.
Hooks in the config file run when a session starts, ends and expires.
Press Ctrl-C to stop early.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpPanel {
    visible: bool,
}

impl HelpPanel {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn hidden() -> Self {
        Self::new(false)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Each hover event flips the panel. Returns the new visibility.
    pub fn hover(&mut self) -> bool {
        self.visible = !self.visible;
        debug!(visible = self.visible, "help panel toggled");
        self.visible
    }

    pub fn render(&self) -> Option<&'static str> {
        self.visible.then_some(HELP_TEXT)
    }
}

impl Default for HelpPanel {
    fn default() -> Self {
        Self::hidden()
    }
}
