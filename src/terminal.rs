//! Terminal implementations of the page targets
//!
//! The label is the status line on stdout, rewritten in place. The title is
//! the terminal window title, set with the `OSC 0` escape. The action
//! control prints the suggested next step once it has been retargeted.

use std::io::{self, Write};

use tracing::warn;

use crate::hooks::{Hooks, execute_hook, system_beep};
use crate::page::{ControlTarget, Notifier, TextTarget};

fn flush_to<W: Write>(out: &mut W, text: &str) {
    if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        warn!(error = %err, "terminal write failed");
    }
}

/// Rewrites the current line with the latest countdown text.
pub struct StatusLine<W = io::Stdout> {
    out: W,
    width: usize,
}

impl StatusLine {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W) -> Self {
        Self { out, width: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TextTarget for StatusLine<W> {
    fn set_text(&mut self, text: &str) {
        let len = text.chars().count();
        let padding = " ".repeat(self.width.saturating_sub(len));
        self.width = len;
        flush_to(&mut self.out, &format!("\r⏱️  {}{}", text, padding));
    }
}

/// Sets the terminal window title. Does nothing while disabled.
pub struct WindowTitle<W = io::Stdout> {
    out: W,
    enabled: bool,
}

impl WindowTitle {
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> WindowTitle<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TextTarget for WindowTitle<W> {
    fn set_text(&mut self, text: &str) {
        if self.enabled {
            flush_to(&mut self.out, &format!("\x1b]0;{}\x07", text));
        }
    }
}

/// Prints the retargeted call to action once both label and link are known.
pub struct NextStep<W = io::Stdout> {
    out: W,
    label: Option<String>,
    href: Option<String>,
}

impl NextStep {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> NextStep<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            label: None,
            href: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn show(&mut self) {
        if let (Some(label), Some(href)) = (&self.label, &self.href) {
            let line = format!("\n➡️  {} ({})", label, href);
            flush_to(&mut self.out, &line);
        }
    }
}

impl<W: Write> ControlTarget for NextStep<W> {
    fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
        self.show();
    }

    fn set_href(&mut self, href: &str) {
        self.href = Some(href.to_string());
        self.show();
    }
}

/// Prints the alert, sounds the bell and runs the `expire` hook.
pub struct TerminalAlert<W = io::Stdout> {
    out: W,
    hooks: Option<Hooks>,
    sound: bool,
}

impl TerminalAlert {
    pub fn stdout(hooks: Option<Hooks>, sound: bool) -> Self {
        Self::new(io::stdout(), hooks, sound)
    }
}

impl<W: Write> TerminalAlert<W> {
    pub fn new(out: W, hooks: Option<Hooks>, sound: bool) -> Self {
        Self { out, hooks, sound }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for TerminalAlert<W> {
    fn alert(&mut self, message: &str) {
        flush_to(&mut self.out, &format!("\n🍅 {}\n", message));
        if let Some(hooks) = &self.hooks {
            execute_hook(&hooks.expire);
        }
        if self.sound {
            system_beep();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn status_line_overwrites_in_place() {
        let mut line = StatusLine::new(Vec::new());
        line.set_text("Time's Up!");
        line.set_text("00 : 00");
        assert_eq!(
            written(line.into_inner()),
            "\r⏱️  Time's Up!\r⏱️  00 : 00   "
        );
    }

    #[test]
    fn window_title_uses_osc_escape() {
        let mut title = WindowTitle::new(Vec::new(), true);
        title.set_text("00 : 05 - 番茄钟");
        assert_eq!(written(title.into_inner()), "\x1b]0;00 : 05 - 番茄钟\x07");

        let mut title = WindowTitle::new(Vec::new(), false);
        title.set_text("00 : 05 - 番茄钟");
        assert!(title.into_inner().is_empty());
    }

    #[test]
    fn next_step_waits_for_label_and_link() {
        let mut next = NextStep::new(Vec::new());
        next.set_label("休息");
        next.set_href("/pomodoro?rest");
        assert_eq!(written(next.into_inner()), "\n➡️  休息 (/pomodoro?rest)");
    }

    #[test]
    fn alert_prints_message() {
        let mut alert = TerminalAlert::new(Vec::new(), None, false);
        alert.alert("Time's Up!");
        assert_eq!(written(alert.into_inner()), "\n🍅 Time's Up!\n");
    }
}
