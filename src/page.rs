//! Display surfaces fed by the countdown
//!
//! A [`Page`] owns the host targets the countdown writes to: the text label,
//! the window title, the action control and the notifier. It is assembled
//! through [`PageBuilder`], which refuses to build while any target is
//! missing so misconfiguration shows up before the first tick.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::TimerError;
use crate::timer::TimerEvents;

/// A surface that shows a line of text (label, window title).
pub trait TextTarget {
    fn set_text(&mut self, text: &str);
}

/// The call-to-action control retargeted on expiry.
pub trait ControlTarget {
    fn set_label(&mut self, label: &str);
    fn set_href(&mut self, href: &str);
}

/// User-visible notification raised once on expiry.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Fixed strings written to the page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PageText {
    pub app_name: String,
    pub expired_message: String,
    pub rest_label: String,
    pub rest_href: String,
    pub alert: String,
}

impl Default for PageText {
    fn default() -> Self {
        Self {
            app_name: "番茄钟".to_string(),
            expired_message: "Time's Up!".to_string(),
            rest_label: "休息".to_string(),
            rest_href: "/pomodoro?rest".to_string(),
            alert: "Time's Up!".to_string(),
        }
    }
}

impl PageText {
    pub fn title_for(&self, text: &str) -> String {
        format!("{} - {}", text, self.app_name)
    }
}

pub struct Page {
    display: Box<dyn TextTarget + Send>,
    title: Box<dyn TextTarget + Send>,
    control: Box<dyn ControlTarget + Send>,
    notifier: Box<dyn Notifier + Send>,
    text: PageText,
}

impl Page {
    pub fn builder() -> PageBuilder {
        PageBuilder::default()
    }
}

impl TimerEvents for Page {
    fn on_tick(&mut self, text: &str) {
        self.display.set_text(text);
        self.title.set_text(&self.text.title_for(text));
    }

    fn on_expire(&mut self) {
        self.display.set_text(&self.text.expired_message);
        self.control.set_label(&self.text.rest_label);
        self.control.set_href(&self.text.rest_href);
        info!(href = %self.text.rest_href, "control retargeted");
        self.notifier.alert(&self.text.alert);
    }
}

#[derive(Default)]
pub struct PageBuilder {
    display: Option<Box<dyn TextTarget + Send>>,
    title: Option<Box<dyn TextTarget + Send>>,
    control: Option<Box<dyn ControlTarget + Send>>,
    notifier: Option<Box<dyn Notifier + Send>>,
    text: PageText,
}

impl PageBuilder {
    pub fn display(mut self, target: impl TextTarget + Send + 'static) -> Self {
        self.display = Some(Box::new(target));
        self
    }

    pub fn title(mut self, target: impl TextTarget + Send + 'static) -> Self {
        self.title = Some(Box::new(target));
        self
    }

    pub fn control(mut self, target: impl ControlTarget + Send + 'static) -> Self {
        self.control = Some(Box::new(target));
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + Send + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn text(mut self, text: PageText) -> Self {
        self.text = text;
        self
    }

    pub fn build(self) -> Result<Page, TimerError> {
        let page = Page {
            display: self.display.ok_or(TimerError::MissingTarget("display"))?,
            title: self.title.ok_or(TimerError::MissingTarget("title"))?,
            control: self.control.ok_or(TimerError::MissingTarget("control"))?,
            notifier: self.notifier.ok_or(TimerError::MissingTarget("notifier"))?,
            text: self.text,
        };
        debug!(app_name = %page.text.app_name, "page assembled");
        Ok(page)
    }
}
