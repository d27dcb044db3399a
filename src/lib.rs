//! Pomodoro countdown timer
//!
//! A one-shot countdown that publishes `MM : SS` to a label and a window
//! title once per second, then retargets an action control and raises a
//! notification when time runs out.

pub mod config;
pub mod error;
pub mod help;
pub mod hooks;
pub mod page;
pub mod terminal;
pub mod timer;

pub use config::{Config, load_config, parse_duration};
pub use error::TimerError;
pub use help::HelpPanel;
pub use page::{Page, PageBuilder, PageText};
pub use timer::{Callbacks, CountdownState, CountdownTimer, Phase, Tick, TimerEvents, start};
