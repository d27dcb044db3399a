//! Configuration for the countdown's hooks, page text and default duration

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::TimerError;
use crate::hooks::Hooks;
use crate::page::PageText;

pub const DEFAULT_DURATION: &str = "25m";
pub const DEFAULT_DURATION_SECS: u64 = 25 * 60;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub hooks: Hooks,
    pub page: PageText,
    /// Used when `--duration` is not given, in the same format.
    pub duration: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hooks: Hooks::default(),
            page: PageText::default(),
            duration: DEFAULT_DURATION.to_string(),
        }
    }
}

impl Config {
    /// Default duration in seconds, falling back to 25 minutes if the
    /// configured value does not parse.
    pub fn duration_seconds(&self) -> u64 {
        parse_duration(&self.duration).unwrap_or_else(|err| {
            warn!(duration = %self.duration, error = %err, "invalid configured duration, using {}", DEFAULT_DURATION);
            DEFAULT_DURATION_SECS
        })
    }
}

pub fn config_path() -> PathBuf {
    if let Some(home) = env::var_os("HOME") {
        PathBuf::from(home).join(".config").join("pomo").join("config.json")
    } else {
        PathBuf::from("pomo-config.json")
    }
}

/// Reads the config file, creating it with commented-out hook examples when
/// absent. Problems are logged and defaults used; they never stop the timer.
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        let config = Config {
            hooks: Hooks::examples(),
            ..Config::default()
        };
        if let Err(err) = write_config(path, &config) {
            warn!(path = %path.display(), error = %err, "could not write default config");
        } else {
            info!(path = %path.display(), "wrote default config");
        }
        return config;
    }

    match read_config(path) {
        Ok(config) => {
            debug!(path = %path.display(), "loaded config");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not load config, using defaults");
            Config::default()
        }
    }
}

pub fn read_config(path: &Path) -> Result<Config, TimerError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn write_config(path: &Path, config: &Config) -> Result<(), TimerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

/// Parses `25`, `25m`, `30s`, `1m30s` or `1h` into seconds. A bare number
/// means minutes.
pub fn parse_duration(input: &str) -> Result<u64, TimerError> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Err(TimerError::InvalidDuration("empty duration".to_string()));
    }

    if let Ok(minutes) = input.parse::<u64>() {
        let seconds = minutes
            .checked_mul(60)
            .ok_or_else(|| TimerError::InvalidDuration(format!("{} minutes is too long", minutes)))?;
        return within_countdown_range(seconds);
    }

    let mut total_seconds = 0u64;
    let mut current_number = String::new();

    for ch in input.chars() {
        if ch.is_ascii_digit() {
            current_number.push(ch);
        } else if matches!(ch, 'h' | 'm' | 's') {
            if current_number.is_empty() {
                return Err(TimerError::InvalidDuration(
                    "use formats like: 25m, 30s, 1m30s".to_string(),
                ));
            }

            let number: u64 = current_number
                .parse()
                .map_err(|_| TimerError::InvalidDuration(format!("bad number {:?}", current_number)))?;

            let unit = match ch {
                'h' => 3600,
                'm' => 60,
                _ => 1,
            };
            total_seconds = number
                .checked_mul(unit)
                .and_then(|secs| total_seconds.checked_add(secs))
                .ok_or_else(|| TimerError::InvalidDuration(format!("{} is too long", input)))?;

            current_number.clear();
        } else if !ch.is_whitespace() {
            return Err(TimerError::InvalidDuration(format!(
                "unexpected character {:?}, use formats like: 25m, 30s, 1m30s",
                ch
            )));
        }
    }

    if !current_number.is_empty() {
        return Err(TimerError::InvalidDuration(
            "duration must end with 'h', 'm' or 's'".to_string(),
        ));
    }

    within_countdown_range(total_seconds)
}

/// The countdown counts in `i64`, so longer durations are refused up front.
fn within_countdown_range(seconds: u64) -> Result<u64, TimerError> {
    if i64::try_from(seconds).is_err() {
        return Err(TimerError::InvalidDuration(format!("{} seconds is too long", seconds)));
    }
    Ok(seconds)
}

fn plural(count: u64, unit: &str) -> String {
    format!("{} {}{}", count, unit, if count == 1 { "" } else { "s" })
}

/// Human-readable duration for log and banner lines.
pub fn format_duration(seconds: u64) -> String {
    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;

    match (minutes, remaining_seconds) {
        (0, s) => plural(s, "second"),
        (m, 0) => plural(m, "minute"),
        (m, s) => format!("{} {}", plural(m, "minute"), plural(s, "second")),
    }
}
