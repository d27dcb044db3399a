//! User hook commands and the expiry sound

use std::io::Write;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Shell commands run at points in a session's life.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Hooks {
    /// Runs when the countdown starts.
    pub start: Option<String>,
    /// Runs when the countdown expires or is interrupted.
    pub end: Option<String>,
    /// Runs alongside the expiry alert.
    pub expire: Option<String>,
}

impl Hooks {
    /// Commented-out examples written into a fresh config file.
    pub fn examples() -> Self {
        Self {
            start: Some("# afplay ~/music/focus.mp3 &".to_string()),
            end: Some("# pkill afplay".to_string()),
            expire: Some("# notify-send 'Time is up'".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Missing,
    Disabled,
    Empty,
    Spawned,
    Failed,
}

/// Spawns the hook through `sh -c` without waiting for it.
pub fn execute_hook(hook: &Option<String>) -> HookOutcome {
    let Some(command) = hook else {
        debug!("no hook configured");
        return HookOutcome::Missing;
    };

    let command = command.trim();
    if command.starts_with('#') {
        debug!(command, "hook is commented out");
        HookOutcome::Disabled
    } else if command.is_empty() {
        debug!("hook is empty");
        HookOutcome::Empty
    } else {
        match Command::new("sh").arg("-c").arg(command).spawn() {
            Ok(child) => {
                info!(command, pid = child.id(), "hook started");
                HookOutcome::Spawned
            }
            Err(err) => {
                warn!(command, error = %err, "failed to start hook");
                HookOutcome::Failed
            }
        }
    }
}

fn play_first(player: &str, sounds: &[&str]) -> bool {
    for sound_path in sounds {
        if let Ok(mut child) = Command::new(player).arg(sound_path).spawn() {
            if child.wait().is_ok_and(|status| status.success()) {
                debug!(player, sound_path, "played expiry sound");
                return true;
            }
        }
    }
    false
}

/// Plays a platform sound, falling back to the terminal bell.
pub fn system_beep() {
    let mut sound_played = false;

    if cfg!(target_os = "macos") {
        let sounds = [
            "/System/Library/Sounds/Glass.aiff",
            "/System/Library/Sounds/Ping.aiff",
            "/System/Library/Sounds/Pop.aiff",
        ];
        sound_played = play_first("afplay", &sounds);
    } else if cfg!(target_os = "linux") {
        let sounds = [
            "/usr/share/sounds/freedesktop/stereo/complete.oga",
            "/usr/share/sounds/sound-icons/bell.wav",
            "/usr/share/sounds/alsa/Front_Left.wav",
        ];
        sound_played = play_first("paplay", &sounds) || play_first("aplay", &sounds[1..]);
    }

    if !sound_played {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "\x07");
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_disabled_hooks_do_not_run() {
        assert_eq!(execute_hook(&None), HookOutcome::Missing);
        assert_eq!(execute_hook(&Some("# pkill afplay".to_string())), HookOutcome::Disabled);
        assert_eq!(execute_hook(&Some("   ".to_string())), HookOutcome::Empty);
    }

    #[cfg(unix)]
    #[test]
    fn configured_hook_is_spawned() {
        assert_eq!(execute_hook(&Some("true".to_string())), HookOutcome::Spawned);
    }

    #[test]
    fn example_hooks_are_all_commented_out() {
        let hooks = Hooks::examples();
        for hook in [&hooks.start, &hooks.end, &hooks.expire] {
            assert_eq!(execute_hook(hook), HookOutcome::Disabled);
        }
    }
}
