use std::cell::RefCell;
use std::time::Duration;

use pomo_countdown::timer::{Clock, format_remaining};
use pomo_countdown::{Callbacks, CountdownState, CountdownTimer, HelpPanel};
use proptest::prelude::*;

#[derive(Default)]
struct CountingClock {
    waits: u32,
}

impl Clock for CountingClock {
    fn wait(&mut self, _period: Duration) {
        self.waits += 1;
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Call {
    Tick(String),
    Expire,
}

fn run(duration_seconds: i64) -> (Vec<Call>, u32) {
    let calls = RefCell::new(Vec::new());
    let mut timer = CountdownTimer::with_clock(CountingClock::default());
    timer.start(
        duration_seconds,
        Callbacks::new(
            |text: &str| calls.borrow_mut().push(Call::Tick(text.to_string())),
            || calls.borrow_mut().push(Call::Expire),
        ),
    );
    (calls.into_inner(), timer.clock().waits)
}

#[test]
fn start_two_seconds_yields_documented_sequence() {
    let (calls, _) = run(2);
    assert_eq!(
        calls,
        vec![
            Call::Tick("00 : 02".to_string()),
            Call::Tick("00 : 01".to_string()),
            Call::Tick("00 : 00".to_string()),
            Call::Expire,
        ]
    );
}

#[test]
fn zero_seconds_ticks_once() {
    let (calls, waits) = run(0);
    assert_eq!(calls, vec![Call::Tick("00 : 00".to_string()), Call::Expire]);
    assert_eq!(waits, 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ticks_count_down_then_expire_once(d in 0i64..400) {
        let (calls, waits) = run(d);
        prop_assert_eq!(i64::from(waits), d + 1);

        prop_assert_eq!(calls.len() as i64, d + 2);
        prop_assert_eq!(calls.last(), Some(&Call::Expire));
        for (i, call) in calls[..calls.len() - 1].iter().enumerate() {
            prop_assert_eq!(call, &Call::Tick(format_remaining(d - i as i64)));
        }
    }

    #[test]
    fn expired_state_stays_silent(d in 0i64..200, extra in 1usize..50) {
        let mut state = CountdownState::new(d);
        while !state.is_expired() {
            state.tick();
        }
        for _ in 0..extra {
            prop_assert!(state.tick().is_none());
        }
    }

    #[test]
    fn formatted_text_is_padded_minutes_and_seconds(remaining in 0i64..6000) {
        let text = format_remaining(remaining);
        let (minutes, seconds) = text.split_once(" : ").unwrap();
        prop_assert_eq!(minutes.len(), 2);
        prop_assert_eq!(seconds.len(), 2);
        let minutes: i64 = minutes.parse().unwrap();
        let seconds: i64 = seconds.parse().unwrap();
        prop_assert!(seconds < 60);
        prop_assert_eq!(minutes * 60 + seconds, remaining);
    }

    #[test]
    fn help_panel_visibility_follows_hover_parity(initial in any::<bool>(), hovers in 0usize..100) {
        let mut panel = HelpPanel::new(initial);
        for _ in 0..hovers {
            panel.hover();
        }
        prop_assert_eq!(panel.is_visible(), initial ^ (hovers % 2 == 1));
    }
}
