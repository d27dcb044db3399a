//! Countdown state machine and its once-per-second driver

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::TimerError;

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Expired,
}

/// Outcome of a single tick: the text to publish, and whether this tick
/// ended the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub text: String,
    pub expired: bool,
}

#[derive(Debug, Clone)]
pub struct CountdownState {
    remaining: i64,
    phase: Phase,
}

impl CountdownState {
    /// Negative durations are clamped to zero, so they expire on the first tick.
    pub fn new(duration_seconds: i64) -> Self {
        Self {
            remaining: duration_seconds.max(0),
            phase: Phase::Running,
        }
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_expired(&self) -> bool {
        self.phase == Phase::Expired
    }

    /// Formats the current value, then decrements. Once expired, ticking is a no-op.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.is_expired() {
            return None;
        }

        let text = format_remaining(self.remaining);
        self.remaining -= 1;

        let expired = self.remaining < 0;
        if expired {
            self.phase = Phase::Expired;
        }

        Some(Tick { text, expired })
    }
}

/// `MM : SS`, both fields zero-padded to two digits.
pub fn format_remaining(remaining: i64) -> String {
    let minutes = remaining / 60;
    let seconds = remaining % 60;
    format!("{:02} : {:02}", minutes, seconds)
}

/// Receiver of countdown output.
pub trait TimerEvents {
    fn on_tick(&mut self, text: &str);
    fn on_expire(&mut self);
}

impl<T: TimerEvents + ?Sized> TimerEvents for &mut T {
    fn on_tick(&mut self, text: &str) {
        (**self).on_tick(text)
    }

    fn on_expire(&mut self) {
        (**self).on_expire()
    }
}

impl<T: TimerEvents + ?Sized> TimerEvents for Box<T> {
    fn on_tick(&mut self, text: &str) {
        (**self).on_tick(text)
    }

    fn on_expire(&mut self) {
        (**self).on_expire()
    }
}

/// Adapts a pair of closures to [`TimerEvents`].
pub struct Callbacks<T, E> {
    on_tick: T,
    on_expire: E,
}

impl<T, E> Callbacks<T, E>
where
    T: FnMut(&str),
    E: FnMut(),
{
    pub fn new(on_tick: T, on_expire: E) -> Self {
        Self { on_tick, on_expire }
    }
}

impl<T, E> TimerEvents for Callbacks<T, E>
where
    T: FnMut(&str),
    E: FnMut(),
{
    fn on_tick(&mut self, text: &str) {
        (self.on_tick)(text)
    }

    fn on_expire(&mut self) {
        (self.on_expire)()
    }
}

/// Source of the pause between ticks.
pub trait Clock {
    fn wait(&mut self, period: Duration);
}

/// Sleeps the current thread against a fixed schedule, so slow callbacks
/// don't push later ticks back.
#[derive(Debug, Default)]
pub struct SystemClock {
    next: Option<Instant>,
}

impl Clock for SystemClock {
    fn wait(&mut self, period: Duration) {
        let now = Instant::now();
        let deadline = self.next.unwrap_or(now) + period;
        self.next = Some(deadline);
        thread::sleep(deadline.saturating_duration_since(now));
    }
}

pub struct CountdownTimer<C = SystemClock> {
    period: Duration,
    clock: C,
}

impl CountdownTimer<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::default())
    }
}

impl Default for CountdownTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CountdownTimer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            period: DEFAULT_PERIOD,
            clock,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Runs the countdown to completion on the calling thread.
    ///
    /// Each period the current value is published through `on_tick`. The tick
    /// that drives the counter below zero also calls `on_expire`, after which
    /// the loop stops for good.
    pub fn start<E: TimerEvents>(&mut self, duration_seconds: i64, mut events: E) {
        let mut state = CountdownState::new(duration_seconds);
        info!(duration_seconds = state.remaining(), "countdown started");

        loop {
            self.clock.wait(self.period);

            let Some(tick) = state.tick() else {
                break;
            };
            debug!(text = %tick.text, "tick");
            events.on_tick(&tick.text);

            if tick.expired {
                info!("countdown expired");
                events.on_expire();
                break;
            }
        }
    }
}

impl<C: Clock + Send + 'static> CountdownTimer<C> {
    /// Runs the countdown on a named background thread.
    pub fn spawn<E>(mut self, duration_seconds: i64, events: E) -> Result<JoinHandle<()>, TimerError>
    where
        E: TimerEvents + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("countdown".to_string())
            .spawn(move || self.start(duration_seconds, events))?;
        Ok(handle)
    }
}

/// Blocking countdown with one-second ticks, driven by two callbacks.
pub fn start<T, E>(duration_seconds: i64, on_tick: T, on_expire: E)
where
    T: FnMut(&str),
    E: FnMut(),
{
    CountdownTimer::new().start(duration_seconds, Callbacks::new(on_tick, on_expire));
}
