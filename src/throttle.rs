//! Credential prompt throttling
//!
//! When no API key is configured, the provider asks the host to open the
//! credential-entry flow. Rapid typing produces many invocations per
//! second, so the prompt is rate-limited to once per interval. A fresh
//! throttle is immediately eligible; nothing persists across restarts.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Minimum time between repeated missing-credential prompts.
pub const API_KEY_PROMPT_INTERVAL: Duration = Duration::from_secs(5 * 60);

type Clock = Box<dyn Fn() -> Instant + Send + Sync>;

/// Rate limiter for the missing-API-key prompt.
///
/// Holds the timestamp of the last fired prompt. Last-write-wins under a
/// mutex so overlapping invocations on a multi-thread executor elect a
/// single winner per interval.
pub struct ApiKeyPromptThrottle {
    last_prompt: Mutex<Option<Instant>>,
    interval: Duration,
    clock: Clock,
}

impl ApiKeyPromptThrottle {
    pub fn new() -> Self {
        Self::with_clock(API_KEY_PROMPT_INTERVAL, Box::new(Instant::now))
    }

    /// Throttle with an injected interval and clock, for tests.
    pub fn with_clock(interval: Duration, clock: Clock) -> Self {
        Self {
            last_prompt: Mutex::new(None),
            interval,
            clock,
        }
    }

    /// Returns true if a prompt should fire now, recording the timestamp in
    /// the same locked section so concurrent callers can't double-fire.
    pub fn should_prompt(&self) -> bool {
        let now = (self.clock)();
        let mut last = self
            .last_prompt
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match *last {
            Some(at) if now.duration_since(at) < self.interval => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

impl Default for ApiKeyPromptThrottle {
    fn default() -> Self {
        Self::new()
    }
}
