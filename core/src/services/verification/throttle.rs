//! Failed-attempt throttle for verification codes

use ak_shared::config::MAX_COOLDOWN_MINUTES;
use ak_shared::ThrottleConfig;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::user::UserAccount;

/// Limits verification guesses per account
///
/// An account is throttled while its failed-attempt count is at or above the
/// limit and its most recent attempt lies inside the cooldown window. Every
/// attempt is counted before its code is compared; the count is only cleared
/// by a successful verification.
#[derive(Debug, Clone)]
pub struct AttemptThrottle {
    max_attempts: u32,
    cooldown: Duration,
}

impl AttemptThrottle {
    pub fn new(max_attempts: u32, cooldown: Duration) -> Self {
        Self {
            max_attempts,
            cooldown,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn is_throttled(&self, account: &UserAccount, now: DateTime<Utc>) -> bool {
        self.retry_after(account, now).is_some()
    }

    /// Time left in the cooldown window, `None` when not throttled
    pub fn retry_after(&self, account: &UserAccount, now: DateTime<Utc>) -> Option<Duration> {
        if account.attempt_count < self.max_attempts {
            return None;
        }

        let last = account.last_attempt_time?;
        let remaining = match last.checked_add_signed(self.cooldown) {
            Some(window_end) => window_end - now,
            None => self.cooldown,
        };
        (remaining > Duration::zero()).then_some(remaining)
    }

    /// Cooldown left rounded up to whole seconds, 0 when not throttled
    pub fn retry_after_seconds(&self, account: &UserAccount, now: DateTime<Utc>) -> i64 {
        self.retry_after(account, now)
            .map(|d| (d.num_milliseconds() + 999) / 1000)
            .unwrap_or(0)
    }

    /// Earliest attempt time that still counts toward the cooldown
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.cooldown)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Guesses left before the limit, given the current failure count
    pub fn remaining_attempts(&self, attempt_count: u32) -> u32 {
        self.max_attempts.saturating_sub(attempt_count)
    }

    /// Apply a claimed attempt to an account snapshot
    pub fn record_attempt(account: &mut UserAccount, now: DateTime<Utc>) {
        account.attempt_count = account.attempt_count.saturating_add(1);
        account.last_attempt_time = Some(now);
    }

    /// Clear the failure bookkeeping on an account snapshot
    pub fn reset(account: &mut UserAccount) {
        account.attempt_count = 0;
        account.last_attempt_time = None;
    }
}

impl Default for AttemptThrottle {
    fn default() -> Self {
        Self::from(&ThrottleConfig::default())
    }
}

impl From<&ThrottleConfig> for AttemptThrottle {
    fn from(config: &ThrottleConfig) -> Self {
        let minutes = config.cooldown_minutes.clamp(0, MAX_COOLDOWN_MINUTES);
        Self::new(config.max_attempts, Duration::minutes(minutes))
    }
}
