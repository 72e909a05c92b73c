//! Exponential reconnect backoff with jitter and offline escalation.

use std::time::Duration;

use rand::Rng;

use super::config::ReconnectionConfig;

/// Tracks consecutive reconnect failures and the delay before the next attempt.
#[derive(Debug, Clone)]
pub struct Backoff {
    config: ReconnectionConfig,
    consecutive_failures: u32,
    current_delay_ms: u64,
}

impl Backoff {
    #[must_use]
    pub fn new(config: ReconnectionConfig) -> Self {
        let initial_delay = config.initial_delay_ms;
        Self {
            config,
            consecutive_failures: 0,
            current_delay_ms: initial_delay,
        }
    }

    /// Reset after a successful connection.
    pub fn reset(&mut self) {
        self.consecutive_failures = 0;
        self.current_delay_ms = self.config.initial_delay_ms;
    }

    /// Record a failed attempt or a dropped connection.
    ///
    /// Returns `true` once the failure count reaches the offline threshold.
    pub fn record_failure(&mut self) -> bool {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.is_offline()
    }

    #[must_use]
    pub const fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    #[must_use]
    pub const fn is_offline(&self) -> bool {
        self.config.offline_after_failures > 0
            && self.consecutive_failures >= self.config.offline_after_failures
    }

    /// Delay before the next attempt; advances the exponential schedule.
    ///
    /// The schedule never drops below `initial_delay_ms`, whatever the
    /// multiplier.
    pub fn next_delay(&mut self) -> Duration {
        let base_ms = self.current_delay_ms;
        let delay = Duration::from_millis(base_ms.saturating_add(self.jitter_ms(base_ms)));

        // Increase delay for next attempt
        let next = (base_ms as f64 * self.config.backoff_multiplier) as u64;
        self.current_delay_ms = next
            .max(self.config.initial_delay_ms)
            .min(self.config.max_delay_ms);

        delay
    }

    fn jitter_ms(&self, base_ms: u64) -> u64 {
        let range = (base_ms as f64 * self.config.jitter_ratio) as u64;
        if range == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..=range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(jitter_ratio: f64) -> ReconnectionConfig {
        ReconnectionConfig {
            initial_delay_ms: 10,
            max_delay_ms: 100,
            backoff_multiplier: 2.0,
            jitter_ratio,
            offline_after_failures: 3,
        }
    }

    #[test]
    fn test_delays_double_up_to_cap() {
        let mut backoff = Backoff::new(config(0.0));

        let delays: Vec<u64> = (0..6)
            .map(|_| backoff.next_delay().as_millis() as u64)
            .collect();

        assert_eq!(delays, vec![10, 20, 40, 80, 100, 100]);
    }

    #[test]
    fn test_jitter_stays_within_ratio() {
        let mut backoff = Backoff::new(config(0.2));

        let assert_delay_in_range = |delay: Duration, base_ms: u64| {
            let max_ms = base_ms + (base_ms / 5);
            assert!(
                (base_ms..=max_ms).contains(&(delay.as_millis() as u64)),
                "delay {delay:?} not within {base_ms}..={max_ms} ms"
            );
        };

        assert_delay_in_range(backoff.next_delay(), 10);
        assert_delay_in_range(backoff.next_delay(), 20);
        assert_delay_in_range(backoff.next_delay(), 40);
        assert_delay_in_range(backoff.next_delay(), 80);
        assert_delay_in_range(backoff.next_delay(), 100);
    }

    #[test]
    fn test_offline_after_threshold() {
        let mut backoff = Backoff::new(config(0.0));

        assert!(!backoff.record_failure());
        assert!(!backoff.record_failure());
        assert!(backoff.record_failure());
        assert!(backoff.record_failure());
        assert_eq!(backoff.consecutive_failures(), 4);
    }

    #[test]
    fn test_reset() {
        let mut backoff = Backoff::new(config(0.0));
        for _ in 0..4 {
            backoff.record_failure();
            backoff.next_delay();
        }

        backoff.reset();

        assert_eq!(backoff.consecutive_failures(), 0);
        assert!(!backoff.is_offline());
        assert_eq!(backoff.next_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_shrinking_multiplier_never_lowers_delay() {
        let mut backoff = Backoff::new(ReconnectionConfig {
            backoff_multiplier: 0.1,
            ..config(0.0)
        });

        let delays: Vec<u64> = (0..5)
            .map(|_| backoff.next_delay().as_millis() as u64)
            .collect();

        assert_eq!(delays, vec![10, 10, 10, 10, 10]);
        assert!(delays.windows(2).all(|pair| pair[1] >= pair[0]));
    }

    #[test]
    fn test_zero_threshold_never_escalates() {
        let mut backoff = Backoff::new(ReconnectionConfig {
            offline_after_failures: 0,
            ..config(0.0)
        });

        for _ in 0..10 {
            assert!(!backoff.record_failure());
        }
    }
}
