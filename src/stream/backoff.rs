use std::time::Duration;

/// Exponential reconnect delays: `base * 2^(attempt - 1)`, capped at `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    /// `None` retries forever.
    limit: Option<u32>,
    attempts: u32,
}

impl Backoff {
    pub fn new(base: Duration, max: Duration, limit: Option<u32>) -> Self {
        Self {
            base,
            max,
            limit,
            attempts: 0,
        }
    }

    /// Delay before the next attempt, or `None` once the limit is spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        self.attempts = self.attempts.saturating_add(1);
        if self.limit.is_some_and(|limit| self.attempts > limit) {
            return None;
        }
        let factor = 1u32.checked_shl(self.attempts - 1).unwrap_or(u32::MAX);
        Some(self.base.saturating_mul(factor).min(self.max))
    }

    /// Forget past failures after a successful connect.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn doubles_until_capped() {
        let mut backoff = Backoff::new(ms(100), ms(500), None);
        let delays: Vec<_> = (0..5).map(|_| backoff.next_delay().unwrap()).collect();
        assert_eq!(delays, vec![ms(100), ms(200), ms(400), ms(500), ms(500)]);
    }

    #[test]
    fn stops_after_limit() {
        let mut backoff = Backoff::new(ms(10), ms(100), Some(2));
        assert!(backoff.next_delay().is_some());
        assert!(backoff.next_delay().is_some());
        assert!(backoff.next_delay().is_none());
    }

    #[test]
    fn reset_starts_over() {
        let mut backoff = Backoff::new(ms(10), ms(1000), Some(1));
        backoff.next_delay();
        backoff.reset();
        assert_eq!(backoff.attempts(), 0);
        assert_eq!(backoff.next_delay(), Some(ms(10)));
    }

    #[test]
    fn huge_attempt_counts_do_not_overflow() {
        let mut backoff = Backoff::new(ms(1), ms(50), None);
        for _ in 0..100 {
            assert!(backoff.next_delay().unwrap() <= ms(50));
        }
    }
}
