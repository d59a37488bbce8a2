//! Domain model for the login session and PIN rate limiting.
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub is_logged_in: bool,
    /// Timestamps of recent PIN attempts, oldest first
    pin_attempts: Vec<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop attempts that fell out of the trailing window
    pub fn prune_attempts(&mut self, now: DateTime<Utc>, window: Duration) {
        self.pin_attempts.retain(|attempt| now - *attempt < window);
    }

    /// Prunes, then reports whether the attempt budget is used up
    pub fn is_rate_limited(&mut self, now: DateTime<Utc>, window: Duration, max_attempts: usize) -> bool {
        self.prune_attempts(now, window);
        self.pin_attempts.len() >= max_attempts
    }

    pub fn record_attempt(&mut self, at: DateTime<Utc>) {
        self.pin_attempts.push(at);
    }

    pub fn clear_attempts(&mut self) {
        self.pin_attempts.clear();
    }

    pub fn attempt_count(&self) -> usize {
        self.pin_attempts.len()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginError {
    #[error("Too many PIN attempts ({attempts}). Please try again later")]
    RateLimited { attempts: usize },
    #[error("PIN cannot be empty")]
    EmptyPin,
    #[error("PIN must be {expected} digits")]
    InvalidLength { expected: usize, actual: usize },
    #[error("PIN must contain only numbers")]
    NonNumeric,
}

impl LoginError {
    /// Failures that belong on the security log rather than the plain warning log
    pub fn is_security_event(&self) -> bool {
        !matches!(self, LoginError::EmptyPin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_keeps_attempts_inside_window() {
        let now = Utc::now();
        let window = Duration::seconds(300);
        let mut session = Session::new();
        session.record_attempt(now - Duration::seconds(301));
        session.record_attempt(now - Duration::seconds(300));
        session.record_attempt(now - Duration::seconds(299));

        session.prune_attempts(now, window);

        assert_eq!(session.attempt_count(), 1);
    }

    #[test]
    fn test_rate_limited_at_threshold() {
        let now = Utc::now();
        let window = Duration::seconds(300);
        let mut session = Session::new();
        for _ in 0..4 {
            session.record_attempt(now);
        }
        assert!(!session.is_rate_limited(now, window, 5));

        session.record_attempt(now);
        assert!(session.is_rate_limited(now, window, 5));
        assert!(!session.is_rate_limited(now + window, window, 5));
    }

    #[test]
    fn test_login_error_messages() {
        assert_eq!(LoginError::EmptyPin.to_string(), "PIN cannot be empty");
        assert_eq!(
            LoginError::InvalidLength { expected: 5, actual: 3 }.to_string(),
            "PIN must be 5 digits"
        );
        assert!(LoginError::NonNumeric.is_security_event());
        assert!(!LoginError::EmptyPin.is_security_event());
    }
}
