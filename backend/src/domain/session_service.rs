//! PIN login and rate limiting.
//!
//! Demo mode: any well-formed PIN of the configured length is accepted. The
//! checks run in a fixed order and every call that gets past the rate-limit
//! gate counts as an attempt, even if the PIN is then rejected as malformed.

use shared::BankConfig;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::domain::models::session::{LoginError, Session};

pub struct SessionService {
    config: BankConfig,
    clock: Arc<dyn Clock>,
    session: Session,
}

impl SessionService {
    /// Create a new SessionService, logged out with no recorded attempts
    pub fn new(config: BankConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            session: Session::new(),
        }
    }

    /// Validate a PIN and open the session
    pub fn login(&mut self, pin: &str) -> Result<(), LoginError> {
        let now = self.clock.now();

        if self.session.is_rate_limited(now, self.config.pin_attempt_window(), self.config.max_pin_attempts) {
            let attempts = self.session.attempt_count();
            warn!(
                target: "security",
                "Login blocked due to rate limiting - {} attempts in last {} seconds",
                attempts, self.config.pin_attempt_window_secs
            );
            return Err(LoginError::RateLimited { attempts });
        }

        self.session.record_attempt(now);

        if let Err(error) = self.check_pin(pin) {
            if error.is_security_event() {
                warn!(target: "security", "Rejected PIN attempt: {}", error);
            } else {
                warn!("Rejected PIN attempt: {}", error);
            }
            return Err(error);
        }

        self.session.clear_attempts();
        self.session.is_logged_in = true;
        info!("User logged in successfully (demo mode)");
        Ok(())
    }

    fn check_pin(&self, pin: &str) -> Result<(), LoginError> {
        if pin.is_empty() {
            return Err(LoginError::EmptyPin);
        }

        let length = pin.chars().count();
        if length != self.config.pin_length {
            return Err(LoginError::InvalidLength {
                expected: self.config.pin_length,
                actual: length,
            });
        }

        if !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(LoginError::NonNumeric);
        }

        Ok(())
    }

    /// Close the session. Attempt history is left alone.
    pub fn logout(&mut self) {
        self.session.is_logged_in = false;
        info!("User logged out successfully");
    }

    /// Whether the session is open
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in
    }

    /// Attempts currently recorded, without pruning
    #[cfg(test)]
    pub(crate) fn recorded_attempts(&self) -> usize {
        self.session.attempt_count()
    }
}
