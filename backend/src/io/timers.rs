//! Banner dismissal deadlines.
//!
//! Each banner has at most one pending deadline. Re-arming a banner replaces
//! its deadline, so a second error shown within the window keeps the banner
//! up for the full duration again. Nothing fires on its own: the owner polls
//! [`BannerTimers::expired`] from its event loop.

use chrono::{DateTime, Duration, Utc};
use shared::Banner;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct BannerTimers {
    deadlines: HashMap<Banner, DateTime<Utc>>,
}

impl BannerTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, banner: Banner, now: DateTime<Utc>, after: Duration) {
        let deadline = now + after;
        debug!("Banner {:?} dismisses at {}", banner, deadline);
        self.deadlines.insert(banner, deadline);
    }

    /// Returns whether a timer was pending
    pub fn cancel(&mut self, banner: Banner) -> bool {
        self.deadlines.remove(&banner).is_some()
    }

    pub fn cancel_all(&mut self) {
        if !self.deadlines.is_empty() {
            debug!("Cancelling {} banner timer(s)", self.deadlines.len());
        }
        self.deadlines.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self, banner: Banner) -> bool {
        self.deadlines.contains_key(&banner)
    }

    /// Remove and return every banner whose deadline is at or before `now`
    pub fn expired(&mut self, now: DateTime<Utc>) -> Vec<Banner> {
        let mut due: Vec<Banner> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(banner, _)| *banner)
            .collect();
        for banner in &due {
            self.deadlines.remove(banner);
        }
        // stable order for callers that publish events
        due.sort_by_key(|banner| order_key(*banner));
        due
    }
}

fn order_key(banner: Banner) -> u8 {
    match banner {
        Banner::PaymentSuccess => 0,
        Banner::TransferSuccess => 1,
        Banner::Error => 2,
    }
}

impl Drop for BannerTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
