use anyhow::Result;
use shared::ActivityRecord;
use std::sync::{Arc, RwLock};

use super::connection::{read, write};
use crate::storage::traits::ActivityStorage;

/// Activity log, kept newest first
#[derive(Clone)]
pub struct ActivityRepository {
    activities: Arc<RwLock<Vec<ActivityRecord>>>,
}

impl ActivityRepository {
    pub fn new(activities: Arc<RwLock<Vec<ActivityRecord>>>) -> Self {
        Self { activities }
    }
}

impl ActivityStorage for ActivityRepository {
    fn record_activity(&self, activity: &ActivityRecord) -> Result<()> {
        write(&self.activities, "activity")?.insert(0, activity.clone());
        Ok(())
    }

    fn list_activities(&self, limit: Option<usize>) -> Result<Vec<ActivityRecord>> {
        let activities = read(&self.activities, "activity")?;
        let take = limit.unwrap_or(activities.len());
        Ok(activities.iter().take(take).cloned().collect())
    }
}
