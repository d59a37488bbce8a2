//! Activity log entries for every state-changing operation.
use anyhow::Result;
use rust_decimal::Decimal;
use shared::{ActivityRecord, ActivityStatus, ActivityType, Payee};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::clock::Clock;
use crate::storage::{ActivityStorage, Connection};

pub struct ActivityService<C: Connection> {
    activity_repository: C::ActivityRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> ActivityService<C> {
    /// Create a new ActivityService stamping records with `clock`
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            activity_repository: connection.create_activity_repository(),
            clock,
        }
    }

    /// Record a successful login
    pub fn track_login(&self) -> Result<ActivityRecord> {
        self.track(ActivityType::Login, "Login", "User logged in successfully".to_string(), None, None)
    }

    /// Record a logout
    pub fn track_logout(&self) -> Result<ActivityRecord> {
        self.track(ActivityType::Logout, "Logout", "User logged out".to_string(), None, None)
    }

    /// `amount` is the positive amount paid; the record stores it negated
    pub fn track_payment(&self, from_account: &str, to_payee: &str, amount: Decimal) -> Result<ActivityRecord> {
        self.track(
            ActivityType::Payment,
            "Payment",
            format!("Payment to {}", to_payee),
            Some(-amount),
            Some((from_account, to_payee)),
        )
    }

    /// `amount` is the positive amount moved; the record stores it negated
    pub fn track_transfer(&self, from_account: &str, to_account: &str, amount: Decimal) -> Result<ActivityRecord> {
        self.track(
            ActivityType::Transfer,
            "Transfer",
            format!("Transfer to {}", to_account),
            Some(-amount),
            Some((from_account, to_account)),
        )
    }

    pub fn track_payee_added(&self, payee: &Payee) -> Result<ActivityRecord> {
        self.track(
            ActivityType::PayeeAdded,
            "Payee Added",
            format!("Added {} as payee", payee.name),
            None,
            None,
        )
    }

    pub fn track_payee_updated(&self, payee: &Payee) -> Result<ActivityRecord> {
        self.track(
            ActivityType::PayeeUpdated,
            "Payee Updated",
            format!("Updated {} details", payee.name),
            None,
            None,
        )
    }

    fn track(
        &self,
        activity_type: ActivityType,
        title: &str,
        description: String,
        amount: Option<Decimal>,
        parties: Option<(&str, &str)>,
    ) -> Result<ActivityRecord> {
        let record = ActivityRecord {
            id: Uuid::new_v4(),
            activity_type,
            title: title.to_string(),
            description,
            amount,
            date: self.clock.now(),
            status: ActivityStatus::Completed,
            from_account: parties.map(|(from, _)| from.to_string()),
            to_account: parties.map(|(_, to)| to.to_string()),
        };

        self.activity_repository.record_activity(&record)?;
        debug!("Recorded {} activity {}", record.activity_type, record.id);
        Ok(record)
    }

    /// Whole log, newest first
    pub fn list_activities(&self) -> Result<Vec<ActivityRecord>> {
        self.activity_repository.list_activities(None)
    }

    /// The newest `limit` records
    pub fn recent_activities(&self, limit: usize) -> Result<Vec<ActivityRecord>> {
        self.activity_repository.list_activities(Some(limit))
    }

    /// Records naming the account as source or destination
    pub fn activities_for_account(&self, account_name: &str) -> Result<Vec<ActivityRecord>> {
        Ok(self
            .list_activities()?
            .into_iter()
            .filter(|activity| activity.involves_account(account_name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryConnection;
    use chrono::{Duration, Utc};

    fn setup_test() -> (ActivityService<MemoryConnection>, ManualClock) {
        let clock = ManualClock::new(Utc::now());
        let service = ActivityService::new(Arc::new(MemoryConnection::new()), Arc::new(clock.clone()));
        (service, clock)
    }

    #[test]
    fn test_payment_record_is_negative_and_named() {
        let (service, clock) = setup_test();

        let record = service
            .track_payment("Rapid Save", "John Smith", Decimal::new(2550, 2))
            .unwrap();

        assert_eq!(record.activity_type, ActivityType::Payment);
        assert_eq!(record.title, "Payment");
        assert_eq!(record.description, "Payment to John Smith");
        assert_eq!(record.amount, Some(Decimal::new(-2550, 2)));
        assert_eq!(record.from_account.as_deref(), Some("Rapid Save"));
        assert_eq!(record.to_account.as_deref(), Some("John Smith"));
        assert_eq!(record.date, clock.now());
        assert_eq!(record.status, ActivityStatus::Completed);
    }

    #[test]
    fn test_log_is_newest_first_with_non_decreasing_dates() {
        let (service, clock) = setup_test();

        service.track_login().unwrap();
        clock.advance(Duration::seconds(5));
        service.track_transfer("Rapid Save", "YouMoney", Decimal::ONE).unwrap();
        service.track_logout().unwrap();

        let log = service.list_activities().unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].activity_type, ActivityType::Logout);
        assert_eq!(log[2].activity_type, ActivityType::Login);
        assert!(log.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }

    #[test]
    fn test_activities_for_account() {
        let (service, _) = setup_test();
        service.track_transfer("YouMoney", "Rapid Save", Decimal::new(10, 0)).unwrap();
        service.track_payment("Rapid Save", "John Smith", Decimal::ONE).unwrap();
        service.track_payee_added(&Payee::new("Jo", "12345678")).unwrap();

        assert_eq!(service.activities_for_account("Rapid Save").unwrap().len(), 2);
        assert_eq!(service.activities_for_account("YouMoney").unwrap().len(), 1);
        assert_eq!(service.activities_for_account("Jo").unwrap().len(), 0);
        assert_eq!(service.recent_activities(1).unwrap()[0].activity_type, ActivityType::PayeeAdded);
        assert_eq!(service.list_activities().unwrap().len(), 3);
    }

    #[test]
    fn test_payee_descriptions() {
        let (service, _) = setup_test();
        let payee = Payee::new("Jo", "12345678");

        assert_eq!(service.track_payee_added(&payee).unwrap().description, "Added Jo as payee");
        assert_eq!(service.track_payee_updated(&payee).unwrap().description, "Updated Jo details");
    }
}
