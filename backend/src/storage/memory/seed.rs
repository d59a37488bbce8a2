//! Fixed demo data loaded at startup.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use shared::{account_numbers, Account, ActivityRecord, ActivityStatus, ActivityType, Payee};
use uuid::Uuid;

pub fn accounts() -> Vec<Account> {
    vec![
        Account::new(
            "Rapid Save",
            Decimal::new(5000_00, 2),
            0.3,
            "lock.fill",
            account_numbers::RAPID_SAVE,
        ),
        Account::new(
            "YouMoney",
            Decimal::new(7500_00, 2),
            0.0,
            "banknote.fill",
            account_numbers::YOU_MONEY,
        ),
    ]
}

pub fn payees() -> Vec<Payee> {
    vec![Payee::new("John Smith", account_numbers::SAMPLE_PAYEE)]
}

/// History shown before the first login, newest first
pub fn activities(now: DateTime<Utc>) -> Vec<ActivityRecord> {
    vec![
        historical(
            ActivityType::PayeeAdded,
            "New Payee Added",
            "Sample Payee",
            None,
            now - Duration::hours(6),
            None,
        ),
        historical(
            ActivityType::Transfer,
            "Transfer to Rapid Save",
            "Savings",
            Some(Decimal::new(-200_00, 2)),
            now - Duration::hours(12),
            Some(("YouMoney", "Rapid Save")),
        ),
        historical(
            ActivityType::Payment,
            "Payment to John Doe",
            "Electricity Bill",
            Some(Decimal::new(-120_50, 2)),
            now - Duration::hours(24),
            Some(("YouMoney", "John Doe")),
        ),
        historical(
            ActivityType::Login,
            "Login",
            "Successful login",
            None,
            now - Duration::hours(48),
            None,
        ),
    ]
}

fn historical(
    activity_type: ActivityType,
    title: &str,
    description: &str,
    amount: Option<Decimal>,
    date: DateTime<Utc>,
    parties: Option<(&str, &str)>,
) -> ActivityRecord {
    ActivityRecord {
        id: Uuid::new_v4(),
        activity_type,
        title: title.to_string(),
        description: description.to_string(),
        amount,
        date,
        status: ActivityStatus::Completed,
        from_account: parties.map(|(from, _)| from.to_string()),
        to_account: parties.map(|(_, to)| to.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_balances() {
        let accounts = accounts();
        assert_eq!(accounts[0].balance.to_string(), "5000.00");
        assert_eq!(accounts[1].balance.to_string(), "7500.00");
        assert_eq!(accounts[0].account_number, "02-1244-0267945-001");
    }

    #[test]
    fn test_seed_history_is_newest_first() {
        let now = Utc::now();
        let history = activities(now);
        assert!(history.windows(2).all(|pair| pair[0].date >= pair[1].date));
        assert!(history.iter().all(|record| record.date < now));
    }
}
