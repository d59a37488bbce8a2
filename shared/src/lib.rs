use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account numbers used by the seeded demo data
pub mod account_numbers {
    pub const RAPID_SAVE: &str = "02-1244-0267945-001";
    pub const YOU_MONEY: &str = "02-1244-0267945-000";
    pub const SAMPLE_PAYEE: &str = "02-1234-5678901-002";
}

/// One of the customer's own accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// Current balance in the configured currency
    pub balance: Decimal,
    /// Display progress ratio, always within 0.0..=1.0
    pub progress: f64,
    /// Icon reference understood by the presentation layer
    pub icon: String,
    pub account_number: String,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        balance: Decimal,
        progress: f64,
        icon: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            balance,
            progress: progress.clamp(0.0, 1.0),
            icon: icon.into(),
            account_number: account_number.into(),
        }
    }

    /// Copy of this account carrying a different balance
    pub fn with_balance(&self, balance: Decimal) -> Self {
        Self {
            balance,
            ..self.clone()
        }
    }
}

/// Someone the customer can pay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payee {
    pub id: Uuid,
    pub name: String,
    pub account_number: String,
    /// Two uppercase characters shown in the payee avatar
    pub initials: String,
}

impl Payee {
    pub fn new(name: impl Into<String>, account_number: impl Into<String>) -> Self {
        let name = name.into();
        let initials = Self::derive_initials(&name);
        Self {
            id: Uuid::new_v4(),
            name,
            account_number: account_number.into(),
            initials,
        }
    }

    /// Uppercase of the first two characters of the name
    pub fn derive_initials(name: &str) -> String {
        name.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// Kind of event captured in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Payment,
    Transfer,
    PayeeAdded,
    PayeeUpdated,
    Login,
    Logout,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityType::Payment => "payment",
            ActivityType::Transfer => "transfer",
            ActivityType::PayeeAdded => "payee-added",
            ActivityType::PayeeUpdated => "payee-updated",
            ActivityType::Login => "login",
            ActivityType::Logout => "logout",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Completed,
    Pending,
    Failed,
}

/// Immutable entry in the activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    pub description: String,
    /// Signed amount from the perspective of the source account
    pub amount: Option<Decimal>,
    pub date: DateTime<Utc>,
    pub status: ActivityStatus,
    /// Account name, not id; the record outlives renames
    pub from_account: Option<String>,
    pub to_account: Option<String>,
}

impl ActivityRecord {
    /// Whether the record names the account as its source or destination
    pub fn involves_account(&self, account_name: &str) -> bool {
        self.from_account.as_deref() == Some(account_name)
            || self.to_account.as_deref() == Some(account_name)
    }
}

/// Free-text statement fields attached to a payment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementDetails {
    pub their_particulars: String,
    pub their_code: String,
    pub their_reference: String,
    pub your_particulars: String,
    pub your_code: String,
    pub your_reference: String,
}

/// In-progress payment or transfer form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub from_account: Option<Uuid>,
    /// Destination for payments
    pub to_payee: Option<Uuid>,
    /// Destination for transfers between own accounts
    pub to_account: Option<Uuid>,
    /// Amount exactly as typed by the user
    pub amount: String,
    pub date: DateTime<Utc>,
    pub frequency: String,
    pub statement_details: StatementDetails,
}

impl PaymentDraft {
    pub const DEFAULT_FREQUENCY: &'static str = "One-off";

    /// Empty draft dated at `date`
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            from_account: None,
            to_payee: None,
            to_account: None,
            amount: String::new(),
            date,
            frequency: Self::DEFAULT_FREQUENCY.to_string(),
            statement_details: StatementDetails::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from_account.is_none()
            && self.to_payee.is_none()
            && self.to_account.is_none()
            && self.amount.is_empty()
    }
}

impl Default for PaymentDraft {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

/// Transient notifications with timed dismissal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Banner {
    PaymentSuccess,
    TransferSuccess,
    Error,
}

/// Result of validating a new payee form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayeeValidation {
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl PayeeValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }
}

/// Description of a change made by a state operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StateChange {
    LoggedIn,
    LoggedOut,
    LoginRejected { reason: String },
    AccountsUpdated { account_ids: Vec<Uuid> },
    PayeeAdded { payee_id: Uuid },
    PayeeUpdated { payee_id: Uuid },
    ActivityRecorded { activity_id: Uuid },
    DraftReset,
    ErrorRaised { message: String },
    BannerShown { banner: Banner },
    BannerDismissed { banner: Banner },
    MenuToggled { open: bool },
}

/// Read-only copy of everything a view may render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankSnapshot {
    pub is_logged_in: bool,
    pub accounts: Vec<Account>,
    pub payees: Vec<Payee>,
    pub activities: Vec<ActivityRecord>,
    pub current_payment: PaymentDraft,
    pub error_message: Option<String>,
    pub show_error_banner: bool,
    pub show_success_banner: bool,
    pub show_transfer_success_banner: bool,
    pub show_menu: bool,
}

/// Process-wide constants for the demo bank
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankConfig {
    pub pin_length: usize,
    pub max_pin_attempts: usize,
    pub pin_attempt_window_secs: i64,
    /// Defined for parity with the mobile app; no auto-logout reads it
    pub session_timeout_secs: i64,
    pub min_payment_amount: Decimal,
    pub max_payment_amount: Decimal,
    pub min_payee_name_length: usize,
    pub min_account_number_length: usize,
    pub success_banner_dismiss_ms: i64,
    pub error_banner_dismiss_ms: i64,
    pub currency_code: String,
    pub currency_symbol: String,
}

impl BankConfig {
    pub fn pin_attempt_window(&self) -> Duration {
        Duration::seconds(self.pin_attempt_window_secs)
    }

    /// How long a banner stays up before it is dismissed
    pub fn banner_duration(&self, banner: Banner) -> Duration {
        match banner {
            Banner::PaymentSuccess | Banner::TransferSuccess => {
                Duration::milliseconds(self.success_banner_dismiss_ms)
            }
            Banner::Error => Duration::milliseconds(self.error_banner_dismiss_ms),
        }
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            pin_length: 5,
            max_pin_attempts: 5,
            pin_attempt_window_secs: 300,
            session_timeout_secs: 1800,
            min_payment_amount: Decimal::new(1, 2),
            max_payment_amount: Decimal::new(100_000_00, 2),
            min_payee_name_length: 2,
            min_account_number_length: 8,
            success_banner_dismiss_ms: 2000,
            error_banner_dismiss_ms: 3000,
            currency_code: "NZD".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}
