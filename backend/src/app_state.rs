//! # Session and Ledger State
//!
//! [`BankAppState`] is the single owner of everything a view renders: the
//! login session, the in-progress payment draft, banner flags and the error
//! message. Accounts, payees and the activity log live in storage and are
//! read through the services on every access, so callers never hold a stale
//! balance.
//!
//! Operations keep the flat surface views expect (a `bool` result plus
//! `error_message` and banner flags) and additionally publish a
//! [`StateChange`] for every piece of state they touch.

use rust_decimal::Decimal;
use shared::{
    Account, ActivityRecord, Banner, BankConfig, BankSnapshot, Payee, PayeeValidation, PaymentDraft,
    StateChange,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::domain::{ActivityService, CurrencyFormatter, PayeeService, PaymentService, SessionService};
use crate::io::{BannerTimers, EventBus};
use crate::storage::{AccountStorage, Connection, MemoryConnection};

/// Side menu entries with their icon names, in display order
pub const MENU_ITEMS: &[(&str, &str)] = &[
    ("Home", "house.fill"),
    ("Transfer money", "arrow.triangle.2.circlepath"),
    ("Make a payment", "dollarsign.circle"),
    ("Pay IRD", "person.circle"),
    ("International", "globe"),
    ("Top up prepay mobile", "iphone"),
    ("Upcoming payments", "calendar"),
    ("Payees", "person.2"),
    ("Cards", "creditcard"),
    ("Documents", "doc.text"),
    ("Apply now", "plus"),
    ("Settings", "gear"),
    ("Contact", "bubble.left"),
    ("Locator", "location"),
    ("Logout", "rectangle.portrait.and.arrow.right"),
];

pub struct BankAppState<C: Connection = MemoryConnection> {
    config: BankConfig,
    clock: Arc<dyn Clock>,
    account_repository: C::AccountRepository,
    session_service: SessionService,
    payment_service: PaymentService<C>,
    payee_service: PayeeService<C>,
    activity_service: ActivityService<C>,
    currency: CurrencyFormatter,
    events: EventBus,
    timers: BannerTimers,
    current_payment: PaymentDraft,
    error_message: Option<String>,
    show_error_banner: bool,
    show_success_banner: bool,
    show_transfer_success_banner: bool,
    show_menu: bool,
}

impl BankAppState<MemoryConnection> {
    /// Seeded demo state on the wall clock
    pub fn new() -> Self {
        Self::with_config(BankConfig::default(), Arc::new(SystemClock))
    }

    /// Seeded demo state with custom constants and time source
    pub fn with_config(config: BankConfig, clock: Arc<dyn Clock>) -> Self {
        let connection = Arc::new(MemoryConnection::seeded(clock.now()));
        Self::from_connection(connection, config, clock)
    }
}

impl Default for BankAppState<MemoryConnection> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connection> BankAppState<C> {
    /// Build the state over an existing store, defaulting the draft source
    /// to the first account
    pub fn from_connection(connection: Arc<C>, config: BankConfig, clock: Arc<dyn Clock>) -> Self {
        let mut state = Self {
            account_repository: connection.create_account_repository(),
            session_service: SessionService::new(config.clone(), clock.clone()),
            payment_service: PaymentService::new(connection.clone()),
            payee_service: PayeeService::new(connection.clone(), &config),
            activity_service: ActivityService::new(connection, clock.clone()),
            currency: CurrencyFormatter::with_config(&config),
            events: EventBus::default(),
            timers: BannerTimers::new(),
            current_payment: PaymentDraft::new(clock.now()),
            error_message: None,
            show_error_banner: false,
            show_success_banner: false,
            show_transfer_success_banner: false,
            show_menu: false,
            config,
            clock,
        };
        state.current_payment.from_account = state.first_account_id();
        state
    }

    // ---- operations ----

    /// Attempt a PIN login. Failures leave accounts and the draft untouched
    /// and never raise the error banner.
    pub fn login(&mut self, pin: &str) -> bool {
        if let Err(e) = self.session_service.login(pin) {
            self.events.publish(StateChange::LoginRejected { reason: e.to_string() });
            return false;
        }

        self.current_payment.from_account = self.first_account_id();
        match self.activity_service.track_login() {
            Ok(record) => self.publish_activity(&record),
            Err(e) => error!("Failed to record login activity: {}", e),
        }
        self.events.publish(StateChange::LoggedIn);
        true
    }

    /// End the session and clear everything sensitive. Runs in full even
    /// when nobody is logged in.
    pub fn logout(&mut self) {
        match self.activity_service.track_logout() {
            Ok(record) => self.publish_activity(&record),
            Err(e) => error!("Failed to record logout activity: {}", e),
        }

        self.session_service.logout();
        if self.show_menu {
            self.show_menu = false;
            self.events.publish(StateChange::MenuToggled { open: false });
        }

        self.current_payment = PaymentDraft::new(self.clock.now());
        self.events.publish(StateChange::DraftReset);

        self.timers.cancel_all();
        self.dismiss_banner(Banner::PaymentSuccess);
        self.dismiss_banner(Banner::TransferSuccess);
        self.dismiss_banner(Banner::Error);
        self.error_message = None;

        self.events.publish(StateChange::LoggedOut);
    }

    /// Pay the current draft's payee
    pub fn make_payment(&mut self) -> bool {
        let receipt = match self.payment_service.make_payment(&self.current_payment) {
            Ok(receipt) => receipt,
            Err(e) => {
                self.raise_error(e.to_string());
                return false;
            }
        };

        self.events.publish(StateChange::AccountsUpdated {
            account_ids: vec![receipt.from_account.id],
        });
        match self
            .activity_service
            .track_payment(&receipt.from_account.name, &receipt.payee.name, receipt.amount)
        {
            Ok(record) => self.publish_activity(&record),
            Err(e) => error!("Failed to record payment activity: {}", e),
        }

        self.show_banner(Banner::PaymentSuccess);
        self.reset_draft();
        true
    }

    /// Move money between the current draft's two accounts
    pub fn transfer_money(&mut self) -> bool {
        let receipt = match self.payment_service.transfer_money(&self.current_payment) {
            Ok(receipt) => receipt,
            Err(e) => {
                self.raise_error(e.to_string());
                return false;
            }
        };

        self.events.publish(StateChange::AccountsUpdated {
            account_ids: vec![receipt.from_account.id, receipt.to_account.id],
        });
        match self
            .activity_service
            .track_transfer(&receipt.from_account.name, &receipt.to_account.name, receipt.amount)
        {
            Ok(record) => self.publish_activity(&record),
            Err(e) => error!("Failed to record transfer activity: {}", e),
        }

        self.show_banner(Banner::TransferSuccess);
        self.reset_draft();
        true
    }

    /// Check a new payee form without storing anything
    pub fn validate_new_payee(&self, name: &str, account_number: &str) -> PayeeValidation {
        match self.payee_service.validate_new_payee(name, account_number) {
            Ok(()) => PayeeValidation::valid(),
            Err(e) => PayeeValidation::invalid(e.to_string()),
        }
    }

    /// Store a payee from trimmed input without validating it again
    pub fn add_new_payee(&mut self, name: &str, account_number: &str) -> anyhow::Result<Payee> {
        let payee = self.payee_service.add_new_payee(name, account_number)?;
        self.events.publish(StateChange::PayeeAdded { payee_id: payee.id });
        match self.activity_service.track_payee_added(&payee) {
            Ok(record) => self.publish_activity(&record),
            Err(e) => error!("Failed to record payee activity: {}", e),
        }
        Ok(payee)
    }

    /// Replace the payee with the same id. Unknown ids change nothing and
    /// return false.
    pub fn update_payee(&mut self, payee: &Payee) -> bool {
        let updated = match self.payee_service.update_payee(payee) {
            Ok(Some(updated)) => updated,
            Ok(None) => return false,
            Err(e) => {
                error!("Failed to update payee {}: {}", payee.id, e);
                return false;
            }
        };

        self.events.publish(StateChange::PayeeUpdated { payee_id: updated.id });
        match self.activity_service.track_payee_updated(&updated) {
            Ok(record) => self.publish_activity(&record),
            Err(e) => error!("Failed to record payee activity: {}", e),
        }
        true
    }

    /// Fill the draft for a payment to `payee_id`
    pub fn prepare_payment(&mut self, payee_id: Uuid, amount: impl Into<String>) {
        self.current_payment.to_payee = Some(payee_id);
        self.current_payment.to_account = None;
        self.current_payment.amount = amount.into();
        if self.current_payment.from_account.is_none() {
            self.current_payment.from_account = self.first_account_id();
        }
    }

    /// Fill the draft for a transfer between two own accounts
    pub fn prepare_transfer(&mut self, from_account: Uuid, to_account: Uuid, amount: impl Into<String>) {
        self.current_payment.from_account = Some(from_account);
        self.current_payment.to_account = Some(to_account);
        self.current_payment.to_payee = None;
        self.current_payment.amount = amount.into();
    }

    /// Open or close the side menu
    pub fn toggle_menu(&mut self) {
        self.show_menu = !self.show_menu;
        self.events.publish(StateChange::MenuToggled { open: self.show_menu });
    }

    /// Dismiss every banner whose timer has run out. Returns the banners
    /// that were dismissed.
    pub fn tick(&mut self) -> Vec<Banner> {
        let expired = self.timers.expired(self.clock.now());
        for banner in &expired {
            self.dismiss_banner(*banner);
        }
        expired
    }

    /// Drop pending banner timers. Banners stay up until dismissed another way.
    pub fn cancel_timers(&mut self) {
        self.timers.cancel_all();
    }

    // ---- accessors ----

    /// All accounts with current balances, in display order
    pub fn accounts(&self) -> Vec<Account> {
        self.account_repository.list_accounts().unwrap_or_else(|e| {
            error!("Failed to list accounts: {}", e);
            Vec::new()
        })
    }

    /// All saved payees, oldest first
    pub fn payees(&self) -> Vec<Payee> {
        self.payee_service.list_payees().unwrap_or_else(|e| {
            error!("Failed to list payees: {}", e);
            Vec::new()
        })
    }

    /// Payees offered as one-tap shortcuts on the home screen
    pub fn quick_payees(&self) -> Vec<Payee> {
        self.payees()
    }

    /// Activity log, newest first
    pub fn activities(&self) -> Vec<ActivityRecord> {
        self.activity_service.list_activities().unwrap_or_else(|e| {
            error!("Failed to list activities: {}", e);
            Vec::new()
        })
    }

    /// The `limit` newest activity records, as listed on the home screen
    pub fn recent_activities(&self, limit: usize) -> Vec<ActivityRecord> {
        self.activity_service.recent_activities(limit).unwrap_or_else(|e| {
            error!("Failed to list recent activities: {}", e);
            Vec::new()
        })
    }

    /// Records whose source or destination is the named account
    pub fn activities_for_account(&self, account_name: &str) -> Vec<ActivityRecord> {
        self.activity_service
            .activities_for_account(account_name)
            .unwrap_or_else(|e| {
                error!("Failed to list activities for {}: {}", account_name, e);
                Vec::new()
            })
    }

    /// Whether a PIN login has succeeded since the last logout
    pub fn is_logged_in(&self) -> bool {
        self.session_service.is_logged_in()
    }

    /// The in-progress payment or transfer form
    pub fn current_payment(&self) -> &PaymentDraft {
        &self.current_payment
    }

    /// Mutable access for form fields bound by a view
    pub fn current_payment_mut(&mut self) -> &mut PaymentDraft {
        &mut self.current_payment
    }

    /// Message from the last rejected payment or transfer
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Whether the error banner is up
    pub fn show_error_banner(&self) -> bool {
        self.show_error_banner
    }

    /// Whether the payment success banner is up
    pub fn show_success_banner(&self) -> bool {
        self.show_success_banner
    }

    /// Whether the transfer success banner is up
    pub fn show_transfer_success_banner(&self) -> bool {
        self.show_transfer_success_banner
    }

    /// Whether the side menu is open
    pub fn show_menu(&self) -> bool {
        self.show_menu
    }

    /// Constants this state was built with
    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Formatter configured for the bank's currency
    pub fn currency(&self) -> &CurrencyFormatter {
        &self.currency
    }

    /// Total across all accounts
    pub fn total_balance(&self) -> Decimal {
        self.accounts().iter().map(|a| a.balance).sum()
    }

    /// Receiver for every state change published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.events.subscribe()
    }

    /// Serializable copy of everything a view renders
    pub fn snapshot(&self) -> BankSnapshot {
        BankSnapshot {
            is_logged_in: self.is_logged_in(),
            accounts: self.accounts(),
            payees: self.payees(),
            activities: self.activities(),
            current_payment: self.current_payment.clone(),
            error_message: self.error_message.clone(),
            show_error_banner: self.show_error_banner,
            show_success_banner: self.show_success_banner,
            show_transfer_success_banner: self.show_transfer_success_banner,
            show_menu: self.show_menu,
        }
    }

    // ---- internals ----

    fn first_account_id(&self) -> Option<Uuid> {
        match self.account_repository.first_account() {
            Ok(account) => account.map(|a| a.id),
            Err(e) => {
                error!("Failed to read first account: {}", e);
                None
            }
        }
    }

    fn reset_draft(&mut self) {
        let mut draft = PaymentDraft::new(self.clock.now());
        draft.from_account = self.first_account_id();
        self.current_payment = draft;
        self.events.publish(StateChange::DraftReset);
    }

    fn raise_error(&mut self, message: String) {
        warn!("Operation rejected: {}", message);
        self.error_message = Some(message.clone());
        self.show_banner(Banner::Error);
        self.events.publish(StateChange::ErrorRaised { message });
    }

    fn show_banner(&mut self, banner: Banner) {
        *self.banner_flag(banner) = true;
        self.timers
            .arm(banner, self.clock.now(), self.config.banner_duration(banner));
        self.events.publish(StateChange::BannerShown { banner });
    }

    fn dismiss_banner(&mut self, banner: Banner) {
        self.timers.cancel(banner);
        let flag = self.banner_flag(banner);
        if !*flag {
            return;
        }
        *flag = false;
        info!("Dismissed {:?} banner", banner);
        self.events.publish(StateChange::BannerDismissed { banner });
    }

    fn banner_flag(&mut self, banner: Banner) -> &mut bool {
        match banner {
            Banner::PaymentSuccess => &mut self.show_success_banner,
            Banner::TransferSuccess => &mut self.show_transfer_success_banner,
            Banner::Error => &mut self.show_error_banner,
        }
    }

    fn publish_activity(&self, record: &ActivityRecord) {
        self.events.publish(StateChange::ActivityRecorded { activity_id: record.id });
    }
}
