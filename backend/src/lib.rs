//! # SampleBank Backend
//!
//! Session and ledger state for the SampleBank demo app. Everything lives in
//! memory: accounts, payees, the in-progress payment draft, the activity log
//! and the login session.
//!
//! ## Architecture
//!
//! ```text
//! Presentation (console driver, any UI)
//!     ↓ operations            ↑ StateChange events
//! BankAppState (app_state)
//!     ↓
//! Domain Layer (session, payment, payee, activity services, currency)
//!     ↓
//! Storage Layer (in-memory repositories behind storage traits)
//! ```
//!
//! Views read through the accessor methods on [`BankAppState`] and never
//! mutate state directly. Every mutating operation publishes the changes it
//! made on the [`io::EventBus`].

pub mod app_state;
pub mod clock;
pub mod domain;
pub mod io;
pub mod storage;

pub use app_state::BankAppState;
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::CurrencyFormatter;
pub use storage::MemoryConnection;
