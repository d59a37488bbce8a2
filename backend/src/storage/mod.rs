//! # Storage Module
//!
//! Holds the bank's mutable data behind repository traits so the domain
//! services never touch the containers directly.
//!
//! ## Current Implementation
//!
//! - **Memory**: seeded `Vec`s behind `RwLock`s, shared between repositories
//!   through a cloneable [`MemoryConnection`]
//!
//! Nothing survives a restart. Multi-row writes (the two legs of a transfer)
//! happen under a single write guard.

pub mod memory;
pub mod traits;

pub use memory::MemoryConnection;
pub use traits::{AccountStorage, ActivityStorage, Connection, PayeeStorage};
