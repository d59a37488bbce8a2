//! # Memory Storage Module
//!
//! In-memory repositories seeded with the demo bank's fixed data. All
//! repositories created from one [`MemoryConnection`] see the same state.

pub mod account_repository;
pub mod activity_repository;
pub mod connection;
pub mod payee_repository;
pub mod seed;

pub use account_repository::AccountRepository;
pub use activity_repository::ActivityRepository;
pub use connection::MemoryConnection;
pub use payee_repository::PayeeRepository;
