pub mod payee;
pub mod payment;
pub mod session;
