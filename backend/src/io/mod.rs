//! # IO Module
//!
//! Outbound notifications and timed side effects. Nothing here touches the
//! ledger; the state manager decides what to publish and when to arm a timer.
//!
//! - **events**: broadcast bus carrying [`shared::StateChange`] values
//! - **timers**: cancellable banner dismissal deadlines

pub mod events;
pub mod timers;

pub use events::EventBus;
pub use timers::BannerTimers;
