//! # Management Module
//!
//! Stateful building blocks between the CLI and the catalog gateway:
//!
//! - [`TokenManager`] - credential storage with refresh and purge-on-401
//! - [`SessionLedger`] - session-scoped set of already-shown track ids
//! - [`PickManager`] - the chosen-track collection fed by duels and drained
//!   by playlist publication
//! - [`ComparisonQueue`] - state machine owning the current comparison pair
//!   and its replenishment

mod auth;
mod ledger;
mod picks;
mod queue;

pub use auth::TokenManager;
pub use ledger::SessionLedger;
pub use picks::DEFAULT_PLAYLIST_DESCRIPTION;
pub use picks::DEFAULT_PLAYLIST_NAME;
pub use picks::PickManager;
pub use queue::MAX_SAMPLE_ATTEMPTS;
pub use queue::OVER_FETCH_FACTOR;
pub use queue::PAIR_SIZE;
pub use queue::REPLENISH_THRESHOLD;
pub use queue::ComparisonQueue;
pub use queue::QueueFailure;
pub use queue::QueueState;
