//! # CLI Module
//!
//! User-facing commands for TrackDuel. Each command coordinates between the
//! catalog gateway, the management layer and terminal rendering:
//!
//! - [`auth`] - Spotify OAuth 2.0 PKCE flow, persists the token
//! - [`duel`] - the interactive comparison loop: render a pair, take a vote,
//!   record the winner, replenish
//! - [`picks`] - list or edit the chosen-track collection
//! - [`publish`] - create a playlist from the picks and add every winner
//!
//! ## Error surface
//!
//! Credential problems direct the user back to `trackduel auth`; sampling
//! failures offer a retry; publish failures print the raw catalog error and
//! leave the picks cached so the publish can be re-attempted without
//! re-entering the playlist name.

mod auth;
mod duel;
mod picks;
mod publish;

pub use auth::auth;
pub use duel::duel;
pub use picks::picks;
pub use publish::publish;
