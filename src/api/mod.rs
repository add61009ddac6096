//! # API Module
//!
//! HTTP endpoints for the short-lived local server that backs the OAuth
//! flow. Only two routes exist: the PKCE [`callback`] that exchanges the
//! authorization code for a token, and a [`health`] probe. Built on axum;
//! the server itself lives in [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
