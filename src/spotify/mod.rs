//! # Spotify Gateway Module
//!
//! Remote catalog gateway: wraps authenticated HTTP calls to the Spotify Web
//! API and maps transport-level failures onto the typed [`CatalogError`].
//! Everything above this layer (sampler, comparison queue, CLI) talks to the
//! catalog exclusively through [`CatalogClient`] and the per-endpoint
//! functions in the submodules.
//!
//! ## Submodules
//!
//! - [`artists`] - single and batched artist lookup (genre source)
//! - [`auth`] - OAuth 2.0 PKCE flow against the accounts service
//! - [`playlists`] - playlist metadata, track pages, creation, track addition
//! - [`user`] - the `/me` probe used for credential validation and playlist
//!   ownership
//!
//! ## Credential handling
//!
//! The client carries a shared [`TokenManager`] instead of reading ambient
//! storage; callers construct it with whatever credential source fits
//! (cached token in production, a fixed token in tests). A missing token is a
//! precondition failure surfaced before any request goes out. A `401`
//! response purges the stored credential and surfaces as
//! [`CatalogError::CredentialExpired`]; redirecting the user back into the
//! auth flow is the caller's job, the gateway never does it.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{config, management::TokenManager};

pub mod artists;
pub mod auth;
pub mod playlists;
pub mod user;

/// Failures surfaced by the catalog gateway and the layers built on it.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No access token is available; requests are refused before any HTTP
    /// call is made.
    #[error("no access token available; run `trackduel auth` first")]
    MissingCredential,

    /// The catalog answered 401. The stored credential has been purged and
    /// the user must re-authenticate.
    #[error("the catalog rejected the stored access token; run `trackduel auth` again")]
    CredentialExpired,

    /// Any other non-success HTTP status, passed through verbatim.
    #[error("catalog request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// The source playlist reports zero tracks.
    #[error("the source playlist has no tracks")]
    EmptyCatalog,

    /// Successive sampling attempts all came back without usable tracks.
    #[error("no new tracks available after {attempts} sampling attempts")]
    NoNewTracksAvailable { attempts: u32 },

    #[error("failed to create playlist: {0}")]
    PlaylistCreationFailed(String),

    #[error("failed to add tracks to playlist: {0}")]
    AddTracksFailed(String),

    /// Network or protocol error below the HTTP status level.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// A spawned page-fetch task could not be joined.
    #[error("task join error: {0}")]
    Join(String),
}

/// Authenticated HTTP client for the catalog.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection
/// pool and the credential store is behind an `Arc`. Concurrent page fetches
/// clone the client into spawned tasks.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    credentials: Arc<Mutex<TokenManager>>,
}

impl CatalogClient {
    /// Creates a client against `base_url` with an injected credential
    /// source.
    pub fn new(base_url: impl Into<String>, credentials: Arc<Mutex<TokenManager>>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        CatalogClient {
            http: Client::new(),
            base_url,
            credentials,
        }
    }

    /// Creates a client from the configured API base URL and the token
    /// persisted by a previous `trackduel auth` run.
    pub async fn from_cache() -> Result<Self, CatalogError> {
        let manager = TokenManager::load()
            .await
            .map_err(|_| CatalogError::MissingCredential)?;
        Ok(Self::new(
            config::spotify_apiurl(),
            Arc::new(Mutex::new(manager)),
        ))
    }

    /// Shared handle to the credential store, mainly so callers can inspect
    /// or replace the token.
    pub fn credentials(&self) -> Arc<Mutex<TokenManager>> {
        Arc::clone(&self.credentials)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let token = self.bearer().await?;
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let response = self.check(response).await?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.bearer().await?;
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn bearer(&self) -> Result<String, CatalogError> {
        let mut credentials = self.credentials.lock().await;
        credentials
            .access_token()
            .await
            .ok_or(CatalogError::MissingCredential)
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // the stored credential is no longer usable anywhere
            self.credentials.lock().await.invalidate().await;
            return Err(CatalogError::CredentialExpired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
