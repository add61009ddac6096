use std::path::PathBuf;

use chrono::Utc;

use crate::{spotify, types::Token};

/// Holds the OAuth token and keeps it usable.
///
/// The token lives in memory and, for tokens obtained through the auth flow,
/// in a cache file in the local data directory. The gateway reads an access
/// token through [`TokenManager::access_token`] for every call; a 401
/// response makes the gateway purge the credential via
/// [`TokenManager::invalidate`]. Tests inject a fixed token with
/// [`TokenManager::new`] and never touch the filesystem.
pub struct TokenManager {
    token: Option<Token>,
    from_cache: bool,
}

impl TokenManager {
    /// Wraps an already-obtained token. Nothing is persisted until
    /// [`TokenManager::persist`] is called.
    pub fn new(token: Token) -> Self {
        TokenManager {
            token: Some(token),
            from_cache: false,
        }
    }

    /// Loads the token persisted by a previous `trackduel auth` run.
    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(TokenManager {
            token: Some(token),
            from_cache: true,
        })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let Some(token) = &self.token else {
            return Err("no token to persist".to_string());
        };

        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns a usable access token, refreshing it first when it is about
    /// to expire. `None` means no credential is stored at all.
    pub async fn access_token(&mut self) -> Option<String> {
        if self.is_expired() {
            if let Some(token) = &self.token {
                if let Ok(new_token) = spotify::auth::refresh_token(&token.refresh_token).await {
                    self.token = Some(new_token);
                    if self.from_cache {
                        let _ = self.persist().await;
                    }
                }
            }
        }

        self.token.as_ref().map(|t| t.access_token.clone())
    }

    /// Drops the credential. Called by the gateway when the catalog answers
    /// 401; the cache file is removed too so the next run starts clean.
    pub async fn invalidate(&mut self) {
        self.token = None;
        if self.from_cache {
            let _ = async_fs::remove_file(Self::token_path()).await;
        }
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    fn is_expired(&self) -> bool {
        match &self.token {
            // refresh 240 seconds ahead of the deadline
            Some(token) => {
                let now = Utc::now().timestamp() as u64;
                now + 240 >= token.obtained_at + token.expires_in
            }
            None => false,
        }
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("trackduel/cache/token.json");
        path
    }
}
