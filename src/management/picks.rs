use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::Track;

pub const DEFAULT_PLAYLIST_NAME: &str = "My TrackDuel Playlist";
pub const DEFAULT_PLAYLIST_DESCRIPTION: &str = "Created with TrackDuel";

/// The chosen-track collection: every duel winner lands here, ordered by
/// selection time, and playlist publication drains it.
///
/// Append-only except for explicit removal or a full clear. Persisted in the
/// local data directory so `duel` and `publish` can run as separate
/// invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickManager {
    name: String,
    description: String,
    tracks: Vec<Track>,
}

impl PickManager {
    pub fn new() -> Self {
        PickManager {
            name: DEFAULT_PLAYLIST_NAME.to_string(),
            description: DEFAULT_PLAYLIST_DESCRIPTION.to_string(),
            tracks: Vec::new(),
        }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::cache_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::from_str(&content).map_err(|e| e.to_string())
    }

    /// Loads the persisted picks, falling back to an empty collection when
    /// no cache exists yet.
    pub async fn load_or_default() -> Self {
        Self::load().await.unwrap_or_else(|_| Self::new())
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Appends a track unless its identifier is already picked. Returns
    /// whether the track was added.
    pub fn add(&mut self, track: Track) -> bool {
        if self.tracks.iter().any(|t| t.id == track.id) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Removes a pick by track identifier. Returns whether anything was
    /// removed.
    pub fn remove(&mut self, track_id: &str) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != track_id);
        self.tracks.len() != before
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn set_details(&mut self, name: Option<String>, description: Option<String>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    /// Track uris in pick order, as handed to the add-tracks endpoint.
    pub fn uris(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.uri.clone()).collect()
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("trackduel/cache/picks.json");
        path
    }
}

impl Default for PickManager {
    fn default() -> Self {
        Self::new()
    }
}
