use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Profile of the authenticated user, used as the credential probe and to
/// resolve the owner of newly created playlists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    pub release_date: String,
}

/// Artist entry as it appears inside a track. The catalog never delivers
/// genres here; the sampling engine fills them in from the batch artist
/// lookup, so `genres` defaults to empty on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// A playlist track, optionally enriched with aggregated genre data.
///
/// `genres` is derived: the first-seen-order deduplicated union of all the
/// track's artists' genre tags. It is absent from raw catalog responses and
/// populated only by the sampling engine; after enrichment it is always
/// present, possibly empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    pub explicit: bool,
    pub popularity: u8,
    pub album: Album,
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Full artist object from the artist-lookup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub id: String,
    pub name: String,
    pub tracks: PlaylistTrackSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackSummary {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistTrackItem>,
}

/// One entry of a playlist track page. `track` is nullable on the wire
/// (removed or local tracks); such entries are dropped by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<Track>,
}

/// Response of the batch artist lookup. Unknown ids come back as `null`
/// entries, which callers skip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralArtistsResponse {
    pub artists: Vec<Option<Artist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub option: String,
    pub name: String,
    pub artists: String,
    pub album: String,
    pub genres: String,
    pub length: String,
    pub popularity: u8,
}

#[derive(Tabled)]
pub struct PickTableRow {
    pub position: usize,
    pub name: String,
    pub artists: String,
    pub id: String,
}
