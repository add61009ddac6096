#![allow(dead_code)]

//! In-process fake of the catalog API for gateway, sampler and queue tests.
//!
//! Serves the endpoints the gateway talks to from an in-memory playlist,
//! records every request it sees, and can be told to answer 401 everywhere
//! or to fail the add-tracks endpoint from a given call onward.

use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use trackduel::{management::TokenManager, spotify::CatalogClient, types::Token};

pub type SharedCatalog = Arc<Mutex<FakeCatalog>>;

pub struct FakeCatalog {
    /// Playlist tracks in playlist order, as raw wire objects.
    pub tracks: Vec<Value>,
    /// Known artists: id -> genre tags. Unknown ids come back as nulls.
    pub artists: HashMap<String, Vec<String>>,
    /// Answer 401 on every endpoint.
    pub unauthorized: bool,
    /// Answer 500 on the batch artist lookup.
    pub fail_artists: bool,
    /// 1-based add-tracks call number from which the endpoint answers 500.
    pub fail_add_calls_from: Option<usize>,

    // request recordings
    pub me_calls: usize,
    pub page_offsets: Vec<u64>,
    pub artist_batches: Vec<Vec<String>>,
    pub add_batches: Vec<Vec<String>>,
    pub created_playlists: Vec<(String, String)>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        FakeCatalog {
            tracks: Vec::new(),
            artists: HashMap::new(),
            unauthorized: false,
            fail_artists: false,
            fail_add_calls_from: None,
            me_calls: 0,
            page_offsets: Vec::new(),
            artist_batches: Vec::new(),
            add_batches: Vec::new(),
            created_playlists: Vec::new(),
        }
    }

    pub fn with_tracks(tracks: Vec<Value>) -> Self {
        let mut catalog = Self::new();
        catalog.tracks = tracks;
        catalog
    }

    pub fn add_artist(&mut self, artist_id: &str, genres: &[&str]) {
        self.artists.insert(
            artist_id.to_string(),
            genres.iter().map(|g| g.to_string()).collect(),
        );
    }

    pub fn shared(self) -> SharedCatalog {
        Arc::new(Mutex::new(self))
    }
}

/// Builds a wire-format track object for the fake playlist.
pub fn track_json(id: &str, artist_ids: &[&str]) -> Value {
    json!({
        "id": id,
        "name": format!("Track {}", id),
        "uri": format!("spotify:track:{}", id),
        "duration_ms": 200_000,
        "explicit": false,
        "popularity": 50,
        "album": {
            "id": format!("album-{}", id),
            "name": format!("Album {}", id),
            "images": [],
            "release_date": "2020-01-01"
        },
        "artists": artist_ids
            .iter()
            .map(|a| json!({"id": a, "name": format!("Artist {}", a)}))
            .collect::<Vec<_>>()
    })
}

/// A token that is valid for the whole test run.
pub fn test_token() -> Token {
    Token {
        access_token: "test-access".to_string(),
        refresh_token: "test-refresh".to_string(),
        scope: "playlist-modify-private".to_string(),
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

/// Gateway client against the fake plus a handle to its credential store.
pub fn client_for(base_url: &str) -> (CatalogClient, Arc<Mutex<TokenManager>>) {
    let credentials = Arc::new(Mutex::new(TokenManager::new(test_token())));
    let client = CatalogClient::new(base_url, Arc::clone(&credentials));
    (client, credentials)
}

/// Binds the fake on an ephemeral port and returns its base url.
pub async fn spawn_catalog(state: SharedCatalog) -> String {
    let app = Router::new()
        .route("/me", get(me))
        .route("/playlists/{id}", get(playlist_meta))
        .route(
            "/playlists/{id}/tracks",
            get(playlist_tracks).post(add_tracks),
        )
        .route("/artists", get(several_artists))
        .route("/users/{id}/playlists", post(create_playlist))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn denied() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "The access token expired"})),
    )
}

async fn me(State(state): State<SharedCatalog>) -> (StatusCode, Json<Value>) {
    let mut catalog = state.lock().await;
    catalog.me_calls += 1;
    if catalog.unauthorized {
        return denied();
    }
    (
        StatusCode::OK,
        Json(json!({"id": "duelist", "display_name": "Duelist"})),
    )
}

async fn playlist_meta(
    State(state): State<SharedCatalog>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let catalog = state.lock().await;
    if catalog.unauthorized {
        return denied();
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": id,
            "name": "Source Playlist",
            "tracks": {"total": catalog.tracks.len()}
        })),
    )
}

async fn playlist_tracks(
    State(state): State<SharedCatalog>,
    Path(_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let mut catalog = state.lock().await;
    if catalog.unauthorized {
        return denied();
    }

    let offset: usize = params
        .get("offset")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let limit: usize = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(50);
    catalog.page_offsets.push(offset as u64);

    let items: Vec<Value> = catalog
        .tracks
        .iter()
        .skip(offset)
        .take(limit)
        .map(|track| json!({"track": track}))
        .collect();

    (StatusCode::OK, Json(json!({"items": items})))
}

async fn several_artists(
    State(state): State<SharedCatalog>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let mut catalog = state.lock().await;
    if catalog.unauthorized {
        return denied();
    }
    if catalog.fail_artists {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "artist lookup unavailable"})),
        );
    }

    let ids: Vec<String> = params
        .get("ids")
        .map(|v| v.split(',').map(|s| s.to_string()).collect())
        .unwrap_or_default();
    catalog.artist_batches.push(ids.clone());

    let artists: Vec<Value> = ids
        .iter()
        .map(|id| match catalog.artists.get(id) {
            Some(genres) => json!({
                "id": id,
                "name": format!("Artist {}", id),
                "genres": genres
            }),
            None => Value::Null,
        })
        .collect();

    (StatusCode::OK, Json(json!({"artists": artists})))
}

async fn create_playlist(
    State(state): State<SharedCatalog>,
    Path(_user_id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut catalog = state.lock().await;
    if catalog.unauthorized {
        return denied();
    }

    let name = body["name"].as_str().unwrap_or_default().to_string();
    let description = body["description"].as_str().unwrap_or_default().to_string();
    catalog.created_playlists.push((name.clone(), description));

    (
        StatusCode::CREATED,
        Json(json!({
            "id": "published-1",
            "name": name,
            "external_urls": {"spotify": "https://open.spotify.com/playlist/published-1"}
        })),
    )
}

async fn add_tracks(
    State(state): State<SharedCatalog>,
    Path(_id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut catalog = state.lock().await;
    if catalog.unauthorized {
        return denied();
    }

    let call_number = catalog.add_batches.len() + 1;
    if let Some(fail_from) = catalog.fail_add_calls_from {
        if call_number >= fail_from {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "snapshot conflict"})),
            );
        }
    }

    let uris: Vec<String> = body["uris"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();
    catalog.add_batches.push(uris);

    (
        StatusCode::CREATED,
        Json(json!({"snapshot_id": format!("snap-{}", call_number)})),
    )
}
