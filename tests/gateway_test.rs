mod common;

use common::{FakeCatalog, client_for, spawn_catalog, track_json};
use trackduel::spotify::{self, CatalogError, artists::ARTIST_BATCH_LIMIT};

#[tokio::test]
async fn test_current_user_probe() {
    let state = FakeCatalog::new().shared();
    let base_url = spawn_catalog(state.clone()).await;
    let (client, _) = client_for(&base_url);

    let user = spotify::user::current_user(&client).await.unwrap();
    assert_eq!(user.id, "duelist");
    assert_eq!(state.lock().await.me_calls, 1);
}

#[tokio::test]
async fn test_unauthorized_purges_credential() {
    let mut catalog = FakeCatalog::new();
    catalog.unauthorized = true;
    let state = catalog.shared();
    let base_url = spawn_catalog(state).await;
    let (client, credentials) = client_for(&base_url);

    let result = spotify::user::current_user(&client).await;
    assert!(matches!(result, Err(CatalogError::CredentialExpired)));

    // the 401 must leave no credential behind
    assert!(credentials.lock().await.current_token().is_none());
}

#[tokio::test]
async fn test_artist_lookup_empty_input_skips_network() {
    let state = FakeCatalog::new().shared();
    let base_url = spawn_catalog(state.clone()).await;
    let (client, _) = client_for(&base_url);

    let artists = spotify::artists::get_several_artists(&client, &[])
        .await
        .unwrap();

    assert!(artists.is_empty());
    assert!(state.lock().await.artist_batches.is_empty());
}

#[tokio::test]
async fn test_artist_lookup_dedups_and_caps_the_batch() {
    let mut catalog = FakeCatalog::new();
    for i in 0..60 {
        catalog.add_artist(&format!("a{}", i), &["rock"]);
    }
    let state = catalog.shared();
    let base_url = spawn_catalog(state.clone()).await;
    let (client, _) = client_for(&base_url);

    // 60 unique ids, every one requested twice
    let ids: Vec<String> = (0..120).map(|i| format!("a{}", i % 60)).collect();
    let artists = spotify::artists::get_several_artists(&client, &ids)
        .await
        .unwrap();

    assert_eq!(artists.len(), ARTIST_BATCH_LIMIT);

    let batches = state.lock().await.artist_batches.clone();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), ARTIST_BATCH_LIMIT);
    // dedup keeps the first occurrence order
    assert_eq!(batches[0][0], "a0");
    assert_eq!(batches[0][49], "a49");
}

#[tokio::test]
async fn test_artist_lookup_drops_unknown_ids() {
    let mut catalog = FakeCatalog::new();
    catalog.add_artist("a1", &["rock"]);
    catalog.add_artist("a2", &["jazz", "fusion"]);
    let state = catalog.shared();
    let base_url = spawn_catalog(state).await;
    let (client, _) = client_for(&base_url);

    let ids = vec!["a1".to_string(), "missing".to_string(), "a2".to_string()];
    let artists = spotify::artists::get_several_artists(&client, &ids)
        .await
        .unwrap();

    let returned: Vec<&str> = artists.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(returned, vec!["a1", "a2"]);
    assert_eq!(artists[1].genres, vec!["jazz", "fusion"]);
}

#[tokio::test]
async fn test_get_playlist_reports_track_total() {
    let tracks = (0..7).map(|i| track_json(&format!("t{}", i), &["a1"])).collect();
    let state = FakeCatalog::with_tracks(tracks).shared();
    let base_url = spawn_catalog(state).await;
    let (client, _) = client_for(&base_url);

    let playlist = spotify::playlists::get_playlist(&client, "source").await.unwrap();
    assert_eq!(playlist.id, "source");
    assert_eq!(playlist.tracks.total, 7);
}

#[tokio::test]
async fn test_get_playlist_tracks_pages_by_offset() {
    let tracks = (0..7).map(|i| track_json(&format!("t{}", i), &["a1"])).collect();
    let state = FakeCatalog::with_tracks(tracks).shared();
    let base_url = spawn_catalog(state.clone()).await;
    let (client, _) = client_for(&base_url);

    let page = spotify::playlists::get_playlist_tracks(&client, "source", 5, 50)
        .await
        .unwrap();

    let ids: Vec<&str> = page.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t5", "t6"]);
    assert_eq!(state.lock().await.page_offsets, vec![5]);
}

#[tokio::test]
async fn test_create_playlist_resolves_the_owner_first() {
    let state = FakeCatalog::new().shared();
    let base_url = spawn_catalog(state.clone()).await;
    let (client, _) = client_for(&base_url);

    let playlist = spotify::playlists::create_playlist(&client, "Winners", "The keepers")
        .await
        .unwrap();

    assert_eq!(playlist.id, "published-1");
    assert_eq!(playlist.name, "Winners");
    assert!(playlist.external_urls.is_some());

    let catalog = state.lock().await;
    assert_eq!(catalog.me_calls, 1);
    assert_eq!(
        catalog.created_playlists,
        vec![("Winners".to_string(), "The keepers".to_string())]
    );
}

#[tokio::test]
async fn test_add_tracks_chunks_and_returns_last_snapshot() {
    let state = FakeCatalog::new().shared();
    let base_url = spawn_catalog(state.clone()).await;
    let (client, _) = client_for(&base_url);

    let uris: Vec<String> = (0..101).map(|i| format!("spotify:track:t{}", i)).collect();
    let response = spotify::playlists::add_tracks(&client, "published-1", &uris)
        .await
        .unwrap();

    // two sequential batches, the second one's snapshot wins
    assert_eq!(response.snapshot_id, "snap-2");

    let batches = state.lock().await.add_batches.clone();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 100);
    assert_eq!(batches[1].len(), 1);
    assert_eq!(batches[0][0], "spotify:track:t0");
    assert_eq!(batches[1][0], "spotify:track:t100");
}

#[tokio::test]
async fn test_add_tracks_failing_batch_aborts() {
    let mut catalog = FakeCatalog::new();
    catalog.fail_add_calls_from = Some(2);
    let state = catalog.shared();
    let base_url = spawn_catalog(state.clone()).await;
    let (client, _) = client_for(&base_url);

    let uris: Vec<String> = (0..150).map(|i| format!("spotify:track:t{}", i)).collect();
    let result = spotify::playlists::add_tracks(&client, "published-1", &uris).await;

    assert!(matches!(result, Err(CatalogError::AddTracksFailed(_))));
    // only the first batch landed before the abort
    assert_eq!(state.lock().await.add_batches.len(), 1);
}

#[tokio::test]
async fn test_add_tracks_rejects_empty_input() {
    let state = FakeCatalog::new().shared();
    let base_url = spawn_catalog(state.clone()).await;
    let (client, _) = client_for(&base_url);

    let result = spotify::playlists::add_tracks(&client, "published-1", &[]).await;
    assert!(matches!(result, Err(CatalogError::AddTracksFailed(_))));
    assert!(state.lock().await.add_batches.is_empty());
}
