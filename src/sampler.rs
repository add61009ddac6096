//! Random track sampling and genre enrichment.
//!
//! The engine draws a bounded random subset from a potentially large remote
//! playlist without downloading it whole: whole pages are fetched at random
//! offsets, shuffled, deduplicated, filtered against the session ledger and
//! truncated, then enriched with aggregated artist genres. Over-fetching
//! absorbs inter-page collisions and exclusion hits without a second round
//! trip in the common case.

use std::collections::HashMap;

use rand::Rng;

use crate::{
    management::SessionLedger,
    spotify::{self, CatalogClient, CatalogError, playlists::PAGE_LIMIT},
    types::Track,
    utils, warning,
};

/// Draws up to `desired` enriched tracks from the source playlist.
///
/// `fetch_budget` is the over-fetch amount (typically twice `desired`)
/// deciding how many pages of [`PAGE_LIMIT`] tracks are requested; page
/// offsets are drawn uniformly with replacement from `[0, total - 50]`, so
/// pages may overlap or repeat. All page fetches run concurrently and any
/// single failure fails the whole attempt.
///
/// Tracks whose identifier is recorded in `excluded` are never returned. An
/// empty result is not an error; the comparison queue decides whether to
/// retry with a fresh draw.
///
/// # Errors
///
/// - [`CatalogError::EmptyCatalog`] when the playlist reports zero tracks
/// - any gateway failure of the metadata or page fetches, verbatim
pub async fn sample_tracks<R: Rng + ?Sized>(
    client: &CatalogClient,
    playlist_id: &str,
    desired: usize,
    fetch_budget: usize,
    excluded: &SessionLedger,
    rng: &mut R,
) -> Result<Vec<Track>, CatalogError> {
    if desired == 0 {
        return Ok(Vec::new());
    }

    let playlist = spotify::playlists::get_playlist(client, playlist_id).await?;
    let total = playlist.tracks.total;
    if total == 0 {
        return Err(CatalogError::EmptyCatalog);
    }

    // a playlist shorter than one page pins every fetch to offset 0
    let max_offset = total.saturating_sub(PAGE_LIMIT as u64);
    let pages = fetch_budget.div_ceil(PAGE_LIMIT).max(1);
    let offsets: Vec<u64> = (0..pages).map(|_| rng.random_range(0..=max_offset)).collect();

    let mut handles = Vec::new();
    for offset in offsets {
        let client = client.clone();
        let playlist_id = playlist_id.to_string();
        handles.push(tokio::spawn(async move {
            spotify::playlists::get_playlist_tracks(&client, &playlist_id, offset, PAGE_LIMIT)
                .await
        }));
    }

    let mut tracks: Vec<Track> = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(Ok(page)) => tracks.extend(page),
            // all-or-nothing: one failed page fails the attempt
            Ok(Err(e)) => return Err(e),
            Err(e) => return Err(CatalogError::Join(e.to_string())),
        }
    }

    utils::shuffle(&mut tracks, rng);
    utils::dedup_tracks(&mut tracks);
    tracks.retain(|track| !excluded.has(&track.id));
    tracks.truncate(desired);

    enrich_with_genres(client, &mut tracks).await?;

    Ok(tracks)
}

/// Attaches per-artist genres and the track-level genre union.
///
/// One batched artist lookup covers all surviving tracks. Artists the lookup
/// does not cover keep an empty genre list, and a failing lookup (other than
/// a credential failure, which propagates) degrades the whole sample to
/// empty genre lists instead of discarding it.
async fn enrich_with_genres(
    client: &CatalogClient,
    tracks: &mut [Track],
) -> Result<(), CatalogError> {
    let artist_ids: Vec<String> = tracks
        .iter()
        .flat_map(|t| t.artists.iter().map(|a| a.id.clone()))
        .collect();

    let artists = match spotify::artists::get_several_artists(client, &artist_ids).await {
        Ok(artists) => artists,
        Err(e @ (CatalogError::CredentialExpired | CatalogError::MissingCredential)) => {
            return Err(e);
        }
        Err(e) => {
            warning!("Artist lookup failed, tracks stay without genres: {}", e);
            Vec::new()
        }
    };

    let genres_by_artist: HashMap<String, Vec<String>> =
        artists.into_iter().map(|a| (a.id, a.genres)).collect();

    for track in tracks.iter_mut() {
        for artist in track.artists.iter_mut() {
            artist.genres = genres_by_artist.get(&artist.id).cloned().unwrap_or_default();
        }
        track.genres = utils::merge_genres(&track.artists);
    }

    Ok(())
}
