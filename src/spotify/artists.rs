use std::collections::HashSet;

use crate::{
    spotify::{CatalogClient, CatalogError},
    types::{Artist, SeveralArtistsResponse},
};

/// The catalog accepts at most this many ids per batch artist lookup.
pub const ARTIST_BATCH_LIMIT: usize = 50;

/// Retrieves a single artist including its genre tags.
pub async fn get_artist(client: &CatalogClient, artist_id: &str) -> Result<Artist, CatalogError> {
    client
        .get_json::<Artist>(&format!("/artists/{}", artist_id))
        .await
}

/// Retrieves several artists in one batched call.
///
/// Requested ids are deduplicated (first occurrence wins) and capped at
/// [`ARTIST_BATCH_LIMIT`]; callers needing more than one batch must issue
/// multiple calls themselves. An empty input returns an empty list without
/// touching the network. Unknown ids come back as `null` entries from the
/// catalog and are dropped here.
pub async fn get_several_artists(
    client: &CatalogClient,
    artist_ids: &[String],
) -> Result<Vec<Artist>, CatalogError> {
    if artist_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let unique_ids: Vec<&str> = artist_ids
        .iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .take(ARTIST_BATCH_LIMIT)
        .collect();

    let api_url = format!("/artists?ids={}", unique_ids.join(","));
    let response = client.get_json::<SeveralArtistsResponse>(&api_url).await?;

    Ok(response.artists.into_iter().flatten().collect())
}
