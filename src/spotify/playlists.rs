use crate::{
    spotify::{CatalogClient, CatalogError, user},
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        PlaylistResponse, PlaylistTracksResponse, Track,
    },
};

/// Maximum number of tracks the catalog fetches per playlist page.
pub const PAGE_LIMIT: usize = 50;

/// Maximum number of track uris the catalog accepts per add-tracks call.
pub const TRACK_ADD_BATCH: usize = 100;

/// Retrieves playlist metadata, most importantly the total track count the
/// sampling engine derives its offset range from.
pub async fn get_playlist(
    client: &CatalogClient,
    playlist_id: &str,
) -> Result<PlaylistResponse, CatalogError> {
    client
        .get_json::<PlaylistResponse>(&format!("/playlists/{}", playlist_id))
        .await
}

/// Retrieves one page of playlist tracks starting at `offset`.
///
/// Returns up to `limit` tracks; entries whose track is null (removed or
/// local files) are dropped.
pub async fn get_playlist_tracks(
    client: &CatalogClient,
    playlist_id: &str,
    offset: u64,
    limit: usize,
) -> Result<Vec<Track>, CatalogError> {
    let api_url = format!(
        "/playlists/{id}/tracks?offset={offset}&limit={limit}",
        id = playlist_id,
        offset = offset,
        limit = limit
    );
    let response = client.get_json::<PlaylistTracksResponse>(&api_url).await?;

    Ok(response
        .items
        .into_iter()
        .filter_map(|item| item.track)
        .collect())
}

/// Creates a private playlist owned by the authenticated user.
///
/// Resolves the owning user id through the `/me` endpoint first. Credential
/// failures propagate untouched so the caller can redirect into the auth
/// flow; every other failure is reported as
/// [`CatalogError::PlaylistCreationFailed`].
pub async fn create_playlist(
    client: &CatalogClient,
    name: &str,
    description: &str,
) -> Result<CreatePlaylistResponse, CatalogError> {
    let user = user::current_user(client).await?;

    let request = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public: false,
        collaborative: false,
    };

    match client
        .post_json::<CreatePlaylistRequest, CreatePlaylistResponse>(
            &format!("/users/{}/playlists", user.id),
            &request,
        )
        .await
    {
        Ok(response) => Ok(response),
        Err(e @ (CatalogError::CredentialExpired | CatalogError::MissingCredential)) => Err(e),
        Err(e) => Err(CatalogError::PlaylistCreationFailed(e.to_string())),
    }
}

/// Adds track uris to a playlist in batches of at most [`TRACK_ADD_BATCH`].
///
/// Batches are issued sequentially and the overall result is the response of
/// the last batch. A failing batch aborts the whole operation and propagates
/// the error; there is no partial-success reporting, even when earlier
/// batches already landed.
pub async fn add_tracks(
    client: &CatalogClient,
    playlist_id: &str,
    uris: &[String],
) -> Result<AddTracksResponse, CatalogError> {
    let api_url = format!("/playlists/{}/tracks", playlist_id);
    let mut last_response: Option<AddTracksResponse> = None;

    for chunk in uris.chunks(TRACK_ADD_BATCH) {
        let request = AddTracksRequest {
            uris: chunk.to_vec(),
        };
        let response = match client
            .post_json::<AddTracksRequest, AddTracksResponse>(&api_url, &request)
            .await
        {
            Ok(response) => response,
            Err(e @ (CatalogError::CredentialExpired | CatalogError::MissingCredential)) => {
                return Err(e);
            }
            Err(e) => return Err(CatalogError::AddTracksFailed(e.to_string())),
        };
        last_response = Some(response);
    }

    last_response.ok_or_else(|| CatalogError::AddTracksFailed("no track uris to add".to_string()))
}
