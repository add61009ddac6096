use crate::{
    spotify::{CatalogClient, CatalogError},
    types::CurrentUser,
};

/// Retrieves the authenticated user's profile.
///
/// Doubles as the lightweight credential probe: the comparison queue calls
/// this before its first sample to validate the stored token, and playlist
/// creation calls it to resolve the owning user id.
pub async fn current_user(client: &CatalogClient) -> Result<CurrentUser, CatalogError> {
    client.get_json::<CurrentUser>("/me").await
}
