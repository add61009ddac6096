use crate::{
    error, info,
    management::PickManager,
    spotify::{self, CatalogClient},
    success, warning,
};

/// Publishes the picks as a new private playlist on the user's account.
///
/// The playlist name and description are remembered across attempts, so a
/// failed publish can be retried without re-entering them. Picks stay cached
/// until a publish succeeds and the user clears them.
pub async fn publish(name: Option<String>, description: Option<String>) {
    let mut picks = PickManager::load_or_default().await;

    if picks.count() == 0 {
        warning!("Nothing to publish. Run trackduel duel to pick some tracks first.");
        return;
    }

    picks.set_details(name, description);
    if let Err(e) = picks.persist().await {
        warning!("Failed to save playlist details: {}", e);
    }

    let client = match CatalogClient::from_cache().await {
        Ok(client) => client,
        Err(e) => {
            error!(
                "Failed to load token. Please run trackduel auth\n Error: {}",
                e
            );
        }
    };

    info!("Creating playlist \"{}\"...", picks.name());
    let playlist =
        match spotify::playlists::create_playlist(&client, picks.name(), picks.description())
            .await
        {
            Ok(playlist) => playlist,
            Err(e) => error!("{}", e),
        };

    match spotify::playlists::add_tracks(&client, &playlist.id, &picks.uris()).await {
        Ok(_) => {
            success!(
                "Published \"{}\" with {} track(s).",
                playlist.name,
                picks.count()
            );
            if let Some(urls) = playlist.external_urls {
                info!("Open it at {}", urls.spotify);
            }
            info!("Run trackduel picks --clear to start a fresh collection.");
        }
        Err(e) => error!("{}", e),
    }
}
