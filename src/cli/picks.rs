use tabled::Table;

use crate::{
    info,
    management::PickManager,
    success,
    types::PickTableRow,
    utils, warning,
};

/// Lists or edits the chosen-track collection.
pub async fn picks(remove: Option<String>, clear: bool) {
    let mut picks = PickManager::load_or_default().await;

    if clear {
        picks.clear();
        if let Err(e) = picks.persist().await {
            warning!("Failed to save picks: {}", e);
            return;
        }
        success!("Cleared all picks.");
        return;
    }

    if let Some(track_id) = remove {
        if picks.remove(&track_id) {
            if let Err(e) = picks.persist().await {
                warning!("Failed to save picks: {}", e);
                return;
            }
            success!("Removed pick {}.", track_id);
        } else {
            warning!("No pick with id {}.", track_id);
        }
        return;
    }

    if picks.count() == 0 {
        info!("No picks yet. Run trackduel duel to start comparing.");
        return;
    }

    let rows: Vec<PickTableRow> = picks
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| PickTableRow {
            position: i + 1,
            name: track.name.clone(),
            artists: utils::artist_names(&track.artists),
            id: track.id.clone(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
    info!(
        "{} pick(s) for playlist \"{}\".",
        picks.count(),
        picks.name()
    );
}
