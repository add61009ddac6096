use std::{
    io::{self, Write},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use tabled::Table;

use crate::{
    config, error, info,
    management::{ComparisonQueue, PickManager, QueueFailure, QueueState},
    spotify::CatalogClient,
    success,
    types::{Track, TrackTableRow},
    utils, warning,
};

/// Runs the interactive comparison loop against the source playlist.
///
/// Two tracks are shown at a time; `1` or `2` picks a favorite, which is
/// appended to the persisted picks while the pair is topped back up with a
/// fresh sample. `q` leaves the loop. The loop also ends once the session
/// has seen every reachable track.
pub async fn duel(playlist: Option<String>) {
    let playlist_id = playlist.unwrap_or_else(config::source_playlist);

    let client = match CatalogClient::from_cache().await {
        Ok(client) => client,
        Err(e) => {
            error!(
                "Failed to load token. Please run trackduel auth\n Error: {}",
                e
            );
        }
    };

    let mut picks = PickManager::load_or_default().await;
    let mut queue = ComparisonQueue::new(client, playlist_id, StdRng::from_os_rng());

    let pb = spinner("Sampling tracks...");
    let _ = queue.start().await;
    pb.finish_and_clear();

    info!("Pick your favorite: [1]/[2], [q] to stop dueling.");

    loop {
        match queue.state() {
            QueueState::Ready => {}
            QueueState::Error(QueueFailure::AuthInvalid(reason)) => {
                error!("{}", reason);
            }
            QueueState::Error(QueueFailure::NoNewTracks(_)) => {
                warning!("No new tracks left in this session.");
                break;
            }
            QueueState::Error(QueueFailure::Catalog(reason)) => {
                warning!("Sampling failed: {}", reason);
                info!("Press enter to retry, or q to stop.");
                if read_line().trim().eq_ignore_ascii_case("q") {
                    break;
                }
                queue.retry();
                let pb = spinner("Sampling tracks...");
                let _ = queue.replenish().await;
                pb.finish_and_clear();
                continue;
            }
            QueueState::Loading | QueueState::Empty => {
                let pb = spinner("Sampling tracks...");
                let _ = queue.replenish().await;
                pb.finish_and_clear();
                continue;
            }
        }

        render_pair(queue.pair());

        print!("> ");
        let _ = io::stdout().flush();
        let line = read_line();
        let index = match line.trim() {
            "1" => 0,
            "2" => 1,
            "q" | "Q" => break,
            _ => {
                warning!("Please answer 1, 2 or q.");
                continue;
            }
        };

        let pb = spinner("Sampling tracks...");
        let winner = queue.choose(index).await;
        pb.finish_and_clear();

        if let Some(track) = winner {
            let title = track.name.clone();
            if picks.add(track) {
                success!("Added \"{}\" to your picks.", title);
            } else {
                info!("\"{}\" is already picked.", title);
            }
            if let Err(e) = picks.persist().await {
                warning!("Failed to save picks: {}", e);
            }
        }
    }

    info!(
        "{} track(s) picked. Run trackduel publish to create the playlist.",
        picks.count()
    );
}

fn render_pair(pair: &[Track]) {
    let rows: Vec<TrackTableRow> = pair
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow {
            option: format!("[{}]", i + 1),
            name: track.name.clone(),
            artists: utils::artist_names(&track.artists),
            album: track.album.name.clone(),
            genres: track
                .genres
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(","),
            length: utils::format_duration(track.duration_ms),
            popularity: track.popularity,
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

fn read_line() -> String {
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        // treat a closed stdin as a quit
        Ok(0) | Err(_) => "q".to_string(),
        Ok(_) => buf,
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
