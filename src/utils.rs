use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Track, TrackArtist};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Uniform in-place Fisher-Yates shuffle.
///
/// Destroys the positional bias introduced by concatenating whole playlist
/// pages: for index `i` from the last element down to 1, the element is
/// swapped with a uniformly chosen index in `[0, i]`. The random source is
/// injected so tests can assert exact output orders with a seeded generator.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    if items.len() < 2 {
        return;
    }
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Removes tracks with an already-seen identifier, keeping the first
/// occurrence. Random page offsets are drawn with replacement, so overlapping
/// pages routinely deliver the same track more than once.
pub fn dedup_tracks(tracks: &mut Vec<Track>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}

/// Computes the track-level genre set from its artists: the union of all
/// per-artist genre lists, deduplicated while preserving first-seen order.
pub fn merge_genres(artists: &[TrackArtist]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for artist in artists {
        for genre in &artist.genres {
            if seen.insert(genre.clone()) {
                merged.push(genre.clone());
            }
        }
    }
    merged
}

/// Renders a track duration in milliseconds as `m:ss`.
pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Joins artist display names for table output.
pub fn artist_names(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
