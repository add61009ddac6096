use rand::Rng;

use crate::{
    management::SessionLedger,
    sampler,
    spotify::{self, CatalogClient, CatalogError},
    types::Track,
};

/// Number of tracks presented for a head-to-head comparison.
pub const PAIR_SIZE: usize = 2;

/// Replenishment kicks in when this many tracks or fewer remain after a
/// selection; the pair is then topped back up to [`PAIR_SIZE`].
pub const REPLENISH_THRESHOLD: usize = 1;

/// Successive sampling attempts yielding zero usable tracks before the
/// queue gives up.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 3;

/// Over-fetch multiplier: each sample requests this many times the needed
/// track count so exclusion filtering still leaves enough surplus.
pub const OVER_FETCH_FACTOR: usize = 2;

/// Reason the queue entered the error state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueFailure {
    /// The credential probe or a later call rejected the stored token; the
    /// user has to re-authenticate before anything else.
    AuthInvalid(String),
    /// Every recent sampling attempt came back empty; the session has seen
    /// everything reachable.
    NoNewTracks(u32),
    /// Any other catalog failure, retryable from the user's side.
    Catalog(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueState {
    Loading,
    Ready,
    /// Transient: the pair drained completely and replenishment is due.
    Empty,
    Error(QueueFailure),
}

/// State machine owning the current comparison pair.
///
/// Drives the sampling engine, records emitted tracks in the session ledger
/// so they are never shown twice, and tops the pair back up after each
/// selection. The ledger and the pair are only ever touched from here, so
/// sequencing of the async calls is all the synchronization needed.
pub struct ComparisonQueue<R: Rng> {
    client: CatalogClient,
    playlist_id: String,
    ledger: SessionLedger,
    pair: Vec<Track>,
    state: QueueState,
    sample_in_flight: bool,
    rng: R,
}

impl<R: Rng> ComparisonQueue<R> {
    /// Creates a queue over the given source playlist. The random source is
    /// injected so tests can drive deterministic offset draws and shuffles.
    pub fn new(client: CatalogClient, playlist_id: impl Into<String>, rng: R) -> Self {
        ComparisonQueue {
            client,
            playlist_id: playlist_id.into(),
            ledger: SessionLedger::new(),
            pair: Vec::new(),
            state: QueueState::Loading,
            sample_in_flight: false,
            rng,
        }
    }

    pub fn state(&self) -> &QueueState {
        &self.state
    }

    pub fn pair(&self) -> &[Track] {
        &self.pair
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    /// Validates the credential with a who-am-I probe, then fills the
    /// initial pair. Probe failures surface before any sampling starts.
    pub async fn start(&mut self) -> Result<(), CatalogError> {
        self.state = QueueState::Loading;
        if let Err(e) = spotify::user::current_user(&self.client).await {
            return Err(self.fail(e));
        }
        self.replenish().await
    }

    /// Removes and returns the track at `index` as the duel winner; the
    /// caller forwards it to the chosen-track collection. When the remaining
    /// pair size drops to the replenishment threshold, a fresh sample tops
    /// it back up; a failure in that top-up is recorded in the queue state
    /// while the winner stays with the caller.
    pub async fn choose(&mut self, index: usize) -> Option<Track> {
        if index >= self.pair.len() {
            return None;
        }
        let winner = self.pair.remove(index);

        if self.pair.len() <= REPLENISH_THRESHOLD {
            self.state = if self.pair.is_empty() {
                QueueState::Empty
            } else {
                QueueState::Ready
            };
            let _ = self.replenish().await;
        }

        Some(winner)
    }

    /// Tops the pair back up to [`PAIR_SIZE`]. A replenish entered while one
    /// is already in flight returns immediately instead of issuing a second
    /// overlapping sample.
    pub async fn replenish(&mut self) -> Result<(), CatalogError> {
        if self.sample_in_flight {
            return Ok(());
        }
        self.sample_in_flight = true;
        let result = self.fill_pair().await;
        self.sample_in_flight = false;
        result
    }

    /// Leaves the error state so the user can try again.
    pub fn retry(&mut self) {
        if matches!(self.state, QueueState::Error(_)) {
            self.state = QueueState::Loading;
        }
    }

    async fn fill_pair(&mut self) -> Result<(), CatalogError> {
        let mut empty_attempts: u32 = 0;

        while self.pair.len() < PAIR_SIZE {
            let desired = PAIR_SIZE - self.pair.len();
            let fetch_budget = desired * OVER_FETCH_FACTOR;

            let outcome = sampler::sample_tracks(
                &self.client,
                &self.playlist_id,
                desired,
                fetch_budget,
                &self.ledger,
                &mut self.rng,
            )
            .await;

            match outcome {
                Ok(tracks) if tracks.is_empty() => empty_attempts += 1,
                Ok(tracks) => {
                    empty_attempts = 0;
                    self.ledger.add_all(tracks.iter().map(|t| t.id.clone()));
                    self.pair.extend(tracks);
                }
                // an empty playlist is as exhausted as a fully-excluded one
                Err(CatalogError::EmptyCatalog) => empty_attempts += 1,
                Err(e) => return Err(self.fail(e)),
            }

            if empty_attempts >= MAX_SAMPLE_ATTEMPTS {
                let e = CatalogError::NoNewTracksAvailable {
                    attempts: empty_attempts,
                };
                return Err(self.fail(e));
            }
        }

        self.state = QueueState::Ready;
        Ok(())
    }

    fn fail(&mut self, err: CatalogError) -> CatalogError {
        let failure = match &err {
            CatalogError::MissingCredential | CatalogError::CredentialExpired => {
                QueueFailure::AuthInvalid(err.to_string())
            }
            CatalogError::NoNewTracksAvailable { attempts } => {
                QueueFailure::NoNewTracks(*attempts)
            }
            other => QueueFailure::Catalog(other.to_string()),
        };
        self.state = QueueState::Error(failure);
        err
    }
}
