use std::collections::HashSet;

/// Session-scoped record of track identifiers that were already shown.
///
/// Grows monotonically for the lifetime of a browsing session and is never
/// persisted; a new process starts with an empty ledger. Once an identifier
/// is added it is never removed, and the sampling engine must never re-emit
/// a track whose identifier is recorded here. Owned and mutated exclusively
/// by the comparison queue, so no locking is involved.
#[derive(Debug, Default)]
pub struct SessionLedger {
    seen: HashSet<String>,
}

impl SessionLedger {
    pub fn new() -> Self {
        SessionLedger::default()
    }

    pub fn has(&self, track_id: &str) -> bool {
        self.seen.contains(track_id)
    }

    /// Records the given identifiers. Re-adding known identifiers is a
    /// no-op, so the call is idempotent.
    pub fn add_all<I>(&mut self, track_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.seen.extend(track_ids);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
