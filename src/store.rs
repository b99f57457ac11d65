//! Single-slot result store.
//!
//! Holds at most one `ExtractionRun` at a time, plus the in-flight flag that
//! rejects overlapping extractions. One mutex guards both so `set`/`get`/
//! `clear` cannot interleave with an extraction that is being started or
//! finished.

use std::sync::Mutex;

use crate::errors::ExtractError;
use crate::models::ExtractionRun;

#[derive(Default)]
struct Slot {
    run: Option<ExtractionRun>,
    in_flight: bool,
}

/// Owned by the session or invocation that drives the pipeline; exporters
/// only ever see cloned snapshots.
#[derive(Default)]
pub struct ResultStore {
    slot: Mutex<Slot>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an extraction as in flight. Fails with `ExtractionInProgress`
    /// when one already is; a rejected call changes nothing.
    pub fn begin(&self) -> Result<(), ExtractError> {
        let mut slot = self.slot.lock().unwrap();
        if slot.in_flight {
            return Err(ExtractError::ExtractionInProgress);
        }
        slot.in_flight = true;
        Ok(())
    }

    /// Store the finished run and clear the in-flight flag.
    pub fn complete(&self, run: ExtractionRun) {
        let mut slot = self.slot.lock().unwrap();
        slot.run = Some(run);
        slot.in_flight = false;
    }

    /// Clear the in-flight flag, leaving whatever run was already stored.
    pub fn abort(&self) {
        self.slot.lock().unwrap().in_flight = false;
    }

    /// Replace any prior run. No merge.
    pub fn set(&self, run: ExtractionRun) {
        self.slot.lock().unwrap().run = Some(run);
    }

    /// Snapshot of the current run, if any.
    pub fn get(&self) -> Option<ExtractionRun> {
        self.slot.lock().unwrap().run.clone()
    }

    pub fn clear(&self) {
        self.slot.lock().unwrap().run = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileHandle;
    use crate::normalize::normalize;
    use chrono::{TimeZone, Utc};

    fn run(handle: &str) -> ExtractionRun {
        ExtractionRun {
            handle: normalize(handle).unwrap(),
            max_items: 50,
            songs: Vec::new(),
            completed_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn handle_of(run: &ExtractionRun) -> &ProfileHandle {
        &run.handle
    }

    #[test]
    fn test_set_replaces_prior_run() {
        let store = ResultStore::new();
        store.set(run("first"));
        store.set(run("second"));
        let current = store.get().unwrap();
        assert_eq!(handle_of(&current).as_str(), "second");
    }

    #[test]
    fn test_clear_empties_slot() {
        let store = ResultStore::new();
        store.set(run("someone"));
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_begin_rejects_overlap_and_preserves_run() {
        let store = ResultStore::new();
        store.set(run("kept"));

        store.begin().unwrap();
        let second = store.begin();
        assert!(matches!(second, Err(ExtractError::ExtractionInProgress)));

        // The rejected attempt must not disturb the stored run.
        assert_eq!(handle_of(&store.get().unwrap()).as_str(), "kept");
    }

    #[test]
    fn test_complete_clears_in_flight() {
        let store = ResultStore::new();
        store.begin().unwrap();
        store.complete(run("done"));
        assert_eq!(handle_of(&store.get().unwrap()).as_str(), "done");

        // A new extraction may start once the previous one completed.
        store.begin().unwrap();
    }

    #[test]
    fn test_abort_leaves_prior_run() {
        let store = ResultStore::new();
        store.set(run("prior"));
        store.begin().unwrap();
        store.abort();
        assert_eq!(handle_of(&store.get().unwrap()).as_str(), "prior");
        store.begin().unwrap();
    }
}
