//! Background extraction worker.
//!
//! Runs the normalization-validated extraction off the caller's thread and
//! reports progress and a terminal event over a channel, so an interface
//! layer (CLI today, a GUI front-end tomorrow) never blocks its own
//! responsiveness loop on the generator. No partial results are exposed:
//! the store is only written on completion.

use chrono::Utc;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::errors::ExtractError;
use crate::models::{ExtractionRun, GenerationStatus, ProfileHandle};
use crate::source::{collect_songs, SourceProvider};
use crate::store::ResultStore;

/// Events a running extraction reports back to the interface layer.
#[derive(Clone, Debug)]
pub enum ExtractEvent {
    /// Unique songs collected so far.
    Progress(usize),
    /// Extraction finished; the run is now in the store.
    Finished {
        count: usize,
        status: GenerationStatus,
    },
    /// Extraction failed; the store retains whatever it held before.
    Failed(String),
}

/// Handle to an in-flight extraction.
pub struct ExtractionJob {
    pub events: Receiver<ExtractEvent>,
    cancel: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

impl ExtractionJob {
    /// Request cooperative cancellation; the worker checks the flag between
    /// generated records.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Wait for the worker thread to exit. Events may still be pending on
    /// the channel afterwards.
    pub fn join(self) {
        let _ = self.join.join();
    }
}

/// Start an extraction against `store`. The in-flight guard is taken on the
/// caller's thread: if another extraction is running this returns
/// `ExtractionInProgress` and no worker starts.
pub fn spawn_extraction(
    store: Arc<ResultStore>,
    mut provider: Box<dyn SourceProvider + Send>,
    handle: ProfileHandle,
    max_items: usize,
) -> Result<ExtractionJob, ExtractError> {
    store.begin()?;

    let (tx, rx): (Sender<ExtractEvent>, Receiver<ExtractEvent>) = unbounded();
    let cancel = Arc::new(AtomicBool::new(false));
    let worker_cancel = Arc::clone(&cancel);

    let join = thread::spawn(move || {
        let progress_tx = tx.clone();
        let result = collect_songs(provider.as_mut(), &handle, max_items, &worker_cancel, |n| {
            let _ = progress_tx.send(ExtractEvent::Progress(n));
        });

        match result {
            Ok(extraction) => {
                let count = extraction.records.len();
                let status = extraction.status;
                store.complete(ExtractionRun {
                    handle,
                    max_items,
                    songs: extraction.records,
                    completed_at: Utc::now(),
                });
                let _ = tx.send(ExtractEvent::Finished { count, status });
            }
            Err(e) => {
                store.abort();
                let _ = tx.send(ExtractEvent::Failed(e.to_string()));
            }
        }
    });

    Ok(ExtractionJob { events: rx, cancel, join })
}
