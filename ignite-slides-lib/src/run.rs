use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::catalogue::CatalogueClient;
use crate::download::{self, Outcome};
use crate::error::FetchError;
use crate::pool;

/// Options for one download run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory deck files are written into.
    pub destination: PathBuf,
    /// Cap on simultaneous in-flight downloads.
    pub max_concurrency: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("ignite_2025_slides"),
            max_concurrency: 10,
        }
    }
}

/// Progress events emitted during a run, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// Fetching the session catalogue.
    Fetching,
    /// Catalogue fetched, total sessions found.
    FetchComplete { total: usize },
    /// A real download attempt is starting for a session.
    DownloadStarted { code: String, title: String },
    /// A download attempt failed (non-fatal).
    DownloadFailed { code: String, reason: String },
    /// A deck finished downloading. `processed` counts every session
    /// settled so far, whatever its outcome.
    Progress { processed: u64, total: usize },
    /// All sessions processed.
    Done,
}

/// Outcome tallies for one run.
///
/// Once the run completes, `no_deck + existing + downloaded + failed`
/// equals the catalogue size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub downloaded: u64,
    pub no_deck: u64,
    pub existing: u64,
    pub failed: u64,
}

impl RunCounters {
    /// Sessions settled so far.
    pub fn total(&self) -> u64 {
        self.downloaded + self.no_deck + self.existing + self.failed
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Downloaded => self.downloaded += 1,
            Outcome::NoDeck => self.no_deck += 1,
            Outcome::Existing => self.existing += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Fetch the catalogue and download every available deck.
///
/// Sessions are dispatched in catalogue order under the configured
/// concurrency cap. Only the catalogue fetch is fatal; individual download
/// failures are absorbed into the returned counters and the run always
/// completes.
pub async fn run(
    client: CatalogueClient,
    options: &RunOptions,
    events: mpsc::UnboundedSender<RunEvent>,
) -> Result<RunCounters, FetchError> {
    let _ = events.send(RunEvent::Fetching);
    let sessions = client.fetch_sessions().await?;
    let total = sessions.len();
    let _ = events.send(RunEvent::FetchComplete { total });

    if let Err(e) = std::fs::create_dir_all(&options.destination) {
        // Per-session downloads retry the mkdir themselves and fail
        // individually if the directory really cannot be created.
        log::warn!(
            "Could not create destination directory {}: {}",
            options.destination.display(),
            e
        );
    }

    let client = Arc::new(client);
    let dest = options.destination.clone();
    let task_events = events.clone();
    let mut results = pool::dispatch(options.max_concurrency, sessions, move |session| {
        let client = client.clone();
        let dest = dest.clone();
        let events = task_events.clone();
        async move { download::download_session(&client, &session, &dest, &events).await }
    });

    // The collector loop is the sole owner of the counters; workers only
    // report outcomes over the channel.
    let mut counters = RunCounters::default();
    while let Some(outcome) = results.recv().await {
        counters.record(outcome);
        if outcome == Outcome::Downloaded {
            let _ = events.send(RunEvent::Progress {
                processed: counters.total(),
                total,
            });
        }
    }

    let _ = events.send(RunEvent::Done);
    Ok(counters)
}
