use std::sync::Arc;

use chrono::{Local, TimeZone};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use crate::client::NoiseEntryClient;
use crate::grouping::GroupedIndex;
use crate::model::{NoiseEntry, NoiseLevel};

/// The entry set together with the index derived from it. Observers only ever
/// receive complete pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub entries: Vec<NoiseEntry>,
    pub index: GroupedIndex,
}

impl Snapshot {
    pub fn build<Tz: TimeZone>(entries: Vec<NoiseEntry>, tz: &Tz) -> Self {
        let index = GroupedIndex::build(&entries, tz);
        Self { entries, index }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Holds the current history and publishes every change over a watch channel.
///
/// Client failures never reach the caller: a failed refresh clears the
/// history, a failed submit changes nothing. Each completion publishes in one
/// step, so when a refresh and a submit overlap the later one wins.
pub struct EntryStore<Tz: TimeZone = Local> {
    client: NoiseEntryClient,
    tz: Tz,
    state: watch::Sender<Arc<Snapshot>>,
}

impl EntryStore<Local> {
    pub fn new(client: NoiseEntryClient) -> Self {
        Self::with_time_zone(client, Local)
    }
}

impl<Tz: TimeZone> EntryStore<Tz> {
    /// Store whose day buckets are computed in `tz`.
    pub fn with_time_zone(client: NoiseEntryClient, tz: Tz) -> Self {
        let (state, _) = watch::channel(Arc::new(Snapshot::default()));
        Self { client, tz, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.state.borrow().clone()
    }

    /// Replace the history with whatever the service returns, or with nothing
    /// if the fetch fails.
    #[instrument(skip(self))]
    pub async fn refresh(&self) {
        let entries = match self.client.fetch_all().await {
            Ok(entries) => {
                info!("Fetched {} entries", entries.len());
                entries
            }
            Err(e) => {
                error!("Failed to fetch entries, clearing history: {}", e);
                Vec::new()
            }
        };

        let snapshot = Snapshot::build(entries, &self.tz);
        debug!(
            "Publishing {} entries across {} days",
            snapshot.entries.len(),
            snapshot.index.day_count()
        );
        self.state.send_replace(Arc::new(snapshot));
    }

    /// Record a rating. The created entry goes to the front of the history as
    /// is; nothing is re-sorted.
    #[instrument(skip(self))]
    pub async fn submit(&self, level: NoiseLevel) -> Option<NoiseEntry> {
        let entry = match self.client.post_entry(level).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Submission of level {} had no effect: {}", level, e);
                return None;
            }
        };

        info!("Recorded entry {} at level {}", entry.id, level);
        let tz = &self.tz;
        self.state.send_modify(|current| {
            let mut entries = Vec::with_capacity(current.entries.len() + 1);
            entries.push(entry.clone());
            entries.extend(current.entries.iter().cloned());
            *current = Arc::new(Snapshot::build(entries, tz));
        });

        Some(entry)
    }
}
