//! Debounced template search publishing results on a watch channel

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::debounce::Debouncer;
use crate::domain::{Template, TemplateFilter};
use crate::infrastructure::services::TemplateService;

/// Latest completed search
#[derive(Debug, Clone, Default)]
pub struct SearchSnapshot {
    /// Sequence number of the request that produced this snapshot, 0 before any search
    pub sequence: u64,
    pub filter: TemplateFilter,
    pub templates: Vec<Template>,
    pub error: Option<String>,
}

/// Receiver side of a [`SearchDispatcher`]
pub type SearchWatcher = watch::Receiver<SearchSnapshot>;

/// Coalesces rapid filter changes into one search after a quiet period
#[derive(Debug)]
pub struct SearchDispatcher {
    service: Arc<TemplateService>,
    debouncer: Debouncer,
    sender: Arc<watch::Sender<SearchSnapshot>>,
    sequence: std::sync::atomic::AtomicU64,
}

impl SearchDispatcher {
    pub fn new(service: Arc<TemplateService>, debouncer: Debouncer) -> Self {
        let (sender, _) = watch::channel(SearchSnapshot::default());

        Self {
            service,
            debouncer,
            sender: Arc::new(sender),
            sequence: std::sync::atomic::AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> SearchWatcher {
        self.sender.subscribe()
    }

    /// Queue a search; a newer call before the quiet period ends replaces it.
    /// Returns the sequence number the resulting snapshot will carry.
    pub fn search(&self, filter: TemplateFilter) -> u64 {
        let sequence = self
            .sequence
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            + 1;

        let service = self.service.clone();
        let sender = self.sender.clone();

        debug!(sequence, "Search scheduled");

        self.debouncer.schedule(async move {
            let snapshot = match service.list(&filter).await {
                Ok(templates) => SearchSnapshot {
                    sequence,
                    filter,
                    templates,
                    error: None,
                },
                Err(e) => {
                    warn!(sequence, error = %e, "Search failed");
                    SearchSnapshot {
                        sequence,
                        filter,
                        templates: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            };

            sender.send_replace(snapshot);
        });

        sequence
    }

    /// Drop a queued search that has not started yet
    pub fn cancel(&self) -> bool {
        self.debouncer.cancel()
    }
}
