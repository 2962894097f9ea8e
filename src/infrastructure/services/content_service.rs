//! Content service - CRUD and search for content records

use std::sync::Arc;

use tracing::info;

use crate::domain::storage::Storage;
use crate::domain::{ContentFilter, ContentId, ContentRecord, DomainError};

/// Fields of a content record as submitted by clients
#[derive(Debug, Clone, Default)]
pub struct ContentRequest {
    pub title: String,
    pub body: String,
    pub category: String,
}

/// Content service
pub struct ContentService {
    storage: Arc<dyn Storage<ContentRecord>>,
}

impl std::fmt::Debug for ContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService").finish()
    }
}

impl ContentService {
    pub fn new(storage: Arc<dyn Storage<ContentRecord>>) -> Self {
        Self { storage }
    }

    pub async fn get(&self, id: &str) -> Result<Option<ContentRecord>, DomainError> {
        let content_id = ContentId::new(id)?;
        self.storage.get(&content_id).await
    }

    pub async fn get_required(&self, id: &str) -> Result<ContentRecord, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Content '{}' not found", id)))
    }

    /// Records matching `filter`, newest first
    pub async fn search(&self, filter: &ContentFilter) -> Result<Vec<ContentRecord>, DomainError> {
        let mut records: Vec<ContentRecord> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();

        records.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(records)
    }

    pub async fn list(&self) -> Result<Vec<ContentRecord>, DomainError> {
        self.search(&ContentFilter::default()).await
    }

    pub async fn create(&self, request: ContentRequest) -> Result<ContentRecord, DomainError> {
        let title = validate_title(&request.title)?;
        self.ensure_unique_title(&title, None).await?;

        let record = ContentRecord::new(ContentId::generate(), title, request.body, request.category);
        let record = self.storage.create(record).await?;

        info!(content_id = %record.id(), "Content created");
        Ok(record)
    }

    /// Replace the fields of an existing record
    pub async fn update(&self, id: &str, request: ContentRequest) -> Result<ContentRecord, DomainError> {
        let mut record = self.get_required(id).await?;

        let title = validate_title(&request.title)?;
        self.ensure_unique_title(&title, Some(record.id())).await?;

        record.replace(title, request.body, request.category);
        let record = self.storage.update(record).await?;

        info!(content_id = %record.id(), "Content updated");
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let content_id = ContentId::new(id)?;
        let deleted = self.storage.delete(&content_id).await?;

        if deleted {
            info!(content_id = %content_id, "Content deleted");
        }
        Ok(deleted)
    }

    async fn ensure_unique_title(
        &self,
        title: &str,
        current: Option<&ContentId>,
    ) -> Result<(), DomainError> {
        let taken = self
            .storage
            .list()
            .await?
            .iter()
            .any(|r| r.title() == title && Some(r.id()) != current);

        if taken {
            return Err(DomainError::conflict(format!(
                "Content title '{}' already exists",
                title
            )));
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(DomainError::validation("Content title cannot be empty"));
    }
    Ok(title.to_string())
}
