//! Content record entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::define_id;
use crate::domain::storage::StorageEntity;

define_id!(
    /// Content record identifier
    ContentId,
    "Content"
);

/// Reference material about a piece of media (an animation, a channel, a toy)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    id: ContentId,
    title: String,
    #[serde(rename = "content")]
    body: String,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContentRecord {
    pub fn new(
        id: ContentId,
        title: impl Into<String>,
        body: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            body: body.into(),
            category: category.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    pub fn id(&self) -> &ContentId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace every editable field at once
    pub fn replace(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        category: impl Into<String>,
    ) {
        self.title = title.into();
        self.body = body.into();
        self.category = category.into();
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for ContentRecord {
    type Key = ContentId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Search criteria for content records
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentFilter {
    /// Case-insensitive substring of the title or body
    #[serde(default, alias = "검색어")]
    pub search: Option<String>,
    /// Exact category
    #[serde(default, alias = "카테고리")]
    pub category: Option<String>,
}

impl ContentFilter {
    pub fn matches(&self, record: &ContentRecord) -> bool {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if record.category() != category {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                let term = term.to_lowercase();
                record.title().to_lowercase().contains(&term)
                    || record.body().to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}
