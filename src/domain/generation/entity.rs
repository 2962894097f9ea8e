//! Generation history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::define_id;
use crate::domain::storage::StorageEntity;
use crate::domain::DomainError;

define_id!(
    /// Generation record identifier
    GenerationId,
    "Generation"
);

/// Default number of sentences requested
pub const DEFAULT_SENTENCE_COUNT: u32 = 10;

/// Upper bound on sentences per request
pub const MAX_SENTENCE_COUNT: u32 = 50;

/// What kind of sentences to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    /// Lines a young child might say about the keyword
    SamplePhrase,
    /// Observations about a child's experience with the keyword
    Experience,
}

impl GenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SamplePhrase => "sample_phrase",
            Self::Experience => "experience",
        }
    }
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_count() -> u32 {
    DEFAULT_SENTENCE_COUNT
}

/// Input of a generation call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationRequest {
    pub keyword: String,
    #[serde(default = "default_count")]
    pub count: u32,
}

impl GenerationRequest {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            count: DEFAULT_SENTENCE_COUNT,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.keyword.trim().is_empty() {
            return Err(DomainError::validation("Keyword cannot be empty"));
        }

        if self.count == 0 || self.count > MAX_SENTENCE_COUNT {
            return Err(DomainError::validation(format!(
                "Sentence count must be between 1 and {}, got {}",
                MAX_SENTENCE_COUNT, self.count
            )));
        }

        Ok(())
    }
}

/// Sentences produced by one generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSentences {
    pub keyword: String,
    pub generation_type: GenerationKind,
    pub generated_sentences: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// One generated sentence kept in the history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    id: GenerationId,
    keyword: String,
    generation_type: GenerationKind,
    generated_text: String,
    created_at: DateTime<Utc>,
}

impl GenerationRecord {
    pub fn new(
        keyword: impl Into<String>,
        kind: GenerationKind,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: GenerationId::generate(),
            keyword: keyword.into(),
            generation_type: kind,
            generated_text: text.into(),
            created_at,
        }
    }

    pub fn id(&self) -> &GenerationId {
        &self.id
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn kind(&self) -> GenerationKind {
        self.generation_type
    }

    pub fn text(&self) -> &str {
        &self.generated_text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for GenerationRecord {
    type Key = GenerationId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
