//! Generation service - AI sentence generation with history

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::storage::Storage;
use crate::domain::{
    DomainError, GeneratedSentences, GenerationKind, GenerationRecord, GenerationRequest,
    SentenceGenerator,
};

/// Number of records returned by the history listing
pub const HISTORY_LIMIT: usize = 100;

/// Generation service
pub struct GenerationService {
    generator: Option<Arc<dyn SentenceGenerator>>,
    history: Arc<dyn Storage<GenerationRecord>>,
}

impl std::fmt::Debug for GenerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationService")
            .field("enabled", &self.generator.is_some())
            .finish()
    }
}

impl GenerationService {
    /// A service without generator answers every generation with a configuration error
    pub fn new(
        generator: Option<Arc<dyn SentenceGenerator>>,
        history: Arc<dyn Storage<GenerationRecord>>,
    ) -> Self {
        Self { generator, history }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Generate sentences and record each one in the history
    pub async fn generate(
        &self,
        kind: GenerationKind,
        request: GenerationRequest,
    ) -> Result<GeneratedSentences, DomainError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| DomainError::configuration("OpenAI API key is not configured"))?;

        request.validate()?;

        let sentences = generator.generate(kind, &request).await.map_err(|e| {
            warn!(kind = %kind, keyword = %request.keyword, error = %e, "Sentence generation failed");
            e
        })?;

        let created_at = Utc::now();

        for sentence in &sentences {
            let record = GenerationRecord::new(&request.keyword, kind, sentence, created_at);
            self.history.create(record).await?;
        }

        info!(kind = %kind, keyword = %request.keyword, count = sentences.len(), "Sentences generated");

        Ok(GeneratedSentences {
            keyword: request.keyword,
            generation_type: kind,
            generated_sentences: sentences,
            created_at,
        })
    }

    /// Most recent history records, newest first
    pub async fn history(&self) -> Result<Vec<GenerationRecord>, DomainError> {
        let mut records = self.history.list().await?;

        records.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        records.truncate(HISTORY_LIMIT);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::MockSentenceGenerator;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_service(generator: Option<MockSentenceGenerator>) -> GenerationService {
        GenerationService::new(
            generator.map(|g| Arc::new(g) as Arc<dyn SentenceGenerator>),
            Arc::new(InMemoryStorage::<GenerationRecord>::new()),
        )
    }

    #[tokio::test]
    async fn test_generate_records_history() {
        let service = create_service(Some(MockSentenceGenerator::new(&["하나", "둘"])));

        let result = service
            .generate(GenerationKind::SamplePhrase, GenerationRequest::new("로봇"))
            .await
            .unwrap();

        assert_eq!(result.keyword, "로봇");
        assert_eq!(result.generation_type, GenerationKind::SamplePhrase);
        assert_eq!(result.generated_sentences, vec!["하나", "둘"]);

        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|r| r.keyword() == "로봇"));
    }

    #[tokio::test]
    async fn test_generate_without_generator() {
        let service = create_service(None);
        assert!(!service.is_enabled());

        let result = service
            .generate(GenerationKind::Experience, GenerationRequest::new("로봇"))
            .await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_generate_validates_request() {
        let service = create_service(Some(MockSentenceGenerator::new(&["x"])));

        let result = service
            .generate(GenerationKind::Experience, GenerationRequest::new(""))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_generator_error_keeps_history_empty() {
        let service =
            create_service(Some(MockSentenceGenerator::new(&[]).with_error("HTTP 429")));

        let result = service
            .generate(GenerationKind::Experience, GenerationRequest::new("로봇"))
            .await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
        assert!(service.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_is_limited() {
        let sentences: Vec<String> = (0..HISTORY_LIMIT + 5).map(|i| format!("문장 {}", i)).collect();
        let refs: Vec<&str> = sentences.iter().map(String::as_str).collect();
        let service = create_service(Some(MockSentenceGenerator::new(&refs)));

        service
            .generate(GenerationKind::SamplePhrase, GenerationRequest::new("놀이"))
            .await
            .unwrap();

        assert_eq!(service.history().await.unwrap().len(), HISTORY_LIMIT);
    }
}
