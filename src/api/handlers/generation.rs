//! Sentence generation endpoints

use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{GeneratedSentences, GenerationKind, GenerationRecord, GenerationRequest};

#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub keyword: String,
    pub generation_type: GenerationKind,
    pub generated_sentences: Vec<String>,
    pub created_at: String,
}

impl From<GeneratedSentences> for GenerationResponse {
    fn from(generated: GeneratedSentences) -> Self {
        Self {
            keyword: generated.keyword,
            generation_type: generated.generation_type,
            generated_sentences: generated.generated_sentences,
            created_at: generated.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryResponse {
    pub id: String,
    pub keyword: String,
    pub generation_type: GenerationKind,
    pub generated_text: String,
    pub created_at: String,
}

impl From<&GenerationRecord> for HistoryEntryResponse {
    fn from(record: &GenerationRecord) -> Self {
        Self {
            id: record.id().as_str().to_string(),
            keyword: record.keyword().to_string(),
            generation_type: record.kind(),
            generated_text: record.text().to_string(),
            created_at: record.created_at().to_rfc3339(),
        }
    }
}

async fn generate(
    state: &AppState,
    kind: GenerationKind,
    request: GenerationRequest,
) -> Result<Json<GenerationResponse>, ApiError> {
    let generated = state.generation_service.generate(kind, request).await?;
    Ok(Json(GenerationResponse::from(generated)))
}

/// POST /ai/sample-phrase
pub async fn sample_phrase(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    generate(&state, GenerationKind::SamplePhrase, request).await
}

/// POST /ai/experience
pub async fn experience(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    generate(&state, GenerationKind::Experience, request).await
}

/// GET /ai/history
pub async fn history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntryResponse>>, ApiError> {
    let records = state.generation_service.history().await?;
    Ok(Json(records.iter().map(HistoryEntryResponse::from).collect()))
}
