//! Content record endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Query};
use crate::domain::{ContentFilter, ContentRecord};
use crate::infrastructure::services::ContentRequest;

/// Body of create and update calls; updates replace every field
#[derive(Debug, Clone, Deserialize)]
pub struct ContentApiRequest {
    pub title: String,
    #[serde(alias = "body")]
    pub content: String,
    pub category: String,
}

impl From<ContentApiRequest> for ContentRequest {
    fn from(request: ContentApiRequest) -> Self {
        Self {
            title: request.title,
            body: request.content,
            category: request.category,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&ContentRecord> for ContentResponse {
    fn from(record: &ContentRecord) -> Self {
        Self {
            id: record.id().as_str().to_string(),
            title: record.title().to_string(),
            content: record.body().to_string(),
            category: record.category().to_string(),
            created_at: record.created_at().to_rfc3339(),
            updated_at: record.updated_at().to_rfc3339(),
        }
    }
}

/// GET /contents
pub async fn list_contents(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    let records = state.content_service.list().await?;
    Ok(Json(records.iter().map(ContentResponse::from).collect()))
}

/// GET /contents/search
pub async fn search_contents(
    State(state): State<AppState>,
    Query(filter): Query<ContentFilter>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    debug!(filter = ?filter, "Searching contents");

    let records = state.content_service.search(&filter).await?;
    Ok(Json(records.iter().map(ContentResponse::from).collect()))
}

/// POST /contents
pub async fn create_content(
    State(state): State<AppState>,
    Json(request): Json<ContentApiRequest>,
) -> Result<Json<ContentResponse>, ApiError> {
    debug!(title = %request.title, "Creating content");

    let record = state.content_service.create(request.into()).await?;
    Ok(Json(ContentResponse::from(&record)))
}

/// GET /contents/{content_id}
pub async fn get_content(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Result<Json<ContentResponse>, ApiError> {
    let record = state.content_service.get_required(&content_id).await?;
    Ok(Json(ContentResponse::from(&record)))
}

/// PUT /contents/{content_id}
pub async fn update_content(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
    Json(request): Json<ContentApiRequest>,
) -> Result<Json<ContentResponse>, ApiError> {
    let record = state
        .content_service
        .update(&content_id, request.into())
        .await?;

    Ok(Json(ContentResponse::from(&record)))
}

/// DELETE /contents/{content_id}
pub async fn delete_content(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.content_service.delete(&content_id).await? {
        return Err(ApiError::not_found(format!(
            "Content '{}' not found",
            content_id
        )));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": content_id
    })))
}
