//! Folder endpoints, including common variables and batch generation

use std::collections::HashMap;

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::templates::{values_from_json, TemplateResponse};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{group_variables, BatchFailure, BatchResult, Folder, VariableGroups, VariableReference};
use crate::infrastructure::services::{CreateFolderRequest, UpdateFolderRequest};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolderApiRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFolderApiRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// Values shared by every template of a batch
#[derive(Debug, Clone, Deserialize)]
pub struct BatchGenerateApiRequest {
    #[serde(default)]
    pub variables: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FolderResponse {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Folder> for FolderResponse {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id().as_str().to_string(),
            name: folder.name().to_string(),
            color: folder.color().to_string(),
            description: folder.description().to_string(),
            created_at: folder.created_at().to_rfc3339(),
            updated_at: folder.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommonVariablesResponse {
    pub folder_id: String,
    pub common_variables: Vec<VariableReference>,
    pub groups: VariableGroups,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchGenerateResponse {
    pub folder_id: String,
    pub results: Vec<BatchResult>,
    pub failures: Vec<BatchFailure>,
}

/// GET /folders
pub async fn list_folders(
    State(state): State<AppState>,
) -> Result<Json<Vec<FolderResponse>>, ApiError> {
    let folders = state.folder_service.list().await?;
    Ok(Json(folders.iter().map(FolderResponse::from).collect()))
}

/// POST /folders
pub async fn create_folder(
    State(state): State<AppState>,
    Json(request): Json<CreateFolderApiRequest>,
) -> Result<Json<FolderResponse>, ApiError> {
    debug!(name = %request.name, "Creating folder");

    let folder = state
        .folder_service
        .create(CreateFolderRequest {
            id: request.id,
            name: request.name,
            color: request.color,
            description: request.description,
        })
        .await?;

    Ok(Json(FolderResponse::from(&folder)))
}

/// GET /folders/{folder_id}
pub async fn get_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Result<Json<FolderResponse>, ApiError> {
    let folder = state.folder_service.get_required(&folder_id).await?;
    Ok(Json(FolderResponse::from(&folder)))
}

/// PUT /folders/{folder_id}
pub async fn update_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
    Json(request): Json<UpdateFolderApiRequest>,
) -> Result<Json<FolderResponse>, ApiError> {
    debug!(folder_id = %folder_id, "Updating folder");

    let folder = state
        .folder_service
        .update(
            &folder_id,
            UpdateFolderRequest {
                name: request.name,
                color: request.color,
                description: request.description,
            },
        )
        .await?;

    Ok(Json(FolderResponse::from(&folder)))
}

/// DELETE /folders/{folder_id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(folder_id = %folder_id, "Deleting folder");

    if !state.folder_service.delete(&folder_id).await? {
        return Err(ApiError::not_found(format!("Folder '{}' not found", folder_id)));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": folder_id
    })))
}

/// GET /folders/{folder_id}/templates
pub async fn folder_templates(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Result<Json<Vec<TemplateResponse>>, ApiError> {
    let templates = state.folder_service.templates(&folder_id).await?;
    Ok(Json(templates.iter().map(TemplateResponse::from).collect()))
}

/// GET /folders/{folder_id}/common-variables
pub async fn common_variables(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Result<Json<CommonVariablesResponse>, ApiError> {
    let common_variables = state.folder_service.common_variables(&folder_id).await?;
    let groups = group_variables(&common_variables);

    Ok(Json(CommonVariablesResponse {
        folder_id,
        common_variables,
        groups,
    }))
}

/// POST /folders/{folder_id}/batch-generate
pub async fn batch_generate(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
    Json(request): Json<BatchGenerateApiRequest>,
) -> Result<Json<BatchGenerateResponse>, ApiError> {
    debug!(folder_id = %folder_id, variables = request.variables.len(), "Batch generating");

    let values = values_from_json(request.variables);
    let outcome = state.folder_service.batch_generate(&folder_id, &values).await?;

    Ok(Json(BatchGenerateResponse {
        folder_id,
        results: outcome.results,
        failures: outcome.failures,
    }))
}
