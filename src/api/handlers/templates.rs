//! Template endpoints

use std::collections::HashMap;

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Query};
use crate::domain::{
    TagCatalog, Template, TemplateFilter, TemplateTags, VariableCategory, VariableValues,
};
use crate::infrastructure::services::{
    CreateTemplateRequest, GeneratedPrompt, TemplateVariable, UpdateTemplateRequest,
};

/// Request to create a template
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplateApiRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "fixed_content")]
    pub body: String,
    #[serde(default)]
    pub tags: TemplateTags,
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// Request to update a template; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTemplateApiRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "fixed_content")]
    pub body: Option<String>,
    pub tags: Option<TemplateTags>,
}

/// Request to move a template; `null` unassigns it
#[derive(Debug, Clone, Deserialize)]
pub struct MoveTemplateApiRequest {
    pub folder_id: Option<String>,
}

/// Request to assemble one template
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateApiRequest {
    pub template_id: String,
    #[serde(default)]
    pub variables: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub body: String,
    pub variables: Vec<String>,
    pub tags: TemplateTags,
    pub folder_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Template> for TemplateResponse {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id().as_str().to_string(),
            name: template.name().to_string(),
            description: template.description().to_string(),
            body: template.body().to_string(),
            variables: template.variables().into_owned(),
            tags: template.tags().clone(),
            folder_id: template.folder_id().map(|f| f.as_str().to_string()),
            created_at: template.created_at().to_rfc3339(),
            updated_at: template.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableResponse {
    pub name: String,
    pub category: VariableCategory,
    pub label: &'static str,
}

impl From<&TemplateVariable> for VariableResponse {
    fn from(variable: &TemplateVariable) -> Self {
        Self {
            name: variable.name.clone(),
            category: variable.category,
            label: variable.category.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub template_id: String,
    pub template_name: String,
    pub final_prompt: String,
    pub variables_used: VariableValues,
    pub found_variables: Vec<String>,
}

impl From<GeneratedPrompt> for GenerateResponse {
    fn from(prompt: GeneratedPrompt) -> Self {
        Self {
            template_id: prompt.template_id.into(),
            template_name: prompt.template_name,
            final_prompt: prompt.final_prompt,
            variables_used: prompt.variables_used,
            found_variables: prompt.found_variables,
        }
    }
}

/// Convert client-supplied values to text; non-string JSON is rendered as JSON
pub(crate) fn values_from_json(values: HashMap<String, serde_json::Value>) -> VariableValues {
    values
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (name, text)
        })
        .collect()
}

/// GET /templates
pub async fn list_templates(
    State(state): State<AppState>,
    Query(filter): Query<TemplateFilter>,
) -> Result<Json<Vec<TemplateResponse>>, ApiError> {
    debug!(filter = ?filter, "Listing templates");

    let templates = state.template_service.list(&filter).await?;
    Ok(Json(templates.iter().map(TemplateResponse::from).collect()))
}

/// POST /templates
pub async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateApiRequest>,
) -> Result<Json<TemplateResponse>, ApiError> {
    debug!(name = %request.name, "Creating template");

    let template = state
        .template_service
        .create(CreateTemplateRequest {
            id: request.id,
            name: request.name,
            description: request.description,
            body: request.body,
            tags: request.tags,
            folder_id: request.folder_id,
        })
        .await?;

    Ok(Json(TemplateResponse::from(&template)))
}

/// GET /templates/{template_id}
pub async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<Json<TemplateResponse>, ApiError> {
    let template = state.template_service.get_required(&template_id).await?;
    Ok(Json(TemplateResponse::from(&template)))
}

/// PUT /templates/{template_id}
pub async fn update_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
    Json(request): Json<UpdateTemplateApiRequest>,
) -> Result<Json<TemplateResponse>, ApiError> {
    debug!(template_id = %template_id, "Updating template");

    let template = state
        .template_service
        .update(
            &template_id,
            UpdateTemplateRequest {
                name: request.name,
                description: request.description,
                body: request.body,
                tags: request.tags,
            },
        )
        .await?;

    Ok(Json(TemplateResponse::from(&template)))
}

/// DELETE /templates/{template_id}
pub async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(template_id = %template_id, "Deleting template");

    if !state.template_service.delete(&template_id).await? {
        return Err(ApiError::not_found(format!(
            "Template '{}' not found",
            template_id
        )));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": template_id
    })))
}

/// PUT /templates/{template_id}/folder
pub async fn move_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
    Json(request): Json<MoveTemplateApiRequest>,
) -> Result<Json<TemplateResponse>, ApiError> {
    let template = state
        .template_service
        .move_to_folder(&template_id, request.folder_id.as_deref())
        .await?;

    Ok(Json(TemplateResponse::from(&template)))
}

/// GET /templates/tags
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<TagCatalog>, ApiError> {
    Ok(Json(state.template_service.tags().await?))
}

/// GET /templates/{template_id}/variables
pub async fn template_variables(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<Json<Vec<VariableResponse>>, ApiError> {
    let variables = state.template_service.variables(&template_id).await?;
    Ok(Json(variables.iter().map(VariableResponse::from).collect()))
}

/// POST /templates/generate
pub async fn generate_prompt(
    State(state): State<AppState>,
    Json(request): Json<GenerateApiRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    debug!(template_id = %request.template_id, "Generating prompt");

    let prompt = state
        .template_service
        .generate(&request.template_id, values_from_json(request.variables))
        .await?;

    Ok(Json(GenerateResponse::from(prompt)))
}
