//! Folder service - CRUD, common variables and batch generation

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::storage::Storage;
use crate::domain::template::count_unterminated;
use crate::domain::{
    batch_generate, folder_templates, resolve_common_variables, BatchOutcome, DomainError, Folder,
    FolderId, Template, TemplateLoadError, VariableReference, VariableValues,
};

/// Request to create a new folder
#[derive(Debug, Clone, Default)]
pub struct CreateFolderRequest {
    /// Explicit identifier, generated when absent
    pub id: Option<String>,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// Request to update an existing folder; unset fields are kept
#[derive(Debug, Clone, Default)]
pub struct UpdateFolderRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// Folder service
pub struct FolderService {
    folders: Arc<dyn Storage<Folder>>,
    templates: Arc<dyn Storage<Template>>,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService").finish()
    }
}

impl FolderService {
    pub fn new(folders: Arc<dyn Storage<Folder>>, templates: Arc<dyn Storage<Template>>) -> Self {
        Self { folders, templates }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Folder>, DomainError> {
        let folder_id = FolderId::new(id)?;
        self.folders.get(&folder_id).await
    }

    pub async fn get_required(&self, id: &str) -> Result<Folder, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Folder '{}' not found", id)))
    }

    /// List folders, oldest first
    pub async fn list(&self) -> Result<Vec<Folder>, DomainError> {
        let mut folders = self.folders.list().await?;

        folders.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(folders)
    }

    pub async fn create(&self, request: CreateFolderRequest) -> Result<Folder, DomainError> {
        let folder_id = match request.id {
            Some(ref id) => FolderId::new(id.as_str())?,
            None => FolderId::generate(),
        };

        let mut folder = Folder::new(folder_id, validate_name(&request.name)?);

        if let Some(color) = request.color.filter(|c| !c.trim().is_empty()) {
            folder = folder.with_color(color);
        }

        if let Some(description) = request.description {
            folder = folder.with_description(description);
        }

        let folder = self.folders.create(folder).await?;
        info!(folder_id = %folder.id(), name = folder.name(), "Folder created");
        Ok(folder)
    }

    pub async fn update(&self, id: &str, request: UpdateFolderRequest) -> Result<Folder, DomainError> {
        let mut folder = self.get_required(id).await?;

        if let Some(name) = request.name {
            folder.set_name(validate_name(&name)?);
        }

        if let Some(color) = request.color.filter(|c| !c.trim().is_empty()) {
            folder.set_color(color);
        }

        if let Some(description) = request.description {
            folder.set_description(description);
        }

        let folder = self.folders.update(folder).await?;
        info!(folder_id = %folder.id(), "Folder updated");
        Ok(folder)
    }

    /// Delete a folder; its templates are kept and become unassigned
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let folder_id = FolderId::new(id)?;

        if !self.folders.exists(&folder_id).await? {
            return Ok(false);
        }

        let members = folder_templates(&folder_id, self.templates.list().await?);
        let unassigned = members.len();

        for mut template in members {
            template.set_folder(None);
            self.templates.update(template).await?;
        }

        let deleted = self.folders.delete(&folder_id).await?;
        info!(folder_id = %folder_id, unassigned, "Folder deleted");
        Ok(deleted)
    }

    /// Templates of a folder in folder order
    pub async fn templates(&self, id: &str) -> Result<Vec<Template>, DomainError> {
        let folder = self.get_required(id).await?;
        Ok(folder_templates(folder.id(), self.templates.list().await?))
    }

    /// Variables used across the folder's templates
    pub async fn common_variables(&self, id: &str) -> Result<Vec<VariableReference>, DomainError> {
        let templates = self.templates(id).await?;
        let references = resolve_common_variables(&templates);

        debug!(
            folder_id = id,
            templates = templates.len(),
            variables = references.len(),
            "Resolved common variables"
        );
        Ok(references)
    }

    /// Assemble every template of the folder with one set of values.
    ///
    /// Each template is re-read individually; a template that fails to load
    /// is reported in the outcome's failures and the rest still run.
    pub async fn batch_generate(
        &self,
        id: &str,
        values: &VariableValues,
    ) -> Result<BatchOutcome, DomainError> {
        let members = self.templates(id).await?;
        let folder_id = FolderId::new(id)?;

        let loads = members.iter().map(|member| async move {
            let loaded = self.templates.get(member.id()).await;
            let load_error = |message: String| {
                TemplateLoadError::new(member.id().clone(), message)
                    .with_template_name(member.name())
            };

            match loaded {
                Ok(Some(template)) => Ok(template),
                Ok(None) => Err(load_error("Template no longer exists".to_string())),
                Err(e) => Err(load_error(e.to_string())),
            }
        });

        let entries = join_all(loads).await;

        for entry in &entries {
            match entry {
                Ok(template) if count_unterminated(template.body()) > 0 => {
                    warn!(template_id = %template.id(), "Assembling template with unterminated placeholders");
                }
                Err(e) => warn!(template_id = %e.template_id, error = %e.message, "Template skipped in batch"),
                _ => {}
            }
        }

        let outcome = batch_generate(&folder_id, entries, values);

        info!(
            folder_id = %folder_id,
            results = outcome.results.len(),
            failures = outcome.failures.len(),
            "Batch generation finished"
        );
        Ok(outcome)
    }
}

fn validate_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(DomainError::validation("Folder name cannot be empty"));
    }
    Ok(name.to_string())
}
