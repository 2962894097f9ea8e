//! Template service - CRUD, filtering and single-template prompt assembly

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::storage::Storage;
use crate::domain::template::count_unterminated;
use crate::domain::{
    assemble, classify, DomainError, Folder, FolderId, TagCatalog, Template, TemplateFilter,
    TemplateId, TemplateTags, VariableCategory, VariableValues,
};

/// Request to create a new template
#[derive(Debug, Clone, Default)]
pub struct CreateTemplateRequest {
    /// Explicit identifier, generated when absent
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub body: String,
    pub tags: TemplateTags,
    pub folder_id: Option<String>,
}

/// Request to update an existing template; unset fields are kept
#[derive(Debug, Clone, Default)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub tags: Option<TemplateTags>,
}

/// A variable of a template with its display category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVariable {
    pub name: String,
    pub category: VariableCategory,
}

/// Result of assembling one template
#[derive(Debug, Clone)]
pub struct GeneratedPrompt {
    pub template_id: TemplateId,
    pub template_name: String,
    pub final_prompt: String,
    pub variables_used: VariableValues,
    pub found_variables: Vec<String>,
}

/// Template service
pub struct TemplateService {
    templates: Arc<dyn Storage<Template>>,
    folders: Arc<dyn Storage<Folder>>,
}

impl std::fmt::Debug for TemplateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateService").finish()
    }
}

impl TemplateService {
    pub fn new(templates: Arc<dyn Storage<Template>>, folders: Arc<dyn Storage<Folder>>) -> Self {
        Self { templates, folders }
    }

    /// Get a template by ID
    pub async fn get(&self, id: &str) -> Result<Option<Template>, DomainError> {
        let template_id = TemplateId::new(id)?;
        self.templates.get(&template_id).await
    }

    /// Get a template by ID, returning an error if not found
    pub async fn get_required(&self, id: &str) -> Result<Template, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Template '{}' not found", id)))
    }

    /// List templates matching `filter`, newest first
    pub async fn list(&self, filter: &TemplateFilter) -> Result<Vec<Template>, DomainError> {
        let mut templates: Vec<Template> = self
            .templates
            .list()
            .await?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();

        templates.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });

        debug!(count = templates.len(), filtered = !filter.is_empty(), "Listed templates");
        Ok(templates)
    }

    /// Distinct tag values across all templates
    pub async fn tags(&self) -> Result<TagCatalog, DomainError> {
        let templates = self.templates.list().await?;
        Ok(TagCatalog::from_templates(&templates))
    }

    /// Create a new template
    pub async fn create(&self, request: CreateTemplateRequest) -> Result<Template, DomainError> {
        let template_id = match request.id {
            Some(ref id) => TemplateId::new(id.as_str())?,
            None => TemplateId::generate(),
        };

        let name = validate_name(&request.name)?;
        self.ensure_unique_name(&name, None).await?;

        let mut template =
            Template::new(template_id, name, request.body).with_tags(request.tags);

        if let Some(description) = request.description {
            template = template.with_description(description);
        }

        if let Some(ref folder_id) = request.folder_id {
            template = template.with_folder(self.existing_folder(folder_id).await?);
        }

        warn_on_malformed(&template);

        let template = self.templates.create(template).await?;
        info!(template_id = %template.id(), name = template.name(), "Template created");
        Ok(template)
    }

    /// Update an existing template
    pub async fn update(
        &self,
        id: &str,
        request: UpdateTemplateRequest,
    ) -> Result<Template, DomainError> {
        let mut template = self.get_required(id).await?;

        if let Some(name) = request.name {
            let name = validate_name(&name)?;
            self.ensure_unique_name(&name, Some(template.id())).await?;
            template.set_name(name);
        }

        if let Some(description) = request.description {
            template.set_description(description);
        }

        if let Some(body) = request.body {
            template.set_body(body);
            warn_on_malformed(&template);
        }

        if let Some(tags) = request.tags {
            template.set_tags(tags);
        }

        let template = self.templates.update(template).await?;
        info!(template_id = %template.id(), "Template updated");
        Ok(template)
    }

    /// Delete a template by ID
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let template_id = TemplateId::new(id)?;
        let deleted = self.templates.delete(&template_id).await?;

        if deleted {
            info!(template_id = %template_id, "Template deleted");
        }
        Ok(deleted)
    }

    /// Assign a template to a folder, or unassign it with `None`
    pub async fn move_to_folder(
        &self,
        id: &str,
        folder_id: Option<&str>,
    ) -> Result<Template, DomainError> {
        let mut template = self.get_required(id).await?;

        let folder_id = match folder_id {
            Some(folder_id) => Some(self.existing_folder(folder_id).await?),
            None => None,
        };

        template.set_folder(folder_id);
        let template = self.templates.update(template).await?;

        info!(
            template_id = %template.id(),
            folder_id = ?template.folder_id().map(FolderId::as_str),
            "Template moved"
        );
        Ok(template)
    }

    /// Variables of a template in first-appearance order, with their category
    pub async fn variables(&self, id: &str) -> Result<Vec<TemplateVariable>, DomainError> {
        let template = self.get_required(id).await?;

        Ok(template
            .variables()
            .iter()
            .map(|name| TemplateVariable {
                category: classify(name),
                name: name.clone(),
            })
            .collect())
    }

    /// Assemble a single template with the given values
    pub async fn generate(
        &self,
        id: &str,
        values: VariableValues,
    ) -> Result<GeneratedPrompt, DomainError> {
        let template = self.get_required(id).await?;
        let final_prompt = assemble(template.body(), &values);

        debug!(template_id = %template.id(), values = values.len(), "Prompt assembled");

        Ok(GeneratedPrompt {
            found_variables: template.variables().into_owned(),
            template_id: template.id().clone(),
            template_name: template.name().to_string(),
            final_prompt,
            variables_used: values,
        })
    }

    async fn ensure_unique_name(
        &self,
        name: &str,
        current: Option<&TemplateId>,
    ) -> Result<(), DomainError> {
        let taken = self
            .templates
            .list()
            .await?
            .iter()
            .any(|t| t.name() == name && Some(t.id()) != current);

        if taken {
            return Err(DomainError::conflict(format!(
                "Template name '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    async fn existing_folder(&self, folder_id: &str) -> Result<FolderId, DomainError> {
        let folder_id = FolderId::new(folder_id)?;

        if !self.folders.exists(&folder_id).await? {
            return Err(DomainError::validation(format!(
                "Folder '{}' does not exist",
                folder_id
            )));
        }
        Ok(folder_id)
    }
}

fn validate_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(DomainError::validation("Template name cannot be empty"));
    }
    Ok(name.to_string())
}

fn warn_on_malformed(template: &Template) {
    let unterminated = count_unterminated(template.body());

    if unterminated > 0 {
        warn!(
            template_id = %template.id(),
            unterminated,
            "Template body has unterminated placeholders, they will be kept as text"
        );
    }
}
