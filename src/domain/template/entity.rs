//! Template entity and related types

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::placeholder::extract_variables;
use crate::domain::folder::FolderId;
use crate::domain::id::define_id;
use crate::domain::storage::StorageEntity;

define_id!(
    /// Template identifier
    TemplateId,
    "Template"
);

/// Fixed tag categories a template can be labelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    /// What the prompt is used for ("용도"), e.g. check-in
    Purpose,
    /// Counselling session ("회기"), e.g. "1회기"
    Session,
    /// Child profile ("아동유형"), e.g. "소극형"
    ChildType,
}

impl TagCategory {
    pub const ALL: [TagCategory; 3] = [Self::Purpose, Self::Session, Self::ChildType];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purpose => "purpose",
            Self::Session => "session",
            Self::ChildType => "child_type",
        }
    }
}

/// Tag values of a template, one optional value per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateTags {
    #[serde(default, alias = "용도", skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, alias = "회기", skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(default, alias = "아동유형", skip_serializing_if = "Option::is_none")]
    pub child_type: Option<String>,
}

impl TemplateTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: TagCategory, value: impl Into<String>) -> Self {
        self.set(category, Some(value.into()));
        self
    }

    pub fn get(&self, category: TagCategory) -> Option<&str> {
        match category {
            TagCategory::Purpose => self.purpose.as_deref(),
            TagCategory::Session => self.session.as_deref(),
            TagCategory::ChildType => self.child_type.as_deref(),
        }
    }

    /// Set a tag; blank values clear it
    pub fn set(&mut self, category: TagCategory, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());

        match category {
            TagCategory::Purpose => self.purpose = value,
            TagCategory::Session => self.session = value,
            TagCategory::ChildType => self.child_type = value,
        }
    }

    /// Drop blank values that may come in from clients
    pub fn normalized(mut self) -> Self {
        for category in TagCategory::ALL {
            let value = self.get(category).map(str::to_string);
            self.set(category, value);
        }
        self
    }
}

/// A reusable prompt template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    id: TemplateId,
    name: String,
    #[serde(default)]
    description: String,
    /// Free text with `{{{name}}}` placeholders
    body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    folder_id: Option<FolderId>,
    #[serde(default)]
    tags: TemplateTags,
    /// Cached result of extracting the body's placeholders
    #[serde(default)]
    variables: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Template {
    pub fn new(id: TemplateId, name: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let now = Utc::now();

        Self {
            id,
            name: name.into(),
            description: String::new(),
            variables: extract_variables(&body),
            body,
            folder_id: None,
            tags: TemplateTags::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: TemplateTags) -> Self {
        self.tags = tags.normalized();
        self
    }

    pub fn with_folder(mut self, folder_id: FolderId) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    // Getters

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn folder_id(&self) -> Option<&FolderId> {
        self.folder_id.as_ref()
    }

    pub fn tags(&self) -> &TemplateTags {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn belongs_to(&self, folder_id: &FolderId) -> bool {
        self.folder_id.as_ref() == Some(folder_id)
    }

    /// Whether the cached variable list no longer matches the body
    pub fn is_variable_cache_stale(&self) -> bool {
        self.variables != extract_variables(&self.body)
    }

    /// Variables referenced by the body.
    ///
    /// The cached list is only trusted when it matches the current body;
    /// records persisted before a body edit are recomputed on the fly.
    pub fn variables(&self) -> Cow<'_, [String]> {
        let current = extract_variables(&self.body);

        if current == self.variables {
            Cow::Borrowed(self.variables.as_slice())
        } else {
            Cow::Owned(current)
        }
    }

    /// Recompute the cached variables, returns true if they changed
    pub fn refresh_variables(&mut self) -> bool {
        let current = extract_variables(&self.body);

        if current == self.variables {
            return false;
        }

        self.variables = current;
        true
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.refresh_variables();
        self.touch();
    }

    pub fn set_tags(&mut self, tags: TemplateTags) {
        self.tags = tags.normalized();
        self.touch();
    }

    pub fn set_folder(&mut self, folder_id: Option<FolderId>) {
        self.folder_id = folder_id;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Template {
    type Key = TemplateId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
