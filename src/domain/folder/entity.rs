//! Folder entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::define_id;
use crate::domain::storage::StorageEntity;
use crate::domain::template::Template;

define_id!(
    /// Folder identifier
    FolderId,
    "Folder"
);

/// Color used when none is given
pub const DEFAULT_FOLDER_COLOR: &str = "#3b82f6";

/// A named group of templates, used for browsing and batch generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    id: FolderId,
    name: String,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default)]
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_FOLDER_COLOR.to_string()
}

impl Folder {
    pub fn new(id: FolderId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            color: default_color(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &FolderId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Folder {
    type Key = FolderId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Pick the templates of `folder_id` and put them in folder order: oldest
/// first, ties broken by id.
pub fn folder_templates(folder_id: &FolderId, templates: Vec<Template>) -> Vec<Template> {
    let mut members: Vec<Template> = templates
        .into_iter()
        .filter(|t| t.belongs_to(folder_id))
        .collect();

    members.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
    members
}
