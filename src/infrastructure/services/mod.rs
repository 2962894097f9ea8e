//! Infrastructure services

mod content_service;
mod folder_service;
mod generation_service;
mod template_service;

pub use content_service::{ContentRequest, ContentService};
pub use folder_service::{CreateFolderRequest, FolderService, UpdateFolderRequest};
pub use generation_service::{GenerationService, HISTORY_LIMIT};
pub use template_service::{
    CreateTemplateRequest, GeneratedPrompt, TemplateService, TemplateVariable,
    UpdateTemplateRequest,
};
