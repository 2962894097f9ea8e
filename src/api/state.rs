//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::{
    ContentService, FolderService, GenerationService, TemplateService,
};

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub template_service: Arc<TemplateService>,
    pub folder_service: Arc<FolderService>,
    pub content_service: Arc<ContentService>,
    pub generation_service: Arc<GenerationService>,
}

impl AppState {
    pub fn new(
        template_service: Arc<TemplateService>,
        folder_service: Arc<FolderService>,
        content_service: Arc<ContentService>,
        generation_service: Arc<GenerationService>,
    ) -> Self {
        Self {
            template_service,
            folder_service,
            content_service,
            generation_service,
        }
    }
}
