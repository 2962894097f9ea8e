//! Prompt Template Manager
//!
//! Stores prompt templates with `{{{name}}}` placeholders and assembles them:
//! - Placeholder extraction and variable classification
//! - Folders with common-variable resolution and batch assembly
//! - Content reference records
//! - Optional sentence generation through an OpenAI-compatible API

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{
    ContentRecord, DomainError, Folder, FolderId, GenerationRecord, LlmSentenceGenerator,
    SentenceGenerator, TagCategory, Template, TemplateId, TemplateTags,
};
use infrastructure::{
    llm::create_llm_provider,
    services::{ContentService, FolderService, GenerationService, TemplateService},
    storage::InMemoryStorage,
};
use tracing::info;

/// Create the application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let generator = create_llm_provider(&config.ai)?.map(|provider| {
        Arc::new(LlmSentenceGenerator::new(provider, &config.ai.model)) as Arc<dyn SentenceGenerator>
    });

    let seed_folders = default_folders()?;
    let seed_templates = default_templates()?;

    info!(
        folders = seed_folders.len(),
        templates = seed_templates.len(),
        ai_enabled = generator.is_some(),
        "Using in-memory storage with default data"
    );

    let folders = Arc::new(InMemoryStorage::with_entities(seed_folders));
    let templates = Arc::new(InMemoryStorage::with_entities(seed_templates));

    Ok(AppState::new(
        Arc::new(TemplateService::new(templates.clone(), folders.clone())),
        Arc::new(FolderService::new(folders, templates)),
        Arc::new(ContentService::new(Arc::new(
            InMemoryStorage::<ContentRecord>::new(),
        ))),
        Arc::new(GenerationService::new(
            generator,
            Arc::new(InMemoryStorage::<GenerationRecord>::new()),
        )),
    ))
}

const DEFAULT_FOLDER_ID: &str = "session-1";

fn default_folders() -> Result<Vec<Folder>, DomainError> {
    Ok(vec![
        Folder::new(FolderId::new(DEFAULT_FOLDER_ID)?, "1회기")
            .with_description("첫 만남 세션에 쓰는 템플릿"),
    ])
}

fn default_templates() -> Result<Vec<Template>, DomainError> {
    let folder_id = FolderId::new(DEFAULT_FOLDER_ID)?;
    let tags = |purpose: &str| {
        TemplateTags::new()
            .with(TagCategory::Purpose, purpose)
            .with(TagCategory::Session, "1회기")
    };

    Ok(vec![
        Template::new(
            TemplateId::new("check-in")?,
            "체크인 인사",
            "너는 {{{핑퐁 이름}}}이야. {{{아동 이름}}}에게 오늘 기분을 물어봐. \
             {{{아동 이름}}}은 {{{아동 나이}}}살이고 {{{관심사}}}를 좋아해.",
        )
        .with_description("세션을 시작하며 아이의 기분을 묻는다")
        .with_tags(tags("체크인"))
        .with_folder(folder_id.clone()),
        Template::new(
            TemplateId::new("wrap-up")?,
            "마무리 인사",
            "너는 {{{핑퐁 이름}}}이야. 오늘 {{{관심사}}} 이야기를 정리하고 \
             {{{아동 이름}}}에게 다음 만남을 약속해.",
        )
        .with_description("세션을 마치며 다음 약속을 잡는다")
        .with_tags(tags("마무리"))
        .with_folder(folder_id),
    ])
}
