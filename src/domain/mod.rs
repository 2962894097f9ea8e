//! Domain layer - Core business logic and entities

pub mod batch;
pub mod content;
pub mod error;
pub mod folder;
pub mod generation;
pub mod id;
pub mod llm;
pub mod storage;
pub mod template;

pub use batch::{
    batch_generate, group_variables, resolve_common_variables, BatchFailure, BatchOutcome,
    BatchResult, TemplateLoadError, VariableGroups, VariableReference,
};
pub use content::{ContentFilter, ContentId, ContentRecord};
pub use error::DomainError;
pub use folder::{folder_templates, Folder, FolderId, DEFAULT_FOLDER_COLOR};
pub use generation::{
    GeneratedSentences, GenerationKind, GenerationRecord, GenerationRequest,
    LlmSentenceGenerator, SentenceGenerator,
};
pub use llm::{LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use template::{
    assemble, classify, extract_variables, TagCatalog, TagCategory, Template, TemplateFilter,
    TemplateId, TemplateTags, VariableCategory, VariableValues,
};
