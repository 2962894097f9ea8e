//! Resource endpoints

pub mod contents;
pub mod folders;
pub mod generation;
pub mod templates;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create the resource router
pub fn create_resource_router() -> Router<AppState> {
    Router::new()
        // Templates
        .route(
            "/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route("/templates/tags", get(templates::list_tags))
        .route("/templates/generate", post(templates::generate_prompt))
        .route(
            "/templates/{template_id}",
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
        .route("/templates/{template_id}/folder", put(templates::move_template))
        .route(
            "/templates/{template_id}/variables",
            get(templates::template_variables),
        )
        // Folders
        .route(
            "/folders",
            get(folders::list_folders).post(folders::create_folder),
        )
        .route(
            "/folders/{folder_id}",
            get(folders::get_folder)
                .put(folders::update_folder)
                .delete(folders::delete_folder),
        )
        .route("/folders/{folder_id}/templates", get(folders::folder_templates))
        .route(
            "/folders/{folder_id}/common-variables",
            get(folders::common_variables),
        )
        .route(
            "/folders/{folder_id}/batch-generate",
            post(folders::batch_generate),
        )
        // Content
        .route(
            "/contents",
            get(contents::list_contents).post(contents::create_content),
        )
        .route("/contents/search", get(contents::search_contents))
        .route(
            "/contents/{content_id}",
            get(contents::get_content)
                .put(contents::update_content)
                .delete(contents::delete_content),
        )
        // Sentence generation
        .route("/ai/sample-phrase", post(generation::sample_phrase))
        .route("/ai/experience", post(generation::experience))
        .route("/ai/history", get(generation::history))
}
