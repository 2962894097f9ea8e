use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the full router with application state.
///
/// Resource routes are served both at the root and under `/api`.
pub fn create_router(state: AppState) -> Router {
    let resources = handlers::create_resource_router();

    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .merge(resources.clone())
        .nest("/api", resources)
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::generation::MockSentenceGenerator;
    use crate::domain::storage::mock::MockStorage;
    use crate::domain::storage::Storage;
    use crate::domain::{
        ContentRecord, Folder, FolderId, GenerationRecord, SentenceGenerator, Template, TemplateId,
    };
    use crate::infrastructure::services::{
        ContentService, FolderService, GenerationService, TemplateService,
    };
    use crate::infrastructure::storage::InMemoryStorage;

    fn state_with(
        templates: Arc<dyn Storage<Template>>,
        generator: Option<Arc<dyn SentenceGenerator>>,
    ) -> AppState {
        let folder = Folder::new(FolderId::new("session-1").unwrap(), "1회기");
        let folders: Arc<dyn Storage<Folder>> =
            Arc::new(InMemoryStorage::with_entities(vec![folder]));

        AppState::new(
            Arc::new(TemplateService::new(templates.clone(), folders.clone())),
            Arc::new(FolderService::new(folders, templates)),
            Arc::new(ContentService::new(Arc::new(
                InMemoryStorage::<ContentRecord>::new(),
            ))),
            Arc::new(GenerationService::new(
                generator,
                Arc::new(InMemoryStorage::<GenerationRecord>::new()),
            )),
        )
    }

    fn test_router() -> Router {
        create_router(state_with(Arc::new(InMemoryStorage::<Template>::new()), None))
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let router = test_router();

        let (status, body) = send(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, _) = send(&router, "GET", "/live", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&router, "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
    }

    #[tokio::test]
    async fn test_template_lifecycle() {
        let router = test_router();

        let (status, created) = send(
            &router,
            "POST",
            "/templates",
            Some(json!({
                "name": "체크인",
                "description": "첫 인사",
                "body": "안녕 {{{아동 이름}}}, 나는 {{{핑퐁 이름}}}야. {{{아동 이름}}}!",
                "tags": {"용도": "체크인", "회기": "1회기"}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["variables"], json!(["아동 이름", "핑퐁 이름"]));
        let id = created["id"].as_str().unwrap().to_string();

        let (status, listed) = send(&router, "GET", "/api/templates?purpose=%EC%B2%B4%ED%81%AC%EC%9D%B8", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (_, variables) = send(&router, "GET", &format!("/templates/{}/variables", id), None).await;
        assert_eq!(variables[0]["category"], "child");
        assert_eq!(variables[1]["category"], "ping_pong");
        assert_eq!(variables[1]["label"], "핑퐁 관련");

        let (status, generated) = send(
            &router,
            "POST",
            "/templates/generate",
            Some(json!({"template_id": id, "variables": {"아동 이름": "민수"}})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(generated["final_prompt"], "안녕 민수, 나는 야. 민수!");
        assert_eq!(generated["found_variables"], json!(["아동 이름", "핑퐁 이름"]));
        assert_eq!(generated["template_name"], "체크인");

        let (status, _) = send(&router, "DELETE", &format!("/templates/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&router, "DELETE", &format!("/templates/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_duplicate_template_name_is_conflict() {
        let router = test_router();
        let body = json!({"name": "same", "body": "x"});

        send(&router, "POST", "/templates", Some(body.clone())).await;
        let (status, error) = send(&router, "POST", "/templates", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["code"], "conflict");
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_envelope() {
        let router = test_router();

        let request = Request::builder()
            .method("POST")
            .uri("/templates")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_folder_common_variables_and_batch() {
        let folder_id = FolderId::new("session-1").unwrap();
        let templates: Arc<dyn Storage<Template>> = Arc::new(InMemoryStorage::with_entities(vec![
            Template::new(TemplateId::new("a").unwrap(), "A", "{{{x}}} {{{아동 y}}}")
                .with_folder(folder_id.clone())
                .with_created_at("2024-01-01T00:00:00Z".parse().unwrap()),
            Template::new(TemplateId::new("b").unwrap(), "B", "{{{아동 y}}} {{{핑퐁 z}}}")
                .with_folder(folder_id.clone())
                .with_created_at("2024-01-02T00:00:00Z".parse().unwrap()),
        ]));
        let router = create_router(state_with(templates, None));

        let (status, common) = send(&router, "GET", "/folders/session-1/common-variables", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(common["folder_id"], "session-1");

        let names: Vec<&str> = common["common_variables"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["x", "아동 y", "핑퐁 z"]);
        assert_eq!(common["common_variables"][1]["usage_count"], 2);
        assert_eq!(common["groups"]["child"][0]["name"], "아동 y");
        assert_eq!(common["groups"]["ping_pong"][0]["name"], "핑퐁 z");

        let (status, batch) = send(
            &router,
            "POST",
            "/api/folders/session-1/batch-generate",
            Some(json!({"variables": {"x": "1", "아동 y": "2", "핑퐁 z": "3"}})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(batch["results"][0]["final_prompt"], "1 2");
        assert_eq!(batch["results"][1]["final_prompt"], "2 3");
        assert_eq!(batch["failures"], json!([]));
    }

    #[tokio::test]
    async fn test_batch_isolates_unreadable_template() {
        let folder_id = FolderId::new("session-1").unwrap();
        let storage = MockStorage::<Template>::new()
            .with_entity(
                Template::new(TemplateId::new("good").unwrap(), "Good", "hi {{{name}}}")
                    .with_folder(folder_id.clone()),
            )
            .with_entity(
                Template::new(TemplateId::new("bad").unwrap(), "Bad", "{{{name}}}")
                    .with_folder(folder_id.clone()),
            )
            .with_broken_key("bad");
        let router = create_router(state_with(Arc::new(storage), None));

        let (status, batch) = send(
            &router,
            "POST",
            "/folders/session-1/batch-generate",
            Some(json!({"variables": {"name": "민수"}})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(batch["results"].as_array().unwrap().len(), 1);
        assert_eq!(batch["results"][0]["final_prompt"], "hi 민수");
        assert_eq!(batch["failures"][0]["template_id"], "bad");
        assert_eq!(batch["failures"][0]["template_name"], "Bad");
    }

    #[tokio::test]
    async fn test_folder_delete_unassigns_templates() {
        let router = test_router();

        let (_, template) = send(
            &router,
            "POST",
            "/templates",
            Some(json!({"name": "t", "body": "{{{x}}}", "folder_id": "session-1"})),
        )
        .await;
        assert_eq!(template["folder_id"], "session-1");

        let (status, _) = send(&router, "DELETE", "/folders/session-1", None).await;
        assert_eq!(status, StatusCode::OK);

        let id = template["id"].as_str().unwrap();
        let (_, template) = send(&router, "GET", &format!("/templates/{}", id), None).await;
        assert!(template["folder_id"].is_null());

        let (status, _) = send(&router, "GET", "/folders/session-1/common-variables", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_content_search() {
        let router = test_router();

        send(
            &router,
            "POST",
            "/contents",
            Some(json!({"title": "뽀로로", "content": "펭귄 친구들", "category": "애니메이션"})),
        )
        .await;
        send(
            &router,
            "POST",
            "/contents",
            Some(json!({"title": "로봇 장난감", "content": "변신", "category": "로봇"})),
        )
        .await;

        let (status, found) = send(&router, "GET", "/contents/search?search=%ED%8E%AD%EA%B7%84", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["title"], "뽀로로");

        let (_, all) = send(&router, "GET", "/contents", None).await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_generation_without_key_is_not_configured() {
        let router = test_router();

        let (status, body) = send(&router, "POST", "/ai/sample-phrase", Some(json!({"keyword": "공룡"}))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "not_configured");
    }

    #[tokio::test]
    async fn test_generation_records_history() {
        let generator: Arc<dyn SentenceGenerator> =
            Arc::new(MockSentenceGenerator::new(&["공룡이 좋아요", "공룡 그림"]));
        let router = create_router(state_with(
            Arc::new(InMemoryStorage::<Template>::new()),
            Some(generator),
        ));

        let (status, body) = send(
            &router,
            "POST",
            "/ai/experience",
            Some(json!({"keyword": "공룡", "count": 2})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generation_type"], "experience");
        assert_eq!(body["generated_sentences"], json!(["공룡이 좋아요", "공룡 그림"]));

        let (_, history) = send(&router, "GET", "/ai/history", None).await;
        assert_eq!(history.as_array().unwrap().len(), 2);
        assert_eq!(history[0]["keyword"], "공룡");
    }
}
