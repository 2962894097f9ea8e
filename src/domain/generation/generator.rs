//! Sentence generation backed by a chat-completion provider

use std::sync::Arc;

use async_trait::async_trait;

use super::entity::{GenerationKind, GenerationRequest};
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::DomainError;

const MAX_TOKENS: u32 = 1000;

/// Source of generated sentences
#[async_trait]
pub trait SentenceGenerator: Send + Sync + std::fmt::Debug {
    async fn generate(
        &self,
        kind: GenerationKind,
        request: &GenerationRequest,
    ) -> Result<Vec<String>, DomainError>;
}

/// Keep the lines of a completion that start with `-`, without the dash.
/// Bare dashes are dropped.
pub fn parse_generated_sentences(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix('-'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn system_prompt(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::SamplePhrase => {
            "당신은 아동 상담 전문가입니다. 5-7세 아동이 사용할 법한 자연스러운 대화 문장을 생성해주세요."
        }
        GenerationKind::Experience => {
            "당신은 아동 심리 전문가입니다. 아동의 경험과 감정을 분석한 문장을 생성해주세요."
        }
    }
}

fn temperature(kind: GenerationKind) -> f32 {
    match kind {
        GenerationKind::SamplePhrase => 0.8,
        GenerationKind::Experience => 0.7,
    }
}

/// User message asking for `request.count` sentences about the keyword
pub fn user_prompt(kind: GenerationKind, request: &GenerationRequest) -> String {
    let instructions = match kind {
        GenerationKind::SamplePhrase => format!(
            "아동 상담용 대화 문장을 {}개 생성해주세요.\n\
             - 5-7세 아동이 말할 법한 자연스러운 문장\n\
             - 흥미와 관심을 표현하는 문장\n\
             - 상대방과의 상호작용을 유도하는 문장\n\
             - 키워드와 관련된 구체적인 상황이나 경험 포함\n\
             - 각 문장을 줄바꿈으로 구분해주세요\n\n\
             예시:\n\
             - \"나는 볼트처럼 파란 로봇으로 변신해서 펀치 날리고 싶어!\"\n\
             - \"너도 루시처럼 분홍 로봇으로 변신해서 레이저 쏘고 싶어?\"",
            request.count
        ),
        GenerationKind::Experience => format!(
            "아동의 경험, 감정, 관심사를 분석한 문장을 {}개 생성해주세요.\n\
             - 아동이 해당 키워드에 대해 가질 수 있는 경험\n\
             - 아동의 감정이나 반응\n\
             - 아동의 관심사나 선호도\n\
             - 구체적인 상황이나 활동 포함\n\
             - 각 문장을 줄바꿈으로 구분해주세요\n\n\
             예시:\n\
             - \"상대와 함께 상상하는 것을 즐김.\"\n\
             - \"미니특공대 인형을 가지고 있어.\"",
            request.count
        ),
    };

    format!("키워드: {}\n\n{}", request.keyword.trim(), instructions)
}

/// Generator that asks an LLM provider for a dash-prefixed list
#[derive(Debug, Clone)]
pub struct LlmSentenceGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl LlmSentenceGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    fn build_request(kind: GenerationKind, request: &GenerationRequest) -> LlmRequest {
        LlmRequest::builder()
            .system(system_prompt(kind))
            .user(user_prompt(kind, request))
            .temperature(temperature(kind))
            .max_tokens(MAX_TOKENS)
            .build()
    }
}

#[async_trait]
impl SentenceGenerator for LlmSentenceGenerator {
    async fn generate(
        &self,
        kind: GenerationKind,
        request: &GenerationRequest,
    ) -> Result<Vec<String>, DomainError> {
        let response = self
            .provider
            .chat(&self.model, Self::build_request(kind, request))
            .await?;

        Ok(parse_generated_sentences(response.content()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::{LlmResponse, Message, MockLlmProvider};

    #[test]
    fn test_parse_keeps_dash_lines() {
        let text = "다음과 같습니다:\n- 첫 번째 문장\n  -두 번째 문장  \n\n1. 번호 문장\n- \n- 세 번째";
        assert_eq!(
            parse_generated_sentences(text),
            vec!["첫 번째 문장", "두 번째 문장", "세 번째"]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_generated_sentences("").is_empty());
        assert!(parse_generated_sentences("no list here").is_empty());
    }

    #[test]
    fn test_user_prompt_mentions_keyword_and_count() {
        let request = GenerationRequest::new(" 로봇 ").with_count(5);
        let prompt = user_prompt(GenerationKind::SamplePhrase, &request);

        assert!(prompt.starts_with("키워드: 로봇\n"));
        assert!(prompt.contains("5개"));
    }

    #[tokio::test]
    async fn test_llm_generator() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_response(LlmResponse::new(
            "resp-1",
            "gpt-3.5-turbo",
            Message::assistant("- 로봇 좋아!\n- 같이 놀자"),
        )));
        let generator = LlmSentenceGenerator::new(provider.clone(), "gpt-3.5-turbo");

        let sentences = generator
            .generate(GenerationKind::Experience, &GenerationRequest::new("로봇"))
            .await
            .unwrap();

        assert_eq!(sentences, vec!["로봇 좋아!", "같이 놀자"]);

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "gpt-3.5-turbo");
        assert_eq!(requests[0].1.temperature, Some(0.7));
        assert_eq!(requests[0].1.max_tokens, Some(MAX_TOKENS));
    }

    #[tokio::test]
    async fn test_llm_generator_propagates_provider_error() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_error("HTTP 500"));
        let generator = LlmSentenceGenerator::new(provider, "gpt-3.5-turbo");

        let result = generator
            .generate(GenerationKind::SamplePhrase, &GenerationRequest::new("로봇"))
            .await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }
}
