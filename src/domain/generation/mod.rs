//! Generation domain - AI-generated example sentences and their history

mod entity;
mod generator;

pub use entity::{
    GeneratedSentences, GenerationId, GenerationKind, GenerationRecord, GenerationRequest,
    DEFAULT_SENTENCE_COUNT, MAX_SENTENCE_COUNT,
};
pub use generator::{
    parse_generated_sentences, user_prompt, LlmSentenceGenerator, SentenceGenerator,
};

#[cfg(test)]
pub use generator::mock::MockSentenceGenerator;
