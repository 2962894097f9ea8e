//! Batch prompt generation over the templates of a folder

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::folder::FolderId;
use crate::domain::template::{assemble, Template, TemplateId, VariableValues};

/// A template of the folder that could not be loaded
#[derive(Debug, Clone, Error)]
#[error("Template '{template_id}' could not be loaded: {message}")]
pub struct TemplateLoadError {
    pub template_id: TemplateId,
    pub template_name: Option<String>,
    pub message: String,
}

impl TemplateLoadError {
    pub fn new(template_id: TemplateId, message: impl Into<String>) -> Self {
        Self {
            template_id,
            template_name: None,
            message: message.into(),
        }
    }

    pub fn with_template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }
}

/// One assembled prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub template_id: TemplateId,
    pub template_name: String,
    pub final_prompt: String,
}

/// One template that produced no prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub template_id: TemplateId,
    pub template_name: Option<String>,
    pub error: String,
}

impl From<TemplateLoadError> for BatchFailure {
    fn from(err: TemplateLoadError) -> Self {
        Self {
            error: err.to_string(),
            template_id: err.template_id,
            template_name: err.template_name,
        }
    }
}

/// Results and failures of a batch, both in folder order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<BatchResult>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Assemble every template of `folder_id` with the same `values`.
///
/// `entries` are expected in folder order. A failed entry is recorded and the
/// batch carries on; templates assigned to another folder are skipped.
pub fn batch_generate<I>(folder_id: &FolderId, entries: I, values: &VariableValues) -> BatchOutcome
where
    I: IntoIterator<Item = Result<Template, TemplateLoadError>>,
{
    let mut outcome = BatchOutcome::default();

    for entry in entries {
        match entry {
            Ok(template) if template.belongs_to(folder_id) => {
                outcome.results.push(BatchResult {
                    final_prompt: assemble(template.body(), values),
                    template_name: template.name().to_string(),
                    template_id: template.id().clone(),
                });
            }
            Ok(_) => {}
            Err(err) => outcome.failures.push(err.into()),
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder() -> FolderId {
        FolderId::new("folder-1").unwrap()
    }

    fn template(id: &str, name: &str, body: &str) -> Template {
        Template::new(TemplateId::new(id).unwrap(), name, body).with_folder(folder())
    }

    fn values(pairs: &[(&str, &str)]) -> VariableValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_batch_substitutes_shared_values() {
        let a = template("a", "A", "x={{{x}}} y={{{y}}}");
        let b = template("b", "B", "y={{{y}}} z={{{z}}}");

        let outcome = batch_generate(&folder(), [Ok(a), Ok(b)], &values(&[("y", "v")]));

        assert!(outcome.is_complete());
        let prompts: Vec<&str> = outcome.results.iter().map(|r| r.final_prompt.as_str()).collect();
        assert_eq!(prompts, vec!["x= y=v", "y=v z="]);
        assert_eq!(outcome.results[0].template_name, "A");
        assert_eq!(outcome.results[1].template_id.as_str(), "b");
    }

    #[test]
    fn test_malformed_body_does_not_block_others() {
        let a = template("a", "A", "x={{{x}} y={{{y}}}");
        let b = template("b", "B", "y={{{y}}} z={{{z}}}");

        let outcome = batch_generate(&folder(), [Ok(a), Ok(b)], &values(&[("y", "v")]));

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].final_prompt, "x={{{x}} y=v");
        assert_eq!(outcome.results[1].final_prompt, "y=v z=");
    }

    #[test]
    fn test_load_failure_is_isolated() {
        let failed = TemplateLoadError::new(TemplateId::new("a").unwrap(), "decode failed")
            .with_template_name("A");
        let b = template("b", "B", "y={{{y}}}");

        let outcome = batch_generate(&folder(), [Err(failed), Ok(b)], &values(&[("y", "v")]));

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].final_prompt, "y=v");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].template_id.as_str(), "a");
        assert_eq!(outcome.failures[0].template_name.as_deref(), Some("A"));
        assert!(outcome.failures[0].error.contains("decode failed"));
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_skips_templates_of_other_folders() {
        let other = Template::new(TemplateId::new("o").unwrap(), "O", "{{{y}}}")
            .with_folder(FolderId::new("folder-2").unwrap());
        let loose = Template::new(TemplateId::new("l").unwrap(), "L", "{{{y}}}");
        let b = template("b", "B", "{{{y}}}");

        let outcome = batch_generate(&folder(), [Ok(other), Ok(b), Ok(loose)], &values(&[]));

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].template_id.as_str(), "b");
    }

    #[test]
    fn test_empty_folder() {
        let entries: Vec<Result<Template, TemplateLoadError>> = Vec::new();
        let outcome = batch_generate(&folder(), entries, &values(&[("y", "v")]));
        assert!(outcome.results.is_empty());
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_batch_is_idempotent() {
        let run = || {
            batch_generate(
                &folder(),
                [Ok(template("a", "A", "{{{x}}}-{{{x}}}"))],
                &values(&[("x", "1")]),
            )
        };
        assert_eq!(run(), run());
    }
}
