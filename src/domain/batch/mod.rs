//! Batch domain - common variables and batch prompt generation for folders

mod common;
mod orchestrator;

pub use common::{group_variables, resolve_common_variables, VariableGroups, VariableReference};
pub use orchestrator::{
    batch_generate, BatchFailure, BatchOutcome, BatchResult, TemplateLoadError,
};
