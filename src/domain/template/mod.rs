//! Template domain - templates, placeholder handling and variable grouping

mod classifier;
mod entity;
mod filter;
mod placeholder;

pub use classifier::{classify, group_by_category, VariableCategory};
pub use entity::{TagCategory, Template, TemplateId, TemplateTags};
pub use filter::{TagCatalog, TemplateFilter};
pub use placeholder::{assemble, count_unterminated, extract_variables, VariableValues};
