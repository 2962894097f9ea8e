//! Content domain - reference material stored alongside templates

mod entity;

pub use entity::{ContentFilter, ContentId, ContentRecord};
