//! Folder domain - named groups of templates

mod entity;

pub use entity::{folder_templates, Folder, FolderId, DEFAULT_FOLDER_COLOR};
