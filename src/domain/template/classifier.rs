//! Lexical variable classification used to group input fields for display

use serde::{Deserialize, Serialize};

/// Display bucket of a variable name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableCategory {
    /// Variables describing the conversation partner ("핑퐁")
    PingPong,
    /// Variables describing the child
    Child,
    Other,
}

/// Keyword table, checked top to bottom
const KEYWORDS: &[(VariableCategory, &[&str])] = &[
    (VariableCategory::PingPong, &["핑퐁", "핑", "퐁"]),
    (VariableCategory::Child, &["아동", "아이", "어린이"]),
];

impl VariableCategory {
    pub const ALL: [VariableCategory; 3] = [Self::PingPong, Self::Child, Self::Other];

    /// Human-readable label shown next to the group
    pub fn label(&self) -> &'static str {
        match self {
            Self::PingPong => "핑퐁 관련",
            Self::Child => "아동 관련",
            Self::Other => "기타",
        }
    }
}

/// Classify a variable name by substring containment (case-sensitive)
pub fn classify(name: &str) -> VariableCategory {
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| name.contains(w)))
        .map(|(category, _)| *category)
        .unwrap_or(VariableCategory::Other)
}

/// Group items by the category of their name, keeping input order within
/// each group. Every category is present, possibly empty.
pub fn group_by_category<T, F>(items: &[T], name_of: F) -> Vec<(VariableCategory, Vec<T>)>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    VariableCategory::ALL
        .iter()
        .map(|category| {
            let members = items
                .iter()
                .filter(|item| classify(name_of(item)) == *category)
                .cloned()
                .collect();
            (*category, members)
        })
        .collect()
}
