//! Template list filtering and tag catalog

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::entity::{TagCategory, Template};

/// Filter applied when listing templates.
///
/// Tags must match exactly; `search` is a case-insensitive substring of the
/// name or description. Unset or blank fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TemplateFilter {
    #[serde(default, alias = "용도")]
    pub purpose: Option<String>,
    #[serde(default, alias = "회기")]
    pub session: Option<String>,
    #[serde(default, alias = "아동유형")]
    pub child_type: Option<String>,
    #[serde(default, alias = "검색어")]
    pub search: Option<String>,
}

impl TemplateFilter {
    fn tag(&self, category: TagCategory) -> Option<&str> {
        let value = match category {
            TagCategory::Purpose => self.purpose.as_deref(),
            TagCategory::Session => self.session.as_deref(),
            TagCategory::ChildType => self.child_type.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn is_empty(&self) -> bool {
        TagCategory::ALL.iter().all(|c| self.tag(*c).is_none()) && self.search_term().is_none()
    }

    pub fn matches(&self, template: &Template) -> bool {
        let tags_match = TagCategory::ALL.iter().all(|category| match self.tag(*category) {
            Some(wanted) => template.tags().get(*category) == Some(wanted),
            None => true,
        });

        if !tags_match {
            return false;
        }

        match self.search_term() {
            Some(term) => {
                template.name().to_lowercase().contains(&term)
                    || template.description().to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

/// Distinct tag values in use, per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagCatalog {
    pub purpose: Vec<String>,
    pub session: Vec<String>,
    pub child_type: Vec<String>,
}

impl TagCatalog {
    pub fn from_templates<'a>(templates: impl IntoIterator<Item = &'a Template>) -> Self {
        let mut sets: [BTreeSet<String>; 3] = Default::default();

        for template in templates {
            for (i, category) in TagCategory::ALL.iter().enumerate() {
                if let Some(value) = template.tags().get(*category) {
                    sets[i].insert(value.to_string());
                }
            }
        }

        let [purpose, session, child_type] = sets;

        Self {
            purpose: purpose.into_iter().collect(),
            session: session.into_iter().collect(),
            child_type: child_type.into_iter().collect(),
        }
    }
}
