//! Common-variable resolution across the templates of a folder

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::template::{group_by_category, Template, VariableCategory};

/// A variable name together with how many templates reference it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableReference {
    pub name: String,
    pub usage_count: usize,
    /// Name of the only template using the variable, unset when shared
    pub template_name: Option<String>,
}

impl VariableReference {
    pub fn is_shared(&self) -> bool {
        self.usage_count > 1
    }
}

/// Variable references bucketed by display category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableGroups {
    pub ping_pong: Vec<VariableReference>,
    pub child: Vec<VariableReference>,
    pub other: Vec<VariableReference>,
}

/// Resolve the union of variables used by `templates`.
///
/// Names are ordered by the first template that uses them, then by their
/// position within that template's body.
pub fn resolve_common_variables<'a, I>(templates: I) -> Vec<VariableReference>
where
    I: IntoIterator<Item = &'a Template>,
{
    let mut references: Vec<VariableReference> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for template in templates {
        for name in template.variables().iter() {
            match positions.get(name) {
                Some(&idx) => {
                    let reference = &mut references[idx];
                    reference.usage_count += 1;
                    reference.template_name = None;
                }
                None => {
                    positions.insert(name.clone(), references.len());
                    references.push(VariableReference {
                        name: name.clone(),
                        usage_count: 1,
                        template_name: Some(template.name().to_string()),
                    });
                }
            }
        }
    }

    references
}

/// Bucket references by the category of their name, keeping input order
pub fn group_variables(references: &[VariableReference]) -> VariableGroups {
    let mut groups = VariableGroups::default();

    for (category, members) in group_by_category(references, |r| r.name.as_str()) {
        match category {
            VariableCategory::PingPong => groups.ping_pong = members,
            VariableCategory::Child => groups.child = members,
            VariableCategory::Other => groups.other = members,
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::TemplateId;

    fn template(id: &str, name: &str, body: &str) -> Template {
        Template::new(TemplateId::new(id).unwrap(), name, body)
    }

    #[test]
    fn test_shared_and_single_use_variables() {
        let a = template("a", "A", "{{{x}}} and {{{y}}}");
        let b = template("b", "B", "{{{y}}} and {{{z}}}");

        let refs = resolve_common_variables([&a, &b]);

        assert_eq!(
            refs,
            vec![
                VariableReference {
                    name: "x".to_string(),
                    usage_count: 1,
                    template_name: Some("A".to_string()),
                },
                VariableReference {
                    name: "y".to_string(),
                    usage_count: 2,
                    template_name: None,
                },
                VariableReference {
                    name: "z".to_string(),
                    usage_count: 1,
                    template_name: Some("B".to_string()),
                },
            ]
        );
        assert!(refs[1].is_shared());
    }

    #[test]
    fn test_repeated_placeholder_counts_once_per_template() {
        let a = template("a", "A", "{{{x}}} {{{x}}} {{{x}}}");
        let refs = resolve_common_variables([&a]);

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].usage_count, 1);
    }

    #[test]
    fn test_order_follows_template_order() {
        let a = template("a", "A", "{{{m}}}");
        let b = template("b", "B", "{{{k}}} {{{m}}}");

        let names: Vec<String> = resolve_common_variables([&b, &a])
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["k", "m"]);
    }

    #[test]
    fn test_empty_input() {
        let templates: Vec<Template> = Vec::new();
        assert!(resolve_common_variables(&templates).is_empty());

        let plain = template("p", "Plain", "no placeholders here");
        assert!(resolve_common_variables([&plain]).is_empty());
    }

    #[test]
    fn test_uses_current_body() {
        let mut a = template("a", "A", "{{{old}}}");
        a.set_body("{{{new}}}");

        let refs = resolve_common_variables([&a]);
        assert_eq!(refs[0].name, "new");
    }

    #[test]
    fn test_group_variables() {
        let a = template("a", "A", "{{{아동 이름}}} {{{핑퐁 말투}}} {{{날짜}}} {{{아이 나이}}}");
        let groups = group_variables(&resolve_common_variables([&a]));

        fn names(refs: &[VariableReference]) -> Vec<String> {
            refs.iter().map(|r| r.name.clone()).collect()
        }

        assert_eq!(names(&groups.ping_pong), vec!["핑퐁 말투"]);
        assert_eq!(names(&groups.child), vec!["아동 이름", "아이 나이"]);
        assert_eq!(names(&groups.other), vec!["날짜"]);
    }
}
