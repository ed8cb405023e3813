//! Deterministic sample data for interactive previews.
//!
//! The template editor pre-populates its preview pane with these values so
//! an admin sees a realistic rendering before supplying real data. Values
//! are fixed per variable name; the same call always yields the same map.

use super::types::{RenderData, Template};

/// Fixed sample values, matched case-insensitively on variable name.
const SAMPLE_VALUES: &[(&str, &str)] = &[
    ("user_name", "Jordan Lee"),
    ("username", "Jordan Lee"),
    ("title", "Midterm schedule published"),
    ("message", "The updated midterm schedule is now available on the portal."),
    ("course_name", "Introduction to Data Structures"),
    ("teacher_name", "Prof. Maria Santos"),
    ("assignment_title", "Problem Set 3: Balanced Trees"),
    ("deadline", "2026-09-15 23:59"),
    ("grade", "92/100"),
    ("feedback", "Solid work. Revisit the complexity analysis in part two."),
    ("class_time", "Tuesday 10:00-11:30"),
    ("classroom", "Science Hall 204"),
];

/// Build sample render data covering every declared variable.
///
/// Unrecognized names fall back to the variable's description, then to a
/// generic placeholder. Empty for an absent template.
pub fn default_test_data(template: Option<&Template>) -> RenderData {
    let mut data = RenderData::new();
    let Some(template) = template else {
        return data;
    };

    for variable in &template.variables {
        let value = SAMPLE_VALUES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&variable.name))
            .map(|(_, value)| (*value).to_string())
            .unwrap_or_else(|| {
                if variable.description.is_empty() {
                    "Sample value".to_string()
                } else {
                    variable.description.clone()
                }
            });
        data.insert(variable.name.clone(), value);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::types::TemplateVariable;
    use chrono::Utc;

    fn template_with(variables: &[(&str, &str)]) -> Template {
        Template {
            name: "test".to_string(),
            subject: String::new(),
            html_content: String::new(),
            text_content: String::new(),
            variables: variables
                .iter()
                .map(|(name, description)| TemplateVariable {
                    name: name.to_string(),
                    description: description.to_string(),
                })
                .collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_known_names_get_fixed_values() {
        let template = template_with(&[("user_name", ""), ("grade", "")]);
        let data = default_test_data(Some(&template));

        assert_eq!(data.get("user_name").unwrap(), "Jordan Lee");
        assert_eq!(data.get("grade").unwrap(), "92/100");
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let template = template_with(&[("USER_NAME", "")]);
        let data = default_test_data(Some(&template));

        assert_eq!(data.get("USER_NAME").unwrap(), "Jordan Lee");
    }

    #[test]
    fn test_unknown_name_falls_back_to_description() {
        let template = template_with(&[("sport_facility", "the reserved facility")]);
        let data = default_test_data(Some(&template));

        assert_eq!(data.get("sport_facility").unwrap(), "the reserved facility");
    }

    #[test]
    fn test_unknown_name_without_description_gets_generic_value() {
        let template = template_with(&[("mystery", "")]);
        let data = default_test_data(Some(&template));

        assert_eq!(data.get("mystery").unwrap(), "Sample value");
    }

    #[test]
    fn test_deterministic_across_calls() {
        let template = template_with(&[("title", ""), ("deadline", "")]);
        assert_eq!(
            default_test_data(Some(&template)),
            default_test_data(Some(&template))
        );
    }

    #[test]
    fn test_absent_template_yields_empty_data() {
        assert!(default_test_data(None).is_empty());
    }
}
