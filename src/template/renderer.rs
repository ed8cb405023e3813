//! Template validation and preview rendering.
//!
//! Every operation here degrades instead of failing: an absent template, a
//! data map with gaps, or a template with no variables at all still
//! produces a structurally complete result, with the problem reported in
//! `errors`/`warnings`. Nothing in this module returns `Result` or panics
//! on caller input.

use super::substitution::substitute;
use super::types::{PreviewResult, RenderData, Template, TemplateInfo, ValidationResult};

/// Declared variable names, in declaration order. Empty for an absent
/// template.
pub fn list_variables(template: Option<&Template>) -> Vec<String> {
    template
        .map(|t| t.variables.iter().map(|v| v.name.clone()).collect())
        .unwrap_or_default()
}

/// Check supplied data against the template's declared variables.
///
/// Only key presence is inspected; an empty value never counts as missing.
pub fn validate(template: &Template, data: &RenderData) -> ValidationResult {
    let mut warnings = Vec::new();
    if template.variables.is_empty() {
        warnings.push("Template has no defined variables".to_string());
    }

    let missing_variables: Vec<String> = template
        .variables
        .iter()
        .filter(|v| !data.contains_key(&v.name))
        .map(|v| v.name.clone())
        .collect();

    let extra_variables: Vec<String> = data
        .keys()
        .filter(|k| !template.declares(k))
        .cloned()
        .collect();

    ValidationResult {
        valid: missing_variables.is_empty(),
        missing_variables,
        extra_variables,
        warnings,
    }
}

/// Render a full preview: subject, HTML body, and text body substituted
/// independently, with validation diagnostics folded in.
///
/// A missing variable is reported in `errors` but does not abort
/// rendering; the affected placeholders come out as `[name]`.
pub fn preview(template: Option<&Template>, data: &RenderData) -> PreviewResult {
    let Some(template) = template else {
        return PreviewResult {
            subject: String::new(),
            html_content: String::new(),
            text_content: String::new(),
            errors: vec!["Template not found".to_string()],
            warnings: Vec::new(),
        };
    };

    let validation = validate(template, data);

    let mut errors = Vec::new();
    if !validation.valid {
        errors.push(format!(
            "Missing variables: {}",
            validation.missing_variables.join(", ")
        ));
    }

    PreviewResult {
        subject: substitute(&template.subject, data),
        html_content: substitute(&template.html_content, data),
        text_content: substitute(&template.text_content, data),
        errors,
        warnings: validation.warnings,
    }
}

/// Summarize a template for display. An absent template yields a fixed
/// default record.
pub fn format_info(template: Option<&Template>) -> TemplateInfo {
    let Some(template) = template else {
        return TemplateInfo {
            name: "Unknown".to_string(),
            subject: "No subject".to_string(),
            variable_count: 0,
            variables: Vec::new(),
            has_html: false,
            has_text: false,
        };
    };

    TemplateInfo {
        name: template.name.clone(),
        subject: template.subject.clone(),
        variable_count: template.variables.len(),
        variables: template.variables.iter().map(|v| v.name.clone()).collect(),
        has_html: !template.html_content.trim().is_empty(),
        has_text: !template.text_content.trim().is_empty(),
    }
}
