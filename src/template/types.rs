//! Template types and error definitions

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog-specific error type.
///
/// These cover catalog CRUD failures only. Rendering operations never
/// return an error; their failure channel is the `errors`/`warnings`
/// sequences on the returned result.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid template name: {0}")]
    InvalidName(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template catalog is full (limit {0})")]
    CatalogFull(usize),
}

/// Result type for catalog operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Variable values supplied for substitution, keyed by variable name.
///
/// Not required to cover every declared variable; coverage gaps are
/// reported by validation and rendered as `[name]` placeholders.
pub type RenderData = BTreeMap<String, String>;

/// A substitution variable declared on a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariable {
    /// Variable name as it appears inside `{{.name}}` placeholders
    pub name: String,

    /// Human-readable description shown in the template editor
    pub description: String,
}

/// A canonical email template.
///
/// Content fields are already un-escaped; raw payloads are decoded exactly
/// once, when they enter the catalog. Declaration order of `variables` is
/// preserved from the raw payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Unique template name (alphanumeric, dash, underscore)
    pub name: String,

    /// Subject line, may contain placeholders
    pub subject: String,

    /// HTML body, may contain placeholders
    pub html_content: String,

    /// Plaintext body, may contain placeholders
    pub text_content: String,

    /// Declared substitution variables, in declaration order
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Validate the template for catalog admission
    pub fn validate(&self) -> TemplateResult<()> {
        if self.name.is_empty() || self.name.len() > 64 {
            return Err(TemplateError::InvalidName(
                "Name must be 1-64 characters".to_string(),
            ));
        }

        if !self
            .name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TemplateError::InvalidName(
                "Name must contain only alphanumeric, dash, or underscore".to_string(),
            ));
        }

        for variable in &self.variables {
            if variable.name.is_empty() {
                return Err(TemplateError::InvalidTemplate(
                    "Variable names must be non-empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Whether a variable name is declared on this template
    pub fn declares(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v.name == name)
    }
}

/// Coverage report for a template against supplied render data
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// True iff every declared variable is present as a key in the data
    pub valid: bool,

    /// Declared variables absent from the data, in declaration order
    pub missing_variables: Vec<String>,

    /// Data keys not declared on the template (informational, not an error)
    pub extra_variables: Vec<String>,

    /// Advisory diagnostics
    pub warnings: Vec<String>,
}

/// A fully-substituted rendering of a template, bundled with diagnostics.
///
/// Always produced, even for an absent template; in that case all content
/// fields are empty and `errors` holds exactly one message.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewResult {
    /// Subject line after substitution
    pub subject: String,

    /// HTML body after substitution
    pub html_content: String,

    /// Plaintext body after substitution
    pub text_content: String,

    /// Fatal diagnostics (missing variables, template absent)
    pub errors: Vec<String>,

    /// Non-fatal diagnostics
    pub warnings: Vec<String>,
}

/// Summary of a template for list and detail views
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    /// Template name
    pub name: String,

    /// Subject line (before substitution)
    pub subject: String,

    /// Number of declared variables
    pub variable_count: usize,

    /// Declared variable names, in declaration order
    pub variables: Vec<String>,

    /// True iff the decoded HTML body is non-empty after trimming
    pub has_html: bool,

    /// True iff the decoded plaintext body is non-empty after trimming
    pub has_text: bool,
}

/// Request to create a new template.
///
/// Content fields arrive in the upstream's escaped form and `variables` as
/// either a JSON-encoded string or an object; both are decoded on admission.
#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    /// Unique template name
    pub name: String,

    /// Subject line
    #[serde(default)]
    pub subject: String,

    /// Escaped HTML body
    #[serde(default)]
    pub html_content: String,

    /// Escaped plaintext body
    #[serde(default)]
    pub text_content: String,

    /// Variable declarations: JSON-encoded string, object, or absent
    #[serde(default)]
    pub variables: serde_json::Value,
}

/// Request to update an existing template.
///
/// Provided content fields are re-decoded the same way creation decodes
/// them; omitted fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateTemplateRequest {
    /// Subject line (optional)
    pub subject: Option<String>,

    /// Escaped HTML body (optional)
    pub html_content: Option<String>,

    /// Escaped plaintext body (optional)
    pub text_content: Option<String>,

    /// Variable declarations (optional)
    pub variables: Option<serde_json::Value>,
}

/// Response for listing templates
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    /// List of templates, in name order
    pub templates: Vec<Template>,

    /// Total count
    pub total: usize,
}
