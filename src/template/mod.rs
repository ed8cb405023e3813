//! Email template system.
//!
//! This module provides:
//! - Template definition with `{{.variable}}` placeholders and per-variable
//!   descriptions
//! - One-shot decoding of raw (escaped) template payloads
//! - In-memory template catalog with CRUD operations
//! - Validation, preview rendering, and sample-data generation
//!
//! Rendering never fails: absent templates, malformed variable payloads,
//! and incomplete data all degrade to a complete result carrying
//! diagnostics in its `errors`/`warnings` fields.
//!
//! # Example
//!
//! ```ignore
//! let catalog = TemplateCatalog::new();
//!
//! catalog.create(decode(&json!({
//!     "name": "welcome",
//!     "subject": "Hi {{.user_name}}",
//!     "text_content": "Welcome, {{.user_name}}!",
//!     "variables": "{\"user_name\": \"the recipient's name\"}"
//! })))?;
//!
//! let template = catalog.find("welcome");
//! let data = default_test_data(template.as_ref());
//! let rendered = preview(template.as_ref(), &data);
//! ```

mod catalog;
mod decode;
mod renderer;
mod sample;
mod substitution;
mod types;

pub use catalog::{create_template_catalog, TemplateCatalog, DEFAULT_MAX_TEMPLATES};
pub use decode::decode;
pub use renderer::{format_info, list_variables, preview, validate};
pub use sample::default_test_data;
pub use substitution::{substitute, tokenize, Token};
pub use types::{
    CreateTemplateRequest, PreviewResult, RenderData, Template, TemplateError, TemplateInfo,
    TemplateListResponse, TemplateResult, TemplateVariable, UpdateTemplateRequest,
    ValidationResult,
};
