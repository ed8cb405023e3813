//! API layer - HTTP endpoint handlers organized by domain.

mod health;
mod metrics;
mod routes;
mod template;

// Re-export all handlers for use in server/app.rs
pub use health::health;
pub use metrics::prometheus_metrics;
pub use routes::api_routes;
pub use template::{
    create_template, delete_template, get_template, list_templates, preview_template,
    template_info, template_sample_data, update_template, validate_template,
    TemplateErrorResponse,
};
