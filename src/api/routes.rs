use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

use super::health::health;
use super::metrics::prometheus_metrics;
use super::template::{
    create_template, delete_template, get_template, list_templates, preview_template,
    template_info, template_sample_data, update_template, validate_template,
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        // Template endpoints
        .nest(
            "/api/v1",
            Router::new()
                // Catalog CRUD
                .route("/templates", post(create_template).get(list_templates))
                .route(
                    "/templates/{name}",
                    get(get_template)
                        .put(update_template)
                        .delete(delete_template),
                )
                // Rendering
                .route("/templates/{name}/info", get(template_info))
                .route("/templates/{name}/sample-data", get(template_sample_data))
                .route("/templates/{name}/validate", post(validate_template))
                .route("/templates/{name}/preview", post(preview_template)),
        )
}
