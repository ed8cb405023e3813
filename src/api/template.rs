//! Template CRUD and rendering endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::metrics;
use crate::server::AppState;
use crate::template::{
    default_test_data, format_info, preview, validate, CreateTemplateRequest, PreviewResult,
    RenderData, Template, TemplateError, TemplateInfo, TemplateListResponse, UpdateTemplateRequest,
    ValidationResult,
};

#[derive(Debug, Serialize)]
pub struct TemplateErrorResponse {
    pub error: TemplateErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct TemplateErrorInfo {
    pub code: String,
    pub message: String,
}

impl From<TemplateError> for (StatusCode, Json<TemplateErrorResponse>) {
    fn from(err: TemplateError) -> Self {
        let (status, code) = match &err {
            TemplateError::NotFound(_) => (StatusCode::NOT_FOUND, "TEMPLATE_NOT_FOUND"),
            TemplateError::AlreadyExists(_) => (StatusCode::CONFLICT, "TEMPLATE_EXISTS"),
            TemplateError::InvalidName(_) => (StatusCode::BAD_REQUEST, "INVALID_NAME"),
            TemplateError::InvalidTemplate(_) => (StatusCode::BAD_REQUEST, "INVALID_TEMPLATE"),
            TemplateError::CatalogFull(_) => {
                (StatusCode::INSUFFICIENT_STORAGE, "CATALOG_FULL")
            }
        };

        (
            status,
            Json(TemplateErrorResponse {
                error: TemplateErrorInfo {
                    code: code.to_string(),
                    message: err.to_string(),
                },
            }),
        )
    }
}

/// POST /api/v1/templates - Create a new template
#[tracing::instrument(
    name = "http.create_template",
    skip(state, request),
    fields(template = %request.name)
)]
pub async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<Template>), (StatusCode, Json<TemplateErrorResponse>)> {
    let template: Template = request.into();

    match state.catalog.create(template) {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/v1/templates - List all templates
#[tracing::instrument(name = "http.list_templates", skip(state))]
pub async fn list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    let templates = state.catalog.list();
    let total = templates.len();

    Json(TemplateListResponse { templates, total })
}

/// GET /api/v1/templates/:name - Get a specific template
#[tracing::instrument(name = "http.get_template", skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Template>, (StatusCode, Json<TemplateErrorResponse>)> {
    match state.catalog.get(&name) {
        Ok(template) => Ok(Json(template)),
        Err(e) => Err(e.into()),
    }
}

/// PUT /api/v1/templates/:name - Update an existing template
#[tracing::instrument(name = "http.update_template", skip(state, request))]
pub async fn update_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<Template>, (StatusCode, Json<TemplateErrorResponse>)> {
    match state.catalog.update(&name, request) {
        Ok(updated) => Ok(Json(updated)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/v1/templates/:name - Delete a template
#[tracing::instrument(name = "http.delete_template", skip(state))]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<TemplateErrorResponse>)> {
    match state.catalog.delete(&name) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/v1/templates/:name/info - Summarize a template.
///
/// Always succeeds; an unknown name yields the fixed default record.
#[tracing::instrument(name = "http.template_info", skip(state))]
pub async fn template_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<TemplateInfo> {
    let template = state.catalog.find(&name);
    Json(format_info(template.as_ref()))
}

/// GET /api/v1/templates/:name/sample-data - Sample render data for the
/// template editor's preview pane
#[tracing::instrument(name = "http.template_sample_data", skip(state))]
pub async fn template_sample_data(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RenderData>, AppError> {
    let template = state
        .catalog
        .find(&name)
        .ok_or_else(|| AppError::NotFound(format!("Template not found: {}", name)))?;

    Ok(Json(default_test_data(Some(&template))))
}

/// POST /api/v1/templates/:name/validate - Check render data coverage
#[tracing::instrument(name = "http.validate_template", skip(state, data))]
pub async fn validate_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(data): Json<RenderData>,
) -> Result<Json<ValidationResult>, AppError> {
    let template = state
        .catalog
        .find(&name)
        .ok_or_else(|| AppError::NotFound(format!("Template not found: {}", name)))?;

    let result = validate(&template, &data);
    if !result.valid {
        metrics::VALIDATION_FAILURES_TOTAL.inc();
    }

    Ok(Json(result))
}

/// POST /api/v1/templates/:name/preview - Render a preview.
///
/// Always returns 200: an unknown template or incomplete data is reported
/// inside the result's `errors`, and rendering proceeds as far as it can.
#[tracing::instrument(name = "http.preview_template", skip(state, data))]
pub async fn preview_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(data): Json<RenderData>,
) -> Json<PreviewResult> {
    let timer = metrics::RENDER_DURATION_SECONDS.start_timer();
    let template = state.catalog.find(&name);
    let result = preview(template.as_ref(), &data);
    timer.observe_duration();

    let outcome = if template.is_none() {
        "not_found"
    } else if result.errors.is_empty() {
        "ok"
    } else {
        "missing_variables"
    };
    metrics::PREVIEWS_RENDERED_TOTAL
        .with_label_values(&[outcome])
        .inc();

    tracing::debug!(
        template = %name,
        outcome,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Preview rendered"
    );

    Json(result)
}
