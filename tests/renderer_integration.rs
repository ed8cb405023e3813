//! Cross-component integration tests
//!
//! These tests exercise the catalog, decoder, and renderer together,
//! without server startup: raw payloads go in the way the HTTP layer
//! admits them, and previews come out the way the admin dashboard
//! consumes them.

use serde_json::json;

use campus_template_service::template::{
    decode, default_test_data, format_info, list_variables, preview, substitute, validate,
    CreateTemplateRequest, RenderData, Template, TemplateCatalog, UpdateTemplateRequest,
};

fn render_data(pairs: &[(&str, &str)]) -> RenderData {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Seed a catalog with the templates the platform ships with
fn seeded_catalog() -> TemplateCatalog {
    let catalog = TemplateCatalog::new();

    let imported = catalog.import(&json!([
        {
            "name": "welcome",
            "subject": "Hi {{.user_name}}",
            "html_content": "",
            "text_content": "Welcome, {{.user_name}}!",
            "variables": {"user_name": "the recipient's name"}
        },
        {
            "name": "assignment-due",
            "subject": "{{.assignment_title}} is due",
            "html_content": "\\u003cp\\u003e{{.assignment_title}} for \\u003cb\\u003e{{.course_name}}\\u003c/b\\u003e is due {{.deadline}}.\\u003c/p\\u003e",
            "text_content": "{{.assignment_title}} for {{.course_name}} is due {{.deadline}}.",
            "variables": "{\"assignment_title\": \"the assignment\", \"course_name\": \"the course\", \"deadline\": \"due date\"}"
        },
        {
            "name": "grade-posted",
            "subject": "Grade posted for {{.course_name}}",
            "html_content": "",
            "text_content": "You received {{.grade}}.\\nFeedback: \\\"{{.feedback}}\\\"",
            "variables": {"course_name": "the course", "grade": "the grade", "feedback": "teacher feedback"}
        }
    ]));
    assert_eq!(imported, 3);

    catalog
}

// =============================================================================
// End-to-end rendering scenarios
// =============================================================================

#[test]
fn test_welcome_template_renders_cleanly() {
    let catalog = seeded_catalog();

    let template = catalog.find("welcome");
    let result = preview(template.as_ref(), &render_data(&[("user_name", "Alice")]));

    assert_eq!(result.subject, "Hi Alice");
    assert_eq!(result.html_content, "");
    assert_eq!(result.text_content, "Welcome, Alice!");
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_escaped_html_is_decoded_at_admission_only() {
    let catalog = seeded_catalog();

    // The stored template already holds decoded HTML
    let template = catalog.get("assignment-due").unwrap();
    assert!(template.html_content.starts_with("<p>"));
    assert!(template.html_content.contains("<b>{{.course_name}}</b>"));

    // Substitution works over the decoded content directly
    let result = preview(
        Some(&template),
        &render_data(&[
            ("assignment_title", "Problem Set 3"),
            ("course_name", "Algorithms"),
            ("deadline", "Friday"),
        ]),
    );
    assert_eq!(
        result.html_content,
        "<p>Problem Set 3 for <b>Algorithms</b> is due Friday.</p>"
    );
    assert!(result.errors.is_empty());
}

#[test]
fn test_text_escapes_survive_to_rendered_output() {
    let catalog = seeded_catalog();

    let template = catalog.find("grade-posted");
    let result = preview(
        template.as_ref(),
        &render_data(&[
            ("course_name", "Physics"),
            ("grade", "88/100"),
            ("feedback", "Nice work"),
        ]),
    );

    assert_eq!(
        result.text_content,
        "You received 88/100.\nFeedback: \"Nice work\""
    );
}

#[test]
fn test_missing_variables_render_as_placeholders_with_diagnostics() {
    let catalog = seeded_catalog();

    let template = catalog.find("assignment-due");
    let result = preview(
        template.as_ref(),
        &render_data(&[("assignment_title", "Essay 1")]),
    );

    assert_eq!(result.subject, "Essay 1 is due");
    assert_eq!(
        result.text_content,
        "Essay 1 for [course_name] is due [deadline]."
    );
    assert_eq!(
        result.errors,
        vec!["Missing variables: course_name, deadline"]
    );
}

#[test]
fn test_unknown_template_degrades_instead_of_failing() {
    let catalog = seeded_catalog();

    let template = catalog.find("no-such-template");
    let result = preview(template.as_ref(), &render_data(&[("user_name", "Alice")]));

    assert_eq!(result.subject, "");
    assert_eq!(result.html_content, "");
    assert_eq!(result.text_content, "");
    assert_eq!(result.errors, vec!["Template not found"]);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_sample_data_covers_every_declared_variable() {
    let catalog = seeded_catalog();

    for template in catalog.list() {
        let data = default_test_data(Some(&template));
        let validation = validate(&template, &data);
        assert!(validation.valid, "sample data left gaps in {}", template.name);

        let result = preview(Some(&template), &data);
        assert!(result.errors.is_empty());
    }
}

#[test]
fn test_editor_preview_pipeline_with_sample_data() {
    let catalog = seeded_catalog();

    // The template editor fetches sample data, then previews with it
    let template = catalog.find("assignment-due");
    let data = default_test_data(template.as_ref());
    let result = preview(template.as_ref(), &data);

    assert_eq!(
        result.subject,
        "Problem Set 3: Balanced Trees is due"
    );
    assert!(result
        .text_content
        .contains("Introduction to Data Structures"));
    assert!(result.errors.is_empty());
}

// =============================================================================
// Admission and update flows
// =============================================================================

#[test]
fn test_create_request_then_update_redecodes() {
    let catalog = TemplateCatalog::new();

    let request = CreateTemplateRequest {
        name: "class-moved".to_string(),
        subject: "{{.course_name}} room change".to_string(),
        html_content: String::new(),
        text_content: "Now in {{.classroom}} at {{.class_time}}.".to_string(),
        variables: json!({"course_name": "the course", "classroom": "new room", "class_time": "meeting time"}),
    };
    catalog.create(request.into()).unwrap();

    let updates = UpdateTemplateRequest {
        subject: None,
        html_content: Some(
            "\\u003cp\\u003eNow in {{.classroom}} at {{.class_time}}.\\u003c/p\\u003e".to_string(),
        ),
        text_content: None,
        variables: None,
    };
    let updated = catalog.update("class-moved", updates).unwrap();

    let result = preview(
        Some(&updated),
        &render_data(&[
            ("course_name", "Chemistry"),
            ("classroom", "Lab 2"),
            ("class_time", "14:00"),
        ]),
    );
    assert_eq!(result.html_content, "<p>Now in Lab 2 at 14:00.</p>");
    assert_eq!(result.subject, "Chemistry room change");
}

#[test]
fn test_malformed_variables_degrade_and_template_still_renders() {
    let catalog = TemplateCatalog::new();

    let imported = catalog.import(&json!([
        {
            "name": "broken-vars",
            "subject": "Hello {{.user_name}}",
            "text_content": "Hi there",
            "variables": "{bad json"
        }
    ]));
    assert_eq!(imported, 1);

    let template = catalog.find("broken-vars").unwrap();
    assert!(template.variables.is_empty());
    assert!(list_variables(Some(&template)).is_empty());

    // No declared variables: validation warns but rendering proceeds, and
    // the undeclared placeholder falls back to its bracketed name
    let result = preview(Some(&template), &RenderData::new());
    assert_eq!(result.subject, "Hello [user_name]");
    assert!(result.errors.is_empty());
    assert_eq!(result.warnings, vec!["Template has no defined variables"]);
}

#[test]
fn test_extra_variables_are_reported_but_harmless() {
    let catalog = seeded_catalog();

    let template = catalog.get("welcome").unwrap();
    let data = render_data(&[("user_name", "Alice"), ("campus", "North")]);

    let validation = validate(&template, &data);
    assert!(validation.valid);
    assert_eq!(validation.extra_variables, vec!["campus"]);

    let result = preview(Some(&template), &data);
    assert_eq!(result.text_content, "Welcome, Alice!");
    assert!(result.errors.is_empty());
}

// =============================================================================
// Info and raw-decode surfaces
// =============================================================================

#[test]
fn test_format_info_reflects_catalog_contents() {
    let catalog = seeded_catalog();

    let welcome = catalog.find("welcome");
    let info = format_info(welcome.as_ref());
    assert_eq!(info.name, "welcome");
    assert_eq!(info.variable_count, 1);
    assert_eq!(info.variables, vec!["user_name"]);
    assert!(!info.has_html);
    assert!(info.has_text);

    let missing = format_info(catalog.find("ghost").as_ref());
    assert_eq!(missing.name, "Unknown");
    assert_eq!(missing.subject, "No subject");
}

#[test]
fn test_decode_tolerates_arbitrary_upstream_records() {
    for raw in [
        json!(null),
        json!("just a string"),
        json!([1, 2, 3]),
        json!({"variables": 17}),
        json!({"name": "ok", "subject": 5, "html_content": null}),
    ] {
        let template: Template = decode(&raw);
        let result = preview(Some(&template), &RenderData::new());
        assert_eq!(result.subject, template.subject);
    }
}

#[test]
fn test_substitute_directly_matches_preview_semantics() {
    let data = render_data(&[("name", "Bob")]);

    assert_eq!(substitute("Hello {{.name}}", &data), "Hello Bob");
    assert_eq!(substitute("Hello {{.name}}", &RenderData::new()), "Hello [name]");
    assert_eq!(substitute("Hello {{.missing}}", &data), "Hello [missing]");
}
