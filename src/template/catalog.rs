//! Template catalog with CRUD operations.
//!
//! The catalog owns its templates in a concurrent map keyed by name; every
//! read and every successful mutation hands back a snapshot clone. Raw
//! payloads are decoded exactly once, on the way in.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use super::decode::{decode, decode_html, decode_text, parse_variables};
use super::types::{
    Template, TemplateError, TemplateResult, UpdateTemplateRequest,
};

/// Default upper bound on catalog size
pub const DEFAULT_MAX_TEMPLATES: usize = 1000;

/// In-memory template catalog
pub struct TemplateCatalog {
    templates: DashMap<String, Template>,
    max_templates: usize,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCatalog {
    /// Create a catalog with the default size limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_TEMPLATES)
    }

    /// Create a catalog with an explicit size limit
    pub fn with_limit(max_templates: usize) -> Self {
        Self {
            templates: DashMap::new(),
            max_templates,
        }
    }

    /// Admit a new template
    pub fn create(&self, template: Template) -> TemplateResult<Template> {
        template.validate()?;

        if self.templates.len() >= self.max_templates {
            return Err(TemplateError::CatalogFull(self.max_templates));
        }

        if self.templates.contains_key(&template.name) {
            return Err(TemplateError::AlreadyExists(template.name));
        }

        self.templates
            .insert(template.name.clone(), template.clone());

        Ok(template)
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> TemplateResult<Template> {
        self.templates
            .get(name)
            .map(|t| t.clone())
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    /// Look up a template by name, `None` when absent.
    ///
    /// The rendering endpoints use this form so an unknown name flows into
    /// the renderer's degrade path instead of becoming a CRUD error.
    pub fn find(&self, name: &str) -> Option<Template> {
        self.templates.get(name).map(|t| t.clone())
    }

    /// List all templates, in name order
    pub fn list(&self) -> Vec<Template> {
        let mut templates: Vec<Template> = self
            .templates
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates
    }

    /// Update an existing template.
    ///
    /// Provided content fields arrive in raw escaped form and are decoded
    /// here, the same single decode pass creation applies.
    pub fn update(&self, name: &str, updates: UpdateTemplateRequest) -> TemplateResult<Template> {
        let mut template = self.get(name)?;

        if let Some(subject) = updates.subject {
            template.subject = subject;
        }

        if let Some(html_content) = updates.html_content {
            template.html_content = decode_html(&html_content);
        }

        if let Some(text_content) = updates.text_content {
            template.text_content = decode_text(&text_content);
        }

        if let Some(variables) = updates.variables {
            template.variables = parse_variables(Some(&variables));
        }

        template.updated_at = Utc::now();
        template.validate()?;

        self.templates.insert(name.to_string(), template.clone());

        Ok(template)
    }

    /// Delete a template by name
    pub fn delete(&self, name: &str) -> TemplateResult<()> {
        self.templates
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    /// Check if a template exists
    pub fn exists(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Get the number of templates
    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Bulk-import raw template records, as returned by the upstream
    /// catalog API (a JSON array of records).
    ///
    /// Each element is decoded and admitted independently; records that
    /// fail admission (bad name, duplicate) are logged and skipped, never
    /// aborting the rest of the batch. Returns the number admitted.
    pub fn import(&self, raw: &serde_json::Value) -> usize {
        let Some(records) = raw.as_array() else {
            tracing::warn!("Template import payload is not an array, nothing imported");
            return 0;
        };

        let mut imported = 0;
        for record in records {
            let template = decode(record);
            let name = template.name.clone();
            match self.create(template) {
                Ok(_) => imported += 1,
                Err(e) => {
                    tracing::warn!(template = %name, error = %e, "Skipping template during import");
                }
            }
        }

        tracing::info!(imported, total = records.len(), "Template import finished");
        imported
    }
}

/// Create an Arc-wrapped template catalog
pub fn create_template_catalog(max_templates: usize) -> Arc<TemplateCatalog> {
    Arc::new(TemplateCatalog::with_limit(max_templates))
}
