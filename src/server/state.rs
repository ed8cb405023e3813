use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::template::{create_template_catalog, TemplateCatalog};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub catalog: Arc<TemplateCatalog>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let catalog = create_template_catalog(settings.catalog.max_templates);

        Self {
            settings: Arc::new(settings),
            catalog,
            start_time: Instant::now(),
        }
    }
}
