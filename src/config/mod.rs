mod settings;

pub use settings::{CatalogConfig, OtelConfig, ServerConfig, Settings};
