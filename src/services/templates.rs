//! Server-rendered HTML pages.
//!
//! Templates are embedded at build time and parsed once at startup.

use rust_embed::RustEmbed;
use tera::{Context, Tera};

use crate::error::{AppError, AppResult};

#[derive(RustEmbed)]
#[folder = "templates/"]
struct PageTemplates;

/// Parsed page templates, shared read-only across workers.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Load every embedded template.
    pub fn load() -> AppResult<Self> {
        let mut sources = Vec::new();
        for name in PageTemplates::iter() {
            let file = PageTemplates::get(&name).ok_or_else(|| {
                AppError::Internal(format!("embedded template not found: {}", name))
            })?;
            let body = String::from_utf8(file.data.into_owned()).map_err(|e| {
                AppError::Internal(format!("template {} is not UTF-8: {}", name, e))
            })?;
            sources.push((name.to_string(), body));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(sources)
            .map_err(|e| AppError::Internal(format!("failed to parse templates: {}", e)))?;

        Ok(Self { tera })
    }

    /// Render a template by file name.
    pub fn render(&self, name: &str, context: &Context) -> AppResult<String> {
        self.tera
            .render(name, context)
            .map_err(|e| AppError::Internal(format!("failed to render {}: {}", name, e)))
    }
}
