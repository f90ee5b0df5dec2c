//! HTML mail templates
//!
//! Templates use `{name}` placeholders. The built-in templates are compiled
//! into the binary and can be overridden by `*.html` files in a directory.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tokio::fs;
use tracing::{debug, info, warn};

use super::MailError;
use crate::utils::helpers::escape_html;

pub const INVITE_TEMPLATE: &str = "invite_mail.html";
pub const RESET_PASSWORD_TEMPLATE: &str = "reset_password_mail.html";

/// Template parameters: placeholder name -> raw value
pub type TemplateParams = HashMap<String, String>;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is a valid regex")
    })
}

/// Registry of named HTML templates
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<String, String>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// Create a registry holding the built-in templates
    pub fn new() -> Self {
        let mut templates = HashMap::new();
        templates.insert(
            INVITE_TEMPLATE.to_string(),
            include_str!("../../templates/invite_mail.html").to_string(),
        );
        templates.insert(
            RESET_PASSWORD_TEMPLATE.to_string(),
            include_str!("../../templates/reset_password_mail.html").to_string(),
        );

        Self { templates }
    }

    /// Load every `*.html` file of `directory`, replacing templates of the same name
    pub async fn load_dir(&mut self, directory: impl AsRef<Path>) -> Result<usize, MailError> {
        let directory = directory.as_ref();
        if !directory.exists() {
            warn!("Template directory not found: {}", directory.display());
            return Ok(0);
        }

        let mut entries = fs::read_dir(directory)
            .await
            .map_err(|e| MailError::Template(format!("{}: {}", directory.display(), e)))?;

        let mut loaded = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| MailError::Template(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| MailError::Template(format!("{}: {}", path.display(), e)))?;
            debug!("Loaded template {}", name);
            self.templates.insert(name.to_string(), content);
            loaded += 1;
        }

        info!("Loaded {} templates from {}", loaded, directory.display());
        Ok(loaded)
    }

    /// Add or replace a template
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.templates.insert(name.into(), content.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Render a template, HTML-escaping every parameter value
    pub fn render(&self, name: &str, params: &TemplateParams) -> Result<String, MailError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| MailError::Template(format!("Template not found: {}", name)))?;

        // Single pass: inserted values are never scanned for placeholders.
        let rendered = placeholder_regex().replace_all(template, |caps: &Captures| {
            match params.get(&caps[1]) {
                Some(value) => escape_html(value),
                None => caps[0].to_string(),
            }
        });

        Ok(rendered.into_owned())
    }
}
