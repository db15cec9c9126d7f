//! Startup-time template loading.
//!
//! # Responsibilities
//! - Compile every template matching the configured glob
//! - Refuse to start when nothing usable was loaded
//! - Execute a named template into a byte buffer
//!
//! # Design Decisions
//! - Read-only after construction; shared through `Arc` with no lock
//! - Autoescaping disabled: output is shell, so templates quote values
//!   explicitly with the `shell_quote` filter

use tera::{Context, Tera};
use thiserror::Error;

use crate::templates::error_chain;
use crate::templates::filters::{shell_quote_filter, SHELL_QUOTE};

/// Errors raised while building the template set.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A template failed to load or compile.
    #[error("Could not parse templates: {0}")]
    Load(String),

    /// The glob matched no template files.
    #[error("Could not parse templates: no templates matched {0:?}")]
    Empty(String),

    /// A template the service depends on is not in the set.
    #[error("Could not parse templates: required template {0:?} is missing")]
    Missing(String),
}

/// Immutable collection of compiled templates.
#[derive(Debug)]
pub struct TemplateStore {
    tera: Tera,
}

impl TemplateStore {
    /// Load every template matching `glob`.
    ///
    /// Names are paths relative to the glob's base directory, so
    /// `templates/*.tera` yields names like `usage.html.tera`.
    pub fn load(glob: &str) -> Result<Self, TemplateError> {
        let tera = Tera::new(glob).map_err(|e| TemplateError::Load(error_chain(&e)))?;
        Self::from_tera(tera, glob)
    }

    /// Build a store from in-memory `(name, source)` pairs.
    pub fn from_raw<'a, I>(templates: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|e| TemplateError::Load(error_chain(&e)))?;
        Self::from_tera(tera, "<raw>")
    }

    fn from_tera(mut tera: Tera, source: &str) -> Result<Self, TemplateError> {
        if tera.get_template_names().next().is_none() {
            return Err(TemplateError::Empty(source.to_string()));
        }
        tera.autoescape_on(vec![]);
        tera.register_filter(SHELL_QUOTE, shell_quote_filter);
        Ok(Self { tera })
    }

    /// Check that each of `names` is present.
    pub fn require(&self, names: &[&str]) -> Result<(), TemplateError> {
        for name in names {
            if !self.contains(name) {
                return Err(TemplateError::Missing((*name).to_string()));
            }
        }
        Ok(())
    }

    /// Whether a template with this name was loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Names of all loaded templates, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(String::from).collect();
        names.sort();
        names
    }

    /// Render the named template against `context`.
    pub fn execute(&self, name: &str, context: &Context) -> Result<Vec<u8>, tera::Error> {
        let mut buffer = Vec::new();
        self.tera.render_to(name, context, &mut buffer)?;
        Ok(buffer)
    }
}
