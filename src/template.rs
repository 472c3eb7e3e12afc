//! Template file rendering
//!
//! Reads a template from disk and renders it against a caller-supplied
//! context using minijinja. Rendering is synchronous and independent of the
//! mail transport.

use std::fs;
use std::path::Path;

use minijinja::Environment;
use serde::Serialize;

use crate::error::MailError;

/// Render a template file (UTF-8) against a context
///
/// Placeholders use `{{ name }}` syntax; undefined variables render as the
/// empty string.
///
/// # Errors
///
/// Returns `MailError::TemplateRead` if the file is missing or unreadable,
/// and `MailError::Template` if the template is malformed or fails to
/// render.
pub fn render_file(path: impl AsRef<Path>, context: impl Serialize) -> Result<String, MailError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| MailError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("template");

    render_str(&source, name, context)
}

/// Render an in-memory template source against a context
///
/// `name` is only used in diagnostics.
///
/// # Errors
///
/// Returns `MailError::Template` if the template is malformed or fails to
/// render.
pub fn render_str(
    source: &str,
    name: &str,
    context: impl Serialize,
) -> Result<String, MailError> {
    let mut env = Environment::new();
    env.add_template(name, source)?;

    let template = env.get_template(name)?;
    Ok(template.render(context)?)
}
