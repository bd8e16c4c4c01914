use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use css_cascade::StyleSheet;
use css_properties::PropertyRegistry;
use log::debug;

/// Parse stylesheet text. Never fails: malformed pieces are skipped.
pub fn load_stylesheet(text: &str, registry: &PropertyRegistry) -> StyleSheet {
    StyleSheet::parse(text, registry)
}

/// Read and parse a stylesheet file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not UTF-8.
pub fn load_stylesheet_file(
    path: impl AsRef<Path>,
    registry: &PropertyRegistry,
) -> Result<StyleSheet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading stylesheet {}", path.display()))?;
    let sheet = StyleSheet::parse(&text, registry);
    debug!(target: "css::cascade", "loaded {} rules from {}", sheet.len(), path.display());
    Ok(sheet)
}
