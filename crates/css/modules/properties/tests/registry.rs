#![cfg(test)]

use css_properties::{PropertyId, PropertyRegistry, ShorthandKind};

fn init_logger() {
    let _ignored = env_logger::builder().is_test(true).try_init();
}

/// Registration is idempotent and keeps the first definition.
///
/// # Errors
/// Returns an error if a registered property cannot be found.
#[test]
fn duplicate_registration_keeps_first() -> Result<(), Box<dyn core::error::Error>> {
    init_logger();
    let mut registry = PropertyRegistry::new();
    let first = registry.register_property("color", "#000000", true).id();
    let second = registry.register_property("color", "#ffffff", false).id();
    assert_eq!(first, second);
    let color = registry.property("color").ok_or("color missing")?;
    assert_eq!(color.default_value(), "#000000");
    assert!(color.is_inherited());
    assert_eq!(registry.len(), 1);
    Ok(())
}

/// Ids are the djb2 hash of the name and lookups work both ways.
///
/// # Errors
/// Returns an error if a registered property cannot be found.
#[test]
fn lookup_by_id_and_name() -> Result<(), Box<dyn core::error::Error>> {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let width = registry.property("width").ok_or("width missing")?;
    assert_eq!(width.id(), PropertyId::from_name("width"));
    assert_eq!(
        registry.property_by_id(width.id()).map(|definition| definition.name()),
        Some("width")
    );
    assert!(!registry.contains("no-such-property"));
    assert!(registry.property("transition").is_some_and(|definition| definition.is_indexed()));
    Ok(())
}

/// Aliases resolve to their canonical property.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn aliases_resolve() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    assert_eq!(registry.canonical_name("font-name"), "font-family");
    assert_eq!(registry.canonical_name("lw"), "layout-width");
    assert_eq!(registry.canonical_name("width"), "width");
    assert_eq!(registry.canonical_name("unknown"), "unknown");
    assert_eq!(
        registry.property("rotate").map(|definition| definition.name()),
        Some("rotation")
    );
}

/// Box shorthands replicate edges the usual way; pairs fill both halves.
///
/// # Errors
/// Returns an error if a shorthand fails to expand.
#[test]
fn shorthand_expansion() -> Result<(), Box<dyn core::error::Error>> {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let three = registry
        .expand_shorthand("margin", "1dp 2dp 3dp")
        .ok_or("margin did not expand")?;
    let pairs: Vec<(&str, &str)> = three
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("margin-top", "1dp"),
            ("margin-right", "2dp"),
            ("margin-bottom", "3dp"),
            ("margin-left", "2dp"),
        ]
    );
    let single = registry
        .expand_shorthand("min-size", "rgb(1, 2, 3)")
        .ok_or("min-size did not expand")?;
    assert!(single.iter().all(|(_, value)| value == "rgb(1, 2, 3)"));
    assert!(registry.expand_shorthand("margin", "1 2 3 4 5").is_none());
    assert!(registry.expand_shorthand("color", "red").is_none());
    Ok(())
}

/// Shorthands over unknown longhands are rejected.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn shorthand_requires_known_longhands() {
    init_logger();
    let mut registry = PropertyRegistry::new();
    registry.register_property("a", "", false);
    assert!(!registry.register_shorthand("ab", &["a", "b"], ShorthandKind::Pair));
    registry.register_property("b", "", false);
    assert!(registry.register_shorthand("ab", &["a", "b"], ShorthandKind::Pair));
    assert!(!registry.register_shorthand("abcd", &["a", "b"], ShorthandKind::Box));
}
