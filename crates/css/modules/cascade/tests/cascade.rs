#![cfg(test)]

use core::time::Duration;

use css_cascade::{
    ComputedStyle, InlineStyle, KeyframesDefinition, StyleContext, StyleRule, StyleSheet, cascade,
    compute_style,
};
use css_properties::PropertyRegistry;
use css_selectors::{MatchMode, NodeArena, NodeId, PseudoClass};

fn init_logger() {
    let _ignored = env_logger::builder().is_test(true).try_init();
}

fn resolve(
    sheet: &StyleSheet,
    arena: &NodeArena,
    node: NodeId,
    registry: &PropertyRegistry,
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    let rules = sheet.element_styles(arena, node, MatchMode::ApplyPseudo);
    let cascaded = cascade(&rules, None);
    compute_style(&cascaded, &StyleContext::new(registry).with_parent(parent))
}

/// `#alert.warn` beats `.warn`; the color inherits into a child.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn warn_alert_example() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let sheet = StyleSheet::parse(
        ".warn { color: #ff0000; } #alert.warn { color: #ffff00; }",
        &registry,
    );
    let mut arena = NodeArena::new();
    let root = arena.create_root("Window");
    let plain = arena.append_child(root, "Label");
    arena.add_class(plain, "warn");
    let alert = arena.append_child(root, "Label");
    arena.add_class(alert, "warn");
    arena.set_id(alert, "alert");
    let child = arena.append_child(alert, "Text");

    let root_style = resolve(&sheet, &arena, root, &registry, None);
    let plain_style = resolve(&sheet, &arena, plain, &registry, Some(&root_style));
    let alert_style = resolve(&sheet, &arena, alert, &registry, Some(&root_style));
    let child_style = resolve(&sheet, &arena, child, &registry, Some(&alert_style));

    assert_eq!(root_style.get("color"), Some("#000000"));
    assert_eq!(plain_style.get("color"), Some("#ff0000"));
    assert_eq!(alert_style.get("color"), Some("#ffff00"));
    assert_eq!(child_style.get("color"), Some("#ffff00"));
    assert_eq!(child_style.get("opacity"), Some("1"));
}

/// Equal specificity: the later rule wins, also across combined sheets.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn later_insertion_wins() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let mut first = StyleSheet::parse(".box { opacity: 0.5; }", &registry);
    let second = StyleSheet::parse(".box { opacity: 0.25; }", &registry);
    first.combine_stylesheet(second);

    let mut arena = NodeArena::new();
    let node = arena.create_root("Panel");
    arena.add_class(node, "box");
    assert_eq!(resolve(&first, &arena, node, &registry, None).get("opacity"), Some("0.25"));
}

/// Combining two sheets resolves like parsing them back to back.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn combine_matches_concatenation() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let left = "Panel { color: #111111; margin: 1dp 2dp; } .a { opacity: 0.1; }";
    let right = "Panel.a { color: #222222; } Panel { margin-left: 7dp; } .a { opacity: 0.9; }";
    let mut combined = StyleSheet::parse(left, &registry);
    combined.combine_stylesheet(StyleSheet::parse(right, &registry));
    let concatenated = StyleSheet::parse(&format!("{left}\n{right}"), &registry);

    let mut arena = NodeArena::new();
    let node = arena.create_root("Panel");
    arena.add_class(node, "a");
    let from_combined = resolve(&combined, &arena, node, &registry, None);
    let from_text = resolve(&concatenated, &arena, node, &registry, None);
    assert_eq!(from_combined, from_text);
    assert_eq!(from_combined.get("margin-left"), Some("7dp"));
    assert_eq!(from_combined.get("margin-right"), Some("2dp"));
    assert_eq!(from_combined.get("color"), Some("#222222"));
    assert_eq!(from_combined.get("opacity"), Some("0.9"));
}

/// Parsing the same text twice gives identical results.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn reload_is_stable() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let text = "Button { color: #123456; } Button:hover { color: #654321 !important; }";
    let mut arena = NodeArena::new();
    let node = arena.create_root("Button");
    arena.set_pseudo_class(node, PseudoClass::Hover, true);
    let once = resolve(&StyleSheet::parse(text, &registry), &arena, node, &registry, None);
    let twice = resolve(&StyleSheet::parse(text, &registry), &arena, node, &registry, None);
    assert_eq!(once, twice);
    assert_eq!(once.get("color"), Some("#654321"));
}

/// `!important` beats specificity; inline beats every normal rule.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn importance_and_inline() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let sheet = StyleSheet::parse(
        "Label { opacity: 0.3 !important; } #title { opacity: 0.6; color: #00ff00; }",
        &registry,
    );
    let mut arena = NodeArena::new();
    let node = arena.create_root("Label");
    arena.set_id(node, "title");
    let rules = sheet.element_styles(&arena, node, MatchMode::ApplyPseudo);
    let inline = InlineStyle::parse("opacity: 0.9; color: #0000ff", &registry);
    let cascaded = cascade(&rules, Some(&inline));
    let computed = compute_style(&cascaded, &StyleContext::new(&registry));
    assert_eq!(computed.get("opacity"), Some("0.3"));
    assert_eq!(computed.get("color"), Some("#0000ff"));
}

/// Non-inherited unset properties use the default even under a parent
/// that sets them; `inherit` and `initial` keywords work.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn inheritance_and_keywords() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let sheet = StyleSheet::parse(
        "Panel { opacity: 0.5; font-size: 20dp; } \
         .inherits { opacity: inherit; } \
         .resets { font-size: initial; }",
        &registry,
    );
    let mut arena = NodeArena::new();
    let root = arena.create_root("Panel");
    let plain = arena.append_child(root, "Label");
    let inherits = arena.append_child(root, "Label");
    arena.add_class(inherits, "inherits");
    let resets = arena.append_child(root, "Label");
    arena.add_class(resets, "resets");

    let root_style = resolve(&sheet, &arena, root, &registry, None);
    let plain_style = resolve(&sheet, &arena, plain, &registry, Some(&root_style));
    assert_eq!(plain_style.get("opacity"), Some("1"));
    assert_eq!(plain_style.get("font-size"), Some("20dp"));
    let inherits_style = resolve(&sheet, &arena, inherits, &registry, Some(&root_style));
    assert_eq!(inherits_style.get("opacity"), Some("0.5"));
    let resets_style = resolve(&sheet, &arena, resets, &registry, Some(&root_style));
    assert_eq!(resets_style.get("font-size"), Some("12dp"));
}

/// Variables resolve through the nearest scope; cycles give an empty value.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn variables_through_the_tree() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let sheet = StyleSheet::parse(
        "Window { --accent: #101010; --loop: var(--loop); } \
         .themed { --accent: #202020; } \
         Label { color: var(--accent); background-color: var(--loop); }",
        &registry,
    );
    let mut arena = NodeArena::new();
    let root = arena.create_root("Window");
    let outer = arena.append_child(root, "Label");
    let themed = arena.append_child(root, "Panel");
    arena.add_class(themed, "themed");
    let inner = arena.append_child(themed, "Label");

    let root_style = resolve(&sheet, &arena, root, &registry, None);
    let outer_style = resolve(&sheet, &arena, outer, &registry, Some(&root_style));
    let themed_style = resolve(&sheet, &arena, themed, &registry, Some(&root_style));
    let inner_style = resolve(&sheet, &arena, inner, &registry, Some(&themed_style));
    assert_eq!(outer_style.get("color"), Some("#101010"));
    assert_eq!(inner_style.get("color"), Some("#202020"));
    assert_eq!(inner_style.get("background-color"), Some(""));
}

/// Merging with `add_style` keeps the first rule's position.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn add_style_keeps_position() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let mut sheet = StyleSheet::new();
    sheet.add_style(StyleRule::parse(".a", "opacity: 0.1", &registry));
    sheet.add_style(StyleRule::parse(".b", "opacity: 0.2", &registry));
    sheet.add_style(StyleRule::parse(".a", "opacity: 0.3", &registry));
    assert_eq!(sheet.len(), 2);

    let mut arena = NodeArena::new();
    let node = arena.create_root("Panel");
    arena.add_class(node, "a");
    arena.add_class(node, "b");
    assert_eq!(resolve(&sheet, &arena, node, &registry, None).get("opacity"), Some("0.2"));

    sheet.combine_style(StyleRule::parse(".a", "opacity: 0.4", &registry));
    assert_eq!(sheet.len(), 3);
    assert_eq!(resolve(&sheet, &arena, node, &registry, None).get("opacity"), Some("0.4"));
    assert_eq!(sheet.styles_for_selector(".a").len(), 2);
}

/// Marked layers can be removed without touching the rest.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn marker_layers() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let mut sheet = StyleSheet::parse("Label { color: #111111; }", &registry);
    let mut theme =
        StyleSheet::parse("Label { color: #222222; } Panel { opacity: 0.5; }", &registry);
    theme.set_marker(7);
    sheet.combine_stylesheet(theme);
    assert!(sheet.marker_exists(7));
    assert_eq!(sheet.all_with_marker(7).len(), 2);

    let mut arena = NodeArena::new();
    let node = arena.create_root("Label");
    assert_eq!(resolve(&sheet, &arena, node, &registry, None).get("color"), Some("#222222"));
    let version = sheet.version();
    sheet.remove_all_with_marker(7);
    assert!(sheet.version() > version);
    assert_eq!(sheet.len(), 1);
    assert_eq!(resolve(&sheet, &arena, node, &registry, None).get("color"), Some("#111111"));
}

const PULSE: &str = "@keyframes pulse { \
                         to { opacity: 1; } \
                         from { opacity: 0; color: #000000; } \
                         40%, 60% { opacity: 0.5; } \
                         60% { color: #ffffff; } \
                         150% { opacity: 9; } \
                     }";

/// `@keyframes` blocks land on the sheet with frames sorted by offset,
/// duplicate offsets merged and out-of-range offsets dropped.
///
/// # Errors
/// Returns an error if a keyframe set or frame is missing.
#[test]
fn keyframes_on_sheet() -> Result<(), Box<dyn core::error::Error>> {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let sheet = StyleSheet::parse(
        &format!("{PULSE} @keyframes none {{ to {{ opacity: 1; }} }} Label {{ color: #111111; }}"),
        &registry,
    );
    assert_eq!(sheet.len(), 1);
    assert!(!sheet.has_keyframes("none"));
    let pulse = sheet.keyframes("pulse").ok_or("pulse")?;
    let offsets: Vec<f64> = pulse.keyframes().iter().map(|frame| frame.offset()).collect();
    assert_eq!(offsets, [0.0, 0.4, 0.6, 1.0]);
    let sixty = pulse.keyframes().get(2).ok_or("60%")?;
    assert_eq!(sixty.declaration("opacity").map(|decl| decl.value.as_str()), Some("0.5"));
    assert_eq!(sixty.declaration("color").map(|decl| decl.value.as_str()), Some("#ffffff"));
    assert_eq!(pulse.properties(), ["opacity", "color"]);
    Ok(())
}

/// Keyframe sets follow rule markers and a later set replaces an earlier
/// one with the same name.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn keyframes_follow_markers() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let mut sheet = StyleSheet::parse(PULSE, &registry);
    let mut theme = StyleSheet::parse(
        "@keyframes spin { to { opacity: 1; } } Label { color: #222222; }",
        &registry,
    );
    theme.set_marker(3);
    sheet.combine_stylesheet(theme);
    assert!(sheet.has_keyframes("spin"));
    assert_eq!(sheet.all_with_marker(3).all_keyframes().count(), 1);

    let version = sheet.version();
    sheet.remove_all_with_marker(3);
    assert!(sheet.version() > version);
    assert!(!sheet.has_keyframes("spin"));
    assert!(sheet.has_keyframes("pulse"));
    assert!(sheet.is_empty());
    assert!(!sheet.marker_exists(3));

    let mut replacement = KeyframesDefinition::new("pulse");
    assert!(replacement.is_empty());
    replacement.set_marker(5);
    sheet.add_keyframes(replacement);
    assert!(sheet.keyframes("pulse").is_some_and(KeyframesDefinition::is_empty));
    assert!(sheet.marker_exists(5));
    sheet.clear();
    assert_eq!(sheet.all_keyframes().count(), 0);
}

/// `animation` declarations cascade like other properties and are read
/// into the computed style.
///
/// # Errors
/// Returns an error if an animation is missing.
#[test]
fn animations_in_computed_style() -> Result<(), Box<dyn core::error::Error>> {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let sheet = StyleSheet::parse(
        "Window { --speed: 750ms; } \
         Label { animation: pulse var(--speed) ease-in 2 reverse; } \
         Label.idle { animation: none; }",
        &registry,
    );
    let mut arena = NodeArena::new();
    let root = arena.create_root("Window");
    let label = arena.append_child(root, "Label");
    let root_style = resolve(&sheet, &arena, root, &registry, None);
    let style = resolve(&sheet, &arena, label, &registry, Some(&root_style));
    let pulse = style.animations().get("pulse").ok_or("pulse")?;
    assert_eq!(pulse.duration, Duration::from_millis(750));
    assert!(style.transitions().is_empty());

    arena.add_class(label, "idle");
    let idle = resolve(&sheet, &arena, label, &registry, Some(&root_style));
    assert!(idle.animations().is_empty());
    assert!(idle.changed_properties(&style, &registry).is_empty());
    Ok(())
}

/// Unknown properties are kept in the cascade but not computed.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn unknown_properties_are_not_computed() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let sheet = StyleSheet::parse("Label { sparkle: lots; }", &registry);
    let mut arena = NodeArena::new();
    let node = arena.create_root("Label");
    let rules = sheet.element_styles(&arena, node, MatchMode::ApplyPseudo);
    let cascaded = cascade(&rules, None);
    assert_eq!(cascaded.get("sparkle").map(|decl| decl.value.as_str()), Some("lots"));
    let computed = compute_style(&cascaded, &StyleContext::new(&registry));
    assert_eq!(computed.get("sparkle"), None);
    let ordered = cascaded.into_ordered();
    assert_eq!(ordered.keys().map(String::as_str).collect::<Vec<_>>(), ["sparkle"]);
}

/// Pseudo-independent candidates re-filter to the same rules as a full scan.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn candidate_filtering() {
    init_logger();
    let registry = PropertyRegistry::with_base_properties();
    let sheet = StyleSheet::parse(
        "Button { color: #000001; } Button:hover { color: #000002; } \
         #ok:pressed { color: #000003; }",
        &registry,
    );
    let mut arena = NodeArena::new();
    let node = arena.create_root("Button");
    arena.set_id(node, "ok");
    let candidates = sheet.candidate_rules(&arena, node, MatchMode::IgnorePseudo);
    assert_eq!(candidates.len(), 3);
    assert_eq!(sheet.filter_candidates(&arena, node, &candidates).len(), 1);
    arena.set_pseudo_class(node, PseudoClass::Hover, true);
    let filtered = sheet.filter_candidates(&arena, node, &candidates);
    assert_eq!(
        filtered,
        sheet.candidate_rules(&arena, node, MatchMode::ApplyPseudo)
    );
    assert_eq!(filtered.len(), 2);
}
