#![cfg(test)]

use css_selectors::{
    MatchMode, NodeArena, NodeId, PseudoClass, SimpleSelector, parse_selector,
    parse_selector_list,
};

fn init_logger() {
    let _ignored = env_logger::builder().is_test(true).try_init();
}

struct Tree {
    arena: NodeArena,
    window: NodeId,
    panel: NodeId,
    first: NodeId,
    second: NodeId,
    label: NodeId,
}

/// `Window > Panel#main > [Button.warn, Button#ok.primary, Label]`
fn build_tree() -> Tree {
    let mut arena = NodeArena::new();
    let window = arena.create_root("window");
    let panel = arena.append_child(window, "panel");
    arena.set_id(panel, "main");
    let first = arena.append_child(panel, "button");
    arena.add_class(first, "warn");
    let second = arena.append_child(panel, "button");
    arena.set_id(second, "ok");
    arena.add_class(second, "primary");
    arena.set_attr(second, "flat", "true");
    let label = arena.append_child(panel, "label");
    Tree {
        arena,
        window,
        panel,
        first,
        second,
        label,
    }
}

fn matches(tree: &Tree, text: &str, node: NodeId) -> bool {
    parse_selector(text).matches(&tree.arena, node, MatchMode::ApplyPseudo)
}

/// Simple selectors compare tags case-insensitively and classes/ids exactly.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn simple_selectors() {
    init_logger();
    let tree = build_tree();
    assert!(matches(&tree, "Button", tree.first));
    assert!(matches(&tree, "*", tree.label));
    assert!(matches(&tree, ".warn", tree.first));
    assert!(!matches(&tree, ".WARN", tree.first));
    assert!(matches(&tree, "#ok.primary", tree.second));
    assert!(matches(&tree, "[flat]", tree.second));
    assert!(matches(&tree, "[flat=true]", tree.second));
    assert!(matches(&tree, "[flat=\"true\"]", tree.second));
    assert!(!matches(&tree, "[flat=false]", tree.second));
    assert!(!matches(&tree, "[flat]", tree.first));
}

/// All four combinators, including backtracking past a non-matching parent.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn combinators() {
    init_logger();
    let tree = build_tree();
    assert!(matches(&tree, "window button", tree.first));
    assert!(matches(&tree, "window > panel > button", tree.first));
    assert!(!matches(&tree, "window > button", tree.first));
    assert!(matches(&tree, "button.warn + button", tree.second));
    assert!(!matches(&tree, "button.warn + label", tree.label));
    assert!(matches(&tree, "button.warn ~ label", tree.label));
    assert!(matches(&tree, "window #main > .warn ~ #ok", tree.second));
    assert!(!matches(&tree, "label ~ button", tree.first));
}

/// A descendant match must backtrack when the nearest candidate ancestor
/// does not satisfy the rest of the chain.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn descendant_backtracking() {
    init_logger();
    let mut arena = NodeArena::new();
    let outer = arena.create_root("box");
    arena.add_class(outer, "outer");
    let middle = arena.append_child(outer, "box");
    let inner = arena.append_child(middle, "box");
    let leaf = arena.append_child(inner, "text");
    let selector = parse_selector(".outer > box text");
    assert!(selector.matches(&arena, leaf, MatchMode::ApplyPseudo));
}

/// State pseudo-classes follow the node and `IgnorePseudo` treats them as held.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn state_pseudo_classes() {
    init_logger();
    let mut tree = build_tree();
    let hover = parse_selector("button:hover");
    assert!(!hover.matches(&tree.arena, tree.first, MatchMode::ApplyPseudo));
    assert!(hover.matches(&tree.arena, tree.first, MatchMode::IgnorePseudo));
    assert!(tree.arena.set_pseudo_class(tree.first, PseudoClass::Hover, true));
    assert!(hover.matches(&tree.arena, tree.first, MatchMode::ApplyPseudo));

    assert!(matches(&tree, "button:enabled", tree.second));
    tree.arena.set_pseudo_class(tree.second, PseudoClass::Disabled, true);
    assert!(!matches(&tree, "button:enabled", tree.second));
    assert!(matches(&tree, "button:disabled", tree.second));

    tree.arena.set_pseudo_class(tree.label, PseudoClass::Pressed, true);
    assert!(matches(&tree, "label:active", tree.label));
}

/// Structural pseudo-classes read the tree shape.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn structural_pseudo_classes() {
    init_logger();
    let tree = build_tree();
    assert!(matches(&tree, ":root", tree.window));
    assert!(!matches(&tree, ":root", tree.panel));
    assert!(matches(&tree, "button:first-child", tree.first));
    assert!(!matches(&tree, "button:first-child", tree.second));
    assert!(matches(&tree, ":last-child", tree.label));
    assert!(matches(&tree, "panel:only-child", tree.panel));
    assert!(matches(&tree, "label:empty", tree.label));
    assert!(!matches(&tree, "panel:empty", tree.panel));
}

/// Lists split on commas and keep each selector's own specificity.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn selector_lists() {
    init_logger();
    let list = parse_selector_list("label, #ok , , button.warn");
    assert_eq!(list.selectors.len(), 3);
    assert_eq!(
        list.selectors[1].subject().simples.as_slice(),
        &[SimpleSelector::Id("ok".to_owned())]
    );
    let tree = build_tree();
    assert!(css_selectors::matches_selector_list(
        &tree.arena,
        tree.label,
        &list,
        MatchMode::ApplyPseudo
    ));
    assert!(!css_selectors::matches_selector_list(
        &tree.arena,
        tree.window,
        &list,
        MatchMode::ApplyPseudo
    ));
}
