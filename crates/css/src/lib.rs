//! Stylesheet cascade engine for widget trees.
//!
//! This crate re-exports the style crates under one roof and adds
//! stylesheet loading. A typical host:
//!
//! 1. builds a [`PropertyRegistry`] once (usually
//!    [`PropertyRegistry::with_base_properties`]) and shares it behind an `Arc`;
//! 2. loads one or more [`StyleSheet`]s and installs them in a [`StyleEngine`];
//! 3. implements [`NodeAdapter`] for its widgets and calls
//!    [`StyleEngine::restyle`] when a node changes, handing the returned
//!    [`TransitionRequest`]s to its animation system;
//! 4. asks [`StyleEngine::animations`] for the `@keyframes` animations a
//!    node runs.

mod loader;

pub use loader::{load_stylesheet, load_stylesheet_file};

pub use css_cascade::{
    CascadeRank, Cascaded, ComputedStyle, Declaration, DeclarationBlock, InlineStyle, Keyframe,
    KeyframesDefinition, StyleContext, StyleRule, StyleSheet, cascade, compute_style,
};
pub use css_orchestrator::{AnimationBinding, StyleEngine, StyleEngineConfig};
pub use css_properties::{
    PropertyDefinition, PropertyId, PropertyRegistry, ShorthandDefinition, ShorthandKind,
};
pub use css_selectors::{
    Combinator, CompoundSelector, MatchMode, NodeAdapter, NodeArena, NodeId, PseudoClass,
    PseudoClassSet, Selector, SelectorList, SimpleSelector, Specificity, parse_selector,
    parse_selector_list,
};
pub use css_syntax::{FunctionArg, FunctionCall, parse_function, split_top_level};
pub use css_transitions::{
    AnimationDefinition, AnimationDirection, AnimationMap, FillMode, Interpolation,
    IterationCount, PropertyChange, TimingFunction, TransitionDefinition, TransitionMap,
    TransitionRequest, parse_time,
};
pub use css_variables::{Variable, VariableMap, VariableResolver};
