//! Stylesheets and the cascade.
//!
//! A [`StyleSheet`] owns its rules in insertion order. For a node, the
//! matching rules and its inline style are ranked by
//! `(important, specificity, source order)` into one winning declaration
//! per property ([`cascade`]), then turned into effective values with
//! inheritance, defaults and variable substitution ([`compute_style`]).
//! Sheets also carry the `@keyframes` sets that animations refer to.

#![forbid(unsafe_code)]

mod keyframes;
mod rank;
mod resolve;
mod rule;
mod sheet;

pub use keyframes::{Keyframe, KeyframesDefinition, parse_keyframe_offset};
pub use rank::{CascadeRank, compare_rank};
pub use resolve::{Cascaded, ComputedStyle, StyleContext, cascade, compute_style};
pub use rule::{Declaration, DeclarationBlock, InlineStyle, StyleRule};
pub use sheet::StyleSheet;
