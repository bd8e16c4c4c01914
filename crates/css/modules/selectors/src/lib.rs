//! Selector parsing, matching and specificity for widget trees.
//!
//! Supported syntax:
//! - Type, universal, class, id, `[attr]` and `[attr=value]` selectors
//! - Pseudo-classes from a closed set (see [`PseudoClass`])
//! - Combinators: descendant, child, adjacent sibling, general sibling
//!
//! Unknown syntax never fails a parse; the offending piece is dropped and a
//! weaker selector remains.

mod arena;
mod matcher;
mod parser;
mod pseudo;
mod specificity;

pub use arena::{NodeArena, NodeId};
pub use matcher::{MatchMode, matches_compound, matches_selector, matches_selector_list};
pub use parser::{parse_selector, parse_selector_list};
pub use pseudo::{PseudoClass, PseudoClassSet};
pub use specificity::{Specificity, specificity_of_compound, specificity_of_selector};

use smallvec::SmallVec;

/// Tree access needed for matching. Implement this for your widget layer.
pub trait NodeAdapter {
    type Handle: Copy + Eq;

    /// Unique, stable key for caching per node.
    fn unique_key(&self, node: Self::Handle) -> u64;

    /// Parent node, if any.
    fn parent(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// Previous sibling in document order.
    fn previous_sibling(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// Next sibling in document order.
    fn next_sibling(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// First child in document order.
    fn first_child(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// Tag name. Compared ASCII case-insensitively.
    fn tag_name(&self, node: Self::Handle) -> &str;

    /// The node's id, if it has one.
    fn element_id(&self, node: Self::Handle) -> Option<&str>;

    /// True if the node carries the class token.
    fn has_class(&self, node: Self::Handle, class: &str) -> bool;

    /// Attribute value if present.
    fn attr(&self, node: Self::Handle, name: &str) -> Option<&str>;

    /// Interactive state flags currently set on the node.
    fn pseudo_classes(&self, node: Self::Handle) -> PseudoClassSet;
}

/// Simple selectors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// Tag name, stored lowercase.
    Type(String),
    /// `*`
    Universal,
    /// `.name`
    Class(String),
    /// `#name`
    Id(String),
    /// `[name]`
    AttrExists(String),
    /// `[name=value]`
    AttrEquals { name: String, value: String },
    /// `:name`
    PseudoClass(PseudoClass),
}

/// A run of simple selectors with no combinator between them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct CompoundSelector {
    pub simples: SmallVec<SimpleSelector, 4>,
}

impl CompoundSelector {
    /// The id required by this compound, if any.
    pub fn id(&self) -> Option<&str> {
        self.simples.iter().find_map(|simple| match simple {
            SimpleSelector::Id(id) => Some(id.as_str()),
            _ => None,
        })
    }

    /// The tag name required by this compound, if any.
    pub fn tag(&self) -> Option<&str> {
        self.simples.iter().find_map(|simple| match simple {
            SimpleSelector::Type(tag) => Some(tag.as_str()),
            _ => None,
        })
    }

    /// Pseudo-classes required by this compound.
    pub fn pseudo_classes(&self) -> PseudoClassSet {
        self.simples
            .iter()
            .filter_map(|simple| match simple {
                SimpleSelector::PseudoClass(pseudo) => Some(*pseudo),
                _ => None,
            })
            .collect()
    }
}

/// Combinators between compounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// One compound selector chain, e.g. `Panel > Button.warn:hover`.
///
/// `rest[i].0` is the combinator joining the compound before it to
/// `rest[i].1`; the rightmost compound is the subject.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selector {
    first: CompoundSelector,
    rest: Vec<(Combinator, CompoundSelector)>,
    specificity: Specificity,
    text: String,
}

impl Selector {
    pub(crate) fn new(
        first: CompoundSelector,
        rest: Vec<(Combinator, CompoundSelector)>,
        text: String,
    ) -> Self {
        let mut selector = Self {
            first,
            rest,
            specificity: Specificity::default(),
            text,
        };
        selector.specificity = specificity_of_selector(&selector);
        selector
    }

    /// The leftmost compound.
    pub fn first(&self) -> &CompoundSelector {
        &self.first
    }

    /// Combinator/compound pairs to the right of the first compound.
    pub fn rest(&self) -> &[(Combinator, CompoundSelector)] {
        &self.rest
    }

    /// The rightmost compound, the one tested against the subject node.
    pub fn subject(&self) -> &CompoundSelector {
        self.rest.last().map_or(&self.first, |pair| &pair.1)
    }

    /// Specificity computed at parse time.
    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Normalized selector text with whitespace runs collapsed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when no compound carries any simple selector.
    pub fn is_empty(&self) -> bool {
        self.first.simples.is_empty() && self.rest.iter().all(|pair| pair.1.simples.is_empty())
    }

    /// True when any compound requires a pseudo-class.
    pub fn has_pseudo_classes(&self) -> bool {
        !self.first.pseudo_classes().is_empty()
            || self
                .rest
                .iter()
                .any(|pair| !pair.1.pseudo_classes().is_empty())
    }

    /// Match this selector against `node`.
    pub fn matches<A: NodeAdapter>(&self, adapter: &A, node: A::Handle, mode: MatchMode) -> bool {
        matches_selector(adapter, node, self, mode)
    }
}

/// Comma-separated selectors.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}
