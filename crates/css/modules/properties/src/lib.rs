//! Property registry: which property names exist, their defaults, whether
//! they inherit, and how aliases and shorthands map onto them.
//!
//! A registry is built mutably once, then frozen behind an `Arc` and shared
//! read-only by stylesheets and engines.

mod base;
mod registry;

pub use registry::PropertyRegistry;

use core::fmt;
use css_syntax::name_hash;
use smallvec::SmallVec;

/// Stable identifier of a property name (djb2 hash of the canonical name).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub u32);

impl PropertyId {
    /// Hash `name` into an id. Names are expected in canonical (lowercase) form.
    pub const fn from_name(name: &str) -> Self {
        Self(name_hash(name))
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{:08x}", self.0)
    }
}

/// A registered property.
#[derive(Clone, Debug)]
pub struct PropertyDefinition {
    id: PropertyId,
    name: String,
    default_value: String,
    inherited: bool,
    indexed: bool,
    aliases: SmallVec<String, 2>,
}

impl PropertyDefinition {
    pub(crate) fn new(name: &str, default_value: &str, inherited: bool) -> Self {
        Self {
            id: PropertyId::from_name(name),
            name: name.to_owned(),
            default_value: default_value.to_owned(),
            inherited,
            indexed: false,
            aliases: SmallVec::new(),
        }
    }

    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value used when nothing is declared and nothing is inherited.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    /// Indexed properties hold a comma-separated list of values.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

impl PartialEq for PropertyDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PropertyDefinition {}

/// How a shorthand value spreads over its longhands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShorthandKind {
    /// Four sides in `top right bottom left` order, 1 to 4 values with the
    /// usual edge replication.
    Box,
    /// Two longhands, 1 or 2 values; a single value fills both.
    Pair,
}

/// A property that expands into several longhands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShorthandDefinition {
    id: PropertyId,
    name: String,
    longhands: SmallVec<String, 4>,
    kind: ShorthandKind,
}

impl ShorthandDefinition {
    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn longhands(&self) -> &[String] {
        &self.longhands
    }

    pub fn kind(&self) -> ShorthandKind {
        self.kind
    }

    /// Spread `value` over the longhands. Returns `None` when the number of
    /// values does not fit the shorthand kind.
    pub fn expand(&self, value: &str) -> Option<SmallVec<(String, String), 4>> {
        let parts = css_syntax::split_top_level_whitespace(value);
        let picks: SmallVec<usize, 4> = match (self.kind, parts.len()) {
            (ShorthandKind::Box, 1) => SmallVec::from_iter([0, 0, 0, 0]),
            (ShorthandKind::Box, 2) => SmallVec::from_iter([0, 1, 0, 1]),
            (ShorthandKind::Box, 3) => SmallVec::from_iter([0, 1, 2, 1]),
            (ShorthandKind::Box, 4) => SmallVec::from_iter([0, 1, 2, 3]),
            (ShorthandKind::Pair, 1) => SmallVec::from_iter([0, 0]),
            (ShorthandKind::Pair, 2) => SmallVec::from_iter([0, 1]),
            _ => return None,
        };
        self.longhands
            .iter()
            .zip(picks)
            .map(|(longhand, pick)| {
                parts
                    .get(pick)
                    .map(|part| (longhand.clone(), part.clone()))
            })
            .collect()
    }
}
