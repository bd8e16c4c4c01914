use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use css_cascade::{
    ComputedStyle, Declaration, InlineStyle, KeyframesDefinition, StyleContext, StyleRule,
    StyleSheet, cascade, compute_style,
};
use css_properties::PropertyRegistry;
use css_selectors::{MatchMode, NodeAdapter, Specificity};
use css_transitions::{AnimationDefinition, TransitionRequest, collect_transition_requests};
use css_variables::{Variable, VariableMap};
use log::{debug, trace};

use crate::StyleEngineConfig;
use crate::cache::{CacheEntry, CacheState, SheetStamp};

/// Inline declarations of one node and the version they were set at.
#[derive(Clone, Debug)]
struct InlineEntry {
    style: InlineStyle,
    version: u64,
}

/// What a stale cache entry needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Refresh {
    Rescan,
    Refilter,
}

/// An animation of a node together with the keyframes it names.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationBinding<'engine> {
    pub definition: &'engine AnimationDefinition,
    pub keyframes: &'engine KeyframesDefinition,
}

/// Owns the active stylesheet and computes styles per node on demand.
///
/// Nodes are identified by [`NodeAdapter::unique_key`]. Results are cached
/// and reused until the stylesheet, the node's inline style, the global
/// variables or the node's ancestors change, or the host reports a change
/// through [`StyleEngine::invalidate`] or
/// [`StyleEngine::pseudo_state_changed`].
///
/// Changes that affect sibling selectors (`+`, `~`, `:first-child` ...) are
/// not tracked; invalidate the affected siblings explicitly.
pub struct StyleEngine {
    registry: Arc<PropertyRegistry>,
    config: StyleEngineConfig,
    sheet: StyleSheet,
    /// Bumped by `replace_stylesheet` so a new sheet never aliases an old
    /// version number.
    sheet_epoch: u64,
    globals: VariableMap,
    globals_version: u64,
    inline: HashMap<u64, InlineEntry>,
    inline_counter: u64,
    cache: HashMap<u64, CacheEntry>,
    generation_counter: u64,
}

impl StyleEngine {
    pub fn new(registry: Arc<PropertyRegistry>) -> Self {
        Self::with_config(registry, StyleEngineConfig::default())
    }

    pub fn with_config(registry: Arc<PropertyRegistry>, config: StyleEngineConfig) -> Self {
        Self {
            registry,
            config,
            sheet: StyleSheet::new(),
            sheet_epoch: 0,
            globals: VariableMap::new(),
            globals_version: 0,
            inline: HashMap::new(),
            inline_counter: 0,
            cache: HashMap::new(),
            generation_counter: 0,
        }
    }

    #[inline]
    pub fn registry(&self) -> &Arc<PropertyRegistry> {
        &self.registry
    }

    #[inline]
    pub fn config(&self) -> StyleEngineConfig {
        self.config
    }

    #[inline]
    pub fn stylesheet(&self) -> &StyleSheet {
        &self.sheet
    }

    /// Swap in a new stylesheet. Every cached style is recomputed on its
    /// next query.
    pub fn replace_stylesheet(&mut self, sheet: StyleSheet) {
        debug!(target: "css::engine", "replacing stylesheet ({} rules)", sheet.len());
        self.sheet = sheet;
        self.sheet_epoch = self.sheet_epoch.saturating_add(1);
    }

    /// Append another stylesheet's rules after the active ones.
    pub fn combine_stylesheet(&mut self, other: StyleSheet) {
        debug!(target: "css::engine", "combining stylesheet ({} rules)", other.len());
        self.sheet.combine_stylesheet(other);
    }

    /// Mutable access to the active stylesheet. Mutations bump its version,
    /// which invalidates cached styles.
    pub fn stylesheet_mut(&mut self) -> &mut StyleSheet {
        &mut self.sheet
    }

    /// Set a node's inline declarations from text, replacing previous ones.
    pub fn set_inline_style(&mut self, node_key: u64, text: &str) {
        let style = InlineStyle::parse(text, &self.registry);
        self.set_inline(node_key, style);
    }

    pub fn set_inline(&mut self, node_key: u64, style: InlineStyle) {
        self.inline_counter = self.inline_counter.saturating_add(1);
        self.inline.insert(
            node_key,
            InlineEntry {
                style,
                version: self.inline_counter,
            },
        );
    }

    pub fn clear_inline_style(&mut self, node_key: u64) {
        if self.inline.remove(&node_key).is_some() {
            self.inline_counter = self.inline_counter.saturating_add(1);
        }
    }

    pub fn inline_style(&self, node_key: u64) -> Option<&InlineStyle> {
        self.inline.get(&node_key).map(|entry| &entry.style)
    }

    /// Define a variable visible to every node, below all node scopes.
    pub fn set_global_variable(&mut self, name: &str, value: &str) {
        self.globals
            .set(Variable::new(name, value, Specificity::default()));
        self.globals_version = self.globals_version.saturating_add(1);
    }

    pub fn remove_global_variable(&mut self, name: &str) -> bool {
        let removed = self.globals.remove(name).is_some();
        if removed {
            self.globals_version = self.globals_version.saturating_add(1);
        }
        removed
    }

    pub fn global_variables(&self) -> &VariableMap {
        &self.globals
    }

    /// The node's tree position, id, classes or attributes changed.
    pub fn invalidate(&mut self, node_key: u64) {
        if let Some(entry) = self.cache.get_mut(&node_key) {
            entry.state = CacheState::Dirty;
        }
    }

    /// Rescan every node on its next query. Cached styles are kept so
    /// [`StyleEngine::restyle`] can still diff against them.
    pub fn invalidate_all(&mut self) {
        for entry in self.cache.values_mut() {
            entry.state = CacheState::Dirty;
        }
    }

    /// The node's interactive state (hover, focus ...) changed.
    pub fn pseudo_state_changed(&mut self, node_key: u64) {
        if let Some(entry) = self.cache.get_mut(&node_key)
            && entry.state == CacheState::Fresh
        {
            entry.state = CacheState::PseudoDirty;
        }
    }

    /// Drop everything held for a node that left the tree.
    pub fn forget(&mut self, node_key: u64) {
        self.cache.remove(&node_key);
        self.inline.remove(&node_key);
    }

    /// Up-to-date computed style of `node`.
    ///
    /// Refreshing here does not consume pending transitions: the next
    /// [`StyleEngine::restyle`] of the node still reports them.
    pub fn computed_style<A: NodeAdapter>(
        &mut self,
        adapter: &A,
        node: A::Handle,
    ) -> Option<&ComputedStyle> {
        let key = self.ensure(adapter, node);
        self.cached_style(key)
    }

    /// Last computed style of a node, without refreshing it.
    pub fn cached_style(&self, node_key: u64) -> Option<&ComputedStyle> {
        self.cache.get(&node_key).map(|entry| &entry.style)
    }

    /// Bring `node` up to date and report which property changes should
    /// animate since the node's previous `restyle`. Changes picked up by
    /// other queries in between (its own `computed_style`, or a descendant
    /// refreshing its ancestors) are included. A node's first computation
    /// reports nothing.
    pub fn restyle<A: NodeAdapter>(
        &mut self,
        adapter: &A,
        node: A::Handle,
    ) -> Vec<TransitionRequest> {
        let key = self.ensure(adapter, node);
        let Some(entry) = self.cache.get_mut(&key) else {
            return Vec::new();
        };
        if entry.style == entry.reported {
            return Vec::new();
        }
        let requests = if self.config.transitions_enabled {
            let changes = entry
                .style
                .changed_properties(&entry.reported, &self.registry);
            collect_transition_requests(changes, entry.style.transitions())
        } else {
            Vec::new()
        };
        entry.reported = entry.style.clone();
        if !requests.is_empty() {
            debug!(target: "css::engine", "node {key}: {} transition requests", requests.len());
        }
        requests
    }

    /// Animations of `node` whose keyframes exist in the active stylesheet,
    /// in declaration order. Names without keyframes are left out.
    pub fn animations<A: NodeAdapter>(
        &mut self,
        adapter: &A,
        node: A::Handle,
    ) -> Vec<AnimationBinding<'_>> {
        let key = self.ensure(adapter, node);
        let Some(entry) = self.cache.get(&key) else {
            return Vec::new();
        };
        entry
            .style
            .animations()
            .iter()
            .filter_map(|definition| {
                let keyframes = self.sheet.keyframes(&definition.name);
                if keyframes.is_none() {
                    debug!(target: "css::engine", "no @keyframes {:?}", definition.name);
                }
                keyframes.map(|found| AnimationBinding {
                    definition,
                    keyframes: found,
                })
            })
            .collect()
    }

    /// Rules of the active stylesheet matching `node`, in cascade order.
    pub fn matched_rules<A: NodeAdapter>(
        &self,
        adapter: &A,
        node: A::Handle,
        apply_pseudo: bool,
    ) -> Vec<&StyleRule> {
        let mode = if apply_pseudo {
            MatchMode::ApplyPseudo
        } else {
            MatchMode::IgnorePseudo
        };
        self.sheet.element_styles(adapter, node, mode)
    }

    /// Winning declaration per property name, inline style included.
    pub fn cascaded_declarations<A: NodeAdapter>(
        &self,
        adapter: &A,
        node: A::Handle,
    ) -> BTreeMap<String, Declaration> {
        let rules = self.matched_rules(adapter, node, true);
        let inline = self
            .inline
            .get(&adapter.unique_key(node))
            .map(|entry| &entry.style);
        cascade(&rules, inline).into_ordered()
    }

    fn sheet_stamp(&self) -> SheetStamp {
        SheetStamp {
            epoch: self.sheet_epoch,
            version: self.sheet.version(),
        }
    }

    /// Make the cache entry of `node` current, ancestors first. Returns the
    /// node key.
    fn ensure<A: NodeAdapter>(&mut self, adapter: &A, node: A::Handle) -> u64 {
        let key = adapter.unique_key(node);
        let parent = adapter
            .parent(node)
            .map(|parent_node| self.ensure(adapter, parent_node));
        let (parent_generation, parent_match_generation) = parent
            .and_then(|parent_key| self.cache.get(&parent_key))
            .map_or((0, 0), |entry| (entry.generation, entry.match_generation));
        let stamp = self.sheet_stamp();
        let inline_version = self.inline.get(&key).map_or(0, |entry| entry.version);

        let refresh = match self.cache.get(&key) {
            None => Refresh::Rescan,
            Some(entry)
                if entry.state == CacheState::Dirty
                    || entry.sheet != stamp
                    || entry.parent_key != parent
                    || entry.parent_match_generation != parent_match_generation =>
            {
                Refresh::Rescan
            }
            Some(entry)
                if entry.state == CacheState::PseudoDirty
                    || entry.globals_version != self.globals_version
                    || entry.inline_version != inline_version
                    || entry.parent_generation != parent_generation =>
            {
                Refresh::Refilter
            }
            Some(_) => return key,
        };

        let reusable = match (refresh, self.cache.get(&key)) {
            (Refresh::Refilter, Some(entry)) => {
                Some((entry.candidates.clone(), entry.match_generation))
            }
            _ => None,
        };
        let (candidates, match_generation) = reusable.unwrap_or_else(|| {
            let scanned = self
                .sheet
                .candidate_rules(adapter, node, MatchMode::IgnorePseudo);
            (scanned, self.next_generation())
        });
        trace!(
            target: "css::engine",
            "node {key}: {refresh:?} over {} candidates",
            candidates.len()
        );

        let positions = self.sheet.filter_candidates(adapter, node, &candidates);
        let rules = self.sheet.rules_from_candidates(&positions);
        let inline = self.inline.get(&key).map(|entry| &entry.style);
        let cascaded = cascade(&rules, inline);
        let parent_style = parent
            .and_then(|parent_key| self.cache.get(&parent_key))
            .map(|entry| &entry.style);
        let context = StyleContext {
            registry: &self.registry,
            parent: parent_style,
            globals: Some(&self.globals),
            max_variable_depth: self.config.max_variable_depth,
        };
        let style = compute_style(&cascaded, &context);
        let reported = self
            .cache
            .remove(&key)
            .map_or_else(|| style.clone(), |previous| previous.reported);

        let generation = self.next_generation();
        let entry = CacheEntry {
            style,
            reported,
            candidates,
            sheet: stamp,
            globals_version: self.globals_version,
            inline_version,
            parent_key: parent,
            parent_generation,
            parent_match_generation,
            generation,
            match_generation,
            state: CacheState::Fresh,
        };
        self.cache.insert(key, entry);
        key
    }

    fn next_generation(&mut self) -> u64 {
        self.generation_counter = self.generation_counter.saturating_add(1);
        self.generation_counter
    }
}
