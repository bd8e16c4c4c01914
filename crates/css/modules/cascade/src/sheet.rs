use std::collections::HashMap;

use css_properties::PropertyRegistry;
use css_selectors::{MatchMode, NodeAdapter, parse_selector_list};
use css_syntax::parse_stylesheet;
use log::debug;

use crate::{KeyframesDefinition, StyleRule};

/// Bucket a rule is filed under, from its subject compound.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct IndexKey {
    tag: Option<String>,
    id: Option<String>,
}

impl IndexKey {
    fn of_rule(rule: &StyleRule) -> Self {
        let subject = rule.selector().subject();
        Self {
            tag: subject.tag().map(str::to_ascii_lowercase),
            id: subject.id().map(ToOwned::to_owned),
        }
    }
}

/// An ordered collection of style rules plus named `@keyframes` sets.
///
/// Rules are owned by value. Every insertion takes the next value of a
/// monotonic counter as its source order, and every mutation bumps
/// [`StyleSheet::version`] so caches can tell when to rescan.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
    index: HashMap<IndexKey, Vec<usize>>,
    keyframes: HashMap<String, KeyframesDefinition>,
    next_order: u64,
    version: u64,
    marker: u32,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stylesheet text. Each selector of a comma list becomes its own
    /// rule sharing the block. Unparseable pieces are skipped.
    pub fn parse(text: &str, registry: &PropertyRegistry) -> Self {
        let raw = parse_stylesheet(text);
        let mut sheet = Self::new();
        for raw_rule in raw.rules {
            let list = parse_selector_list(&raw_rule.prelude);
            if list.selectors.is_empty() {
                debug!(target: "css::cascade", "no usable selector in {:?}", raw_rule.prelude);
                continue;
            }
            for selector in list.selectors {
                let mut rule = StyleRule::new(selector);
                for declaration in &raw_rule.declarations {
                    rule.push_declaration(
                        &declaration.name,
                        &declaration.value,
                        declaration.important,
                        registry,
                    );
                }
                sheet.combine_style(rule);
            }
        }
        for raw_keyframes in &raw.keyframes {
            sheet.add_keyframes(KeyframesDefinition::from_raw(raw_keyframes, registry));
        }
        debug!(
            target: "css::cascade",
            "parsed {} rules, {} keyframe sets ({} skipped)",
            sheet.rules.len(),
            sheet.keyframes.len(),
            raw.skipped
        );
        sheet
    }

    /// Merge `rule` into an existing rule with the same selector text and
    /// marker, which keeps its source position; otherwise append it.
    pub fn add_style(&mut self, rule: StyleRule) {
        let existing = self.rules.iter().position(|candidate| {
            candidate.selector_text() == rule.selector_text() && candidate.marker() == rule.marker()
        });
        match existing {
            Some(position) => {
                if let Some(target) = self.rules.get_mut(position) {
                    target.merge_from(rule);
                    self.version = self.version.saturating_add(1);
                }
            }
            None => self.combine_style(rule),
        }
    }

    /// Append `rule` with the next source order. Rules that declare nothing
    /// are dropped.
    pub fn combine_style(&mut self, mut rule: StyleRule) {
        if rule.is_empty() {
            debug!(target: "css::cascade", "ignoring empty rule {:?}", rule.selector_text());
            return;
        }
        rule.set_source_order(self.next_order);
        self.next_order = self.next_order.saturating_add(1);
        let position = self.rules.len();
        self.index
            .entry(IndexKey::of_rule(&rule))
            .or_default()
            .push(position);
        self.rules.push(rule);
        self.version = self.version.saturating_add(1);
    }

    /// Append every rule of `other` after this sheet's rules, renumbered
    /// with this sheet's counter. Its keyframe sets replace same-named ones.
    pub fn combine_stylesheet(&mut self, other: Self) {
        let mut incoming = other.rules;
        incoming.sort_by_key(StyleRule::source_order);
        for rule in incoming {
            self.combine_style(rule);
        }
        for keyframes in other.keyframes.into_values() {
            self.add_keyframes(keyframes);
        }
    }

    /// Store a keyframe set under its name, replacing an earlier one.
    /// Sets named `none` or with no name are ignored.
    pub fn add_keyframes(&mut self, keyframes: KeyframesDefinition) {
        if keyframes.name().is_empty() || keyframes.name() == "none" {
            debug!(target: "css::cascade", "ignoring @keyframes {:?}", keyframes.name());
            return;
        }
        self.keyframes.insert(keyframes.name().to_owned(), keyframes);
        self.version = self.version.saturating_add(1);
    }

    pub fn keyframes(&self, name: &str) -> Option<&KeyframesDefinition> {
        self.keyframes.get(name)
    }

    pub fn has_keyframes(&self, name: &str) -> bool {
        self.keyframes.contains_key(name)
    }

    /// Every keyframe set, in no particular order.
    pub fn all_keyframes(&self) -> impl Iterator<Item = &KeyframesDefinition> {
        self.keyframes.values()
    }

    /// Rules matching `node`, in ascending cascade order (later wins).
    pub fn element_styles<A: NodeAdapter>(
        &self,
        adapter: &A,
        node: A::Handle,
        mode: MatchMode,
    ) -> Vec<&StyleRule> {
        let candidates = self.candidate_rules(adapter, node, mode);
        self.rules_from_candidates(&candidates)
    }

    /// Positions of rules matching `node` under `mode`, in ascending cascade
    /// order. With [`MatchMode::IgnorePseudo`] this is the set of rules the
    /// node could match in any interactive state.
    pub fn candidate_rules<A: NodeAdapter>(
        &self,
        adapter: &A,
        node: A::Handle,
        mode: MatchMode,
    ) -> Vec<usize> {
        let tag = adapter.tag_name(node).to_ascii_lowercase();
        let id = adapter.element_id(node).map(ToOwned::to_owned);
        let mut keys = vec![
            IndexKey {
                tag: Some(tag.clone()),
                id: None,
            },
            IndexKey { tag: None, id: None },
        ];
        if id.is_some() {
            keys.push(IndexKey {
                tag: Some(tag),
                id: id.clone(),
            });
            keys.push(IndexKey { tag: None, id });
        }
        let mut positions: Vec<usize> = keys
            .iter()
            .filter_map(|key| self.index.get(key))
            .flatten()
            .copied()
            .filter(|position| {
                self.rules
                    .get(*position)
                    .is_some_and(|rule| rule.selector().matches(adapter, node, mode))
            })
            .collect();
        positions.sort_by_key(|position| {
            self.rules
                .get(*position)
                .map(|rule| (rule.specificity(), rule.source_order()))
        });
        positions
    }

    /// Keep the candidates whose pseudo-class requirements hold right now.
    pub fn filter_candidates<A: NodeAdapter>(
        &self,
        adapter: &A,
        node: A::Handle,
        candidates: &[usize],
    ) -> Vec<usize> {
        candidates
            .iter()
            .copied()
            .filter(|position| {
                self.rules.get(*position).is_some_and(|rule| {
                    !rule.selector().has_pseudo_classes()
                        || rule.selector().matches(adapter, node, MatchMode::ApplyPseudo)
                })
            })
            .collect()
    }

    /// Rules at `positions`.
    pub fn rules_from_candidates(&self, positions: &[usize]) -> Vec<&StyleRule> {
        positions
            .iter()
            .filter_map(|position| self.rules.get(*position))
            .collect()
    }

    pub fn rule(&self, position: usize) -> Option<&StyleRule> {
        self.rules.get(position)
    }

    /// Rules in insertion order.
    pub fn rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    /// Rules whose normalized selector text equals `selector`.
    pub fn styles_for_selector(&self, selector: &str) -> Vec<&StyleRule> {
        let normalized = selector.split_whitespace().collect::<Vec<_>>().join(" ");
        self.rules
            .iter()
            .filter(|rule| rule.selector_text() == normalized)
            .collect()
    }

    /// Tag every rule and keyframe set currently in the sheet with `marker`.
    pub fn set_marker(&mut self, marker: u32) {
        if marker == self.marker {
            return;
        }
        self.marker = marker;
        for rule in &mut self.rules {
            rule.set_marker(marker);
        }
        for keyframes in self.keyframes.values_mut() {
            keyframes.set_marker(marker);
        }
        self.version = self.version.saturating_add(1);
    }

    /// Marker last applied with [`StyleSheet::set_marker`].
    pub fn marker(&self) -> u32 {
        self.marker
    }

    pub fn marker_exists(&self, marker: u32) -> bool {
        self.rules.iter().any(|rule| rule.marker() == marker)
            || self
                .keyframes
                .values()
                .any(|keyframes| keyframes.marker() == marker)
    }

    /// Copies of the rules and keyframe sets tagged with `marker`, as a new
    /// sheet.
    pub fn all_with_marker(&self, marker: u32) -> Self {
        let mut sheet = Self::new();
        for rule in self.rules.iter().filter(|rule| rule.marker() == marker) {
            sheet.combine_style(rule.clone());
        }
        for keyframes in self
            .keyframes
            .values()
            .filter(|keyframes| keyframes.marker() == marker)
        {
            sheet.add_keyframes(keyframes.clone());
        }
        sheet
    }

    /// Drop every rule and keyframe set tagged with `marker`. Remaining
    /// rules keep their source order.
    pub fn remove_all_with_marker(&mut self, marker: u32) {
        let rules_before = self.rules.len();
        let keyframes_before = self.keyframes.len();
        self.rules.retain(|rule| rule.marker() != marker);
        self.keyframes
            .retain(|_, keyframes| keyframes.marker() != marker);
        if self.rules.len() == rules_before && self.keyframes.len() == keyframes_before {
            return;
        }
        self.rebuild_index();
        self.version = self.version.saturating_add(1);
        debug!(
            target: "css::cascade",
            "removed {} rules and {} keyframe sets with marker {marker}",
            rules_before.saturating_sub(self.rules.len()),
            keyframes_before.saturating_sub(self.keyframes.len())
        );
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, rule) in self.rules.iter().enumerate() {
            self.index
                .entry(IndexKey::of_rule(rule))
                .or_default()
                .push(position);
        }
    }

    pub fn clear(&mut self) {
        self.rules.clear();
        self.index.clear();
        self.keyframes.clear();
        self.marker = 0;
        self.version = self.version.saturating_add(1);
    }

    /// True when the sheet has no rules. Keyframe sets alone do not count.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Bumped on every mutation.
    pub fn version(&self) -> u64 {
        self.version
    }
}
