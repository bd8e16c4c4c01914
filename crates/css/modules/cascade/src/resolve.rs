use std::collections::{BTreeMap, HashMap};

use css_properties::{PropertyId, PropertyRegistry};
use css_syntax::split_top_level;
use css_transitions::{
    AnimationMap, PropertyChange, TransitionMap, is_animation_property, is_transition_property,
};
use css_variables::{DEFAULT_MAX_DEPTH, VariableMap, VariableResolver};
use log::trace;

use crate::{CascadeRank, Declaration, InlineStyle, StyleRule};

/// The winning declaration for each property of one node, plus the
/// variables its rules declare.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cascaded {
    winners: HashMap<PropertyId, (Declaration, CascadeRank)>,
    variables: VariableMap,
}

impl Cascaded {
    /// Winner for a canonical property name, registered or not.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declaration(PropertyId::from_name(name))
    }

    pub fn declaration(&self, id: PropertyId) -> Option<&Declaration> {
        self.winners.get(&id).map(|(declaration, _)| declaration)
    }

    pub fn rank(&self, id: PropertyId) -> Option<CascadeRank> {
        self.winners.get(&id).map(|(_, rank)| *rank)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.winners.values().map(|(declaration, _)| declaration)
    }

    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.winners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    /// Winners keyed and ordered by property name.
    pub fn into_ordered(self) -> BTreeMap<String, Declaration> {
        self.winners
            .into_values()
            .map(|(declaration, _)| (declaration.name.clone(), declaration))
            .collect()
    }

    fn put(&mut self, declaration: &Declaration, rank: CascadeRank) {
        let key = declaration.key();
        let should_insert = self
            .winners
            .get(&key)
            .is_none_or(|(_, previous)| rank.wins_over(previous));
        if should_insert {
            self.winners.insert(key, (declaration.clone(), rank));
        }
    }
}

/// Cascade `rules` (any order) and an optional inline block into one winner
/// per property.
pub fn cascade(rules: &[&StyleRule], inline: Option<&InlineStyle>) -> Cascaded {
    let mut cascaded = Cascaded::default();
    for rule in rules {
        for declaration in rule.declarations() {
            let rank = CascadeRank::new(
                declaration.important,
                declaration.specificity,
                rule.source_order(),
            );
            cascaded.put(declaration, rank);
        }
        for variable in rule.variables() {
            cascaded.variables.declare(variable.clone());
        }
    }
    if let Some(inline_style) = inline {
        for declaration in inline_style.declarations() {
            cascaded.put(declaration, CascadeRank::inline(declaration.important));
        }
        for variable in inline_style.variables() {
            cascaded.variables.declare(variable.clone());
        }
    }
    cascaded
}

/// Inputs to [`compute_style`] besides the cascaded declarations.
#[derive(Clone, Copy, Debug)]
pub struct StyleContext<'ctx> {
    pub registry: &'ctx PropertyRegistry,
    /// Computed style of the parent node, if any.
    pub parent: Option<&'ctx ComputedStyle>,
    /// Engine-wide variables, searched last.
    pub globals: Option<&'ctx VariableMap>,
    pub max_variable_depth: usize,
}

impl<'ctx> StyleContext<'ctx> {
    pub fn new(registry: &'ctx PropertyRegistry) -> Self {
        Self {
            registry,
            parent: None,
            globals: None,
            max_variable_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: Option<&'ctx ComputedStyle>) -> Self {
        self.parent = parent;
        self
    }

    #[must_use]
    pub fn with_globals(mut self, globals: &'ctx VariableMap) -> Self {
        self.globals = Some(globals);
        self
    }
}

/// Effective values of every registered property for one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComputedStyle {
    values: HashMap<PropertyId, String>,
    variables: VariableMap,
    transitions: TransitionMap,
    animations: AnimationMap,
}

impl ComputedStyle {
    /// Value for a canonical property name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.value(PropertyId::from_name(name))
    }

    pub fn value(&self, id: PropertyId) -> Option<&str> {
        self.values.get(&id).map(String::as_str)
    }

    /// Value looked up by name or alias.
    pub fn value_of(&self, registry: &PropertyRegistry, name: &str) -> Option<&str> {
        registry
            .property(name)
            .and_then(|definition| self.value(definition.id()))
    }

    /// Items of a comma-separated value.
    pub fn indexed_values(&self, id: PropertyId) -> Vec<String> {
        self.value(id).map(|value| split_top_level(value, ',')).unwrap_or_default()
    }

    /// Variables visible at this node: inherited ones overlaid by its own.
    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    pub fn transitions(&self) -> &TransitionMap {
        &self.transitions
    }

    /// Animations requested by the `animation` properties, by keyframes name.
    pub fn animations(&self) -> &AnimationMap {
        &self.animations
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &str)> {
        self.values.iter().map(|(id, value)| (*id, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Registered properties whose value differs from `previous`, in
    /// registration order. Transition and animation properties are left out.
    pub fn changed_properties<'style>(
        &'style self,
        previous: &'style Self,
        registry: &'style PropertyRegistry,
    ) -> Vec<PropertyChange<'style>> {
        registry
            .iter()
            .filter(|definition| {
                !is_transition_property(definition.name())
                    && !is_animation_property(definition.name())
            })
            .filter_map(|definition| {
                let id = definition.id();
                let old_value = previous.value(id).unwrap_or_else(|| definition.default_value());
                let new_value = self.value(id).unwrap_or_else(|| definition.default_value());
                (old_value != new_value).then_some(PropertyChange {
                    property: definition.name(),
                    old_value,
                    new_value,
                })
            })
            .collect()
    }
}

/// Turn cascaded declarations into effective values.
///
/// Explicit values get `var()` substituted (node scope, then the inherited
/// scopes, then globals) and honor the `inherit`, `initial` and `unset`
/// keywords. Unset properties take the parent's value when they inherit and
/// their default otherwise. Names the registry does not know are not
/// computed.
pub fn compute_style(cascaded: &Cascaded, context: &StyleContext<'_>) -> ComputedStyle {
    let mut variables = context
        .parent
        .map(|parent| parent.variables.clone())
        .unwrap_or_default();
    variables.extend_from(&cascaded.variables);

    let empty = VariableMap::new();
    let resolver = VariableResolver::new(&[&variables, context.globals.unwrap_or(&empty)])
        .with_max_depth(context.max_variable_depth);

    let mut values = HashMap::with_capacity(context.registry.len());
    for definition in context.registry.iter() {
        let id = definition.id();
        let inherited_value = || {
            context
                .parent
                .and_then(|parent| parent.value(id))
                .unwrap_or_else(|| definition.default_value())
                .to_owned()
        };
        let value = match cascaded.declaration(id) {
            Some(declaration) => {
                let substituted = resolver.substitute(&declaration.value);
                match substituted.trim().to_ascii_lowercase().as_str() {
                    "inherit" => inherited_value(),
                    "initial" => definition.default_value().to_owned(),
                    "unset" if definition.is_inherited() => inherited_value(),
                    "unset" => definition.default_value().to_owned(),
                    _ => substituted.trim().to_owned(),
                }
            }
            None if definition.is_inherited() => inherited_value(),
            None => definition.default_value().to_owned(),
        };
        values.insert(id, value);
    }

    let transition_values: Vec<(&str, String)> = cascaded
        .iter()
        .filter(|declaration| is_transition_property(&declaration.name))
        .map(|declaration| (declaration.name.as_str(), resolver.substitute(&declaration.value)))
        .collect();
    let transitions = TransitionMap::from_declarations(
        transition_values
            .iter()
            .map(|(name, value)| (*name, value.as_str())),
    );
    let animation_values: Vec<(&str, String)> = cascaded
        .iter()
        .filter(|declaration| is_animation_property(&declaration.name))
        .map(|declaration| (declaration.name.as_str(), resolver.substitute(&declaration.value)))
        .collect();
    let animations = AnimationMap::from_declarations(
        animation_values
            .iter()
            .map(|(name, value)| (*name, value.as_str())),
    );
    trace!(
        target: "css::cascade",
        "computed {} values, {} variables, {} transitions, {} animations",
        values.len(),
        variables.len(),
        transitions.len(),
        animations.len()
    );

    ComputedStyle {
        values,
        variables,
        transitions,
        animations,
    }
}
