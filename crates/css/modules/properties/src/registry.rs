use std::collections::HashMap;

use log::{debug, warn};
use smallvec::SmallVec;

use crate::{PropertyDefinition, PropertyId, ShorthandDefinition, ShorthandKind};

/// All known properties, aliases and shorthands.
#[derive(Clone, Debug, Default)]
pub struct PropertyRegistry {
    /// Definitions in registration order.
    definitions: Vec<PropertyDefinition>,
    by_id: HashMap<PropertyId, usize>,
    /// Alias name to canonical property id.
    aliases: HashMap<String, PropertyId>,
    shorthands: HashMap<PropertyId, ShorthandDefinition>,
}

impl PropertyRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a property. Registering a known name again keeps the first
    /// definition and logs a warning.
    pub fn register_property(
        &mut self,
        name: &str,
        default_value: &str,
        inherited: bool,
    ) -> &PropertyDefinition {
        let index = self.register(name, default_value, inherited);
        &self.definitions[index]
    }

    /// Register a property whose values form a comma-separated list.
    pub fn register_indexed_property(
        &mut self,
        name: &str,
        default_value: &str,
        inherited: bool,
    ) -> &PropertyDefinition {
        let index = self.register(name, default_value, inherited);
        self.definitions[index].indexed = true;
        &self.definitions[index]
    }

    fn register(&mut self, name: &str, default_value: &str, inherited: bool) -> usize {
        let canonical = name.trim().to_ascii_lowercase();
        let id = PropertyId::from_name(&canonical);
        if let Some(existing) = self.definition_index(id) {
            let kept = self.definitions[existing].name();
            if kept == canonical {
                warn!(target: "css::properties", "property {canonical:?} already registered");
            } else {
                warn!(
                    target: "css::properties",
                    "property {canonical:?} collides with {kept:?}; keeping the first"
                );
            }
            return existing;
        }
        let index = self.definitions.len();
        self.definitions
            .push(PropertyDefinition::new(&canonical, default_value, inherited));
        self.by_id.insert(id, index);
        index
    }

    /// Mark a registered property as indexed (or not).
    pub fn set_indexed(&mut self, id: PropertyId, indexed: bool) -> bool {
        match self.definition_index(id) {
            Some(index) => {
                self.definitions[index].indexed = indexed;
                true
            }
            None => false,
        }
    }

    /// Make `alias` resolve to the registered property `name`.
    /// Returns `false` if `name` is unknown.
    pub fn add_alias(&mut self, name: &str, alias: &str) -> bool {
        let canonical = self.canonical_name(name).to_owned();
        let id = PropertyId::from_name(&canonical);
        let Some(index) = self.definition_index(id) else {
            debug!(target: "css::properties", "alias {alias:?} targets unknown property {name:?}");
            return false;
        };
        let alias_name = alias.trim().to_ascii_lowercase();
        self.definitions[index].aliases.push(alias_name.clone());
        self.aliases.insert(alias_name, id);
        true
    }

    /// Register a shorthand expanding into `longhands`, which must already
    /// be registered. Returns `false` otherwise.
    pub fn register_shorthand(
        &mut self,
        name: &str,
        longhands: &[&str],
        kind: ShorthandKind,
    ) -> bool {
        let wanted = match kind {
            ShorthandKind::Box => 4,
            ShorthandKind::Pair => 2,
        };
        if longhands.len() != wanted {
            warn!(
                target: "css::properties",
                "shorthand {name:?} needs {wanted} longhands, got {}",
                longhands.len()
            );
            return false;
        }
        if let Some(missing) = longhands.iter().find(|longhand| !self.contains(longhand)) {
            warn!(
                target: "css::properties",
                "shorthand {name:?} names unknown longhand {missing:?}"
            );
            return false;
        }
        let canonical = name.trim().to_ascii_lowercase();
        let id = PropertyId::from_name(&canonical);
        let definition = ShorthandDefinition {
            id,
            name: canonical,
            longhands: longhands
                .iter()
                .map(|longhand| self.canonical_name(longhand).to_owned())
                .collect::<SmallVec<String, 4>>(),
            kind,
        };
        self.shorthands.insert(id, definition);
        true
    }

    fn definition_index(&self, id: PropertyId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Resolve an alias to its property name. Unknown names pass through.
    pub fn canonical_name<'name>(&'name self, name: &'name str) -> &'name str {
        if self.by_id.contains_key(&PropertyId::from_name(name)) {
            return name;
        }
        self.aliases
            .get(name)
            .and_then(|id| self.property_by_id(*id))
            .map_or(name, PropertyDefinition::name)
    }

    /// Look up a property by name or alias.
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        let direct = self.property_by_id(PropertyId::from_name(name));
        if let Some(definition) = direct
            && definition.name() == name
        {
            return Some(definition);
        }
        self.aliases
            .get(name)
            .and_then(|id| self.property_by_id(*id))
    }

    pub fn property_by_id(&self, id: PropertyId) -> Option<&PropertyDefinition> {
        self.definition_index(id)
            .and_then(|index| self.definitions.get(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    pub fn shorthand(&self, name: &str) -> Option<&ShorthandDefinition> {
        self.shorthands.get(&PropertyId::from_name(name))
    }

    /// Expand a shorthand declaration into longhand `(name, value)` pairs.
    /// Returns `None` if `name` is not a shorthand or the value does not fit.
    pub fn expand_shorthand(
        &self,
        name: &str,
        value: &str,
    ) -> Option<SmallVec<(String, String), 4>> {
        let shorthand = self.shorthand(name)?;
        let expanded = shorthand.expand(value);
        if expanded.is_none() {
            debug!(target: "css::properties", "cannot expand {name}: {value:?}");
        }
        expanded
    }

    /// Registered definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
