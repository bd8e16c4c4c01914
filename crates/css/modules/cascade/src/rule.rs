use css_properties::{PropertyId, PropertyRegistry};
use css_selectors::{Selector, Specificity, parse_selector};
use css_syntax::parse_declaration_list;
use css_variables::Variable;
use log::debug;

/// A declaration as stored on a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Canonical property name (aliases resolved).
    pub name: String,
    /// Set when the name is a registered property.
    pub property_id: Option<PropertyId>,
    /// Raw value; `var()` references are resolved at compute time.
    pub value: String,
    /// Specificity of the declaring rule, frozen at insertion.
    pub specificity: Specificity,
    pub important: bool,
}

impl Declaration {
    /// Cascade key: the registered id, or the name hash for unknown names.
    pub fn key(&self) -> PropertyId {
        self.property_id
            .unwrap_or_else(|| PropertyId::from_name(&self.name))
    }
}

/// Declarations and variables of one block, last write wins per name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclarationBlock {
    declarations: Vec<Declaration>,
    variables: Vec<Variable>,
}

impl DeclarationBlock {
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|declaration| declaration.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.variables.is_empty()
    }

    /// Insert or replace by name.
    pub fn set_declaration(&mut self, declaration: Declaration) {
        if let Some(existing) = self
            .declarations
            .iter_mut()
            .find(|existing| existing.name == declaration.name)
        {
            *existing = declaration;
        } else {
            self.declarations.push(declaration);
        }
    }

    /// Insert or replace by name.
    pub fn set_variable(&mut self, variable: Variable) {
        if let Some(existing) = self
            .variables
            .iter_mut()
            .find(|existing| existing.name == variable.name)
        {
            *existing = variable;
        } else {
            self.variables.push(variable);
        }
    }

    /// Normalize one `name: value` pair and store it.
    ///
    /// `--name` becomes a variable. Other names are lowercased, aliases are
    /// resolved and shorthands expanded into their longhands. Names the
    /// registry does not know are stored without an id.
    pub fn push(
        &mut self,
        name: &str,
        value: &str,
        important: bool,
        specificity: Specificity,
        registry: &PropertyRegistry,
    ) {
        let trimmed = name.trim();
        if trimmed.starts_with("--") {
            self.set_variable(Variable::new(trimmed, value.trim(), specificity));
            return;
        }
        let lowered = trimmed.to_ascii_lowercase();
        let canonical = registry.canonical_name(&lowered);
        if let Some(longhands) = registry.expand_shorthand(canonical, value) {
            for (longhand, piece) in longhands {
                self.push(&longhand, &piece, important, specificity, registry);
            }
            return;
        }
        let property_id = registry.property(canonical).map(|definition| definition.id());
        if property_id.is_none() && registry.shorthand(canonical).is_none() {
            debug!(target: "css::cascade", "unknown property {canonical:?} kept uncomputed");
        }
        self.set_declaration(Declaration {
            name: canonical.to_owned(),
            property_id,
            value: value.trim().to_owned(),
            specificity,
            important,
        });
    }

    /// Overlay `other` onto this block.
    pub fn merge_from(&mut self, other: Self) {
        for declaration in other.declarations {
            self.set_declaration(declaration);
        }
        for variable in other.variables {
            self.set_variable(variable);
        }
    }

    fn set_specificity(&mut self, specificity: Specificity) {
        for declaration in &mut self.declarations {
            declaration.specificity = specificity;
        }
        for variable in &mut self.variables {
            variable.specificity = specificity;
        }
    }

    fn set_source_order(&mut self, source_order: u64) {
        for variable in &mut self.variables {
            variable.source_order = source_order;
        }
    }
}

/// A selector with its declaration block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    selector: Selector,
    block: DeclarationBlock,
    source_order: u64,
    marker: u32,
}

impl StyleRule {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            block: DeclarationBlock::default(),
            source_order: 0,
            marker: 0,
        }
    }

    /// A rule for a single selector given as text.
    pub fn from_selector_text(selector: &str) -> Self {
        Self::new(parse_selector(selector))
    }

    /// Convenience constructor: selector text plus a declaration list such
    /// as `color: red; margin: 2dp !important`.
    pub fn parse(selector: &str, declarations: &str, registry: &PropertyRegistry) -> Self {
        let mut rule = Self::from_selector_text(selector);
        for declaration in parse_declaration_list(declarations) {
            rule.push_declaration(
                &declaration.name,
                &declaration.value,
                declaration.important,
                registry,
            );
        }
        rule
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Normalized selector text, the identity used by merging.
    pub fn selector_text(&self) -> &str {
        self.selector.text()
    }

    pub fn specificity(&self) -> Specificity {
        self.selector.specificity()
    }

    pub fn declarations(&self) -> &[Declaration] {
        self.block.declarations()
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.block.declaration(name)
    }

    pub fn variables(&self) -> &[Variable] {
        self.block.variables()
    }

    /// Insertion order assigned by the owning stylesheet.
    pub fn source_order(&self) -> u64 {
        self.source_order
    }

    pub fn marker(&self) -> u32 {
        self.marker
    }

    pub fn set_marker(&mut self, marker: u32) {
        self.marker = marker;
    }

    /// True when the rule declares nothing.
    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    /// Add a declaration with this rule's specificity.
    pub fn push_declaration(
        &mut self,
        name: &str,
        value: &str,
        important: bool,
        registry: &PropertyRegistry,
    ) {
        let specificity = self.specificity();
        self.block.push(name, value, important, specificity, registry);
    }

    /// Merge another rule's declarations into this one. Later wins.
    pub fn merge_from(&mut self, other: Self) {
        let mut block = other.block;
        block.set_specificity(self.specificity());
        block.set_source_order(self.source_order);
        self.block.merge_from(block);
    }

    pub(crate) fn set_source_order(&mut self, source_order: u64) {
        self.source_order = source_order;
        self.block.set_source_order(source_order);
    }
}

/// Inline declarations attached directly to a node.
///
/// They use [`Specificity::INLINE`] and rank after every stylesheet rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
    block: DeclarationBlock,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration list (`color: red; --accent: blue`).
    pub fn parse(text: &str, registry: &PropertyRegistry) -> Self {
        let mut inline = Self::new();
        for declaration in parse_declaration_list(text) {
            inline.push_declaration(
                &declaration.name,
                &declaration.value,
                declaration.important,
                registry,
            );
        }
        inline
    }

    pub fn push_declaration(
        &mut self,
        name: &str,
        value: &str,
        important: bool,
        registry: &PropertyRegistry,
    ) {
        self.block
            .push(name, value, important, Specificity::INLINE, registry);
        self.block.set_source_order(u64::MAX);
    }

    pub fn declarations(&self) -> &[Declaration] {
        self.block.declarations()
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.block.declaration(name)
    }

    pub fn variables(&self) -> &[Variable] {
        self.block.variables()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_properties::ShorthandKind;

    fn registry() -> PropertyRegistry {
        let mut registry = PropertyRegistry::new();
        registry.register_property("color", "#000000", true);
        registry.register_property("margin-top", "0", false);
        registry.register_property("margin-bottom", "0", false);
        registry.add_alias("color", "colour");
        registry.register_shorthand(
            "margin-y",
            &["margin-top", "margin-bottom"],
            ShorthandKind::Pair,
        );
        registry
    }

    /// Aliases resolve, shorthands expand and `--` names become variables.
    ///
    /// # Errors
    /// Returns an error if a declaration is missing.
    #[test]
    fn normalizes_declarations() -> Result<(), Box<dyn core::error::Error>> {
        let registry = registry();
        let rule = StyleRule::parse(
            "#a.b",
            "COLOUR: red; margin-y: 1dp 2dp; --Accent: blue; frobnicate: 3",
            &registry,
        );
        let color = rule.declaration("color").ok_or("color")?;
        assert_eq!(color.value, "red");
        assert_eq!(color.specificity, Specificity(1, 1, 0));
        assert!(color.property_id.is_some());
        assert_eq!(rule.declaration("margin-bottom").ok_or("margin-bottom")?.value, "2dp");
        assert!(rule.declaration("frobnicate").ok_or("frobnicate")?.property_id.is_none());
        assert_eq!(
            rule.variables().first().map(|variable| variable.name.as_str()),
            Some("--Accent")
        );
        Ok(())
    }

    /// A later declaration of the same name replaces the earlier one in place.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn last_write_wins() {
        let registry = registry();
        let rule = StyleRule::parse("x", "color: red; margin-top: 1; color: blue", &registry);
        let names: Vec<&str> = rule.declarations().iter().map(|decl| decl.name.as_str()).collect();
        assert_eq!(names, ["color", "margin-top"]);
        assert_eq!(rule.declaration("color").map(|decl| decl.value.as_str()), Some("blue"));
    }
}
