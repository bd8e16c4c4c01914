//! Style variables (`--name: value`) and `var()` substitution.
//!
//! Variables live in scopes. A node's scope holds what its matched rules and
//! inline style declare, merged over the scopes inherited from ancestors;
//! the engine adds a global scope underneath. Lookups walk the scopes in
//! order and take the first hit.

#![forbid(unsafe_code)]

use std::collections::HashMap;

use css_selectors::Specificity;
use css_syntax::{name_hash, parse_function};
use log::debug;

/// Default bound on nested `var()` expansion.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// A declared variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    /// Name including the leading `--`.
    pub name: String,
    /// djb2 hash of `name`.
    pub name_hash: u32,
    /// Raw value text, unresolved.
    pub value: String,
    /// Specificity of the declaring rule.
    pub specificity: Specificity,
    /// Insertion order of the declaring rule.
    pub source_order: u64,
}

impl Variable {
    pub fn new(name: &str, value: &str, specificity: Specificity) -> Self {
        Self {
            name: name.to_owned(),
            name_hash: name_hash(name),
            value: value.to_owned(),
            specificity,
            source_order: 0,
        }
    }

    /// True if `self` should replace `other` in a scope. Ties go to the
    /// later declaration.
    fn outranks(&self, other: &Self) -> bool {
        (self.specificity, self.source_order) >= (other.specificity, other.source_order)
    }
}

/// One variable scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableMap {
    variables: HashMap<String, Variable>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `variable` unless a higher-ranked one with the same name is
    /// already present. Returns whether it was stored.
    pub fn declare(&mut self, variable: Variable) -> bool {
        match self.variables.get(&variable.name) {
            Some(existing) if !variable.outranks(existing) => false,
            _ => {
                self.variables.insert(variable.name.clone(), variable);
                true
            }
        }
    }

    /// Insert or replace unconditionally.
    pub fn set(&mut self, variable: Variable) {
        self.variables.insert(variable.name.clone(), variable);
    }

    /// Overlay every variable of `other` on top of this scope.
    pub fn extend_from(&mut self, other: &Self) {
        for variable in other.variables.values() {
            self.set(variable.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        self.variables.remove(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }
}

/// Why a `var()` reference produced nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Failure {
    Cycle,
    TooDeep,
}

/// Resolves `var()` references against an ordered list of scopes.
#[derive(Clone, Debug)]
pub struct VariableResolver<'scopes> {
    scopes: Vec<&'scopes VariableMap>,
    max_depth: usize,
}

impl<'scopes> VariableResolver<'scopes> {
    /// Scopes are searched front to back.
    pub fn new(scopes: &[&'scopes VariableMap]) -> Self {
        Self {
            scopes: scopes.to_vec(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Nearest declaration of `name`.
    pub fn lookup(&self, name: &str) -> Option<&'scopes Variable> {
        self.scopes.iter().find_map(|scope| scope.get(name))
    }

    /// Replace every `var(--name[, fallback])` in `value`.
    ///
    /// Unknown variables use their fallback or become empty. A reference
    /// cycle, or nesting beyond the depth bound, empties the whole value.
    /// Text inside quoted strings is left alone.
    pub fn substitute(&self, value: &str) -> String {
        if !value.contains("var(") {
            return value.to_owned();
        }
        let mut stack: Vec<String> = Vec::new();
        match self.substitute_inner(value, &mut stack) {
            Ok(resolved) => resolved,
            Err(failure) => {
                debug!(target: "css::variables", "{failure:?} while resolving {value:?}");
                String::new()
            }
        }
    }

    fn substitute_inner(&self, value: &str, stack: &mut Vec<String>) -> Result<String, Failure> {
        if stack.len() > self.max_depth {
            return Err(Failure::TooDeep);
        }
        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(offset) = find_reference(rest) {
            let (head, tail) = rest.split_at(offset);
            out.push_str(head);
            let Some(length) = call_length(tail) else {
                // Unbalanced: keep the remainder verbatim.
                out.push_str(tail);
                return Ok(out);
            };
            let (call, after) = tail.split_at(length);
            out.push_str(&self.resolve_reference(call, stack)?);
            rest = after;
        }
        out.push_str(rest);
        Ok(out)
    }

    fn resolve_reference(&self, call: &str, stack: &mut Vec<String>) -> Result<String, Failure> {
        let Some(function) = parse_function(call) else {
            return Ok(String::new());
        };
        let name = function.arg(0).unwrap_or_default().trim().to_owned();
        if stack.contains(&name) {
            return Err(Failure::Cycle);
        }
        if let Some(variable) = self.lookup(&name) {
            stack.push(name);
            let expanded = self.substitute_inner(&variable.value, stack);
            stack.pop();
            return expanded;
        }
        let fallback: Vec<&str> = function
            .args
            .iter()
            .skip(1)
            .map(|arg| arg.text.as_str())
            .collect();
        if fallback.is_empty() {
            debug!(target: "css::variables", "unresolved variable {name}");
            return Ok(String::new());
        }
        self.substitute_inner(&fallback.join(", "), stack)
    }
}

/// Byte offset of the next `var(` outside quoted strings that starts a token.
fn find_reference(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut quote: Option<u8> = None;
    let mut index = 0;
    while let Some(&byte) = bytes.get(index) {
        match quote {
            Some(_) if byte == b'\\' => index = index.saturating_add(1),
            Some(open) if byte == open => quote = None,
            Some(_) => {}
            None if byte == b'"' || byte == b'\'' => quote = Some(byte),
            None => {
                let boundary = index == 0
                    || bytes.get(index.saturating_sub(1)).is_some_and(|previous| {
                        !(previous.is_ascii_alphanumeric()
                            || *previous == b'-'
                            || *previous == b'_')
                    });
                if boundary
                    && bytes
                        .get(index..index.saturating_add(4))
                        .is_some_and(|window| window.eq_ignore_ascii_case(b"var("))
                {
                    return Some(index);
                }
            }
        }
        index = index.saturating_add(1);
    }
    None
}

/// Length of the balanced call starting at the beginning of `text`.
fn call_length(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth: usize = 0;
    let mut quote: Option<u8> = None;
    let mut index = 0;
    while let Some(&byte) = bytes.get(index) {
        match quote {
            Some(_) if byte == b'\\' => index = index.saturating_add(1),
            Some(open) if byte == open => quote = None,
            Some(_) => {}
            None => match byte {
                b'"' | b'\'' => quote = Some(byte),
                b'(' => depth = depth.saturating_add(1),
                b')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(index.saturating_add(1));
                    }
                }
                _ => {}
            },
        }
        index = index.saturating_add(1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(entries: &[(&str, &str)]) -> VariableMap {
        let mut map = VariableMap::new();
        for &(name, value) in entries {
            map.set(Variable::new(name, value, Specificity::default()));
        }
        map
    }

    /// Offsets skip quoted text and identifiers ending in `var`.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn reference_scanning() {
        assert_eq!(find_reference("1px var(--a)"), Some(4));
        assert_eq!(find_reference("\"var(--a)\" x"), None);
        assert_eq!(find_reference("myvar(--a)"), None);
        assert_eq!(call_length("var(--a, f(1)) tail"), Some(14));
        assert_eq!(call_length("var(--a"), None);
    }

    /// Higher-ranked declarations are kept; ties go to the later one.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn declare_ranking() {
        let mut map = VariableMap::new();
        let mut strong = Variable::new("--a", "strong", Specificity(1, 0, 0));
        strong.source_order = 1;
        assert!(map.declare(strong));
        let mut weak = Variable::new("--a", "weak", Specificity(0, 1, 0));
        weak.source_order = 2;
        assert!(!map.declare(weak));
        let mut later = Variable::new("--a", "later", Specificity(1, 0, 0));
        later.source_order = 3;
        assert!(map.declare(later));
        assert_eq!(map.get("--a").map(|variable| variable.value.as_str()), Some("later"));
    }

    /// Depth beyond the bound empties the value.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn depth_bound() {
        let chain = scope(&[("--a", "var(--b)"), ("--b", "var(--c)"), ("--c", "deep")]);
        let resolver = VariableResolver::new(&[&chain]);
        assert_eq!(resolver.substitute("var(--a)"), "deep");
        let shallow = VariableResolver::new(&[&chain]).with_max_depth(1);
        assert_eq!(shallow.substitute("var(--a)"), "");
    }
}
