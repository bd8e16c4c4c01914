//! Selector parsing.

use crate::{Combinator, CompoundSelector, PseudoClass, Selector, SelectorList, SimpleSelector};
use core::mem::take;
use log::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Internal tokenizer token kinds.
pub enum Tok {
    /// A combinator token like child/adjacent/general sibling.
    Combinator(Combinator),
    /// Whitespace that implies a descendant combinator.
    DescendantWS,
    /// A simple selector token.
    Simple(SimpleSelector),
    /// Input that was consumed but produced nothing usable.
    Skip,
}

/// Tokenizer over a selector string.
pub struct SelectorTokenizer<'input> {
    /// Selector bytes.
    input_bytes: &'input [u8],
    /// Current cursor index into `input_bytes`.
    index: usize,
}

/// Identifier bytes: ASCII alphanumerics, `-`, `_` and any non-ASCII byte.
const fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' || byte >= 0x80
}

impl<'input> SelectorTokenizer<'input> {
    /// Construct a tokenizer from input.
    #[inline]
    pub(crate) const fn new(input: &'input str) -> Self {
        Self {
            input_bytes: input.as_bytes(),
            index: 0,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input_bytes.get(self.index).copied()
    }

    #[inline]
    fn bump(&mut self) {
        self.index = self.index.saturating_add(1);
    }

    /// Return the next selector token, if any.
    #[inline]
    pub(crate) fn next_token(&mut self) -> Option<Tok> {
        let start = self.index;
        self.skip_spaces();
        if self.index != start {
            return self.peek().map(|_| Tok::DescendantWS);
        }
        let current = self.peek()?;
        let token = match current {
            b'*' => {
                self.bump();
                Tok::Simple(SimpleSelector::Universal)
            }
            b'.' => self.consume_prefixed(SimpleSelector::Class),
            b'#' => self.consume_prefixed(SimpleSelector::Id),
            b'[' => self.consume_attr(),
            b':' => self.consume_pseudo(),
            b'>' => {
                self.bump();
                Tok::Combinator(Combinator::Child)
            }
            b'+' => {
                self.bump();
                Tok::Combinator(Combinator::AdjacentSibling)
            }
            b'~' => {
                self.bump();
                Tok::Combinator(Combinator::GeneralSibling)
            }
            byte if is_ident_byte(byte) => {
                let ident = self.consume_ident();
                Tok::Simple(SimpleSelector::Type(ident.to_ascii_lowercase()))
            }
            other => {
                debug!(
                    target: "css::selectors",
                    "ignoring unexpected byte {:?}",
                    char::from(other)
                );
                self.bump();
                Tok::Skip
            }
        };
        Some(token)
    }

    /// Consume an identifier. Case is preserved.
    #[inline]
    fn consume_ident(&mut self) -> String {
        let start = self.index;
        while self.peek().is_some_and(is_ident_byte) {
            self.bump();
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        String::from_utf8_lossy(slice).into_owned()
    }

    /// Parse `.ident` or `#ident` after the prefix byte.
    #[inline]
    fn consume_prefixed(&mut self, build: fn(String) -> SimpleSelector) -> Tok {
        self.bump();
        let ident = self.consume_ident();
        if ident.is_empty() {
            return Tok::Skip;
        }
        Tok::Simple(build(ident))
    }

    /// Parse `:name`, `::name` or `:name(...)`. Unknown names become `Skip`.
    #[inline]
    fn consume_pseudo(&mut self) -> Tok {
        self.bump();
        if self.peek() == Some(b':') {
            self.bump();
        }
        let name = self.consume_ident();
        if self.peek() == Some(b'(') {
            self.skip_parenthesized();
            debug!(target: "css::selectors", "ignoring functional pseudo-class :{name}()");
            return Tok::Skip;
        }
        match PseudoClass::from_name(&name) {
            Some(pseudo) => Tok::Simple(SimpleSelector::PseudoClass(pseudo)),
            None => {
                debug!(target: "css::selectors", "ignoring unknown pseudo-class :{name}");
                Tok::Skip
            }
        }
    }

    /// Skip a balanced `( ... )` group starting at the cursor.
    fn skip_parenthesized(&mut self) {
        let mut depth: usize = 0;
        while let Some(byte) = self.peek() {
            self.bump();
            match byte {
                b'(' => depth = depth.saturating_add(1),
                b')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// Parse an attribute selector, supporting `[name]` and `[name=value]` (quoted or unquoted).
    #[inline]
    fn consume_attr(&mut self) -> Tok {
        self.bump();
        self.skip_spaces();
        let name = self.consume_ident().to_ascii_lowercase();
        self.skip_spaces();
        let value = if self.peek() == Some(b'=') {
            self.bump();
            self.skip_spaces();
            match self.peek() {
                Some(quote @ (b'"' | b'\'')) => {
                    self.bump();
                    Some(self.consume_quoted_attr_value(quote))
                }
                _ => Some(self.consume_unquoted_attr_value()),
            }
        } else {
            None
        };
        // Anything else before `]` (other operators, flags) is dropped.
        while let Some(byte) = self.peek() {
            self.bump();
            if byte == b']' {
                break;
            }
        }
        if name.is_empty() {
            return Tok::Skip;
        }
        Tok::Simple(match value {
            Some(value) => SimpleSelector::AttrEquals { name, value },
            None => SimpleSelector::AttrExists(name),
        })
    }

    /// Consume an unquoted attribute value until whitespace or a closing bracket.
    #[inline]
    fn consume_unquoted_attr_value(&mut self) -> String {
        let start = self.index;
        while self
            .peek()
            .is_some_and(|byte| !byte.is_ascii_whitespace() && byte != b']')
        {
            self.bump();
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        String::from_utf8_lossy(slice).into_owned()
    }

    /// Consume a quoted attribute value until the matching quote byte.
    #[inline]
    fn consume_quoted_attr_value(&mut self, quote: u8) -> String {
        let start = self.index;
        while self.peek().is_some_and(|byte| byte != quote) {
            self.bump();
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        let out = String::from_utf8_lossy(slice).into_owned();
        if self.peek().is_some() {
            self.bump();
        }
        out
    }

    /// Skip ASCII whitespace.
    #[inline]
    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.bump();
        }
    }
}

/// Parse a comma-separated selector list. Empty entries are dropped.
pub fn parse_selector_list(input: &str) -> SelectorList {
    let mut list = SelectorList::default();
    for part in input.split(',') {
        let selector = parse_selector(part);
        if selector.is_empty() {
            debug!(target: "css::selectors", "dropping empty selector {:?}", part.trim());
        } else {
            list.selectors.push(selector);
        }
    }
    list
}

/// Parse one selector chain.
///
/// Parsing is permissive: unknown pieces are skipped, a leading combinator is
/// ignored and a trailing combinator is dropped.
pub fn parse_selector(input: &str) -> Selector {
    let text = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut tokens = SelectorTokenizer::new(&text);
    let mut compounds: Vec<(Option<Combinator>, CompoundSelector)> = Vec::new();
    let mut current = CompoundSelector::default();
    let mut leading: Option<Combinator> = None;
    let mut pending: Option<Combinator> = None;

    while let Some(token) = tokens.next_token() {
        match token {
            Tok::Combinator(combinator) => {
                if !current.simples.is_empty() {
                    compounds.push((leading.take(), take(&mut current)));
                }
                pending = Some(combinator);
            }
            Tok::DescendantWS => {
                if !current.simples.is_empty() {
                    compounds.push((leading.take(), take(&mut current)));
                }
                if pending.is_none() && !compounds.is_empty() {
                    pending = Some(Combinator::Descendant);
                }
            }
            Tok::Simple(simple) => {
                if current.simples.is_empty() {
                    leading = if compounds.is_empty() {
                        None
                    } else {
                        Some(pending.unwrap_or(Combinator::Descendant))
                    };
                    pending = None;
                }
                current.simples.push(simple);
            }
            Tok::Skip => {}
        }
    }
    if !current.simples.is_empty() {
        compounds.push((leading, current));
    }

    let mut iter = compounds.into_iter();
    let first = iter.next().map(|pair| pair.1).unwrap_or_default();
    let rest = iter
        .map(|(combinator, compound)| (combinator.unwrap_or(Combinator::Descendant), compound))
        .collect();
    Selector::new(first, rest, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Explicit combinators survive surrounding whitespace.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn combinators_with_spacing() {
        for text in ["a > b", "a>b", "a >b", "a> b"] {
            let selector = parse_selector(text);
            assert_eq!(selector.rest().len(), 1, "{text}");
            assert_eq!(selector.rest()[0].0, Combinator::Child, "{text}");
        }
        let chain = parse_selector("Panel  .row ~ Button + Label");
        let combinators: Vec<Combinator> = chain.rest().iter().map(|pair| pair.0).collect();
        assert_eq!(
            combinators,
            vec![
                Combinator::Descendant,
                Combinator::GeneralSibling,
                Combinator::AdjacentSibling
            ]
        );
        assert_eq!(chain.text(), "Panel .row ~ Button + Label");
    }

    /// Garbage bytes and unknown pseudo-classes degrade instead of failing.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn degrades_on_garbage() {
        let selector = parse_selector("button$:visited:hover");
        assert_eq!(
            selector.first().simples.as_slice(),
            &[
                SimpleSelector::Type("button".to_owned()),
                SimpleSelector::PseudoClass(PseudoClass::Hover)
            ]
        );
        assert!(parse_selector("> a").rest().is_empty());
        assert!(parse_selector("a >").rest().is_empty());
        assert!(parse_selector("   ").is_empty());
    }
}
