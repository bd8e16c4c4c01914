//! Stylesheet text to raw rules and declarations.
//!
//! This crate knows nothing about selectors or property semantics. It turns
//! stylesheet text into `selector-prelude { name: value [!important]; ... }`
//! items, collects `@keyframes` blocks, and offers small value helpers
//! (top-level splitting, function-call parsing, name hashing) shared by the
//! other style crates.
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;
use log::debug;

mod values;

pub use values::{
    FunctionArg, FunctionCall, name_hash, parse_function, split_top_level,
    split_top_level_whitespace, strip_comments, unquote,
};

/// A single declaration (`name: value [!important]`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name. Lowercased unless it is a `--custom` variable name.
    pub name: String,
    /// Raw value text without the trailing `!important`.
    pub value: String,
    /// Whether the declaration carried `!important`.
    pub important: bool,
}

/// A rule with its raw prelude (the selector list) and declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRule {
    /// Prelude text with comments removed.
    pub prelude: String,
    /// Declarations in block order.
    pub declarations: Vec<Declaration>,
}

/// An `@keyframes name { ... }` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawKeyframes {
    /// Animation name as written.
    pub name: String,
    /// Keyframe blocks in source order. The prelude is the offset list,
    /// e.g. `from` or `25%, 75%`.
    pub frames: Vec<RawRule>,
}

/// Parsed stylesheet text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawStylesheet {
    /// Rules in source order.
    pub rules: Vec<RawRule>,
    /// Keyframe sets in source order.
    pub keyframes: Vec<RawKeyframes>,
    /// Number of rules (including at-rules) that were skipped.
    pub skipped: usize,
}

/// Strip a trailing `!important`, reporting whether it was there.
fn split_important_tail(value: &str) -> (String, bool) {
    let trimmed = value.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.ends_with("important")
        && let Some(bang) = lowered.rfind('!')
        && lowered
            .get(bang.saturating_add(1)..)
            .is_some_and(|tail| tail.trim_start() == "important")
        && let Some(prefix) = trimmed.get(..bang)
    {
        return (prefix.trim_end().to_owned(), true);
    }
    (trimmed.to_owned(), false)
}

fn canonical_name(name: &str) -> String {
    if name.starts_with("--") {
        name.to_owned()
    } else {
        name.to_ascii_lowercase()
    }
}

/// Collects `name: value` pairs from a rule body, values left raw.
struct BodyDeclParser;

impl CssDeclarationParser<'_> for BodyDeclParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'input>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let raw = strip_comments(input.slice_from(start));
        let (value, important) = split_important_tail(&raw);
        Ok(Declaration {
            name: canonical_name(&name),
            value,
            important,
        })
    }
}

impl CssAtRuleParser<'_> for BodyDeclParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        _name: CowRcStr<'input>,
        _input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Ok(())
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::AtRuleBodyInvalid))
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        Err(())
    }
}

impl CssQualifiedRuleParser<'_> for BodyDeclParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }
}

impl CssRuleBodyItemParser<'_, Declaration, ()> for BodyDeclParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// What the top-level parser produces.
enum TopLevelItem {
    Rule(RawRule),
    Keyframes(RawKeyframes),
}

/// Prelude of an at-rule.
enum AtRulePrelude {
    /// `@keyframes <name>`
    Keyframes(String),
    /// Any other at-rule, by lowercase name.
    Unsupported(String),
}

/// Top-level parser: qualified rules and `@keyframes` blocks.
struct TopLevelParser;

impl CssAtRuleParser<'_> for TopLevelParser {
    type Prelude = AtRulePrelude;
    type AtRule = TopLevelItem;
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let lowered = name.to_ascii_lowercase();
        if lowered == "keyframes" || lowered == "-webkit-keyframes" {
            let keyframes_name = input.expect_ident_or_string()?.to_string();
            return Ok(AtRulePrelude::Keyframes(keyframes_name));
        }
        Ok(AtRulePrelude::Unsupported(lowered))
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        match prelude {
            AtRulePrelude::Keyframes(name) => {
                let frames = parse_keyframe_blocks(input, self);
                Ok(TopLevelItem::Keyframes(RawKeyframes { name, frames }))
            }
            AtRulePrelude::Unsupported(name) => {
                debug!(target: "css::syntax", "skipping unsupported @{name} block");
                Err(input.new_error(BasicParseErrorKind::AtRuleBodyInvalid))
            }
        }
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        if let AtRulePrelude::Unsupported(name) = prelude {
            debug!(target: "css::syntax", "skipping unsupported @{name} statement");
        }
        Err(())
    }
}

impl CssQualifiedRuleParser<'_> for TopLevelParser {
    type Prelude = String;
    type QualifiedRule = TopLevelItem;
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let start = input.state();
        while input.next_including_whitespace_and_comments().is_ok() {}
        Ok(strip_comments(input.slice_from(start.position()))
            .trim()
            .to_owned())
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        let declarations = parse_declarations_from_block(input);
        Ok(TopLevelItem::Rule(RawRule {
            prelude,
            declarations,
        }))
    }
}

/// The `offset { declarations }` blocks inside `@keyframes`.
fn parse_keyframe_blocks(block: &mut Parser, top: &mut TopLevelParser) -> Vec<RawRule> {
    let mut frames = Vec::new();
    for item in StyleSheetParser::new(block, top) {
        match item {
            Ok(TopLevelItem::Rule(frame)) if !frame.prelude.is_empty() => frames.push(frame),
            Ok(_) => debug!(target: "css::syntax", "ignoring nested item in @keyframes"),
            Err((error, slice)) => debug!(
                target: "css::syntax",
                "dropping malformed keyframe at {}:{}: {:?}",
                error.location.line,
                error.location.column,
                slice.trim()
            ),
        }
    }
    frames
}

/// Declarations of one `{ ... }` block. Malformed entries are skipped.
fn parse_declarations_from_block(block: &mut Parser) -> Vec<Declaration> {
    let mut out: Vec<Declaration> = Vec::new();
    let mut body = BodyDeclParser;
    for item in CssRuleBodyParser::new(block, &mut body) {
        match item {
            Ok(decl) => out.push(decl),
            Err((error, slice)) => debug!(
                target: "css::syntax",
                "dropping malformed declaration at {}:{}: {slice:?}",
                error.location.line,
                error.location.column
            ),
        }
    }
    out
}

/// Parse stylesheet text into raw rules.
///
/// `@keyframes` blocks are collected separately. Malformed rules and every
/// other at-rule are skipped; parsing resumes at the next rule. A leading
/// byte-order mark is ignored.
pub fn parse_stylesheet(css: &str) -> RawStylesheet {
    let text = css.strip_prefix('\u{feff}').unwrap_or(css);
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut top = TopLevelParser;
    let mut sheet = RawStylesheet::default();
    for item in StyleSheetParser::new(&mut parser, &mut top) {
        match item {
            Ok(TopLevelItem::Rule(rule)) if rule.prelude.is_empty() => {
                sheet.skipped = sheet.skipped.saturating_add(1);
            }
            Ok(TopLevelItem::Rule(rule)) => sheet.rules.push(rule),
            Ok(TopLevelItem::Keyframes(keyframes)) => sheet.keyframes.push(keyframes),
            Err((error, slice)) => {
                sheet.skipped = sheet.skipped.saturating_add(1);
                debug!(
                    target: "css::syntax",
                    "skipped rule at {}:{}: {:?}",
                    error.location.line,
                    error.location.column,
                    slice.trim()
                );
            }
        }
    }
    debug!(
        target: "css::syntax",
        "parsed {} rules, {} keyframe sets ({} skipped)",
        sheet.rules.len(),
        sheet.keyframes.len(),
        sheet.skipped
    );
    sheet
}

/// Parse a bare declaration list such as an inline `style` attribute.
///
/// ```
/// let decls = css_syntax::parse_declaration_list("color: red; margin: 2px !important");
/// assert_eq!(decls.len(), 2);
/// assert!(decls[1].important);
/// ```
pub fn parse_declaration_list(text: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    parse_declarations_from_block(&mut parser)
}
