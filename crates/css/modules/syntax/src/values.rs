//! Value-level helpers: splitting, function calls, quoting and name hashing.

/// One argument of a parsed function call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionArg {
    /// Argument text, trimmed, with surrounding quotes removed when quoted.
    pub text: String,
    /// Whether the argument was a quoted string.
    pub quoted: bool,
}

/// A parsed `name(arg, arg, ...)` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionCall {
    /// Lowercased function name.
    pub name: String,
    /// Arguments split on top-level commas.
    pub args: Vec<FunctionArg>,
}

impl FunctionCall {
    /// Argument text at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(|arg| arg.text.as_str())
    }
}

/// Hash a name with the djb2 scheme (`hash * 33 + byte`, seeded with 5381).
pub const fn name_hash(name: &str) -> u32 {
    let bytes = name.as_bytes();
    let mut hash: u32 = 5381;
    let mut index = 0;
    while index < bytes.len() {
        hash = hash.wrapping_mul(33).wrapping_add(bytes[index] as u32);
        index += 1;
    }
    hash
}

/// Walks `text` yielding byte offsets where `separator` occurs outside of
/// parentheses and quoted strings.
fn top_level_positions(text: &str, mut is_separator: impl FnMut(u8) -> bool) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut positions = Vec::new();
    let mut depth: usize = 0;
    let mut quote: Option<u8> = None;
    let mut index = 0;
    while let Some(&byte) = bytes.get(index) {
        if let Some(open) = quote {
            if byte == b'\\' {
                index = index.saturating_add(1);
            } else if byte == open {
                quote = None;
            }
        } else {
            match byte {
                b'"' | b'\'' => quote = Some(byte),
                b'(' | b'[' => depth = depth.saturating_add(1),
                b')' | b']' => depth = depth.saturating_sub(1),
                _ if depth == 0 && is_separator(byte) => positions.push(index),
                _ => {}
            }
        }
        index = index.saturating_add(1);
    }
    positions
}

/// Split on `separator` at nesting depth zero, ignoring quoted content.
/// Pieces are trimmed; empty pieces are kept so positional lists stay aligned.
pub fn split_top_level(text: &str, separator: char) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut pieces = Vec::new();
    let mut start = 0;
    let sep = separator as u32;
    for position in top_level_positions(text, |byte| u32::from(byte) == sep) {
        pieces.push(text.get(start..position).unwrap_or_default().trim().to_owned());
        start = position.saturating_add(separator.len_utf8());
    }
    pieces.push(text.get(start..).unwrap_or_default().trim().to_owned());
    pieces
}

/// Split on whitespace at nesting depth zero, dropping empty pieces.
pub fn split_top_level_whitespace(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for position in top_level_positions(text, |byte| byte.is_ascii_whitespace()) {
        if let Some(piece) = text.get(start..position)
            && !piece.is_empty()
        {
            pieces.push(piece.to_owned());
        }
        start = position.saturating_add(1);
    }
    if let Some(piece) = text.get(start..)
        && !piece.is_empty()
    {
        pieces.push(piece.to_owned());
    }
    pieces
}

/// Remove one pair of matching surrounding quotes, if present.
pub fn unquote(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let (Some(&first), Some(&last)) = (bytes.first(), bytes.last()) else {
        return None;
    };
    if bytes.len() >= 2 && (first == b'"' || first == b'\'') && first == last {
        return text.get(1..text.len().saturating_sub(1));
    }
    None
}

/// Remove `/* ... */` comments that are not inside quoted strings.
pub fn strip_comments(text: &str) -> String {
    if !text.contains("/*") {
        return text.to_owned();
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    let mut quote: Option<char> = None;
    while let Some((_, current)) = chars.next() {
        if let Some(open) = quote {
            out.push(current);
            if current == '\\' {
                if let Some((_, escaped)) = chars.next() {
                    out.push(escaped);
                }
            } else if current == open {
                quote = None;
            }
            continue;
        }
        if current == '/' && chars.peek().is_some_and(|&(_, next)| next == '*') {
            chars.next();
            let mut previous = '\0';
            for (_, inner) in chars.by_ref() {
                if previous == '*' && inner == '/' {
                    break;
                }
                previous = inner;
            }
            out.push(' ');
            continue;
        }
        if current == '"' || current == '\'' {
            quote = Some(current);
        }
        out.push(current);
    }
    out
}

/// Parse `name(args...)`. Returns `None` when `text` is not a single call.
///
/// ```
/// let call = css_syntax::parse_function("var(--accent, \"a, b\")");
/// let call = call.ok_or("not a call")?;
/// assert_eq!(call.name, "var");
/// assert_eq!(call.arg(0), Some("--accent"));
/// assert_eq!(call.arg(1), Some("a, b"));
/// # Ok::<(), &str>(())
/// ```
pub fn parse_function(text: &str) -> Option<FunctionCall> {
    let trimmed = text.trim();
    let open = trimmed.find('(')?;
    let name = trimmed.get(..open)?.trim();
    if name.is_empty()
        || !name
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
    {
        return None;
    }
    let inner = trimmed.strip_suffix(')')?.get(open.saturating_add(1)..)?;
    // The opening parenthesis must close at the very end.
    let mut depth: usize = 1;
    let mut quote: Option<u8> = None;
    let inner_bytes = inner.as_bytes();
    let mut index = 0;
    while let Some(&byte) = inner_bytes.get(index) {
        match (quote, byte) {
            (Some(_), b'\\') => index = index.saturating_add(1),
            (Some(open_quote), _) if byte == open_quote => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'(') => depth = depth.saturating_add(1),
            (None, b')') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return None;
                }
            }
            (None, _) => {}
        }
        index = index.saturating_add(1);
    }
    let args = split_top_level(inner, ',')
        .into_iter()
        .map(|piece| match unquote(&piece) {
            Some(unquoted) => FunctionArg {
                text: unquoted.to_owned(),
                quoted: true,
            },
            None => FunctionArg {
                text: piece,
                quoted: false,
            },
        })
        .collect();
    Some(FunctionCall {
        name: name.to_ascii_lowercase(),
        args,
    })
}
