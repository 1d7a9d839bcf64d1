//! Tag and attribute parsing
//!
//!     Parses a tag line into the element name, its attributes and whatever follows them.
//!
//!         name #id .class ( key=value ... ) rest
//!
//!     Every part but the name is optional, and the name itself may be left out when the line
//!     starts with a shorthand (`#main` is a `div` with `id="main"`).
//!
//! Shorthands
//!
//!     `#name` becomes an `id` attribute and `.name` a `class` attribute. Each shorthand is its
//!     own attribute: `p.a.b` has two `class` attributes, merging is left to the backend.
//!
//! Attribute Lists
//!
//!     Attributes are `key=value` pairs separated by whitespace. They may follow the tag
//!     directly or be wrapped in `()`, `[]` or `{}`; inside a wrapped list the closing
//!     delimiter also ends unquoted values.
//!
//!     Values come in three shapes:
//!         - `key=(expr)`: a delimited host expression. The scan counts nested pairs of the same
//!           delimiter, so `key=(a(b)c)` captures `a(b)c`.
//!         - `key="text"` or `key='text'`: literal text.
//!         - `key=expr`: a host expression running up to whitespace (or the list's closing
//!           delimiter).
//!
//! Rest of the Line
//!
//!     After the attributes, one space is dropped. An empty rest means the tag takes its
//!     content from the following, deeper lines. `= code` and `== code` output an expression
//!     inside the tag. Anything else is the tag's text.

use crate::slim::ast::{AttrValue, Attribute};
use crate::slim::error::{SyntaxError, SyntaxErrorKind};
use crate::slim::parsing::cursor::Cursor;

/// What comes after the attributes of a tag line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagContent {
    /// Nothing: the body is filled by deeper lines.
    Open,
    /// Inline text.
    Text(String),
    /// Inline output expression. Deeper lines, if any, become its block body.
    Output { escape: bool, code: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub content: TagContent,
}

/// Parse a dedented tag line.
pub fn parse_tag(line: &str, line_number: usize, default_tag: &str) -> Result<ParsedTag, SyntaxError> {
    let error = |kind: SyntaxErrorKind, column: usize| {
        SyntaxError::new(kind, line, line_number).with_column(column)
    };

    let mut cursor = Cursor::new(line);

    let name = if matches!(cursor.peek(), Some('#' | '.')) {
        default_tag.to_string()
    } else {
        let name = cursor.eat_while(is_tag_name_char);
        if name.is_empty() {
            return Err(error(SyntaxErrorKind::UnknownLineIndicator, 0));
        }
        name.to_string()
    };

    let mut attributes = parse_shorthands(&mut cursor);

    let close = cursor.peek().and_then(closing_delimiter);
    if close.is_some() {
        cursor.bump();
    }

    let mut first = close.is_some();
    while let Some(key) = attribute_key(&mut cursor, first) {
        first = false;
        let value = attribute_value(&mut cursor, close).map_err(|(kind, column)| error(kind, column))?;
        attributes.push(Attribute::new(key, value));
    }

    if let Some(close) = close {
        cursor.skip_whitespace();
        if !cursor.eat(close) {
            return Err(error(
                SyntaxErrorKind::ExpectedClosingAttributeDelimiter(close),
                cursor.column(),
            ));
        }
    }

    Ok(ParsedTag {
        name,
        attributes,
        content: parse_content(cursor.rest()),
    })
}

fn parse_shorthands(cursor: &mut Cursor<'_>) -> Vec<Attribute> {
    let mut attributes = Vec::new();
    loop {
        let saved = cursor.pos();
        let key = match cursor.bump() {
            Some('#') => "id",
            Some('.') => "class",
            _ => {
                cursor.reset(saved);
                break;
            }
        };
        let value = cursor.eat_while(is_shorthand_char);
        if value.is_empty() {
            cursor.reset(saved);
            break;
        }
        attributes.push(Attribute::new(key, AttrValue::Static(value.to_string())));
    }
    attributes
}

/// Consume `key=` if it comes next.
///
/// Attributes must be preceded by whitespace, except the first one of a delimited list which
/// may follow the opening delimiter directly. The cursor is left untouched when no attribute
/// follows.
fn attribute_key<'a>(cursor: &mut Cursor<'a>, first_in_list: bool) -> Option<&'a str> {
    let saved = cursor.pos();
    let skipped = cursor.skip_whitespace();
    if skipped == 0 && !first_in_list {
        return None;
    }
    let key = cursor.eat_while(is_attribute_key_char);
    if key.is_empty() || !cursor.eat('=') {
        cursor.reset(saved);
        return None;
    }
    Some(key)
}

fn attribute_value(
    cursor: &mut Cursor<'_>,
    close: Option<char>,
) -> Result<AttrValue, (SyntaxErrorKind, usize)> {
    let column = cursor.column();
    if let Some((open, omega)) = cursor.peek().and_then(|c| Some((c, closing_delimiter(c)?))) {
        cursor.bump();
        let start = cursor.pos();
        let mut depth = 1usize;
        loop {
            match cursor.bump() {
                None => return Err((SyntaxErrorKind::MissingAttributeEndDelimiter(omega), column)),
                Some(c) if c == open => depth += 1,
                Some(c) if c == omega => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Some(_) => {}
            }
        }
        let end = cursor.pos() - omega.len_utf8();
        return Ok(AttrValue::Dynamic(cursor.line()[start..end].to_string()));
    }

    match cursor.peek() {
        Some(quote @ ('"' | '\'')) => {
            cursor.bump();
            let value = cursor.eat_while(|c| c != quote);
            if !cursor.eat(quote) {
                return Err((SyntaxErrorKind::InvalidAttributeValue, column));
            }
            Ok(AttrValue::Static(value.to_string()))
        }
        _ => {
            let value = cursor.eat_while(|c| !c.is_whitespace() && Some(c) != close);
            if value.is_empty() {
                return Err((SyntaxErrorKind::InvalidAttributeValue, column));
            }
            Ok(AttrValue::Dynamic(value.to_string()))
        }
    }
}

fn parse_content(rest: &str) -> TagContent {
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    if rest.trim().is_empty() {
        return TagContent::Open;
    }
    match rest.trim_start().strip_prefix('=') {
        Some(code) => match code.strip_prefix('=') {
            Some(code) => TagContent::Output {
                escape: false,
                code: code.trim().to_string(),
            },
            None => TagContent::Output {
                escape: true,
                code: code.trim().to_string(),
            },
        },
        None => TagContent::Text(rest.to_string()),
    }
}

/// The closing counterpart of an attribute delimiter.
pub fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

fn is_tag_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == ':'
}

fn is_shorthand_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c >= '\u{00c0}'
}

fn is_attribute_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
