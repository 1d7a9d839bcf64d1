//! Text interpolation
//!
//!     Text and attribute values may embed host expressions as `#{expr}`. The compiler turns
//!     such text into a double-quoted host string literal in which each payload is passed
//!     through the escape helper:
//!
//!         Hello #{name}!   →   "Hello #{Slim::Helpers.escape_html((name))}!"
//!
//!     A payload ends at the first `}`. A backslash before `#{` keeps the interpolation
//!     literally, up to and including that `}`, so the host language sees `\#{` and does not
//!     interpolate. An opening `#{` that is never closed is kept literally too.
//!
//!     The scan runs on a small logos lexer; everything but the markers is a literal run.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    #[token("\\#{")]
    EscapedOpen,
    #[token("#{")]
    Open,
    #[token("}")]
    Close,
    #[token("#")]
    Hash,
    #[token("\\")]
    Backslash,
    #[regex(r"[^#}\\]+")]
    Literal,
}

#[derive(Debug)]
enum State {
    Literal,
    /// Inside `#{`, collecting the payload.
    Payload(String),
    /// After `\#{`, copying through the next `}`.
    Escaped,
}

/// Whether the text needs the interpolation rewrite.
pub fn has_interpolation(text: &str) -> bool {
    text.contains("#{")
}

/// Rewrite every `#{payload}` as `#{escape(payload)}`. The result is not quoted.
pub fn rewrite_interpolation(text: &str, escape: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    let mut state = State::Literal;
    let mut lexer = Segment::lexer(text);

    while let Some(token) = lexer.next() {
        let slice = lexer.slice();
        state = match (state, token) {
            (State::Literal, Ok(Segment::Open)) => State::Payload(String::new()),
            (State::Literal, Ok(Segment::EscapedOpen)) => {
                out.push_str(slice);
                State::Escaped
            }
            (State::Literal, _) => {
                out.push_str(slice);
                State::Literal
            }
            (State::Payload(payload), Ok(Segment::Close)) => {
                out.push_str("#{");
                out.push_str(&escape(&payload));
                out.push('}');
                State::Literal
            }
            (State::Payload(mut payload), _) => {
                payload.push_str(slice);
                State::Payload(payload)
            }
            (State::Escaped, Ok(Segment::Close)) => {
                out.push_str(slice);
                State::Literal
            }
            (State::Escaped, _) => {
                out.push_str(slice);
                State::Escaped
            }
        };
    }

    if let State::Payload(payload) = state {
        out.push_str("#{");
        out.push_str(&payload);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(code: &str) -> String {
        format!("esc({code})")
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(rewrite_interpolation("a # b } c \\ d", wrap), "a # b } c \\ d");
        assert!(!has_interpolation("a # b"));
    }

    #[test]
    fn test_payloads_are_wrapped() {
        assert_eq!(
            rewrite_interpolation("Hi #{user.name}, #{n} new", wrap),
            "Hi #{esc(user.name)}, #{esc(n)} new"
        );
        assert_eq!(rewrite_interpolation("#{a}#{b}", wrap), "#{esc(a)}#{esc(b)}");
    }

    #[test]
    fn test_payload_ends_at_first_brace() {
        assert_eq!(rewrite_interpolation("#{ {a: 1} }", wrap), "#{esc( {a: 1)} }");
    }

    #[test]
    fn test_escaped_interpolation_is_kept() {
        assert_eq!(
            rewrite_interpolation("\\#{raw} and #{x}", wrap),
            "\\#{raw} and #{esc(x)}"
        );
        assert_eq!(rewrite_interpolation("\\#{a #{b} c}", wrap), "\\#{a #{b} c}");
    }

    #[test]
    fn test_unterminated_payload_is_kept() {
        assert_eq!(rewrite_interpolation("x #{open", wrap), "x #{open");
    }
}
