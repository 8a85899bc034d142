//! Input-line tokenization with single/double quoting.
//!
//! The grammar is deliberately permissive: an unterminated quote absorbs the
//! remainder of the line as literal content instead of raising an error, and
//! there is no escaping mechanism for embedding the active quote character
//! inside a quoted span. Both are documented limitations of the command
//! surface, not gaps to fix here.

/// A raw input line split into a command token and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    /// First token, empty when the line is blank. Case is preserved; the
    /// registry matches it case-insensitively.
    pub command: String,
    /// Remaining tokens in order.
    pub args: Vec<String>,
}

impl ParsedLine {
    /// Whether the line held no command token at all.
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

/// Splits `raw` on whitespace runs outside of quoted spans.
///
/// `'` and `"` both open a span; a quote character only closes the span it
/// itself opened, so the other quote character is literal content inside.
/// Blank input yields an empty command and no arguments; callers treat that
/// as a no-op rather than an error.
pub fn tokenize(raw: &str) -> ParsedLine {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote = None::<char>;

    for ch in raw.chars() {
        match quote {
            Some(active) if ch == active => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(ch),
        }
    }

    // An open quote at end-of-line has already absorbed the rest of the
    // line into `current`; flush it like any other token.
    if !current.is_empty() {
        tokens.push(current);
    }

    let mut tokens = tokens.into_iter();
    ParsedLine {
        command: tokens.next().unwrap_or_default(),
        args: tokens.collect(),
    }
}
