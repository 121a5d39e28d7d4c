//! Character classification for word-wise caret movement

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '?'
    )
}

/// Character type for word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    /// Alphanumeric characters (word characters)
    WordChar,
    Punctuation,
}

/// Get the character type for word navigation
pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}
