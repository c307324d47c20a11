use crate::cursor::Cursor;
use faxc_util::MAX_LEXEME_BYTES;

pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Consume `[A-Za-z_][A-Za-z0-9_]*`, starting at the cursor's current
/// character (which must satisfy [`is_identifier_start`]). Stops early
/// if the lexeme would exceed [`MAX_LEXEME_BYTES`].
pub fn lex_identifier(cursor: &mut Cursor) -> String {
    let mut text = String::new();
    debug_assert!(is_identifier_start(cursor.current()));
    while is_identifier_continue(cursor.current()) && text.len() < MAX_LEXEME_BYTES {
        text.push(cursor.advance());
    }
    text
}

pub(crate) use is_identifier_start as starts_identifier;
