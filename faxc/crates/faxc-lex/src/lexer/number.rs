use crate::cursor::Cursor;
use faxc_util::MAX_LEXEME_BYTES;

/// Consume `[0-9]+`. No sign, decimal point, exponent or suffix is part
/// of a number lexeme; `-1` lexes as `-` followed by `1`.
pub fn lex_number(cursor: &mut Cursor) -> String {
    let mut text = String::new();
    while cursor.current().is_ascii_digit() && text.len() < MAX_LEXEME_BYTES {
        text.push(cursor.advance());
    }
    text
}
