use crate::cursor::Cursor;

pub const PUNCTUATORS: &[char] = &['{', '}', '[', ']', '(', ')', ';', ','];

pub fn is_punctuator(c: char) -> bool {
    PUNCTUATORS.contains(&c)
}

/// Consume an operator, applying maximal munch for the pairs the
/// language recognizes. `*` and `/` never combine with a following
/// character and are always single-character operators.
pub fn lex_operator(cursor: &mut Cursor) -> String {
    let first = cursor.advance();
    let second = cursor.current();
    let joined = matches!(
        (first, second),
        ('=', '=') | ('!', '=') | ('<', '=') | ('>', '=') | ('+', '+') | ('-', '-') | ('&', '&') | ('|', '|')
    );
    if joined {
        cursor.advance();
        let mut text = String::with_capacity(2);
        text.push(first);
        text.push(second);
        text
    } else {
        first.to_string()
    }
}
