use crate::cursor::Cursor;
use crate::LexError;

/// Consume a string literal starting at the cursor's `"`, up to the next
/// unescaped `"`. Recognized escapes are `\n \t \\ \"`; any other
/// character following a `\` is not an escape, the backslash is kept
/// literally and the character is re-examined on its own.
pub fn lex_string(cursor: &mut Cursor) -> Result<String, LexError> {
    debug_assert_eq!(cursor.current(), '"');
    cursor.advance();
    let mut text = String::new();
    loop {
        match cursor.current() {
            '\0' => return Err(LexError::UnterminatedString),
            '"' => {
                cursor.advance();
                return Ok(text);
            }
            '\\' => {
                cursor.advance();
                match cursor.current() {
                    'n' => {
                        cursor.advance();
                        text.push('\n');
                    }
                    't' => {
                        cursor.advance();
                        text.push('\t');
                    }
                    '\\' => {
                        cursor.advance();
                        text.push('\\');
                    }
                    '"' => {
                        cursor.advance();
                        text.push('"');
                    }
                    _ => {
                        text.push('\\');
                    }
                }
            }
            c => {
                cursor.advance();
                text.push(c);
            }
        }
    }
}
