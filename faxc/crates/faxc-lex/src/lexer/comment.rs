use crate::cursor::Cursor;

/// Skip whitespace, `//` line comments and `/* ... */` block comments.
/// Block comments do not nest: the first `*/` closes them regardless of
/// how many `/*` were seen since.
pub fn skip_whitespace_and_comments(cursor: &mut Cursor) {
    loop {
        match cursor.current() {
            c if c.is_whitespace() => {
                cursor.advance();
            }
            '/' if cursor.peek(1) == '/' => {
                while !cursor.is_at_end() && cursor.current() != '\n' {
                    cursor.advance();
                }
            }
            '/' if cursor.peek(1) == '*' => {
                cursor.advance();
                cursor.advance();
                while !cursor.is_at_end() && !(cursor.current() == '*' && cursor.peek(1) == '/') {
                    cursor.advance();
                }
                if !cursor.is_at_end() {
                    cursor.advance();
                    cursor.advance();
                }
            }
            _ => break,
        }
    }
}
