use faxc_util::{Span, Symbol};

/// The closed set of reserved words. Every other identifier-shaped lexeme
/// is a plain [`TokenKind::Identifier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    Int,
    Char,
    Void,
    If,
    Else,
    While,
    For,
    Return,
    Struct,
    Typedef,
    Const,
    Unsigned,
    Signed,
    Break,
    Continue,
    Default,
    Switch,
    Case,
    Enum,
    Extern,
    Float,
    Double,
    Goto,
    Register,
    Short,
    Sizeof,
    Static,
    Union,
    Volatile,
}

impl Keyword {
    /// Classify `text` as a keyword, if it is one.
    pub fn from_str(text: &str) -> Option<Keyword> {
        Some(match text {
            "int" => Keyword::Int,
            "char" => Keyword::Char,
            "void" => Keyword::Void,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "for" => Keyword::For,
            "return" => Keyword::Return,
            "struct" => Keyword::Struct,
            "typedef" => Keyword::Typedef,
            "const" => Keyword::Const,
            "unsigned" => Keyword::Unsigned,
            "signed" => Keyword::Signed,
            "break" => Keyword::Break,
            "continue" => Keyword::Continue,
            "default" => Keyword::Default,
            "switch" => Keyword::Switch,
            "case" => Keyword::Case,
            "enum" => Keyword::Enum,
            "extern" => Keyword::Extern,
            "float" => Keyword::Float,
            "double" => Keyword::Double,
            "goto" => Keyword::Goto,
            "register" => Keyword::Register,
            "short" => Keyword::Short,
            "sizeof" => Keyword::Sizeof,
            "static" => Keyword::Static,
            "union" => Keyword::Union,
            "volatile" => Keyword::Volatile,
            _ => return None,
        })
    }

    /// True for the three type keywords the parser treats as declaration
    /// starters and resynchronizes on.
    pub fn is_type_start(self) -> bool {
        matches!(self, Keyword::Int | Keyword::Void | Keyword::Char)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Void => "void",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Return => "return",
            Keyword::Struct => "struct",
            Keyword::Typedef => "typedef",
            Keyword::Const => "const",
            Keyword::Unsigned => "unsigned",
            Keyword::Signed => "signed",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Default => "default",
            Keyword::Switch => "switch",
            Keyword::Case => "case",
            Keyword::Enum => "enum",
            Keyword::Extern => "extern",
            Keyword::Float => "float",
            Keyword::Double => "double",
            Keyword::Goto => "goto",
            Keyword::Register => "register",
            Keyword::Short => "short",
            Keyword::Sizeof => "sizeof",
            Keyword::Static => "static",
            Keyword::Union => "union",
            Keyword::Volatile => "volatile",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Keyword(Keyword),
    Number,
    String,
    Operator,
    Punctuator,
    Eof,
}

/// A lexical unit: its category plus the interned source text it came
/// from. `Eof` is returned forever once the source is exhausted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Symbol,
    pub span: Span,
}
