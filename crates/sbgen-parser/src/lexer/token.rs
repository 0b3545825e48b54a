use std::fmt;

/// Token kinds of a native type spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Number(String),
    Const,
    Volatile,
    /// `struct`, `class`, `enum` or `typename` prefixes, which carry no meaning here.
    Elaborated,
    ColonColon,
    Less,
    Greater,
    Comma,
    Star,
    Amp,
    AmpAmp,
    LParen,
    RParen,
    Eof,
}

impl TokenKind {
    /// Map an identifier to its keyword kind, if any.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        match ident {
            "const" => Some(TokenKind::Const),
            "volatile" => Some(TokenKind::Volatile),
            "struct" | "class" | "enum" | "typename" => Some(TokenKind::Elaborated),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => f.write_str(name),
            TokenKind::Number(text) => f.write_str(text),
            TokenKind::Const => f.write_str("const"),
            TokenKind::Volatile => f.write_str("volatile"),
            TokenKind::Elaborated => f.write_str("<elaborated specifier>"),
            TokenKind::ColonColon => f.write_str("::"),
            TokenKind::Less => f.write_str("<"),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Amp => f.write_str("&"),
            TokenKind::AmpAmp => f.write_str("&&"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its byte offset in the spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}
