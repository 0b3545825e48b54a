use sbgen_core::TypeParseError;

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind};

/// Tokenizer for native type spellings.
///
/// `>>` is always lexed as two `>` tokens, since type spellings never
/// contain a shift operator.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Tokenize the whole spelling. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, TypeParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, TypeParseError> {
        self.cursor.skip_whitespace();
        let offset = self.cursor.pos();

        let Some(ch) = self.cursor.look(0) else {
            return Ok(Token {
                kind: TokenKind::Eof,
                offset,
            });
        };

        let kind = if is_ident_start(ch) {
            let ident = self.cursor.take_while(is_ident_continue);
            TokenKind::keyword(ident).unwrap_or_else(|| TokenKind::Ident(ident.to_string()))
        } else if ch.is_ascii_digit() || (ch == '-' && self.peek_digit()) {
            self.cursor.bump();
            let rest = self.cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '.');
            TokenKind::Number(format!("{ch}{rest}"))
        } else {
            self.cursor.bump();
            match ch {
                ':' if self.cursor.bump_if(':') => TokenKind::ColonColon,
                '<' => TokenKind::Less,
                '>' => TokenKind::Greater,
                ',' => TokenKind::Comma,
                '*' => TokenKind::Star,
                '&' if self.cursor.bump_if('&') => TokenKind::AmpAmp,
                '&' => TokenKind::Amp,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                _ => {
                    return Err(TypeParseError::UnexpectedChar {
                        ch,
                        spelling: self.cursor.spelling().to_string(),
                    });
                }
            }
        };

        Ok(Token { kind, offset })
    }

    fn peek_digit(&self) -> bool {
        self.cursor.look(1).is_some_and(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn splits_closing_angles() {
        assert_eq!(
            kinds("Vector<HMesh>>"),
            vec![
                TokenKind::Ident("Vector".into()),
                TokenKind::Less,
                TokenKind::Ident("HMesh".into()),
                TokenKind::Greater,
                TokenKind::Greater,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn recognizes_qualifiers_and_references() {
        assert_eq!(
            kinds("const bs::String&&"),
            vec![
                TokenKind::Const,
                TokenKind::Ident("bs".into()),
                TokenKind::ColonColon,
                TokenKind::Ident("String".into()),
                TokenKind::AmpAmp,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn rejects_stray_characters() {
        let err = Lexer::new("int[4]").tokenize().unwrap_err();
        assert!(matches!(err, TypeParseError::UnexpectedChar { ch: '[', .. }));
    }
}
