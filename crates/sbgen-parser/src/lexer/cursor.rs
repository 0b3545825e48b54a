/// Position within a type spelling.
///
/// Spellings are scanned byte by byte. Any non-ASCII byte is handed back
/// as its char so the lexer can reject it with a readable error.
pub struct Cursor<'src> {
    spelling: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(spelling: &'src str) -> Self {
        Self { spelling, pos: 0 }
    }

    pub fn spelling(&self) -> &'src str {
        self.spelling
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Character at `pos + ahead`, if any.
    pub fn look(&self, ahead: usize) -> Option<char> {
        self.spelling[self.pos..].chars().nth(ahead)
    }

    pub fn bump(&mut self) -> Option<char> {
        let ch = self.look(0)?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Step over `expected` when it is next.
    pub fn bump_if(&mut self, expected: char) -> bool {
        let hit = self.look(0) == Some(expected);
        if hit {
            self.pos += expected.len_utf8();
        }
        hit
    }

    pub fn skip_whitespace(&mut self) {
        self.take_while(|c| c.is_ascii_whitespace());
    }

    /// Consume a run of characters matching `pred` and return it.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'src str {
        let start = self.pos;
        let len = self.spelling[start..]
            .find(|c: char| !pred(c))
            .unwrap_or(self.spelling.len() - start);
        self.pos += len;
        &self.spelling[start..self.pos]
    }
}

pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_does_not_consume() {
        let mut cursor = Cursor::new("int&");
        assert_eq!(cursor.look(0), Some('i'));
        assert_eq!(cursor.look(3), Some('&'));
        assert_eq!(cursor.bump(), Some('i'));
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn runs_stop_at_the_first_mismatch() {
        let mut cursor = Cursor::new("Vector3  const");
        assert_eq!(cursor.take_while(is_ident_continue), "Vector3");
        cursor.skip_whitespace();
        assert!(!cursor.bump_if(' '));
        assert_eq!(cursor.take_while(is_ident_continue), "const");
        assert_eq!(cursor.look(0), None);
    }
}
