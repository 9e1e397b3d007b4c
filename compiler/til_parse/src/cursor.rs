//! Token cursor.
//!
//! Buffers the lexer output so the grammar can peek freely. Lex errors
//! (stray bytes) surface as [`Lexeme`]s with `token == None` and are
//! reported by the parser like any other unexpected input.

use logos::Logos;

use til_ir::Span;

use crate::token::Token;

/// One lexed token with its span and text.
#[derive(Clone, Copy, Debug)]
pub struct Lexeme<'src> {
    /// `None` for byte sequences the lexer could not match.
    pub token: Option<Token>,
    pub span: Span,
    pub text: &'src str,
}

/// Peekable cursor over the token stream of one file.
pub struct Cursor<'src> {
    lexemes: Vec<Lexeme<'src>>,
    pos: usize,
    /// Span at end of input, for errors about missing tokens.
    eof_span: Span,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexemes = Vec::new();
        let mut lexer = Token::lexer(source);
        while let Some(result) = lexer.next() {
            lexemes.push(Lexeme {
                token: result.ok(),
                span: Span::from_range(lexer.span()),
                text: lexer.slice(),
            });
        }
        let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
        Cursor {
            lexemes,
            pos: 0,
            eof_span: Span::new(end, end),
        }
    }

    /// Current lexeme, or `None` at end of input.
    pub fn peek(&self) -> Option<Lexeme<'src>> {
        self.lexemes.get(self.pos).copied()
    }

    /// Whether the current token matches.
    pub fn at(&self, token: Token) -> bool {
        self.peek().is_some_and(|l| l.token == Some(token))
    }

    /// Advance and return the consumed lexeme.
    pub fn bump(&mut self) -> Option<Lexeme<'src>> {
        let lexeme = self.peek();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, token: Token) -> Option<Lexeme<'src>> {
        if self.at(token) {
            self.bump()
        } else {
            None
        }
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.lexemes.len()
    }

    /// Span of the current token, or the end-of-input span.
    pub fn span(&self) -> Span {
        self.peek().map_or(self.eof_span, |l| l.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn peek_bump_eat() {
        let mut cursor = Cursor::new("a: 4;");
        assert!(cursor.at(Token::Ident));
        assert_eq!(cursor.bump().unwrap().text, "a");
        assert!(cursor.eat(Token::Colon).is_some());
        assert!(cursor.eat(Token::Semi).is_none());
        assert_eq!(cursor.bump().unwrap().text, "4");
        assert!(cursor.eat(Token::Semi).is_some());
        assert!(cursor.at_eof());
        assert_eq!(cursor.span(), Span::new(5, 5));
    }

    #[test]
    fn lex_errors_are_lexemes() {
        let mut cursor = Cursor::new("a # b");
        assert_eq!(cursor.bump().unwrap().token, Some(Token::Ident));
        let bad = cursor.bump().unwrap();
        assert_eq!(bad.token, None);
        assert_eq!(bad.text, "#");
    }
}
