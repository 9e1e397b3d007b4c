//! Raw token definition.
//!
//! The logos-derived tokenizer for `.type` source. Comments and whitespace
//! are skipped at the lexer level; everything the parser sees is
//! structurally meaningful.

use logos::Logos;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")] // Whitespace
#[logos(skip r"//[^\n]*")] // Line comments
#[logos(skip r"/\*([^*]|\*[^/])*\*/")] // Block comments
pub enum Token {
    #[token("@")]
    At,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token("->")]
    Arrow,

    /// Identifier; `$` is allowed so the reserved marker `$Type` is one token.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    /// Integer literal: optional sign, decimal or hex.
    #[regex(r"[+-]?[0-9][A-Za-z0-9]*")]
    Int,

    /// Double-quoted string literal with `\"` and `\\` escapes.
    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,
}
