//! Grammar for the declaration tree language.
//!
//! One recursive-descent pass from tokens to the generic [`Tree`]. The
//! grammar is deliberately tiny:
//!
//! ```text
//! file  := entry*
//! entry := tag* atom (':' (block | tag* atom))?
//! block := '{' (entry (';' | ',')*)* '}'
//! tag   := '@' ident ('(' arg* ')')?
//! arg   := atom (':' tag* atom)?
//! atom  := ident | int | string | '->'
//! ```
//!
//! `->` is an ordinary atom node; the analyzer gives it meaning inside map
//! tags and map bodies.

use til_diagnostic::{Diagnostics, ErrorCode};
use til_ir::{FileId, Node, NodeId, Tag, Tree};

use crate::cursor::{Cursor, Lexeme};
use crate::token::Token;

pub(crate) struct Parser<'src, 'd> {
    cursor: Cursor<'src>,
    tree: Tree,
    file: FileId,
    diags: &'d mut Diagnostics,
}

impl<'src, 'd> Parser<'src, 'd> {
    pub(crate) fn new(file: FileId, source: &'src str, diags: &'d mut Diagnostics) -> Self {
        Parser {
            cursor: Cursor::new(source),
            tree: Tree::new(),
            file,
            diags,
        }
    }

    /// Parse the whole file into a tree rooted at `tree.root`.
    pub(crate) fn parse_file(mut self) -> Tree {
        let mut top_level = Vec::new();
        while !self.cursor.at_eof() {
            if self.eat_separator() {
                continue;
            }
            match self.parse_entry() {
                Some(id) => top_level.push(id),
                None => self.recover(),
            }
        }
        let root = self.tree.root;
        self.tree.node_mut(root).children.extend(top_level);
        self.tree
    }

    /// Consume one `;` or `,` if present.
    fn eat_separator(&mut self) -> bool {
        self.cursor.eat(Token::Semi).is_some() || self.cursor.eat(Token::Comma).is_some()
    }

    /// Skip to the next plausible entry start after an error.
    fn recover(&mut self) {
        while let Some(lexeme) = self.cursor.peek() {
            match lexeme.token {
                Some(Token::At | Token::RBrace) => return,
                Some(Token::Semi | Token::Comma) => {
                    self.cursor.bump();
                    return;
                }
                _ => {
                    self.cursor.bump();
                }
            }
        }
    }

    /// entry := tag* atom (':' (block | tag* atom))?
    fn parse_entry(&mut self) -> Option<NodeId> {
        let tags = self.parse_tags();
        let Some(mut node) = self.parse_atom_node() else {
            let span = self.cursor.span();
            let found = self
                .cursor
                .peek()
                .map_or_else(|| "end of input".to_string(), describe);
            self.diags.error(
                ErrorCode::E0101,
                self.file,
                span,
                format!("expected a declaration, found {found}"),
            );
            return None;
        };
        node.tags.extend(tags);

        if self.cursor.eat(Token::Colon).is_some() {
            if self.cursor.at(Token::LBrace) {
                let children = self.parse_block();
                node.children.extend(children);
            } else if let Some(child) = self.parse_tagged_atom() {
                node.children.push(child);
            } else {
                let span = self.cursor.span();
                self.diags.error(
                    ErrorCode::E0101,
                    self.file,
                    span,
                    "expected a value after `:`",
                );
            }
        }
        Some(self.tree.push(node))
    }

    /// block := '{' (entry (';' | ',')*)* '}'
    fn parse_block(&mut self) -> Vec<NodeId> {
        let open = self.cursor.span();
        self.cursor.bump(); // consume '{'
        let mut children = Vec::new();
        loop {
            if self.cursor.eat(Token::RBrace).is_some() {
                return children;
            }
            if self.cursor.at_eof() {
                self.diags
                    .error(ErrorCode::E0102, self.file, open, "unclosed `{`");
                return children;
            }
            if self.eat_separator() {
                continue;
            }
            match self.parse_entry() {
                Some(id) => children.push(id),
                None => self.recover(),
            }
        }
    }

    /// tag* atom: an atom that may carry its own tags, e.g.
    /// `@array(count) u32` as a member's type.
    fn parse_tagged_atom(&mut self) -> Option<NodeId> {
        let tags = self.parse_tags();
        let mut node = self.parse_atom_node()?;
        node.tags.extend(tags);
        Some(self.tree.push(node))
    }

    /// tag := '@' ident ('(' arg* ')')?
    fn parse_tags(&mut self) -> Vec<Tag> {
        let mut tags = Vec::new();
        while self.cursor.at(Token::At) {
            let at_span = self.cursor.span();
            self.cursor.bump();
            let Some(name) = self.cursor.eat(Token::Ident) else {
                let span = self.cursor.span();
                self.diags
                    .error(ErrorCode::E0101, self.file, span, "expected a tag name after `@`");
                continue;
            };
            let mut tag = Tag::new(name.text, at_span.merge(name.span));
            if self.cursor.eat(Token::LParen).is_some() {
                self.parse_tag_args(&mut tag);
            }
            tags.push(tag);
        }
        tags
    }

    /// arg* until ')'; commas separate, `name: value` nests.
    fn parse_tag_args(&mut self, tag: &mut Tag) {
        loop {
            if self.cursor.eat(Token::RParen).is_some() {
                return;
            }
            if self.cursor.at_eof() {
                self.diags
                    .error(ErrorCode::E0102, self.file, tag.span, "unclosed `(` in tag");
                return;
            }
            if self.eat_separator() {
                continue;
            }
            let Some(mut arg) = self.parse_atom_node() else {
                let span = self.cursor.span();
                self.diags
                    .error(ErrorCode::E0101, self.file, span, "expected a tag argument");
                self.cursor.bump();
                continue;
            };
            if self.cursor.eat(Token::Colon).is_some() {
                if let Some(child) = self.parse_tagged_atom() {
                    arg.children.push(child);
                } else {
                    let span = self.cursor.span();
                    self.diags.error(
                        ErrorCode::E0101,
                        self.file,
                        span,
                        "expected a value after `:` in tag argument",
                    );
                }
            }
            let id = self.tree.push(arg);
            tag.args.push(id);
        }
    }

    /// atom := ident | int | string | '->'
    ///
    /// Returns the node unpushed so the caller can attach tags/children.
    fn parse_atom_node(&mut self) -> Option<Node> {
        let lexeme = self.cursor.peek()?;
        let node = match lexeme.token {
            Some(Token::Ident | Token::Int | Token::Arrow) => {
                Node::new(lexeme.text, lexeme.span)
            }
            Some(Token::Str) => Node::new(unescape(lexeme.text), lexeme.span),
            _ => return None,
        };
        self.cursor.bump();
        Some(node)
    }
}

/// Strip quotes and resolve `\"` / `\\` escapes.
fn unescape(quoted: &str) -> String {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(quoted);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(esc) => out.push(esc),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Human description of a lexeme for error messages.
fn describe(lexeme: Lexeme<'_>) -> String {
    match lexeme.token {
        Some(_) => format!("`{}`", lexeme.text),
        None => format!("unrecognized character `{}`", lexeme.text),
    }
}
