//! Recursive-descent parser for the model-definition language.
//!
//! Top level: `model Name { ... }` and `enum Name { ... }` blocks are parsed;
//! any other `keyword Name { ... }` block (datasource, generator, type, view)
//! is skipped. Inside a model, declarations are separated by newlines or by
//! commas at nesting depth zero. A declaration that does not parse is
//! recorded as a [`ParseDiagnostic`] and skipped; parsing always continues.

use crate::ast::*;
use crate::error::ParseDiagnostic;
use crate::lexer::{Lexer, Spanned, Token};

pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    diagnostics: Vec<ParseDiagnostic>,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Self {
            tokens: Lexer::new(input).tokenize(),
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|s| &s.token)
            .unwrap_or(&Token::Eof)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.pos + offset)
            .map(|s| &s.token)
            .unwrap_or(&Token::Eof)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|s| s.line)
            .unwrap_or(1)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn diagnostic(&mut self, line: usize, message: impl Into<String>) {
        self.diagnostics.push(ParseDiagnostic::new(line, message));
    }

    pub fn parse(mut self) -> (SchemaAst, Vec<ParseDiagnostic>) {
        let mut ast = SchemaAst::default();

        loop {
            match self.peek().clone() {
                Token::Eof => break,
                Token::Newline => {
                    self.advance();
                }
                Token::Ident(keyword) => {
                    let line = self.line();
                    let header = match (self.peek_at(1), self.peek_at(2)) {
                        (Token::Ident(name), Token::LBrace) => Some(name.clone()),
                        _ => None,
                    };
                    let Some(name) = header else {
                        self.diagnostic(line, format!("unexpected `{keyword}` at top level"));
                        self.skip_line();
                        continue;
                    };

                    // keyword, name, {
                    self.pos += 3;

                    match keyword.as_str() {
                        "model" => ast.models.push(self.parse_model_body(name, line)),
                        "enum" => ast.enums.push(self.parse_enum_body(name, line)),
                        other => {
                            tracing::debug!("Skipping {} block '{}'", other, name);
                            self.skip_block();
                        }
                    }
                }
                other => {
                    let line = self.line();
                    self.diagnostic(line, format!("unexpected {other:?} at top level"));
                    self.skip_line();
                }
            }
        }

        (ast, self.diagnostics)
    }

    fn skip_line(&mut self) {
        while !matches!(self.peek(), Token::Newline | Token::Eof) {
            self.advance();
        }
    }

    /// Skip to the brace closing the block just opened.
    fn skip_block(&mut self) {
        let mut depth = 1usize;
        loop {
            match self.advance() {
                Token::LBrace => depth += 1,
                Token::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                Token::Eof => return,
                _ => {}
            }
        }
    }

    /// Collect the tokens of one declaration. Stops before a newline, before
    /// a depth-zero comma, and before a depth-zero closing brace.
    fn take_declaration(&mut self) -> Vec<Spanned> {
        let mut depth = 0usize;
        let mut decl = Vec::new();

        loop {
            match self.peek() {
                Token::Newline | Token::Eof => break,
                Token::Comma | Token::RBrace if depth == 0 => break,
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            decl.push(self.tokens[self.pos].clone());
            self.pos += 1;
        }

        decl
    }

    fn parse_model_body(&mut self, name: String, line: usize) -> ModelDecl {
        let mut fields = Vec::new();
        let mut attributes = Vec::new();

        loop {
            match self.peek() {
                Token::RBrace => {
                    self.advance();
                    break;
                }
                Token::Eof => {
                    self.diagnostic(line, format!("model {name} is missing its closing brace"));
                    break;
                }
                Token::Newline | Token::Comma => {
                    self.advance();
                }
                _ => {
                    let decl = self.take_declaration();
                    let decl_line = decl.first().map(|s| s.line).unwrap_or(line);
                    let mut cursor = Cursor::new(&decl);

                    if *cursor.peek() == Token::AtAt {
                        match cursor.parse_block_attribute() {
                            Ok(attr) => attributes.push(attr),
                            Err(msg) => self.diagnostic(
                                decl_line,
                                format!("skipped block attribute in model {name}: {msg}"),
                            ),
                        }
                    } else {
                        match cursor.parse_field(decl_line) {
                            Ok(field) => fields.push(field),
                            Err(msg) => self.diagnostic(
                                decl_line,
                                format!("skipped field declaration in model {name}: {msg}"),
                            ),
                        }
                    }
                }
            }
        }

        ModelDecl {
            name,
            fields,
            attributes,
            line,
        }
    }

    fn parse_enum_body(&mut self, name: String, line: usize) -> EnumDecl {
        let mut values = Vec::new();

        loop {
            match self.peek() {
                Token::RBrace => {
                    self.advance();
                    break;
                }
                Token::Eof => {
                    self.diagnostic(line, format!("enum {name} is missing its closing brace"));
                    break;
                }
                Token::Newline | Token::Comma => {
                    self.advance();
                }
                _ => {
                    let decl = self.take_declaration();
                    match decl.first().map(|s| &s.token) {
                        // `A B C` on one line declares three values
                        Some(Token::Ident(_)) => values.extend(decl.iter().map_while(|s| {
                            match &s.token {
                                Token::Ident(value) => Some(value.clone()),
                                _ => None,
                            }
                        })),
                        Some(Token::AtAt) => {}
                        _ => {
                            let decl_line = decl.first().map(|s| s.line).unwrap_or(line);
                            self.diagnostic(decl_line, format!("skipped entry in enum {name}"));
                        }
                    }
                }
            }
        }

        EnumDecl { name, values }
    }
}

/// Cursor over the tokens of a single declaration.
struct Cursor<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

type DeclResult<T> = Result<T, String>;

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|s| &s.token)
            .unwrap_or(&Token::Eof)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.pos + offset)
            .map(|s| &s.token)
            .unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn at_end(&self) -> bool {
        *self.peek() == Token::Eof
    }

    fn expect(&mut self, expected: Token, what: &str) -> DeclResult<()> {
        let tok = self.advance();
        if tok == expected {
            Ok(())
        } else {
            Err(format!("expected {what}, found {tok:?}"))
        }
    }

    fn expect_ident(&mut self, what: &str) -> DeclResult<String> {
        match self.advance() {
            Token::Ident(s) => Ok(s),
            tok => Err(format!("expected {what}, found {tok:?}")),
        }
    }

    /// `name Type[]? @attr(...) ...`
    fn parse_field(&mut self, line: usize) -> DeclResult<FieldDecl> {
        let name = self.expect_ident("field name")?;
        let field_type = self.parse_type()?;

        let mut attributes = Vec::new();
        while !self.at_end() {
            match self.advance() {
                Token::At => attributes.push(self.parse_attribute_body()?),
                tok => return Err(format!("unexpected {tok:?} after field type")),
            }
        }

        Ok(FieldDecl {
            name,
            field_type,
            attributes,
            line,
        })
    }

    fn parse_type(&mut self) -> DeclResult<TypeRef> {
        let name = self.expect_ident("field type")?;

        // Unsupported("...") style types carry arguments
        if *self.peek() == Token::LParen {
            self.parse_arguments()?;
        }

        let mut list = false;
        if *self.peek() == Token::LBracket {
            self.advance();
            self.expect(Token::RBracket, "`]`")?;
            list = true;
        }

        let mut optional = false;
        if *self.peek() == Token::Question {
            self.advance();
            optional = true;
        }

        Ok(TypeRef {
            name,
            optional,
            list,
        })
    }

    fn parse_block_attribute(&mut self) -> DeclResult<Attribute> {
        self.expect(Token::AtAt, "`@@`")?;
        let attr = self.parse_attribute_body()?;
        if !self.at_end() {
            return Err(format!("unexpected {:?} after block attribute", self.peek()));
        }
        Ok(attr)
    }

    /// Attribute name (possibly dotted) and optional argument list.
    fn parse_attribute_body(&mut self) -> DeclResult<Attribute> {
        let mut name = self.expect_ident("attribute name")?;
        while *self.peek() == Token::Dot {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_ident("attribute name segment")?);
        }

        let args = if *self.peek() == Token::LParen {
            self.parse_arguments()?
        } else {
            Vec::new()
        };

        Ok(Attribute { name, args })
    }

    fn parse_arguments(&mut self) -> DeclResult<Vec<Argument>> {
        self.expect(Token::LParen, "`(`")?;
        let mut args = Vec::new();

        loop {
            if *self.peek() == Token::RParen {
                self.advance();
                break;
            }

            args.push(self.parse_argument()?);

            match self.advance() {
                Token::Comma => {}
                Token::RParen => break,
                tok => return Err(format!("expected `,` or `)`, found {tok:?}")),
            }
        }

        Ok(args)
    }

    fn parse_argument(&mut self) -> DeclResult<Argument> {
        let label = match (self.peek(), self.peek_at(1)) {
            (Token::Ident(name), Token::Colon) => Some(name.clone()),
            _ => None,
        };

        if let Some(name) = label {
            self.advance();
            self.advance();
            let value = self.parse_expr()?;
            return Ok(Argument {
                name: Some(name),
                value,
            });
        }

        Ok(Argument {
            name: None,
            value: self.parse_expr()?,
        })
    }

    fn parse_expr(&mut self) -> DeclResult<Expr> {
        match self.advance() {
            Token::Str(s) => Ok(Expr::Str(s)),
            Token::Num(n) => Ok(Expr::Num(n)),
            Token::Ident(mut name) => {
                while *self.peek() == Token::Dot {
                    self.advance();
                    name.push('.');
                    name.push_str(&self.expect_ident("identifier")?);
                }
                if *self.peek() == Token::LParen {
                    let args = self.parse_arguments()?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            Token::LBracket => {
                let mut items = Vec::new();
                loop {
                    if *self.peek() == Token::RBracket {
                        self.advance();
                        break;
                    }
                    items.push(self.parse_expr()?);
                    match self.advance() {
                        Token::Comma => {}
                        Token::RBracket => break,
                        tok => return Err(format!("expected `,` or `]`, found {tok:?}")),
                    }
                }
                Ok(Expr::List(items))
            }
            tok => Err(format!("unexpected {tok:?} in expression")),
        }
    }
}
