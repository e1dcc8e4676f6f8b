//! Tokenizer for the model-definition language.
//!
//! The lexer never fails: characters it does not understand become
//! [`Token::Unknown`] and are reported by the parser as part of the
//! declaration they appear in.

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Str(String),
    /// Numeric literal, kept as written (`42`, `-1.5`)
    Num(String),

    LBrace,   // {
    RBrace,   // }
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    Comma,    // ,
    Colon,    // :
    Eq,       // =
    At,       // @
    AtAt,     // @@
    Dot,      // .
    Question, // ?
    Newline,

    Unknown(char),
    Eof,
}

/// A token with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.chars.peek() {
                Some('\n') => break,
                Some(c) if c.is_whitespace() => {
                    self.chars.next();
                }
                Some('/') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    if lookahead.peek() != Some(&'/') {
                        break;
                    }
                    // Line comment (also covers `///` doc comments)
                    while let Some(&c) = self.chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.chars.next();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_ident(&mut self, first: char) -> String {
        let mut s = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        s
    }

    /// Read a quoted string. Strings do not span lines; an unterminated
    /// string ends at the newline.
    fn read_string(&mut self, quote: char) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            match c {
                '\n' => break,
                c if c == quote => {
                    self.chars.next();
                    break;
                }
                '\\' => {
                    self.chars.next();
                    match self.chars.next() {
                        Some('n') => s.push('\n'),
                        Some('t') => s.push('\t'),
                        Some(other) => s.push(other),
                        None => break,
                    }
                }
                c => {
                    s.push(c);
                    self.chars.next();
                }
            }
        }
        s
    }

    fn read_number(&mut self, first: char) -> String {
        let mut s = String::from(first);
        let mut seen_dot = false;
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.chars.next();
            } else if c == '.' && !seen_dot {
                let mut lookahead = self.chars.clone();
                lookahead.next();
                if !lookahead.peek().is_some_and(|d| d.is_ascii_digit()) {
                    break;
                }
                seen_dot = true;
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        s
    }

    pub fn next_token(&mut self) -> Spanned {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let c = match self.chars.next() {
            Some(c) => c,
            None => {
                return Spanned {
                    token: Token::Eof,
                    line,
                }
            }
        };

        let token = match c {
            '\n' => {
                self.line += 1;
                Token::Newline
            }
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            ':' => Token::Colon,
            '=' => Token::Eq,
            '.' => Token::Dot,
            '?' => Token::Question,
            '@' => {
                if self.chars.peek() == Some(&'@') {
                    self.chars.next();
                    Token::AtAt
                } else {
                    Token::At
                }
            }
            '"' | '\'' => Token::Str(self.read_string(c)),
            '-' if self.chars.peek().is_some_and(|d| d.is_ascii_digit()) => {
                Token::Num(self.read_number(c))
            }
            c if c.is_ascii_digit() => Token::Num(self.read_number(c)),
            c if c.is_alphabetic() || c == '_' => Token::Ident(self.read_ident(c)),
            other => Token::Unknown(other),
        };

        Spanned { token, line }
    }

    pub fn tokenize(mut self) -> Vec<Spanned> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let done = tok.token == Token::Eof;
            tokens.push(tok);
            if done {
                break;
            }
        }
        tokens
    }
}
