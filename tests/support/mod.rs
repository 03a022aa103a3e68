//! A minimal test-support lexer.
//!
//! Lexing is out of scope for `fur-parser` itself — this lexer exists only
//! so the integration tests in this directory can feed the parser realistic
//! `.fur` source text instead of hand-building token vectors for every
//! scenario. It implements just enough of Fur's surface lexical grammar to
//! drive those scenarios: it is not production-grade (no error recovery, no
//! Unicode identifiers, no multi-line strings).
//!
//! Newlines are turned into a synthetic `Semi` following Fur's
//! automatic-semicolon rule: a newline ends a statement only when the token
//! immediately before it could plausibly end one (an identifier, a literal,
//! a closing bracket, `return`, or `++`/`--`).

use fur_parser::span::Span;
use fur_parser::token::{Token, TokenKind};

pub fn lex(src: &str) -> Vec<Token> {
    Lexer::new(src).run()
}

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Lexer<'a> {
        Lexer {
            src: src.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.src.len() {
            self.step();
        }
        self.push(TokenKind::End, "", self.pos, self.pos);
        self.tokens
    }

    fn peek_byte(&self) -> u8 {
        self.src[self.pos]
    }

    fn push(&mut self, kind: TokenKind, lexeme: impl Into<String>, start: usize, end: usize) {
        self.tokens.push(Token::new(kind, lexeme, Span::new(start, end)));
    }

    /// Whether a `Semi` should be synthesized for a newline that follows the
    /// most recently emitted token.
    fn ends_statement(&self) -> bool {
        matches!(
            self.tokens.last().map(|t| t.kind),
            Some(
                TokenKind::Ident
                    | TokenKind::Int
                    | TokenKind::Float
                    | TokenKind::Hex
                    | TokenKind::Octal
                    | TokenKind::String
                    | TokenKind::RParen
                    | TokenKind::RBrack
                    | TokenKind::RBrace
                    | TokenKind::Return
                    | TokenKind::Inc
                    | TokenKind::Dec
            )
        )
    }

    fn step(&mut self) {
        let c = self.peek_byte();

        if c == b'\n' {
            if self.ends_statement() {
                self.push(TokenKind::Semi, "\n", self.pos, self.pos + 1);
            }
            self.pos += 1;
            return;
        }

        if c.is_ascii_whitespace() {
            self.pos += 1;
            return;
        }

        if c == b'/' && self.src.get(self.pos + 1) == Some(&b'/') {
            while self.pos < self.src.len() && self.peek_byte() != b'\n' {
                self.pos += 1;
            }
            return;
        }

        if c.is_ascii_digit() {
            return self.number();
        }

        if c == b'"' {
            return self.string();
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            return self.ident_or_keyword();
        }

        self.punctuation_or_operator();
    }

    fn number(&mut self) {
        let start = self.pos;

        if self.peek_byte() == b'0' && matches!(self.src.get(self.pos + 1), Some(b'x') | Some(b'X')) {
            self.pos += 2;
            while self.pos < self.src.len() && self.peek_byte().is_ascii_hexdigit() {
                self.pos += 1;
            }
            let lexeme = String::from_utf8_lossy(&self.src[start + 2..self.pos]).into_owned();
            self.push(TokenKind::Hex, lexeme, start, self.pos);
            return;
        }

        let leading_zero = self.peek_byte() == b'0';
        while self.pos < self.src.len() && self.peek_byte().is_ascii_digit() {
            self.pos += 1;
        }

        if self.pos < self.src.len() && self.peek_byte() == b'.' {
            self.pos += 1;
            while self.pos < self.src.len() && self.peek_byte().is_ascii_digit() {
                self.pos += 1;
            }
            let lexeme = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
            self.push(TokenKind::Float, lexeme, start, self.pos);
            return;
        }

        if leading_zero && self.pos - start > 1 {
            let lexeme = String::from_utf8_lossy(&self.src[start + 1..self.pos]).into_owned();
            self.push(TokenKind::Octal, lexeme, start, self.pos);
        } else {
            let lexeme = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
            self.push(TokenKind::Int, lexeme, start, self.pos);
        }
    }

    fn string(&mut self) {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.src.len() && self.peek_byte() != b'"' {
            self.pos += 1;
        }
        let lexeme = String::from_utf8_lossy(&self.src[start + 1..self.pos]).into_owned();
        self.pos += 1; // closing quote
        self.push(TokenKind::String, lexeme, start, self.pos);
    }

    fn ident_or_keyword(&mut self) {
        let start = self.pos;
        while self.pos < self.src.len()
            && (self.peek_byte().is_ascii_alphanumeric() || self.peek_byte() == b'_')
        {
            self.pos += 1;
        }
        let lexeme = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        let kind = match lexeme.as_str() {
            "proc" => TokenKind::Proc,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "var" => TokenKind::Var,
            _ => TokenKind::Ident,
        };
        self.push(kind, lexeme, start, self.pos);
    }

    fn punctuation_or_operator(&mut self) {
        let start = self.pos;
        let rest = &self.src[self.pos..];

        // Longest-match-first over the multi-character operators.
        let three: &[(&[u8], TokenKind)] = &[
            (b"<<=", TokenKind::ShlAssign),
            (b">>=", TokenKind::ShrAssign),
        ];
        let two: &[(&[u8], TokenKind)] = &[
            (b"::", TokenKind::DoubleColon),
            (b"->", TokenKind::Arrow),
            (b":=", TokenKind::Define),
            (b"==", TokenKind::Eql),
            (b"!=", TokenKind::Neq),
            (b"<=", TokenKind::Leq),
            (b">=", TokenKind::Geq),
            (b"&&", TokenKind::Land),
            (b"||", TokenKind::Lor),
            (b"++", TokenKind::Inc),
            (b"--", TokenKind::Dec),
            (b"+=", TokenKind::AddAssign),
            (b"-=", TokenKind::SubAssign),
            (b"*=", TokenKind::MulAssign),
            (b"%=", TokenKind::RemAssign),
            (b"|=", TokenKind::OrAssign),
        ];

        for (pat, kind) in three {
            if rest.starts_with(pat) {
                self.pos += 3;
                self.push(*kind, std::str::from_utf8(pat).unwrap(), start, self.pos);
                return;
            }
        }
        for (pat, kind) in two {
            if rest.starts_with(pat) {
                self.pos += 2;
                self.push(*kind, std::str::from_utf8(pat).unwrap(), start, self.pos);
                return;
            }
        }

        let kind = match rest[0] {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBrack,
            b']' => TokenKind::RBrack,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Period,
            b':' => TokenKind::Colon,
            b';' => TokenKind::Semi,
            b'+' => TokenKind::Add,
            b'-' => TokenKind::Sub,
            b'*' => TokenKind::Mul,
            b'/' => TokenKind::Quo,
            b'%' => TokenKind::Rem,
            b'!' => TokenKind::Not,
            b'<' => TokenKind::Lss,
            b'>' => TokenKind::Gtr,
            b'=' => TokenKind::Assign,
            other => panic!("test lexer: unrecognised byte {:?} at {}", other as char, start),
        };
        self.pos += 1;
        self.push(kind, std::str::from_utf8(&rest[..1]).unwrap(), start, self.pos);
    }
}
