use std::num::NonZeroUsize;

use crate::{
    token::{Kind, Token},
    ScanError,
};

/// Scanner reads characters from a mask expression and groups them in to
/// a sequence of tokens. Once the source is exhausted every call to
/// [`Scanner::scan`] returns an [`Kind::End`] token.
#[derive(Debug)]
pub struct Scanner {
    src: Vec<char>,
    start: usize,
    current: usize,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(src: &str) -> Self {
        let src = src.chars().collect();
        Self {
            src,
            start: 0,
            current: 0,
        }
    }

    /// Rewind the scanner to the beginning of its source.
    pub fn reset(&mut self) {
        self.start = 0;
        self.current = 0;
    }

    /// Consume and return the next token from source.
    pub fn scan(&mut self) -> Result<Token, ScanError> {
        self.skip_whitespace();
        self.start = self.current;
        if self.is_source_end() {
            return Ok(self.token(Kind::End));
        }
        Ok(match self.advance() {
            '(' => self.token(Kind::GroupOpen),
            ')' => self.token(Kind::GroupClose),
            '!' => self.token(Kind::Not),
            '&' => self.double('&', Kind::And)?,
            '|' => self.double('|', Kind::Or)?,
            '#' => self.variable()?,
            ch => {
                return Err(ScanError::UnexpectedCharacter {
                    pos: self.start,
                    ch,
                })
            }
        })
    }

    fn double(&mut self, second: char, kind: Kind) -> Result<Token, ScanError> {
        if self.consume(second) {
            Ok(self.token(kind))
        } else {
            Err(ScanError::UnexpectedCharacter {
                pos: self.start,
                ch: self.src[self.start],
            })
        }
    }

    fn variable(&mut self) -> Result<Token, ScanError> {
        let invalid = ScanError::InvalidVariable { pos: self.start };
        if !is_digit(self.peek()) {
            return Err(invalid);
        }
        let mut index: usize = 0;
        while is_digit(self.peek()) {
            let digit = self.advance().to_digit(10).ok_or(invalid.clone())? as usize;
            index = index
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
                .ok_or(invalid.clone())?;
        }
        let index = NonZeroUsize::new(index).ok_or(invalid)?;
        Ok(self.token(Kind::Variable(index)))
    }

    fn token(&self, kind: Kind) -> Token {
        Token::new(kind, self.start)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn peek(&self) -> char {
        if self.is_source_end() {
            '\0'
        } else {
            self.src[self.current]
        }
    }

    fn advance(&mut self) -> char {
        let c = self.src[self.current];
        self.current += 1;
        c
    }

    fn consume(&mut self, expected: char) -> bool {
        if self.is_source_end() {
            return false;
        }
        if self.src[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn is_source_end(&self) -> bool {
        self.current >= self.src.len()
    }
}

/// Scan the whole text, returning every token up to and including the
/// terminating [`Kind::End`].
///
/// # Examples
///
/// ```
/// use boolcalc::tokenize;
///
/// let text: Vec<String> = tokenize("!#1 && #2")
///     .unwrap()
///     .iter()
///     .map(|t| t.to_string())
///     .collect();
/// assert_eq!(text, ["!", "#1", "&&", "#2", "<end>"]);
/// ```
pub fn tokenize(src: &str) -> Result<Vec<Token>, ScanError> {
    let mut scanner = Scanner::new(src);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan()?;
        tokens.push(token);
        if token.kind == Kind::End {
            break Ok(tokens);
        }
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}
