use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Symbol {
    Less,
    Greater,
    Equal,
    Plus,
    Minus,
    Star,
    LParen,
    RParen,
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Symbol> {
        Some(match c {
            '<' => Symbol::Less,
            '>' => Symbol::Greater,
            '=' => Symbol::Equal,
            '+' => Symbol::Plus,
            '-' => Symbol::Minus,
            '*' => Symbol::Star,
            '(' => Symbol::LParen,
            ')' => Symbol::RParen,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::Less => '<',
            Symbol::Greater => '>',
            Symbol::Equal => '=',
            Symbol::Plus => '+',
            Symbol::Minus => '-',
            Symbol::Star => '*',
            Symbol::LParen => '(',
            Symbol::RParen => ')',
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Token {
    /// A non-empty run of ASCII digits, kept as written.
    Number(String),
    Symbol(Symbol),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(digits) => f.write_str(digits),
            Token::Symbol(s) => write!(f, "{}", s.as_char()),
        }
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("invalid symbol '{symbol}' at offset {offset}")]
pub struct LexicalError {
    pub symbol: char,
    pub offset: usize,
}

/// Pulls tokens out of a source string on demand.
///
/// The cursor only moves forward. Once the input is exhausted every further
/// call to `next_token` returns `Ok(None)`.
pub struct Scanner<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            chars: source.char_indices().peekable(),
        }
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, LexicalError> {
        while let Some(&(offset, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                let token = Token::Number(self.next_number());
                log::trace!("token {:?} at {}", token, offset);
                return Ok(Some(token));
            } else if let Some(s) = Symbol::from_char(c) {
                self.chars.next();
                log::trace!("token {:?} at {}", s, offset);
                return Ok(Some(Token::Symbol(s)));
            } else if c == ' ' {
                self.chars.next();
            } else {
                return Err(LexicalError { symbol: c, offset });
            }
        }
        Ok(None)
    }

    fn next_number(&mut self) -> String {
        let mut digits = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.chars.next();
        }
        digits
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Scans the whole input, stopping at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    Scanner::new(source).collect()
}
