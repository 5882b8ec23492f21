use crate::lexer::{Scanner, Symbol, Token};
use crate::Result;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Relation {
    Less(Term, Term),
    Greater(Term, Term),
    Equal(Term, Term),
    Single(Term),
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Term {
    Add(TermOperand, Factor),
    Sub(TermOperand, Factor),
    Single(Factor),
}

/// Left operand of an additive chain: the bare first factor, or the chain
/// folded so far.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum TermOperand {
    Term(Box<Term>),
    Factor(Factor),
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Factor {
    Product(FactorOperand, Primary),
    Single(Primary),
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum FactorOperand {
    Factor(Box<Factor>),
    Primary(Primary),
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Primary {
    Integer(Integer),
    Parenthesized(Box<Relation>),
}

/// Decimal digit-run as written in the source, leading zeros included.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Integer(String);

impl Integer {
    pub fn new(digits: String) -> Option<Integer> {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Integer(digits))
        } else {
            None
        }
    }

    pub fn digits(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Lop {
    Lt,
    Gt,
    Eq,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Aop {
    Add,
    Sub,
}

/// What the parser saw where it needed something else.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Found {
    Token(Token),
    EndOfInput,
}

impl From<Option<Token>> for Found {
    fn from(token: Option<Token>) -> Self {
        match token {
            Some(t) => Found::Token(t),
            None => Found::EndOfInput,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(t) => write!(f, "'{}'", t),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum SyntaxError {
    #[error("expected integer or parenthesis, got {found}")]
    ExpectedPrimary { found: Found },

    #[error("expected ')', got {found}")]
    ExpectedClosingParen { found: Found },

    #[error("unexpected trailing input starting at {found}")]
    TrailingInput { found: Found },

    #[error("expression nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// Bound on the height of a parsed tree, counting parentheses and folded
/// `+`/`-`/`*` chains. Parsing, evaluation, rendering and dropping all
/// recurse over the tree.
pub const MAX_DEPTH: usize = 256;

/// Recursive-descent parser over a `Scanner`, holding one token of lookahead.
///
/// Lookahead is carried, not re-fetched, across rule boundaries: when a rule
/// (primary, factor, term, relation) returns, `current` already holds the
/// token immediately following the construct it parsed. Callers inspect that
/// slot with `peek` and must not fetch before deciding how to continue, or a
/// token is lost. New tokens are pulled (`peek_advance`) only at the start of
/// a primary and right after a primary inside a factor.
///
/// A parser is single-use; `parse` consumes it.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Option<Token>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser {
            scanner: Scanner::new(source),
            current: None,
            depth: 0,
        }
    }

    /// Parses one relation. Tokens after it are left unexamined.
    pub fn parse(mut self) -> Result<Relation> {
        let tree = self.relation()?;
        if let Some(ref rest) = self.current {
            log::warn!("ignoring trailing input starting at '{}'", rest);
        }
        Ok(tree)
    }

    /// Parses one relation and requires the input to end right after it.
    pub fn parse_strict(mut self) -> Result<Relation> {
        let tree = self.relation()?;
        match self.current.take() {
            None => Ok(tree),
            rest => Err(SyntaxError::TrailingInput { found: rest.into() }.into()),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    fn peek_symbol(&self) -> Option<Symbol> {
        match self.peek() {
            Some(Token::Symbol(s)) => Some(*s),
            _ => None,
        }
    }

    fn peek_advance(&mut self) -> Result<Option<&Token>> {
        self.current = self.scanner.next_token()?;
        Ok(self.current.as_ref())
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::NestingTooDeep { limit: MAX_DEPTH }.into());
        }
        Ok(())
    }

    fn lop(&self) -> Option<Lop> {
        match self.peek_symbol()? {
            Symbol::Less => Some(Lop::Lt),
            Symbol::Greater => Some(Lop::Gt),
            Symbol::Equal => Some(Lop::Eq),
            _ => None,
        }
    }

    fn aop(&self) -> Option<Aop> {
        match self.peek_symbol()? {
            Symbol::Plus => Some(Aop::Add),
            Symbol::Minus => Some(Aop::Sub),
            _ => None,
        }
    }

    // relation := term ( ('<' | '>' | '=') term )?
    fn relation(&mut self) -> Result<Relation> {
        let left = self.term()?;
        let relation = match self.lop() {
            Some(Lop::Lt) => Relation::Less(left, self.term()?),
            Some(Lop::Gt) => Relation::Greater(left, self.term()?),
            Some(Lop::Eq) => Relation::Equal(left, self.term()?),
            None => Relation::Single(left),
        };
        Ok(relation)
    }

    // term := factor ( ('+' | '-') factor )*
    fn term(&mut self) -> Result<Term> {
        let first = self.factor()?;
        let op = match self.aop() {
            Some(op) => op,
            None => return Ok(Term::Single(first)),
        };
        let base = self.depth;
        self.descend()?;
        let right = self.factor()?;
        let mut term = Term::binary(op, TermOperand::Factor(first), right);

        while let Some(op) = self.aop() {
            self.descend()?;
            let right = self.factor()?;
            term = Term::binary(op, TermOperand::Term(Box::new(term)), right);
        }
        self.depth = base;
        Ok(term)
    }

    // factor := primary ( '*' primary )*
    fn factor(&mut self) -> Result<Factor> {
        let first = self.primary()?;
        self.peek_advance()?;
        if self.peek_symbol() != Some(Symbol::Star) {
            return Ok(Factor::Single(first));
        }
        let base = self.depth;
        self.descend()?;
        let right = self.primary()?;
        self.peek_advance()?;
        let mut factor = Factor::Product(FactorOperand::Primary(first), right);

        while self.peek_symbol() == Some(Symbol::Star) {
            self.descend()?;
            let right = self.primary()?;
            self.peek_advance()?;
            factor = Factor::Product(FactorOperand::Factor(Box::new(factor)), right);
        }
        self.depth = base;
        Ok(factor)
    }

    // primary := Number | '(' relation ')'
    //
    // On return `current` still holds the primary's last token; `factor`
    // moves past it.
    fn primary(&mut self) -> Result<Primary> {
        let token = self.peek_advance()?.cloned();
        match token {
            // The scanner only emits ASCII digit runs.
            Some(Token::Number(digits)) => Ok(Primary::Integer(Integer(digits))),
            Some(Token::Symbol(Symbol::LParen)) => {
                self.descend()?;
                let inner = self.relation()?;
                self.depth -= 1;
                if self.peek_symbol() != Some(Symbol::RParen) {
                    return Err(SyntaxError::ExpectedClosingParen {
                        found: self.current.clone().into(),
                    }
                    .into());
                }
                Ok(Primary::Parenthesized(Box::new(inner)))
            }
            other => Err(SyntaxError::ExpectedPrimary {
                found: other.into(),
            }
            .into()),
        }
    }
}

impl Term {
    fn binary(op: Aop, left: TermOperand, right: Factor) -> Term {
        match op {
            Aop::Add => Term::Add(left, right),
            Aop::Sub => Term::Sub(left, right),
        }
    }
}
