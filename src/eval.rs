//! Evaluation and structural rendering of parsed expressions.
//!
//! Relations evaluate to `1` when they hold and `0` otherwise. The `Display`
//! impls render the tree as `Name(child,child)`, which is the trace printed
//! by the front end.

use crate::parser::*;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum EvalError {
    #[error("integer literal {digits} is too large")]
    LiteralTooLarge { digits: String },

    #[error("integer overflow computing {left} {op} {right}")]
    Overflow { op: Operator, left: i64, right: i64 },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
        })
    }
}

type Result<T> = std::result::Result<T, EvalError>;

fn checked(op: Operator, left: i64, right: i64) -> Result<i64> {
    let value = match op {
        Operator::Add => left.checked_add(right),
        Operator::Sub => left.checked_sub(right),
        Operator::Mul => left.checked_mul(right),
    };
    value.ok_or(EvalError::Overflow { op, left, right })
}

fn truth(holds: bool) -> i64 {
    if holds {
        1
    } else {
        0
    }
}

impl Relation {
    pub fn evaluate(&self) -> Result<i64> {
        match self {
            Relation::Less(l, r) => Ok(truth(l.evaluate()? < r.evaluate()?)),
            Relation::Greater(l, r) => Ok(truth(l.evaluate()? > r.evaluate()?)),
            Relation::Equal(l, r) => Ok(truth(l.evaluate()? == r.evaluate()?)),
            Relation::Single(t) => t.evaluate(),
        }
    }
}

impl Term {
    pub fn evaluate(&self) -> Result<i64> {
        match self {
            Term::Add(l, r) => checked(Operator::Add, l.evaluate()?, r.evaluate()?),
            Term::Sub(l, r) => checked(Operator::Sub, l.evaluate()?, r.evaluate()?),
            Term::Single(f) => f.evaluate(),
        }
    }
}

impl TermOperand {
    pub fn evaluate(&self) -> Result<i64> {
        match self {
            TermOperand::Term(t) => t.evaluate(),
            TermOperand::Factor(f) => f.evaluate(),
        }
    }
}

impl Factor {
    pub fn evaluate(&self) -> Result<i64> {
        match self {
            Factor::Product(l, r) => checked(Operator::Mul, l.evaluate()?, r.evaluate()?),
            Factor::Single(p) => p.evaluate(),
        }
    }
}

impl FactorOperand {
    pub fn evaluate(&self) -> Result<i64> {
        match self {
            FactorOperand::Factor(f) => f.evaluate(),
            FactorOperand::Primary(p) => p.evaluate(),
        }
    }
}

impl Primary {
    pub fn evaluate(&self) -> Result<i64> {
        match self {
            Primary::Integer(i) => i.value(),
            Primary::Parenthesized(e) => e.evaluate(),
        }
    }
}

impl Integer {
    pub fn value(&self) -> Result<i64> {
        // Digits are validated on construction, so parsing only fails on
        // overflow.
        self.digits()
            .parse::<i64>()
            .map_err(|_| EvalError::LiteralTooLarge {
                digits: self.digits().into(),
            })
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Less(l, r) => write!(f, "Less({},{})", l, r),
            Relation::Greater(l, r) => write!(f, "Greater({},{})", l, r),
            Relation::Equal(l, r) => write!(f, "Equal({},{})", l, r),
            Relation::Single(t) => write!(f, "SingleRelation({})", t),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Add(l, r) => write!(f, "AddTerm({},{})", l, r),
            Term::Sub(l, r) => write!(f, "SubTerm({},{})", l, r),
            Term::Single(x) => write!(f, "SingleTerm({})", x),
        }
    }
}

impl fmt::Display for TermOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermOperand::Term(t) => fmt::Display::fmt(t, f),
            TermOperand::Factor(x) => fmt::Display::fmt(x, f),
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Product(l, r) => write!(f, "Factor({},{})", l, r),
            Factor::Single(p) => write!(f, "SingleFactor({})", p),
        }
    }
}

impl fmt::Display for FactorOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorOperand::Factor(x) => fmt::Display::fmt(x, f),
            FactorOperand::Primary(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primary::Integer(i) => write!(f, "Integer({})", i.digits()),
            Primary::Parenthesized(e) => write!(f, "Parenthesized({})", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(digits: &str) -> Primary {
        Primary::Integer(Integer::new(digits.into()).unwrap())
    }

    fn factor(digits: &str) -> Factor {
        Factor::Single(int(digits))
    }

    #[test]
    fn literal_keeps_leading_zeros_in_render() {
        let p = int("007");
        assert_eq!(p.evaluate(), Ok(7));
        assert_eq!(p.to_string(), "Integer(007)");
    }

    #[test]
    fn relations_yield_truth_flags() {
        let t = |d: &str| Term::Single(factor(d));
        assert_eq!(Relation::Less(t("3"), t("5")).evaluate(), Ok(1));
        assert_eq!(Relation::Greater(t("3"), t("5")).evaluate(), Ok(0));
        assert_eq!(Relation::Equal(t("4"), t("4")).evaluate(), Ok(1));
        assert_eq!(Relation::Single(t("9")).evaluate(), Ok(9));
    }

    #[test]
    fn subtraction_can_go_negative() {
        let term = Term::Sub(TermOperand::Factor(factor("1")), factor("5"));
        assert_eq!(term.evaluate(), Ok(-4));
        assert_eq!(
            term.to_string(),
            "SubTerm(SingleFactor(Integer(1)),SingleFactor(Integer(5)))"
        );
    }

    #[test]
    fn oversized_literal_is_an_error() {
        let digits = "99999999999999999999";
        assert_eq!(
            int(digits).evaluate(),
            Err(EvalError::LiteralTooLarge {
                digits: digits.into()
            })
        );
        assert_eq!(int("9223372036854775807").evaluate(), Ok(i64::MAX));
    }

    #[test]
    fn product_overflow_is_an_error() {
        let big = "9223372036854775807";
        let product = Factor::Product(FactorOperand::Primary(int(big)), int("2"));
        assert_eq!(
            product.evaluate(),
            Err(EvalError::Overflow {
                op: Operator::Mul,
                left: i64::MAX,
                right: 2
            })
        );
        assert_eq!(
            product.evaluate().unwrap_err().to_string(),
            "integer overflow computing 9223372036854775807 * 2"
        );
    }

    #[test]
    fn parenthesized_renders_inner_relation() {
        let inner = Relation::Single(Term::Single(factor("1")));
        let p = Primary::Parenthesized(Box::new(inner));
        assert_eq!(
            p.to_string(),
            "Parenthesized(SingleRelation(SingleTerm(SingleFactor(Integer(1)))))"
        );
        assert_eq!(p.evaluate(), Ok(1));
    }
}
