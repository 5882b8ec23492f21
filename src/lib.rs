pub mod eval;
pub mod lexer;
pub mod parser;

pub use eval::EvalError;
pub use lexer::LexicalError;
pub use parser::{Relation, SyntaxError};

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lexical(#[from] LexicalError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses one expression. Input left over after a complete relation is
/// ignored.
pub fn parse(text: &str) -> Result<Relation> {
    log::debug!("parse: {:?}", text);
    parser::Parser::new(text).parse()
}

/// Like `parse`, but fails if any token follows the expression.
pub fn parse_strict(text: &str) -> Result<Relation> {
    log::debug!("parse_strict: {:?}", text);
    parser::Parser::new(text).parse_strict()
}

pub fn parse_and_evaluate(text: &str) -> Result<(Relation, i64)> {
    let tree = parse(text)?;
    log::debug!("evaluate: {}", tree);
    let value = tree.evaluate()?;
    Ok((tree, value))
}

pub fn render(tree: &Relation) -> String {
    tree.to_string()
}
