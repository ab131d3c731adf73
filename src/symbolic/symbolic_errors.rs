//! Error type shared by the parser, the compiler and the quadrature engine.
//!
//! Every way a formula can fail (bad syntax, an identifier other than the
//! bound variable, an unknown function name) ends up as one
//! [`ExpressionEvaluationError`]. Callers that only need a yes/no answer match
//! on `Err(_)`; the variants carry the detail for diagnostics and logs.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionEvaluationError {
    /// a character the tokenizer does not understand, e.g. `#` or `$`
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    /// a well-formed token in a place where the grammar does not allow it
    #[error("unexpected token '{token}' at position {pos}")]
    UnexpectedToken { token: String, pos: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unbalanced parenthesis at position {pos}")]
    UnbalancedParen { pos: usize },
    #[error("invalid number literal '{literal}' at position {pos}")]
    InvalidNumber { literal: String, pos: usize },
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),
    #[error("unknown function '{name}' at position {pos}")]
    UnknownFunction { name: String, pos: usize },
    #[error("empty expression")]
    Empty,
    /// nesting or operator chain too deep to compile, reported at the offending token
    #[error("expression nested too deeply at position {pos}")]
    TooDeep { pos: usize },
}

impl ExpressionEvaluationError {
    /// true for errors found while reading the text, false for errors found
    /// while binding identifiers
    pub fn is_syntax_error(&self) -> bool {
        !matches!(self, ExpressionEvaluationError::UnknownIdentifier(_))
    }
}
