//! Error types for the `pitfall-logic` crate.
//!
//! Clauses built from typed literals cannot be malformed; these errors only
//! arise when parsing the textual syntax accepted by [`Clause`]'s `FromStr`.
//!
//! [`Clause`]: crate::Clause

/// Errors that can occur while parsing clauses and literals.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LogicError {
    /// A literal contained no symbol character.
    #[error("empty literal")]
    EmptyLiteral,

    /// The symbol character is not one of `P`, `.`, `1`, `2`.
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(char),

    /// The location part was not of the form `(x,y)`.
    #[error("malformed location in literal '{0}'")]
    MalformedLocation(String),
}
