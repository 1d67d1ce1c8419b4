//! Propositional logic for the Pitfall maze agent.
//!
//! Facts about the maze are clauses over `(symbol, location)` propositions.
//! The agent tells the [`KnowledgeBase`] what it perceives and derives, and
//! asks it whether a clause is entailed. Entailment is decided by resolution
//! refutation, so `ask` answers for anything that follows from the stored
//! clauses, not only for clauses stored verbatim.
//!
//! # Modules
//!
//! - [`clause`] -- [`Proposition`], [`Literal`], [`Clause`] and the
//!   resolution rule.
//! - [`error`] -- Parse errors for the textual clause syntax.
//! - [`knowledge_base`] -- The clause store and entailment engine.

pub mod clause;
pub mod error;
pub mod knowledge_base;

pub use clause::{Clause, Literal, Proposition};
pub use error::LogicError;
pub use knowledge_base::KnowledgeBase;
