//! Clauses over maze propositions, and the resolution rule.
//!
//! A [`Clause`] is a disjunction of [`Literal`]s held in a sorted set, so two
//! clauses built from the same literals in any order compare and hash equal.
//! A clause holding both polarities of one proposition is a tautology: it is
//! collapsed into the *valid* sentinel at construction and keeps no literals.
//! The clause with no literals that is not valid is the empty clause, the
//! marker of a contradiction.
//!
//! Clauses never change after construction; [`Clause::resolve`] builds new
//! ones.
//!
//! # Text syntax
//!
//! `P(1,2) ∨ ¬1(3,4)` -- a symbol character followed by `(x,y)`, negated by
//! `¬`, `!` or `~`, separated by `∨`, `|` or `v`. `⊤` is the valid clause
//! and `⊥` the empty clause.

use std::collections::BTreeSet;
use std::str::FromStr;

use pitfall_types::{Location, Symbol};
use serde::{Deserialize, Serialize};

use crate::error::LogicError;

// ---------------------------------------------------------------------------
// Proposition / Literal
// ---------------------------------------------------------------------------

/// A statement that `symbol` holds at `location`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Proposition {
    /// The run symbol.
    pub symbol: Symbol,
    /// Where it is claimed to hold.
    pub location: Location,
}

impl Proposition {
    /// Create a proposition.
    pub const fn new(symbol: Symbol, location: Location) -> Self {
        Self { symbol, location }
    }
}

impl core::fmt::Display for Proposition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.symbol, self.location)
    }
}

/// A proposition asserted true (`positive`) or false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// The proposition.
    pub proposition: Proposition,
    /// `true` for `p`, `false` for `¬p`.
    pub positive: bool,
}

impl Literal {
    /// Create a literal for `symbol` at `location` with the given polarity.
    pub const fn new(symbol: Symbol, location: Location, positive: bool) -> Self {
        Self {
            proposition: Proposition::new(symbol, location),
            positive,
        }
    }

    /// The literal with the opposite polarity.
    pub const fn negated(self) -> Self {
        Self {
            proposition: self.proposition,
            positive: !self.positive,
        }
    }
}

impl core::fmt::Display for Literal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.positive {
            write!(f, "{}", self.proposition)
        } else {
            write!(f, "¬{}", self.proposition)
        }
    }
}

impl FromStr for Literal {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (positive, body) = match s.strip_prefix(['¬', '!', '~']) {
            Some(rest) => (false, rest.trim_start()),
            None => (true, s),
        };

        let mut chars = body.chars();
        let symbol_char = chars.next().ok_or(LogicError::EmptyLiteral)?;
        let symbol = Symbol::from_char(symbol_char).ok_or(LogicError::UnknownSymbol(symbol_char))?;

        let malformed = || LogicError::MalformedLocation(s.to_owned());
        let coords = chars
            .as_str()
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;
        let (x, y) = coords.split_once(',').ok_or_else(malformed)?;
        let x = x.trim().parse::<i32>().ok().ok_or_else(malformed)?;
        let y = y.trim().parse::<i32>().ok().ok_or_else(malformed)?;

        Ok(Self::new(symbol, Location::new(x, y), positive))
    }
}

// ---------------------------------------------------------------------------
// Clause
// ---------------------------------------------------------------------------

/// A disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Clause {
    /// The literals, deduplicated and ordered. Always empty when `valid`.
    literals: BTreeSet<Literal>,
    /// Set when the clause was built as a tautology.
    valid: bool,
}

impl Clause {
    /// Build a clause from literals.
    ///
    /// Repeated literals collapse into one. If both polarities of any
    /// proposition are present the result is [`Clause::valid`].
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        let literals: BTreeSet<Literal> = literals.into_iter().collect();
        if literals.iter().any(|l| literals.contains(&l.negated())) {
            return Self::valid();
        }
        Self {
            literals,
            valid: false,
        }
    }

    /// A clause holding exactly one literal.
    pub fn unit(literal: Literal) -> Self {
        Self {
            literals: BTreeSet::from([literal]),
            valid: false,
        }
    }

    /// Unit clause asserting `symbol` at `location` with the given polarity.
    pub fn fact(symbol: Symbol, location: Location, positive: bool) -> Self {
        Self::unit(Literal::new(symbol, location, positive))
    }

    /// The tautology sentinel.
    pub const fn valid() -> Self {
        Self {
            literals: BTreeSet::new(),
            valid: true,
        }
    }

    /// The empty clause (contradiction).
    pub const fn empty() -> Self {
        Self {
            literals: BTreeSet::new(),
            valid: false,
        }
    }

    /// Whether this clause is a tautology.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether this is the empty clause.
    pub fn is_empty(&self) -> bool {
        !self.valid && self.literals.is_empty()
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The single literal of a unit clause.
    pub fn as_unit(&self) -> Option<Literal> {
        if self.literals.len() == 1 {
            self.literals.first().copied()
        } else {
            None
        }
    }

    /// Iterate over the literals in order.
    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Whether the clause contains `literal`.
    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    /// Polarity of `proposition` in this clause, or `None` when absent.
    pub fn literal_value(&self, proposition: Proposition) -> Option<bool> {
        if self.literals.contains(&Literal { proposition, positive: true }) {
            Some(true)
        } else if self.literals.contains(&Literal { proposition, positive: false }) {
            Some(false)
        } else {
            None
        }
    }

    /// The negation of this clause as a set of unit clauses (one per
    /// negated literal). The negation of the empty clause is the empty set.
    pub fn negation(&self) -> impl Iterator<Item = Self> + '_ {
        self.literals.iter().map(|l| Self::unit(l.negated()))
    }

    /// Resolve two clauses.
    ///
    /// For every proposition appearing positively in one clause and
    /// negatively in the other, the resolvent is the union of both literal
    /// sets minus that proposition. Tautological resolvents are dropped.
    /// Clauses without a complementary proposition, and valid clauses,
    /// produce nothing.
    pub fn resolve(c1: &Self, c2: &Self) -> BTreeSet<Self> {
        let mut resolvents = BTreeSet::new();
        if c1.valid || c2.valid {
            return resolvents;
        }

        for literal in &c1.literals {
            if !c2.literals.contains(&literal.negated()) {
                continue;
            }
            let pivot = literal.proposition;
            let resolvent = Self::new(
                c1.literals
                    .iter()
                    .chain(c2.literals.iter())
                    .filter(|l| l.proposition != pivot)
                    .copied(),
            );
            if !resolvent.is_valid() {
                resolvents.insert(resolvent);
            }
        }

        resolvents
    }
}

impl core::fmt::Display for Clause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.valid {
            return write!(f, "⊤");
        }
        if self.literals.is_empty() {
            return write!(f, "⊥");
        }
        let mut first = true;
        for literal in &self.literals {
            if !first {
                write!(f, " ∨ ")?;
            }
            write!(f, "{literal}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Clause {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "⊤" => return Ok(Self::valid()),
            "⊥" | "" => return Ok(Self::empty()),
            _ => {}
        }
        let literals = s
            .split(['∨', '|', 'v'])
            .map(str::parse::<Literal>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(literals))
    }
}

impl From<Literal> for Clause {
    fn from(literal: Literal) -> Self {
        Self::unit(literal)
    }
}
