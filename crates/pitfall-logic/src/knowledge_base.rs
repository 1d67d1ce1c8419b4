//! Conjunctive-normal-form knowledge base with resolution entailment.
//!
//! The [`KnowledgeBase`] is a growing set of clauses. Callers guarantee that
//! what they tell it is consistent; nothing is checked on insert.
//!
//! [`KnowledgeBase::ask`] decides entailment by refutation: the negated
//! query is added to a working copy of the clause set, which is saturated
//! under resolution until either the empty clause appears (entailed) or no
//! pair of clauses produces anything new (not entailed).
//!
//! Saturation runs in two stages. Unit clauses go first: every resolution
//! against a unit is done up front, which strips the literals the units
//! falsify, and clauses a unit satisfies are dropped as subsumed. What is
//! left mentions only propositions no unit decides, so the units can take
//! no further part, and only that residue is saturated pairwise. Each
//! residual clause is resolved once against every clause processed before
//! it, found through a literal index: only pairs sharing a complementary
//! literal can produce a resolvent, so no pair that matters is skipped and
//! none is repeated. The universe of clauses over the propositions present
//! is finite, which bounds both stages.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use pitfall_types::{Location, Symbol};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::clause::{Clause, Literal, Proposition};

/// The agent's store of clauses about the maze.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Every clause told so far.
    clauses: BTreeSet<Clause>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub const fn new() -> Self {
        Self {
            clauses: BTreeSet::new(),
        }
    }

    /// Add a clause. Returns `true` if it was not already present.
    ///
    /// Valid clauses carry no information and are not stored.
    pub fn tell(&mut self, clause: Clause) -> bool {
        if clause.is_valid() {
            return false;
        }
        self.clauses.insert(clause)
    }

    /// Whether exactly this clause was told before. This is membership,
    /// not entailment.
    pub fn within(&self, clause: &Clause) -> bool {
        self.clauses.contains(clause)
    }

    /// Whether the unit fact `symbol` (with the given polarity) at
    /// `location` was told before.
    pub fn holds(&self, symbol: Symbol, location: Location, positive: bool) -> bool {
        self.within(&Clause::fact(symbol, location, positive))
    }

    /// What the unit clauses say about `symbol` at `location`.
    pub fn unit_value(&self, symbol: Symbol, location: Location) -> Option<bool> {
        if self.holds(symbol, location, true) {
            Some(true)
        } else if self.holds(symbol, location, false) {
            Some(false)
        } else {
            None
        }
    }

    /// Run symbols asserted false at `location` by unit clauses.
    pub fn false_at(&self, location: Location) -> BTreeSet<Symbol> {
        self.clauses
            .iter()
            .filter_map(Clause::as_unit)
            .filter(|l| !l.positive && l.proposition.location == location)
            .map(|l| l.proposition.symbol)
            .collect()
    }

    /// Number of stored clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether nothing has been told yet.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Iterate over the stored clauses.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Whether the knowledge base entails `query`.
    ///
    /// A valid query is always entailed. The empty query is entailed only
    /// by an inconsistent knowledge base. Never fails: `false` simply means
    /// the query does not follow.
    pub fn ask(&self, query: &Clause) -> bool {
        if query.is_valid() {
            return true;
        }
        if self.clauses.contains(&Clause::empty()) {
            return true;
        }

        let negated: Vec<Literal> = query.literals().copied().map(Literal::negated).collect();
        let Some(residue) = propagate_units(&self.clauses, &negated) else {
            trace!(%query, "query entailed by unit resolution");
            return true;
        };

        let mut known: BTreeSet<Clause> = residue.iter().cloned().collect();
        let mut pending: VecDeque<Clause> = residue.into_iter().collect();
        let mut processed: Vec<Clause> = Vec::new();
        let mut by_literal: BTreeMap<Literal, Vec<usize>> = BTreeMap::new();

        while let Some(given) = pending.pop_front() {
            let partners: BTreeSet<usize> = given
                .literals()
                .filter_map(|l| by_literal.get(&l.negated()))
                .flatten()
                .copied()
                .collect();

            for id in partners {
                let Some(other) = processed.get(id) else {
                    continue;
                };
                for resolvent in Clause::resolve(&given, other) {
                    if resolvent.is_empty() {
                        trace!(%query, processed = processed.len(), "query entailed");
                        return true;
                    }
                    if known.insert(resolvent.clone()) {
                        pending.push_back(resolvent);
                    }
                }
            }

            let id = processed.len();
            for literal in given.literals() {
                by_literal.entry(*literal).or_default().push(id);
            }
            processed.push(given);
        }

        trace!(%query, processed = processed.len(), "query not entailed");
        false
    }
}

/// Resolve every clause against the unit clauses of `clauses` and the
/// `extra` unit literals until no new unit appears.
///
/// Returns `None` when a contradiction turns up, otherwise the non-unit
/// clauses that no unit satisfies, each stripped of the literals the units
/// falsify.
fn propagate_units(clauses: &BTreeSet<Clause>, extra: &[Literal]) -> Option<Vec<Clause>> {
    let mut units: BTreeMap<Proposition, bool> = BTreeMap::new();
    let seeds = clauses.iter().filter_map(Clause::as_unit).chain(extra.iter().copied());
    for literal in seeds {
        if !assign(&mut units, literal) {
            return None;
        }
    }

    let mut rest: Vec<&Clause> = clauses.iter().filter(|c| c.len() > 1).collect();
    let mut reduced: Vec<Clause> = Vec::new();
    loop {
        let mut learned = false;
        let mut open: Vec<Clause> = Vec::new();
        for clause in rest.iter().copied().chain(reduced.iter()) {
            let mut remaining = Vec::new();
            let mut satisfied = false;
            for literal in clause.literals() {
                match units.get(&literal.proposition) {
                    Some(&value) if value == literal.positive => {
                        satisfied = true;
                        break;
                    }
                    Some(_) => {}
                    None => remaining.push(*literal),
                }
            }
            if satisfied {
                continue;
            }
            match remaining.as_slice() {
                [] => return None,
                [only] => {
                    if !assign(&mut units, *only) {
                        return None;
                    }
                    learned = true;
                }
                _ => open.push(Clause::new(remaining)),
            }
        }
        rest.clear();
        reduced = open;
        if !learned {
            return Some(reduced);
        }
    }
}

/// Record a unit literal. Returns `false` if its complement is already set.
fn assign(units: &mut BTreeMap<Proposition, bool>, literal: Literal) -> bool {
    units
        .insert(literal.proposition, literal.positive)
        .is_none_or(|previous| previous == literal.positive)
}
