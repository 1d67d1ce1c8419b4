//! The propagation rule table.
//!
//! Each [`Rule`] is a pattern over unit facts around one cell and the facts
//! it lets the agent conclude. Rules only read the knowledge base; applying
//! their conclusions is the [`inference`](crate::inference) engine's job.
//!
//! A rule also names the domain axioms it stands for ([`Rule::axioms`]).
//! The inference engine tells them as soon as the rule's trigger holds at a
//! cell, before any conclusion is drawn there, so every conclusion the table
//! reaches by pattern matching is one resolution reaches by search.
//! [`tile_axioms`] ties the four symbols of one cell together the same way.
//!
//! Rules are evaluated in [`Rule::TABLE`] order. A rule fires at a cell when
//! its trigger literal is a unit fact there.
//!
//! ```text
//!        ?              ¬P                    .              .
//!     ? ¬1 ?   =>   ¬P ¬1 ¬P               .  2 ?   =>   .  2 1
//!        ?              ¬P                    .              .
//!
//!     ¬1                                    ¬P             ¬P
//! ¬1  2  1  ?   =>   ¬1 2 1 P              ¬P 1 ?   =>   ¬P 1 P
//!     ¬1                                    ¬P             ¬P
//! ```

use pitfall_logic::{Clause, KnowledgeBase, Literal};
use pitfall_types::{Direction, Location, Symbol};
use pitfall_world::Grid;

/// One propagation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `¬Warn1` here: no neighbour is a pit.
    ClearAroundNoWarn1,
    /// `Safe` here: no cell two steps out is a pit.
    ClearTwoAwayFromSafe,
    /// `Warn2` on a pit-free cell: a wall neighbour boxed in by walls and
    /// the frame has no pit beside it.
    IsolatedWallNotWarn1,
    /// `Warn2` with three `Safe` neighbours: the fourth is `Warn1`.
    ThreeSafeFourthWarn1,
    /// `Warn2` with three `¬Warn1` neighbours and one `Warn1`: the pit is
    /// two steps out past the `Warn1` one.
    PitBeyondLoneWarn1,
    /// `Pit` here: neighbours are `Warn1`, cells two steps out are `Warn2`.
    MarkAroundPit,
    /// `Warn1` with a `Safe` neighbour: the neighbour across is not a pit.
    ClearAcrossSafe,
    /// `Warn1` with three pit-free neighbours: the fourth is a pit.
    ThreeClearFourthPit,
}

impl Rule {
    /// Every rule, in evaluation order.
    pub const TABLE: [Self; 8] = [
        Self::ClearAroundNoWarn1,
        Self::ClearTwoAwayFromSafe,
        Self::IsolatedWallNotWarn1,
        Self::ThreeSafeFourthWarn1,
        Self::PitBeyondLoneWarn1,
        Self::MarkAroundPit,
        Self::ClearAcrossSafe,
        Self::ThreeClearFourthPit,
    ];

    /// The unit fact `(symbol, positive)` that must hold at a cell for the
    /// rule to fire there.
    pub const fn trigger(self) -> (Symbol, bool) {
        match self {
            Self::ClearAroundNoWarn1 => (Symbol::Warn1, false),
            Self::ClearTwoAwayFromSafe => (Symbol::Safe, true),
            Self::IsolatedWallNotWarn1 | Self::ThreeSafeFourthWarn1 | Self::PitBeyondLoneWarn1 => {
                (Symbol::Warn2, true)
            }
            Self::MarkAroundPit => (Symbol::Pit, true),
            Self::ClearAcrossSafe | Self::ThreeClearFourthPit => (Symbol::Warn1, true),
        }
    }

    /// Short name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClearAroundNoWarn1 => "clear_around_no_warn1",
            Self::ClearTwoAwayFromSafe => "clear_two_away_from_safe",
            Self::IsolatedWallNotWarn1 => "isolated_wall_not_warn1",
            Self::ThreeSafeFourthWarn1 => "three_safe_fourth_warn1",
            Self::PitBeyondLoneWarn1 => "pit_beyond_lone_warn1",
            Self::MarkAroundPit => "mark_around_pit",
            Self::ClearAcrossSafe => "clear_across_safe",
            Self::ThreeClearFourthPit => "three_clear_fourth_pit",
        }
    }

    /// Whether the trigger holds at `at`.
    pub fn triggered(self, kb: &KnowledgeBase, at: Location) -> bool {
        let (symbol, positive) = self.trigger();
        kb.holds(symbol, at, positive)
    }

    /// The literals this rule concludes at `at`, assuming it is triggered.
    /// Off-grid cells are never concluded about.
    pub fn conclusions(self, kb: &KnowledgeBase, grid: &Grid, at: Location) -> Vec<Literal> {
        let in_grid = |l: &Location| grid.in_bounds(*l);
        match self {
            Self::ClearAroundNoWarn1 => at
                .neighbors()
                .map(|(_, n)| n)
                .filter(in_grid)
                .map(|n| Literal::new(Symbol::Pit, n, false))
                .collect(),

            Self::ClearTwoAwayFromSafe => at
                .two_away()
                .map(|(_, n)| n)
                .filter(in_grid)
                .map(|n| Literal::new(Symbol::Pit, n, false))
                .collect(),

            Self::IsolatedWallNotWarn1 => {
                if !kb.holds(Symbol::Pit, at, false) {
                    return Vec::new();
                }
                at.neighbors()
                    .map(|(_, w)| w)
                    .filter(|&w| grid.is_wall(w))
                    .filter(|&w| w.neighbors().all(|(_, o)| o == at || !grid.is_open(o)))
                    .map(|w| Literal::new(Symbol::Warn1, w, false))
                    .collect()
            }

            Self::ThreeSafeFourthWarn1 => {
                lone_remaining(at, |n| kb.holds(Symbol::Safe, n, true))
                    .map(|(_, n)| vec![Literal::new(Symbol::Warn1, n, true)])
                    .unwrap_or_default()
            }

            Self::PitBeyondLoneWarn1 => {
                let Some((direction, n)) = lone_remaining(at, |n| kb.holds(Symbol::Warn1, n, false))
                else {
                    return Vec::new();
                };
                if !kb.holds(Symbol::Warn1, n, true) {
                    return Vec::new();
                }
                at.toward(direction, 2)
                    .filter(in_grid)
                    .map(|p| vec![Literal::new(Symbol::Pit, p, true)])
                    .unwrap_or_default()
            }

            Self::MarkAroundPit => {
                let warn1 = at
                    .neighbors()
                    .map(|(_, n)| n)
                    .filter(in_grid)
                    .map(|n| Literal::new(Symbol::Warn1, n, true));
                let warn2 = at
                    .two_away()
                    .map(|(_, n)| n)
                    .filter(in_grid)
                    .map(|n| Literal::new(Symbol::Warn2, n, true));
                warn1.chain(warn2).collect()
            }

            Self::ClearAcrossSafe => at
                .neighbors()
                .filter(|&(_, n)| kb.holds(Symbol::Safe, n, true))
                .filter_map(|(d, _)| at.step(d.opposite()))
                .filter(in_grid)
                .map(|n| Literal::new(Symbol::Pit, n, false))
                .collect(),

            Self::ThreeClearFourthPit => {
                lone_remaining(at, |n| kb.holds(Symbol::Pit, n, false))
                    .map(|(_, n)| vec![Literal::new(Symbol::Pit, n, true)])
                    .unwrap_or_default()
            }
        }
    }

    /// Clauses that make this rule's conclusions at `at` follow by
    /// resolution from its trigger and premises. They hold in every maze,
    /// so telling them early is always sound. Only in-grid cells appear.
    pub fn axioms(self, grid: &Grid, at: Location) -> Vec<Clause> {
        let in_grid = |l: &Location| grid.in_bounds(*l);
        match self {
            // A pit beside `at` would make it Warn1.
            Self::ClearAroundNoWarn1 => at
                .neighbors()
                .map(|(_, n)| n)
                .filter(in_grid)
                .map(|n| {
                    implies(
                        Literal::new(Symbol::Pit, n, true),
                        Literal::new(Symbol::Warn1, at, true),
                    )
                })
                .collect(),

            // A pit two out would stop `at` being Safe.
            Self::ClearTwoAwayFromSafe => at
                .two_away()
                .map(|(_, t)| t)
                .filter(in_grid)
                .map(|t| {
                    implies(
                        Literal::new(Symbol::Safe, at, true),
                        Literal::new(Symbol::Pit, t, false),
                    )
                })
                .collect(),

            // A boxed-in wall is Warn1 only if one of its in-grid
            // neighbours is a pit.
            Self::IsolatedWallNotWarn1 => at
                .neighbors()
                .map(|(_, w)| w)
                .filter(|&w| grid.is_wall(w))
                .filter(|&w| w.neighbors().all(|(_, o)| o == at || !grid.is_open(o)))
                .map(|w| witness(grid, Symbol::Warn1, w, w.neighbors()))
                .collect(),

            Self::ThreeSafeFourthWarn1 | Self::PitBeyondLoneWarn1 => {
                // Warn2 needs a pit two out, and a pit two out makes the
                // neighbour between them Warn1.
                let mut axioms = vec![witness(grid, Symbol::Warn2, at, at.two_away())];
                for (direction, n) in at.neighbors() {
                    let Some(beyond) = at.toward(direction, 2) else {
                        continue;
                    };
                    if in_grid(&n) && in_grid(&beyond) {
                        axioms.push(implies(
                            Literal::new(Symbol::Pit, beyond, true),
                            Literal::new(Symbol::Warn1, n, true),
                        ));
                    }
                }
                axioms
            }

            Self::MarkAroundPit => {
                let pit = Literal::new(Symbol::Pit, at, true);
                let warn1 = at
                    .neighbors()
                    .map(|(_, n)| n)
                    .filter(in_grid)
                    .map(|n| implies(pit, Literal::new(Symbol::Warn1, n, true)));
                let warn2 = at
                    .two_away()
                    .map(|(_, t)| t)
                    .filter(in_grid)
                    .map(|t| implies(pit, Literal::new(Symbol::Warn2, t, true)));
                warn1.chain(warn2).collect()
            }

            // Covered by the Safe neighbour's own two-away axioms.
            Self::ClearAcrossSafe => Vec::new(),

            Self::ThreeClearFourthPit => vec![witness(grid, Symbol::Warn1, at, at.neighbors())],
        }
    }
}

/// The four run symbols of an open cell: at least one holds, and `Safe`
/// excludes the three hazards.
pub fn tile_axioms(at: Location) -> [Clause; 4] {
    let literal = |symbol: Symbol| Literal::new(symbol, at, true);
    let safe = literal(Symbol::Safe);
    [
        Clause::new(Symbol::ALL.map(literal)),
        implies(safe, literal(Symbol::Pit).negated()),
        implies(safe, literal(Symbol::Warn1).negated()),
        implies(safe, literal(Symbol::Warn2).negated()),
    ]
}

/// `premise → conclusion` as a clause.
fn implies(premise: Literal, conclusion: Literal) -> Clause {
    Clause::new([premise.negated(), conclusion])
}

/// `symbol` at `at` only if a pit sits on one of the in-grid `cells`.
fn witness(
    grid: &Grid,
    symbol: Symbol,
    at: Location,
    cells: impl Iterator<Item = (Direction, Location)>,
) -> Clause {
    let pits = cells
        .map(|(_, c)| c)
        .filter(|c| grid.in_bounds(*c))
        .map(|c| Literal::new(Symbol::Pit, c, true));
    Clause::new(core::iter::once(Literal::new(symbol, at, false)).chain(pits))
}

impl core::fmt::Display for Rule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// If exactly three of the four neighbours of `at` satisfy `known`, the
/// fourth one.
fn lone_remaining(
    at: Location,
    known: impl Fn(Location) -> bool,
) -> Option<(Direction, Location)> {
    let mut matched = 0_u8;
    let mut rest = Vec::new();
    for (direction, n) in at.neighbors() {
        if known(n) {
            matched = matched.saturating_add(1);
        } else {
            rest.push((direction, n));
        }
    }
    match (matched, rest.as_slice()) {
        (3, &[only]) => Some(only),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pitfall_world::WorldError;

    use super::*;

    fn grid() -> Result<Grid, WorldError> {
        Grid::parse(&[
            "XXXXXXX", //
            "X.....X",
            "X.....X",
            "X.....X",
            "X.....X",
            "X.....X",
            "XXXXXXX",
        ])
    }

    fn loc(x: i32, y: i32) -> Location {
        Location::new(x, y)
    }

    fn fact(kb: &mut KnowledgeBase, symbol: Symbol, at: Location, positive: bool) {
        kb.tell(Clause::fact(symbol, at, positive));
    }

    #[test]
    fn table_order_and_triggers() {
        assert_eq!(Rule::TABLE.first(), Some(&Rule::ClearAroundNoWarn1));
        assert_eq!(Rule::MarkAroundPit.trigger(), (Symbol::Pit, true));
        assert_eq!(Rule::ThreeClearFourthPit.trigger(), (Symbol::Warn1, true));
        assert_eq!(Rule::ClearAroundNoWarn1.to_string(), "clear_around_no_warn1");
    }

    #[test]
    fn no_warn1_clears_neighbours() -> Result<(), WorldError> {
        let grid = grid()?;
        let kb = KnowledgeBase::new();
        let got = Rule::ClearAroundNoWarn1.conclusions(&kb, &grid, loc(1, 1));
        assert_eq!(got.len(), 4);
        assert!(got.contains(&Literal::new(Symbol::Pit, loc(0, 1), false)));
        assert!(got.iter().all(|l| !l.positive && l.proposition.symbol == Symbol::Pit));
        Ok(())
    }

    #[test]
    fn safe_clears_two_away_in_grid_only() -> Result<(), WorldError> {
        let grid = grid()?;
        let kb = KnowledgeBase::new();
        let got = Rule::ClearTwoAwayFromSafe.conclusions(&kb, &grid, loc(1, 1));
        assert_eq!(
            got,
            vec![
                Literal::new(Symbol::Pit, loc(3, 1), false),
                Literal::new(Symbol::Pit, loc(1, 3), false),
            ]
        );
        Ok(())
    }

    #[test]
    fn three_safe_neighbours_mark_fourth_warn1() -> Result<(), WorldError> {
        let grid = grid()?;
        let mut kb = KnowledgeBase::new();
        let at = loc(3, 3);
        fact(&mut kb, Symbol::Safe, loc(4, 3), true);
        fact(&mut kb, Symbol::Safe, loc(2, 3), true);
        fact(&mut kb, Symbol::Safe, loc(3, 4), true);
        let got = Rule::ThreeSafeFourthWarn1.conclusions(&kb, &grid, at);
        assert_eq!(got, vec![Literal::new(Symbol::Warn1, loc(3, 2), true)]);
        Ok(())
    }

    #[test]
    fn lone_warn1_places_pit_beyond() -> Result<(), WorldError> {
        let grid = grid()?;
        let mut kb = KnowledgeBase::new();
        let at = loc(3, 4);
        fact(&mut kb, Symbol::Warn1, loc(4, 4), false);
        fact(&mut kb, Symbol::Warn1, loc(2, 4), false);
        fact(&mut kb, Symbol::Warn1, loc(3, 5), false);
        let rule = Rule::PitBeyondLoneWarn1;
        assert!(rule.conclusions(&kb, &grid, at).is_empty());

        fact(&mut kb, Symbol::Warn1, loc(3, 3), true);
        assert_eq!(
            rule.conclusions(&kb, &grid, at),
            vec![Literal::new(Symbol::Pit, loc(3, 2), true)]
        );
        Ok(())
    }

    #[test]
    fn pit_marks_warnings() -> Result<(), WorldError> {
        let grid = grid()?;
        let kb = KnowledgeBase::new();
        let got = Rule::MarkAroundPit.conclusions(&kb, &grid, loc(3, 3));
        assert_eq!(got.len(), 8);
        assert!(got.contains(&Literal::new(Symbol::Warn1, loc(3, 2), true)));
        assert!(got.contains(&Literal::new(Symbol::Warn2, loc(1, 3), true)));
        Ok(())
    }

    #[test]
    fn safe_neighbour_clears_across() -> Result<(), WorldError> {
        let grid = grid()?;
        let mut kb = KnowledgeBase::new();
        fact(&mut kb, Symbol::Safe, loc(4, 3), true);
        let got = Rule::ClearAcrossSafe.conclusions(&kb, &grid, loc(3, 3));
        assert_eq!(got, vec![Literal::new(Symbol::Pit, loc(2, 3), false)]);
        Ok(())
    }

    #[test]
    fn three_clear_neighbours_leave_the_pit() -> Result<(), WorldError> {
        let grid = grid()?;
        let mut kb = KnowledgeBase::new();
        fact(&mut kb, Symbol::Pit, loc(4, 3), false);
        fact(&mut kb, Symbol::Pit, loc(2, 3), false);
        assert!(Rule::ThreeClearFourthPit.conclusions(&kb, &grid, loc(3, 3)).is_empty());
        fact(&mut kb, Symbol::Pit, loc(3, 2), false);
        assert_eq!(
            Rule::ThreeClearFourthPit.conclusions(&kb, &grid, loc(3, 3)),
            vec![Literal::new(Symbol::Pit, loc(3, 4), true)]
        );
        Ok(())
    }

    #[test]
    fn axioms_name_in_grid_cells_only() -> Result<(), WorldError> {
        let grid = grid()?;
        let corner = loc(0, 0);
        let got = Rule::ClearAroundNoWarn1.axioms(&grid, corner);
        assert_eq!(got.len(), 2);
        assert!(got.contains(&Clause::new([
            Literal::new(Symbol::Pit, loc(1, 0), false),
            Literal::new(Symbol::Warn1, corner, true),
        ])));
        assert!(Rule::ClearAcrossSafe.axioms(&grid, loc(3, 3)).is_empty());
        Ok(())
    }

    #[test]
    fn tile_axioms_tie_the_symbols_together() {
        let at = loc(2, 2);
        let mut kb = KnowledgeBase::new();
        for axiom in tile_axioms(at) {
            kb.tell(axiom);
        }
        fact(&mut kb, Symbol::Pit, at, false);
        fact(&mut kb, Symbol::Warn1, at, false);
        assert!(!kb.ask(&Clause::fact(Symbol::Safe, at, true)));
        fact(&mut kb, Symbol::Warn2, at, false);
        assert!(kb.ask(&Clause::fact(Symbol::Safe, at, true)));

        let mut hazard = KnowledgeBase::new();
        for axiom in tile_axioms(at) {
            hazard.tell(axiom);
        }
        fact(&mut hazard, Symbol::Warn2, at, true);
        assert!(hazard.ask(&Clause::fact(Symbol::Safe, at, false)));
    }

    #[test]
    fn isolated_wall_needs_pit_free_cell() -> Result<(), WorldError> {
        let boxed = Grid::parse(&["XXXXX", "X.X.X", "X...X", "XXXXX"])?;
        let at = loc(1, 2);
        let mut kb = KnowledgeBase::new();
        assert!(Rule::IsolatedWallNotWarn1.conclusions(&kb, &boxed, at).is_empty());
        fact(&mut kb, Symbol::Pit, at, false);
        // Both wall neighbours touch nothing open except `at`.
        let got = Rule::IsolatedWallNotWarn1.conclusions(&kb, &boxed, at);
        assert!(got.contains(&Literal::new(Symbol::Warn1, loc(0, 2), false)));
        assert!(got.contains(&Literal::new(Symbol::Warn1, loc(1, 3), false)));
        assert_eq!(got.len(), 2);
        Ok(())
    }
}
