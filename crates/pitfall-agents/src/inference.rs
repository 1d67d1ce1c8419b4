//! The inference engine: turns observations into knowledge.
//!
//! An [`Inference`] borrows the agent's grid, knowledge base and epistemic
//! map for one round of thinking. It
//!
//! 1. perceives the observed tile ([`Inference::perceive`]),
//! 2. runs the [`Rule`] table over every interior cell until a full pass
//!    adds nothing to the knowledge base ([`Inference::propagate`]), and
//! 3. asks the knowledge base about every remaining warning cell, feeding
//!    any entailed answer back through propagation
//!    ([`Inference::consult`]).
//!
//! All knowledge enters through [`Inference::assert_true`] and
//! [`Inference::assert_false`], which keep the epistemic map in step with
//! the knowledge base. Both return early when the fact is already known,
//! which bounds their mutual recursion. A new fact also brings in the tile
//! axioms of its cell and the axioms of every rule it triggers, so the
//! knowledge base always entails what the rules go on to conclude.
//!
//! Walls take part in the knowledge base but never in the epistemic map.

use pitfall_logic::{Clause, KnowledgeBase, Literal};
use pitfall_types::{Location, Observation, Symbol};
use pitfall_world::Grid;
use tracing::debug;

use crate::epistemic::EpistemicMap;
use crate::rules::{Rule, tile_axioms};

/// One round of reasoning over borrowed agent state.
#[derive(Debug)]
pub struct Inference<'a> {
    /// The agent's view of the maze (walls, goal, start).
    grid: &'a Grid,
    /// Clauses known so far.
    kb: &'a mut KnowledgeBase,
    /// Explored, curious, warning and pit sets.
    map: &'a mut EpistemicMap,
}

impl<'a> Inference<'a> {
    /// Borrow agent state for one round.
    pub const fn new(grid: &'a Grid, kb: &'a mut KnowledgeBase, map: &'a mut EpistemicMap) -> Self {
        Self { grid, kb, map }
    }

    /// Assert a literal through [`Self::assert_true`] or
    /// [`Self::assert_false`].
    pub fn assert_literal(&mut self, literal: Literal) -> bool {
        let Literal {
            proposition,
            positive,
        } = literal;
        if positive {
            self.assert_true(proposition.symbol, proposition.location)
        } else {
            self.assert_false(proposition.symbol, proposition.location)
        }
    }

    /// Record that `symbol` holds at `location`.
    ///
    /// `Safe` rules out the three hazards; any hazard rules out `Safe`. A
    /// pit is recorded in the epistemic map and its curious neighbours are
    /// rescored. Returns `false` if the fact was already known or the
    /// location is off the grid.
    pub fn assert_true(&mut self, symbol: Symbol, location: Location) -> bool {
        if !self.grid.in_bounds(location) || !self.kb.tell(Clause::fact(symbol, location, true)) {
            return false;
        }
        self.ground(symbol, location, true);

        if symbol == Symbol::Safe {
            for other in [Symbol::Pit, Symbol::Warn1, Symbol::Warn2] {
                self.assert_false(other, location);
            }
        } else {
            self.assert_false(Symbol::Safe, location);
        }

        if symbol == Symbol::Pit && !self.grid.is_wall(location) {
            debug!(%location, "pit confirmed");
            self.map.record_pit(location);
            self.rescore_around(location);
        }
        true
    }

    /// Record that `symbol` does not hold at `location`.
    ///
    /// `¬Pit` moves the cell into curious unless it is explored. When three
    /// of the four run symbols are ruled out the cell is explored and the
    /// fourth is asserted. Returns `false` if the fact was already known or
    /// the location is off the grid.
    pub fn assert_false(&mut self, symbol: Symbol, location: Location) -> bool {
        if !self.grid.in_bounds(location) || !self.kb.tell(Clause::fact(symbol, location, false)) {
            return false;
        }
        self.ground(symbol, location, false);
        if self.grid.is_wall(location) {
            return true;
        }

        if symbol == Symbol::Pit && !self.map.is_explored(location) {
            let score = self.promise(location);
            self.map.make_curious(location, score);
        }

        let ruled_out = self.kb.false_at(location);
        if ruled_out.len() != 3 {
            return true;
        }
        if let Some(last) = Symbol::ALL.into_iter().find(|s| !ruled_out.contains(s)) {
            debug!(%location, symbol = %last, "determined by elimination");
            self.explore(location);
            self.assert_true(last, location);
        }
        true
    }

    /// Mark `location` explored and sort its untracked open neighbours into
    /// curious (known pit-free) or warning.
    pub fn explore(&mut self, location: Location) {
        if !self.grid.is_open(location) {
            return;
        }
        self.map.mark_explored(location);
        for (_, n) in location.neighbors() {
            if !self.grid.is_open(n) || self.map.is_tracked(n) {
                continue;
            }
            if self.kb.holds(Symbol::Pit, n, false) {
                let score = self.promise(n);
                self.map.make_curious(n, score);
            } else {
                self.map.add_warning(n);
            }
        }
        self.rescore_around(location);
    }

    /// Take in the tile observed at a location.
    ///
    /// The tile is asserted, along with the negation of every symbol that
    /// would have been displayed in its place. A warning tile also tells the
    /// knowledge base which cells could hold the pit behind it.
    pub fn perceive(&mut self, observation: &Observation) {
        let Observation { location, tile } = *observation;
        debug!(%location, %tile, "perceive");

        self.assert_true(tile, location);
        for &outranked in tile.outranking() {
            self.assert_false(outranked, location);
        }

        let suspects: Vec<Location> = match tile {
            Symbol::Warn1 => location.neighbors().map(|(_, n)| n).collect(),
            Symbol::Warn2 => location.two_away().map(|(_, n)| n).collect(),
            Symbol::Pit | Symbol::Safe => Vec::new(),
        };
        let suspects: Vec<Location> = suspects
            .into_iter()
            .filter(|&n| self.grid.is_open(n))
            .collect();
        match suspects.as_slice() {
            [] => {}
            [only] => {
                self.assert_true(Symbol::Pit, *only);
            }
            _ => {
                self.kb.tell(Clause::new(
                    suspects.iter().map(|&n| Literal::new(Symbol::Pit, n, true)),
                ));
            }
        }

        self.explore(location);
    }

    /// Run the rule table over every interior cell, in row-major order,
    /// until a full pass adds no clause. Returns the number of passes.
    pub fn propagate(&mut self) -> usize {
        let cells: Vec<Location> = self.grid.interior().collect();
        let mut passes = 0_usize;
        loop {
            passes = passes.saturating_add(1);
            let before = self.kb.len();
            for &at in &cells {
                for rule in Rule::TABLE {
                    if !rule.triggered(self.kb, at) {
                        continue;
                    }
                    let mut fresh = 0_usize;
                    for literal in rule.conclusions(self.kb, self.grid, at) {
                        if self.assert_literal(literal) {
                            fresh = fresh.saturating_add(1);
                        }
                    }
                    if fresh > 0 {
                        debug!(%rule, %at, fresh, "rule fired");
                    }
                }
            }
            if self.kb.len() == before {
                return passes;
            }
        }
    }

    /// Ask the knowledge base whether each warning cell is or is not a pit,
    /// assert what it entails, and propagate. Repeats until a round settles
    /// nothing. Returns the number of cells settled.
    pub fn consult(&mut self) -> usize {
        let mut settled = 0_usize;
        loop {
            let open: Vec<Location> = self
                .map
                .warning()
                .iter()
                .copied()
                .filter(|&l| self.kb.unit_value(Symbol::Pit, l).is_none())
                .collect();

            let mut changed = false;
            for location in open {
                let deduced = if self.kb.ask(&Clause::fact(Symbol::Pit, location, true)) {
                    Some(true)
                } else if self.kb.ask(&Clause::fact(Symbol::Pit, location, false)) {
                    Some(false)
                } else {
                    None
                };
                let Some(pit) = deduced else {
                    continue;
                };
                debug!(%location, pit, "entailed by knowledge base");
                let fresh = if pit {
                    self.assert_true(Symbol::Pit, location)
                } else {
                    self.assert_false(Symbol::Pit, location)
                };
                if fresh {
                    settled = settled.saturating_add(1);
                    changed = true;
                }
            }

            if !changed {
                return settled;
            }
            self.propagate();
        }
    }

    /// Perceive, propagate and consult: everything one observation warrants.
    pub fn absorb(&mut self, observation: &Observation) {
        self.perceive(observation);
        self.propagate();
        self.consult();
    }

    /// Tell the axioms a new fact brings in: the tile axioms of an open
    /// cell, and those of every rule the fact triggers there.
    fn ground(&mut self, symbol: Symbol, location: Location, positive: bool) {
        if self.grid.is_open(location) {
            for axiom in tile_axioms(location) {
                self.kb.tell(axiom);
            }
        }
        for rule in Rule::TABLE {
            if rule.trigger() != (symbol, positive) {
                continue;
            }
            for axiom in rule.axioms(self.grid, location) {
                self.kb.tell(axiom);
            }
        }
    }

    /// Number of open, unexplored, not-known-pit neighbours of `location`.
    fn promise(&self, location: Location) -> u8 {
        let count = location
            .neighbors()
            .filter(|&(_, n)| {
                self.grid.is_open(n)
                    && !self.map.is_explored(n)
                    && !self.kb.holds(Symbol::Pit, n, true)
            })
            .count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    /// Recompute the promise score of every curious neighbour of `location`.
    fn rescore_around(&mut self, location: Location) {
        for (_, n) in location.neighbors() {
            if self.map.promise(n).is_some() {
                let score = self.promise(n);
                self.map.set_promise(n, score);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pitfall_types::Cell;
    use pitfall_world::WorldError;

    use super::*;

    fn open_grid() -> Result<Grid, WorldError> {
        Grid::parse(&[
            "XXXXXXX", //
            "X..G..X",
            "X.....X",
            "X.....X",
            "X.....X",
            "X..@..X",
            "XXXXXXX",
        ])
    }

    fn loc(x: i32, y: i32) -> Location {
        Location::new(x, y)
    }

    /// Facts that make `rule` fire at the returned cell, told the way the
    /// agent tells them, with walls known pit-free.
    fn trigger_state(rule: Rule) -> Result<(Grid, KnowledgeBase, Location), WorldError> {
        let grid = match rule {
            Rule::IsolatedWallNotWarn1 => Grid::parse(&["XXXXX", "X.X.X", "X...X", "XXXXX"])?,
            _ => open_grid()?,
        };
        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        let walls: Vec<Location> = grid.find(Cell::Wall).collect();
        for wall in walls {
            inf.assert_false(Symbol::Pit, wall);
        }

        let at = match rule {
            Rule::ClearAroundNoWarn1 => {
                inf.assert_false(Symbol::Warn1, loc(3, 3));
                loc(3, 3)
            }
            Rule::ClearTwoAwayFromSafe => {
                inf.assert_true(Symbol::Safe, loc(3, 3));
                loc(3, 3)
            }
            Rule::IsolatedWallNotWarn1 => {
                inf.assert_false(Symbol::Pit, loc(1, 2));
                inf.assert_true(Symbol::Warn2, loc(1, 2));
                loc(1, 2)
            }
            Rule::ThreeSafeFourthWarn1 => {
                for safe in [loc(4, 3), loc(2, 3), loc(3, 4)] {
                    inf.assert_true(Symbol::Safe, safe);
                }
                inf.assert_true(Symbol::Warn2, loc(3, 3));
                loc(3, 3)
            }
            Rule::PitBeyondLoneWarn1 => {
                for clear in [loc(4, 4), loc(2, 4), loc(3, 5)] {
                    inf.assert_false(Symbol::Warn1, clear);
                }
                inf.assert_true(Symbol::Warn1, loc(3, 3));
                inf.assert_true(Symbol::Warn2, loc(3, 4));
                loc(3, 4)
            }
            Rule::MarkAroundPit => {
                inf.assert_true(Symbol::Pit, loc(3, 3));
                loc(3, 3)
            }
            Rule::ClearAcrossSafe => {
                inf.assert_true(Symbol::Safe, loc(4, 3));
                inf.assert_true(Symbol::Warn1, loc(3, 3));
                loc(3, 3)
            }
            Rule::ThreeClearFourthPit => {
                for clear in [loc(4, 3), loc(2, 3), loc(3, 2)] {
                    inf.assert_false(Symbol::Pit, clear);
                }
                inf.assert_true(Symbol::Warn1, loc(3, 3));
                loc(3, 3)
            }
        };
        Ok((grid, kb, at))
    }

    #[test]
    fn every_rule_conclusion_follows_by_resolution() -> Result<(), WorldError> {
        for rule in Rule::TABLE {
            let (grid, kb, at) = trigger_state(rule)?;
            assert!(rule.triggered(&kb, at), "{rule} should fire at {at}");
            let concluded = rule.conclusions(&kb, &grid, at);
            assert!(!concluded.is_empty(), "{rule} concluded nothing at {at}");
            for literal in concluded {
                let query = Clause::unit(literal);
                assert!(!kb.within(&query), "{rule}: {literal} was already told");
                assert!(kb.ask(&query), "{rule}: {literal} does not follow");
            }
        }
        Ok(())
    }

    #[test]
    fn no_warn1_is_enough_for_resolution() -> Result<(), WorldError> {
        let grid = open_grid()?;
        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        inf.assert_false(Symbol::Warn1, loc(3, 3));
        for n in [loc(4, 3), loc(2, 3), loc(3, 4), loc(3, 2)] {
            assert!(kb.ask(&Clause::fact(Symbol::Pit, n, false)), "{n} should be pit-free");
        }
        assert!(!kb.ask(&Clause::fact(Symbol::Pit, loc(3, 3), false)));
        Ok(())
    }

    #[test]
    fn elimination_forces_the_fourth_symbol() -> Result<(), WorldError> {
        let grid = open_grid()?;
        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        let at = loc(2, 2);
        inf.assert_false(Symbol::Pit, at);
        inf.assert_false(Symbol::Safe, at);
        inf.assert_false(Symbol::Warn1, at);
        inf.propagate();
        assert!(kb.holds(Symbol::Warn2, at, true));
        assert!(kb.ask(&Clause::fact(Symbol::Warn2, at, true)));
        assert!(map.is_explored(at));
        Ok(())
    }

    #[test]
    fn safe_rules_out_hazards() -> Result<(), WorldError> {
        let grid = open_grid()?;
        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        assert!(inf.assert_true(Symbol::Safe, loc(3, 3)));
        assert!(!inf.assert_true(Symbol::Safe, loc(3, 3)));
        assert_eq!(kb.false_at(loc(3, 3)).len(), 3);
        assert!(map.is_explored(loc(3, 3)));
        Ok(())
    }

    #[test]
    fn off_grid_is_ignored() -> Result<(), WorldError> {
        let grid = open_grid()?;
        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        assert!(!inf.assert_true(Symbol::Pit, loc(-1, 3)));
        assert!(!inf.assert_false(Symbol::Pit, loc(3, 40)));
        assert!(kb.is_empty());
        Ok(())
    }

    #[test]
    fn walls_stay_out_of_the_map() -> Result<(), WorldError> {
        let grid = open_grid()?;
        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        inf.assert_false(Symbol::Pit, loc(0, 3));
        inf.assert_false(Symbol::Warn1, loc(0, 3));
        inf.assert_false(Symbol::Warn2, loc(0, 3));
        assert!(!map.is_tracked(loc(0, 3)));
        assert!(!kb.holds(Symbol::Safe, loc(0, 3), true));
        Ok(())
    }

    #[test]
    fn safe_start_clears_its_surroundings() -> Result<(), WorldError> {
        let grid = open_grid()?;
        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        inf.absorb(&Observation::new(loc(3, 5), Symbol::Safe));

        assert!(map.is_explored(loc(3, 5)));
        for n in [loc(2, 5), loc(4, 5), loc(3, 4), loc(3, 3), loc(1, 5), loc(5, 5)] {
            assert!(kb.holds(Symbol::Pit, n, false), "{n} should be pit-free");
            assert!(map.promise(n).is_some(), "{n} should be curious");
        }
        assert!(map.warning().is_empty());
        Ok(())
    }

    #[test]
    fn warn2_start_leaves_warnings() -> Result<(), WorldError> {
        let grid = open_grid()?;
        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        inf.absorb(&Observation::new(loc(3, 5), Symbol::Warn2));

        // Warn2 rules out Warn1, so every neighbour is pit-free.
        assert!(kb.holds(Symbol::Warn1, loc(3, 5), false));
        assert!(kb.holds(Symbol::Pit, loc(3, 4), false));
        assert!(map.promise(loc(3, 4)).is_some());
        // The pit is two cells up, left or right.
        assert!(kb.ask(&Clause::new([
            Literal::new(Symbol::Pit, loc(3, 3), true),
            Literal::new(Symbol::Pit, loc(1, 5), true),
            Literal::new(Symbol::Pit, loc(5, 5), true),
        ])));
        assert!(!kb.ask(&Clause::fact(Symbol::Pit, loc(3, 3), true)));
        Ok(())
    }

    #[test]
    fn consultation_settles_a_cornered_pit() -> Result<(), WorldError> {
        let grid = open_grid()?;
        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        // Warn2 at the start puts the pit at (1,5), (5,5) or (3,3). Safe
        // tiles above the first two clear them; no single rule pins the pit
        // but the knowledge base entails it once (3,3) is a warning cell.
        inf.absorb(&Observation::new(loc(3, 5), Symbol::Warn2));
        inf.absorb(&Observation::new(loc(1, 4), Symbol::Safe));
        inf.absorb(&Observation::new(loc(5, 4), Symbol::Safe));
        assert!(!kb.holds(Symbol::Pit, loc(3, 3), true));
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        inf.absorb(&Observation::new(loc(2, 3), Symbol::Warn1));

        assert!(kb.holds(Symbol::Pit, loc(3, 3), true));
        assert!(map.is_pit(loc(3, 3)));
        Ok(())
    }

    #[test]
    fn explored_is_monotone() -> Result<(), WorldError> {
        let grid = open_grid()?;
        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        inf.absorb(&Observation::new(loc(3, 5), Symbol::Warn2));
        let before = map.explored().clone();
        let mut inf = Inference::new(&grid, &mut kb, &mut map);
        inf.absorb(&Observation::new(loc(3, 4), Symbol::Warn1));
        assert!(before.is_subset(map.explored()));
        for l in map.explored() {
            assert!(map.promise(*l).is_none());
            assert!(!map.is_warning(*l));
        }
        Ok(())
    }
}
