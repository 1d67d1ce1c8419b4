//! Route planning over the agent's belief.
//!
//! Edge costs come from [`CostConfig`] and can be negative, so neither A*
//! nor textbook Dijkstra applies: a cell popped from the queue is not final,
//! and a cycle through curious cells would lower a path's cost forever.
//!
//! The [`Planner`] runs a label-correcting search instead. Each label is an
//! immutable `(cell, cost, parent)` record. A label is created only when it
//! strictly improves the best cost seen at its cell, and never steps onto a
//! cell already on its own path, so every label is a simple path. Best
//! costs only fall, each fall is to the cost of a distinct simple path, and
//! there are finitely many of those: the search ends without any cap. The
//! queue is always drained, since with negative edges the first label to
//! reach the goal need not be the cheapest.
//!
//! Keeping one best label per cell makes the result a best-effort route,
//! not the guaranteed cheapest simple path: a label beaten at some cell may
//! have been the only one free to continue through cells the winner already
//! visited.
//!
//! Only the first step of a plan is acted on; the agent replans every tick.

use std::collections::{BTreeMap, BTreeSet};

use pitfall_types::{Direction, Location};
use pitfall_world::Grid;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cost::CostConfig;
use crate::epistemic::EpistemicMap;

/// Why a plan took the shape it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanKind {
    /// Best route found to the goal.
    Goal,
    /// The goal is unreachable; heading for the most promising curious cell.
    Frontier,
    /// Nothing curious is reachable; taking the first open step.
    Fallback,
    /// Already at the goal, or boxed in.
    Idle,
}

/// The planner's answer for one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// First step to take, if any.
    pub action: Option<Direction>,
    /// Cells from the start to the target, inclusive.
    pub path: Vec<Location>,
    /// Sum of step costs along `path`.
    pub cost: Decimal,
    /// How the plan was chosen.
    pub kind: PlanKind,
}

impl Plan {
    /// A plan that stays put.
    fn idle(at: Location) -> Self {
        Self {
            action: None,
            path: vec![at],
            cost: Decimal::ZERO,
            kind: PlanKind::Idle,
        }
    }
}

/// One search label: a simple path ending at `at`.
#[derive(Debug, Clone, Copy)]
struct Label {
    at: Location,
    cost: Decimal,
    parent: Option<usize>,
}

/// Plans over a grid, an epistemic map and a cost table.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    grid: &'a Grid,
    map: &'a EpistemicMap,
    costs: &'a CostConfig,
}

impl<'a> Planner<'a> {
    /// Create a planner.
    pub const fn new(grid: &'a Grid, map: &'a EpistemicMap, costs: &'a CostConfig) -> Self {
        Self { grid, map, costs }
    }

    /// Cost of stepping onto `location`.
    pub fn step_cost(&self, location: Location) -> Decimal {
        self.costs.cost_of(self.map.classify(location))
    }

    /// Plan from `start` toward `goal`.
    ///
    /// Never fails. If the goal cannot be reached the plan heads for the
    /// reached curious cell with the highest promise score (ties: lower path
    /// cost, then lower location); failing that, the first open step in
    /// [`Direction::ALL`] order; failing that, nowhere.
    pub fn plan(&self, start: Location, goal: Location) -> Plan {
        if start == goal {
            return Plan::idle(start);
        }

        let (labels, best) = self.search(start);

        if let Some(&(_, id)) = best.get(&goal) {
            let plan = self.plan_to(start, &labels, id, PlanKind::Goal);
            debug!(%start, %goal, cost = %plan.cost, steps = plan.path.len(), "planned route to goal");
            return plan;
        }

        let frontier = best
            .iter()
            .filter(|&(&at, _)| at != start)
            .filter_map(|(&at, &(cost, id))| self.map.promise(at).map(|score| (score, cost, at, id)))
            .min_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));
        if let Some((score, _, target, id)) = frontier {
            let plan = self.plan_to(start, &labels, id, PlanKind::Frontier);
            warn!(%start, %goal, %target, score, "goal unreachable, heading for frontier");
            return plan;
        }

        let step = Direction::ALL
            .into_iter()
            .find_map(|d| start.step(d).filter(|&n| self.grid.is_open(n)).map(|n| (d, n)));
        match step {
            Some((direction, next)) => {
                warn!(%start, %goal, %direction, "no frontier reachable, taking first open step");
                Plan {
                    action: Some(direction),
                    path: vec![start, next],
                    cost: self.step_cost(next),
                    kind: PlanKind::Fallback,
                }
            }
            None => {
                warn!(%start, "boxed in");
                Plan::idle(start)
            }
        }
    }

    /// Label-correcting search from `start`. Returns the label arena and,
    /// per reached cell, its best cost and label.
    fn search(&self, start: Location) -> (Vec<Label>, BTreeMap<Location, (Decimal, usize)>) {
        let mut labels = vec![Label {
            at: start,
            cost: Decimal::ZERO,
            parent: None,
        }];
        let mut best: BTreeMap<Location, (Decimal, usize)> = BTreeMap::new();
        // (cost, label id) as a min-queue; ids break ties in creation order.
        let mut queue: BTreeSet<(Decimal, usize)> = BTreeSet::new();

        best.insert(start, (Decimal::ZERO, 0));
        queue.insert((Decimal::ZERO, 0));

        while let Some((cost, id)) = queue.pop_first() {
            let Some(&label) = labels.get(id) else {
                continue;
            };
            // Superseded by a cheaper label at the same cell.
            if best.get(&label.at).map(|&(_, current)| current) != Some(id) {
                continue;
            }

            for direction in Direction::ALL {
                let Some(next) = label.at.step(direction) else {
                    continue;
                };
                if !self.grid.is_open(next) || on_path(&labels, id, next) {
                    continue;
                }
                let Some(next_cost) = cost.checked_add(self.step_cost(next)) else {
                    continue;
                };

                let improves = best
                    .get(&next)
                    .is_none_or(|&(existing, _)| next_cost < existing);
                if improves {
                    let next_id = labels.len();
                    labels.push(Label {
                        at: next,
                        cost: next_cost,
                        parent: Some(id),
                    });
                    best.insert(next, (next_cost, next_id));
                    queue.insert((next_cost, next_id));
                }
            }
        }

        (labels, best)
    }

    /// Turn the label `id` into a plan.
    fn plan_to(&self, start: Location, labels: &[Label], id: usize, kind: PlanKind) -> Plan {
        let path = path_of(labels, id);
        let action = path.get(1).and_then(|&next| start.direction_to(next));
        let cost = labels.get(id).map_or(Decimal::ZERO, |l| l.cost);
        Plan {
            action,
            path,
            cost,
            kind,
        }
    }
}

/// Whether `location` is on the path ending at label `id`.
fn on_path(labels: &[Label], id: usize, location: Location) -> bool {
    let mut cursor = Some(id);
    while let Some(label) = cursor.and_then(|i| labels.get(i)) {
        if label.at == location {
            return true;
        }
        cursor = label.parent;
    }
    false
}

/// The cells of the path ending at label `id`, start first.
fn path_of(labels: &[Label], id: usize) -> Vec<Location> {
    let mut path = Vec::new();
    let mut cursor = Some(id);
    while let Some(label) = cursor.and_then(|i| labels.get(i)) {
        path.push(label.at);
        cursor = label.parent;
    }
    path.reverse();
    path
}
