//! Grid coordinates.
//!
//! A [`Location`] is an `(x, y)` pair where `x` grows to the right and `y`
//! grows downward, matching the row/column layout of a text maze. Offsets
//! use checked arithmetic and return `None` instead of wrapping, so callers
//! never see a coordinate that was not reachable by real steps.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// A cell coordinate on the maze grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Column index, growing rightward.
    pub x: i32,
    /// Row index, growing downward.
    pub y: i32,
}

impl Location {
    /// Create a location from its column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this location by `(dx, dy)`, or `None` on overflow.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// The location `distance` steps away in `direction`.
    pub fn toward(self, direction: Direction, distance: i32) -> Option<Self> {
        let (dx, dy) = direction.delta();
        self.offset(dx.checked_mul(distance)?, dy.checked_mul(distance)?)
    }

    /// The adjacent location in `direction`.
    pub fn step(self, direction: Direction) -> Option<Self> {
        self.toward(direction, 1)
    }

    /// The four orthogonal neighbours, paired with the direction that
    /// reaches them, in [`Direction::NEIGHBOR_ORDER`].
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Self)> {
        self.ring(1)
    }

    /// The four cells exactly two steps away in a straight line, in
    /// [`Direction::NEIGHBOR_ORDER`].
    pub fn two_away(self) -> impl Iterator<Item = (Direction, Self)> {
        self.ring(2)
    }

    fn ring(self, distance: i32) -> impl Iterator<Item = (Direction, Self)> {
        Direction::NEIGHBOR_ORDER
            .into_iter()
            .filter_map(move |d| self.toward(d, distance).map(|loc| (d, loc)))
    }

    /// The direction of a single orthogonal step from `self` to `other`,
    /// if the two are adjacent.
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.step(d) == Some(other))
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Location {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
