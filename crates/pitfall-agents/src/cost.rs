//! Step costs for the planner.
//!
//! Moving onto a cell costs according to what the agent knows about it,
//! checked in this order:
//!
//! | Class              | Default              |
//! |--------------------|----------------------|
//! | confirmed pit      | 18                   |
//! | explored           | 1                    |
//! | curious, score k   | -4.0, -4.5, -4.9 ... |
//! | warning            | 10.5                 |
//! | unknown            | 0.5                  |
//!
//! Curious cells cost less than nothing, so the planner is drawn toward
//! pit-free cells that border the most unexplored ground. The defaults for
//! scores 1 through 4 and the other classes were found by sweeping cost
//! tables over a set of training mazes and keeping the best total score.
//! That table had no entry for a curious cell with score 0; -4.0 was picked
//! for it from the candidate range the sweep tried.
//!
//! Costs are [`Decimal`] so that path sums are exact and totally ordered.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::epistemic::CellClass;
use crate::error::AgentError;

/// Highest promise score a cell can have (four open neighbours).
pub const MAX_PROMISE: usize = 4;

/// Cost of stepping onto each class of cell.
///
/// Loaded from the `costs` section of the configuration file; every field
/// falls back to its calibrated default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Confirmed pit (default: 18).
    #[serde(default = "default_pit")]
    pub pit: Decimal,

    /// Explored cell (default: 1).
    #[serde(default = "default_explored")]
    pub explored: Decimal,

    /// Curious cell, indexed by promise score 0 through 4
    /// (default: -4.0, -4.5, -4.9, -4.9, -4.9).
    #[serde(default = "default_curious")]
    pub curious: [Decimal; MAX_PROMISE + 1],

    /// Warning cell (default: 10.5).
    #[serde(default = "default_warning")]
    pub warning: Decimal,

    /// Cell never reasoned about (default: 0.5).
    #[serde(default = "default_unknown")]
    pub unknown: Decimal,
}

const fn default_pit() -> Decimal {
    Decimal::from_parts(18, 0, 0, false, 0)
}

const fn default_explored() -> Decimal {
    Decimal::ONE
}

const fn default_curious() -> [Decimal; MAX_PROMISE + 1] {
    [
        Decimal::from_parts(40, 0, 0, true, 1),
        Decimal::from_parts(45, 0, 0, true, 1),
        Decimal::from_parts(49, 0, 0, true, 1),
        Decimal::from_parts(49, 0, 0, true, 1),
        Decimal::from_parts(49, 0, 0, true, 1),
    ]
}

const fn default_warning() -> Decimal {
    Decimal::from_parts(105, 0, 0, false, 1)
}

const fn default_unknown() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 1)
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            pit: default_pit(),
            explored: default_explored(),
            curious: default_curious(),
            warning: default_warning(),
            unknown: default_unknown(),
        }
    }
}

impl CostConfig {
    /// Cost of stepping onto a cell of the given class. Scores above
    /// [`MAX_PROMISE`] are priced as [`MAX_PROMISE`].
    pub fn cost_of(&self, class: CellClass) -> Decimal {
        match class {
            CellClass::Pit => self.pit,
            CellClass::Explored => self.explored,
            CellClass::Curious(score) => {
                let k = usize::from(score).min(MAX_PROMISE);
                self.curious.get(k).copied().unwrap_or(self.explored)
            }
            CellClass::Warning => self.warning,
            CellClass::Unknown => self.unknown,
        }
    }

    /// Check that the table keeps the agent away from danger.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidCosts`] if a pit is not dearer than a
    /// warning, a warning is not dearer than an explored cell, or a curious
    /// cost rises with its promise score.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.pit <= self.warning {
            return Err(AgentError::InvalidCosts {
                reason: format!("pit ({}) must cost more than warning ({})", self.pit, self.warning),
            });
        }
        if self.warning <= self.explored {
            return Err(AgentError::InvalidCosts {
                reason: format!(
                    "warning ({}) must cost more than explored ({})",
                    self.warning, self.explored
                ),
            });
        }
        for (k, pair) in self.curious.windows(2).enumerate() {
            let [lower, higher] = pair else {
                continue;
            };
            if higher > lower {
                return Err(AgentError::InvalidCosts {
                    reason: format!(
                        "curious cost rises from score {k} ({lower}) to score {} ({higher})",
                        k.saturating_add(1)
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_match_calibration() {
        let c = CostConfig::default();
        assert_eq!(c.pit, dec!(18));
        assert_eq!(c.explored, dec!(1));
        assert_eq!(c.curious, [dec!(-4.0), dec!(-4.5), dec!(-4.9), dec!(-4.9), dec!(-4.9)]);
        assert_eq!(c.warning, dec!(10.5));
        assert_eq!(c.unknown, dec!(0.5));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn classes_are_priced() {
        let c = CostConfig::default();
        assert_eq!(c.cost_of(CellClass::Pit), dec!(18));
        assert_eq!(c.cost_of(CellClass::Curious(0)), dec!(-4));
        assert_eq!(c.cost_of(CellClass::Curious(1)), dec!(-4.5));
        assert_eq!(c.cost_of(CellClass::Curious(9)), dec!(-4.9));
        assert_eq!(c.cost_of(CellClass::Warning), dec!(10.5));
        assert_eq!(c.cost_of(CellClass::Unknown), dec!(0.5));
    }

    #[test]
    fn validate_rejects_cheap_pits() {
        let c = CostConfig {
            pit: dec!(5),
            ..CostConfig::default()
        };
        assert!(matches!(c.validate(), Err(AgentError::InvalidCosts { .. })));
    }

    #[test]
    fn validate_rejects_cheap_warnings() {
        let c = CostConfig {
            warning: dec!(1),
            ..CostConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn validate_rejects_rising_curiosity() {
        let c = CostConfig {
            curious: [dec!(-4), dec!(-4.5), dec!(-3), dec!(-4.9), dec!(-4.9)],
            ..CostConfig::default()
        };
        let err = c.validate().err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("score 1"));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let parsed: Result<CostConfig, _> = serde_json::from_str(r#"{"pit": 25}"#);
        assert!(parsed.is_ok());
        let c = parsed.unwrap_or_default();
        assert_eq!(c.pit, dec!(25));
        assert_eq!(c.warning, dec!(10.5));
    }
}
