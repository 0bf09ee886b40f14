//! Importance cutoff selection
//!
//! Picks the threshold that separates important terms from noise in an
//! [`ImportanceTable`]. Two strategies are available:
//!
//! - **Changepoint**: binary segmentation of the ascending importance
//!   values, returning the value at each detected shift in mean.
//! - **Cumulative**: the smallest value whose top share of the importance
//!   mass reaches a given fraction.

pub mod changepoint;
pub mod cumulative;

use crate::centrality::ImportanceTable;
use crate::errors::{LitsearchError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// How to pick the importance threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CutoffStrategy {
    /// Shifts in mean of the ascending importance values
    Changepoint {
        /// Maximum number of changepoints
        knot_num: usize,
    },
    /// Share of the total importance mass
    Cumulative {
        /// Fraction in `(0, 1]`
        percent: f64,
    },
}

impl CutoffStrategy {
    /// Build a strategy from its name and the parameter it needs
    pub fn from_parts(name: &str, percent: Option<f64>, knot_num: Option<usize>) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "changepoint" | "find_knots" => knot_num
                .map(|knot_num| Self::Changepoint { knot_num })
                .ok_or_else(|| LitsearchError::invalid_config("changepoint cutoff needs knot_num")),
            "cumulative" => percent
                .map(|percent| Self::Cumulative { percent })
                .ok_or_else(|| LitsearchError::invalid_config("cumulative cutoff needs percent")),
            _ => Err(LitsearchError::unsupported_strategy("cutoff", name)),
        }
    }

    /// Returns the strategy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Changepoint { .. } => "changepoint",
            Self::Cumulative { .. } => "cumulative",
        }
    }

    /// Check the strategy parameter
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Changepoint { .. } => Ok(()),
            Self::Cumulative { percent } => {
                if percent > 0.0 && percent <= 1.0 {
                    Ok(())
                } else {
                    Err(LitsearchError::invalid_config(format!(
                        "cumulative percent must be in (0, 1], got {percent}"
                    )))
                }
            }
        }
    }
}

/// A selected cutoff
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cutoff {
    /// Importance values at each changepoint, in ascending position order;
    /// may be empty
    Changepoints(Vec<f64>),
    /// A single threshold
    Cumulative(f64),
}

impl Cutoff {
    /// The lowest threshold this cutoff offers, if any
    ///
    /// Reducing with it keeps the most nodes.
    pub fn most_inclusive(&self) -> Option<f64> {
        match self {
            Self::Changepoints(values) => values.first().copied(),
            Self::Cumulative(value) => Some(*value),
        }
    }
}

/// Select an importance cutoff from a ranked table
#[instrument(skip(table, strategy), fields(rows = table.len(), strategy = strategy.as_str()))]
pub fn select_cutoff(table: &ImportanceTable, strategy: CutoffStrategy) -> Result<Cutoff> {
    strategy.validate()?;
    if table.is_empty() {
        return Err(LitsearchError::EmptyImportance);
    }

    let values = table.values();
    let cutoff = match strategy {
        CutoffStrategy::Changepoint { knot_num } => {
            let positions = changepoint::binary_segmentation(&values, knot_num);
            if positions.is_empty() {
                warn!(knot_num, "no changepoint found in importance values");
            }
            Cutoff::Changepoints(positions.into_iter().map(|i| values[i]).collect())
        }
        CutoffStrategy::Cumulative { percent } => {
            let value = cumulative::cumulative_cutoff(&values, percent)?
                .ok_or(LitsearchError::EmptyImportance)?;
            Cutoff::Cumulative(value)
        }
    };

    debug!(?cutoff, "selected cutoff");
    Ok(cutoff)
}
