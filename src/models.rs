//! Data models for revenue ledgers.
//!
//! A ledger is a named sequence of revenue figures. This module holds the
//! built-in ledgers, the per-ledger totals and the revenue report built
//! from them.

use crate::aggregate::{sum_of, RoundingMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What each entry of a ledger stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One entry per quarter
    Quarter,
    /// One entry per month
    Month,
    /// Unlabelled entries
    #[default]
    Other,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Quarter => write!(f, "quarter"),
            Period::Month => write!(f, "month"),
            Period::Other => write!(f, "entry"),
        }
    }
}

/// Errors raised while resolving ledgers.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("unknown ledger '{name}' (known: {known})")]
    Unknown { name: String, known: String },

    #[error("ledger '{name}': entry {index} ({value}) is not a finite number")]
    NonFinite {
        name: String,
        index: usize,
        value: f64,
    },
}

/// A named sequence of revenue figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Name used to select the ledger on the command line.
    pub name: String,
    /// Period covered by each entry.
    #[serde(default)]
    pub period: Period,
    /// Revenue figures in chronological order.
    #[serde(default)]
    pub entries: Vec<f64>,
}

impl Ledger {
    /// Creates a ledger from its parts.
    pub fn new(name: impl Into<String>, period: Period, entries: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            period,
            entries,
        }
    }

    /// Quarterly licensing revenue.
    pub fn licensing() -> Self {
        Self::new("licensing", Period::Quarter, vec![32.7, 43.8, 17.2, 21.9])
    }

    /// Monthly sales revenue.
    pub fn sales() -> Self {
        Self::new(
            "sales",
            Period::Month,
            vec![
                443.8, 987.1, 276.3, 874.2, 231.2, 435.0, 345.7, 475.1, 999.9, 347.7, 876.6,
                732.3,
            ],
        )
    }

    /// All ledgers that ship with the tool.
    pub fn builtin() -> Vec<Self> {
        vec![Self::licensing(), Self::sales()]
    }

    /// Reject entries that are NaN or infinite.
    ///
    /// `index` in the error is 1-based.
    pub fn check_finite(&self) -> Result<(), LedgerError> {
        match self.entries.iter().position(|v| !v.is_finite()) {
            Some(pos) => Err(LedgerError::NonFinite {
                name: self.name.clone(),
                index: pos + 1,
                value: self.entries[pos],
            }),
            None => Ok(()),
        }
    }

    /// Total revenue of this ledger.
    pub fn revenue(&self, mode: RoundingMode) -> f64 {
        sum_of(&self.entries, mode)
    }

    /// Computes this ledger's total.
    pub fn total(&self, mode: RoundingMode) -> LedgerTotal {
        LedgerTotal {
            name: self.name.clone(),
            period: self.period,
            entries: self.entries.len(),
            total: self.revenue(mode),
        }
    }
}

/// Look up a ledger by name, case-insensitively.
///
/// Custom ledgers shadow built-in ones of the same name.
pub fn find_ledger(name: &str, custom: &[Ledger]) -> Result<Ledger, LedgerError> {
    let builtin = Ledger::builtin();

    custom
        .iter()
        .chain(builtin.iter())
        .find(|ledger| ledger.name.eq_ignore_ascii_case(name))
        .cloned()
        .ok_or_else(|| LedgerError::Unknown {
            name: name.to_string(),
            known: known_ledgers(custom).join(", "),
        })
}

/// Names of every ledger available, in the order of [`all_ledgers`].
pub fn known_ledgers(custom: &[Ledger]) -> Vec<String> {
    all_ledgers(custom).into_iter().map(|l| l.name).collect()
}

/// Every ledger available: custom ones first, then built-ins not shadowed.
///
/// Names are unique, case-insensitively. The first ledger with a given name
/// wins, which is the one [`find_ledger`] returns.
pub fn all_ledgers(custom: &[Ledger]) -> Vec<Ledger> {
    let mut ledgers: Vec<Ledger> = Vec::new();

    for ledger in custom.iter().cloned().chain(Ledger::builtin()) {
        if !ledgers
            .iter()
            .any(|l| l.name.eq_ignore_ascii_case(&ledger.name))
        {
            ledgers.push(ledger);
        }
    }

    ledgers
}

/// Total revenue of a single ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotal {
    /// Ledger name.
    pub name: String,
    /// Period covered by each entry.
    pub period: Period,
    /// Number of entries summed.
    pub entries: usize,
    /// Ledger revenue.
    pub total: f64,
}

/// Revenue across a set of ledgers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Rounding applied to every total.
    pub rounding: RoundingMode,
    /// Per-ledger totals, in the order requested.
    pub ledgers: Vec<LedgerTotal>,
    /// Sum of the ledger totals.
    pub grand_total: f64,
}

impl RevenueReport {
    /// Builds a report over the given ledgers.
    pub fn build(ledgers: &[Ledger], mode: RoundingMode) -> Self {
        let totals: Vec<LedgerTotal> = ledgers.iter().map(|l| l.total(mode)).collect();
        let values: Vec<f64> = totals.iter().map(|t| t.total).collect();

        Self {
            generated_at: Utc::now(),
            rounding: mode,
            grand_total: sum_of(&values, mode),
            ledgers: totals,
        }
    }
}
