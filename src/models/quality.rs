//! Data-quality tags for reconciled quarter values.

use serde::{Deserialize, Serialize};

/// Which reconciliation tier produced a set of values.
///
/// Variants are declared best first, so `Ord` ranks `Complete` lowest and
/// `Missing` highest; `max` over a set of qualities gives the weakest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    /// Position rows for all four tracked positions
    Complete,
    /// Position rows for some tracked positions
    Partial,
    /// Derived from team quarter totals by an even split
    Estimated,
    /// Nothing recorded
    Missing,
}

impl DataQuality {
    /// Returns true if the values came from position-level rows.
    pub fn is_exact(&self) -> bool {
        matches!(self, DataQuality::Complete | DataQuality::Partial)
    }

    /// Returns true if there is anything to show.
    pub fn has_data(&self) -> bool {
        !matches!(self, DataQuality::Missing)
    }

    /// The weaker of two qualities.
    pub fn weakest(self, other: DataQuality) -> DataQuality {
        self.max(other)
    }
}

impl std::fmt::Display for DataQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataQuality::Complete => write!(f, "complete"),
            DataQuality::Partial => write!(f, "partial"),
            DataQuality::Estimated => write!(f, "estimated"),
            DataQuality::Missing => write!(f, "missing"),
        }
    }
}
