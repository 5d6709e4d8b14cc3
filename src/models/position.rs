//! Netball court positions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the seven on-court positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    GS,
    GA,
    WA,
    C,
    WD,
    GD,
    GK,
}

impl Position {
    /// All positions in canonical order, defence to attack.
    ///
    /// Formation keys and any per-position output follow this order.
    pub const CANONICAL: [Position; 7] = [
        Position::GK,
        Position::GD,
        Position::WD,
        Position::C,
        Position::WA,
        Position::GA,
        Position::GS,
    ];

    /// Positions allowed to score.
    pub const ATTACKING: [Position; 2] = [Position::GS, Position::GA];

    /// Positions credited with goals conceded.
    pub const DEFENDING: [Position; 2] = [Position::GD, Position::GK];

    /// Index into [`Position::CANONICAL`].
    pub fn canonical_index(&self) -> usize {
        match self {
            Position::GK => 0,
            Position::GD => 1,
            Position::WD => 2,
            Position::C => 3,
            Position::WA => 4,
            Position::GA => 5,
            Position::GS => 6,
        }
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self, Position::GS | Position::GA)
    }

    pub fn is_defending(&self) -> bool {
        matches!(self, Position::GD | Position::GK)
    }

    /// Whether this position carries goal statistics at all.
    pub fn is_tracked(&self) -> bool {
        self.is_attacking() || self.is_defending()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Position::GS => "GS",
            Position::GA => "GA",
            Position::WA => "WA",
            Position::C => "C",
            Position::WD => "WD",
            Position::GD => "GD",
            Position::GK => "GK",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a position code is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown position code: {0}")]
pub struct UnknownPosition(pub String);

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GS" => Ok(Position::GS),
            "GA" => Ok(Position::GA),
            "WA" => Ok(Position::WA),
            "C" => Ok(Position::C),
            "WD" => Ok(Position::WD),
            "GD" => Ok(Position::GD),
            "GK" => Ok(Position::GK),
            _ => Err(UnknownPosition(s.to_string())),
        }
    }
}

/// Parse a comma-separated position list such as `"GS,GA"`.
pub fn parse_position_list(s: &str) -> Result<Vec<Position>, UnknownPosition> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(Position::from_str)
        .collect()
}
