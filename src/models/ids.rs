//! Identifier types and derived aggregation keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Position;

/// Type alias for game IDs
pub type GameId = i64;

/// Type alias for team IDs
pub type TeamId = i64;

/// Type alias for player IDs
pub type PlayerId = i64;

/// Type alias for club IDs
pub type ClubId = i64;

/// Identity of a formation: the player in each of the seven positions.
///
/// Rendered as `GK:12|GD:4|...` in canonical position order, so two quarters
/// with the same players in the same spots produce the same key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormationKey(String);

impl FormationKey {
    /// Build a key from `(position, player)` pairs already in canonical order.
    pub fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = (Position, PlayerId)>,
    {
        let parts: Vec<String> = slots
            .into_iter()
            .map(|(position, player_id)| format!("{}:{}", position, player_id))
            .collect();
        Self(parts.join("|"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for FormationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormationKey({})", self.0)
    }
}

/// Identity of a player combination: member IDs sorted ascending, joined by `-`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombinationKey(String);

impl CombinationKey {
    /// Build a key from any ordering of player IDs.
    ///
    /// Permutations of the same set always produce the same key.
    pub fn from_players(players: &[PlayerId]) -> Self {
        let mut sorted = players.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        let parts: Vec<String> = sorted.iter().map(|id| id.to_string()).collect();
        Self(parts.join("-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CombinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CombinationKey({})", self.0)
    }
}
