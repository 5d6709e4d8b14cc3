//! Raw per-game score, statistic and roster records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{lenient, GameId, PlayerId, Position, TeamId};

/// A team's score for one quarter of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterScore {
    pub game_id: GameId,
    pub team_id: TeamId,
    #[serde(deserialize_with = "lenient::quarter")]
    pub quarter: u8,
    #[serde(default, deserialize_with = "lenient::count")]
    pub score: u32,
}

impl QuarterScore {
    pub fn new(game_id: GameId, team_id: TeamId, quarter: u8, score: u32) -> Self {
        Self {
            game_id,
            team_id,
            quarter,
            score,
        }
    }
}

/// Goals credited to one position for one quarter.
///
/// By convention only GS/GA rows carry `goals_for` and only GD/GK rows carry
/// `goals_against`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStat {
    pub game_id: GameId,
    pub team_id: TeamId,
    #[serde(deserialize_with = "lenient::quarter")]
    pub quarter: u8,
    pub position: Position,
    #[serde(default, deserialize_with = "lenient::count")]
    pub goals_for: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub goals_against: u32,
}

impl PositionStat {
    pub fn new(game_id: GameId, team_id: TeamId, quarter: u8, position: Position) -> Self {
        Self {
            game_id,
            team_id,
            quarter,
            position,
            goals_for: 0,
            goals_against: 0,
        }
    }

    /// Builder method to set goals scored.
    pub fn with_goals_for(mut self, goals_for: u32) -> Self {
        self.goals_for = goals_for;
        self
    }

    /// Builder method to set goals conceded.
    pub fn with_goals_against(mut self, goals_against: u32) -> Self {
        self.goals_against = goals_against;
        self
    }
}

/// The player who took a position for one quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterAssignment {
    pub game_id: GameId,
    #[serde(deserialize_with = "lenient::quarter")]
    pub quarter: u8,
    pub position: Position,
    pub player_id: PlayerId,
}

impl RosterAssignment {
    pub fn new(game_id: GameId, quarter: u8, position: Position, player_id: PlayerId) -> Self {
        Self {
            game_id,
            quarter,
            position,
            player_id,
        }
    }
}

/// Quarter scores grouped by game.
pub type ScoresByGame = HashMap<GameId, Vec<QuarterScore>>;

/// Position statistics grouped by game.
pub type StatsByGame = HashMap<GameId, Vec<PositionStat>>;

/// Roster assignments grouped by game.
pub type RostersByGame = HashMap<GameId, Vec<RosterAssignment>>;
