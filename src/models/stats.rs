//! Derived analytics models.
//!
//! Plain serializable records returned by the analyzers. Nothing here refers
//! back into the engine, so a rendering layer can format them directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CombinationKey, DataQuality, FormationKey, GameId, PlayerId, Position, TeamId};

/// Average goals per game credited to each tracked position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionAverages {
    pub gs_avg: f64,
    pub ga_avg: f64,
    pub gd_avg: f64,
    pub gk_avg: f64,

    /// `gs_avg + ga_avg`
    pub attacking_total: f64,

    /// `gd_avg + gk_avg`
    pub defending_total: f64,

    /// Denominator of every average. Zero means "no data".
    pub games_with_position_stats: u32,

    /// Games whose values came from team totals rather than position rows
    #[serde(default)]
    pub games_estimated: u32,
}

impl PositionAverages {
    pub fn has_data(&self) -> bool {
        self.games_with_position_stats > 0
    }
}

/// One player in one position of a formation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationSlot {
    pub position: Position,
    pub player_id: PlayerId,
    pub player_name: String,
}

/// Aggregated outcome of a seven-player formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationResult {
    pub key: FormationKey,

    /// Slots in canonical position order
    pub slots: Vec<FormationSlot>,

    /// Set on per-opponent entries only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,

    pub quarters_used: u32,
    pub games_used: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_differential: i64,
    pub wins: u32,

    /// Percentage of games used that were won (0 to 100)
    pub win_rate: f64,

    pub effectiveness: f64,
}

/// Formation rankings, overall and per opponent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormationRankings {
    pub general: Vec<FormationResult>,
    pub per_opponent: BTreeMap<String, Vec<FormationResult>>,
}

/// Aggregated outcome of games in which a set of players all took the court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationResult {
    pub key: CombinationKey,

    /// Member IDs, ascending
    pub players: Vec<PlayerId>,

    /// Member names, same order as `players`
    pub player_names: Vec<String>,

    /// Every position any member played in the counted games, canonical order
    pub positions: Vec<Position>,

    pub games_played: u32,

    /// Whole-game team totals, not the members' own contribution
    pub total_goals_for: u32,
    pub total_goals_against: u32,
    pub goal_differential: i64,
    pub wins: u32,

    /// Percentage of games played that were won (0 to 100)
    pub win_rate: f64,

    pub effectiveness: f64,
}

/// A combination's record against a single opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentCombinationResult {
    pub key: CombinationKey,
    pub players: Vec<PlayerId>,
    pub player_names: Vec<String>,
    pub opponent: String,
    pub games_played: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub effectiveness: f64,
}

/// Combination rankings, overall and per opponent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinationRankings {
    pub general: Vec<CombinationResult>,
    pub per_opponent: Vec<OpponentCombinationResult>,
}

impl CombinationRankings {
    /// Per-opponent entries for one opponent (case-insensitive), in ranked order.
    pub fn for_opponent(&self, opponent: &str) -> Vec<&OpponentCombinationResult> {
        self.per_opponent
            .iter()
            .filter(|r| r.opponent.eq_ignore_ascii_case(opponent))
            .collect()
    }
}

/// Final position values for one quarter after reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledQuarter {
    pub game_id: GameId,
    pub quarter: u8,
    pub team_id: TeamId,
    pub gs_goals_for: u32,
    pub ga_goals_for: u32,
    pub gk_goals_against: u32,
    pub gd_goals_against: u32,
    pub data_quality: DataQuality,
    pub has_valid_data: bool,
}

impl ReconciledQuarter {
    pub fn goals_for(&self) -> u32 {
        self.gs_goals_for.saturating_add(self.ga_goals_for)
    }

    pub fn goals_against(&self) -> u32 {
        self.gk_goals_against.saturating_add(self.gd_goals_against)
    }
}

/// Reconciled values for all four quarters of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledGame {
    pub game_id: GameId,
    pub team_id: TeamId,
    pub quarters: Vec<ReconciledQuarter>,
    pub goals_for: u32,
    pub goals_against: u32,

    /// Weakest quality among quarters with data, at best `Partial` when some
    /// quarters have none
    pub data_quality: DataQuality,
}

/// Season totals built from the same reconciled quarters as the game views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonReconciliation {
    pub team_id: TeamId,
    pub games: Vec<ReconciledGame>,
    pub goals_for: u32,
    pub goals_against: u32,
    pub gs_goals_for: u32,
    pub ga_goals_for: u32,
    pub gk_goals_against: u32,
    pub gd_goals_against: u32,
    pub games_complete: u32,
    pub games_partial: u32,
    pub games_estimated: u32,
    pub games_missing: u32,
}
