//! Game fixture model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{GameId, TeamId};

/// A scheduled or played game between two teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Unique identifier
    pub id: GameId,

    /// Home side
    pub home_team_id: TeamId,

    /// Away side
    pub away_team_id: TeamId,

    /// Whether the game has been played
    #[serde(default)]
    pub is_completed: bool,

    /// False for forfeits and similar results that must not feed statistics
    #[serde(default = "default_allows_statistics")]
    pub allows_statistics: bool,

    /// Date of the game
    pub date: NaiveDate,
}

fn default_allows_statistics() -> bool {
    true
}

impl Game {
    /// Create a completed, statistics-eligible game.
    pub fn new(id: GameId, home_team_id: TeamId, away_team_id: TeamId, date: NaiveDate) -> Self {
        Self {
            id,
            home_team_id,
            away_team_id,
            is_completed: true,
            allows_statistics: true,
            date,
        }
    }

    /// Builder method to set completion.
    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Builder method to set statistics eligibility.
    pub fn with_statistics(mut self, allows_statistics: bool) -> Self {
        self.allows_statistics = allows_statistics;
        self
    }

    /// Whether this game feeds any analysis.
    pub fn is_eligible(&self) -> bool {
        self.is_completed && self.allows_statistics
    }

    /// Whether the given team played in this game.
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// The other side, if `team_id` is exactly one of the two teams.
    pub fn opponent_of(&self, team_id: TeamId) -> Option<TeamId> {
        let is_home = self.home_team_id == team_id;
        let is_away = self.away_team_id == team_id;
        match (is_home, is_away) {
            (true, false) => Some(self.away_team_id),
            (false, true) => Some(self.home_team_id),
            _ => None,
        }
    }
}
