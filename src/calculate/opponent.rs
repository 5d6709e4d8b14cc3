//! Opponent attribution for per-opponent breakdowns.

use std::collections::HashMap;

use crate::models::{ClubId, Game, Team, TeamId};

/// Placeholder opponent name used for bye rounds.
pub const BYE_OPPONENT: &str = "Bye";

/// Maps a game to the name of the current team's opponent.
///
/// Returning `None` keeps the game out of every per-opponent breakdown while
/// it still counts toward the general rankings.
pub trait OpponentResolver {
    fn resolve(&self, game: &Game, current_team_id: TeamId) -> Option<String>;
}

impl<F> OpponentResolver for F
where
    F: Fn(&Game, TeamId) -> Option<String>,
{
    fn resolve(&self, game: &Game, current_team_id: TeamId) -> Option<String> {
        self(game, current_team_id)
    }
}

/// Whether an opponent name is the bye placeholder.
pub fn is_bye(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(BYE_OPPONENT)
}

/// Resolve through `resolver`, then drop names that must never form a bucket.
///
/// Byes and blank names are excluded whatever the resolver returns.
pub(crate) fn resolve_opponent<R>(
    resolver: &R,
    game: &Game,
    current_team_id: TeamId,
) -> Option<String>
where
    R: OpponentResolver + ?Sized,
{
    let name = resolver.resolve(game, current_team_id)?;
    let name = name.trim();
    if name.is_empty() || is_bye(name) {
        None
    } else {
        Some(name.to_string())
    }
}

/// Opponent resolver backed by team reference data.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    teams: HashMap<TeamId, Team>,
}

impl TeamDirectory {
    pub fn new(teams: &[Team]) -> Self {
        let teams = teams.iter().map(|t| (t.id, t.clone())).collect();
        Self { teams }
    }

    /// Assign a club to a team that has none recorded.
    ///
    /// A club already present in the team data is kept. Unknown teams are
    /// added under the `Team {id}` fallback name.
    pub fn with_default_club(mut self, team_id: TeamId, club_id: ClubId) -> Self {
        let team = self
            .teams
            .entry(team_id)
            .or_insert_with(|| Team::new(team_id, format!("Team {}", team_id)));
        if team.club_id.is_none() {
            team.club_id = Some(club_id);
        }
        self
    }

    pub fn name_of(&self, team_id: TeamId) -> String {
        self.teams
            .get(&team_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("Team {}", team_id))
    }

    pub fn club_of(&self, team_id: TeamId) -> Option<ClubId> {
        self.teams.get(&team_id).and_then(|t| t.club_id)
    }

    /// Whether both teams are known to belong to the same club.
    pub fn same_club(&self, a: TeamId, b: TeamId) -> bool {
        match (self.club_of(a), self.club_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}

impl OpponentResolver for TeamDirectory {
    fn resolve(&self, game: &Game, current_team_id: TeamId) -> Option<String> {
        let opponent_id = game.opponent_of(current_team_id)?;
        if self.same_club(current_team_id, opponent_id) {
            return None;
        }
        let name = self.name_of(opponent_id);
        if is_bye(&name) {
            None
        } else {
            Some(name)
        }
    }
}
