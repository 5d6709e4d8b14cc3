//! Lineup formation analysis.
//!
//! A formation is the exact seven-player lineup of one quarter: the same
//! players in the same positions. Formations are aggregated across games and
//! ranked by an effectiveness score, overall and per opponent.

use std::collections::BTreeMap;

use tracing::debug;

use super::normalize::{eligible_games, game_goal_totals, quarter_groups, GoalTotals, LINEUP_SIZE};
use super::opponent::{resolve_opponent, OpponentResolver};
use super::{calculate_effectiveness, sort_by_effectiveness, win_percentage, Tally};
use crate::models::{
    FormationKey, FormationRankings, FormationResult, FormationSlot, Game, GameId, PlayerDirectory,
    PlayerId, Position, RostersByGame, StatsByGame, TeamId,
};

/// Weight applied to win rate (0-1) in the formation effectiveness score.
///
/// Puts win rate on roughly the scale of a per-quarter goal differential.
/// A display heuristic, not a fitted parameter.
pub const FORMATION_WIN_WEIGHT: f64 = 5.0;

/// Minimum quarters for a formation to be ranked across all quarters.
pub const MIN_QUARTERS_ALL: u32 = 2;

/// Minimum quarters when ranking a single quarter number.
pub const MIN_QUARTERS_SINGLE: u32 = 1;

/// Maximum formations in the general ranking.
pub const GENERAL_LIMIT: usize = 15;

/// Maximum per-opponent entries, across all opponents, before grouping.
pub const OPPONENT_POOL_LIMIT: usize = 20;

struct FormationAgg {
    lineup: [(Position, PlayerId); LINEUP_SIZE],
    quarters: u32,
    games: u32,
    wins: u32,
    goals: GoalTotals,
    last_game: Option<GameId>,
}

impl FormationAgg {
    fn new(lineup: [(Position, PlayerId); LINEUP_SIZE]) -> Self {
        Self {
            lineup,
            quarters: 0,
            games: 0,
            wins: 0,
            goals: GoalTotals::default(),
            last_game: None,
        }
    }

    /// Record one quarter. The game result is counted once per game.
    fn record_quarter(&mut self, game_id: GameId, quarter_goals: GoalTotals, won: bool) {
        self.quarters += 1;
        self.goals.add(quarter_goals);
        if self.last_game != Some(game_id) {
            self.last_game = Some(game_id);
            self.games += 1;
            if won {
                self.wins += 1;
            }
        }
    }

    fn into_result(
        self,
        key: FormationKey,
        opponent: Option<String>,
        players: &PlayerDirectory,
    ) -> FormationResult {
        let slots = self
            .lineup
            .iter()
            .map(|&(position, player_id)| FormationSlot {
                position,
                player_id,
                player_name: players.name_of(player_id),
            })
            .collect();

        FormationResult {
            key,
            slots,
            opponent,
            quarters_used: self.quarters,
            games_used: self.games,
            goals_for: self.goals.goals_for,
            goals_against: self.goals.goals_against,
            goal_differential: self.goals.differential(),
            wins: self.wins,
            win_rate: win_percentage(self.wins, self.games),
            effectiveness: calculate_effectiveness(
                self.goals,
                self.quarters,
                self.wins,
                self.games,
                FORMATION_WIN_WEIGHT,
            ),
        }
    }
}

/// Rank complete seven-player formations.
///
/// `quarter_filter` restricts the analysis to one quarter number and lowers
/// the minimum sample from two quarters to one. Quarters without a full
/// lineup are skipped. Games with no resolvable opponent still count toward
/// the general ranking.
#[allow(clippy::too_many_arguments)]
pub fn rank_formations<R>(
    games: &[Game],
    stats_by_game: &StatsByGame,
    rosters_by_game: &RostersByGame,
    players: &PlayerDirectory,
    current_team_id: TeamId,
    resolver: &R,
    quarter_filter: Option<u8>,
) -> FormationRankings
where
    R: OpponentResolver + ?Sized,
{
    let min_quarters = if quarter_filter.is_some() {
        MIN_QUARTERS_SINGLE
    } else {
        MIN_QUARTERS_ALL
    };

    let mut general: Tally<FormationKey, FormationAgg> = Tally::new();
    let mut by_opponent: Tally<(FormationKey, String), FormationAgg> = Tally::new();

    for game in eligible_games(games) {
        let won = game_goal_totals(stats_by_game, game.id, current_team_id).is_win();
        let opponent = resolve_opponent(resolver, game, current_team_id);

        for (quarter, group) in quarter_groups(game.id, stats_by_game, rosters_by_game) {
            if quarter_filter.is_some_and(|q| q != quarter) {
                continue;
            }
            let Some(lineup) = group.lineup() else {
                debug!(
                    "Skipping incomplete lineup in game {} Q{} ({} positions)",
                    game.id,
                    quarter,
                    group.roster.len()
                );
                continue;
            };

            let quarter_goals = group.goal_totals(current_team_id);
            let key = FormationKey::from_slots(lineup);

            general
                .entry_or_insert_with(&key, || FormationAgg::new(lineup))
                .record_quarter(game.id, quarter_goals, won);

            if let Some(name) = &opponent {
                by_opponent
                    .entry_or_insert_with(&(key, name.clone()), || FormationAgg::new(lineup))
                    .record_quarter(game.id, quarter_goals, won);
            }
        }
    }

    debug!(
        "Aggregated {} formations ({} opponent entries)",
        general.len(),
        by_opponent.len()
    );

    let mut ranked: Vec<FormationResult> = general
        .into_entries()
        .into_iter()
        .filter(|(_, agg)| agg.quarters >= min_quarters)
        .map(|(key, agg)| agg.into_result(key, None, players))
        .collect();
    sort_by_effectiveness(&mut ranked, |r| r.effectiveness);
    ranked.truncate(GENERAL_LIMIT);

    let mut pool: Vec<FormationResult> = by_opponent
        .into_entries()
        .into_iter()
        .filter(|(_, agg)| agg.quarters >= min_quarters)
        .map(|((key, name), agg)| agg.into_result(key, Some(name), players))
        .collect();
    sort_by_effectiveness(&mut pool, |r| r.effectiveness);
    pool.truncate(OPPONENT_POOL_LIMIT);

    let mut per_opponent: BTreeMap<String, Vec<FormationResult>> = BTreeMap::new();
    for result in pool {
        let name = result.opponent.clone().unwrap_or_default();
        per_opponent.entry(name).or_default().push(result);
    }

    FormationRankings {
        general: ranked,
        per_opponent,
    }
}
