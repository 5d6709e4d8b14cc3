//! Player combination analysis.
//!
//! For every game, every k-player subset of the players who took the court
//! is credited with that game's result. Subsets are aggregated across games
//! and ranked, overall and per opponent.
//!
//! The goals credited are the team's whole-game totals: how the team did
//! with these players involved, not what the players scored themselves.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use super::normalize::{eligible_games, game_goal_totals, roster_by_quarter, GoalTotals};
use super::opponent::{resolve_opponent, OpponentResolver};
use super::{calculate_effectiveness, sort_by_effectiveness, win_percentage, Tally};
use crate::models::{
    CombinationKey, CombinationRankings, CombinationResult, Game, GameId, OpponentCombinationResult,
    PlayerDirectory, PlayerId, Position, RostersByGame, StatsByGame, TeamId,
};

/// Weight applied to win rate (0-1) in the combination effectiveness score.
///
/// Tuned separately from the formation weight; the two are not meant to match.
pub const COMBINATION_WIN_WEIGHT: f64 = 10.0;

/// Smallest supported combination.
pub const MIN_COMBINATION_SIZE: usize = 2;

/// Largest supported combination.
pub const MAX_COMBINATION_SIZE: usize = 5;

/// Minimum distinct games for a combination to be ranked.
pub const MIN_GAMES: u32 = 2;

/// Maximum combinations in the general ranking.
pub const GENERAL_LIMIT: usize = 20;

/// Maximum per-opponent entries, before any opponent filter.
pub const OPPONENT_LIMIT: usize = 30;

/// Every `size`-element subset of `players`, each sorted ascending.
///
/// Input order and duplicates do not matter: IDs are sorted and deduplicated
/// first, so output order is lexicographic and deterministic. Returns nothing
/// when `size` is zero or larger than the pool.
pub fn enumerate_combinations(players: &[PlayerId], size: usize) -> Vec<Vec<PlayerId>> {
    let mut pool = players.to_vec();
    pool.sort_unstable();
    pool.dedup();

    let mut out = Vec::new();
    if size == 0 || size > pool.len() {
        return out;
    }

    let mut current = Vec::with_capacity(size);
    backtrack(&pool, size, 0, &mut current, &mut out);
    out
}

fn backtrack(
    pool: &[PlayerId],
    size: usize,
    start: usize,
    current: &mut Vec<PlayerId>,
    out: &mut Vec<Vec<PlayerId>>,
) {
    if current.len() == size {
        out.push(current.clone());
        return;
    }
    // Leave enough players to fill the remaining slots
    let remaining = size - current.len();
    for i in start..=pool.len() - remaining {
        current.push(pool[i]);
        backtrack(pool, size, i + 1, current, out);
        current.pop();
    }
}

/// Positions held by each player at any point in one game.
fn positions_by_player(
    game_id: GameId,
    rosters_by_game: &RostersByGame,
) -> BTreeMap<PlayerId, BTreeSet<Position>> {
    let mut held: BTreeMap<PlayerId, BTreeSet<Position>> = BTreeMap::new();
    for rows in roster_by_quarter(game_id, rosters_by_game).values() {
        for row in rows {
            held.entry(row.player_id).or_default().insert(row.position);
        }
    }
    held
}

#[derive(Default)]
struct CombinationAgg {
    games: u32,
    wins: u32,
    goals: GoalTotals,
    positions: BTreeSet<Position>,
}

impl CombinationAgg {
    fn record_game(&mut self, goals: GoalTotals, won: bool) {
        self.games += 1;
        self.goals.add(goals);
        if won {
            self.wins += 1;
        }
    }

    fn effectiveness(&self) -> f64 {
        calculate_effectiveness(
            self.goals,
            self.games,
            self.wins,
            self.games,
            COMBINATION_WIN_WEIGHT,
        )
    }
}

fn member_names(members: &[PlayerId], players: &PlayerDirectory) -> Vec<String> {
    members.iter().map(|&id| players.name_of(id)).collect()
}

/// Rank k-player combinations.
///
/// `position_filter` limits candidates to players who held one of the given
/// positions at some point in the game; `None` or an empty slice means no
/// limit. Games with fewer than `combination_size` candidates are skipped.
/// Sizes outside 2..=5 produce empty rankings.
#[allow(clippy::too_many_arguments)]
pub fn rank_combinations<R>(
    games: &[Game],
    stats_by_game: &StatsByGame,
    rosters_by_game: &RostersByGame,
    players: &PlayerDirectory,
    combination_size: usize,
    position_filter: Option<&[Position]>,
    current_team_id: TeamId,
    resolver: &R,
) -> CombinationRankings
where
    R: OpponentResolver + ?Sized,
{
    if !(MIN_COMBINATION_SIZE..=MAX_COMBINATION_SIZE).contains(&combination_size) {
        warn!(
            "Combination size {} outside {}..={}, nothing to rank",
            combination_size, MIN_COMBINATION_SIZE, MAX_COMBINATION_SIZE
        );
        return CombinationRankings::default();
    }
    let filter = position_filter.filter(|f| !f.is_empty());

    let mut general: Tally<CombinationKey, (Vec<PlayerId>, CombinationAgg)> = Tally::new();
    let mut by_opponent: Tally<(CombinationKey, String), CombinationAgg> = Tally::new();

    for game in eligible_games(games) {
        let held = positions_by_player(game.id, rosters_by_game);
        let candidates: Vec<PlayerId> = held
            .iter()
            .filter(|(_, positions)| {
                filter.map_or(true, |f| positions.iter().any(|p| f.contains(p)))
            })
            .map(|(&id, _)| id)
            .collect();

        if candidates.len() < combination_size {
            debug!(
                "Game {} has {} qualifying players, need {}",
                game.id,
                candidates.len(),
                combination_size
            );
            continue;
        }

        let goals = game_goal_totals(stats_by_game, game.id, current_team_id);
        let won = goals.is_win();
        let opponent = resolve_opponent(resolver, game, current_team_id);

        for members in enumerate_combinations(&candidates, combination_size) {
            let key = CombinationKey::from_players(&members);

            let (_, agg) =
                general.entry_or_insert_with(&key, || (members.clone(), CombinationAgg::default()));
            agg.record_game(goals, won);
            for id in &members {
                if let Some(positions) = held.get(id) {
                    agg.positions.extend(positions.iter().copied());
                }
            }

            if let Some(name) = &opponent {
                by_opponent
                    .entry_or_insert_with(&(key, name.clone()), CombinationAgg::default)
                    .record_game(goals, won);
            }
        }
    }

    debug!(
        "Aggregated {} combinations of size {}",
        general.len(),
        combination_size
    );

    let mut per_opponent: Vec<OpponentCombinationResult> = by_opponent
        .into_entries()
        .into_iter()
        .filter_map(|((key, opponent), agg)| {
            let (members, overall) = general.get(&key)?;
            if overall.games < MIN_GAMES {
                return None;
            }
            Some(OpponentCombinationResult {
                player_names: member_names(members, players),
                players: members.clone(),
                key,
                opponent,
                games_played: agg.games,
                goals_for: agg.goals.goals_for,
                goals_against: agg.goals.goals_against,
                wins: agg.wins,
                win_rate: win_percentage(agg.wins, agg.games),
                effectiveness: agg.effectiveness(),
            })
        })
        .collect();
    sort_by_effectiveness(&mut per_opponent, |r| r.effectiveness);
    per_opponent.truncate(OPPONENT_LIMIT);

    let mut ranked: Vec<CombinationResult> = general
        .into_entries()
        .into_iter()
        .filter(|(_, (_, agg))| agg.games >= MIN_GAMES)
        .map(|(key, (members, agg))| {
            let mut positions: Vec<Position> = agg.positions.iter().copied().collect();
            positions.sort_by_key(Position::canonical_index);
            CombinationResult {
                key,
                player_names: member_names(&members, players),
                players: members,
                positions,
                games_played: agg.games,
                total_goals_for: agg.goals.goals_for,
                total_goals_against: agg.goals.goals_against,
                goal_differential: agg.goals.differential(),
                wins: agg.wins,
                win_rate: win_percentage(agg.wins, agg.games),
                effectiveness: agg.effectiveness(),
            }
        })
        .collect();
    sort_by_effectiveness(&mut ranked, |r| r.effectiveness);
    ranked.truncate(GENERAL_LIMIT);

    CombinationRankings {
        general: ranked,
        per_opponent,
    }
}
