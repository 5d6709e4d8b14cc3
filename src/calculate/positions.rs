//! Position effectiveness: average goals per game for GS, GA, GD and GK.

use tracing::debug;

use super::normalize::{eligible_games, stats_by_quarter, QUARTERS};
use super::reconcile::reconcile_quarter;
use crate::models::{
    DataQuality, Game, Position, PositionAverages, ScoresByGame, StatsByGame, TeamId,
};

/// Per-game totals for the four tracked positions.
#[derive(Debug, Clone, Copy, Default)]
struct PositionTotals {
    gs: u64,
    ga: u64,
    gd: u64,
    gk: u64,
}

impl PositionTotals {
    fn is_zero(&self) -> bool {
        self.gs == 0 && self.ga == 0 && self.gd == 0 && self.gk == 0
    }

    fn add(&mut self, other: PositionTotals) {
        self.gs += other.gs;
        self.ga += other.ga;
        self.gd += other.gd;
        self.gk += other.gk;
    }

    fn into_averages(self, games: u32, games_estimated: u32) -> PositionAverages {
        let avg = |total: u64| {
            if games == 0 {
                0.0
            } else {
                total as f64 / games as f64
            }
        };
        let gs_avg = avg(self.gs);
        let ga_avg = avg(self.ga);
        let gd_avg = avg(self.gd);
        let gk_avg = avg(self.gk);

        PositionAverages {
            gs_avg,
            ga_avg,
            gd_avg,
            gk_avg,
            attacking_total: gs_avg + ga_avg,
            defending_total: gd_avg + gk_avg,
            games_with_position_stats: games,
            games_estimated,
        }
    }
}

/// Average goals per game by position over the eligible games.
///
/// GS and GA contribute goals scored, GD and GK goals conceded. A game only
/// enters the denominator when one of those four produced a non-zero value;
/// games with no stat rows are skipped entirely. Never fails: no data gives
/// all zeros with `games_with_position_stats == 0`.
pub fn compute_position_averages(
    games: &[Game],
    stats_by_game: &StatsByGame,
    team_id: TeamId,
) -> PositionAverages {
    let mut season = PositionTotals::default();
    let mut counted = 0u32;

    for game in eligible_games(games) {
        let mut totals = PositionTotals::default();
        for stats in stats_by_quarter(game.id, stats_by_game).values() {
            for stat in stats.iter().filter(|s| s.team_id == team_id) {
                match stat.position {
                    Position::GS => totals.gs += stat.goals_for as u64,
                    Position::GA => totals.ga += stat.goals_for as u64,
                    Position::GD => totals.gd += stat.goals_against as u64,
                    Position::GK => totals.gk += stat.goals_against as u64,
                    _ => {}
                }
            }
        }

        if totals.is_zero() {
            debug!("Game {} has no position stats for team {}", game.id, team_id);
            continue;
        }
        season.add(totals);
        counted += 1;
    }

    season.into_averages(counted, 0)
}

/// Position averages with the reconciliation fallback applied per quarter.
///
/// Quarters without position rows borrow an even split of the team quarter
/// scores, so games recorded only at team level still contribute. Games where
/// any quarter was estimated are counted in `games_estimated`.
pub fn compute_position_averages_reconciled(
    games: &[Game],
    scores_by_game: &ScoresByGame,
    stats_by_game: &StatsByGame,
    team_id: TeamId,
) -> PositionAverages {
    let mut season = PositionTotals::default();
    let mut counted = 0u32;
    let mut estimated = 0u32;

    for game in eligible_games(games) {
        let mut totals = PositionTotals::default();
        let mut any_estimated = false;

        for quarter in QUARTERS {
            let q = reconcile_quarter(game.id, quarter, team_id, scores_by_game, stats_by_game);
            if !q.has_valid_data {
                continue;
            }
            any_estimated |= q.data_quality == DataQuality::Estimated;
            totals.add(PositionTotals {
                gs: q.gs_goals_for as u64,
                ga: q.ga_goals_for as u64,
                gd: q.gd_goals_against as u64,
                gk: q.gk_goals_against as u64,
            });
        }

        if totals.is_zero() {
            continue;
        }
        season.add(totals);
        counted += 1;
        if any_estimated {
            estimated += 1;
        }
    }

    season.into_averages(counted, estimated)
}
