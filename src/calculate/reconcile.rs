//! Quarter reconciliation.
//!
//! Team quarter totals and position-level rows can disagree or be partly
//! missing. Every view that shows position goals for a quarter, a game or a
//! season goes through [`reconcile_quarter`], so they all agree.
//!
//! Tiers, first match wins:
//! 1. position rows for any of GS, GA, GD, GK (`complete` or `partial`)
//! 2. an even split of the recorded quarter scores (`estimated`)
//! 3. nothing recorded (`missing`)

use tracing::debug;

use super::normalize::{
    eligible_games, opposing_quarter_score, quarter_score, stats_by_quarter, QUARTERS,
};
use crate::models::{
    DataQuality, Game, GameId, Position, ReconciledGame, ReconciledQuarter, ScoresByGame,
    SeasonReconciliation, StatsByGame, TeamId,
};

/// Split a quarter total between two positions. The odd goal goes to the first.
fn split_even(total: u32) -> (u32, u32) {
    let second = total / 2;
    (total - second, second)
}

/// Final GS/GA/GK/GD values for one quarter of one game for one team.
pub fn reconcile_quarter(
    game_id: GameId,
    quarter: u8,
    team_id: TeamId,
    scores_by_game: &ScoresByGame,
    stats_by_game: &StatsByGame,
) -> ReconciledQuarter {
    let mut result = ReconciledQuarter {
        game_id,
        quarter,
        team_id,
        gs_goals_for: 0,
        ga_goals_for: 0,
        gk_goals_against: 0,
        gd_goals_against: 0,
        data_quality: DataQuality::Missing,
        has_valid_data: false,
    };

    // Tier 1: position-exact
    let mut grouped = stats_by_quarter(game_id, stats_by_game);
    let rows: Vec<_> = grouped
        .remove(&quarter)
        .unwrap_or_default()
        .into_iter()
        .filter(|s| s.team_id == team_id && s.position.is_tracked())
        .collect();

    if !rows.is_empty() {
        for stat in &rows {
            match stat.position {
                Position::GS => result.gs_goals_for = stat.goals_for,
                Position::GA => result.ga_goals_for = stat.goals_for,
                Position::GK => result.gk_goals_against = stat.goals_against,
                Position::GD => result.gd_goals_against = stat.goals_against,
                _ => {}
            }
        }
        result.data_quality = if rows.len() == 4 {
            DataQuality::Complete
        } else {
            DataQuality::Partial
        };
        result.has_valid_data = true;
        return result;
    }

    // Tier 2: proportional split of team totals
    let own = quarter_score(scores_by_game, game_id, quarter, team_id);
    let opposing = opposing_quarter_score(scores_by_game, game_id, quarter, team_id);
    if own.is_some() || opposing.is_some() {
        let (gs, ga) = split_even(own.unwrap_or(0));
        let (gk, gd) = split_even(opposing.unwrap_or(0));
        result.gs_goals_for = gs;
        result.ga_goals_for = ga;
        result.gk_goals_against = gk;
        result.gd_goals_against = gd;
        result.data_quality = DataQuality::Estimated;
        result.has_valid_data = true;
        return result;
    }

    // Tier 3: absent
    debug!(
        "No scores or stats for game {} Q{} team {}",
        game_id, quarter, team_id
    );
    result
}

/// Reconciled values for all four quarters of a game.
///
/// The game quality is the weakest quality among quarters that have data.
/// A game with some quarters missing is at best `partial`; a game with no
/// data at all is `missing`.
pub fn reconcile_game(
    game_id: GameId,
    team_id: TeamId,
    scores_by_game: &ScoresByGame,
    stats_by_game: &StatsByGame,
) -> ReconciledGame {
    let quarters: Vec<ReconciledQuarter> = QUARTERS
        .iter()
        .map(|&q| reconcile_quarter(game_id, q, team_id, scores_by_game, stats_by_game))
        .collect();

    let goals_for = quarters
        .iter()
        .map(|q| q.goals_for())
        .fold(0, u32::saturating_add);
    let goals_against = quarters
        .iter()
        .map(|q| q.goals_against())
        .fold(0, u32::saturating_add);

    let present: Vec<DataQuality> = quarters
        .iter()
        .filter(|q| q.has_valid_data)
        .map(|q| q.data_quality)
        .collect();
    let data_quality = match present.iter().copied().max() {
        None => DataQuality::Missing,
        Some(weakest) if present.len() < quarters.len() => weakest.weakest(DataQuality::Partial),
        Some(weakest) => weakest,
    };

    ReconciledGame {
        game_id,
        team_id,
        quarters,
        goals_for,
        goals_against,
        data_quality,
    }
}

/// Season totals over the eligible games the team took part in.
pub fn reconcile_season(
    games: &[Game],
    team_id: TeamId,
    scores_by_game: &ScoresByGame,
    stats_by_game: &StatsByGame,
) -> SeasonReconciliation {
    let mut season = SeasonReconciliation {
        team_id,
        games: Vec::new(),
        goals_for: 0,
        goals_against: 0,
        gs_goals_for: 0,
        ga_goals_for: 0,
        gk_goals_against: 0,
        gd_goals_against: 0,
        games_complete: 0,
        games_partial: 0,
        games_estimated: 0,
        games_missing: 0,
    };

    for game in eligible_games(games) {
        if !game.involves(team_id) {
            continue;
        }
        let reconciled = reconcile_game(game.id, team_id, scores_by_game, stats_by_game);

        // Parsed counts may already sit at u32::MAX
        for q in &reconciled.quarters {
            season.gs_goals_for = season.gs_goals_for.saturating_add(q.gs_goals_for);
            season.ga_goals_for = season.ga_goals_for.saturating_add(q.ga_goals_for);
            season.gk_goals_against = season.gk_goals_against.saturating_add(q.gk_goals_against);
            season.gd_goals_against = season.gd_goals_against.saturating_add(q.gd_goals_against);
        }
        season.goals_for = season.goals_for.saturating_add(reconciled.goals_for);
        season.goals_against = season.goals_against.saturating_add(reconciled.goals_against);

        match reconciled.data_quality {
            DataQuality::Complete => season.games_complete += 1,
            DataQuality::Partial => season.games_partial += 1,
            DataQuality::Estimated => season.games_estimated += 1,
            DataQuality::Missing => season.games_missing += 1,
        }
        season.games.push(reconciled);
    }

    season
}
