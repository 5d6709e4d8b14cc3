//! Record normalization and indexing.
//!
//! The one place that decides which games count, how raw rows are grouped
//! by quarter and how conflicting rows are resolved. Every analyzer slices
//! its input through these helpers.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::models::{
    Game, GameId, PlayerId, Position, PositionStat, RosterAssignment, RostersByGame, ScoresByGame,
    StatsByGame, TeamId,
};

/// Quarters in a game.
pub const QUARTERS: [u8; 4] = [1, 2, 3, 4];

/// Positions in a full lineup.
pub const LINEUP_SIZE: usize = 7;

/// Whether a quarter number is one of the four real quarters.
pub fn is_valid_quarter(quarter: u8) -> bool {
    QUARTERS.contains(&quarter)
}

/// Games that are completed and allowed to feed statistics, in input order.
pub fn eligible_games(games: &[Game]) -> Vec<&Game> {
    games.iter().filter(|g| g.is_eligible()).collect()
}

/// Goals scored and conceded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalTotals {
    pub goals_for: u32,
    pub goals_against: u32,
}

impl GoalTotals {
    pub fn new(goals_for: u32, goals_against: u32) -> Self {
        Self {
            goals_for,
            goals_against,
        }
    }

    /// Add one stat row. Counts only ever grow.
    pub fn add_stat(&mut self, stat: &PositionStat) {
        self.goals_for = self.goals_for.saturating_add(stat.goals_for);
        self.goals_against = self.goals_against.saturating_add(stat.goals_against);
    }

    pub fn add(&mut self, other: GoalTotals) {
        self.goals_for = self.goals_for.saturating_add(other.goals_for);
        self.goals_against = self.goals_against.saturating_add(other.goals_against);
    }

    pub fn differential(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    pub fn is_win(&self) -> bool {
        self.goals_for > self.goals_against
    }
}

/// Roster rows and stat rows for one quarter of one game.
#[derive(Debug, Clone, Default)]
pub struct QuarterGroup<'a> {
    /// At most one row per position
    pub roster: Vec<&'a RosterAssignment>,

    /// At most one row per (team, position)
    pub stats: Vec<&'a PositionStat>,
}

impl<'a> QuarterGroup<'a> {
    /// Player assigned to a position, if any.
    pub fn player_at(&self, position: Position) -> Option<PlayerId> {
        self.roster
            .iter()
            .find(|r| r.position == position)
            .map(|r| r.player_id)
    }

    /// The full lineup in canonical position order, if all seven positions are
    /// filled by seven different players.
    pub fn lineup(&self) -> Option<[(Position, PlayerId); LINEUP_SIZE]> {
        let mut slots = [(Position::GK, 0); LINEUP_SIZE];
        let mut seen = HashSet::new();
        for (slot, position) in slots.iter_mut().zip(Position::CANONICAL) {
            let player_id = self.player_at(position)?;
            if !seen.insert(player_id) {
                return None;
            }
            *slot = (position, player_id);
        }
        Some(slots)
    }

    pub fn is_complete_lineup(&self) -> bool {
        self.lineup().is_some()
    }

    /// Stat rows belonging to one team.
    pub fn team_stats(&self, team_id: TeamId) -> impl Iterator<Item = &'a PositionStat> + '_ {
        self.stats.iter().copied().filter(move |s| s.team_id == team_id)
    }

    /// Sum of one team's stat rows for the quarter.
    pub fn goal_totals(&self, team_id: TeamId) -> GoalTotals {
        let mut totals = GoalTotals::default();
        for stat in self.team_stats(team_id) {
            totals.add_stat(stat);
        }
        totals
    }
}

/// Stat rows of one game grouped by quarter.
///
/// A repeated (team, position) within a quarter keeps the first row; rows
/// outside quarters 1-4 are dropped.
pub fn stats_by_quarter(
    game_id: GameId,
    stats_by_game: &StatsByGame,
) -> BTreeMap<u8, Vec<&PositionStat>> {
    let mut grouped: BTreeMap<u8, Vec<&PositionStat>> = BTreeMap::new();
    let Some(rows) = stats_by_game.get(&game_id) else {
        return grouped;
    };

    for stat in rows {
        if !is_valid_quarter(stat.quarter) {
            debug!(
                "Ignoring stat row for game {} with quarter {}",
                game_id, stat.quarter
            );
            continue;
        }
        let bucket = grouped.entry(stat.quarter).or_default();
        if bucket
            .iter()
            .any(|s| s.team_id == stat.team_id && s.position == stat.position)
        {
            debug!(
                "Dropping duplicate {} stat for team {} in game {} Q{}",
                stat.position, stat.team_id, game_id, stat.quarter
            );
            continue;
        }
        bucket.push(stat);
    }

    grouped
}

/// Roster rows of one game grouped by quarter.
///
/// A repeated position within a quarter keeps the first row; rows outside
/// quarters 1-4 are dropped.
pub fn roster_by_quarter(
    game_id: GameId,
    rosters_by_game: &RostersByGame,
) -> BTreeMap<u8, Vec<&RosterAssignment>> {
    let mut grouped: BTreeMap<u8, Vec<&RosterAssignment>> = BTreeMap::new();
    let Some(rows) = rosters_by_game.get(&game_id) else {
        return grouped;
    };

    for row in rows {
        if !is_valid_quarter(row.quarter) {
            debug!(
                "Ignoring roster row for game {} with quarter {}",
                game_id, row.quarter
            );
            continue;
        }
        let bucket = grouped.entry(row.quarter).or_default();
        if bucket.iter().any(|r| r.position == row.position) {
            debug!(
                "Dropping duplicate {} assignment in game {} Q{}",
                row.position, game_id, row.quarter
            );
            continue;
        }
        bucket.push(row);
    }

    grouped
}

/// Roster and stat rows of one game, grouped by quarter in ascending order.
///
/// Missing arrays give empty groups, never an error.
pub fn quarter_groups<'a>(
    game_id: GameId,
    stats_by_game: &'a StatsByGame,
    rosters_by_game: &'a RostersByGame,
) -> BTreeMap<u8, QuarterGroup<'a>> {
    let mut groups: BTreeMap<u8, QuarterGroup<'a>> = BTreeMap::new();

    for (quarter, roster) in roster_by_quarter(game_id, rosters_by_game) {
        groups.entry(quarter).or_default().roster = roster;
    }
    for (quarter, stats) in stats_by_quarter(game_id, stats_by_game) {
        groups.entry(quarter).or_default().stats = stats;
    }

    groups
}

/// A team's recorded score for a quarter, if one exists. First row wins.
pub fn quarter_score(
    scores_by_game: &ScoresByGame,
    game_id: GameId,
    quarter: u8,
    team_id: TeamId,
) -> Option<u32> {
    scores_by_game
        .get(&game_id)?
        .iter()
        .find(|s| s.quarter == quarter && s.team_id == team_id)
        .map(|s| s.score)
}

/// The other team's recorded score for a quarter, if one exists.
pub fn opposing_quarter_score(
    scores_by_game: &ScoresByGame,
    game_id: GameId,
    quarter: u8,
    team_id: TeamId,
) -> Option<u32> {
    scores_by_game
        .get(&game_id)?
        .iter()
        .find(|s| s.quarter == quarter && s.team_id != team_id)
        .map(|s| s.score)
}

/// A team's score for a quarter, or 0 if absent.
pub fn team_total_for_quarter(
    scores_by_game: &ScoresByGame,
    game_id: GameId,
    quarter: u8,
    team_id: TeamId,
) -> u32 {
    quarter_score(scores_by_game, game_id, quarter, team_id).unwrap_or(0)
}

/// Whole-game goals for and against a team, summed from its stat rows.
pub fn game_goal_totals(
    stats_by_game: &StatsByGame,
    game_id: GameId,
    team_id: TeamId,
) -> GoalTotals {
    let mut totals = GoalTotals::default();
    for stats in stats_by_quarter(game_id, stats_by_game).values() {
        for stat in stats.iter().filter(|s| s.team_id == team_id) {
            totals.add_stat(stat);
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuarterScore;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn game(id: GameId) -> Game {
        Game::new(id, 100, 200, NaiveDate::from_ymd_opt(2025, 4, 12).unwrap())
    }

    fn full_roster(game_id: GameId, quarter: u8, first_player: PlayerId) -> Vec<RosterAssignment> {
        Position::CANONICAL
            .iter()
            .enumerate()
            .map(|(i, &p)| RosterAssignment::new(game_id, quarter, p, first_player + i as i64))
            .collect()
    }

    #[test]
    fn test_eligible_games_preserves_order() {
        let games = vec![
            game(3),
            game(1).with_completed(false),
            game(2),
            game(4).with_statistics(false),
        ];
        let ids: Vec<GameId> = eligible_games(&games).iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_quarter_groups_missing_game() {
        let empty_stats = HashMap::new();
        let empty_rosters = HashMap::new();
        let groups = quarter_groups(99, &empty_stats, &empty_rosters);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_quarter_groups_split_by_quarter() {
        let mut rosters = HashMap::new();
        let mut roster = full_roster(1, 1, 10);
        roster.extend(full_roster(1, 3, 20));
        rosters.insert(1, roster);

        let mut stats = HashMap::new();
        stats.insert(
            1,
            vec![
                PositionStat::new(1, 100, 2, Position::GS).with_goals_for(6),
                PositionStat::new(1, 100, 1, Position::GA).with_goals_for(3),
            ],
        );

        let groups = quarter_groups(1, &stats, &rosters);
        let quarters: Vec<u8> = groups.keys().copied().collect();
        assert_eq!(quarters, vec![1, 2, 3]);
        assert_eq!(groups[&1].roster.len(), 7);
        assert_eq!(groups[&1].stats.len(), 1);
        assert!(groups[&2].roster.is_empty());
        assert_eq!(groups[&2].goal_totals(100), GoalTotals::new(6, 0));
        assert_eq!(groups[&3].player_at(Position::GK), Some(20));
    }

    #[test]
    fn test_duplicate_roster_position_first_wins() {
        let mut roster = full_roster(1, 1, 10);
        roster.push(RosterAssignment::new(1, 1, Position::GK, 99));
        let mut rosters = HashMap::new();
        rosters.insert(1, roster);

        let empty_stats = HashMap::new();
        let groups = quarter_groups(1, &empty_stats, &rosters);
        assert_eq!(groups[&1].roster.len(), 7);
        assert_eq!(groups[&1].player_at(Position::GK), Some(10));
    }

    #[test]
    fn test_duplicate_stat_first_wins() {
        let mut stats = HashMap::new();
        stats.insert(
            1,
            vec![
                PositionStat::new(1, 100, 1, Position::GS).with_goals_for(5),
                PositionStat::new(1, 100, 1, Position::GS).with_goals_for(50),
                PositionStat::new(1, 200, 1, Position::GS).with_goals_for(4),
            ],
        );
        let grouped = stats_by_quarter(1, &stats);
        assert_eq!(grouped[&1].len(), 2);
        assert_eq!(game_goal_totals(&stats, 1, 100), GoalTotals::new(5, 0));
    }

    #[test]
    fn test_out_of_range_quarters_ignored() {
        let mut stats = HashMap::new();
        stats.insert(
            1,
            vec![
                PositionStat::new(1, 100, 0, Position::GS).with_goals_for(5),
                PositionStat::new(1, 100, 5, Position::GS).with_goals_for(5),
            ],
        );
        assert!(stats_by_quarter(1, &stats).is_empty());
        assert_eq!(game_goal_totals(&stats, 1, 100), GoalTotals::default());
    }

    #[test]
    fn test_lineup_requires_all_positions() {
        let mut roster = full_roster(1, 1, 10);
        roster.retain(|r| r.position != Position::C && r.position != Position::WA);
        let mut rosters = HashMap::new();
        rosters.insert(1, roster);

        let empty_stats = HashMap::new();
        let groups = quarter_groups(1, &empty_stats, &rosters);
        assert_eq!(groups[&1].roster.len(), 5);
        assert!(!groups[&1].is_complete_lineup());
    }

    #[test]
    fn test_lineup_rejects_player_in_two_positions() {
        let mut roster = full_roster(1, 1, 10);
        roster[6].player_id = 10;
        let mut rosters = HashMap::new();
        rosters.insert(1, roster);

        let empty_stats = HashMap::new();
        let groups = quarter_groups(1, &empty_stats, &rosters);
        assert!(groups[&1].lineup().is_none());
    }

    #[test]
    fn test_lineup_canonical_order() {
        let mut roster = full_roster(1, 1, 10);
        roster.reverse();
        let mut rosters = HashMap::new();
        rosters.insert(1, roster);

        let empty_stats = HashMap::new();
        let groups = quarter_groups(1, &empty_stats, &rosters);
        let lineup = groups[&1].lineup().unwrap();
        let positions: Vec<Position> = lineup.iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, Position::CANONICAL.to_vec());
        assert_eq!(lineup[0], (Position::GK, 10));
    }

    #[test]
    fn test_team_total_for_quarter() {
        let mut scores = HashMap::new();
        scores.insert(
            1,
            vec![
                QuarterScore::new(1, 100, 1, 12),
                QuarterScore::new(1, 200, 1, 8),
                QuarterScore::new(1, 100, 1, 40),
            ],
        );
        assert_eq!(team_total_for_quarter(&scores, 1, 1, 100), 12);
        assert_eq!(team_total_for_quarter(&scores, 1, 1, 200), 8);
        assert_eq!(team_total_for_quarter(&scores, 1, 2, 100), 0);
        assert_eq!(team_total_for_quarter(&scores, 7, 1, 100), 0);
        assert_eq!(opposing_quarter_score(&scores, 1, 1, 100), Some(8));
        assert_eq!(quarter_score(&scores, 1, 3, 100), None);
    }

    #[test]
    fn test_goal_totals_win() {
        assert!(GoalTotals::new(20, 15).is_win());
        assert!(!GoalTotals::new(15, 15).is_win());
        assert_eq!(GoalTotals::new(18, 19).differential(), -1);
    }

    #[test]
    fn test_goal_totals_saturate() {
        let mut totals = GoalTotals::new(u32::MAX, 0);
        totals.add(GoalTotals::new(5, 5));
        assert_eq!(totals.goals_for, u32::MAX);
        assert_eq!(totals.goals_against, 5);
    }
}
