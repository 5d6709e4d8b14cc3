use std::collections::HashMap;

use chrono::NaiveDate;
use netball_analytics::calculate::{
    enumerate_combinations, rank_combinations, rank_formations, reconcile_game,
    reconcile_quarter, reconcile_season, TeamDirectory,
};
use netball_analytics::{
    CombinationKey, Game, PlayerDirectory, Position, PositionStat, QuarterScore,
    RosterAssignment, RostersByGame, ScoresByGame, StatsByGame, Team,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

const TEAM: i64 = 100;

fn position() -> impl Strategy<Value = Position> {
    prop::sample::select(Position::CANONICAL.to_vec())
}

fn games(count: i64) -> Vec<Game> {
    (1..=count)
        .map(|id| {
            let opponent = 200 + id % 3;
            Game::new(id, TEAM, opponent, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap())
        })
        .collect()
}

fn teams() -> TeamDirectory {
    TeamDirectory::new(&[
        Team::new(TEAM, "Hawks"),
        Team::new(200, "Owls"),
        Team::new(201, "Kites"),
        Team::new(202, "Bye"),
    ])
}

/// Random rosters over a small player pool so lineups and pairs repeat.
fn rosters() -> impl Strategy<Value = RostersByGame> {
    prop::collection::vec((1i64..=4, 1u8..=4, position(), 1i64..=9), 0..120).prop_map(|rows| {
        let mut by_game: RostersByGame = HashMap::new();
        for (game_id, quarter, position, player_id) in rows {
            by_game
                .entry(game_id)
                .or_default()
                .push(RosterAssignment::new(game_id, quarter, position, player_id));
        }
        by_game
    })
}

fn stats() -> impl Strategy<Value = StatsByGame> {
    prop::collection::vec(
        (1i64..=4, 0u8..=5, position(), 0u32..15, 0u32..15, prop::bool::ANY),
        0..60,
    )
    .prop_map(|rows| {
        let mut by_game: StatsByGame = HashMap::new();
        for (game_id, quarter, position, gf, ga, ours) in rows {
            let team = if ours { TEAM } else { 200 };
            by_game.entry(game_id).or_default().push(
                PositionStat::new(game_id, team, quarter, position)
                    .with_goals_for(gf)
                    .with_goals_against(ga),
            );
        }
        by_game
    })
}

fn scores() -> impl Strategy<Value = ScoresByGame> {
    prop::collection::vec((1i64..=4, 1u8..=4, prop::bool::ANY, 0u32..30), 0..30).prop_map(
        |rows| {
            let mut by_game: ScoresByGame = HashMap::new();
            for (game_id, quarter, ours, score) in rows {
                let team = if ours { TEAM } else { 200 };
                by_game
                    .entry(game_id)
                    .or_default()
                    .push(QuarterScore::new(game_id, team, quarter, score));
            }
            by_game
        },
    )
}

proptest! {
    #![proptest_config(Config::with_cases(64))]

    #[test]
    fn rankings_are_deterministic(rosters in rosters(), stats in stats(), size in 2usize..=4) {
        let games = games(4);
        let players = PlayerDirectory::default();
        let teams = teams();

        let first = rank_formations(&games, &stats, &rosters, &players, TEAM, &teams, None);
        let second = rank_formations(&games, &stats, &rosters, &players, TEAM, &teams, None);
        prop_assert_eq!(first, second);

        let first =
            rank_combinations(&games, &stats, &rosters, &players, size, None, TEAM, &teams);
        let second =
            rank_combinations(&games, &stats, &rosters, &players, size, None, TEAM, &teams);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rankings_are_sorted_and_capped(rosters in rosters(), stats in stats()) {
        let games = games(4);
        let players = PlayerDirectory::default();
        let teams = teams();

        let formations = rank_formations(&games, &stats, &rosters, &players, TEAM, &teams, None);
        prop_assert!(formations.general.len() <= 15);
        prop_assert!(formations
            .general
            .windows(2)
            .all(|w| w[0].effectiveness >= w[1].effectiveness));
        prop_assert!(!formations.per_opponent.contains_key("Bye"));
        prop_assert!(formations.general.iter().all(|f| f.quarters_used >= 2));

        let combinations =
            rank_combinations(&games, &stats, &rosters, &players, 2, None, TEAM, &teams);
        prop_assert!(combinations.general.len() <= 20);
        prop_assert!(combinations.per_opponent.len() <= 30);
        prop_assert!(combinations.general.iter().all(|c| c.games_played >= 2));
        prop_assert!(combinations
            .general
            .windows(2)
            .all(|w| w[0].effectiveness >= w[1].effectiveness));
    }

    #[test]
    fn combination_keys_ignore_order(mut players in prop::collection::vec(1i64..50, 1..8)) {
        let key = CombinationKey::from_players(&players);
        players.reverse();
        prop_assert_eq!(CombinationKey::from_players(&players), key);
    }

    #[test]
    fn enumeration_yields_sorted_unique_subsets(
        players in prop::collection::vec(1i64..12, 0..9),
        size in 1usize..=5
    ) {
        let subsets = enumerate_combinations(&players, size);
        let mut pool = players.clone();
        pool.sort_unstable();
        pool.dedup();

        for subset in &subsets {
            prop_assert_eq!(subset.len(), size);
            prop_assert!(subset.windows(2).all(|w| w[0] < w[1]));
        }
        let mut deduped = subsets.clone();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), subsets.len());
        if size > pool.len() {
            prop_assert!(subsets.is_empty());
        }
    }

    #[test]
    fn estimated_split_preserves_totals(own in 0u32..60, theirs in 0u32..60) {
        let mut scores: ScoresByGame = HashMap::new();
        scores.insert(1, vec![
            QuarterScore::new(1, TEAM, 1, own),
            QuarterScore::new(1, 200, 1, theirs),
        ]);

        let q = reconcile_quarter(1, 1, TEAM, &scores, &HashMap::new());
        prop_assert_eq!(q.goals_for(), own);
        prop_assert_eq!(q.goals_against(), theirs);
        prop_assert!(q.gs_goals_for >= q.ga_goals_for);
        prop_assert!(q.gs_goals_for - q.ga_goals_for <= 1);
    }

    #[test]
    fn season_is_sum_of_games(scores in scores(), stats in stats()) {
        let games = games(4);
        let season = reconcile_season(&games, TEAM, &scores, &stats);

        let mut goals_for = 0;
        let mut goals_against = 0;
        for game in &games {
            let reconciled = reconcile_game(game.id, TEAM, &scores, &stats);
            goals_for += reconciled.goals_for;
            goals_against += reconciled.goals_against;
        }
        prop_assert_eq!(season.goals_for, goals_for);
        prop_assert_eq!(season.goals_against, goals_against);
        prop_assert_eq!(
            season.gs_goals_for + season.ga_goals_for,
            season.goals_for
        );
        let counted = season.games_complete
            + season.games_partial
            + season.games_estimated
            + season.games_missing;
        prop_assert_eq!(counted as usize, season.games.len());
    }
}
