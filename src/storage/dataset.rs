//! In-memory dataset assembled from a dataset directory.

use std::collections::HashMap;

use tracing::info;

use super::{EntityType, JsonlReader, StorageConfig, StorageError};
use crate::calculate::TeamDirectory;
use crate::models::{
    ClubId, Game, GameId, Player, PlayerDirectory, PositionStat, QuarterScore, RosterAssignment,
    RostersByGame, ScoresByGame, StatsByGame, Team, TeamId,
};

/// All records needed by the analyzers, grouped by game.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub games: Vec<Game>,
    pub scores_by_game: ScoresByGame,
    pub stats_by_game: StatsByGame,
    pub rosters_by_game: RostersByGame,
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
}

/// Group rows by game, keeping file order inside each game.
pub fn group_by_game<T>(rows: Vec<T>, game_of: impl Fn(&T) -> GameId) -> HashMap<GameId, Vec<T>> {
    let mut grouped: HashMap<GameId, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(game_of(&row)).or_default().push(row);
    }
    grouped
}

impl Dataset {
    /// Assemble a dataset from flat record lists.
    pub fn from_records(
        games: Vec<Game>,
        scores: Vec<QuarterScore>,
        stats: Vec<PositionStat>,
        rosters: Vec<RosterAssignment>,
        players: Vec<Player>,
        teams: Vec<Team>,
    ) -> Self {
        Self {
            games,
            scores_by_game: group_by_game(scores, |s| s.game_id),
            stats_by_game: group_by_game(stats, |s| s.game_id),
            rosters_by_game: group_by_game(rosters, |r| r.game_id),
            players,
            teams,
        }
    }

    /// Load every record file from the dataset directory.
    ///
    /// `games.jsonl` is required; the other files read as empty when absent.
    pub fn load(config: &StorageConfig) -> Result<Self, StorageError> {
        let games: Vec<Game> = JsonlReader::for_entity(config, EntityType::Game).read_required()?;
        let scores = JsonlReader::for_entity(config, EntityType::QuarterScore).read_all()?;
        let stats = JsonlReader::for_entity(config, EntityType::PositionStat).read_all()?;
        let rosters = JsonlReader::for_entity(config, EntityType::RosterAssignment).read_all()?;
        let players = JsonlReader::for_entity(config, EntityType::Player).read_all()?;
        let teams = JsonlReader::for_entity(config, EntityType::Team).read_all()?;

        let dataset = Self::from_records(games, scores, stats, rosters, players, teams);
        info!(
            "Loaded {} games, {} players, {} teams from {:?}",
            dataset.games.len(),
            dataset.players.len(),
            dataset.teams.len(),
            config.data_dir
        );
        Ok(dataset)
    }

    pub fn find_game(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn player_directory(&self) -> PlayerDirectory {
        PlayerDirectory::new(&self.players)
    }

    pub fn team_directory(&self) -> TeamDirectory {
        TeamDirectory::new(&self.teams)
    }

    /// Team directory with the current team's club filled in when the team
    /// data does not record one.
    pub fn team_directory_for(&self, team_id: TeamId, club_id: Option<ClubId>) -> TeamDirectory {
        let directory = self.team_directory();
        match club_id {
            Some(club_id) => directory.with_default_club(team_id, club_id),
            None => directory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_group_by_game_keeps_order() {
        let rows = vec![
            QuarterScore::new(2, 100, 1, 5),
            QuarterScore::new(1, 100, 1, 7),
            QuarterScore::new(2, 200, 1, 9),
        ];
        let grouped = group_by_game(rows, |s| s.game_id);
        assert_eq!(grouped.len(), 2);
        let scores: Vec<u32> = grouped[&2].iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![5, 9]);
    }

    #[test]
    fn test_load_dataset() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(
            dir.join("games.jsonl"),
            concat!(
                r#"{"id": 1, "home_team_id": 100, "away_team_id": 200, "#,
                r#""is_completed": true, "date": "2025-05-03"}"#
            ),
        )
        .unwrap();
        fs::write(
            dir.join("position_stats.jsonl"),
            concat!(
                r#"{"game_id": 1, "team_id": 100, "quarter": 1, "#,
                r#""position": "GS", "goals_for": "7"}"#,
                "\n",
                r#"{"game_id": 1, "team_id": 100, "quarter": 1, "#,
                r#""position": "ZZ", "goals_for": 1}"#,
                "\n"
            ),
        )
        .unwrap();
        fs::write(
            dir.join("teams.jsonl"),
            r#"{"id": 200, "name": "Owls"}"#,
        )
        .unwrap();

        let dataset = Dataset::load(&StorageConfig::new(dir.to_path_buf())).unwrap();
        assert_eq!(dataset.games.len(), 1);
        assert_eq!(dataset.stats_by_game[&1].len(), 1);
        assert_eq!(dataset.stats_by_game[&1][0].position, Position::GS);
        assert_eq!(dataset.stats_by_game[&1][0].goals_for, 7);
        assert!(dataset.scores_by_game.is_empty());
        assert!(dataset.find_game(1).is_some());
        assert_eq!(dataset.team_directory().name_of(200), "Owls");
        assert_eq!(dataset.player_directory().name_of(5), "Player 5");
    }

    #[test]
    fn test_team_directory_for_configured_club() {
        let dataset = Dataset::from_records(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![Team::new(101, "Hawks Reserves").with_club(7)],
        );

        assert!(!dataset.team_directory().same_club(100, 101));
        assert!(dataset.team_directory_for(100, Some(7)).same_club(100, 101));
        assert!(!dataset.team_directory_for(100, None).same_club(100, 101));
    }

    #[test]
    fn test_load_requires_games() {
        let temp_dir = TempDir::new().unwrap();
        let result = Dataset::load(&StorageConfig::new(temp_dir.path().to_path_buf()));
        assert!(matches!(result, Err(StorageError::PathNotFound(_))));
    }
}
