//! JSONL (JSON Lines) record files.
//!
//! Each line is one JSON object. Unparseable lines are skipped with a
//! warning so one corrupt row does not hide the rest of a dataset.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};

/// Record types stored in a dataset directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Game,
    QuarterScore,
    PositionStat,
    RosterAssignment,
    Player,
    Team,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Game => "games.jsonl",
            EntityType::QuarterScore => "quarter_scores.jsonl",
            EntityType::PositionStat => "position_stats.jsonl",
            EntityType::RosterAssignment => "rosters.jsonl",
            EntityType::Player => "players.jsonl",
            EntityType::Team => "teams.jsonl",
        }
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a record type in the dataset directory.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.entity_path(entity))
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all records. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            debug!("{:?} not found, treating as empty", self.path);
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", i + 1, self.path, e);
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read all records, failing if the file does not exist.
    pub fn read_required(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }
        self.read_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Deserialize, PartialEq)]
    struct TestEntity {
        id: String,
        value: u32,
    }

    #[test]
    fn test_jsonl_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.jsonl");
        fs::write(
            &path,
            "{\"id\": \"1\", \"value\": 100}\n\n{\"id\": \"2\", \"value\": 200}\n",
        )
        .unwrap();

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        let entities = reader.read_all().unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[1].value, 200);
    }

    #[test]
    fn test_jsonl_skips_bad_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.jsonl");
        fs::write(
            &path,
            "{\"id\": \"1\", \"value\": 1}\nnot json\n{\"id\": \"3\", \"value\": 3}\n",
        )
        .unwrap();

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        let entities = reader.read_all().unwrap();
        let ids: Vec<&str> = entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_jsonl_read_missing() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<TestEntity> =
            JsonlReader::new(temp_dir.path().join("nonexistent.jsonl"));

        assert!(!reader.exists());
        assert!(reader.read_all().unwrap().is_empty());
        assert!(matches!(
            reader.read_required(),
            Err(StorageError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_entity_type_filename() {
        assert_eq!(EntityType::Game.filename(), "games.jsonl");
        assert_eq!(EntityType::QuarterScore.filename(), "quarter_scores.jsonl");
        assert_eq!(EntityType::RosterAssignment.filename(), "rosters.jsonl");
    }

    #[test]
    fn test_for_entity() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        let reader: JsonlReader<TestEntity> = JsonlReader::for_entity(&config, EntityType::Team);
        assert_eq!(reader.path, temp_dir.path().join("teams.jsonl"));
    }
}
