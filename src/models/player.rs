//! Player and team reference data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ClubId, PlayerId, TeamId};

/// A registered player. Used only for labelling output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
}

impl Player {
    pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// A team entered in a competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,

    /// Owning club, if known. Two teams of the same club never count as opponents.
    #[serde(default)]
    pub club_id: Option<ClubId>,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            club_id: None,
        }
    }

    /// Builder method to set the owning club.
    pub fn with_club(mut self, club_id: ClubId) -> Self {
        self.club_id = Some(club_id);
        self
    }
}

/// Name lookup for players.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    names: HashMap<PlayerId, String>,
}

impl PlayerDirectory {
    pub fn new(players: &[Player]) -> Self {
        let names = players
            .iter()
            .map(|p| (p.id, p.display_name.clone()))
            .collect();
        Self { names }
    }

    /// Display name for a player, or `Player {id}` when unknown.
    pub fn name_of(&self, id: PlayerId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Player {}", id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
