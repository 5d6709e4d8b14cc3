//! Team performance analytics engine.
//!
//! Pure functions over caller-supplied records:
//! - Record normalization and indexing
//! - Position effectiveness averages
//! - Formation (starting lineup) rankings
//! - Player combination rankings
//! - Quarter reconciliation with data-quality fallback
//!
//! Nothing here performs IO or keeps state between calls. Diagnostics go
//! through `tracing` and are silent unless a subscriber is installed.

pub mod combinations;
pub mod formations;
pub mod normalize;
pub mod opponent;
pub mod positions;
pub mod reconcile;

pub use combinations::{enumerate_combinations, rank_combinations};
pub use formations::rank_formations;
pub use normalize::{eligible_games, quarter_groups, team_total_for_quarter, GoalTotals};
pub use opponent::{OpponentResolver, TeamDirectory};
pub use positions::{compute_position_averages, compute_position_averages_reconciled};
pub use reconcile::{reconcile_game, reconcile_quarter, reconcile_season};

use std::collections::HashMap;
use std::hash::Hash;

/// Calculate win rate as a fraction (0.0 to 1.0).
pub fn calculate_win_rate(wins: u32, games: u32) -> f64 {
    if games == 0 {
        0.0
    } else {
        wins as f64 / games as f64
    }
}

/// Win rate as a percentage rounded to one decimal place.
pub fn win_percentage(wins: u32, games: u32) -> f64 {
    (calculate_win_rate(wins, games) * 1000.0).round() / 10.0
}

/// Composite ranking score: goal differential per sample plus weighted win rate.
///
/// `samples` is quarters for formations and games for combinations. Both
/// denominators of zero give zero for their term.
pub fn calculate_effectiveness(
    goals: GoalTotals,
    samples: u32,
    wins: u32,
    games: u32,
    win_weight: f64,
) -> f64 {
    let differential = if samples == 0 {
        0.0
    } else {
        goals.differential() as f64 / samples as f64
    };
    differential + calculate_win_rate(wins, games) * win_weight
}

/// Stable descending sort by effectiveness. Ties keep their current order.
pub(crate) fn sort_by_effectiveness<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
}

/// Insertion-ordered aggregation map.
///
/// Entries come back in first-seen order, so ranking ties resolve the same
/// way on every run regardless of hashing.
pub(crate) struct Tally<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K: Eq + Hash + Clone, V> Tally<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn entry_or_insert_with(&mut self, key: &K, make: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key.clone(), make()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}
