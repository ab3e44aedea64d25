//! History Manager - bounded undo/redo snapshot stacks.
//!
//! Every history entry is a structurally independent copy of the full
//! mutable game state; nothing aliases the live grid. The undo stack is
//! capped: FIFO eviction at capacity, LIFO access otherwise. Recording a
//! new action always clears the redo stack — a branched timeline is never
//! preserved.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::grid::PlantType;

/// Maximum depth of the undo stack.
pub const MAX_UNDO_DEPTH: usize = 50;

/// Full independent copy of all mutable game state.
///
/// Equality is explicit structural comparison of every field (the derive),
/// which is what undo dedup relies on — cheap given the fixed 675-byte
/// grid buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub day: u32,
    pub sun_level: i32,
    pub water_level: i32,
    pub water_multiplier: f64,
    pub player_seed_choice: PlantType,
    /// Packed grid buffer, serialized as a plain numeric sequence.
    pub grid_state: Vec<u8>,
}

/// Undo/redo stacks, most-recent-last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    undo: VecDeque<GameSnapshot>,
    redo: Vec<GameSnapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild both stacks from persisted entries. The cap is re-applied
    /// in case the stored stack predates the current limit.
    pub fn from_stacks(undo: Vec<GameSnapshot>, redo: Vec<GameSnapshot>) -> Self {
        let mut history = Self {
            undo: VecDeque::from(undo),
            redo,
        };
        while history.undo.len() > MAX_UNDO_DEPTH {
            history.undo.pop_front();
        }
        history
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn undo_entries(&self) -> impl Iterator<Item = &GameSnapshot> {
        self.undo.iter()
    }

    pub fn redo_entries(&self) -> &[GameSnapshot] {
        &self.redo
    }

    fn push_capped(&mut self, snapshot: GameSnapshot) {
        self.undo.push_back(snapshot);
        if self.undo.len() > MAX_UNDO_DEPTH {
            self.undo.pop_front();
        }
    }

    /// Unconditionally record a snapshot and clear the redo stack. Used
    /// before actions that always mutate (sow, reap, day-advance).
    pub fn record(&mut self, snapshot: GameSnapshot) {
        self.redo.clear();
        self.push_capped(snapshot);
    }

    /// Record a snapshot only if it differs from the top of the undo
    /// stack. Used before lightweight actions (seed-choice changes) so
    /// repeated no-op presses don't spam the stack. Returns whether a
    /// push happened.
    pub fn push_dedup(&mut self, snapshot: GameSnapshot) -> bool {
        if self.undo.back() == Some(&snapshot) {
            return false;
        }
        self.push_capped(snapshot);
        true
    }

    /// Step back: the live state moves onto the redo stack and the most
    /// recent snapshot is returned for wholesale restoration.
    pub fn undo(&mut self, live: GameSnapshot) -> Result<GameSnapshot> {
        let previous = self
            .undo
            .pop_back()
            .ok_or(SimulationError::EmptyHistory { action: "undo" })?;
        self.redo.push(live);
        Ok(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, live: GameSnapshot) -> Result<GameSnapshot> {
        let next = self
            .redo
            .pop()
            .ok_or(SimulationError::EmptyHistory { action: "redo" })?;
        self.push_capped(live);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(day: u32) -> GameSnapshot {
        GameSnapshot {
            day,
            sun_level: 5,
            water_level: 2,
            water_multiplier: 1.0,
            player_seed_choice: PlantType::Grass,
            grid_state: vec![0; 12],
        }
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.record(snapshot(1));
        let restored = history.undo(snapshot(2)).unwrap();
        assert_eq!(restored.day, 1);
        assert_eq!(history.redo_len(), 1);

        history.record(snapshot(3));
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_push_dedup_skips_identical_top() {
        let mut history = History::new();
        assert!(history.push_dedup(snapshot(1)));
        assert!(!history.push_dedup(snapshot(1)));
        assert_eq!(history.undo_len(), 1);

        assert!(history.push_dedup(snapshot(2)));
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_undo_stack_capped_with_fifo_eviction() {
        let mut history = History::new();
        for day in 0..80 {
            history.record(snapshot(day));
        }
        assert_eq!(history.undo_len(), MAX_UNDO_DEPTH);
        // Oldest surviving entry is day 30; days 0..30 were evicted.
        assert_eq!(history.undo_entries().next().unwrap().day, 30);
    }

    #[test]
    fn test_redo_push_respects_cap() {
        let mut history = History::new();
        for day in 0..MAX_UNDO_DEPTH as u32 {
            history.record(snapshot(day));
        }
        let restored = history.undo(snapshot(99)).unwrap();
        assert_eq!(restored.day, MAX_UNDO_DEPTH as u32 - 1);

        history.redo(snapshot(99)).unwrap();
        assert!(history.undo_len() <= MAX_UNDO_DEPTH);
    }

    #[test]
    fn test_undo_then_redo_is_exact_inverse() {
        let mut history = History::new();
        history.record(snapshot(1));

        let live = snapshot(2);
        let previous = history.undo(live.clone()).unwrap();
        assert_eq!(previous, snapshot(1));

        let forward = history.redo(previous.clone()).unwrap();
        assert_eq!(forward, live);
        assert_eq!(history.undo_entries().last().unwrap(), &previous);
    }

    #[test]
    fn test_empty_stacks_error_without_mutation() {
        let mut history = History::new();
        assert!(matches!(
            history.undo(snapshot(1)),
            Err(SimulationError::EmptyHistory { action: "undo" })
        ));
        // A failed undo must not leak the live state into redo.
        assert_eq!(history.redo_len(), 0);

        assert!(matches!(
            history.redo(snapshot(1)),
            Err(SimulationError::EmptyHistory { action: "redo" })
        ));
        assert_eq!(history.undo_len(), 0);
    }

    #[test]
    fn test_from_stacks_reapplies_cap() {
        let undo: Vec<_> = (0..70).map(snapshot).collect();
        let history = History::from_stacks(undo, vec![snapshot(99)]);
        assert_eq!(history.undo_len(), MAX_UNDO_DEPTH);
        assert_eq!(history.undo_entries().next().unwrap().day, 20);
        assert_eq!(history.redo_len(), 1);
    }
}
