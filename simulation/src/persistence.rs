//! Persistence Layer - named-slot save/load and autosave.
//!
//! Serializes the union of scalar game state, the packed grid buffer, and
//! both history stacks to JSON, one file per slot under a save directory.
//! Writes are atomic (temp file + rename) so a failed write never
//! corrupts an existing save, and loads parse and validate completely
//! before touching in-memory state.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SimulationError};
use crate::grid::{Grid, PlantType, BYTES_PER_CELL, GRID_HEIGHT, GRID_WIDTH};
use crate::history::{GameSnapshot, History};
use crate::world::GardenWorld;

/// Schema version stamped into every save; bumped on layout changes.
pub const SAVE_VERSION: u8 = 1;

/// Slots are numbered 1 through 3 in all user-visible text.
pub const SLOT_COUNT: u8 = 3;

/// Complete persisted game state for one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub version: u8,
    pub day: u32,
    pub sun_level: i32,
    pub water_level: i32,
    pub player_seed_choice: PlantType,
    /// Packed grid buffer as a plain numeric sequence.
    pub grid_state: Vec<u8>,
    pub undo_stack: Vec<GameSnapshot>,
    pub redo_stack: Vec<GameSnapshot>,
}

impl SaveData {
    /// Capture the current live state of a world.
    pub fn capture(world: &GardenWorld) -> Self {
        Self {
            version: SAVE_VERSION,
            day: world.day,
            sun_level: world.sun_level,
            water_level: world.water_level,
            player_seed_choice: world.player_seed_choice,
            grid_state: world.grid.to_vec(),
            undo_stack: world.history.undo_entries().cloned().collect(),
            redo_stack: world.history.redo_entries().to_vec(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.version != SAVE_VERSION {
            return Err(SimulationError::UnsupportedSaveVersion(self.version));
        }
        let expected = GRID_WIDTH * GRID_HEIGHT * BYTES_PER_CELL;
        if self.grid_state.len() != expected {
            return Err(SimulationError::CorruptSave(format!(
                "grid buffer is {} bytes, expected {expected}",
                self.grid_state.len()
            )));
        }
        for entry in self.undo_stack.iter().chain(self.redo_stack.iter()) {
            if entry.grid_state.len() != expected {
                return Err(SimulationError::CorruptSave(
                    "history entry grid buffer length mismatch".into(),
                ));
            }
        }
        Ok(())
    }

    /// Replace the world's live state and both history stacks wholesale.
    ///
    /// Only called after `validate`, so the grid rebuild cannot fail.
    fn apply(self, world: &mut GardenWorld) {
        world.day = self.day;
        world.sun_level = self.sun_level;
        world.water_level = self.water_level;
        world.player_seed_choice = self.player_seed_choice;
        world.grid = Grid::from_bytes(self.grid_state).unwrap_or_default();
        world.history = History::from_stacks(self.undo_stack, self.redo_stack);
    }
}

/// File-backed save storage keyed by slot number.
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: u8) -> PathBuf {
        self.dir.join(format!("slot_{slot}.json"))
    }

    fn autosave_path(&self) -> PathBuf {
        self.dir.join("autosave.json")
    }

    fn check_slot(slot: u8) -> Result<()> {
        if slot == 0 || slot > SLOT_COUNT {
            return Err(SimulationError::InvalidSlot(slot));
        }
        Ok(())
    }

    fn write_atomic(&self, path: &Path, data: &SaveData) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(data)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn read(&self, path: &Path, missing: SimulationError) -> Result<SaveData> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(missing),
            Err(e) => return Err(e.into()),
        };
        let data: SaveData = serde_json::from_str(&json)
            .map_err(|e| SimulationError::CorruptSave(e.to_string()))?;
        data.validate()?;
        Ok(data)
    }

    /// Save to a slot, overwriting any existing content unconditionally.
    pub fn save(&self, slot: u8, world: &GardenWorld) -> Result<()> {
        Self::check_slot(slot)?;
        self.write_atomic(&self.slot_path(slot), &SaveData::capture(world))?;
        info!(slot, "game saved");
        Ok(())
    }

    /// Load from a slot, replacing all live state and both history
    /// stacks. Fails with `SlotEmpty` when nothing is stored; the world
    /// is untouched on any failure.
    pub fn load(&self, slot: u8, world: &mut GardenWorld) -> Result<()> {
        Self::check_slot(slot)?;
        let data = self.read(&self.slot_path(slot), SimulationError::SlotEmpty(slot))?;
        data.apply(world);
        info!(slot, day = world.day, "game loaded");
        Ok(())
    }

    /// Write the autosave entry. Same payload as a slot save, fixed key.
    pub fn autosave(&self, world: &GardenWorld) -> Result<()> {
        self.write_atomic(&self.autosave_path(), &SaveData::capture(world))?;
        info!("autosaved");
        Ok(())
    }

    /// Whether an autosave entry exists; drives the restore-or-discard
    /// prompt at startup (the prompt itself belongs to the driver).
    pub fn has_autosave(&self) -> bool {
        self.autosave_path().exists()
    }

    /// Restore the autosave. Fails with `NoAutosave` if none exists.
    pub fn load_autosave(&self, world: &mut GardenWorld) -> Result<()> {
        let data = self.read(&self.autosave_path(), SimulationError::NoAutosave)?;
        data.apply(world);
        info!(day = world.day, "autosave restored");
        Ok(())
    }

    /// Delete the stored autosave entry entirely. Succeeds when none
    /// exists.
    pub fn discard_autosave(&self) -> Result<()> {
        match fs::remove_file(self.autosave_path()) {
            Ok(()) => {
                info!("autosave discarded");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!(error = %e, "failed to discard autosave");
                Err(e.into())
            }
        }
    }
}
