//! Garden world - main orchestrator.
//!
//! `GardenWorld` owns every piece of mutable game state (grid, scalar
//! day/weather state, policy, event timeline, history stacks) and exposes
//! the player-facing command API. There are no hidden statics; the driver
//! holds the world and calls in once per player input.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::Result;
use crate::grid::{CellChange, Grid, PlantType};
use crate::history::{GameSnapshot, History};
use crate::scenario::{Scenario, TimelineEvent, VictoryPolicy, WeatherRanges};
use crate::systems::{
    apply_event, check_cell_growth, check_end_condition, generate_weather, mature_plant_count,
    Outcome,
};

/// Everything the presentation layer needs to know about one day-advance.
#[derive(Debug, Clone)]
pub struct DayReport {
    pub day: u32,
    pub sun_level: i32,
    pub water_level: i32,
    /// Scripted event message for this day, if any.
    pub event_message: Option<String>,
    /// Cells whose growth stage advanced today.
    pub grew: Vec<CellChange>,
    pub mature_plants: u32,
    pub outcome: Option<Outcome>,
}

/// The simulation core: grid, scalar state, policy, timeline, history.
pub struct GardenWorld {
    pub grid: Grid,
    pub day: u32,
    pub sun_level: i32,
    pub water_level: i32,
    pub water_multiplier: f64,
    pub player_seed_choice: PlantType,
    pub weather: WeatherRanges,
    pub victory: VictoryPolicy,
    events: Vec<TimelineEvent>,
    pub history: History,
    rng: StdRng,
}

impl GardenWorld {
    /// Build a world from a validated scenario document.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::build(scenario, StdRng::from_entropy())
    }

    /// Deterministic variant for tests and reproducible sessions.
    pub fn from_scenario_seeded(scenario: &Scenario, seed: u64) -> Self {
        Self::build(scenario, StdRng::seed_from_u64(seed))
    }

    fn build(scenario: &Scenario, rng: StdRng) -> Self {
        Self {
            grid: Grid::new(),
            day: scenario.starting_conditions.day,
            sun_level: scenario.starting_conditions.sun_level,
            water_level: scenario.starting_conditions.water_level,
            water_multiplier: 1.0,
            player_seed_choice: scenario.starting_conditions.player_seed_choice,
            weather: WeatherRanges::from(&scenario.weather_policy),
            victory: VictoryPolicy::from(&scenario.victory_conditions),
            events: scenario.sorted_events(),
            history: History::new(),
            rng,
        }
    }

    /// Capture a full independent copy of the mutable game state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            day: self.day,
            sun_level: self.sun_level,
            water_level: self.water_level,
            water_multiplier: self.water_multiplier,
            player_seed_choice: self.player_seed_choice,
            grid_state: self.grid.to_vec(),
        }
    }

    /// Replace the live state wholesale from a snapshot.
    pub fn restore(&mut self, snapshot: &GameSnapshot) {
        self.day = snapshot.day;
        self.sun_level = snapshot.sun_level;
        self.water_level = snapshot.water_level;
        self.water_multiplier = snapshot.water_multiplier;
        self.player_seed_choice = snapshot.player_seed_choice;
        // Snapshot buffers come from Grid::to_vec, so the length always
        // matches; persistence validates before handing buffers here.
        self.grid = Grid::from_bytes(snapshot.grid_state.clone()).unwrap_or_default();
    }

    /// Sow a plant into an empty cell. Sowing an occupied or
    /// out-of-range cell (or sowing `None`) is a silent rejection, not
    /// an error.
    pub fn sow(&mut self, row: usize, col: usize, plant_type: PlantType) -> bool {
        if !self.grid.in_bounds(row, col) {
            debug!(row, col, "sow rejected: out of bounds");
            return false;
        }
        if plant_type == PlantType::None || self.grid.plant_type(row, col) != PlantType::None {
            debug!(row, col, "sow rejected: cell occupied or no seed");
            return false;
        }
        self.history.record(self.snapshot());
        self.grid.set_plant_type(row, col, plant_type);
        self.grid.set_growth_stage(row, col, 0);
        info!(row, col, ?plant_type, "sowed");
        true
    }

    /// Reap whatever occupies a cell, discarding growth progress. Reaping
    /// an empty or out-of-range cell is a silent rejection.
    pub fn reap(&mut self, row: usize, col: usize) -> bool {
        if !self.grid.in_bounds(row, col) {
            debug!(row, col, "reap rejected: out of bounds");
            return false;
        }
        if self.grid.plant_type(row, col) == PlantType::None {
            debug!(row, col, "reap rejected: cell empty");
            return false;
        }
        self.history.record(self.snapshot());
        self.grid.set_plant_type(row, col, PlantType::None);
        self.grid.set_growth_stage(row, col, 0);
        info!(row, col, "reaped");
        true
    }

    /// Change the active seed choice. Dedup-pushes history so repeated
    /// presses of the same key don't spam the undo stack.
    pub fn set_seed_choice(&mut self, choice: PlantType) {
        self.history.push_dedup(self.snapshot());
        self.player_seed_choice = choice;
        debug!(?choice, "seed choice changed");
    }

    /// Advance the day: weather, scripted events, uniform watering,
    /// growth, end conditions. A single synchronous transition.
    pub fn advance_day(&mut self) -> DayReport {
        self.history.record(self.snapshot());
        self.day += 1;

        let (sun, water) = generate_weather(&self.weather, self.water_multiplier, &mut self.rng);
        self.sun_level = sun;
        self.water_level = water;

        let event = self
            .events
            .iter()
            .find(|e| e.day == self.day)
            .map(|e| e.event.clone());
        let event_message = event.as_ref().and_then(|e| {
            apply_event(
                e,
                &mut self.weather,
                &mut self.victory,
                &mut self.water_multiplier,
            )
        });

        // Water every cell by the day's level, then evaluate growth.
        let mut grew = Vec::new();
        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                self.grid.add_water(row, col, self.water_level);
                if let Some(change) = check_cell_growth(&mut self.grid, row, col, self.sun_level) {
                    grew.push(change);
                }
            }
        }

        let mature_plants = mature_plant_count(&self.grid);
        let outcome = check_end_condition(&self.grid, &self.victory, self.day);
        info!(
            day = self.day,
            sun = self.sun_level,
            water = self.water_level,
            grew = grew.len(),
            mature_plants,
            ?outcome,
            "day advanced"
        );

        DayReport {
            day: self.day,
            sun_level: self.sun_level,
            water_level: self.water_level,
            event_message,
            grew,
            mature_plants,
            outcome,
        }
    }

    /// Re-evaluate end conditions against the current grid and day.
    pub fn check_end_condition(&self) -> Option<Outcome> {
        check_end_condition(&self.grid, &self.victory, self.day)
    }

    /// Step back one recorded action.
    pub fn undo(&mut self) -> Result<()> {
        let previous = self.history.undo(self.snapshot())?;
        self.restore(&previous);
        info!(day = self.day, "undo");
        Ok(())
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self) -> Result<()> {
        let next = self.history.redo(self.snapshot())?;
        self.restore(&next);
        info!(day = self.day, "redo");
        Ok(())
    }

    /// Full-grid change records for a presentation-layer resync after
    /// load, undo, or redo.
    pub fn full_sync(&self) -> Vec<CellChange> {
        self.grid
            .cells()
            .map(|(row, col, cell)| CellChange {
                row,
                col,
                plant_type: cell.plant_type,
                growth_stage: cell.growth_stage,
            })
            .collect()
    }
}
