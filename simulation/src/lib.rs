//! Garden Simulation Engine
//!
//! Turn-based garden grid simulation: a packed 15x15 cell buffer, daily
//! weather and scripted events, neighbor-aware growth rules, bounded
//! undo/redo history, and slot-based JSON persistence. Rendering, input
//! binding, and scenario-text parsing live in external collaborators;
//! this crate is the state and rules core they drive.

pub mod error;
pub mod grid;
pub mod history;
pub mod persistence;
pub mod plants;
pub mod scenario;
pub mod systems;
pub mod world;

pub use error::SimulationError;
pub use grid::{CellChange, CellRecord, Grid, PlantType};
pub use history::{GameSnapshot, History, MAX_UNDO_DEPTH};
pub use persistence::{SaveData, SaveStore};
pub use scenario::Scenario;
pub use systems::Outcome;
pub use world::{DayReport, GardenWorld};
