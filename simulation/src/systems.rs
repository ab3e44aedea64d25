//! Simulation systems - stateless rules run against the grid.

pub mod end_condition;
pub mod growth;
pub mod weather;

pub use end_condition::{check_end_condition, mature_plant_count, Outcome};
pub use growth::{check_cell_growth, neighbor_eligibility};
pub use weather::{apply_event, generate_weather};
