//! End-condition evaluation, run once per day-advance.

use serde::Serialize;

use crate::grid::{Grid, MATURE_STAGE};
use crate::scenario::VictoryPolicy;

/// Final outcome of a session. Both variants are reported identically;
/// the driver decides how loudly to announce each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Count cells holding a mature plant.
pub fn mature_plant_count(grid: &Grid) -> u32 {
    grid.cells()
        .filter(|(_, _, cell)| cell.growth_stage >= MATURE_STAGE)
        .count() as u32
}

/// Scan the grid once and evaluate win/lose thresholds.
///
/// Win is checked before lose: on a boundary day where both thresholds
/// are met, the player wins.
pub fn check_end_condition(grid: &Grid, victory: &VictoryPolicy, day: u32) -> Option<Outcome> {
    if mature_plant_count(grid) >= victory.mature_plants_required {
        return Some(Outcome::Win);
    }
    if day >= victory.maximum_days {
        return Some(Outcome::Lose);
    }
    None
}
