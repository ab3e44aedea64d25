//! Growth Rule Engine
//!
//! Per-cell growth-condition evaluation plus the neighbor survey used for
//! advanced growth eligibility.

use crate::grid::{CellChange, Grid, PlantType, MATURE_STAGE};
use crate::plants;

/// 4-connected orthogonal offsets, no diagonals.
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Survey the orthogonal neighbors of a cell and decide whether it meets
/// the company-of-peers eligibility rule.
///
/// A planted neighbor counts as a same-type match, or as a lower-tier
/// match when its tier is exactly one below the cell's. Grass has no tier
/// below it, so it qualifies only through >= 3 same-type neighbors;
/// flowers and shrubs qualify through >= 3 of either kind.
pub fn neighbor_eligibility(grid: &Grid, row: usize, col: usize) -> bool {
    let plant = grid.plant_type(row, col);
    if plant == PlantType::None {
        return false;
    }

    let mut same_type = 0;
    let mut lower_tier = 0;
    for (dr, dc) in NEIGHBOR_OFFSETS {
        let (nr, nc) = (row as i32 + dr, col as i32 + dc);
        if nr < 0 || nc < 0 {
            continue;
        }
        let (nr, nc) = (nr as usize, nc as usize);
        if !grid.in_bounds(nr, nc) {
            continue;
        }
        let neighbor = grid.plant_type(nr, nc);
        if neighbor == PlantType::None {
            continue;
        }
        if neighbor == plant {
            same_type += 1;
        } else if neighbor.tier() + 1 == plant.tier() {
            lower_tier += 1;
        }
    }

    if plant == PlantType::Grass {
        return same_type >= 3;
    }
    same_type >= 3 || lower_tier >= 3
}

/// Evaluate one cell's growth for the day.
///
/// Walks the plant definition's conditions in order and takes the FIRST
/// one satisfied by the day's sun and the cell's accumulated water. On a
/// match the stage advances by exactly one (never more, even after
/// skipped days), the condition's water cost is charged (saturating at
/// zero in the packed encoding), and the resulting change record is
/// returned for the presentation layer. Empty cells and already-mature
/// plants are no-ops.
pub fn check_cell_growth(
    grid: &mut Grid,
    row: usize,
    col: usize,
    sun_level: i32,
) -> Option<CellChange> {
    let plant = grid.plant_type(row, col);
    let definition = plants::definition(plant)?;

    let stage = grid.growth_stage(row, col);
    let water = i32::from(grid.water_level(row, col));

    for condition in definition.growth_conditions {
        if sun_level >= condition.min_sun && water >= condition.min_water && stage < MATURE_STAGE {
            let new_stage = stage + 1;
            grid.set_growth_stage(row, col, new_stage);
            grid.add_water(row, col, -i32::from(condition.water_required));
            return Some(CellChange {
                row,
                col,
                plant_type: plant,
                growth_stage: new_stage,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plants::definition;

    #[test]
    fn test_growth_advances_exactly_one_stage() {
        let mut grid = Grid::new();
        grid.set_plant_type(4, 4, PlantType::Grass);
        grid.set_growth_stage(4, 4, 1);
        grid.set_water_level(4, 4, 200);

        let change = check_cell_growth(&mut grid, 4, 4, 10).expect("should grow");
        assert_eq!(change.growth_stage, 2);
        assert_eq!(grid.growth_stage(4, 4), 2);
    }

    #[test]
    fn test_growth_charges_first_matching_condition() {
        let mut grid = Grid::new();
        grid.set_plant_type(0, 0, PlantType::Grass);
        // Water high enough to satisfy both grass conditions; with full
        // sun, the first (bright-day) condition must win and be charged.
        grid.set_water_level(0, 0, 100);

        let first = definition(PlantType::Grass).unwrap().growth_conditions[0];
        check_cell_growth(&mut grid, 0, 0, 10).unwrap();
        assert_eq!(grid.water_level(0, 0), 100 - first.water_required);
    }

    #[test]
    fn test_fallback_condition_used_when_sun_is_dim() {
        let mut grid = Grid::new();
        grid.set_plant_type(0, 0, PlantType::Grass);
        grid.set_water_level(0, 0, 100);

        let conditions = definition(PlantType::Grass).unwrap().growth_conditions;
        // Sun below the first condition, at the second.
        let dim = conditions[1].min_sun;
        assert!(dim < conditions[0].min_sun);

        check_cell_growth(&mut grid, 0, 0, dim).unwrap();
        assert_eq!(grid.water_level(0, 0), 100 - conditions[1].water_required);
    }

    #[test]
    fn test_mature_plant_does_not_grow() {
        let mut grid = Grid::new();
        grid.set_plant_type(1, 1, PlantType::Flower);
        grid.set_growth_stage(1, 1, MATURE_STAGE);
        grid.set_water_level(1, 1, 200);

        assert!(check_cell_growth(&mut grid, 1, 1, 10).is_none());
        assert_eq!(grid.growth_stage(1, 1), MATURE_STAGE);
        assert_eq!(grid.water_level(1, 1), 200);
    }

    #[test]
    fn test_empty_cell_is_a_no_op() {
        let mut grid = Grid::new();
        grid.set_water_level(2, 2, 200);
        assert!(check_cell_growth(&mut grid, 2, 2, 10).is_none());
    }

    #[test]
    fn test_no_growth_without_water() {
        let mut grid = Grid::new();
        grid.set_plant_type(0, 0, PlantType::Shrub);
        grid.set_water_level(0, 0, 0);
        assert!(check_cell_growth(&mut grid, 0, 0, 10).is_none());
    }

    #[test]
    fn test_flower_eligible_via_three_lower_tier_neighbors() {
        let mut grid = Grid::new();
        grid.set_plant_type(5, 5, PlantType::Flower);
        grid.set_plant_type(4, 5, PlantType::Grass);
        grid.set_plant_type(6, 5, PlantType::Grass);
        grid.set_plant_type(5, 4, PlantType::Grass);
        assert!(neighbor_eligibility(&grid, 5, 5));
    }

    #[test]
    fn test_grass_cannot_qualify_via_lower_tier() {
        let mut grid = Grid::new();
        grid.set_plant_type(5, 5, PlantType::Grass);
        // Two grass neighbors, two empty: not eligible.
        grid.set_plant_type(4, 5, PlantType::Grass);
        grid.set_plant_type(6, 5, PlantType::Grass);
        assert!(!neighbor_eligibility(&grid, 5, 5));

        // A third same-type neighbor flips it.
        grid.set_plant_type(5, 4, PlantType::Grass);
        assert!(neighbor_eligibility(&grid, 5, 5));
    }

    #[test]
    fn test_shrub_counts_only_adjacent_tier_below() {
        let mut grid = Grid::new();
        grid.set_plant_type(5, 5, PlantType::Shrub);
        // Grass is two tiers below shrub and must not count.
        grid.set_plant_type(4, 5, PlantType::Grass);
        grid.set_plant_type(6, 5, PlantType::Grass);
        grid.set_plant_type(5, 4, PlantType::Grass);
        assert!(!neighbor_eligibility(&grid, 5, 5));

        grid.set_plant_type(4, 5, PlantType::Flower);
        grid.set_plant_type(6, 5, PlantType::Flower);
        grid.set_plant_type(5, 4, PlantType::Flower);
        assert!(neighbor_eligibility(&grid, 5, 5));
    }

    #[test]
    fn test_eligibility_at_grid_corner() {
        let mut grid = Grid::new();
        grid.set_plant_type(0, 0, PlantType::Flower);
        grid.set_plant_type(0, 1, PlantType::Grass);
        grid.set_plant_type(1, 0, PlantType::Grass);
        // Only two in-bounds neighbors exist; never eligible.
        assert!(!neighbor_eligibility(&grid, 0, 0));
    }
}
