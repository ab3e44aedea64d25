//! Static plant definition table.
//!
//! Each plantable type carries a display icon and an ordered list of
//! growth conditions. Order is priority order: growth evaluation takes
//! the FIRST condition satisfied by the day's sun and the cell's water,
//! so reordering entries changes behavior.

use once_cell::sync::Lazy;

use crate::grid::PlantType;

/// One way a plant can advance a growth stage on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthCondition {
    /// Minimum sun level for the day.
    pub min_sun: i32,
    /// Minimum water accumulated in the cell.
    pub min_water: i32,
    /// Water consumed from the cell when this condition fires.
    pub water_required: u8,
}

/// Static definition for one plant type.
#[derive(Debug, Clone, Copy)]
pub struct PlantDefinition {
    pub plant_type: PlantType,
    pub icon: &'static str,
    /// Evaluated first-match, in order.
    pub growth_conditions: &'static [GrowthCondition],
}

static PLANT_DEFINITIONS: Lazy<Vec<PlantDefinition>> = Lazy::new(|| {
    vec![
        PlantDefinition {
            plant_type: PlantType::Grass,
            icon: "🌿",
            growth_conditions: &[
                // Bright days need little standing water...
                GrowthCondition { min_sun: 6, min_water: 10, water_required: 6 },
                // ...dim days need a well-soaked cell.
                GrowthCondition { min_sun: 3, min_water: 20, water_required: 10 },
            ],
        },
        PlantDefinition {
            plant_type: PlantType::Flower,
            icon: "🌸",
            growth_conditions: &[
                GrowthCondition { min_sun: 7, min_water: 15, water_required: 8 },
                GrowthCondition { min_sun: 4, min_water: 30, water_required: 14 },
            ],
        },
        PlantDefinition {
            plant_type: PlantType::Shrub,
            icon: "🌳",
            growth_conditions: &[
                GrowthCondition { min_sun: 8, min_water: 20, water_required: 12 },
                GrowthCondition { min_sun: 5, min_water: 40, water_required: 18 },
            ],
        },
    ]
});

/// Look up the definition for a plant type. Empty cells have none.
pub fn definition(plant_type: PlantType) -> Option<&'static PlantDefinition> {
    PLANT_DEFINITIONS.iter().find(|d| d.plant_type == plant_type)
}

/// Display icon for a seed choice, or empty string for `None`.
pub fn icon(plant_type: PlantType) -> &'static str {
    definition(plant_type).map_or("", |d| d.icon)
}
