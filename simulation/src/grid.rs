//! Grid Store - packed per-cell state buffer with row/col addressing.
//!
//! Each cell occupies three bytes (plant type, water level, growth stage)
//! in a flat row-major buffer. The packed encoding keeps a full-grid copy
//! cheap (15 x 15 x 3 = 675 bytes), which is what makes per-action
//! full-grid undo snapshots affordable. All access goes through the
//! row/col accessors; no other module addresses the buffer directly.

use serde::{Deserialize, Serialize};

/// Grid columns.
pub const GRID_WIDTH: usize = 15;
/// Grid rows.
pub const GRID_HEIGHT: usize = 15;
/// Packed bytes per cell: plant type, water level, growth stage.
pub const BYTES_PER_CELL: usize = 3;

/// A plant growth stage of 3 means the plant is mature.
pub const MATURE_STAGE: u8 = 3;

/// What occupies a cell. Codes match the packed byte encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PlantType {
    None = 0,
    Grass = 1,
    Flower = 2,
    Shrub = 3,
}

impl PlantType {
    /// Packed byte code for this plant type.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a packed byte; `None` (the Option) for codes outside 0..=3.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Grass),
            2 => Some(Self::Flower),
            3 => Some(Self::Shrub),
            _ => None,
        }
    }

    /// Tier ordering used by neighbor-eligibility rules:
    /// Grass(1) < Flower(2) < Shrub(3). Empty cells have no tier (0).
    pub fn tier(self) -> u8 {
        self as u8
    }
}

/// Unpacked view of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRecord {
    pub plant_type: PlantType,
    pub water_level: u8,
    pub growth_stage: u8,
}

/// A per-cell state transition emitted for the presentation layer.
///
/// The simulation never touches sprites; it reports `(row, col, plant,
/// stage)` records and the driver decides what to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub plant_type: PlantType,
    pub growth_stage: u8,
}

/// Packed cell-state buffer for the fixed garden grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    state: Vec<u8>,
}

impl Grid {
    /// Create a grid with every cell zeroed (empty, dry, stage 0).
    pub fn new() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            state: vec![0; GRID_WIDTH * GRID_HEIGHT * BYTES_PER_CELL],
        }
    }

    /// Rebuild a grid from a raw snapshot buffer.
    ///
    /// The buffer length must match the packed grid size exactly.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        if bytes.len() != GRID_WIDTH * GRID_HEIGHT * BYTES_PER_CELL {
            return None;
        }
        Some(Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            state: bytes,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw packed buffer, for snapshots and persistence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.state
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.state.clone()
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Byte offset of a cell. Panics on out-of-range coordinates; callers
    /// own bounds checking for anything user-supplied.
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            self.in_bounds(row, col),
            "cell ({row}, {col}) outside {}x{} grid",
            self.height,
            self.width
        );
        (row * self.width + col) * BYTES_PER_CELL
    }

    pub fn plant_type(&self, row: usize, col: usize) -> PlantType {
        // In-range codes are always valid: the only writers are the typed setters.
        PlantType::from_code(self.state[self.index(row, col)]).unwrap_or(PlantType::None)
    }

    pub fn water_level(&self, row: usize, col: usize) -> u8 {
        self.state[self.index(row, col) + 1]
    }

    pub fn growth_stage(&self, row: usize, col: usize) -> u8 {
        self.state[self.index(row, col) + 2]
    }

    pub fn cell(&self, row: usize, col: usize) -> CellRecord {
        CellRecord {
            plant_type: self.plant_type(row, col),
            water_level: self.water_level(row, col),
            growth_stage: self.growth_stage(row, col),
        }
    }

    pub fn set_plant_type(&mut self, row: usize, col: usize, plant_type: PlantType) {
        let i = self.index(row, col);
        self.state[i] = plant_type.code();
    }

    pub fn set_water_level(&mut self, row: usize, col: usize, water: u8) {
        let i = self.index(row, col);
        self.state[i + 1] = water;
    }

    pub fn set_growth_stage(&mut self, row: usize, col: usize, stage: u8) {
        debug_assert!(stage <= MATURE_STAGE, "growth stage {stage} above mature");
        let i = self.index(row, col);
        self.state[i + 2] = stage;
    }

    /// Add (or subtract, for negative amounts) water, saturating into the
    /// byte range 0..=255.
    pub fn add_water(&mut self, row: usize, col: usize, amount: i32) {
        let current = i32::from(self.water_level(row, col));
        let new = (current + amount).clamp(0, 255) as u8;
        self.set_water_level(row, col, new);
    }

    /// Iterate every cell as `(row, col, record)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellRecord)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| (row, col, self.cell(row, col)))
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
