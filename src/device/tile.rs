//! Tile classification and coordinates.
//!
//! AIE-ML arrays are organised in columns; the row within a column decides
//! what the tile is:
//!
//! ```text
//!   row 2..  Compute  (core + 64KB data memory)
//!   row 1    MemTile  (512KB, DMA only)
//!   row 0    Shim     (NoC / DDR interface)
//! ```
//!
//! Each type has its own stream switch register layout, so the tile type is
//! the key into the [`StreamModule`](super::StreamModule) tables.

use std::fmt;

/// Tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    /// Shim tile (row 0) - interface to NoC/DDR
    Shim,
    /// Memory tile (row 1) - large memory, no core
    MemTile,
    /// Compute tile (rows 2-5) - core + local memory
    Compute,
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileType::Shim => write!(f, "shim"),
            TileType::MemTile => write!(f, "memtile"),
            TileType::Compute => write!(f, "compute"),
        }
    }
}

/// Location of a tile in the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileLoc {
    /// Column index
    pub col: u8,
    /// Row index
    pub row: u8,
}

impl TileLoc {
    /// Create a tile location from column and row.
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for TileLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile({},{})", self.col, self.row)
    }
}
