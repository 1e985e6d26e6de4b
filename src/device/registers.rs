//! Tile address encoding.
//!
//! AIE-ML addresses encode tile location and register offset:
//! ```text
//! [31:25] = column
//! [24:20] = row
//! [19:0]  = offset
//! ```
//!
//! Stream switch configuration only ever encodes; decoding is kept for the
//! CLI and for log output.

use std::fmt;

use super::registers_spec::{TILE_COL_SHIFT, TILE_OFFSET_MASK, TILE_ROW_SHIFT};
use super::tile::TileLoc;

/// Decoded tile address with column, row, and register offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileAddress {
    /// Column index
    pub col: u8,
    /// Row index
    pub row: u8,
    /// Register offset within tile (20-bit)
    pub offset: u32,
}

impl TileAddress {
    /// Decode an array-relative address into tile coordinates and offset.
    pub fn decode(addr: u64) -> Self {
        Self {
            col: ((addr >> TILE_COL_SHIFT) & 0x7F) as u8,
            row: ((addr >> TILE_ROW_SHIFT) & 0x1F) as u8,
            offset: (addr as u32) & TILE_OFFSET_MASK,
        }
    }

    /// Encode tile coordinates and offset into an array-relative address.
    pub fn encode(col: u8, row: u8, offset: u32) -> u64 {
        ((col as u64) << TILE_COL_SHIFT)
            | ((row as u64) << TILE_ROW_SHIFT)
            | (offset & TILE_OFFSET_MASK) as u64
    }

    /// Array-relative base address of a tile.
    pub fn tile_base(loc: TileLoc) -> u64 {
        Self::encode(loc.col, loc.row, 0)
    }

    /// Tile location of this address.
    pub fn loc(&self) -> TileLoc {
        TileLoc::new(self.col, self.row)
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile({},{}) @ 0x{:05X}", self.col, self.row, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let addr = TileAddress::encode(1, 2, 0x3F104);
        assert_eq!(addr, 0x0223_F104);

        let decoded = TileAddress::decode(addr);
        assert_eq!(decoded.col, 1);
        assert_eq!(decoded.row, 2);
        assert_eq!(decoded.offset, 0x3F104);
        assert_eq!(decoded.loc(), TileLoc::new(1, 2));
    }

    #[test]
    fn test_tile_base() {
        assert_eq!(TileAddress::tile_base(TileLoc::new(0, 0)), 0);
        assert_eq!(TileAddress::tile_base(TileLoc::new(0, 1)), 0x0010_0000);
        assert_eq!(TileAddress::tile_base(TileLoc::new(4, 5)), 0x0850_0000);
    }

    #[test]
    fn test_display() {
        let addr = TileAddress::decode(0x0210_0000 | 0xB0100);
        assert_eq!(addr.to_string(), "tile(1,1) @ 0xB0100");
    }
}
