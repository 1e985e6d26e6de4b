//! Architecture configuration trait and implementations.
//!
//! An [`ArchConfig`] answers the questions the stream switch code needs about
//! the array: which tile type sits at a location, where that tile's registers
//! start, and which stream switch layout belongs to a tile type.
//!
//! # Design Philosophy
//!
//! Instead of checking `row == 0` for shim tiles everywhere, code should call
//! `arch.tile_type(loc)`. This allows different architectures to have
//! different tile layouts without code changes.
//!
//! # Example
//!
//! ```
//! use aie_stream_switch::device::arch_config::{ArchConfig, Aie2Config};
//! use aie_stream_switch::device::{TileLoc, TileType};
//! use std::sync::Arc;
//!
//! let arch: Arc<dyn ArchConfig> = Arc::new(Aie2Config);
//! assert_eq!(arch.columns(), 5);
//! assert_eq!(arch.rows(), 6);
//! assert_eq!(arch.tile_type(TileLoc::new(0, 0)), Some(TileType::Shim));
//! assert_eq!(arch.tile_type(TileLoc::new(0, 1)), Some(TileType::MemTile));
//! assert_eq!(arch.tile_type(TileLoc::new(0, 2)), Some(TileType::Compute));
//! assert_eq!(arch.tile_type(TileLoc::new(0, 6)), None);
//! ```

use std::sync::Arc;

use super::aie2_spec;
use super::registers::TileAddress;
use super::stream_module::StreamModule;
use super::tile::{TileLoc, TileType};

/// Architecture configuration trait for NPU variants.
pub trait ArchConfig: Send + Sync + std::fmt::Debug {
    // ========================================================================
    // Array Dimensions
    // ========================================================================

    /// Get the number of columns in the tile array.
    fn columns(&self) -> u8;

    /// Get the number of rows in the tile array.
    fn rows(&self) -> u8;

    /// Check if a tile position is valid.
    fn is_valid_tile(&self, loc: TileLoc) -> bool {
        loc.col < self.columns() && loc.row < self.rows()
    }

    // ========================================================================
    // Tile Classification
    // ========================================================================

    /// Get the tile type at a location, or `None` outside the array.
    fn tile_type(&self, loc: TileLoc) -> Option<TileType>;

    /// Offset of a tile's register space from the array base address.
    fn tile_offset(&self, loc: TileLoc) -> u64 {
        TileAddress::tile_base(loc)
    }

    // ========================================================================
    // Stream Switch
    // ========================================================================

    /// Get the stream switch layout of a tile type.
    fn stream_module(&self, tile_type: TileType) -> &'static StreamModule;

    /// Get the architecture name for display.
    fn name(&self) -> &'static str;
}

/// Row layout shared by the AIE-ML parts: shim, one mem tile row, compute.
fn aie_ml_tile_type(arch: &dyn ArchConfig, loc: TileLoc) -> Option<TileType> {
    if !arch.is_valid_tile(loc) {
        return None;
    }
    Some(match loc.row {
        0 => TileType::Shim,
        1 => TileType::MemTile,
        _ => TileType::Compute,
    })
}

// ============================================================================
// AIE2 Configuration (NPU1 - Phoenix/HawkPoint)
// ============================================================================

/// AIE2 architecture configuration.
///
/// The tile array is 5 columns x 6 rows:
/// - Row 0: Shim tiles (DDR interface via NoC)
/// - Row 1: Memory tiles
/// - Rows 2-5: Compute tiles
#[derive(Debug, Clone, Copy, Default)]
pub struct Aie2Config;

impl ArchConfig for Aie2Config {
    fn columns(&self) -> u8 {
        5
    }

    fn rows(&self) -> u8 {
        6
    }

    fn tile_type(&self, loc: TileLoc) -> Option<TileType> {
        aie_ml_tile_type(self, loc)
    }

    fn stream_module(&self, tile_type: TileType) -> &'static StreamModule {
        aie2_spec::stream_module(tile_type)
    }

    fn name(&self) -> &'static str {
        "AIE2 (NPU1 - Phoenix/HawkPoint)"
    }
}

// ============================================================================
// AIE2P Configuration (NPU2 - Strix/Krackan)
// ============================================================================

/// AIE2P architecture configuration.
///
/// Same stream switch layout as AIE2 on a wider 8-column array.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aie2pConfig;

impl ArchConfig for Aie2pConfig {
    fn columns(&self) -> u8 {
        8
    }

    fn rows(&self) -> u8 {
        6
    }

    fn tile_type(&self, loc: TileLoc) -> Option<TileType> {
        aie_ml_tile_type(self, loc)
    }

    fn stream_module(&self, tile_type: TileType) -> &'static StreamModule {
        aie2_spec::stream_module(tile_type)
    }

    fn name(&self) -> &'static str {
        "AIE2P (NPU2 - Strix/Krackan)"
    }
}

/// Look up an architecture by short name (`aie2`, `npu1`, `aie2p`, `npu2`).
pub fn arch_from_name(name: &str) -> Option<Arc<dyn ArchConfig>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "aie2" | "npu1" => Some(Arc::new(Aie2Config)),
        "aie2p" | "npu2" => Some(Arc::new(Aie2pConfig)),
        _ => None,
    }
}

/// Default architecture (AIE2).
pub fn default_arch() -> Arc<dyn ArchConfig> {
    Arc::new(Aie2Config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aie2_dimensions() {
        let arch = Aie2Config;
        assert_eq!(arch.columns(), 5);
        assert_eq!(arch.rows(), 6);
        assert!(arch.is_valid_tile(TileLoc::new(4, 5)));
        assert!(!arch.is_valid_tile(TileLoc::new(5, 0)));
        assert!(!arch.is_valid_tile(TileLoc::new(0, 6)));
    }

    #[test]
    fn test_aie2_tile_types() {
        let arch = Aie2Config;
        for col in 0..5 {
            assert_eq!(arch.tile_type(TileLoc::new(col, 0)), Some(TileType::Shim));
            assert_eq!(arch.tile_type(TileLoc::new(col, 1)), Some(TileType::MemTile));
            for row in 2..6 {
                assert_eq!(arch.tile_type(TileLoc::new(col, row)), Some(TileType::Compute));
            }
        }
        assert_eq!(arch.tile_type(TileLoc::new(5, 2)), None);
    }

    #[test]
    fn test_aie2p_is_wider() {
        let arch = Aie2pConfig;
        assert_eq!(arch.tile_type(TileLoc::new(7, 3)), Some(TileType::Compute));
        assert_eq!(arch.tile_type(TileLoc::new(8, 3)), None);
    }

    #[test]
    fn test_tile_offset() {
        let arch = Aie2Config;
        assert_eq!(arch.tile_offset(TileLoc::new(0, 0)), 0);
        assert_eq!(arch.tile_offset(TileLoc::new(1, 2)), 0x0220_0000);
        assert_eq!(arch.tile_offset(TileLoc::new(3, 1)), 0x0610_0000);
    }

    #[test]
    fn test_stream_module_per_tile_type() {
        let arch = Aie2Config;
        assert!(std::ptr::eq(
            arch.stream_module(TileType::Compute),
            &aie2_spec::COMPUTE_STREAM_MODULE
        ));
        assert!(std::ptr::eq(
            arch.stream_module(TileType::MemTile),
            &aie2_spec::MEM_TILE_STREAM_MODULE
        ));
    }

    #[test]
    fn test_arch_from_name() {
        assert_eq!(arch_from_name("aie2").map(|a| a.columns()), Some(5));
        assert_eq!(arch_from_name("NPU1").map(|a| a.columns()), Some(5));
        assert_eq!(arch_from_name("npu2").map(|a| a.columns()), Some(8));
        assert_eq!(arch_from_name(" aie2p ").map(|a| a.columns()), Some(8));
        assert!(arch_from_name("aie1").is_none());
        assert_eq!(default_arch().name(), Aie2Config.name());
    }

    #[test]
    fn test_trait_object() {
        let arch: Arc<dyn ArchConfig> = Arc::new(Aie2Config);
        assert!(arch.name().contains("AIE2"));
    }
}
