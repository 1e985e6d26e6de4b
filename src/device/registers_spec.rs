//! AIE-ML Stream Switch Register Specification
//!
//! Addresses and bit field layouts of the stream switch configuration
//! registers, per AMD AM025 (AIE-ML Register Reference). This module only
//! holds raw constants; the per-tile-type descriptors that tie them together
//! live in [`aie2_spec`](super::aie2_spec).

// ============================================================================
// Address Space Layout (AM020 Ch2)
// ============================================================================

/// Column shift for tile address encoding (bits 31:25)
pub const TILE_COL_SHIFT: u32 = 25;

/// Row shift for tile address encoding (bits 24:20)
pub const TILE_ROW_SHIFT: u32 = 20;

/// Offset mask for tile-local addresses (bits 19:0)
pub const TILE_OFFSET_MASK: u32 = 0xFFFFF;

/// Width of a stream switch configuration register in bytes.
pub const REGISTER_WIDTH: u32 = 4;

// ============================================================================
// Stream Switch Register Blocks
// ============================================================================

pub mod core_module {
    //! Compute tile stream switch. AM025 Section: CORE_MODULE/STREAM_SWITCH

    /// Master port configuration registers (AIE_Core0 is first)
    pub const STREAM_SWITCH_MASTER_BASE: u32 = 0x3F000;

    /// Slave port configuration registers (AIE_Core0 is first)
    pub const STREAM_SWITCH_SLAVE_BASE: u32 = 0x3F100;

    /// Slave slot registers: 4 slots per slave port
    pub const STREAM_SWITCH_SLOT_BASE: u32 = 0x3F200;
}

pub mod mem_tile_module {
    //! Memory tile stream switch. AM025 Section: MEMORY_TILE_MODULE/STREAM_SWITCH

    /// Master port configuration registers (DMA0 is first)
    pub const STREAM_SWITCH_MASTER_BASE: u32 = 0xB0000;

    /// Slave port configuration registers (DMA0 is first)
    pub const STREAM_SWITCH_SLAVE_BASE: u32 = 0xB0100;

    /// Slave slot registers
    pub const STREAM_SWITCH_SLOT_BASE: u32 = 0xB0200;
}

pub mod shim_module {
    //! Shim (NoC/PL interface) tile stream switch. AM025 Section: PL_MODULE/STREAM_SWITCH

    /// Master port configuration registers (Tile_Ctrl is first)
    pub const STREAM_SWITCH_MASTER_BASE: u32 = 0x3F000;

    /// Slave port configuration registers (Tile_Ctrl is first)
    pub const STREAM_SWITCH_SLAVE_BASE: u32 = 0x3F100;

    /// Slave slot registers
    pub const STREAM_SWITCH_SLOT_BASE: u32 = 0x3F200;
}

// ============================================================================
// Stream Switch Register Fields (AM025 */stream_switch/*.txt)
// ============================================================================

pub mod stream_switch {
    //! Field layouts shared by all AIE-ML tile types.

    /// Spacing between consecutive port configuration registers
    pub const PORT_OFFSET: u32 = 0x4;

    /// Number of packet-switch slots per slave port
    pub const NUM_SLAVE_SLOTS: u8 = 4;

    /// Spacing between consecutive slots of one port
    pub const SLOT_OFFSET: u32 = 0x4;

    /// Spacing between the slot blocks of consecutive slave ports
    pub const SLOT_OFFSET_PER_PORT: u32 = 0x10;

    // Master_Config register

    /// Master_Enable (bit 31)
    pub const MASTER_ENABLE_LSB: u32 = 31;
    pub const MASTER_ENABLE_MASK: u32 = 0x8000_0000;

    /// Packet_Enable (bit 30)
    pub const MASTER_PACKET_ENABLE_LSB: u32 = 30;
    pub const MASTER_PACKET_ENABLE_MASK: u32 = 0x4000_0000;

    /// Drop_Header (bit 7)
    pub const MASTER_DROP_HEADER_LSB: u32 = 7;
    pub const MASTER_DROP_HEADER_MASK: u32 = 0x80;

    /// Configuration (bits 6:0): slave select in circuit mode,
    /// MSel_Enable/Arbiter in packet mode
    pub const MASTER_CONFIG_LSB: u32 = 0;
    pub const MASTER_CONFIG_MASK: u32 = 0x7F;

    // Packet mode sub-fields of Configuration

    /// Arbiter (bits 2:0)
    pub const MASTER_ARBITER_LSB: u32 = 0;
    pub const MASTER_ARBITER_MASK: u32 = 0x7;

    /// MSel_Enable (bits 6:3)
    pub const MASTER_MSEL_ENABLE_LSB: u32 = 3;
    pub const MASTER_MSEL_ENABLE_MASK: u32 = 0x78;

    // Slave_Config register

    /// Slave_Enable (bit 31)
    pub const SLAVE_ENABLE_LSB: u32 = 31;
    pub const SLAVE_ENABLE_MASK: u32 = 0x8000_0000;

    /// Packet_Enable (bit 30)
    pub const SLAVE_PACKET_ENABLE_LSB: u32 = 30;
    pub const SLAVE_PACKET_ENABLE_MASK: u32 = 0x4000_0000;

    // Slave_Slot register

    /// ID (bits 28:24)
    pub const SLOT_ID_LSB: u32 = 24;
    pub const SLOT_ID_MASK: u32 = 0x1F00_0000;

    /// Mask (bits 20:16)
    pub const SLOT_MASK_LSB: u32 = 16;
    pub const SLOT_MASK_MASK: u32 = 0x001F_0000;

    /// Enable (bit 8)
    pub const SLOT_ENABLE_LSB: u32 = 8;
    pub const SLOT_ENABLE_MASK: u32 = 0x100;

    /// MSel (bits 5:4)
    pub const SLOT_MSEL_LSB: u32 = 4;
    pub const SLOT_MSEL_MASK: u32 = 0x30;

    /// Arbiter (bits 2:0)
    pub const SLOT_ARBITER_LSB: u32 = 0;
    pub const SLOT_ARBITER_MASK: u32 = 0x7;

    // Argument limits

    /// Highest arbiter index
    pub const ARBITER_MAX: u8 = 0x7;

    /// Highest MSel value in a slot
    pub const MSEL_MAX: u8 = 0x3;

    /// Highest MSel_Enable bitmap on a master
    pub const MSEL_ENABLE_MAX: u8 = 0xF;

    /// Valid bits of a slot ID mask
    pub const SLOT_ID_MASK_BITS: u8 = 0x1F;

    /// Highest packet ID
    pub const PACKET_ID_MAX: u8 = 0x1F;
}
