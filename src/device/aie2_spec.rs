//! AIE2 (AIE-ML) Stream Switch Descriptor Tables
//!
//! One [`StreamModule`] per tile type, derived from AMD AM025 (AIE-ML
//! Register Reference). Tables are indexed by [`PortType`] in enum order:
//!
//! ```text
//!   Core, Dma, Ctrl, Fifo, South, West, North, East, Trace
//! ```
//!
//! Within one tile type the slave registers of all port types form a single
//! contiguous block starting at `slave_config_base`. That is what makes the
//! slave index (the value a master's slave-select field carries) dense.

use super::bitfield::BitField;
use super::registers_spec::{core_module, mem_tile_module, shim_module, stream_switch as ss};
use super::stream_module::{PortRange, StreamModule};
use super::stream_switch::PortType;
use super::tile::TileType;

// ============================================================================
// Shared Field Layout
// ============================================================================

const fn aie_ml_stream_module(
    slave_config_base: u32,
    master_ports: [PortRange; PortType::COUNT],
    slave_ports: [PortRange; PortType::COUNT],
    slave_slots: [PortRange; PortType::COUNT],
) -> StreamModule {
    StreamModule {
        slave_config_base,
        port_offset: ss::PORT_OFFSET,
        num_slave_slots: ss::NUM_SLAVE_SLOTS,
        slot_offset: ss::SLOT_OFFSET,
        slot_offset_per_port: ss::SLOT_OFFSET_PER_PORT,
        master_enable: BitField::new(ss::MASTER_ENABLE_LSB, ss::MASTER_ENABLE_MASK),
        master_packet_enable: BitField::new(ss::MASTER_PACKET_ENABLE_LSB, ss::MASTER_PACKET_ENABLE_MASK),
        drop_header: BitField::new(ss::MASTER_DROP_HEADER_LSB, ss::MASTER_DROP_HEADER_MASK),
        config: BitField::new(ss::MASTER_CONFIG_LSB, ss::MASTER_CONFIG_MASK),
        slave_enable: BitField::new(ss::SLAVE_ENABLE_LSB, ss::SLAVE_ENABLE_MASK),
        slave_packet_enable: BitField::new(ss::SLAVE_PACKET_ENABLE_LSB, ss::SLAVE_PACKET_ENABLE_MASK),
        slot_packet_id: BitField::new(ss::SLOT_ID_LSB, ss::SLOT_ID_MASK),
        slot_mask: BitField::new(ss::SLOT_MASK_LSB, ss::SLOT_MASK_MASK),
        slot_enable: BitField::new(ss::SLOT_ENABLE_LSB, ss::SLOT_ENABLE_MASK),
        slot_msel: BitField::new(ss::SLOT_MSEL_LSB, ss::SLOT_MSEL_MASK),
        slot_arbiter: BitField::new(ss::SLOT_ARBITER_LSB, ss::SLOT_ARBITER_MASK),
        master_ports,
        slave_ports,
        slave_slots,
    }
}

// ============================================================================
// Compute Tile (AM025 CORE_MODULE/STREAM_SWITCH)
// ============================================================================
//
// Masters: 0=AIE_Core0, 1-2=DMA, 3=Tile_Ctrl, 4=FIFO0, 5-8=South(4),
//          9-12=West(4), 13-18=North(6), 19-22=East(4)          = 23 total
// Slaves:  0=AIE_Core0, 1-2=DMA, 3=Tile_Ctrl, 4=FIFO0, 5-10=South(6),
//          11-14=West(4), 15-18=North(4), 19-22=East(4),
//          23=AIE_Trace, 24=Mem_Trace                            = 25 total

const CORE_MASTER: u32 = core_module::STREAM_SWITCH_MASTER_BASE;
const CORE_SLAVE: u32 = core_module::STREAM_SWITCH_SLAVE_BASE;
const CORE_SLOT: u32 = core_module::STREAM_SWITCH_SLOT_BASE;

/// Compute tile stream switch layout.
pub static COMPUTE_STREAM_MODULE: StreamModule = aie_ml_stream_module(
    CORE_SLAVE,
    [
        PortRange::new(CORE_MASTER, 1), // Core
        PortRange::new(CORE_MASTER + 0x004, 2), // Dma
        PortRange::new(CORE_MASTER + 0x00C, 1), // Ctrl
        PortRange::new(CORE_MASTER + 0x010, 1), // Fifo
        PortRange::new(CORE_MASTER + 0x014, 4), // South
        PortRange::new(CORE_MASTER + 0x024, 4), // West
        PortRange::new(CORE_MASTER + 0x034, 6), // North
        PortRange::new(CORE_MASTER + 0x04C, 4), // East
        PortRange::NONE, // Trace
    ],
    [
        PortRange::new(CORE_SLAVE, 1), // Core
        PortRange::new(CORE_SLAVE + 0x004, 2), // Dma
        PortRange::new(CORE_SLAVE + 0x00C, 1), // Ctrl
        PortRange::new(CORE_SLAVE + 0x010, 1), // Fifo
        PortRange::new(CORE_SLAVE + 0x014, 6), // South
        PortRange::new(CORE_SLAVE + 0x02C, 4), // West
        PortRange::new(CORE_SLAVE + 0x03C, 4), // North
        PortRange::new(CORE_SLAVE + 0x04C, 4), // East
        PortRange::new(CORE_SLAVE + 0x05C, 2), // Trace
    ],
    [
        PortRange::new(CORE_SLOT, 1), // Core
        PortRange::new(CORE_SLOT + 0x010, 2), // Dma
        PortRange::new(CORE_SLOT + 0x030, 1), // Ctrl
        PortRange::new(CORE_SLOT + 0x040, 1), // Fifo
        PortRange::new(CORE_SLOT + 0x050, 6), // South
        PortRange::new(CORE_SLOT + 0x0B0, 4), // West
        PortRange::new(CORE_SLOT + 0x0F0, 4), // North
        PortRange::new(CORE_SLOT + 0x130, 4), // East
        PortRange::new(CORE_SLOT + 0x170, 2), // Trace
    ],
);

// ============================================================================
// Memory Tile (AM025 MEMORY_TILE_MODULE/STREAM_SWITCH)
// ============================================================================
//
// Masters: 0-5=DMA, 6=Tile_Ctrl, 7-10=South(4), 11-16=North(6)   = 17 total
// Slaves:  0-5=DMA, 6=Tile_Ctrl, 7-12=South(6), 13-16=North(4),
//          17=Trace                                              = 18 total
//
// No core, FIFO, East or West ports.

const MEM_TILE_MASTER: u32 = mem_tile_module::STREAM_SWITCH_MASTER_BASE;
const MEM_TILE_SLAVE: u32 = mem_tile_module::STREAM_SWITCH_SLAVE_BASE;
const MEM_TILE_SLOT: u32 = mem_tile_module::STREAM_SWITCH_SLOT_BASE;

/// Memory tile stream switch layout.
pub static MEM_TILE_STREAM_MODULE: StreamModule = aie_ml_stream_module(
    MEM_TILE_SLAVE,
    [
        PortRange::NONE, // Core
        PortRange::new(MEM_TILE_MASTER, 6), // Dma
        PortRange::new(MEM_TILE_MASTER + 0x018, 1), // Ctrl
        PortRange::NONE, // Fifo
        PortRange::new(MEM_TILE_MASTER + 0x01C, 4), // South
        PortRange::NONE, // West
        PortRange::new(MEM_TILE_MASTER + 0x02C, 6), // North
        PortRange::NONE, // East
        PortRange::NONE, // Trace
    ],
    [
        PortRange::NONE, // Core
        PortRange::new(MEM_TILE_SLAVE, 6), // Dma
        PortRange::new(MEM_TILE_SLAVE + 0x018, 1), // Ctrl
        PortRange::NONE, // Fifo
        PortRange::new(MEM_TILE_SLAVE + 0x01C, 6), // South
        PortRange::NONE, // West
        PortRange::new(MEM_TILE_SLAVE + 0x034, 4), // North
        PortRange::NONE, // East
        PortRange::new(MEM_TILE_SLAVE + 0x044, 1), // Trace
    ],
    [
        PortRange::NONE, // Core
        PortRange::new(MEM_TILE_SLOT, 6), // Dma
        PortRange::new(MEM_TILE_SLOT + 0x060, 1), // Ctrl
        PortRange::NONE, // Fifo
        PortRange::new(MEM_TILE_SLOT + 0x070, 6), // South
        PortRange::NONE, // West
        PortRange::new(MEM_TILE_SLOT + 0x0D0, 4), // North
        PortRange::NONE, // East
        PortRange::new(MEM_TILE_SLOT + 0x110, 1), // Trace
    ],
);

// ============================================================================
// Shim Tile (AM025 PL_MODULE/STREAM_SWITCH)
// ============================================================================
//
// Masters: 0=Tile_Ctrl, 1=FIFO0, 2-7=South(6), 8-11=West(4),
//          12-17=North(6), 18-21=East(4)                         = 22 total
// Slaves:  0=Tile_Ctrl, 1=FIFO0, 2-9=South(8), 10-13=West(4),
//          14-17=North(4), 18-21=East(4), 22=Trace               = 23 total
//
// Shim DMA traffic enters and leaves through the South ports.

const SHIM_MASTER: u32 = shim_module::STREAM_SWITCH_MASTER_BASE;
const SHIM_SLAVE: u32 = shim_module::STREAM_SWITCH_SLAVE_BASE;
const SHIM_SLOT: u32 = shim_module::STREAM_SWITCH_SLOT_BASE;

/// Shim tile stream switch layout.
pub static SHIM_STREAM_MODULE: StreamModule = aie_ml_stream_module(
    SHIM_SLAVE,
    [
        PortRange::NONE, // Core
        PortRange::NONE, // Dma
        PortRange::new(SHIM_MASTER, 1), // Ctrl
        PortRange::new(SHIM_MASTER + 0x004, 1), // Fifo
        PortRange::new(SHIM_MASTER + 0x008, 6), // South
        PortRange::new(SHIM_MASTER + 0x020, 4), // West
        PortRange::new(SHIM_MASTER + 0x030, 6), // North
        PortRange::new(SHIM_MASTER + 0x048, 4), // East
        PortRange::NONE, // Trace
    ],
    [
        PortRange::NONE, // Core
        PortRange::NONE, // Dma
        PortRange::new(SHIM_SLAVE, 1), // Ctrl
        PortRange::new(SHIM_SLAVE + 0x004, 1), // Fifo
        PortRange::new(SHIM_SLAVE + 0x008, 8), // South
        PortRange::new(SHIM_SLAVE + 0x028, 4), // West
        PortRange::new(SHIM_SLAVE + 0x038, 4), // North
        PortRange::new(SHIM_SLAVE + 0x048, 4), // East
        PortRange::new(SHIM_SLAVE + 0x058, 1), // Trace
    ],
    [
        PortRange::NONE, // Core
        PortRange::NONE, // Dma
        PortRange::new(SHIM_SLOT, 1), // Ctrl
        PortRange::new(SHIM_SLOT + 0x010, 1), // Fifo
        PortRange::new(SHIM_SLOT + 0x020, 8), // South
        PortRange::new(SHIM_SLOT + 0x0A0, 4), // West
        PortRange::new(SHIM_SLOT + 0x0E0, 4), // North
        PortRange::new(SHIM_SLOT + 0x120, 4), // East
        PortRange::new(SHIM_SLOT + 0x160, 1), // Trace
    ],
);

/// Look up the AIE-ML stream switch layout of a tile type.
pub fn stream_module(tile_type: TileType) -> &'static StreamModule {
    match tile_type {
        TileType::Shim => &SHIM_STREAM_MODULE,
        TileType::MemTile => &MEM_TILE_STREAM_MODULE,
        TileType::Compute => &COMPUTE_STREAM_MODULE,
    }
}
