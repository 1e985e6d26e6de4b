//! Device model and stream switch register definitions for AIE-ML arrays.
//!
//! This module provides:
//! - Architecture definitions for NPU variants (AIE2, AIE2P)
//! - Stream switch register layouts per tile type
//! - The device instance that validates and commits stream switch writes
//! - Register sinks for real hardware backends and dry runs
//!
//! # Architecture Overview
//!
//! AMD XDNA NPUs use a tile-based architecture:
//!
//! ```text
//!     Col 0    Col 1    Col 2    Col 3    Col 4
//!   +--------+--------+--------+--------+--------+
//! 5 |Compute |Compute |Compute |Compute |Compute |  <- Row 5
//!   +--------+--------+--------+--------+--------+
//! 4 |Compute |Compute |Compute |Compute |Compute |
//!   +--------+--------+--------+--------+--------+
//! 3 |Compute |Compute |Compute |Compute |Compute |
//!   +--------+--------+--------+--------+--------+
//! 2 |Compute |Compute |Compute |Compute |Compute |
//!   +--------+--------+--------+--------+--------+
//! 1 |MemTile |MemTile |MemTile |MemTile |MemTile |
//!   +--------+--------+--------+--------+--------+
//! 0 | Shim   | Shim   | Shim   | Shim   | Shim   |  <- DDR interface
//!   +--------+--------+--------+--------+--------+
//! ```
//!
//! Every tile has its own stream switch; shim, mem and compute tiles each
//! have a different set of ports.
//!
//! # Example
//!
//! ```
//! use aie_stream_switch::device::TileAddress;
//!
//! // Decode a register address
//! let addr = TileAddress::decode(0x0223F000);
//! assert_eq!(addr.col, 1);
//! assert_eq!(addr.row, 2);
//! assert_eq!(addr.offset, 0x3F000);
//! ```

pub mod aie2_spec;
pub mod arch_config;
pub mod bitfield;
pub mod instance;
pub mod io;
pub mod registers;
pub mod registers_spec;
pub mod stream_module;
pub mod stream_switch;
pub mod tile;

pub use arch_config::{Aie2Config, Aie2pConfig, ArchConfig};
pub use bitfield::BitField;
pub use instance::AieDevice;
pub use io::{RecordingIo, RegisterIo};
pub use registers::TileAddress;
pub use stream_module::{PortRange, StreamModule};
pub use stream_switch::{DropHeader, Packet, PortDirection, PortType, StreamSwitchError};
pub use tile::{TileLoc, TileType};
