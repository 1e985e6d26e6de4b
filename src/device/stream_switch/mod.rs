//! Stream switch configuration.
//!
//! Each tile has a stream switch: a crossbar between typed slave (input) and
//! master (output) ports.
//!
//! ```text
//!                    North
//!                      ↑
//!                ┌─────┴─────┐
//!                │           │
//!       West ◄───┤  Stream   ├───► East
//!                │  Switch   │
//!                │           │
//!                └─────┬─────┘
//!                      ↓
//!              South / Core / DMA
//! ```
//!
//! Two routing modes are configured here:
//!
//! - **Circuit switching**: a master port is statically bound to one slave
//!   port. The master register's configuration field carries the *slave
//!   index*, a dense enumeration of all slave ports of the tile.
//! - **Packet switching**: slave ports match incoming packet IDs against up
//!   to four slots; each slot picks an arbiter and an MSel group, and master
//!   ports enable the MSel groups they accept.
//!
//! Every operation computes its register words from the request alone and
//! validates everything before the first write. Nothing is cached; the
//! hardware registers are the only state.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use aie_stream_switch::device::{AieDevice, Aie2Config, RecordingIo, TileLoc};
//! use aie_stream_switch::device::stream_switch::PortType;
//!
//! let mut dev = AieDevice::new(Arc::new(Aie2Config), 0, RecordingIo::new());
//! dev.initialize();
//!
//! // South0 input feeds the core of compute tile (1,2)
//! dev.connect_circuit(TileLoc::new(1, 2), PortType::South, 0, PortType::Core, 0).unwrap();
//! assert_eq!(dev.io().len(), 2);
//! ```

pub mod builder;
pub mod circuit;
pub mod decode;
pub mod packet;

pub use builder::{
    master_port_register, slave_index, slave_port_register, slave_slot_register, RegisterWrite,
};
pub use decode::{decode_register, DecodedRegister, RegisterFields};
pub use packet::{MasterPacketConfig, SlotMatch};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::tile::TileLoc;

/// Stream port direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// Master port (sends data)
    Master,
    /// Slave port (receives data)
    Slave,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Master => write!(f, "master"),
            PortDirection::Slave => write!(f, "slave"),
        }
    }
}

/// Stream switch port type (what the port connects to).
///
/// The discriminants are the raw tags used by register tables and by the
/// command line; [`PortType::COUNT`] is one past the last valid tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PortType {
    /// Local AIE core
    Core = 0,
    /// Local DMA engine
    Dma = 1,
    /// Tile control (memory-mapped access over streams)
    Ctrl = 2,
    /// Stream FIFO
    Fifo = 3,
    /// Tile to the south
    South = 4,
    /// Tile to the west
    West = 5,
    /// Tile to the north
    North = 6,
    /// Tile to the east
    East = 7,
    /// Trace/debug output
    Trace = 8,
}

impl PortType {
    /// Number of port types; raw tags at or above this are invalid.
    pub const COUNT: usize = 9;

    /// All port types in tag order.
    pub const ALL: [PortType; PortType::COUNT] = [
        PortType::Core,
        PortType::Dma,
        PortType::Ctrl,
        PortType::Fifo,
        PortType::South,
        PortType::West,
        PortType::North,
        PortType::East,
        PortType::Trace,
    ];

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            PortType::Core => "core",
            PortType::Dma => "dma",
            PortType::Ctrl => "ctrl",
            PortType::Fifo => "fifo",
            PortType::South => "south",
            PortType::West => "west",
            PortType::North => "north",
            PortType::East => "east",
            PortType::Trace => "trace",
        }
    }
}

impl TryFrom<u8> for PortType {
    type Error = StreamSwitchError;

    fn try_from(tag: u8) -> Result<Self> {
        PortType::ALL.get(tag as usize).copied().ok_or_else(|| {
            log::error!("Invalid stream switch port type {}", tag);
            StreamSwitchError::InvalidPortType(tag)
        })
    }
}

impl FromStr for PortType {
    type Err = StreamSwitchError;

    /// Parse a port type name (`"north"`) or raw tag (`"6"`).
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(tag) = s.parse::<u8>() {
            return PortType::try_from(tag);
        }
        let lower = s.to_ascii_lowercase();
        PortType::ALL.iter().copied().find(|t| t.name() == lower).ok_or_else(|| {
            log::error!("Unknown stream switch port type '{}'", s);
            StreamSwitchError::UnknownPortType(s.to_string())
        })
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PortType::Core => "Core",
            PortType::Dma => "Dma",
            PortType::Ctrl => "Ctrl",
            PortType::Fifo => "Fifo",
            PortType::South => "South",
            PortType::West => "West",
            PortType::North => "North",
            PortType::East => "East",
            PortType::Trace => "Trace",
        };
        f.write_str(name)
    }
}

/// Whether a packet-switched master strips the packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DropHeader {
    /// Forward the header word
    #[default]
    DoNotDrop = 0,
    /// Strip the header word before forwarding
    Drop = 1,
}

impl From<bool> for DropHeader {
    fn from(drop: bool) -> Self {
        if drop {
            DropHeader::Drop
        } else {
            DropHeader::DoNotDrop
        }
    }
}

/// Packet identity matched by slave slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Packet {
    /// 5-bit packet ID
    pub id: u8,
    /// Packet type (carried in the header, not matched by slots)
    pub pkt_type: u8,
}

impl Packet {
    /// Create a packet value.
    pub const fn new(id: u8, pkt_type: u8) -> Self {
        Self { id, pkt_type }
    }
}

/// A port, and optionally one of its slots, named in an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRef {
    pub direction: PortDirection,
    pub port_type: PortType,
    pub port: u8,
    pub slot: Option<u8>,
}

impl PortRef {
    /// Reference a port register.
    pub fn port(direction: PortDirection, port_type: PortType, port: u8) -> Self {
        Self { direction, port_type, port, slot: None }
    }

    /// Reference a slave slot register.
    pub fn slot(port_type: PortType, port: u8, slot: u8) -> Self {
        Self { direction: PortDirection::Slave, port_type, port, slot: Some(slot) }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}[{}]", self.direction, self.port_type, self.port)?;
        if let Some(slot) = self.slot {
            write!(f, " slot {}", slot)?;
        }
        Ok(())
    }
}

/// Stream switch configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamSwitchError {
    /// Device instance has not been initialised.
    #[error("Invalid device instance: device is not ready")]
    InvalidDevice,

    /// Location does not resolve to a tile type.
    #[error("Invalid tile: {0} is not part of the array")]
    InvalidTile(TileLoc),

    /// Raw port type tag outside the port type enumeration.
    #[error("Invalid stream switch port type {0}")]
    InvalidPortType(u8),

    /// Port type name that matches no port type.
    #[error("Unknown stream switch port type '{0}'")]
    UnknownPortType(String),

    /// Port type unsupported on this tile type, or port/slot out of range.
    #[error("Invalid stream switch port: {0}")]
    InvalidPort(PortRef),

    /// Field value out of range.
    #[error("Invalid argument: {field} = {value} (max {max})")]
    InvalidArgs {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

/// Result type for stream switch operations.
pub type Result<T> = std::result::Result<T, StreamSwitchError>;

/// Check `value <= max` for a named argument.
pub(crate) fn check_arg(field: &'static str, value: u8, max: u8) -> Result<()> {
    if value > max {
        log::error!("Invalid {}: {} exceeds {}", field, value, max);
        return Err(StreamSwitchError::InvalidArgs {
            field,
            value: value as u32,
            max: max as u32,
        });
    }
    Ok(())
}
