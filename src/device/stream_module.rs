//! Stream switch module descriptors.
//!
//! A [`StreamModule`] describes where the stream switch registers of one tile
//! type live and how their fields are laid out. The descriptors are plain
//! `static` data (see [`aie2_spec`](super::aie2_spec)); nothing here is
//! mutated after start-up.

use super::bitfield::BitField;
use super::registers_spec::REGISTER_WIDTH;
use super::stream_switch::{PortDirection, PortType};

/// Register block of one port type: first register address and port count.
///
/// `num_ports == 0` marks a port type the tile does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortRange {
    /// Tile-local address of port 0's register
    pub base_addr: u32,
    /// Number of ports of this type
    pub num_ports: u8,
}

impl PortRange {
    /// A port type the tile does not implement.
    pub const NONE: PortRange = PortRange { base_addr: 0, num_ports: 0 };

    /// Create a port range.
    pub const fn new(base_addr: u32, num_ports: u8) -> Self {
        Self { base_addr, num_ports }
    }

    /// Whether this tile type has any port of this type.
    #[inline]
    pub fn is_supported(&self) -> bool {
        self.num_ports != 0
    }

    /// Whether `port` is a valid port number.
    #[inline]
    pub fn contains(&self, port: u8) -> bool {
        port < self.num_ports
    }
}

/// Stream switch register layout of one tile type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamModule {
    /// First slave configuration register; slave indices count from here
    pub slave_config_base: u32,
    /// Address delta between consecutive ports of the same type
    pub port_offset: u32,
    /// Number of packet-switch slots per slave port
    pub num_slave_slots: u8,
    /// Address delta between consecutive slots of one port
    pub slot_offset: u32,
    /// Address delta between slot blocks of consecutive ports
    pub slot_offset_per_port: u32,

    pub master_enable: BitField,
    pub master_packet_enable: BitField,
    pub drop_header: BitField,
    pub config: BitField,

    pub slave_enable: BitField,
    pub slave_packet_enable: BitField,

    pub slot_packet_id: BitField,
    pub slot_mask: BitField,
    pub slot_enable: BitField,
    pub slot_msel: BitField,
    pub slot_arbiter: BitField,

    /// Master port registers, indexed by `PortType as usize`
    pub master_ports: [PortRange; PortType::COUNT],
    /// Slave port registers, indexed by `PortType as usize`
    pub slave_ports: [PortRange; PortType::COUNT],
    /// Slave slot register blocks, indexed by `PortType as usize`
    pub slave_slots: [PortRange; PortType::COUNT],
}

impl StreamModule {
    /// Master port block for a port type.
    #[inline]
    pub fn master(&self, port_type: PortType) -> &PortRange {
        &self.master_ports[port_type as usize]
    }

    /// Slave port block for a port type.
    #[inline]
    pub fn slave(&self, port_type: PortType) -> &PortRange {
        &self.slave_ports[port_type as usize]
    }

    /// Slave slot block for a port type.
    #[inline]
    pub fn slave_slot(&self, port_type: PortType) -> &PortRange {
        &self.slave_slots[port_type as usize]
    }

    /// Port block for either direction.
    pub fn ports(&self, direction: PortDirection, port_type: PortType) -> &PortRange {
        match direction {
            PortDirection::Master => self.master(port_type),
            PortDirection::Slave => self.slave(port_type),
        }
    }

    /// Total number of master ports.
    pub fn num_master_ports(&self) -> usize {
        self.master_ports.iter().map(|r| r.num_ports as usize).sum()
    }

    /// Total number of slave ports.
    pub fn num_slave_ports(&self) -> usize {
        self.slave_ports.iter().map(|r| r.num_ports as usize).sum()
    }

    /// Tile-local address of a port register, without range checks.
    #[inline]
    pub fn port_addr(&self, range: &PortRange, port: u8) -> u32 {
        range.base_addr + self.port_offset * port as u32
    }

    /// Register width used to turn slave addresses into slave indices.
    pub const fn register_width(&self) -> u32 {
        REGISTER_WIDTH
    }
}
