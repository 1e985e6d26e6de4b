//! Packet-switch configuration: slave ports, master ports and slave slots.
//!
//! A packet-switched slave port compares the ID of each incoming packet
//! against its four slots. The first enabled slot whose `(id & mask)` matches
//! forwards the packet to arbiter `arbiter`, tagged with MSel `msel`. A
//! packet-switched master port accepts traffic from one arbiter and only for
//! the MSel groups set in its `msel_enable` bitmap.

use super::super::instance::AieDevice;
use super::super::io::RegisterIo;
use super::super::registers_spec::stream_switch::{
    ARBITER_MAX, MASTER_ARBITER_LSB, MASTER_ARBITER_MASK, MASTER_MSEL_ENABLE_LSB,
    MASTER_MSEL_ENABLE_MASK, MSEL_ENABLE_MAX, MSEL_MAX, PACKET_ID_MAX, SLOT_ID_MASK_BITS,
};
use super::super::bitfield::BitField;
use super::super::stream_module::StreamModule;
use super::super::tile::TileLoc;
use super::builder::{master_port_register, slave_port_register, slave_slot_register};
use super::{check_arg, DropHeader, Packet, PortType, Result, StreamSwitchError};

const MASTER_ARBITER: BitField = BitField::new(MASTER_ARBITER_LSB, MASTER_ARBITER_MASK);
const MASTER_MSEL_ENABLE: BitField = BitField::new(MASTER_MSEL_ENABLE_LSB, MASTER_MSEL_ENABLE_MASK);

/// Packet-mode parameters of a master port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MasterPacketConfig {
    pub drop_header: DropHeader,
    pub arbiter: u8,
    pub msel_enable: u8,
}

impl MasterPacketConfig {
    /// Validate and build master packet parameters.
    pub fn new(drop_header: DropHeader, arbiter: u8, msel_enable: u8) -> Result<Self> {
        check_arg("arbiter", arbiter, ARBITER_MAX)?;
        check_arg("msel_enable", msel_enable, MSEL_ENABLE_MAX)?;
        Ok(Self { drop_header, arbiter, msel_enable })
    }

    /// Assemble the value handed to the master configuration field.
    pub fn config_word(&self, module: &StreamModule) -> u32 {
        module.drop_header.pack(self.drop_header as u32)
            | MASTER_ARBITER.pack(self.arbiter as u32)
            | MASTER_MSEL_ENABLE.pack(self.msel_enable as u32)
    }
}

/// Match rule of one slave slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotMatch {
    /// Packet whose ID the slot matches
    pub packet: Packet,
    /// ID bits that take part in the comparison
    pub mask: u8,
    /// MSel tag given to matching packets
    pub msel: u8,
    /// Arbiter that receives matching packets
    pub arbiter: u8,
}

impl SlotMatch {
    /// Validate and build a slot match rule.
    pub fn new(packet: Packet, mask: u8, msel: u8, arbiter: u8) -> Result<Self> {
        check_arg("arbiter", arbiter, ARBITER_MAX)?;
        check_arg("msel", msel, MSEL_MAX)?;
        if mask & !SLOT_ID_MASK_BITS != 0 {
            log::error!("Invalid slot mask 0x{:02X}: only bits 4:0 are valid", mask);
            return Err(StreamSwitchError::InvalidArgs {
                field: "mask",
                value: mask as u32,
                max: SLOT_ID_MASK_BITS as u32,
            });
        }
        check_arg("packet id", packet.id, PACKET_ID_MAX)?;
        Ok(Self { packet, mask, msel, arbiter })
    }
}

impl<IO: RegisterIo> AieDevice<IO> {
    /// Configure a slave port for packet switching, or reset it.
    ///
    /// Packet mode follows `enable`: an enabled port is always in packet mode.
    pub fn set_packet_switch_slave_port(
        &self,
        loc: TileLoc,
        slave: PortType,
        port: u8,
        enable: bool,
    ) -> Result<()> {
        self.check_ready()?;
        let module = self.resolve_module(loc)?;

        let write = slave_port_register(module, slave, port, enable, enable)?;
        self.commit(loc, module, &[write]);
        Ok(())
    }

    /// Configure a master port for packet switching, or reset it.
    ///
    /// Arguments are range-checked before the tile is resolved, so a bad
    /// arbiter is reported even for a tile outside the array.
    #[allow(clippy::too_many_arguments)]
    pub fn set_packet_switch_master_port(
        &self,
        loc: TileLoc,
        master: PortType,
        port: u8,
        drop_header: DropHeader,
        arbiter: u8,
        msel_enable: u8,
        enable: bool,
    ) -> Result<()> {
        self.check_ready()?;
        let params = MasterPacketConfig::new(drop_header, arbiter, msel_enable)?;
        let module = self.resolve_module(loc)?;

        let write = if enable {
            master_port_register(module, master, port, true, true, params.config_word(module))?
        } else {
            master_port_register(module, master, port, false, false, 0)?
        };
        self.commit(loc, module, &[write]);
        Ok(())
    }

    /// Configure one slot of a packet-switched slave port, or reset it.
    #[allow(clippy::too_many_arguments)]
    pub fn set_slave_slot(
        &self,
        loc: TileLoc,
        slave: PortType,
        port: u8,
        slot: u8,
        packet: Packet,
        mask: u8,
        msel: u8,
        arbiter: u8,
        enable: bool,
    ) -> Result<()> {
        self.check_ready()?;
        let slot_match = SlotMatch::new(packet, mask, msel, arbiter)?;
        let module = self.resolve_module(loc)?;

        let write = slave_slot_register(module, slave, port, slot, &slot_match, enable)?;
        self.commit(loc, module, &[write]);
        Ok(())
    }

    /// Put a slave port into packet-switching mode.
    pub fn enable_packet_switch_slave_port(&self, loc: TileLoc, slave: PortType, port: u8) -> Result<()> {
        self.set_packet_switch_slave_port(loc, slave, port, true)
    }

    /// Reset a slave port.
    pub fn disable_packet_switch_slave_port(&self, loc: TileLoc, slave: PortType, port: u8) -> Result<()> {
        self.set_packet_switch_slave_port(loc, slave, port, false)
    }

    /// Put a master port into packet-switching mode.
    pub fn enable_packet_switch_master_port(
        &self,
        loc: TileLoc,
        master: PortType,
        port: u8,
        drop_header: DropHeader,
        arbiter: u8,
        msel_enable: u8,
    ) -> Result<()> {
        self.set_packet_switch_master_port(loc, master, port, drop_header, arbiter, msel_enable, true)
    }

    /// Reset a master port.
    pub fn disable_packet_switch_master_port(&self, loc: TileLoc, master: PortType, port: u8) -> Result<()> {
        self.set_packet_switch_master_port(loc, master, port, DropHeader::DoNotDrop, 0, 0, false)
    }

    /// Program a slot of a packet-switched slave port.
    #[allow(clippy::too_many_arguments)]
    pub fn enable_packet_switch_slave_slot(
        &self,
        loc: TileLoc,
        slave: PortType,
        port: u8,
        slot: u8,
        packet: Packet,
        mask: u8,
        msel: u8,
        arbiter: u8,
    ) -> Result<()> {
        self.set_slave_slot(loc, slave, port, slot, packet, mask, msel, arbiter, true)
    }

    /// Reset a slot of a slave port.
    pub fn disable_packet_switch_slave_slot(
        &self,
        loc: TileLoc,
        slave: PortType,
        port: u8,
        slot: u8,
    ) -> Result<()> {
        self.set_slave_slot(loc, slave, port, slot, Packet::default(), 0, 0, 0, false)
    }
}
