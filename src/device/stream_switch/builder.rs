//! Register word builders.
//!
//! Pure functions from a [`StreamModule`] and a port request to the
//! tile-local register offset and the word to write there. They validate the
//! port against the module tables but never touch hardware; the device-level
//! configurators commit the results.

use super::super::stream_module::{PortRange, StreamModule};
use super::{PortDirection, PortRef, PortType, Result, SlotMatch, StreamSwitchError};

/// A computed register write, relative to the tile base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Tile-local register offset
    pub offset: u32,
    /// Register value
    pub value: u32,
}

impl RegisterWrite {
    /// Create a register write.
    pub const fn new(offset: u32, value: u32) -> Self {
        Self { offset, value }
    }

    /// Whether this write resets the register.
    pub fn is_reset(&self) -> bool {
        self.value == 0
    }
}

/// Look up and range-check a port.
fn checked_port(
    module: &StreamModule,
    direction: PortDirection,
    port_type: PortType,
    port: u8,
) -> Result<&PortRange> {
    let range = module.ports(direction, port_type);
    if !range.contains(port) {
        if range.is_supported() {
            log::error!(
                "Invalid {} port {}[{}]: only {} ports",
                direction,
                port_type,
                port,
                range.num_ports
            );
        } else {
            log::error!("Invalid {} port type {}: not present on this tile", direction, port_type);
        }
        return Err(StreamSwitchError::InvalidPort(PortRef::port(direction, port_type, port)));
    }
    Ok(range)
}

/// Compute the slave index of a slave port.
///
/// The slave index is the position of the port's configuration register
/// within the tile's slave register block:
/// `(base_addr(slave) + port_offset * port - slave_config_base) / 4`.
/// A master port in circuit mode selects its source by this index.
pub fn slave_index(module: &StreamModule, slave: PortType, port: u8) -> Result<u8> {
    let range = checked_port(module, PortDirection::Slave, slave, port)?;
    let addr = module.port_addr(range, port);
    let Some(delta) = addr.checked_sub(module.slave_config_base) else {
        log::error!(
            "Invalid slave {}[{}]: register 0x{:05X} below slave block 0x{:05X}",
            slave,
            port,
            addr,
            module.slave_config_base
        );
        return Err(StreamSwitchError::InvalidPort(PortRef::port(PortDirection::Slave, slave, port)));
    };
    let index = delta / module.register_width();

    log::trace!("slave {}[{}] @ 0x{:05X} -> slave index {}", slave, port, addr, index);
    Ok(index as u8)
}

/// Build a slave port configuration register.
///
/// With `enable == false` the value is the reset word (all zero), which also
/// clears packet mode.
pub fn slave_port_register(
    module: &StreamModule,
    slave: PortType,
    port: u8,
    enable: bool,
    packet_enable: bool,
) -> Result<RegisterWrite> {
    let range = checked_port(module, PortDirection::Slave, slave, port)?;
    let offset = module.port_addr(range, port);

    if !enable {
        return Ok(RegisterWrite::new(offset, 0));
    }

    let value = module.slave_enable.pack(1) | module.slave_packet_enable.pack(packet_enable as u32);
    Ok(RegisterWrite::new(offset, value))
}

/// Build a master port configuration register.
///
/// `config` is the slave index in circuit mode, or the assembled
/// drop-header/MSel-enable/arbiter word in packet mode. The drop-header bits
/// are extracted from `config` into their own field and `config` itself is
/// packed into the configuration field as well; the hardware exposes both
/// views of the same bits.
///
/// With `enable == false` the value is the reset word.
pub fn master_port_register(
    module: &StreamModule,
    master: PortType,
    port: u8,
    enable: bool,
    packet_enable: bool,
    config: u32,
) -> Result<RegisterWrite> {
    let range = checked_port(module, PortDirection::Master, master, port)?;
    let offset = module.port_addr(range, port);

    if !enable {
        return Ok(RegisterWrite::new(offset, 0));
    }

    let drop_header = module.drop_header.unpack(config);
    let value = module.master_enable.pack(1)
        | module.master_packet_enable.pack(packet_enable as u32)
        | module.drop_header.pack(drop_header)
        | module.config.pack(config);

    Ok(RegisterWrite::new(offset, value))
}

/// Build a slave slot register.
///
/// The slot register of `slave[port]`, slot `slot`, lives at
/// `slot_base(slave) + port * slot_offset_per_port + slot * slot_offset`.
/// With `enable == false` the value is the reset word and `slot_match` is
/// ignored. Field ranges are the caller's job ([`SlotMatch::new`]).
pub fn slave_slot_register(
    module: &StreamModule,
    slave: PortType,
    port: u8,
    slot: u8,
    slot_match: &SlotMatch,
    enable: bool,
) -> Result<RegisterWrite> {
    let range = module.slave_slot(slave);
    if slot >= module.num_slave_slots || !range.contains(port) {
        log::error!(
            "Invalid slave slot {}[{}] slot {}: {} ports, {} slots",
            slave,
            port,
            slot,
            range.num_ports,
            module.num_slave_slots
        );
        return Err(StreamSwitchError::InvalidPort(PortRef::slot(slave, port, slot)));
    }

    let offset = range.base_addr
        + port as u32 * module.slot_offset_per_port
        + slot as u32 * module.slot_offset;

    if !enable {
        return Ok(RegisterWrite::new(offset, 0));
    }

    let value = module.slot_packet_id.pack(slot_match.packet.id as u32)
        | module.slot_mask.pack(slot_match.mask as u32)
        | module.slot_enable.pack(1)
        | module.slot_msel.pack(slot_match.msel as u32)
        | module.slot_arbiter.pack(slot_match.arbiter as u32);

    Ok(RegisterWrite::new(offset, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::aie2_spec::{COMPUTE_STREAM_MODULE, MEM_TILE_STREAM_MODULE, SHIM_STREAM_MODULE};
    use crate::device::bitfield::BitField;
    use crate::device::stream_switch::Packet;

    /// Small synthetic layout with round numbers.
    fn test_module() -> StreamModule {
        let mut ranges = [PortRange::NONE; PortType::COUNT];
        ranges[PortType::Core as usize] = PortRange::new(0x100, 2);
        ranges[PortType::Dma as usize] = PortRange::new(0x108, 2);
        ranges[PortType::South as usize] = PortRange::new(0x120, 4);

        let mut slots = [PortRange::NONE; PortType::COUNT];
        slots[PortType::South as usize] = PortRange::new(0x800, 4);

        StreamModule {
            slave_config_base: 0x100,
            port_offset: 4,
            num_slave_slots: 4,
            slot_offset: 0x4,
            slot_offset_per_port: 0x40,
            master_enable: BitField::bit(31),
            master_packet_enable: BitField::bit(30),
            drop_header: BitField::bit(7),
            config: BitField::new(0, 0x7F),
            slave_enable: BitField::bit(31),
            slave_packet_enable: BitField::bit(30),
            slot_packet_id: BitField::new(24, 0x1F00_0000),
            slot_mask: BitField::new(16, 0x1F_0000),
            slot_enable: BitField::bit(8),
            slot_msel: BitField::new(4, 0x30),
            slot_arbiter: BitField::new(0, 0x7),
            master_ports: ranges,
            slave_ports: ranges,
            slave_slots: slots,
        }
    }

    #[test]
    fn test_slave_index_formula() {
        let module = test_module();
        // (0x120 + 2 * 4 - 0x100) / 4
        assert_eq!(slave_index(&module, PortType::South, 2), Ok(10));
        assert_eq!(slave_index(&module, PortType::Core, 0), Ok(0));
        assert_eq!(slave_index(&module, PortType::Dma, 1), Ok(3));
    }

    #[test]
    fn test_slave_index_rejects_bad_ports() {
        let module = test_module();
        assert!(matches!(
            slave_index(&module, PortType::South, 4),
            Err(StreamSwitchError::InvalidPort(_))
        ));
        // num_ports == 0: unsupported type
        assert!(matches!(
            slave_index(&module, PortType::Trace, 0),
            Err(StreamSwitchError::InvalidPort(_))
        ));
    }

    #[test]
    fn test_slave_index_below_slave_block() {
        let mut module = test_module();
        module.slave_ports[PortType::West as usize] = PortRange::new(0x0F0, 2);
        assert_eq!(
            slave_index(&module, PortType::West, 1),
            Err(StreamSwitchError::InvalidPort(PortRef::port(PortDirection::Slave, PortType::West, 1)))
        );
    }

    #[test]
    fn test_slave_index_aie_ml() {
        // Compute: 0=Core, 1-2=DMA, 3=Ctrl, 4=FIFO, 5-10=South ...
        assert_eq!(slave_index(&COMPUTE_STREAM_MODULE, PortType::Dma, 0), Ok(1));
        assert_eq!(slave_index(&COMPUTE_STREAM_MODULE, PortType::South, 0), Ok(5));
        assert_eq!(slave_index(&COMPUTE_STREAM_MODULE, PortType::Trace, 1), Ok(24));
        // MemTile: 0-5=DMA, 6=Ctrl, 7-12=South, 13-16=North, 17=Trace
        assert_eq!(slave_index(&MEM_TILE_STREAM_MODULE, PortType::North, 0), Ok(13));
        assert_eq!(slave_index(&MEM_TILE_STREAM_MODULE, PortType::Trace, 0), Ok(17));
        // Shim: 0=Ctrl, 1=FIFO, 2-9=South ...
        assert_eq!(slave_index(&SHIM_STREAM_MODULE, PortType::South, 7), Ok(9));
    }

    #[test]
    fn test_slave_port_register() {
        let module = test_module();

        let w = slave_port_register(&module, PortType::Dma, 1, true, false).unwrap();
        assert_eq!(w, RegisterWrite::new(0x10C, 0x8000_0000));

        let w = slave_port_register(&module, PortType::Dma, 1, true, true).unwrap();
        assert_eq!(w.value, 0xC000_0000);
    }

    #[test]
    fn test_master_port_register_circuit() {
        let module = test_module();
        let w = master_port_register(&module, PortType::Core, 1, true, false, 10).unwrap();
        assert_eq!(w.offset, 0x104);
        assert_eq!(w.value, 0x8000_0000 | 10);
    }

    #[test]
    fn test_master_port_register_drop_header() {
        let module = test_module();
        // drop header bit 7 plus arbiter 5, msel_enable 0b0011
        let config = 0x80 | (0x3 << 3) | 5;
        let w = master_port_register(&module, PortType::South, 0, true, true, config).unwrap();
        assert_eq!(w.value, 0x8000_0000 | 0x4000_0000 | 0x80 | 0x1D);
    }

    #[test]
    fn test_disable_always_resets() {
        let module = test_module();
        for enable_pkt in [false, true] {
            let w = slave_port_register(&module, PortType::South, 3, false, enable_pkt).unwrap();
            assert!(w.is_reset());
            assert_eq!(w.offset, 0x12C);

            let w = master_port_register(&module, PortType::South, 3, false, enable_pkt, 0x7F).unwrap();
            assert!(w.is_reset());
        }

        let m = SlotMatch { packet: Packet::new(31, 7), mask: 0x1F, msel: 3, arbiter: 7 };
        let w = slave_slot_register(&module, PortType::South, 1, 2, &m, false).unwrap();
        assert!(w.is_reset());
        assert_eq!(w.offset, 0x800 + 0x40 + 0x8);
    }

    #[test]
    fn test_disable_still_validates_port() {
        let module = test_module();
        assert!(slave_port_register(&module, PortType::West, 0, false, false).is_err());
        assert!(master_port_register(&module, PortType::Core, 2, false, false, 0).is_err());
    }

    #[test]
    fn test_slave_slot_register() {
        let module = test_module();
        let m = SlotMatch { packet: Packet::new(5, 0), mask: 0x1F, msel: 2, arbiter: 3 };

        let w = slave_slot_register(&module, PortType::South, 0, 3, &m, true).unwrap();
        assert_eq!(w.offset, 0x80C);
        assert_eq!(w.value, (5 << 24) | (0x1F << 16) | 0x100 | (2 << 4) | 3);

        let w = slave_slot_register(&module, PortType::South, 0, 3, &m, false).unwrap();
        assert_eq!(w, RegisterWrite::new(0x80C, 0));
    }

    #[test]
    fn test_slave_slot_register_bounds() {
        let module = test_module();
        let m = SlotMatch::default();
        assert_eq!(
            slave_slot_register(&module, PortType::South, 0, 4, &m, true),
            Err(StreamSwitchError::InvalidPort(PortRef::slot(PortType::South, 0, 4)))
        );
        assert!(slave_slot_register(&module, PortType::South, 4, 0, &m, true).is_err());
        assert!(slave_slot_register(&module, PortType::Core, 0, 0, &m, true).is_err());
    }
}
