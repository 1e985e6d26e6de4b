//! Circuit-switched connections.
//!
//! A circuit binds one master port to one slave port of the same tile. Both
//! register words are computed and validated before anything is written; the
//! master is written first, then the slave.

use super::super::instance::AieDevice;
use super::super::io::RegisterIo;
use super::super::tile::TileLoc;
use super::builder::{master_port_register, slave_index, slave_port_register};
use super::{PortType, Result};

impl<IO: RegisterIo> AieDevice<IO> {
    /// Enable or reset a circuit between `slave[slave_port]` and
    /// `master[master_port]` on the tile at `loc`.
    pub fn set_circuit_connection(
        &self,
        loc: TileLoc,
        slave: PortType,
        slave_port: u8,
        master: PortType,
        master_port: u8,
        enable: bool,
    ) -> Result<()> {
        self.check_ready()?;
        let module = self.resolve_module(loc)?;

        let index = slave_index(module, slave, slave_port)?;
        let master_write = master_port_register(module, master, master_port, enable, false, index as u32)?;
        let slave_write = slave_port_register(module, slave, slave_port, enable, false)?;

        self.commit(loc, module, &[master_write, slave_write]);
        Ok(())
    }

    /// Route `slave[slave_port]` to `master[master_port]`.
    pub fn connect_circuit(
        &self,
        loc: TileLoc,
        slave: PortType,
        slave_port: u8,
        master: PortType,
        master_port: u8,
    ) -> Result<()> {
        self.set_circuit_connection(loc, slave, slave_port, master, master_port, true)
    }

    /// Reset both ports of a circuit.
    pub fn disconnect_circuit(
        &self,
        loc: TileLoc,
        slave: PortType,
        slave_port: u8,
        master: PortType,
        master_port: u8,
    ) -> Result<()> {
        self.set_circuit_connection(loc, slave, slave_port, master, master_port, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::arch_config::{Aie2Config, ArchConfig};
    use crate::device::bitfield::BitField;
    use crate::device::io::RecordingIo;
    use crate::device::stream_module::{PortRange, StreamModule};
    use crate::device::stream_switch::StreamSwitchError;
    use crate::device::tile::TileType;
    use crate::device::TileAddress;
    use std::sync::Arc;

    const NONE: PortRange = PortRange::NONE;

    /// Two-by-two array where every tile has the same small switch.
    static TEST_MODULE: StreamModule = StreamModule {
        slave_config_base: 0x100,
        port_offset: 4,
        num_slave_slots: 4,
        slot_offset: 0x4,
        slot_offset_per_port: 0x40,
        master_enable: BitField::bit(31),
        master_packet_enable: BitField::bit(30),
        drop_header: BitField::new(7, 0x80),
        config: BitField::new(0, 0x7F),
        slave_enable: BitField::bit(31),
        slave_packet_enable: BitField::bit(30),
        slot_packet_id: BitField::new(24, 0x1F00_0000),
        slot_mask: BitField::new(16, 0x1F_0000),
        slot_enable: BitField::bit(8),
        slot_msel: BitField::new(4, 0x30),
        slot_arbiter: BitField::new(0, 0x7),
        // Core, Dma, Ctrl, Fifo, South, West, North, East, Trace
        master_ports: [
            PortRange::new(0x000, 2),
            PortRange::new(0x008, 2),
            NONE,
            NONE,
            PortRange::new(0x010, 4),
            NONE,
            NONE,
            NONE,
            NONE,
        ],
        slave_ports: [
            NONE,
            PortRange::new(0x100, 2),
            NONE,
            NONE,
            PortRange::new(0x120, 4),
            NONE,
            NONE,
            NONE,
            NONE,
        ],
        slave_slots: [
            NONE,
            NONE,
            NONE,
            NONE,
            PortRange::new(0x800, 4),
            NONE,
            NONE,
            NONE,
            NONE,
        ],
    };

    #[derive(Debug)]
    struct TestArch;

    impl ArchConfig for TestArch {
        fn columns(&self) -> u8 {
            2
        }

        fn rows(&self) -> u8 {
            2
        }

        fn tile_type(&self, loc: TileLoc) -> Option<TileType> {
            self.is_valid_tile(loc).then_some(TileType::Compute)
        }

        fn stream_module(&self, _tile_type: TileType) -> &'static StreamModule {
            &TEST_MODULE
        }

        fn name(&self) -> &'static str {
            "test"
        }
    }

    fn test_device() -> AieDevice<RecordingIo> {
        let mut dev = AieDevice::new(Arc::new(TestArch), 0, RecordingIo::new());
        dev.initialize();
        dev
    }

    #[test]
    fn test_connect_then_disconnect() {
        let dev = test_device();
        let loc = TileLoc::new(1, 1);
        let base = TileAddress::tile_base(loc);

        dev.connect_circuit(loc, PortType::Dma, 0, PortType::Core, 1).unwrap();
        // master Core[1] selects slave index 0 (Dma[0] is the first slave register)
        assert_eq!(dev.io().take(), vec![(base + 0x004, 0x8000_0000), (base + 0x100, 0x8000_0000)]);

        dev.disconnect_circuit(loc, PortType::Dma, 0, PortType::Core, 1).unwrap();
        assert_eq!(dev.io().take(), vec![(base + 0x004, 0), (base + 0x100, 0)]);
    }

    #[test]
    fn test_connect_carries_slave_index() {
        let dev = test_device();
        let loc = TileLoc::new(0, 1);
        let base = TileAddress::tile_base(loc);

        dev.connect_circuit(loc, PortType::South, 2, PortType::Dma, 0).unwrap();
        assert_eq!(
            dev.io().writes(),
            vec![(base + 0x008, 0x8000_0000 | 10), (base + 0x128, 0x8000_0000)]
        );
    }

    #[test]
    fn test_bad_slave_writes_nothing() {
        let dev = test_device();
        let loc = TileLoc::new(1, 1);

        // master is valid, slave port is not
        assert!(matches!(
            dev.connect_circuit(loc, PortType::South, 4, PortType::Core, 0),
            Err(StreamSwitchError::InvalidPort(_))
        ));
        // slave type unsupported on this tile
        assert!(dev.connect_circuit(loc, PortType::Core, 0, PortType::Core, 0).is_err());
        assert!(dev.io().is_empty());
    }

    #[test]
    fn test_bad_master_writes_nothing() {
        let dev = test_device();
        let loc = TileLoc::new(1, 1);

        assert!(dev.connect_circuit(loc, PortType::Dma, 0, PortType::Core, 2).is_err());
        assert!(dev.connect_circuit(loc, PortType::Dma, 0, PortType::Trace, 0).is_err());
        assert!(dev.disconnect_circuit(loc, PortType::Dma, 0, PortType::West, 0).is_err());
        assert!(dev.io().is_empty());
    }

    #[test]
    fn test_invalid_tile_and_device() {
        let dev = test_device();
        assert_eq!(
            dev.connect_circuit(TileLoc::new(2, 0), PortType::Dma, 0, PortType::Core, 0),
            Err(StreamSwitchError::InvalidTile(TileLoc::new(2, 0)))
        );

        let cold = AieDevice::new(Arc::new(TestArch), 0, RecordingIo::new());
        assert_eq!(
            cold.connect_circuit(TileLoc::new(0, 0), PortType::Dma, 0, PortType::Core, 0),
            Err(StreamSwitchError::InvalidDevice)
        );
        assert!(dev.io().is_empty());
        assert!(cold.io().is_empty());
    }

    #[test]
    fn test_compute_tile_dma_to_core() {
        let mut dev = AieDevice::new(Arc::new(Aie2Config), 0, RecordingIo::new());
        dev.initialize();
        let loc = TileLoc::new(1, 2);
        let base = TileAddress::tile_base(loc);

        // Dma[0] is slave index 1 on compute tiles
        dev.connect_circuit(loc, PortType::Dma, 0, PortType::Core, 0).unwrap();
        assert_eq!(
            dev.io().take(),
            vec![(base + 0x3F000, 0x8000_0001), (base + 0x3F104, 0x8000_0000)]
        );

        dev.disconnect_circuit(loc, PortType::Dma, 0, PortType::Core, 0).unwrap();
        assert_eq!(dev.io().take(), vec![(base + 0x3F000, 0), (base + 0x3F104, 0)]);
    }

    #[test]
    fn test_mem_tile_north_to_south() {
        let mut dev = AieDevice::new(Arc::new(Aie2Config), 0x100_0000_0000, RecordingIo::new());
        dev.initialize();
        let loc = TileLoc::new(2, 1);
        let base = 0x100_0000_0000 + TileAddress::tile_base(loc);

        // North[1] = slave index 14; South master 3 at 0xB001C + 12
        dev.connect_circuit(loc, PortType::North, 1, PortType::South, 3).unwrap();
        assert_eq!(
            dev.io().writes(),
            vec![(base + 0xB0028, 0x8000_000E), (base + 0xB0138, 0x8000_0000)]
        );
    }

    #[test]
    fn test_mem_tile_has_no_core() {
        let mut dev = AieDevice::new(Arc::new(Aie2Config), 0, RecordingIo::new());
        dev.initialize();
        assert!(dev
            .connect_circuit(TileLoc::new(1, 1), PortType::Dma, 0, PortType::Core, 1)
            .is_err());
        assert!(dev.io().is_empty());
    }
}
