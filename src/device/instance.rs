//! Device instance.
//!
//! [`AieDevice`] ties an architecture description to a register sink and a
//! base address. The stream switch entry points live on it (see
//! [`stream_switch`](super::stream_switch)); this file holds the shared
//! plumbing: readiness, tile resolution and committing computed writes.

use std::sync::Arc;

use super::arch_config::ArchConfig;
use super::io::RegisterIo;
use super::stream_module::StreamModule;
use super::stream_switch::{decode_register, RegisterWrite, Result, StreamSwitchError};
use super::tile::TileLoc;

/// An AIE array instance.
///
/// A freshly constructed device is not ready; every configuration call fails
/// with [`StreamSwitchError::InvalidDevice`] until [`initialize`] runs.
///
/// [`initialize`]: AieDevice::initialize
#[derive(Debug)]
pub struct AieDevice<IO> {
    arch: Arc<dyn ArchConfig>,
    base_addr: u64,
    io: IO,
    ready: bool,
}

impl<IO: RegisterIo> AieDevice<IO> {
    /// Create a device over `io`. The array's registers start at `base_addr`.
    pub fn new(arch: Arc<dyn ArchConfig>, base_addr: u64, io: IO) -> Self {
        Self { arch, base_addr, io, ready: false }
    }

    /// Mark the device ready for configuration.
    pub fn initialize(&mut self) {
        log::info!(
            "Initialized {} array ({}x{}) at base 0x{:X}",
            self.arch.name(),
            self.arch.columns(),
            self.arch.rows(),
            self.base_addr
        );
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn arch(&self) -> &dyn ArchConfig {
        self.arch.as_ref()
    }

    pub fn base_addr(&self) -> u64 {
        self.base_addr
    }

    /// The register sink.
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Consume the device and return the register sink.
    pub fn into_io(self) -> IO {
        self.io
    }

    pub(crate) fn check_ready(&self) -> Result<()> {
        if !self.ready {
            log::error!("Invalid device instance: not initialized");
            return Err(StreamSwitchError::InvalidDevice);
        }
        Ok(())
    }

    /// Stream switch layout of the tile at `loc`.
    pub(crate) fn resolve_module(&self, loc: TileLoc) -> Result<&'static StreamModule> {
        match self.arch.tile_type(loc) {
            Some(tile_type) => Ok(self.arch.stream_module(tile_type)),
            None => {
                log::error!("Invalid tile {} for {}", loc, self.arch.name());
                Err(StreamSwitchError::InvalidTile(loc))
            }
        }
    }

    /// Absolute address of a tile-local register.
    ///
    /// The register space is a 64-bit address ring: a base address near the
    /// top wraps around rather than overflowing.
    pub fn register_addr(&self, loc: TileLoc, offset: u32) -> u64 {
        self.base_addr
            .wrapping_add(self.arch.tile_offset(loc))
            .wrapping_add(offset as u64)
    }

    /// Issue already-validated writes in order.
    pub(crate) fn commit(&self, loc: TileLoc, module: &StreamModule, writes: &[RegisterWrite]) {
        for w in writes {
            let addr = self.register_addr(loc, w.offset);
            if log::log_enabled!(log::Level::Debug) {
                match decode_register(module, w.offset, w.value) {
                    Some(decoded) => {
                        log::debug!("{} write32 0x{:X} = 0x{:08X} ({})", loc, addr, w.value, decoded)
                    }
                    None => log::debug!("{} write32 0x{:X} = 0x{:08X}", loc, addr, w.value),
                }
            }
            self.io.write32(addr, w.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::arch_config::{Aie2Config, Aie2pConfig};
    use crate::device::io::RecordingIo;
    use crate::device::{PortType, TileType};

    #[test]
    fn test_not_ready_until_initialized() {
        let mut dev = AieDevice::new(Arc::new(Aie2Config), 0, RecordingIo::new());
        assert!(!dev.is_ready());
        assert_eq!(dev.check_ready(), Err(StreamSwitchError::InvalidDevice));

        dev.initialize();
        assert!(dev.is_ready());
        assert!(dev.check_ready().is_ok());
    }

    #[test]
    fn test_resolve_module() {
        let dev = AieDevice::new(Arc::new(Aie2Config), 0, RecordingIo::new());
        let module = dev.resolve_module(TileLoc::new(2, 1)).unwrap();
        assert!(std::ptr::eq(module, dev.arch().stream_module(TileType::MemTile)));

        assert_eq!(
            dev.resolve_module(TileLoc::new(6, 1)).unwrap_err(),
            StreamSwitchError::InvalidTile(TileLoc::new(6, 1))
        );
        // column 6 exists on the wider part
        let dev = AieDevice::new(Arc::new(Aie2pConfig), 0, RecordingIo::new());
        assert!(dev.resolve_module(TileLoc::new(6, 1)).is_ok());
    }

    #[test]
    fn test_register_addr_adds_base() {
        let dev = AieDevice::new(Arc::new(Aie2Config), 0x2000_0000_0000, RecordingIo::new());
        assert_eq!(dev.register_addr(TileLoc::new(1, 2), 0x3F000), 0x2000_0223_F000);
    }

    #[test]
    fn test_register_addr_wraps_at_top_of_space() {
        let base = u64::MAX - 0x10;
        let mut dev = AieDevice::new(Arc::new(Aie2Config), base, RecordingIo::new());
        dev.initialize();
        let loc = TileLoc::new(1, 2);

        assert_eq!(dev.register_addr(loc, 0x3F000), 0x0223_F000 - 0x11);

        dev.connect_circuit(loc, PortType::Dma, 0, PortType::Core, 0).unwrap();
        assert_eq!(
            dev.io().writes(),
            vec![(0x0223_F000 - 0x11, 0x8000_0001), (0x0223_F104 - 0x11, 0x8000_0000)]
        );
    }

    #[test]
    fn test_commit_in_order() {
        let dev = AieDevice::new(Arc::new(Aie2Config), 0x1000_0000, RecordingIo::new());
        let loc = TileLoc::new(0, 2);
        let module = dev.resolve_module(loc).unwrap();
        dev.commit(loc, module, &[RegisterWrite::new(0x3F004, 7), RegisterWrite::new(0x3F100, 0)]);

        let base = 0x1000_0000 + 0x20_0000;
        assert_eq!(dev.into_io().take(), vec![(base + 0x3F004, 7), (base + 0x3F100, 0)]);
    }

    #[test]
    fn test_device_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AieDevice<RecordingIo>>();
        assert_send_sync::<AieDevice<Arc<RecordingIo>>>();
    }
}
