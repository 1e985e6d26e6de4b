//! Register write sinks.
//!
//! The stream switch code never touches hardware directly; it hands absolute
//! addresses and 32-bit words to a [`RegisterIo`]. Backends for real devices
//! implement the trait over their MMIO or control-packet path. [`RecordingIo`]
//! keeps the writes in memory for dry runs and tests.

use std::sync::{Arc, Mutex, MutexGuard};

/// Destination of 32-bit register writes.
///
/// Implementations synchronise internally; writes may be issued from any
/// thread holding a shared reference.
pub trait RegisterIo {
    /// Write `value` to the absolute register address `addr`.
    fn write32(&self, addr: u64, value: u32);
}

impl<T: RegisterIo + ?Sized> RegisterIo for &T {
    fn write32(&self, addr: u64, value: u32) {
        (**self).write32(addr, value)
    }
}

impl<T: RegisterIo + ?Sized> RegisterIo for Arc<T> {
    fn write32(&self, addr: u64, value: u32) {
        (**self).write32(addr, value)
    }
}

/// In-memory register sink that records every write in order.
#[derive(Debug, Default)]
pub struct RecordingIo {
    writes: Mutex<Vec<(u64, u32)>>,
}

impl RecordingIo {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the Vec half-updated.
    fn lock(&self) -> MutexGuard<'_, Vec<(u64, u32)>> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the recorded `(addr, value)` pairs.
    pub fn writes(&self) -> Vec<(u64, u32)> {
        self.lock().clone()
    }

    /// Remove and return the recorded writes.
    pub fn take(&self) -> Vec<(u64, u32)> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl RegisterIo for RecordingIo {
    fn write32(&self, addr: u64, value: u32) {
        self.lock().push((addr, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_order() {
        let io = RecordingIo::new();
        io.write32(0x10, 1);
        io.write32(0x04, 2);
        assert_eq!(io.len(), 2);
        assert_eq!(io.writes(), vec![(0x10, 1), (0x04, 2)]);
    }

    #[test]
    fn test_take_and_clear() {
        let io = RecordingIo::new();
        io.write32(0x10, 1);
        assert_eq!(io.take(), vec![(0x10, 1)]);
        assert!(io.is_empty());

        io.write32(0x20, 2);
        io.clear();
        assert!(io.is_empty());
    }

    #[test]
    fn test_forwarding_impls() {
        fn write_via<IO: RegisterIo>(io: IO) {
            io.write32(0x100, 0xAB);
        }

        let io = Arc::new(RecordingIo::new());
        write_via(&*io);
        write_via(Arc::clone(&io));
        assert_eq!(io.writes(), vec![(0x100, 0xAB), (0x100, 0xAB)]);
    }

    #[test]
    fn test_shared_across_threads() {
        let io = Arc::new(RecordingIo::new());
        let handles: Vec<_> = (0..4u64)
            .map(|i| {
                let io = Arc::clone(&io);
                std::thread::spawn(move || io.write32(i * 4, i as u32))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(io.len(), 4);
    }
}
