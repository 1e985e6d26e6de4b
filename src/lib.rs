//! aie-stream-switch library
//!
//! Stream switch configuration for AMD AIE-ML (XDNA) tile arrays: circuit
//! routes, packet-switched ports and slave slots, computed and validated
//! before any register is written.

pub mod config;
pub mod device;
