//! Register decoder.
//!
//! Maps a tile-local offset and value back to the port or slot it configures
//! and unpacks its fields. Used for debug logging of committed writes and for
//! annotating the command line output.

use std::fmt;

use super::super::stream_module::StreamModule;
use super::{PortDirection, PortRef, PortType};

/// Field values of a decoded register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFields {
    Master {
        enable: bool,
        packet_enable: bool,
        drop_header: bool,
        config: u32,
        /// Source port when the master is in circuit mode
        source: Option<(PortType, u8)>,
    },
    Slave {
        enable: bool,
        packet_enable: bool,
    },
    Slot {
        id: u32,
        mask: u32,
        enable: bool,
        msel: u32,
        arbiter: u32,
    },
}

/// A stream switch register identified and unpacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedRegister {
    pub port: PortRef,
    pub fields: RegisterFields,
}

/// Locate `offset` within a port block: the port number if it hits a register.
fn port_at(base: u32, num_ports: u8, stride: u32, offset: u32) -> Option<u8> {
    let delta = offset.checked_sub(base)?;
    if stride == 0 || delta % stride != 0 {
        return None;
    }
    let port = delta / stride;
    (port < num_ports as u32).then_some(port as u8)
}

/// Find the register at `offset` without decoding its value.
pub fn locate_register(module: &StreamModule, offset: u32) -> Option<PortRef> {
    for direction in [PortDirection::Master, PortDirection::Slave] {
        for port_type in PortType::ALL {
            let range = module.ports(direction, port_type);
            if let Some(port) = port_at(range.base_addr, range.num_ports, module.port_offset, offset) {
                return Some(PortRef::port(direction, port_type, port));
            }
        }
    }

    for port_type in PortType::ALL {
        let range = module.slave_slot(port_type);
        let Some(delta) = offset.checked_sub(range.base_addr) else {
            continue;
        };
        if module.slot_offset_per_port == 0 || module.slot_offset == 0 {
            continue;
        }
        let port = delta / module.slot_offset_per_port;
        let within = delta % module.slot_offset_per_port;
        if port >= range.num_ports as u32 || within % module.slot_offset != 0 {
            continue;
        }
        let slot = within / module.slot_offset;
        if slot < module.num_slave_slots as u32 {
            return Some(PortRef::slot(port_type, port as u8, slot as u8));
        }
    }
    None
}

/// Slave port with the given slave index.
pub fn slave_for_index(module: &StreamModule, index: u32) -> Option<(PortType, u8)> {
    let offset = module.slave_config_base + index * module.register_width();
    PortType::ALL.into_iter().find_map(|port_type| {
        let range = module.slave(port_type);
        port_at(range.base_addr, range.num_ports, module.port_offset, offset).map(|p| (port_type, p))
    })
}

/// Decode a register write. `None` if `offset` is not a stream switch register.
pub fn decode_register(module: &StreamModule, offset: u32, value: u32) -> Option<DecodedRegister> {
    let port = locate_register(module, offset)?;

    let fields = match (port.direction, port.slot) {
        (_, Some(_)) => RegisterFields::Slot {
            id: module.slot_packet_id.unpack(value),
            mask: module.slot_mask.unpack(value),
            enable: module.slot_enable.unpack(value) != 0,
            msel: module.slot_msel.unpack(value),
            arbiter: module.slot_arbiter.unpack(value),
        },
        (PortDirection::Master, None) => {
            let enable = module.master_enable.unpack(value) != 0;
            let packet_enable = module.master_packet_enable.unpack(value) != 0;
            let config = module.config.unpack(value);
            let source = if enable && !packet_enable {
                slave_for_index(module, config)
            } else {
                None
            };
            RegisterFields::Master {
                enable,
                packet_enable,
                drop_header: module.drop_header.unpack(value) != 0,
                config,
                source,
            }
        }
        (PortDirection::Slave, None) => RegisterFields::Slave {
            enable: module.slave_enable.unpack(value) != 0,
            packet_enable: module.slave_packet_enable.unpack(value) != 0,
        },
    };

    Some(DecodedRegister { port, fields })
}

impl fmt::Display for DecodedRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.port)?;
        match self.fields {
            RegisterFields::Master { enable, packet_enable, drop_header, config, source } => {
                write!(
                    f,
                    " en={} pkt={} drop_hdr={} cfg=0x{:02X}",
                    enable as u8, packet_enable as u8, drop_header as u8, config
                )?;
                if let Some((port_type, port)) = source {
                    write!(f, " <- {}[{}]", port_type, port)?;
                }
                Ok(())
            }
            RegisterFields::Slave { enable, packet_enable } => {
                write!(f, " en={} pkt={}", enable as u8, packet_enable as u8)
            }
            RegisterFields::Slot { id, mask, enable, msel, arbiter } => write!(
                f,
                " id={} mask=0x{:02X} en={} msel={} arb={}",
                id, mask, enable as u8, msel, arbiter
            ),
        }
    }
}
