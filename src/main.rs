//! aie-ss: stream switch register calculator for AMD AIE-ML arrays
//!
//! Runs one stream switch operation against an in-memory register sink and
//! prints the resulting register writes.

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context};
use aie_stream_switch::config::{parse_u64, Config};
use aie_stream_switch::device::stream_switch::decode_register;
use aie_stream_switch::device::{AieDevice, DropHeader, Packet, PortType, RecordingIo, TileAddress, TileLoc};

const USAGE: &str = "\
Usage: aie-ss <command> [args]

Commands:
  connect     <col> <row> <slave> <sport> <master> <mport>
  disconnect  <col> <row> <slave> <sport> <master> <mport>
  pkt-slave   <col> <row> <slave> <sport> on|off
  pkt-master  <col> <row> <master> <mport> on|off [drop] [arb] [msel_en]
  slot        <col> <row> <slave> <sport> <slot> on|off [id] [mask] [msel] [arb]
  config      print a sample configuration file

Port types: core dma ctrl fifo south west north east trace (or 0-8)
Environment: AIE_SS_ARCH, AIE_SS_BASE_ADDR, RUST_LOG";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let Some(command) = args.get(1).map(String::as_str) else {
        println!("{}", USAGE);
        return Ok(());
    };
    let rest = &args[2..];

    match command {
        "-h" | "--help" | "help" => {
            println!("{}", USAGE);
            return Ok(());
        }
        "config" => {
            print!("{}", Config::sample_config());
            if let Some(path) = Config::user_config_path() {
                println!();
                println!("# User config path: {}", path.display());
            }
            return Ok(());
        }
        _ => {}
    }

    let config = Config::get();
    let arch = config
        .arch_config()
        .with_context(|| format!("Unknown architecture '{}'", config.arch_name()))?;

    let mut dev = AieDevice::new(arch, config.base_addr(), RecordingIo::new());
    dev.initialize();

    run_command(&dev, command, rest)?;
    print_writes(&dev);

    Ok(())
}

/// Dispatch one command.
fn run_command(dev: &AieDevice<RecordingIo>, command: &str, args: &[String]) -> anyhow::Result<()> {
    match command {
        "connect" | "disconnect" => {
            expect_args(command, args, 6)?;
            let loc = tile_arg(args)?;
            let slave: PortType = arg(args, 2, "slave port type")?;
            let sport: u8 = arg(args, 3, "slave port")?;
            let master: PortType = arg(args, 4, "master port type")?;
            let mport: u8 = arg(args, 5, "master port")?;

            let result = if command == "connect" {
                dev.connect_circuit(loc, slave, sport, master, mport)
            } else {
                dev.disconnect_circuit(loc, slave, sport, master, mport)
            };
            result.with_context(|| format!("{} {}[{}] -> {}[{}] on {}", command, slave, sport, master, mport, loc))?;
        }
        "pkt-slave" => {
            expect_args(command, args, 5)?;
            let loc = tile_arg(args)?;
            let slave: PortType = arg(args, 2, "slave port type")?;
            let port: u8 = arg(args, 3, "slave port")?;
            let enable = on_off(&args[4])?;

            dev.set_packet_switch_slave_port(loc, slave, port, enable)
                .with_context(|| format!("pkt-slave {}[{}] on {}", slave, port, loc))?;
        }
        "pkt-master" => {
            expect_args(command, args, 5)?;
            let loc = tile_arg(args)?;
            let master: PortType = arg(args, 2, "master port type")?;
            let port: u8 = arg(args, 3, "master port")?;
            let enable = on_off(&args[4])?;

            let context = || format!("pkt-master {}[{}] on {}", master, port, loc);
            if enable {
                let drop_header = DropHeader::from(opt_arg::<u8>(args, 5, "drop")?.unwrap_or(0) != 0);
                let arbiter = opt_arg(args, 6, "arbiter")?.unwrap_or(0);
                let msel_enable = opt_arg(args, 7, "msel_enable")?.unwrap_or(0);
                dev.enable_packet_switch_master_port(loc, master, port, drop_header, arbiter, msel_enable)
                    .with_context(context)?;
            } else {
                dev.disable_packet_switch_master_port(loc, master, port).with_context(context)?;
            }
        }
        "slot" => {
            expect_args(command, args, 6)?;
            let loc = tile_arg(args)?;
            let slave: PortType = arg(args, 2, "slave port type")?;
            let port: u8 = arg(args, 3, "slave port")?;
            let slot: u8 = arg(args, 4, "slot")?;
            let enable = on_off(&args[5])?;

            let context = || format!("slot {}[{}] slot {} on {}", slave, port, slot, loc);
            if enable {
                let id = opt_arg(args, 6, "packet id")?.unwrap_or(0);
                let mask = opt_arg(args, 7, "mask")?.unwrap_or(0x1F);
                let msel = opt_arg(args, 8, "msel")?.unwrap_or(0);
                let arbiter = opt_arg(args, 9, "arbiter")?.unwrap_or(0);
                dev.enable_packet_switch_slave_slot(loc, slave, port, slot, Packet::new(id, 0), mask, msel, arbiter)
                    .with_context(context)?;
            } else {
                dev.disable_packet_switch_slave_slot(loc, slave, port, slot).with_context(context)?;
            }
        }
        other => bail!("Unknown command '{}'\n\n{}", other, USAGE),
    }
    Ok(())
}

/// Print recorded writes, annotated with the decoded register.
fn print_writes(dev: &AieDevice<RecordingIo>) {
    for (addr, value) in dev.io().writes() {
        let tile = TileAddress::decode(addr.wrapping_sub(dev.base_addr()));
        let decoded = dev
            .arch()
            .tile_type(tile.loc())
            .and_then(|t| decode_register(dev.arch().stream_module(t), tile.offset, value));

        match decoded {
            Some(d) => println!("write32 0x{:X} 0x{:08X}  # {} {}", addr, value, tile.loc(), d),
            None => println!("write32 0x{:X} 0x{:08X}", addr, value),
        }
    }
}

fn expect_args(command: &str, args: &[String], min: usize) -> anyhow::Result<()> {
    if args.len() < min {
        bail!("'{}' needs at least {} arguments, got {}\n\n{}", command, min, args.len(), USAGE);
    }
    Ok(())
}

fn tile_arg(args: &[String]) -> anyhow::Result<TileLoc> {
    Ok(TileLoc::new(arg(args, 0, "col")?, arg(args, 1, "row")?))
}

/// Parse a required positional argument.
fn arg<T: ParseArg>(args: &[String], index: usize, name: &str) -> anyhow::Result<T> {
    let raw = args.get(index).with_context(|| format!("Missing {}", name))?;
    T::parse_arg(raw).with_context(|| format!("Invalid {}: '{}'", name, raw))
}

/// Parse an optional positional argument.
fn opt_arg<T: ParseArg>(args: &[String], index: usize, name: &str) -> anyhow::Result<Option<T>> {
    match args.get(index) {
        Some(_) => arg(args, index, name).map(Some),
        None => Ok(None),
    }
}

fn on_off(s: &str) -> anyhow::Result<bool> {
    match s {
        "on" | "1" | "enable" => Ok(true),
        "off" | "0" | "disable" => Ok(false),
        _ => bail!("Expected on|off, got '{}'", s),
    }
}

/// Command line value parsing; numbers accept hex.
trait ParseArg: Sized {
    fn parse_arg(s: &str) -> anyhow::Result<Self>;
}

impl ParseArg for u8 {
    fn parse_arg(s: &str) -> anyhow::Result<Self> {
        let value = parse_u64(s).context("not a number")?;
        u8::try_from(value).context("out of range")
    }
}

impl ParseArg for PortType {
    fn parse_arg(s: &str) -> anyhow::Result<Self> {
        Ok(PortType::from_str(s)?)
    }
}
