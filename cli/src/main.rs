use anyhow::{bail, Result};
use clap::Parser;
use log::info;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use udmx_usb::device::{find_devices, ExecutableUDMX, UDMXCommands, UDMX};
use udmx_usb::{CHANNEL_COUNT, MANUFACTURER, PID_UDMX, PRODUCT, VID_UDMX};

use crate::cli::{Cli, Commands, LevelFilter};

mod cli;

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    CombinedLogger::init(vec![TermLogger::new(
        match args.log_level {
            LevelFilter::Off => log::LevelFilter::Off,
            LevelFilter::Error => log::LevelFilter::Error,
            LevelFilter::Warn => log::LevelFilter::Warn,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Trace => log::LevelFilter::Trace,
        },
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .unwrap();

    if let Commands::Detect = args.command {
        return detect();
    }

    let Some(mut device) = UDMX::open()? else {
        bail!(
            "no uDMX interface found ({:04x}:{:04x}, \"{}\" / \"{}\")",
            VID_UDMX,
            PID_UDMX,
            MANUFACTURER,
            PRODUCT
        );
    };

    let result = run_command(&mut device, &args.command);

    // Release the device and the usb context on every path out.
    device.close();
    result
}

fn run_command<D: UDMXCommands>(device: &mut D, command: &Commands) -> Result<()> {
    match command {
        Commands::Detect => unreachable!("handled before the device is opened"),

        Commands::Set { channel, value } => {
            check_range(*channel, 1)?;
            device.set_single_channel(*channel, *value)?;
            info!("Channel {} set to {}", channel, value);
        }

        Commands::Range { start, values } => {
            check_range(*start, values.len())?;
            device.set_channel_range(*start, values)?;
            info!("Channels {}-{} updated", start, *start as usize + values.len() - 1);
        }

        Commands::Blackout => {
            device.set_channel_range(0, &[0; CHANNEL_COUNT as usize])?;
            info!("All {} channels set to zero", CHANNEL_COUNT);
        }

        Commands::Bootloader => {
            device.start_bootloader()?;
            info!("Bootloader requested, the device will now re-enumerate");
        }
    }

    Ok(())
}

fn detect() -> Result<()> {
    let devices = find_devices();
    if devices.is_empty() {
        bail!("no uDMX interface found ({:04x}:{:04x})", VID_UDMX, PID_UDMX);
    }

    for location in devices {
        println!(
            "uDMX interface on bus {:03} device {:03}",
            location.bus_number(),
            location.address()
        );
    }
    Ok(())
}

/// The device forwards out-of-range addressing unchecked, so keep user
/// input inside the universe before it reaches the wire.
fn check_range(start: u16, count: usize) -> Result<()> {
    if start >= CHANNEL_COUNT {
        bail!("channel {} is out of range (0-{})", start, CHANNEL_COUNT - 1);
    }
    if start as usize + count > CHANNEL_COUNT as usize {
        bail!(
            "{} values starting at channel {} run past the end of the universe",
            count,
            start
        );
    }
    Ok(())
}
