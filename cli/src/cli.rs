use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
pub struct Cli {
    /// Minimum log level to print out
    #[clap(long, value_enum, default_value = "warn")]
    pub log_level: LevelFilter,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List attached uDMX interfaces
    Detect,

    /// Set a single DMX channel
    Set {
        /// The DMX channel to set (0-511)
        channel: u16,

        /// The value to apply (0-255)
        value: u8,
    },

    /// Set a contiguous run of DMX channels
    Range {
        /// First DMX channel of the run (0-511)
        start: u16,

        /// The values to apply, one per channel
        #[clap(required = true)]
        values: Vec<u8>,
    },

    /// Zero every channel of the universe
    Blackout,

    /// Reboot the device into its firmware bootloader
    Bootloader,
}

#[repr(usize)]
#[derive(ValueEnum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum LevelFilter {
    /// A level lower than all log levels.
    Off,
    /// Corresponds to the `Error` log level.
    Error,
    /// Corresponds to the `Warn` log level.
    Warn,
    /// Corresponds to the `Info` log level.
    Info,
    /// Corresponds to the `Debug` log level.
    Debug,
    /// Corresponds to the `Trace` log level.
    Trace,
}
