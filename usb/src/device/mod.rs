pub mod base;
mod libusb;

pub use base::{ExecutableUDMX, UDMXCommands, UDMXLocation};
pub use libusb::{find_devices, UDMX};
