use crate::error::CommandError;
use crate::request::ControlRequest;

// The transport half of a handle: owns the native connection, submits
// encoded requests, and manages open / close state.
pub trait ExecutableUDMX {
    /// Submits a fully-encoded request through the native connection.
    /// Fails with [`CommandError::DeviceNotOpen`] if the handle has been
    /// closed, without touching the transport.
    fn send_request(&mut self, request: ControlRequest) -> Result<(), CommandError>;

    /// True while the native device connection is held.
    fn is_open(&self) -> bool;

    /// Releases the native connection. Idempotent, a handle stays closed
    /// for good (obtain a new one to reconnect).
    fn close(&mut self);
}

// The commands a uDMX accepts. These only encode; send_request must be
// implemented by the transport.
pub trait UDMXCommands: ExecutableUDMX {
    /// Set a single DMX channel (0..511) to a value (0..255).
    ///
    /// Channel addressing is forwarded to the device as-is; an
    /// out-of-range channel surfaces as a transfer failure, if at all.
    fn set_single_channel(&mut self, channel: u16, value: u8) -> Result<(), CommandError> {
        self.send_request(ControlRequest::set_single_channel(channel, value))
    }

    /// Set a contiguous run of channels starting at `start_channel`, one
    /// byte per channel. The caller keeps
    /// `start_channel + values.len() - 1` inside the universe.
    fn set_channel_range(&mut self, start_channel: u16, values: &[u8]) -> Result<(), CommandError> {
        self.send_request(ControlRequest::set_channel_range(start_channel, values))
    }

    /// Reboot the device into its bootloader. On success the device drops
    /// off the bus and re-enumerates; this handle is stale afterwards and
    /// must be closed, not reused.
    fn start_bootloader(&mut self) -> Result<(), CommandError> {
        self.send_request(ControlRequest::start_bootloader())
    }
}

// We primarily need the bus number, and address for identification..
#[derive(Debug, Clone)]
pub struct UDMXLocation {
    pub(crate) bus_number: u8,
    pub(crate) address: u8,
}

impl UDMXLocation {
    pub fn bus_number(&self) -> u8 {
        self.bus_number
    }
    pub fn address(&self) -> u8 {
        self.address
    }
}
