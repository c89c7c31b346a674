use crate::commands::Command;
use rusb::{Direction, Recipient, RequestType};

/// A fully-encoded vendor control transfer, ready to be submitted to the
/// device. `length` is the declared transfer length as it appears in the
/// setup packet, which for every uDMX command equals the `value` field --
/// including `SetSingleChannel`, where the firmware reuses the field and
/// never reads it against the (empty) payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRequest {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
    pub payload: Vec<u8>,
}

impl ControlRequest {
    /// Set one channel (`index`) to `value`, no data stage.
    pub fn set_single_channel(channel: u16, value: u8) -> Self {
        Self::command(Command::SetSingleChannel, u16::from(value), channel, Vec::new())
    }

    /// Set `values.len()` channels starting at `start_channel`.
    pub fn set_channel_range(start_channel: u16, values: &[u8]) -> Self {
        Self::command(
            Command::SetChannelRange,
            values.len() as u16,
            start_channel,
            values.to_vec(),
        )
    }

    /// Ask the firmware to reboot into its bootloader.
    pub fn start_bootloader() -> Self {
        Self::command(Command::StartBootloader, 0, 0, Vec::new())
    }

    fn command(command: Command, value: u16, index: u16, payload: Vec<u8>) -> Self {
        Self {
            request_type: rusb::request_type(Direction::Out, RequestType::Vendor, Recipient::Device),
            request: command.request_id(),
            value,
            index,
            length: value,
            payload,
        }
    }
}
