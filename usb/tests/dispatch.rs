use udmx_usb::device::{ExecutableUDMX, UDMXCommands};
use udmx_usb::error::CommandError;
use udmx_usb::request::ControlRequest;

/// In-memory transport standing in for an opened device; records every
/// request submitted through it.
struct CapturedUDMX {
    open: bool,
    closed_count: u32,
    sent: Vec<ControlRequest>,
}

impl CapturedUDMX {
    fn open() -> Self {
        Self {
            open: true,
            closed_count: 0,
            sent: Vec::new(),
        }
    }

    fn last_sent(&self) -> &ControlRequest {
        self.sent.last().expect("no request was dispatched")
    }
}

impl ExecutableUDMX for CapturedUDMX {
    fn send_request(&mut self, request: ControlRequest) -> Result<(), CommandError> {
        if !self.open {
            return Err(CommandError::DeviceNotOpen);
        }
        self.sent.push(request);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.closed_count += 1;
        }
    }
}

impl UDMXCommands for CapturedUDMX {}

#[test]
fn single_channel_round_trip() {
    let mut device = CapturedUDMX::open();
    assert!(device.is_open());

    device.set_single_channel(5, 200).unwrap();

    let request = device.last_sent();
    assert_eq!(request.request, 1);
    assert_eq!(request.value, 200);
    assert_eq!(request.index, 5);
    assert_eq!(request.length, 200);
    assert!(request.payload.is_empty());

    device.close();
    assert!(!device.is_open());
}

#[test]
fn channel_range_round_trip() {
    let mut device = CapturedUDMX::open();

    device.set_channel_range(10, &[1, 2, 3]).unwrap();

    let request = device.last_sent();
    assert_eq!(request.request, 2);
    assert_eq!(request.value, 3);
    assert_eq!(request.index, 10);
    assert_eq!(request.length, 3);
    assert_eq!(request.payload, vec![1, 2, 3]);
}

#[test]
fn bootloader_round_trip() {
    let mut device = CapturedUDMX::open();

    device.start_bootloader().unwrap();

    let request = device.last_sent();
    assert_eq!(request.request, 0x32);
    assert_eq!(request.value, 0);
    assert_eq!(request.index, 0);
    assert_eq!(request.length, 0);
    assert!(request.payload.is_empty());
}

#[test]
fn close_is_idempotent() {
    let mut device = CapturedUDMX::open();

    device.close();
    device.close();

    assert!(!device.is_open());
    assert_eq!(device.closed_count, 1);
}

#[test]
fn closed_handle_rejects_commands_without_dispatching() {
    let mut device = CapturedUDMX::open();
    device.close();

    let result = device.set_single_channel(0, 0);
    assert!(matches!(result, Err(CommandError::DeviceNotOpen)));

    let result = device.set_channel_range(0, &[1]);
    assert!(matches!(result, Err(CommandError::DeviceNotOpen)));

    let result = device.start_bootloader();
    assert!(matches!(result, Err(CommandError::DeviceNotOpen)));

    assert!(device.sent.is_empty());
}

#[test]
fn commands_dispatch_in_submission_order() {
    let mut device = CapturedUDMX::open();

    device.set_single_channel(0, 255).unwrap();
    device.set_channel_range(100, &[10, 20]).unwrap();
    device.set_single_channel(511, 1).unwrap();

    let requests: Vec<u8> = device.sent.iter().map(|r| r.request).collect();
    assert_eq!(requests, vec![1, 2, 1]);
    assert_eq!(device.sent[2].index, 511);
    assert_eq!(device.sent[2].value, 1);
}
