use crate::device::base::{ExecutableUDMX, UDMXCommands, UDMXLocation};
use crate::error::{CommandError, ConnectError};
use crate::request::ControlRequest;
use crate::{MANUFACTURER, PID_UDMX, PRODUCT, VID_UDMX};
use log::{debug, info};
use rusb::{Context, DeviceDescriptor, DeviceHandle, UsbContext};
use std::time::Duration;

const COMMAND_TIMEOUT: Duration = Duration::from_secs(1);
const DESCRIPTOR_TIMEOUT: Duration = Duration::from_millis(100);

/// An opened, validated uDMX interface.
///
/// The handle owns the libusb device connection and, through it, the libusb
/// context created for it; both are released on [`close`] or on drop,
/// whichever comes first. One handle per physical device -- operations take
/// `&mut self` and block until the transfer completes or fails.
///
/// [`close`]: ExecutableUDMX::close
#[derive(Debug)]
pub struct UDMX<T: UsbContext> {
    handle: Option<DeviceHandle<T>>,
    timeout: Duration,
}

impl UDMX<Context> {
    /// Locate, validate and open the first attached uDMX interface.
    ///
    /// Returns `Ok(None)` when no attached device carries the uDMX
    /// vendor/product identifiers, or when a candidate fails descriptor
    /// string validation. Errors are reserved for faults in the USB layer
    /// itself (enumeration failure, no permission to open the device).
    pub fn open() -> Result<Option<Self>, ConnectError> {
        let context = Context::new()?;
        Self::open_with(context)
    }
}

impl<T: UsbContext> UDMX<T> {
    /// As [`UDMX::open`], enumerating within the given context.
    pub fn open_with(context: T) -> Result<Option<Self>, ConnectError> {
        for device in context.devices()?.iter() {
            let Ok(descriptor) = device.device_descriptor() else {
                continue;
            };
            if !is_udmx_id(descriptor.vendor_id(), descriptor.product_id()) {
                continue;
            }
            let handle = device.open()?;
            return Self::from_device(handle, descriptor);
        }

        debug!(
            "No USB device matching {:04x}:{:04x} attached",
            VID_UDMX, PID_UDMX
        );
        Ok(None)
    }

    /// Validate an already-opened candidate against the uDMX descriptor
    /// strings. Yields `Ok(None)` and drops the handle when the device
    /// turns out not to be a uDMX.
    pub fn from_device(
        handle: DeviceHandle<T>,
        descriptor: DeviceDescriptor,
    ) -> Result<Option<Self>, ConnectError> {
        let device = handle.device();
        info!("Connected to possible uDMX device at {:?}", device);

        // A device without readable string descriptors can't be verified,
        // treat it the same as a mismatch.
        let language = handle
            .read_languages(DESCRIPTOR_TIMEOUT)
            .unwrap_or_default()
            .first()
            .cloned();
        let Some(language) = language else {
            debug!("Device at {:?} has no string descriptor language", device);
            return Ok(None);
        };

        let manufacturer = handle
            .read_manufacturer_string(language, &descriptor, DESCRIPTOR_TIMEOUT)
            .unwrap_or_default();
        let product = handle
            .read_product_string(language, &descriptor, DESCRIPTOR_TIMEOUT)
            .unwrap_or_default();

        if !is_udmx_identity(&manufacturer, &product) {
            debug!(
                "Device at {:?} reports {:?} / {:?}, not a uDMX",
                device, manufacturer, product
            );
            return Ok(None);
        }

        info!("uDMX interface validated at {:?}", device);
        Ok(Some(Self {
            handle: Some(handle),
            timeout: COMMAND_TIMEOUT,
        }))
    }
}

impl<T: UsbContext> ExecutableUDMX for UDMX<T> {
    fn send_request(&mut self, request: ControlRequest) -> Result<(), CommandError> {
        let Some(handle) = self.handle.as_ref() else {
            return Err(CommandError::DeviceNotOpen);
        };

        // libusb takes the setup packet's wLength from the buffer, so the
        // data stage is exactly the payload. The firmware never reads the
        // field for the empty-payload commands.
        let written = match handle.write_control(
            request.request_type,
            request.request,
            request.value,
            request.index,
            &request.payload,
            self.timeout,
        ) {
            Ok(written) => written,
            Err(error) => {
                debug!("Control transfer {:#04x} failed: {}", request.request, error);
                return Err(error.into());
            }
        };

        if written != request.payload.len() {
            debug!(
                "Short control transfer: wrote {} of {} bytes",
                written,
                request.payload.len()
            );
            return Err(CommandError::UsbError(rusb::Error::Io));
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Closing uDMX device at {:?}", handle.device());
            // Dropping the handle closes the device and releases the last
            // reference to the libusb context.
            drop(handle);
        }
    }
}

impl<T: UsbContext> UDMXCommands for UDMX<T> {}

/// Enumerate every attached device carrying the uDMX vendor/product pair,
/// without opening or validating any of them.
pub fn find_devices() -> Vec<UDMXLocation> {
    let mut found_devices = Vec::new();

    if let Ok(devices) = rusb::devices() {
        for device in devices.iter() {
            if let Ok(descriptor) = device.device_descriptor() {
                if is_udmx_id(descriptor.vendor_id(), descriptor.product_id()) {
                    found_devices.push(UDMXLocation {
                        bus_number: device.bus_number(),
                        address: device.address(),
                    });
                }
            }
        }
    }

    found_devices
}

fn is_udmx_id(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == VID_UDMX && product_id == PID_UDMX
}

fn is_udmx_identity(manufacturer: &str, product: &str) -> bool {
    manufacturer == MANUFACTURER && product == PRODUCT
}
