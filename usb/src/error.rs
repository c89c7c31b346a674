#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),

    #[error("Device is not open")]
    DeviceNotOpen,
}
