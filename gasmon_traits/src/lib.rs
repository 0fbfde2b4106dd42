pub mod clock;

pub use clock::{Clock, SystemClock};

/// One status sample as reported by the remote weight sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceStatus {
    /// Gross cylinder weight in kilograms.
    pub weight_kg: f64,
    /// Monotonic swap counter maintained by the device.
    pub gas_swap_count: i64,
    /// Device-side time of the last measurement, in epoch seconds.
    pub last_update: i64,
}

pub trait StatusSource {
    /// Fetch one sample. A timeout or transport failure is an `Err`.
    fn fetch(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<DeviceStatus, Box<dyn std::error::Error + Send + Sync>>;
}

impl<S: StatusSource + ?Sized> StatusSource for Box<S> {
    fn fetch(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<DeviceStatus, Box<dyn std::error::Error + Send + Sync>> {
        (**self).fetch(timeout)
    }
}
