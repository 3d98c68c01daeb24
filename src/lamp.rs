//! Lamp output and its status LED.

/// Something that can switch the lamp.
pub trait ActuatorDriver {
    /// Drive the lamp and the status indicator to the same level.
    ///
    /// Setting the level it already has is harmless.
    fn set_lamp(&mut self, on: bool);
}

#[cfg(feature = "esp32c3")]
pub use hal::Lamp;

#[cfg(feature = "esp32c3")]
mod hal {
    use esp_hal::gpio::{Level, Output};

    use super::ActuatorDriver;

    pub struct Lamp {
        /// Gate of the MOSFET that powers the lamp
        driver: Output<'static>,
        /// Onboard LED mirroring the lamp
        status: Output<'static>,
    }

    impl Lamp {
        pub fn new(driver: Output<'static>, status: Output<'static>) -> Self {
            Self { driver, status }
        }
    }

    impl ActuatorDriver for Lamp {
        fn set_lamp(&mut self, on: bool) {
            let level = Level::from(on);
            self.status.set_level(level);
            self.driver.set_level(level);
        }
    }
}
