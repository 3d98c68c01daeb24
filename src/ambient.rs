//! A simple struct to read from the ambient light sensor.
//!
//! The sensor is a light dependent resistor in a voltage divider on ADC1.
//! The more light falls on it, the lower the reading.

/// Raw 12-bit ADC reading, lower is brighter.
pub type Intensity = u16;

/// Largest value the 12-bit ADC can produce.
pub const MAX_INTENSITY: Intensity = 4095;

/// Source of ambient light readings.
///
/// Reads never fail from the control loop's point of view,
/// whatever the hardware hands back is taken as the current light level.
pub trait LightSampler {
    /// Read the current light intensity.
    fn sample(&mut self) -> Intensity;
}

#[cfg(feature = "esp32c3")]
pub use hal::AmbientSensor;

#[cfg(feature = "esp32c3")]
mod hal {
    use esp_hal::{
        Blocking,
        analog::adc::{Adc, AdcPin},
        peripherals::ADC1,
    };
    use log::info;

    use super::{Intensity, LightSampler};

    pub struct AmbientSensor<PIN> {
        /// ADC1, configured for one-shot conversions
        adc: Adc<'static, ADC1, Blocking>,
        /// The analog pin the light dependent resistor is wired to
        pin: AdcPin<PIN, ADC1>,
    }

    impl<PIN> AmbientSensor<PIN> {
        /// Initialize the sensor on an already configured ADC channel.
        pub fn new(adc: Adc<'static, ADC1, Blocking>, pin: AdcPin<PIN, ADC1>) -> Self {
            info!("Ambient light sensor ready");
            Self { adc, pin }
        }
    }

    impl<PIN> LightSampler for AmbientSensor<PIN>
    where
        PIN: esp_hal::analog::adc::AdcChannel,
    {
        fn sample(&mut self) -> Intensity {
            // a one-shot conversion takes a few microseconds, just spin on it
            nb::block!(self.adc.read_oneshot(&mut self.pin)).unwrap_or_default()
        }
    }
}
