//! Board Support Package for the lamp controller on an esp32c3 board.
//!
//! ### Analog input
//!
//! | Signal                        | ADC channel | GPIO  |
//! | ----------------------------- | ----------- | ----- |
//! | Light dependent resistor      | ADC1 CH0    | GPIO0 |
//!
//! The ADC runs at its native 12-bit resolution with 0 dB attenuation.
//!
//! ### I/Os
//!
//! | I/O Devices                   | GPIO  |
//! | ----------------------------- | ----- |
//! | Lamp MOSFET driver            | GPIO3 |
//! | Status LED                    | GPIO7 |
//!
//! Both outputs start low, matching the `Off` state of the control loop.

use esp_hal::{
    analog::adc::{Adc, AdcConfig, Attenuation},
    clock::CpuClock,
    gpio::{GpioPin, Level, Output},
    rng::Rng,
    timer::systimer::SystemTimer,
};
use esp_wifi::{EspWifiController, wifi::WifiController};
use log::info;
use static_cell::StaticCell;

use crate::{ambient::AmbientSensor, lamp::Lamp};

pub type LightSensor = AmbientSensor<GpioPin<0>>;

/// Board-specific peripherals.
pub struct Board {
    /// Light dependent resistor on ADC1
    pub light_sensor: LightSensor,
    /// Lamp driver and status LED
    pub lamp: Lamp,
    /// Wifi controller, not yet configured
    pub wifi: WifiController<'static>,
}

impl Board {
    /// Initialize the board.
    pub fn init() -> Self {
        let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
        let p = esp_hal::init(config);
        esp_alloc::heap_allocator!(72 * 1024);

        info!("{} initialized!", esp_hal::chip!());

        let light_sensor = {
            let mut adc_config = AdcConfig::new();
            let pin = adc_config.enable_pin(p.GPIO0, Attenuation::_0dB);
            AmbientSensor::new(Adc::new(p.ADC1, adc_config), pin)
        };
        info!("Initialized ADC1");

        let lamp = Lamp::new(
            Output::new(p.GPIO3, Level::Low),
            Output::new(p.GPIO7, Level::Low),
        );
        info!("Initialized lamp outputs");

        let timer0 = SystemTimer::new(p.SYSTIMER);
        esp_hal_embassy::init(timer0.alarm0);
        info!("Initialized Embassy Executor");

        info!("Initializing wifi controller...");
        let wifi = {
            let timg0 = esp_hal::timer::timg::TimerGroup::new(p.TIMG0);
            static WIFI: StaticCell<EspWifiController<'static>> = StaticCell::new();
            let init = WIFI.init(
                esp_wifi::init(timg0.timer0, Rng::new(p.RNG), p.RADIO_CLK)
                    .expect("Failed to initialize radio"),
            );
            let (controller, _interfaces) =
                esp_wifi::wifi::new(init, p.WIFI).expect("Failed to initialize wifi controller");
            controller
        };
        Self {
            light_sensor,
            lamp,
            wifi,
        }
    }
}
