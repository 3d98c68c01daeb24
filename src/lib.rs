#![cfg_attr(not(test), no_std)]

use thiserror::Error;

pub mod ambient;
pub mod clock;
pub mod compensation;
pub mod config;
pub mod control;
pub mod lamp;

#[cfg(feature = "esp32c3")]
pub mod bsp;
#[cfg(feature = "esp32c3")]
pub mod wifi;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Threshold {0} must not exceed the sensor maximum {1}")]
    InvalidThreshold(u16, u16),
    #[error("Access point SSID is longer than 32 bytes")]
    InvalidSsid,
    #[error("Access point password must be 8 to 63 bytes long")]
    InvalidPassword,
    #[cfg(feature = "esp32c3")]
    #[error("Wifi error: {0:?}")]
    Wifi(esp_wifi::wifi::WifiError),
}
