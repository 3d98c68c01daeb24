//! Firmware configuration.
//!
//! [`Config`] is built once at startup and handed to the
//! [`ControlLoop`](crate::control::ControlLoop), [`AccessPoint`] describes
//! the soft-AP brought up next to it.

use embassy_time::Duration;
use heapless::String;

use crate::{AppError, ambient::Intensity, ambient::MAX_INTENSITY};

/// Intensity below which the lamp is switched on.
pub const DEFAULT_THRESHOLD: Intensity = 400;
/// Pause between switching the lamp on and measuring its contribution.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(50);
/// Pause at the end of every iteration.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Raw ADC value the reading has to stay below for the lamp to be on.
    pub threshold: Intensity,
    /// Time the sensor is given to settle after the lamp turns on,
    /// before its own contribution is measured.
    pub settle_delay: Duration,
    /// Time between two iterations, bounds sampling rate and power draw.
    pub period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            settle_delay: DEFAULT_SETTLE_DELAY,
            period: DEFAULT_PERIOD,
        }
    }
}

impl Config {
    /// Create a validated configuration.
    pub fn new(
        threshold: Intensity,
        settle_delay: Duration,
        period: Duration,
    ) -> Result<Self, AppError> {
        if threshold > MAX_INTENSITY {
            return Err(AppError::InvalidThreshold(threshold, MAX_INTENSITY));
        }
        Ok(Self {
            threshold,
            settle_delay,
            period,
        })
    }
}

/// Settings of the soft access point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub ssid: String<32>,
    pub password: String<64>,
    pub channel: u8,
    /// Hide the SSID from beacons
    pub hidden: bool,
    pub max_connections: u16,
}

impl AccessPoint {
    /// WPA2 passphrases are 8 to 63 characters long.
    const PASSWORD_LEN: core::ops::RangeInclusive<usize> = 8..=63;

    pub fn new(ssid: &str, password: &str) -> Result<Self, AppError> {
        if !Self::PASSWORD_LEN.contains(&password.len()) {
            return Err(AppError::InvalidPassword);
        }
        Ok(Self {
            ssid: String::try_from(ssid).map_err(|_| AppError::InvalidSsid)?,
            password: String::try_from(password).map_err(|_| AppError::InvalidPassword)?,
            channel: 1,
            hidden: false,
            max_connections: 2,
        })
    }
}

impl Default for AccessPoint {
    fn default() -> Self {
        let mut ssid = String::new();
        let mut password = String::new();
        // both fit their buffers
        ssid.push_str("ilt3t").ok();
        password.push_str("knowledge").ok();
        Self {
            ssid,
            password,
            channel: 1,
            hidden: false,
            max_connections: 2,
        }
    }
}
