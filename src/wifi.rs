//! Soft access point.
//!
//! Runs on its own task and never touches the control loop.

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_wifi::wifi::{
    AccessPointConfiguration, AuthMethod, Configuration, WifiController, WifiEvent, WifiState,
};
use log::{error, info, warn};

use crate::{AppError, config::AccessPoint};

/// Back-off before bringing the access point up again.
const RESTART_DELAY: Duration = Duration::from_secs(5);

/// Configure the radio as an access point and start the task keeping it up.
pub fn start(
    spawner: Spawner,
    mut controller: WifiController<'static>,
    ap: &AccessPoint,
) -> Result<(), AppError> {
    let configuration = Configuration::AccessPoint(AccessPointConfiguration {
        ssid: ap.ssid.as_str().try_into().map_err(|_| AppError::InvalidSsid)?,
        password: ap
            .password
            .as_str()
            .try_into()
            .map_err(|_| AppError::InvalidPassword)?,
        channel: ap.channel,
        ssid_hidden: ap.hidden,
        max_connections: ap.max_connections,
        auth_method: AuthMethod::WPAWPA2Personal,
        ..Default::default()
    });
    controller
        .set_configuration(&configuration)
        .map_err(AppError::Wifi)?;
    info!("[ap] configured `{}` on channel {}", ap.ssid, ap.channel);
    spawner.must_spawn(ap_task(controller));
    Ok(())
}

/// Background task starting the access point, and restarting it if it goes down.
#[embassy_executor::task]
async fn ap_task(mut controller: WifiController<'static>) {
    loop {
        if matches!(esp_wifi::wifi::wifi_state(), WifiState::ApStarted) {
            controller.wait_for_event(WifiEvent::ApStop).await;
            warn!("[ap] stopped");
            Timer::after(RESTART_DELAY).await;
        }
        if matches!(controller.is_started(), Ok(true)) {
            Timer::after(RESTART_DELAY).await;
            continue;
        }
        match controller.start_async().await {
            Ok(()) => info!("[ap] started"),
            Err(e) => {
                error!("[ap] failed to start: {:?}", e);
                Timer::after(RESTART_DELAY).await;
            }
        }
    }
}
