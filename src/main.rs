#![no_std]
#![no_main]

use embassy_executor::Spawner;
use esp_backtrace as _;
use log::{error, info};

use ambient_lamp::{
    bsp::Board,
    clock::EmbassyClock,
    config::{AccessPoint, Config},
    control::ControlLoop,
    wifi,
};

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    let board = Board::init();

    // The lamp works without the access point.
    if let Err(error) = wifi::start(spawner, board.wifi, &AccessPoint::default()) {
        error!("Access point not started: {}", error);
    }

    let mut control = ControlLoop::new(
        Config::default(),
        board.light_sensor,
        board.lamp,
        EmbassyClock,
    );
    info!("Lamp controller ready");
    control.run().await
}
