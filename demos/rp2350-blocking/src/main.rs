//! Interrupt-driven FIFO batch acquisition for the BMI088 on the
//! Raspberry Pi Pico 2 (blocking version)
//!
//! Arms the FIFO-full interrupt, then collects three batches of up to 100
//! accelerometer samples each, letting the sensor buffer 1600 Hz data while
//! the host does nothing but poll the latched status.
//!
//! Hardware connections (I2C0):
//! - SDA: GPIO12
//! - SCL: GPIO13
//! - VCC: 3.3V
//! - GND: GND
//! - SDO1/SDO2: GND (for addresses 0x18 / 0x68)
//!
//! Both dies sit on the same bus, so the single I2C peripheral is split
//! with `embedded-hal-bus`.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::{
    bind_interrupts,
    block::ImageDef,
    config::Config,
    i2c::{Config as I2cConfig, I2c, InterruptHandler as I2cInterruptHandler},
    peripherals::I2C0,
};
use embassy_time::Delay;
use embedded_hal_bus::i2c::RefCellDevice;
use panic_probe as _;

use bmi08x::{
    Acquisition, AcquisitionConfig, Bmi08xDriver, FifoBuffer, I2cInterface, Variant,
};

/// Feature engine firmware from Bosch's BMI08x sensor API; the checked-in
/// file is a placeholder, see the README
static CONFIG_STREAM: &[u8] = include_bytes!("bmi08x_config.bin");

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

// Bind I2C interrupts
bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("BMI088 FIFO-full batch acquisition");

    let p = embassy_rp::init(Config::default());

    // Configure I2C at 400kHz on pins 12(SDA)/13(SCL)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_13, p.PIN_12, i2c_config);

    // One physical bus, two dies: split it
    let bus = RefCell::new(i2c);
    let accel_interface = I2cInterface::accel_default(RefCellDevice::new(&bus));
    let gyro_interface = I2cInterface::gyro_default(RefCellDevice::new(&bus));

    let mut imu = match Bmi08xDriver::new(accel_interface, gyro_interface, Variant::Bmi088) {
        Ok(imu) => imu,
        Err(e) => {
            error!("Failed to detect BMI088: {:?}", e);
            loop {
                embassy_time::block_for(embassy_time::Duration::from_millis(1000));
            }
        }
    };

    let mut delay = Delay;
    if let Err(e) = imu.init(CONFIG_STREAM, &mut delay) {
        error!("Failed to initialize: {:?}", e);
        loop {
            embassy_time::block_for(embassy_time::Duration::from_millis(1000));
        }
    }

    // init already applied the 1600 Hz full-range batch profile
    let mut buffer = FifoBuffer::new();
    let mut acq = Acquisition::new(AcquisitionConfig::default());

    info!("Waiting for FIFO-full events...");

    let result = acq.run(&mut imu, &mut buffer, &mut delay, |report| {
        info!(
            "cycle {}: {} bytes in FIFO, {} frames extracted",
            report.cycle,
            report.fifo_bytes,
            report.frames.len()
        );

        if let Some(time) = report.sensor_time {
            info!("  sensor time: {} us", time.as_micros());
        }

        // Print a few samples from the batch
        for frame in report.frames.iter().take(4) {
            info!("  x={} y={} z={}", frame.x, frame.y, frame.z);
        }
    });

    match result {
        Ok(summary) => {
            info!(
                "done: {} cycles, {} frames, {} timeouts",
                summary.cycles_completed, summary.frames_total, summary.timeouts
            );
        }
        Err(e) => error!("acquisition failed: {:?}", e),
    }

    loop {
        embassy_time::block_for(embassy_time::Duration::from_millis(1000));
    }
}
