#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod interface;
pub mod registers;
pub mod sensors;

pub mod acquisition;
pub mod config_file;
pub mod fifo;
pub mod interrupt;

// Re-export main types
pub use device::{AccelData, Bmi08xDriver, GyroData, SensorTime, SENSOR_TIME_RESOLUTION};
pub use interface::{I2cInterface, SpiInterface};
pub use sensors::{
    AccelBandwidth, AccelConfig, AccelDataG, AccelOdr, AccelPowerMode, AccelRange, GyroConfig,
    GyroOdrBw, GyroPowerMode, GyroRange, Variant,
};

pub use acquisition::{
    Acquisition, AcquisitionConfig, AcquisitionState, AcquisitionSummary, CycleReport,
    ErrorPolicy, PollPolicy,
};
pub use fifo::{
    extract::{FrameExtractor, SampleBatch, SampleFrame},
    FifoBuffer, FifoConfig, FifoMode, FifoWatermark, FIFO_SIZE, FRAME_SIZE, MAX_BATCH_FRAMES,
};
pub use interrupt::{
    AccelIntConfig, AccelInterrupt, DataIntStatus, InterruptChannel, InterruptPinConfig,
};

/// BMI08x accelerometer I2C address when SDO1 is pulled low (default: 0x18)
pub const ACCEL_I2C_ADDRESS_SDO_LOW: u8 = 0x18;

/// BMI08x accelerometer I2C address when SDO1 is pulled high (alternative: 0x19)
pub const ACCEL_I2C_ADDRESS_SDO_HIGH: u8 = 0x19;

/// BMI08x gyroscope I2C address when SDO2 is pulled low (default: 0x68)
pub const GYRO_I2C_ADDRESS_SDO_LOW: u8 = 0x68;

/// BMI08x gyroscope I2C address when SDO2 is pulled high (alternative: 0x69)
pub const GYRO_I2C_ADDRESS_SDO_HIGH: u8 = 0x69;

/// Expected value of the accelerometer `ACC_CHIP_ID` register on the BMI085
pub const BMI085_ACCEL_CHIP_ID: u8 = 0x1F;

/// Expected value of the accelerometer `ACC_CHIP_ID` register on the BMI088
pub const BMI088_ACCEL_CHIP_ID: u8 = 0x1E;

/// Expected value of the gyroscope `GYRO_CHIP_ID` register (both variants)
pub const GYRO_CHIP_ID: u8 = 0x0F;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with one of the two dies
    Bus(E),
    /// Invalid accelerometer chip ID (contains the actual value read)
    InvalidAccelDevice(u8),
    /// Invalid gyroscope chip ID (contains the actual value read)
    InvalidGyroDevice(u8),
    /// Invalid configuration parameter
    InvalidConfig,
    /// Config stream rejected before upload (empty or odd length)
    InvalidConfigStream,
    /// Accelerometer feature engine did not report ready after the config
    /// stream upload (contains the `INTERNAL_STATUS` message nibble)
    ConfigStreamFailed(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
