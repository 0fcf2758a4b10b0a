//! Gyroscope sensor types and configuration
//!
//! Provides types, enums, and utility functions for the BMI08x's 3-axis
//! gyroscope die. The acquisition path in this crate never reads gyroscope
//! data, but the die shares the package power domain and must be brought up
//! alongside the accelerometer.

/// Gyroscope measurement range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±2000°/s range
    Dps2000 = 0x00,
    /// ±1000°/s range
    Dps1000 = 0x01,
    /// ±500°/s range
    Dps500 = 0x02,
    /// ±250°/s range
    Dps250 = 0x03,
    /// ±125°/s range
    Dps125 = 0x04,
}

impl GyroRange {
    /// Get the sensitivity in LSB/(°/s)
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps2000 => 16.384,
            Self::Dps1000 => 32.768,
            Self::Dps500 => 65.536,
            Self::Dps250 => 131.072,
            Self::Dps125 => 262.144,
        }
    }

    /// Get the maximum value in °/s
    #[must_use]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Dps2000 => 2000,
            Self::Dps1000 => 1000,
            Self::Dps500 => 500,
            Self::Dps250 => 250,
            Self::Dps125 => 125,
        }
    }
}

/// Combined gyroscope output data rate and filter bandwidth
///
/// The BMI08x gyroscope couples ODR and bandwidth into a single register
/// code, so they are selected together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroOdrBw {
    /// 2000 Hz ODR, 532 Hz bandwidth
    Odr2000Bw532 = 0x00,
    /// 2000 Hz ODR, 230 Hz bandwidth (the FIFO-full acquisition profile)
    Odr2000Bw230 = 0x01,
    /// 1000 Hz ODR, 116 Hz bandwidth
    Odr1000Bw116 = 0x02,
    /// 400 Hz ODR, 47 Hz bandwidth
    Odr400Bw47 = 0x03,
    /// 200 Hz ODR, 23 Hz bandwidth
    Odr200Bw23 = 0x04,
    /// 100 Hz ODR, 12 Hz bandwidth
    Odr100Bw12 = 0x05,
    /// 200 Hz ODR, 64 Hz bandwidth
    Odr200Bw64 = 0x06,
    /// 100 Hz ODR, 32 Hz bandwidth
    Odr100Bw32 = 0x07,
}

impl GyroOdrBw {
    /// Nominal output data rate in Hz
    #[must_use]
    pub const fn odr_hz(self) -> u16 {
        match self {
            Self::Odr2000Bw532 | Self::Odr2000Bw230 => 2000,
            Self::Odr1000Bw116 => 1000,
            Self::Odr400Bw47 => 400,
            Self::Odr200Bw23 | Self::Odr200Bw64 => 200,
            Self::Odr100Bw12 | Self::Odr100Bw32 => 100,
        }
    }
}

/// Gyroscope power mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroPowerMode {
    /// Normal: measurements running
    Normal = 0x00,
    /// Deep suspend: lowest power, configuration lost
    DeepSuspend = 0x20,
    /// Suspend: configuration retained, no measurements
    Suspend = 0x80,
}

/// Gyroscope configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroConfig {
    /// Combined output data rate and bandwidth
    pub odr_bw: GyroOdrBw,
    /// Measurement range
    pub range: GyroRange,
    /// Power mode
    pub power: GyroPowerMode,
}

impl Default for GyroConfig {
    fn default() -> Self {
        Self {
            odr_bw: GyroOdrBw::Odr2000Bw230,
            range: GyroRange::Dps250,
            power: GyroPowerMode::Normal,
        }
    }
}
