//! Accelerometer sensor types and configuration
//!
//! Provides types, enums, and utility functions for the BMI08x's 3-axis
//! accelerometer die. The two supported package variants differ only in the
//! accelerometer range table; the register codes are shared.

use crate::{BMI085_ACCEL_CHIP_ID, BMI088_ACCEL_CHIP_ID};

/// Supported BMI08x package variants
///
/// Each variant fixes a distinct maximum accelerometer range and its own
/// vendor config stream; everything else about the register maps is common.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// BMI085: accelerometer ranges ±2/4/8/16 g
    Bmi085,
    /// BMI088: accelerometer ranges ±3/6/12/24 g
    Bmi088,
}

impl Variant {
    /// Expected `ACC_CHIP_ID` value for this variant
    #[must_use]
    pub const fn accel_chip_id(self) -> u8 {
        match self {
            Self::Bmi085 => BMI085_ACCEL_CHIP_ID,
            Self::Bmi088 => BMI088_ACCEL_CHIP_ID,
        }
    }

    /// The widest range this variant supports (register code 0x03)
    ///
    /// ±16 g on the BMI085, ±24 g on the BMI088. This is the range the
    /// FIFO-full acquisition profile selects.
    #[must_use]
    pub const fn max_range(self) -> AccelRange {
        match self {
            Self::Bmi085 => AccelRange::Max16G,
            Self::Bmi088 => AccelRange::Max24G,
        }
    }
}

/// Accelerometer measurement range
///
/// The register code (0x00..0x03) selects a different physical range per
/// variant, so the code and the variant are both needed to interpret raw
/// samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2 g (BMI085) / ±3 g (BMI088)
    Min2G3G = 0,
    /// ±4 g (BMI085) / ±6 g (BMI088)
    Mid4G6G = 1,
    /// ±8 g (BMI085) / ±12 g (BMI088)
    Mid8G12G = 2,
    /// ±16 g (BMI085) / ±24 g (BMI088)
    Max16G = 3,
}

#[allow(non_upper_case_globals)]
impl AccelRange {
    /// Alias for the widest BMI088 range, same register code as
    /// [`AccelRange::Max16G`]
    pub const Max24G: Self = Self::Max16G;

    /// Register code for `ACC_RANGE`
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Full-scale magnitude in g for the given variant
    #[must_use]
    pub const fn max_g(self, variant: Variant) -> u8 {
        match (variant, self) {
            (Variant::Bmi085, Self::Min2G3G) => 2,
            (Variant::Bmi085, Self::Mid4G6G) => 4,
            (Variant::Bmi085, Self::Mid8G12G) => 8,
            (Variant::Bmi085, Self::Max16G) => 16,
            (Variant::Bmi088, Self::Min2G3G) => 3,
            (Variant::Bmi088, Self::Mid4G6G) => 6,
            (Variant::Bmi088, Self::Mid8G12G) => 12,
            (Variant::Bmi088, Self::Max16G) => 24,
        }
    }

    /// Sensitivity in LSB/g for the given variant
    ///
    /// This is used to convert raw sensor values to physical units.
    #[must_use]
    pub const fn sensitivity(self, variant: Variant) -> f32 {
        32768.0 / self.max_g(variant) as f32
    }
}

/// Accelerometer output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelOdr {
    /// 12.5 Hz
    Hz12_5 = 0x05,
    /// 25 Hz
    Hz25 = 0x06,
    /// 50 Hz
    Hz50 = 0x07,
    /// 100 Hz
    Hz100 = 0x08,
    /// 200 Hz
    Hz200 = 0x09,
    /// 400 Hz
    Hz400 = 0x0A,
    /// 800 Hz
    Hz800 = 0x0B,
    /// 1600 Hz (the FIFO-full acquisition profile)
    Hz1600 = 0x0C,
}

impl AccelOdr {
    /// Nominal sampling frequency in Hz
    #[must_use]
    pub const fn hz(self) -> f32 {
        match self {
            Self::Hz12_5 => 12.5,
            Self::Hz25 => 25.0,
            Self::Hz50 => 50.0,
            Self::Hz100 => 100.0,
            Self::Hz200 => 200.0,
            Self::Hz400 => 400.0,
            Self::Hz800 => 800.0,
            Self::Hz1600 => 1600.0,
        }
    }
}

/// Accelerometer bandwidth parameter (oversampling of the data filter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelBandwidth {
    /// 4-fold oversampling
    Osr4 = 0x08,
    /// 2-fold oversampling
    Osr2 = 0x09,
    /// No oversampling (normal bandwidth)
    Normal = 0x0A,
}

/// Accelerometer power mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelPowerMode {
    /// Active: measurements running
    Active,
    /// Suspend: configuration retained, no measurements
    Suspend,
}

impl AccelPowerMode {
    /// Value for the `ACC_PWR_CONF` register
    #[must_use]
    pub const fn power_save_code(self) -> u8 {
        match self {
            Self::Active => 0x00,
            Self::Suspend => 0x03,
        }
    }
}

/// Accelerometer configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelConfig {
    /// Output data rate
    pub odr: AccelOdr,
    /// Filter bandwidth
    pub bandwidth: AccelBandwidth,
    /// Measurement range
    pub range: AccelRange,
    /// Power mode
    pub power: AccelPowerMode,
}

impl Default for AccelConfig {
    fn default() -> Self {
        Self {
            odr: AccelOdr::Hz100,
            bandwidth: AccelBandwidth::Normal,
            range: AccelRange::Min2G3G,
            power: AccelPowerMode::Active,
        }
    }
}

impl AccelConfig {
    /// The acquisition profile used for FIFO-full batch reads: 1600 Hz,
    /// normal bandwidth, widest range of the variant, active power mode.
    #[must_use]
    pub const fn fifo_full_profile(variant: Variant) -> Self {
        Self {
            odr: AccelOdr::Hz1600,
            bandwidth: AccelBandwidth::Normal,
            range: variant.max_range(),
            power: AccelPowerMode::Active,
        }
    }
}

/// Accelerometer data in physical units (g-force)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelDataG {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw_x` - Raw X-axis value
    /// * `raw_y` - Raw Y-axis value
    /// * `raw_z` - Raw Z-axis value
    /// * `sensitivity` - Sensitivity in LSB/g (from [`AccelRange::sensitivity`])
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw_x) / sensitivity,
            y: f32::from(raw_y) / sensitivity,
            z: f32::from(raw_z) / sensitivity,
        }
    }

    /// Get the magnitude of the acceleration vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
