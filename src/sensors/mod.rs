//! Sensor modules for the BMI08x
//!
//! This module provides types, enums, and configuration structures for the
//! two dies in the BMI08x package:
//! - Accelerometer (3-axis, FIFO-capable)
//! - Gyroscope (3-axis)
//!
//! All sensor operations are performed through methods on `Bmi08xDriver`.

pub mod accelerometer;
pub mod gyroscope;

// Re-export main types
pub use accelerometer::{
    AccelBandwidth, AccelConfig, AccelDataG, AccelOdr, AccelPowerMode, AccelRange, Variant,
};
pub use gyroscope::{GyroConfig, GyroOdrBw, GyroPowerMode, GyroRange};
