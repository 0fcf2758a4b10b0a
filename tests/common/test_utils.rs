//! Test utilities and helper functions

use crate::common::mock_sensor::{MockInterface, MockSensor};
use bmi08x::{Bmi08xDriver, Variant};

/// Mock delay implementation for testing
///
/// This is a no-op delay that implements the embedded-hal DelayNs trait
/// for use in tests where actual delays are not needed.
#[derive(Debug, Clone, Copy)]
pub struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // No-op for testing
    }

    fn delay_us(&mut self, _us: u32) {
        // No-op for testing
    }

    fn delay_ms(&mut self, _ms: u32) {
        // No-op for testing
    }
}

/// Create a mock BMI088 driver for testing
///
/// Returns (driver, sensor) where the sensor handle shares state with the
/// interfaces the driver owns.
pub fn create_mock_driver() -> (Bmi08xDriver<MockInterface, MockInterface>, MockSensor) {
    let sensor = MockSensor::new();
    let driver = Bmi08xDriver::new(
        sensor.accel_interface(),
        sensor.gyro_interface(),
        Variant::Bmi088,
    )
    .expect("Failed to create mock driver");
    (driver, sensor)
}

/// A small but valid config stream (non-empty, even length)
pub fn sample_config_stream() -> Vec<u8> {
    (0..96).map(|i| i as u8).collect()
}

/// Encode (x, y, z) samples into the FIFO wire format: three
/// little-endian i16 values per 6-byte record
pub fn encode_frames(frames: &[(i16, i16, i16)]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(frames.len() * 6);
    for &(x, y, z) in frames {
        bytes.extend_from_slice(&x.to_le_bytes());
        bytes.extend_from_slice(&y.to_le_bytes());
        bytes.extend_from_slice(&z.to_le_bytes());
    }
    bytes
}

/// Assert that two floating point values are approximately equal
#[allow(dead_code)]
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}
