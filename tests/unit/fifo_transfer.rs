//! Tests for FIFO configuration, fill level and the bounded drain

use crate::common::{create_mock_driver, encode_frames};
use bmi08x::{FifoBuffer, FifoConfig, FifoWatermark, FIFO_SIZE};

#[test]
fn test_fifo_configure_accel_only() {
    let (mut driver, sensor) = create_mock_driver();

    driver
        .fifo_configure(&FifoConfig::accel_only())
        .expect("fifo_configure should succeed");

    // FIFO_CONFIG_0: FIFO mode (bit 0) + always-one bit (bit 1)
    assert_eq!(sensor.accel_register(0x48), 0x03);
    // FIFO_CONFIG_1: accel frames (bit 6) + always-one bit (bit 4)
    assert_eq!(sensor.accel_register(0x49), 0x50);
}

#[test]
fn test_fifo_configure_stream_mode() {
    let (mut driver, sensor) = create_mock_driver();

    driver.fifo_configure(&FifoConfig::default()).unwrap();

    // Stream mode leaves bit 0 clear; the always-one bits stay set
    assert_eq!(sensor.accel_register(0x48), 0x02);
    assert_eq!(sensor.accel_register(0x49), 0x10);
}

#[test]
fn test_fifo_watermark_split_across_registers() {
    let (mut driver, sensor) = create_mock_driver();

    let watermark = FifoWatermark::new(600).unwrap();
    driver.fifo_watermark(watermark).unwrap();

    assert_eq!(sensor.accel_register(0x46), 0x58);
    assert_eq!(sensor.accel_register(0x47), 0x02);
}

#[test]
fn test_fifo_length_combines_both_registers() {
    let (mut driver, sensor) = create_mock_driver();

    sensor.set_fifo_bytes(&vec![0u8; 0x2A5]);
    assert_eq!(driver.fifo_length().unwrap(), 0x2A5);
}

#[test]
fn test_fifo_read_drains_available_bytes() {
    let (mut driver, sensor) = create_mock_driver();

    let frames = encode_frames(&[(1, 2, 3), (4, 5, 6), (7, 8, 9)]);
    sensor.set_fifo_bytes(&frames);

    let mut buffer = FifoBuffer::new();
    let read = driver.fifo_read(&mut buffer).unwrap();

    assert_eq!(read, 18);
    assert_eq!(buffer.as_slice(), frames.as_slice());
    assert_eq!(sensor.fifo_remaining(), 0);
}

#[test]
fn test_fifo_read_empty_fifo() {
    let (mut driver, _sensor) = create_mock_driver();

    let mut buffer = FifoBuffer::new();
    let read = driver.fifo_read(&mut buffer).unwrap();

    assert_eq!(read, 0);
    assert!(buffer.is_empty());
}

#[test]
fn test_fifo_read_is_bounded_by_buffer_capacity() {
    let (mut driver, sensor) = create_mock_driver();

    // More than one buffer's worth in the FIFO
    sensor.set_fifo_bytes(&vec![0xAB; 1500]);

    let mut buffer = FifoBuffer::new();
    let read = driver.fifo_read(&mut buffer).unwrap();

    assert_eq!(read, FIFO_SIZE);
    assert_eq!(buffer.len(), FIFO_SIZE);
    // The surplus stays in the FIFO for the next drain
    assert_eq!(sensor.fifo_remaining(), 1500 - usize::from(FIFO_SIZE));
}

#[test]
fn test_fifo_read_overwrites_previous_content() {
    let (mut driver, sensor) = create_mock_driver();

    sensor.set_fifo_bytes(&vec![0x11; 600]);
    let mut buffer = FifoBuffer::new();
    driver.fifo_read(&mut buffer).unwrap();
    assert_eq!(buffer.len(), 600);

    sensor.set_fifo_bytes(&vec![0x22; 60]);
    driver.fifo_read(&mut buffer).unwrap();

    assert_eq!(buffer.len(), 60);
    assert!(buffer.as_slice().iter().all(|&b| b == 0x22));
}
