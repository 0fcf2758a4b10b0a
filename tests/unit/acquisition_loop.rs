//! Tests for the interrupt-driven acquisition loop

use crate::common::{create_mock_driver, encode_frames, MockDelay};
use bmi08x::acquisition::AcquisitionState;
use bmi08x::{Acquisition, AcquisitionConfig, FifoBuffer, PollPolicy};

fn full_fifo_payload() -> Vec<u8> {
    let frames: Vec<(i16, i16, i16)> = (0..170).map(|i| (i, i + 1, i + 2)).collect();
    let mut bytes = encode_frames(&frames);
    bytes.extend_from_slice(&[0x00; 4]);
    assert_eq!(bytes.len(), 1024);
    bytes
}

#[test]
fn test_three_cycles_of_one_hundred_frames() {
    let (mut driver, sensor) = create_mock_driver();

    sensor.set_fifo_bytes(&full_fifo_payload());
    sensor.set_auto_refill(&full_fifo_payload());
    sensor.queue_int_status(&[0x01, 0x01, 0x01]);

    let mut buffer = FifoBuffer::new();
    let mut acq = Acquisition::new(AcquisitionConfig::default());

    let mut cycles = Vec::new();
    let summary = acq
        .run(&mut driver, &mut buffer, &mut MockDelay, |report| {
            cycles.push((report.cycle, report.fifo_bytes, report.frames.len()));
        })
        .expect("run should succeed");

    assert_eq!(summary.cycles_completed, 3);
    assert_eq!(summary.frames_total, 300);
    assert_eq!(summary.timeouts, 0);
    assert!(summary.is_clean());

    assert_eq!(cycles, [(1, 1024, 100), (2, 1024, 100), (3, 1024, 100)]);
    assert_eq!(acq.state(), AcquisitionState::Disarmed);
}

#[test]
fn test_run_arms_and_disarms_the_interrupt() {
    let (mut driver, sensor) = create_mock_driver();

    sensor.set_fifo_bytes(&full_fifo_payload());
    sensor.set_auto_refill(&full_fifo_payload());
    sensor.queue_int_status(&[0x01, 0x01, 0x01]);

    let mut buffer = FifoBuffer::new();
    let mut acq = Acquisition::new(AcquisitionConfig::default());
    acq.run(&mut driver, &mut buffer, &mut MockDelay, |_| {})
        .unwrap();

    // FIFO configured for accel frames in FIFO mode
    assert_eq!(sensor.accel_register(0x48), 0x03);
    assert_eq!(sensor.accel_register(0x49), 0x50);

    // Mapping enabled during the run, cleared afterwards
    let map_writes = sensor.accel_writes(0x58);
    assert_eq!(map_writes.first(), Some(&vec![0x01]));
    assert_eq!(map_writes.last(), Some(&vec![0x00]));
    assert_eq!(sensor.accel_register(0x53) & 0x08, 0x00);
}

#[test]
fn test_timeout_is_recorded_not_hung() {
    let (mut driver, _sensor) = create_mock_driver();

    // The interrupt never fires; a tight poll budget keeps the test fast
    let config = AcquisitionConfig {
        poll: PollPolicy {
            max_polls: 5,
            interval_us: 1,
        },
        ..AcquisitionConfig::default()
    };

    let mut buffer = FifoBuffer::new();
    let mut acq = Acquisition::new(config);

    let mut called = false;
    let summary = acq
        .run(&mut driver, &mut buffer, &mut MockDelay, |_| called = true)
        .expect("a timeout is not an error");

    assert!(!called);
    assert_eq!(summary.cycles_completed, 0);
    assert_eq!(summary.timeouts, 3);
    assert_eq!(summary.frames_total, 0);
    assert_eq!(acq.state(), AcquisitionState::Disarmed);
}

#[test]
fn test_requested_frames_caps_each_batch() {
    let (mut driver, sensor) = create_mock_driver();

    sensor.set_fifo_bytes(&full_fifo_payload());
    sensor.set_auto_refill(&full_fifo_payload());
    sensor.queue_int_status(&[0x01, 0x01, 0x01]);

    let config = AcquisitionConfig {
        requested_frames: 10,
        ..AcquisitionConfig::default()
    };

    let mut buffer = FifoBuffer::new();
    let mut acq = Acquisition::new(config);
    let summary = acq
        .run(&mut driver, &mut buffer, &mut MockDelay, |report| {
            assert_eq!(report.frames.len(), 10);
        })
        .unwrap();

    assert_eq!(summary.frames_total, 30);
}

#[test]
fn test_cycle_report_carries_sensor_time() {
    let (mut driver, sensor) = create_mock_driver();

    sensor.set_fifo_bytes(&full_fifo_payload());
    sensor.set_auto_refill(&full_fifo_payload());
    sensor.queue_int_status(&[0x01]);
    sensor.set_sensor_time(0x00AB_CDEF);

    let config = AcquisitionConfig {
        max_cycles: 1,
        ..AcquisitionConfig::default()
    };

    let mut buffer = FifoBuffer::new();
    let mut acq = Acquisition::new(config);
    acq.run(&mut driver, &mut buffer, &mut MockDelay, |report| {
        let time = report.sensor_time.expect("sensor time read should succeed");
        assert_eq!(time.ticks(), 0x00AB_CDEF);
    })
    .unwrap();
}

#[test]
fn test_partial_fill_cycle_reports_fewer_frames() {
    let (mut driver, sensor) = create_mock_driver();

    // Watermark-level fill instead of a full FIFO: 20 records
    let frames: Vec<(i16, i16, i16)> = (0..20).map(|i| (i, 0, 0)).collect();
    sensor.set_fifo_bytes(&encode_frames(&frames));
    sensor.queue_int_status(&[0x01]);

    let config = AcquisitionConfig {
        max_cycles: 1,
        ..AcquisitionConfig::default()
    };

    let mut buffer = FifoBuffer::new();
    let mut acq = Acquisition::new(config);
    let summary = acq
        .run(&mut driver, &mut buffer, &mut MockDelay, |report| {
            assert_eq!(report.fifo_bytes, 120);
            assert_eq!(report.frames.len(), 20);
        })
        .unwrap();

    assert_eq!(summary.frames_total, 20);
}
