//! Tests for decoding FIFO bytes into sample frames

use crate::common::encode_frames;
use bmi08x::{FrameExtractor, SampleFrame, MAX_BATCH_FRAMES};

#[test]
fn test_extract_full_fifo_capped_by_request() {
    // A full 1024-byte FIFO holds 170 complete records plus a 4-byte tail
    let mut frames = Vec::new();
    for i in 0..170i16 {
        frames.push((i, -i, i * 2));
    }
    let mut bytes = encode_frames(&frames);
    bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(bytes.len(), 1024);

    let extractor = FrameExtractor::new();

    let batch = extractor.extract(&bytes, 100);
    assert_eq!(batch.len(), 100);
    assert_eq!(batch[0], SampleFrame { x: 0, y: 0, z: 0 });
    assert_eq!(
        batch[99],
        SampleFrame {
            x: 99,
            y: -99,
            z: 198
        }
    );

    // Asking for more than the payload holds returns what is there
    let batch = extractor.extract(&bytes, 500);
    assert_eq!(batch.len(), MAX_BATCH_FRAMES);
}

#[test]
fn test_extract_short_drain() {
    // Watermark-style drain: fewer records than requested
    let bytes = encode_frames(&[(10, 20, 30), (-1, -2, -3)]);
    let extractor = FrameExtractor::new();

    let batch = extractor.extract(&bytes, 100);
    assert_eq!(batch.len(), 2);
    assert_eq!(
        batch[1],
        SampleFrame {
            x: -1,
            y: -2,
            z: -3
        }
    );
}

#[test]
fn test_partial_tail_never_yields_a_frame() {
    let mut bytes = encode_frames(&[(100, 200, 300)]);
    let extractor = FrameExtractor::new();

    for tail_len in 1..6 {
        bytes.truncate(6);
        bytes.extend_from_slice(&vec![0x55; tail_len]);

        let batch = extractor.extract(&bytes, 100);
        assert_eq!(batch.len(), 1, "tail of {} bytes must be dropped", tail_len);
        assert_eq!(
            batch[0],
            SampleFrame {
                x: 100,
                y: 200,
                z: 300
            }
        );
    }
}

#[test]
fn test_extremes_survive_the_wire_format() {
    let bytes = encode_frames(&[(i16::MAX, i16::MIN, 0)]);
    let extractor = FrameExtractor::new();

    let batch = extractor.extract(&bytes, 1);
    assert_eq!(batch[0].x, i16::MAX);
    assert_eq!(batch[0].y, i16::MIN);
    assert_eq!(batch[0].z, 0);
}
