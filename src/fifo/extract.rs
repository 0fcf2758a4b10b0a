//! FIFO frame extraction
//!
//! This module decodes the raw byte region drained from the accelerometer
//! FIFO into typed sample frames. With accelerometer-only capture each
//! record is a fixed 6 bytes: three little-endian signed 16-bit axis values
//! in X, Y, Z order, stored in the order the sensor captured them.
//!
//! # Example
//!
//! ```ignore
//! # use bmi08x::fifo::extract::FrameExtractor;
//! # let buffer = [0u8; 1024];
//! let extractor = FrameExtractor::new();
//! let batch = extractor.extract(&buffer, 100);
//! for frame in batch.iter() {
//!     // frame.x, frame.y, frame.z
//! }
//! ```

use super::{FRAME_SIZE, MAX_BATCH_FRAMES};

/// One decoded accelerometer reading: raw signed 16-bit axis values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleFrame {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl SampleFrame {
    /// Decode one frame from exactly [`FRAME_SIZE`] little-endian bytes
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than [`FRAME_SIZE`]; the extractor only
    /// calls this with complete records.
    #[must_use]
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        Self {
            x: i16::from_le_bytes([bytes[0], bytes[1]]),
            y: i16::from_le_bytes([bytes[2], bytes[3]]),
            z: i16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }

    /// Encode the frame back to its little-endian wire form
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; FRAME_SIZE] {
        let [xl, xh] = self.x.to_le_bytes();
        let [yl, yh] = self.y.to_le_bytes();
        let [zl, zh] = self.z.to_le_bytes();
        [xl, xh, yl, yh, zl, zh]
    }
}

/// An ordered, bounded sequence of decoded sample frames
///
/// The recovered count (`len()`) never exceeds the count requested from the
/// extractor, and frame order matches capture order inside the sensor FIFO.
pub type SampleBatch = heapless::Vec<SampleFrame, MAX_BATCH_FRAMES>;

/// FIFO frame extractor
///
/// Stateless decoder for accelerometer-only FIFO captures. Construction is
/// separate from use so a future headed-frame layout can carry its
/// configuration here without changing call sites.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameExtractor;

impl FrameExtractor {
    /// Create a new frame extractor
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Expected bytes per record
    #[must_use]
    pub const fn bytes_per_frame(&self) -> usize {
        FRAME_SIZE
    }

    /// Extract sample frames from a raw FIFO byte region
    ///
    /// Walks `data` from offset 0, consuming one complete record per frame,
    /// until either `requested` frames have been produced or fewer than
    /// [`FRAME_SIZE`] bytes remain. Trailing incomplete bytes represent a
    /// record interrupted mid-transfer and are silently dropped.
    ///
    /// The recovered count is `batch.len()` and is always `<= requested`;
    /// callers must use it rather than the requested count when indexing.
    /// A short or empty input is not an error, it just recovers fewer
    /// frames - decode diagnostics are deliberately folded into the count.
    ///
    /// Axis values pass through unmodified; no magnitude validation is
    /// performed here.
    #[must_use]
    pub fn extract(&self, data: &[u8], requested: u16) -> SampleBatch {
        let mut batch = SampleBatch::new();
        let limit = (requested as usize).min(batch.capacity());

        for record in data.chunks_exact(FRAME_SIZE) {
            if batch.len() >= limit {
                break;
            }
            // Capacity is MAX_BATCH_FRAMES >= limit, so the push cannot fail
            let _ = batch.push(SampleFrame::from_le_bytes(record));
        }

        batch
    }
}
