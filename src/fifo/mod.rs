//! FIFO (First In First Out) buffer management
//!
//! The BMI08x accelerometer die has a 1024-byte FIFO that stores samples
//! until the host drains them. This crate uses it for interrupt-driven batch
//! acquisition:
//! - The FIFO-full interrupt fires when the buffer nears capacity
//! - The host drains the whole buffer in one bounded transfer
//! - The raw bytes are decoded into sample frames afterwards
//!
//! # Example
//!
//! ```ignore
//! # use bmi08x::{Bmi08xDriver, fifo::{FifoBuffer, FifoConfig}, FrameExtractor};
//! # let mut imu: Bmi08xDriver<_, _> = todo!();
//! imu.fifo_configure(&FifoConfig::accel_only())?;
//!
//! let mut buffer = FifoBuffer::new();
//! imu.fifo_read(&mut buffer)?;
//!
//! let extractor = FrameExtractor::new();
//! let batch = extractor.extract(buffer.as_slice(), 100);
//! # Ok::<(), bmi08x::Error<()>>(())
//! ```

pub mod extract;

pub use extract::{FrameExtractor, SampleBatch, SampleFrame};

use crate::Error;

/// FIFO size in bytes
pub const FIFO_SIZE: u16 = 1024;

/// Size of one accelerometer FIFO record in bytes (three little-endian i16)
pub const FRAME_SIZE: usize = 6;

/// Most frames a full FIFO drain can ever yield (complete records only)
pub const MAX_BATCH_FRAMES: usize = FIFO_SIZE as usize / FRAME_SIZE;

/// Raw FIFO byte region plus the logical length in use
///
/// Filled once per acquisition cycle by [`Bmi08xDriver::fifo_read`] and
/// consumed immediately by the extractor; it is not retained across cycles
/// and may be reused.
///
/// [`Bmi08xDriver::fifo_read`]: crate::Bmi08xDriver::fifo_read
pub struct FifoBuffer {
    data: [u8; FIFO_SIZE as usize],
    len: u16,
}

impl FifoBuffer {
    /// Create an empty FIFO buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: [0; FIFO_SIZE as usize],
            len: 0,
        }
    }

    /// Bytes considered valid from the last fill
    #[must_use]
    pub const fn len(&self) -> u16 {
        self.len
    }

    /// Whether no bytes are in use
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity in bytes
    #[must_use]
    pub const fn capacity(&self) -> u16 {
        FIFO_SIZE
    }

    /// The valid portion of the underlying byte region
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }

    /// The whole underlying byte region, for the transfer engine to fill
    pub(crate) fn as_mut_storage(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Record how many bytes the last fill produced
    ///
    /// Clamped to capacity so `len <= capacity` holds by construction.
    pub(crate) fn set_len(&mut self, len: u16) {
        self.len = len.min(FIFO_SIZE);
    }
}

impl Default for FifoBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// FIFO operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoMode {
    /// Stream mode - oldest data is dropped when the FIFO is full
    Stream,
    /// FIFO mode - the buffer stops accepting new data when full
    Fifo,
}

/// FIFO configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoConfig {
    /// Store accelerometer frames in the FIFO
    pub enable_accel: bool,
    /// FIFO operating mode
    pub mode: FifoMode,
}

impl FifoConfig {
    /// Accelerometer-only capture in FIFO (stop-on-full) mode, the
    /// configuration the FIFO-full acquisition profile uses
    #[must_use]
    pub const fn accel_only() -> Self {
        Self {
            enable_accel: true,
            mode: FifoMode::Fifo,
        }
    }
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self {
            enable_accel: false,
            mode: FifoMode::Stream,
        }
    }
}

/// Watermark configuration for the FIFO watermark interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoWatermark {
    /// Watermark threshold in bytes (0-1023)
    /// Interrupt fires when the FIFO fill level reaches this value
    pub threshold: u16,
}

impl FifoWatermark {
    /// Create a new watermark configuration
    ///
    /// # Arguments
    /// * `threshold` - Number of bytes that trigger the watermark interrupt
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the threshold reaches the FIFO size
    pub const fn new(threshold: u16) -> Result<Self, Error<()>> {
        if threshold >= FIFO_SIZE {
            return Err(Error::InvalidConfig);
        }
        Ok(Self { threshold })
    }

    /// Create a watermark for a specific number of complete sample frames
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the calculated threshold reaches the FIFO size
    pub const fn from_frames(frames: u16) -> Result<Self, Error<()>> {
        let threshold = frames.saturating_mul(FRAME_SIZE as u16);
        Self::new(threshold)
    }
}
