//! Config stream loader
//!
//! The BMI08x accelerometer die runs a microcontroller whose feature engine
//! has no pre-programmed firmware, so the vendor config stream must be
//! uploaded by the host MCU after every reset before the accelerometer
//! produces data.
//!
//! ## Loading Process
//!
//! The stream is written through three registers:
//! - `INIT_CTRL` (0x59): Gates the upload (0 = open for writing, 1 = start)
//! - `INIT_ADDR_0`/`INIT_ADDR_1` (0x5B/0x5C): Word address of the next chunk
//! - `INIT_DATA` (0x5E): Burst data port
//!
//! The stream is written in chunks, updating the word address before each
//! burst. After asserting `INIT_CTRL`, the feature engine needs up to 150 ms
//! to boot; `INTERNAL_STATUS` (0x2A) then reports 0x01 when the upload was
//! accepted.

/// Maximum size of a single burst write (bytes per chunk)
///
/// Must be even: the upload address registers count 16-bit words.
const UPLOAD_CHUNK_SIZE: usize = 32;

/// Time the feature engine needs to boot after the upload (milliseconds)
pub const CONFIG_LOAD_DELAY_MS: u32 = 150;

/// `INTERNAL_STATUS` message value reporting a successful upload
pub const CONFIG_STREAM_READY: u8 = 0x01;

pub(crate) const REG_INIT_CTRL: u8 = 0x59;
pub(crate) const REG_INIT_ADDR_0: u8 = 0x5B;
pub(crate) const REG_INIT_ADDR_1: u8 = 0x5C;
pub(crate) const REG_INIT_DATA: u8 = 0x5E;

/// Config stream loader implementation
pub struct ConfigStreamLoader;

impl ConfigStreamLoader {
    /// Check that a byte slice is a plausible config stream
    ///
    /// The stream must be non-empty and of even length (the upload address
    /// registers count 16-bit words). The content itself is opaque to the
    /// host; the device reports acceptance through `INTERNAL_STATUS`.
    #[must_use]
    pub const fn is_valid_stream(stream: &[u8]) -> bool {
        !stream.is_empty() && stream.len() % 2 == 0
    }

    /// Upload a config stream to the device
    ///
    /// Writes the complete stream to the feature engine memory. `INIT_CTRL`
    /// is opened before the transfer and asserted after it; the caller must
    /// then delay for [`CONFIG_LOAD_DELAY_MS`] and check `INTERNAL_STATUS`.
    ///
    /// # Arguments
    ///
    /// * `stream` - The vendor config stream, validated by the caller
    /// * `write_fn` - Function to write one or more bytes to a register.
    ///   Single-byte control writes and chunk bursts to the data port both
    ///   go through it.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if every write succeeded, or the first bus error.
    pub fn upload<E, W>(stream: &[u8], mut write_fn: W) -> Result<(), E>
    where
        W: FnMut(u8, &[u8]) -> Result<(), E>,
    {
        // Open the feature engine memory for writing
        write_fn(REG_INIT_CTRL, &[0x00])?;

        // The address registers hold a word offset, split 4/8 bits
        let mut word_address: u16 = 0;

        for chunk in stream.chunks(UPLOAD_CHUNK_SIZE) {
            #[allow(clippy::cast_possible_truncation)]
            let addr_low = (word_address & 0x0F) as u8;
            #[allow(clippy::cast_possible_truncation)]
            let addr_high = (word_address >> 4) as u8;

            write_fn(REG_INIT_ADDR_0, &[addr_low])?;
            write_fn(REG_INIT_ADDR_1, &[addr_high])?;

            write_fn(REG_INIT_DATA, chunk)?;

            #[allow(clippy::cast_possible_truncation)]
            let chunk_words = (chunk.len() / 2) as u16;
            word_address += chunk_words;
        }

        // Start the feature engine
        write_fn(REG_INIT_CTRL, &[0x01])?;

        Ok(())
    }
}
