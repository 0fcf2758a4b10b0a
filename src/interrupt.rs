//! Interrupt configuration and management
//!
//! The BMI08x accelerometer die has two interrupt pins (INT1, INT2) that can
//! each be routed to the data-path events:
//! - FIFO full
//! - FIFO watermark
//! - Raw data ready
//!
//! The FIFO-full acquisition profile arms FIFO full on INT1, push-pull,
//! active-high, and observes the condition by polling the latched status
//! register rather than wiring the pin to the host.
//!
//! # Example
//!
//! ```ignore
//! # use bmi08x::{Bmi08xDriver, interrupt::{AccelIntConfig, InterruptChannel}};
//! # let mut imu: Bmi08xDriver<_, _> = todo!();
//! let int_config = AccelIntConfig::fifo_full(InterruptChannel::Int1);
//! imu.set_interrupt(&int_config, true)?;
//! // ... acquire ...
//! imu.set_interrupt(&int_config, false)?;
//! # Ok::<(), bmi08x::Error<()>>(())
//! ```

/// Physical interrupt channel on the accelerometer die
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptChannel {
    /// INT1 pin
    Int1,
    /// INT2 pin
    Int2,
}

/// Interrupt source on the accelerometer die
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelInterrupt {
    /// FIFO fill level reached capacity
    FifoFull,
    /// FIFO fill level reached the configured watermark
    FifoWatermark,
    /// A new sample is available in the data registers
    DataReady,
}

/// Interrupt pin electrical configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptPinConfig {
    /// Active high (true) or active low (false)
    pub active_high: bool,
    /// Open-drain (true) or push-pull (false)
    pub open_drain: bool,
}

impl InterruptPinConfig {
    /// Push-pull, active-high: the configuration the acquisition profile
    /// uses and the common choice for a directly wired MCU input
    #[must_use]
    pub const fn push_pull_active_high() -> Self {
        Self {
            active_high: true,
            open_drain: false,
        }
    }

    /// Open-drain, active-low: for shared interrupt lines with a pull-up
    #[must_use]
    pub const fn open_drain_active_low() -> Self {
        Self {
            active_high: false,
            open_drain: true,
        }
    }
}

impl Default for InterruptPinConfig {
    fn default() -> Self {
        Self::push_pull_active_high()
    }
}

/// Complete interrupt channel configuration
///
/// Enabling or disabling is a pure configuration write; applying the same
/// configuration twice leaves the device in the same state as applying it
/// once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelIntConfig {
    /// Which physical pin carries the interrupt
    pub channel: InterruptChannel,
    /// Which condition raises the interrupt
    pub source: AccelInterrupt,
    /// Pin electrical characteristics
    pub pin: InterruptPinConfig,
}

impl AccelIntConfig {
    /// FIFO-full on the given channel, push-pull, active-high
    #[must_use]
    pub const fn fifo_full(channel: InterruptChannel) -> Self {
        Self {
            channel,
            source: AccelInterrupt::FifoFull,
            pin: InterruptPinConfig::push_pull_active_high(),
        }
    }

    /// FIFO watermark on the given channel, push-pull, active-high
    #[must_use]
    pub const fn fifo_watermark(channel: InterruptChannel) -> Self {
        Self {
            channel,
            source: AccelInterrupt::FifoWatermark,
            pin: InterruptPinConfig::push_pull_active_high(),
        }
    }

    /// Data-ready on the given channel, push-pull, active-high
    #[must_use]
    pub const fn data_ready(channel: InterruptChannel) -> Self {
        Self {
            channel,
            source: AccelInterrupt::DataReady,
            pin: InterruptPinConfig::push_pull_active_high(),
        }
    }
}

/// Latched data-path interrupt status (`ACC_INT_STAT_1`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataIntStatus {
    /// A new sample is available in the data registers
    pub data_ready: bool,
    /// FIFO fill level reached the configured watermark
    pub fifo_watermark: bool,
    /// FIFO fill level reached capacity
    pub fifo_full: bool,
}

impl DataIntStatus {
    /// Create empty interrupt status
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data_ready: false,
            fifo_watermark: false,
            fifo_full: false,
        }
    }

    /// Check if any interrupt flag is set
    #[must_use]
    pub const fn any_set(&self) -> bool {
        self.data_ready || self.fifo_watermark || self.fifo_full
    }

    /// Decode from the raw `ACC_INT_STAT_1` register value
    #[must_use]
    pub const fn from_raw(value: u8) -> Self {
        Self {
            fifo_full: (value & 0x01) != 0,
            fifo_watermark: (value & 0x02) != 0,
            data_ready: (value & 0x80) != 0,
        }
    }
}
