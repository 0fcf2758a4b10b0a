//! Interrupt-driven FIFO batch acquisition
//!
//! This module drives the BMI08x through a small state machine that arms the
//! FIFO-full interrupt, waits for it to fire, drains the FIFO into sample
//! frames and hands each batch to a caller-provided sink. The sequence runs
//! for a bounded number of cycles and always disarms the interrupt before
//! returning, whatever happened in between.
//!
//! Waiting is a bounded poll of the latched interrupt status rather than an
//! unbounded spin: [`PollPolicy`] caps the number of status reads and spaces
//! them with a delay, so a sensor that never fills its FIFO surfaces as a
//! recorded timeout instead of a hang.
//!
//! # Example
//!
//! ```ignore
//! # use bmi08x::{Acquisition, AcquisitionConfig, FifoBuffer};
//! # let (mut imu, mut delay): (bmi08x::Bmi08xDriver<_, _>, _) = todo!();
//! let mut buffer = FifoBuffer::new();
//! let mut acq = Acquisition::new(AcquisitionConfig::default());
//! let summary = acq.run(&mut imu, &mut buffer, &mut delay, |report| {
//!     for frame in &report.frames {
//!         // consume frame.x, frame.y, frame.z
//!     }
//! })?;
//! # Ok::<(), bmi08x::Error<()>>(())
//! ```

use crate::device::{Bmi08xDriver, SensorTime};
use crate::fifo::extract::{FrameExtractor, SampleBatch};
use crate::fifo::{FifoBuffer, FifoConfig};
use crate::interrupt::{AccelIntConfig, InterruptChannel};
use crate::Error;

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

/// How the acquisition loop reacts to a bus error mid-cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorPolicy {
    /// Record the error in the summary and move on to the next cycle
    #[default]
    Continue,
    /// Disarm the interrupt and return the error immediately
    Abort,
}

/// Bounded wait for the FIFO-full event
///
/// The interrupt status is read at most `max_polls` times with
/// `interval_us` microseconds between reads. At 1600 Hz the FIFO needs
/// about 106 ms to collect 170 frames; the default budget of one second
/// leaves ample headroom without ever hanging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollPolicy {
    /// Maximum number of status reads per cycle
    pub max_polls: u32,
    /// Delay between status reads, in microseconds
    pub interval_us: u32,
}

impl PollPolicy {
    /// Total wait budget per cycle, in microseconds
    #[must_use]
    pub const fn timeout_micros(&self) -> u64 {
        self.max_polls as u64 * self.interval_us as u64
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_polls: 1000,
            interval_us: 1000,
        }
    }
}

/// Acquisition loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcquisitionConfig {
    /// Interrupt channel the FIFO-full event is routed to
    pub channel: InterruptChannel,
    /// Number of FIFO-full cycles to run before disarming
    pub max_cycles: u8,
    /// Upper bound on frames extracted per cycle
    pub requested_frames: u16,
    /// Bounded wait for the FIFO-full event
    pub poll: PollPolicy,
    /// Reaction to bus errors mid-cycle
    pub on_error: ErrorPolicy,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            channel: InterruptChannel::Int1,
            max_cycles: 3,
            requested_frames: 100,
            poll: PollPolicy::default(),
            on_error: ErrorPolicy::Continue,
        }
    }
}

/// Where the acquisition loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquisitionState {
    /// Not started, or finished a previous run
    #[default]
    Idle,
    /// Interrupt routed and FIFO configured
    Armed,
    /// Polling the latched interrupt status
    WaitingForEvent,
    /// Draining the FIFO and reporting the batch
    DrainAndReport,
    /// Interrupt unmapped, pin output off
    Disarmed,
}

/// One completed FIFO-full cycle
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Cycle number, starting at 1
    pub cycle: u8,
    /// FIFO fill level at drain time, in bytes
    pub fifo_bytes: u16,
    /// Extracted sample frames, at most `requested_frames` of them
    pub frames: SampleBatch,
    /// Sensor time right after the drain, if the read succeeded
    pub sensor_time: Option<SensorTime>,
}

/// Outcome of a full acquisition run
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcquisitionSummary<E> {
    /// Cycles that produced a batch
    pub cycles_completed: u8,
    /// Frames delivered across all cycles
    pub frames_total: u32,
    /// Cycles where the wait budget ran out before FIFO full
    pub timeouts: u8,
    /// Most recent error recorded under [`ErrorPolicy::Continue`]
    pub last_error: Option<Error<E>>,
}

impl<E> AcquisitionSummary<E> {
    const fn new() -> Self {
        Self {
            cycles_completed: 0,
            frames_total: 0,
            timeouts: 0,
            last_error: None,
        }
    }

    /// True if every cycle produced a batch and no error was recorded
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.timeouts == 0 && self.last_error.is_none()
    }
}

/// Interrupt-driven FIFO batch acquisition loop
///
/// Owns its configuration and current state; the driver, the transfer
/// buffer and the delay provider are borrowed for the duration of
/// [`Acquisition::run`] so the same instances can serve other code between
/// runs.
#[derive(Debug, Default)]
pub struct Acquisition {
    config: AcquisitionConfig,
    state: AcquisitionState,
    extractor: FrameExtractor,
}

impl Acquisition {
    /// Create an acquisition loop with the given configuration
    #[must_use]
    pub const fn new(config: AcquisitionConfig) -> Self {
        Self {
            config,
            state: AcquisitionState::Idle,
            extractor: FrameExtractor::new(),
        }
    }

    /// The configuration this loop runs with
    #[must_use]
    pub const fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Where the loop currently is (or where it stopped)
    #[must_use]
    pub const fn state(&self) -> AcquisitionState {
        self.state
    }

    /// Run the acquisition loop to completion
    ///
    /// Arms the FIFO-full interrupt, then runs up to `max_cycles` cycles of
    /// wait, drain and report. `on_cycle` is invoked once per completed
    /// cycle with the extracted batch. The interrupt is disarmed before
    /// this function returns, on every path.
    ///
    /// Bus errors mid-cycle follow the configured [`ErrorPolicy`]: under
    /// `Continue` they are recorded in the summary and the loop moves on,
    /// under `Abort` the first error is returned after disarming.
    ///
    /// # Errors
    ///
    /// Returns an error if arming or disarming fails, or if a mid-cycle
    /// error occurs under [`ErrorPolicy::Abort`].
    pub fn run<A, G, D, F>(
        &mut self,
        driver: &mut Bmi08xDriver<A, G>,
        buffer: &mut FifoBuffer,
        delay: &mut D,
        mut on_cycle: F,
    ) -> Result<AcquisitionSummary<A::Error>, Error<A::Error>>
    where
        A: RegisterInterface<AddressType = u8>,
        G: RegisterInterface<AddressType = u8, Error = A::Error>,
        D: DelayNs,
        F: FnMut(&CycleReport),
    {
        let int_config = AccelIntConfig::fifo_full(self.config.channel);
        let mut summary = AcquisitionSummary::new();

        self.state = AcquisitionState::Armed;
        if let Err(error) = self.arm(driver, &int_config) {
            self.disarm(driver, &int_config);
            self.state = AcquisitionState::Disarmed;
            return Err(error);
        }

        for cycle in 1..=self.config.max_cycles {
            self.state = AcquisitionState::WaitingForEvent;
            let fired = match self.wait_for_fifo_full(driver, delay) {
                Ok(fired) => fired,
                Err(error) => match self.note_error(&mut summary, error) {
                    Ok(()) => continue,
                    Err(error) => {
                        self.disarm(driver, &int_config);
                        self.state = AcquisitionState::Disarmed;
                        return Err(error);
                    }
                },
            };

            if !fired {
                summary.timeouts += 1;
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "fifo full did not fire within {} us (cycle {})",
                    self.config.poll.timeout_micros(),
                    cycle
                );
                continue;
            }

            self.state = AcquisitionState::DrainAndReport;
            match self.drain(driver, buffer, cycle) {
                Ok(report) => {
                    summary.cycles_completed += 1;
                    summary.frames_total += report.frames.len() as u32;
                    on_cycle(&report);
                }
                Err(error) => {
                    if let Err(error) = self.note_error(&mut summary, error) {
                        self.disarm(driver, &int_config);
                        self.state = AcquisitionState::Disarmed;
                        return Err(error);
                    }
                }
            }
        }

        driver.set_interrupt(&int_config, false)?;
        self.state = AcquisitionState::Disarmed;

        Ok(summary)
    }

    fn arm<A, G>(
        &mut self,
        driver: &mut Bmi08xDriver<A, G>,
        int_config: &AccelIntConfig,
    ) -> Result<(), Error<A::Error>>
    where
        A: RegisterInterface<AddressType = u8>,
        G: RegisterInterface<AddressType = u8, Error = A::Error>,
    {
        driver.fifo_configure(&FifoConfig::accel_only())?;
        driver.set_interrupt(int_config, true)?;
        Ok(())
    }

    /// Best-effort disarm for error paths; the original error wins
    fn disarm<A, G>(&mut self, driver: &mut Bmi08xDriver<A, G>, int_config: &AccelIntConfig)
    where
        A: RegisterInterface<AddressType = u8>,
        G: RegisterInterface<AddressType = u8, Error = A::Error>,
    {
        if driver.set_interrupt(int_config, false).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("failed to disarm interrupt after error");
        }
    }

    /// Poll the latched status until FIFO full fires or the budget runs out
    fn wait_for_fifo_full<A, G, D>(
        &mut self,
        driver: &mut Bmi08xDriver<A, G>,
        delay: &mut D,
    ) -> Result<bool, Error<A::Error>>
    where
        A: RegisterInterface<AddressType = u8>,
        G: RegisterInterface<AddressType = u8, Error = A::Error>,
        D: DelayNs,
    {
        for _ in 0..self.config.poll.max_polls {
            if driver.data_int_status()?.fifo_full {
                return Ok(true);
            }
            delay.delay_us(self.config.poll.interval_us);
        }
        Ok(false)
    }

    fn drain<A, G>(
        &mut self,
        driver: &mut Bmi08xDriver<A, G>,
        buffer: &mut FifoBuffer,
        cycle: u8,
    ) -> Result<CycleReport, Error<A::Error>>
    where
        A: RegisterInterface<AddressType = u8>,
        G: RegisterInterface<AddressType = u8, Error = A::Error>,
    {
        let fifo_bytes = driver.fifo_read(buffer)?;
        let frames = self
            .extractor
            .extract(buffer.as_slice(), self.config.requested_frames);

        // Sensor time is supplementary; a failed read degrades the report
        // instead of discarding the batch
        let sensor_time = driver.sensor_time().ok();
        #[cfg(feature = "defmt")]
        if sensor_time.is_none() {
            defmt::warn!("sensor time read failed (cycle {})", cycle);
        }

        Ok(CycleReport {
            cycle,
            fifo_bytes,
            frames,
            sensor_time,
        })
    }

    /// Apply the error policy. Under `Continue` the error is recorded and
    /// the loop keeps going; under `Abort` the error comes back as `Err`
    /// and the run loop disarms before handing it to the caller.
    fn note_error<E>(
        &mut self,
        summary: &mut AcquisitionSummary<E>,
        error: Error<E>,
    ) -> Result<(), Error<E>> {
        match self.config.on_error {
            ErrorPolicy::Continue => {
                #[cfg(feature = "defmt")]
                defmt::warn!("cycle error, continuing");
                summary.last_error = Some(error);
                Ok(())
            }
            ErrorPolicy::Abort => Err(error),
        }
    }
}
