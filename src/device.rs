//! High-level driver API for the BMI08x
//!
//! This module provides a user-friendly interface to the BMI085/BMI088 IMU,
//! handling the two-die topology (accelerometer and gyroscope have separate
//! bus targets), the config stream upload, interrupt routing, FIFO transfers
//! and data reading.

use crate::config_file::{
    ConfigStreamLoader, CONFIG_LOAD_DELAY_MS, CONFIG_STREAM_READY,
};
use crate::fifo::{FifoBuffer, FifoConfig, FifoWatermark, FIFO_SIZE};
use crate::interrupt::{AccelIntConfig, AccelInterrupt, DataIntStatus, InterruptChannel};
use crate::registers::{Bmi08xAccel, Bmi08xGyro};
use crate::sensors::{AccelConfig, AccelPowerMode, GyroConfig, GyroPowerMode, Variant};
use crate::{Error, GYRO_CHIP_ID};

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

/// Sensor time resolution in seconds per tick (39.0625 microseconds)
pub const SENSOR_TIME_RESOLUTION: f32 = 39.0625e-6;

/// Command value accepted by both soft reset registers
const SOFTRESET_CMD: u8 = 0xB6;

/// Time the accelerometer die needs after a soft reset (milliseconds)
const ACCEL_RESET_DELAY_MS: u32 = 1;

/// Time the gyroscope die needs after a soft reset or power mode change
/// (milliseconds)
const GYRO_RESET_DELAY_MS: u32 = 30;

/// Settling time after an accelerometer power register write (milliseconds)
const POWER_CONFIG_DELAY_MS: u32 = 5;

/// Raw burst read base addresses (the registers behind them are declared in
/// [`crate::registers`]; bursts go through the interface directly)
const REG_ACC_DATA: u8 = 0x12;
const REG_SENSORTIME_0: u8 = 0x18;
const REG_FIFO_DATA: u8 = 0x26;

/// Accelerometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

/// Gyroscope data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

/// A snapshot of the free-running 24-bit sensor time counter
///
/// The counter increments every 39.0625 microseconds while the
/// accelerometer die is out of suspend and wraps after about 655 seconds.
/// Use [`SensorTime::ticks_since`] to take wrap-safe differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorTime {
    ticks: u32,
}

impl SensorTime {
    const TICK_MASK: u32 = 0x00FF_FFFF;

    /// Create a sensor time from a raw 24-bit tick count
    ///
    /// Values above 24 bits are truncated to the counter width.
    #[must_use]
    pub const fn from_ticks(ticks: u32) -> Self {
        Self {
            ticks: ticks & Self::TICK_MASK,
        }
    }

    /// Raw 24-bit tick count
    #[must_use]
    pub const fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Elapsed time in microseconds since the counter last wrapped
    ///
    /// Exact: one tick is 625/16 microseconds.
    #[must_use]
    pub const fn as_micros(&self) -> u64 {
        self.ticks as u64 * 625 / 16
    }

    /// Elapsed time in seconds since the counter last wrapped
    #[must_use]
    pub fn as_secs_f32(&self) -> f32 {
        self.ticks as f32 * SENSOR_TIME_RESOLUTION
    }

    /// Ticks elapsed since `earlier`, accounting for counter wrap
    ///
    /// Valid as long as fewer than 2^24 ticks (about 655 s) passed between
    /// the two snapshots.
    #[must_use]
    pub const fn ticks_since(&self, earlier: Self) -> u32 {
        self.ticks.wrapping_sub(earlier.ticks) & Self::TICK_MASK
    }
}

/// Main driver for the BMI08x
///
/// Generic over two register interfaces, one per die. The two interfaces
/// must share an error type; this is the case for both [`crate::I2cInterface`]
/// (two addresses on one bus type) and [`crate::SpiInterface`] (two chip
/// selects on one bus type).
pub struct Bmi08xDriver<A, G> {
    accel: Bmi08xAccel<A>,
    gyro: Bmi08xGyro<G>,
    variant: Variant,
    accel_config: AccelConfig,
    gyro_config: GyroConfig,
}

impl<A, G> Bmi08xDriver<A, G>
where
    A: RegisterInterface<AddressType = u8>,
    G: RegisterInterface<AddressType = u8, Error = A::Error>,
{
    /// Create a new BMI08x driver instance
    ///
    /// This verifies the chip ID register of both dies but does not
    /// initialize the device. Call [`Bmi08xDriver::init`] after construction
    /// to upload the config stream and configure both sensors.
    ///
    /// The stored accelerometer configuration starts at
    /// [`AccelConfig::fifo_full_profile`] for the given variant (1600 Hz,
    /// normal bandwidth, maximum range), so `init` brings the device
    /// straight into the batch acquisition profile. Call
    /// [`Bmi08xDriver::configure_accelerometer`] afterwards for anything
    /// else.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with either die fails
    /// - A chip ID register contains an unexpected value
    pub fn new(
        accel_interface: A,
        gyro_interface: G,
        variant: Variant,
    ) -> Result<Self, Error<A::Error>> {
        let mut driver = Self {
            accel: Bmi08xAccel::new(accel_interface),
            gyro: Bmi08xGyro::new(gyro_interface),
            variant,
            accel_config: AccelConfig::fifo_full_profile(variant),
            gyro_config: GyroConfig::default(),
        };

        // The first access after power-up switches the accelerometer die
        // into SPI mode and returns garbage; discard it (harmless on I2C)
        let _ = driver.accel.acc_chip_id().read()?;

        let accel_id = driver.accel.acc_chip_id().read()?.chip_id();
        if accel_id != variant.accel_chip_id() {
            return Err(Error::InvalidAccelDevice(accel_id));
        }

        let gyro_id = driver.gyro.gyro_chip_id().read()?.chip_id();
        if gyro_id != GYRO_CHIP_ID {
            return Err(Error::InvalidGyroDevice(gyro_id));
        }

        Ok(driver)
    }

    /// Initialize the device
    ///
    /// Performs a soft reset of both dies, uploads the vendor config stream
    /// to the accelerometer feature engine, then applies the stored sensor
    /// configurations and brings both sensors into their configured power
    /// modes.
    ///
    /// The steps run in a fixed order and the first failure aborts the
    /// sequence; the device is left in whatever state it reached and a
    /// retry should start with a fresh `init` call.
    ///
    /// # Arguments
    ///
    /// * `config_stream` - The vendor config stream for the accelerometer
    ///   feature engine, typically embedded with `include_bytes!`
    /// * `delay` - Delay provider implementing `embedded_hal::delay::DelayNs`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with either die fails
    /// - A chip ID register reads back wrong after the resets
    /// - The config stream is empty or of odd length
    /// - The feature engine does not report ready after the upload
    pub fn init<D>(&mut self, config_stream: &[u8], delay: &mut D) -> Result<(), Error<A::Error>>
    where
        D: DelayNs,
    {
        if !ConfigStreamLoader::is_valid_stream(config_stream) {
            return Err(Error::InvalidConfigStream);
        }

        // Reset the accelerometer die; the reset also drops it back to I2C
        // mode, so the first access afterwards is a throwaway again
        self.accel.acc_softreset().write(|w| {
            w.set_softreset(SOFTRESET_CMD);
        })?;
        delay.delay_ms(ACCEL_RESET_DELAY_MS);
        let _ = self.accel.acc_chip_id().read()?;

        let accel_id = self.accel.acc_chip_id().read()?.chip_id();
        if accel_id != self.variant.accel_chip_id() {
            return Err(Error::InvalidAccelDevice(accel_id));
        }

        self.gyro.gyro_softreset().write(|w| {
            w.set_softreset(SOFTRESET_CMD);
        })?;
        delay.delay_ms(GYRO_RESET_DELAY_MS);

        let gyro_id = self.gyro.gyro_chip_id().read()?.chip_id();
        if gyro_id != GYRO_CHIP_ID {
            return Err(Error::InvalidGyroDevice(gyro_id));
        }

        // The feature engine only accepts the stream with power save off
        self.accel.acc_pwr_conf().write(|w| {
            w.set_power_save(AccelPowerMode::Active.power_save_code());
        })?;
        delay.delay_ms(POWER_CONFIG_DELAY_MS);

        self.upload_config_stream(config_stream)?;
        delay.delay_ms(CONFIG_LOAD_DELAY_MS);

        let message = self.accel.internal_status().read()?.message();
        if message != CONFIG_STREAM_READY {
            return Err(Error::ConfigStreamFailed(message));
        }

        let accel_config = self.accel_config;
        let gyro_config = self.gyro_config;
        self.configure_accelerometer(&accel_config)?;
        self.accel_power(accel_config.power, delay)?;
        self.configure_gyroscope(&gyro_config)?;
        self.gyro_power(gyro_config.power, delay)?;

        Ok(())
    }

    fn upload_config_stream(&mut self, config_stream: &[u8]) -> Result<(), Error<A::Error>> {
        let interface = &mut self.accel.interface;
        ConfigStreamLoader::upload(config_stream, |address, data| {
            #[allow(clippy::cast_possible_truncation)]
            let size_bits = data.len() as u32 * 8;
            interface.write_register(address, size_bits, data)
        })?;
        Ok(())
    }

    /// Configure the accelerometer measurement path
    ///
    /// Writes output data rate, bandwidth and range. The power mode in the
    /// config is applied separately through [`Bmi08xDriver::accel_power`]
    /// (it needs a delay provider).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_accelerometer(
        &mut self,
        config: &AccelConfig,
    ) -> Result<(), Error<A::Error>> {
        self.accel.acc_conf().write(|w| {
            w.set_odr(config.odr as u8);
            w.set_bwp(config.bandwidth as u8);
        })?;
        self.accel.acc_range().write(|w| {
            w.set_range(config.range.code());
        })?;
        self.accel_config = *config;
        Ok(())
    }

    /// Configure the gyroscope measurement path
    ///
    /// Writes the combined ODR/bandwidth selection and the range. The power
    /// mode in the config is applied separately through
    /// [`Bmi08xDriver::gyro_power`].
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_gyroscope(&mut self, config: &GyroConfig) -> Result<(), Error<A::Error>> {
        self.gyro.gyro_range().write(|w| {
            w.set_range(config.range as u8);
        })?;
        self.gyro.gyro_bandwidth().write(|w| {
            w.set_bw(config.odr_bw as u8);
        })?;
        self.gyro_config = *config;
        Ok(())
    }

    /// Set the accelerometer power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_power<D>(
        &mut self,
        mode: AccelPowerMode,
        delay: &mut D,
    ) -> Result<(), Error<A::Error>>
    where
        D: DelayNs,
    {
        let enable = match mode {
            AccelPowerMode::Active => 0x04,
            AccelPowerMode::Suspend => 0x00,
        };

        self.accel.acc_pwr_conf().write(|w| {
            w.set_power_save(mode.power_save_code());
        })?;
        delay.delay_ms(POWER_CONFIG_DELAY_MS);
        self.accel.acc_pwr_ctrl().write(|w| {
            w.set_accel_enable(enable);
        })?;
        delay.delay_ms(POWER_CONFIG_DELAY_MS);

        self.accel_config.power = mode;
        Ok(())
    }

    /// Set the gyroscope power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gyro_power<D>(
        &mut self,
        mode: GyroPowerMode,
        delay: &mut D,
    ) -> Result<(), Error<A::Error>>
    where
        D: DelayNs,
    {
        self.gyro.gyro_lpm_1().write(|w| {
            w.set_power_mode(mode as u8);
        })?;
        delay.delay_ms(GYRO_RESET_DELAY_MS);

        self.gyro_config.power = mode;
        Ok(())
    }

    /// Enable or disable an accelerometer interrupt
    ///
    /// Configures the pin electrical properties and routes the interrupt
    /// source to the pin. Disabling clears the source mapping and turns the
    /// pin output off; mappings of the other pin are left untouched.
    /// Applying the same configuration twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_interrupt(
        &mut self,
        config: &AccelIntConfig,
        enable: bool,
    ) -> Result<(), Error<A::Error>> {
        match config.channel {
            InterruptChannel::Int1 => {
                self.accel.int_1_io_conf().write(|w| {
                    w.set_active_high(config.pin.active_high);
                    w.set_open_drain(config.pin.open_drain);
                    w.set_output_en(enable);
                    w.set_input_en(false);
                })?;
            }
            InterruptChannel::Int2 => {
                self.accel.int_2_io_conf().write(|w| {
                    w.set_active_high(config.pin.active_high);
                    w.set_open_drain(config.pin.open_drain);
                    w.set_output_en(enable);
                    w.set_input_en(false);
                })?;
            }
        }

        self.accel.int_map_data().modify(|w| {
            match (config.channel, config.source) {
                (InterruptChannel::Int1, AccelInterrupt::FifoFull) => w.set_int_1_ffull(enable),
                (InterruptChannel::Int1, AccelInterrupt::FifoWatermark) => w.set_int_1_fwm(enable),
                (InterruptChannel::Int1, AccelInterrupt::DataReady) => w.set_int_1_drdy(enable),
                (InterruptChannel::Int2, AccelInterrupt::FifoFull) => w.set_int_2_ffull(enable),
                (InterruptChannel::Int2, AccelInterrupt::FifoWatermark) => w.set_int_2_fwm(enable),
                (InterruptChannel::Int2, AccelInterrupt::DataReady) => w.set_int_2_drdy(enable),
            }
        })?;

        Ok(())
    }

    /// Read the latched data-path interrupt status
    ///
    /// The status register is clear-on-read; a reported FIFO full or
    /// watermark condition stays observable through the fill level until
    /// the FIFO is drained.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn data_int_status(&mut self) -> Result<DataIntStatus, Error<A::Error>> {
        let status = self.accel.acc_int_stat_1().read()?;
        Ok(DataIntStatus {
            data_ready: status.acc_drdy_int(),
            fifo_watermark: status.fwm_int(),
            fifo_full: status.ffull_int(),
        })
    }

    /// Configure the accelerometer FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_configure(&mut self, config: &FifoConfig) -> Result<(), Error<A::Error>> {
        self.accel.fifo_config_0().write(|w| {
            w.set_mode(config.mode == crate::fifo::FifoMode::Fifo);
            w.set_reserved_always_one(true);
        })?;
        self.accel.fifo_config_1().write(|w| {
            w.set_acc_en(config.enable_accel);
            w.set_int_1_input_en(false);
            w.set_int_2_input_en(false);
            w.set_reserved_always_one(true);
        })?;
        Ok(())
    }

    /// Set the FIFO watermark level
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_watermark(&mut self, watermark: FifoWatermark) -> Result<(), Error<A::Error>> {
        let threshold = watermark.threshold;
        #[allow(clippy::cast_possible_truncation)]
        let low = (threshold & 0xFF) as u8;
        #[allow(clippy::cast_possible_truncation)]
        let high = (threshold >> 8) as u8;

        self.accel.fifo_wtm_0().write(|w| {
            w.set_watermark(low);
        })?;
        self.accel.fifo_wtm_1().write(|w| {
            w.set_watermark(high);
        })?;
        Ok(())
    }

    /// Get the number of bytes currently in the FIFO
    ///
    /// # Returns
    ///
    /// Number of bytes in the FIFO (0-1024)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_length(&mut self) -> Result<u16, Error<A::Error>> {
        let low = self.accel.fifo_length_0().read()?;
        let high = self.accel.fifo_length_1().read()?;

        Ok((u16::from(high.length()) << 8) | u16::from(low.length()))
    }

    /// Drain the FIFO into a caller-provided buffer
    ///
    /// Reads the fill level once, then burst reads that many bytes (capped
    /// at the buffer capacity of [`FIFO_SIZE`]) from the FIFO read port.
    /// Reading the fill level once avoids racing against samples that
    /// arrive during the transfer; those stay in the FIFO for the next
    /// drain.
    ///
    /// On error the buffer is left empty.
    ///
    /// # Returns
    ///
    /// Number of bytes placed into the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_read(&mut self, buffer: &mut FifoBuffer) -> Result<u16, Error<A::Error>> {
        buffer.set_len(0);

        let available = self.fifo_length()?;
        let to_read = available.min(FIFO_SIZE);
        if to_read == 0 {
            return Ok(0);
        }

        let storage = buffer.as_mut_storage();
        self.accel.interface.read_register(
            REG_FIFO_DATA,
            u32::from(to_read) * 8,
            &mut storage[..usize::from(to_read)],
        )?;
        buffer.set_len(to_read);

        Ok(to_read)
    }

    /// Read the free-running sensor time counter
    ///
    /// The three counter bytes are read in one burst so the value is
    /// consistent.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sensor_time(&mut self) -> Result<SensorTime, Error<A::Error>> {
        let mut raw = [0u8; 3];
        self.accel
            .interface
            .read_register(REG_SENSORTIME_0, 24, &mut raw)?;

        let ticks = u32::from_le_bytes([raw[0], raw[1], raw[2], 0]);
        Ok(SensorTime::from_ticks(ticks))
    }

    /// Read the die temperature in degrees Celsius
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn temperature(&mut self) -> Result<f32, Error<A::Error>> {
        let msb = self.accel.temp_msb().read()?.data();
        let lsb = self.accel.temp_lsb().read()?.data();

        // 11-bit two's complement, 0.125 K/LSB, offset 23 degrees
        let raw = (i32::from(msb) << 3) | i32::from(lsb);
        let value = if raw > 1023 { raw - 2048 } else { raw };

        #[allow(clippy::cast_precision_loss)]
        Ok(value as f32 * 0.125 + 23.0)
    }

    /// Read raw accelerometer data from the data registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel(&mut self) -> Result<AccelData, Error<A::Error>> {
        let mut raw = [0u8; 6];
        self.accel
            .interface
            .read_register(REG_ACC_DATA, 48, &mut raw)?;

        Ok(AccelData {
            x: i16::from_le_bytes([raw[0], raw[1]]),
            y: i16::from_le_bytes([raw[2], raw[3]]),
            z: i16::from_le_bytes([raw[4], raw[5]]),
        })
    }

    /// Read raw gyroscope data from the rate registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro(&mut self) -> Result<GyroData, Error<A::Error>> {
        let x_lsb = self.gyro.rate_x_lsb().read()?.data();
        let x_msb = self.gyro.rate_x_msb().read()?.data();
        let y_lsb = self.gyro.rate_y_lsb().read()?.data();
        let y_msb = self.gyro.rate_y_msb().read()?.data();
        let z_lsb = self.gyro.rate_z_lsb().read()?.data();
        let z_msb = self.gyro.rate_z_msb().read()?.data();

        Ok(GyroData {
            x: i16::from_le_bytes([x_lsb, x_msb]),
            y: i16::from_le_bytes([y_lsb, y_msb]),
            z: i16::from_le_bytes([z_lsb, z_msb]),
        })
    }

    /// The package variant this driver was created for
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// The accelerometer configuration last applied (or the acquisition
    /// profile seeded at construction, before `configure_accelerometer`
    /// ran)
    #[must_use]
    pub const fn accel_config(&self) -> AccelConfig {
        self.accel_config
    }

    /// Consume the driver and return the underlying interfaces
    pub fn release(self) -> (A, G) {
        (self.accel.interface, self.gyro.interface)
    }
}
