//! Bus interface implementations for the BMI08x
//!
//! This module provides implementations of the `device-driver` traits for
//! I2C and SPI communication. The BMI08x package exposes two independent
//! bus targets (accelerometer and gyroscope die), so one interface instance
//! is created per die.

use crate::{
    ACCEL_I2C_ADDRESS_SDO_HIGH, ACCEL_I2C_ADDRESS_SDO_LOW, GYRO_I2C_ADDRESS_SDO_HIGH,
    GYRO_I2C_ADDRESS_SDO_LOW,
};

use crate::Error;
use device_driver::RegisterInterface;

/// I2C interface for one BMI08x die
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create an interface for the accelerometer die at the default address
    /// (0x18, SDO1 pulled low)
    pub const fn accel_default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: ACCEL_I2C_ADDRESS_SDO_LOW,
        }
    }

    /// Create an interface for the accelerometer die at the alternative
    /// address (0x19, SDO1 pulled high)
    pub const fn accel_alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: ACCEL_I2C_ADDRESS_SDO_HIGH,
        }
    }

    /// Create an interface for the gyroscope die at the default address
    /// (0x68, SDO2 pulled low)
    pub const fn gyro_default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: GYRO_I2C_ADDRESS_SDO_LOW,
        }
    }

    /// Create an interface for the gyroscope die at the alternative address
    /// (0x69, SDO2 pulled high)
    pub const fn gyro_alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: GYRO_I2C_ADDRESS_SDO_HIGH,
        }
    }

    /// Create an interface with a custom device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        // Create a buffer with address + data
        let mut buffer = [0u8; 33]; // Max: 1 address + 32 data bytes
        buffer[0] = address;
        let len = write_data.len().min(32);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}

/// SPI interface for one BMI08x die
///
/// # Note on Chip Select
///
/// This interface uses the `SpiDevice` trait from `embedded-hal`, which
/// manages the chip select (CS) pin automatically. Each die has its own CS
/// line, so two `SpiDevice` instances are needed for the full package.
///
/// # Note on the accelerometer die
///
/// Reads from the accelerometer die return one dummy byte before the first
/// data byte; use [`SpiInterface::accel`] so the interface discards it. The
/// gyroscope die has no dummy byte ([`SpiInterface::gyro`]).
pub struct SpiInterface<SPI> {
    spi: SPI,
    read_dummy_byte: bool,
}

impl<SPI> SpiInterface<SPI> {
    /// Create an interface for the accelerometer die
    pub const fn accel(spi: SPI) -> Self {
        Self {
            spi,
            read_dummy_byte: true,
        }
    }

    /// Create an interface for the gyroscope die
    pub const fn gyro(spi: SPI) -> Self {
        Self {
            spi,
            read_dummy_byte: false,
        }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = Error<E>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        // For SPI reads, set MSB to 1
        let read_address = address | 0x80;

        if self.read_dummy_byte {
            let mut dummy = [0u8; 1];
            let mut operations = [
                embedded_hal::spi::Operation::Write(&[read_address]),
                embedded_hal::spi::Operation::Read(&mut dummy),
                embedded_hal::spi::Operation::Read(read_data),
            ];
            self.spi.transaction(&mut operations).map_err(Error::Bus)
        } else {
            let mut operations = [
                embedded_hal::spi::Operation::Write(&[read_address]),
                embedded_hal::spi::Operation::Read(read_data),
            ];
            self.spi.transaction(&mut operations).map_err(Error::Bus)
        }
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        // For SPI writes, MSB should be 0 (clear it just in case)
        let write_address = address & 0x7F;

        // Create buffer with address + data
        let mut buffer = [0u8; 33];
        buffer[0] = write_address;
        let len = write_data.len().min(32);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.spi.write(&buffer[..=len]).map_err(Error::Bus)
    }
}
