//! Mock interfaces simulating the two BMI08x dies for driver tests

use device_driver::RegisterInterface;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Which die an operation targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Die {
    /// Accelerometer die
    Accel,
    /// Gyroscope die
    Gyro,
}

/// Records operations performed on the mock interfaces
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read register operation
    ReadRegister {
        /// Die the read targeted
        die: Die,
        /// Register address
        address: u8,
        /// Number of bytes read
        len: usize,
    },
    /// Write register operation
    WriteRegister {
        /// Die the write targeted
        die: Die,
        /// Register address
        address: u8,
        /// Bytes that were written
        data: Vec<u8>,
    },
}

/// Shared state for both mock dies (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Simulated accelerometer register values
    accel_registers: HashMap<u8, u8>,

    /// Simulated gyroscope register values
    gyro_registers: HashMap<u8, u8>,

    /// Bytes currently in the simulated FIFO; `FIFO_LENGTH_0/1` reads are
    /// derived from this and `FIFO_DATA` reads pop from the front
    fifo: VecDeque<u8>,

    /// Refill template applied once the FIFO has been fully drained
    auto_refill: Option<Vec<u8>>,

    /// Values served on successive `ACC_INT_STAT_1` reads; once exhausted,
    /// reads fall back to the stored register value
    int_stat_sequence: VecDeque<u8>,

    /// Everything burst-written to the `INIT_DATA` port
    config_stream_received: Vec<u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,
}

const REG_ACC_INT_STAT_1: u8 = 0x1D;
const REG_FIFO_LENGTH_0: u8 = 0x24;
const REG_FIFO_LENGTH_1: u8 = 0x25;
const REG_FIFO_DATA: u8 = 0x26;
const REG_INIT_DATA: u8 = 0x5E;

impl MockState {
    fn new() -> Self {
        let mut state = Self {
            accel_registers: HashMap::new(),
            gyro_registers: HashMap::new(),
            fifo: VecDeque::new(),
            auto_refill: None,
            int_stat_sequence: VecDeque::new(),
            config_stream_received: Vec::new(),
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
        };

        // Default chip IDs: BMI088 accelerometer, BMI08x gyroscope
        state.accel_registers.insert(0x00, 0x1E);
        state.gyro_registers.insert(0x00, 0x0F);

        // Feature engine reports the config stream as accepted
        state.accel_registers.insert(0x2A, 0x01);

        state
    }

    fn accel_read(&mut self, address: u8, read_data: &mut [u8]) {
        // The FIFO read port does not auto-increment
        if address == REG_FIFO_DATA {
            for byte in read_data.iter_mut() {
                *byte = self.fifo.pop_front().unwrap_or(0);
            }
            if self.fifo.is_empty() {
                if let Some(template) = &self.auto_refill {
                    self.fifo.extend(template.iter().copied());
                }
            }
            return;
        }

        for (i, byte) in read_data.iter_mut().enumerate() {
            let reg_addr = address.wrapping_add(i as u8);
            *byte = match reg_addr {
                REG_ACC_INT_STAT_1 => {
                    if let Some(value) = self.int_stat_sequence.pop_front() {
                        value
                    } else {
                        // Latched status is clear-on-read
                        self.accel_registers.remove(&reg_addr).unwrap_or(0)
                    }
                }
                REG_FIFO_LENGTH_0 => (self.fifo.len() & 0xFF) as u8,
                REG_FIFO_LENGTH_1 => ((self.fifo.len() >> 8) & 0x3F) as u8,
                _ => self.accel_registers.get(&reg_addr).copied().unwrap_or(0),
            };
        }
    }

    fn accel_write(&mut self, address: u8, write_data: &[u8]) {
        // The config stream port does not auto-increment either; collect
        // the burst so tests can compare it against the source stream
        if address == REG_INIT_DATA {
            self.config_stream_received.extend_from_slice(write_data);
            return;
        }

        for (i, &byte) in write_data.iter().enumerate() {
            self.accel_registers
                .insert(address.wrapping_add(i as u8), byte);
        }
    }

    fn gyro_write(&mut self, address: u8, write_data: &[u8]) {
        for (i, &byte) in write_data.iter().enumerate() {
            self.gyro_registers
                .insert(address.wrapping_add(i as u8), byte);
        }
    }
}

/// Handle to the shared mock sensor state
///
/// Create one, then hand [`MockSensor::accel_interface`] and
/// [`MockSensor::gyro_interface`] to the driver. The handle stays usable
/// for inspection and stimulus while the driver owns the interfaces.
#[derive(Clone)]
pub struct MockSensor {
    state: Rc<RefCell<MockState>>,
}

impl MockSensor {
    /// Create a mock sensor with default register values
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Interface for the accelerometer die
    pub fn accel_interface(&self) -> MockInterface {
        MockInterface {
            state: Rc::clone(&self.state),
            die: Die::Accel,
        }
    }

    /// Interface for the gyroscope die
    pub fn gyro_interface(&self) -> MockInterface {
        MockInterface {
            state: Rc::clone(&self.state),
            die: Die::Gyro,
        }
    }

    /// Set an accelerometer register value
    pub fn set_accel_register(&self, address: u8, value: u8) {
        self.state
            .borrow_mut()
            .accel_registers
            .insert(address, value);
    }

    /// Get an accelerometer register value
    pub fn accel_register(&self, address: u8) -> u8 {
        self.state
            .borrow()
            .accel_registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Set a gyroscope register value
    #[allow(dead_code)]
    pub fn set_gyro_register(&self, address: u8, value: u8) {
        self.state
            .borrow_mut()
            .gyro_registers
            .insert(address, value);
    }

    /// Get a gyroscope register value
    #[allow(dead_code)]
    pub fn gyro_register(&self, address: u8) -> u8 {
        self.state
            .borrow()
            .gyro_registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Replace the simulated FIFO content
    pub fn set_fifo_bytes(&self, bytes: &[u8]) {
        let mut state = self.state.borrow_mut();
        state.fifo.clear();
        state.fifo.extend(bytes.iter().copied());
    }

    /// Bytes still in the simulated FIFO
    pub fn fifo_remaining(&self) -> usize {
        self.state.borrow().fifo.len()
    }

    /// Refill the FIFO from this template whenever it runs empty
    pub fn set_auto_refill(&self, bytes: &[u8]) {
        self.state.borrow_mut().auto_refill = Some(bytes.to_vec());
    }

    /// Queue values for successive `ACC_INT_STAT_1` reads
    ///
    /// Once the queue is exhausted, reads fall back to the stored register
    /// value (0 unless set), so an empty queue simulates an interrupt that
    /// never fires.
    pub fn queue_int_status(&self, values: &[u8]) {
        self.state
            .borrow_mut()
            .int_stat_sequence
            .extend(values.iter().copied());
    }

    /// Set the 24-bit sensor time counter
    pub fn set_sensor_time(&self, ticks: u32) {
        let mut state = self.state.borrow_mut();
        let bytes = ticks.to_le_bytes();
        state.accel_registers.insert(0x18, bytes[0]);
        state.accel_registers.insert(0x19, bytes[1]);
        state.accel_registers.insert(0x1A, bytes[2]);
    }

    /// Everything the driver burst-wrote to the `INIT_DATA` port
    pub fn config_stream_received(&self) -> Vec<u8> {
        self.state.borrow().config_stream_received.clone()
    }

    /// Inject a read failure on the next read operation (either die)
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation (either die)
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Get the operations log
    #[allow(dead_code)]
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    #[allow(dead_code)]
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// All values written to an accelerometer register, oldest first
    pub fn accel_writes(&self, address: u8) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::WriteRegister {
                    die: Die::Accel,
                    address: a,
                    data,
                } if *a == address => Some(data.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
}

/// One die of the mock sensor, as seen by the driver
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
    die: Die,
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }

        match self.die {
            Die::Accel => state.accel_read(address, read_data),
            Die::Gyro => {
                for (i, byte) in read_data.iter_mut().enumerate() {
                    let reg_addr = address.wrapping_add(i as u8);
                    *byte = state.gyro_registers.get(&reg_addr).copied().unwrap_or(0);
                }
            }
        }

        state.operations.push(Operation::ReadRegister {
            die: self.die,
            address,
            len: read_data.len(),
        });

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }

        match self.die {
            Die::Accel => state.accel_write(address, write_data),
            Die::Gyro => state.gyro_write(address, write_data),
        }

        state.operations.push(Operation::WriteRegister {
            die: self.die,
            address,
            data: write_data.to_vec(),
        });

        Ok(())
    }
}
