//! Register definitions for the BMI08x
//!
//! The BMI085/BMI088 package contains two independent dies, each with its own
//! bus address and a flat register map:
//! - **Accelerometer die**: configuration, FIFO, sensor time and the feature
//!   engine that consumes the vendor config stream after every reset.
//! - **Gyroscope die**: rate data and its own power/measurement configuration.
//!
//! Both maps are declared with the `device-driver` DSL so the high-level
//! driver reads and writes typed fields instead of raw bytes. Multi-byte
//! quantities (FIFO length, sensor time, axis data) are spread across
//! single-byte registers exactly as the device exposes them.

device_driver::create_device!(
    device_name: Bmi08xAccel,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// ACC_CHIP_ID - Accelerometer chip ID (0x00)
        /// Expected value: 0x1F (BMI085) or 0x1E (BMI088)
        register AccChipId {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Chip ID of the accelerometer die
            chip_id: uint = 0..8,
        },

        /// ACC_ERR_REG - Accelerometer error register (0x02)
        register AccErrReg {
            const ADDRESS = 0x02;
            const SIZE_BITS = 8;

            /// Fatal error, chip not operable
            fatal_err: bool = 0,
            reserved_1: uint = 1..2,
            /// Error code (0 = no error, 1 = ACC_CONF invalid)
            error_code: uint = 2..5,
            reserved_7_5: uint = 5..8,
        },

        /// ACC_STATUS - Accelerometer status (0x03)
        register AccStatus {
            const ADDRESS = 0x03;
            const SIZE_BITS = 8;

            reserved_6_0: uint = 0..7,
            /// New accelerometer data ready
            drdy_acc: bool = 7,
        },

        /// ACC_X_LSB - X-axis data, low byte (0x12)
        register AccXLsb {
            const ADDRESS = 0x12;
            const SIZE_BITS = 8;

            /// X-axis bits 7:0
            data: uint = 0..8,
        },

        /// ACC_X_MSB - X-axis data, high byte (0x13)
        register AccXMsb {
            const ADDRESS = 0x13;
            const SIZE_BITS = 8;

            /// X-axis bits 15:8
            data: uint = 0..8,
        },

        /// ACC_Y_LSB - Y-axis data, low byte (0x14)
        register AccYLsb {
            const ADDRESS = 0x14;
            const SIZE_BITS = 8;

            /// Y-axis bits 7:0
            data: uint = 0..8,
        },

        /// ACC_Y_MSB - Y-axis data, high byte (0x15)
        register AccYMsb {
            const ADDRESS = 0x15;
            const SIZE_BITS = 8;

            /// Y-axis bits 15:8
            data: uint = 0..8,
        },

        /// ACC_Z_LSB - Z-axis data, low byte (0x16)
        register AccZLsb {
            const ADDRESS = 0x16;
            const SIZE_BITS = 8;

            /// Z-axis bits 7:0
            data: uint = 0..8,
        },

        /// ACC_Z_MSB - Z-axis data, high byte (0x17)
        register AccZMsb {
            const ADDRESS = 0x17;
            const SIZE_BITS = 8;

            /// Z-axis bits 15:8
            data: uint = 0..8,
        },

        /// SENSORTIME_0 - Sensor time bits 7:0 (0x18)
        register SensorTime0 {
            const ADDRESS = 0x18;
            const SIZE_BITS = 8;

            /// Sensor time bits 7:0 (1 LSB = 39.0625 us)
            ticks: uint = 0..8,
        },

        /// SENSORTIME_1 - Sensor time bits 15:8 (0x19)
        register SensorTime1 {
            const ADDRESS = 0x19;
            const SIZE_BITS = 8;

            /// Sensor time bits 15:8
            ticks: uint = 0..8,
        },

        /// SENSORTIME_2 - Sensor time bits 23:16 (0x1A)
        register SensorTime2 {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Sensor time bits 23:16
            ticks: uint = 0..8,
        },

        /// ACC_INT_STAT_1 - Accelerometer interrupt status (0x1D)
        ///
        /// Latched status of the data-path interrupts; cleared on read.
        register AccIntStat1 {
            const ADDRESS = 0x1D;
            const SIZE_BITS = 8;

            /// FIFO full interrupt
            ffull_int: bool = 0,
            /// FIFO watermark interrupt
            fwm_int: bool = 1,
            reserved_6_2: uint = 2..7,
            /// Accelerometer data ready interrupt
            acc_drdy_int: bool = 7,
        },

        /// TEMP_MSB - Temperature bits 10:3 (0x22)
        register TempMsb {
            const ADDRESS = 0x22;
            const SIZE_BITS = 8;

            /// Temperature bits 10:3
            data: uint = 0..8,
        },

        /// TEMP_LSB - Temperature bits 2:0 (0x23)
        register TempLsb {
            const ADDRESS = 0x23;
            const SIZE_BITS = 8;

            reserved_4_0: uint = 0..5,
            /// Temperature bits 2:0
            data: uint = 5..8,
        },

        /// FIFO_LENGTH_0 - FIFO fill level bits 7:0 (0x24)
        register FifoLength0 {
            const ADDRESS = 0x24;
            const SIZE_BITS = 8;

            /// FIFO byte count bits 7:0
            length: uint = 0..8,
        },

        /// FIFO_LENGTH_1 - FIFO fill level bits 13:8 (0x25)
        register FifoLength1 {
            const ADDRESS = 0x25;
            const SIZE_BITS = 8;

            /// FIFO byte count bits 13:8
            length: uint = 0..6,
            reserved_7_6: uint = 6..8,
        },

        /// FIFO_DATA - FIFO read port (0x26)
        ///
        /// Reading this address pops bytes from the FIFO; the address does
        /// not auto-increment, so burst reads keep draining the buffer.
        register FifoData {
            const ADDRESS = 0x26;
            const SIZE_BITS = 8;

            /// One FIFO byte
            data: uint = 0..8,
        },

        /// INTERNAL_STATUS - Feature engine status (0x2A)
        register InternalStatus {
            const ADDRESS = 0x2A;
            const SIZE_BITS = 8;

            /// Status message (0x01 = initialization OK)
            message: uint = 0..4,
            reserved_7_4: uint = 4..8,
        },

        /// ACC_CONF - Accelerometer measurement configuration (0x40)
        register AccConf {
            const ADDRESS = 0x40;
            const SIZE_BITS = 8;

            /// Output data rate (0x0C = 1600 Hz)
            odr: uint = 0..4,
            /// Bandwidth parameter (0x0A = normal, 0x09 = OSR2, 0x08 = OSR4)
            bwp: uint = 4..8,
        },

        /// ACC_RANGE - Accelerometer measurement range (0x41)
        register AccRange {
            const ADDRESS = 0x41;
            const SIZE_BITS = 8;

            /// Range selection; the code-to-range mapping depends on variant
            range: uint = 0..2,
            reserved_7_2: uint = 2..8,
        },

        /// FIFO_DOWNS - FIFO downsampling configuration (0x45)
        register FifoDowns {
            const ADDRESS = 0x45;
            const SIZE_BITS = 8;

            reserved_3_0: uint = 0..4,
            /// Downsampling factor for FIFO data, 2^n
            fifo_downs: uint = 4..7,
            reserved_7: uint = 7..8,
        },

        /// FIFO_WTM_0 - FIFO watermark bits 7:0 (0x46)
        register FifoWtm0 {
            const ADDRESS = 0x46;
            const SIZE_BITS = 8;

            /// Watermark byte count bits 7:0
            watermark: uint = 0..8,
        },

        /// FIFO_WTM_1 - FIFO watermark bits 12:8 (0x47)
        register FifoWtm1 {
            const ADDRESS = 0x47;
            const SIZE_BITS = 8;

            /// Watermark byte count bits 12:8
            watermark: uint = 0..5,
            reserved_7_5: uint = 5..8,
        },

        /// FIFO_CONFIG_0 - FIFO operating mode (0x48)
        register FifoConfig0 {
            const ADDRESS = 0x48;
            const SIZE_BITS = 8;

            /// FIFO mode (true) or stream mode (false)
            mode: bool = 0,
            /// Reserved, must be written as 1
            reserved_always_one: bool = 1,
            reserved_7_2: uint = 2..8,
        },

        /// FIFO_CONFIG_1 - FIFO data source selection (0x49)
        register FifoConfig1 {
            const ADDRESS = 0x49;
            const SIZE_BITS = 8;

            reserved_1_0: uint = 0..2,
            /// Route INT2 level into FIFO frames
            int2_input_en: bool = 2,
            /// Route INT1 level into FIFO frames
            int1_input_en: bool = 3,
            /// Reserved, must be written as 1
            reserved_always_one: bool = 4,
            reserved_5: uint = 5..6,
            /// Store accelerometer frames in the FIFO
            acc_en: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// INIT_CTRL - Feature engine init control (0x59)
        register InitCtrl {
            const ADDRESS = 0x59;
            const SIZE_BITS = 8;

            /// 0 = prepare for config stream burst, 1 = stream complete
            init_ctrl: uint = 0..8,
        },

        /// INIT_ADDR_0 - Config stream write address, low nibble (0x5B)
        register InitAddr0 {
            const ADDRESS = 0x5B;
            const SIZE_BITS = 8;

            /// Word address bits 3:0
            addr: uint = 0..4,
            reserved_7_4: uint = 4..8,
        },

        /// INIT_ADDR_1 - Config stream write address, high byte (0x5C)
        register InitAddr1 {
            const ADDRESS = 0x5C;
            const SIZE_BITS = 8;

            /// Word address bits 11:4
            addr: uint = 0..8,
        },

        /// INIT_DATA - Config stream write port (0x5E)
        register InitData {
            const ADDRESS = 0x5E;
            const SIZE_BITS = 8;

            /// One config stream byte; the address auto-increments
            data: uint = 0..8,
        },

        /// INT1_IO_CONF - INT1 pin electrical configuration (0x53)
        register Int1IoConf {
            const ADDRESS = 0x53;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Active high (true) or active low (false)
            active_high: bool = 1,
            /// Open-drain (true) or push-pull (false)
            open_drain: bool = 2,
            /// Enable the pin as interrupt output
            output_en: bool = 3,
            /// Enable the pin as interrupt input
            input_en: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// INT2_IO_CONF - INT2 pin electrical configuration (0x54)
        register Int2IoConf {
            const ADDRESS = 0x54;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Active high (true) or active low (false)
            active_high: bool = 1,
            /// Open-drain (true) or push-pull (false)
            open_drain: bool = 2,
            /// Enable the pin as interrupt output
            output_en: bool = 3,
            /// Enable the pin as interrupt input
            input_en: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// INT1_INT2_MAP_DATA - Interrupt source to pin mapping (0x58)
        register IntMapData {
            const ADDRESS = 0x58;
            const SIZE_BITS = 8;

            /// Map FIFO full to INT1
            int1_ffull: bool = 0,
            /// Map FIFO watermark to INT1
            int1_fwm: bool = 1,
            /// Map data ready to INT1
            int1_drdy: bool = 2,
            reserved_3: uint = 3..4,
            /// Map FIFO full to INT2
            int2_ffull: bool = 4,
            /// Map FIFO watermark to INT2
            int2_fwm: bool = 5,
            /// Map data ready to INT2
            int2_drdy: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// ACC_PWR_CONF - Accelerometer power configuration (0x7C)
        register AccPwrConf {
            const ADDRESS = 0x7C;
            const SIZE_BITS = 8;

            /// 0x00 = active, 0x03 = suspend
            power_save: uint = 0..8,
        },

        /// ACC_PWR_CTRL - Accelerometer enable (0x7D)
        register AccPwrCtrl {
            const ADDRESS = 0x7D;
            const SIZE_BITS = 8;

            /// 0x04 = accelerometer on, 0x00 = accelerometer off
            accel_enable: uint = 0..8,
        },

        /// ACC_SOFTRESET - Accelerometer soft reset (0x7E)
        register AccSoftreset {
            const ADDRESS = 0x7E;
            const SIZE_BITS = 8;

            /// Write 0xB6 to reset the accelerometer die
            softreset: uint = 0..8,
        }
    }
);

/// BMI08x gyroscope die register definitions
///
/// The gyroscope is an independent die with its own bus address and a
/// separate register map, so it gets its own generated device. Nested in
/// a module because each `create_device!` expansion defines its own
/// `field_sets` support module.
pub mod gyro {
    device_driver::create_device!(
        device_name: Bmi08xGyro,
        dsl: {
            config {
                type RegisterAddressType = u8;
                type DefaultByteOrder = LE;
            }

            /// GYRO_CHIP_ID - Gyroscope chip ID (0x00)
            /// Expected value: 0x0F
            register GyroChipId {
                const ADDRESS = 0x00;
                const SIZE_BITS = 8;

                /// Chip ID of the gyroscope die
                chip_id: uint = 0..8,
            },

            /// RATE_X_LSB - X-axis rate, low byte (0x02)
            register RateXLsb {
                const ADDRESS = 0x02;
                const SIZE_BITS = 8;

                /// X-axis rate bits 7:0
                data: uint = 0..8,
            },

            /// RATE_X_MSB - X-axis rate, high byte (0x03)
            register RateXMsb {
                const ADDRESS = 0x03;
                const SIZE_BITS = 8;

                /// X-axis rate bits 15:8
                data: uint = 0..8,
            },

            /// RATE_Y_LSB - Y-axis rate, low byte (0x04)
            register RateYLsb {
                const ADDRESS = 0x04;
                const SIZE_BITS = 8;

                /// Y-axis rate bits 7:0
                data: uint = 0..8,
            },

            /// RATE_Y_MSB - Y-axis rate, high byte (0x05)
            register RateYMsb {
                const ADDRESS = 0x05;
                const SIZE_BITS = 8;

                /// Y-axis rate bits 15:8
                data: uint = 0..8,
            },

            /// RATE_Z_LSB - Z-axis rate, low byte (0x06)
            register RateZLsb {
                const ADDRESS = 0x06;
                const SIZE_BITS = 8;

                /// Z-axis rate bits 7:0
                data: uint = 0..8,
            },

            /// RATE_Z_MSB - Z-axis rate, high byte (0x07)
            register RateZMsb {
                const ADDRESS = 0x07;
                const SIZE_BITS = 8;

                /// Z-axis rate bits 15:8
                data: uint = 0..8,
            },

            /// GYRO_RANGE - Gyroscope measurement range (0x0F)
            register GyroRange {
                const ADDRESS = 0x0F;
                const SIZE_BITS = 8;

                /// Range selection (0x00 = 2000 dps .. 0x04 = 125 dps)
                range: uint = 0..8,
            },

            /// GYRO_BANDWIDTH - Gyroscope ODR and filter bandwidth (0x10)
            register GyroBandwidth {
                const ADDRESS = 0x10;
                const SIZE_BITS = 8;

                /// Combined ODR/bandwidth selection (0x01 = 2000 Hz / 230 Hz)
                bw: uint = 0..8,
            },

            /// GYRO_LPM1 - Gyroscope power mode (0x11)
            register GyroLpm1 {
                const ADDRESS = 0x11;
                const SIZE_BITS = 8;

                /// 0x00 = normal, 0x80 = suspend, 0x20 = deep suspend
                power_mode: uint = 0..8,
            },

            /// GYRO_SOFTRESET - Gyroscope soft reset (0x14)
            register GyroSoftreset {
                const ADDRESS = 0x14;
                const SIZE_BITS = 8;

                /// Write 0xB6 to reset the gyroscope die
                softreset: uint = 0..8,
            },

            /// GYRO_INT_CTRL - Gyroscope interrupt control (0x15)
            register GyroIntCtrl {
                const ADDRESS = 0x15;
                const SIZE_BITS = 8;

                reserved_6_0: uint = 0..7,
                /// Enable the new-data interrupt
                data_en: bool = 7,
            }
        }
    );
}

pub use gyro::Bmi08xGyro;
