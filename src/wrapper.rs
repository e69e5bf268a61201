/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use crate::interface::SensorInterface;

use crate::constants::*;
use crate::conversion::{humidity_to_percent, temperature_to_celsius};
use crate::crc::crc8;
#[cfg(feature = "defmt")]
use defmt::println;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WrapperError<E> {
    ///Communications error
    CommError(E),
}

/// How `probe` decides whether the sensor is on the bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeMode {
    /// Report "not present" without touching the bus.
    /// Legacy firmware behavior: the status comparison is never reached.
    AlwaysAbsent,
    /// Read the status register; present unless the first byte
    /// is 0x00 or 0xFF.
    StatusRegister,
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sht3xConfig {
    pub probe_mode: ProbeMode,
    /// periodic mode selected by `init`
    pub sample_rate: SampleRate,
    pub refresh: Refresh,
}

impl Default for Sht3xConfig {
    fn default() -> Self {
        Self {
            probe_mode: ProbeMode::AlwaysAbsent,
            sample_rate: SampleRate::Mps1Hz,
            refresh: Refresh::High,
        }
    }
}

/// Checksum outcome tallies, kept for the lifetime of the handle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CrcCounters {
    pub good_temperature: u32,
    pub bad_temperature: u32,
    pub good_humidity: u32,
    pub bad_humidity: u32,
}

/// The six bytes returned from the status/data register
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementFrame {
    pub temperature: [u8; 2],
    pub temperature_crc: u8,
    pub humidity: [u8; 2],
    pub humidity_crc: u8,
}

impl MeasurementFrame {
    pub fn from_bytes(buf: &[u8; MEASUREMENT_FRAME_LEN]) -> Self {
        Self {
            temperature: [buf[0], buf[1]],
            temperature_crc: buf[2],
            humidity: [buf[3], buf[4]],
            humidity_crc: buf[5],
        }
    }

    pub fn raw_temperature(&self) -> u16 {
        u16::from_be_bytes(self.temperature)
    }

    pub fn raw_humidity(&self) -> u16 {
        u16::from_be_bytes(self.humidity)
    }

    pub fn temperature_valid(&self) -> bool {
        crc8(&self.temperature) == self.temperature_crc
    }

    pub fn humidity_valid(&self) -> bool {
        crc8(&self.humidity) == self.humidity_crc
    }
}

/// Result of one `read_measurement`.
/// A field that failed its checksum reads as 0.0.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// degrees Celsius
    pub temperature: f32,
    /// percent relative humidity
    pub humidity: f32,
    pub temperature_valid: bool,
    pub humidity_valid: bool,
}

impl Measurement {
    /// True only when both fields passed their checksum
    pub fn is_valid(&self) -> bool {
        self.temperature_valid && self.humidity_valid
    }
}

pub struct SHT3X<SI> {
    pub(crate) sensor_interface: SI,
    address: u8,
    config: Sht3xConfig,
    /// last periodic mode requested, if any
    periodic_mode: Option<(SampleRate, Refresh)>,
    /// last good temperature, Celsius
    temperature: f32,
    /// last good relative humidity, percent
    humidity: f32,
    crc_counters: CrcCounters,
}

impl<SI> SHT3X<SI> {
    pub fn new_with_interface(sensor_interface: SI, address: u8) -> Self {
        Self::new_with_config(sensor_interface, address, Sht3xConfig::default())
    }

    pub fn new_with_config(
        sensor_interface: SI,
        address: u8,
        config: Sht3xConfig,
    ) -> Self {
        Self {
            sensor_interface,
            address,
            config,
            periodic_mode: None,
            temperature: 0.0,
            humidity: 0.0,
            crc_counters: CrcCounters::default(),
        }
    }

    /// Returns previously consumed serial sensor instance.
    pub fn free(self) -> SI {
        self.sensor_interface
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn config(&self) -> &Sht3xConfig {
        &self.config
    }

    /// Last temperature that passed its checksum, Celsius
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Last humidity that passed its checksum, percent
    pub fn humidity(&self) -> f32 {
        self.humidity
    }

    pub fn crc_counters(&self) -> CrcCounters {
        self.crc_counters
    }

    pub fn periodic_mode(&self) -> Option<(SampleRate, Refresh)> {
        self.periodic_mode
    }
}

impl<SI, SE> SHT3X<SI>
where
    SI: SensorInterface<SensorError = SE>,
{
    /// Reset the sensor and start periodic measurements at the
    /// configured rate (1 Hz, high refresh by default).
    ///
    /// Bus errors during these two writes are not reported; a sensor
    /// that did not take the commands shows up as checksum failures on
    /// the following reads.
    pub async fn init(&mut self) {
        #[cfg(feature = "defmt")]
        println!("sht3x init 0x{:X}", self.address);

        self.crc_counters = CrcCounters::default();

        if self.soft_reset().await.is_err() {
            #[cfg(feature = "defmt")]
            println!("reset err");
        }

        let Sht3xConfig {
            sample_rate,
            refresh,
            ..
        } = self.config;
        if self.set_periodic_mode(sample_rate, refresh).await.is_err() {
            #[cfg(feature = "defmt")]
            println!("periodic err");
        }
    }

    /// Tell the sensor to reset.
    /// Normally applications should not need to call this directly,
    /// as it is called during `init`.
    pub async fn soft_reset(&mut self) -> Result<(), WrapperError<SE>> {
        self.send_command(CMD_SOFT_RESET).await
    }

    /// Check whether the sensor answers on the bus, according to the
    /// configured `ProbeMode`.
    pub async fn probe(&mut self) -> bool {
        match self.config.probe_mode {
            ProbeMode::AlwaysAbsent => false,
            ProbeMode::StatusRegister => {
                let mut read_buf = [0u8; PROBE_READ_LEN];
                let res = self
                    .sensor_interface
                    .read_register(self.address, REG_STATUS_DATA, &mut read_buf)
                    .await;
                if res.is_err() {
                    #[cfg(feature = "defmt")]
                    println!("probe err");
                    return false;
                }
                read_buf[0] != 0x00 && read_buf[0] != 0xFF
            }
        }
    }

    /// Start periodic measurements at the given rate and refresh level
    pub async fn set_periodic_mode(
        &mut self,
        sample_rate: SampleRate,
        refresh: Refresh,
    ) -> Result<(), WrapperError<SE>> {
        let command = periodic_command(sample_rate as u8, refresh as u8);
        #[cfg(feature = "defmt")]
        println!("periodic 0x{:X}", command);

        self.periodic_mode = Some((sample_rate, refresh));
        self.send_command(command).await
    }

    /// Fetch the latest periodic sample.
    ///
    /// Temperature and humidity are validated independently: a bad
    /// checksum on one field zeroes only that field in the result, and
    /// leaves the stored value from the last good read in place.
    pub async fn read_measurement(&mut self) -> Measurement {
        let mut read_buf = [0u8; MEASUREMENT_FRAME_LEN];
        // on bus error the zeroed buffer fails both checksums
        if self
            .sensor_interface
            .read_register(self.address, REG_STATUS_DATA, &mut read_buf)
            .await
            .is_err()
        {
            read_buf = [0u8; MEASUREMENT_FRAME_LEN];
            #[cfg(feature = "defmt")]
            println!("meas read err");
        }
        let frame = MeasurementFrame::from_bytes(&read_buf);

        let mut measurement = Measurement {
            temperature: 0.0,
            humidity: 0.0,
            temperature_valid: frame.temperature_valid(),
            humidity_valid: frame.humidity_valid(),
        };

        if measurement.temperature_valid {
            self.temperature = temperature_to_celsius(frame.raw_temperature());
            measurement.temperature = self.temperature;
            self.crc_counters.good_temperature =
                self.crc_counters.good_temperature.saturating_add(1);
        } else {
            self.crc_counters.bad_temperature =
                self.crc_counters.bad_temperature.saturating_add(1);
            #[cfg(feature = "defmt")]
            println!("temp crc {}", frame);
        }

        if measurement.humidity_valid {
            self.humidity = humidity_to_percent(frame.raw_humidity());
            measurement.humidity = self.humidity;
            self.crc_counters.good_humidity =
                self.crc_counters.good_humidity.saturating_add(1);
        } else {
            self.crc_counters.bad_humidity =
                self.crc_counters.bad_humidity.saturating_add(1);
            #[cfg(feature = "defmt")]
            println!("rh crc {}", frame);
        }

        measurement
    }

    /// Send a bare command word, no payload
    async fn send_command(&mut self, command: u16) -> Result<(), WrapperError<SE>> {
        self.sensor_interface
            .write_register(self.address, command, &[])
            .await
            .map_err(WrapperError::CommError)
    }
}
