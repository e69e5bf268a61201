/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use super::{SensorInterface, MAX_COMMAND_PAYLOAD};
use crate::Error;
use embedded_hal_async::i2c::I2c;

/// Two-byte-register access over an async I2C bus
pub struct I2cInterface<I2C> {
    i2c_port: I2C,
    /// command word plus payload, built before each write
    send_buf: [u8; 2 + MAX_COMMAND_PAYLOAD],
}

impl<I2C, CommE> I2cInterface<I2C>
where
    I2C: I2c<Error = CommE>,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c_port: i2c,
            send_buf: [0; 2 + MAX_COMMAND_PAYLOAD],
        }
    }

    /// Returns the underlying bus
    pub fn free(self) -> I2C {
        self.i2c_port
    }
}

impl<I2C, CommE> SensorInterface for I2cInterface<I2C>
where
    I2C: I2c<Error = CommE>,
{
    type SensorError = Error<CommE>;

    async fn read_register(
        &mut self,
        addr: u8,
        reg: u16,
        buffer: &mut [u8],
    ) -> Result<(), Self::SensorError> {
        self.i2c_port
            .write_read(addr, &reg.to_be_bytes(), buffer)
            .await
            .map_err(Error::Comm)
    }

    async fn write_register(
        &mut self,
        addr: u8,
        reg: u16,
        payload: &[u8],
    ) -> Result<(), Self::SensorError> {
        if payload.len() > MAX_COMMAND_PAYLOAD {
            return Err(Error::PayloadTooLarge(payload.len()));
        }
        let total_len = 2 + payload.len();
        self.send_buf[..2].copy_from_slice(&reg.to_be_bytes());
        self.send_buf[2..total_len].copy_from_slice(payload);
        self.i2c_port
            .write(addr, &self.send_buf[..total_len])
            .await
            .map_err(Error::Comm)
    }
}
