/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

pub mod i2c;
pub use self::i2c::I2cInterface;

#[cfg(test)]
pub(crate) mod mock_i2c_port;

/// Largest payload that may follow a command word in one write
pub const MAX_COMMAND_PAYLOAD: usize = 16;

/// A method of communicating with the sensor.
///
/// Every access names the device bus address and a 16-bit register,
/// which doubles as the command opcode on writes.
pub trait SensorInterface {
    /// Interface error type
    type SensorError;

    /// Fill `buffer` with bytes read from register `reg` of device `addr`
    async fn read_register(
        &mut self,
        addr: u8,
        reg: u16,
        buffer: &mut [u8],
    ) -> Result<(), Self::SensorError>;

    /// Send `reg` as a two-byte command, followed by `payload` (may be empty)
    async fn write_register(
        &mut self,
        addr: u8,
        reg: u16,
        payload: &[u8],
    ) -> Result<(), Self::SensorError>;
}
