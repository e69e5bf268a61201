use crate::constants::{CRC8_INIT, CRC8_POLYNOMIAL};

/// CRC-8 as computed by the sensor over each 2-byte data word:
/// polynomial 0x31, init 0xFF, MSB first, no reflection.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = CRC8_INIT;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ CRC8_POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}
