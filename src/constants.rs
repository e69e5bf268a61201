/// I2C address with the ADDR pin tied low
pub const DEFAULT_ADDRESS: u8 = 0x44;
/// I2C address with the ADDR pin tied high
pub const ALTERNATE_ADDRESS: u8 = 0x45;

// Commands are sent as the 16-bit "register" address, MSB first
pub const CMD_SOFT_RESET: u16 = 0x30A2;
pub const REG_STATUS_DATA: u16 = 0xE000;

// temperature MSB, LSB, CRC, humidity MSB, LSB, CRC
pub const MEASUREMENT_FRAME_LEN: usize = 6;
pub const PROBE_READ_LEN: usize = 2;

pub const CRC8_POLYNOMIAL: u8 = 0x31; // x^8 + x^5 + x^4 + 1
pub const CRC8_INIT: u8 = 0xFF;

/// Periodic measurement trigger commands,
/// five sample-rate groups of {high, mid, low} refresh
pub const PERIODIC_COMMANDS: [u16; 15] = [
    0x2032, 0x2024, 0x202F, // 0.5 Hz
    0x2130, 0x2126, 0x212D, // 1 Hz
    0x2236, 0x2220, 0x222B, // 2 Hz
    0x2334, 0x2322, 0x2329, // 4 Hz
    0x2737, 0x2721, 0x272A, // 10 Hz
];

pub const REFRESH_LEVELS: usize = 3;

/// Periodic measurement rate, in measurements per second
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SampleRate {
    Mps05Hz = 0,
    Mps1Hz = 1,
    Mps2Hz = 2,
    Mps4Hz = 3,
    Mps10Hz = 4,
}

/// Repeatability of periodic measurements.
/// Lower refresh means noisier readings but less self-heating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Refresh {
    High = 0,
    Mid = 1,
    Low = 2,
}

/// Look up the trigger command for a raw (rate, refresh) index pair.
/// Combinations outside the table select the first entry.
pub fn periodic_command(rate_index: u8, refresh_index: u8) -> u16 {
    let index = (rate_index as usize - SampleRate::Mps05Hz as usize)
        * REFRESH_LEVELS
        + refresh_index as usize;
    PERIODIC_COMMANDS
        .get(index)
        .copied()
        .unwrap_or(PERIODIC_COMMANDS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_rate_high_refresh() {
        assert_eq!(periodic_command(0, 0), 0x2032);
        assert_eq!(
            periodic_command(SampleRate::Mps05Hz as u8, Refresh::High as u8),
            0x2032
        );
    }

    #[test]
    fn highest_rate_low_refresh() {
        assert_eq!(
            periodic_command(SampleRate::Mps10Hz as u8, Refresh::Low as u8),
            0x272A
        );
    }

    #[test]
    fn groups_follow_rate_order() {
        assert_eq!(periodic_command(1, 0), 0x2130);
        assert_eq!(periodic_command(2, 1), 0x2220);
        assert_eq!(periodic_command(3, 2), 0x2329);
    }

    #[test]
    fn out_of_range_falls_back_to_first() {
        assert_eq!(periodic_command(5, 0), 0x2032);
        assert_eq!(periodic_command(4, 3), 0x2032);
        assert_eq!(periodic_command(0, 15), 0x2032);
        assert_eq!(periodic_command(u8::MAX, u8::MAX), 0x2032);
    }
}
