/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

#![no_std]
#![allow(async_fn_in_trait)]
extern crate embedded_hal_async;

pub mod constants;
pub mod conversion;
pub mod crc;
pub mod interface;
pub mod wrapper;

/// Errors in this crate
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<CommE> {
    /// Sensor communication error
    Comm(CommE),

    /// Command payload does not fit in the transmit buffer
    PayloadTooLarge(usize),
}
