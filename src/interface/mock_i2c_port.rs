extern crate std;

use embedded_hal_async::i2c::{
    ErrorKind, ErrorType, Operation, SevenBitAddress,
};
use std::collections::VecDeque;

const MAX_FAKE_PACKET_SIZE: usize = 32;

/// One bus transfer, either queued for reading or captured from a write
pub struct FakePacket {
    pub addr: u8,
    pub len: usize,
    pub buf: [u8; MAX_FAKE_PACKET_SIZE],
}

impl FakePacket {
    pub fn new_from_slice(addr: u8, slice: &[u8]) -> Self {
        let src_len = slice.len();
        let mut inst = Self {
            addr,
            len: src_len,
            buf: [0; MAX_FAKE_PACKET_SIZE],
        };
        inst.buf[..src_len].copy_from_slice(slice);
        inst
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

pub struct FakeI2cPort {
    pub available_packets: VecDeque<FakePacket>,
    pub sent_packets: VecDeque<FakePacket>,
    /// number of read operations served so far
    pub reads: usize,
    fail_next: bool,
}

impl FakeI2cPort {
    pub fn new() -> Self {
        FakeI2cPort {
            available_packets: VecDeque::with_capacity(3),
            sent_packets: VecDeque::with_capacity(3),
            reads: 0,
            fail_next: false,
        }
    }

    /// Enqueue a packet to be received later
    pub fn add_available_packet(&mut self, bytes: &[u8]) {
        let pack = FakePacket::new_from_slice(0, bytes);
        self.available_packets.push_back(pack);
    }

    /// Make the next transaction fail without touching any buffer
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    /// Command words of every write, in order
    pub fn sent_commands(&self) -> std::vec::Vec<u16> {
        self.sent_packets
            .iter()
            .filter(|p| p.len >= 2)
            .map(|p| u16::from_be_bytes([p.buf[0], p.buf[1]]))
            .collect()
    }
}

#[derive(Debug)]
pub struct FakeI2cError;

impl embedded_hal_async::i2c::Error for FakeI2cError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for FakeI2cPort {
    type Error = FakeI2cError;
}

impl embedded_hal_async::i2c::I2c for FakeI2cPort {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail_next {
            self.fail_next = false;
            return Err(FakeI2cError);
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let sent_pack = FakePacket::new_from_slice(address, bytes);
                    self.sent_packets.push_back(sent_pack);
                }
                Operation::Read(buffer) => {
                    self.reads += 1;
                    // an empty queue reads back as an idle bus: all zeroes
                    buffer.fill(0);
                    if let Some(next_pack) = self.available_packets.pop_front()
                    {
                        let read_len = next_pack.len.min(buffer.len());
                        buffer[..read_len]
                            .copy_from_slice(&next_pack.buf[..read_len]);
                    }
                }
            }
        }

        Ok(())
    }
}
