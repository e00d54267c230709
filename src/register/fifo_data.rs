use crate::register::Reg;

/// Marker type for the FIFO_DATA (0x05) register.
///
/// An auto-incrementing burst port over the 16-sample memory bank. Each
/// sample is 4 bytes (IR word then RED word, big-endian), so draining `n`
/// samples is one sustained read of `4 * n` bytes. The burst length is only
/// known at runtime, which is why this register goes through
/// [`Bus::read_burst`](crate::bus::Bus::read_burst) instead of a typed read.
pub struct FifoData;
impl Reg for FifoData { const ADDR: u8 = 0x05; }
