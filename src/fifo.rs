//! The driver-side model of the device FIFO.
//!
//! The chip keeps a 16-slot circular buffer with 4-bit write and read
//! pointers. The driver mirrors both pointers so it can compute how many
//! samples are waiting without an extra bus round-trip, and so it knows what
//! to write back into FIFO_RD_PTR when a burst read fails partway.

use heapless::Vec;

/// Number of samples the on-chip FIFO can hold.
pub const FIFO_DEPTH: usize = 16;

/// Bytes per sample on the wire: IR word then RED word, big-endian.
pub const SAMPLE_BYTES: usize = 4;

const POINTER_MASK: u8 = (FIFO_DEPTH as u8) - 1;

/// One heartbeat-cycle reading.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    /// IR photodiode ADC word.
    pub ir: u16,
    /// Red photodiode ADC word. Always zero in heart-rate only mode.
    pub red: u16,
}

impl Sample {
    /// Decodes one 4-byte FIFO group. `b` must hold at least [`SAMPLE_BYTES`].
    pub fn from_bytes(b: &[u8]) -> Self {
        Sample {
            ir: u16::from_be_bytes([b[0], b[1]]),
            red: u16::from_be_bytes([b[2], b[3]]),
        }
    }
}

/// The driver's mirror of the device FIFO pointers plus the cumulative
/// overflow loss.
///
/// Only the drain protocol advances the mirror; configuration resynchronizes
/// it wholesale from the device.
#[derive(Copy, Clone, Debug, Default)]
pub struct FifoState {
    write_ptr: u8,
    read_ptr: u8,
    total_lost: u64,
}

impl FifoState {
    /// Samples waiting between the mirrored pointers.
    ///
    /// Wrapping subtraction handles `write_ptr < read_ptr`; no special case.
    /// Note that a full FIFO also reports 0 here, the pointers alone cannot
    /// tell the two apart. The drain protocol uses the overflow counter to
    /// disambiguate.
    pub fn available(&self) -> u8 {
        self.write_ptr.wrapping_sub(self.read_ptr) & POINTER_MASK
    }

    /// Last write pointer observed on the device.
    pub fn write_pointer(&self) -> u8 { self.write_ptr }

    /// The driver's read pointer mirror. Equals the device's read pointer
    /// after every successful drain.
    pub fn read_pointer(&self) -> u8 { self.read_ptr }

    /// Samples lost to FIFO overflow over the lifetime of this driver
    /// instance. Monotonically non-decreasing; unlike the chip's counter it
    /// does not saturate.
    pub fn total_lost(&self) -> u64 { self.total_lost }

    /// Replaces both pointer mirrors with freshly read device values. The
    /// cumulative loss counter survives, it spans reconfigurations.
    pub(crate) fn resync(&mut self, write_ptr: u8, read_ptr: u8) {
        self.write_ptr = write_ptr & POINTER_MASK;
        self.read_ptr = read_ptr & POINTER_MASK;
    }

    pub(crate) fn note_write_pointer(&mut self, write_ptr: u8) {
        self.write_ptr = write_ptr & POINTER_MASK;
    }

    pub(crate) fn advance_read(&mut self, n: u8) {
        self.read_ptr = self.read_ptr.wrapping_add(n) & POINTER_MASK;
    }

    pub(crate) fn record_lost(&mut self, n: u8) {
        self.total_lost += n as u64;
    }
}

/// The outcome of one [`Max30100::drain`](crate::Max30100::drain) call.
///
/// Overflow is not an error: the samples the chip dropped are gone before
/// the driver ever sees them, so the drain reports the loss and carries on.
#[derive(Debug)]
pub struct DrainReport {
    /// The samples read out of the FIFO, oldest first.
    pub samples: Vec<Sample, FIFO_DEPTH>,
    /// Samples the chip reported lost since the previous drain.
    pub samples_lost: u8,
    /// Lifetime loss counter, including this drain.
    pub total_samples_lost: u64,
}
