use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker type for the FIFO_WR_PTR (0x02) register.
///
/// Points at the slot the device will store the next sample in. The pointer
/// is 4 bits wide; the upper nibble is undefined and masked off.
pub struct FifoWritePointer;
impl Reg for FifoWritePointer { const ADDR: u8 = 0x02; }

impl Readable for FifoWritePointer {
    type Out = u8;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0] & 0x0F)
    }
}
