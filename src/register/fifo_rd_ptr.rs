use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for the FIFO_RD_PTR (0x04) register.
///
/// Points at the next sample the host will get out of FIFO_DATA. Writable:
/// after a failed burst read the driver rewrites this register so the device
/// re-presents the samples that did not make it across the bus.
pub struct FifoReadPointer;
impl Reg for FifoReadPointer { const ADDR: u8 = 0x04; }

impl Readable for FifoReadPointer {
    type Out = u8;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0] & 0x0F)
    }
}

impl Writable for FifoReadPointer {
    type In = u8;
    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = v & 0x0F;
    }
}
