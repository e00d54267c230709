use crate::register::{InvalidRegisterField, Readable, Reg};

/// The on-chip counter stops counting here; the true loss may be larger.
pub const OVERFLOW_SATURATION: u8 = 0x0F;

/// Marker type for the OVF_COUNTER (0x03) register.
///
/// When the FIFO is full, new samples are not pushed and are lost instead.
/// OVF_COUNTER counts the lost samples, saturating at
/// [`OVERFLOW_SATURATION`].
pub struct OverflowCounter;
impl Reg for OverflowCounter { const ADDR: u8 = 0x03; }

impl Readable for OverflowCounter {
    type Out = u8;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0] & 0x0F)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ovf_counter_decode() {
        assert_eq!(0, OverflowCounter::decode(&[0x00]).unwrap());
        assert_eq!(3, OverflowCounter::decode(&[0x03]).unwrap());
        assert_eq!(OVERFLOW_SATURATION, OverflowCounter::decode(&[0x0F]).unwrap());
    }
}
