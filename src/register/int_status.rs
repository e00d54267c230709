use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker type for the INT_STATUS (0x00) register.
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
///
/// All five interrupts behave the same way: the active-low INT pin is held
/// low until the interrupt is cleared. Reading this register clears it.
pub struct IntStatus;
impl Reg for IntStatus { const ADDR: u8 = 0x00; }

/// Decoded INT_STATUS flags. Bits 3:1 are undefined for this part and ignored.
#[derive(Copy, Clone, Debug)]
pub struct IntStatusFlags {
    /// FIFO almost full (A_FULL).
    pub fifo_almost_full: bool,

    /// Temperature conversion finished (TEMP_RDY).
    pub temperature_ready: bool,

    /// New heart-rate sample stored in the FIFO (HR_RDY).
    pub heart_rate_ready: bool,

    /// New SpO2 sample stored in the FIFO (SPO2_RDY).
    pub spo2_ready: bool,

    /// Power-up or brownout recovery finished (PWR_RDY).
    pub power_ready: bool,
}

impl Readable for IntStatus {
    type Out = IntStatusFlags;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(IntStatusFlags {
            fifo_almost_full:   (b[0] & 0b1000_0000) != 0,
            temperature_ready:  (b[0] & 0b0100_0000) != 0,
            heart_rate_ready:   (b[0] & 0b0010_0000) != 0,
            spo2_ready:         (b[0] & 0b0001_0000) != 0,
            power_ready:        (b[0] & 0b0000_0001) != 0,
        })
    }
}
