//! ### INT_ENABLE - Interrupt enable (`0x01`, 1 byte, R/W)
//!
//! Selects which interrupt sources pull the INT pin low. A disabled source
//! still shows up in `INT_STATUS`, it just never reaches the pin.
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for the INT_ENABLE (0x01) register.
///
/// Used with [`Max30100::read::<IntEnable>()`] or [`Max30100::write::<IntEnable>()`]
pub struct IntEnable;
impl Reg for IntEnable { const ADDR: u8 = 0x01; }

/// The payload for the INT_ENABLE (0x01) register.
///
/// There is no enable bit for PWR_RDY; it always asserts on power-up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IntEnableCfg {
    /// Enable the FIFO almost full interrupt.
    pub fifo_almost_full_en: bool,
    /// Enable the temperature ready interrupt.
    pub temperature_ready_en: bool,
    /// Enable the heart-rate data ready interrupt.
    pub heart_rate_ready_en: bool,
    /// Enable the SpO2 data ready interrupt.
    pub spo2_ready_en: bool,
}

impl Readable for IntEnable {
    type Out = IntEnableCfg;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(IntEnableCfg {
            fifo_almost_full_en:    (b[0] & 0b1000_0000) != 0,
            temperature_ready_en:   (b[0] & 0b0100_0000) != 0,
            heart_rate_ready_en:    (b[0] & 0b0010_0000) != 0,
            spo2_ready_en:          (b[0] & 0b0001_0000) != 0,
        })
    }
}

impl Writable for IntEnable {
    type In = IntEnableCfg;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let mut value = 0u8;
        if v.fifo_almost_full_en { value |= 0b1000_0000; }
        if v.temperature_ready_en { value |= 0b0100_0000; }
        if v.heart_rate_ready_en { value |= 0b0010_0000; }
        if v.spo2_ready_en { value |= 0b0001_0000; }

        out[0] = value;
    }
}
