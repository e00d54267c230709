//! ### SPO2_CONFIG - SpO2 configuration (`0x07`, 1 byte, R/W)
//!
//! Sample rate, LED pulse width and the high-resolution flag. Not every
//! rate/width combination fits inside one sample period; that check lives in
//! [`Configuration::validate`](crate::config::Configuration) so an invalid
//! pair is rejected before it is ever encoded.
use crate::register::{InvalidRegisterField, Readable, Reg, UnexpectedValue, Writable};

/// Marker type for the SPO2_CONFIG (0x07) register.
pub struct SpO2Config;
impl Reg for SpO2Config { const ADDR: u8 = 0x07; }

/// The payload for the SPO2_CONFIG (0x07) register.
#[derive(Copy, Clone, Debug)]
pub struct SpO2ConfigFields {
    /// High-resolution mode (SPO2_HI_RES_EN, bit 6): 16-bit ADC resolution
    /// with 1.6 ms LED pulses.
    pub high_res_en: bool,
    /// SpO2 sample rate (bits 4:2).
    pub sample_rate: SampleRate,
    /// LED pulse width (bits 1:0); also sets the ADC resolution.
    pub pulse_width: LedPulseWidth,
}

impl Readable for SpO2Config {
    type Out = SpO2ConfigFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(SpO2ConfigFields {
            high_res_en: (b[0] & 0b0100_0000) != 0,
            sample_rate: SampleRate::try_from((b[0] >> 2) & 0b111)
                .map_err(|e| InvalidRegisterField::new(Self::ADDR, e.0, 2))?,
            pulse_width: LedPulseWidth::from(b[0] & 0b11),
        })
    }
}

impl Writable for SpO2Config {
    type In = SpO2ConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let rate: u8 = v.sample_rate.into();
        let width: u8 = v.pulse_width.into();
        let mut value = rate << 2 | width;
        if v.high_res_en { value |= 0b0100_0000; }
        out[0] = value;
    }
}

/// SpO2 sample rate in samples per second (SPO2_CONFIG bits 4:2).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SampleRate {
    Sps50,
    Sps100,
    Sps167,
    Sps200,
    Sps400,
    Sps600,
    Sps800,
    Sps1000,
}

impl TryFrom<u8> for SampleRate {
    type Error = UnexpectedValue;
    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b000 => Ok(SampleRate::Sps50),
            0b001 => Ok(SampleRate::Sps100),
            0b010 => Ok(SampleRate::Sps167),
            0b011 => Ok(SampleRate::Sps200),
            0b100 => Ok(SampleRate::Sps400),
            0b101 => Ok(SampleRate::Sps600),
            0b110 => Ok(SampleRate::Sps800),
            0b111 => Ok(SampleRate::Sps1000),
            other => Err(UnexpectedValue(other)),
        }
    }
}

impl Into<u8> for SampleRate {
    fn into(self) -> u8 {
        match self {
            SampleRate::Sps50 => 0b000,
            SampleRate::Sps100 => 0b001,
            SampleRate::Sps167 => 0b010,
            SampleRate::Sps200 => 0b011,
            SampleRate::Sps400 => 0b100,
            SampleRate::Sps600 => 0b101,
            SampleRate::Sps800 => 0b110,
            SampleRate::Sps1000 => 0b111,
        }
    }
}

/// LED pulse width (SPO2_CONFIG bits 1:0).
///
/// The pulse width fixes the ADC resolution: 200 µs gives 13 bits, each
/// doubling adds one bit up to 16 bits at 1600 µs. Variants order by width,
/// which is what the configuration timing check compares on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LedPulseWidth {
    Us200,
    Us400,
    Us800,
    Us1600,
}

impl From<u8> for LedPulseWidth {
    fn from(field: u8) -> Self {
        match field & 0b11 {
            0b00 => LedPulseWidth::Us200,
            0b01 => LedPulseWidth::Us400,
            0b10 => LedPulseWidth::Us800,
            _ => LedPulseWidth::Us1600,
        }
    }
}

impl Into<u8> for LedPulseWidth {
    fn into(self) -> u8 {
        match self {
            LedPulseWidth::Us200 => 0b00,
            LedPulseWidth::Us400 => 0b01,
            LedPulseWidth::Us800 => 0b10,
            LedPulseWidth::Us1600 => 0b11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spo2_config_decode() {
        let reg = SpO2Config::decode(&[0b0100_0111]).unwrap();
        assert!(reg.high_res_en);
        assert_eq!(SampleRate::Sps100, reg.sample_rate);
        assert_eq!(LedPulseWidth::Us1600, reg.pulse_width);

        let reg = SpO2Config::decode(&[0b0001_1100]).unwrap();
        assert!(!reg.high_res_en);
        assert_eq!(SampleRate::Sps1000, reg.sample_rate);
        assert_eq!(LedPulseWidth::Us200, reg.pulse_width);
    }

    #[test]
    fn spo2_config_encode() {
        let mut buffer = [0u8; 1];
        SpO2Config::encode(&SpO2ConfigFields {
            high_res_en: true,
            sample_rate: SampleRate::Sps100,
            pulse_width: LedPulseWidth::Us1600,
        }, &mut buffer);
        assert_eq!([0b0100_0111], buffer);

        SpO2Config::encode(&SpO2ConfigFields {
            high_res_en: false,
            sample_rate: SampleRate::Sps50,
            pulse_width: LedPulseWidth::Us200,
        }, &mut buffer);
        assert_eq!([0b0000_0000], buffer);
    }
}
