use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for the LED_CONFIG (0x09) register.
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
///
/// Red LED current in bits 7:4, IR LED current in bits 3:0.
pub struct LedConfig;
impl Reg for LedConfig { const ADDR: u8 = 0x09; }

/// The payload for the LED_CONFIG (0x09) register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LedConfigFields {
    pub red_current: LedCurrent,
    pub ir_current: LedCurrent,
}

impl Readable for LedConfig {
    type Out = LedConfigFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(LedConfigFields {
            red_current: LedCurrent::from(b[0] >> 4),
            ir_current: LedCurrent::from(b[0] & 0x0F),
        })
    }
}

impl Writable for LedConfig {
    type In = LedConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let red: u8 = v.red_current.into();
        let ir: u8 = v.ir_current.into();
        out[0] = red << 4 | ir;
    }
}

/// LED drive current. All 16 codes are defined, from off to 50 mA.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LedCurrent {
    Ma0p0,
    Ma4p4,
    Ma7p6,
    Ma11p0,
    Ma14p2,
    Ma17p4,
    Ma20p8,
    Ma24p0,
    Ma27p1,
    Ma30p6,
    Ma33p8,
    Ma37p0,
    Ma40p2,
    Ma43p6,
    Ma46p8,
    Ma50p0,
}

impl From<u8> for LedCurrent {
    fn from(field: u8) -> Self {
        match field & 0x0F {
            0x0 => LedCurrent::Ma0p0,
            0x1 => LedCurrent::Ma4p4,
            0x2 => LedCurrent::Ma7p6,
            0x3 => LedCurrent::Ma11p0,
            0x4 => LedCurrent::Ma14p2,
            0x5 => LedCurrent::Ma17p4,
            0x6 => LedCurrent::Ma20p8,
            0x7 => LedCurrent::Ma24p0,
            0x8 => LedCurrent::Ma27p1,
            0x9 => LedCurrent::Ma30p6,
            0xA => LedCurrent::Ma33p8,
            0xB => LedCurrent::Ma37p0,
            0xC => LedCurrent::Ma40p2,
            0xD => LedCurrent::Ma43p6,
            0xE => LedCurrent::Ma46p8,
            _ => LedCurrent::Ma50p0,
        }
    }
}

impl Into<u8> for LedCurrent {
    fn into(self) -> u8 {
        match self {
            LedCurrent::Ma0p0 => 0x0,
            LedCurrent::Ma4p4 => 0x1,
            LedCurrent::Ma7p6 => 0x2,
            LedCurrent::Ma11p0 => 0x3,
            LedCurrent::Ma14p2 => 0x4,
            LedCurrent::Ma17p4 => 0x5,
            LedCurrent::Ma20p8 => 0x6,
            LedCurrent::Ma24p0 => 0x7,
            LedCurrent::Ma27p1 => 0x8,
            LedCurrent::Ma30p6 => 0x9,
            LedCurrent::Ma33p8 => 0xA,
            LedCurrent::Ma37p0 => 0xB,
            LedCurrent::Ma40p2 => 0xC,
            LedCurrent::Ma43p6 => 0xD,
            LedCurrent::Ma46p8 => 0xE,
            LedCurrent::Ma50p0 => 0xF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn led_config_decode() {
        let reg = LedConfig::decode(&[0x8F]).unwrap();
        assert_eq!(LedCurrent::Ma27p1, reg.red_current);
        assert_eq!(LedCurrent::Ma50p0, reg.ir_current);
    }

    #[test]
    fn led_config_encode() {
        let mut buffer = [0u8; 1];
        LedConfig::encode(&LedConfigFields {
            red_current: LedCurrent::Ma27p1,
            ir_current: LedCurrent::Ma50p0,
        }, &mut buffer);
        assert_eq!([0x8F], buffer);

        LedConfig::encode(&LedConfigFields {
            red_current: LedCurrent::Ma0p0,
            ir_current: LedCurrent::Ma4p4,
        }, &mut buffer);
        assert_eq!([0x01], buffer);
    }
}
