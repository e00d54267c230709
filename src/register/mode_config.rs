//! ### MODE_CONFIG - Mode configuration (`0x06`, 1 byte, R/W)
//!
//! Holds the shutdown and reset controls, the one-shot temperature trigger
//! and the operating mode. The reset and temperature bits clear themselves
//! once the chip has acted on them.
use crate::register::{InvalidRegisterField, Readable, Reg, UnexpectedValue, Writable};

/// Marker type for the MODE_CONFIG (0x06) register.
pub struct ModeConfig;
impl Reg for ModeConfig { const ADDR: u8 = 0x06; }

/// The payload for the MODE_CONFIG (0x06) register.
#[derive(Copy, Clone, Debug)]
pub struct ModeConfigFields {
    /// Shutdown control (SHDN, bit 7). Registers retain their values while
    /// shut down.
    pub shutdown: bool,
    /// Reset control (RESET, bit 6). All configuration registers return to
    /// their power-on state; the bit self-clears when the reset finishes.
    pub reset: bool,
    /// Temperature enable (TEMP_EN, bit 3). Starts a single temperature
    /// conversion, then self-clears.
    pub temp_en: bool,
    /// Mode control (bits 2:0).
    pub mode: OperatingMode,
}

impl Readable for ModeConfig {
    type Out = ModeConfigFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(ModeConfigFields {
            shutdown:   (b[0] & 0b1000_0000) != 0,
            reset:      (b[0] & 0b0100_0000) != 0,
            temp_en:    (b[0] & 0b0000_1000) != 0,
            mode: OperatingMode::try_from(b[0] & 0b0000_0111)
                .map_err(|e| InvalidRegisterField::new(Self::ADDR, e.0, 0))?,
        })
    }
}

impl Writable for ModeConfig {
    type In = ModeConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let mut value = 0u8;
        if v.shutdown { value |= 0b1000_0000; }
        if v.reset { value |= 0b0100_0000; }
        if v.temp_en { value |= 0b0000_1000; }
        let mode: u8 = v.mode.into();
        value |= mode;
        out[0] = value;
    }
}

/// Operating mode of the sensor (MODE_CONFIG bits 2:0).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperatingMode {
    /// Heart-rate only. The red LED stays off and the RED word of every
    /// sample reads zero.
    HeartRateOnly,
    /// SpO2 enabled; both LEDs pulse and both sample words carry data.
    SpO2,
}

impl TryFrom<u8> for OperatingMode {
    type Error = UnexpectedValue;
    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b010 => Ok(OperatingMode::HeartRateOnly),
            0b011 => Ok(OperatingMode::SpO2),
            other => Err(UnexpectedValue(other)),
        }
    }
}

impl Into<u8> for OperatingMode {
    fn into(self) -> u8 {
        match self {
            OperatingMode::HeartRateOnly => 0b010,
            OperatingMode::SpO2 => 0b011,
        }
    }
}
