use crate::max30100::Interrupts;
use crate::register::led_config::LedCurrent;
use crate::register::mode_config::OperatingMode;
use crate::register::spo2_config::{LedPulseWidth, SampleRate};

/// The resolved set of device settings.
///
/// Built once, validated as a whole, and applied as a whole: the driver
/// never mutates an applied configuration field by field, so the device is
/// either running the old configuration or the new one, never a mix.
#[derive(Copy, Clone, Debug)]
pub struct Configuration {
    pub(crate) mode: OperatingMode,
    pub(crate) enable_temperature: bool,
    pub(crate) sample_rate: SampleRate,
    pub(crate) pulse_width: LedPulseWidth,
    pub(crate) high_resolution: bool,
    pub(crate) red_current: LedCurrent,
    pub(crate) ir_current: LedCurrent,
    pub(crate) interrupts: Interrupts,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            mode: OperatingMode::SpO2,
            enable_temperature: false,
            sample_rate: SampleRate::Sps100,
            pulse_width: LedPulseWidth::Us1600,
            high_resolution: true,
            red_current: LedCurrent::Ma27p1,
            ir_current: LedCurrent::Ma50p0,
            interrupts: Interrupts::new(),
        }
    }
}

impl Configuration {
    pub fn operating_mode(mut self, mode: OperatingMode) -> Self {
        self.mode = mode;

        self
    }

    /// Starts one temperature conversion as part of applying the
    /// configuration, so TEMP_RDY asserts shortly after startup.
    /// Later conversions are triggered per call by
    /// [`Max30100::read_temperature`](crate::Max30100::read_temperature).
    pub fn enable_temperature_reading(mut self, enable: bool) -> Self {
        self.enable_temperature = enable;

        self
    }

    pub fn sample_rate(mut self, sample_rate: SampleRate) -> Self {
        self.sample_rate = sample_rate;

        self
    }

    pub fn pulse_width(mut self, pulse_width: LedPulseWidth) -> Self {
        self.pulse_width = pulse_width;

        self
    }

    pub fn high_resolution(mut self, high_resolution: bool) -> Self {
        self.high_resolution = high_resolution;

        self
    }

    pub fn led_currents(mut self, red: LedCurrent, ir: LedCurrent) -> Self {
        self.red_current = red;
        self.ir_current = ir;

        self
    }

    pub fn interrupts(mut self, interrupts: Interrupts) -> Self {
        self.interrupts = interrupts;

        self
    }

    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::PulseOximetry => Configuration::default()
                .interrupts(Interrupts::new().spo2_ready().fifo_almost_full()),
            Preset::HeartRate => Configuration::default()
                .operating_mode(OperatingMode::HeartRateOnly)
                .led_currents(LedCurrent::Ma0p0, LedCurrent::Ma50p0)
                .interrupts(Interrupts::new().heart_rate_ready().fifo_almost_full()),
        }
    }

    /// Checks that the hardware supports this combination of settings.
    ///
    /// Runs before anything is written, so a rejected configuration leaves
    /// the device untouched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pulse_width > max_pulse_width(self.sample_rate) {
            return Err(ConfigError::UnsupportedTiming {
                sample_rate: self.sample_rate,
                pulse_width: self.pulse_width,
            });
        }

        if self.mode == OperatingMode::HeartRateOnly && self.interrupts.is_spo2_ready_set() {
            return Err(ConfigError::Spo2InterruptInHeartRateMode);
        }

        Ok(())
    }
}

/// Widest LED pulse that still fits inside one sample period at the given
/// rate, per the timing tables for this part family.
fn max_pulse_width(rate: SampleRate) -> LedPulseWidth {
    match rate {
        SampleRate::Sps50 | SampleRate::Sps100 => LedPulseWidth::Us1600,
        SampleRate::Sps167 | SampleRate::Sps200 | SampleRate::Sps400 => LedPulseWidth::Us800,
        SampleRate::Sps600 | SampleRate::Sps800 | SampleRate::Sps1000 => LedPulseWidth::Us400,
    }
}

pub enum Preset {
    PulseOximetry,
    HeartRate,
}

/// A configuration the hardware cannot run. Raised at validation time,
/// before any register write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The LED pulse width does not fit inside one sample period at the
    /// requested sample rate.
    UnsupportedTiming {
        sample_rate: SampleRate,
        pulse_width: LedPulseWidth,
    },
    /// The SpO2-ready interrupt was requested while the SpO2 channel is off.
    Spo2InterruptInHeartRateMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_pulse_width_over_timing_budget() {
        let config = Configuration::default()
            .sample_rate(SampleRate::Sps1000)
            .pulse_width(LedPulseWidth::Us1600);

        assert_eq!(
            Err(ConfigError::UnsupportedTiming {
                sample_rate: SampleRate::Sps1000,
                pulse_width: LedPulseWidth::Us1600,
            }),
            config.validate()
        );

        let config = Configuration::default()
            .sample_rate(SampleRate::Sps600)
            .pulse_width(LedPulseWidth::Us800);

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_any_pulse_width_at_100sps() {
        for pulse_width in [
            LedPulseWidth::Us200,
            LedPulseWidth::Us400,
            LedPulseWidth::Us800,
            LedPulseWidth::Us1600,
        ] {
            let config = Configuration::default()
                .sample_rate(SampleRate::Sps100)
                .pulse_width(pulse_width);

            assert!(config.validate().is_ok(), "{:?}", pulse_width);
        }
    }

    #[test]
    fn validate_rejects_spo2_interrupt_in_heart_rate_mode() {
        let config = Configuration::default()
            .operating_mode(OperatingMode::HeartRateOnly)
            .interrupts(Interrupts::new().spo2_ready());

        assert_eq!(Err(ConfigError::Spo2InterruptInHeartRateMode), config.validate());

        let config = config.operating_mode(OperatingMode::SpO2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn presets_validate() {
        assert!(Configuration::from_preset(Preset::PulseOximetry).validate().is_ok());
        assert!(Configuration::from_preset(Preset::HeartRate).validate().is_ok());
    }
}
