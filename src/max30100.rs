use crate::bus::{Bus, I2c};
use crate::config::Configuration;
use crate::error::Max30100Error;
use crate::fifo::{DrainReport, FifoState, Sample, FIFO_DEPTH, SAMPLE_BYTES};
use crate::register::fifo_data::FifoData;
use crate::register::fifo_rd_ptr::FifoReadPointer;
use crate::register::fifo_wr_ptr::FifoWritePointer;
use crate::register::int_enable::{IntEnable, IntEnableCfg};
use crate::register::int_status::{IntStatus, IntStatusFlags};
use crate::register::led_config::{LedConfig, LedConfigFields};
use crate::register::mode_config::{ModeConfig, ModeConfigFields};
use crate::register::ovf_counter::OverflowCounter;
use crate::register::spo2_config::{SpO2Config, SpO2ConfigFields};
use crate::register::temperature::{TempData, Temperature};
use crate::register::{Readable, Reg, Writable};
use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

/// Type alias for a Max30100 chip communicating over I2C
type Max30100I2c<T> = Max30100<I2c<T>>;

/// Main Max30100 driver struct
///
/// One instance owns the bus exclusively. Every logical operation (most
/// visibly the pointer-snapshot-then-burst sequence inside [`drain`]) must
/// run as an uninterrupted series of transactions, so concurrent callers
/// need to serialize around a single instance; the driver does not do that
/// for them.
///
/// [`drain`]: Max30100::drain
pub struct Max30100<B> {
    bus: B,
    fifo: FifoState,
    config: Configuration,
}

/// Type alias used to simplify return types throughout the driver
pub type Max30100Result<T, BusError> = Result<T, Max30100Error<BusError>>;

impl<T> Max30100I2c<T>
where
    T: embedded_hal_async::i2c::I2c,
    I2c<T>: Bus,
{
    /// Constructs a new Max30100 driver instance with a given configuration that communicates over I2C
    ///
    /// This function will:
    /// - Perform a soft reset
    /// - Wait for the power-ready flag, returning [`Max30100Error::NotConnected`]
    ///   if it is never observed
    /// - Apply the given configuration
    ///
    /// The MAX30100 answers on a single fixed address, so unlike most I2C
    /// drivers there is no address to pass.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use embedded_hal_async::i2c::I2c;
    /// # use max30100_rs::Max30100Result;
    ///  use max30100_rs::Max30100;
    ///  use max30100_rs::config::Configuration;
    /// # async fn demo<I: I2c, D: DelayNs>(i2c: I, mut delay: D) -> Max30100Result<(), I::Error> {
    ///
    ///  let device = Max30100::new_i2c(
    ///     i2c,
    ///     Configuration::default(),
    ///     &mut delay
    ///  ).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new_i2c<D: DelayNs>(
        i2c: T,
        config: Configuration,
        delay: &mut D,
    ) -> Max30100Result<Self, <I2c<T> as Bus>::Error> {
        Self::new(I2c::new(i2c), config, delay).await
    }
}

impl<B> Max30100<B>
where
    B: Bus,
{
    /// Creates a new instance of the Max30100 driver struct with the given configuration.
    pub(crate) async fn new<D: DelayNs>(
        bus: B,
        config: Configuration,
        delay: &mut D,
    ) -> Max30100Result<Self, B::Error> {
        let mut device = Max30100 {
            bus,
            fifo: FifoState::default(),
            config,
        };

        device.soft_reset().await?;

        // Poll PWR_RDY max 10 times with 1 ms in between; startup takes well
        // under that on a healthy part.
        device.wait_power_ready(delay, 10).await?;

        device.apply_configuration(&config).await?;

        Ok(device)
    }

    /// Polls INT_STATUS for the power-ready flag [`attempts`] times with a 1 ms delay.
    ///
    /// Returns [`Max30100Error::NotConnected`] if the flag is never observed.
    async fn wait_power_ready<D: DelayNs>(
        &mut self,
        delay: &mut D,
        attempts: u32,
    ) -> Max30100Result<(), B::Error> {
        for _ in 0..attempts {
            if let Ok(status) = self.bus.read::<IntStatus>().await {
                if status.power_ready {
                    return Ok(());
                }
            }

            delay.delay_ms(1).await;
        }

        Err(Max30100Error::NotConnected)
    }

    /// Triggers a soft reset via the MODE_CONFIG RESET bit.
    ///
    /// All configuration registers return to their power-on state and the
    /// bit self-clears once the reset finishes.
    ///
    /// **Note:** This resets the chip to factory defaults, not to the configuration that was provided when constructing the driver.
    pub async fn soft_reset(&mut self) -> Max30100Result<(), B::Error> {
        self.bus
            .write::<ModeConfig>(&ModeConfigFields {
                shutdown: false,
                reset: true,
                temp_en: false,
                mode: self.config.mode,
            })
            .await
    }

    /// Applies the given configuration by writing to the corresponding registers.
    ///
    /// The configuration is validated first; a rejected configuration
    /// returns [`Max30100Error::Config`] without any bus traffic. Register
    /// writes end with the mode register, which is the write that sets the
    /// conversion machinery running.
    pub async fn apply_configuration(
        &mut self,
        config: &Configuration,
    ) -> Max30100Result<(), B::Error> {
        config.validate().map_err(Max30100Error::Config)?;

        self.bus
            .write::<IntEnable>(&IntEnableCfg::from(config.interrupts))
            .await?;

        self.bus
            .write::<SpO2Config>(&SpO2ConfigFields {
                high_res_en: config.high_resolution,
                sample_rate: config.sample_rate,
                pulse_width: config.pulse_width,
            })
            .await?;

        self.bus
            .write::<LedConfig>(&LedConfigFields {
                red_current: config.red_current,
                ir_current: config.ir_current,
            })
            .await?;

        self.bus
            .write::<ModeConfig>(&ModeConfigFields {
                shutdown: false,
                reset: false,
                temp_en: config.enable_temperature,
                mode: config.mode,
            })
            .await?;

        self.config = *config;

        // Pick up whatever pointer state the device actually holds, so the
        // first drain after (re)configuration starts reconciled.
        let write_ptr = self.bus.read::<FifoWritePointer>().await?;
        let read_ptr = self.bus.read::<FifoReadPointer>().await?;
        self.fifo.resync(write_ptr, read_ptr);

        Ok(())
    }

    /// Read a register (or fixed-size register block) using a **typed marker**.
    ///
    /// This is the low-level, register-accurate entry point. You pass a marker type
    /// from [`crate::register`] (e.g. `register::mode_config::ModeConfig`), and you get back its
    /// decoded value (`R::Out`).
    ///
    /// For most users, the convenience methods (e.g.
    /// [`interrupt_status`](Self::interrupt_status)) are easier to discover
    /// and have concrete return types. This generic is here when you want
    /// full control.
    pub async fn read<R: Readable>(&mut self) -> Max30100Result<R::Out, B::Error> {
        self.bus.read::<R>().await
    }

    /// Write a register using a **typed marker**.
    ///
    /// The counterpart of [`read`](Self::read). Note that writing FIFO or
    /// mode registers directly bypasses the driver's pointer mirror and
    /// stored configuration; prefer the named operations.
    pub async fn write<W: Writable>(&mut self, v: &W::In) -> Max30100Result<(), B::Error> {
        self.bus.write::<W>(v).await
    }

    /// Returns the interrupt status from the INT_STATUS (0x00) register.
    ///
    /// Use this to determine what caused an interrupt to be generated.
    ///
    /// **Note:** The INT_STATUS register is cleared upon read.
    pub async fn interrupt_status(&mut self) -> Max30100Result<IntStatusFlags, B::Error> {
        self.bus.read::<IntStatus>().await
    }

    /// Reads out everything the FIFO currently holds, up to `max_samples`.
    ///
    /// This is the three-transaction readout this part family documents:
    /// query the write pointer, burst-read the available samples in one
    /// sustained transfer, and only touch the read pointer if the burst did
    /// not complete. A full transfer needs no third transaction because the
    /// device's read pointer advanced in lockstep with the burst; a short or
    /// failed transfer gets exactly one corrective FIFO_RD_PTR write so the
    /// unread samples are presented again on the next call.
    ///
    /// Samples the chip dropped while the FIFO was full show up in
    /// [`DrainReport::samples_lost`]; that loss happened before the driver
    /// could do anything about it, so it is reported, not raised as an
    /// error.
    ///
    /// `drain(0)` returns an empty report without touching the bus.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use max30100_rs::{Max30100, Max30100Result};
    /// # use max30100_rs::bus::Bus;
    ///
    /// # async fn demo<B: Bus>(mut device: Max30100<B>) -> Max30100Result<(), B::Error> {
    /// let report = device.drain(16).await?;
    /// for sample in &report.samples {
    ///     // hand sample.ir / sample.red to the signal-processing stage
    /// }
    /// if report.samples_lost > 0 {
    ///     // poll faster, or enable the FIFO almost-full interrupt
    /// }
    /// # Ok(()) }
    /// ```
    pub async fn drain(&mut self, max_samples: usize) -> Max30100Result<DrainReport, B::Error> {
        if max_samples == 0 {
            return Ok(self.report(Vec::new(), 0));
        }

        let write_ptr = self.bus.read::<FifoWritePointer>().await?;
        self.fifo.note_write_pointer(write_ptr);

        let lost = self.bus.read::<OverflowCounter>().await?;
        if lost > 0 {
            self.fifo.record_lost(lost);
        }

        let mut available = self.fifo.available() as usize;
        if available == 0 && lost > 0 {
            // Pointers collide both when the FIFO is empty and when all 16
            // slots are in use; reported loss proves it filled up.
            available = FIFO_DEPTH;
        }

        let n = available.min(max_samples);
        let mut samples = Vec::new();
        if n > 0 {
            let mut raw = [0u8; FIFO_DEPTH * SAMPLE_BYTES];
            let wanted = n * SAMPLE_BYTES;

            match self.bus.read_burst(FifoData::ADDR, &mut raw[..wanted]).await {
                Ok(got) if got == wanted => {
                    for group in raw[..wanted].chunks_exact(SAMPLE_BYTES) {
                        if samples.push(Sample::from_bytes(group)).is_err() {
                            break;
                        }
                    }
                    self.fifo.advance_read(n as u8);
                }
                Ok(_) => {
                    // The burst ended early and the device's read pointer is
                    // stranded partway through a sample. Rewind it to the
                    // last reconciled position; the samples come back on the
                    // next drain.
                    self.bus
                        .write::<FifoReadPointer>(&self.fifo.read_pointer())
                        .await?;
                }
                Err(e) => {
                    // A failed burst leaves the device pointer just as
                    // unknown as a short one: same single rewind, then the
                    // error goes to the caller, whose retry policy this is.
                    self.bus
                        .write::<FifoReadPointer>(&self.fifo.read_pointer())
                        .await?;
                    return Err(e);
                }
            }
        }

        Ok(self.report(samples, lost))
    }

    fn report(&self, samples: Vec<Sample, FIFO_DEPTH>, samples_lost: u8) -> DrainReport {
        DrainReport {
            samples,
            samples_lost,
            total_samples_lost: self.fifo.total_lost(),
        }
    }

    /// Performs one die-temperature measurement.
    ///
    /// Sets TEMP_EN (the bit self-clears once the conversion finishes),
    /// polls INT_STATUS for TEMP_RDY, then reads the integer and fraction
    /// registers in a single 2-byte transfer so both halves come from the
    /// same conversion. Returns [`Max30100Error::Timeout`] if the
    /// conversion never signals completion.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use max30100_rs::{Max30100, Max30100Result};
    /// # use max30100_rs::bus::Bus;
    ///
    /// # async fn demo<B: Bus, D: DelayNs>(mut device: Max30100<B>, mut delay: D) -> Max30100Result<(), B::Error> {
    /// let temperature = device.read_temperature(&mut delay).await?;
    /// let _celsius = temperature.celsius();
    /// # Ok(()) }
    /// ```
    pub async fn read_temperature<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Max30100Result<Temperature, B::Error> {
        self.bus
            .write::<ModeConfig>(&ModeConfigFields {
                shutdown: false,
                reset: false,
                temp_en: true,
                mode: self.config.mode,
            })
            .await?;

        // Poll max 64 times; a conversion takes a few tens of ms.
        for _ in 0..64 {
            let status = self.bus.read::<IntStatus>().await?;
            if status.temperature_ready {
                return self.bus.read::<TempData>().await;
            }

            delay.delay_ms(1).await;
        }

        Err(Max30100Error::Timeout)
    }

    /// Puts the device into power-save mode via the SHDN bit.
    ///
    /// All registers retain their values, so [`wake`](Self::wake) resumes
    /// with the configuration intact.
    pub async fn shutdown(&mut self) -> Max30100Result<(), B::Error> {
        self.bus
            .write::<ModeConfig>(&ModeConfigFields {
                shutdown: true,
                reset: false,
                temp_en: false,
                mode: self.config.mode,
            })
            .await
    }

    /// Clears the SHDN bit, resuming conversions.
    pub async fn wake(&mut self) -> Max30100Result<(), B::Error> {
        self.bus
            .write::<ModeConfig>(&ModeConfigFields {
                shutdown: false,
                reset: false,
                temp_en: false,
                mode: self.config.mode,
            })
            .await
    }

    /// The driver's FIFO pointer mirror and loss counters.
    pub fn fifo_state(&self) -> &FifoState {
        &self.fifo
    }

    /// Samples lost to FIFO overflow over the lifetime of this instance.
    pub fn overflow_count(&self) -> u64 {
        self.fifo.total_lost()
    }

    /// The configuration currently applied to the device.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Consumes the driver, returning the bus it was built on.
    pub fn release(self) -> B {
        self.bus
    }
}

/// Represents the interrupt sources available on the MAX30100 device.
///
/// # Examples
/// ```rust
/// use max30100_rs::Interrupts;
///
/// // FIFO almost full and temperature ready, nothing else.
/// let interrupts = Interrupts::new().fifo_almost_full().temperature_ready();
///
/// // Every source.
/// let interrupts = Interrupts::all();
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Interrupts(u8);

impl Interrupts {
    const FIFO_ALMOST_FULL: u8 = 1 << 7;
    const TEMPERATURE_READY: u8 = 1 << 6;
    const HEART_RATE_READY: u8 = 1 << 5;
    const SPO2_READY: u8 = 1 << 4;

    /// Creates a new instance with no interrupts chosen.
    pub fn new() -> Self {
        Self(0)
    }

    /// Every interrupt source the part has.
    pub fn all() -> Self {
        Self(Self::FIFO_ALMOST_FULL | Self::TEMPERATURE_READY | Self::HEART_RATE_READY | Self::SPO2_READY)
    }

    /// Add the FIFO almost full interrupt to this set.
    pub fn fifo_almost_full(mut self) -> Self {
        self.0 |= Self::FIFO_ALMOST_FULL;

        self
    }

    /// Add the temperature ready interrupt to this set.
    pub fn temperature_ready(mut self) -> Self {
        self.0 |= Self::TEMPERATURE_READY;

        self
    }

    /// Add the heart-rate data ready interrupt to this set.
    pub fn heart_rate_ready(mut self) -> Self {
        self.0 |= Self::HEART_RATE_READY;

        self
    }

    /// Add the SpO2 data ready interrupt to this set.
    ///
    /// Only meaningful with the SpO2 channel enabled; configuration
    /// validation rejects this source in heart-rate only mode.
    pub fn spo2_ready(mut self) -> Self {
        self.0 |= Self::SPO2_READY;

        self
    }

    /// Remove all interrupts from the set.
    pub fn none(mut self) -> Self {
        self.0 = 0;

        self
    }

    pub(crate) fn is_spo2_ready_set(&self) -> bool {
        self.0 & Self::SPO2_READY != 0
    }
}

impl Default for Interrupts {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Interrupts> for IntEnableCfg {
    fn from(ints: Interrupts) -> Self {
        IntEnableCfg {
            fifo_almost_full_en: ints.0 & Interrupts::FIFO_ALMOST_FULL != 0,
            temperature_ready_en: ints.0 & Interrupts::TEMPERATURE_READY != 0,
            heart_rate_ready_en: ints.0 & Interrupts::HEART_RATE_READY != 0,
            spo2_ready_en: ints.0 & Interrupts::SPO2_READY != 0,
        }
    }
}

impl From<IntEnableCfg> for Interrupts {
    fn from(cfg: IntEnableCfg) -> Self {
        let mut ints = Interrupts::new();
        if cfg.fifo_almost_full_en {
            ints = ints.fifo_almost_full();
        }
        if cfg.temperature_ready_en {
            ints = ints.temperature_ready();
        }
        if cfg.heart_rate_ready_en {
            ints = ints.heart_rate_ready();
        }
        if cfg.spo2_ready_en {
            ints = ints.spo2_ready();
        }

        ints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBus, FakeDelay};

    fn ready_bus() -> FakeBus<10> {
        let mut bus: FakeBus<10> = FakeBus::new();
        bus.with_response::<IntStatus>(&[0x01]);
        bus.with_response::<FifoWritePointer>(&[0]);
        bus.with_response::<FifoReadPointer>(&[0]);
        bus
    }

    /// 4 bytes per sample: IR = 0x0100 + i, RED = 0x0200 + i.
    fn fifo_bytes<const LEN: usize>(first_sample: usize) -> [u8; LEN] {
        let mut raw = [0u8; LEN];
        for (i, group) in raw.chunks_exact_mut(SAMPLE_BYTES).enumerate() {
            let index = (first_sample + i) as u16;
            group[..2].copy_from_slice(&(0x0100 + index).to_be_bytes());
            group[2..].copy_from_slice(&(0x0200 + index).to_be_bytes());
        }
        raw
    }

    #[tokio::test]
    async fn max30100_init_applies_configuration_with_mode_last() {
        let bus = ready_bus();

        let device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let bus = device.release();
        let writes = bus.writes();

        // Soft reset first, then interrupt enable, SpO2, LED, and the mode
        // register strictly last.
        assert_eq!(
            &[
                (ModeConfig::ADDR, 0b0100_0011),
                (IntEnable::ADDR, 0x00),
                (SpO2Config::ADDR, 0b0100_0111),
                (LedConfig::ADDR, 0x8F),
                (ModeConfig::ADDR, 0b0000_0011),
            ][..],
            writes
        );
    }

    #[tokio::test]
    async fn max30100_init_fails_without_power_ready() {
        let mut bus: FakeBus<10> = FakeBus::new();
        bus.with_response::<IntStatus>(&[0x00]);

        let result = Max30100::new(bus, Configuration::default(), &mut FakeDelay {}).await;

        assert!(matches!(result, Err(Max30100Error::NotConnected)));
    }

    #[tokio::test]
    async fn max30100_rejects_invalid_configuration_before_bus_traffic() {
        let bus = ready_bus();
        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let invalid = Configuration::default()
            .sample_rate(crate::register::spo2_config::SampleRate::Sps1000)
            .pulse_width(crate::register::spo2_config::LedPulseWidth::Us1600);

        let result = device.apply_configuration(&invalid).await;
        assert!(matches!(result, Err(Max30100Error::Config(_))));

        let bus = device.release();
        // Only the five initialization writes; the rejected configuration
        // never reached the bus.
        assert_eq!(5, bus.writes().len());
    }

    #[tokio::test]
    async fn max30100_drain_empty_fifo() {
        let mut bus = ready_bus();
        bus.with_any_response::<OverflowCounter>();

        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let report = device.drain(16).await.unwrap();
        assert!(report.samples.is_empty());
        assert_eq!(0, report.samples_lost);
    }

    #[tokio::test]
    async fn max30100_drain_returns_all_available_samples() {
        let mut bus = ready_bus();
        bus.with_response::<FifoWritePointer>(&[5]);
        bus.with_response::<OverflowCounter>(&[0]);
        bus.with_burst_response(FifoData::ADDR, &fifo_bytes::<20>(0));

        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let report = device.drain(16).await.unwrap();

        assert_eq!(5, report.samples.len());
        assert_eq!(Sample { ir: 0x0102, red: 0x0202 }, report.samples[2]);
        assert_eq!(0, report.samples_lost);
        assert_eq!(
            device.fifo_state().write_pointer(),
            device.fifo_state().read_pointer()
        );
    }

    #[tokio::test]
    async fn max30100_drain_respects_max_samples() {
        let mut bus = ready_bus();
        bus.with_response::<FifoWritePointer>(&[5]);
        bus.with_response::<OverflowCounter>(&[0]);
        // First call takes 2 samples (8 bytes), the second the remaining 3.
        bus.with_burst_response(FifoData::ADDR, &fifo_bytes::<8>(0));
        bus.with_burst_response(FifoData::ADDR, &fifo_bytes::<12>(2));

        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let report = device.drain(2).await.unwrap();
        assert_eq!(2, report.samples.len());
        assert_eq!(2, device.fifo_state().read_pointer());

        let report = device.drain(16).await.unwrap();
        assert_eq!(3, report.samples.len());
        assert_eq!(Sample { ir: 0x0102, red: 0x0202 }, report.samples[0]);
        assert_eq!(5, device.fifo_state().read_pointer());
    }

    #[tokio::test]
    async fn max30100_drain_partial_burst_rewinds_read_pointer() {
        let mut bus = ready_bus();
        bus.with_response::<FifoWritePointer>(&[5]);
        bus.with_response::<OverflowCounter>(&[0]);
        bus.with_short_burst(FifoData::ADDR, 20, &fifo_bytes::<10>(0));

        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let report = device.drain(16).await.unwrap();

        assert!(report.samples.is_empty());
        assert_eq!(0, device.fifo_state().read_pointer());

        let bus = device.release();
        let mut rewinds = bus
            .writes()
            .iter()
            .filter(|(addr, _)| *addr == FifoReadPointer::ADDR);
        assert_eq!(Some(&(FifoReadPointer::ADDR, 0)), rewinds.next());
        assert_eq!(None, rewinds.next());
    }

    #[tokio::test]
    async fn max30100_drain_failed_burst_rewinds_and_propagates() {
        let mut bus = ready_bus();
        bus.with_response::<FifoWritePointer>(&[5]);
        bus.with_response::<OverflowCounter>(&[0]);
        bus.with_burst_failure(FifoData::ADDR, 20);

        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let result = device.drain(16).await;
        assert!(matches!(result, Err(Max30100Error::Bus(()))));
        assert_eq!(0, device.fifo_state().read_pointer());

        let bus = device.release();
        assert_eq!(
            1,
            bus.writes()
                .iter()
                .filter(|(addr, _)| *addr == FifoReadPointer::ADDR)
                .count()
        );
    }

    #[tokio::test]
    async fn max30100_drain_zero_touches_no_bus() {
        // Neither OVF_COUNTER nor FIFO_DATA is mocked; any bus access from
        // drain(0) would panic the fake.
        let bus = ready_bus();

        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let report = device.drain(0).await.unwrap();
        assert!(report.samples.is_empty());
    }

    #[tokio::test]
    async fn max30100_drain_full_fifo_with_overflow() {
        let mut bus = ready_bus();
        // Write and read pointer collide while the chip reports loss: the
        // FIFO is full, not empty.
        bus.with_response::<OverflowCounter>(&[15]);
        bus.with_burst_response(FifoData::ADDR, &fifo_bytes::<64>(0));

        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let report = device.drain(16).await.unwrap();

        assert_eq!(16, report.samples.len());
        assert_eq!(15, report.samples_lost);
        assert_eq!(15, report.total_samples_lost);
        assert_eq!(15, device.overflow_count());
    }

    #[tokio::test]
    async fn max30100_read_temperature() {
        let mut bus: FakeBus<10> = FakeBus::new();
        // PWR_RDY for startup, TEMP_RDY for the conversion poll.
        bus.with_response::<IntStatus>(&[0x41]);
        bus.with_response::<FifoWritePointer>(&[0]);
        bus.with_response::<FifoReadPointer>(&[0]);
        bus.with_response::<TempData>(&[0x1A, 0x04]);

        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let temperature = device.read_temperature(&mut FakeDelay {}).await.unwrap();
        assert_eq!(26.25, temperature.celsius());

        let bus = device.release();
        // The one-shot TEMP_EN trigger, with the operating mode preserved.
        assert!(bus.writes().contains(&(ModeConfig::ADDR, 0b0000_1011)));
    }

    #[tokio::test]
    async fn max30100_read_temperature_times_out() {
        let bus = ready_bus();

        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        let result = device.read_temperature(&mut FakeDelay {}).await;
        assert!(matches!(result, Err(Max30100Error::Timeout)));
    }

    #[tokio::test]
    async fn max30100_shutdown_and_wake_preserve_mode() {
        let bus = ready_bus();

        let mut device = Max30100::new(bus, Configuration::default(), &mut FakeDelay {})
            .await
            .unwrap();

        device.shutdown().await.unwrap();
        device.wake().await.unwrap();

        let bus = device.release();
        let writes = bus.writes();
        assert_eq!((ModeConfig::ADDR, 0b1000_0011), writes[writes.len() - 2]);
        assert_eq!((ModeConfig::ADDR, 0b0000_0011), writes[writes.len() - 1]);
    }

    #[test]
    fn interrupt_enable_round_trips() {
        for set in [
            Interrupts::new(),
            Interrupts::new().fifo_almost_full().temperature_ready(),
            Interrupts::new().heart_rate_ready(),
            Interrupts::all(),
        ] {
            let mut buffer = [0u8; 1];
            IntEnable::encode(&IntEnableCfg::from(set), &mut buffer);
            let decoded = Interrupts::from(IntEnable::decode(&buffer).unwrap());
            assert_eq!(set, decoded);
        }
    }
}
