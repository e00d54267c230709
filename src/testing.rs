use crate::bus::{Bus, MAX_REG_BYTES};
use crate::error::Max30100Error;
use crate::register::{Readable, Writable};
use embedded_hal_async::delay::DelayNs;
use heapless::{LinearMap, Vec};

#[derive(Debug)]
enum RegisterValue {
    Data { bytes: [u8; MAX_REG_BYTES], len: usize },
    /// A burst transfer that delivers fewer bytes than were requested.
    Short { bytes: [u8; MAX_REG_BYTES], len: usize },
    Fail,
    DontCare,
}

/// A register mock keyed by `(address, transfer length)`.
///
/// Reads of unmocked registers panic so a test notices unexpected bus
/// traffic. Writes always succeed and are logged in order, so tests can
/// assert on transaction sequence and count.
pub struct FakeBus<const N: usize> {
    regs: LinearMap<(u8, usize), RegisterValue, N>,
    writes: Vec<(u8, u8), 32>,
    scratch: [u8; MAX_REG_BYTES],
}

pub struct FakeDelay {}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, _: u32) {}
}

impl<const N: usize> FakeBus<N> {
    pub fn new() -> Self {
        FakeBus {
            regs: LinearMap::new(),
            writes: Vec::new(),
            scratch: [0u8; MAX_REG_BYTES],
        }
    }

    pub fn with_response<R: Readable>(&mut self, data: &[u8]) {
        let mut register_value = [0u8; MAX_REG_BYTES];
        register_value[..data.len()].copy_from_slice(data);
        self.regs
            .insert((R::ADDR, R::N), RegisterValue::Data { bytes: register_value, len: data.len() })
            .unwrap();
    }

    pub fn with_any_response<R: Readable>(&mut self) {
        self.regs.insert((R::ADDR, R::N), RegisterValue::DontCare).unwrap();
    }

    /// Mocks a complete burst of `data.len()` bytes from an
    /// auto-incrementing port.
    pub fn with_burst_response(&mut self, addr: u8, data: &[u8]) {
        let mut register_value = [0u8; MAX_REG_BYTES];
        register_value[..data.len()].copy_from_slice(data);
        self.regs
            .insert((addr, data.len()), RegisterValue::Data { bytes: register_value, len: data.len() })
            .unwrap();
    }

    /// Mocks a burst that is requested at `requested` bytes but only
    /// delivers `data` before the transfer ends.
    pub fn with_short_burst(&mut self, addr: u8, requested: usize, data: &[u8]) {
        let mut register_value = [0u8; MAX_REG_BYTES];
        register_value[..data.len()].copy_from_slice(data);
        self.regs
            .insert((addr, requested), RegisterValue::Short { bytes: register_value, len: data.len() })
            .unwrap();
    }

    /// Mocks a burst of `requested` bytes that fails outright.
    pub fn with_burst_failure(&mut self, addr: u8, requested: usize) {
        self.regs.insert((addr, requested), RegisterValue::Fail).unwrap();
    }

    /// Every register write issued through this bus, in order:
    /// `(address, value)`.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }
}

impl<const N: usize> Bus for FakeBus<N> {
    type Error = ();

    async fn read<R: Readable>(&mut self) -> Result<R::Out, Max30100Error<Self::Error>> {
        if let Some(value) = self.regs.get(&(R::ADDR, R::N)) {
            match value {
                RegisterValue::Data { bytes, len } => {
                    if *len == R::N {
                        return Ok(R::decode(&bytes[..R::N]).unwrap());
                    }
                }
                RegisterValue::DontCare => {
                    let data = &self.scratch[0..R::N];
                    return Ok(R::decode(data).unwrap());
                }
                RegisterValue::Fail => return Err(Max30100Error::Bus(())),
                RegisterValue::Short { .. } => {}
            }
        }

        panic!("No mocked value for register 0x{:x} and length {}", R::ADDR, R::N)
    }

    async fn write<W: Writable>(&mut self, value: &W::In) -> Result<(), Max30100Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES];
        W::encode(value, &mut buf[..W::N]);
        self.writes.push((W::ADDR, buf[0])).unwrap();

        Ok(())
    }

    async fn read_burst(&mut self, addr: u8, buf: &mut [u8]) -> Result<usize, Max30100Error<Self::Error>> {
        if let Some(value) = self.regs.get(&(addr, buf.len())) {
            match value {
                RegisterValue::Data { bytes, len } if *len == buf.len() => {
                    buf.copy_from_slice(&bytes[..*len]);
                    return Ok(*len);
                }
                RegisterValue::Short { bytes, len } => {
                    buf[..*len].copy_from_slice(&bytes[..*len]);
                    return Ok(*len);
                }
                RegisterValue::Fail => return Err(Max30100Error::Bus(())),
                _ => {}
            }
        }

        panic!("No mocked burst for register 0x{:x} and length {}", addr, buf.len())
    }
}
