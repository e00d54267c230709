//! The transport seam between the driver core and the physical I2C bus.
//!
//! Everything above this module speaks in typed register markers; everything
//! below it is `embedded_hal_async`. Tests substitute
//! [`FakeBus`](crate::testing::FakeBus) here.

use core::future::Future;

use crate::error::Max30100Error;
use crate::register::{Readable, Writable};
use embedded_hal::i2c::SevenBitAddress;

/// The MAX30100's fixed 7-bit bus address.
pub const DEVICE_ADDRESS: SevenBitAddress = 0x57;

/// The largest transfer the driver performs in one transaction: a full
/// 16-sample FIFO burst.
pub const MAX_REG_BYTES: usize = 64;

pub trait Bus {
    type Error;

    /// Read a register (or fixed-size register block) by its typed marker.
    fn read<R: Readable>(&mut self)
        -> impl Future<Output = Result<R::Out, Max30100Error<Self::Error>>>;

    /// Write a register by its typed marker.
    fn write<W: Writable>(&mut self, value: &W::In)
        -> impl Future<Output = Result<(), Max30100Error<Self::Error>>>;

    /// Sustained read from an auto-incrementing data port.
    ///
    /// Returns the number of bytes actually transferred, which may be less
    /// than `buf.len()` if the transfer ended early. The drain protocol
    /// relies on that count to know whether the device's read pointer must
    /// be rewound.
    fn read_burst(&mut self, addr: u8, buf: &mut [u8])
        -> impl Future<Output = Result<usize, Max30100Error<Self::Error>>>;
}

pub struct I2c<I2cType> {
    i2c: I2cType,
    address: SevenBitAddress,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal_async::i2c::I2c,
{
    pub(crate) fn new(i2c: I2cType) -> Self {
        Self { i2c, address: DEVICE_ADDRESS }
    }

    /// Consumes the wrapper, returning the underlying I2C peripheral.
    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Bus for I2c<I2cType>
where
    I2cType: embedded_hal_async::i2c::I2c,
{
    type Error = <I2cType as embedded_hal_async::i2c::ErrorType>::Error;

    async fn read<R: Readable>(&mut self) -> Result<R::Out, Max30100Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES];
        self.i2c
            .write_read(self.address, &[R::ADDR], &mut buf[..R::N])
            .await
            .map_err(Max30100Error::Bus)?;

        R::decode(&buf[..R::N]).map_err(Max30100Error::UnexpectedRegisterData)
    }

    async fn write<W: Writable>(&mut self, value: &W::In) -> Result<(), Max30100Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES + 1];
        buf[0] = W::ADDR;
        W::encode(value, &mut buf[1..W::N + 1]);
        self.i2c
            .write(self.address, &buf[..W::N + 1])
            .await
            .map_err(Max30100Error::Bus)
    }

    async fn read_burst(&mut self, addr: u8, buf: &mut [u8]) -> Result<usize, Max30100Error<Self::Error>> {
        // embedded-hal I2C transfers are all-or-nothing; a short transfer
        // can only come from other Bus implementations.
        self.i2c
            .write_read(self.address, &[addr], buf)
            .await
            .map_err(Max30100Error::Bus)?;

        Ok(buf.len())
    }
}
