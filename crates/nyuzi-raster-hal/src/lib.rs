#![no_std]

/// Abstracts the rasterizer's memory-mapped register port.
///
/// `context` selects one of the four rendering contexts and `offset` is the
/// 4-bit register offset, strobe bit included. Implementations pass both
/// through unchanged; the unit itself truncates them to their decoded widths.
pub trait RegisterPort {
    type Error: core::fmt::Debug;

    /// Write a 32-bit value to a context register.
    fn write_register(&mut self, context: u8, offset: u8, data: u32) -> Result<(), Self::Error>;

    /// Read a 32-bit value from a context register.
    ///
    /// A read with the strobe bit set has a side effect on the unit: it
    /// acknowledges the mask being read.
    fn read_register(&mut self, context: u8, offset: u8) -> Result<u32, Self::Error>;
}

impl<P: RegisterPort + ?Sized> RegisterPort for &mut P {
    type Error = P::Error;

    fn write_register(&mut self, context: u8, offset: u8, data: u32) -> Result<(), Self::Error> {
        (**self).write_register(context, offset, data)
    }

    fn read_register(&mut self, context: u8, offset: u8) -> Result<u32, Self::Error> {
        (**self).read_register(context, offset)
    }
}
