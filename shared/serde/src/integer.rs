use crate::{BitReader, BitWrite, Serde, SerdeErr};

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<true, BITS>;

/// An unsigned integer written with exactly `BITS` bits, or, when `VARIABLE`
/// is set, as a chain of `BITS`-sized groups each preceded by a continue bit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const VARIABLE: bool, const BITS: u8> {
    value: u64,
}

impl<const VARIABLE: bool, const BITS: u8> SerdeInteger<VARIABLE, BITS> {
    /// # Panics
    ///
    /// Panics if a fixed-width integer is given a value that does not fit in
    /// `BITS` bits. For a non-panicking version, use `try_new`.
    pub fn new<T: Into<u64>>(value: T) -> Self {
        match Self::try_new(value) {
            Ok(integer) => integer,
            Err(err) => panic!("can't create SerdeInteger: {}", err),
        }
    }

    pub fn try_new<T: Into<u64>>(value: T) -> Result<Self, SerdeErr> {
        let value = value.into();
        if !VARIABLE && BITS < 64 && value >= (1_u64 << BITS) {
            return Err(SerdeErr::IntegerOutOfRange { value, bits: BITS });
        }
        Ok(Self { value })
    }

    pub fn get(&self) -> u64 {
        self.value
    }
}

impl<const VARIABLE: bool, const BITS: u8> Serde for SerdeInteger<VARIABLE, BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut value = self.value;

        if VARIABLE {
            loop {
                let proceed = BITS < 64 && value >= (1_u64 << BITS);
                writer.write_bit(proceed);
                for _ in 0..BITS {
                    writer.write_bit(value & 1 != 0);
                    value >>= 1;
                }
                if !proceed {
                    return;
                }
            }
        } else {
            for _ in 0..BITS {
                writer.write_bit(value & 1 != 0);
                value >>= 1;
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut output: u64 = 0;
        let mut shift: u32 = 0;

        loop {
            let proceed = if VARIABLE { reader.read_bit()? } else { false };

            for _ in 0..BITS {
                let bit = reader.read_bit()?;
                if shift >= 64 {
                    return Err(SerdeErr::IntegerOutOfRange {
                        value: output,
                        bits: BITS,
                    });
                }
                if bit {
                    output |= 1_u64 << shift;
                }
                shift += 1;
            }

            if !proceed {
                return Ok(Self { value: output });
            }
        }
    }
}
