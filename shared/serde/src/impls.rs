use crate::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

impl Serde for bool {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_bit()
    }
}

impl Serde for u8 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_byte()
    }
}

impl Serde for u16 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for byte in self.to_le_bytes() {
            writer.write_byte(byte);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let bytes = [reader.read_byte()?, reader.read_byte()?];
        Ok(u16::from_le_bytes(bytes))
    }
}

impl Serde for u32 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for byte in self.to_le_bytes() {
            writer.write_byte(byte);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut bytes = [0_u8; 4];
        for byte in bytes.iter_mut() {
            *byte = reader.read_byte()?;
        }
        Ok(u32::from_le_bytes(bytes))
    }
}

impl Serde for i32 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        u32::from_le_bytes(self.to_le_bytes()).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let raw = u32::de(reader)?;
        Ok(i32::from_le_bytes(raw.to_le_bytes()))
    }
}

// IEEE-754 bits, so NaN payloads and signed zeroes survive untouched
impl Serde for f32 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.to_bits().ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(f32::from_bits(u32::de(reader)?))
    }
}

impl Serde for String {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<9>::new(self.len() as u64).ser(writer);
        for byte in self.as_bytes() {
            writer.write_byte(*byte);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = UnsignedVariableInteger::<9>::de(reader)?.get() as usize;
        let mut bytes: Vec<u8> = Vec::with_capacity(length.min(reader.bits_remaining() / 8));
        for _ in 0..length {
            bytes.push(reader.read_byte()?);
        }
        String::from_utf8(bytes).map_err(|_| SerdeErr::InvalidUtf8 { length })
    }
}
