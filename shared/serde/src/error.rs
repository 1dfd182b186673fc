use thiserror::Error;

/// Errors that can occur while reading serialized data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The buffer ended before the value was fully read
    #[error("Reached end of buffer at bit {bit_index}. The payload is truncated")]
    EndOfBuffer { bit_index: usize },

    /// A string payload was not valid UTF-8
    #[error("String of {length} bytes is not valid UTF-8")]
    InvalidUtf8 { length: usize },

    /// A value does not fit in the declared number of bits
    #[error("Value {value} does not fit in {bits} bits")]
    IntegerOutOfRange { value: u64, bits: u8 },
}
