use cruiser_sync_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedInteger};

/// How the cruiser's scan node behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanNodeOptions {
    #[default]
    Unchanged,
    Disabled,
    ContainerOnly,
    Always,
}

impl ScanNodeOptions {
    pub fn to_u8(self) -> u8 {
        match self {
            ScanNodeOptions::Unchanged => 0,
            ScanNodeOptions::Disabled => 1,
            ScanNodeOptions::ContainerOnly => 2,
            ScanNodeOptions::Always => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ScanNodeOptions::Unchanged),
            1 => Some(ScanNodeOptions::Disabled),
            2 => Some(ScanNodeOptions::ContainerOnly),
            3 => Some(ScanNodeOptions::Always),
            _ => None,
        }
    }
}

impl Serde for ScanNodeOptions {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedInteger::<2>::new(self.to_u8()).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let value = UnsignedInteger::<2>::de(reader)?.get();
        // 2 bits cover every variant
        Ok(u8::try_from(value)
            .ok()
            .and_then(ScanNodeOptions::from_u8)
            .unwrap_or_default())
    }
}
