use crate::resource::dds::header::FourCC;
use crate::resource::dds::DdsError;

/// Block-compressed formats the loader can upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompressionFormat {
    /// BC1, 8 bytes per 4x4 block.
    Dxt1,
    /// BC3, 16 bytes per 4x4 block.
    Dxt5,
}

const COMPRESSION_FORMATS: [(FourCC, CompressionFormat); 2] = [
    (FourCC::DXT1, CompressionFormat::Dxt1),
    (FourCC::DXT5, CompressionFormat::Dxt5),
];

impl CompressionFormat {
    pub fn from_four_cc(four_cc: FourCC) -> Result<Self, DdsError> {
        COMPRESSION_FORMATS
            .iter()
            .find(|(code, _)| *code == four_cc)
            .map(|(_, format)| *format)
            .ok_or(DdsError::UnsupportedFourCC(four_cc))
    }

    pub fn block_bytes(&self) -> usize {
        match self {
            CompressionFormat::Dxt1 => 8,
            CompressionFormat::Dxt5 => 16,
        }
    }

    pub fn four_cc(&self) -> FourCC {
        match self {
            CompressionFormat::Dxt1 => FourCC::DXT1,
            CompressionFormat::Dxt5 => FourCC::DXT5,
        }
    }
}
