use crate::args::CubeFaceLayout;
use crate::resource::dds::block::{mip_chain_size, DecodedBlock};
use crate::resource::dds::format::CompressionFormat;
use crate::resource::dds::header::{DdsHeader, FourCC};

pub mod block;
pub mod format;
pub mod header;
#[cfg(test)]
pub mod testing;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DdsError {
    #[error("The DDS buffer is too small (required={required}): {actual} bytes")]
    Truncated { required: usize, actual: usize },

    #[error("Invalid magic number in DDS header: {0:?}")]
    InvalidMagic([u8; 4]),

    #[error("Unsupported format, must contain a FourCC code (pixel format flags={0:#x})")]
    MissingFourCC(u32),

    #[error("Unsupported FourCC code: {0}")]
    UnsupportedFourCC(FourCC),

    #[error("The DDS header declares invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Compressed image at offset {offset} with length {length} exceeds the DDS buffer: {available} bytes")]
    OutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },
}

/// Where the six face images come from once a layout is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceSource {
    /// Six sequential images, each followed by its own mip chain.
    PerFace,
    /// The base image is reused for every face.
    Shared,
}

impl FaceSource {
    pub fn resolve(layout: CubeFaceLayout, header: &DdsHeader) -> Self {
        match layout {
            CubeFaceLayout::PerFace => FaceSource::PerFace,
            CubeFaceLayout::Shared => FaceSource::Shared,
            CubeFaceLayout::Auto if header.is_complete_cubemap() => FaceSource::PerFace,
            CubeFaceLayout::Auto => FaceSource::Shared,
        }
    }
}

/// A decoded DDS file: the header and the mip 0 image of every cubemap face,
/// in +X, -X, +Y, -Y, +Z, -Z order.
#[derive(Clone, Debug)]
pub struct DdsTexture {
    pub header: DdsHeader,
    pub format: CompressionFormat,
    pub mip_level_count: u32,
    pub data_offset: usize,
    pub face_source: FaceSource,
    pub faces: [DecodedBlock; 6],
}

impl DdsTexture {
    pub fn decode(data: &[u8], layout: CubeFaceLayout) -> Result<Self, DdsError> {
        let header = DdsHeader::parse(data)?;
        let format = CompressionFormat::from_four_cc(header.four_cc)?;
        let mip_level_count = header.mip_level_count();
        let data_offset = header.data_offset().ok_or(DdsError::OutOfBounds {
            offset: header.size as usize,
            length: 0,
            available: data.len(),
        })?;
        let face_source = FaceSource::resolve(layout, &header);

        let face_stride = match face_source {
            FaceSource::PerFace => mip_chain_size(
                header.width,
                header.height,
                mip_level_count,
                format.block_bytes(),
            )
            .ok_or(DdsError::InvalidDimensions {
                width: header.width,
                height: header.height,
            })?,
            FaceSource::Shared => 0,
        };

        let locate_face = |face_index: usize| -> Result<DecodedBlock, DdsError> {
            let offset = face_stride
                .checked_mul(face_index)
                .and_then(|face_offset| face_offset.checked_add(data_offset))
                .ok_or(DdsError::OutOfBounds {
                    offset: data_offset,
                    length: face_stride,
                    available: data.len(),
                })?;

            DecodedBlock::locate(data, offset, header.width, header.height, format)
        };

        let faces = [
            locate_face(0)?,
            locate_face(1)?,
            locate_face(2)?,
            locate_face(3)?,
            locate_face(4)?,
            locate_face(5)?,
        ];

        log::debug!(
            "Decoded DDS texture: {}x{} {} ({:?}, {} declared mip levels, data offset {})",
            header.width,
            header.height,
            header.four_cc,
            face_source,
            mip_level_count,
            data_offset,
        );

        Ok(Self {
            header,
            format,
            mip_level_count,
            data_offset,
            face_source,
            faces,
        })
    }
}
