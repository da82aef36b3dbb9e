use byteorder::{ByteOrder, LittleEndian};

use crate::resource::dds::DdsError;

/// "DDS " read as a little-endian word.
pub const DDS_MAGIC: u32 = 0x2053_4444;

/// Magic word plus the 124 byte header.
pub const DDS_FILE_HEADER_SIZE: usize = 128;

const HEADER_WORD_COUNT: usize = 31;

const OFFSET_MAGIC: usize = 0;
const OFFSET_SIZE: usize = 1;
const OFFSET_FLAGS: usize = 2;
const OFFSET_HEIGHT: usize = 3;
const OFFSET_WIDTH: usize = 4;
const OFFSET_PITCH_OR_LINEAR_SIZE: usize = 5;
const OFFSET_DEPTH: usize = 6;
const OFFSET_MIPMAP_COUNT: usize = 7;
const OFFSET_PIXEL_FORMAT_FLAGS: usize = 20;
const OFFSET_FOUR_CC: usize = 21;
const OFFSET_CAPS: usize = 27;
const OFFSET_CAPS2: usize = 28;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DdsFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        const PITCH = 0x8;
        const PIXEL_FORMAT = 0x1000;
        const MIPMAP_COUNT = 0x20000;
        const LINEAR_SIZE = 0x80000;
        const DEPTH = 0x800000;
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PixelFormatFlags: u32 {
        const ALPHA_PIXELS = 0x1;
        const ALPHA = 0x2;
        const FOUR_CC = 0x4;
        const RGB = 0x40;
        const YUV = 0x200;
        const LUMINANCE = 0x20000;
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Caps2: u32 {
        const CUBEMAP = 0x200;
        const CUBEMAP_POSITIVE_X = 0x400;
        const CUBEMAP_NEGATIVE_X = 0x800;
        const CUBEMAP_POSITIVE_Y = 0x1000;
        const CUBEMAP_NEGATIVE_Y = 0x2000;
        const CUBEMAP_POSITIVE_Z = 0x4000;
        const CUBEMAP_NEGATIVE_Z = 0x8000;
        const CUBEMAP_ALL_FACES = Self::CUBEMAP.bits()
            | Self::CUBEMAP_POSITIVE_X.bits()
            | Self::CUBEMAP_NEGATIVE_X.bits()
            | Self::CUBEMAP_POSITIVE_Y.bits()
            | Self::CUBEMAP_NEGATIVE_Y.bits()
            | Self::CUBEMAP_POSITIVE_Z.bits()
            | Self::CUBEMAP_NEGATIVE_Z.bits();
        const VOLUME = 0x200000;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const DXT1: Self = Self(*b"DXT1");
    pub const DXT5: Self = Self(*b"DXT5");
}

impl From<u32> for FourCC {
    fn from(value: u32) -> Self {
        Self(value.to_le_bytes())
    }
}

impl std::fmt::Display for FourCC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// The fields of a DDS header that the loader cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DdsHeader {
    /// Declared header size, normally 124.
    pub size: u32,
    pub flags: DdsFlags,
    pub height: u32,
    pub width: u32,
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    pub mipmap_count: u32,
    pub pixel_format_flags: PixelFormatFlags,
    pub four_cc: FourCC,
    pub caps: u32,
    pub caps2: Caps2,
}

impl DdsHeader {
    /// Reads the magic word and header from the start of `data`.
    ///
    /// Only the magic and the presence of a FourCC code are validated here,
    /// the code itself is checked when it is mapped to a compression format.
    pub fn parse(data: &[u8]) -> Result<Self, DdsError> {
        if data.len() < DDS_FILE_HEADER_SIZE {
            return Err(DdsError::Truncated {
                required: DDS_FILE_HEADER_SIZE,
                actual: data.len(),
            });
        }

        let mut words = [0_u32; HEADER_WORD_COUNT];
        LittleEndian::read_u32_into(&data[..HEADER_WORD_COUNT * 4], &mut words);

        if words[OFFSET_MAGIC] != DDS_MAGIC {
            return Err(DdsError::InvalidMagic(words[OFFSET_MAGIC].to_le_bytes()));
        }

        let pixel_format_flags = PixelFormatFlags::from_bits_retain(words[OFFSET_PIXEL_FORMAT_FLAGS]);

        if !pixel_format_flags.contains(PixelFormatFlags::FOUR_CC) {
            return Err(DdsError::MissingFourCC(pixel_format_flags.bits()));
        }

        let header = Self {
            size: words[OFFSET_SIZE],
            flags: DdsFlags::from_bits_retain(words[OFFSET_FLAGS]),
            height: words[OFFSET_HEIGHT],
            width: words[OFFSET_WIDTH],
            pitch_or_linear_size: words[OFFSET_PITCH_OR_LINEAR_SIZE],
            depth: words[OFFSET_DEPTH],
            mipmap_count: words[OFFSET_MIPMAP_COUNT],
            pixel_format_flags,
            four_cc: words[OFFSET_FOUR_CC].into(),
            caps: words[OFFSET_CAPS],
            caps2: Caps2::from_bits_retain(words[OFFSET_CAPS2]),
        };

        if header.width == 0 || header.height == 0 {
            return Err(DdsError::InvalidDimensions {
                width: header.width,
                height: header.height,
            });
        }

        Ok(header)
    }

    pub fn mip_level_count(&self) -> u32 {
        match self.flags.contains(DdsFlags::MIPMAP_COUNT) {
            true => self.mipmap_count.max(1),
            false => 1,
        }
    }

    /// Byte offset of the first pixel, counted from the magic word.
    pub fn data_offset(&self) -> Option<usize> {
        (self.size as usize).checked_add(4)
    }

    pub fn is_complete_cubemap(&self) -> bool {
        self.caps2.contains(Caps2::CUBEMAP_ALL_FACES)
    }
}

#[cfg(test)]
mod tests {
    use crate::resource::dds::testing::DdsFileBuilder;

    use super::*;

    #[test]
    fn parses_header_fields() -> Result<(), DdsError> {
        let data = DdsFileBuilder::new(FourCC::DXT5, 128, 64).build();
        let header = DdsHeader::parse(&data)?;

        assert_eq!(header.size, 124);
        assert_eq!(header.width, 128);
        assert_eq!(header.height, 64);
        assert_eq!(header.four_cc, FourCC::DXT5);
        assert_eq!(header.data_offset(), Some(DDS_FILE_HEADER_SIZE));
        assert!(!header.is_complete_cubemap());

        Ok(())
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = DdsFileBuilder::new(FourCC::DXT1, 4, 4).build();
        data[..4].copy_from_slice(b"PNG ");

        match DdsHeader::parse(&data) {
            Err(DdsError::InvalidMagic(magic)) => assert_eq!(&magic, b"PNG "),
            other => panic!("expected invalid magic, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_four_cc_flag() {
        let data = DdsFileBuilder::new(FourCC::DXT1, 4, 4)
            .pixel_format_flags(PixelFormatFlags::RGB)
            .build();

        assert!(matches!(
            DdsHeader::parse(&data),
            Err(DdsError::MissingFourCC(0x40))
        ));
    }

    #[test]
    fn rejects_short_buffer() {
        let data = DdsFileBuilder::new(FourCC::DXT1, 4, 4).build();

        assert!(matches!(
            DdsHeader::parse(&data[..100]),
            Err(DdsError::Truncated {
                required: 128,
                actual: 100
            })
        ));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let data = DdsFileBuilder::new(FourCC::DXT1, 0, 4).build();

        assert!(matches!(
            DdsHeader::parse(&data),
            Err(DdsError::InvalidDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn mipmap_count_ignored_without_flag() -> Result<(), DdsError> {
        let data = DdsFileBuilder::new(FourCC::DXT5, 128, 128)
            .declared_mipmap_count(8)
            .build();

        assert_eq!(DdsHeader::parse(&data)?.mip_level_count(), 1);

        Ok(())
    }

    #[test]
    fn mipmap_count_used_with_flag() -> Result<(), DdsError> {
        let with_count = DdsFileBuilder::new(FourCC::DXT5, 128, 128)
            .declared_mipmap_count(8)
            .flags(DdsFlags::MIPMAP_COUNT)
            .build();
        let with_zero = DdsFileBuilder::new(FourCC::DXT5, 128, 128)
            .declared_mipmap_count(0)
            .flags(DdsFlags::MIPMAP_COUNT)
            .build();

        assert_eq!(DdsHeader::parse(&with_count)?.mip_level_count(), 8);
        assert_eq!(DdsHeader::parse(&with_zero)?.mip_level_count(), 1);

        Ok(())
    }

    #[test]
    fn partial_face_bits_are_not_a_complete_cubemap() -> Result<(), DdsError> {
        let data = DdsFileBuilder::new(FourCC::DXT1, 4, 4)
            .caps2(Caps2::CUBEMAP | Caps2::CUBEMAP_POSITIVE_X | Caps2::CUBEMAP_NEGATIVE_X)
            .build();

        assert!(!DdsHeader::parse(&data)?.is_complete_cubemap());

        Ok(())
    }

    #[test]
    fn four_cc_displays_as_text() {
        assert_eq!(FourCC::from(0x3154_5844).to_string(), "DXT1");
    }
}
