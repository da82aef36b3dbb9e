use byteorder::{ByteOrder, LittleEndian};

use crate::resource::dds::block::compressed_size;
use crate::resource::dds::header::{Caps2, DdsFlags, FourCC, PixelFormatFlags, DDS_MAGIC};

/// Builds synthetic DDS files. Every face image is filled with a byte that
/// identifies its face and mip level, so uploads can be told apart.
pub struct DdsFileBuilder {
    four_cc: FourCC,
    width: u32,
    height: u32,
    flags: DdsFlags,
    pixel_format_flags: PixelFormatFlags,
    caps2: Caps2,
    declared_mipmap_count: u32,
    stored_mip_levels: u32,
    stored_faces: u32,
}

impl DdsFileBuilder {
    pub fn new(four_cc: FourCC, width: u32, height: u32) -> Self {
        Self {
            four_cc,
            width,
            height,
            flags: DdsFlags::CAPS
                | DdsFlags::HEIGHT
                | DdsFlags::WIDTH
                | DdsFlags::PIXEL_FORMAT
                | DdsFlags::LINEAR_SIZE,
            pixel_format_flags: PixelFormatFlags::FOUR_CC,
            caps2: Caps2::empty(),
            declared_mipmap_count: 0,
            stored_mip_levels: 1,
            stored_faces: 1,
        }
    }

    pub fn flags(mut self, flags: DdsFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn pixel_format_flags(mut self, pixel_format_flags: PixelFormatFlags) -> Self {
        self.pixel_format_flags = pixel_format_flags;
        self
    }

    pub fn declared_mipmap_count(mut self, declared_mipmap_count: u32) -> Self {
        self.declared_mipmap_count = declared_mipmap_count;
        self
    }

    /// Declares and stores a full cubemap with `mip_levels` levels per face.
    pub fn cubemap(mut self, mip_levels: u32) -> Self {
        self.caps2 = Caps2::CUBEMAP_ALL_FACES;
        self.stored_faces = 6;
        self.stored_mip_levels = mip_levels;
        if mip_levels > 1 {
            self.flags |= DdsFlags::MIPMAP_COUNT;
            self.declared_mipmap_count = mip_levels;
        }
        self
    }

    pub fn caps2(mut self, caps2: Caps2) -> Self {
        self.caps2 = caps2;
        self
    }

    pub fn stored_faces(mut self, stored_faces: u32) -> Self {
        self.stored_faces = stored_faces;
        self
    }

    pub fn block_bytes(&self) -> usize {
        match self.four_cc {
            FourCC::DXT1 => 8,
            _ => 16,
        }
    }

    pub fn fill_byte(face_index: u32, mip_level: u32) -> u8 {
        (face_index * 16 + mip_level + 1) as u8
    }

    pub fn build(&self) -> Vec<u8> {
        let mut words = [0_u32; 32];
        words[0] = DDS_MAGIC;
        words[1] = 124;
        words[2] = self.flags.bits();
        words[3] = self.height;
        words[4] = self.width;
        words[5] = compressed_size(self.width, self.height, self.block_bytes()).unwrap_or(0) as u32;
        words[7] = self.declared_mipmap_count;
        words[19] = 32;
        words[20] = self.pixel_format_flags.bits();
        words[21] = u32::from_le_bytes(self.four_cc.0);
        words[27] = 0x1000;
        words[28] = self.caps2.bits();

        let mut data = vec![0_u8; words.len() * 4];
        LittleEndian::write_u32_into(&words, &mut data);

        for face_index in 0..self.stored_faces {
            for mip_level in 0..self.stored_mip_levels {
                let width = (self.width >> mip_level).max(1);
                let height = (self.height >> mip_level).max(1);
                let level_size = compressed_size(width, height, self.block_bytes()).unwrap_or(0);
                data.extend(std::iter::repeat(Self::fill_byte(face_index, mip_level)).take(level_size));
            }
        }

        data
    }
}
