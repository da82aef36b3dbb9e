use anyhow::Result;

use crate::args::CubeFaceLayout;
use crate::resource::cubemap::{CubeFace, CubeMapLoader};
use crate::resource::dds::format::CompressionFormat;
use crate::resource::dds::DdsTexture;

pub struct DdsCubeMapLoader<T: AsRef<[u8]>> {
    data: T,
    texture: DdsTexture,
}

impl<T: AsRef<[u8]>> DdsCubeMapLoader<T> {
    pub fn from_bytes(data: T, layout: CubeFaceLayout) -> Result<Self> {
        let texture = DdsTexture::decode(data.as_ref(), layout)?;

        Ok(Self { data, texture })
    }

    pub fn texture(&self) -> &DdsTexture {
        &self.texture
    }
}

impl<T: AsRef<[u8]>> CubeMapLoader for DdsCubeMapLoader<T> {
    fn face_dimensions(&self) -> (u32, u32) {
        (self.texture.header.width, self.texture.header.height)
    }

    fn format(&self) -> CompressionFormat {
        self.texture.format
    }

    fn mip_level_count(&self) -> u32 {
        self.texture.mip_level_count
    }

    fn load_face(&self, face: CubeFace) -> Result<&[u8]> {
        let block = &self.texture.faces[face.layer() as usize];

        Ok(block.bytes(self.data.as_ref())?)
    }
}
