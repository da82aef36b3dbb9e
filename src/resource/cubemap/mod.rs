use anyhow::Result;

use crate::resource::dds::format::CompressionFormat;

pub mod dds;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Array layer of the face in a cube texture.
    pub fn layer(&self) -> u32 {
        *self as u32
    }
}

pub trait CubeMapLoader {
    fn face_dimensions(&self) -> (u32, u32);
    fn format(&self) -> CompressionFormat;
    fn mip_level_count(&self) -> u32;
    fn load_face(&self, face: CubeFace) -> Result<&[u8]>;
}
