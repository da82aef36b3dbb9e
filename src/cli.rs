use clap::{Parser, ValueEnum};

/// A viewer that spins a cube textured with a DXT1/DXT5 compressed DDS cubemap
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the .dds file that provides the cubemap faces
    pub dds: String,

    /// How the six cubemap faces are read from the file
    #[arg(short = 'l', long, value_enum, default_value_t = FaceLayout::Auto)]
    pub face_layout: FaceLayout,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceLayout {
    /// Per-face if the file declares a complete cubemap, shared otherwise
    Auto,
    /// Read six sequential face images
    PerFace,
    /// Upload the first image to every face
    Shared,
}

impl From<FaceLayout> for dds_cube_viewer::args::CubeFaceLayout {
    fn from(value: FaceLayout) -> Self {
        match value {
            FaceLayout::Auto => dds_cube_viewer::args::CubeFaceLayout::Auto,
            FaceLayout::PerFace => dds_cube_viewer::args::CubeFaceLayout::PerFace,
            FaceLayout::Shared => dds_cube_viewer::args::CubeFaceLayout::Shared,
        }
    }
}
