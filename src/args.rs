#[derive(Default)]
pub struct Args {
    pub dds: Option<String>,
    pub face_layout: CubeFaceLayout,
}

/// How the six cubemap faces are read from a DDS file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CubeFaceLayout {
    /// Per-face when the header declares a complete cubemap, shared otherwise.
    #[default]
    Auto,
    /// Six images stored one after another, each with its own mip chain.
    PerFace,
    /// The first image is uploaded to all six faces.
    Shared,
}
