use anyhow::Result;

use crate::resource::cubemap::{CubeFace, CubeMapLoader};

/// Receives one compressed image per cubemap face.
pub trait FaceUploadTarget {
    fn upload_face(&mut self, face: CubeFace, mip_level: u32, width: u32, height: u32, data: &[u8]);
}

/// Uploads the base level of every face in +X, -X, +Y, -Y, +Z, -Z order and
/// returns the number of faces written.
pub fn upload_cubemap_faces(
    loader: &impl CubeMapLoader,
    target: &mut impl FaceUploadTarget,
) -> Result<usize> {
    let (width, height) = loader.face_dimensions();

    for face in CubeFace::ALL {
        target.upload_face(face, 0, width, height, loader.load_face(face)?);
    }

    Ok(CubeFace::ALL.len())
}
