use anyhow::Result;

use crate::error::Error;
use crate::render::upload::{upload_cubemap_faces, FaceUploadTarget};
use crate::resource::cubemap::{CubeFace, CubeMapLoader};
use crate::resource::dds::format::CompressionFormat;

pub struct CubeMap {
    #[allow(dead_code)]
    pub gpu_texture: wgpu::Texture,
    pub gpu_texture_view: wgpu::TextureView,
    pub gpu_sampler: wgpu::Sampler,
}

impl CubeMap {
    pub fn from_texture(
        gpu_texture: wgpu::Texture,
        name: &str,
        device: &wgpu::Device,
    ) -> Result<Self> {
        if gpu_texture.dimension() != wgpu::TextureDimension::D2 {
            return Err(Error::new(format!(
                "The given texture does not have the required dimension (required=D2): {:?}",
                gpu_texture.dimension(),
            ))
            .into());
        }

        if gpu_texture.depth_or_array_layers() != 6 {
            return Err(
                Error::new(
                    format!(
                        "The given texture does not have the required number of depth/array layers (required=6): {}",
                        gpu_texture.depth_or_array_layers(),
                    )
                ).into()
            );
        }

        let gpu_texture_view = gpu_texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(&format!("{name}_TEXTURE_VIEW")),
            format: Some(gpu_texture.format()),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            aspect: wgpu::TextureAspect::All,
            base_mip_level: 0,
            mip_level_count: Some(gpu_texture.mip_level_count()),
            base_array_layer: 0,
            array_layer_count: Some(6),
        });

        let gpu_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{name}_SAMPLER")),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            gpu_texture,
            gpu_texture_view,
            gpu_sampler,
        })
    }

    /// Uploads mip level 0 of every face supplied by `loader` into a new
    /// block-compressed cube texture. Callers keep a validation error scope
    /// open around this call and the bind group that samples the result.
    pub fn from_loader(
        loader: &impl CubeMapLoader,
        name: &str,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<Self> {
        if !device
            .features()
            .contains(wgpu::Features::TEXTURE_COMPRESSION_BC)
        {
            return Err(Error::new(
                "The graphics adapter does not support BC (S3TC) compressed textures",
            )
            .into());
        }

        let (width, height) = loader.face_dimensions();
        check_face_dimensions(width, height, device.limits().max_texture_dimension_2d)?;

        let format = loader.format();
        let texture_size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 6,
        };

        if loader.mip_level_count() > 1 {
            log::info!(
                "Uploading only the base level of {} declared mip levels",
                loader.mip_level_count()
            );
        }

        let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("{name}_TEXTURE")),
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: gpu_texture_format(format),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let mut upload_target = GpuFaceUploadTarget {
            gpu_texture: &gpu_texture,
            queue,
            block_bytes: format.block_bytes() as u32,
        };
        let face_count = upload_cubemap_faces(loader, &mut upload_target)?;

        queue.submit([]);

        log::info!(
            "Uploaded {face_count} {width}x{height} {} cubemap faces",
            format.four_cc()
        );

        CubeMap::from_texture(gpu_texture, name, device)
    }

    pub fn create_default_cubemap(
        name: &str,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<CubeMap> {
        let image_data: [u8; 4] = [255, 255, 255, 255];
        let image_size = wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 6,
        };

        let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("{name}_TEXTURE")),
            size: image_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for face in CubeFace::ALL {
            queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &gpu_texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: face.layer(),
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                &image_data,
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(4),
                    rows_per_image: Some(1),
                },
                wgpu::Extent3d {
                    width: 1,
                    height: 1,
                    depth_or_array_layers: 1,
                },
            );
        }

        queue.submit([]);

        CubeMap::from_texture(gpu_texture, name, device)
    }
}

pub fn gpu_texture_format(format: CompressionFormat) -> wgpu::TextureFormat {
    match format {
        CompressionFormat::Dxt1 => wgpu::TextureFormat::Bc1RgbaUnorm,
        CompressionFormat::Dxt5 => wgpu::TextureFormat::Bc3RgbaUnorm,
    }
}

struct GpuFaceUploadTarget<'a> {
    gpu_texture: &'a wgpu::Texture,
    queue: &'a wgpu::Queue,
    block_bytes: u32,
}

impl FaceUploadTarget for GpuFaceUploadTarget<'_> {
    fn upload_face(&mut self, face: CubeFace, mip_level: u32, width: u32, height: u32, data: &[u8]) {
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: self.gpu_texture,
                mip_level,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: face.layer(),
                },
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(width.div_ceil(4) * self.block_bytes),
                rows_per_image: Some(height.div_ceil(4)),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }
}

/// Rejects face sizes a cube texture cannot hold: faces must be square, made
/// of whole 4x4 blocks, and within the device's 2D texture limit.
pub fn check_face_dimensions(width: u32, height: u32, max_dimension: u32) -> Result<()> {
    if width != height {
        return Err(Error::new(format!(
            "Cubemap faces must be square: {width}x{height}"
        ))
        .into());
    }

    if width % 4 != 0 {
        return Err(Error::new(format!(
            "Compressed cubemap faces must have dimensions that are multiples of 4: {width}x{height}"
        ))
        .into());
    }

    if width > max_dimension {
        return Err(Error::new(format!(
            "Cubemap faces exceed the device texture limit (max={max_dimension}): {width}x{height}"
        ))
        .into());
    }

    Ok(())
}

/// Pops the validation scope pushed before a cubemap load and logs whatever
/// the graphics API reported. Upload failures are not fatal.
pub fn report_upload_errors(device: &wgpu::Device) {
    let error_future = device.pop_error_scope();

    cfg_if::cfg_if! {
        if #[cfg(target_arch="wasm32")] {
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(error) = error_future.await {
                    log::warn!("Graphics API error after cubemap upload: {error}");
                }
            });
        } else {
            if let Some(error) = pollster::block_on(error_future) {
                log::warn!("Graphics API error after cubemap upload: {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_compression_formats_to_bc_formats() {
        assert_eq!(
            gpu_texture_format(CompressionFormat::Dxt1),
            wgpu::TextureFormat::Bc1RgbaUnorm
        );
        assert_eq!(
            gpu_texture_format(CompressionFormat::Dxt5),
            wgpu::TextureFormat::Bc3RgbaUnorm
        );
    }

    #[test]
    fn accepts_square_block_aligned_faces() -> Result<()> {
        check_face_dimensions(128, 128, 8192)?;
        check_face_dimensions(4, 4, 8192)?;
        check_face_dimensions(2048, 2048, 2048)?;

        Ok(())
    }

    #[test]
    fn rejects_non_square_faces() {
        let error = check_face_dimensions(256, 128, 8192).unwrap_err();

        assert!(error.to_string().contains("square"));
    }

    #[test]
    fn rejects_partial_blocks() {
        assert!(check_face_dimensions(130, 130, 8192).is_err());
        assert!(check_face_dimensions(2, 2, 8192).is_err());
    }

    #[test]
    fn rejects_faces_over_device_limit() {
        assert!(check_face_dimensions(16384, 16384, 8192).is_err());
        assert!(check_face_dimensions(4096, 4096, 2048).is_err());
    }

    #[test]
    fn block_footprint_matches_block_bytes() {
        for format in [CompressionFormat::Dxt1, CompressionFormat::Dxt5] {
            let texture_format = gpu_texture_format(format);

            assert_eq!(texture_format.block_dimensions(), (4, 4));
            assert_eq!(
                texture_format.block_copy_size(None),
                Some(format.block_bytes() as u32)
            );
        }
    }
}
