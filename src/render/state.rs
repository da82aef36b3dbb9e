use anyhow::Result;

use crate::error::Error;
use crate::render::camera::Camera;
use crate::render::cube::CubeRenderer;
use crate::render::shader::load_shader_templates;
use crate::render::texture::DepthTexture2DPackage;

pub struct RenderSystemState {
    #[allow(dead_code)]
    pub instance: wgpu::Instance,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    #[allow(dead_code)]
    pub adapter: wgpu::Adapter,
    pub device: std::rc::Rc<wgpu::Device>,
    pub queue: std::rc::Rc<wgpu::Queue>,
    pub depth_texture: DepthTexture2DPackage,
    pub cube_renderer: CubeRenderer,
    pub camera: Camera,
    pub view_dimensions: winit::dpi::PhysicalSize<u32>,
}

impl RenderSystemState {
    pub async fn from_window(window: std::sync::Arc<winit::window::Window>) -> Result<Self> {
        let view_dimensions = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Some(adapter) => adapter,
            None => return Err(Error::new("Failed to retrieve adapter.").into()),
        };

        let required_features = adapter.features() & wgpu::Features::TEXTURE_COMPRESSION_BC;
        if required_features.is_empty() {
            log::warn!("The graphics adapter does not support BC compressed textures, DDS cubemaps cannot be displayed");
        }

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features,
                    required_limits: if cfg!(target_arch = "wasm32") {
                        wgpu::Limits::downlevel_webgl2_defaults()
                    } else {
                        wgpu::Limits::default()
                    },
                    label: None,
                    ..Default::default()
                },
                None,
            )
            .await?;

        let device = std::rc::Rc::new(device);
        let queue = std::rc::Rc::new(queue);

        let surface_caps = surface.get_capabilities(&adapter);

        let surface_config = create_surface_config(&surface_caps, view_dimensions)?;
        let surface_format = surface_config.format;

        surface.configure(&device, &surface_config);

        let depth_texture = DepthTexture2DPackage::from_dimensions(
            &device,
            surface_config.width,
            surface_config.height,
        );

        let tera = load_shader_templates()?;

        let cube_renderer =
            CubeRenderer::from_device(device.clone(), queue.clone(), surface_format, &tera)?;

        Ok(Self {
            instance,
            surface,
            surface_config,
            adapter,
            device,
            queue,
            depth_texture,
            cube_renderer,
            camera: Camera::default(),
            view_dimensions,
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.surface_config.width as f32 / self.surface_config.height as f32
    }

    pub fn set_view_dimensions(&mut self, view_dimensions: winit::dpi::PhysicalSize<u32>) {
        self.view_dimensions = view_dimensions;
        self.surface_config.width = view_dimensions.width;
        self.surface_config.height = view_dimensions.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_texture = DepthTexture2DPackage::from_dimensions(
            &self.device,
            view_dimensions.width,
            view_dimensions.height,
        );
    }
}

/// Picks an sRGB format when one exists, otherwise the first format, and the
/// first present and alpha modes.
fn create_surface_config(
    surface_caps: &wgpu::SurfaceCapabilities,
    view_dimensions: winit::dpi::PhysicalSize<u32>,
) -> Result<wgpu::SurfaceConfiguration> {
    let format = match surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or(surface_caps.formats.first())
    {
        Some(format) => *format,
        None => return Err(Error::new("The surface reports no supported formats.").into()),
    };

    let present_mode = match surface_caps.present_modes.first() {
        Some(present_mode) => *present_mode,
        None => return Err(Error::new("The surface reports no present modes.").into()),
    };

    let alpha_mode = match surface_caps.alpha_modes.first() {
        Some(alpha_mode) => *alpha_mode,
        None => return Err(Error::new("The surface reports no alpha modes.").into()),
    };

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: view_dimensions.width.max(1),
        height: view_dimensions.height.max(1),
        present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}
