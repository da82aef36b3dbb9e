use anyhow::Result;

use crate::render::cubemap::{report_upload_errors, CubeMap};
use crate::render::state::RenderSystemState;
use crate::resource::cubemap::CubeMapLoader;

mod camera;
mod cube;
mod cubemap;
mod shader;
mod state;
mod texture;
mod upload;

pub struct RenderSystem {
    state: RenderSystemState,
}

impl RenderSystem {
    pub async fn from_window(window: std::sync::Arc<winit::window::Window>) -> Result<Self> {
        let state = RenderSystemState::from_window(window).await?;

        Ok(Self { state })
    }

    pub fn sync_view_dimensions(&mut self) {
        self.set_view_dimensions(self.state.view_dimensions);
    }

    pub fn set_view_dimensions(&mut self, view_dimensions: winit::dpi::PhysicalSize<u32>) {
        if view_dimensions.width == 0 || view_dimensions.height == 0 {
            return;
        }

        self.state.set_view_dimensions(view_dimensions);
    }

    pub fn set_model_matrix(&mut self, model_matrix: cgmath::Matrix4<f32>) {
        let view_projection_matrix = self
            .state
            .camera
            .create_view_projection_matrix(self.state.aspect_ratio());

        self.state
            .cube_renderer
            .update_matrix(view_projection_matrix * model_matrix);
    }

    pub fn render(&mut self) -> Result<()> {
        let output = self.state.surface.get_current_texture()?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.state
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("RENDER_SYSTEM_COMMAND_ENCODER"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("RENDER_SYSTEM_RENDER_PASS"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.state.depth_texture.gpu_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.state.cube_renderer.render_cube(&mut render_pass);
        }

        self.state.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Uploads the faces supplied by `loader` and makes them the cube's
    /// texture. On error the current cubemap stays bound.
    pub fn load_cubemap(&mut self, loader: &impl CubeMapLoader, name: &str) -> Result<()> {
        self.state
            .device
            .push_error_scope(wgpu::ErrorFilter::Validation);

        let result = CubeMap::from_loader(loader, name, &self.state.device, &self.state.queue)
            .map(|cubemap| self.state.cube_renderer.set_cubemap(cubemap));

        report_upload_errors(&self.state.device);

        result
    }
}
