use anyhow::Result;

use crate::animation::CubeAnimation;
use crate::args::CubeFaceLayout;
use crate::render::RenderSystem;
use crate::resource::cubemap::dds::DdsCubeMapLoader;

pub struct ViewSystem {
    pub window: std::sync::Arc<winit::window::Window>,
    pub render_system: RenderSystem,
    pub animation: CubeAnimation,
}

impl ViewSystem {
    pub async fn from_window(window: winit::window::Window) -> Result<Self> {
        let window = std::sync::Arc::new(window);

        let mut render_system = RenderSystem::from_window(window.clone()).await?;

        let animation = CubeAnimation::default();

        render_system.set_model_matrix(animation.model_matrix());

        Ok(Self {
            window,
            render_system,
            animation,
        })
    }

    pub fn update_view(&mut self, delta_time: std::time::Duration) -> Result<()> {
        self.animation.advance(delta_time);

        self.render_system
            .set_model_matrix(self.animation.model_matrix());

        self.render_system.render()?;

        Ok(())
    }

    pub fn load_dds(&mut self, data: Vec<u8>, face_layout: CubeFaceLayout) -> Result<()> {
        let loader = DdsCubeMapLoader::from_bytes(data, face_layout)?;

        let texture = loader.texture();
        log::info!(
            "Loaded DDS texture {}x{} {} ({:?}, pixel data at byte {})",
            texture.header.width,
            texture.header.height,
            texture.header.four_cc,
            texture.face_source,
            texture.data_offset,
        );

        self.render_system.load_cubemap(&loader, "DDS_CUBEMAP")
    }
}
