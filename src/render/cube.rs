use anyhow::Result;

use crate::render::camera::CubeUniform;
use crate::render::cubemap::CubeMap;
use crate::render::shader::ShaderModulePackage;
use crate::render::texture::DepthTexture2DPackage;

/// Unit cube centered on the origin, 6 faces of 2 triangles each.
#[rustfmt::skip]
const CUBE_VERTICES: &[f32] = &[
    -0.5, -0.5, -0.5,  -0.5,  0.5, -0.5,   0.5, -0.5, -0.5,
    -0.5,  0.5, -0.5,   0.5,  0.5, -0.5,   0.5, -0.5, -0.5,

    -0.5, -0.5,  0.5,   0.5, -0.5,  0.5,  -0.5,  0.5,  0.5,
    -0.5,  0.5,  0.5,   0.5, -0.5,  0.5,   0.5,  0.5,  0.5,

    -0.5,  0.5, -0.5,  -0.5,  0.5,  0.5,   0.5,  0.5, -0.5,
    -0.5,  0.5,  0.5,   0.5,  0.5,  0.5,   0.5,  0.5, -0.5,

    -0.5, -0.5, -0.5,   0.5, -0.5, -0.5,  -0.5, -0.5,  0.5,
    -0.5, -0.5,  0.5,   0.5, -0.5, -0.5,   0.5, -0.5,  0.5,

    -0.5, -0.5, -0.5,  -0.5, -0.5,  0.5,  -0.5,  0.5, -0.5,
    -0.5, -0.5,  0.5,  -0.5,  0.5,  0.5,  -0.5,  0.5, -0.5,

     0.5, -0.5, -0.5,   0.5,  0.5, -0.5,   0.5, -0.5,  0.5,
     0.5, -0.5,  0.5,   0.5,  0.5, -0.5,   0.5,  0.5,  0.5,
];

const CUBE_VERTEX_COUNT: u32 = (CUBE_VERTICES.len() / 3) as u32;

pub struct CubeRenderer {
    device: std::rc::Rc<wgpu::Device>,
    queue: std::rc::Rc<wgpu::Queue>,
    gpu_pipeline: wgpu::RenderPipeline,
    gpu_vertex_buffer: wgpu::Buffer,
    gpu_matrix_uniform_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    gpu_bind_group: wgpu::BindGroup,
    #[allow(dead_code)]
    cubemap: CubeMap,
}

impl CubeRenderer {
    pub fn from_device(
        device: std::rc::Rc<wgpu::Device>,
        queue: std::rc::Rc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        tera: &tera::Tera,
    ) -> Result<Self> {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("CUBE_BIND_GROUP_LAYOUT"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("CUBE_RENDER_PIPELINE_LAYOUT"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let shader_module_package = ShaderModulePackage::from_templates(
            "cube/cube.vert",
            "cube/cube.frag",
            "CUBE",
            &device,
            tera,
        )?;

        let gpu_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("CUBE_RENDER_PIPELINE"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module_package.vertex_shader_module,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (3 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x3,
                    }],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module_package.fragment_shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent::REPLACE,
                        alpha: wgpu::BlendComponent::REPLACE,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthTexture2DPackage::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let gpu_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("CUBE_VERTEX_BUFFER"),
            size: std::mem::size_of_val(CUBE_VERTICES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        queue.write_buffer(&gpu_vertex_buffer, 0, bytemuck::cast_slice(CUBE_VERTICES));

        let gpu_matrix_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("CUBE_MATRIX_UNIFORM_BUFFER"),
            size: std::mem::size_of::<CubeUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let cubemap = CubeMap::create_default_cubemap("CUBE_DEFAULT_CUBEMAP", &device, &queue)?;

        let gpu_bind_group = CubeRenderer::create_bind_group(
            &device,
            &bind_group_layout,
            &gpu_matrix_uniform_buffer,
            &cubemap,
        );

        queue.submit([]);

        Ok(Self {
            device,
            queue,
            gpu_pipeline,
            gpu_vertex_buffer,
            gpu_matrix_uniform_buffer,
            bind_group_layout,
            gpu_bind_group,
            cubemap,
        })
    }

    /// Replaces the sampled cubemap. Frames drawn before the first call use
    /// a plain white cubemap.
    pub fn set_cubemap(&mut self, cubemap: CubeMap) {
        self.gpu_bind_group = CubeRenderer::create_bind_group(
            &self.device,
            &self.bind_group_layout,
            &self.gpu_matrix_uniform_buffer,
            &cubemap,
        );
        self.cubemap = cubemap;
    }

    pub fn update_matrix(&self, matrix: cgmath::Matrix4<f32>) {
        self.queue.write_buffer(
            &self.gpu_matrix_uniform_buffer,
            0,
            bytemuck::cast_slice(&[CubeUniform::new(matrix)]),
        );
    }

    pub fn render_cube(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.set_pipeline(&self.gpu_pipeline);
        render_pass.set_vertex_buffer(0, self.gpu_vertex_buffer.slice(..));
        render_pass.set_bind_group(0, &self.gpu_bind_group, &[]);
        render_pass.draw(0..CUBE_VERTEX_COUNT, 0..1);
    }

    fn create_bind_group(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        gpu_matrix_uniform_buffer: &wgpu::Buffer,
        cubemap: &CubeMap,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("CUBE_BIND_GROUP"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: gpu_matrix_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&cubemap.gpu_texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&cubemap.gpu_sampler),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_faces_of_two_triangles() {
        assert_eq!(CUBE_VERTICES.len() % 3, 0);
        assert_eq!(CUBE_VERTEX_COUNT, 6 * 6);
    }

    #[test]
    fn cube_vertices_lie_on_unit_cube_surface() {
        for vertex in CUBE_VERTICES.chunks(3) {
            assert!(vertex.iter().all(|component| component.abs() == 0.5));
        }
    }
}
