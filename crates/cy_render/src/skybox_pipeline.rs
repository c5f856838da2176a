use crate::gpu_context::DEPTH_FORMAT;
use crate::texture::Cubemap;
use crate::vertex::SkyVertex;

/// Cube-mapped background pass. Drawn after all opaque geometry with depth
/// compare relaxed to LessEqual and depth writes disabled, so the skybox
/// fills only the far plane and never occludes the scene.
pub struct SkyboxPipeline {
    pub render_pipeline: wgpu::RenderPipeline,
    pub frame_layout: wgpu::BindGroupLayout,
    pub cubemap_layout: wgpu::BindGroupLayout,
}

impl SkyboxPipeline {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Skybox Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/skybox.wgsl").into()),
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Skybox Frame Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let cubemap_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Skybox Cubemap Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Skybox Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &cubemap_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Skybox Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SkyVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            frame_layout,
            cubemap_layout,
        }
    }

    pub fn create_frame_bind_group(
        &self,
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Skybox Frame Bind Group"),
            layout: &self.frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        })
    }

    pub fn create_cubemap_bind_group(
        &self,
        device: &wgpu::Device,
        cubemap: &Cubemap,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Skybox Cubemap Bind Group"),
            layout: &self.cubemap_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&cubemap.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&cubemap.sampler),
                },
            ],
        })
    }
}

/// Unit cube as 36 position-only vertices, centered on the origin.
pub fn skybox_vertices() -> [SkyVertex; 36] {
    const P: f32 = 1.0;
    const N: f32 = -1.0;
    let faces: [[f32; 3]; 36] = [
        // -Z
        [N, N, N], [P, N, N], [P, P, N], [P, P, N], [N, P, N], [N, N, N],
        // +Z
        [N, N, P], [P, N, P], [P, P, P], [P, P, P], [N, P, P], [N, N, P],
        // -X
        [N, P, P], [N, P, N], [N, N, N], [N, N, N], [N, N, P], [N, P, P],
        // +X
        [P, P, P], [P, P, N], [P, N, N], [P, N, N], [P, N, P], [P, P, P],
        // -Y
        [N, N, N], [P, N, N], [P, N, P], [P, N, P], [N, N, P], [N, N, N],
        // +Y
        [N, P, N], [P, P, N], [P, P, P], [P, P, P], [N, P, P], [N, P, N],
    ];
    faces.map(|position| SkyVertex { position })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skybox_cube_covers_all_octants() {
        let verts = skybox_vertices();
        assert_eq!(verts.len(), 36);
        for corner in [
            [1.0, 1.0, 1.0],
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, 1.0],
            [-1.0, 1.0, -1.0],
        ] {
            assert!(
                verts.iter().any(|v| v.position == corner),
                "missing corner {corner:?}"
            );
        }
    }
}
