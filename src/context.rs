//! Central GPU and window context.
//!
//! [`Context::new`] performs the whole startup sequence once: adapter and
//! device acquisition, surface configuration, shader compilation, geometry
//! and texture upload, and the one-time projection matrix. Everything is
//! owned by the main thread for the program's lifetime; per-frame failures
//! are not recovered.

use std::path::Path;
use std::sync::Arc;

use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::{
    config::{self, RenderConfig},
    data_structures::{model::Model, texture::Texture},
    error::StartupError,
    pipeline::mk_quad_pipeline,
    resources::{LoadedAssets, diffuse_layout},
    transform::{OPENGL_TO_WGPU_MATRIX, compute_perspective_projection},
};

/// The per-frame shader uniform: model, view and projection matrices as
/// column-major float arrays, laid out to match the WGSL uniform struct.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

impl TransformUniform {
    /// Start with identity model and view; the projection is fixed for the
    /// window's lifetime and converted to wgpu's depth range on the way in.
    pub fn new(projection: Matrix4<f32>) -> Self {
        Self {
            model: Matrix4::identity().into(),
            view: Matrix4::identity().into(),
            projection: (OPENGL_TO_WGPU_MATRIX * projection).into(),
        }
    }

    pub fn set_model(&mut self, model: Matrix4<f32>) {
        self.model = model.into();
    }
}

/// Uniform state plus the GPU buffer and bind group it is written through.
#[derive(Debug)]
pub struct TransformResources {
    pub uniform: TransformUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

/// The quad's GPU-side geometry and texture binding.
#[derive(Debug)]
pub struct QuadResources {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
    pub diffuse_bind_group: wgpu::BindGroup,
}

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub quad: QuadResources,
    pub transforms: TransformResources,
    pub projection: Matrix4<f32>,
}

impl Context {
    pub async fn new(
        window: Arc<Window>,
        model: &Model,
        assets: &LoadedAssets,
        render_config: &RenderConfig,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("wgpu setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        log::info!("surface");
        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders assume an sRGB surface; a linear surface would render
        // darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            // Fifo blocks on the buffer swap, pacing the loop to the display
            // refresh rate.
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let vertex_shader = compile_shader(
            &device,
            "Quad Vertex Shader",
            &render_config.vertex_shader_path,
            &assets.vertex_shader_source,
        )
        .await?;
        let fragment_shader = compile_shader(
            &device,
            "Quad Fragment Shader",
            &render_config.fragment_shader_path,
            &assets.fragment_shader_source,
        )
        .await?;

        let diffuse_bind_group_layout = diffuse_layout(&device);
        let diffuse_texture =
            Texture::from_image(&device, &queue, &assets.texture_image, Some("quad texture"));
        let diffuse_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &diffuse_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&diffuse_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&diffuse_texture.sampler),
                },
            ],
            label: Some("diffuse_bind_group"),
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(model.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Index Buffer"),
            contents: bytemuck::cast_slice(model.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        // The projection does not change: the window is not resizable.
        let projection = compute_perspective_projection(
            config::FIELD_OF_VIEW,
            config.width as f32 / config.height as f32,
            config::NEAR_PLANE,
            config::FAR_PLANE,
        );
        let transform_uniform = TransformUniform::new(projection);

        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transform Buffer"),
            contents: bytemuck::cast_slice(&[transform_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("transform_bind_group_layout"),
            });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
            label: Some("transform_bind_group"),
        });

        let pipeline = mk_quad_pipeline(
            &device,
            &config,
            &diffuse_bind_group_layout,
            &transform_bind_group_layout,
            &vertex_shader,
            &fragment_shader,
        );

        let depth_texture = Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        // The window cannot be resized, so one configure call suffices.
        surface.configure(&device, &config);

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            pipeline,
            quad: QuadResources {
                vertex_buffer,
                index_buffer,
                num_indices: model.indices().len() as u32,
                diffuse_bind_group,
            },
            transforms: TransformResources {
                uniform: transform_uniform,
                buffer: transform_buffer,
                bind_group: transform_bind_group,
            },
            projection,
        })
    }
}

/// Compile one WGSL source file into a shader module, surfacing validation
/// failures as a typed error carrying the compiler diagnostic instead of the
/// default uncaptured-error panic.
async fn compile_shader(
    device: &wgpu::Device,
    label: &str,
    path: &Path,
    source: &str,
) -> Result<wgpu::ShaderModule, StartupError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(error) = device.pop_error_scope().await {
        return Err(StartupError::ShaderCompile {
            path: path.to_path_buf(),
            message: error.to_string(),
        });
    }
    Ok(module)
}
