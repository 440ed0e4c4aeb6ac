//! wgpu back end
//!
//! One render pipeline built from the GLSL pair on disk. Each draw gets its
//! MVP from a slot in a dynamically offset uniform buffer; meshes are
//! immutable vertex buffers created once at bootstrap.

use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::Mat4;
use wgpu::naga::ShaderStage;
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::canvas::Canvas;
use super::vertex::Vertex;
use crate::error::InitError;
use crate::sim::body::{MeshId, palette};

/// Bytes between consecutive MVP slots (minimum uniform offset alignment)
const UNIFORM_STRIDE: u64 = 256;
/// Draw calls per frame before extra draws are dropped
const MAX_DRAWS: u64 = 1024;
const MVP_SIZE: u64 = std::mem::size_of::<[[f32; 4]; 4]>() as u64;

/// GLSL sources loaded from disk
pub struct ShaderSources {
    pub vertex_path: PathBuf,
    pub vertex: String,
    pub fragment_path: PathBuf,
    pub fragment: String,
}

impl ShaderSources {
    /// Read and validate both stages
    pub fn load(vertex: &Path, fragment: &Path) -> Result<Self, InitError> {
        Ok(Self {
            vertex: load_shader(vertex, ShaderStage::Vertex)?,
            vertex_path: vertex.to_path_buf(),
            fragment: load_shader(fragment, ShaderStage::Fragment)?,
            fragment_path: fragment.to_path_buf(),
        })
    }
}

/// Read a GLSL file and run it through the naga front end
pub fn load_shader(path: &Path, stage: ShaderStage) -> Result<String, InitError> {
    let source = std::fs::read_to_string(path).map_err(|source| InitError::ShaderRead {
        path: path.to_path_buf(),
        source,
    })?;
    validate_glsl(&source, stage).map_err(|message| InitError::ShaderCompile {
        path: path.to_path_buf(),
        message,
    })?;
    log::info!("Loaded shader {}", path.display());
    Ok(source)
}

fn validate_glsl(source: &str, stage: ShaderStage) -> Result<(), String> {
    let mut frontend = wgpu::naga::front::glsl::Frontend::default();
    let options = wgpu::naga::front::glsl::Options::from(stage);
    frontend
        .parse(&options, source)
        .map(|_| ())
        .map_err(|err| format!("{err:?}"))
}

struct GpuMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// Window-backed renderer
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
    /// Draws queued since the last present
    pending: Vec<(MeshId, Mat4)>,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl Renderer {
    pub async fn new(window: Arc<Window>, shaders: &ShaderSources) -> Result<Self, InitError> {
        let inner = window.inner_size();
        let (width, height) = (inner.width.max(1), inner.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("brick-breaker-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        log::info!("Surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vertex_shader"),
            source: wgpu::ShaderSource::Glsl {
                shader: shaders.vertex.as_str().into(),
                stage: ShaderStage::Vertex,
                defines: Default::default(),
            },
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fragment_shader"),
            source: wgpu::ShaderSource::Glsl {
                shader: shaders.fragment.as_str().into(),
                stage: ShaderStage::Fragment,
                defines: Default::default(),
            },
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mvp_buffer"),
            size: UNIFORM_STRIDE * MAX_DRAWS,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mvp_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(MVP_SIZE),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mvp_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: NonZeroU64::new(MVP_SIZE),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            meshes: Vec::new(),
            pending: Vec::new(),
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Submit the queued draws and flip. The queue is emptied either way.
    pub fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        let draws = std::mem::take(&mut self.pending);
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if draws.len() as u64 > MAX_DRAWS {
            log::warn!("Dropping {} draws over the per-frame limit", draws.len() as u64 - MAX_DRAWS);
        }
        let draws = &draws[..draws.len().min(MAX_DRAWS as usize)];

        for (slot, (_, mvp)) in draws.iter().enumerate() {
            self.queue.write_buffer(
                &self.uniform_buffer,
                slot as u64 * UNIFORM_STRIDE,
                bytemuck::bytes_of(&mvp.to_cols_array_2d()),
            );
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let [r, g, b] = palette::BACKGROUND;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            for (slot, (mesh, _)) in draws.iter().enumerate() {
                let Some(mesh) = self.meshes.get(mesh.0 as usize) else {
                    log::warn!("Draw of unknown mesh {:?}", mesh);
                    continue;
                };
                let offset = (slot as u64 * UNIFORM_STRIDE) as wgpu::DynamicOffset;
                render_pass.set_bind_group(0, &self.bind_group, &[offset]);
                render_pass.set_vertex_buffer(0, mesh.buffer.slice(..));
                render_pass.draw(0..mesh.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Canvas for Renderer {
    fn create_mesh(&mut self, vertices: &[Vertex]) -> MeshId {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(GpuMesh {
            buffer,
            vertex_count: vertices.len() as u32,
        });
        id
    }

    fn draw(&mut self, mesh: MeshId, mvp: Mat4) {
        self.pending.push((mesh, mvp));
    }
}
