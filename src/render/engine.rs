use std::sync::Arc;
use winit::window::Window;

use super::mesh::Mesh;
use super::pipeline::{RenderState, MAX_ENTITIES};
use super::shapes;

/// GPU context bring-up failures. All are fatal to rendering; the caller
/// decides how to shut down.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to acquire graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

/// Which prebuilt mesh an entity draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshId {
    Strip,
    Vehicle,
    Obstacle,
}

pub struct GpuState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub window: Arc<Window>,
}

impl GpuState {
    pub fn new(window: Arc<Window>) -> Result<Self, EngineError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("ribbonride device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            ..Default::default()
        }))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            window,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }
}

/// A mesh uploaded to GPU buffers at startup.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index: Option<(wgpu::Buffer, u32)>,
    vertex_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index = mesh.indices.as_ref().map(|indices| {
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            (buffer, indices.len() as u32)
        });

        Self {
            vertex_buffer,
            index,
            vertex_count: mesh.vertex_count(),
        }
    }
}

/// Owns all GPU rendering state: device, pipeline, and the prebuilt meshes.
/// Created once on window open, used each frame for drawing.
pub struct RenderEngine {
    pub gpu: GpuState,
    pub render: RenderState,
    strip: GpuMesh,
    vehicle: GpuMesh,
    obstacle: GpuMesh,
}

impl RenderEngine {
    pub fn new(window: Arc<Window>) -> Result<Self, EngineError> {
        let gpu = GpuState::new(window)?;

        let render = RenderState::new(
            &gpu.device,
            gpu.config.format,
            gpu.config.width,
            gpu.config.height,
        );

        let strip = GpuMesh::upload(&gpu.device, "strip mesh", &shapes::strip());
        let vehicle = GpuMesh::upload(&gpu.device, "vehicle mesh", &shapes::vehicle());
        let obstacle = GpuMesh::upload(&gpu.device, "obstacle mesh", &shapes::obstacle());

        Ok(Self {
            gpu,
            render,
            strip,
            vehicle,
            obstacle,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.render
            .resize_depth(&self.gpu.device, self.gpu.config.width, self.gpu.config.height);
    }

    fn mesh(&self, id: MeshId) -> &GpuMesh {
        match id {
            MeshId::Strip => &self.strip,
            MeshId::Vehicle => &self.vehicle,
            MeshId::Obstacle => &self.obstacle,
        }
    }

    /// Draw one frame: upload the camera globals, clear color and depth,
    /// then submit every entity in list order. Each entity's transform goes
    /// into its uniform slot before its draw call, so the order of the list
    /// is the paint order; depth testing keeps it a cost concern only.
    pub fn draw_frame(
        &self,
        view_proj: glam::Mat4,
        entities: &[(MeshId, glam::Mat4)],
    ) -> Result<(), wgpu::SurfaceError> {
        if entities.len() > MAX_ENTITIES {
            log::warn!(
                "entity list truncated: {} > {MAX_ENTITIES}",
                entities.len()
            );
        }
        let entities = &entities[..entities.len().min(MAX_ENTITIES)];

        self.render.write_globals(&self.gpu.queue, view_proj);
        for (slot, &(_, model)) in entities.iter().enumerate() {
            self.render.write_entity(&self.gpu.queue, slot, model);
        }

        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.render.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Square viewport centered in the window, matching the fixed
            // square aspect of the projection.
            let w = self.gpu.config.width as f32;
            let h = self.gpu.config.height as f32;
            let side = w.min(h);
            pass.set_viewport((w - side) * 0.5, (h - side) * 0.5, side, side, 0.0, 1.0);

            pass.set_pipeline(&self.render.pipeline);
            pass.set_bind_group(0, &self.render.globals_bind_group, &[]);

            for (slot, &(mesh_id, _)) in entities.iter().enumerate() {
                let offset = RenderState::dynamic_offset(slot);
                pass.set_bind_group(1, &self.render.entity_bind_group, &[offset]);

                let mesh = self.mesh(mesh_id);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                match &mesh.index {
                    Some((index_buffer, count)) => {
                        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                        pass.draw_indexed(0..*count, 0, 0..1);
                    }
                    None => {
                        pass.draw(0..mesh.vertex_count, 0..1);
                    }
                }
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
