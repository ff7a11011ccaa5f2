//! GPU and window context.
//!
//! Owns the surface, device, queue, swap chain, pipeline and camera
//! resources, and implements [`FrameBackend`] so the
//! [`crate::frame::FrameController`] can drive it.

use std::{iter, sync::Arc};

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    camera::CameraResources,
    config::RenderConfig,
    data_structures::{instance::InstanceRaw, model::DrawMesh},
    frame::{Acquired, Extent, FrameBackend, PresentStatus},
    pipelines::basic::mk_entity_pipeline,
    render::{Drawable, Scene},
    swap_chain::SwapChain,
};

/// Per-image resources. Each swap-chain image records into its own slot so
/// instance data of a frame in flight is never overwritten.
#[derive(Debug)]
pub struct FrameSlot {
    instance_buffer: wgpu::Buffer,
    capacity: usize,
}

impl FrameSlot {
    const INITIAL_CAPACITY: usize = 64;

    fn new(device: &wgpu::Device, index: usize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("Instance Buffer {}", index)),
            size: (capacity * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            instance_buffer,
            capacity,
        }
    }

    fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        index: usize,
        instances: &[InstanceRaw],
    ) {
        if instances.len() > self.capacity {
            log::debug!(
                "Growing instance buffer {} from {} to {}",
                index,
                self.capacity,
                instances.len().next_power_of_two()
            );
            *self = Self::new(device, index, instances.len().next_power_of_two());
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
    }
}

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub swap_chain: SwapChain,
    pub pipeline: wgpu::RenderPipeline,
    pub camera: CameraResources,
    pub clear_colour: wgpu::Color,
    slots: Vec<FrameSlot>,
}

impl Context {
    pub async fn new(window: Arc<Window>, config: &RenderConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                ..Default::default()
            })
            .await
            .context("failed to create logical device")?;

        let swap_chain = SwapChain::new(
            &surface,
            &adapter,
            &device,
            Extent::new(size.width, size.height),
            config.image_count,
        )
        .context("failed to create swap chain")?;

        let camera = CameraResources::new(&device);
        let pipeline = mk_entity_pipeline(&device, swap_chain.format(), &camera.bind_group_layout);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            swap_chain,
            pipeline,
            camera,
            clear_colour: config.clear_colour,
            slots: Vec::new(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn aspect(&self) -> f32 {
        self.swap_chain.extent().aspect()
    }
}

impl FrameBackend for Context {
    type Image = wgpu::SurfaceTexture;
    type Commands = wgpu::CommandBuffer;

    fn drawable_extent(&self) -> Extent {
        let size = self.window.inner_size();
        Extent::new(size.width, size.height)
    }

    fn image_count(&self) -> usize {
        self.swap_chain.image_count()
    }

    fn acquire_image(&mut self) -> anyhow::Result<Acquired<Self::Image>> {
        self.swap_chain.acquire(&self.surface)
    }

    fn record(
        &mut self,
        slot: usize,
        image: &Self::Image,
        scene: &Scene,
    ) -> anyhow::Result<Self::Commands> {
        let view = image
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let extent = self.swap_chain.extent();

        self.camera.write(&self.queue, scene.view_proj);
        let instances: Vec<InstanceRaw> = scene.drawables().map(Drawable::to_raw).collect();
        let frame_slot = self
            .slots
            .get_mut(slot)
            .with_context(|| format!("no command slot {}", slot))?;
        frame_slot.write(&self.device, &self.queue, slot, &instances);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.swap_chain.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if !instances.is_empty() {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_viewport(
                    0.0,
                    0.0,
                    extent.width as f32,
                    extent.height as f32,
                    0.0,
                    1.0,
                );
                render_pass.set_scissor_rect(0, 0, extent.width, extent.height);
                render_pass.set_bind_group(0, &self.camera.bind_group, &[]);
                render_pass.set_vertex_buffer(1, frame_slot.instance_buffer.slice(..));
                // Table order; the depth buffer resolves occlusion.
                for (instance, drawable) in scene.drawables().enumerate() {
                    render_pass.draw_mesh_instance(drawable.mesh, instance as u32);
                }
            }
        }
        Ok(encoder.finish())
    }

    fn submit(&mut self, commands: Self::Commands) -> anyhow::Result<()> {
        self.queue.submit(iter::once(commands));
        Ok(())
    }

    fn present(&mut self, image: Self::Image) -> anyhow::Result<PresentStatus> {
        let status = if image.suboptimal {
            PresentStatus::Suboptimal
        } else {
            PresentStatus::Success
        };
        self.window.pre_present_notify();
        image.present();
        Ok(status)
    }

    fn wait_idle(&mut self) -> anyhow::Result<()> {
        self.device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .map_err(|e| anyhow::anyhow!("device did not become idle: {:?}", e))?;
        Ok(())
    }

    fn recreate_swap_chain(&mut self, extent: Extent) -> anyhow::Result<()> {
        self.swap_chain.recreate(&self.surface, &self.device, extent)
    }

    fn allocate_command_slots(&mut self, count: usize) -> anyhow::Result<()> {
        anyhow::ensure!(count > 0, "at least one command slot is required");
        self.slots = (0..count)
            .map(|index| FrameSlot::new(&self.device, index, FrameSlot::INITIAL_CAPACITY))
            .collect();
        log::debug!("Allocated {} command slots", count);
        Ok(())
    }

    fn rebuild_pipeline(&mut self) -> anyhow::Result<()> {
        self.pipeline = mk_entity_pipeline(
            &self.device,
            self.swap_chain.format(),
            &self.camera.bind_group_layout,
        );
        Ok(())
    }
}
