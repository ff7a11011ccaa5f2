//! Presentable images for the window surface plus the depth target that goes
//! with them.

use anyhow::Context as _;

use crate::{
    data_structures::texture::Texture,
    frame::{Acquired, Extent},
};

#[derive(Debug)]
pub struct SwapChain {
    pub config: wgpu::SurfaceConfiguration,
    pub depth_texture: Texture,
    image_count: usize,
    next_image: usize,
}

impl SwapChain {
    pub fn new(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        extent: Extent,
        image_count: u32,
    ) -> anyhow::Result<Self> {
        let surface_caps = surface.get_capabilities(adapter);
        // The shader writes linear colours and relies on an sRGB target to
        // encode them.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no supported formats")?;
        let present_mode = surface_caps
            .present_modes
            .first()
            .copied()
            .unwrap_or(wgpu::PresentMode::Fifo);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let image_count = image_count.max(1);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: extent.width.max(1),
            height: extent.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: image_count,
        };
        surface.configure(device, &config);
        log::info!(
            "Swap chain created: {:?}, {:?}, {}x{}, {} images",
            config.format,
            config.present_mode,
            config.width,
            config.height,
            image_count
        );

        let depth_texture =
            Texture::create_depth_texture(device, [config.width, config.height], "depth_texture");

        Ok(Self {
            config,
            depth_texture,
            image_count: image_count as usize,
            next_image: 0,
        })
    }

    /// Reconfigure for a new extent. The caller guarantees the extent is
    /// non-zero and that the device is idle.
    pub fn recreate(
        &mut self,
        surface: &wgpu::Surface<'static>,
        device: &wgpu::Device,
        extent: Extent,
    ) -> anyhow::Result<()> {
        anyhow::ensure!(!extent.is_zero(), "cannot size a swap chain to {:?}", extent);
        self.config.width = extent.width;
        self.config.height = extent.height;
        surface.configure(device, &self.config);
        self.depth_texture =
            Texture::create_depth_texture(device, [extent.width, extent.height], "depth_texture");
        self.image_count = self.config.desired_maximum_frame_latency.max(1) as usize;
        self.next_image = 0;
        Ok(())
    }

    /// Take the next presentable image. Lost and outdated surfaces are
    /// reported as [`Acquired::OutOfDate`]; any other failure is an error.
    pub fn acquire(
        &mut self,
        surface: &wgpu::Surface<'static>,
    ) -> anyhow::Result<Acquired<wgpu::SurfaceTexture>> {
        match surface.get_current_texture() {
            Ok(image) => {
                let index = self.next_image;
                self.next_image = (self.next_image + 1) % self.image_count;
                Ok(Acquired::Ready { image, index })
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                Ok(Acquired::OutOfDate)
            }
            Err(e) => Err(anyhow::anyhow!("surface error: {}", e)),
        }
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.config.width, self.config.height)
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }
}
