//! Per-frame lifecycle: acquire, record, submit, present, recreate.
//!
//! [`FrameController`] owns the recreation policy and nothing else. The GPU
//! work happens behind [`FrameBackend`], which [`crate::context::Context`]
//! implements on top of wgpu.
//!
//! # Lifecycle
//!
//! 1. Acquire the next presentable image. An out-of-date surface drops the
//!    frame and recreates the swap chain.
//! 2. Record the scene into the command slot that belongs to the image.
//! 3. Submit.
//! 4. Present. A stale surface or a pending resize recreates afterwards.
//!
//! Recreation needs a non-zero drawable extent. While the window is
//! minimized the recreation stays pending and frames are reported as
//! [`FrameOutcome::Suspended`] until the event loop delivers a usable size.
//! Everything else that goes wrong is returned as an error and is fatal.

use anyhow::Context as _;

use crate::render::Scene;

/// Drawable size of the window in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        if self.is_zero() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Result of asking the swap chain for an image.
#[derive(Debug)]
pub enum Acquired<I> {
    Ready { image: I, index: usize },
    /// The surface no longer matches the window; the swap chain must be rebuilt.
    OutOfDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentStatus {
    Success,
    /// Shown, but the swap chain no longer matches the surface exactly.
    Suboptimal,
    OutOfDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// Presented, then the swap chain was rebuilt.
    PresentedAndRecreated,
    /// Nothing was submitted; the swap chain was rebuilt instead.
    Dropped,
    /// The window has no area; recreation is waiting for a resize.
    Suspended,
}

/// The graphics-side operations one frame is made of.
pub trait FrameBackend {
    type Image;
    type Commands;

    fn drawable_extent(&self) -> Extent;
    fn image_count(&self) -> usize;
    fn acquire_image(&mut self) -> anyhow::Result<Acquired<Self::Image>>;
    fn record(
        &mut self,
        slot: usize,
        image: &Self::Image,
        scene: &Scene,
    ) -> anyhow::Result<Self::Commands>;
    fn submit(&mut self, commands: Self::Commands) -> anyhow::Result<()>;
    fn present(&mut self, image: Self::Image) -> anyhow::Result<PresentStatus>;
    fn wait_idle(&mut self) -> anyhow::Result<()>;
    fn recreate_swap_chain(&mut self, extent: Extent) -> anyhow::Result<()>;
    fn allocate_command_slots(&mut self, count: usize) -> anyhow::Result<()>;
    fn rebuild_pipeline(&mut self) -> anyhow::Result<()>;
}

#[derive(Debug)]
pub struct FrameController {
    window_resized: bool,
    recreate_pending: bool,
    command_slots: usize,
    frames_presented: u64,
    recreations: u64,
}

impl FrameController {
    /// Allocate one command slot per swap-chain image.
    pub fn new<B: FrameBackend>(backend: &mut B) -> anyhow::Result<Self> {
        let command_slots = backend.image_count();
        backend
            .allocate_command_slots(command_slots)
            .context("failed to allocate command buffers")?;
        Ok(Self {
            window_resized: false,
            recreate_pending: false,
            command_slots,
            frames_presented: 0,
            recreations: 0,
        })
    }

    /// Remember that the window changed size; honoured after the next present.
    pub fn mark_resized(&mut self) {
        self.window_resized = true;
    }

    pub fn is_recreate_pending(&self) -> bool {
        self.recreate_pending
    }

    pub fn command_slots(&self) -> usize {
        self.command_slots
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn recreations(&self) -> u64 {
        self.recreations
    }

    pub fn render_frame<B: FrameBackend>(
        &mut self,
        backend: &mut B,
        scene: &Scene,
    ) -> anyhow::Result<FrameOutcome> {
        if self.recreate_pending && !self.recreate(backend)? {
            return Ok(FrameOutcome::Suspended);
        }

        let (image, index) = match backend
            .acquire_image()
            .context("failed to acquire swap chain image")?
        {
            Acquired::Ready { image, index } => (image, index),
            Acquired::OutOfDate => {
                log::warn!("Swap chain out of date on acquire, recreating");
                return self.recreate_after(backend, FrameOutcome::Dropped);
            }
        };
        anyhow::ensure!(
            index < self.command_slots,
            "swap chain returned image {} but only {} command buffers exist",
            index,
            self.command_slots
        );

        let commands = backend
            .record(index, &image, scene)
            .context("failed to record command buffer")?;
        backend
            .submit(commands)
            .context("failed to submit command buffer")?;
        let status = backend
            .present(image)
            .context("failed to present swap chain image")?;
        self.frames_presented += 1;

        if status != PresentStatus::Success || self.window_resized {
            log::debug!(
                "Recreating swap chain after present (status {:?}, resized {})",
                status,
                self.window_resized
            );
            self.window_resized = false;
            return self.recreate_after(backend, FrameOutcome::PresentedAndRecreated);
        }
        Ok(FrameOutcome::Presented)
    }

    fn recreate_after<B: FrameBackend>(
        &mut self,
        backend: &mut B,
        outcome: FrameOutcome,
    ) -> anyhow::Result<FrameOutcome> {
        self.recreate_pending = true;
        if self.recreate(backend)? {
            Ok(outcome)
        } else {
            Ok(FrameOutcome::Suspended)
        }
    }

    /// Returns `false` if the window has no area yet.
    fn recreate<B: FrameBackend>(&mut self, backend: &mut B) -> anyhow::Result<bool> {
        let extent = backend.drawable_extent();
        if extent.is_zero() {
            log::debug!("Window minimized, deferring swap chain recreation");
            return Ok(false);
        }

        backend.wait_idle()?;
        backend
            .recreate_swap_chain(extent)
            .context("failed to recreate swap chain")?;

        let image_count = backend.image_count();
        if image_count != self.command_slots {
            log::info!(
                "Swap chain image count changed from {} to {}, reallocating command buffers",
                self.command_slots,
                image_count
            );
            backend
                .allocate_command_slots(image_count)
                .context("failed to allocate command buffers")?;
            self.command_slots = image_count;
        }

        // The pipeline targets the surface format, which may have changed.
        backend
            .rebuild_pipeline()
            .context("failed to create pipeline")?;

        // The new swap chain already matches the current extent.
        self.recreate_pending = false;
        self.window_resized = false;
        self.recreations += 1;
        log::info!(
            "Swap chain recreated at {}x{} with {} images",
            extent.width,
            extent.height,
            image_count
        );
        Ok(true)
    }
}
