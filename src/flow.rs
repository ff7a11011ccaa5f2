//! Application event loop.
//!
//! The winit [`ApplicationHandler`] folds window and device events into the
//! shared [`InputState`] as they arrive. Each `RedrawRequested` runs one
//! frame:
//!
//! 1. Measure the frame time and clamp it to `max_frame_time`
//! 2. Advance the [`Game`] (state machine, controller, projectiles)
//! 3. Snapshot the input so edge queries reset
//! 4. Hand the game's scene to the [`FrameController`]
//! 5. Ask for the next redraw unless the window is minimized
//!
//! Initialisation of the wgpu device is async and is blocked on a tokio
//! runtime. Any fatal error stops the event loop and is returned from
//! [`run_with`].

use std::sync::Arc;

use anyhow::Context as _;
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    config::Config,
    context::Context,
    frame::{FrameController, FrameOutcome},
    game::Game,
    input::InputState,
    resources::MeshLibrary,
};

/// What the event loop should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameStep {
    Continue,
    /// The window is minimized; wait for a resize before drawing again.
    Idle,
    Exit,
}

/// Everything that exists once a window and a device are available.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    frames: FrameController,
    game: Game,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        let mut ctx = Context::new(window, &config.render)
            .await
            .context("App initialization failed. Cannot create the main context")?;
        let meshes = MeshLibrary::load(&ctx.device)?;
        let frames = FrameController::new(&mut ctx)?;
        let game = Game::new(config, Some(&meshes))?;
        Ok(Self { ctx, frames, game })
    }

    fn frame(&mut self, input: &mut InputState, dt: f32) -> anyhow::Result<FrameStep> {
        if self.game.update(input, dt) {
            return Ok(FrameStep::Exit);
        }
        input.end_frame();

        let scene = self.game.scene(self.ctx.aspect());
        match self.frames.render_frame(&mut self.ctx, &scene)? {
            FrameOutcome::Suspended => Ok(FrameStep::Idle),
            _ => Ok(FrameStep::Continue),
        }
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: Config,
    state: Option<AppState>,
    input: InputState,
    last_time: Instant,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            input: InputState::new(),
            last_time: Instant::now(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        // Mouse look wants raw motion without the cursor leaving the window.
        if let Err(e) = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        {
            log::warn!("Could not grab the cursor: {}", e);
        }
        window.set_cursor_visible(false);

        let app_state = self
            .async_runtime
            .block_on(AppState::new(window.clone(), &self.config))?;
        window.request_redraw();
        Ok(app_state)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => {
                self.state = Some(state);
                self.last_time = Instant::now();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.input.handle_device_event(&event);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.input.handle_window_event(&event);

        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                log::debug!("Window resized to {}x{}", size.width, size.height);
                state.frames.mark_resized();
                if size.width > 0 && size.height > 0 {
                    state.ctx.window().request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                let max_frame_time = self.config.render.max_frame_time;
                let dt = self.last_time.elapsed().as_secs_f32().min(max_frame_time);
                self.last_time = Instant::now();

                match state.frame(&mut self.input, dt) {
                    Ok(FrameStep::Continue) => state.ctx.window().request_redraw(),
                    Ok(FrameStep::Idle) => {}
                    Ok(FrameStep::Exit) => {
                        log::info!("Exit requested");
                        event_loop.exit();
                    }
                    Err(e) => self.fail(event_loop, e),
                }
            }
            _ => {}
        }
    }
}

/// Open the window and run the demo with default settings until it exits.
pub fn run() -> anyhow::Result<()> {
    run_with(Config::default())
}

pub fn run_with(config: Config) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new().context("failed to create the event loop")?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
