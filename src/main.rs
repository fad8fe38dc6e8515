//! Wavescope - real-time waveform visualizer
//!
//! Pick an audio file (`--file` or drop it on the window); it plays while
//! the window draws its waveform every display refresh.

use clap::Parser;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use wavescope::audio::{self, CpalOutput, DecodedAudio};
use wavescope::cli::Args;
use wavescope::error::DecodeError;
use wavescope::frame_loop::FrameLoop;
use wavescope::params::{AnalyserConfig, RadialStyle, RenderConfig, WaveformStyle};
use wavescope::rendering::RenderSystem;
use wavescope::session::Session;
use wavescope::visual::{Color, RenderSelector, SurfaceSize};

/// Events posted back to the event loop from worker threads
enum AppEvent {
    Decoded(Result<DecodedAudio, DecodeError>),
}

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Audio and frame loop
    session: Session<CpalOutput, StdRng>,
    proxy: EventLoopProxy<AppEvent>,

    // Configuration
    render_config: RenderConfig,
    initial_file: Option<PathBuf>,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new(
        args: &Args,
        render_config: RenderConfig,
        session: Session<CpalOutput, StdRng>,
        proxy: EventLoopProxy<AppEvent>,
    ) -> Self {
        Self {
            window: None,
            render_system: None,
            session,
            proxy,
            render_config,
            initial_file: args.file.clone(),
            start_time: Instant::now(),
        }
    }

    fn background(&self) -> Color {
        let [r, g, b] = self.render_config.background_rgb;
        Color::rgb(r, g, b)
    }

    /// Drawing coordinate space (logical pixels)
    fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new(
            self.render_config.window_width as f32,
            self.render_config.window_height as f32,
        )
    }

    /// Validate the choice and start reading + decoding off the main thread
    fn select_file(&mut self, path: Option<PathBuf>) {
        let Some(path) = self.session.select_file(path) else {
            return;
        };

        let proxy = self.proxy.clone();
        audio::spawn_load(path, move |result| {
            if proxy.send_event(AppEvent::Decoded(result)).is_err() {
                tracing::warn!("Event loop closed before decoding finished");
            }
        });
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Sized once; the surface never follows resizes
        let window_attributes = Window::default_attributes()
            .with_title("Wavescope")
            .with_resizable(false)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.surface_size(),
            self.background(),
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                tracing::error!("Failed to initialize rendering: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(Arc::clone(&window));
        self.render_system = Some(render_system);

        let file = self.initial_file.take();
        if file.is_none() {
            tracing::info!("Drop an audio file onto the window to start");
        }
        self.select_file(file);

        window.request_redraw();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Decoded(result) => {
                let now = self.start_time.elapsed();
                if self.session.on_decoded(result, now) {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::DroppedFile(path) => self.select_file(Some(path)),
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

impl App {
    /// Stop the frame loop, then leave the event loop
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.session.stop();
        event_loop.exit();
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        let Some(render_system) = &mut self.render_system else {
            return;
        };

        let now = self.start_time.elapsed();
        let result = match self.session.tick(now, &**window) {
            Some(commands) => render_system.render(commands),
            None => render_system.render_idle(),
        };

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("Render error: out of GPU memory");
                event_loop.exit();
            }
            Err(e) => tracing::warn!("Render error: {:?}", e),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let render_config = match args.render_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid window configuration: {}", e);
            std::process::exit(2);
        }
    };
    let rotation = match args.mode_rotation() {
        Ok(rotation) => rotation,
        Err(e) => {
            tracing::error!("Invalid mode rotation: {}", e);
            std::process::exit(2);
        }
    };
    let analyser = AnalyserConfig::default();
    if let Err(e) = analyser.validate() {
        tracing::error!("Invalid analyser configuration: {}", e);
        std::process::exit(2);
    }

    let variant = args.parse_variant();
    tracing::info!("Wavescope starting ({:?} variant)", variant);

    let selector = RenderSelector::for_variant(
        variant,
        WaveformStyle::default(),
        RadialStyle::default(),
        rotation,
    );
    let [r, g, b] = render_config.background_rgb;
    let frame_loop = FrameLoop::new(
        selector,
        analyser.snapshot_len(),
        SurfaceSize::new(
            render_config.window_width as f32,
            render_config.window_height as f32,
        ),
        Color::rgb(r, g, b),
    );
    let session = Session::new(CpalOutput::new(analyser), frame_loop, args.rng());

    let event_loop = match EventLoop::<AppEvent>::with_user_event().build() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(&args, render_config, session, event_loop.create_proxy());
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {}", e);
    }
}
