//! Input probe: health checks and a live input watcher

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use frame_input::config::InputConfig;
use frame_input::health;
use frame_input::input::gamepad::default_backend;
use frame_input::input::{CollectorSettings, InputCollector, InputContext};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "input-probe", version, about = "Inspect per-frame input state")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all health checks and print a report
    Health,
    /// Open a window and log input edges as they happen
    Watch {
        /// Configuration profile (defaults to INPUT_PROFILE, then "release")
        #[arg(long)]
        profile: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Health => {
            let report = health::run_all_checks();
            health::print_report(&report);
            ExitCode::from(report.exit_code() as u8)
        }
        Command::Watch { profile } => match watch(profile.as_deref()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "Watch failed");
                ExitCode::FAILURE
            }
        },
    }
}

fn watch(profile: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = match profile {
        Some(profile) => InputConfig::load(profile),
        None => InputConfig::load_from_env(),
    };
    let config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using built-in values");
        InputConfig::builtin(profile.unwrap_or("release"))
    });

    let mut watcher = Watcher::new(config);
    watcher.input.init(default_backend()?)?;
    watcher
        .input
        .set_text_capture(watcher.collector.sampler_mut(), true)?;

    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut watcher)?;
    Ok(())
}

struct Watcher {
    window: Option<Window>,
    collector: InputCollector,
    input: InputContext,
    last_update: Option<Instant>,
    gamepads: Vec<usize>,
}

impl Watcher {
    fn new(config: InputConfig) -> Self {
        let collector = InputCollector::new(CollectorSettings::from_config(&config.pointer));
        Self {
            window: None,
            collector,
            input: InputContext::new(config),
            last_update: None,
            gamepads: Vec::new(),
        }
    }

    fn log_frame(&mut self) {
        let keyboard = self.input.keyboard();
        for key in keyboard.tracker().activated() {
            info!(key = key.0, "Key pressed");
        }
        for key in keyboard.tracker().deactivated() {
            info!(key = key.0, "Key released");
        }

        let pointer = self.input.pointer();
        for button in pointer.just_pressed_buttons() {
            info!(button = button.0, x = pointer.position().x, y = pointer.position().y, "Button pressed");
        }
        for button in pointer.just_released_buttons() {
            info!(button = button.0, "Button released");
        }
        let scroll = pointer.scroll();
        if scroll != glam::Vec2::ZERO {
            debug!(dx = scroll.x, dy = scroll.y, "Scroll");
        }

        for pad in self.input.gamepads() {
            for button in pad.just_pressed_buttons() {
                info!(gamepad = pad.id(), ?button, "Gamepad button pressed");
            }
            for button in pad.just_released_buttons() {
                info!(gamepad = pad.id(), ?button, "Gamepad button released");
            }
        }

        let ids: Vec<usize> = self.input.gamepads().map(|pad| pad.id()).collect();
        if ids != self.gamepads {
            info!(
                gamepads = ?ids,
                default = ?self.input.gamepad().map(|pad| pad.id()),
                "Gamepads changed"
            );
            self.gamepads = ids;
        }

        let text = self.input.keyboard_mut().read_text();
        if !text.is_empty() {
            info!(%text, "Text input");
        }
    }
}

impl ApplicationHandler for Watcher {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("input-probe")
            .with_inner_size(winit::dpi::LogicalSize::new(640.0, 480.0));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                info!(scale_factor = window.scale_factor(), "Window created, watching input");
                self.collector.set_scale_factor(window.scale_factor());
                self.window = Some(window);
                self.last_update = Some(Instant::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };
        if !self.input.is_initialized() {
            return;
        }

        let now = Instant::now();
        if let Err(e) = self
            .input
            .update(self.collector.sampler_mut(), (now - last_update).as_secs_f32())
        {
            error!(error = %e, "Input update failed");
            event_loop.exit();
            return;
        }
        self.last_update = Some(now);
        self.log_frame();

        event_loop.set_control_flow(ControlFlow::WaitUntil(now + FRAME));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        self.collector.handle_window_event(&event);

        if let WindowEvent::CloseRequested = event {
            info!(frames = self.input.frame(), "Close requested, exiting");
            self.input.dispose();
            event_loop.exit();
        }
    }
}
