//! Brick Breaker entry point
//!
//! Opens the window, drives one simulate-draw-spawn-present pass per redraw,
//! and reports how the session ended.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, MouseButton as WinitButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key as LogicalKey, KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use brick_breaker::input::{
    ButtonAction, InputEvent, InputQueue, Key, KeyAction, MouseButton, Signal,
};
use brick_breaker::renderer::{Renderer, ShaderSources, draw_scene};
use brick_breaker::sim::{GameState, advance, maybe_spawn};
use brick_breaker::{InitError, Settings};

/// How the session ended
enum Outcome {
    /// ESC or Q
    Quit,
    GameOver { score: u32 },
    InitFailed(InitError),
    /// Unrecoverable GPU failure mid-game
    Fatal(String),
}

struct App {
    settings: Settings,
    shaders: ShaderSources,
    start: Instant,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    game: Option<GameState>,
    queue: InputQueue,
    outcome: Option<Outcome>,
}

impl App {
    fn new(settings: Settings, shaders: ShaderSources) -> Self {
        Self {
            settings,
            shaders,
            start: Instant::now(),
            window: None,
            renderer: None,
            game: None,
            queue: InputQueue::default(),
            outcome: None,
        }
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        let window_settings = &self.settings.window;
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(window_settings.title.as_str())
                    .with_inner_size(LogicalSize::new(window_settings.width, window_settings.height)),
            )?,
        );

        let mut renderer = pollster::block_on(Renderer::new(window.clone(), &self.shaders))?;
        let game = GameState::new(&mut renderer, &self.settings, self.now())?;
        log::info!("Brick Breaker running");

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.game = Some(game);
        Ok(())
    }

    fn finish(&mut self, event_loop: &ActiveEventLoop, outcome: Outcome) {
        self.outcome = Some(outcome);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.now();
        let (Some(renderer), Some(game)) = (self.renderer.as_mut(), self.game.as_mut()) else {
            return;
        };

        if self.queue.drain_into(game) == Signal::Quit {
            self.finish(event_loop, Outcome::Quit);
            return;
        }

        advance(game, now);
        draw_scene(renderer, game);
        maybe_spawn(game, now);

        match renderer.present() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost; reconfiguring");
                renderer.resize(renderer.size.0, renderer.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                self.finish(event_loop, Outcome::Fatal("GPU out of memory".to_string()));
                return;
            }
            Err(e) => log::warn!("Skipping frame: {:?}", e),
        }

        if game.is_over() {
            let score = game.score;
            self.finish(event_loop, Outcome::GameOver { score });
            return;
        }

        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {}", e);
            self.finish(event_loop, Outcome::InitFailed(e));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        logical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                // Q follows the keyboard layout; everything else is positional
                let typed = match &logical_key {
                    LogicalKey::Character(text) => Key::from_typed(text.as_str()),
                    _ => None,
                };
                let positional = match physical_key {
                    PhysicalKey::Code(code) => map_key(code),
                    _ => None,
                };
                if let Some(key) = typed.or(positional) {
                    let action = match (state, repeat) {
                        (ElementState::Pressed, true) => KeyAction::Repeat,
                        (ElementState::Pressed, false) => KeyAction::Press,
                        (ElementState::Released, _) => KeyAction::Release,
                    };
                    self.queue.push(InputEvent::Key(key, action));
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    WinitButton::Left => MouseButton::Left,
                    WinitButton::Right => MouseButton::Right,
                    _ => return,
                };
                let action = match state {
                    ElementState::Pressed => ButtonAction::Press,
                    ElementState::Released => ButtonAction::Release,
                };
                self.queue.push(InputEvent::Mouse(button, action));
            }

            WindowEvent::CursorMoved { position, .. } => {
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                let logical = position.to_logical::<f64>(scale);
                self.queue.push(InputEvent::CursorMoved {
                    x: logical.x,
                    y: logical.y,
                });
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyK => Key::K,
        KeyCode::ControlRight => Key::ControlRight,
        KeyCode::AltRight => Key::AltRight,
        _ => return None,
    };
    Some(key)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Breaker starting...");

    let settings = Settings::load();
    let shaders = ShaderSources::load(&settings.shaders.vertex, &settings.shaders.fragment)
        .inspect_err(|e| log::error!("Startup failed: {}", e))?;

    let event_loop = EventLoop::new().map_err(InitError::from)?;
    let mut app = App::new(settings, shaders);
    event_loop.run_app(&mut app)?;

    match app.outcome {
        Some(Outcome::Quit) => {
            println!();
            println!("Why you close game? :(");
            println!();
            println!();
        }
        Some(Outcome::GameOver { score }) => {
            println!(" ");
            println!(" ");
            println!("GAME OVER. YOUR SCORE IS: {}", score);
            println!();
        }
        Some(Outcome::InitFailed(e)) => return Err(e.into()),
        Some(Outcome::Fatal(message)) => return Err(message.into()),
        None => {}
    }
    Ok(())
}
