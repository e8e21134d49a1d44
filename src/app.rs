use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::game::config::{GameConfig, ObstaclePlacement};
use crate::game::input::InputController;
use crate::game::session::SessionState;
use crate::render::camera;
use crate::render::engine::{MeshId, RenderEngine};
use crate::sim::tick::GameLoop;
use crate::surface;

/// Simulation ticks per radian of vehicle travel around the loop.
const VEHICLE_RATE: f64 = 50.0;

pub struct App {
    engine: Option<RenderEngine>,
    session: SessionState,
    input: InputController,
    game_loop: GameLoop,
    obstacles: Vec<ObstaclePlacement>,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        Self {
            engine: None,
            session: SessionState::new(),
            input: InputController::new(config.key_bindings),
            game_loop: GameLoop::new(),
            obstacles: config.scene.obstacles,
        }
    }

    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(engine) = &self.engine else {
            return;
        };

        if let Some(dt) = self.game_loop.begin_frame() {
            let ticks = self.game_loop.accumulate(dt);
            for _ in 0..ticks {
                self.session.advance();
            }
        }

        let ticks = self.game_loop.elapsed_ticks();
        let view_proj = camera::view_proj(ticks);
        let vehicle_angle = (ticks / VEHICLE_RATE).rem_euclid(std::f64::consts::TAU) as f32;

        // Fixed draw order: strip first, then vehicle, then obstacles.
        let mut entities = Vec::with_capacity(2 + self.obstacles.len());
        entities.push((MeshId::Strip, glam::Mat4::IDENTITY));
        entities.push((
            MeshId::Vehicle,
            surface::surface_transform(
                vehicle_angle,
                self.session.lateral.current,
                self.session.vertical.current,
            ),
        ));
        for placement in &self.obstacles {
            entities.push((
                MeshId::Obstacle,
                surface::surface_transform(placement.angle, placement.lateral, placement.vertical),
            ));
        }

        match engine.draw_frame(view_proj, &entities) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                engine
                    .gpu
                    .surface
                    .configure(&engine.gpu.device, &engine.gpu.config);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => log::error!("render error: {e:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title("Ribbonride")
            .with_inner_size(winit::dpi::LogicalSize::new(900, 900));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match RenderEngine::new(window) {
            Ok(engine) => {
                log::info!(
                    "render engine up, scene has {} obstacle(s)",
                    self.obstacles.len()
                );
                self.engine = Some(engine);
            }
            Err(e) => {
                log::error!("failed to start rendering: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        use winit::keyboard::{KeyCode, PhysicalKey};

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if event.state.is_pressed() {
                        if code == KeyCode::Escape {
                            event_loop.exit();
                        } else {
                            self.input.on_key(code, &mut self.session, Instant::now());
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = &self.engine {
            engine.gpu.window.request_redraw();
        }
    }
}
