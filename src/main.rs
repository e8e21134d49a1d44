mod app;
mod game;
mod render;
mod sim;
mod surface;

use app::App;
use game::config::GameConfig;
use game::input::SteerAction;
use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    let config = GameConfig::load();
    for action in SteerAction::all() {
        if let Some(bind) = config.key_bindings.get(action) {
            log::info!("{}: {}", action.display_name(), bind.display_name());
        }
    }

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("event loop error");
}
