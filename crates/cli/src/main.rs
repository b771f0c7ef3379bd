mod app;
mod settings;

use engine::SceneStore;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::App;
use crate::settings::Settings;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::default();
    let store = SceneStore::new(settings.save_path.clone());
    let scene = store.load_or_default();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings, scene);
    let run = event_loop.run_app(&mut app);

    // Saved on every orderly exit, whatever stopped the loop.
    if let Err(e) = store.save(app.scene()) {
        tracing::warn!(path = %store.path().display(), error = %e, "could not save scene");
    }

    run?;
    match app.take_failure() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
