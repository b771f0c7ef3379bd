use std::sync::Arc;

use engine::{Controller, FrameInput, MouseButton, RenderScene, Scene};
use renderer_wgpu::{RenderError, Renderer};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::settings::Settings;

/// Window host. Owns the scene for the life of the event loop and feeds the
/// controller one [`FrameInput`] per redraw.
pub struct App {
    settings: Settings,
    scene: Scene,
    controller: Controller,
    input: FrameInput,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    failure: Option<anyhow::Error>,
}

impl App {
    pub fn new(settings: Settings, scene: Scene) -> Self {
        Self {
            settings,
            scene,
            controller: Controller::new(),
            input: FrameInput::default(),
            window: None,
            renderer: None,
            failure: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Error that stopped the loop early, if any.
    pub fn take_failure(&mut self) -> Option<anyhow::Error> {
        self.failure.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!(error = %err, "shutting down");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let outcome = self.controller.tick(&mut self.scene, &self.input);
        self.input.clicks.clear();

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let render_scene = RenderScene::build(&self.scene, outcome.highlighted);
        if let Err(e) = renderer.render(&render_scene) {
            if e.is_fatal() {
                self.fail(event_loop, e.into());
            } else {
                tracing::warn!(error = %e, "dropped frame");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(PhysicalSize::new(self.settings.width, self.settings.height))
            .with_resizable(false);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let renderer: Result<Renderer, RenderError> =
            futures::executor::block_on(Renderer::new(window.clone()));
        match renderer {
            Ok(renderer) => {
                tracing::info!(
                    width = self.settings.width,
                    height = self.settings.height,
                    rects = self.scene.len(),
                    "window created"
                );
                self.renderer = Some(renderer);
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    tracing::info!("escape pressed");
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.pointer = (position.x.floor() as i32, position.y.floor() as i32);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_button(button) else {
                    return;
                };
                let pressed = state == ElementState::Pressed;
                if button == MouseButton::Left {
                    self.input.primary_down = pressed;
                }
                if pressed {
                    self.input.clicks.push(button);
                }
            }

            WindowEvent::RedrawRequested => self.frame(event_loop),

            _ => {}
        }
    }
}

fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_the_three_main_buttons_are_forwarded() {
        assert_eq!(map_button(winit::event::MouseButton::Left), Some(MouseButton::Left));
        assert_eq!(map_button(winit::event::MouseButton::Right), Some(MouseButton::Right));
        assert_eq!(map_button(winit::event::MouseButton::Middle), Some(MouseButton::Middle));
        assert_eq!(map_button(winit::event::MouseButton::Back), None);
    }
}
