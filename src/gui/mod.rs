use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key};
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::text::Font;
use kiss3d::window::{State, Window};
use nalgebra::{Point2, Point3};

use self::backend::GlBackend;
use self::camera::FlyCamera;
use self::controller::{Controller, KEY_TOGGLE_ORBITS};
use crate::config::Config;
use crate::model::SceneBlueprint;
use crate::render::{FrameView, RenderError, SceneComposer};

mod backend;
pub mod camera;
pub mod controller;
mod shaders;

/// Hands kiss3d's render pass over to the scene composer.
pub struct SceneRenderer {
    backend: GlBackend,
    composer: SceneComposer<GlBackend>,
    // Simulated time to advance on the next render call
    pending_dt: f32,
}

impl SceneRenderer {
    fn new(blueprint: SceneBlueprint, config: &Config) -> Result<Self, RenderError> {
        let mut backend = GlBackend::new();
        let composer = SceneComposer::new(&mut backend, blueprint, config)?;
        Ok(SceneRenderer {
            backend,
            composer,
            pending_dt: 0.0,
        })
    }
}

impl Renderer for SceneRenderer {
    fn render(&mut self, _pass: usize, camera: &mut dyn Camera) {
        let view = camera.view_transform();
        // transformation() is projection * view, and the view is rigid
        let projection = camera.transformation() * view.inverse().to_homogeneous();
        let frame = FrameView::new(view.to_homogeneous(), projection, camera.eye());

        let dt = std::mem::take(&mut self.pending_dt);
        self.composer.render_frame(&mut self.backend, &frame, dt);
    }
}

pub struct Simulation {
    camera: FlyCamera,
    renderer: SceneRenderer,
    controller: Controller,
}

impl Simulation {
    pub fn new(
        config: &Config,
        blueprint: SceneBlueprint,
        window: &mut Window,
    ) -> Result<Self, RenderError> {
        let clear = config.scene.clear_color;
        window.set_background_color(clear[0], clear[1], clear[2]);

        Ok(Simulation {
            camera: FlyCamera::new(&config.camera, window.width(), window.height()),
            renderer: SceneRenderer::new(blueprint, config)?,
            controller: Controller::new(&config.simulation),
        })
    }

    fn process_user_input(&mut self, window: &mut Window) {
        for event in window.events().iter() {
            self.controller.process_event(&event.value);
        }

        let held = |key| window.get_key(key) == Action::Press;
        let shift = held(Key::LShift) || held(Key::RShift);
        if self.controller.poll_orbit_toggle(shift, held(KEY_TOGGLE_ORBITS)) {
            let composer = &mut self.renderer.composer;
            composer.set_show_orbits(!composer.show_orbits());
            log::info!(
                "Orbit overlay {}",
                if composer.show_orbits() { "on" } else { "off" }
            );
        }
    }

    fn hud_text(&self) -> String {
        format!(
            "Time x{}{}\n{:.0} FPS\nOrbits {} (Shift+H)",
            self.controller.time_scale(),
            if self.controller.is_paused() { " (paused)" } else { "" },
            self.controller.fps(),
            if self.renderer.composer.show_orbits() { "on" } else { "off" },
        )
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (
            Some(&mut self.camera),
            None,
            Some(&mut self.renderer),
            None,
        )
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window);
        self.renderer.pending_dt += self.controller.frame_dt();

        window.draw_text(
            &self.hud_text(),
            &Point2::origin(),
            40.0,
            &Font::default(),
            &Point3::new(1.0, 1.0, 1.0),
        );
        self.controller.increment_frame_counter();
    }
}
