use nalgebra::{Matrix4, Vector3};

use crate::config::{Config, LightingConfig};
use crate::model::{BodyID, BodyKind, Scene, SceneBlueprint};

use super::{BodyEntity, FrameView, Gpu, OrbitPath, RenderError, RingEntity, ShaderProgram};

/// Light intensities handed to the lit shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl From<&LightingConfig> for Lighting {
    fn from(config: &LightingConfig) -> Self {
        Lighting {
            ambient: Vector3::from(config.ambient),
            diffuse: Vector3::from(config.diffuse),
            specular: Vector3::from(config.specular),
        }
    }
}

/// Owns the scene and everything uploaded for it, and draws one frame at a
/// time in a fixed order:
///
/// 1. clear
/// 2. background, with depth writes off
/// 3. sun, unlit
/// 4. orbit overlays, if enabled
/// 5. planets then moons, lit by the sun
/// 6. rings, alpha blended
///
/// Each body's state is advanced right before it is drawn, so parents are
/// always current by the time their children and rings need them.
pub struct SceneComposer<G: Gpu> {
    scene: Scene,
    // Indexed by BodyID, parallel to the scene's bodies
    bodies: Vec<BodyEntity<G>>,
    // Parallel to the scene's rings
    rings: Vec<RingEntity<G>>,
    orbits: Vec<OrbitPath<G>>,
    lighting: Lighting,
    clear_color: Vector3<f32>,
    show_orbits: bool,
}

impl<G: Gpu> SceneComposer<G> {
    pub fn new(gpu: &mut G, blueprint: SceneBlueprint, config: &Config) -> Result<Self, RenderError> {
        let SceneBlueprint {
            scene,
            body_textures,
            ring_assets,
        } = blueprint;
        let scene_config = &config.scene;

        let mut bodies = Vec::with_capacity(scene.num_bodies());
        for ((_, body), texture_path) in scene.bodies().zip(body_textures.iter()) {
            let texture = gpu.load_texture(texture_path);
            let entity = BodyEntity::new(
                gpu,
                body.radius(),
                texture,
                scene_config.sphere_stacks,
                scene_config.sphere_sectors,
            )?;
            log::debug!("Uploaded {} ({} triangles)", body.name, entity.triangle_count());
            bodies.push(entity);
        }

        let mut rings = Vec::with_capacity(scene.rings().len());
        for (ring, asset) in scene.rings().iter().zip(ring_assets.iter()) {
            let texture = gpu.load_texture(&asset.texture);
            rings.push(RingEntity::new(gpu, ring, texture, asset.segments)?);
        }

        // Planets orbit the sun; moons only get an overlay if they have
        // something to orbit.
        let orbit_color = Vector3::from(scene_config.orbit_color);
        let mut orbits = vec![];
        for id in scene.lit_bodies() {
            let body = scene.get_body(id);
            if !body.is_orbiting() {
                continue;
            }
            if body.kind == BodyKind::Moon && body.parent().is_none() {
                continue;
            }
            orbits.push(OrbitPath::new(
                gpu,
                id,
                body.orbit_radius(),
                orbit_color,
                scene_config.orbit_segments,
            ));
        }

        Ok(SceneComposer {
            scene,
            bodies,
            rings,
            orbits,
            lighting: Lighting::from(&config.lighting),
            clear_color: Vector3::from(scene_config.clear_color),
            show_orbits: config.simulation.show_orbits,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }

    pub fn set_show_orbits(&mut self, show: bool) {
        self.show_orbits = show;
    }

    /// Advances the scene by `dt` seconds and draws it.
    pub fn render_frame(&mut self, gpu: &mut G, frame: &FrameView, dt: f32) {
        gpu.clear(&self.clear_color);

        self.draw_background(gpu, frame);
        let sun_position = self.update_and_draw_sun(gpu, frame, dt);

        if self.show_orbits {
            self.draw_orbits(gpu, frame);
        }

        self.update_and_draw_lit_bodies(gpu, frame, dt, sun_position);
        self.update_and_draw_rings(gpu, frame);
    }

    fn draw_background(&mut self, gpu: &mut G, frame: &FrameView) {
        let id = match self.scene.background() {
            Some(id) => id,
            None => return,
        };

        gpu.set_depth_write(false);
        self.draw_body(gpu, id, ShaderProgram::Unlit, frame);
        gpu.set_depth_write(true);
    }

    fn update_and_draw_sun(&mut self, gpu: &mut G, frame: &FrameView, dt: f32) -> Vector3<f32> {
        let id = match self.scene.sun() {
            Some(id) => id,
            None => return Vector3::zeros(),
        };

        self.scene.update_body(id, dt);
        self.draw_body(gpu, id, ShaderProgram::Unlit, frame);
        self.scene.get_body(id).position().coords
    }

    fn draw_orbits(&mut self, gpu: &mut G, frame: &FrameView) {
        for orbit in self.orbits.iter_mut() {
            // Moons' orbits are centered on wherever the parent is right now
            let model = match self.scene.get_body(orbit.body()).parent() {
                Some(parent) => {
                    let center = self.scene.get_body(parent).position();
                    Matrix4::new_translation(&center.coords)
                }
                None => Matrix4::identity(),
            };
            orbit.render(gpu, frame, &model);
        }
    }

    fn update_and_draw_lit_bodies(
        &mut self,
        gpu: &mut G,
        frame: &FrameView,
        dt: f32,
        sun_position: Vector3<f32>,
    ) {
        gpu.use_shader(ShaderProgram::Lit);
        gpu.set_vec3("sunPos", &sun_position);
        gpu.set_vec3("viewPos", &frame.eye.coords);
        gpu.set_vec3("light_La", &self.lighting.ambient);
        gpu.set_vec3("light_Ld", &self.lighting.diffuse);
        gpu.set_vec3("light_Le", &self.lighting.specular);

        for id in self.scene.lit_bodies() {
            self.scene.update_body(id, dt);
            self.draw_body(gpu, id, ShaderProgram::Lit, frame);
        }
    }

    fn update_and_draw_rings(&mut self, gpu: &mut G, frame: &FrameView) {
        self.scene.update_rings();
        for (entity, ring) in self.rings.iter_mut().zip(self.scene.rings()) {
            entity.render(gpu, ring, frame);
        }
    }

    fn draw_body(&mut self, gpu: &mut G, id: BodyID, program: ShaderProgram, frame: &FrameView) {
        let body = self.scene.get_body(id);
        self.bodies[id.0].render(gpu, program, body, frame);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    use super::*;
    use crate::file::{MaterialType, PlanetDescriptor};
    use crate::model::build_scene;
    use crate::render::recording::{Call, RecordingGpu};

    fn planet(name: &str, orbit_radius: f32, orbit_speed: f32) -> PlanetDescriptor {
        PlanetDescriptor {
            name: name.to_owned(),
            orbit_speed,
            orbit_radius,
            size: 1.0,
            texture: PathBuf::from(format!("{}.jpg", name.to_lowercase())),
            rotation_speed: 10.0,
            material: MaterialType::Rocky,
        }
    }

    fn composer(show_orbits: bool) -> (RecordingGpu, SceneComposer<RecordingGpu>) {
        let mut config = Config::default();
        config.scene.sphere_stacks = 6;
        config.scene.sphere_sectors = 6;
        config.scene.orbit_segments = 32;
        config.simulation.show_orbits = show_orbits;

        let planets = vec![planet("Earth", 1.0, 1.0), planet("Saturn", 9.5, 0.1)];
        let blueprint = build_scene(&config, &planets);

        let mut gpu = RecordingGpu::new();
        let composer = SceneComposer::new(&mut gpu, blueprint, &config).unwrap();
        gpu.take_calls();
        (gpu, composer)
    }

    fn frame() -> FrameView {
        FrameView::new(
            Matrix4::identity(),
            Matrix4::identity(),
            Point3::new(0.0, 10.0, 60.0),
        )
    }

    fn shaders_used(calls: &[Call]) -> Vec<ShaderProgram> {
        let mut programs: Vec<ShaderProgram> = vec![];
        for call in calls {
            if let Call::UseShader(program) = call {
                if programs.last() != Some(program) {
                    programs.push(*program);
                }
            }
        }
        programs
    }

    #[test]
    fn test_pass_order() {
        let (mut gpu, mut composer) = composer(true);
        composer.render_frame(&mut gpu, &frame(), 0.1);
        let calls = gpu.take_calls();

        assert_eq!(calls[0], Call::Clear);
        assert_eq!(calls[1], Call::DepthWrite(false));
        assert_eq!(
            shaders_used(&calls),
            vec![
                ShaderProgram::Unlit,
                ShaderProgram::Orbit,
                ShaderProgram::Lit,
                ShaderProgram::Ring,
            ]
        );

        // Exactly one background draw happens with depth writes off
        let depth_on = calls
            .iter()
            .position(|c| *c == Call::DepthWrite(true))
            .unwrap();
        let draws_before = calls[..depth_on]
            .iter()
            .filter(|c| matches!(c, Call::DrawTriangles(_)))
            .count();
        assert_eq!(draws_before, 1);

        // Earth, Saturn, Moon orbits
        let line_loops = calls
            .iter()
            .filter(|c| matches!(c, Call::DrawLineLoop(_)))
            .count();
        assert_eq!(line_loops, 3);

        // background, sun, two planets, moon, ring
        let triangles = calls
            .iter()
            .filter(|c| matches!(c, Call::DrawTriangles(_)))
            .count();
        assert_eq!(triangles, 6);
    }

    #[test]
    fn test_lighting_uniforms_set_once() {
        let (mut gpu, mut composer) = composer(false);
        composer.render_frame(&mut gpu, &frame(), 0.1);
        let calls = gpu.take_calls();

        for name in ["sunPos", "viewPos", "light_La", "light_Ld", "light_Le"] {
            let count = calls
                .iter()
                .filter(|c| matches!(c, Call::SetVec3(n, _) if n == name))
                .count();
            assert_eq!(count, 1, "{}", name);
        }
        assert!(calls.contains(&Call::SetVec3(
            "viewPos".to_owned(),
            Vector3::new(0.0, 10.0, 60.0)
        )));
        assert!(calls.contains(&Call::SetVec3("sunPos".to_owned(), Vector3::zeros())));
    }

    #[test]
    fn test_orbit_toggle() {
        let (mut gpu, mut composer) = composer(false);
        composer.render_frame(&mut gpu, &frame(), 0.1);
        let calls = gpu.take_calls();
        assert!(!calls.iter().any(|c| matches!(c, Call::DrawLineLoop(_))));
        assert!(!shaders_used(&calls).contains(&ShaderProgram::Orbit));

        composer.set_show_orbits(true);
        composer.render_frame(&mut gpu, &frame(), 0.1);
        assert!(gpu.calls.iter().any(|c| matches!(c, Call::DrawLineLoop(_))));
    }

    #[test]
    fn test_blending_only_around_rings() {
        let (mut gpu, mut composer) = composer(true);
        composer.render_frame(&mut gpu, &frame(), 0.1);
        let calls = gpu.take_calls();

        let blend_calls: Vec<_> = calls
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, Call::Blend(_)))
            .collect();
        assert_eq!(blend_calls.len(), 2);
        assert_eq!(*blend_calls[0].1, Call::Blend(true));
        assert_eq!(*blend_calls[1].1, Call::Blend(false));
        assert_eq!(blend_calls[1].0, calls.len() - 1);
    }

    #[test]
    fn test_moon_orbit_centered_on_parent() {
        let (mut gpu, mut composer) = composer(true);
        composer.render_frame(&mut gpu, &frame(), 0.5);
        gpu.take_calls();

        // The overlay pass runs before the lit pass, so this frame's moon
        // orbit is centered on where Earth was after the previous frame
        let earth = composer.scene().find_body("Earth").unwrap();
        let earth_position = composer.scene().get_body(earth).position();
        composer.render_frame(&mut gpu, &frame(), 0.5);
        let calls = gpu.take_calls();

        let models: Vec<Matrix4<f32>> = calls
            .iter()
            .zip(calls.iter().skip(1))
            .filter_map(|(a, b)| match (a, b) {
                (Call::UseShader(ShaderProgram::Orbit), Call::SetMat4(name, m)) if name == "model" => {
                    Some(*m)
                }
                _ => None,
            })
            .collect();
        assert_eq!(models.len(), 3);
        assert_eq!(models[0], Matrix4::identity());
        assert_eq!(models[1], Matrix4::identity());
        assert_relative_eq!(
            models[2],
            Matrix4::new_translation(&earth_position.coords),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_frame_advances_scene() {
        let (mut gpu, mut composer) = composer(false);
        let earth = composer.scene().find_body("Earth").unwrap();
        composer.render_frame(&mut gpu, &frame(), 0.5);

        // 1.0 deg/s scaled by 50, for half a second
        assert_relative_eq!(composer.scene().get_body(earth).orbit_angle(), 25.0);

        let saturn = composer.scene().find_body("Saturn").unwrap();
        let ring = &composer.scene().rings()[0];
        assert_eq!(ring.position(), composer.scene().get_body(saturn).position());
    }
}
