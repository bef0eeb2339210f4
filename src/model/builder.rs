use std::path::PathBuf;

use crate::config::Config;
use crate::file::{MaterialType, PlanetDescriptor};

use super::{Body, BodyKind, Ring, Scene};

/// Texture and tessellation for one ring, parallel to `Scene::rings`.
#[derive(Debug, Clone, PartialEq)]
pub struct RingAsset {
    pub texture: PathBuf,
    pub segments: usize,
}

/// A freshly built scene plus the asset paths the renderer needs for it.
#[derive(Debug, Clone)]
pub struct SceneBlueprint {
    pub scene: Scene,
    /// Indexed by `BodyID`.
    pub body_textures: Vec<PathBuf>,
    pub ring_assets: Vec<RingAsset>,
}

/// Builds the scene from the static configuration and the planet table.
///
/// Bodies are added background first, then the sun, the planets in table
/// order, and finally the configured moons, so every parent precedes its
/// children. Table values get the configured scale factors applied here; the
/// bodies themselves only ever see scene units.
pub fn build_scene(config: &Config, planets: &[PlanetDescriptor]) -> SceneBlueprint {
    let scene_config = &config.scene;
    let mut scene = Scene::new();
    let mut body_textures = vec![];

    let background = Body::new("Background", BodyKind::Background, scene_config.background.size);
    scene.add_body(background);
    body_textures.push(scene_config.background.texture.clone());

    let sun_config = &scene_config.sun;
    let mut sun = Body::new(
        &sun_config.name,
        BodyKind::Sun,
        sun_config.size * scene_config.size_scale,
    );
    sun.set_rotation_speed(sun_config.rotation_speed);
    scene.add_body(sun);
    body_textures.push(sun_config.texture.clone());

    for planet in planets {
        let mut body = Body::new(
            &planet.name,
            BodyKind::Planet,
            planet.size * scene_config.size_scale,
        );
        body.set_orbit(
            planet.orbit_radius * scene_config.orbit_radius_scale,
            planet.orbit_speed * scene_config.orbit_speed_scale,
        );
        body.set_rotation_speed(planet.rotation_speed);
        let material = match planet.material {
            MaterialType::Rocky => &config.materials.rocky,
            MaterialType::Gas => &config.materials.gas,
        };
        body.set_material(material.to_material());
        scene.add_body(body);
        body_textures.push(planet.texture.clone());
    }

    for moon_config in scene_config.moons.iter() {
        let mut moon = Body::new(
            &moon_config.name,
            BodyKind::Moon,
            moon_config.size * scene_config.size_scale,
        );
        moon.set_orbit(
            moon_config.orbit_radius * scene_config.orbit_radius_scale,
            moon_config.orbit_speed * scene_config.orbit_speed_scale,
        );
        moon.set_rotation_speed(moon_config.rotation_speed);
        moon.set_material(config.materials.rocky.to_material());

        match scene.find_body(&moon_config.parent) {
            Some(parent) => moon.set_parent(parent),
            None => log::warn!(
                "Parent {} of {} not found, it will orbit the origin",
                moon_config.parent,
                moon_config.name
            ),
        }
        scene.add_body(moon);
        body_textures.push(moon_config.texture.clone());
    }

    let mut ring_assets = vec![];
    for ring_config in scene_config.rings.iter() {
        let parent = match scene.find_body(&ring_config.planet) {
            Some(parent) => parent,
            None => {
                log::warn!("No body named {}, skipping its ring", ring_config.planet);
                continue;
            }
        };
        let mut ring = Ring::new(
            parent,
            ring_config.inner_radius * scene_config.size_scale,
            ring_config.outer_radius * scene_config.size_scale,
        );
        ring.set_tilt(ring_config.tilt_degrees);
        scene.add_ring(ring);
        ring_assets.push(RingAsset {
            texture: ring_config.texture.clone(),
            segments: ring_config.segments,
        });
    }

    log::info!(
        "Built scene with {} bodies and {} rings",
        scene.num_bodies(),
        scene.rings().len()
    );

    SceneBlueprint {
        scene,
        body_textures,
        ring_assets,
    }
}
