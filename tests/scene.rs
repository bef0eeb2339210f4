use std::path::Path;

use approx::assert_abs_diff_eq;
use nalgebra::{Point3, Vector3};

use rust_solar::config::Config;
use rust_solar::file::{parse_planets, read_planets, MaterialType, ParseMode};
use rust_solar::model::{build_scene, Body, BodyKind, Scene};

#[test]
fn full_revolution_returns_to_start() {
    let mut scene = Scene::new();
    let mut sun = Body::new("Sun", BodyKind::Sun, 2.0);
    sun.set_rotation_speed(10.0);
    let sun = scene.add_body(sun);

    let mut planet = Body::new("Test", BodyKind::Planet, 1.0);
    planet.set_orbit(10.0, 360.0);
    let planet = scene.add_body(planet);

    // A zero step places everything on its orbit without moving it
    scene.advance(0.0);
    let start = scene.get_body(planet).position();
    assert_abs_diff_eq!(start, Point3::new(10.0, 0.0, 0.0), epsilon = 1e-4);

    scene.advance(0.25);
    assert_abs_diff_eq!(
        scene.get_body(planet).position(),
        Point3::new(0.0, 0.0, 10.0),
        epsilon = 1e-4
    );

    for _ in 0..3 {
        scene.advance(0.25);
    }
    assert_abs_diff_eq!(scene.get_body(planet).position(), start, epsilon = 1e-4);
    assert!(scene.get_body(planet).orbit_angle() < 360.0);

    assert_eq!(scene.get_body(sun).position(), Point3::origin());
    assert_abs_diff_eq!(scene.get_body(sun).rotation_angle(), 10.0, epsilon = 1e-4);
}

#[test]
fn moon_tracks_planet_through_a_year() {
    let mut config = Config::default();
    config.scene.rings.clear();
    let text = "name,orbitSpeed,orbitRadius,size,texture,rotationSpeed,type\n\
                Earth,1.0,1.0,1.0,earth.jpg,10.0,rocky\n";
    let planets = parse_planets(text, ParseMode::Strict).unwrap();
    let mut scene = build_scene(&config, &planets).scene;

    let earth = scene.find_body("Earth").unwrap();
    let moon = scene.find_body("Moon").unwrap();
    let moon_radius = scene.get_body(moon).orbit_radius();

    // Earth goes round at 50 deg/s, so 7.2 s is one lap
    for _ in 0..72 {
        scene.advance(0.1);
        let offset: Vector3<f32> =
            scene.get_body(moon).position() - scene.get_body(earth).position();
        assert_abs_diff_eq!(offset.norm(), moon_radius, epsilon = 1e-3);
        assert_abs_diff_eq!(offset.y, 0.0);
    }
    assert_abs_diff_eq!(
        scene.get_body(earth).position(),
        Point3::new(100.0, 0.0, 0.0),
        epsilon = 1e-2
    );
}

#[test]
fn bundled_planet_table_builds() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data/planets.csv");
    let planets = read_planets(&path, ParseMode::Strict).unwrap();
    assert_eq!(planets.len(), 8);
    assert_eq!(planets[2].name, "Earth");
    assert_eq!(planets[4].material, MaterialType::Gas);

    let blueprint = build_scene(&Config::default(), &planets);
    let scene = &blueprint.scene;

    // background, sun, eight planets, the moon
    assert_eq!(scene.num_bodies(), 11);
    assert_eq!(scene.lit_bodies().len(), 9);
    assert_eq!(scene.rings().len(), 1);

    let saturn = scene.find_body("Saturn").unwrap();
    assert_eq!(scene.rings()[0].parent(), saturn);
    assert!(scene.rings()[0].inner_radius() > scene.get_body(saturn).radius());
}
