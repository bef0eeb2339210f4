mod body;
mod builder;
mod ring;

pub use body::{Body, BodyID, BodyKind, Material};
pub use builder::{build_scene, RingAsset, SceneBlueprint};
pub use ring::Ring;

/// Every simulated object in one session.
///
/// Bodies are stored in insertion order and never removed, so a `BodyID` stays
/// valid for as long as the scene lives. A body's parent must already be in the
/// scene when the body is added; updating bodies in index order therefore
/// always updates a parent before its children.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    bodies: Vec<Body>,
    rings: Vec<Ring>,
}

impl Scene {
    pub fn new() -> Self {
        Scene {
            bodies: vec![],
            rings: vec![],
        }
    }

    pub fn add_body(&mut self, body: Body) -> BodyID {
        let id = BodyID(self.bodies.len());
        if let Some(parent) = body.parent() {
            assert!(
                parent < id,
                "Parent {:?} of {} must be added before it",
                parent,
                body.name
            );
        }
        log::debug!("Added body {} as {:?}", body.name, id);
        self.bodies.push(body);
        id
    }

    pub fn add_ring(&mut self, ring: Ring) -> usize {
        assert!(
            ring.parent().0 < self.bodies.len(),
            "Ring parent {:?} is not in the scene",
            ring.parent()
        );
        self.rings.push(ring);
        self.rings.len() - 1
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn get_body_mut(&mut self, id: BodyID) -> &mut Body {
        &mut self.bodies[id.0]
    }

    /// Case-insensitive lookup; returns the first body with that name.
    pub fn find_body(&self, name: &str) -> Option<BodyID> {
        self.bodies
            .iter()
            .position(|b| b.name.eq_ignore_ascii_case(name))
            .map(BodyID)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyID, &Body)> + '_ {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyID(i), b))
    }

    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies_of_kind(&self, kind: BodyKind) -> impl Iterator<Item = BodyID> + '_ {
        self.bodies()
            .filter(move |(_, b)| b.kind == kind)
            .map(|(id, _)| id)
    }

    pub fn background(&self) -> Option<BodyID> {
        self.bodies_of_kind(BodyKind::Background).next()
    }

    pub fn sun(&self) -> Option<BodyID> {
        self.bodies_of_kind(BodyKind::Sun).next()
    }

    /// Planets and moons, in the order they get updated and drawn.
    pub fn lit_bodies(&self) -> Vec<BodyID> {
        let mut ids: Vec<_> = self.bodies_of_kind(BodyKind::Planet).collect();
        ids.extend(self.bodies_of_kind(BodyKind::Moon));
        ids
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Advances one body, using its parent's current position.
    pub fn update_body(&mut self, id: BodyID, dt: f32) {
        let parent_position = self.bodies[id.0]
            .parent()
            .map(|parent| self.bodies[parent.0].position());
        self.bodies[id.0].update(dt, parent_position);
    }

    /// Snaps every ring to its parent's current position and spin.
    pub fn update_rings(&mut self) {
        for ring in self.rings.iter_mut() {
            let parent = &self.bodies[ring.parent().0];
            ring.update(parent.position(), parent.rotation_angle());
        }
    }

    /// Advances everything by `dt` in the same order the renderer does: the
    /// sun, then planets, then moons, then rings. The background is static.
    pub fn advance(&mut self, dt: f32) {
        if let Some(sun) = self.sun() {
            self.update_body(sun, dt);
        }
        for id in self.lit_bodies() {
            self.update_body(id, dt);
        }
        self.update_rings();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::{Point3, Vector3};

    use super::*;

    fn small_scene() -> (Scene, BodyID, BodyID, BodyID) {
        let mut scene = Scene::new();
        scene.add_body(Body::new("Stars", BodyKind::Background, 100.0));
        let sun = scene.add_body(Body::new("Sun", BodyKind::Sun, 2.0));

        let mut earth = Body::new("Earth", BodyKind::Planet, 1.0);
        earth.set_orbit(10.0, 36.0);
        let earth = scene.add_body(earth);

        let mut moon = Body::new("Moon", BodyKind::Moon, 0.3);
        moon.set_orbit(2.0, 90.0);
        moon.set_parent(earth);
        let moon = scene.add_body(moon);

        (scene, sun, earth, moon)
    }

    #[test]
    fn test_lookup() {
        let (scene, sun, earth, moon) = small_scene();
        assert_eq!(scene.find_body("earth"), Some(earth));
        assert_eq!(scene.find_body("Moon"), Some(moon));
        assert_eq!(scene.find_body("Pluto"), None);
        assert_eq!(scene.sun(), Some(sun));
        assert_eq!(scene.background(), Some(BodyID(0)));
        assert_eq!(scene.lit_bodies(), vec![earth, moon]);
    }

    #[test]
    fn test_advance_moves_moon_with_parent() {
        let (mut scene, _, earth, moon) = small_scene();
        scene.advance(1.0);

        let earth_pos = scene.get_body(earth).position();
        let moon_pos = scene.get_body(moon).position();
        let theta = 36f32.to_radians();
        assert_abs_diff_eq!(
            earth_pos,
            Point3::new(10.0 * theta.cos(), 0.0, 10.0 * theta.sin()),
            epsilon = 1e-4
        );
        assert_abs_diff_eq!(moon_pos, earth_pos + Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-4);
    }

    #[test]
    fn test_rings_follow_parent() {
        let (mut scene, _, earth, _) = small_scene();
        scene.get_body_mut(earth).set_rotation_speed(30.0);
        scene.add_ring(Ring::new(earth, 1.5, 2.5));

        scene.advance(0.5);
        let ring = &scene.rings()[0];
        assert_eq!(ring.position(), scene.get_body(earth).position());
        assert_eq!(ring.rotation_angle(), 15.0);
    }

    #[test]
    #[should_panic]
    fn test_parent_must_exist_first() {
        let mut scene = Scene::new();
        let mut orphan = Body::new("Orphan", BodyKind::Moon, 1.0);
        orphan.set_parent(BodyID(4));
        scene.add_body(orphan);
    }
}
