use nalgebra::{Matrix4, Point3, Vector3};

use crate::math::angle::wrap_degrees;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

/// Which pass a body is drawn in. The motion model is the same for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Background,
    Sun,
    Planet,
    Moon,
}

/// Reflectance coefficients consumed by the lit shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub kind: BodyKind,
    radius: f32,
    position: Point3<f32>,
    // All angles and speeds are in degrees and degrees per second
    rotation_angle: f32,
    rotation_speed: f32,
    orbit_radius: f32,
    orbit_speed: f32,
    orbit_angle: f32,
    parent: Option<BodyID>,
    material: Option<Material>,
}

impl Body {
    pub fn new(name: &str, kind: BodyKind, radius: f32) -> Self {
        Body {
            name: name.to_owned(),
            kind,
            radius,
            position: Point3::origin(),
            rotation_angle: 0.0,
            rotation_speed: 0.0,
            orbit_radius: 0.0,
            orbit_speed: 0.0,
            orbit_angle: 0.0,
            parent: None,
            material: None,
        }
    }

    /// Sets the orbit, in scene units and degrees per second. An orbit radius
    /// of zero means the body does not orbit at all.
    pub fn set_orbit(&mut self, orbit_radius: f32, orbit_speed: f32) {
        self.orbit_radius = orbit_radius;
        self.orbit_speed = orbit_speed;
    }

    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.rotation_speed = speed;
    }

    pub fn set_parent(&mut self, parent: BodyID) {
        self.parent = Some(parent);
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = Some(material);
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    pub fn orbit_speed(&self) -> f32 {
        self.orbit_speed
    }

    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    pub fn parent(&self) -> Option<BodyID> {
        self.parent
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbit_radius > 0.0
    }

    /// Position relative to whatever this body orbits.
    pub fn orbit_offset(&self) -> Vector3<f32> {
        let theta = self.orbit_angle.to_radians();
        Vector3::new(
            self.orbit_radius * theta.cos(),
            0.0,
            self.orbit_radius * theta.sin(),
        )
    }

    /// Advances rotation and orbit by `dt` seconds.
    ///
    /// `parent_position` must be the parent's position for *this* frame, so
    /// parents have to be updated before their children. Non-orbiting bodies
    /// keep their position but still spin.
    pub fn update(&mut self, dt: f32, parent_position: Option<Point3<f32>>) {
        self.rotation_angle = wrap_degrees(self.rotation_angle + self.rotation_speed * dt);

        if !self.is_orbiting() {
            return;
        }

        self.orbit_angle = wrap_degrees(self.orbit_angle + self.orbit_speed * dt);
        let center = parent_position.unwrap_or_else(Point3::origin);
        self.position = center + self.orbit_offset();
    }

    /// Translate to the current position, then spin around the local Y axis.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position.coords)
            * Matrix4::from_axis_angle(&Vector3::y_axis(), self.rotation_angle.to_radians())
    }
}
