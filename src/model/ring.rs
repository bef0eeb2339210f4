use nalgebra::{Matrix4, Point3, Vector3};

use super::BodyID;

/// A flat ring (like Saturn's) that follows a body around.
///
/// The ring doesn't integrate anything on its own: every frame it is handed
/// the parent's freshly computed position and spin and copies them.
#[derive(Debug, Clone)]
pub struct Ring {
    parent: BodyID,
    inner_radius: f32,
    outer_radius: f32,
    position: Point3<f32>,
    rotation_angle: f32,
    tilt_angle: f32,
}

impl Ring {
    pub fn new(parent: BodyID, inner_radius: f32, outer_radius: f32) -> Self {
        Ring {
            parent,
            inner_radius,
            outer_radius,
            position: Point3::origin(),
            rotation_angle: 0.0,
            tilt_angle: 0.0,
        }
    }

    /// Axial tilt in degrees; constant for the life of the ring.
    pub fn set_tilt(&mut self, degrees: f32) {
        self.tilt_angle = degrees;
    }

    pub fn update(&mut self, parent_position: Point3<f32>, parent_rotation: f32) {
        self.position = parent_position;
        self.rotation_angle = parent_rotation;
    }

    pub fn parent(&self) -> BodyID {
        self.parent
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    pub fn tilt_angle(&self) -> f32 {
        self.tilt_angle
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position.coords)
            * Matrix4::from_axis_angle(&Vector3::y_axis(), self.rotation_angle.to_radians())
            * Matrix4::from_axis_angle(&Vector3::x_axis(), self.tilt_angle.to_radians())
    }
}
