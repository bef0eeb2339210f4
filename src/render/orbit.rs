use nalgebra::{Matrix4, Vector3};

use crate::math::mesh::generate_orbit_circle;
use crate::model::BodyID;

use super::{FrameView, Gpu, ShaderProgram};

/// The circle a body travels on, drawn as a flat-colored line loop.
///
/// The circle is built around the origin, so callers pass a model matrix to
/// move it: identity for bodies orbiting the sun, a translation to the
/// parent's position for moons.
pub struct OrbitPath<G: Gpu> {
    body: BodyID,
    lines: G::Lines,
    color: Vector3<f32>,
}

impl<G: Gpu> OrbitPath<G> {
    pub fn new(
        gpu: &mut G,
        body: BodyID,
        radius: f32,
        color: Vector3<f32>,
        segment_count: usize,
    ) -> Self {
        let points = generate_orbit_circle(radius, segment_count);
        OrbitPath {
            body,
            lines: gpu.upload_line_loop(&points),
            color,
        }
    }

    /// The body whose orbit this is.
    pub fn body(&self) -> BodyID {
        self.body
    }

    pub fn render(&mut self, gpu: &mut G, frame: &FrameView, model: &Matrix4<f32>) {
        gpu.use_shader(ShaderProgram::Orbit);
        gpu.set_mat4("model", model);
        gpu.set_mat4("view", &frame.view);
        gpu.set_mat4("projection", &frame.projection);
        gpu.set_vec3("color", &self.color);
        gpu.draw_line_loop(&mut self.lines);
    }
}
