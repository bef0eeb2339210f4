//! Frame composition on top of a small, backend-agnostic GPU interface.
//!
//! The entities and the composer only talk to [`Gpu`]; the kiss3d/OpenGL
//! implementation lives in `gui::backend`. Uniforms are set by name on
//! whichever program was last passed to [`Gpu::use_shader`], the same way the
//! underlying GL calls behave.

use std::path::Path;

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

use crate::math::mesh::MeshData;

mod body;
mod composer;
mod orbit;
mod ring;

#[cfg(test)]
pub(crate) mod recording;

pub use body::BodyEntity;
pub use composer::{Lighting, SceneComposer};
pub use orbit::OrbitPath;
pub use ring::RingEntity;

/// The four shader programs a frame uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderProgram {
    /// Texture sampled directly, no lighting. Background and sun.
    Unlit,
    /// Phong lighting from the sun.
    Lit,
    /// Textured, alpha-blended ring geometry.
    Ring,
    /// Flat-colored line loops.
    Orbit,
}

impl ShaderProgram {
    pub const ALL: [ShaderProgram; 4] = [
        ShaderProgram::Unlit,
        ShaderProgram::Lit,
        ShaderProgram::Ring,
        ShaderProgram::Orbit,
    ];
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("mesh has {0} vertices, more than 16-bit indices can address")]
    TooManyVertices(usize),
}

pub trait Gpu {
    type Texture;
    type Mesh;
    type Lines;

    /// Loads an image as a texture. Failure is not fatal: implementations log
    /// it and hand back some placeholder texture instead.
    fn load_texture(&mut self, path: &Path) -> Self::Texture;
    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<Self::Mesh, RenderError>;
    fn upload_line_loop(&mut self, points: &[Point3<f32>]) -> Self::Lines;

    fn clear(&mut self, color: &Vector3<f32>);
    fn set_depth_write(&mut self, enabled: bool);
    fn set_alpha_blending(&mut self, enabled: bool);

    fn use_shader(&mut self, program: ShaderProgram);
    fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>);
    fn set_vec3(&mut self, name: &str, value: &Vector3<f32>);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_float(&mut self, name: &str, value: f32);

    fn bind_texture(&mut self, texture: &Self::Texture, unit: u32);
    fn draw_triangles(&mut self, mesh: &mut Self::Mesh);
    fn draw_line_loop(&mut self, lines: &mut Self::Lines);
}

/// Camera matrices for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub eye: Point3<f32>,
}

impl FrameView {
    pub fn new(view: Matrix4<f32>, projection: Matrix4<f32>, eye: Point3<f32>) -> Self {
        FrameView {
            view,
            projection,
            eye,
        }
    }

    /// Standard perspective projection; `fov_degrees` is the vertical field of view.
    pub fn perspective(aspect: f32, fov_degrees: f32, near: f32, far: f32) -> Matrix4<f32> {
        Perspective3::new(aspect, fov_degrees.to_radians(), near, far).to_homogeneous()
    }
}
