use std::path::{Path, PathBuf};

use nalgebra::{Matrix4, Point3, Vector3};

use crate::math::mesh::MeshData;

use super::{Gpu, RenderError, ShaderProgram};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear,
    DepthWrite(bool),
    Blend(bool),
    UseShader(ShaderProgram),
    SetMat4(String, Matrix4<f32>),
    SetVec3(String, Vector3<f32>),
    SetInt(String, i32),
    SetFloat(String, f32),
    BindTexture(PathBuf, u32),
    DrawTriangles(usize),
    DrawLineLoop(usize),
}

/// A `Gpu` that does nothing but remember what it was asked to do.
/// Meshes and line loops are identified by upload order.
#[derive(Debug, Default)]
pub struct RecordingGpu {
    pub calls: Vec<Call>,
    pub meshes: Vec<usize>,
    pub line_loops: Vec<usize>,
    next_id: usize,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Default::default()
    }

    fn next_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl Gpu for RecordingGpu {
    type Texture = PathBuf;
    type Mesh = usize;
    type Lines = usize;

    fn load_texture(&mut self, path: &Path) -> PathBuf {
        path.to_owned()
    }

    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<usize, RenderError> {
        if mesh.vertex_count() > u16::MAX as usize {
            return Err(RenderError::TooManyVertices(mesh.vertex_count()));
        }
        let id = self.next_id();
        self.meshes.push(id);
        Ok(id)
    }

    fn upload_line_loop(&mut self, points: &[Point3<f32>]) -> usize {
        assert!(!points.is_empty());
        let id = self.next_id();
        self.line_loops.push(id);
        id
    }

    fn clear(&mut self, _color: &Vector3<f32>) {
        self.calls.push(Call::Clear);
    }

    fn set_depth_write(&mut self, enabled: bool) {
        self.calls.push(Call::DepthWrite(enabled));
    }

    fn set_alpha_blending(&mut self, enabled: bool) {
        self.calls.push(Call::Blend(enabled));
    }

    fn use_shader(&mut self, program: ShaderProgram) {
        self.calls.push(Call::UseShader(program));
    }

    fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>) {
        self.calls.push(Call::SetMat4(name.to_owned(), *value));
    }

    fn set_vec3(&mut self, name: &str, value: &Vector3<f32>) {
        self.calls.push(Call::SetVec3(name.to_owned(), *value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.calls.push(Call::SetInt(name.to_owned(), value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.calls.push(Call::SetFloat(name.to_owned(), value));
    }

    fn bind_texture(&mut self, texture: &PathBuf, unit: u32) {
        self.calls.push(Call::BindTexture(texture.clone(), unit));
    }

    fn draw_triangles(&mut self, mesh: &mut usize) {
        self.calls.push(Call::DrawTriangles(*mesh));
    }

    fn draw_line_loop(&mut self, lines: &mut usize) {
        self.calls.push(Call::DrawLineLoop(*lines));
    }
}
