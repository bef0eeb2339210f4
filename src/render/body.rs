use crate::math::mesh::{generate_sphere, MeshData};
use crate::model::Body;

use super::{FrameView, Gpu, RenderError, ShaderProgram};

/// GPU half of a body: its sphere mesh and texture. The motion state stays in
/// `model::Body` and is passed in at draw time.
pub struct BodyEntity<G: Gpu> {
    mesh: G::Mesh,
    texture: G::Texture,
    triangle_count: usize,
}

impl<G: Gpu> BodyEntity<G> {
    pub fn new(
        gpu: &mut G,
        radius: f32,
        texture: G::Texture,
        stack_count: usize,
        sector_count: usize,
    ) -> Result<Self, RenderError> {
        let (vertices, indices) = generate_sphere(radius, stack_count, sector_count);
        let data = MeshData::from_sphere(&vertices, indices);
        let mesh = gpu.upload_mesh(&data)?;

        Ok(BodyEntity {
            mesh,
            texture,
            triangle_count: data.triangle_count(),
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Draws the body at its current state with the given program. Depth and
    /// blend state are left to the caller.
    pub fn render(&mut self, gpu: &mut G, program: ShaderProgram, body: &Body, frame: &FrameView) {
        gpu.use_shader(program);
        gpu.set_mat4("model", &body.model_matrix());
        gpu.set_mat4("view", &frame.view);
        gpu.set_mat4("projection", &frame.projection);

        if program == ShaderProgram::Lit {
            if let Some(material) = body.material() {
                gpu.set_vec3("material_Ka", &material.ambient);
                gpu.set_vec3("material_Kd", &material.diffuse);
                gpu.set_vec3("material_Ks", &material.specular);
                gpu.set_float("material_shininess", material.shininess);
            }
        }

        gpu.bind_texture(&self.texture, 0);
        gpu.set_int("texture1", 0);
        gpu.draw_triangles(&mut self.mesh);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use nalgebra::{Matrix4, Point3, Vector3};

    use super::*;
    use crate::model::{BodyKind, Material};
    use crate::render::recording::{Call, RecordingGpu};

    fn frame() -> FrameView {
        FrameView::new(Matrix4::identity(), Matrix4::identity(), Point3::origin())
    }

    #[test]
    fn test_unlit_draw_sequence() {
        let mut gpu = RecordingGpu::new();
        let mut entity =
            BodyEntity::new(&mut gpu, 2.0, PathBuf::from("sun.jpg"), 30, 30).unwrap();
        assert_eq!(entity.triangle_count(), 30 * 30 * 2 - 2 * 30);

        let mut sun = Body::new("Sun", BodyKind::Sun, 2.0);
        sun.set_rotation_speed(90.0);
        sun.update(1.0, None);

        entity.render(&mut gpu, ShaderProgram::Unlit, &sun, &frame());
        assert_eq!(
            gpu.calls,
            vec![
                Call::UseShader(ShaderProgram::Unlit),
                Call::SetMat4("model".to_owned(), sun.model_matrix()),
                Call::SetMat4("view".to_owned(), Matrix4::identity()),
                Call::SetMat4("projection".to_owned(), Matrix4::identity()),
                Call::BindTexture(PathBuf::from("sun.jpg"), 0),
                Call::SetInt("texture1".to_owned(), 0),
                Call::DrawTriangles(gpu.meshes[0]),
            ]
        );
    }

    #[test]
    fn test_lit_draw_uploads_material() {
        let mut gpu = RecordingGpu::new();
        let mut entity = BodyEntity::new(&mut gpu, 1.0, PathBuf::from("mars.jpg"), 8, 8).unwrap();

        let mut mars = Body::new("Mars", BodyKind::Planet, 1.0);
        mars.set_material(Material {
            ambient: Vector3::new(0.1, 0.1, 0.1),
            diffuse: Vector3::new(0.7, 0.2, 0.1),
            specular: Vector3::new(0.3, 0.3, 0.3),
            shininess: 16.0,
        });

        entity.render(&mut gpu, ShaderProgram::Lit, &mars, &frame());
        assert!(gpu
            .calls
            .contains(&Call::SetVec3("material_Kd".to_owned(), Vector3::new(0.7, 0.2, 0.1))));
        assert!(gpu
            .calls
            .contains(&Call::SetFloat("material_shininess".to_owned(), 16.0)));
    }
}
