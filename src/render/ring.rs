use crate::math::mesh::{generate_ring, MeshData};
use crate::model::Ring;

use super::{FrameView, Gpu, RenderError, ShaderProgram};

pub struct RingEntity<G: Gpu> {
    mesh: G::Mesh,
    texture: G::Texture,
}

impl<G: Gpu> RingEntity<G> {
    pub fn new(
        gpu: &mut G,
        ring: &Ring,
        texture: G::Texture,
        segment_count: usize,
    ) -> Result<Self, RenderError> {
        let (vertices, indices) =
            generate_ring(ring.inner_radius(), ring.outer_radius(), segment_count);
        let mesh = gpu.upload_mesh(&MeshData::from_ring(&vertices, indices))?;
        Ok(RingEntity { mesh, texture })
    }

    /// Draws the ring with alpha blending on. Blending is switched back off
    /// before returning, so opaque draws after this one are unaffected.
    pub fn render(&mut self, gpu: &mut G, ring: &Ring, frame: &FrameView) {
        gpu.use_shader(ShaderProgram::Ring);
        gpu.set_mat4("model", &ring.model_matrix());
        gpu.set_mat4("view", &frame.view);
        gpu.set_mat4("projection", &frame.projection);
        gpu.bind_texture(&self.texture, 0);
        gpu.set_int("texture1", 0);

        gpu.set_alpha_blending(true);
        gpu.draw_triangles(&mut self.mesh);
        gpu.set_alpha_blending(false);
    }
}
