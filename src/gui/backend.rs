use std::path::Path;
use std::rc::Rc;

use kiss3d::context::{Context, Texture};
use kiss3d::resource::{
    AllocationType, BufferType, Effect, GPUVec, ShaderAttribute, TextureManager,
};
use nalgebra::{Matrix4, Point2, Point3, Vector3};

use super::shaders;
use crate::math::mesh::MeshData;
use crate::render::{Gpu, RenderError, ShaderProgram};

// Not exposed as a constant by kiss3d's context
const LINE_LOOP: u32 = 0x0002;

struct Program {
    effect: Effect,
    position: ShaderAttribute<Point3<f32>>,
    normal: Option<ShaderAttribute<Vector3<f32>>>,
    tex_coord: Option<ShaderAttribute<Point2<f32>>>,
}

impl Program {
    fn compile(program: ShaderProgram) -> Self {
        let (vertex_src, fragment_src) = shaders::sources(program);
        // kiss3d aborts on compile or link errors; the sources are fixed, so
        // this only trips when the driver can't handle GLSL ES 1.0 at all.
        let mut effect = Effect::new_from_str(vertex_src, fragment_src);
        effect.use_program();

        Program {
            position: effect
                .get_attrib::<Point3<f32>>("position")
                .expect("Failed to get shader attribute."),
            normal: effect.get_attrib::<Vector3<f32>>("normal"),
            tex_coord: effect.get_attrib::<Point2<f32>>("tex_coord"),
            effect,
        }
    }
}

pub struct GlMesh {
    positions: GPUVec<Point3<f32>>,
    normals: GPUVec<Vector3<f32>>,
    tex_coords: Option<GPUVec<Point2<f32>>>,
    faces: GPUVec<Point3<u16>>,
}

pub struct GlLines {
    points: GPUVec<Point3<f32>>,
}

/// `Gpu` on top of kiss3d's GL context and resource wrappers. Must only be
/// created and used on the thread that owns the window.
pub struct GlBackend {
    unlit: Program,
    lit: Program,
    ring: Program,
    orbit: Program,
    current: ShaderProgram,
}

impl GlBackend {
    pub fn new() -> Self {
        GlBackend {
            unlit: Program::compile(ShaderProgram::Unlit),
            lit: Program::compile(ShaderProgram::Lit),
            ring: Program::compile(ShaderProgram::Ring),
            orbit: Program::compile(ShaderProgram::Orbit),
            current: ShaderProgram::Unlit,
        }
    }

    fn program(&mut self, program: ShaderProgram) -> &mut Program {
        match program {
            ShaderProgram::Unlit => &mut self.unlit,
            ShaderProgram::Lit => &mut self.lit,
            ShaderProgram::Ring => &mut self.ring,
            ShaderProgram::Orbit => &mut self.orbit,
        }
    }

    fn current_program(&mut self) -> &mut Program {
        self.program(self.current)
    }

    /// Called at the start of every frame, since kiss3d's own renderers leave
    /// their state behind.
    fn reset_state(&mut self) {
        let ctxt = Context::get();
        ctxt.enable(Context::DEPTH_TEST);
        ctxt.disable(Context::CULL_FACE);
        ctxt.disable(Context::BLEND);
    }
}

impl Gpu for GlBackend {
    type Texture = Rc<Texture>;
    type Mesh = GlMesh;
    type Lines = GlLines;

    fn load_texture(&mut self, path: &Path) -> Rc<Texture> {
        TextureManager::get_global_manager(|tm| {
            if !path.is_file() {
                log::warn!(
                    "Texture {} not found, using the default texture",
                    path.display()
                );
                return tm.get_default();
            }
            let name = path.to_string_lossy();
            log::debug!("Loading texture {}", name);
            tm.add(path, &name)
        })
    }

    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<GlMesh, RenderError> {
        if mesh.vertex_count() > u16::MAX as usize {
            return Err(RenderError::TooManyVertices(mesh.vertex_count()));
        }

        // Checked above, so every index fits
        let faces: Vec<Point3<u16>> = mesh
            .indices
            .chunks_exact(3)
            .map(|t| Point3::new(t[0] as u16, t[1] as u16, t[2] as u16))
            .collect();

        Ok(GlMesh {
            positions: GPUVec::new(
                mesh.positions.clone(),
                BufferType::Array,
                AllocationType::StaticDraw,
            ),
            normals: GPUVec::new(
                mesh.normals.clone(),
                BufferType::Array,
                AllocationType::StaticDraw,
            ),
            tex_coords: mesh.tex_coords.as_ref().map(|uvs| {
                GPUVec::new(uvs.clone(), BufferType::Array, AllocationType::StaticDraw)
            }),
            faces: GPUVec::new(faces, BufferType::ElementArray, AllocationType::StaticDraw),
        })
    }

    fn upload_line_loop(&mut self, points: &[Point3<f32>]) -> GlLines {
        GlLines {
            points: GPUVec::new(
                points.to_vec(),
                BufferType::Array,
                AllocationType::StaticDraw,
            ),
        }
    }

    fn clear(&mut self, color: &Vector3<f32>) {
        self.reset_state();
        let ctxt = Context::get();
        ctxt.clear_color(color.x, color.y, color.z, 1.0);
        ctxt.clear(Context::COLOR_BUFFER_BIT | Context::DEPTH_BUFFER_BIT);
    }

    fn set_depth_write(&mut self, enabled: bool) {
        // With the depth test off, GL doesn't write depth either
        let ctxt = Context::get();
        if enabled {
            ctxt.enable(Context::DEPTH_TEST);
        } else {
            ctxt.disable(Context::DEPTH_TEST);
        }
    }

    fn set_alpha_blending(&mut self, enabled: bool) {
        let ctxt = Context::get();
        if enabled {
            ctxt.enable(Context::BLEND);
            ctxt.blend_func_separate(
                Context::SRC_ALPHA,
                Context::ONE_MINUS_SRC_ALPHA,
                Context::ONE,
                Context::ONE_MINUS_SRC_ALPHA,
            );
        } else {
            ctxt.disable(Context::BLEND);
        }
    }

    fn use_shader(&mut self, program: ShaderProgram) {
        self.current = program;
        self.current_program().effect.use_program();
    }

    fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>) {
        if let Some(mut uniform) = self.current_program().effect.get_uniform::<Matrix4<f32>>(name) {
            uniform.upload(value);
        }
    }

    fn set_vec3(&mut self, name: &str, value: &Vector3<f32>) {
        if let Some(mut uniform) = self.current_program().effect.get_uniform::<Point3<f32>>(name) {
            uniform.upload(&Point3::from(*value));
        }
    }

    fn set_int(&mut self, name: &str, value: i32) {
        if let Some(mut uniform) = self.current_program().effect.get_uniform::<i32>(name) {
            uniform.upload(&value);
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        if let Some(mut uniform) = self.current_program().effect.get_uniform::<f32>(name) {
            uniform.upload(&value);
        }
    }

    fn bind_texture(&mut self, texture: &Rc<Texture>, unit: u32) {
        let ctxt = Context::get();
        ctxt.active_texture(Context::TEXTURE0 + unit);
        ctxt.bind_texture(Context::TEXTURE_2D, Some(&**texture));
    }

    fn draw_triangles(&mut self, mesh: &mut GlMesh) {
        let program = self.current_program();

        program.position.enable();
        program.position.bind(&mut mesh.positions);
        if let Some(ref mut normal) = program.normal {
            normal.enable();
            normal.bind(&mut mesh.normals);
        }
        if let (Some(attrib), Some(uvs)) = (program.tex_coord.as_mut(), mesh.tex_coords.as_mut()) {
            attrib.enable();
            attrib.bind(uvs);
        }

        mesh.faces.bind();
        let ctxt = Context::get();
        ctxt.draw_elements(
            Context::TRIANGLES,
            mesh.faces.len() as i32 * 3,
            Context::UNSIGNED_SHORT,
            0,
        );

        program.position.disable();
        if let Some(ref mut normal) = program.normal {
            normal.disable();
        }
        if let Some(ref mut attrib) = program.tex_coord {
            attrib.disable();
        }
    }

    fn draw_line_loop(&mut self, lines: &mut GlLines) {
        let program = self.current_program();
        program.position.enable();
        program.position.bind(&mut lines.points);

        let ctxt = Context::get();
        ctxt.draw_arrays(LINE_LOOP, 0, lines.points.len() as i32);

        program.position.disable();
    }
}
