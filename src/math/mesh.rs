use std::f32::consts::{FRAC_PI_2, PI, TAU};

use nalgebra::{Point2, Point3, Vector3};

/// A sphere vertex: position and unit outward normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

/// A ring vertex, which additionally carries a texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingVertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub tex_coord: Point2<f32>,
}

/// Triangle mesh data in the layout the GPU wants: one array per attribute,
/// plus a flat list of triangle indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub tex_coords: Option<Vec<Point2<f32>>>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn from_sphere(vertices: &[Vertex], indices: Vec<u32>) -> Self {
        MeshData {
            positions: vertices.iter().map(|v| v.position).collect(),
            normals: vertices.iter().map(|v| v.normal).collect(),
            tex_coords: None,
            indices,
        }
    }

    pub fn from_ring(vertices: &[RingVertex], indices: Vec<u32>) -> Self {
        MeshData {
            positions: vertices.iter().map(|v| v.position).collect(),
            normals: vertices.iter().map(|v| v.normal).collect(),
            tex_coords: Some(vertices.iter().map(|v| v.tex_coord).collect()),
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

pub fn generate_sphere(radius: f32, stack_count: usize, sector_count: usize) -> (Vec<Vertex>, Vec<u32>) {
    generate_sphere_at(Point3::origin(), radius, stack_count, sector_count)
}

/// Builds a UV-sphere around `center`.
///
/// Stacks run from the north pole (+Y) to the south pole (-Y), sectors run
/// once around the Y axis. Both the first and last sector columns are emitted,
/// so the seam is duplicated and there are `(stacks + 1) * (sectors + 1)`
/// vertices.
///
/// The quads touching the poles degenerate into triangles, so the topmost
/// stack only gets its lower triangle and the bottommost stack only gets its
/// upper one. The returned index list contains exactly the triangles that were
/// emitted.
pub fn generate_sphere_at(
    center: Point3<f32>,
    radius: f32,
    stack_count: usize,
    sector_count: usize,
) -> (Vec<Vertex>, Vec<u32>) {
    assert!(
        stack_count >= 1 && sector_count >= 1,
        "Sphere needs at least one stack and sector, got {} stacks and {} sectors",
        stack_count,
        sector_count
    );
    assert!(radius > 0.0, "Sphere radius must be positive, was {}", radius);

    let stack_step = PI / stack_count as f32;
    let sector_step = TAU / sector_count as f32;

    let mut vertices = Vec::with_capacity((stack_count + 1) * (sector_count + 1));
    for i in 0..=stack_count {
        // latitude, from +90 to -90 degrees
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let ring_radius = radius * stack_angle.cos();
        let y = radius * stack_angle.sin();

        for j in 0..=sector_count {
            let sector_angle = j as f32 * sector_step;
            let offset = Vector3::new(
                ring_radius * sector_angle.cos(),
                y,
                ring_radius * sector_angle.sin(),
            );
            vertices.push(Vertex {
                position: center + offset,
                normal: offset / radius,
            });
        }
    }

    let mut indices = Vec::with_capacity(stack_count * sector_count * 6);
    for i in 0..stack_count {
        let mut k1 = (i * (sector_count + 1)) as u32;
        let mut k2 = k1 + sector_count as u32 + 1;

        for _ in 0..sector_count {
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stack_count - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    (vertices, indices)
}

/// Builds a flat annulus in the XZ plane, facing +Y.
///
/// Each of the `segment_count + 1` angular steps emits an inner and an outer
/// vertex (the seam is duplicated so the texture wraps cleanly). The texture
/// u coordinate is 0 on the inner edge and 1 on the outer edge; v runs around
/// the ring.
pub fn generate_ring(
    inner_radius: f32,
    outer_radius: f32,
    segment_count: usize,
) -> (Vec<RingVertex>, Vec<u32>) {
    assert!(
        segment_count >= 1,
        "Ring needs at least one segment, segment_count was {}",
        segment_count
    );

    let up = Vector3::y();
    let angle_step = TAU / segment_count as f32;

    let mut vertices = Vec::with_capacity(2 * (segment_count + 1));
    for i in 0..=segment_count {
        let angle = i as f32 * angle_step;
        let (sin, cos) = angle.sin_cos();
        let v = i as f32 / segment_count as f32;

        for (radius, u) in [(inner_radius, 0.0), (outer_radius, 1.0)] {
            vertices.push(RingVertex {
                position: Point3::new(radius * cos, 0.0, radius * sin),
                normal: up,
                tex_coord: Point2::new(u, v),
            });
        }
    }

    let mut indices = Vec::with_capacity(segment_count * 6);
    for i in 0..segment_count as u32 {
        let current = 2 * i;
        let next = 2 * (i + 1);
        indices.extend_from_slice(&[current, current + 1, next]);
        indices.extend_from_slice(&[current + 1, next + 1, next]);
    }

    (vertices, indices)
}

/// Points evenly spaced around a circle in the XZ plane. The last point is
/// *not* a copy of the first; whoever draws this should use a closed line loop.
pub fn generate_orbit_circle(radius: f32, segment_count: usize) -> Vec<Point3<f32>> {
    assert!(
        segment_count >= 1,
        "Orbit circle needs at least one segment, segment_count was {}",
        segment_count
    );

    (0..segment_count)
        .map(|i| TAU * i as f32 / segment_count as f32)
        .map(|theta| Point3::new(radius * theta.cos(), 0.0, radius * theta.sin()))
        .collect()
}
