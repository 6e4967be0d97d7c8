//! Quad geometry handed to the renderer.
//!
//! The engine never issues draw calls. It fills [`Mesh`]es (4 vertices and 6 indices per quad)
//! and hands them to a [`RenderSink`].

use crate::layout::Rect;
use crate::metrics::UvRect;
use bytemuck::{Pod, Zeroable};

/// Linear RGBA colour.
pub type Colour = [f32; 4];

/// Vertex layout shared by selection and glyph quads.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Container-space position.
    pub position: [f32; 2],
    /// Atlas texture coordinate (zero for untextured quads).
    pub tex_coord: [f32; 2],
    /// RGBA colour.
    pub colour: [f32; 4],
}

/// Vertex and index buffers for a list of quads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertices, four per quad (top-left, top-right, bottom-right, bottom-left).
    pub vertices: Vec<Vertex>,
    /// Triangle indices, six per quad.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of quads.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Whether the mesh has no quads.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex buffer as raw bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Bounding rectangle of quad `index`, if present.
    pub fn quad_rect(&self, index: usize) -> Option<Rect> {
        let quad = self.vertices.get(index * 4..index * 4 + 4)?;
        let [x0, y0] = quad[0].position;
        let [x1, y1] = quad[2].position;
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// Appends quads to a [`Mesh`].
#[derive(Debug, Default)]
pub struct GeometryBuilder {
    mesh: Mesh,
}

impl GeometryBuilder {
    /// Start an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an empty mesh with room for `quads` quads.
    pub fn with_capacity(quads: usize) -> Self {
        Self {
            mesh: Mesh {
                vertices: Vec::with_capacity(quads * 4),
                indices: Vec::with_capacity(quads * 6),
            },
        }
    }

    /// Append an untextured quad.
    pub fn push_rect(&mut self, rect: Rect, colour: Colour) {
        self.push_quad(rect, UvRect::default(), colour);
    }

    /// Append a textured quad.
    pub fn push_quad(&mut self, rect: Rect, uv: UvRect, colour: Colour) {
        let base = self.mesh.vertices.len() as u32;
        let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());

        self.mesh.vertices.extend_from_slice(&[
            Vertex {
                position: [x0, y0],
                tex_coord: [uv.u0, uv.v0],
                colour,
            },
            Vertex {
                position: [x1, y0],
                tex_coord: [uv.u1, uv.v0],
                colour,
            },
            Vertex {
                position: [x1, y1],
                tex_coord: [uv.u1, uv.v1],
                colour,
            },
            Vertex {
                position: [x0, y1],
                tex_coord: [uv.u0, uv.v1],
                colour,
            },
        ]);
        self.mesh
            .indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Finish and return the mesh.
    pub fn finish(self) -> Mesh {
        self.mesh
    }
}

/// Consumer of the geometry produced by [`TextManager::render`](crate::TextManager::render).
pub trait RenderSink {
    /// Selection highlight quads, drawn behind the text.
    fn submit_selection(&mut self, mesh: &Mesh);

    /// Glyph quads with atlas coordinates.
    fn submit_glyphs(&mut self, mesh: &Mesh);
}
