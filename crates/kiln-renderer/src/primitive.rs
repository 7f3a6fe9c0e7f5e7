//! Backend primitives and the reusable batch they are collected in

use kiln_core::types::{BoundingBox, Color, Point};
use serde::Serialize;

/// One draw call in the backend's native primitive set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Axis-aligned solid rectangle
    RectSolid { bounds: BoundingBox, color: Color },
    /// Solid triangle
    Triangle { points: [Point; 3], color: Color },
    /// Solid convex quad, points in winding order
    Quad { points: [Point; 4], color: Color },
}

impl Primitive {
    /// Number of triangles the GPU rasterizes for this primitive
    pub fn triangle_count(&self) -> usize {
        match self {
            Primitive::Triangle { .. } => 1,
            Primitive::RectSolid { .. } | Primitive::Quad { .. } => 2,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Primitive::RectSolid { color, .. }
            | Primitive::Triangle { color, .. }
            | Primitive::Quad { color, .. } => color,
        }
    }
}

/// Tessellation output, cleared and refilled for every command.
///
/// The backing storage is kept between uses so steady-state frames do not allocate.
#[derive(Debug, Clone)]
pub struct PrimitiveBatch {
    primitives: Vec<Primitive>,
}

impl PrimitiveBatch {
    /// Create a new batch
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            primitives: Vec::with_capacity(capacity),
        }
    }

    /// Clear the batch, keeping its allocation
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Add a solid rectangle
    pub fn add_rect_solid(&mut self, bounds: BoundingBox, color: Color) {
        self.primitives.push(Primitive::RectSolid { bounds, color });
    }

    /// Add a solid triangle
    pub fn add_triangle(&mut self, points: [Point; 3], color: Color) {
        self.primitives.push(Primitive::Triangle { points, color });
    }

    /// Add a solid quad
    pub fn add_quad(&mut self, points: [Point; 4], color: Color) {
        self.primitives.push(Primitive::Quad { points, color });
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Primitive> {
        self.primitives.iter()
    }

    /// Get the number of primitives
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Get the number of triangles the batch rasterizes to
    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(Primitive::triangle_count).sum()
    }

    pub fn rect_count(&self) -> usize {
        self.iter()
            .filter(|p| matches!(p, Primitive::RectSolid { .. }))
            .count()
    }

    pub fn quad_count(&self) -> usize {
        self.iter().filter(|p| matches!(p, Primitive::Quad { .. })).count()
    }

    pub fn triangle_primitive_count(&self) -> usize {
        self.iter()
            .filter(|p| matches!(p, Primitive::Triangle { .. }))
            .count()
    }
}

impl Default for PrimitiveBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a PrimitiveBatch {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
