//! Point and segment math for regular polygons
//!
//! Vertices are generated counter-clockwise in math orientation: vertex `i`
//! sits at `angle_offset + 2π·i/sides`. Every caller relies on that winding
//! to pick edge normals that face the interior.

use glam::Vec2;

use crate::consts::MIN_EDGE_LENGTH;
use crate::error::SimError;
use crate::polar_to_cartesian;

/// A transient polygon edge from vertex `index` to vertex `index + 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub index: usize,
    pub a: Vec2,
    pub b: Vec2,
}

impl Edge {
    /// Vector from `a` to `b`
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Closest point on this edge to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        closest_point_on_segment(p, self.a, self.b)
    }

    /// Unit perpendicular of the edge, signed to face `interior`
    ///
    /// Returns zero for a zero-length edge.
    pub fn inward_normal(&self, interior: Vec2) -> Vec2 {
        let perp = self.direction().perp().normalize_or_zero();
        if perp.dot(interior - self.a) < 0.0 {
            -perp
        } else {
            perp
        }
    }
}

/// Project `p` onto segment AB, clamping to the endpoints
///
/// A zero-length segment returns `a`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Distance from `p` to segment AB
#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p - closest_point_on_segment(p, a, b)).length()
}

/// Vertices of a regular polygon, counter-clockwise from `angle_offset`
pub fn regular_polygon_vertices(
    center: Vec2,
    radius: f32,
    angle_offset: f32,
    sides: u32,
) -> Result<Vec<Vec2>, SimError> {
    if sides < 3 {
        return Err(SimError::geometry(format!(
            "polygon needs at least 3 sides, got {sides}"
        )));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SimError::geometry(format!(
            "circumradius must be positive and finite, got {radius}"
        )));
    }
    if !center.is_finite() || !angle_offset.is_finite() {
        return Err(SimError::geometry("polygon center and angle must be finite"));
    }

    let vertices = vertex_ring(center, radius, angle_offset, sides);
    validate_vertices(&vertices)?;
    Ok(vertices)
}

/// Reject polygons with duplicate or near-coincident adjacent vertices
pub fn validate_vertices(vertices: &[Vec2]) -> Result<(), SimError> {
    if vertices.len() < 3 {
        return Err(SimError::geometry(format!(
            "polygon needs at least 3 vertices, got {}",
            vertices.len()
        )));
    }
    if let Some(edge) = edges(vertices).find(|e| e.length() < MIN_EDGE_LENGTH) {
        return Err(SimError::geometry(format!(
            "edge {} is degenerate (length {})",
            edge.index,
            edge.length()
        )));
    }
    Ok(())
}

/// Unchecked vertex generation; parameters must already be validated
pub(crate) fn vertex_ring(center: Vec2, radius: f32, angle_offset: f32, sides: u32) -> Vec<Vec2> {
    let step = std::f32::consts::TAU / sides as f32;
    (0..sides)
        .map(|i| center + polar_to_cartesian(radius, angle_offset + step * i as f32))
        .collect()
}

/// Edges of a closed polygon, in vertex order, wrapping last to first
pub fn edges(vertices: &[Vec2]) -> impl Iterator<Item = Edge> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| Edge {
        index: i,
        a: vertices[i],
        b: vertices[(i + 1) % n],
    })
}

/// Distance from the center of a regular polygon to the middle of an edge
#[inline]
pub fn inradius(circumradius: f32, sides: u32) -> f32 {
    circumradius * (std::f32::consts::PI / sides as f32).cos()
}
