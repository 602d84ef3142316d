//! Convex planar polygons, the faces every `Mesh` is made of.

use crate::aabb::Aabb;
use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use std::sync::OnceLock;

/// A convex polygon with a cached plane and bounding box.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
    pub bounding_box: OnceLock<Aabb>,
    pub metadata: Option<S>,
}

impl<S: Clone + PartialEq> PartialEq for Polygon<S> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.plane == other.plane
            && self.metadata == other.metadata
    }
}

impl<S: Clone + Send + Sync> Polygon<S> {
    /// Create a polygon from vertices, computing its plane
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        let plane = Plane::from_vertices(&vertices);
        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// A polygon on the same plane with the same metadata but other vertices
    pub fn with_vertices(&self, vertices: Vec<Vertex>) -> Self {
        Polygon {
            vertices,
            plane: self.plane.clone(),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            Aabb::from_points(self.vertices.iter().map(|v| &v.pos)).unwrap_or_else(Aabb::empty)
        })
    }

    /// Reverse winding order, flip vertex normals and the plane
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.vertices.iter_mut().for_each(|v| v.flip());
        self.plane.flip();
    }

    /// Fan triangulation; valid because every polygon is convex
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }
        let anchor = &self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|pair| [*anchor, pair[0], pair[1]])
            .collect()
    }

    /// Replace every vertex normal with the plane normal
    pub fn set_new_normal(&mut self) {
        let normal = self.plane.normal();
        self.vertices.iter_mut().for_each(|v| v.normal = normal);
    }

    /// Area by summing the fan triangles
    pub fn area(&self) -> Real {
        self.triangulate()
            .iter()
            .map(|[a, b, c]| (b.pos - a.pos).cross(&(c.pos - a.pos)).norm() * 0.5)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn fan_triangulation_of_quad() {
        let poly: Polygon<()> = Polygon::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(2.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(2.0, 3.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(0.0, 3.0, 0.0), Vector3::z()),
            ],
            None,
        );
        assert_eq!(poly.triangulate().len(), 2);
        assert!((poly.area() - 6.0).abs() < 1e-12);
        let bb = poly.bounding_box();
        assert_eq!(bb.maxs, Point3::new(2.0, 3.0, 0.0));
    }
}
