//! Oriented planes and polygon classification / splitting against them.

use crate::float_types::{Real, tolerance};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

// Plane classification constants, combined as a bitmask per polygon
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane `normal · p = w`, normal of unit length.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a new plane from normal vector and offset along it
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let len = normal.norm();
        if len < Real::EPSILON {
            return Plane { normal: Vector3::z(), w: 0.0 };
        }
        Plane { normal: normal / len, w: w / len }
    }

    /// Plane through three points, normal following the right-hand rule
    pub fn from_points(p1: Point3<Real>, p2: Point3<Real>, p3: Point3<Real>) -> Self {
        let normal = (p2 - p1).cross(&(p3 - p1));
        if normal.norm_squared() < Real::EPSILON * Real::EPSILON {
            return Plane { normal: Vector3::z(), w: 0.0 };
        }
        let normal = normal.normalize();
        let w = normal.dot(&p1.coords);
        Plane { normal, w }
    }

    /// Best fit plane of a vertex loop using Newell's method, which keeps the
    /// orientation of the winding even when the first three vertices are collinear.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        if vertices.len() < 3 {
            return Plane { normal: Vector3::z(), w: 0.0 };
        }
        let normal = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .fold(Vector3::zeros(), |acc, (curr, next)| {
                acc + Vector3::new(
                    (curr.pos.y - next.pos.y) * (curr.pos.z + next.pos.z),
                    (curr.pos.z - next.pos.z) * (curr.pos.x + next.pos.x),
                    (curr.pos.x - next.pos.x) * (curr.pos.y + next.pos.y),
                )
            });
        if normal.norm_squared() < Real::EPSILON * Real::EPSILON {
            return Self::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        }
        let normal = normal.normalize();
        let centroid = vertices.iter().fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
            / vertices.len() as Real;
        Plane { normal, w: normal.dot(&centroid) }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Classify a point as FRONT, BACK or COPLANAR within [`tolerance`]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.normal.dot(&point.coords) - self.w;
        if t < -tolerance() {
            BACK
        } else if t > tolerance() {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Orientation of another plane's normal relative to this one: FRONT when
    /// both face the same way.
    pub fn orient_plane(&self, other: &Plane) -> i8 {
        if self.normal.dot(&other.normal) > 0.0 { FRONT } else { BACK }
    }

    /// Classify a polygon with respect to the plane.
    /// Returns a bitmask of COPLANAR, FRONT, and BACK.
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Splits a polygon by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.orient_plane(&polygon.plane) == FRONT {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let n = polygon.vertices.len();
                let mut split_front = Vec::with_capacity(n + 1);
                let mut split_back = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let j = (i + 1) % n;
                    let (type_i, type_j) = (types[i], types[j]);
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(*vertex_i);
                    }
                    if type_i != FRONT {
                        split_back.push(*vertex_i);
                    }

                    // The edge crosses the plane: both halves share the intersection
                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > Real::EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let vertex_new = vertex_i.lerp(vertex_j, t);
                            split_front.push(vertex_new);
                            split_back.push(vertex_new);
                        }
                    }
                }

                // Split halves keep the parent plane, recomputing it drifts and opens gaps
                if split_front.len() >= 3 {
                    front.push(polygon.with_vertices(split_front));
                }
                if split_back.len() >= 3 {
                    back.push(polygon.with_vertices(split_back));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
