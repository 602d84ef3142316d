//! `Sketch` struct holding 2D profiles as `geo` polygons, and their extrusion into `Mesh`es

use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use crate::traits::CSG;
use geo::{
    Area, BoundingRect, Coord, LineString, MultiPolygon, Orient, Rect, Translate,
    orient::Direction,
};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

pub mod shapes;

/// A planar profile in the XY plane: one or more polygons, each with optional holes.
#[derive(Clone, Debug)]
pub struct Sketch<S> {
    pub geometry: MultiPolygon<Real>,

    /// Metadata copied onto every polygon of an extrusion
    pub metadata: Option<S>,
}

impl<S: Clone + Debug + Send + Sync> Sketch<S> {
    /// An empty profile
    pub fn new() -> Self {
        Sketch {
            geometry: MultiPolygon(Vec::new()),
            metadata: None,
        }
    }

    /// Wrap existing `geo` polygons. Rings are re-oriented so exteriors run
    /// counter-clockwise and holes clockwise.
    pub fn from_geo(geometry: MultiPolygon<Real>, metadata: Option<S>) -> Self {
        Sketch {
            geometry: geometry.orient(Direction::Default),
            metadata,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    /// Enclosed area, holes excluded
    pub fn area(&self) -> Real {
        self.geometry.unsigned_area()
    }

    pub fn bounding_rect(&self) -> Option<Rect<Real>> {
        self.geometry.bounding_rect()
    }

    /// Move the profile within its plane
    pub fn translate(&self, x: Real, y: Real) -> Self {
        Sketch {
            geometry: self.geometry.translate(x, y),
            metadata: self.metadata.clone(),
        }
    }

    /// Ear-cut triangulation of every polygon, counter-clockwise triangles in the XY plane.
    pub fn triangulate(&self) -> Vec<[Point3<Real>; 3]> {
        use geo::TriangulateEarcut;

        let mut result = Vec::new();
        for polygon in &self.geometry.0 {
            let triangulation = polygon.earcut_triangles_raw();
            let vertices = triangulation.vertices;

            for tri in triangulation.triangle_indices.chunks_exact(3) {
                let [a, b, c] = [tri[0], tri[1], tri[2]]
                    .map(|i| Point3::new(vertices[2 * i], vertices[2 * i + 1], 0.0));
                // earcut does not promise a winding
                let cross = (b - a).cross(&(c - a)).z;
                if cross.abs() <= Real::EPSILON {
                    continue;
                }
                result.push(if cross > 0.0 { [a, b, c] } else { [a, c, b] });
            }
        }
        result
    }

    /// Linear extrusion along +Z from z=0 to z=`height`.
    ///
    /// Caps are ear-cut triangles, every ring edge (outer and holes) becomes a
    /// side quad. A non-positive height yields an empty mesh.
    pub fn extrude(&self, height: Real) -> Mesh<S> {
        if height <= 0.0 || !height.is_finite() || self.is_empty() {
            return Mesh::new();
        }

        let mut polygons = Vec::new();
        let top_offset = Vector3::new(0.0, 0.0, height);

        for [a, b, c] in self.triangulate() {
            // bottom faces down, so it winds the other way
            polygons.push(Polygon::new(
                vec![
                    Vertex::new(a, -Vector3::z()),
                    Vertex::new(c, -Vector3::z()),
                    Vertex::new(b, -Vector3::z()),
                ],
                self.metadata.clone(),
            ));
            polygons.push(Polygon::new(
                vec![
                    Vertex::new(a + top_offset, Vector3::z()),
                    Vertex::new(b + top_offset, Vector3::z()),
                    Vertex::new(c + top_offset, Vector3::z()),
                ],
                self.metadata.clone(),
            ));
        }

        for polygon in &self.geometry.0 {
            for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                polygons.extend(self.side_walls(ring, height));
            }
        }

        Mesh::from_polygons(&polygons, self.metadata.clone())
    }

    /// Quads standing on each edge of `ring`; outward normals lie to the right
    /// of the edge direction for a correctly oriented ring.
    fn side_walls(&self, ring: &LineString<Real>, height: Real) -> Vec<Polygon<S>> {
        ring.lines()
            .filter_map(|line| {
                let Coord { x: x0, y: y0 } = line.start;
                let Coord { x: x1, y: y1 } = line.end;
                let normal = Vector3::new(y1 - y0, x0 - x1, 0.0);
                if normal.norm() <= Real::EPSILON {
                    return None;
                }
                let normal = normal.normalize();
                Some(Polygon::new(
                    vec![
                        Vertex::new(Point3::new(x0, y0, 0.0), normal),
                        Vertex::new(Point3::new(x1, y1, 0.0), normal),
                        Vertex::new(Point3::new(x1, y1, height), normal),
                        Vertex::new(Point3::new(x0, y0, height), normal),
                    ],
                    self.metadata.clone(),
                ))
            })
            .collect()
    }
}

impl<S: Clone + Debug + Send + Sync> Default for Sketch<S> {
    fn default() -> Self {
        Self::new()
    }
}
