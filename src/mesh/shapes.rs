//! 3D Shapes as `Mesh`s

use crate::errors::ValidationError;
use crate::float_types::{PI, Real, TAU};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use crate::traits::CSG;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Create a right prism (a box) that spans from (0, 0, 0)
    /// to (width, length, height). All dimensions must be >= 0.
    pub fn cuboid(width: Real, length: Real, height: Real, metadata: Option<S>) -> Mesh<S> {
        // Define the eight corner points of the prism.
        //    (x, y, z)
        let p000 = Point3::new(0.0, 0.0, 0.0);
        let p100 = Point3::new(width, 0.0, 0.0);
        let p110 = Point3::new(width, length, 0.0);
        let p010 = Point3::new(0.0, length, 0.0);

        let p001 = Point3::new(0.0, 0.0, height);
        let p101 = Point3::new(width, 0.0, height);
        let p111 = Point3::new(width, length, height);
        let p011 = Point3::new(0.0, length, height);

        // We'll define 6 faces (each a Polygon), in an order that keeps outward-facing normals
        // and consistent (counter-clockwise) vertex winding as viewed from outside the prism.
        let face = |points: [Point3<Real>; 4], normal: Vector3<Real>| {
            Polygon::new(
                points.iter().map(|p| Vertex::new(*p, normal)).collect(),
                metadata.clone(),
            )
        };

        let polygons = vec![
            // Bottom face (z=0)
            face([p000, p010, p110, p100], -Vector3::z()),
            // Top face (z=height)
            face([p001, p101, p111, p011], Vector3::z()),
            // Front face (y=0)
            face([p000, p100, p101, p001], -Vector3::y()),
            // Back face (y=length)
            face([p010, p011, p111, p110], Vector3::y()),
            // Left face (x=0)
            face([p000, p001, p011, p010], -Vector3::x()),
            // Right face (x=width)
            face([p100, p110, p111, p101], Vector3::x()),
        ];

        Mesh::from_polygons(&polygons, metadata)
    }

    pub fn cube(width: Real, metadata: Option<S>) -> Mesh<S> {
        Self::cuboid(width, width, width, metadata)
    }

    /// Construct a frustum along +Z with base radius `radius1` at z=0 and top
    /// radius `radius2` at z=`height`. Each ring has `segments` vertices.
    pub fn frustum(
        radius1: Real,
        radius2: Real,
        height: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Mesh<S> {
        let rings = [(0.0, radius1), (height, radius2)];
        Self::stacked_rings(&rings, segments, metadata)
    }

    /// A right circular cylinder along +Z from z=0 to z=`height`.
    pub fn cylinder(radius: Real, height: Real, segments: usize, metadata: Option<S>) -> Mesh<S> {
        Self::frustum(radius, radius, height, segments, metadata)
    }

    /// Creates a sphere of `radius` centred on the origin.
    ///
    /// - `segments`: number of segments around the equator
    /// - `stacks`: number of stacks from pole to pole
    pub fn sphere(radius: Real, segments: usize, stacks: usize, metadata: Option<S>) -> Mesh<S> {
        if segments < 3 || stacks < 2 {
            return Mesh::new();
        }
        let mut polygons = Vec::with_capacity(segments * stacks);

        let vertex = |theta: Real, phi: Real| {
            let dir = Vector3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            Vertex::new(Point3::from(dir * radius), dir)
        };

        for i in 0..segments {
            for j in 0..stacks {
                let t0 = i as Real / segments as Real * TAU;
                let t1 = (i + 1) as Real / segments as Real * TAU;
                let p0 = j as Real / stacks as Real * PI;
                let p1 = (j + 1) as Real / stacks as Real * PI;

                // pole caps collapse into triangles
                let mut vertices = vec![vertex(t0, p0)];
                if j > 0 {
                    vertices.push(vertex(t1, p0));
                }
                if j < stacks - 1 {
                    vertices.push(vertex(t1, p1));
                }
                vertices.push(vertex(t0, p1));

                polygons.push(Polygon::new(vertices, metadata.clone()));
            }
        }

        Mesh::from_polygons(&polygons, metadata)
    }

    /// Closed solid of revolution around +Z through a sequence of `(z, radius)` rings.
    ///
    /// Rings must be sorted by increasing `z`. A ring of radius zero collapses the cap
    /// into a point, otherwise the first and last rings are closed by triangle fans.
    pub fn revolve_rings(
        rings: &[(Real, Real)],
        segments: usize,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, ValidationError> {
        if segments < 3 {
            return Err(ValidationError::TooFewSegments(segments));
        }
        if rings.len() < 2 {
            return Err(ValidationError::LoftStations(format!(
                "need at least two rings, got {}",
                rings.len()
            )));
        }
        for pair in rings.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(ValidationError::LoftStations(format!(
                    "stations must increase along the axis, {} follows {}",
                    pair[1].0, pair[0].0
                )));
            }
        }
        if let Some(&(z, r)) = rings.iter().find(|(_, r)| !r.is_finite() || *r < 0.0) {
            return Err(ValidationError::LoftStations(format!(
                "radius {r} at z = {z} must be finite and non-negative"
            )));
        }
        Ok(Self::stacked_rings(rings, segments, metadata))
    }

    /// Side quads between consecutive rings plus the two cap fans.
    fn stacked_rings(rings: &[(Real, Real)], segments: usize, metadata: Option<S>) -> Mesh<S> {
        if segments < 3 || rings.len() < 2 {
            return Mesh::new();
        }

        let angle = |slice: usize| slice as Real / segments as Real * TAU;
        let point = |(z, r): (Real, Real), slice: usize| {
            let a = angle(slice);
            Point3::new(r * a.cos(), r * a.sin(), z)
        };
        let radial = |slice: usize| {
            let a = angle(slice);
            Vector3::new(a.cos(), a.sin(), 0.0)
        };

        let mut polygons = Vec::with_capacity(segments * (rings.len() + 1));

        // (z, r) of the first and last rings close the solid
        let (bottom, top) = (rings[0], rings[rings.len() - 1]);

        for i in 0..segments {
            let j = i + 1;

            if bottom.1 > 0.0 {
                let center = Point3::new(0.0, 0.0, bottom.0);
                polygons.push(Polygon::new(
                    [center, point(bottom, j), point(bottom, i)]
                        .iter()
                        .map(|p| Vertex::new(*p, -Vector3::z()))
                        .collect(),
                    metadata.clone(),
                ));
            }

            for pair in rings.windows(2) {
                let (lower, upper) = (pair[0], pair[1]);
                let mut vertices = vec![
                    Vertex::new(point(lower, i), radial(i)),
                    Vertex::new(point(lower, j), radial(j)),
                ];
                // a zero radius ring degenerates the quad into a triangle
                if upper.1 > 0.0 {
                    vertices.push(Vertex::new(point(upper, j), radial(j)));
                    vertices.push(Vertex::new(point(upper, i), radial(i)));
                } else {
                    vertices.push(Vertex::new(point(upper, i), Vector3::z()));
                }
                if lower.1 <= 0.0 {
                    vertices.remove(0);
                }
                if vertices.len() >= 3 {
                    polygons.push(Polygon::new(vertices, metadata.clone()));
                }
            }

            if top.1 > 0.0 {
                let center = Point3::new(0.0, 0.0, top.0);
                polygons.push(Polygon::new(
                    [center, point(top, i), point(top, j)]
                        .iter()
                        .map(|p| Vertex::new(*p, Vector3::z()))
                        .collect(),
                    metadata.clone(),
                ));
            }
        }

        Mesh::from_polygons(&polygons, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_is_outward_facing() {
        let cuboid: Mesh<()> = Mesh::cuboid(2.0, 3.0, 4.0, None);
        assert_eq!(cuboid.polygons.len(), 6);
        assert!((cuboid.volume() - 24.0).abs() < 1e-9);

        let bb = cuboid.bounding_box();
        assert_eq!(bb.mins, Point3::origin());
        assert_eq!(bb.maxs, Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn cylinder_faces_and_volume() {
        let segments = 64;
        let cylinder: Mesh<()> = Mesh::cylinder(1.0, 2.0, segments, None);
        // bottom fan, side quad, top fan per slice
        assert_eq!(cylinder.polygons.len(), segments * 3);
        let expected = 0.5 * segments as Real * (TAU / segments as Real).sin() * 2.0;
        assert!((cylinder.volume() - expected).abs() < 1e-9);
    }

    #[test]
    fn sphere_polygon_count() {
        let sphere: Mesh<()> = Mesh::sphere(1.0, 16, 8, None);
        assert_eq!(sphere.polygons.len(), 16 * 8);
        assert!(sphere.volume() > 0.0);
    }

    #[test]
    fn revolve_rings_rejects_unsorted_stations() {
        let result: Result<Mesh<()>, _> =
            Mesh::revolve_rings(&[(0.0, 1.0), (2.0, 0.5), (1.0, 0.2)], 12, None);
        assert!(matches!(result, Err(ValidationError::LoftStations(_))));

        let result: Result<Mesh<()>, _> = Mesh::revolve_rings(&[(0.0, 1.0), (1.0, 0.5)], 2, None);
        assert_eq!(result.unwrap_err(), ValidationError::TooFewSegments(2));
    }
}
