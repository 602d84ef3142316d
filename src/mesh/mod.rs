//! Polygon meshes: the evaluated form of every solid.

use crate::aabb::Aabb;
use crate::float_types::Real;
use crate::mesh::{polygon::Polygon, vertex::Vertex};
use crate::traits::CSG;
use nalgebra::{Matrix4, Point3};
use std::{fmt::Debug, sync::OnceLock};

pub mod boolean;
pub mod bsp;
pub mod loft;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

/// A closed surface of convex polygons, each carrying its own metadata.
#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    pub polygons: Vec<Polygon<S>>,
    /// Filled on first use, reset by every operation producing a new mesh
    pub bounding_box: OnceLock<Aabb>,
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    pub fn from_polygons(polygons: &[Polygon<S>], metadata: Option<S>) -> Self {
        Mesh {
            polygons: polygons.to_vec(),
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// New mesh over `polygons` carrying this mesh's metadata
    fn with_polygons(&self, polygons: Vec<Polygon<S>>) -> Mesh<S> {
        Mesh {
            polygons,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons.iter().flat_map(|p| p.vertices.iter().copied()).collect()
    }

    /// Number of triangles the mesh exports as
    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .map(|p| p.vertices.len().saturating_sub(2))
            .sum()
    }

    /// The same surface with every polygon fanned into triangles
    pub fn triangulate(&self) -> Mesh<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate()
                    .into_iter()
                    .map(move |triangle| poly.with_vertices(triangle.to_vec()))
            })
            .collect::<Vec<_>>();

        Mesh::from_polygons(&triangles, self.metadata.clone())
    }

    /// Visit every triangle of the surface, with the owning polygon's normal
    pub fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Point3<Real>; 3], nalgebra::Vector3<Real>),
    {
        for poly in &self.polygons {
            let normal = poly.plane.normal();
            for [a, b, c] in poly.triangulate() {
                f([a.pos, b.pos, c.pos], normal);
            }
        }
    }

    /// Signed volume via the divergence theorem; positive for outward-facing meshes
    pub fn volume(&self) -> Real {
        let mut volume = 0.0;
        self.visit_triangles(|[a, b, c], _| {
            volume += a.coords.dot(&b.coords.cross(&c.coords)) / 6.0;
        });
        volume
    }

    /// Inside out: every face reversed, volume negated
    pub fn inverse(&self) -> Mesh<S> {
        self.with_polygons(boolean::complement(self.polygons.clone()))
    }

    /// Every vertex has finite coordinates
    pub fn is_finite(&self) -> bool {
        self.polygons
            .iter()
            .all(|p| p.vertices.iter().all(Vertex::is_finite))
    }
}

impl<S: Clone + Send + Sync + Debug> CSG for Mesh<S> {
    fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Faces that cannot reach the other operand's box skip the BSP work and
    /// are kept as they are.
    fn union(&self, other: &Mesh<S>) -> Mesh<S> {
        let (a, a_clear) = boolean::split_by_box(&self.polygons, &other.bounding_box());
        let (b, b_clear) = boolean::split_by_box(&other.polygons, &self.bounding_box());

        let mut polygons = boolean::merge(a, b);
        polygons.extend(a_clear);
        polygons.extend(b_clear);
        self.with_polygons(polygons)
    }

    /// Faces of `other` away from `self` cannot cut it and are dropped.
    fn difference(&self, other: &Mesh<S>) -> Mesh<S> {
        let (a, a_clear) = boolean::split_by_box(&self.polygons, &other.bounding_box());
        let (b, _) = boolean::split_by_box(&other.polygons, &self.bounding_box());

        let mut polygons = boolean::complement(boolean::merge(boolean::complement(a), b));
        polygons.extend(a_clear);
        self.with_polygons(polygons)
    }

    fn intersection(&self, other: &Mesh<S>) -> Mesh<S> {
        let a = boolean::complement(self.polygons.clone());
        let b = boolean::complement(other.polygons.clone());
        self.with_polygons(boolean::complement(boolean::merge(a, b)))
    }

    /// Normals go through the inverse transpose of the linear part. A
    /// reflection reverses every winding so faces keep pointing out.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh<S> {
        let linear = mat.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_mat = linear.try_inverse().map(|inv| inv.transpose());
        let reflects = linear.determinant() < 0.0;

        let polygons = self
            .polygons
            .iter()
            .map(|poly| {
                let mut vertices: Vec<Vertex> = poly
                    .vertices
                    .iter()
                    .map(|v| {
                        let normal = normal_mat.map_or(v.normal, |n| (n * v.normal).normalize());
                        Vertex::new(mat.transform_point(&v.pos), normal)
                    })
                    .collect();
                if reflects {
                    vertices.reverse();
                }
                let mut moved = Polygon::new(vertices, poly.metadata.clone());
                if normal_mat.is_none() {
                    moved.set_new_normal();
                }
                moved
            })
            .collect();
        self.with_polygons(polygons)
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            Aabb::from_points(self.polygons.iter().flat_map(|p| p.vertices.iter().map(|v| &v.pos)))
                .unwrap_or_else(Aabb::empty)
        })
    }
}
