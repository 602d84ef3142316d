//! Declarative geometry tree.
//!
//! A [`Node`] is an immutable description of a solid: a primitive, a loft, an
//! extruded [`Profile`], or a transform / boolean / material tag wrapped around
//! shared children. Building a tree is cheap and infallible; the kernel only
//! runs when [`Node::to_mesh`] evaluates it.

use crate::aabb::Aabb;
use crate::errors::ValidationError;
use crate::float_types::{Real, tolerance};
use crate::mesh::Mesh;
use crate::mesh::loft::{Easing, LoftStation};
use crate::mesh::plane::Plane;
use crate::sketch::Sketch;
use crate::traits::{CSG, mirror_matrix, rotation_matrix};
use nalgebra::{Matrix4, Point3, Translation3, Vector3};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cosmetic material tag carried into the mesh as polygon metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Aluminum,
    Steel,
    Polyethylene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
}

/// A rigid or affine placement. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Transform {
    Translate { x: Real, y: Real, z: Real },
    /// About X, then Y, then Z
    Rotate { x: Real, y: Real, z: Real },
    Scale { x: Real, y: Real, z: Real },
    /// Reflection about the plane `normal · p = offset`
    Mirror { normal: [Real; 3], offset: Real },
    /// Column-major 4x4 matrix
    Matrix { columns: [Real; 16] },
}

impl Transform {
    pub fn matrix(&self) -> Matrix4<Real> {
        match *self {
            Transform::Translate { x, y, z } => {
                Translation3::from(Vector3::new(x, y, z)).to_homogeneous()
            },
            Transform::Rotate { x, y, z } => rotation_matrix(x, y, z),
            Transform::Scale { x, y, z } => {
                Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z))
            },
            Transform::Mirror { normal, offset } => {
                let plane = Plane::from_normal(Vector3::from(normal), offset);
                mirror_matrix(&plane).unwrap_or_else(Matrix4::identity)
            },
            Transform::Matrix { columns } => Matrix4::from_column_slice(&columns),
        }
    }
}

/// 2D cross-section in the XY plane, extruded along +Z by [`Node::Extrude`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Profile {
    /// Spans (0, 0) to (width, length)
    Rectangle { width: Real, length: Real },
    /// Centred on the origin
    Circle { radius: Real, segments: usize },
    Polygon { outer: Vec<[Real; 2]>, holes: Vec<Vec<[Real; 2]>> },
    Translate { x: Real, y: Real, child: Arc<Profile> },
}

impl Profile {
    pub fn polygon(outer: Vec<[Real; 2]>) -> Self {
        Profile::Polygon { outer, holes: Vec::new() }
    }

    pub fn translate(self, x: Real, y: Real) -> Self {
        Profile::Translate { x, y, child: Arc::new(self) }
    }

    /// Range checks that keep the sketch non-degenerate
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Profile::Rectangle { width, length } => {
                ValidationError::check_positive("rectangle width", *width)?;
                ValidationError::check_positive("rectangle length", *length)
            },
            Profile::Circle { radius, segments } => {
                ValidationError::check_positive("circle radius", *radius)?;
                if *segments < 3 {
                    return Err(ValidationError::TooFewSegments(*segments));
                }
                Ok(())
            },
            Profile::Polygon { outer, holes } => {
                for ring in std::iter::once(outer).chain(holes) {
                    if ring.len() < 3 {
                        return Err(ValidationError::Other(
                            format!("polygon ring needs at least 3 points, got {}", ring.len()),
                            None,
                        ));
                    }
                    if let Some([x, y]) = ring.iter().find(|[x, y]| !x.is_finite() || !y.is_finite()) {
                        return Err(ValidationError::InvalidCoordinate(Point3::new(*x, *y, 0.0)));
                    }
                }
                Ok(())
            },
            Profile::Translate { child, .. } => child.validate(),
        }
    }

    pub fn to_sketch<S: Clone + std::fmt::Debug + Send + Sync>(&self, metadata: Option<S>) -> Sketch<S> {
        match self {
            Profile::Rectangle { width, length } => Sketch::rectangle(*width, *length, metadata),
            Profile::Circle { radius, segments } => Sketch::circle(*radius, *segments, metadata),
            Profile::Polygon { outer, holes } => {
                let holes: Vec<&[[Real; 2]]> = holes.iter().map(Vec::as_slice).collect();
                Sketch::polygon_with_holes(outer, &holes, metadata)
            },
            Profile::Translate { x, y, child } => child.to_sketch(metadata).translate(*x, *y),
        }
    }

    /// Enclosed area of the profile
    pub fn area(&self) -> Real {
        self.to_sketch::<()>(None).area()
    }
}

/// One node of the geometry tree. Children are shared, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Empty,
    /// Box spanning (0, 0, 0) to (width, length, height)
    Cuboid { width: Real, length: Real, height: Real },
    /// Along +Z from z=0
    Cylinder { radius: Real, height: Real, segments: usize },
    Frustum { radius1: Real, radius2: Real, height: Real, segments: usize },
    Sphere { radius: Real, segments: usize, stacks: usize },
    /// Circular sections along +Z, `steps` eased bands between stations
    Loft { stations: Vec<LoftStation>, easing: Easing, steps: usize, segments: usize },
    Extrude { profile: Arc<Profile>, height: Real },
    Transform { op: Transform, child: Arc<Node> },
    /// Union and intersection fold over `children`; difference subtracts
    /// every later child from the first.
    Boolean { op: BooleanOp, children: Vec<Arc<Node>> },
    Material { material: Material, child: Arc<Node> },
}

impl Node {
    pub const fn cuboid(width: Real, length: Real, height: Real) -> Node {
        Node::Cuboid { width, length, height }
    }

    pub const fn cylinder(radius: Real, height: Real, segments: usize) -> Node {
        Node::Cylinder { radius, height, segments }
    }

    pub const fn frustum(radius1: Real, radius2: Real, height: Real, segments: usize) -> Node {
        Node::Frustum { radius1, radius2, height, segments }
    }

    pub const fn sphere(radius: Real, segments: usize, stacks: usize) -> Node {
        Node::Sphere { radius, segments, stacks }
    }

    pub fn loft(stations: Vec<LoftStation>, easing: Easing, steps: usize, segments: usize) -> Node {
        Node::Loft { stations, easing, steps, segments }
    }

    pub fn extrude(profile: Profile, height: Real) -> Node {
        Node::Extrude { profile: Arc::new(profile), height }
    }

    pub fn with_transform(&self, op: Transform) -> Node {
        Node::Transform { op, child: Arc::new(self.clone()) }
    }

    pub fn with_material(&self, material: Material) -> Node {
        Node::Material { material, child: Arc::new(self.clone()) }
    }

    /// N-ary union; `Empty` when `nodes` is empty.
    pub fn union_all<I: IntoIterator<Item = Node>>(nodes: I) -> Node {
        let children: Vec<Arc<Node>> = nodes.into_iter().map(Arc::new).collect();
        match children.len() {
            0 => Node::Empty,
            1 => (*children[0]).clone(),
            _ => Node::Boolean { op: BooleanOp::Union, children },
        }
    }

    /// Combine with `op`, appending to `self` when it already is the same
    /// boolean so chains stay flat.
    fn combine(&self, op: BooleanOp, other: &Node) -> Node {
        match self {
            Node::Boolean { op: own, children } if *own == op => {
                let mut children = children.clone();
                children.push(Arc::new(other.clone()));
                Node::Boolean { op, children }
            },
            _ => Node::Boolean {
                op,
                children: vec![Arc::new(self.clone()), Arc::new(other.clone())],
            },
        }
    }

    /// Union of this node with its reflection about the YZ plane (x = 0).
    pub fn symmetric_about_yz(&self) -> Node {
        self.union(&self.mirror(Plane::from_normal(Vector3::x(), 0.0)))
    }

    /// Translate along `axis` so the lower bound sits at `value`.
    pub fn align_min(&self, axis: usize, value: Real) -> Node {
        let mut offset = Vector3::zeros();
        offset[axis] = value - self.bounds().mins[axis];
        self.translate_vector(offset)
    }

    /// Number of primitive leaves, counting shared subtrees once per use.
    pub fn primitive_count(&self) -> usize {
        match self {
            Node::Empty => 0,
            Node::Cuboid { .. }
            | Node::Cylinder { .. }
            | Node::Frustum { .. }
            | Node::Sphere { .. }
            | Node::Loft { .. }
            | Node::Extrude { .. } => 1,
            Node::Transform { child, .. } | Node::Material { child, .. } => child.primitive_count(),
            Node::Boolean { children, .. } => children.iter().map(|c| c.primitive_count()).sum(),
        }
    }

    /// Canonical JSON description of the tree. Equal trees describe equally.
    pub fn describe(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Analytic bounds, never smaller than the evaluated mesh. Differences keep
    /// the bounds of their first operand.
    pub fn bounds(&self) -> Aabb {
        match self {
            Node::Empty => Aabb::empty(),
            Node::Cuboid { width, length, height } => {
                Aabb::new(Point3::origin(), Point3::new(*width, *length, *height))
            },
            Node::Cylinder { radius, height, .. } => radial_bounds(*radius, 0.0, *height),
            Node::Frustum { radius1, radius2, height, .. } => {
                radial_bounds(radius1.max(*radius2), 0.0, *height)
            },
            Node::Sphere { radius, .. } => radial_bounds(*radius, -radius, *radius),
            Node::Loft { stations, .. } => {
                let radius = stations.iter().map(|s| s.radius).fold(0.0, Real::max);
                let z_min = stations.first().map_or(0.0, |s| s.z);
                let z_max = stations.last().map_or(0.0, |s| s.z);
                radial_bounds(radius, z_min, z_max)
            },
            Node::Extrude { profile, height } => match profile.to_sketch::<()>(None).bounding_rect() {
                Some(rect) => Aabb::new(
                    Point3::new(rect.min().x, rect.min().y, 0.0),
                    Point3::new(rect.max().x, rect.max().y, *height),
                ),
                None => Aabb::empty(),
            },
            Node::Transform { op, child } => child.bounds().transformed(&op.matrix()),
            Node::Material { child, .. } => child.bounds(),
            Node::Boolean { op, children } => {
                let mut boxes = children.iter().map(|c| c.bounds());
                let Some(first) = boxes.next() else {
                    return Aabb::empty();
                };
                match op {
                    BooleanOp::Union => boxes.fold(first, |acc, b| acc.merged(&b)),
                    BooleanOp::Difference => first,
                    BooleanOp::Intersection => boxes
                        .try_fold(first, |acc, b| acc.intersection(&b))
                        .unwrap_or_else(Aabb::empty),
                }
            },
        }
    }

    /// Evaluate the tree into a polygon mesh tagged with materials.
    pub fn to_mesh(&self) -> Result<Mesh<Material>, ValidationError> {
        let mesh = self.evaluate(None)?;
        if mesh.polygons.is_empty() {
            return Err(ValidationError::Other("geometry evaluated to an empty mesh".into(), None));
        }
        if let Some(bad) = mesh.vertices().into_iter().find(|v| !v.is_finite()) {
            return Err(ValidationError::InvalidCoordinate(bad.pos));
        }
        log::debug!(
            "evaluated {} primitives into {} polygons",
            self.primitive_count(),
            mesh.polygons.len()
        );
        Ok(mesh)
    }

    fn evaluate(&self, material: Option<Material>) -> Result<Mesh<Material>, ValidationError> {
        match self {
            Node::Empty => Ok(Mesh::new()),
            Node::Cuboid { width, length, height } => {
                ValidationError::check_positive("cuboid width", *width)?;
                ValidationError::check_positive("cuboid length", *length)?;
                ValidationError::check_positive("cuboid height", *height)?;
                Ok(Mesh::cuboid(*width, *length, *height, material))
            },
            Node::Cylinder { radius, height, segments } => {
                ValidationError::check_positive("cylinder radius", *radius)?;
                ValidationError::check_positive("cylinder height", *height)?;
                check_segments(*segments)?;
                Ok(Mesh::cylinder(*radius, *height, *segments, material))
            },
            Node::Frustum { radius1, radius2, height, segments } => {
                ValidationError::check_positive("frustum height", *height)?;
                check_segments(*segments)?;
                if *radius1 < 0.0 || *radius2 < 0.0 || radius1.max(*radius2) <= 0.0 {
                    return Err(ValidationError::NonPositive {
                        what: "frustum radius",
                        value: radius1.max(*radius2),
                    });
                }
                Ok(Mesh::frustum(*radius1, *radius2, *height, *segments, material))
            },
            Node::Sphere { radius, segments, stacks } => {
                ValidationError::check_positive("sphere radius", *radius)?;
                check_segments(*segments)?;
                if *stacks < 2 {
                    return Err(ValidationError::TooFewSegments(*stacks));
                }
                Ok(Mesh::sphere(*radius, *segments, *stacks, material))
            },
            Node::Loft { stations, easing, steps, segments } => {
                Mesh::loft(stations, *easing, *steps, *segments, material)
            },
            Node::Extrude { profile, height } => {
                profile.validate()?;
                ValidationError::check_positive("extrusion height", *height)?;
                Ok(profile.to_sketch(material).extrude(*height))
            },
            Node::Transform { op, child } => {
                let matrix = op.matrix();
                let det = matrix.fixed_view::<3, 3>(0, 0).determinant();
                if !det.is_finite() || det.abs() <= tolerance() {
                    return Err(ValidationError::SingularTransform(format!(
                        "{op:?} has determinant {det}"
                    )));
                }
                Ok(child.evaluate(material)?.transform(&matrix))
            },
            Node::Material { material, child } => child.evaluate(Some(*material)),
            Node::Boolean { op, children } => {
                let mut meshes = children.iter().map(|c| c.evaluate(material));
                let Some(first) = meshes.next() else {
                    return Ok(Mesh::new());
                };
                meshes.try_fold(first?, |acc, next| {
                    let next = next?;
                    if next.polygons.is_empty() {
                        log::warn!("{op:?} operand evaluated to an empty mesh");
                    }
                    log::debug!(
                        "{op:?}: {} x {} polygons",
                        acc.polygons.len(),
                        next.polygons.len()
                    );
                    Ok(match op {
                        BooleanOp::Union => acc.union(&next),
                        BooleanOp::Difference => acc.difference(&next),
                        BooleanOp::Intersection => acc.intersection(&next),
                    })
                })
            },
        }
    }
}

fn radial_bounds(radius: Real, z_min: Real, z_max: Real) -> Aabb {
    Aabb::new(Point3::new(-radius, -radius, z_min), Point3::new(radius, radius, z_max))
}

fn check_segments(segments: usize) -> Result<(), ValidationError> {
    if segments < 3 {
        return Err(ValidationError::TooFewSegments(segments));
    }
    Ok(())
}

impl CSG for Node {
    fn new() -> Self {
        Node::Empty
    }

    fn union(&self, other: &Node) -> Node {
        self.combine(BooleanOp::Union, other)
    }

    fn difference(&self, other: &Node) -> Node {
        self.combine(BooleanOp::Difference, other)
    }

    fn intersection(&self, other: &Node) -> Node {
        self.combine(BooleanOp::Intersection, other)
    }

    fn transform(&self, matrix: &Matrix4<Real>) -> Node {
        let mut columns = [0.0; 16];
        columns.copy_from_slice(matrix.as_slice());
        self.with_transform(Transform::Matrix { columns })
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds()
    }

    fn translate(&self, x: Real, y: Real, z: Real) -> Node {
        self.with_transform(Transform::Translate { x, y, z })
    }

    fn translate_vector(&self, vector: Vector3<Real>) -> Node {
        self.translate(vector.x, vector.y, vector.z)
    }

    fn rotate(&self, x: Real, y: Real, z: Real) -> Node {
        self.with_transform(Transform::Rotate { x, y, z })
    }

    fn scale(&self, x: Real, y: Real, z: Real) -> Node {
        self.with_transform(Transform::Scale { x, y, z })
    }

    fn mirror(&self, plane: Plane) -> Node {
        if plane.normal().norm() < tolerance() {
            return self.clone();
        }
        self.with_transform(Transform::Mirror {
            normal: plane.normal().into(),
            offset: plane.offset(),
        })
    }
}
