//! Polygon-level boolean operations.
//!
//! Everything reduces to [`merge`], the union of two closed solids. A
//! difference is the complement of `!a ∪ b` and an intersection the
//! complement of `!a ∪ !b`.

use crate::aabb::Aabb;
use crate::mesh::bsp::BspTree;
use crate::mesh::polygon::Polygon;
use std::fmt::Debug;

/// Surface of the union of two closed solids.
pub fn merge<S: Clone + Send + Sync + Debug>(
    a: Vec<Polygon<S>>,
    b: Vec<Polygon<S>>,
) -> Vec<Polygon<S>> {
    let mut a = BspTree::new(a);
    let mut b = BspTree::new(b);

    a.clip_by(&b);
    b.clip_by(&a);
    // faces of b lying on faces of a survive the first pass; clip them again
    // from the inside so only a's copy is kept
    b.flip();
    b.clip_by(&a);
    b.flip();

    let mut surface = a.into_polygons();
    surface.extend(b.into_polygons());
    surface
}

/// The same surface bounding the outside instead of the inside.
pub fn complement<S: Clone + Send + Sync>(mut polygons: Vec<Polygon<S>>) -> Vec<Polygon<S>> {
    polygons.iter_mut().for_each(Polygon::flip);
    polygons
}

/// Split `polygons` into those whose boxes touch `other` and those that
/// cannot reach it.
pub fn split_by_box<S: Clone + Send + Sync>(
    polygons: &[Polygon<S>],
    other: &Aabb,
) -> (Vec<Polygon<S>>, Vec<Polygon<S>>) {
    polygons
        .iter()
        .cloned()
        .partition(|polygon| polygon.bounding_box().intersects(other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use crate::traits::CSG;

    fn volume(polygons: Vec<Polygon<()>>) -> f64 {
        Mesh::from_polygons(&polygons, None).volume()
    }

    #[test]
    fn complement_negates_volume() {
        let cube = Mesh::<()>::cube(2.0, None);
        assert!((volume(complement(cube.polygons)) + 8.0).abs() < 1e-9);
    }

    #[test]
    fn merge_of_nested_solids_is_the_outer_one() {
        let outer = Mesh::<()>::cube(4.0, None);
        let inner = Mesh::<()>::cube(1.0, None).translate(1.0, 1.0, 1.0);
        let merged = merge(outer.polygons, inner.polygons);
        assert!((volume(merged) - 64.0).abs() < 1e-9);
    }

    #[test]
    fn box_split_separates_distant_faces() {
        let cube = Mesh::<()>::cube(1.0, None);
        let far = Mesh::<()>::cube(1.0, None).translate(0.5, 0.5, 3.0);
        let (touching, clear) = split_by_box(&cube.polygons, &far.bounding_box());
        assert!(touching.is_empty());
        assert_eq!(clear.len(), 6);
    }
}
