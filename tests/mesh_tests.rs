mod support;

use nalgebra::Vector3;
use pontoon::float_types::{PI, Real};
use pontoon::mesh::Mesh;
use pontoon::mesh::plane::Plane;
use pontoon::sketch::Sketch;
use pontoon::traits::CSG;
use support::{approx_eq, ngon_area};

const EPS: Real = 1e-6;

fn overlapping_cubes() -> (Mesh<()>, Mesh<()>) {
    let a = Mesh::cube(2.0, None);
    let b = Mesh::<()>::cube(2.0, None).translate(1.0, 1.0, 1.0);
    (a, b)
}

#[test]
fn union_of_overlapping_cubes() {
    let (a, b) = overlapping_cubes();
    let union = a.union(&b);
    assert!(approx_eq(union.volume(), 15.0, EPS), "volume {}", union.volume());

    let bb = union.bounding_box();
    assert!(approx_eq(bb.mins.x, 0.0, EPS));
    assert!(approx_eq(bb.maxs.z, 3.0, EPS));
}

#[test]
fn difference_of_overlapping_cubes() {
    let (a, b) = overlapping_cubes();
    let diff = a.difference(&b);
    assert!(approx_eq(diff.volume(), 7.0, EPS), "volume {}", diff.volume());

    let bb = diff.bounding_box();
    assert!(approx_eq(bb.maxs.x, 2.0, EPS));
    assert!(approx_eq(bb.maxs.y, 2.0, EPS));
}

#[test]
fn intersection_of_overlapping_cubes() {
    let (a, b) = overlapping_cubes();
    let both = a.intersection(&b);
    assert!(approx_eq(both.volume(), 1.0, EPS), "volume {}", both.volume());

    let bb = both.bounding_box();
    for axis in 0..3 {
        assert!(approx_eq(bb.mins[axis], 1.0, EPS));
        assert!(approx_eq(bb.maxs[axis], 2.0, EPS));
    }
}

#[test]
fn disjoint_union_leaves_polygons_alone() {
    let a: Mesh<()> = Mesh::cube(1.0, None);
    let b = Mesh::<()>::cube(1.0, None).translate(5.0, 0.0, 0.0);
    let union = a.union(&b);
    assert_eq!(union.polygons.len(), a.polygons.len() + b.polygons.len());
    assert!(approx_eq(union.volume(), 2.0, EPS));
}

#[test]
fn difference_with_disjoint_operand_is_identity() {
    let a: Mesh<()> = Mesh::cube(1.0, None);
    let far = Mesh::<()>::cube(1.0, None).translate(0.0, 0.0, 10.0);
    let diff = a.difference(&far);
    assert_eq!(diff.polygons.len(), a.polygons.len());
    assert!(approx_eq(diff.volume(), 1.0, EPS));
}

#[test]
fn coaxial_cylinders_leave_a_tube() {
    let outer: Mesh<()> = Mesh::cylinder(2.0, 5.0, 16, None);
    let inner = Mesh::<()>::cylinder(1.0, 7.0, 16, None).translate(0.0, 0.0, -1.0);
    let tube = outer.difference(&inner);

    let expected = (ngon_area(2.0, 16) - ngon_area(1.0, 16)) * 5.0;
    assert!(approx_eq(tube.volume(), expected, 1e-6), "volume {}", tube.volume());
}

#[test]
fn mirrored_solids_stay_outward() {
    let cube: Mesh<()> = Mesh::cuboid(1.0, 2.0, 3.0, None);
    let mirrored = cube.mirror(Plane::from_normal(Vector3::x(), 0.0));
    assert!(approx_eq(mirrored.volume(), 6.0, EPS));

    let bb = mirrored.bounding_box();
    assert!(approx_eq(bb.mins.x, -1.0, EPS));
    assert!(approx_eq(bb.maxs.x, 0.0, EPS));

    let flipped = cube.scale(1.0, -1.0, 1.0);
    assert!(flipped.volume() > 0.0);

    // reflected copies still combine correctly
    let pair = cube.union(&mirrored);
    assert!(approx_eq(pair.volume(), 12.0, EPS));
}

#[test]
fn inverse_flips_the_sign_of_the_volume() {
    let cube: Mesh<()> = Mesh::cube(2.0, None);
    assert!(approx_eq(cube.inverse().volume(), -8.0, EPS));
}

#[test]
fn rotation_about_z_moves_bounds() {
    let block: Mesh<()> = Mesh::cuboid(1.0, 2.0, 3.0, None).rotate(0.0, 0.0, 90.0);
    let bb = block.bounding_box();
    assert!(approx_eq(bb.mins.x, -2.0, EPS));
    assert!(approx_eq(bb.maxs.x, 0.0, EPS));
    assert!(approx_eq(bb.mins.y, 0.0, EPS));
    assert!(approx_eq(bb.maxs.y, 1.0, EPS));
    assert!(approx_eq(block.volume(), 6.0, EPS));
}

#[test]
fn cylinder_laid_along_y() {
    let rod: Mesh<()> = Mesh::cylinder(1.0, 10.0, 12, None).rotate(-90.0, 0.0, 0.0);
    let bb = rod.bounding_box();
    assert!(approx_eq(bb.mins.y, 0.0, EPS));
    assert!(approx_eq(bb.maxs.y, 10.0, EPS));
    assert!(bb.maxs.z <= 1.0 + EPS);
}

#[test]
fn center_and_float_reposition() {
    let block: Mesh<()> = Mesh::cuboid(2.0, 4.0, 6.0, None).translate(3.0, 3.0, 3.0);
    let centred = block.center().bounding_box();
    assert!(approx_eq(centred.center().coords.norm(), 0.0, EPS));

    let floated = block.center().float().bounding_box();
    assert!(approx_eq(floated.mins.z, 0.0, EPS));
    assert!(approx_eq(floated.maxs.z, 6.0, EPS));
}

#[test]
fn distribute_linear_makes_copies() {
    let row = Mesh::<()>::cube(1.0, None).distribute_linear(3, Vector3::x(), 2.0);
    assert!(approx_eq(row.volume(), 3.0, EPS));
    assert!(approx_eq(row.bounding_box().maxs.x, 5.0, EPS));
}

#[test]
fn triangulation_keeps_shape() {
    let cube: Mesh<()> = Mesh::cube(1.0, None);
    assert_eq!(cube.triangle_count(), 12);

    let tris = cube.triangulate();
    assert!(tris.polygons.iter().all(|p| p.vertices.len() == 3));
    assert!(approx_eq(tris.volume(), 1.0, EPS));
}

#[test]
fn extruded_sketch_with_hole() {
    let outer = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]];
    let hole: &[[Real; 2]] = &[[0.5, 0.5], [1.5, 0.5], [1.5, 1.5], [0.5, 1.5]];
    let frame: Sketch<()> = Sketch::polygon_with_holes(&outer, &[hole], None);
    assert!(approx_eq(frame.area(), 3.0, EPS));

    let solid = frame.extrude(5.0);
    assert!(approx_eq(solid.volume(), 15.0, EPS));
    assert!(solid.is_finite());
}

#[test]
fn sphere_volume_approaches_analytic() {
    let sphere: Mesh<()> = Mesh::sphere(1.0, 64, 32, None);
    let analytic = 4.0 / 3.0 * PI;
    assert!(sphere.volume() < analytic);
    assert!(sphere.volume() > 0.97 * analytic);
}

#[test]
fn quarter_turns_compose() {
    let block: Mesh<()> = Mesh::cuboid(1.0, 2.0, 3.0, None);
    let turned = block.rotate(90.0, 0.0, 0.0).rotate(-90.0, 0.0, 0.0);
    let bb = turned.bounding_box();
    assert!(approx_eq(bb.maxs.y, 2.0, EPS));
    assert!(approx_eq(bb.maxs.z, 3.0, EPS));
}
