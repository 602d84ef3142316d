//! Binary space partition of a closed polygon soup.
//!
//! Cells live in a single vector and point at their children by index, so
//! building, flipping and clipping are flat loops over that vector or over an
//! explicit work list rather than recursion.

use crate::mesh::plane::{BACK, COPLANAR, FRONT, Plane};
use crate::mesh::polygon::Polygon;
use nalgebra::Vector3;
use std::fmt::Debug;

const FRONT_SIDE: usize = 0;
const BACK_SIDE: usize = 1;

/// Planes tried when choosing where to split a cell.
const CANDIDATES: usize = 16;
/// A polygon cut in two costs this many polygons of imbalance.
const SPLIT_COST: usize = 4;

#[derive(Debug, Clone)]
struct Cell<S: Clone> {
    plane: Plane,
    on_plane: Vec<Polygon<S>>,
    children: [Option<usize>; 2],
}

/// Polygons sorted against one plane.
struct Sorted<S: Clone> {
    front: Vec<Polygon<S>>,
    back: Vec<Polygon<S>>,
    on_plane: Vec<Polygon<S>>,
}

/// A solid as a BSP tree: the front side of every leaf plane is empty space,
/// the back side of a plane with no back child is solid.
#[derive(Debug, Clone)]
pub struct BspTree<S: Clone> {
    cells: Vec<Cell<S>>,
}

impl<S: Clone + Send + Sync + Debug> BspTree<S> {
    pub fn new(polygons: Vec<Polygon<S>>) -> Self {
        let mut tree = BspTree { cells: Vec::new() };
        tree.insert(polygons);
        tree
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Add polygons, splitting them down the existing cells and growing new
    /// cells where they fall off a leaf.
    pub fn insert(&mut self, polygons: Vec<Polygon<S>>) {
        if polygons.is_empty() {
            return;
        }
        let root = if self.cells.is_empty() { self.push_cell(&polygons) } else { 0 };

        let mut pending = vec![(root, polygons)];
        while let Some((index, polygons)) = pending.pop() {
            let sorted = sort(&self.cells[index].plane, &polygons, true);
            self.cells[index].on_plane.extend(sorted.on_plane);

            for (side, polygons) in [(FRONT_SIDE, sorted.front), (BACK_SIDE, sorted.back)] {
                if polygons.is_empty() {
                    continue;
                }
                let child = match self.cells[index].children[side] {
                    Some(child) => child,
                    None => {
                        let child = self.push_cell(&polygons);
                        self.cells[index].children[side] = Some(child);
                        child
                    },
                };
                pending.push((child, polygons));
            }
        }
    }

    /// Turn the solid inside out.
    pub fn flip(&mut self) {
        for cell in &mut self.cells {
            cell.plane.flip();
            cell.on_plane.iter_mut().for_each(Polygon::flip);
            cell.children.swap(FRONT_SIDE, BACK_SIDE);
        }
    }

    /// The parts of `polygons` lying outside this solid.
    pub fn clip(&self, polygons: Vec<Polygon<S>>) -> Vec<Polygon<S>> {
        if self.cells.is_empty() {
            return polygons;
        }

        let mut outside = Vec::new();
        let mut pending = vec![(0, polygons)];
        while let Some((index, polygons)) = pending.pop() {
            let cell = &self.cells[index];
            let sorted = sort(&cell.plane, &polygons, false);

            match cell.children[FRONT_SIDE] {
                Some(child) if !sorted.front.is_empty() => pending.push((child, sorted.front)),
                Some(_) => {},
                None => outside.extend(sorted.front),
            }
            if let Some(child) = cell.children[BACK_SIDE] {
                if !sorted.back.is_empty() {
                    pending.push((child, sorted.back));
                }
            }
        }
        outside
    }

    /// Drop every face of this tree that lies inside `other`.
    pub fn clip_by(&mut self, other: &BspTree<S>) {
        for cell in &mut self.cells {
            let faces = std::mem::take(&mut cell.on_plane);
            cell.on_plane = other.clip(faces);
        }
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon<S>> {
        self.cells.iter().flat_map(|cell| cell.on_plane.iter())
    }

    pub fn into_polygons(self) -> Vec<Polygon<S>> {
        self.cells.into_iter().flat_map(|cell| cell.on_plane).collect()
    }

    fn push_cell(&mut self, polygons: &[Polygon<S>]) -> usize {
        let plane = choose_plane(polygons)
            .unwrap_or_else(|| Plane::from_normal(Vector3::z(), 0.0));
        self.cells.push(Cell {
            plane,
            on_plane: Vec::new(),
            children: [None, None],
        });
        self.cells.len() - 1
    }
}

/// Split `polygons` by `plane`. Coplanar faces stay on the plane when
/// `keep_on_plane` is set, otherwise they go to the side their normal faces.
fn sort<S: Clone + Send + Sync + Debug>(
    plane: &Plane,
    polygons: &[Polygon<S>],
    keep_on_plane: bool,
) -> Sorted<S> {
    let mut sorted = Sorted {
        front: Vec::new(),
        back: Vec::new(),
        on_plane: Vec::new(),
    };
    for polygon in polygons {
        let (facing, opposed, front, back) = plane.split_polygon(polygon);
        sorted.front.extend(front);
        sorted.back.extend(back);
        if keep_on_plane {
            sorted.on_plane.extend(facing.into_iter().chain(opposed));
        } else {
            sorted.front.extend(facing);
            sorted.back.extend(opposed);
        }
    }
    sorted
}

/// Cheapest plane among an even sample of the polygons' own planes.
fn choose_plane<S: Clone>(polygons: &[Polygon<S>]) -> Option<Plane> {
    let stride = (polygons.len() / CANDIDATES).max(1);
    polygons
        .iter()
        .step_by(stride)
        .take(CANDIDATES)
        .map(|candidate| (split_cost(&candidate.plane, polygons), &candidate.plane))
        .min_by_key(|(cost, _)| *cost)
        .map(|(_, plane)| plane.clone())
}

fn split_cost<S: Clone>(plane: &Plane, polygons: &[Polygon<S>]) -> usize {
    let (mut front, mut back, mut spanning) = (0usize, 0usize, 0usize);
    for polygon in polygons {
        match plane.classify_polygon(polygon) {
            COPLANAR => {},
            FRONT => front += 1,
            BACK => back += 1,
            _ => spanning += 1,
        }
    }
    SPLIT_COST * spanning + front.abs_diff(back)
}
