//! 2D Shapes as `Sketch`s

use crate::float_types::{Real, TAU};
use crate::sketch::Sketch;
use geo::{LineString, MultiPolygon, Polygon as GeoPolygon, line_string};
use std::fmt::Debug;

impl<S: Clone + Debug + Send + Sync> Sketch<S> {
    /// Creates a 2D rectangle in the XY plane spanning (0, 0) to (width, length).
    ///
    /// # Example
    /// ```
    /// # use pontoon::sketch::Sketch;
    /// let sq2 = Sketch::<()>::rectangle(2.0, 3.0, None);
    /// assert_eq!(sq2.area(), 6.0);
    /// ```
    pub fn rectangle(width: Real, length: Real, metadata: Option<S>) -> Self {
        let outer = line_string![
            (x: 0.0,     y: 0.0),
            (x: width,   y: 0.0),
            (x: width,   y: length),
            (x: 0.0,     y: length),
            (x: 0.0,     y: 0.0),  // close explicitly
        ];
        Sketch::from_geo(MultiPolygon(vec![GeoPolygon::new(outer, vec![])]), metadata)
    }

    pub fn square(width: Real, metadata: Option<S>) -> Self {
        Self::rectangle(width, width, metadata)
    }

    /// Regular `segments`-gon approximating a circle centred on the origin.
    /// Fewer than 3 segments gives an empty sketch.
    pub fn circle(radius: Real, segments: usize, metadata: Option<S>) -> Self {
        if segments < 3 {
            return Sketch::new();
        }
        let coords: Vec<(Real, Real)> = (0..segments)
            .map(|i| {
                let theta = TAU * (i as Real) / (segments as Real);
                (radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        Sketch::from_geo(
            MultiPolygon(vec![GeoPolygon::new(closed_ring(&coords), vec![])]),
            metadata,
        )
    }

    /// Simple polygon from its outline, in either winding.
    pub fn polygon(points: &[[Real; 2]], metadata: Option<S>) -> Self {
        Self::polygon_with_holes(points, &[], metadata)
    }

    /// Polygon with holes. Outlines with fewer than 3 points are ignored.
    pub fn polygon_with_holes(
        outer: &[[Real; 2]],
        holes: &[&[[Real; 2]]],
        metadata: Option<S>,
    ) -> Self {
        if outer.len() < 3 {
            return Sketch::new();
        }
        let to_ring =
            |points: &[[Real; 2]]| closed_ring(&points.iter().map(|&[x, y]| (x, y)).collect::<Vec<_>>());

        let interiors = holes
            .iter()
            .filter(|hole| hole.len() >= 3)
            .map(|hole| to_ring(*hole))
            .collect();
        let polygon = GeoPolygon::new(to_ring(outer), interiors);
        Sketch::from_geo(MultiPolygon(vec![polygon]), metadata)
    }
}

fn closed_ring(coords: &[(Real, Real)]) -> LineString<Real> {
    let mut ring: Vec<(Real, Real)> = coords.to_vec();
    if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
        if first != last {
            ring.push(*first);
        }
    }
    LineString::from(ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_area_approaches_pi() {
        let circle: Sketch<()> = Sketch::circle(1.0, 256, None);
        assert!((circle.area() - crate::float_types::PI).abs() < 1e-3);
        assert!(Sketch::<()>::circle(1.0, 2, None).is_empty());
    }

    #[test]
    fn rectangle_bounds() {
        let rect: Sketch<()> = Sketch::rectangle(2.0, 5.0, None).translate(-1.0, 0.5);
        let bounds = rect.bounding_rect().expect("non-empty");
        assert_eq!(bounds.min().x, -1.0);
        assert_eq!(bounds.max().y, 5.5);
    }
}
