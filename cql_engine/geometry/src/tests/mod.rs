// Copyright 2020 - present Alex Dukhno
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::*;

fn line(points: &[(f64, f64)]) -> LineString {
    LineString::new(points.iter().map(|(x, y)| Coordinate::new(*x, *y)).collect()).expect("valid line")
}

#[test]
fn line_string_with_single_point() {
    assert_eq!(
        LineString::new(vec![Coordinate::new(1.0, 2.0)]),
        Err(GeometryError::too_few_points("LINESTRING", 2, 1))
    );
}

#[test]
fn polygon_with_open_ring() {
    let ring = line(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);

    assert_eq!(Polygon::new(ring, vec![]), Err(GeometryError::RingNotClosed));
}

#[test]
fn polygon_with_short_hole() {
    let shell = line(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
    let hole = line(&[(1.0, 1.0), (1.0, 1.0)]);

    assert_eq!(
        Polygon::new(shell, vec![hole]),
        Err(GeometryError::too_few_points("LINEARRING", 4, 2))
    );
}

#[test]
fn rectangle_bounds() {
    let polygon = Geometry::Polygon(Polygon::rectangle(Envelope::new(10.0, 40.0, 10.0, 40.0)));

    assert_eq!(
        polygon.envelope(),
        Some(Envelope {
            min_x: 10.0,
            max_x: 40.0,
            min_y: 10.0,
            max_y: 40.0
        })
    );
}

#[test]
fn envelope_normalizes_swapped_bounds() {
    assert_eq!(Envelope::new(40.0, 10.0, 40.0, 10.0), Envelope::new(10.0, 40.0, 10.0, 40.0));
}

#[test]
fn collection_envelope_covers_members() {
    let collection = Geometry::GeometryCollection(vec![
        Geometry::Point(Coordinate::new(-5.0, 3.0)),
        Geometry::LineString(line(&[(1.0, 1.0), (7.0, 9.0)])),
    ]);

    assert_eq!(collection.envelope(), Some(Envelope::new(-5.0, 7.0, 1.0, 9.0)));
}

#[test]
fn empty_collection_has_no_envelope() {
    assert_eq!(Geometry::GeometryCollection(vec![]).envelope(), None);
}

#[test]
fn envelopes_intersect() {
    let left = Envelope::new(0.0, 10.0, 0.0, 10.0);

    assert!(left.intersects(&Envelope::new(10.0, 20.0, 10.0, 20.0)));
    assert!(!left.intersects(&Envelope::new(10.5, 20.0, 0.0, 10.0)));
}

#[rstest::rstest(
    geometry,
    expected,
    case::point(Geometry::Point(Coordinate::new(1.0, 2.5)), "POINT(1 2.5)"),
    case::line(Geometry::LineString(line(&[(1.0, 2.0), (3.0, 4.0)])), "LINESTRING(1 2, 3 4)"),
    case::polygon(
        Geometry::Polygon(Polygon::rectangle(Envelope::new(0.0, 1.0, 0.0, 1.0))),
        "POLYGON((0 0, 0 1, 1 1, 1 0, 0 0))"
    ),
    case::multi_point(
        Geometry::MultiPoint(vec![Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)]),
        "MULTIPOINT((1 2), (3 4))"
    ),
    case::collection(
        Geometry::GeometryCollection(vec![Geometry::Point(Coordinate::new(1.0, 2.0))]),
        "GEOMETRYCOLLECTION(POINT(1 2))"
    )
)]
fn well_known_text(geometry: Geometry, expected: &str) {
    assert_eq!(geometry.to_string(), expected);
}
