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

use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

const MIN_LINE_POINTS: usize = 2;
const MIN_RING_POINTS: usize = 4;

#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Coordinate {
        Coordinate { x, y }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct LineString(Vec<Coordinate>);

impl LineString {
    pub fn new(coordinates: Vec<Coordinate>) -> Result<LineString, GeometryError> {
        if coordinates.len() < MIN_LINE_POINTS {
            return Err(GeometryError::too_few_points("LINESTRING", MIN_LINE_POINTS, coordinates.len()));
        }
        Ok(LineString(coordinates))
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn is_closed(&self) -> bool {
        self.0.first() == self.0.last()
    }

    fn validate_ring(&self) -> Result<(), GeometryError> {
        if self.0.len() < MIN_RING_POINTS {
            Err(GeometryError::too_few_points("LINEARRING", MIN_RING_POINTS, self.0.len()))
        } else if !self.is_closed() {
            Err(GeometryError::RingNotClosed)
        } else {
            Ok(())
        }
    }
}

impl Display for LineString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

/// Shell plus zero or more holes. Every ring is closed and has at least four points.
#[derive(Debug, PartialEq, Clone)]
pub struct Polygon {
    shell: LineString,
    holes: Vec<LineString>,
}

impl Polygon {
    pub fn new(shell: LineString, holes: Vec<LineString>) -> Result<Polygon, GeometryError> {
        shell.validate_ring()?;
        for hole in holes.iter() {
            hole.validate_ring()?;
        }
        Ok(Polygon { shell, holes })
    }

    pub fn rectangle(envelope: Envelope) -> Polygon {
        let Envelope {
            min_x,
            max_x,
            min_y,
            max_y,
        } = envelope;
        Polygon {
            shell: LineString(vec![
                Coordinate::new(min_x, min_y),
                Coordinate::new(min_x, max_y),
                Coordinate::new(max_x, max_y),
                Coordinate::new(max_x, min_y),
                Coordinate::new(min_x, min_y),
            ]),
            holes: vec![],
        }
    }

    pub fn shell(&self) -> &LineString {
        &self.shell
    }

    pub fn holes(&self) -> &[LineString] {
        &self.holes
    }
}

impl Display for Polygon {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({})", std::iter::once(&self.shell).chain(self.holes.iter()).join(", "))
    }
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Envelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Envelope {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Envelope {
        Envelope {
            min_x: min_x.min(max_x),
            max_x: max_x.max(min_x),
            min_y: min_y.min(max_y),
            max_y: max_y.max(min_y),
        }
    }

    fn of_coordinates<'c, I: Iterator<Item = &'c Coordinate>>(coordinates: I) -> Option<Envelope> {
        coordinates.fold(None, |envelope, coordinate| {
            Some(match envelope {
                None => Envelope::new(coordinate.x, coordinate.x, coordinate.y, coordinate.y),
                Some(envelope) => {
                    envelope.expand(&Envelope::new(coordinate.x, coordinate.x, coordinate.y, coordinate.y))
                }
            })
        })
    }

    pub fn expand(&self, other: &Envelope) -> Envelope {
        Envelope {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn intersects(&self, other: &Envelope) -> bool {
        self.min_x <= other.max_x && other.min_x <= self.max_x && self.min_y <= other.max_y && other.min_y <= self.max_y
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Geometry {
    Point(Coordinate),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(Vec<Coordinate>),
    MultiLineString(Vec<LineString>),
    MultiPolygon(Vec<Polygon>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "POINT",
            Geometry::LineString(_) => "LINESTRING",
            Geometry::Polygon(_) => "POLYGON",
            Geometry::MultiPoint(_) => "MULTIPOINT",
            Geometry::MultiLineString(_) => "MULTILINESTRING",
            Geometry::MultiPolygon(_) => "MULTIPOLYGON",
            Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        }
    }

    /// `None` only for an empty collection
    pub fn envelope(&self) -> Option<Envelope> {
        match self {
            Geometry::Point(coordinate) => Envelope::of_coordinates(std::iter::once(coordinate)),
            Geometry::LineString(line) => Envelope::of_coordinates(line.coordinates().iter()),
            Geometry::Polygon(polygon) => Envelope::of_coordinates(polygon.shell().coordinates().iter()),
            Geometry::MultiPoint(points) => Envelope::of_coordinates(points.iter()),
            Geometry::MultiLineString(lines) => {
                Envelope::of_coordinates(lines.iter().flat_map(|line| line.coordinates().iter()))
            }
            Geometry::MultiPolygon(polygons) => {
                Envelope::of_coordinates(polygons.iter().flat_map(|polygon| polygon.shell().coordinates().iter()))
            }
            Geometry::GeometryCollection(members) => members
                .iter()
                .filter_map(Geometry::envelope)
                .fold(None, |acc: Option<Envelope>, envelope| match acc {
                    None => Some(envelope),
                    Some(acc) => Some(acc.expand(&envelope)),
                }),
        }
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(coordinate) => write!(f, "POINT({})", coordinate),
            Geometry::LineString(line) => write!(f, "LINESTRING{}", line),
            Geometry::Polygon(polygon) => write!(f, "POLYGON{}", polygon),
            Geometry::MultiPoint(points) => {
                write!(f, "MULTIPOINT({})", points.iter().map(|point| format!("({})", point)).join(", "))
            }
            Geometry::MultiLineString(lines) => write!(f, "MULTILINESTRING({})", lines.iter().join(", ")),
            Geometry::MultiPolygon(polygons) => write!(f, "MULTIPOLYGON({})", polygons.iter().join(", ")),
            Geometry::GeometryCollection(members) => write!(f, "GEOMETRYCOLLECTION({})", members.iter().join(", ")),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum GeometryError {
    TooFewPoints {
        kind: &'static str,
        required: usize,
        found: usize,
    },
    RingNotClosed,
}

impl GeometryError {
    pub fn too_few_points(kind: &'static str, required: usize, found: usize) -> GeometryError {
        GeometryError::TooFewPoints { kind, required, found }
    }
}

impl Display for GeometryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::TooFewPoints { kind, required, found } => write!(
                f,
                "{} requires at least {} points but {} were given",
                kind, required, found
            ),
            GeometryError::RingNotClosed => write!(f, "polygon ring must start and end with the same point"),
        }
    }
}

impl std::error::Error for GeometryError {}

#[cfg(test)]
mod tests;
