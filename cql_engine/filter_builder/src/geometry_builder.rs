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

use crate::{
    error::BuildError,
    origin,
    production::{GeometryRole, Production},
    stack::{Node, ResultsStack, StackDefect},
};
use diagnostics::{CompileError, SourceToken};
use geometry::{Coordinate, Geometry, GeometryError, LineString, Polygon};

/// Assembles geometry values out of the coordinates and member geometries on the stack
pub(crate) struct GeometryBuilder<'b> {
    stack: &'b mut ResultsStack,
    statement: &'b str,
}

impl<'b> GeometryBuilder<'b> {
    pub(crate) fn new(stack: &'b mut ResultsStack, statement: &'b str) -> GeometryBuilder<'b> {
        GeometryBuilder { stack, statement }
    }

    pub(crate) fn reduce(mut self, production: Production, tokens: &[SourceToken]) -> Result<(), BuildError> {
        let token = origin(production, tokens)?;
        let geometry = match production {
            Production::Coordinate => {
                let y = self.stack.pop_number()?.as_f64();
                let x = self.stack.pop_number()?.as_f64();
                self.stack.push(production, Node::Coordinate(Coordinate::new(x, y)), token);
                return Ok(());
            }
            Production::PointText(_) => Geometry::Point(self.stack.pop_coordinate()?),
            Production::LineStringText(_) => Geometry::LineString(self.line_string(&token)?),
            Production::PolygonText(_) => Geometry::Polygon(self.polygon(&token)?),
            Production::MultiPointText(_) => {
                let points = self.members(GeometryRole::MultiPointMember, |geometry| match geometry {
                    Geometry::Point(coordinate) => Some(coordinate),
                    _ => None,
                })?;
                Geometry::MultiPoint(self.non_empty(points, production)?)
            }
            Production::MultiLineStringText(_) => {
                let lines = self.members(GeometryRole::MultiLineStringMember, |geometry| match geometry {
                    Geometry::LineString(line) => Some(line),
                    _ => None,
                })?;
                Geometry::MultiLineString(self.non_empty(lines, production)?)
            }
            Production::MultiPolygonText(_) => {
                let polygons = self.members(GeometryRole::MultiPolygonMember, |geometry| match geometry {
                    Geometry::Polygon(polygon) => Some(polygon),
                    _ => None,
                })?;
                Geometry::MultiPolygon(self.non_empty(polygons, production)?)
            }
            Production::GeometryCollectionStart => {
                self.stack.push(production, Node::RawToken(token.text().to_owned()), token);
                return Ok(());
            }
            Production::GeometryCollectionText(_) => {
                let members = self.members(GeometryRole::CollectionMember, Some)?;
                self.stack.pop_raw(Production::GeometryCollectionStart)?;
                Geometry::GeometryCollection(members)
            }
            other => return Err(StackDefect::UnsupportedProduction(other).into()),
        };
        log::debug!("built {} at {}", geometry.geometry_type(), token);
        self.stack.push(production, Node::Geometry(geometry), token);
        Ok(())
    }

    fn line_string(&mut self, token: &SourceToken) -> Result<LineString, BuildError> {
        let coordinates = self.stack.drain_run(
            |production| production == Production::Coordinate,
            |node| match node {
                Node::Coordinate(coordinate) => Some(coordinate),
                _ => None,
            },
        )?;
        LineString::new(coordinates).map_err(|error| self.degenerate(error, token))
    }

    fn polygon(&mut self, token: &SourceToken) -> Result<Polygon, BuildError> {
        let mut rings = self
            .stack
            .drain_run(
                |production| production == Production::LineStringText(GeometryRole::Ring),
                |node| match node {
                    Node::Geometry(Geometry::LineString(line)) => Some(line),
                    _ => None,
                },
            )?
            .into_iter();
        let shell = match rings.next() {
            Some(shell) => shell,
            None => return Err(StackDefect::EmptyRun(Production::PolygonText(GeometryRole::Root)).into()),
        };
        Polygon::new(shell, rings.collect()).map_err(|error| self.degenerate(error, token))
    }

    fn members<T, E>(&mut self, role: GeometryRole, extract: E) -> Result<Vec<T>, StackDefect>
    where
        E: Fn(Geometry) -> Option<T>,
    {
        self.stack.drain_run(
            |production| production.role() == Some(role),
            |node| match node {
                Node::Geometry(geometry) => extract(geometry),
                _ => None,
            },
        )
    }

    fn non_empty<T>(&self, members: Vec<T>, production: Production) -> Result<Vec<T>, StackDefect> {
        if members.is_empty() {
            Err(StackDefect::EmptyRun(production))
        } else {
            Ok(members)
        }
    }

    fn degenerate(&self, error: GeometryError, token: &SourceToken) -> BuildError {
        CompileError::degenerate_geometry(error, token.clone(), self.statement).into()
    }
}
