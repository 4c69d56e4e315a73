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
    geometry_builder::GeometryBuilder,
    origin,
    production::Production,
    stack::{BuildResult, Node, ResultsStack, StackDefect},
    Reducer,
};
use crs::{Crs, CrsResolver};
use diagnostics::{CompileError, SourceToken};
use filter_tree::{
    ComparisonOp, DistanceOperator, DistanceUnits, Expression, FilterFactory, GeometryLiteral, Literal, Number,
    Predicate, SpatialOperator,
};
use geometry::{Envelope, Geometry, Polygon};
use itertools::Itertools;

const ENVELOPE_COMPONENTS: usize = 4;
const DE9IM_LENGTH: usize = 9;
const DE9IM_ALPHABET: &[char] = &['T', 'F', '*', '0', '1', '2'];
const RELATE: &str = "relate";
const RELATE_PATTERN: &str = "relatePattern";

/// Builds the filter tree of the base dialect, one production at a time
pub struct FilterBuilder<'c> {
    statement: &'c str,
    stack: ResultsStack,
    factory: &'c dyn FilterFactory,
    resolver: &'c dyn CrsResolver,
}

impl<'c> FilterBuilder<'c> {
    pub fn new(statement: &'c str, factory: &'c dyn FilterFactory, resolver: &'c dyn CrsResolver) -> FilterBuilder<'c> {
        FilterBuilder {
            statement,
            stack: ResultsStack::default(),
            factory,
            resolver,
        }
    }

    pub fn stack(&self) -> &ResultsStack {
        &self.stack
    }

    pub(crate) fn spatial(
        &mut self,
        op: SpatialOperator,
        right: Expression,
        token: SourceToken,
    ) -> Result<(), BuildError> {
        let left = self.stack.pop_expression()?;
        let predicate = self.factory.spatial(op, left, right);
        self.stack.push(Production::Spatial(op), Node::Predicate(predicate), token);
        Ok(())
    }

    pub(crate) fn pop_expression(&mut self) -> Result<Expression, StackDefect> {
        self.stack.pop_expression()
    }

    pub(crate) fn geometry_with_srid(&mut self, tokens: &[SourceToken]) -> Result<(), BuildError> {
        let production = Production::GeometryLiteralWithSrid;
        let token = origin(production, tokens)?;
        let srid_token = tokens.get(1).cloned().ok_or(StackDefect::MissingToken(production))?;
        let srid = match srid_token.text().trim().parse::<i32>() {
            Ok(srid) => srid,
            Err(_) => return Err(CompileError::invalid_srid(srid_token, self.statement).into()),
        };
        let literal = self.pop_geometry_literal()?;
        let literal = self.attach_crs(literal, srid, srid_token)?;
        self.stack.push(production, Node::Literal(Literal::Geometry(literal)), token);
        Ok(())
    }

    /// `ENVELOPE(minx, maxx, maxy, miny [, srs])` built from the numbers among its tokens
    pub(crate) fn envelope(&mut self, tokens: &[SourceToken]) -> Result<(), BuildError> {
        let production = Production::Envelope;
        let token = origin(production, tokens)?;
        if tokens.len() <= ENVELOPE_COMPONENTS {
            return Err(StackDefect::MissingToken(production).into());
        }
        let mut bounds = [0.0; ENVELOPE_COMPONENTS];
        for (bound, component) in bounds.iter_mut().zip(&tokens[1..=ENVELOPE_COMPONENTS]) {
            *bound = match component.text().parse::<f64>() {
                Ok(value) => value,
                Err(_) => return Err(CompileError::invalid_number(component.clone(), self.statement).into()),
            };
        }
        let [min_x, max_x, max_y, min_y] = bounds;
        let rectangle = Geometry::Polygon(Polygon::rectangle(Envelope::new(min_x, max_x, min_y, max_y)));
        let literal = match tokens.get(ENVELOPE_COMPONENTS + 1) {
            Some(srs) => self.resolve_code(GeometryLiteral::new(rectangle), srs.clone())?,
            None => GeometryLiteral::new(rectangle),
        };
        self.stack.push(production, Node::Literal(Literal::Geometry(literal)), token);
        Ok(())
    }

    fn push(&mut self, production: Production, node: Node, token: SourceToken) -> Result<(), BuildError> {
        self.stack.push(production, node, token);
        Ok(())
    }

    fn push_predicate(
        &mut self,
        production: Production,
        predicate: Predicate,
        token: SourceToken,
    ) -> Result<(), BuildError> {
        self.push(production, Node::Predicate(predicate), token)
    }

    fn push_expression(
        &mut self,
        production: Production,
        expression: Expression,
        token: SourceToken,
    ) -> Result<(), BuildError> {
        self.push(production, Node::Expression(expression), token)
    }

    fn number(&self, token: &SourceToken, parse: fn(&str) -> Option<Number>) -> Result<Number, BuildError> {
        match parse(token.text()) {
            Some(number) => Ok(number),
            None => Err(CompileError::invalid_number(token.clone(), self.statement).into()),
        }
    }

    /// Negates the number on top of the stack in place, keeping its tag and numeric kind
    fn negate(&mut self, token: SourceToken) -> Result<(), BuildError> {
        let top = self.stack.pop()?;
        let number = match &top.node {
            Node::Number(number) | Node::Literal(Literal::Number(number)) => *number,
            _ => return Err(StackDefect::mismatch("number", top.production).into()),
        };
        let negated = match number.negate() {
            Some(negated) => negated,
            None => {
                let text = format!("-{}", top.token.text());
                let position = SourceToken::new(text, token.line(), token.column());
                return Err(CompileError::invalid_number(position, self.statement).into());
            }
        };
        let node = match top.node {
            Node::Number(_) => Node::Number(negated),
            _ => Node::Literal(Literal::Number(negated)),
        };
        self.push(top.production, node, token)
    }

    fn function(&mut self, token: SourceToken) -> Result<(), BuildError> {
        let args = self
            .stack
            .drain_run(|production| production == Production::FunctionArgument, expression_of)?;
        let name = self.stack.pop_raw(Production::FunctionName)?;
        let function = self.factory.function(name, args);
        self.push_expression(Production::Function, function, token)
    }

    fn feature_ids(&mut self, token: SourceToken) -> Result<(), BuildError> {
        let ids = self.stack.drain_run(
            |production| production == Production::FeatureId,
            |node| match node {
                Node::RawToken(id) => Some(id),
                _ => None,
            },
        )?;
        if ids.is_empty() {
            return Err(StackDefect::EmptyRun(Production::FeatureIdPredicate).into());
        }
        log::debug!("feature ids {:?}", ids);
        let predicate = self.factory.feature_ids(ids);
        self.push_predicate(Production::FeatureIdPredicate, predicate, token)
    }

    /// `x IN (a, b)` is `x = a OR x = b`
    fn in_list(&mut self, production: Production, token: SourceToken) -> Result<(), BuildError> {
        let candidates = self
            .stack
            .drain_run(|production| production == Production::InListMember, expression_of)?;
        if candidates.is_empty() {
            return Err(StackDefect::EmptyRun(production).into());
        }
        let left = self.stack.pop_expression()?;
        let factory = self.factory;
        let equalities = candidates
            .into_iter()
            .map(|candidate| factory.compare(ComparisonOp::Eq, left.clone(), candidate))
            .collect();
        let disjunction = self.factory.or_all(equalities);
        let predicate = if production == Production::NotInPredicate {
            self.factory.not(disjunction)
        } else {
            disjunction
        };
        self.push_predicate(production, predicate, token)
    }

    fn like(&mut self, production: Production, token: SourceToken) -> Result<(), BuildError> {
        let pattern = self.stack.pop()?;
        let pattern = match pattern.node {
            Node::Literal(Literal::String(pattern)) => pattern,
            _ => return Err(StackDefect::mismatch("pattern string", pattern.production).into()),
        };
        let expression = self.stack.pop_expression()?;
        let case_insensitive = production == Production::ILike || production == Production::NotILike;
        let like = self.factory.like(expression, pattern, case_insensitive);
        let predicate = if production == Production::NotLike || production == Production::NotILike {
            self.factory.not(like)
        } else {
            like
        };
        self.push_predicate(production, predicate, token)
    }

    fn between(&mut self, production: Production, token: SourceToken) -> Result<(), BuildError> {
        let upper = self.stack.pop_expression()?;
        let lower = self.stack.pop_expression()?;
        let expression = self.stack.pop_expression()?;
        let between = self.factory.between(expression, lower, upper);
        let predicate = if production == Production::NotBetween {
            self.factory.not(between)
        } else {
            between
        };
        self.push_predicate(production, predicate, token)
    }

    /// `BBOX(expr, minx, miny, maxx, maxy [, srs])`; tokens are the keyword and the optional srs
    fn bbox(&mut self, tokens: &[SourceToken]) -> Result<(), BuildError> {
        let token = origin(Production::BBox, tokens)?;
        let max_y = self.stack.pop_number()?.as_f64();
        let max_x = self.stack.pop_number()?.as_f64();
        let min_y = self.stack.pop_number()?.as_f64();
        let min_x = self.stack.pop_number()?.as_f64();
        let rectangle = Geometry::Polygon(Polygon::rectangle(Envelope::new(min_x, max_x, min_y, max_y)));
        let literal = match tokens.get(1) {
            Some(srs) => self.resolve_code(GeometryLiteral::new(rectangle), srs.clone())?,
            None => GeometryLiteral::new(rectangle),
        };
        let expression = self.stack.pop_expression()?;
        let predicate = self.factory.spatial(
            SpatialOperator::BBox,
            expression,
            self.factory.literal(Literal::Geometry(literal)),
        );
        self.push_predicate(Production::BBox, predicate, token)
    }

    /// `DWITHIN(expr, geometry, distance, units)`; tokens are the keyword then the units words
    fn distance(&mut self, op: DistanceOperator, tokens: &[SourceToken]) -> Result<(), BuildError> {
        let production = Production::Distance(op);
        let token = origin(production, tokens)?;
        let units_token = tokens.get(1).cloned().ok_or(StackDefect::MissingToken(production))?;
        let units_text = tokens[1..].iter().map(SourceToken::text).join(" ");
        let units = match DistanceUnits::parse(&units_text) {
            Some(units) => units,
            None => return Err(CompileError::invalid_distance_units(units_text, units_token, self.statement).into()),
        };
        let distance = self.stack.pop_number()?.as_f64();
        let right = self.stack.pop_expression()?;
        let left = self.stack.pop_expression()?;
        let predicate = self.factory.distance(op, left, right, distance, units);
        self.push_predicate(production, predicate, token)
    }

    /// Relate is kept as `relate(...) = TRUE` so downstream sees a plain comparison
    fn relate(&mut self, production: Production, token: SourceToken) -> Result<(), BuildError> {
        let (name, pattern) = if production == Production::RelatePattern {
            (RELATE_PATTERN, Some(self.stack.pop_raw(Production::De9imPattern)?))
        } else {
            (RELATE, None)
        };
        let geometry = self.stack.pop_expression()?;
        let expression = self.stack.pop_expression()?;
        let mut args = vec![expression, geometry];
        if let Some(pattern) = pattern {
            args.push(self.factory.literal(Literal::String(pattern)));
        }
        let function = self.factory.function(name.to_owned(), args);
        let predicate = self.factory.compare(
            ComparisonOp::Eq,
            function,
            self.factory.literal(Literal::Boolean(true)),
        );
        self.push_predicate(production, predicate, token)
    }

    fn de9im_pattern(&mut self) -> Result<(), BuildError> {
        let literal = self.stack.pop()?;
        let pattern = match literal.node {
            Node::Literal(Literal::String(pattern)) => pattern,
            _ => return Err(StackDefect::mismatch("pattern string", literal.production).into()),
        };
        let valid = pattern.chars().count() == DE9IM_LENGTH
            && pattern
                .chars()
                .all(|c| DE9IM_ALPHABET.contains(&c.to_ascii_uppercase()));
        if !valid {
            return Err(CompileError::invalid_de9im_pattern(pattern, literal.token, self.statement).into());
        }
        self.push(Production::De9imPattern, Node::RawToken(pattern), literal.token)
    }

    fn pop_geometry_literal(&mut self) -> Result<GeometryLiteral, StackDefect> {
        let result = self.stack.pop()?;
        match result.node {
            Node::Literal(Literal::Geometry(literal)) => Ok(literal),
            _ => Err(StackDefect::mismatch("geometry literal", result.production)),
        }
    }

    /// Base dialect `SRID=n;` prefix: the SRID was reduced before the geometry it qualifies
    fn srid_geometry(&mut self, token: SourceToken) -> Result<(), BuildError> {
        let literal = self.pop_geometry_literal()?;
        let srid = self.stack.pop()?;
        let value = match (srid.production, &srid.node) {
            (Production::Srid, Node::Number(Number::Integer(value))) => *value,
            (Production::Srid, Node::Number(_)) => {
                return Err(CompileError::invalid_srid(srid.token, self.statement).into());
            }
            _ => return Err(StackDefect::mismatch("SRID", srid.production).into()),
        };
        let literal = self.attach_crs(literal, value, srid.token)?;
        self.push(Production::SridGeometryLiteral, Node::Literal(Literal::Geometry(literal)), token)
    }

    fn resolve_code(&self, literal: GeometryLiteral, srs: SourceToken) -> Result<GeometryLiteral, BuildError> {
        match Crs::parse_code(srs.text()) {
            Some(srid) => self.attach_crs(literal, srid, srs),
            None => Err(CompileError::invalid_srid(srs, self.statement).into()),
        }
    }

    fn attach_crs(
        &self,
        literal: GeometryLiteral,
        srid: i32,
        token: SourceToken,
    ) -> Result<GeometryLiteral, BuildError> {
        match self.resolver.resolve(srid) {
            Ok(crs) => {
                log::debug!("attaching {} to {}", crs.code(), literal);
                Ok(literal.with_crs(crs))
            }
            Err(error) => Err(CompileError::unresolved_srid(srid, token, self.statement)
                .with_cause(error)
                .into()),
        }
    }
}

impl<'c> Reducer for FilterBuilder<'c> {
    fn reduce(&mut self, production: Production, tokens: &[SourceToken]) -> Result<(), BuildError> {
        let token = origin(production, tokens)?;
        log::debug!("reducing {:?} at {}", production, token);
        match production {
            Production::PropertyName => {
                let segments = tokens.iter().map(|segment| segment.text().to_owned()).collect();
                let property = self.factory.property(segments);
                self.push_expression(production, property, token)
            }
            Production::IntegerLiteral | Production::FloatingLiteral => {
                let parse = if production == Production::IntegerLiteral {
                    Number::parse_integral
                } else {
                    Number::parse_floating
                };
                let number = self.number(&token, parse)?;
                self.push(production, Node::Literal(Literal::Number(number)), token)
            }
            Production::StringLiteral => {
                let value = Literal::string(token.text());
                self.push(production, Node::Literal(value), token)
            }
            Production::BooleanLiteral => {
                let value = Literal::Boolean(token.text().eq_ignore_ascii_case("true"));
                self.push(production, Node::Literal(value), token)
            }
            Production::NegativeNumber => self.negate(token),
            Production::FunctionName => {
                let name = token.text().to_owned();
                self.push(production, Node::RawToken(name), token)
            }
            Production::FunctionArgument | Production::InListMember => Ok(self.stack.retag(production)?),
            Production::Function => self.function(token),
            Production::Arithmetic(op) => {
                let right = self.stack.pop_expression()?;
                let left = self.stack.pop_expression()?;
                let arithmetic = self.factory.arithmetic(op, left, right);
                self.push_expression(production, arithmetic, token)
            }
            Production::Comparison(op) => {
                let right = self.stack.pop_expression()?;
                let left = self.stack.pop_expression()?;
                let comparison = self.factory.compare(op, left, right);
                self.push_predicate(production, comparison, token)
            }
            Production::And | Production::Or => {
                let right = self.stack.pop_predicate()?;
                let left = self.stack.pop_predicate()?;
                let predicate = if production == Production::And {
                    self.factory.and(left, right)
                } else {
                    self.factory.or(left, right)
                };
                self.push_predicate(production, predicate, token)
            }
            Production::Not => {
                let predicate = self.stack.pop_predicate()?;
                let negation = self.factory.not(predicate);
                self.push_predicate(production, negation, token)
            }
            Production::Include => {
                let include = self.factory.include();
                self.push_predicate(production, include, token)
            }
            Production::Exclude => {
                let exclude = self.factory.exclude();
                self.push_predicate(production, exclude, token)
            }
            Production::FeatureId => {
                let id = token.text().to_owned();
                self.push(production, Node::RawToken(id), token)
            }
            Production::FeatureIdPredicate => self.feature_ids(token),
            Production::InPredicate | Production::NotInPredicate => self.in_list(production, token),
            Production::IsNull | Production::IsNotNull => {
                let expression = self.stack.pop_expression()?;
                let is_null = self.factory.is_null(expression);
                let predicate = if production == Production::IsNotNull {
                    self.factory.not(is_null)
                } else {
                    is_null
                };
                self.push_predicate(production, predicate, token)
            }
            Production::Like | Production::NotLike | Production::ILike | Production::NotILike => {
                self.like(production, token)
            }
            Production::Between | Production::NotBetween => self.between(production, token),
            Production::Spatial(op) => {
                let geometry = self.pop_geometry_literal()?;
                let right = self.factory.literal(Literal::Geometry(geometry));
                self.spatial(op, right, token)
            }
            Production::BBox => self.bbox(tokens),
            Production::Distance(op) => self.distance(op, tokens),
            Production::Relate | Production::RelatePattern => self.relate(production, token),
            Production::De9imPattern => self.de9im_pattern(),
            Production::Ordinate | Production::Srid | Production::EnvelopeComponent => {
                let number = self.number(&token, Number::parse_integral)?;
                self.push(production, Node::Number(number), token)
            }
            Production::Coordinate
            | Production::PointText(_)
            | Production::LineStringText(_)
            | Production::PolygonText(_)
            | Production::MultiPointText(_)
            | Production::MultiLineStringText(_)
            | Production::MultiPolygonText(_)
            | Production::GeometryCollectionStart
            | Production::GeometryCollectionText(_) => {
                GeometryBuilder::new(&mut self.stack, self.statement).reduce(production, tokens)
            }
            Production::GeometryLiteral => {
                let geometry = self.stack.pop_geometry()?;
                let literal = Literal::Geometry(GeometryLiteral::new(geometry));
                self.push(production, Node::Literal(literal), token)
            }
            Production::SridGeometryLiteral => self.srid_geometry(token),
            Production::Envelope => {
                self.stack.discard(ENVELOPE_COMPONENTS, Production::EnvelopeComponent)?;
                self.envelope(tokens)
            }
            Production::GeometryLiteralWithSrid => Err(StackDefect::UnsupportedProduction(production).into()),
        }
    }

    fn finish(self) -> Result<BuildResult, BuildError> {
        let root = self.stack.into_root()?;
        log::debug!("compiled {:?} from \"{}\"", root.production, self.statement);
        Ok(root)
    }
}

fn expression_of(node: Node) -> Option<Expression> {
    match node {
        Node::Expression(expression) => Some(expression),
        Node::Literal(literal) => Some(Expression::Literal(literal)),
        _ => None,
    }
}
