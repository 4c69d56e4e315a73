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
use crs::{Crs, EpsgRegistry};
use diagnostics::CompileErrorKind;
use filter_tree::{
    ComparisonOp, DefaultFilterFactory, Expression, FeatureIdSet, FilterFactory, GeometryLiteral, Literal, Number,
    Predicate, PropertyPath, SpatialOperator,
};
use geometry::{Coordinate, Geometry};


const STATEMENT: &str = "statement under test";

fn token(text: &str) -> SourceToken {
    SourceToken::new(text, 1, 1)
}

fn reduce<R: Reducer>(reducer: &mut R, production: Production, texts: &[&str]) -> Result<(), BuildError> {
    let tokens = texts.iter().map(|text| token(text)).collect::<Vec<_>>();
    reducer.reduce(production, &tokens)
}

fn property<R: Reducer>(reducer: &mut R, name: &str) {
    reduce(reducer, Production::PropertyName, &[name]).unwrap();
}

fn integer<R: Reducer>(reducer: &mut R, value: &str) {
    reduce(reducer, Production::IntegerLiteral, &[value]).unwrap();
}

fn string<R: Reducer>(reducer: &mut R, value: &str) {
    reduce(reducer, Production::StringLiteral, &[value]).unwrap();
}

fn coordinate<R: Reducer>(reducer: &mut R, x: &str, y: &str) {
    reduce(reducer, Production::Ordinate, &[x]).unwrap();
    reduce(reducer, Production::Ordinate, &[y]).unwrap();
    reduce(reducer, Production::Coordinate, &[x]).unwrap();
}

fn point<R: Reducer>(reducer: &mut R, role: GeometryRole, x: &str, y: &str) {
    coordinate(reducer, x, y);
    reduce(reducer, Production::PointText(role), &["POINT"]).unwrap();
}

fn point_literal<R: Reducer>(reducer: &mut R, x: &str, y: &str) {
    point(reducer, GeometryRole::Root, x, y);
    reduce(reducer, Production::GeometryLiteral, &["POINT"]).unwrap();
}

fn finish_predicate<R: Reducer>(reducer: R) -> Predicate {
    reducer.finish().unwrap().into_predicate().unwrap()
}

fn attribute(name: &str) -> Expression {
    Expression::Property(PropertyPath::from(name))
}

fn number(value: i32) -> Expression {
    Expression::Literal(Literal::Number(Number::Integer(value)))
}

fn equals(left: Expression, right: Expression) -> Predicate {
    DefaultFilterFactory.compare(ComparisonOp::Eq, left, right)
}

fn compile_error(error: BuildError) -> CompileErrorKind {
    match error {
        BuildError::Compile(error) => error.kind().clone(),
        BuildError::Defect(defect) => panic!("expected compile error but got {:?}", defect),
    }
}
