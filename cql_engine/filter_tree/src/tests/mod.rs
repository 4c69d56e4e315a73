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
use geometry::{Coordinate, Geometry};

#[cfg(test)]
mod factory;

fn property(path: &str) -> Expression {
    Expression::Property(PropertyPath::from(path))
}

fn integer(value: i32) -> Expression {
    Expression::Literal(Literal::Number(Number::Integer(value)))
}

fn string(value: &str) -> Expression {
    Expression::Literal(Literal::string(value))
}

fn point(x: f64, y: f64) -> GeometryLiteral {
    GeometryLiteral::new(Geometry::Point(Coordinate::new(x, y)))
}

fn equals(left: Expression, right: Expression) -> Predicate {
    DefaultFilterFactory.compare(ComparisonOp::Eq, left, right)
}
