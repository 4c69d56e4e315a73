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
    expression::{ArithmeticOp, Expression, PropertyPath},
    literal::Literal,
    predicate::{ComparisonOp, DistanceOperator, DistanceUnits, FeatureIdSet, Predicate, SpatialOperator},
};

/// Constructs filter tree nodes on behalf of the builders.
///
/// Every method has a default producing the plain tree; implementors override only what they
/// need to intercept (e.g. to simplify, count or reject some node kinds).
pub trait FilterFactory {
    fn include(&self) -> Predicate {
        Predicate::Include
    }

    fn exclude(&self) -> Predicate {
        Predicate::Exclude
    }

    fn and(&self, left: Predicate, right: Predicate) -> Predicate {
        let mut children = vec![];
        for child in vec![left, right] {
            match child {
                Predicate::And(nested) => children.extend(nested),
                other => children.push(other),
            }
        }
        Predicate::And(children)
    }

    fn or(&self, left: Predicate, right: Predicate) -> Predicate {
        self.or_all(vec![left, right])
    }

    fn or_all(&self, predicates: Vec<Predicate>) -> Predicate {
        let mut children = vec![];
        for child in predicates {
            match child {
                Predicate::Or(nested) => children.extend(nested),
                other => children.push(other),
            }
        }
        if children.len() == 1 {
            children.remove(0)
        } else {
            Predicate::Or(children)
        }
    }

    fn not(&self, predicate: Predicate) -> Predicate {
        Predicate::Not(Box::new(predicate))
    }

    fn compare(&self, op: ComparisonOp, left: Expression, right: Expression) -> Predicate {
        Predicate::Comparison { op, left, right }
    }

    fn spatial(&self, op: SpatialOperator, left: Expression, right: Expression) -> Predicate {
        Predicate::Spatial { op, left, right }
    }

    fn distance(
        &self,
        op: DistanceOperator,
        left: Expression,
        right: Expression,
        distance: f64,
        units: DistanceUnits,
    ) -> Predicate {
        Predicate::Distance {
            op,
            left,
            right,
            distance,
            units,
        }
    }

    fn feature_ids(&self, ids: Vec<String>) -> Predicate {
        Predicate::FeatureIds(FeatureIdSet::new(ids))
    }

    fn is_null(&self, expression: Expression) -> Predicate {
        Predicate::IsNull(expression)
    }

    fn like(&self, expression: Expression, pattern: String, case_insensitive: bool) -> Predicate {
        Predicate::Like {
            expression,
            pattern,
            case_insensitive,
        }
    }

    fn between(&self, expression: Expression, lower: Expression, upper: Expression) -> Predicate {
        Predicate::Between {
            expression,
            lower,
            upper,
        }
    }

    fn property(&self, segments: Vec<String>) -> Expression {
        Expression::Property(PropertyPath::new(segments))
    }

    fn literal(&self, literal: Literal) -> Expression {
        Expression::Literal(literal)
    }

    fn function(&self, name: String, args: Vec<Expression>) -> Expression {
        Expression::Function { name, args }
    }

    fn arithmetic(&self, op: ArithmeticOp, left: Expression, right: Expression) -> Expression {
        Expression::Arithmetic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct DefaultFilterFactory;

impl FilterFactory for DefaultFilterFactory {}
