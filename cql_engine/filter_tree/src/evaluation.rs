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
    literal::{Literal, Number},
    predicate::{ComparisonOp, Predicate, SpatialOperator},
};
use regex::Regex;
use std::{
    cmp::Ordering,
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// Something a compiled filter can be tested against
pub trait Feature {
    fn id(&self) -> &str;

    fn property(&self, path: &PropertyPath) -> Option<Literal>;
}

#[derive(Debug, PartialEq, Clone)]
pub struct SimpleFeature {
    id: String,
    properties: HashMap<String, Literal>,
}

impl SimpleFeature {
    pub fn new<I: ToString>(id: I) -> SimpleFeature {
        SimpleFeature {
            id: id.to_string(),
            properties: HashMap::new(),
        }
    }

    pub fn with<N: ToString>(mut self, name: N, value: Literal) -> SimpleFeature {
        self.properties.insert(name.to_string(), value);
        self
    }
}

impl Feature for SimpleFeature {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn property(&self, path: &PropertyPath) -> Option<Literal> {
        self.properties.get(&path.to_string()).cloned()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum EvaluationError {
    Unsupported(String),
    InvalidPattern(String),
}

impl EvaluationError {
    fn unsupported<D: ToString>(what: D) -> EvaluationError {
        let what = what.to_string();
        log::debug!("evaluation of {} is not supported", what);
        EvaluationError::Unsupported(what)
    }
}

impl Display for EvaluationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationError::Unsupported(what) => write!(f, "evaluation of {} is not supported", what),
            EvaluationError::InvalidPattern(pattern) => write!(f, "pattern '{}' could not be compiled", pattern),
        }
    }
}

impl std::error::Error for EvaluationError {}

impl Predicate {
    /// Tests the feature; a missing operand makes any value test false
    pub fn evaluate(&self, feature: &dyn Feature) -> Result<bool, EvaluationError> {
        match self {
            Predicate::Include => Ok(true),
            Predicate::Exclude => Ok(false),
            Predicate::And(children) => {
                for child in children {
                    if !child.evaluate(feature)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Or(children) => {
                for child in children {
                    if child.evaluate(feature)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Predicate::Not(child) => child.evaluate(feature).map(|value| !value),
            Predicate::Comparison { op, left, right } => {
                let (left, right) = match (left.evaluate(feature)?, right.evaluate(feature)?) {
                    (Some(left), Some(right)) => (left, right),
                    _ => return Ok(false),
                };
                Ok(match left.compare(&right) {
                    Some(ordering) => holds(*op, ordering),
                    None => *op == ComparisonOp::NotEq,
                })
            }
            Predicate::Between {
                expression,
                lower,
                upper,
            } => {
                let value = match expression.evaluate(feature)? {
                    Some(value) => value,
                    None => return Ok(false),
                };
                let lower = match lower.evaluate(feature)? {
                    Some(lower) => lower,
                    None => return Ok(false),
                };
                let upper = match upper.evaluate(feature)? {
                    Some(upper) => upper,
                    None => return Ok(false),
                };
                Ok(
                    matches!(value.compare(&lower), Some(Ordering::Greater) | Some(Ordering::Equal))
                        && matches!(value.compare(&upper), Some(Ordering::Less) | Some(Ordering::Equal)),
                )
            }
            Predicate::IsNull(expression) => Ok(expression.evaluate(feature)?.is_none()),
            Predicate::Like {
                expression,
                pattern,
                case_insensitive,
            } => {
                let value = match expression.evaluate(feature)? {
                    Some(Literal::String(value)) => value,
                    Some(other) => other.to_string(),
                    None => return Ok(false),
                };
                Ok(like_regex(pattern, *case_insensitive)?.is_match(value.as_str()))
            }
            Predicate::FeatureIds(ids) => Ok(ids.contains(feature.id())),
            Predicate::Spatial {
                op: SpatialOperator::BBox,
                left,
                right,
            } => match (left.evaluate(feature)?, right.evaluate(feature)?) {
                (Some(Literal::Geometry(left)), Some(Literal::Geometry(right))) => {
                    match (left.envelope(), right.envelope()) {
                        (Some(left), Some(right)) => Ok(left.intersects(&right)),
                        _ => Ok(false),
                    }
                }
                _ => Ok(false),
            },
            Predicate::Spatial { op, .. } => Err(EvaluationError::unsupported(op)),
            Predicate::Distance { op, .. } => Err(EvaluationError::unsupported(op)),
        }
    }
}

fn holds(op: ComparisonOp, ordering: Ordering) -> bool {
    match op {
        ComparisonOp::Eq => ordering == Ordering::Equal,
        ComparisonOp::NotEq => ordering != Ordering::Equal,
        ComparisonOp::Lt => ordering == Ordering::Less,
        ComparisonOp::LtEq => ordering != Ordering::Greater,
        ComparisonOp::Gt => ordering == Ordering::Greater,
        ComparisonOp::GtEq => ordering != Ordering::Less,
    }
}

fn like_regex(pattern: &str, case_insensitive: bool) -> Result<Regex, EvaluationError> {
    let mut translated = String::from(if case_insensitive { "(?i)^" } else { "^" });
    for c in pattern.chars() {
        match c {
            '%' => translated.push_str(".*"),
            '_' => translated.push('.'),
            other => translated.push_str(&regex::escape(&other.to_string())),
        }
    }
    translated.push('$');
    Regex::new(translated.as_str()).map_err(|_| EvaluationError::InvalidPattern(pattern.to_owned()))
}

impl Expression {
    /// `Ok(None)` stands for a missing attribute
    pub fn evaluate(&self, feature: &dyn Feature) -> Result<Option<Literal>, EvaluationError> {
        match self {
            Expression::Property(path) => Ok(feature.property(path)),
            Expression::Literal(literal) => Ok(Some(literal.clone())),
            Expression::Function { name, .. } => Err(EvaluationError::unsupported(format!("function {}", name))),
            Expression::Arithmetic { op, left, right } => {
                let left = left.evaluate(feature)?.and_then(|value| value.as_number());
                let right = right.evaluate(feature)?.and_then(|value| value.as_number());
                match (left, right) {
                    (Some(left), Some(right)) => Ok(calculate(*op, left, right).map(Literal::Number)),
                    _ => Ok(None),
                }
            }
        }
    }
}

fn calculate(op: ArithmeticOp, left: Number, right: Number) -> Option<Number> {
    if op != ArithmeticOp::Div {
        if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
            let result = match op {
                ArithmeticOp::Add => left.checked_add(right),
                ArithmeticOp::Sub => left.checked_sub(right),
                ArithmeticOp::Mul => left.checked_mul(right),
                ArithmeticOp::Div => None,
            };
            return result.map(Number::Long);
        }
    }
    let (left, right) = (left.as_f64(), right.as_f64());
    let result = match op {
        ArithmeticOp::Add => left + right,
        ArithmeticOp::Sub => left - right,
        ArithmeticOp::Mul => left * right,
        ArithmeticOp::Div => left / right,
    };
    Some(Number::Double(result))
}
