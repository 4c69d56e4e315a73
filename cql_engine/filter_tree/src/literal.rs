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

use crs::Crs;
use geometry::{Envelope, Geometry};
use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum NumberKind {
    Integer,
    Long,
    Float,
    Double,
}

/// Numeric literal that remembers the kind it was scanned as
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Number {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    /// Digits only: the narrowest of integer or long that holds the value, double beyond that
    pub fn parse_integral(lexeme: &str) -> Option<Number> {
        if let Ok(value) = lexeme.parse::<i32>() {
            Some(Number::Integer(value))
        } else if let Ok(value) = lexeme.parse::<i64>() {
            Some(Number::Long(value))
        } else {
            lexeme.parse::<f64>().ok().map(Number::Double)
        }
    }

    pub fn parse_floating(lexeme: &str) -> Option<Number> {
        lexeme.parse::<f64>().ok().map(Number::Double)
    }

    pub fn kind(&self) -> NumberKind {
        match self {
            Number::Integer(_) => NumberKind::Integer,
            Number::Long(_) => NumberKind::Long,
            Number::Float(_) => NumberKind::Float,
            Number::Double(_) => NumberKind::Double,
        }
    }

    /// Negates keeping the kind; `None` when the negated value does not fit the kind
    pub fn negate(self) -> Option<Number> {
        match self {
            Number::Integer(value) => value.checked_neg().map(Number::Integer),
            Number::Long(value) => value.checked_neg().map(Number::Long),
            Number::Float(value) => Some(Number::Float(-value)),
            Number::Double(value) => Some(Number::Double(-value)),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(value) => *value as f64,
            Number::Long(value) => *value as f64,
            Number::Float(value) => *value as f64,
            Number::Double(value) => *value,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(value) => Some(*value as i64),
            Number::Long(value) => Some(*value),
            Number::Float(_) | Number::Double(_) => None,
        }
    }

    pub fn compare(&self, other: &Number) -> Option<Ordering> {
        match (self.as_i64(), other.as_i64()) {
            (Some(left), Some(right)) => Some(left.cmp(&right)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// Canonical rendering: `1.50` is shown as `1.5`, not as it was written
impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{}", value),
            Number::Long(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{:?}", value),
            Number::Double(value) => write!(f, "{:?}", value),
        }
    }
}

/// Geometry value with the reference system it was qualified with, if any
#[derive(Debug, PartialEq, Clone)]
pub struct GeometryLiteral {
    geometry: Geometry,
    crs: Option<Crs>,
}

impl GeometryLiteral {
    pub fn new(geometry: Geometry) -> GeometryLiteral {
        GeometryLiteral { geometry, crs: None }
    }

    pub fn with_crs(self, crs: Crs) -> GeometryLiteral {
        GeometryLiteral {
            geometry: self.geometry,
            crs: Some(crs),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    pub fn envelope(&self) -> Option<Envelope> {
        self.geometry.envelope()
    }
}

impl Display for GeometryLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.crs {
            Some(crs) => write!(f, "SRID={};{}", crs.srid(), self.geometry),
            None => write!(f, "{}", self.geometry),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(Number),
    String(String),
    Boolean(bool),
    Geometry(GeometryLiteral),
}

impl Literal {
    pub fn string<S: ToString>(value: S) -> Literal {
        Literal::String(value.to_string())
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Literal::Number(number) => Some(*number),
            Literal::String(value) => Number::parse_integral(value.trim()),
            Literal::Boolean(_) | Literal::Geometry(_) => None,
        }
    }

    pub fn compare(&self, other: &Literal) -> Option<Ordering> {
        match (self, other) {
            (Literal::String(left), Literal::String(right)) => Some(left.cmp(right)),
            (Literal::Boolean(left), Literal::Boolean(right)) => Some(left.cmp(right)),
            (Literal::Geometry(left), Literal::Geometry(right)) if left.geometry() == right.geometry() => {
                Some(Ordering::Equal)
            }
            (Literal::Geometry(_), _) | (_, Literal::Geometry(_)) => None,
            (left, right) => match (left.as_number(), right.as_number()) {
                (Some(left), Some(right)) => left.compare(&right),
                _ => None,
            },
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(number) => write!(f, "{}", number),
            Literal::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Literal::Boolean(true) => write!(f, "TRUE"),
            Literal::Boolean(false) => write!(f, "FALSE"),
            Literal::Geometry(geometry) => write!(f, "{}", geometry),
        }
    }
}
