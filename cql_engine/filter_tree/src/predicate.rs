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

use crate::expression::Expression;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl Display for ComparisonOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOp::Eq => write!(f, "="),
            ComparisonOp::NotEq => write!(f, "<>"),
            ComparisonOp::Lt => write!(f, "<"),
            ComparisonOp::LtEq => write!(f, "<="),
            ComparisonOp::Gt => write!(f, ">"),
            ComparisonOp::GtEq => write!(f, ">="),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum SpatialOperator {
    Equals,
    Disjoint,
    Intersects,
    Touches,
    Crosses,
    Within,
    Contains,
    Overlaps,
    BBox,
}

impl SpatialOperator {
    /// Routine names callable as `NAME(a, b)`; BBOX has its own argument list
    pub fn from_routine(name: &str) -> Option<SpatialOperator> {
        match name.to_uppercase().as_str() {
            "EQUALS" => Some(SpatialOperator::Equals),
            "DISJOINT" => Some(SpatialOperator::Disjoint),
            "INTERSECTS" => Some(SpatialOperator::Intersects),
            "TOUCHES" => Some(SpatialOperator::Touches),
            "CROSSES" => Some(SpatialOperator::Crosses),
            "WITHIN" => Some(SpatialOperator::Within),
            "CONTAINS" => Some(SpatialOperator::Contains),
            "OVERLAPS" => Some(SpatialOperator::Overlaps),
            _ => None,
        }
    }
}

impl Display for SpatialOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SpatialOperator::Equals => write!(f, "EQUALS"),
            SpatialOperator::Disjoint => write!(f, "DISJOINT"),
            SpatialOperator::Intersects => write!(f, "INTERSECTS"),
            SpatialOperator::Touches => write!(f, "TOUCHES"),
            SpatialOperator::Crosses => write!(f, "CROSSES"),
            SpatialOperator::Within => write!(f, "WITHIN"),
            SpatialOperator::Contains => write!(f, "CONTAINS"),
            SpatialOperator::Overlaps => write!(f, "OVERLAPS"),
            SpatialOperator::BBox => write!(f, "BBOX"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum DistanceOperator {
    DWithin,
    Beyond,
}

impl Display for DistanceOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DistanceOperator::DWithin => write!(f, "DWITHIN"),
            DistanceOperator::Beyond => write!(f, "BEYOND"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum DistanceUnits {
    Meters,
    Kilometers,
    Feet,
    StatuteMiles,
    NauticalMiles,
}

impl DistanceUnits {
    pub fn parse(units: &str) -> Option<DistanceUnits> {
        match units.split_whitespace().join(" ").to_lowercase().as_str() {
            "meters" => Some(DistanceUnits::Meters),
            "kilometers" => Some(DistanceUnits::Kilometers),
            "feet" => Some(DistanceUnits::Feet),
            "statute miles" => Some(DistanceUnits::StatuteMiles),
            "nautical miles" => Some(DistanceUnits::NauticalMiles),
            _ => None,
        }
    }
}

impl Display for DistanceUnits {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnits::Meters => write!(f, "meters"),
            DistanceUnits::Kilometers => write!(f, "kilometers"),
            DistanceUnits::Feet => write!(f, "feet"),
            DistanceUnits::StatuteMiles => write!(f, "statute miles"),
            DistanceUnits::NauticalMiles => write!(f, "nautical miles"),
        }
    }
}

/// Feature identifiers in first-seen order without duplicates
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FeatureIdSet(Vec<String>);

impl FeatureIdSet {
    pub fn new<I: IntoIterator<Item = String>>(ids: I) -> FeatureIdSet {
        FeatureIdSet(ids.into_iter().unique().collect())
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|known| known == id)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Predicate {
    Include,
    Exclude,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Comparison {
        op: ComparisonOp,
        left: Expression,
        right: Expression,
    },
    Spatial {
        op: SpatialOperator,
        left: Expression,
        right: Expression,
    },
    Distance {
        op: DistanceOperator,
        left: Expression,
        right: Expression,
        distance: f64,
        units: DistanceUnits,
    },
    FeatureIds(FeatureIdSet),
    IsNull(Expression),
    Like {
        expression: Expression,
        pattern: String,
        case_insensitive: bool,
    },
    Between {
        expression: Expression,
        lower: Expression,
        upper: Expression,
    },
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Include => write!(f, "INCLUDE"),
            Predicate::Exclude => write!(f, "EXCLUDE"),
            Predicate::And(children) => write!(f, "({})", children.iter().join(" AND ")),
            Predicate::Or(children) => write!(f, "({})", children.iter().join(" OR ")),
            Predicate::Not(child) => write!(f, "NOT {}", child),
            Predicate::Comparison { op, left, right } => write!(f, "{} {} {}", left, op, right),
            Predicate::Spatial { op, left, right } => write!(f, "{}({}, {})", op, left, right),
            Predicate::Distance {
                op,
                left,
                right,
                distance,
                units,
            } => write!(f, "{}({}, {}, {:?}, {})", op, left, right, distance, units),
            Predicate::FeatureIds(ids) => write!(
                f,
                "IN ({})",
                ids.ids().iter().map(|id| format!("'{}'", id.replace('\'', "''"))).join(", ")
            ),
            Predicate::IsNull(expression) => write!(f, "{} IS NULL", expression),
            Predicate::Like {
                expression,
                pattern,
                case_insensitive,
            } => write!(
                f,
                "{} {} '{}'",
                expression,
                if *case_insensitive { "ILIKE" } else { "LIKE" },
                pattern.replace('\'', "''")
            ),
            Predicate::Between {
                expression,
                lower,
                upper,
            } => write!(f, "{} BETWEEN {} AND {}", expression, lower, upper),
        }
    }
}
