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

use filter_tree::{ArithmeticOp, ComparisonOp, DistanceOperator, SpatialOperator};

/// Where a geometry sits relative to its enclosing geometry text
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GeometryRole {
    Root,
    Ring,
    MultiPointMember,
    MultiLineStringMember,
    MultiPolygonMember,
    CollectionMember,
}

/// Grammar production completed by the parser.
///
/// Used both as the reduction event handed to a [`Reducer`](crate::Reducer) and as the tag of
/// the result pushed on the stack.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Production {
    PropertyName,
    IntegerLiteral,
    FloatingLiteral,
    StringLiteral,
    BooleanLiteral,
    NegativeNumber,
    FunctionName,
    FunctionArgument,
    Function,
    Arithmetic(ArithmeticOp),

    Comparison(ComparisonOp),
    And,
    Or,
    Not,
    Include,
    Exclude,
    FeatureId,
    FeatureIdPredicate,
    InListMember,
    InPredicate,
    NotInPredicate,
    IsNull,
    IsNotNull,
    Like,
    NotLike,
    ILike,
    NotILike,
    Between,
    NotBetween,
    Spatial(SpatialOperator),
    BBox,
    Distance(DistanceOperator),
    Relate,
    De9imPattern,
    RelatePattern,

    Ordinate,
    Coordinate,
    PointText(GeometryRole),
    LineStringText(GeometryRole),
    PolygonText(GeometryRole),
    MultiPointText(GeometryRole),
    MultiLineStringText(GeometryRole),
    MultiPolygonText(GeometryRole),
    GeometryCollectionStart,
    GeometryCollectionText(GeometryRole),
    GeometryLiteral,
    Srid,
    SridGeometryLiteral,
    GeometryLiteralWithSrid,
    EnvelopeComponent,
    Envelope,
}

impl Production {
    pub fn role(&self) -> Option<GeometryRole> {
        match self {
            Production::PointText(role)
            | Production::LineStringText(role)
            | Production::PolygonText(role)
            | Production::MultiPointText(role)
            | Production::MultiLineStringText(role)
            | Production::MultiPolygonText(role)
            | Production::GeometryCollectionText(role) => Some(*role),
            _ => None,
        }
    }

    pub fn is_geometry_text(&self) -> bool {
        self.role().is_some()
    }
}
