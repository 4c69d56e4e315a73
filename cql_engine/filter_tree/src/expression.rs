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

use crate::literal::Literal;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// Attribute reference; `a.b` is two segments, a namespace prefix stays inside its segment
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    pub fn new(segments: Vec<String>) -> PropertyPath {
        PropertyPath(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for PropertyPath {
    fn from(path: &str) -> PropertyPath {
        PropertyPath(path.split('.').map(ToOwned::to_owned).collect())
    }
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Display for ArithmeticOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticOp::Add => write!(f, "+"),
            ArithmeticOp::Sub => write!(f, "-"),
            ArithmeticOp::Mul => write!(f, "*"),
            ArithmeticOp::Div => write!(f, "/"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Property(PropertyPath),
    Literal(Literal),
    Function {
        name: String,
        args: Vec<Expression>,
    },
    Arithmetic {
        op: ArithmeticOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Property(path) => write!(f, "{}", path),
            Expression::Literal(literal) => write!(f, "{}", literal),
            Expression::Function { name, args } => write!(f, "{}({})", name, args.iter().join(", ")),
            Expression::Arithmetic { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}
