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

use crate::production::Production;
use diagnostics::SourceToken;
use filter_tree::{Expression, Literal, Number, Predicate};
use geometry::{Coordinate, Geometry};
use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    Predicate(Predicate),
    Expression(Expression),
    Literal(Literal),
    Geometry(Geometry),
    Coordinate(Coordinate),
    Number(Number),
    RawToken(String),
}

impl Node {
    fn describe(&self) -> &'static str {
        match self {
            Node::Predicate(_) => "predicate",
            Node::Expression(_) => "expression",
            Node::Literal(_) => "literal",
            Node::Geometry(_) => "geometry",
            Node::Coordinate(_) => "coordinate",
            Node::Number(_) => "number",
            Node::RawToken(_) => "raw token",
        }
    }
}

/// Intermediate value tagged with the production that built it and the token it started at
#[derive(Debug, PartialEq, Clone)]
pub struct BuildResult {
    pub production: Production,
    pub node: Node,
    pub token: SourceToken,
}

impl BuildResult {
    pub fn into_predicate(self) -> Result<Predicate, StackDefect> {
        match self.node {
            Node::Predicate(predicate) => Ok(predicate),
            _ => Err(StackDefect::mismatch("predicate", self.production)),
        }
    }

    pub fn into_expression(self) -> Result<Expression, StackDefect> {
        match self.node {
            Node::Expression(expression) => Ok(expression),
            Node::Literal(literal) => Ok(Expression::Literal(literal)),
            _ => Err(StackDefect::mismatch("expression", self.production)),
        }
    }
}

/// Stack discipline violation; always a defect in the grammar or a builder, never in the input
#[derive(Debug, PartialEq, Clone)]
pub enum StackDefect {
    Empty { expected: &'static str },
    Mismatch { expected: &'static str, found: Production },
    Unbalanced { remaining: usize },
    UnsupportedProduction(Production),
    MissingToken(Production),
    EmptyRun(Production),
}

impl StackDefect {
    pub fn empty(expected: &'static str) -> StackDefect {
        StackDefect::Empty { expected }
    }

    pub fn mismatch(expected: &'static str, found: Production) -> StackDefect {
        StackDefect::Mismatch { expected, found }
    }

    pub fn unbalanced(remaining: usize) -> StackDefect {
        StackDefect::Unbalanced { remaining }
    }
}

impl Display for StackDefect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StackDefect::Empty { expected } => write!(f, "expected {} on results stack but it is empty", expected),
            StackDefect::Mismatch { expected, found } => {
                write!(f, "expected {} on results stack but found {:?}", expected, found)
            }
            StackDefect::Unbalanced { remaining } => {
                write!(f, "expected exactly one result at the end but {} remained", remaining)
            }
            StackDefect::UnsupportedProduction(production) => {
                write!(f, "{:?} is not a production of this dialect", production)
            }
            StackDefect::MissingToken(production) => write!(f, "{:?} was reduced without a token", production),
            StackDefect::EmptyRun(production) => write!(f, "{:?} was reduced without any member", production),
        }
    }
}

impl std::error::Error for StackDefect {}

#[derive(Debug, Default)]
pub struct ResultsStack {
    entries: Vec<BuildResult>,
}

impl ResultsStack {
    pub fn push(&mut self, production: Production, node: Node, token: SourceToken) {
        log::trace!("push {:?} {}", production, node.describe());
        self.entries.push(BuildResult {
            production,
            node,
            token,
        });
    }

    pub fn pop(&mut self) -> Result<BuildResult, StackDefect> {
        match self.entries.pop() {
            Some(result) => {
                log::trace!("pop {:?} {}", result.production, result.node.describe());
                Ok(result)
            }
            None => Err(StackDefect::empty("any result")),
        }
    }

    pub fn peek(&self) -> Option<&BuildResult> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn pop_as<T, F>(&mut self, expected: &'static str, extract: F) -> Result<T, StackDefect>
    where
        F: FnOnce(Node) -> Option<T>,
    {
        let result = self.entries.pop().ok_or_else(|| StackDefect::empty(expected))?;
        log::trace!("pop {:?} as {}", result.production, expected);
        let production = result.production;
        extract(result.node).ok_or_else(|| StackDefect::mismatch(expected, production))
    }

    pub fn pop_predicate(&mut self) -> Result<Predicate, StackDefect> {
        self.pop_as("predicate", |node| match node {
            Node::Predicate(predicate) => Some(predicate),
            _ => None,
        })
    }

    /// Literals on the stack are expressions too
    pub fn pop_expression(&mut self) -> Result<Expression, StackDefect> {
        self.pop_as("expression", |node| match node {
            Node::Expression(expression) => Some(expression),
            Node::Literal(literal) => Some(Expression::Literal(literal)),
            _ => None,
        })
    }

    pub fn pop_literal(&mut self) -> Result<Literal, StackDefect> {
        self.pop_as("literal", |node| match node {
            Node::Literal(literal) => Some(literal),
            _ => None,
        })
    }

    pub fn pop_geometry(&mut self) -> Result<Geometry, StackDefect> {
        self.pop_as("geometry", |node| match node {
            Node::Geometry(geometry) => Some(geometry),
            _ => None,
        })
    }

    pub fn pop_coordinate(&mut self) -> Result<Coordinate, StackDefect> {
        self.pop_as("coordinate", |node| match node {
            Node::Coordinate(coordinate) => Some(coordinate),
            _ => None,
        })
    }

    /// Raw ordinates and numeric literals alike
    pub fn pop_number(&mut self) -> Result<Number, StackDefect> {
        self.pop_as("number", |node| match node {
            Node::Number(number) | Node::Literal(Literal::Number(number)) => Some(number),
            _ => None,
        })
    }

    pub fn pop_raw(&mut self, tag: Production) -> Result<String, StackDefect> {
        let result = self.pop()?;
        match result.node {
            Node::RawToken(raw) if result.production == tag => Ok(raw),
            _ => Err(StackDefect::mismatch("raw token", result.production)),
        }
    }

    /// Pops the maximal run of entries whose tag `matches`; the run comes back in push order
    pub fn drain_run<T, M, E>(&mut self, matches: M, extract: E) -> Result<Vec<T>, StackDefect>
    where
        M: Fn(Production) -> bool,
        E: Fn(Node) -> Option<T>,
    {
        let mut run = vec![];
        while let Some(top) = self.entries.last() {
            if !matches(top.production) {
                break;
            }
            let production = top.production;
            let result = self.pop()?;
            run.push(extract(result.node).ok_or_else(|| StackDefect::mismatch("run member", production))?);
        }
        run.reverse();
        Ok(run)
    }

    /// Drops `count` entries that all must carry `tag`
    pub fn discard(&mut self, count: usize, tag: Production) -> Result<(), StackDefect> {
        for _ in 0..count {
            let result = self.pop()?;
            if result.production != tag {
                return Err(StackDefect::mismatch("discardable entry", result.production));
            }
        }
        Ok(())
    }

    /// Changes the tag of the top entry so it joins a run of its enclosing production
    pub fn retag(&mut self, production: Production) -> Result<(), StackDefect> {
        match self.entries.last_mut() {
            Some(top) => {
                log::trace!("retag {:?} as {:?}", top.production, production);
                top.production = production;
                Ok(())
            }
            None => Err(StackDefect::empty("result to retag")),
        }
    }

    pub fn into_root(mut self) -> Result<BuildResult, StackDefect> {
        match self.entries.len() {
            0 => Err(StackDefect::empty("compiled result")),
            1 => self.pop(),
            remaining => Err(StackDefect::unbalanced(remaining)),
        }
    }
}
