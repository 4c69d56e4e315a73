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
use crs::EpsgRegistry;
use diagnostics::{CompileErrorKind, SourceToken};
use filter_builder::{ExtendedFilterBuilder, FilterBuilder, GeometryRole, Node, Production};
use filter_tree::{
    ComparisonOp, DefaultFilterFactory, Expression, FilterFactory, Literal, Number, Predicate, PropertyPath,
};


/// Keeps every reduction with the text of its tokens
#[derive(Default)]
struct RecordingReducer {
    reductions: Vec<(Production, Vec<String>)>,
}

impl Reducer for RecordingReducer {
    fn reduce(&mut self, production: Production, tokens: &[SourceToken]) -> Result<(), BuildError> {
        self.reductions
            .push((production, tokens.iter().map(|token| token.text().to_owned()).collect()));
        Ok(())
    }

    fn finish(self) -> Result<BuildResult, BuildError> {
        let production = self.reductions.last().map(|(production, _)| *production).unwrap_or(Production::Include);
        Ok(BuildResult {
            production,
            node: Node::RawToken(format!("{} reductions", self.reductions.len())),
            token: SourceToken::synthetic(""),
        })
    }
}

fn record(dialect: Dialect, statement: &str) -> Vec<(Production, Vec<String>)> {
    let lexemes = crate::lexer::scan(statement).unwrap();
    let mut grammar = crate::grammar::Grammar::new(
        crate::lexer::Cursor::new(&lexemes, statement),
        RecordingReducer::default(),
        dialect,
        statement,
    );
    grammar.filter().unwrap();
    grammar.end().unwrap();
    grammar.into_parts().1.reductions
}

fn reduction(production: Production, tokens: &[&str]) -> (Production, Vec<String>) {
    (production, tokens.iter().map(|token| (*token).to_owned()).collect())
}

fn cql(statement: &str) -> Result<Predicate, BuildError> {
    let registry = EpsgRegistry::default();
    let builder = FilterBuilder::new(statement, &DefaultFilterFactory, &registry);
    QueryParser::new(Dialect::Cql)
        .parse_filter(statement, builder)
        .and_then(|root| root.into_predicate().map_err(BuildError::from))
}

fn ecql(statement: &str) -> Result<Predicate, BuildError> {
    let registry = EpsgRegistry::default();
    let builder = ExtendedFilterBuilder::new(statement, &DefaultFilterFactory, &registry);
    QueryParser::new(Dialect::Ecql)
        .parse_filter(statement, builder)
        .and_then(|root| root.into_predicate().map_err(BuildError::from))
}

fn attribute(path: &str) -> Expression {
    Expression::Property(PropertyPath::from(path))
}

fn integer(value: i32) -> Expression {
    Expression::Literal(Literal::Number(Number::Integer(value)))
}

fn compare(op: ComparisonOp, left: Expression, right: Expression) -> Predicate {
    DefaultFilterFactory.compare(op, left, right)
}

fn compile_error(error: BuildError) -> (CompileErrorKind, u64, u64) {
    match error {
        BuildError::Compile(error) => (error.kind().clone(), error.token().line(), error.token().column()),
        BuildError::Defect(defect) => panic!("expected compile error but got {}", defect),
    }
}
