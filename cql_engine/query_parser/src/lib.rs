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
    grammar::Grammar,
    lexer::{scan, Cursor},
};
use diagnostics::CompileError;
use filter_builder::{BuildError, BuildResult, Reducer};
use sqlparser::tokenizer::Token;
use std::fmt::{self, Display, Formatter};

mod grammar;
mod lexer;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Dialect {
    Cql,
    Ecql,
}

impl Dialect {
    pub fn from_name(name: &str) -> Option<Dialect> {
        match name.trim().to_lowercase().as_str() {
            "cql" => Some(Dialect::Cql),
            "ecql" => Some(Dialect::Ecql),
            _ => None,
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Cql => write!(f, "CQL"),
            Dialect::Ecql => write!(f, "ECQL"),
        }
    }
}

/// Drives a [`Reducer`] through the productions of a statement in reduction order
#[derive(Debug, Copy, Clone)]
pub struct QueryParser {
    dialect: Dialect,
}

impl QueryParser {
    pub fn new(dialect: Dialect) -> QueryParser {
        QueryParser { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn parse_filter<R: Reducer>(&self, statement: &str, reducer: R) -> Result<BuildResult, BuildError> {
        log::debug!("parsing {} filter {:?}", self.dialect, statement);
        let lexemes = scan(statement)?;
        let mut grammar = Grammar::new(Cursor::new(&lexemes, statement), reducer, self.dialect, statement);
        grammar.filter()?;
        grammar.end()?;
        let (_, reducer) = grammar.into_parts();
        reducer.finish()
    }

    pub fn parse_expression<R: Reducer>(&self, statement: &str, reducer: R) -> Result<BuildResult, BuildError> {
        log::debug!("parsing {} expression {:?}", self.dialect, statement);
        let lexemes = scan(statement)?;
        let mut grammar = Grammar::new(Cursor::new(&lexemes, statement), reducer, self.dialect, statement);
        grammar.expression()?;
        grammar.end()?;
        let (_, reducer) = grammar.into_parts();
        reducer.finish()
    }

    /// Filters separated by `;`, each one built by its own reducer
    pub fn parse_filter_list<R, F>(&self, statement: &str, mut new_reducer: F) -> Result<Vec<BuildResult>, BuildError>
    where
        R: Reducer,
        F: FnMut() -> R,
    {
        log::debug!("parsing {} filter list {:?}", self.dialect, statement);
        let lexemes = scan(statement)?;
        let mut cursor = Cursor::new(&lexemes, statement);
        let mut filters = vec![];
        loop {
            let mut grammar = Grammar::new(cursor, new_reducer(), self.dialect, statement);
            grammar.filter()?;
            let (rest, reducer) = grammar.into_parts();
            filters.push(reducer.finish()?);
            cursor = rest;
            if cursor.eat(&Token::SemiColon).is_none() || cursor.is_at_end() {
                break;
            }
        }
        match cursor.peek() {
            Some(lexeme) => {
                Err(CompileError::syntax("';' or end of statement", lexeme.source.clone(), statement).into())
            }
            None => Ok(filters),
        }
    }
}

#[cfg(test)]
mod tests;
