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

use geometry::GeometryError;
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};

const DE9IM_ALPHABET: &str = "T, F, *, 0, 1, 2";
const DE9IM_LENGTH: usize = 9;

/// Terminal as it appeared in the statement; line and column are 1-based
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SourceToken {
    text: String,
    line: u64,
    column: u64,
}

impl SourceToken {
    pub fn new<T: ToString>(text: T, line: u64, column: u64) -> SourceToken {
        SourceToken {
            text: text.to_string(),
            line,
            column,
        }
    }

    /// Token with no position, for values made up by a builder
    pub fn synthetic<T: ToString>(text: T) -> SourceToken {
        SourceToken::new(text, 0, 0)
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn column(&self) -> u64 {
        self.column
    }
}

impl Display for SourceToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at line {}, column {}", self.text, self.line, self.column)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum CompileErrorKind {
    Syntax { expected: String, found: String },
    UnexpectedEnd { expected: String },
    Lexical(String),
    InvalidDe9imPattern { pattern: String },
    UnresolvedSrid { srid: i32 },
    InvalidSrid(String),
    DegenerateGeometry(GeometryError),
    InvalidNumber(String),
    InvalidDistanceUnits(String),
    NestingTooDeep { limit: usize },
}

impl Display for CompileErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CompileErrorKind::Syntax { expected, found } => write!(f, "expected {} but found {}", expected, found),
            CompileErrorKind::UnexpectedEnd { expected } => write!(f, "expected {} but statement ended", expected),
            CompileErrorKind::Lexical(message) => write!(f, "could not scan statement: {}", message),
            CompileErrorKind::InvalidDe9imPattern { pattern } => write!(
                f,
                "DE-9IM pattern '{}' must be {} characters long, each one of {}",
                pattern, DE9IM_LENGTH, DE9IM_ALPHABET
            ),
            CompileErrorKind::UnresolvedSrid { srid } => write!(f, "SRID {} could not be resolved", srid),
            CompileErrorKind::InvalidSrid(srid) => write!(f, "'{}' is not a valid SRID", srid),
            CompileErrorKind::DegenerateGeometry(error) => write!(f, "invalid geometry: {}", error),
            CompileErrorKind::InvalidNumber(number) => write!(f, "'{}' is not a representable number", number),
            CompileErrorKind::InvalidDistanceUnits(units) => write!(
                f,
                "unknown distance units '{}', expected one of meters, kilometers, feet, statute miles, nautical miles",
                units
            ),
            CompileErrorKind::NestingTooDeep { limit } => {
                write!(f, "statement is nested deeper than {} levels", limit)
            }
        }
    }
}

/// Error reported to the caller of a compile; carries where in the statement it happened
pub struct CompileError {
    kind: CompileErrorKind,
    token: SourceToken,
    statement: String,
    cause: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl CompileError {
    fn new<S: ToString>(kind: CompileErrorKind, token: SourceToken, statement: S) -> CompileError {
        CompileError {
            kind,
            token,
            statement: statement.to_string(),
            cause: None,
        }
    }

    pub fn syntax<E: ToString, S: ToString>(expected: E, token: SourceToken, statement: S) -> CompileError {
        let found = token.text().to_owned();
        CompileError::new(
            CompileErrorKind::Syntax {
                expected: expected.to_string(),
                found,
            },
            token,
            statement,
        )
    }

    pub fn unexpected_end<E: ToString, S: ToString>(expected: E, token: SourceToken, statement: S) -> CompileError {
        CompileError::new(
            CompileErrorKind::UnexpectedEnd {
                expected: expected.to_string(),
            },
            token,
            statement,
        )
    }

    pub fn lexical<M: ToString, S: ToString>(message: M, token: SourceToken, statement: S) -> CompileError {
        CompileError::new(CompileErrorKind::Lexical(message.to_string()), token, statement)
    }

    pub fn invalid_de9im_pattern<P, S>(pattern: P, token: SourceToken, statement: S) -> CompileError
    where
        P: ToString,
        S: ToString,
    {
        CompileError::new(
            CompileErrorKind::InvalidDe9imPattern {
                pattern: pattern.to_string(),
            },
            token,
            statement,
        )
    }

    pub fn unresolved_srid<S: ToString>(srid: i32, token: SourceToken, statement: S) -> CompileError {
        CompileError::new(CompileErrorKind::UnresolvedSrid { srid }, token, statement)
    }

    pub fn invalid_srid<S: ToString>(token: SourceToken, statement: S) -> CompileError {
        let srid = token.text().to_owned();
        CompileError::new(CompileErrorKind::InvalidSrid(srid), token, statement)
    }

    pub fn degenerate_geometry<S: ToString>(error: GeometryError, token: SourceToken, statement: S) -> CompileError {
        CompileError::new(CompileErrorKind::DegenerateGeometry(error), token, statement)
    }

    pub fn invalid_number<S: ToString>(token: SourceToken, statement: S) -> CompileError {
        let number = token.text().to_owned();
        CompileError::new(CompileErrorKind::InvalidNumber(number), token, statement)
    }

    pub fn invalid_distance_units<U, S>(units: U, token: SourceToken, statement: S) -> CompileError
    where
        U: ToString,
        S: ToString,
    {
        CompileError::new(CompileErrorKind::InvalidDistanceUnits(units.to_string()), token, statement)
    }

    pub fn nesting_too_deep<S: ToString>(limit: usize, token: SourceToken, statement: S) -> CompileError {
        CompileError::new(CompileErrorKind::NestingTooDeep { limit }, token, statement)
    }

    pub fn with_cause<E: Error + Send + Sync + 'static>(mut self, cause: E) -> CompileError {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> &CompileErrorKind {
        &self.kind
    }

    pub fn token(&self) -> &SourceToken {
        &self.token
    }

    pub fn statement(&self) -> &str {
        self.statement.as_str()
    }

    /// The offending statement line followed by a caret under the offending column
    pub fn render_caret(&self) -> String {
        let line_index = self.token.line.saturating_sub(1) as usize;
        let line = self.statement.lines().nth(line_index).unwrap_or("");
        let padding = self.token.column.saturating_sub(1) as usize;
        format!("{}\n{}^", line, " ".repeat(padding))
    }
}

impl PartialEq for CompileError {
    fn eq(&self, other: &CompileError) -> bool {
        self.kind == other.kind && self.token == other.token && self.statement == other.statement
    }
}

impl Debug for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileError")
            .field("kind", &self.kind)
            .field("token", &self.token)
            .field("statement", &self.statement)
            .field("cause", &self.cause.as_ref().map(ToString::to_string))
            .finish()
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} near {} in \"{}\"", self.kind, self.token, self.statement)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl Error for CompileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|cause| cause.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests;
