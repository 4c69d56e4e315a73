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

pub use crate::{
    builder::FilterBuilder,
    error::BuildError,
    extended::ExtendedFilterBuilder,
    production::{GeometryRole, Production},
    stack::{BuildResult, Node, ResultsStack, StackDefect},
};
use diagnostics::SourceToken;

mod builder;
mod error;
mod extended;
mod geometry_builder;
mod production;
mod stack;

/// Receives completed grammar productions in reduction order.
///
/// `tokens` are the terminals the production consumed directly; the first one is where the
/// production starts in the statement.
pub trait Reducer {
    fn reduce(&mut self, production: Production, tokens: &[SourceToken]) -> Result<(), BuildError>;

    fn finish(self) -> Result<BuildResult, BuildError>
    where
        Self: Sized;
}

fn origin(production: Production, tokens: &[SourceToken]) -> Result<SourceToken, StackDefect> {
    tokens.first().cloned().ok_or(StackDefect::MissingToken(production))
}

#[cfg(test)]
mod tests;
