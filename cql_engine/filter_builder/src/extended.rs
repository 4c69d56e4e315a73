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
    builder::FilterBuilder,
    error::BuildError,
    origin,
    production::Production,
    stack::{BuildResult, ResultsStack, StackDefect},
    Reducer,
};
use crs::CrsResolver;
use diagnostics::SourceToken;
use filter_tree::FilterFactory;

/// Extended dialect on top of [`FilterBuilder`].
///
/// Spatial routines take arbitrary expressions on both sides, `SRID=n;` is a literal of its
/// own, ENVELOPE leaves no components on the stack and word aliases of comparison operators
/// are accepted with a deprecation warning. Everything else is built by the base dialect.
pub struct ExtendedFilterBuilder<'c> {
    base: FilterBuilder<'c>,
}

impl<'c> ExtendedFilterBuilder<'c> {
    pub fn new(
        statement: &'c str,
        factory: &'c dyn FilterFactory,
        resolver: &'c dyn CrsResolver,
    ) -> ExtendedFilterBuilder<'c> {
        ExtendedFilterBuilder {
            base: FilterBuilder::new(statement, factory, resolver),
        }
    }

    pub fn stack(&self) -> &ResultsStack {
        self.base.stack()
    }
}

impl<'c> Reducer for ExtendedFilterBuilder<'c> {
    fn reduce(&mut self, production: Production, tokens: &[SourceToken]) -> Result<(), BuildError> {
        match production {
            Production::Spatial(op) => {
                let token = origin(production, tokens)?;
                let right = self.base.pop_expression()?;
                self.base.spatial(op, right, token)
            }
            Production::Envelope => self.base.envelope(tokens),
            Production::GeometryLiteralWithSrid => self.base.geometry_with_srid(tokens),
            Production::EnvelopeComponent | Production::Srid | Production::SridGeometryLiteral => {
                Err(StackDefect::UnsupportedProduction(production).into())
            }
            Production::Comparison(op) => {
                let token = origin(production, tokens)?;
                if token.text().chars().all(char::is_alphabetic) {
                    log::warn!("comparison operator {} is deprecated, use '{}' instead", token, op);
                }
                self.base.reduce(production, tokens)
            }
            other => self.base.reduce(other, tokens),
        }
    }

    fn finish(self) -> Result<BuildResult, BuildError> {
        self.base.finish()
    }
}
