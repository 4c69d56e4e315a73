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

pub use crate::config::CompilerConfiguration;
pub use crs::{Crs, CrsError, CrsResolver, EpsgRegistry};
pub use diagnostics::{CompileError, CompileErrorKind, SourceToken};
pub use filter_builder::{BuildError, StackDefect};
pub use filter_tree::{
    ArithmeticOp, ComparisonOp, DefaultFilterFactory, DistanceOperator, DistanceUnits, EvaluationError, Expression,
    Feature, FeatureIdSet, FilterFactory, GeometryLiteral, Literal, Number, NumberKind, Predicate, PropertyPath,
    SimpleFeature, SpatialOperator,
};
pub use geometry::{Coordinate, Envelope, Geometry, GeometryError, LineString, Polygon};
pub use query_parser::Dialect;

use filter_builder::{ExtendedFilterBuilder, FilterBuilder};
use query_parser::QueryParser;
use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

mod config;

/// Compiles filter text of one dialect into predicate trees.
///
/// Every call builds its own results stack, so a single compiler can be shared between threads.
#[derive(Clone)]
pub struct Compiler {
    dialect: Dialect,
    factory: Arc<dyn FilterFactory + Send + Sync>,
    resolver: Arc<dyn CrsResolver + Send + Sync>,
}

impl Compiler {
    pub fn new(dialect: Dialect) -> Compiler {
        Compiler {
            dialect,
            factory: Arc::new(DefaultFilterFactory),
            resolver: Arc::new(EpsgRegistry::default()),
        }
    }

    pub fn cql() -> Compiler {
        Compiler::new(Dialect::Cql)
    }

    pub fn ecql() -> Compiler {
        Compiler::new(Dialect::Ecql)
    }

    pub fn from_configuration(configuration: &CompilerConfiguration) -> Compiler {
        Compiler::new(configuration.dialect())
    }

    pub fn with_resolver<R: CrsResolver + Send + Sync + 'static>(mut self, resolver: R) -> Compiler {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn with_factory<F: FilterFactory + Send + Sync + 'static>(mut self, factory: F) -> Compiler {
        self.factory = Arc::new(factory);
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn compile_filter(&self, statement: &str) -> Result<Predicate, BuildError> {
        let parser = QueryParser::new(self.dialect);
        let root = match self.dialect {
            Dialect::Cql => parser.parse_filter(statement, self.base_builder(statement)),
            Dialect::Ecql => parser.parse_filter(statement, self.extended_builder(statement)),
        };
        let predicate = root.and_then(|root| root.into_predicate().map_err(BuildError::from));
        self.log_outcome(statement, &predicate);
        predicate
    }

    pub fn compile_expression(&self, statement: &str) -> Result<Expression, BuildError> {
        let parser = QueryParser::new(self.dialect);
        let root = match self.dialect {
            Dialect::Cql => parser.parse_expression(statement, self.base_builder(statement)),
            Dialect::Ecql => parser.parse_expression(statement, self.extended_builder(statement)),
        };
        let expression = root.and_then(|root| root.into_expression().map_err(BuildError::from));
        self.log_outcome(statement, &expression);
        expression
    }

    /// `;` separated filters, all of them or none
    pub fn compile_filter_list(&self, statement: &str) -> Result<Vec<Predicate>, BuildError> {
        let parser = QueryParser::new(self.dialect);
        let roots = match self.dialect {
            Dialect::Cql => parser.parse_filter_list(statement, || self.base_builder(statement)),
            Dialect::Ecql => parser.parse_filter_list(statement, || self.extended_builder(statement)),
        }?;
        let predicates = roots
            .into_iter()
            .map(|root| root.into_predicate().map_err(BuildError::from))
            .collect::<Result<Vec<_>, _>>();
        self.log_outcome(statement, &predicates);
        predicates
    }

    fn base_builder<'c>(&'c self, statement: &'c str) -> FilterBuilder<'c> {
        FilterBuilder::new(statement, self.factory.as_ref(), self.resolver.as_ref())
    }

    fn extended_builder<'c>(&'c self, statement: &'c str) -> ExtendedFilterBuilder<'c> {
        ExtendedFilterBuilder::new(statement, self.factory.as_ref(), self.resolver.as_ref())
    }

    fn log_outcome<T>(&self, statement: &str, outcome: &Result<T, BuildError>) {
        match outcome {
            Ok(_) => log::debug!("{} statement {:?} compiled", self.dialect, statement),
            Err(BuildError::Compile(error)) => log::debug!("{:?} can't be compiled. Error: {}", statement, error),
            Err(BuildError::Defect(defect)) => log::error!("{:?} hit an internal defect: {}", statement, defect),
        }
    }
}

impl Debug for Compiler {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler").field("dialect", &self.dialect).finish()
    }
}

impl Default for Compiler {
    fn default() -> Compiler {
        Compiler::ecql()
    }
}

#[cfg(test)]
mod tests;
