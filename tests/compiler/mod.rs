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

use cql::{
    BuildError, CompileErrorKind, Compiler, ComparisonOp, DefaultFilterFactory, Expression, FilterFactory, Literal,
    Number, Predicate, PropertyPath,
};

#[cfg(test)]
mod errors;
#[cfg(test)]
mod properties;
#[cfg(test)]
mod sharing;

fn attribute(name: &str) -> Expression {
    Expression::Property(PropertyPath::from(name))
}

fn integer(value: i32) -> Expression {
    Expression::Literal(Literal::Number(Number::Integer(value)))
}

fn less_than(name: &str, value: i32) -> Predicate {
    DefaultFilterFactory.compare(ComparisonOp::Lt, attribute(name), integer(value))
}

fn compile_error(outcome: Result<Predicate, BuildError>) -> CompileErrorKind {
    match outcome {
        Err(BuildError::Compile(error)) => error.kind().clone(),
        other => panic!("expected compile error but got {:?}", other),
    }
}
