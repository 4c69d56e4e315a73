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
use log::LevelFilter;

#[rstest::rstest(
    dialect,
    log_level,
    expected,
    case::defaults(None, None, CompilerConfiguration::new(Dialect::Ecql, LevelFilter::Warn)),
    case::base_dialect(Some("CQL"), Some("debug"), CompilerConfiguration::new(Dialect::Cql, LevelFilter::Debug)),
    case::padded(Some(" ecql "), Some(" TRACE "), CompilerConfiguration::new(Dialect::Ecql, LevelFilter::Trace)),
    case::unknown_values(Some("sql"), Some("loud"), CompilerConfiguration::new(Dialect::Ecql, LevelFilter::Warn))
)]
fn configuration_values(dialect: Option<&str>, log_level: Option<&str>, expected: CompilerConfiguration) {
    assert_eq!(
        CompilerConfiguration::from_values(dialect.map(str::to_owned), log_level.map(str::to_owned)),
        expected
    );
}

#[test]
fn compiler_follows_configured_dialect() {
    let configuration = CompilerConfiguration::new(Dialect::Cql, LevelFilter::Off);

    assert_eq!(Compiler::from_configuration(&configuration).dialect(), Dialect::Cql);
    assert_eq!(Compiler::default().dialect(), Dialect::Ecql);
}

struct LocalGrid;

impl CrsResolver for LocalGrid {
    fn resolve(&self, srid: i32) -> Result<Crs, CrsError> {
        Ok(Crs::new(srid, "local grid"))
    }
}

#[test]
fn custom_resolver() {
    let predicate = Compiler::ecql()
        .with_resolver(LocalGrid)
        .compile_filter("INTERSECTS(geom, SRID=123456;POINT(1 2))");

    match predicate {
        Ok(Predicate::Spatial {
            right: Expression::Literal(Literal::Geometry(literal)),
            ..
        }) => assert_eq!(literal.crs(), Some(&Crs::new(123456, "local grid"))),
        other => panic!("unexpected {:?}", other),
    }
}

struct AlwaysIgnoreCase;

impl FilterFactory for AlwaysIgnoreCase {
    fn like(&self, expression: Expression, pattern: String, _case_insensitive: bool) -> Predicate {
        DefaultFilterFactory.like(expression, pattern, true)
    }
}

#[test]
fn custom_factory() {
    assert_eq!(
        Compiler::cql().with_factory(AlwaysIgnoreCase).compile_filter("name LIKE 'Riv%'"),
        Ok(Predicate::Like {
            expression: Expression::Property(PropertyPath::from("name")),
            pattern: "Riv%".to_owned(),
            case_insensitive: true
        })
    );
}

#[test]
fn expression_entry_point() {
    assert_eq!(
        Compiler::cql().compile_expression("population / 1000").map(|expression| expression.to_string()),
        Ok("(population / 1000)".to_owned())
    );
}
