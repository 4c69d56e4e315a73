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
use cql::{CrsError, EpsgRegistry};
use std::error::Error;

#[test]
fn syntax_error_renders_caret() {
    match Compiler::cql().compile_filter("name = 'a' AND = 3") {
        Err(BuildError::Compile(error)) => {
            assert_eq!(error.token().column(), 16);
            assert_eq!(error.render_caret(), "name = 'a' AND = 3\n               ^");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn brackets_are_extended_only() {
    assert_eq!(
        compile_error(Compiler::cql().compile_filter("[X<4] OR Z<4")),
        CompileErrorKind::Syntax {
            expected: "an attribute".to_owned(),
            found: "[".to_owned()
        }
    );
}

#[test]
fn unresolved_reference_system_keeps_cause() {
    let outcome = Compiler::ecql()
        .with_resolver(EpsgRegistry::empty())
        .compile_filter("INTERSECTS(geom, SRID=4326;POINT(1 2))");

    match outcome {
        Err(BuildError::Compile(error)) => {
            assert_eq!(error.kind(), &CompileErrorKind::UnresolvedSrid { srid: 4326 });
            assert_eq!(
                error.source().map(ToString::to_string),
                Some(CrsError::unknown_code(4326).to_string())
            );
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn degenerate_geometry() {
    assert!(matches!(
        compile_error(Compiler::cql().compile_filter("CROSSES(geom, LINESTRING(1 2))")),
        CompileErrorKind::DegenerateGeometry(_)
    ));
}

#[test]
fn unknown_distance_units() {
    assert_eq!(
        compile_error(Compiler::cql().compile_filter("DWITHIN(geom, POINT(1 2), 10, parsecs)")),
        CompileErrorKind::InvalidDistanceUnits("parsecs".to_owned())
    );
}

#[test]
fn list_fails_as_a_whole() {
    assert!(Compiler::cql().compile_filter_list("X < 4; Y <").is_err());
}

#[test]
fn deep_nesting_is_reported() {
    let statement = format!("{}x = 1", "NOT ".repeat(5000));

    assert_eq!(
        compile_error(Compiler::ecql().compile_filter(&statement)),
        CompileErrorKind::NestingTooDeep { limit: 128 }
    );
}
