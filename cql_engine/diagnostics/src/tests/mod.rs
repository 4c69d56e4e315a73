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
use crs::{CrsError, CrsResolver, EpsgRegistry};

#[test]
fn de9im_message_names_alphabet_and_length() {
    let error = CompileError::invalid_de9im_pattern(
        "T*T***T*",
        SourceToken::new("'T*T***T*'", 1, 18),
        "RELATE(geom, POINT(1 2), 'T*T***T*')",
    );

    let message = error.to_string();
    assert!(message.contains("T, F, *, 0, 1, 2"), "{}", message);
    assert!(message.contains("9 characters"), "{}", message);
    assert_eq!(error.token().column(), 18);
}

#[test]
fn cause_is_exposed_as_source() {
    let cause = match EpsgRegistry::default().resolve(1) {
        Err(error) => error,
        Ok(crs) => panic!("unexpected {:?}", crs),
    };
    let error = CompileError::unresolved_srid(1, SourceToken::new("1", 1, 6), "SRID=1;POINT(1 2)").with_cause(cause);

    assert_eq!(
        error.source().map(ToString::to_string),
        Some(CrsError::unknown_code(1).to_string())
    );
    assert!(error.to_string().ends_with(&CrsError::unknown_code(1).to_string()));
}

#[test]
fn errors_without_cause_have_no_source() {
    let error = CompileError::syntax("')'", SourceToken::new("AND", 1, 5), "a = AND");

    assert!(error.source().is_none());
    assert_eq!(
        error.kind(),
        &CompileErrorKind::Syntax {
            expected: "')'".to_owned(),
            found: "AND".to_owned()
        }
    );
}

#[rstest::rstest(
    statement,
    line,
    column,
    expected,
    case::first_line("a = AND", 1, 5, "a = AND\n    ^"),
    case::second_line("a = 1\nAND OR", 2, 5, "AND OR\n    ^"),
    case::synthetic("a = 1", 0, 0, "a = 1\n^")
)]
fn caret_points_at_column(statement: &str, line: u64, column: u64, expected: &str) {
    let error = CompileError::syntax("a predicate", SourceToken::new("OR", line, column), statement);

    assert_eq!(error.render_caret(), expected);
}
