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
use cql::{Envelope, Geometry, NumberKind, SimpleFeature};

#[rstest::rstest(
    literal,
    kind,
    case::integer("7", NumberKind::Integer),
    case::long("7000000000", NumberKind::Long),
    case::double("7.5", NumberKind::Double),
    case::fraction("0.25", NumberKind::Double)
)]
fn negation_keeps_numeric_kind(literal: &str, kind: NumberKind) {
    match Compiler::ecql().compile_expression(&format!("-{}", literal)) {
        Ok(Expression::Literal(Literal::Number(number))) => {
            assert_eq!(number.kind(), kind);
            assert!(number.as_f64() < 0.0);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn duplicated_feature_ids() {
    match Compiler::cql().compile_filter("ID('a', 'b', 'a')") {
        Ok(Predicate::FeatureIds(ids)) => {
            assert_eq!(ids.len(), 2);
            assert_eq!(ids.ids(), &["a".to_owned(), "b".to_owned()]);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn in_list_matches_like_disjunction() {
    let compiler = Compiler::ecql();
    let in_list = compiler.compile_filter("x IN (1, 2, 3)").unwrap();
    let disjunction = compiler.compile_filter("(x = 1) OR (x = 2) OR (x = 3)").unwrap();

    for value in -1..5 {
        let feature = SimpleFeature::new("f.1").with("x", Literal::Number(Number::Integer(value)));
        assert_eq!(in_list.evaluate(&feature), disjunction.evaluate(&feature), "x = {}", value);
    }
    assert_eq!(in_list.evaluate(&SimpleFeature::new("f.2")), Ok(false));
}

#[test]
fn relate_with_valid_pattern() {
    match Compiler::cql().compile_filter("RELATE(geom, LINESTRING(1 2, 10 15), 'T*T***T**')") {
        Ok(Predicate::Comparison {
            op: ComparisonOp::Eq,
            left: Expression::Function { name, args },
            right,
        }) => {
            assert_eq!(name, "relatePattern");
            assert_eq!(args.len(), 3);
            assert_eq!(right, Expression::Literal(Literal::Boolean(true)));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[rstest::rstest(pattern, case::too_short("T*T***T*"), case::wrong_alphabet("XXXXXXXXX"))]
fn relate_with_invalid_pattern(pattern: &str) {
    let statement = format!("RELATE(geom, LINESTRING(1 2, 10 15), '{}')", pattern);

    assert_eq!(
        compile_error(Compiler::cql().compile_filter(&statement)),
        CompileErrorKind::InvalidDe9imPattern {
            pattern: pattern.to_owned()
        }
    );
}

#[rstest::rstest(compiler, case::base(Compiler::cql()), case::extended(Compiler::ecql()))]
fn geometry_literal_carries_reference_system(compiler: Compiler) {
    match compiler.compile_filter("INTERSECTS(the_geom, SRID=4326;POINT(1 2))") {
        Ok(Predicate::Spatial {
            left,
            right: Expression::Literal(Literal::Geometry(literal)),
            ..
        }) => {
            assert_eq!(left, attribute("the_geom"));
            assert_eq!(literal.geometry(), &Geometry::Point(cql::Coordinate::new(1.0, 2.0)));
            assert_eq!(literal.crs().map(|crs| crs.code()), Some("EPSG:4326".to_owned()));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[rstest::rstest(compiler, case::base(Compiler::cql()), case::extended(Compiler::ecql()))]
fn envelope_bounds(compiler: Compiler) {
    match compiler.compile_filter("WITHIN(geom, ENVELOPE(10, 40, 40, 10))") {
        Ok(Predicate::Spatial {
            right: Expression::Literal(Literal::Geometry(literal)),
            ..
        }) => assert_eq!(
            literal.envelope(),
            Some(Envelope {
                min_x: 10.0,
                max_x: 40.0,
                min_y: 10.0,
                max_y: 40.0
            })
        ),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn brackets_and_parentheses_build_same_tree() {
    let extended = Compiler::ecql().compile_filter("[X<4 AND Y<4] OR Z<4");
    let base = Compiler::cql().compile_filter("(X<4 AND Y<4) OR Z<4");

    assert_eq!(extended, base);
    assert_eq!(
        base,
        Ok(Predicate::Or(vec![
            Predicate::And(vec![less_than("X", 4), less_than("Y", 4)]),
            less_than("Z", 4)
        ]))
    );
}

#[rstest::rstest(
    statement,
    attr,
    literal,
    case::integer("ATTR1 < 10", "ATTR1", "10"),
    case::string("name = 'Danube'", "name", "'Danube'"),
    case::nested("address.city <> 'Kyiv'", "address.city", "'Kyiv'")
)]
fn operands_render_back(statement: &str, attr: &str, literal: &str) {
    match Compiler::cql().compile_filter(statement) {
        Ok(Predicate::Comparison { left, right, .. }) => {
            assert_eq!(left.to_string(), attr);
            assert_eq!(right.to_string(), literal);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn filter_list() {
    assert_eq!(
        Compiler::cql().compile_filter_list("X < 4; INCLUDE; Z < 4"),
        Ok(vec![less_than("X", 4), Predicate::Include, less_than("Z", 4)])
    );
}
