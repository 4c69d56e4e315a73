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

#[test]
fn and_flattens_nested_conjunctions() {
    let factory = DefaultFilterFactory;
    let first = equals(property("a"), integer(1));
    let second = equals(property("b"), integer(2));
    let third = equals(property("c"), integer(3));

    assert_eq!(
        factory.and(factory.and(first.clone(), second.clone()), third.clone()),
        Predicate::And(vec![first, second, third])
    );
}

#[test]
fn or_keeps_conjunction_as_single_child() {
    let factory = DefaultFilterFactory;
    let first = equals(property("a"), integer(1));
    let second = equals(property("b"), integer(2));
    let third = equals(property("c"), integer(3));

    assert_eq!(
        factory.or(factory.and(first.clone(), second.clone()), third.clone()),
        Predicate::Or(vec![Predicate::And(vec![first, second]), third])
    );
}

#[test]
fn or_of_single_predicate_is_the_predicate() {
    let predicate = equals(property("a"), string("x"));

    assert_eq!(DefaultFilterFactory.or_all(vec![predicate.clone()]), predicate);
}

#[test]
fn feature_ids_drop_duplicates_keeping_first_seen_order() {
    let predicate = DefaultFilterFactory.feature_ids(vec!["b".to_owned(), "a".to_owned(), "b".to_owned()]);

    assert_eq!(
        predicate,
        Predicate::FeatureIds(FeatureIdSet::new(vec!["b".to_owned(), "a".to_owned()]))
    );
}

struct CountingFactory {
    negations: std::cell::Cell<usize>,
}

impl FilterFactory for CountingFactory {
    fn not(&self, predicate: Predicate) -> Predicate {
        self.negations.set(self.negations.get() + 1);
        Predicate::Not(Box::new(predicate))
    }
}

#[test]
fn overridden_method_is_used_and_defaults_remain() {
    let factory = CountingFactory {
        negations: std::cell::Cell::new(0),
    };

    let predicate = factory.not(factory.include());

    assert_eq!(predicate, Predicate::Not(Box::new(Predicate::Include)));
    assert_eq!(factory.negations.get(), 1);
}
