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
use std::{sync::Arc, thread};

#[test]
fn compiler_is_shared_between_threads() {
    let compiler = Arc::new(Compiler::ecql());

    let handles = (0..4)
        .map(|value| {
            let compiler = compiler.clone();
            thread::spawn(move || compiler.compile_filter(&format!("X < {}", value)))
        })
        .collect::<Vec<_>>();

    for (value, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Ok(less_than("X", value as i32)));
    }
}

#[test]
fn failed_compile_leaves_compiler_usable() {
    let compiler = Compiler::cql();

    assert!(compiler.compile_filter("X <").is_err());
    assert_eq!(compiler.compile_filter("Z < 4"), Ok(less_than("Z", 4)));
}
