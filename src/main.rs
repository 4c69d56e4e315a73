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

use cql::{BuildError, Compiler, CompilerConfiguration};
use simple_logger::SimpleLogger;
use std::{env, process};

const USAGE: &str = "usage: cql [--expression | --list] <statement>";

enum Mode {
    Filter,
    Expression,
    List,
}

fn main() {
    let configuration = CompilerConfiguration::from_env();
    if let Err(error) = SimpleLogger::new().with_level(configuration.log_level()).init() {
        eprintln!("logger is not initialized: {}", error);
    }

    let mut mode = Mode::Filter;
    let mut statement = None;
    for argument in env::args().skip(1) {
        match argument.as_str() {
            "--expression" => mode = Mode::Expression,
            "--list" => mode = Mode::List,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            _ if statement.is_none() => statement = Some(argument),
            _ => {
                eprintln!("{}", USAGE);
                process::exit(2);
            }
        }
    }
    let statement = match statement {
        Some(statement) => statement,
        None => {
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    let compiler = Compiler::from_configuration(&configuration);
    log::info!("compiling with {} dialect", compiler.dialect());
    let outcome = match mode {
        Mode::Filter => compiler.compile_filter(&statement).map(|predicate| vec![predicate.to_string()]),
        Mode::Expression => compiler
            .compile_expression(&statement)
            .map(|expression| vec![expression.to_string()]),
        Mode::List => compiler
            .compile_filter_list(&statement)
            .map(|predicates| predicates.iter().map(ToString::to_string).collect()),
    };
    match outcome {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(BuildError::Compile(error)) => {
            eprintln!("{}", error);
            eprintln!("{}", error.render_caret());
            process::exit(1);
        }
        Err(defect) => {
            eprintln!("{}", defect);
            process::exit(1);
        }
    }
}
