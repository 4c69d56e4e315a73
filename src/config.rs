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

use crate::Dialect;
use log::LevelFilter;
use std::env;

const DIALECT_VARIABLE: &str = "CQL_DIALECT";
const LOG_VARIABLE: &str = "CQL_LOG";

/// Settings picked up from the environment: `CQL_DIALECT` (`cql` or `ecql`) and `CQL_LOG`
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct CompilerConfiguration {
    dialect: Dialect,
    log_level: LevelFilter,
}

impl CompilerConfiguration {
    pub fn new(dialect: Dialect, log_level: LevelFilter) -> CompilerConfiguration {
        CompilerConfiguration { dialect, log_level }
    }

    pub fn from_env() -> CompilerConfiguration {
        CompilerConfiguration::from_values(env::var(DIALECT_VARIABLE).ok(), env::var(LOG_VARIABLE).ok())
    }

    pub(crate) fn from_values(dialect: Option<String>, log_level: Option<String>) -> CompilerConfiguration {
        let dialect = match dialect {
            Some(name) => match Dialect::from_name(name.trim()) {
                Some(dialect) => dialect,
                None => {
                    log::warn!("unknown dialect {:?} in {}, using ECQL", name, DIALECT_VARIABLE);
                    Dialect::Ecql
                }
            },
            None => Dialect::Ecql,
        };
        let log_level = match log_level {
            Some(level) => level.trim().parse().unwrap_or(LevelFilter::Warn),
            None => LevelFilter::Warn,
        };
        CompilerConfiguration { dialect, log_level }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

impl Default for CompilerConfiguration {
    fn default() -> CompilerConfiguration {
        CompilerConfiguration::new(Dialect::Ecql, LevelFilter::Warn)
    }
}
