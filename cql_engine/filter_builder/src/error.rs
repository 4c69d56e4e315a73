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

use crate::stack::StackDefect;
use diagnostics::CompileError;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Debug, PartialEq)]
pub enum BuildError {
    Compile(CompileError),
    Defect(StackDefect),
}

impl From<CompileError> for BuildError {
    fn from(error: CompileError) -> BuildError {
        BuildError::Compile(error)
    }
}

impl From<StackDefect> for BuildError {
    fn from(defect: StackDefect) -> BuildError {
        BuildError::Defect(defect)
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Compile(error) => write!(f, "{}", error),
            BuildError::Defect(defect) => write!(f, "internal compiler defect: {}", defect),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BuildError::Compile(error) => error.source(),
            BuildError::Defect(_) => None,
        }
    }
}
