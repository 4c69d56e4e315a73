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

use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

const EPSG_AUTHORITY: &str = "EPSG";

const WELL_KNOWN: &[(i32, &str)] = &[
    (2154, "RGF93 / Lambert-93"),
    (3035, "ETRS89-extended / LAEA Europe"),
    (3857, "WGS 84 / Pseudo-Mercator"),
    (4258, "ETRS89"),
    (4269, "NAD83"),
    (4326, "WGS 84"),
    (27700, "OSGB 1936 / British National Grid"),
    (900913, "Google Maps Global Mercator"),
];

const UTM_NORTH: i32 = 32600;
const UTM_SOUTH: i32 = 32700;
const UTM_ZONES: i32 = 60;

/// Resolved coordinate reference system handle
#[derive(Debug, PartialEq, Clone)]
pub struct Crs {
    srid: i32,
    name: String,
}

impl Crs {
    pub fn new<N: ToString>(srid: i32, name: N) -> Crs {
        Crs {
            srid,
            name: name.to_string(),
        }
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn code(&self) -> String {
        format!("{}:{}", EPSG_AUTHORITY, self.srid)
    }

    /// Accepts `EPSG:4326` (any case) or a bare `4326`
    pub fn parse_code(code: &str) -> Option<i32> {
        let code = code.trim();
        let number = match code.find(':') {
            Some(index) if code[..index].eq_ignore_ascii_case(EPSG_AUTHORITY) => &code[index + 1..],
            Some(_) => return None,
            None => code,
        };
        number.trim().parse().ok()
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name)
    }
}

pub trait CrsResolver {
    fn resolve(&self, srid: i32) -> Result<Crs, CrsError>;
}

#[derive(Debug, Clone)]
pub struct EpsgRegistry {
    known: HashMap<i32, String>,
}

impl EpsgRegistry {
    pub fn empty() -> EpsgRegistry {
        EpsgRegistry { known: HashMap::new() }
    }

    pub fn register<N: ToString>(&mut self, srid: i32, name: N) {
        self.known.insert(srid, name.to_string());
    }

    fn utm_zone(srid: i32) -> Option<String> {
        if srid > UTM_NORTH && srid <= UTM_NORTH + UTM_ZONES {
            Some(format!("WGS 84 / UTM zone {}N", srid - UTM_NORTH))
        } else if srid > UTM_SOUTH && srid <= UTM_SOUTH + UTM_ZONES {
            Some(format!("WGS 84 / UTM zone {}S", srid - UTM_SOUTH))
        } else {
            None
        }
    }
}

impl Default for EpsgRegistry {
    fn default() -> EpsgRegistry {
        let mut registry = EpsgRegistry::empty();
        for (srid, name) in WELL_KNOWN {
            registry.register(*srid, name);
        }
        registry
    }
}

impl CrsResolver for EpsgRegistry {
    fn resolve(&self, srid: i32) -> Result<Crs, CrsError> {
        if srid <= 0 {
            return Err(CrsError::invalid_code(srid));
        }
        let resolved = self
            .known
            .get(&srid)
            .cloned()
            .or_else(|| EpsgRegistry::utm_zone(srid))
            .map(|name| Crs::new(srid, name));
        match resolved {
            Some(crs) => {
                log::trace!("resolved SRID {} to {}", srid, crs);
                Ok(crs)
            }
            None => Err(CrsError::unknown_code(srid)),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum CrsError {
    InvalidCode(i32),
    UnknownCode(i32),
}

impl CrsError {
    pub fn invalid_code(srid: i32) -> CrsError {
        CrsError::InvalidCode(srid)
    }

    pub fn unknown_code(srid: i32) -> CrsError {
        CrsError::UnknownCode(srid)
    }
}

impl Display for CrsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CrsError::InvalidCode(srid) => write!(f, "{} is not a valid {} code", srid, EPSG_AUTHORITY),
            CrsError::UnknownCode(srid) => write!(
                f,
                "no coordinate reference system registered for {}:{}",
                EPSG_AUTHORITY, srid
            ),
        }
    }
}

impl std::error::Error for CrsError {}

#[cfg(test)]
mod tests;
