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

#[rstest::rstest(
    srid,
    name,
    case::wgs_84(4326, "WGS 84"),
    case::pseudo_mercator(3857, "WGS 84 / Pseudo-Mercator"),
    case::utm_north(32633, "WGS 84 / UTM zone 33N"),
    case::utm_south(32760, "WGS 84 / UTM zone 60S")
)]
fn resolve_well_known(srid: i32, name: &str) {
    assert_eq!(EpsgRegistry::default().resolve(srid), Ok(Crs::new(srid, name)));
}

#[test]
fn unknown_code() {
    assert_eq!(EpsgRegistry::default().resolve(32661), Err(CrsError::unknown_code(32661)));
}

#[test]
fn negative_code() {
    assert_eq!(EpsgRegistry::default().resolve(-1), Err(CrsError::invalid_code(-1)));
}

#[test]
fn registered_code() {
    let mut registry = EpsgRegistry::empty();
    registry.register(31370, "Belge 1972 / Belgian Lambert 72");

    assert_eq!(
        registry.resolve(31370).map(|crs| crs.code()),
        Ok("EPSG:31370".to_owned())
    );
    assert_eq!(registry.resolve(4326), Err(CrsError::unknown_code(4326)));
}

#[rstest::rstest(
    code,
    expected,
    case::authority("EPSG:4326", Some(4326)),
    case::lower_case("epsg:3857", Some(3857)),
    case::bare(" 27700 ", Some(27700)),
    case::other_authority("CRS:84", None),
    case::not_a_number("EPSG:WGS84", None)
)]
fn parse_code(code: &str, expected: Option<i32>) {
    assert_eq!(Crs::parse_code(code), expected);
}

#[test]
fn resolved_name_and_display() {
    let crs = EpsgRegistry::default().resolve(27700).unwrap();

    assert_eq!(crs.name(), "OSGB 1936 / British National Grid");
    assert_eq!(crs.srid(), 27700);
    assert_eq!(crs.to_string(), "EPSG:27700 (OSGB 1936 / British National Grid)");
}
