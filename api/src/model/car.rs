// Car Management
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Car-related data types.

use crate::model::{EngineId, EngineSpec};
use carmgmt_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Year of the first production car, before which no car can have been built.
const FIRST_CAR_YEAR: i32 = 1886;

/// Identifier of a car.
#[derive(AsRef, Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CarId(Uuid);

impl CarId {
    /// Generates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier from its textual form as received from clients.
    pub fn parse(s: &str) -> ModelResult<Self> {
        match Uuid::parse_str(s) {
            Ok(uuid) => Ok(Self(uuid)),
            Err(e) => Err(ModelError(format!("invalid car id '{}': {}", s, e))),
        }
    }
}

impl From<Uuid> for CarId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Types of fuel a car can run on.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FuelType {
    /// Petrol.
    Petrol,

    /// Diesel.
    Diesel,

    /// Electric.
    Electric,

    /// Hybrid.
    Hybrid,
}

impl FuelType {
    /// Parses a fuel type from its exact, case-sensitive name.
    pub fn parse(s: &str) -> ModelResult<Self> {
        match s {
            "Petrol" => Ok(FuelType::Petrol),
            "Diesel" => Ok(FuelType::Diesel),
            "Electric" => Ok(FuelType::Electric),
            "Hybrid" => Ok(FuelType::Hybrid),
            _ => Err(ModelError(
                "fuel type must be Petrol, Diesel, Electric, or Hybrid".to_owned(),
            )),
        }
    }

    /// Returns the name of the fuel type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
            FuelType::Hybrid => "Hybrid",
        }
    }
}

/// Validated contents of a car, minus the fields assigned by the server.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct CarSpec {
    /// Model name.
    name: String,

    /// Year of manufacture, as a decimal string.
    year: String,

    /// Manufacturer.
    brand: String,

    /// Fuel the car runs on.
    fuel_type: FuelType,

    /// Engine the car is built with.
    engine_id: EngineId,

    /// Price of the car.
    price: f64,
}

impl CarSpec {
    /// Assembles a spec from values that were validated before they were stored.
    pub(crate) fn from_stored(
        name: String,
        year: String,
        brand: String,
        fuel_type: FuelType,
        engine_id: EngineId,
        price: f64,
    ) -> Self {
        Self { name, year, brand, fuel_type, engine_id, price }
    }
}

/// Reference to the engine of a car, optionally with the engine's details.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct CarEngine {
    /// Identifier of the engine.
    engine_id: EngineId,

    /// Details of the engine, present only when they were looked up.
    #[serde(flatten)]
    spec: Option<EngineSpec>,
}

/// A car as stored and returned to clients.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Car {
    /// Identifier of the car.
    id: CarId,

    /// Model name.
    name: String,

    /// Year of manufacture, as a decimal string.
    year: String,

    /// Manufacturer.
    brand: String,

    /// Fuel the car runs on.
    fuel_type: FuelType,

    /// Engine the car is built with.
    engine: CarEngine,

    /// Price of the car.
    price: f64,

    /// Time the car was created.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,

    /// Time the car was last modified.
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl Car {
    /// Creates a new car from its validated `spec` and the server-assigned fields.
    ///
    /// `engine` carries the details of the engine referenced by `spec`, if known.
    pub fn new(
        id: CarId,
        spec: CarSpec,
        engine: Option<EngineSpec>,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name: spec.name,
            year: spec.year,
            brand: spec.brand,
            fuel_type: spec.fuel_type,
            engine: CarEngine { engine_id: spec.engine_id, spec: engine },
            price: spec.price,
            created_at,
            updated_at,
        }
    }

    /// Drops the details of the engine, keeping only its identifier.
    #[cfg(test)]
    pub(crate) fn without_engine_details(mut self) -> Self {
        self.engine.spec = None;
        self
    }
}

/// Engine reference in a car payload.
///
/// The details are validated alongside the rest of the car but are not stored with it.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Clone, Serialize))]
#[serde(default)]
pub struct CarEngineRequest {
    /// Identifier of the engine.  The nil UUID stands for a missing value.
    pub engine_id: Uuid,

    /// Engine displacement.
    pub displacement: i64,

    /// Number of cylinders.
    pub no_of_cylinders: i64,

    /// Range of the car when using this engine.
    pub car_range: i64,
}

/// Payload to create or update a car.
///
/// Missing fields take their zero value and are rejected by `validate`.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Clone, Serialize))]
#[serde(default)]
pub struct CarRequest {
    /// Model name.
    pub name: String,

    /// Year of manufacture.
    pub year: String,

    /// Manufacturer.
    pub brand: String,

    /// Fuel the car runs on.
    pub fuel_type: String,

    /// Engine the car is built with.
    pub engine: CarEngineRequest,

    /// Price of the car.
    pub price: f64,
}

impl CarRequest {
    /// Validates the request at time `now` and returns the car it describes.
    ///
    /// Checks run in a fixed order and the first failure is reported.
    pub fn validate(self, now: OffsetDateTime) -> ModelResult<CarSpec> {
        if self.name.is_empty() {
            return Err(ModelError("name is required".to_owned()));
        }

        if self.year.is_empty() {
            return Err(ModelError("year is required".to_owned()));
        }
        let year = match self.year.parse::<i32>() {
            Ok(year) => year,
            Err(_) => return Err(ModelError("year must be a number".to_owned())),
        };
        let current_year = now.year();
        if !(FIRST_CAR_YEAR..=current_year).contains(&year) {
            return Err(ModelError(format!(
                "year must be between {} and {}",
                FIRST_CAR_YEAR, current_year
            )));
        }

        if self.brand.is_empty() {
            return Err(ModelError("brand is required".to_owned()));
        }

        let fuel_type = FuelType::parse(&self.fuel_type)?;

        if self.engine.engine_id.is_nil() {
            return Err(ModelError("engine id is required and must be a valid uuid".to_owned()));
        }
        EngineSpec::new(
            self.engine.displacement,
            self.engine.no_of_cylinders,
            self.engine.car_range,
        )?;

        if self.price.is_nan() || self.price <= 0.0 {
            return Err(ModelError("price is required and must be a positive number".to_owned()));
        }

        Ok(CarSpec {
            name: self.name,
            year: self.year,
            brand: self.brand,
            fuel_type,
            engine_id: EngineId::from(self.engine.engine_id),
            price: self.price,
        })
    }
}

/// Test utilities for cars.
#[cfg(test)]
pub(crate) mod testutils {
    use super::*;

    /// Returns a valid request for a car that uses `engine_id`.
    pub(crate) fn car_request(engine_id: EngineId) -> CarRequest {
        CarRequest {
            name: "Model 3".to_owned(),
            year: "2020".to_owned(),
            brand: "Tesla".to_owned(),
            fuel_type: "Electric".to_owned(),
            engine: CarEngineRequest {
                engine_id: *engine_id.as_ref(),
                displacement: 1,
                no_of_cylinders: 1,
                car_range: 500,
            },
            price: 45000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use time::macros::datetime;

    /// Fixed time at which validations happen.
    const NOW: OffsetDateTime = datetime!(2024-06-15 12:00:00 UTC);

    /// Validates `request` and returns the error message, which must exist.
    fn validation_error(request: CarRequest) -> String {
        request.validate(NOW).unwrap_err().0
    }

    #[test]
    fn test_car_id_parse() {
        let id = CarId::parse("0b6f0e4e-7f5d-4d36-9f0c-2a8c1c4f8e11").unwrap();
        assert_eq!("0b6f0e4e-7f5d-4d36-9f0c-2a8c1c4f8e11", id.to_string());

        let err = CarId::parse("1234").unwrap_err();
        assert!(err.0.starts_with("invalid car id '1234'"));
    }

    #[test]
    fn test_fuel_type_parse() {
        for fuel_type in [FuelType::Petrol, FuelType::Diesel, FuelType::Electric, FuelType::Hybrid]
        {
            assert_eq!(fuel_type, FuelType::parse(fuel_type.as_str()).unwrap());
        }
        FuelType::parse("petrol").unwrap_err();
        FuelType::parse("Hydrogen").unwrap_err();
        FuelType::parse("").unwrap_err();
    }

    #[test]
    fn test_validate_ok() {
        let engine_id = EngineId::generate();
        let spec = car_request(engine_id).validate(NOW).unwrap();
        assert_eq!("Model 3", spec.name());
        assert_eq!("2020", spec.year());
        assert_eq!("Tesla", spec.brand());
        assert_eq!(FuelType::Electric, *spec.fuel_type());
        assert_eq!(engine_id, *spec.engine_id());
        assert_eq!(45000.0, *spec.price());
    }

    #[test]
    fn test_validate_name() {
        let request = CarRequest { name: "".to_owned(), ..car_request(EngineId::generate()) };
        assert_eq!("name is required", validation_error(request));
    }

    #[test]
    fn test_validate_year() {
        let base = car_request(EngineId::generate());

        let request = CarRequest { year: "".to_owned(), ..base.clone() };
        assert_eq!("year is required", validation_error(request));

        let request = CarRequest { year: "twenty".to_owned(), ..base.clone() };
        assert_eq!("year must be a number", validation_error(request));

        let request = CarRequest { year: "1885".to_owned(), ..base.clone() };
        assert_eq!("year must be between 1886 and 2024", validation_error(request));

        let request = CarRequest { year: "2025".to_owned(), ..base.clone() };
        assert_eq!("year must be between 1886 and 2024", validation_error(request));

        for year in ["1886", "2024"] {
            let request = CarRequest { year: year.to_owned(), ..base.clone() };
            request.validate(NOW).unwrap();
        }
    }

    #[test]
    fn test_validate_year_follows_clock() {
        let request = CarRequest { year: "2025".to_owned(), ..car_request(EngineId::generate()) };
        request.validate(datetime!(2025-01-01 00:00:00 UTC)).unwrap();
    }

    #[test]
    fn test_validate_brand() {
        let request = CarRequest { brand: "".to_owned(), ..car_request(EngineId::generate()) };
        assert_eq!("brand is required", validation_error(request));
    }

    #[test]
    fn test_validate_fuel_type() {
        let request =
            CarRequest { fuel_type: "Steam".to_owned(), ..car_request(EngineId::generate()) };
        assert_eq!(
            "fuel type must be Petrol, Diesel, Electric, or Hybrid",
            validation_error(request)
        );
    }

    #[test]
    fn test_validate_engine() {
        let base = car_request(EngineId::generate());

        let mut request = base.clone();
        request.engine.engine_id = Uuid::nil();
        assert_eq!("engine id is required and must be a valid uuid", validation_error(request));

        let mut request = base.clone();
        request.engine.displacement = 0;
        assert_eq!(
            "displacement is required and must be a positive number",
            validation_error(request)
        );

        let mut request = base.clone();
        request.engine.no_of_cylinders = -1;
        assert_eq!(
            "no of cylinders is required and must be a positive number",
            validation_error(request)
        );

        let mut request = base;
        request.engine.car_range = 0;
        assert_eq!(
            "car range is required and must be a positive number",
            validation_error(request)
        );
    }

    #[test]
    fn test_validate_price() {
        let base = car_request(EngineId::generate());
        for price in [0.0, -1.0, f64::NAN] {
            let request = CarRequest { price, ..base.clone() };
            assert_eq!(
                "price is required and must be a positive number",
                validation_error(request)
            );
        }
    }

    #[test]
    fn test_validate_first_failure_wins() {
        let request = CarRequest {
            name: "".to_owned(),
            year: "abc".to_owned(),
            fuel_type: "Steam".to_owned(),
            price: -5.0,
            ..CarRequest::default()
        };
        assert_eq!("name is required", validation_error(request));

        let request = CarRequest {
            name: "X".to_owned(),
            year: "1900".to_owned(),
            brand: "".to_owned(),
            fuel_type: "Steam".to_owned(),
            ..CarRequest::default()
        };
        assert_eq!("brand is required", validation_error(request));
    }

    #[test]
    fn test_validate_empty_payload() {
        let request: CarRequest = serde_json::from_str("{}").unwrap();
        assert_eq!("name is required", validation_error(request));
    }

    #[test]
    fn test_car_json_shape() {
        let engine_id = EngineId::parse("6f1c1a3e-30a1-4f4a-8d8c-4fd1d7a4a5b2").unwrap();
        let id = CarId::parse("0b6f0e4e-7f5d-4d36-9f0c-2a8c1c4f8e11").unwrap();
        let spec = car_request(engine_id).validate(NOW).unwrap();
        let car = Car::new(id, spec, None, NOW, NOW);

        assert_eq!(
            serde_json::json!({
                "id": "0b6f0e4e-7f5d-4d36-9f0c-2a8c1c4f8e11",
                "name": "Model 3",
                "year": "2020",
                "brand": "Tesla",
                "fuel_type": "Electric",
                "engine": {"engine_id": "6f1c1a3e-30a1-4f4a-8d8c-4fd1d7a4a5b2"},
                "price": 45000.0,
                "created_at": "2024-06-15T12:00:00Z",
                "updated_at": "2024-06-15T12:00:00Z",
            }),
            serde_json::to_value(&car).unwrap()
        );
    }

    #[test]
    fn test_car_json_shape_with_engine() {
        let engine_id = EngineId::generate();
        let spec = car_request(engine_id).validate(NOW).unwrap();
        let engine = EngineSpec::new(1, 2, 3).unwrap();
        let car = Car::new(CarId::generate(), spec, Some(engine), NOW, NOW);

        let value = serde_json::to_value(&car).unwrap();
        assert_eq!(
            serde_json::json!({
                "engine_id": engine_id.to_string(),
                "displacement": 1,
                "no_of_cylinders": 2,
                "car_range": 3,
            }),
            value["engine"]
        );
    }
}
