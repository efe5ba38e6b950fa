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

//! Engine-related data types.

use carmgmt_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an engine.
#[derive(AsRef, Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EngineId(Uuid);

impl EngineId {
    /// Generates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier from its textual form as received from clients.
    pub fn parse(s: &str) -> ModelResult<Self> {
        match Uuid::parse_str(s) {
            Ok(uuid) => Ok(Self(uuid)),
            Err(e) => Err(ModelError(format!("invalid engine id '{}': {}", s, e))),
        }
    }
}

impl From<Uuid> for EngineId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Validated technical details of an engine.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct EngineSpec {
    /// Engine displacement.
    displacement: i64,

    /// Number of cylinders.
    no_of_cylinders: i64,

    /// Range of the car when using this engine.
    car_range: i64,
}

impl EngineSpec {
    /// Creates a new spec after validating that all quantities are positive.
    pub fn new(displacement: i64, no_of_cylinders: i64, car_range: i64) -> ModelResult<Self> {
        if displacement <= 0 {
            return Err(ModelError(
                "displacement is required and must be a positive number".to_owned(),
            ));
        }
        if no_of_cylinders <= 0 {
            return Err(ModelError(
                "no of cylinders is required and must be a positive number".to_owned(),
            ));
        }
        if car_range <= 0 {
            return Err(ModelError(
                "car range is required and must be a positive number".to_owned(),
            ));
        }
        Ok(Self { displacement, no_of_cylinders, car_range })
    }
}

/// An engine as stored and returned to clients.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Engine {
    /// Identifier of the engine.
    engine_id: EngineId,

    /// Technical details of the engine.
    #[serde(flatten)]
    spec: EngineSpec,
}

impl Engine {
    /// Creates a new engine from its parts.
    pub fn new(engine_id: EngineId, spec: EngineSpec) -> Self {
        Self { engine_id, spec }
    }
}

/// Payload to create or update an engine.
///
/// Missing fields take their zero value and are rejected by `validate`.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
#[serde(default)]
pub struct EngineRequest {
    /// Engine displacement.
    pub displacement: i64,

    /// Number of cylinders.
    pub no_of_cylinders: i64,

    /// Range of the car when using this engine.
    pub car_range: i64,
}

impl EngineRequest {
    /// Validates the request and returns the engine details it describes.
    pub fn validate(self) -> ModelResult<EngineSpec> {
        EngineSpec::new(self.displacement, self.no_of_cylinders, self.car_range)
    }
}
