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

//! High-level data types.
//!
//! Requests arrive as loosely-typed structures that mirror the JSON payloads.  Validating them
//! yields the strongly-typed specs that the lower layers operate on, so the database never sees
//! unvalidated data.

mod car;
mod engine;

pub use car::{Car, CarEngine, CarEngineRequest, CarId, CarRequest, CarSpec, FuelType};
pub use engine::{Engine, EngineId, EngineRequest, EngineSpec};

#[cfg(test)]
pub(crate) use car::testutils;
