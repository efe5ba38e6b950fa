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

//! Business logic for the car and engine catalog.

use carmgmt_core::clocks::Clock;
use carmgmt_core::db::{Db, DbError};
use carmgmt_core::driver::DriverError;
use std::sync::Arc;

mod cars;
mod engines;
#[cfg(test)]
pub(crate) mod testutils;

/// Converts a database error into a driver error, naming the missing `entity` on lookups that
/// found nothing.
fn not_found_as(entity: &'static str) -> impl FnOnce(DbError) -> DriverError {
    move |e| match e {
        DbError::NotFound => DriverError::NotFound(format!("{} not found", entity)),
        e => e.into(),
    }
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub fn new(db: Arc<dyn Db + Send + Sync>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }
}
