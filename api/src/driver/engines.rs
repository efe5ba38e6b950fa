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

//! Extends the driver with the operations on engines.

use crate::db;
use crate::driver::{Driver, not_found_as};
use crate::model::{Engine, EngineId, EngineRequest};
use carmgmt_core::db::DbError;
use carmgmt_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Creates a new engine as described by `request` and returns it.
    pub async fn create_engine(self, request: EngineRequest) -> DriverResult<Engine> {
        let engine = Engine::new(EngineId::generate(), request.validate()?);

        let mut tx = self.db.begin().await?;
        db::create_engine(tx.ex(), &engine).await?;
        tx.commit().await?;

        Ok(engine)
    }

    /// Gets the engine identified by `id`.
    pub async fn get_engine(self, id: EngineId) -> DriverResult<Engine> {
        let mut tx = self.db.begin().await?;
        let engine = db::get_engine(tx.ex(), id).await.map_err(not_found_as("engine"))?;
        tx.commit().await?;
        Ok(engine)
    }

    /// Gets all engines.
    pub async fn list_engines(self) -> DriverResult<Vec<Engine>> {
        let mut tx = self.db.begin().await?;
        let engines = db::list_engines(tx.ex()).await?;
        tx.commit().await?;
        Ok(engines)
    }

    /// Replaces the details of the engine identified by `id` with `request` and returns the
    /// updated engine.
    pub async fn update_engine(self, id: EngineId, request: EngineRequest) -> DriverResult<Engine> {
        let engine = Engine::new(id, request.validate()?);

        let mut tx = self.db.begin().await?;
        db::update_engine(tx.ex(), &engine).await.map_err(not_found_as("engine"))?;
        tx.commit().await?;

        Ok(engine)
    }

    /// Deletes the engine identified by `id`, which must not be used by any car.
    pub async fn delete_engine(self, id: EngineId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::lock_engine(tx.ex(), id).await.map_err(not_found_as("engine"))?;
        let count = db::count_cars_by_engine(tx.ex(), id).await?;
        if count > 0 {
            return Err(DriverError::InvalidInput(format!(
                "engine is still referenced by {} car(s)",
                count
            )));
        }
        db::delete_engine(tx.ex(), id).await.map_err(still_referenced)?;
        tx.commit().await?;
        Ok(())
    }
}

/// Maps errors from deleting an engine that is already locked and known to exist.  A `NotFound`
/// at that point can only come from the foreign key check on cars.
fn still_referenced(e: DbError) -> DriverError {
    match e {
        DbError::NotFound => {
            DriverError::InvalidInput("engine is still referenced by some car(s)".to_owned())
        }
        e => e.into(),
    }
}
