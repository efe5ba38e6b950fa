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

//! Extends the driver with the operations on cars.

use crate::db;
use crate::driver::{Driver, not_found_as};
use crate::model::{Car, CarId, CarRequest, Engine, EngineId};
use carmgmt_core::db::{DbError, Executor};
use carmgmt_core::driver::{DriverError, DriverResult};

/// Looks up the engine that a car being written references.
///
/// A missing engine is a problem with the request, not with the car, so it is reported as
/// invalid input.
async fn get_referenced_engine(ex: &mut Executor, id: EngineId) -> DriverResult<Engine> {
    match db::get_engine(ex, id).await {
        Ok(engine) => Ok(engine),
        Err(DbError::NotFound) => Err(DriverError::InvalidInput("engine not found".to_owned())),
        Err(e) => Err(e.into()),
    }
}

impl Driver {
    /// Creates a new car as described by `request` and returns it.
    pub async fn create_car(self, request: CarRequest) -> DriverResult<Car> {
        let now = self.clock.now_utc();
        let spec = request.validate(now)?;

        let mut tx = self.db.begin().await?;
        let engine = get_referenced_engine(tx.ex(), *spec.engine_id()).await?;
        let id = CarId::generate();
        db::create_car(tx.ex(), id, &spec, now).await?;
        tx.commit().await?;

        Ok(Car::new(id, spec, Some(engine.spec().clone()), now, now))
    }

    /// Gets the car identified by `id`.
    pub async fn get_car(self, id: CarId) -> DriverResult<Car> {
        let mut tx = self.db.begin().await?;
        let car = db::get_car(tx.ex(), id).await.map_err(not_found_as("car"))?;
        tx.commit().await?;
        Ok(car)
    }

    /// Gets all cars made by `brand`, with the details of their engines if `include_engine`.
    pub async fn get_cars_by_brand(
        self,
        brand: String,
        include_engine: bool,
    ) -> DriverResult<Vec<Car>> {
        let mut tx = self.db.begin().await?;
        let cars = db::get_cars_by_brand(tx.ex(), &brand, include_engine).await?;
        tx.commit().await?;
        Ok(cars)
    }

    /// Gets all cars.
    pub async fn list_cars(self) -> DriverResult<Vec<Car>> {
        let mut tx = self.db.begin().await?;
        let cars = db::list_cars(tx.ex()).await?;
        tx.commit().await?;
        Ok(cars)
    }

    /// Replaces the contents of the car identified by `id` with `request` and returns the
    /// updated car.
    pub async fn update_car(self, id: CarId, request: CarRequest) -> DriverResult<Car> {
        let now = self.clock.now_utc();
        let spec = request.validate(now)?;

        let mut tx = self.db.begin().await?;
        get_referenced_engine(tx.ex(), *spec.engine_id()).await?;
        db::update_car(tx.ex(), id, &spec, now).await.map_err(not_found_as("car"))?;
        let car = db::get_car(tx.ex(), id).await.map_err(not_found_as("car"))?;
        tx.commit().await?;

        Ok(car)
    }

    /// Deletes the car identified by `id`.
    pub async fn delete_car(self, id: CarId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_car(tx.ex(), id).await.map_err(not_found_as("car"))?;
        tx.commit().await?;
        Ok(())
    }
}
