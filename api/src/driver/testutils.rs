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

//! Test utilities for the business logic.

use crate::db;
use crate::driver::Driver;
use crate::model::{Engine, EngineRequest};
use carmgmt_core::clocks::testutils::SettableClock;
use carmgmt_core::db::{Db, Executor};
use std::sync::Arc;
use time::OffsetDateTime;
use time::macros::datetime;

/// Instant at which test clocks start.
pub(crate) const TEST_START_TIME: OffsetDateTime = datetime!(2024-05-01 10:00:00 UTC);

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the driver, which tests can move at will.
    clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver with an in-memory database and a clock set to `TEST_START_TIME`.
    pub(crate) async fn setup() -> Self {
        Self::setup_with(Arc::from(SettableClock::new(TEST_START_TIME))).await
    }

    /// Initializes the driver with an in-memory database and the given `clock`.
    pub(crate) async fn setup_with(clock: Arc<SettableClock>) -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::from(carmgmt_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    /// Gets the clock used by the driver.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Gets a copy of the driver.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Syntactic sugar to create an engine with the given `displacement`.
    pub(crate) async fn create_engine(&self, displacement: i64) -> Engine {
        let request = EngineRequest { displacement, no_of_cylinders: 4, car_range: 600 };
        self.driver().create_engine(request).await.unwrap()
    }
}
