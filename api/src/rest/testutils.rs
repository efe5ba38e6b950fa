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

//! Test utilities for the REST interface.

use crate::driver::Driver;
use crate::model::testutils::car_request;
use crate::model::{Car, Engine};
use crate::rest::app;
use axum::Router;
use carmgmt_core::clocks::testutils::SettableClock;
use carmgmt_core::rest::HttpMetrics;
use std::sync::Arc;

/// Identifier that no test entity ever gets.
pub(crate) const MISSING_ID: &str = "9d0c1f5e-0000-4000-8000-000000000000";

/// State of a running test.
pub(crate) struct TestContext {
    /// Context for the catalog's business logic.
    driver: crate::driver::testutils::TestContext,

    /// Context for the authentication logic, sharing the clock with `driver`.
    authn: carmgmt_authn::driver::testutils::TestContext,

    /// Metrics collected by the routers created by `app`.
    metrics: HttpMetrics,
}

impl TestContext {
    /// Initializes the drivers with an in-memory database and a single clock.
    pub(crate) async fn setup() -> Self {
        let clock = Arc::from(SettableClock::new(crate::driver::testutils::TEST_START_TIME));
        let authn = carmgmt_authn::driver::testutils::TestContext::setup_with(clock.clone());
        let driver = crate::driver::testutils::TestContext::setup_with(clock).await;
        Self { driver, authn, metrics: HttpMetrics::new() }
    }

    /// Creates a router for the application under test.
    pub(crate) fn app(&self) -> Router {
        app(self.driver.driver(), self.authn.driver(), self.metrics.clone())
    }

    /// Gets the clock shared by all drivers.
    pub(crate) fn clock(&self) -> &SettableClock {
        self.driver.clock()
    }

    /// Gets a copy of the catalog driver.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.driver()
    }

    /// Logs the test user in and returns the token to send in the `Authorization` header.
    pub(crate) async fn access_token(&self) -> String {
        self.authn.login().await.as_str().to_owned()
    }

    /// Syntactic sugar to create an engine with the given `displacement`.
    pub(crate) async fn create_engine(&self, displacement: i64) -> Engine {
        self.driver.create_engine(displacement).await
    }

    /// Syntactic sugar to create a car of `brand` that uses `engine`.
    pub(crate) async fn create_car(&self, brand: &str, engine: &Engine) -> Car {
        let mut request = car_request(*engine.engine_id());
        request.brand = brand.to_owned();
        self.driver().create_car(request).await.unwrap()
    }
}

/// Returns a valid engine payload.
pub(crate) fn engine_json(displacement: i64) -> serde_json::Value {
    serde_json::json!({
        "displacement": displacement,
        "no_of_cylinders": 4,
        "car_range": 600,
    })
}

/// Returns a valid car payload that references the engine `engine_id`.
pub(crate) fn car_json(engine_id: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Model 3",
        "year": "2020",
        "brand": "Tesla",
        "fuel_type": "Electric",
        "engine": {
            "engine_id": engine_id,
            "displacement": 1,
            "no_of_cylinders": 1,
            "car_range": 500,
        },
        "price": 45000.0,
    })
}
