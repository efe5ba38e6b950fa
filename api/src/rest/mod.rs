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

//! REST interface for the car and engine catalog.

use crate::driver::Driver;
use axum::Router;
use axum::middleware::from_fn_with_state;
use carmgmt_authn::driver::AuthnDriver;
use carmgmt_authn::rest::require_auth;
use carmgmt_core::rest::{HttpMetrics, metrics_handler, track_metrics};

mod brand_cars_get;
mod car_delete;
mod car_get;
mod car_put;
mod cars_get;
mod cars_post;
mod engine_delete;
mod engine_get;
mod engine_put;
mod engines_get;
mod engines_post;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
///
/// Every car and engine API sits behind bearer authentication issued by `authn`.  The login and
/// metrics endpoints are public.  All routes are tracked in `metrics`.
pub fn app(driver: Driver, authn: AuthnDriver, metrics: HttpMetrics) -> Router {
    use axum::routing::get;

    let catalog = Router::new()
        .route("/cars", get(cars_get::handler).post(cars_post::handler))
        .route(
            "/cars/:id",
            get(car_get::handler).put(car_put::handler).delete(car_delete::handler),
        )
        .route("/cars/brand/:brand", get(brand_cars_get::handler))
        .route("/engines", get(engines_get::handler).post(engines_post::handler))
        .route(
            "/engines/:id",
            get(engine_get::handler).put(engine_put::handler).delete(engine_delete::handler),
        )
        .route_layer(from_fn_with_state(authn.clone(), require_auth))
        .with_state(driver);

    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics.clone())
        .merge(carmgmt_authn::rest::app(authn))
        .merge(catalog)
        .route_layer(from_fn_with_state(metrics, track_metrics))
}
