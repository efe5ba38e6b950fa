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

//! API to list all cars.

use crate::driver::Driver;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use carmgmt_core::rest::{EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let cars = driver.list_cars().await?;
    Ok(Json(cars))
}

#[cfg(test)]
mod tests {
    use crate::model::Car;
    use crate::rest::testutils::*;
    use axum::http;
    use carmgmt_core::rest::testutils::OneShotBuilder;
    use carmgmt_core::test_payload_must_be_empty;
    use std::time::Duration;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/cars".to_owned())
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_json::<Vec<Car>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_ordered_by_creation() {
        let context = TestContext::setup().await;
        let engine = context.create_engine(2000).await;
        let car1 = context.create_car("Tesla", &engine).await;
        context.clock().advance(Duration::from_secs(1));
        let car2 = context.create_car("Ford", &engine).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_json::<Vec<Car>>()
            .await;
        assert_eq!(vec![car1, car2], response);
    }

    #[tokio::test]
    async fn test_includes_engine_details() {
        let context = TestContext::setup().await;
        let engine = context.create_engine(2000).await;
        context.create_car("Tesla", &engine).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_status(http::StatusCode::OK)
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(2000, response[0]["engine"]["displacement"]);
        assert_eq!(engine.engine_id().to_string(), response[0]["engine"]["engine_id"]);
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.app(),
        route(),
        TestContext::setup().await.access_token().await
    );
}
