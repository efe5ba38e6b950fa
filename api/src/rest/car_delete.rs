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

//! API to delete a car.

use crate::driver::Driver;
use crate::model::CarId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use carmgmt_authn::rest::Whoami;
use carmgmt_core::rest::{EmptyBody, RestResult};
use log::info;

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    Whoami(username): Whoami,
    _: EmptyBody,
) -> RestResult<StatusCode> {
    let id = CarId::parse(&id)?;
    driver.delete_car(id).await?;
    info!("User {} deleted car {}", username, id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use carmgmt_core::driver::DriverError;
    use carmgmt_core::rest::testutils::OneShotBuilder;
    use carmgmt_core::test_payload_must_be_empty;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::DELETE, format!("/cars/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let engine = context.create_engine(1600).await;
        let car = context.create_car("Tesla", &engine).await;

        OneShotBuilder::new(context.app(), route(&car.id().to_string()))
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert_eq!(
            DriverError::NotFound("car not found".to_owned()),
            context.driver().get_car(*car.id()).await.unwrap_err()
        );
        context.driver().get_engine(*engine.engine_id()).await.unwrap();
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(MISSING_ID))
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("car not found")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("x"))
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("invalid car id 'x'")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.app(),
        route(MISSING_ID),
        TestContext::setup().await.access_token().await
    );
}
