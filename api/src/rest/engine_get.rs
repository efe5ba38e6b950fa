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

//! API to get a single engine.

use crate::driver::Driver;
use crate::model::EngineId;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use carmgmt_core::rest::{EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let id = EngineId::parse(&id)?;
    let engine = driver.get_engine(id).await?;
    Ok(Json(engine))
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use carmgmt_core::rest::testutils::OneShotBuilder;
    use carmgmt_core::test_payload_must_be_empty;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/engines/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let engine = context.create_engine(1400).await;

        let response = OneShotBuilder::new(context.app(), route(&engine.engine_id().to_string()))
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(
            serde_json::json!({
                "engine_id": engine.engine_id().to_string(),
                "displacement": 1400,
                "no_of_cylinders": 4,
                "car_range": 600,
            }),
            response
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(MISSING_ID))
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("engine not found")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("abc"))
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("invalid engine id 'abc'")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.app(),
        route(MISSING_ID),
        TestContext::setup().await.access_token().await
    );
}
