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

//! API to list all engines.

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
    let engines = driver.list_engines().await?;
    Ok(Json(engines))
}

#[cfg(test)]
mod tests {
    use crate::model::Engine;
    use crate::rest::testutils::*;
    use axum::http;
    use carmgmt_core::rest::testutils::OneShotBuilder;
    use carmgmt_core::test_payload_must_be_empty;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/engines".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let engine1 = context.create_engine(1000).await;
        let engine2 = context.create_engine(2000).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_json::<Vec<Engine>>()
            .await;
        assert_eq!(2, response.len());
        assert!(response.contains(&engine1));
        assert!(response.contains(&engine2));
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_bearer_auth(context.access_token().await)
            .send_empty()
            .await
            .expect_json::<Vec<Engine>>()
            .await;
        assert!(response.is_empty());
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.app(),
        route(),
        TestContext::setup().await.access_token().await
    );
}
