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

//! API to obtain an access token for the configured user.

use crate::driver::AuthnDriver;
use crate::model::AccessToken;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use carmgmt_core::driver::DriverError;
use carmgmt_core::rest::{JsonBody, RestError};
use serde::{Deserialize, Serialize};

/// Message sent to the server to log in.
///
/// Fields are plain strings so that malformed or missing credentials are rejected as invalid
/// credentials rather than as a bad request.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
#[serde(default)]
pub(crate) struct LoginRequest {
    /// Name of the user logging in.
    pub(crate) username: String,

    /// Password of the user logging in.
    pub(crate) password: String,
}

/// Message returned by the server after a successful login attempt.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct LoginResponse {
    /// Access token for this session.
    pub(crate) token: AccessToken,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<AuthnDriver>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, RestError> {
    let realm = driver.realm();
    let token = match driver.login(&request.username, &request.password).await {
        Ok(token) => token,
        Err(DriverError::Unauthorized(message)) => {
            return Err(RestError::Unauthorized { scheme: "Bearer", realm, message });
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(LoginResponse { token }))
}
