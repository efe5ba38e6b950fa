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

//! Middleware to protect routes behind bearer authentication.

use crate::driver::AuthnDriver;
use crate::rest::get_bearer_auth;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use carmgmt_core::driver::DriverError;
use carmgmt_core::model::Username;
use carmgmt_core::rest::{RestError, RestResult};

/// Identity of the caller of an authenticated request.
///
/// `require_auth` stores this in the request extensions once the access token has been
/// validated, and handlers extract it to know who they act on behalf of.
#[derive(Clone, Debug, PartialEq)]
pub struct Whoami(pub Username);

#[async_trait]
impl<S> FromRequestParts<S> for Whoami
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Whoami>() {
            Some(whoami) => Ok(whoami.clone()),
            None => Err(RestError::InternalError(
                "Route is not protected by authentication".to_owned(),
            )),
        }
    }
}

/// Rejects requests that do not carry a valid bearer token.
///
/// Install with `axum::middleware::from_fn_with_state` on the routes to protect.  Accepted
/// requests reach the handler with a `Whoami` extension.
pub async fn require_auth(
    State(driver): State<AuthnDriver>,
    mut request: Request,
    next: Next,
) -> RestResult<Response> {
    let realm = driver.realm();
    let token = get_bearer_auth(request.headers(), realm)?;

    let username = match driver.validate(&token).await {
        Ok(username) => username,
        Err(DriverError::Unauthorized(message)) => {
            return Err(RestError::Unauthorized { scheme: "Bearer", realm, message });
        }
        Err(e) => return Err(e.into()),
    };

    request.extensions_mut().insert(Whoami(username));
    Ok(next.run(request).await)
}
