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

//! Utilities to deal with HTTP authorization.

use crate::model::AccessToken;
use carmgmt_core::rest::{RestError, RestResult, get_unique_header};
use http::header::HeaderMap;

/// Builds the error returned for any problem with bearer credentials.
fn unauthorized<M: Into<String>>(realm: &'static str, message: M) -> RestError {
    RestError::Unauthorized { scheme: "Bearer", realm, message: message.into() }
}

/// Assumes that the `headers` contain a bearer access token and extracts it.
///
/// The header must be present once, be valid ASCII and carry the `Bearer` scheme (matched
/// case-sensitively) followed by a syntactically valid token.  Any deviation is reported as an
/// `Unauthorized` error for `realm`.
pub fn get_bearer_auth(headers: &HeaderMap, realm: &'static str) -> RestResult<AccessToken> {
    let authz = match get_unique_header(headers, &http::header::AUTHORIZATION) {
        Ok(Some(value)) => value,
        Ok(None) => return Err(unauthorized(realm, "Missing Authorization header")),
        Err(e) => return Err(unauthorized(realm, e.to_string())),
    };

    let authz = authz.to_str().map_err(|e| {
        unauthorized(realm, format!("Bad encoding in Authorization header: {}", e))
    })?;

    let (scheme, payload) = match authz.split_once(' ') {
        Some((scheme, payload)) if !scheme.is_empty() => (scheme, payload),
        None if !authz.is_empty() => {
            return Err(unauthorized(realm, "Bad Authorization header: missing payload"));
        }
        _ => return Err(unauthorized(realm, "Bad Authorization header: missing scheme")),
    };
    if scheme != "Bearer" {
        return Err(unauthorized(realm, "Unsupported scheme"));
    }

    AccessToken::new(payload).map_err(|e| unauthorized(realm, e.to_string()))
}
