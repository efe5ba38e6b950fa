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

//! The `Claims` data type.

use carmgmt_core::model::Username;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

/// Payload signed into every access token.
///
/// All timestamps are seconds since the Unix epoch, as JWTs expect.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Claims {
    /// User the token was issued to.
    pub username: Username,

    /// Time at which the token was issued.
    pub iat: i64,

    /// Time before which the token must not be accepted.
    pub nbf: i64,

    /// Time at which the token stops being accepted.
    pub exp: i64,
}

impl Claims {
    /// Creates the claims for a token issued to `username` at `now` that lives for `ttl`.
    pub fn new(username: Username, now: OffsetDateTime, ttl: Duration) -> Self {
        let iat = now.unix_timestamp();
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self { username, iat, nbf: iat, exp: iat.saturating_add(ttl) }
    }

    /// Checks if the claims are valid at `now`.
    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        let now = now.unix_timestamp();
        self.nbf <= now && now < self.exp
    }
}
