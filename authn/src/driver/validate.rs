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

//! Extends the driver with the `validate` method.

use crate::driver::{AuthnDriver, validation};
use crate::model::{AccessToken, Claims};
use carmgmt_core::driver::{DriverError, DriverResult};
use carmgmt_core::model::Username;
use log::debug;

/// Message returned for any token that cannot be accepted.
const INVALID_TOKEN: &str = "invalid or expired token";

impl AuthnDriver {
    /// Verifies the signature and validity period of `token` and returns the user it was issued
    /// to.
    pub async fn validate(self, token: &AccessToken) -> DriverResult<Username> {
        let decoded = {
            let keys = self.keys.lock().await;
            jsonwebtoken::decode::<Claims>(token.as_str(), &keys.decoding, &validation())
        };
        let claims = match decoded {
            Ok(data) => data.claims,
            Err(e) => {
                debug!("Rejected access token: {}", e);
                return Err(DriverError::Unauthorized(INVALID_TOKEN.to_owned()));
            }
        };

        let now = self.clock.now_utc();
        if !claims.is_valid_at(now) {
            debug!(
                "Rejected access token for {}: not valid at {} (nbf={}, exp={})",
                claims.username,
                now.unix_timestamp(),
                claims.nbf,
                claims.exp
            );
            return Err(DriverError::Unauthorized(INVALID_TOKEN.to_owned()));
        }

        Ok(claims.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use std::time::Duration;

    /// Signs `claims` with the test secret using `alg` and wraps the result as a token.
    fn sign(alg: Algorithm, claims: &Claims, secret: &str) -> AccessToken {
        let token = jsonwebtoken::encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        AccessToken::new(token).unwrap()
    }

    /// Expects `result` to be the rejection of an invalid token.
    fn assert_rejected(result: DriverResult<Username>) {
        match result {
            Err(DriverError::Unauthorized(msg)) => assert_eq!(INVALID_TOKEN, msg),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_validate_ok() {
        let context = TestContext::setup();
        let token = context.login().await;

        assert_eq!(Username::from(TEST_USERNAME), context.driver().validate(&token).await.unwrap());
    }

    #[tokio::test]
    async fn test_validate_expiration_boundaries() {
        let context = TestContext::setup();
        let token = context.login().await;

        context.clock().advance(TEST_TOKEN_TTL - Duration::from_secs(1));
        context.driver().validate(&token).await.unwrap();

        context.clock().advance(Duration::from_secs(1));
        assert_rejected(context.driver().validate(&token).await);
    }

    #[tokio::test]
    async fn test_validate_not_before() {
        let context = TestContext::setup();
        let token = context.login().await;

        context.clock().set(test_start_time() - Duration::from_secs(1));
        assert_rejected(context.driver().validate(&token).await);
    }

    #[tokio::test]
    async fn test_validate_bad_signature() {
        let context = TestContext::setup();
        let claims =
            Claims::new(Username::from(TEST_USERNAME), test_start_time(), TEST_TOKEN_TTL);

        let token = sign(Algorithm::HS256, &claims, "not-the-secret");
        assert_rejected(context.driver().validate(&token).await);
    }

    #[tokio::test]
    async fn test_validate_other_algorithm() {
        let context = TestContext::setup();
        let claims =
            Claims::new(Username::from(TEST_USERNAME), test_start_time(), TEST_TOKEN_TTL);

        let token = sign(Algorithm::HS384, &claims, TEST_SECRET);
        assert_rejected(context.driver().validate(&token).await);

        let token = sign(Algorithm::HS256, &claims, TEST_SECRET);
        context.driver().validate(&token).await.unwrap();
    }

    #[tokio::test]
    async fn test_validate_garbage() {
        let context = TestContext::setup();
        let token = AccessToken::new("abc.def.ghi").unwrap();
        assert_rejected(context.driver().validate(&token).await);
    }
}
