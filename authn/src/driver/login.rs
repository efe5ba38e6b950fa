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

//! Extends the driver with the `login` method.

use crate::driver::{ALGORITHM, AuthnDriver};
use crate::model::{AccessToken, Claims};
use carmgmt_core::driver::{DriverError, DriverResult};
use jsonwebtoken::Header;
use log::{info, warn};

impl AuthnDriver {
    /// Logs a user with `username` and `password` in and returns a signed access token.
    ///
    /// The inputs are raw strings so that any mismatch, including values that would not pass
    /// `Username` or `Password` validation, is reported as invalid credentials.
    pub async fn login(self, username: &str, password: &str) -> DriverResult<AccessToken> {
        let user_ok = username == self.opts.username.as_str();
        let password_ok = self.opts.password.matches(password);
        if !(user_ok && password_ok) {
            warn!("Rejected login attempt for user {:?}", username);
            return Err(DriverError::Unauthorized("invalid credentials".to_owned()));
        }

        let claims =
            Claims::new(self.opts.username.clone(), self.clock.now_utc(), self.opts.token_ttl);

        let token = {
            let keys = self.keys.lock().await;
            jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &keys.encoding)
                .map_err(|e| DriverError::BackendError(format!("Cannot sign token: {}", e)))?
        };
        let token = AccessToken::new(token)
            .map_err(|e| DriverError::BackendError(format!("Signed a malformed token: {}", e)))?;

        info!("User {} logged in", claims.username);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use carmgmt_core::model::Username;
    use jsonwebtoken::{Algorithm, DecodingKey, Validation};

    /// Decodes `token` with the test secret and returns its claims without checking times.
    fn decode_claims(token: &AccessToken) -> Claims {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        jsonwebtoken::decode::<Claims>(
            token.as_str(),
            &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
            &validation,
        )
        .unwrap()
        .claims
    }

    #[tokio::test]
    async fn test_login_ok() {
        let context = TestContext::setup();

        let token = context
            .driver()
            .login(TEST_USERNAME, TEST_PASSWORD)
            .await
            .unwrap();

        let now = test_start_time().unix_timestamp();
        let ttl = i64::try_from(TEST_TOKEN_TTL.as_secs()).unwrap();
        assert_eq!(
            Claims { username: Username::from(TEST_USERNAME), iat: now, nbf: now, exp: now + ttl },
            decode_claims(&token)
        );
    }

    #[tokio::test]
    async fn test_login_uses_clock() {
        let context = TestContext::setup();
        context.clock().advance(std::time::Duration::from_secs(30));

        let token = context.login().await;
        assert_eq!(test_start_time().unix_timestamp() + 30, decode_claims(&token).iat);
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let context = TestContext::setup();

        match context
            .driver()
            .login("someone-else", TEST_PASSWORD)
            .await
        {
            Err(DriverError::Unauthorized(msg)) => assert_eq!("invalid credentials", msg),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_login_invalid_password() {
        let context = TestContext::setup();

        match context.driver().login(TEST_USERNAME, "wrong").await {
            Err(DriverError::Unauthorized(msg)) => assert_eq!("invalid credentials", msg),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_login_malformed_inputs_are_invalid_credentials() {
        let context = TestContext::setup();

        let long_password = "x".repeat(1000);
        let attempts = [
            ("John Doe", "x"),
            ("", ""),
            (TEST_USERNAME, ""),
            (TEST_USERNAME, long_password.as_str()),
        ];
        for (username, password) in attempts {
            match context.driver().login(username, password).await {
                Err(DriverError::Unauthorized(msg)) => assert_eq!("invalid credentials", msg),
                e => panic!("{:?}", e),
            }
        }
    }

    #[tokio::test]
    async fn test_login_username_is_case_sensitive() {
        let context = TestContext::setup();

        let username = TEST_USERNAME.to_uppercase();
        match context.driver().login(&username, TEST_PASSWORD).await {
            Err(DriverError::Unauthorized(msg)) => assert_eq!("invalid credentials", msg),
            e => panic!("{:?}", e),
        }
    }
}
