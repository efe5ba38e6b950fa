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

//! Utilities to help testing services that integrate with the `authn` features.

use crate::driver::{AuthnDriver, AuthnOptions};
use crate::model::{AccessToken, Password};
use carmgmt_core::clocks::testutils::SettableClock;
use carmgmt_core::model::Username;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;

/// Secret used to sign tokens in tests.
pub const TEST_SECRET: &str = "test-secret-for-signing";

/// Name of the user allowed to log in during tests.
pub const TEST_USERNAME: &str = "tester";

/// Password of the user allowed to log in during tests.
pub const TEST_PASSWORD: &str = "test0password";

/// Realm reported by the test drivers.
pub const TEST_REALM: &str = "the-realm";

/// Lifetime of the tokens issued in tests.
pub const TEST_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Unix timestamp at which test clocks start.
const TEST_START_SECS: i64 = 1_714_557_600;

/// Returns the options used by test drivers.
pub fn test_options() -> AuthnOptions {
    AuthnOptions {
        jwt_secret: TEST_SECRET.to_owned(),
        token_ttl: TEST_TOKEN_TTL,
        username: Username::from(TEST_USERNAME),
        password: Password::from(TEST_PASSWORD),
    }
}

/// Returns the instant at which test clocks start.
pub fn test_start_time() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(TEST_START_SECS).unwrap()
}

/// State of a running test.
pub struct TestContext {
    /// The clock used by the driver, which tests can move at will.
    clock: Arc<SettableClock>,

    /// The driver to handle authentication flows.
    driver: AuthnDriver,
}

impl TestContext {
    /// Initializes the driver with the test options and a clock set to `test_start_time`.
    pub fn setup() -> Self {
        Self::setup_with(Arc::from(SettableClock::new(test_start_time())))
    }

    /// Initializes the driver with the test options and the given `clock`.
    pub fn setup_with(clock: Arc<SettableClock>) -> Self {
        let driver = AuthnDriver::new(clock.clone(), TEST_REALM, test_options());
        Self { clock, driver }
    }

    /// Gets the clock used by the driver.
    pub fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Gets a copy of the driver in this test context.
    pub fn driver(&self) -> AuthnDriver {
        self.driver.clone()
    }

    /// Logs the test user in and returns the issued token.
    pub async fn login(&self) -> AccessToken {
        self.driver
            .clone()
            .login(TEST_USERNAME, TEST_PASSWORD)
            .await
            .unwrap()
    }
}
