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

//! Business logic for user authentication.

use crate::model::Password;
use carmgmt_core::clocks::Clock;
use carmgmt_core::driver::{DriverError, DriverResult};
use carmgmt_core::env::{get_optional_var, get_required_var};
use carmgmt_core::model::Username;
use derivative::Derivative;
use futures::lock::Mutex;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation};
use log::info;
use std::sync::Arc;
use std::time::Duration;

mod login;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
mod validate;

/// Default value for the `TOKEN_TTL` setting when not specified.
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Default value for the `USERNAME` setting when not specified.
const DEFAULT_USERNAME: &str = "admin";

/// Default value for the `PASSWORD` setting when not specified.
const DEFAULT_PASSWORD: &str = "admin123";

/// Only signing algorithm we issue and accept.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Configuration options for the authentication driver.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct AuthnOptions {
    /// Secret used to sign and verify access tokens.
    #[derivative(Debug = "ignore")]
    pub jwt_secret: String,

    /// The amount of time issued tokens are valid for.
    pub token_ttl: Duration,

    /// Name of the only user allowed to log in.
    pub username: Username,

    /// Password of the only user allowed to log in.
    #[derivative(Debug = "ignore")]
    pub password: Password,
}

impl AuthnOptions {
    /// Creates a new set of options from environment variables.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let jwt_secret = get_required_var::<String>(prefix, "JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(format!("Environment variable {}_JWT_SECRET cannot be empty", prefix));
        }

        let username = get_optional_var::<String>(prefix, "USERNAME")?
            .unwrap_or_else(|| DEFAULT_USERNAME.to_owned());
        let username = Username::new(username)
            .map_err(|e| format!("Invalid environment variable {}_USERNAME: {}", prefix, e))?;

        let password = get_optional_var::<String>(prefix, "PASSWORD")?
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_owned());
        let password = Password::new(password)
            .map_err(|e| format!("Invalid environment variable {}_PASSWORD: {}", prefix, e))?;

        Ok(Self {
            jwt_secret,
            token_ttl: get_optional_var::<Duration>(prefix, "TOKEN_TTL")?
                .unwrap_or_else(|| Duration::from_secs(DEFAULT_TOKEN_TTL_SECONDS)),
            username,
            password,
        })
    }
}

/// Keys derived from the signing secret.
struct Keys {
    /// Key to sign new tokens with.
    encoding: EncodingKey,

    /// Key to verify incoming tokens with.
    decoding: DecodingKey,
}

impl Keys {
    /// Derives the HMAC keys for `secret`.
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Returns the token validation rules.
///
/// Time-based checks are disabled here because they must use the driver's clock.
fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.set_required_spec_claims(&["exp", "nbf"]);
    validation
}

/// Business logic.
///
/// The public operations exposed by the driver consume it, which mirrors the other drivers in
/// the system.  Clones share the signing keys, so rotating the secret through any clone affects
/// all of them.
#[derive(Clone)]
pub struct AuthnDriver {
    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,

    /// Authentication realm to return to requests.
    realm: &'static str,

    /// Options for the authentication driver.
    opts: Arc<AuthnOptions>,

    /// Signing keys derived from the current secret.
    keys: Arc<Mutex<Keys>>,
}

impl AuthnDriver {
    /// Creates a new driver backed by the given dependencies.
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        realm: &'static str,
        opts: AuthnOptions,
    ) -> Self {
        let keys = Arc::from(Mutex::from(Keys::from_secret(&opts.jwt_secret)));
        Self { clock, realm, opts: Arc::from(opts), keys }
    }

    /// Gets the authentication realm.
    pub fn realm(&self) -> &'static str {
        self.realm
    }

    /// Replaces the signing secret with `secret`.
    ///
    /// Tokens signed with the previous secret stop validating immediately.
    pub async fn rotate_secret(&self, secret: &str) -> DriverResult<()> {
        if secret.is_empty() {
            return Err(DriverError::InvalidInput("JWT secret cannot be empty".to_owned()));
        }

        let mut keys = self.keys.lock().await;
        *keys = Keys::from_secret(secret);
        info!("Rotated JWT signing secret");
        Ok(())
    }
}
