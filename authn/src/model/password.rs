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

//! The `Password` data type.

use carmgmt_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Maximum length of a password, in bytes.
const MAX_PASSWORD_LENGTH: usize = 256;

/// An opaque type to hold a password, protecting it from leaking into logs.
#[derive(Clone, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "String")]
pub struct Password(String);

impl Password {
    /// Creates a new password from a literal string.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.len() > MAX_PASSWORD_LENGTH {
            return Err(ModelError("Password is too long".to_owned()));
        }
        Ok(Password(s))
    }

    /// Returns a string view of the password.
    #[cfg(any(test, feature = "testutils"))]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if `candidate` equals this password in constant time.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl TryFrom<String> for Password {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Password::new(value)
    }
}

#[cfg(any(test, feature = "testutils"))]
impl From<&'static str> for Password {
    /// Creates a new password from a hardcoded string, which must be valid.
    fn from(s: &'static str) -> Self {
        Password::new(s).expect("Hardcoded passwords must be valid")
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed password")
    }
}
