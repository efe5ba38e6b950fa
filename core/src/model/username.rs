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

//! The `Username` data type.

use crate::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a username.
const MAX_USERNAME_LENGTH: usize = 64;

/// Represents a correctly-formatted username.
///
/// Usernames travel inside access tokens and show up in logs, so they are restricted to a small
/// set of printable characters.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Creates a new username from an untrusted string `s`, making sure it is valid.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.is_empty() {
            return Err(ModelError("Username cannot be empty".to_owned()));
        }
        if s.len() > MAX_USERNAME_LENGTH {
            return Err(ModelError("Username is too long".to_owned()));
        }
        if let Some(ch) = s.chars().find(|ch| !(ch.is_ascii_alphanumeric() || ".-_@".contains(*ch)))
        {
            return Err(ModelError(format!("Unsupported character '{}' in username '{}'", ch, s)));
        }

        Ok(Self(s))
    }

    /// Returns a string view of the username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        Username::new(s)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

#[cfg(any(test, feature = "testutils"))]
impl From<&'static str> for Username {
    /// Creates a new username from a hardcoded string, which must be valid.
    fn from(name: &'static str) -> Self {
        Username::new(name).expect("Hardcoded usernames must be valid")
    }
}
