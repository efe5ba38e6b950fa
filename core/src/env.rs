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

//! Utilities to read configuration from environment variables.
//!
//! Settings are grouped by a prefix so that every component can be configured independently.  A
//! setting named `PORT` for the `SERVER` component is read from the `SERVER_PORT` variable.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Result type for environment errors.
type Result<T> = std::result::Result<T, String>;

/// Wrapper around an environment variable's value to support conversions to other types.
pub struct Value(String);

impl TryFrom<Value> for String {
    type Error = String;

    fn try_from(value: Value) -> Result<Self> {
        Ok(value.0)
    }
}

impl TryFrom<Value> for PathBuf {
    type Error = String;

    fn try_from(value: Value) -> Result<Self> {
        if value.0.is_empty() {
            return Err("Invalid path: cannot be empty".to_owned());
        }
        Ok(PathBuf::from(value.0))
    }
}

impl TryFrom<Value> for Duration {
    type Error = String;

    /// Parses a duration of the form `<number><unit>` where the unit is one of `s`, `m`, `h` or
    /// `d`.  A bare number is interpreted as seconds.
    fn try_from(value: Value) -> Result<Self> {
        let s = value.0.trim();
        let (number, multiplier) = match s.char_indices().last() {
            Some((i, 's')) => (&s[..i], 1),
            Some((i, 'm')) => (&s[..i], 60),
            Some((i, 'h')) => (&s[..i], 60 * 60),
            Some((i, 'd')) => (&s[..i], 24 * 60 * 60),
            Some(_) => (s, 1),
            None => return Err("Invalid Duration: cannot be empty".to_owned()),
        };
        let number = number.parse::<u64>().map_err(|e| format!("Invalid Duration: {}", e))?;
        match number.checked_mul(multiplier) {
            Some(secs) => Ok(Duration::from_secs(secs)),
            None => Err(format!("Invalid Duration: {} is too large", s)),
        }
    }
}

/// Generates a `TryFrom<Value>` for a type that can be parsed by `FromStr`.
macro_rules! tryfrom_value_for_fromstr [
    ( $t:ty ) => {
        impl TryFrom<Value> for $t {
            type Error = String;

            fn try_from(value: Value) -> Result<Self> {
                value.0.parse::<$t>().map_err(|e| format!("Invalid {}: {}", stringify!($t), e))
            }
        }
    }
];

tryfrom_value_for_fromstr!(bool);
tryfrom_value_for_fromstr!(u16);
tryfrom_value_for_fromstr!(u32);
tryfrom_value_for_fromstr!(u64);
tryfrom_value_for_fromstr!(usize);

/// Gets an optional environment variable whose name is `<prefix>_<suffix>` with a conversion to
/// a target type `T`.  Returns `None` if the variable is not set.
pub fn get_optional_var<T: TryFrom<Value, Error = String>>(
    prefix: &str,
    suffix: &str,
) -> Result<Option<T>> {
    let name = format!("{}_{}", prefix, suffix);
    match env::var(&name) {
        Ok(value) => match Value(value).try_into() {
            Ok(value) => Ok(Some(value)),
            Err(e) => Err(format!("Invalid type in environment variable {}: {}", name, e)),
        },
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(format!("Invalid value in environment variable {}", name))
        }
    }
}

/// Gets a required environment variable whose name is `<prefix>_<suffix>` with a conversion to
/// a target type `T`.
pub fn get_required_var<T: TryFrom<Value, Error = String>>(
    prefix: &str,
    suffix: &str,
) -> Result<T> {
    match get_optional_var(prefix, suffix)? {
        Some(value) => Ok(value),
        None => Err(format!("Required environment variable {}_{} not present", prefix, suffix)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    #[test]
    fn test_value_to_duration() {
        let parse = |s: &str| Duration::try_from(Value(s.to_owned()));
        assert_eq!(Ok(Duration::from_secs(30)), parse("30"));
        assert_eq!(Ok(Duration::from_secs(30)), parse("30s"));
        assert_eq!(Ok(Duration::from_secs(15 * 60)), parse("15m"));
        assert_eq!(Ok(Duration::from_secs(24 * 3600)), parse("24h"));
        assert_eq!(Ok(Duration::from_secs(2 * 24 * 3600)), parse("2d"));

        assert!(parse("").unwrap_err().starts_with("Invalid Duration"));
        assert!(parse("h").unwrap_err().starts_with("Invalid Duration"));
        assert!(parse("-5m").unwrap_err().starts_with("Invalid Duration"));
        assert!(parse("5w").unwrap_err().starts_with("Invalid Duration"));
        assert!(parse(&format!("{}d", u64::MAX)).unwrap_err().contains("too large"));
    }

    #[test]
    fn test_value_to_pathbuf() {
        assert_eq!(
            PathBuf::from("/etc/schema.sql"),
            PathBuf::try_from(Value("/etc/schema.sql".to_owned())).unwrap()
        );
        PathBuf::try_from(Value(String::new())).unwrap_err();
    }

    #[test]
    fn test_get_optional_var_ok() {
        temp_env::with_var("PREFIX_PRESENT", Some("8080"), || {
            assert_eq!(Some(8080u16), get_optional_var::<u16>("PREFIX", "PRESENT").unwrap());
        });
    }

    #[test]
    fn test_get_optional_var_missing() {
        temp_env::with_var_unset("PREFIX_MISSING", || {
            assert_eq!(None, get_optional_var::<String>("PREFIX", "MISSING").unwrap());
        });
    }

    #[test]
    fn test_get_required_var_ok() {
        temp_env::with_var("PREFIX_PRESENT", Some("1234"), || {
            assert_eq!("1234", &get_required_var::<String>("PREFIX", "PRESENT").unwrap());
        });
    }

    #[test]
    fn test_get_required_var_missing() {
        temp_env::with_var_unset("PREFIX_MISSING", || {
            assert_eq!(
                "Required environment variable PREFIX_MISSING not present",
                &get_required_var::<String>("PREFIX", "MISSING").unwrap_err()
            );
        });
    }

    #[test]
    fn test_get_required_var_not_utf8() {
        temp_env::with_var("PREFIX_INVALID", Some(OsStr::from_bytes(b"\xc3\x28")), || {
            assert_eq!(
                "Invalid value in environment variable PREFIX_INVALID",
                &get_required_var::<String>("PREFIX", "INVALID").unwrap_err()
            );
        });
    }

    #[test]
    fn test_get_required_var_bad_type() {
        temp_env::with_var("PREFIX_BAD", Some("b4d"), || {
            let err = get_required_var::<u16>("PREFIX", "BAD").unwrap_err();
            assert!(
                err.starts_with("Invalid type in environment variable PREFIX_BAD: Invalid u16")
            );
        });
    }
}
