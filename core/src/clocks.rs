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

//! Sources of the current time.

use time::OffsetDateTime;

/// Generic definition of a clock.
pub trait Clock {
    /// Returns the current UTC time.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Truncates `ts` to microsecond resolution.
///
/// PostgreSQL timestamps cannot hold anything finer, so all timestamps that may end up in the
/// database go through this.
fn truncate_to_micros(ts: OffsetDateTime) -> OffsetDateTime {
    ts - time::Duration::nanoseconds(i64::from(ts.nanosecond() % 1000))
}

/// Clock implementation that uses the system clock.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        truncate_to_micros(OffsetDateTime::now_utc())
    }
}

/// Test utilities.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::time::Duration;

    /// A clock that returns a preconfigured instant and only moves when told to.
    ///
    /// Only supports microsecond-level precision.
    pub struct SettableClock {
        /// Current fake time in microseconds since the Unix epoch.
        now_us: AtomicI64,
    }

    impl SettableClock {
        /// Creates a new clock that returns `now` until reconfigured.
        pub fn new(now: OffsetDateTime) -> Self {
            Self { now_us: AtomicI64::new(to_micros(now)) }
        }

        /// Sets the new value of `now` that the clock returns.
        pub fn set(&self, now: OffsetDateTime) {
            self.now_us.store(to_micros(now), Ordering::SeqCst);
        }

        /// Advances the current time by `delta`.
        pub fn advance(&self, delta: Duration) {
            let delta_ns = delta.as_nanos();
            assert!(delta_ns % 1000 == 0, "Nanosecond precision not supported");
            let delta_us = i64::try_from(delta_ns / 1000).unwrap();
            self.now_us.fetch_add(delta_us, Ordering::SeqCst);
        }
    }

    /// Converts `ts` to microseconds since the epoch, rejecting finer precision.
    fn to_micros(ts: OffsetDateTime) -> i64 {
        let ns = ts.unix_timestamp_nanos();
        assert!(ns % 1000 == 0, "Nanosecond precision not supported");
        i64::try_from(ns / 1000).unwrap()
    }

    impl Clock for SettableClock {
        fn now_utc(&self) -> OffsetDateTime {
            let now_us = self.now_us.load(Ordering::SeqCst);
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(now_us) * 1000).unwrap()
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_truncate_to_micros() {
        assert_eq!(
            datetime!(2024-03-01 08:00:00.123456 UTC),
            truncate_to_micros(datetime!(2024-03-01 08:00:00.123456789 UTC))
        );
        assert_eq!(
            datetime!(2024-03-01 08:00:00 UTC),
            truncate_to_micros(datetime!(2024-03-01 08:00:00.000000999 UTC))
        );
    }

    #[test]
    fn test_systemclock_microsecond_resolution() {
        let clock = SystemClock::default();
        let now1 = clock.now_utc();
        assert_eq!(0, now1.nanosecond() % 1000);
        let now2 = clock.now_utc();
        assert!(now2 >= now1);
    }
}
