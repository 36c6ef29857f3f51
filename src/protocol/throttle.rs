// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimum-inter-request-interval enforcement.
//!
//! The thermostat's embedded web server rejects or times out under
//! rapid-fire requests, so consecutive commands must be spaced apart. The
//! throttle tracks when the last request completed and delays the next one
//! until the interval has passed.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

/// Spaces requests at least one interval apart.
///
/// [`acquire`](Throttle::acquire) waits out the remainder of the interval
/// since the last completed request and returns a permit. The permit holds
/// the slot until [`complete`](ThrottlePermit::complete) stamps it, so
/// concurrent callers are serialized: a second `acquire` cannot proceed
/// while a request is in flight.
///
/// Timing uses `tokio::time`, so tests can run under a paused clock without
/// real sleeps.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use ternor_lib::protocol::Throttle;
///
/// # async fn example() {
/// let throttle = Throttle::new(Duration::from_secs(1));
/// let permit = throttle.acquire().await;
/// // ... send the request ...
/// permit.complete();
/// # }
/// ```
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    slot: Mutex<Option<Instant>>,
}

impl Throttle {
    /// The spacing the device's embedded server needs.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    /// Creates a throttle with the given minimum interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            slot: Mutex::new(None),
        }
    }

    /// Returns the configured minimum interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until the interval since the last completed request has passed,
    /// then returns a permit for the next one.
    pub async fn acquire(&self) -> ThrottlePermit<'_> {
        let slot = self.slot.lock().await;

        if let Some(last) = *slot
            && let Some(remaining) = self.interval.checked_sub(last.elapsed())
        {
            tracing::debug!(wait = ?remaining, "Throttling request");
            tokio::time::sleep(remaining).await;
        }

        ThrottlePermit { slot }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

/// Permission to issue one request.
///
/// Call [`complete`](Self::complete) once the attempt has finished, whether
/// it succeeded or failed; the stamp is what the next `acquire` measures
/// against. Dropping the permit without completing releases the slot without
/// stamping it.
#[derive(Debug)]
pub struct ThrottlePermit<'a> {
    slot: MutexGuard<'a, Option<Instant>>,
}

impl ThrottlePermit<'_> {
    /// Records the completion time of the request attempt.
    pub fn complete(mut self) {
        *self.slot = Some(Instant::now());
    }
}
