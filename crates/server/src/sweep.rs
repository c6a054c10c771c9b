// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Background expiry sweep.
//!
//! A loose-cadence task that deactivates expired holds so their rows stop
//! accumulating as live. Correctness never depends on this task running:
//! every capacity decision filters `is_active AND expires_at > now` on its
//! own, and the reservation operations also sweep opportunistically.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use holdfast_persistence::SqlitePersistence;

/// Spawns the background expiry sweep on the given cadence.
///
/// The task runs for the lifetime of the process. Sweep failures are logged
/// and the loop continues; a broken sweep degrades tidiness, not
/// correctness.
///
/// # Arguments
///
/// * `persistence` - The shared persistence adapter
/// * `interval` - The sweep cadence
pub fn spawn_expiry_sweep(persistence: Arc<Mutex<SqlitePersistence>>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker: tokio::time::Interval = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so startup is quiet.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let swept: Result<usize, _> = {
                let mut persistence = persistence.lock().await;
                persistence.release_expired_holds()
            };

            match swept {
                Ok(count) => {
                    if count > 0 {
                        debug!(count, "Background sweep released expired holds");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Background expiry sweep failed; will retry next tick");
                }
            }
        }
    });
}
