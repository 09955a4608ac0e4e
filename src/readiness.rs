//! Bounded polling of the metadata file until the agent marks it ready.
//!
//! Only a successfully parsed, not-yet-ready snapshot is retried. Read and
//! parse failures abort the whole wait immediately.

use std::path::Path;
use std::time::Duration;

#[cfg(feature = "otel")]
use tracing::instrument;

use crate::errors::BindError;
use crate::metadata::{read_metadata, ContainerMetadata};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Polling { attempt: u32 },
    Ready,
    Exhausted,
}

impl PollState {
    /// Next state after a successfully parsed snapshot on the current attempt.
    fn advance(self, ready: bool, max_attempts: u32) -> PollState {
        match self {
            PollState::Polling { .. } if ready => PollState::Ready,
            PollState::Polling { attempt } if attempt >= max_attempts => PollState::Exhausted,
            PollState::Polling { attempt } => PollState::Polling {
                attempt: attempt + 1,
            },
            terminal => terminal,
        }
    }
}

/// Drive `read` until it yields a ready snapshot or the budget runs out.
///
/// `sleep` is called with `policy.interval` between attempts and never after
/// the last one. A zero `max_attempts` is treated as a single attempt.
pub fn poll_until_ready<R, S>(
    policy: PollPolicy,
    mut read: R,
    mut sleep: S,
) -> Result<ContainerMetadata, BindError>
where
    R: FnMut() -> Result<ContainerMetadata, BindError>,
    S: FnMut(Duration),
{
    let max_attempts = policy.max_attempts.max(1);
    let mut state = PollState::Polling { attempt: 1 };
    loop {
        let meta = read()?;
        state = state.advance(meta.is_ready(), max_attempts);
        match state {
            PollState::Ready => return Ok(meta),
            PollState::Exhausted => {
                return Err(BindError::NotReady {
                    attempts: max_attempts,
                })
            }
            PollState::Polling { .. } => {
                #[cfg(feature = "otel")]
                tracing::debug!(?state, "metadata not ready; retrying");
                sleep(policy.interval);
            }
        }
    }
}

/// Poll the metadata file at `path`, sleeping the current thread between attempts.
#[cfg_attr(
    feature = "otel",
    instrument(level = "info", err, fields(max_attempts = policy.max_attempts))
)]
pub fn wait_for_metadata(path: &Path, policy: PollPolicy) -> Result<ContainerMetadata, BindError> {
    poll_until_ready(policy, || read_metadata(path), std::thread::sleep)
}
