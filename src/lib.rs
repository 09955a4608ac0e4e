//! Launch a command with ECS container metadata exported into its environment.
//!
//! The launcher waits for the agent to mark `$ECS_CONTAINER_METADATA_FILE`
//! ready, derives `PORT_<PROTO>_<CONTAINER_PORT>` (and `CONTAINER_ID`) from it,
//! merges those into the inherited environment and execs the target program.

mod color;
pub mod derive;
pub mod environ;
mod errors;
pub mod exec;
pub mod launcher;
pub mod metadata;
pub mod readiness;
#[cfg(feature = "otel")]
mod telemetry;

pub use color::*;
pub use derive::{derive_env, port_env_key, DerivedEnv, CONTAINER_ID_KEY};
pub use environ::Environ;
pub use errors::*;
pub use exec::{NixExec, ProcessExec};
pub use launcher::{
    apply_env, launch, metadata_path, prepare, ApplyReport, LaunchConfig, METADATA_FILE_ENV,
};
pub use metadata::{
    parse_metadata, read_metadata, ContainerMetadata, NetworkInfo, PortMapping, READY_STATUS,
};
pub use readiness::{
    poll_until_ready, wait_for_metadata, PollPolicy, PollState, DEFAULT_INTERVAL,
    DEFAULT_MAX_ATTEMPTS,
};
#[cfg(feature = "otel")]
pub use telemetry::telemetry_init;
