//! Wires the poller, deriver and environment list together, then hands off
//! to the exec collaborator.

use std::path::PathBuf;

#[cfg(feature = "otel")]
use tracing::instrument;

use crate::derive::{derive_env, DerivedEnv};
use crate::environ::Environ;
use crate::errors::BindError;
use crate::exec::ProcessExec;
use crate::readiness::{wait_for_metadata, PollPolicy};

/// Environment variable naming the metadata file, set by the ECS agent.
pub const METADATA_FILE_ENV: &str = "ECS_CONTAINER_METADATA_FILE";

#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchConfig {
    /// Print one info line per applied variable.
    pub verbose: bool,
    pub poll: PollPolicy,
}

/// What `apply_env` did, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: Vec<(String, String)>,
    /// Keys that were already present (in the environment or earlier in the
    /// derivation) and got overwritten.
    pub overwritten: Vec<String>,
}

/// Resolve the metadata file path; only an absent variable is a config error.
pub fn metadata_path(env: &Environ) -> Result<PathBuf, BindError> {
    env.get(METADATA_FILE_ENV).map(PathBuf::from).ok_or_else(|| {
        BindError::Config(format!(
            "metadata file location not set ({METADATA_FILE_ENV})"
        ))
    })
}

fn warn_overwrite(key: &str) {
    let use_err = crate::color_enabled_stderr();
    crate::log_warn_stderr(
        use_err,
        &format!("warning: overwriting environment variable {key}"),
    );
}

/// Merge derived variables into `env`. Existing keys are overwritten after a
/// warning; the last write always wins.
pub fn apply_env(env: &mut Environ, derived: &DerivedEnv, config: &LaunchConfig) -> ApplyReport {
    let mut report = ApplyReport::default();

    for key in derived.collisions() {
        warn_overwrite(key);
        report.overwritten.push(key.clone());
    }

    let use_out = config.verbose && crate::color_enabled_stdout();
    for (key, value) in derived.iter() {
        if env.is_set(key) {
            warn_overwrite(key);
            report.overwritten.push(key.to_string());
        }
        env.set(key, value);
        if config.verbose {
            crate::log_info_stdout(use_out, &format!("info: With environment {key}={value}"));
        }
        report.applied.push((key.to_string(), value.to_string()));
    }

    report
}

/// Everything short of exec: resolve, poll, derive and merge.
pub fn prepare(
    mut env: Environ,
    config: &LaunchConfig,
) -> Result<(Environ, ApplyReport), BindError> {
    let path = metadata_path(&env)?;
    let meta = wait_for_metadata(&path, config.poll)?;
    let derived = derive_env(&meta);
    let report = apply_env(&mut env, &derived, config);
    Ok((env, report))
}

/// Prepare `env` and replace the process with `program`. Returns only on failure.
#[cfg_attr(
    feature = "otel",
    instrument(level = "info", skip(env, exec), fields(verbose = config.verbose))
)]
pub fn launch<E: ProcessExec>(
    config: &LaunchConfig,
    env: Environ,
    program: &str,
    args: &[String],
    exec: &mut E,
) -> BindError {
    match prepare(env, config) {
        Ok((env, _report)) => exec.exec(program, args, env),
        Err(e) => e,
    }
}
