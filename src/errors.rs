//! Error mapping guide:
//! - Every core failure is a `BindError`; none are recovered except the bounded
//!   "not ready yet" retry inside the poller.
//! - Map a missing target program to exit code 127; all other errors to 1.
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failures surfaced by the launcher before (or instead of) replacing the process.
#[derive(Debug)]
pub enum BindError {
    /// Required environment configuration is missing.
    Config(String),
    /// Metadata file could not be opened or read.
    Io { path: PathBuf, source: io::Error },
    /// Metadata file content is not valid metadata JSON.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Metadata never reported ready within the attempt budget.
    NotReady { attempts: u32 },
    /// Target program could not be launched.
    Exec { program: String, source: io::Error },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::Config(msg) => write!(f, "{msg}"),
            BindError::Io { path, source } => {
                write!(f, "failed to open {}: {source}", path.display())
            }
            BindError::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
            BindError::NotReady { attempts } => write!(
                f,
                "metadata file is not ready after {attempts} attempt{}",
                if *attempts == 1 { "" } else { "s" }
            ),
            BindError::Exec { program, source } => {
                write!(f, "failed to execute {program}: {source}")
            }
        }
    }
}

impl std::error::Error for BindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindError::Io { source, .. } => Some(source),
            BindError::Parse { source, .. } => Some(source),
            BindError::Exec { source, .. } => Some(source),
            BindError::Config(_) | BindError::NotReady { .. } => None,
        }
    }
}

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

/// Convert BindError to exit code. Only exec failures carry the 127 mapping;
/// a missing metadata file is a plain failure.
pub fn exit_code_for_bind_error(e: &BindError) -> u8 {
    match e {
        BindError::Exec { source, .. } => exit_code_for_io_error(source),
        _ => 1,
    }
}
