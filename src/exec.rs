//! Process replacement: run the target program with a prepared environment.

use std::convert::Infallible;
use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;

use which::which;

use crate::environ::Environ;
use crate::errors::BindError;

/// Replaces the current process with `program`. Only returns on failure.
pub trait ProcessExec {
    fn exec(&mut self, program: &str, args: &[String], env: Environ) -> BindError;
}

/// `execve` after resolving `program` on the current `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NixExec;

fn to_cstring(bytes: Vec<u8>) -> io::Result<CString> {
    CString::new(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

impl NixExec {
    fn resolve(program: &str) -> io::Result<PathBuf> {
        which(program).map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))
    }

    fn exec_inner(program: &str, args: &[String], env: Environ) -> io::Result<Infallible> {
        let path = Self::resolve(program)?;
        let path = to_cstring(path.into_os_string().into_vec())?;

        // argv[0] keeps the name the caller used.
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(to_cstring(program.as_bytes().to_vec())?);
        for a in args {
            argv.push(to_cstring(a.as_bytes().to_vec())?);
        }

        let envp = env
            .into_byte_entries()
            .into_iter()
            .map(to_cstring)
            .collect::<io::Result<Vec<_>>>()?;

        nix::unistd::execve(&path, &argv, &envp).map_err(io::Error::from)
    }
}

impl ProcessExec for NixExec {
    fn exec(&mut self, program: &str, args: &[String], env: Environ) -> BindError {
        let source = match Self::exec_inner(program, args, env) {
            Err(e) => e,
            Ok(never) => match never {},
        };
        BindError::Exec {
            program: program.to_string(),
            source,
        }
    }
}
