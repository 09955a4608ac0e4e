use std::convert::Infallible;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ecs_bind::{exit_code_for_bind_error, launch, BindError, Environ, LaunchConfig, NixExec};

mod cli;

use cli::Cli;

fn run(cli: &Cli) -> Result<Infallible> {
    let (program, args) = cli.split_command();
    let config = LaunchConfig {
        verbose: cli.verbose,
        ..LaunchConfig::default()
    };
    let err = launch(&config, Environ::from_process(), program, args, &mut NixExec);
    Err(err).with_context(|| format!("cannot launch {program}"))
}

fn main() -> ExitCode {
    // Usage errors (including a missing `--`) exit here, before any metadata work.
    let cli = Cli::parse();

    if let Some(mode) = cli.color {
        ecs_bind::set_color_mode(mode);
    }

    #[cfg(feature = "otel")]
    ecs_bind::telemetry_init();

    match run(&cli) {
        Ok(never) => match never {},
        Err(e) => {
            let use_err = ecs_bind::color_enabled_stderr();
            ecs_bind::log_error_stderr(use_err, &format!("ecs-bind: {e:#}"));
            let code = e
                .downcast_ref::<BindError>()
                .map(exit_code_for_bind_error)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
