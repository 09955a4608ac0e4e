use clap::Parser;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("ECS_BIND_BUILD_DATE"),
    ", ",
    env!("ECS_BIND_BUILD_TARGET"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "ecs-bind",
    version,
    long_version = LONG_VERSION,
    about = "Executes a command with ECS dynamic metadata values as environment",
    override_usage = "ecs-bind [OPTIONS] -- <COMMAND> [ARGS]..."
)]
pub(crate) struct Cli {
    /// Print each exported variable to stdout
    #[arg(long)]
    pub(crate) verbose: bool,

    /// Colorize warnings: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<ecs_bind::ColorMode>,

    /// Target program and its arguments; must follow a literal `--`
    #[arg(last = true, required = true, value_name = "COMMAND")]
    pub(crate) command: Vec<String>,
}

impl Cli {
    /// Target program name and its arguments.
    pub(crate) fn split_command(&self) -> (&str, &[String]) {
        match self.command.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => ("", &[]),
        }
    }
}
