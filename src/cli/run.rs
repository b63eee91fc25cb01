use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{check::check, init::init, update::update},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler. No subcommand runs `update`.
pub fn run(args: Arguments) -> Result<ExitStatus> {
    match args.command() {
        Command::Update => update(&args.common),
        Command::Check => check(&args.common),
        Command::Init => init(&args.common),
        Command::Serve => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("Serve command should be handled before run()")
        }
    }
}
