pub mod fmt;
pub mod validate;

use crate::cli::args::{Cli, Command};
use crate::config::CheckConfig;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let cfg = CheckConfig::resolve(cli.config.as_deref())?;
    tracing::debug!(?cfg, "resolved configuration");

    match cli.cmd {
        Command::Validate(args) => validate::run(args, &cfg),
        Command::Fmt(args) => fmt::run(args),
    }
}
