use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tang_model::OperationKind;

use crate::config::OutputFormat;

#[derive(Parser)]
#[command(
    name = "tang-check",
    version,
    about = "Decode, validate and re-encode Tang connectivity responses"
)]
pub struct Cli {
    /// YAML config file
    #[arg(long, global = true, env = "TANG_CHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a document and report every validation error path
    Validate(ValidateArgs),
    /// Decode a document and print its canonical encoding
    Fmt(FmtArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Input file, or '-' for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Run context validation for this operation kind
    #[arg(long)]
    pub context: Option<OperationKind>,

    /// Operation name placed in the validation context
    #[arg(long)]
    pub operation: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also fail when is_success is not true
    #[arg(long)]
    pub require_success: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct FmtArgs {
    /// Input file, or '-' for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Indent the output
    #[arg(long)]
    pub pretty: bool,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
