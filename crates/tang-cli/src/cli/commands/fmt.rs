use anyhow::Context;
use tang_model::{ConnectivityResult, JsonModel};

use crate::cli::args::FmtArgs;
use crate::cli::helpers::{input_label, read_input};
use crate::exit_codes;

pub fn run(args: FmtArgs) -> anyhow::Result<i32> {
    let bytes = read_input(&args.input)?;
    let result = ConnectivityResult::from_json_bytes(&bytes)
        .with_context(|| format!("failed to decode {}", input_label(&args.input)))?;

    let mut out = if args.pretty {
        result.to_json_pretty()?.into_bytes()
    } else {
        result.to_json_bytes()?
    };
    out.push(b'\n');

    match &args.output {
        Some(path) => {
            std::fs::write(path, &out)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote canonical document");
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(&out)
                .context("failed to write stdout")?;
        }
    }

    Ok(exit_codes::OK)
}
