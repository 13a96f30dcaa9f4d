use std::io::Read;

use anyhow::Context;

/// Read a whole input: a file path, or `-` for stdin.
pub fn read_input(input: &str) -> anyhow::Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read(input).with_context(|| format!("failed to read {input}"))
}

/// Display name for an input in reports.
pub fn input_label(input: &str) -> &str {
    if input == "-" {
        "<stdin>"
    } else {
        input
    }
}
