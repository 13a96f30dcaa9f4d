use serde::Serialize;
use tang_model::{
    ConnectivityResult, JsonModel, StandardFormats, Validate, ValidationContext, ValidationError,
};

use crate::cli::args::ValidateArgs;
use crate::cli::helpers::{input_label, read_input};
use crate::config::{CheckConfig, OutputFormat};
use crate::exit_codes;

#[derive(Debug, Serialize)]
pub struct ValidateReport {
    pub input: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_success: Option<bool>,
    pub servers: usize,
    pub signatures: usize,
    pub errors: Vec<ReportedError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
    pub exit_code: i32,
}

#[derive(Debug, Serialize)]
pub struct ReportedError {
    pub path: String,
    pub code: String,
    pub message: String,
}

/// Effective settings after flags are laid over the resolved config.
struct Settings {
    format: OutputFormat,
    require_success: bool,
    context: Option<ValidationContext>,
}

fn settings(args: &ValidateArgs, cfg: &CheckConfig) -> anyhow::Result<Settings> {
    let kind = match args.context {
        Some(kind) => Some(kind),
        None => cfg.context_kind()?,
    };
    let operation = args.operation.clone().or_else(|| cfg.operation.clone());
    let context = kind.map(|kind| {
        let ctx = ValidationContext::new(kind);
        match operation {
            Some(op) => ctx.with_operation(op),
            None => ctx,
        }
    });

    Ok(Settings {
        format: args.format.unwrap_or(cfg.format),
        require_success: args.require_success || cfg.require_success,
        context,
    })
}

pub fn run(args: ValidateArgs, cfg: &CheckConfig) -> anyhow::Result<i32> {
    let settings = settings(&args, cfg)?;
    let label = input_label(&args.input).to_string();
    let bytes = read_input(&args.input)?;

    let result = match ConnectivityResult::from_json_bytes(&bytes) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(input = %label, error = %e, "decode failed");
            let report = ValidateReport {
                input: label,
                valid: false,
                is_success: None,
                servers: 0,
                signatures: 0,
                errors: Vec::new(),
                decode_error: Some(e.to_string()),
                exit_code: exit_codes::INPUT_ERROR,
            };
            print_report(&report, settings.format)?;
            return Ok(report.exit_code);
        }
    };

    let formats = StandardFormats::new();
    let outcome = match &settings.context {
        Some(ctx) => {
            tracing::debug!(kind = ?ctx.kind, operation = ?ctx.operation, "context validation");
            result.context_validate(ctx, &formats)
        }
        None => result.validate(&formats),
    };

    let errors = outcome.err().map(|e| reported(&e)).unwrap_or_default();
    let valid = errors.is_empty();
    let exit_code = if !valid || (settings.require_success && !result.is_success()) {
        exit_codes::VALIDATION_FAILED
    } else {
        exit_codes::OK
    };

    let report = ValidateReport {
        input: label,
        valid,
        is_success: result.succeeded,
        servers: result.responses().count(),
        signatures: result.responses().map(|r| r.signature_blocks().count()).sum(),
        errors,
        decode_error: None,
        exit_code,
    };
    tracing::info!(
        valid = report.valid,
        servers = report.servers,
        errors = report.errors.len(),
        "validation finished"
    );

    print_report(&report, settings.format)?;
    Ok(exit_code)
}

fn reported(err: &ValidationError) -> Vec<ReportedError> {
    err.leaves()
        .into_iter()
        .map(|e| ReportedError {
            path: e.path.clone(),
            code: e.code.to_string(),
            message: e.message.clone(),
        })
        .collect()
}

fn print_report(report: &ValidateReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => {
            // Text format is always printed to stderr (human-readable)
            if let Some(decode_error) = &report.decode_error {
                eprintln!("{}: {}", report.input, decode_error);
                return Ok(());
            }
            let success = match report.is_success {
                Some(true) => "true",
                Some(false) => "false",
                None => "absent",
            };
            eprintln!(
                "{}: {} server response(s), {} signature(s), is_success={}",
                report.input, report.servers, report.signatures, success
            );
            for e in &report.errors {
                eprintln!("  error [{}] {}: {}", e.code, e.path, e.message);
            }
            match report.exit_code {
                exit_codes::OK => eprintln!("OK"),
                _ if !report.valid => eprintln!("FAILED: {} error(s)", report.errors.len()),
                _ => eprintln!("FAILED: is_success is not true"),
            }
        }
    }
    Ok(())
}
