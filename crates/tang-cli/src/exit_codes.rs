//! Process exit codes for `tang-check`.
//! These codes are part of the public contract for scripts wrapping the CLI.

pub const OK: i32 = 0;
pub const VALIDATION_FAILED: i32 = 1; // Validation errors, or --require-success not met
pub const INPUT_ERROR: i32 = 2; // Unreadable input, bad config, or undecodable JSON
