//! Exit codes for the CLI
//!
//! The process outcome is binary; error kinds are distinguished in
//! diagnostics only, never in the exit code.

#![allow(dead_code)]

/// Success
pub const SUCCESS: i32 = 0;

/// Any failure: identity not found, tool not found, unsupported platform,
/// signing failure, wrong-platform invocation
pub const FAILURE: i32 = -1;
