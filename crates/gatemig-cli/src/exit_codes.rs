//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.
//! A run where every Ingress failed to migrate still exits with [`SUCCESS`];
//! failures are reported in the output, not the status.

/// Success - input was read and all outputs were written
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Parse error - input is not valid YAML
pub const PARSE_ERROR: i32 = 2;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or configuration (sysexits.h EX_USAGE)
pub const USAGE_ERROR: i32 = 64;
