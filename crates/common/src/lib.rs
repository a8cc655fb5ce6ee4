//! Process-level helpers shared by the binaries: logging setup and startup checks.

pub mod env;
pub mod utils;
