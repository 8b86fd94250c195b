//! CLI command implementations.

pub(crate) mod breakfast;
pub(crate) mod config;
