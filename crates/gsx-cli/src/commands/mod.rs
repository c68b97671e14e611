//! CLI command implementations

pub(crate) mod deploy;
pub(crate) mod status;
