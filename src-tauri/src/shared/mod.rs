//! Usage: Small cross-cutting helpers shared by host and shell code.

pub(crate) mod blocking;
pub(crate) mod mutex_ext;
