//! Usage: Tauri command handlers, grouped by concern and re-exported for `generate_handler!`.

mod app;
mod auth;
mod shell;
mod system;
mod timers;

pub(crate) use app::*;
pub(crate) use auth::*;
pub(crate) use shell::*;
pub(crate) use system::*;
pub(crate) use timers::*;
