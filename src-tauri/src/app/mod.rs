//! Usage: Application layer (Tauri-managed state, background tasks, window lifecycle, exit cleanup).

pub(crate) mod app_state;
pub(crate) mod background;
pub(crate) mod cleanup;
pub(crate) mod logging;
pub(crate) mod window;
