//! Usage: Client shell rendered into the webview (bindings, render functions, lifecycle, forms).
//!
//! The shell holds no business logic: every operation is a host call or a one-shot render.
//! It is written against `Document` and `HostBridge` so it can run on a Tauri webview
//! (`webview`) or on in-memory fixtures.

mod binder;
mod bridge;
mod document;
mod events;
mod format;
mod payload;
mod registry;
mod render;
mod session;
mod timer_list;
mod webview;

pub use binder::{DomBindings, ElementHandle};
pub use bridge::{EventStream, HostBridge, HostError};
pub use document::{ids, Document, DocumentMirror};
pub use events::{parse_int_prefix, TimerSubmission};
pub use format::format_clock_timer;
pub use payload::SystemStateEvent;
pub use session::{ShellSession, ShellStatus};
pub use timer_list::{timer_fragment, ListPatch, TimerListView};

pub(crate) use registry::{ShellEntry, ShellRegistry};
pub(crate) use webview::{LocalHostBridge, WebviewDocument};

#[cfg(test)]
mod tests;
