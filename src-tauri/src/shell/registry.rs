//! Usage: One shell session per webview window label (Tauri-managed).

use super::session::ShellSession;
use super::webview::WebviewDocument;
use crate::shared::mutex_ext::MutexExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub(crate) struct ShellEntry<D = WebviewDocument> {
    pub(crate) session: Arc<ShellSession>,
    pub(crate) document: Arc<D>,
}

impl<D> Clone for ShellEntry<D> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            document: Arc::clone(&self.document),
        }
    }
}

pub(crate) struct ShellRegistry<D = WebviewDocument> {
    sessions: Mutex<HashMap<String, ShellEntry<D>>>,
}

impl<D> Default for ShellRegistry<D> {
    fn default() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl<D> ShellRegistry<D> {
    /// Returns the entry previously registered for `window`, if any.
    pub(crate) fn insert(&self, window: &str, entry: ShellEntry<D>) -> Option<ShellEntry<D>> {
        self.sessions
            .lock_or_recover()
            .insert(window.to_string(), entry)
    }

    pub(crate) fn get(&self, window: &str) -> Option<ShellEntry<D>> {
        self.sessions.lock_or_recover().get(window).cloned()
    }

    pub(crate) fn remove(&self, window: &str) -> Option<ShellEntry<D>> {
        self.sessions.lock_or_recover().remove(window)
    }

    pub(crate) fn drain(&self) -> Vec<(String, ShellEntry<D>)> {
        self.sessions.lock_or_recover().drain().collect()
    }
}
