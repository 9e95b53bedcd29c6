//! Usage: Document abstraction the shell renders into, plus an in-memory mirror of element state.
//!
//! Writes to ids that are not present are silently ignored, matching how the markup layer
//! treats a missing element.

use crate::shared::mutex_ext::MutexExt;
use std::collections::HashMap;
use std::sync::Mutex;

/// Element ids shared with the markup layer.
pub mod ids {
    pub const GREET_INPUT: &str = "greet-input";
    pub const GREET_MSG: &str = "greet-msg";
    pub const CLOCK: &str = "clock-parragraph";
    pub const POWER: &str = "power-span";
    pub const TIMER_INPUT: &str = "timer-input";
    pub const TIMER_LIST: &str = "timer-list";
    pub const TIMER_FORM: &str = "timer-form";
    pub const GREET_FORM: &str = "greet-form";
    pub const STATUS: &str = "shell-status";
}

pub trait Document: Send + Sync {
    fn contains(&self, id: &str) -> bool;
    fn text_content(&self, id: &str) -> Option<String>;
    fn set_text_content(&self, id: &str, text: &str);
    fn inner_html(&self, id: &str) -> Option<String>;
    fn set_inner_html(&self, id: &str, html: &str);
    fn input_value(&self, id: &str) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
struct ElementState {
    content: String,
    value: String,
    writes: usize,
}

/// Element state keyed by id. Text and markup share one content slot; this is not an HTML parser.
#[derive(Debug, Default)]
pub struct DocumentMirror {
    elements: Mutex<HashMap<String, ElementState>>,
}

impl DocumentMirror {
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements = ids
            .into_iter()
            .map(|id| (id.into(), ElementState::default()))
            .collect();
        Self {
            elements: Mutex::new(elements),
        }
    }

    /// Records what the user typed into an input; not counted as a render write.
    pub fn set_input_value(&self, id: &str, value: &str) -> bool {
        match self.elements.lock_or_recover().get_mut(id) {
            Some(element) => {
                element.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Number of text/markup writes applied to `id`.
    pub fn writes(&self, id: &str) -> usize {
        self.elements
            .lock_or_recover()
            .get(id)
            .map(|e| e.writes)
            .unwrap_or(0)
    }

    /// Returns whether the element exists (and was updated).
    pub(crate) fn write_content(&self, id: &str, content: &str) -> bool {
        match self.elements.lock_or_recover().get_mut(id) {
            Some(element) => {
                element.content = content.to_string();
                element.writes += 1;
                true
            }
            None => false,
        }
    }

    fn content(&self, id: &str) -> Option<String> {
        self.elements
            .lock_or_recover()
            .get(id)
            .map(|e| e.content.clone())
    }
}

impl Document for DocumentMirror {
    fn contains(&self, id: &str) -> bool {
        self.elements.lock_or_recover().contains_key(id)
    }

    fn text_content(&self, id: &str) -> Option<String> {
        self.content(id)
    }

    fn set_text_content(&self, id: &str, text: &str) {
        self.write_content(id, text);
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.content(id)
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        self.write_content(id, html);
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.elements
            .lock_or_recover()
            .get(id)
            .map(|e| e.value.clone())
    }
}
