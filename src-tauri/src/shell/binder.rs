//! Usage: Resolve element handles once the document is ready.

use super::document::{ids, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHandle(&'static str);

impl ElementHandle {
    pub fn id(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomBindings {
    pub greet_input: Option<ElementHandle>,
    pub greet_msg: Option<ElementHandle>,
    pub clock: Option<ElementHandle>,
    pub power: Option<ElementHandle>,
    pub timer_input: Option<ElementHandle>,
    pub timer_list: Option<ElementHandle>,
    pub status: Option<ElementHandle>,
}

fn resolve(document: &dyn Document, id: &'static str) -> Option<ElementHandle> {
    document.contains(id).then_some(ElementHandle(id))
}

impl DomBindings {
    pub fn resolve(document: &dyn Document) -> Self {
        let bindings = Self {
            greet_input: resolve(document, ids::GREET_INPUT),
            greet_msg: resolve(document, ids::GREET_MSG),
            clock: resolve(document, ids::CLOCK),
            power: resolve(document, ids::POWER),
            timer_input: resolve(document, ids::TIMER_INPUT),
            timer_list: resolve(document, ids::TIMER_LIST),
            status: resolve(document, ids::STATUS),
        };
        tracing::debug!(missing = ?bindings.missing(), "dom bindings resolved");
        bindings
    }

    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.greet_input, ids::GREET_INPUT),
            (self.greet_msg, ids::GREET_MSG),
            (self.clock, ids::CLOCK),
            (self.power, ids::POWER),
            (self.timer_input, ids::TIMER_INPUT),
            (self.timer_list, ids::TIMER_LIST),
            (self.status, ids::STATUS),
        ]
        .into_iter()
        .filter(|(handle, _)| handle.is_none())
        .map(|(_, id)| id)
        .collect()
    }
}
