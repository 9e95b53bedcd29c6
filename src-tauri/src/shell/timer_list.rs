//! Usage: Keyed model of the timer list (key = timer id) with insert/update/remove patches.

use super::format::format_clock_timer;
use crate::domain::clock::ClockReading;
use std::collections::{HashMap, HashSet};

const ITEM_OPEN: &str = r#"<li class="timer-list-item""#;
const ITEM_CLOSE: &str = "</li>";

pub fn timer_fragment(timer: &ClockReading) -> String {
    format!(
        r#"{ITEM_OPEN} id="timer_{}">{}{ITEM_CLOSE}"#,
        timer.id,
        format_clock_timer(timer)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPatch {
    Insert { id: u64, index: usize },
    Update { id: u64 },
    Remove { id: u64 },
    Reorder,
}

#[derive(Debug, Clone)]
struct Entry {
    id: u64,
    fragment: String,
}

#[derive(Debug, Default)]
pub struct TimerListView {
    entries: Vec<Entry>,
    synced: bool,
}

impl TimerListView {
    /// Replaces the model with `timers` (display order). Duplicate ids keep their first entry.
    pub fn apply_snapshot(&mut self, timers: &[ClockReading]) -> Vec<ListPatch> {
        let mut seen = HashSet::new();
        let next: Vec<Entry> = timers
            .iter()
            .filter(|t| seen.insert(t.id))
            .map(|t| Entry {
                id: t.id,
                fragment: timer_fragment(t),
            })
            .collect();

        let patches = {
            let previous: HashMap<u64, &str> = self
                .entries
                .iter()
                .map(|e| (e.id, e.fragment.as_str()))
                .collect();

            let mut patches: Vec<ListPatch> = self
                .entries
                .iter()
                .filter(|e| !seen.contains(&e.id))
                .map(|e| ListPatch::Remove { id: e.id })
                .collect();

            for (index, entry) in next.iter().enumerate() {
                match previous.get(&entry.id) {
                    None => patches.push(ListPatch::Insert {
                        id: entry.id,
                        index,
                    }),
                    Some(fragment) if *fragment != entry.fragment => {
                        patches.push(ListPatch::Update { id: entry.id })
                    }
                    Some(_) => {}
                }
            }

            let kept_before: Vec<u64> = self
                .entries
                .iter()
                .map(|e| e.id)
                .filter(|id| seen.contains(id))
                .collect();
            let kept_after: Vec<u64> = next
                .iter()
                .map(|e| e.id)
                .filter(|id| previous.contains_key(id))
                .collect();
            if kept_before != kept_after {
                patches.push(ListPatch::Reorder);
            }
            patches
        };

        self.entries = next;
        self.synced = true;
        patches
    }

    /// Inserts at the end, or updates in place when the id is already listed.
    pub fn upsert(&mut self, timer: &ClockReading) -> Option<ListPatch> {
        let fragment = timer_fragment(timer);
        match self.entries.iter_mut().find(|e| e.id == timer.id) {
            Some(entry) if entry.fragment == fragment => None,
            Some(entry) => {
                entry.fragment = fragment;
                Some(ListPatch::Update { id: timer.id })
            }
            None => {
                let index = self.entries.len();
                self.entries.push(Entry {
                    id: timer.id,
                    fragment,
                });
                Some(ListPatch::Insert {
                    id: timer.id,
                    index,
                })
            }
        }
    }

    /// Whether a snapshot has been applied since creation.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn markup(&self) -> String {
        self.entries.iter().map(|e| e.fragment.as_str()).collect()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
