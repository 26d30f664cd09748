//! List View State
//!
//! Everything the list screen holds in memory: the mirrored items, per-row
//! edit buffers and the loading/error phase. The new-item draft is kept apart
//! so typing into the add form does not touch the list.
//! Transitions are plain methods so the view stays a thin renderer.

use std::collections::HashMap;

use crate::model::{Thing, ThingId};

/// Message shown when the live feed breaks
pub const FEED_ERROR_MESSAGE: &str = "Could not get things";

/// Where the screen is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Phase {
    /// No snapshot yet
    #[default]
    Loading,
    Ready,
    /// Live feed failed; terminal for the session
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    items: Vec<Thing>,
    edits: HashMap<ThingId, String>,
    phase: Phase,
}

/// Save is offered only for a non-empty buffer that differs from `content`.
pub fn save_enabled(buffer: &str, content: &str) -> bool {
    !buffer.is_empty() && buffer != content
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Thing] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Mirror a pushed snapshot. Returns `false` once the feed has failed,
    /// in which case nothing changes.
    pub fn apply_snapshot(&mut self, things: Vec<Thing>) -> bool {
        if matches!(self.phase, Phase::Failed(_)) {
            return false;
        }

        // Keep a row's buffer only while its backing content is unchanged.
        let incoming: HashMap<&ThingId, &str> = things
            .iter()
            .map(|t| (&t.id, t.content.as_str()))
            .collect();
        let previous = &self.items;
        self.edits.retain(|id, _| {
            let before = previous
                .iter()
                .find(|t| &t.id == id)
                .map(|t| t.content.as_str());
            matches!((before, incoming.get(id)), (Some(b), Some(now)) if b == *now)
        });

        self.items = things;
        self.phase = Phase::Ready;
        true
    }

    /// Enter the terminal error phase. The first message wins.
    pub fn fail(&mut self, message: impl Into<String>) {
        if matches!(self.phase, Phase::Failed(_)) {
            return;
        }
        self.phase = Phase::Failed(message.into());
        self.edits.clear();
    }

    pub fn find(&self, id: &ThingId) -> Option<&Thing> {
        self.items.iter().find(|t| &t.id == id)
    }

    // ========================
    // Row edit buffers
    // ========================

    /// Text in a row's input: its edit buffer, else the item's content.
    pub fn row_text(&self, id: &ThingId) -> &str {
        match self.edits.get(id) {
            Some(buffer) => buffer.as_str(),
            None => self.find(id).map(|t| t.content.as_str()).unwrap_or(""),
        }
    }

    pub fn edit_row(&mut self, id: &ThingId, text: impl Into<String>) {
        if self.find(id).is_some() {
            self.edits.insert(id.clone(), text.into());
        }
    }

    pub fn can_save(&self, id: &ThingId) -> bool {
        match self.find(id) {
            Some(thing) => save_enabled(self.row_text(id), &thing.content),
            None => false,
        }
    }

    /// Buffer to send to `update`, if the row's save control is enabled.
    pub fn pending_edit(&self, id: &ThingId) -> Option<String> {
        self.can_save(id).then(|| self.row_text(id).to_string())
    }
}

/// Input buffer of the add form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft(String);

impl Draft {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.0 = text.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.0.is_empty()
    }

    /// Take the text for submission, clearing the buffer. `None` when empty.
    pub fn take(&mut self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn thing(id: &str, content: &str, secs: i64) -> Thing {
        Thing::new(
            ThingId::from(id),
            content,
            Utc.timestamp_opt(secs, 0).single().expect("valid timestamp"),
        )
    }

    #[test]
    fn starts_loading() {
        let state = ListState::new();
        assert!(state.is_loading());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn empty_snapshot_clears_loading() {
        let mut state = ListState::new();
        assert!(state.apply_snapshot(Vec::new()));
        assert!(!state.is_loading());
        assert!(state.items().is_empty());
    }

    #[test]
    fn snapshot_replaces_items_wholesale() {
        let mut state = ListState::new();
        state.apply_snapshot(vec![thing("a", "A", 1), thing("b", "B", 2)]);
        state.apply_snapshot(vec![thing("b", "B", 2)]);
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].id.as_str(), "b");
    }

    #[test]
    fn failure_is_terminal() {
        let mut state = ListState::new();
        state.apply_snapshot(vec![thing("a", "A", 1)]);
        state.fail(FEED_ERROR_MESSAGE);

        assert!(!state.apply_snapshot(vec![thing("a", "A", 1), thing("b", "B", 2)]));
        state.fail("something else");

        assert_eq!(state.error(), Some(FEED_ERROR_MESSAGE));
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn save_enablement() {
        assert!(!save_enabled("A", "A"));
        assert!(!save_enabled("", "A"));
        assert!(save_enabled("B", "A"));
        assert!(save_enabled("A ", "A"));
    }

    #[test]
    fn row_buffer_follows_content() {
        let id = ThingId::from("a");
        let mut state = ListState::new();
        state.apply_snapshot(vec![thing("a", "A", 1)]);

        assert_eq!(state.row_text(&id), "A");
        assert!(!state.can_save(&id));

        state.edit_row(&id, "");
        assert!(!state.can_save(&id));
        assert_eq!(state.pending_edit(&id), None);

        state.edit_row(&id, "AB");
        assert_eq!(state.pending_edit(&id).as_deref(), Some("AB"));
    }

    #[test]
    fn snapshot_resets_only_changed_rows() {
        let a = ThingId::from("a");
        let b = ThingId::from("b");
        let mut state = ListState::new();
        state.apply_snapshot(vec![thing("a", "A", 1), thing("b", "B", 2)]);
        state.edit_row(&a, "A draft");
        state.edit_row(&b, "B draft");

        state.apply_snapshot(vec![thing("a", "A", 1), thing("b", "B2", 2)]);

        assert_eq!(state.row_text(&a), "A draft");
        assert_eq!(state.row_text(&b), "B2");
    }

    #[test]
    fn removed_rows_drop_their_buffer() {
        let a = ThingId::from("a");
        let mut state = ListState::new();
        state.apply_snapshot(vec![thing("a", "A", 1)]);
        state.edit_row(&a, "gone soon");
        state.apply_snapshot(Vec::new());

        assert_eq!(state.row_text(&a), "");
        assert!(!state.can_save(&a));
    }

    #[test]
    fn draft_is_cleared_on_take() {
        let mut draft = Draft::default();
        assert_eq!(draft.take(), None);

        draft.set("milk");
        assert!(draft.can_submit());
        assert_eq!(draft.take().as_deref(), Some("milk"));
        assert_eq!(draft.as_str(), "");
        assert!(!draft.can_submit());
    }
}
