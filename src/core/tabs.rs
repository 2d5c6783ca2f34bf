//! Open-tab bookkeeping
//!
//! Tabs are an ordered list of open documents plus the id of the active one.
//! Every operation takes the current state by reference and returns the next
//! one, so callers can keep or drop the old state as they like.

use std::sync::Arc;

use crate::core::content::{ContentNode, NodeId};

/// A document open in the editor
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTab {
    pub node: Arc<ContentNode>,
    pub active: bool,
}

impl OpenTab {
    pub fn id(&self) -> NodeId {
        self.node.id()
    }
}

/// Tab list and active pointer, as returned by every operation
pub type TabState = (Vec<OpenTab>, Option<NodeId>);

/// Re-derive the `active` flags from the active pointer
fn with_active_flags(mut tabs: Vec<OpenTab>, active: Option<NodeId>) -> Vec<OpenTab> {
    for tab in &mut tabs {
        tab.active = Some(tab.id()) == active;
    }
    tabs
}

/// Open `node` and make it active.
///
/// The tab is appended only when no tab with the same id exists. Folders are
/// not openable and leave the state as it was.
pub fn open_document(
    tabs: &[OpenTab],
    active: Option<NodeId>,
    node: &Arc<ContentNode>,
) -> TabState {
    if !node.is_document() {
        return (tabs.to_vec(), active);
    }

    let mut next = tabs.to_vec();
    if !next.iter().any(|tab| tab.id() == node.id()) {
        next.push(OpenTab {
            node: Arc::clone(node),
            active: false,
        });
    }

    let active = Some(node.id());
    (with_active_flags(next, active), active)
}

/// Close the tab showing `id`.
///
/// If it was the active tab, the last remaining tab becomes active (or none
/// when nothing is left). Closing a tab that is not open changes nothing.
pub fn close_tab(tabs: &[OpenTab], active: Option<NodeId>, id: NodeId) -> TabState {
    let next: Vec<OpenTab> = tabs.iter().filter(|tab| tab.id() != id).cloned().collect();

    let active = if active == Some(id) {
        next.last().map(OpenTab::id)
    } else {
        active
    };

    (with_active_flags(next, active), active)
}

/// Activate an already open tab. Unknown ids change nothing.
pub fn select_tab(tabs: &[OpenTab], active: Option<NodeId>, id: NodeId) -> TabState {
    let active = if tabs.iter().any(|tab| tab.id() == id) {
        Some(id)
    } else {
        active
    };

    (with_active_flags(tabs.to_vec(), active), active)
}

/// Position of the active tab in the list
pub fn active_index(tabs: &[OpenTab], active: Option<NodeId>) -> Option<usize> {
    let active = active?;
    tabs.iter().position(|tab| tab.id() == active)
}

/// Id of the tab `offset` positions away from the active one, wrapping around
pub fn cycle(tabs: &[OpenTab], active: Option<NodeId>, offset: isize) -> Option<NodeId> {
    if tabs.is_empty() {
        return None;
    }
    let len = tabs.len() as isize;
    let current = active_index(tabs, active).unwrap_or(0) as isize;
    let index = (current + offset).rem_euclid(len) as usize;
    Some(tabs[index].id())
}
