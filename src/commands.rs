//! Command surface: a filterable read-model of user-invokable actions
//! derived from the current window store and a fixed launchable catalog.
//! No persistence of its own; entries are rebuilt from state on demand.

use crate::layout::SnapZone;
use crate::window::{WindowId, WindowStore};

/// A content ref the shell knows how to open as an app pane.
#[derive(Debug, Clone)]
pub struct Launchable {
    pub content_ref: String,
    pub label: String,
    pub keywords: Vec<String>,
}

impl Launchable {
    pub fn new(content_ref: &str, label: &str, keywords: &[&str]) -> Self {
        Self {
            content_ref: content_ref.to_string(),
            label: label.to_string(),
            keywords: keywords.iter().map(|kw| kw.to_string()).collect(),
        }
    }
}

/// What an entry does when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    FocusOrOpen { content_ref: String },
    OpenNew { content_ref: String },
    Close(WindowId),
    Minimize(WindowId),
    ToggleMaximize(WindowId),
    Snap(WindowId, SnapZone),
    ToggleTheme,
    Disconnect,
}

#[derive(Debug, Clone)]
pub struct CommandEntry {
    pub label: String,
    pub hint: String,
    pub keywords: Vec<String>,
    pub action: CommandAction,
}

impl CommandEntry {
    fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.label.to_lowercase().contains(needle)
            || self.hint.to_lowercase().contains(needle)
            || self
                .keywords
                .iter()
                .any(|kw| kw.to_lowercase().contains(needle))
    }
}

/// Builds the full entry list for the current state: two entries per
/// launchable, per-window actions only while a window is focused, and the
/// global actions last.
pub fn build_entries(store: &WindowStore, catalog: &[Launchable]) -> Vec<CommandEntry> {
    let mut entries = Vec::new();
    for launchable in catalog {
        entries.push(CommandEntry {
            label: launchable.label.clone(),
            hint: "focus or open".to_string(),
            keywords: launchable.keywords.clone(),
            action: CommandAction::FocusOrOpen {
                content_ref: launchable.content_ref.clone(),
            },
        });
        entries.push(CommandEntry {
            label: format!("{}: new window", launchable.label),
            hint: "open new instance".to_string(),
            keywords: launchable.keywords.clone(),
            action: CommandAction::OpenNew {
                content_ref: launchable.content_ref.clone(),
            },
        });
    }
    if let Some(focused) = store.focused() {
        let title = store
            .window(focused)
            .and_then(|win| win.label.clone())
            .unwrap_or_else(|| {
                store
                    .window(focused)
                    .map(|win| win.content_ref.clone())
                    .unwrap_or_default()
            });
        let window_actions: [(&str, CommandAction); 6] = [
            ("close window", CommandAction::Close(focused)),
            ("minimize window", CommandAction::Minimize(focused)),
            ("maximize / restore", CommandAction::ToggleMaximize(focused)),
            ("snap left", CommandAction::Snap(focused, SnapZone::Left)),
            ("snap right", CommandAction::Snap(focused, SnapZone::Right)),
            ("snap top", CommandAction::Snap(focused, SnapZone::Top)),
        ];
        for (label, action) in window_actions {
            entries.push(CommandEntry {
                label: label.to_string(),
                hint: title.clone(),
                keywords: vec!["window".to_string()],
                action,
            });
        }
    }
    entries.push(CommandEntry {
        label: "toggle theme".to_string(),
        hint: "light / dark".to_string(),
        keywords: vec!["appearance".to_string()],
        action: CommandAction::ToggleTheme,
    });
    entries.push(CommandEntry {
        label: "disconnect".to_string(),
        hint: "leave the gateway".to_string(),
        keywords: vec!["quit".to_string(), "exit".to_string()],
        action: CommandAction::Disconnect,
    });
    entries
}

/// Filter + selection state for the command list. The selection index is
/// relative to the filtered view and clamps to its length; changing the
/// query resets it to the top.
#[derive(Debug, Default)]
pub struct CommandPalette {
    query: String,
    selected: usize,
}

impl CommandPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.selected = 0;
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Case-insensitive substring filter over label, hint, and keywords.
    pub fn filtered<'a>(&self, entries: &'a [CommandEntry]) -> Vec<&'a CommandEntry> {
        let needle = self.query.to_lowercase();
        entries
            .iter()
            .filter(|entry| entry.matches(&needle))
            .collect()
    }

    pub fn move_selection(&mut self, delta: isize, filtered_len: usize) {
        if filtered_len == 0 {
            self.selected = 0;
            return;
        }
        let max = filtered_len - 1;
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, max as isize) as usize;
    }

    /// The entry the selection currently points at, after clamping against
    /// the filtered view.
    pub fn selected_entry<'a>(&self, entries: &'a [CommandEntry]) -> Option<&'a CommandEntry> {
        let filtered = self.filtered(entries);
        if filtered.is_empty() {
            return None;
        }
        let index = self.selected.min(filtered.len() - 1);
        Some(filtered[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use crate::protocol::SurfaceKind;
    use crate::window::OpenDisposition;

    fn catalog() -> Vec<Launchable> {
        vec![
            Launchable::new("chat", "Chat", &["conversation", "talk"]),
            Launchable::new("nodes", "Nodes", &["devices"]),
        ]
    }

    #[test]
    fn window_actions_only_when_focused() {
        let mut store = WindowStore::new(Rect::new(0, 0, 1000, 700));
        let without = build_entries(&store, &catalog());
        assert!(
            without
                .iter()
                .all(|entry| !matches!(entry.action, CommandAction::Close(_)))
        );

        let (id, _) = store.open(SurfaceKind::App, "chat", None, OpenDisposition::Reuse);
        let with = build_entries(&store, &catalog());
        assert!(
            with.iter()
                .any(|entry| entry.action == CommandAction::Close(id))
        );
        // 2 per launchable + 6 window actions + 2 globals.
        assert_eq!(with.len(), without.len() + 6);
    }

    #[test]
    fn filter_is_case_insensitive_over_all_fields() {
        let store = WindowStore::new(Rect::new(0, 0, 1000, 700));
        let entries = build_entries(&store, &catalog());
        let mut palette = CommandPalette::new();
        palette.set_query("TALK");
        let filtered = palette.filtered(&entries);
        assert_eq!(filtered.len(), 2);
        assert!(
            filtered
                .iter()
                .all(|entry| entry.keywords.contains(&"talk".to_string()))
        );
    }

    #[test]
    fn query_change_resets_selection_and_clamps() {
        let store = WindowStore::new(Rect::new(0, 0, 1000, 700));
        let entries = build_entries(&store, &catalog());
        let mut palette = CommandPalette::new();
        palette.move_selection(100, palette.filtered(&entries).len());
        assert_eq!(palette.selected(), palette.filtered(&entries).len() - 1);
        palette.move_selection(-100, palette.filtered(&entries).len());
        assert_eq!(palette.selected(), 0);
        palette.move_selection(2, palette.filtered(&entries).len());
        palette.set_query("chat");
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn selected_entry_none_when_nothing_matches() {
        let store = WindowStore::new(Rect::new(0, 0, 1000, 700));
        let entries = build_entries(&store, &catalog());
        let mut palette = CommandPalette::new();
        palette.set_query("zzzzz");
        assert!(palette.selected_entry(&entries).is_none());
    }
}
