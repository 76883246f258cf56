//! Mount, checkpoint and snapshot lists
//!
//! A [`ListView`] owns the rows last loaded from the system and the current
//! selection. It knows nothing about GTK; the widget in `ui::entry_list`
//! renders it and forwards row clicks to [`ListView::select`].

use chrono::NaiveDateTime;
use std::cell::RefCell;

use nilfs_gui_common::format::{checkpoint_subtitle, checkpoint_title, mount_subtitle, mount_title};
use nilfs_gui_common::{CheckpointEntry, EntryKind, MountEntry, Selection};

use crate::nilfs::NilfsTools;
use crate::signal::Signal;

/// What a list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Checkpoints mounted read-only
    Mounts,
    /// `lscp` rows of one kind across all devices
    Entries(EntryKind),
}

impl ListKind {
    pub fn title(self) -> &'static str {
        match self {
            ListKind::Mounts => "Mounts",
            ListKind::Entries(kind) => kind.title(),
        }
    }

    pub fn empty_text(self) -> &'static str {
        match self {
            ListKind::Mounts => "No checkpoints are mounted",
            ListKind::Entries(EntryKind::Checkpoint) => "No checkpoints found",
            ListKind::Entries(EntryKind::Snapshot) => "No snapshots found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Mount(MountEntry),
    Checkpoint(CheckpointEntry),
}

impl Row {
    pub fn selection(&self) -> Selection {
        match self {
            Row::Mount(entry) => entry.selection(),
            Row::Checkpoint(entry) => entry.selection(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Row::Mount(entry) => mount_title(entry),
            Row::Checkpoint(entry) => checkpoint_title(entry),
        }
    }

    pub fn subtitle(&self, now: NaiveDateTime) -> String {
        match self {
            Row::Mount(entry) => mount_subtitle(entry),
            Row::Checkpoint(entry) => checkpoint_subtitle(entry, now),
        }
    }
}

#[derive(Default)]
struct ListState {
    rows: Vec<Row>,
    selected: Option<usize>,
    error: Option<String>,
}

pub struct ListView {
    kind: ListKind,
    max_visible_rows: usize,
    state: RefCell<ListState>,
    /// A row was selected
    pub selected: Signal<Selection>,
    /// The list was cleared and has no selection
    pub deselected: Signal<()>,
    /// Rows were reloaded
    pub changed: Signal<()>,
}

impl ListView {
    pub fn new(kind: ListKind, max_visible_rows: usize) -> Self {
        Self {
            kind,
            max_visible_rows: max_visible_rows.max(1),
            state: RefCell::new(ListState::default()),
            selected: Signal::default(),
            deselected: Signal::default(),
            changed: Signal::default(),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// Reload rows from the system
    ///
    /// The old rows and selection are dropped and `deselected` fires before
    /// anything is loaded. A failing listing leaves the list empty and keeps
    /// the error for display.
    pub fn refresh(&self, tools: &NilfsTools) {
        self.clear();

        let loaded: Result<Vec<Row>, String> = match self.kind {
            ListKind::Mounts => tools
                .mount_table()
                .map(|table| {
                    log::debug!("Mounted devices: {}", table.devices.join(", "));
                    table.entries.into_iter().map(Row::Mount).collect()
                })
                .map_err(|e| format!("{e:#}")),
            ListKind::Entries(kind) => Self::load_entries(tools, kind),
        };

        {
            let mut state = self.state.borrow_mut();
            match loaded {
                Ok(rows) => state.rows = rows,
                Err(message) => {
                    log::warn!("Failed to load {}: {message}", self.kind.title().to_lowercase());
                    state.error = Some(message);
                }
            }
        }

        self.changed.emit(&());
    }

    /// Rows of every device; the last device's block ends up on top
    fn load_entries(tools: &NilfsTools, kind: EntryKind) -> Result<Vec<Row>, String> {
        let devices = tools.devices().map_err(|e| format!("{e:#}"))?;
        let mut rows = Vec::new();
        let mut failures = Vec::new();

        for device in &devices {
            match tools.checkpoints(device, kind) {
                Ok(entries) => {
                    let mut block: Vec<Row> = entries.into_iter().map(Row::Checkpoint).collect();
                    block.append(&mut rows);
                    rows = block;
                }
                Err(e) => failures.push(format!("{e:#}")),
            }
        }

        if rows.is_empty() && !failures.is_empty() {
            return Err(failures.join("\n"));
        }
        for failure in failures {
            log::warn!("{failure}");
        }

        Ok(rows)
    }

    fn clear(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.rows.clear();
            state.selected = None;
            state.error = None;
        }
        self.deselected.emit(&());
    }

    /// Select row `index`; out of range indexes are ignored
    pub fn select(&self, index: usize) -> Option<Selection> {
        let selection = {
            let mut state = self.state.borrow_mut();
            let selection = state.rows.get(index)?.selection();
            state.selected = Some(index);
            selection
        };

        self.selected.emit(&selection);
        Some(selection)
    }

    /// Drop the selection but keep the rows
    pub fn clear_selection(&self) {
        self.state.borrow_mut().selected = None;
        self.deselected.emit(&());
    }

    pub fn selection(&self) -> Option<Selection> {
        let state = self.state.borrow();
        state.selected.and_then(|i| state.rows.get(i)).map(Row::selection)
    }

    pub fn rows(&self) -> Vec<Row> {
        self.state.borrow().rows.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().rows.len()
    }

    /// Error from the last refresh, if the listing failed
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// How many rows the widget should show without scrolling
    ///
    /// Checkpoint and snapshot lists are capped; the mount list grows to fit.
    pub fn visible_rows(&self) -> usize {
        let len = self.len();
        match self.kind {
            ListKind::Mounts => len,
            ListKind::Entries(_) => len.min(self.max_visible_rows),
        }
    }
}
