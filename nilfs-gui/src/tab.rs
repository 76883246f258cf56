//! Tab controllers: two lists wired to one action panel

use std::rc::{Rc, Weak};

use nilfs_gui_common::{EntryKind, Selection};

use crate::actions::{Action, ActionOutcome, ActionPanel, PanelKind};
use crate::list_view::{ListKind, ListView};
use crate::nilfs::NilfsTools;
use crate::signal::Signal;

pub struct Tab {
    title: &'static str,
    tools: Rc<NilfsTools>,
    /// Selecting here enables the panel's primary action
    primary_list: Rc<ListView>,
    /// Selecting here enables the panel's secondary action
    secondary_list: Rc<ListView>,
    panel: Rc<ActionPanel>,
    /// Fired after this tab refreshed because of its own panel
    pub refreshed_by_panel: Signal<()>,
}

impl Tab {
    /// Mounted checkpoints plus snapshots that can be mounted
    pub fn mounts(tools: Rc<NilfsTools>) -> Rc<Self> {
        let rows = tools.config().max_visible_rows;
        Self::build(
            "Mounts",
            tools,
            ListView::new(ListKind::Entries(EntryKind::Snapshot), rows),
            ListView::new(ListKind::Mounts, rows),
            PanelKind::Mount,
        )
    }

    /// Checkpoints that can become snapshots and snapshots that can be released
    pub fn snapshots(tools: Rc<NilfsTools>) -> Rc<Self> {
        let rows = tools.config().max_visible_rows;
        Self::build(
            "Snapshots",
            tools,
            ListView::new(ListKind::Entries(EntryKind::Checkpoint), rows),
            ListView::new(ListKind::Entries(EntryKind::Snapshot), rows),
            PanelKind::Snapshot,
        )
    }

    fn build(
        title: &'static str,
        tools: Rc<NilfsTools>,
        primary_list: ListView,
        secondary_list: ListView,
        kind: PanelKind,
    ) -> Rc<Self> {
        let tab = Rc::new(Self {
            title,
            tools,
            primary_list: Rc::new(primary_list),
            secondary_list: Rc::new(secondary_list),
            panel: Rc::new(ActionPanel::new(kind)),
            refreshed_by_panel: Signal::default(),
        });
        tab.wire();
        tab
    }

    fn wire(self: &Rc<Self>) {
        let panel = Rc::downgrade(&self.panel);
        self.primary_list.selected.connect(move |selection: &Selection| {
            if let Some(panel) = panel.upgrade() {
                panel.enable_primary(selection.clone());
                panel.disable_secondary();
            }
        });

        let panel = Rc::downgrade(&self.panel);
        self.secondary_list.selected.connect(move |selection: &Selection| {
            if let Some(panel) = panel.upgrade() {
                panel.disable_primary();
                panel.enable_secondary(selection.clone());
            }
        });

        for list in [&self.primary_list, &self.secondary_list] {
            let panel = Rc::downgrade(&self.panel);
            list.deselected.connect(move |_| {
                if let Some(panel) = panel.upgrade() {
                    panel.disable_primary();
                    panel.disable_secondary();
                }
            });
        }

        let tab: Weak<Self> = Rc::downgrade(self);
        self.panel.refresh_requested.connect(move |_| {
            if let Some(tab) = tab.upgrade() {
                tab.refresh();
                tab.refreshed_by_panel.emit(&());
            }
        });
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn panel(&self) -> &Rc<ActionPanel> {
        &self.panel
    }

    pub fn primary_list(&self) -> &Rc<ListView> {
        &self.primary_list
    }

    pub fn secondary_list(&self) -> &Rc<ListView> {
        &self.secondary_list
    }

    /// Lists in the order they are shown, top to bottom
    pub fn display_order(&self) -> [&Rc<ListView>; 2] {
        [self.secondary_list(), self.primary_list()]
    }

    /// Reload both lists of this tab only
    pub fn refresh(&self) {
        self.primary_list.refresh(&self.tools);
        self.secondary_list.refresh(&self.tools);
    }

    /// Refresh button: reload this tab and let the other tab follow
    pub fn request_refresh(&self) {
        self.panel.refresh_requested.emit(&());
    }

    pub fn trigger(&self, action: Action, directory: Option<&str>) -> ActionOutcome {
        self.panel.trigger(&self.tools, action, directory)
    }
}
