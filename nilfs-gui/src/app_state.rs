use std::rc::Rc;

use nilfs_gui_common::NilfsConfig;

use crate::command::CommandRunner;
use crate::nilfs::NilfsTools;
use crate::tab::Tab;

/// Everything the window needs, owned by the application shell
pub struct AppState {
    pub tools: Rc<NilfsTools>,
    pub mounts: Rc<Tab>,
    pub snapshots: Rc<Tab>,
}

impl AppState {
    pub fn new(config: NilfsConfig, runner: Rc<dyn CommandRunner>) -> Self {
        Self::with_tools(Rc::new(NilfsTools::new(config, runner)))
    }

    pub fn with_tools(tools: Rc<NilfsTools>) -> Self {
        let mounts = Tab::mounts(tools.clone());
        let snapshots = Tab::snapshots(tools.clone());

        // A panel refresh reloads the other tab as well, one hop only
        let other = Rc::downgrade(&snapshots);
        mounts.refreshed_by_panel.connect(move |_| {
            if let Some(tab) = other.upgrade() {
                tab.refresh();
            }
        });
        let other = Rc::downgrade(&mounts);
        snapshots.refreshed_by_panel.connect(move |_| {
            if let Some(tab) = other.upgrade() {
                tab.refresh();
            }
        });

        Self {
            tools,
            mounts,
            snapshots,
        }
    }

    pub fn tabs(&self) -> [&Rc<Tab>; 2] {
        [&self.mounts, &self.snapshots]
    }

    pub fn refresh_all(&self) {
        for tab in self.tabs() {
            tab.refresh();
        }
    }
}
