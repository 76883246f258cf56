//! Action panels: which buttons are enabled and what they run
//!
//! Each panel has a primary and a secondary action. An action is enabled by
//! handing it the selection it will operate on, and disabled by taking the
//! selection away again.

use std::cell::RefCell;

use nilfs_gui_common::{response_text, validate_directory, EntryKind, Selection};

use crate::command::CommandOutput;
use crate::nilfs::NilfsTools;
use crate::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Mount,
    Snapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Mount,
    Unmount,
    CreateSnapshot,
    RemoveSnapshot,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Mount => "Mount",
            Action::Unmount => "Unmount",
            Action::CreateSnapshot => "Create Snapshot",
            Action::RemoveSnapshot => "Remove Snapshot",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            Action::Mount => "Mount the selected snapshot read-only",
            Action::Unmount => "Unmount the selected checkpoint",
            Action::CreateSnapshot => "Turn the selected checkpoint into a snapshot",
            Action::RemoveSnapshot => "Turn the selected snapshot back into a checkpoint",
        }
    }

    /// Mount asks for a target directory before running
    pub fn needs_directory(self) -> bool {
        matches!(self, Action::Mount)
    }
}

impl PanelKind {
    pub fn primary(self) -> Action {
        match self {
            PanelKind::Mount => Action::Mount,
            PanelKind::Snapshot => Action::CreateSnapshot,
        }
    }

    pub fn secondary(self) -> Action {
        match self {
            PanelKind::Mount => Action::Unmount,
            PanelKind::Snapshot => Action::RemoveSnapshot,
        }
    }
}

/// Result of pressing an action button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing ran: no selection, or the directory prompt was cancelled
    Skipped,
    /// A command ran (or was refused); `response` is what the user is shown
    Completed { response: Option<String> },
}

pub struct ActionPanel {
    kind: PanelKind,
    primary: RefCell<Option<Selection>>,
    secondary: RefCell<Option<Selection>>,
    /// Enabled state of a button changed
    pub state_changed: Signal<()>,
    /// Text to show in the command response dialog
    pub response: Signal<String>,
    /// Lists should be reloaded
    pub refresh_requested: Signal<()>,
}

impl ActionPanel {
    pub fn new(kind: PanelKind) -> Self {
        Self {
            kind,
            primary: RefCell::new(None),
            secondary: RefCell::new(None),
            state_changed: Signal::default(),
            response: Signal::default(),
            refresh_requested: Signal::default(),
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn enable_primary(&self, selection: Selection) {
        *self.primary.borrow_mut() = Some(selection);
        self.state_changed.emit(&());
    }

    pub fn disable_primary(&self) {
        *self.primary.borrow_mut() = None;
        self.state_changed.emit(&());
    }

    pub fn enable_secondary(&self, selection: Selection) {
        *self.secondary.borrow_mut() = Some(selection);
        self.state_changed.emit(&());
    }

    pub fn disable_secondary(&self) {
        *self.secondary.borrow_mut() = None;
        self.state_changed.emit(&());
    }

    /// Selection an action would operate on; `None` means its button is disabled
    pub fn selection_for(&self, action: Action) -> Option<Selection> {
        if action == self.kind.primary() {
            self.primary.borrow().clone()
        } else if action == self.kind.secondary() {
            self.secondary.borrow().clone()
        } else {
            None
        }
    }

    pub fn is_enabled(&self, action: Action) -> bool {
        self.selection_for(action).is_some()
    }

    /// Run `action` against its current selection
    ///
    /// `directory` is the directory chooser result for [`Action::Mount`] and
    /// ignored otherwise. Unless the outcome is `Skipped`, any response text
    /// is emitted on `response` and a refresh is always requested afterwards.
    pub fn trigger(&self, tools: &NilfsTools, action: Action, directory: Option<&str>) -> ActionOutcome {
        let Some(selection) = self.selection_for(action) else {
            log::debug!("{} pressed without a selection", action.label());
            return ActionOutcome::Skipped;
        };

        let result = match action {
            Action::Mount => {
                let directory = match validate_directory(directory.unwrap_or_default()) {
                    None => return ActionOutcome::Skipped,
                    Some(Ok(directory)) => directory,
                    Some(Err(e)) => return self.finish(Some(e.to_string())),
                };
                tools.mount_checkpoint(&selection, &directory)
            }
            Action::Unmount => tools.unmount(&selection.target),
            Action::CreateSnapshot => tools.change_mode(EntryKind::Snapshot, &selection),
            Action::RemoveSnapshot => tools.change_mode(EntryKind::Checkpoint, &selection),
        };

        let response = match result {
            Ok(output) => Self::response_for(&output),
            Err(e) => {
                log::error!("{} failed: {e:#}", action.label());
                Some(format!("{e:#}"))
            }
        };

        self.finish(response)
    }

    fn response_for(output: &CommandOutput) -> Option<String> {
        response_text(&output.combined())
    }

    fn finish(&self, response: Option<String>) -> ActionOutcome {
        if let Some(text) = &response {
            self.response.emit(text);
        }
        self.refresh_requested.emit(&());
        ActionOutcome::Completed { response }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::fake::FakeRunner;
    use nilfs_gui_common::NilfsConfig;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Harness {
        runner: Rc<FakeRunner>,
        tools: NilfsTools,
        panel: ActionPanel,
        responses: Rc<RefCell<Vec<String>>>,
        refreshes: Rc<Cell<usize>>,
    }

    fn harness(kind: PanelKind) -> Harness {
        let runner = Rc::new(FakeRunner::new());
        let tools = NilfsTools::with_elevation(NilfsConfig::default(), runner.clone(), true);
        let panel = ActionPanel::new(kind);

        let responses = Rc::new(RefCell::new(Vec::new()));
        let r = responses.clone();
        panel.response.connect(move |text| r.borrow_mut().push(text.clone()));

        let refreshes = Rc::new(Cell::new(0));
        let c = refreshes.clone();
        panel.refresh_requested.connect(move |_| c.set(c.get() + 1));

        Harness {
            runner,
            tools,
            panel,
            responses,
            refreshes,
        }
    }

    fn snapshot(cp: u64) -> Selection {
        Selection {
            checkpoint: cp,
            target: "/dev/sda5".to_string(),
        }
    }

    #[test]
    fn test_mount_without_selection_is_noop() {
        let h = harness(PanelKind::Mount);
        let outcome = h.panel.trigger(&h.tools, Action::Mount, Some("/mnt/x"));

        assert_eq!(outcome, ActionOutcome::Skipped);
        assert!(h.runner.calls().is_empty());
        assert!(h.responses.borrow().is_empty());
        assert_eq!(h.refreshes.get(), 0);
    }

    #[test]
    fn test_cancelled_directory_prompt() {
        let h = harness(PanelKind::Mount);
        h.panel.enable_primary(snapshot(17));

        assert_eq!(h.panel.trigger(&h.tools, Action::Mount, None), ActionOutcome::Skipped);
        assert_eq!(h.panel.trigger(&h.tools, Action::Mount, Some("  ")), ActionOutcome::Skipped);
        assert!(h.runner.calls().is_empty());
        assert_eq!(h.refreshes.get(), 0);
    }

    #[test]
    fn test_mount_scrubs_response() {
        let h = harness(PanelKind::Mount);
        h.runner.respond(
            "pkexec mount -t nilfs2 -r -o cp=17 /dev/sda5 /mnt/cp17",
            "GNOME_SUDO_PASS\nsudo: 1 incorrect password attempt\nDone.\n",
        );
        h.panel.enable_primary(snapshot(17));

        let outcome = h.panel.trigger(&h.tools, Action::Mount, Some("/mnt/cp17"));
        assert_eq!(
            outcome,
            ActionOutcome::Completed {
                response: Some("Done.\n".to_string())
            }
        );
        assert_eq!(*h.responses.borrow(), vec!["Done.\n"]);
        assert_eq!(h.refreshes.get(), 1);
    }

    #[test]
    fn test_silent_success_shows_no_dialog() {
        let h = harness(PanelKind::Mount);
        h.runner.respond("pkexec umount /mnt/backup", "GNOME_SUDO_PASS\n\n");
        h.panel.enable_secondary(Selection {
            checkpoint: 42,
            target: "/mnt/backup".to_string(),
        });

        let outcome = h.panel.trigger(&h.tools, Action::Unmount, None);
        assert_eq!(outcome, ActionOutcome::Completed { response: None });
        assert!(h.responses.borrow().is_empty());
        assert_eq!(h.refreshes.get(), 1);
    }

    #[test]
    fn test_stderr_is_shown() {
        let h = harness(PanelKind::Snapshot);
        h.runner.respond_with(
            "pkexec chcp cp /dev/sda5 9",
            CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: "chcp: cannot change mode of checkpoint 9\n".to_string(),
            },
        );
        h.panel.enable_secondary(snapshot(9));

        h.panel.trigger(&h.tools, Action::RemoveSnapshot, None);
        assert_eq!(
            *h.responses.borrow(),
            vec!["chcp: cannot change mode of checkpoint 9\n"]
        );
    }

    #[test]
    fn test_create_snapshot_command() {
        let h = harness(PanelKind::Snapshot);
        h.runner.respond("pkexec chcp ss /dev/sda5 17", "");
        h.panel.enable_primary(snapshot(17));

        h.panel.trigger(&h.tools, Action::CreateSnapshot, None);
        assert_eq!(h.runner.calls(), vec!["pkexec chcp ss /dev/sda5 17"]);
    }

    #[test]
    fn test_elevation_spawn_failure_is_reported() {
        let h = harness(PanelKind::Snapshot);
        h.panel.enable_primary(snapshot(17));

        h.panel.trigger(&h.tools, Action::CreateSnapshot, None);
        assert_eq!(h.responses.borrow().len(), 1);
        assert!(h.responses.borrow()[0].contains("pkexec"));
        assert_eq!(h.refreshes.get(), 1);
    }

    #[test]
    fn test_relative_directory_refused() {
        let h = harness(PanelKind::Mount);
        h.panel.enable_primary(snapshot(17));

        h.panel.trigger(&h.tools, Action::Mount, Some("relative/dir"));
        assert!(h.runner.calls().is_empty());
        assert_eq!(h.responses.borrow().len(), 1);
    }

    #[test]
    fn test_action_only_uses_its_own_slot() {
        let panel = ActionPanel::new(PanelKind::Snapshot);
        panel.enable_primary(snapshot(3));

        assert!(panel.is_enabled(Action::CreateSnapshot));
        assert!(!panel.is_enabled(Action::RemoveSnapshot));
        assert!(!panel.is_enabled(Action::Mount));
    }
}
