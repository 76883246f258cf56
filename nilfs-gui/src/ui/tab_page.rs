//! One page of the view stack: two lists and the action bar

use gtk::prelude::*;
use gtk::{Button, Orientation, ScrolledWindow};
use libadwaita as adw;
use std::rc::Rc;

use crate::actions::{Action, ActionOutcome};
use crate::tab::Tab;

use super::action_bar::create_action_bar;
use super::dialogs;
use super::entry_list::EntryList;

pub fn build_tab_page(window: &adw::ApplicationWindow, tab: &Rc<Tab>) -> gtk::Widget {
    let content = gtk::Box::new(Orientation::Vertical, 0);
    for view in tab.display_order() {
        content.append(EntryList::new(view).widget());
    }

    let bar = create_action_bar(tab.panel().kind());
    content.append(&bar.container);

    // Keep button sensitivity in step with the panel
    let panel = Rc::downgrade(tab.panel());
    let primary = bar.primary.clone();
    let secondary = bar.secondary.clone();
    tab.panel().state_changed.connect(move |_| {
        if let Some(panel) = panel.upgrade() {
            primary.set_sensitive(panel.is_enabled(panel.kind().primary()));
            secondary.set_sensitive(panel.is_enabled(panel.kind().secondary()));
        }
    });

    let win = window.clone();
    tab.panel().response.connect(move |text: &String| {
        dialogs::show_info(&win, "Command Response", text);
    });

    let kind = tab.panel().kind();
    connect_action(window, tab, &bar.primary, kind.primary());
    connect_action(window, tab, &bar.secondary, kind.secondary());

    // Buttons keep their tab alive for as long as the window exists
    let tab_clone = tab.clone();
    bar.refresh.connect_clicked(move |_| {
        tab_clone.request_refresh();
    });

    bar.quit.connect_clicked(|_| {
        log::info!("Quit requested");
        std::process::exit(0);
    });

    let scrolled = ScrolledWindow::new();
    scrolled.set_vexpand(true);

    let clamp = adw::Clamp::new();
    clamp.set_maximum_size(800);
    clamp.set_tightening_threshold(600);
    clamp.set_child(Some(&content));
    clamp.set_margin_top(12);
    clamp.set_margin_bottom(12);
    clamp.set_margin_start(12);
    clamp.set_margin_end(12);
    scrolled.set_child(Some(&clamp));

    scrolled.upcast()
}

fn connect_action(window: &adw::ApplicationWindow, tab: &Rc<Tab>, button: &Button, action: Action) {
    let win = window.clone();
    let tab = tab.clone();

    button.connect_clicked(move |_| {
        if !action.needs_directory() {
            report(action, tab.trigger(action, None));
            return;
        }

        let Some(selection) = tab.panel().selection_for(action) else {
            return;
        };

        let weak_tab = Rc::downgrade(&tab);
        let title = format!("Mount Checkpoint {}", selection.checkpoint);
        dialogs::choose_directory(&win, &title, move |directory| {
            if let Some(tab) = weak_tab.upgrade() {
                report(action, tab.trigger(action, Some(&directory)));
            }
        });
    });
}

fn report(action: Action, outcome: ActionOutcome) {
    match outcome {
        ActionOutcome::Skipped => log::debug!("{} skipped", action.label()),
        ActionOutcome::Completed { response: None } => log::info!("{} completed", action.label()),
        ActionOutcome::Completed { response: Some(_) } => {
            log::info!("{} completed with output", action.label())
        }
    }
}
