//! List widget for a [`ListView`]
//!
//! Rows are rebuilt from the model every time it reloads. Clicking a row
//! forwards its index to the model, which owns the selection.

use gtk::prelude::*;
use gtk::{Label, ListBox, Orientation, PolicyType, ScrolledWindow, SelectionMode};
use libadwaita as adw;
use adw::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

use crate::list_view::{ListView, Row};

/// Height of one `adw::ActionRow` with a subtitle
const ROW_HEIGHT: i32 = 58;

pub struct EntryList {
    container: gtk::Box,
}

impl EntryList {
    pub fn new(view: &Rc<ListView>) -> Self {
        let container = gtk::Box::new(Orientation::Vertical, 6);
        container.set_margin_top(12);

        let heading = Label::new(Some(view.kind().title()));
        heading.set_halign(gtk::Align::Start);
        heading.add_css_class("heading");
        container.append(&heading);

        let list = ListBox::new();
        list.set_selection_mode(SelectionMode::Single);
        list.add_css_class("boxed-list");

        let placeholder = Label::new(Some(view.kind().empty_text()));
        placeholder.add_css_class("dim-label");
        placeholder.set_wrap(true);
        placeholder.set_margin_top(12);
        placeholder.set_margin_bottom(12);
        placeholder.set_margin_start(12);
        placeholder.set_margin_end(12);
        list.set_placeholder(Some(&placeholder));

        let scrolled = ScrolledWindow::new();
        scrolled.set_policy(PolicyType::Never, PolicyType::Automatic);
        scrolled.set_propagate_natural_height(true);
        scrolled.set_child(Some(&list));
        container.append(&scrolled);

        // Set while rows are being replaced so GTK's own selection churn is ignored
        let rebuilding = Rc::new(Cell::new(false));

        let weak_view = Rc::downgrade(view);
        let guard = rebuilding.clone();
        list.connect_row_selected(move |_, row| {
            if guard.get() {
                return;
            }
            let Some(view) = weak_view.upgrade() else {
                return;
            };
            match row {
                Some(row) => {
                    if let Ok(index) = usize::try_from(row.index()) {
                        view.select(index);
                    }
                }
                // Ctrl+click on the highlighted row unselects it
                None => view.clear_selection(),
            }
        });

        let weak_view = Rc::downgrade(view);
        view.changed.connect(move |_| {
            let Some(view) = weak_view.upgrade() else {
                return;
            };

            rebuilding.set(true);
            while let Some(old) = list.row_at_index(0) {
                list.remove(&old);
            }

            let now = chrono::Local::now().naive_local();
            for row in view.rows() {
                list.append(&build_row(&row, now));
            }
            rebuilding.set(false);

            match view.error() {
                Some(error) => placeholder.set_text(&error),
                None => placeholder.set_text(view.kind().empty_text()),
            }

            let visible = i32::try_from(view.visible_rows().max(1)).unwrap_or(i32::MAX);
            scrolled.set_max_content_height(visible.saturating_mul(ROW_HEIGHT));
        });

        Self { container }
    }

    pub fn widget(&self) -> &gtk::Box {
        &self.container
    }
}

fn build_row(row: &Row, now: chrono::NaiveDateTime) -> adw::ActionRow {
    let action_row = adw::ActionRow::new();
    // Mount points are arbitrary paths, not markup
    action_row.set_use_markup(false);
    action_row.set_title(&row.title());
    action_row.set_subtitle(&row.subtitle(now));
    action_row.set_activatable(true);
    action_row
}
