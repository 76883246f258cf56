//! Button row at the bottom of each tab
//!
//! Quit, the panel's two actions and Refresh, left to right.

use gtk::prelude::*;
use gtk::{Button, Orientation};

use crate::actions::{Action, PanelKind};

pub struct ActionBar {
    pub container: gtk::Box,
    pub quit: Button,
    pub primary: Button,
    pub secondary: Button,
    pub refresh: Button,
}

/// Create the button row for a panel
///
/// Both action buttons start insensitive; they become sensitive once the
/// panel has a selection for them.
pub fn create_action_bar(kind: PanelKind) -> ActionBar {
    let container = gtk::Box::new(Orientation::Horizontal, 12);
    container.set_margin_top(18);
    container.set_margin_bottom(12);

    let quit = Button::builder().label("Quit").build();
    quit.add_css_class("flat");
    container.append(&quit);

    // Spacer
    let spacer = gtk::Box::new(Orientation::Horizontal, 0);
    spacer.set_hexpand(true);
    container.append(&spacer);

    let primary = action_button(kind.primary());
    primary.add_css_class("suggested-action");
    container.append(&primary);

    let secondary = action_button(kind.secondary());
    if kind.secondary() == Action::RemoveSnapshot {
        secondary.add_css_class("destructive-action");
    }
    container.append(&secondary);

    let refresh = Button::builder()
        .icon_name("view-refresh-symbolic")
        .tooltip_text("Refresh")
        .build();
    container.append(&refresh);

    ActionBar {
        container,
        quit,
        primary,
        secondary,
        refresh,
    }
}

fn action_button(action: Action) -> Button {
    let button = Button::builder()
        .label(action.label())
        .tooltip_text(action.tooltip())
        .build();
    button.add_css_class("pill");
    button.set_sensitive(false);
    button
}
