mod action_bar;
pub mod dialogs;
mod entry_list;
mod tab_page;

use libadwaita as adw;
use adw::prelude::*;

use crate::app_state::AppState;

pub struct MainWindow;

impl MainWindow {
    pub fn new(app: &adw::Application, state: &AppState) -> adw::ApplicationWindow {
        let config = state.tools.config();

        let window = adw::ApplicationWindow::builder()
            .application(app)
            .title("NILFS GUI")
            .default_width(config.ui_window_width)
            .default_height(config.ui_window_height)
            .build();

        let stack = adw::ViewStack::new();
        for tab in state.tabs() {
            let page = tab_page::build_tab_page(&window, tab);
            let icon = match tab.title() {
                "Mounts" => "drive-harddisk-symbolic",
                _ => "camera-photo-symbolic",
            };
            stack.add_titled_with_icon(&page, Some(tab.title()), tab.title(), icon);
        }

        let switcher = adw::ViewSwitcher::builder()
            .stack(&stack)
            .policy(adw::ViewSwitcherPolicy::Wide)
            .build();

        let header = adw::HeaderBar::new();
        header.set_title_widget(Some(&switcher));

        let toolbar_view = adw::ToolbarView::new();
        toolbar_view.add_top_bar(&header);
        toolbar_view.set_content(Some(&stack));

        window.set_content(Some(&toolbar_view));
        window
    }
}
