mod actions;
mod app_state;
mod command;
mod list_view;
mod nilfs;
mod preflight;
mod signal;
mod tab;
mod ui;

use gtk::glib;
use gtk::prelude::*;
use libadwaita as adw;
use std::rc::Rc;

use nilfs_gui_common::{NilfsConfig, APP_ID};

use crate::app_state::AppState;
use crate::command::SystemRunner;

fn main() -> glib::ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = adw::Application::builder()
        .application_id(APP_ID)
        .build();

    app.connect_activate(build_ui);
    app.run()
}

fn build_ui(app: &adw::Application) {
    // A second launch only raises the existing window
    if let Some(window) = app.active_window() {
        window.present();
        return;
    }

    let config = NilfsConfig::new();
    log::info!(
        "Starting NILFS GUI (fs type {}, elevation via {})",
        config.fs_type,
        config.elevate_cmd
    );

    let state = Rc::new(AppState::new(config, Rc::new(SystemRunner)));
    let window = ui::MainWindow::new(app, &state);
    state.refresh_all();
    window.present();

    glib::idle_add_local_once(move || {
        match preflight::run_preflight(&state.tools, preflight::tool_on_path) {
            Ok(devices) => {
                log::info!("Found {} NILFS device(s): {}", devices.len(), devices.join(", "));
            }
            Err(e) => {
                log::error!("Startup check failed: {e}");
                ui::dialogs::show_error(&window, e.title(), &e.to_string(), || {
                    std::process::exit(1);
                });
            }
        }
    });
}
