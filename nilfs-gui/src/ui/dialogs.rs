use gtk::prelude::*;
use libadwaita as adw;
use adw::prelude::*;

/// Show an error dialog and run `on_close` once it is dismissed
pub fn show_error<F>(window: &adw::ApplicationWindow, title: &str, message: &str, on_close: F)
where
    F: Fn() + 'static,
{
    let dialog = adw::MessageDialog::new(Some(window), Some(title), Some(message));
    dialog.add_response("ok", "OK");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.set_modal(true);

    dialog.connect_response(None, move |_, _| {
        on_close();
    });

    dialog.present();
}

/// Show an info dialog
pub fn show_info(window: &adw::ApplicationWindow, title: &str, message: &str) {
    let dialog = adw::MessageDialog::new(Some(window), Some(title), None);
    dialog.set_body(message);
    dialog.add_response("ok", "OK");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.set_modal(true);
    dialog.present();
}

/// Ask for a directory; `on_chosen` only runs if the user picks one
pub fn choose_directory<F>(window: &adw::ApplicationWindow, title: &str, on_chosen: F)
where
    F: Fn(String) + 'static,
{
    use gtk::gio;

    let dialog = gtk::FileDialog::new();
    dialog.set_title(title);
    dialog.set_accept_label(Some("Mount Here"));
    dialog.set_modal(true);

    dialog.select_folder(Some(window), None::<&gio::Cancellable>, move |result| {
        match result {
            Ok(folder) => {
                if let Some(path) = folder.path() {
                    on_chosen(path.to_string_lossy().into_owned());
                }
            }
            Err(e) => log::debug!("Directory chooser closed: {e}"),
        }
    });
}
