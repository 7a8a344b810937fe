mod dialog_view;
mod picker_view;
mod pie_view;
mod scan_view;
mod tree_view;
mod ui_fmt;

use ratatui::Frame;

use crate::viewmodel::{AppViewModel, ViewMode};

/// Draw the current screen and any dialog over it
pub fn render_app(frame: &mut Frame, app: &AppViewModel) {
    let area = frame.area();
    match (app.view_mode(), &app.scan_vm, &app.tree_vm) {
        (ViewMode::Scanning, Some(scan_vm), _) => scan_view::render(frame, scan_vm, area),
        (ViewMode::Chart, _, Some(tree_vm)) => tree_view::render(frame, app, tree_vm, area),
        _ => picker_view::render(frame, app, &app.picker_vm, area),
    }

    if let Some(message) = app.dialog() {
        dialog_view::render(frame, message, area);
    }
}
