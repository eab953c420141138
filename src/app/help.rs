use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help & Commands")
        .open(open)
        .resizable(true)
        .default_width(520.0)
        .default_height(460.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Keyboard Shortcuts");
                ui.separator();
                help_row(ui, "⌘⇧P", "Open command palette");
                help_row(ui, "⌘S", "Save layout (JSON)");
                help_row(ui, "⌘O", "Open layout");
                help_row(ui, "⌘D", "Duplicate selected element");
                help_row(ui, "Delete / Backspace", "Delete selected element");
                help_row(ui, "Escape", "Cancel the current drag, resize or selection");
                help_row(ui, "F1", "Toggle this window");

                ui.add_space(10.0);
                ui.heading("Pointer");
                ui.separator();
                help_row(ui, "Drag on empty cells", "Select a rectangle; release to add an element");
                help_row(ui, "Click an empty cell", "Add a 1×1 element");
                help_row(ui, "Drag an element", "Move it; the outline turns red where it would overlap");
                help_row(ui, "Drag the corner handle", "Resize in whole cells");
                help_row(ui, "×", "Delete the element");
                ui.label("Leaving the grid mid-gesture drops the gesture without changes.");

                ui.add_space(10.0);
                ui.heading("Grid");
                ui.separator();
                ui.label("Columns and rows range from 1 to 24. Shrinking the grid moves");
                ui.label("elements back inside it, or removes those that can no longer fit.");
                ui.label("Gaps are set in px or mm; mm is meant for print layouts.");

                ui.add_space(10.0);
                ui.heading("Files");
                ui.separator();
                ui.label("• Templates are kept in the JSON file named by templates_path");
                ui.label("• Layouts save as {columns, rows, gap, unit, elements} JSON");
                ui.label("• The code panel exports plain HTML plus CSS grid rules");
                ui.label("• Settings live in ~/.config/gridsmith.toml or ./settings.toml:");
                ui.add_space(5.0);
                ui.code(
                    r#"templates_path = "grid-templates.json"
show_code = true

[grid]
columns = 6
rows = 16
gap = 2.4
unit = "mm""#,
                );
            });
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [150.0, 16.0],
            egui::Label::new(egui::RichText::new(shortcut).monospace().strong()),
        );
        ui.label(description);
    });
}
