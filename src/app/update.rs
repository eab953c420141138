use crate::engine::{Gesture, PointerTarget};
use crate::model::{GapUnit, GridConfig};
use eframe::egui;

use super::command_palette::{CommandContext, CommandPalette};
use super::render::{
    color_swatches, draw_elements, draw_grid, draw_overlays, grid_metrics, pointer_target, stepper,
};
use super::{CodeTab, GridApp, help};

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open layout... (⌘O)").clicked() {
                        self.open_layout_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Save layout... (⌘S)").clicked() {
                        self.save_layout_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Export HTML...").clicked() {
                        self.export_html_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Export CSS...").clicked() {
                        self.export_css_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.label("Quick save paths:");
                    ui.small("Layout:");
                    if ui.text_edit_singleline(&mut self.layout_path).changed() {
                        self.persist_settings();
                    }
                    ui.small("HTML:");
                    if ui.text_edit_singleline(&mut self.html_path).changed() {
                        self.persist_settings();
                    }
                    ui.small("CSS:");
                    if ui.text_edit_singleline(&mut self.css_path).changed() {
                        self.persist_settings();
                    }
                    ui.horizontal(|ui| {
                        if ui.small_button("Quick Save Layout").clicked() {
                            self.save_layout_to_path();
                            ui.close_menu();
                        }
                        if ui.small_button("HTML").clicked() {
                            self.save_html_to_path();
                            ui.close_menu();
                        }
                        if ui.small_button("CSS").clicked() {
                            self.save_css_to_path();
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Reload settings").clicked() {
                        self.reload_settings();
                        ui.close_menu();
                    }
                });
                ui.menu_button("Edit", |ui| {
                    let has_selection = self.selected.is_some();
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Duplicate (⌘D)"))
                        .clicked()
                    {
                        self.duplicate_selected();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Delete (Del)"))
                        .clicked()
                    {
                        self.delete_selected();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(!self.layout.elements.is_empty(), egui::Button::new("Clear layout"))
                        .clicked()
                    {
                        self.clear_layout();
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.show_code, "Code panel").changed() {
                        self.persist_settings();
                    }
                    if ui.button("Command palette (⌘⇧P)").clicked() {
                        self.command_palette.open("");
                        ui.close_menu();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("Shortcuts (F1)").clicked() {
                        self.show_help = true;
                        ui.close_menu();
                    }
                });
            });

            ui.horizontal(|ui| {
                let config = self.layout.config;
                if let Some(columns) = stepper(ui, "Columns", config.columns) {
                    self.set_columns(columns);
                }
                ui.separator();
                if let Some(rows) = stepper(ui, "Rows", config.rows) {
                    self.set_rows(rows);
                }
                ui.separator();
                ui.label("Gap");
                let mut gap = config.gap;
                let gap_response = ui.add(
                    egui::DragValue::new(&mut gap)
                        .range(0.0..=config.unit.max_gap())
                        .speed(config.unit.step())
                        .max_decimals(1)
                        .suffix(config.unit.suffix()),
                );
                if gap_response.changed() {
                    self.set_gap(gap);
                }
                for unit in [GapUnit::Px, GapUnit::Mm] {
                    if ui.selectable_label(config.unit == unit, unit.suffix()).clicked() {
                        self.set_unit(unit);
                    }
                }
                ui.separator();
                if ui
                    .button("Newspaper")
                    .on_hover_text("6 columns, 16 rows, 2.4 mm gap")
                    .clicked()
                {
                    self.apply_preset(GridConfig::newspaper());
                }
                if ui.button("Default").clicked() {
                    self.apply_preset(GridConfig::default());
                }
                ui.separator();
                if ui
                    .add_enabled(!self.layout.elements.is_empty(), egui::Button::new("Clear"))
                    .clicked()
                {
                    self.clear_layout();
                }
            });
        });

        self.right_panel(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_deref().unwrap_or("Ready"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "Grid: {}×{}",
                        self.layout.config.columns, self.layout.config.rows
                    ));
                    ui.separator();
                    ui.label(format!("Elements: {}", self.layout.elements.len()));
                    ui.separator();
                    ui.label(self.interaction.gesture().name());
                });
            });
        });

        if self.show_code {
            self.code_panel(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));

        help::draw_help_window(ctx, &mut self.show_help);

        let cx = CommandContext {
            has_selection: self.selected.is_some(),
            element_count: self.layout.elements.len(),
            config: self.layout.config,
            has_template_name: !self.template_name.trim().is_empty(),
        };
        if let Some(cmd) = self.command_palette.ui(ctx, cx) {
            CommandPalette::execute(self, ctx, cmd);
        }
    }
}

impl GridApp {
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let wants_keyboard = ctx.wants_keyboard_input();
        let palette_open = self.command_palette.open;
        let mut open_palette = false;
        let mut save = false;
        let mut open = false;
        let mut cancel = false;
        let mut duplicate = false;
        let mut delete = false;
        ctx.input_mut(|i| {
            if !palette_open
                && i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::P)
            {
                open_palette = true;
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                save = true;
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) {
                open = true;
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                self.show_help = !self.show_help;
            }
            if palette_open || wants_keyboard {
                return;
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                cancel = true;
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::D) {
                duplicate = true;
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Delete)
                || i.consume_key(egui::Modifiers::NONE, egui::Key::Backspace)
            {
                delete = true;
            }
        });

        if open_palette {
            self.command_palette.open("");
        }
        if save {
            self.save_layout_dialog();
        }
        if open {
            self.open_layout_dialog();
        }
        if cancel {
            let outcome = self.interaction.cancel();
            self.apply_outcome(outcome);
        }
        if duplicate {
            self.duplicate_selected();
        }
        if delete {
            self.delete_selected();
        }
    }

    fn right_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("right_panel")
            .resizable(true)
            .min_width(220.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Templates");
                    ui.separator();
                    ui.horizontal(|ui| {
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.template_name)
                                .hint_text("Template name")
                                .desired_width(140.0),
                        );
                        let submitted =
                            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        let named = !self.template_name.trim().is_empty();
                        if ui.add_enabled(named, egui::Button::new("Save")).clicked()
                            || (submitted && named)
                        {
                            self.save_template();
                        }
                    });

                    let mut load = None;
                    let mut delete = None;
                    if self.templates.templates().is_empty() {
                        ui.weak("No saved templates");
                    }
                    for template in self.templates.templates() {
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.strong(&template.name);
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui
                                            .small_button("×")
                                            .on_hover_text("Delete template")
                                            .clicked()
                                        {
                                            delete = Some(template.id);
                                        }
                                        if ui.small_button("Load").clicked() {
                                            load = Some(template.id);
                                        }
                                    },
                                );
                            });
                            ui.small(template.summary());
                            ui.small(template.created_label());
                        });
                    }
                    if let Some(id) = load {
                        self.load_template(id);
                    }
                    if let Some(id) = delete {
                        self.delete_template(id);
                    }

                    ui.add_space(12.0);
                    ui.heading("Element");
                    ui.separator();
                    let mut duplicate = false;
                    let mut remove = false;
                    if let Some(element) = self.selected.and_then(|id| self.layout.element_mut(id)) {
                        ui.label(format!(
                            "#{}  column {}, row {}  span {}×{}",
                            element.id,
                            element.column,
                            element.row,
                            element.column_span,
                            element.row_span
                        ));
                        ui.label("Text");
                        ui.add(egui::TextEdit::multiline(&mut element.text).desired_rows(3));
                        ui.label("Colour");
                        if let Some(color) = color_swatches(ui, element.color.as_deref()) {
                            element.color = color;
                        }
                        ui.horizontal(|ui| {
                            duplicate = ui.button("Duplicate").clicked();
                            remove = ui.button("Delete").clicked();
                        });
                    } else {
                        ui.weak("Click an element to edit its text and colour");
                    }
                    if duplicate {
                        self.duplicate_selected();
                    }
                    if remove {
                        self.delete_selected();
                    }
                });
            });
    }

    fn code_panel(&mut self, ctx: &egui::Context) {
        let mut copy = false;
        egui::TopBottomPanel::bottom("code_panel")
            .resizable(true)
            .default_height(220.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.code_tab, CodeTab::Html, "HTML");
                    ui.selectable_value(&mut self.code_tab, CodeTab::Css, "CSS");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        copy = ui.button("Copy").clicked();
                    });
                });
                ui.separator();
                let code = self.markup();
                let text = match self.code_tab {
                    CodeTab::Html => code.html,
                    CodeTab::Css => code.css,
                };
                egui::ScrollArea::both().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut text.as_str())
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
            });
        if copy {
            self.copy_code(ctx, self.code_tab);
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (canvas, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let metrics = grid_metrics(canvas, &self.layout.config);

        let (pointer, pressed, released) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });

        if pressed && response.hovered() && !self.command_palette.open {
            if let Some(pos) = pointer.filter(|p| metrics.bounds.contains(*p)) {
                let target = pointer_target(&metrics, &self.layout, pos);
                match target {
                    PointerTarget::Element(id) | PointerTarget::ResizeHandle(id) => {
                        self.selected = Some(id);
                    }
                    PointerTarget::Grid => self.selected = None,
                    PointerTarget::DeleteControl(_) => {}
                }
                let outcome = self.interaction.pointer_down(&mut self.layout, &metrics, target, pos);
                self.apply_outcome(outcome);
            }
        }

        // Move and up are only routed while a gesture is live.
        if self.interaction.is_listening() {
            match pointer {
                Some(pos) if metrics.bounds.contains(pos) => {
                    let outcome = self.interaction.pointer_move(&mut self.layout, &metrics, pos);
                    self.apply_outcome(outcome);
                    if released {
                        let outcome = self.interaction.pointer_up(&mut self.layout);
                        self.apply_outcome(outcome);
                    }
                }
                _ => {
                    let outcome = self.interaction.pointer_leave();
                    self.apply_outcome(outcome);
                }
            }
        }

        let cursor = match self.interaction.gesture() {
            Gesture::Dragging { .. } => Some(egui::CursorIcon::Grabbing),
            Gesture::Resizing { .. } => Some(egui::CursorIcon::ResizeNwSe),
            Gesture::Selecting { .. } => Some(egui::CursorIcon::Crosshair),
            Gesture::Idle => match pointer.filter(|_| response.hovered()) {
                Some(pos) if metrics.bounds.contains(pos) => {
                    match pointer_target(&metrics, &self.layout, pos) {
                        PointerTarget::Element(_) => Some(egui::CursorIcon::Grab),
                        PointerTarget::ResizeHandle(_) => Some(egui::CursorIcon::ResizeNwSe),
                        PointerTarget::DeleteControl(_) => Some(egui::CursorIcon::PointingHand),
                        PointerTarget::Grid => Some(egui::CursorIcon::Cell),
                    }
                }
                _ => None,
            },
        };
        if let Some(cursor) = cursor {
            ui.ctx().set_cursor_icon(cursor);
        }

        let painter = ui.painter_at(canvas);
        let gesture = self.interaction.gesture();
        draw_grid(&painter, canvas, &metrics);
        draw_elements(&painter, &metrics, &self.layout, gesture, self.selected, pointer);
        draw_overlays(&painter, &metrics, &self.layout, gesture);
    }
}
