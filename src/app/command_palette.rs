use crate::model::{GapUnit, GridConfig, MAX_TRACKS, MIN_TRACKS};
use eframe::egui;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::{CodeTab, GridApp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandId {
    AddColumn,
    RemoveColumn,
    AddRow,
    RemoveRow,
    UnitPx,
    UnitMm,
    PresetDefault,
    PresetNewspaper,
    Duplicate,
    Delete,
    ClearLayout,
    SaveTemplate,
    ToggleCode,
    CopyHtml,
    CopyCss,
    ExportHtml,
    ExportCss,
    SaveLayout,
    OpenLayout,
    ReloadSettings,
    Help,
}

pub(super) struct CommandSpec {
    pub id: CommandId,
    pub name: &'static str,
    pub search: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { id: CommandId::AddColumn, name: "Grid: Add column", search: "add column grid wider" },
    CommandSpec { id: CommandId::RemoveColumn, name: "Grid: Remove column", search: "remove column grid narrower" },
    CommandSpec { id: CommandId::AddRow, name: "Grid: Add row", search: "add row grid taller" },
    CommandSpec { id: CommandId::RemoveRow, name: "Grid: Remove row", search: "remove row grid shorter" },
    CommandSpec { id: CommandId::UnitPx, name: "Gap: Pixels", search: "gap unit px pixels" },
    CommandSpec { id: CommandId::UnitMm, name: "Gap: Millimetres", search: "gap unit mm millimetres millimeters" },
    CommandSpec { id: CommandId::PresetDefault, name: "Preset: Default grid", search: "preset default reset grid" },
    CommandSpec { id: CommandId::PresetNewspaper, name: "Preset: Newspaper page", search: "preset newspaper print page mm" },
    CommandSpec { id: CommandId::Duplicate, name: "Element: Duplicate", search: "duplicate clone copy element" },
    CommandSpec { id: CommandId::Delete, name: "Element: Delete", search: "delete remove element" },
    CommandSpec { id: CommandId::ClearLayout, name: "Layout: Clear", search: "clear layout remove all elements" },
    CommandSpec { id: CommandId::SaveTemplate, name: "Template: Save", search: "save template store" },
    CommandSpec { id: CommandId::ToggleCode, name: "View: Toggle code panel", search: "toggle code panel html css view" },
    CommandSpec { id: CommandId::CopyHtml, name: "Code: Copy HTML", search: "copy html markup clipboard" },
    CommandSpec { id: CommandId::CopyCss, name: "Code: Copy CSS", search: "copy css style clipboard" },
    CommandSpec { id: CommandId::ExportHtml, name: "File: Export HTML", search: "export html save file" },
    CommandSpec { id: CommandId::ExportCss, name: "File: Export CSS", search: "export css save file" },
    CommandSpec { id: CommandId::SaveLayout, name: "File: Save layout", search: "save layout json file export" },
    CommandSpec { id: CommandId::OpenLayout, name: "File: Open layout", search: "open load layout json file import" },
    CommandSpec { id: CommandId::ReloadSettings, name: "Settings: Reload", search: "reload settings config" },
    CommandSpec { id: CommandId::Help, name: "Help: Shortcuts", search: "help keyboard shortcuts" },
];

#[derive(Default)]
pub(super) struct CommandPalette {
    pub open: bool,
    pub query: String,
    pub selected: usize,
    request_focus: bool,
}

#[derive(Clone, Copy)]
pub(super) struct CommandContext {
    pub has_selection: bool,
    pub element_count: usize,
    pub config: GridConfig,
    pub has_template_name: bool,
}

impl CommandPalette {
    pub fn open(&mut self, query: impl Into<String>) {
        self.open = true;
        self.query = query.into();
        self.selected = 0;
        self.request_focus = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected = 0;
        self.request_focus = false;
    }

    fn is_enabled(cx: CommandContext, id: CommandId) -> bool {
        match id {
            CommandId::AddColumn => cx.config.columns < MAX_TRACKS,
            CommandId::RemoveColumn => cx.config.columns > MIN_TRACKS,
            CommandId::AddRow => cx.config.rows < MAX_TRACKS,
            CommandId::RemoveRow => cx.config.rows > MIN_TRACKS,
            CommandId::UnitPx => cx.config.unit != GapUnit::Px,
            CommandId::UnitMm => cx.config.unit != GapUnit::Mm,
            CommandId::Duplicate | CommandId::Delete => cx.has_selection,
            CommandId::ClearLayout => cx.element_count > 0,
            CommandId::SaveTemplate => cx.has_template_name,
            _ => true,
        }
    }

    pub(super) fn execute(app: &mut GridApp, ctx: &egui::Context, id: CommandId) {
        let config = app.layout.config;
        match id {
            CommandId::AddColumn => app.set_columns(config.columns + 1),
            CommandId::RemoveColumn => app.set_columns(config.columns.saturating_sub(1)),
            CommandId::AddRow => app.set_rows(config.rows + 1),
            CommandId::RemoveRow => app.set_rows(config.rows.saturating_sub(1)),
            CommandId::UnitPx => app.set_unit(GapUnit::Px),
            CommandId::UnitMm => app.set_unit(GapUnit::Mm),
            CommandId::PresetDefault => app.apply_preset(GridConfig::default()),
            CommandId::PresetNewspaper => app.apply_preset(GridConfig::newspaper()),
            CommandId::Duplicate => app.duplicate_selected(),
            CommandId::Delete => app.delete_selected(),
            CommandId::ClearLayout => app.clear_layout(),
            CommandId::SaveTemplate => app.save_template(),
            CommandId::ToggleCode => {
                app.show_code = !app.show_code;
                app.persist_settings();
            }
            CommandId::CopyHtml => app.copy_code(ctx, CodeTab::Html),
            CommandId::CopyCss => app.copy_code(ctx, CodeTab::Css),
            CommandId::ExportHtml => app.export_html_dialog(),
            CommandId::ExportCss => app.export_css_dialog(),
            CommandId::SaveLayout => app.save_layout_dialog(),
            CommandId::OpenLayout => app.open_layout_dialog(),
            CommandId::ReloadSettings => app.reload_settings(),
            CommandId::Help => app.show_help = true,
        }
        ctx.request_repaint();
    }

    fn filtered(&self) -> Vec<(&'static CommandSpec, i64)> {
        let matcher = SkimMatcherV2::default();
        let q = self.query.trim();
        if q.is_empty() {
            return COMMANDS.iter().map(|c| (c, 0)).collect();
        }
        let mut out = Vec::new();
        for c in COMMANDS {
            if let Some(score) = matcher.fuzzy_match(c.search, q) {
                out.push((c, score));
            }
        }
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(b.0.name)));
        out
    }

    pub fn ui(&mut self, ctx: &egui::Context, cx: CommandContext) -> Option<CommandId> {
        if !self.open {
            return None;
        }
        let matches = self.filtered();
        if self.selected >= matches.len() {
            self.selected = matches.len().saturating_sub(1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.close();
            return None;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown)) && !matches.is_empty() {
            self.selected = (self.selected + 1).min(matches.len() - 1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp)) && !matches.is_empty() {
            self.selected = self.selected.saturating_sub(1);
        }
        let mut run_selected = ctx.input(|i| i.key_pressed(egui::Key::Enter));

        let screen = ctx.content_rect();
        let width = 480.0;
        let height = 300.0;
        let pos = egui::pos2(screen.center().x - width * 0.5, screen.top() + 48.0);
        egui::Area::new(egui::Id::new("command_palette"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let frame = egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 240))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 160, 255)))
                    .inner_margin(10.0)
                    .corner_radius(egui::CornerRadius::same(8));
                frame.show(ui, |ui| {
                    ui.set_min_size(egui::vec2(width, height));
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .desired_width(f32::INFINITY)
                            .hint_text("Search commands"),
                    );
                    if self.request_focus {
                        resp.request_focus();
                        self.request_focus = false;
                    }
                    ui.separator();
                    egui::ScrollArea::vertical().max_height(height - 64.0).show(ui, |ui| {
                        for (idx, (spec, _score)) in matches.iter().enumerate() {
                            let enabled = CommandPalette::is_enabled(cx, spec.id);
                            let selected = idx == self.selected;
                            let resp = ui.add_enabled(
                                enabled,
                                egui::Button::new(spec.name).selected(selected),
                            );
                            if resp.clicked() {
                                self.selected = idx;
                                run_selected = true;
                            }
                        }
                    });
                });
            });

        if run_selected {
            if let Some((spec, _)) = matches.get(self.selected) {
                if CommandPalette::is_enabled(cx, spec.id) {
                    let cmd = spec.id;
                    self.close();
                    return Some(cmd);
                }
            }
        }
        None
    }
}
