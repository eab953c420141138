use crate::engine::{LayoutMarkup, Outcome, markup, occupancy, placement};
use crate::model::{self, GapUnit, GridConfig, LayoutTemplate};
use crate::templates;
use eframe::egui;

use super::{CodeTab, GridApp, settings};

impl GridApp {
    pub(super) fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created(id) => {
                self.selected = Some(id);
                self.status = Some(format!("Added element {id}"));
            }
            Outcome::Moved { id, to, .. } => {
                self.selected = Some(id);
                self.status = Some(format!("Moved element {id} to column {}, row {}", to.col, to.row));
            }
            Outcome::Resized {
                id,
                column_span,
                row_span,
            } => {
                self.status = Some(format!("Element {id} spans {column_span}×{row_span}"));
            }
            Outcome::Reverted(id) => {
                self.status = Some(format!("Element {id} stayed in place"));
            }
            Outcome::Discarded => {
                self.status = Some("Selection discarded".to_string());
            }
            Outcome::Deleted(id) => {
                if self.selected == Some(id) {
                    self.selected = None;
                }
                self.status = Some(format!("Deleted element {id}"));
            }
            Outcome::Ignored | Outcome::Started | Outcome::Updated | Outcome::Ended => {}
        }
    }

    /// Runs a grid change with no gesture in flight and reports what the
    /// reconciliation removed.
    fn reshape(&mut self, change: impl FnOnce(&mut model::Layout) -> Vec<model::Element>) {
        let before = self.layout.config;
        let outcome = self.interaction.cancel();
        self.apply_outcome(outcome);
        let removed = change(&mut self.layout);
        let config = self.layout.config;
        if config == before {
            return;
        }
        if let Some(id) = self.selected {
            if self.layout.element(id).is_none() {
                self.selected = None;
            }
        }
        tracing::debug!(
            columns = config.columns,
            rows = config.rows,
            gap = config.gap,
            unit = config.unit.suffix(),
            "grid changed"
        );
        self.status = if removed.is_empty() {
            Some(format!(
                "Grid {}×{}, gap {}{}",
                config.columns,
                config.rows,
                config.gap,
                config.unit.suffix()
            ))
        } else {
            let ids: Vec<String> = removed.iter().map(|e| e.id.to_string()).collect();
            Some(format!("Removed element(s) {} that no longer fit", ids.join(", ")))
        };
    }

    pub(super) fn set_columns(&mut self, columns: u32) {
        self.reshape(|layout| layout.set_columns(columns));
    }

    pub(super) fn set_rows(&mut self, rows: u32) {
        self.reshape(|layout| layout.set_rows(rows));
    }

    pub(super) fn set_gap(&mut self, gap: f32) {
        self.reshape(|layout| {
            layout.set_gap(gap);
            Vec::new()
        });
    }

    pub(super) fn set_unit(&mut self, unit: GapUnit) {
        self.reshape(|layout| {
            layout.set_config(GridConfig {
                unit,
                ..layout.config
            })
        });
    }

    pub(super) fn apply_preset(&mut self, config: GridConfig) {
        self.reshape(|layout| layout.set_config(config));
    }

    pub(super) fn delete_selected(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let outcome = self.interaction.delete(&mut self.layout, id);
        self.apply_outcome(outcome);
    }

    pub(super) fn duplicate_selected(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let outcome = self.interaction.cancel();
        self.apply_outcome(outcome);
        match placement::duplicate(&mut self.layout, id) {
            Some(copy) => {
                self.selected = Some(copy);
                self.status = Some(format!("Duplicated element {id} as {copy}"));
            }
            None => self.status = Some("No free space to duplicate into".to_string()),
        }
    }

    pub(super) fn clear_layout(&mut self) {
        self.interaction.cancel();
        let count = self.layout.elements.len();
        self.layout.clear();
        self.selected = None;
        tracing::info!(count, "cleared layout");
        self.status = Some(format!("Cleared {count} element(s)"));
    }

    pub(super) fn markup(&self) -> LayoutMarkup {
        markup::render(&self.layout.config, &self.layout.elements)
    }

    pub(super) fn copy_code(&mut self, ctx: &egui::Context, tab: CodeTab) {
        let code = self.markup();
        let (text, label) = match tab {
            CodeTab::Html => (code.html, "HTML"),
            CodeTab::Css => (code.css, "CSS"),
        };
        ctx.copy_text(text);
        self.status = Some(format!("Copied {label} to clipboard"));
    }

    fn load_layout(&mut self, template: LayoutTemplate, source: &str) {
        self.interaction.cancel();
        self.layout = model::Layout::from_template(template);
        let removed = occupancy::reconcile(&mut self.layout);
        self.selected = None;
        tracing::info!(source, elements = self.layout.elements.len(), "loaded layout");
        self.status = if removed.is_empty() {
            Some(format!("Loaded {source}"))
        } else {
            Some(format!(
                "Loaded {source}, dropped {} element(s) outside the grid",
                removed.len()
            ))
        };
    }

    pub(super) fn save_template(&mut self) {
        match self.templates.add(&self.template_name, &self.layout) {
            Ok(_) => {
                self.status = Some(format!("Saved template \"{}\"", self.template_name.trim()));
                self.template_name.clear();
            }
            Err(e) => {
                tracing::warn!(error = %e, "template save failed");
                self.status = Some(format!("Template save failed: {e}"));
            }
        }
    }

    pub(super) fn load_template(&mut self, id: u64) {
        let Some(template) = self.templates.get(id).cloned() else {
            return;
        };
        self.load_layout(template.data, &template.name);
    }

    pub(super) fn delete_template(&mut self, id: u64) {
        match self.templates.remove(id) {
            Ok(template) => self.status = Some(format!("Deleted template \"{}\"", template.name)),
            Err(e) => {
                tracing::warn!(id, error = %e, "template delete failed");
                self.status = Some(format!("Template delete failed: {e}"));
            }
        }
    }

    fn write_export(&mut self, path: &str, contents: String, label: &str) {
        match std::fs::write(path, contents) {
            Ok(()) => {
                tracing::info!(path, "exported {label}");
                self.status = Some(format!("Saved {path}"));
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "{label} export failed");
                self.status = Some(format!("{label} export failed: {e}"));
            }
        }
    }

    pub(super) fn save_html_to_path(&mut self) {
        let path = self.html_path.clone();
        let html = self.markup().html;
        self.write_export(&path, html, "HTML");
    }

    pub(super) fn save_css_to_path(&mut self) {
        let path = self.css_path.clone();
        let css = self.markup().css;
        self.write_export(&path, css, "CSS");
    }

    pub(super) fn export_html_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&self.html_path)
            .add_filter("HTML", &["html", "htm"])
            .save_file()
        {
            self.html_path = path.display().to_string();
            self.save_html_to_path();
            self.persist_settings();
        }
    }

    pub(super) fn export_css_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&self.css_path)
            .add_filter("CSS", &["css"])
            .save_file()
        {
            self.css_path = path.display().to_string();
            self.save_css_to_path();
            self.persist_settings();
        }
    }

    pub(super) fn save_layout_to_path(&mut self) {
        match templates::write_layout_file(&self.layout_path, &self.layout) {
            Ok(()) => self.status = Some(format!("Saved {}", self.layout_path)),
            Err(e) => {
                tracing::warn!(path = %self.layout_path, error = %e, "layout save failed");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    pub(super) fn save_layout_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&self.layout_path)
            .add_filter("JSON", &["json"])
            .save_file()
        {
            self.layout_path = path.display().to_string();
            self.save_layout_to_path();
            self.persist_settings();
        }
    }

    pub(super) fn open_layout_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let path_str = path.display().to_string();
            match templates::read_layout_file(&path) {
                Ok(template) => {
                    self.layout_path = path_str.clone();
                    self.load_layout(template, &path_str);
                }
                Err(e) => {
                    tracing::warn!(path = %path_str, error = %e, "layout import failed");
                    self.status = Some(format!("Load failed: {e}"));
                }
            }
        }
    }

    pub(super) fn settings_snapshot(&self) -> settings::AppSettings {
        settings::AppSettings {
            grid: self.layout.config,
            templates_path: self.templates.path().display().to_string(),
            layout_path: self.layout_path.clone(),
            html_path: self.html_path.clone(),
            css_path: self.css_path.clone(),
            show_code: self.show_code,
        }
    }

    pub(super) fn persist_settings(&mut self) {
        let snapshot = self.settings_snapshot();
        if let Err(e) = settings::save_settings(&self.settings_path, &snapshot) {
            tracing::warn!(path = %self.settings_path, error = %e, "settings save failed");
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }

    /// Re-reads paths and panel visibility. The grid on screen is left alone.
    pub(super) fn reload_settings(&mut self) {
        let settings = settings::load_settings(&self.settings_path).unwrap_or_default();
        self.layout_path = settings.layout_path;
        self.html_path = settings.html_path;
        self.css_path = settings.css_path;
        self.show_code = settings.show_code;
        if settings.templates_path != self.templates.path().display().to_string() {
            match templates::TemplateStore::open(&settings.templates_path) {
                Ok(store) => self.templates = store,
                Err(e) => {
                    tracing::warn!(path = %settings.templates_path, error = %e, "template store unreadable");
                    self.status = Some(format!("Templates unavailable: {e}"));
                    return;
                }
            }
        }
        self.status = Some("Settings reloaded".to_string());
    }
}
