use crate::engine::Interaction;
use crate::model;
use crate::templates::TemplateStore;

mod actions;
mod command_palette;
mod help;
mod render;
mod settings;
mod update;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CodeTab {
    Html,
    Css,
}

pub struct GridApp {
    layout: model::Layout,
    interaction: Interaction,
    selected: Option<u64>,
    templates: TemplateStore,
    template_name: String,
    show_code: bool,
    code_tab: CodeTab,
    layout_path: String,
    html_path: String,
    css_path: String,
    settings_path: String,
    status: Option<String>,
    command_palette: command_palette::CommandPalette,
    show_help: bool,
}

impl GridApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home).join(".config").join("gridsmith.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path).unwrap_or_default();
        tracing::info!(path = %settings_path, "using settings");

        let mut status = None;
        let templates = match TemplateStore::open(&settings.templates_path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(path = %settings.templates_path, error = %e, "template store unreadable");
                status = Some(format!("Templates unavailable: {e}"));
                TemplateStore::empty(&settings.templates_path)
            }
        };

        Self {
            layout: model::Layout::new(settings.grid),
            interaction: Interaction::default(),
            selected: None,
            templates,
            template_name: String::new(),
            show_code: settings.show_code,
            code_tab: CodeTab::Html,
            layout_path: settings.layout_path,
            html_path: settings.html_path,
            css_path: settings.css_path,
            settings_path,
            status,
            command_palette: command_palette::CommandPalette::default(),
            show_help: false,
        }
    }
}
