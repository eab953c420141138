use crate::error::Result;
use crate::model::GridConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub(super) struct AppSettings {
    pub templates_path: String,
    pub layout_path: String,
    pub html_path: String,
    pub css_path: String,
    pub show_code: bool,
    pub grid: GridConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            templates_path: "grid-templates.json".to_string(),
            layout_path: "layout.json".to_string(),
            html_path: "layout.html".to_string(),
            css_path: "layout.css".to_string(),
            show_code: true,
            grid: GridConfig::default(),
        }
    }
}

pub(super) fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    let settings = if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    };
    if settings.is_none() {
        tracing::warn!(path, "ignoring unreadable settings file");
    }
    settings.map(|s| AppSettings {
        grid: s.grid.clamped(),
        ..s
    })
}

pub(super) fn save_settings(path: &str, settings: &AppSettings) -> Result<()> {
    if path.ends_with(".toml") {
        std::fs::write(path, toml::to_string_pretty(settings)?)?;
    } else {
        std::fs::write(path, serde_json::to_string_pretty(settings)?)?;
    }
    tracing::debug!(path, "saved settings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GapUnit;

    fn scratch(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("gridsmith-settings-{}-{}", std::process::id(), name))
            .display()
            .to_string()
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let path = scratch("partial.toml");
        std::fs::write(&path, "show_code = false\n[grid]\ncolumns = 8\nunit = \"mm\"\n").unwrap();
        let settings = load_settings(&path).unwrap();
        assert!(!settings.show_code);
        assert_eq!(settings.grid.columns, 8);
        assert_eq!(settings.grid.rows, 12);
        assert_eq!(settings.grid.unit, GapUnit::Mm);
        assert_eq!(settings.templates_path, "grid-templates.json");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn out_of_range_grid_is_clamped_on_load() {
        let path = scratch("clamp.toml");
        std::fs::write(&path, "[grid]\ncolumns = 99\nrows = 0\ngap = 500.0\n").unwrap();
        let grid = load_settings(&path).unwrap().grid;
        assert_eq!((grid.columns, grid.rows, grid.gap), (24, 1, 50.0));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn garbage_and_missing_files_yield_none() {
        let path = scratch("garbage.toml");
        std::fs::write(&path, "[[[ not toml or json").unwrap();
        assert!(load_settings(&path).is_none());
        assert!(load_settings(&scratch("missing.toml")).is_none());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn saved_settings_load_back_in_both_formats() {
        let settings = AppSettings {
            grid: GridConfig::newspaper(),
            show_code: false,
            ..AppSettings::default()
        };
        for name in ["saved.toml", "saved.json"] {
            let path = scratch(name);
            save_settings(&path, &settings).unwrap();
            assert_eq!(load_settings(&path), Some(settings.clone()));
            let _ = std::fs::remove_file(&path);
        }
    }
}
