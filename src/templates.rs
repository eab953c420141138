//! Named layouts persisted to a JSON file, plus single-layout import/export.

use crate::error::{Result, StoreError};
use crate::model::{Layout, LayoutTemplate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: u64,
    pub name: String,
    pub data: LayoutTemplate,
    /// Seconds since the Unix epoch.
    #[serde(default)]
    pub created_at: u64,
}

impl Template {
    pub fn summary(&self) -> String {
        format!(
            "{}×{} • {} elements",
            self.data.columns,
            self.data.rows,
            self.data.elements.len()
        )
    }

    pub fn created_label(&self) -> String {
        format_timestamp(self.created_at)
    }
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// Approximate calendar, good enough for list labels.
fn format_timestamp(secs: u64) -> String {
    let days = secs / 86400;
    let year = 1970 + days / 365;
    let remaining_days = days % 365;
    let month = (remaining_days / 30) + 1;
    let day = (remaining_days % 30) + 1;
    let day_secs = secs % 86400;
    let hour = day_secs / 3600;
    let minute = (day_secs % 3600) / 60;
    format!("{:04}-{:02}-{:02} {:02}:{:02}", year, month.min(12), day, hour, minute)
}

#[derive(Debug)]
pub struct TemplateStore {
    path: PathBuf,
    templates: Vec<Template>,
}

impl TemplateStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let templates = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), count = templates.len(), "opened template store");
        Ok(Self { path, templates })
    }

    /// Store that is not yet backed by a readable file.
    pub fn empty(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            templates: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: u64) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, name: &str, layout: &Layout) -> Result<u64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let id = self.templates.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.templates.push(Template {
            id,
            name: name.to_string(),
            data: layout.to_template(),
            created_at: now_secs(),
        });
        self.persist()?;
        tracing::info!(id, template = name, "saved template");
        Ok(id)
    }

    pub fn remove(&mut self, id: u64) -> Result<Template> {
        let idx = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TemplateNotFound(id))?;
        let removed = self.templates.remove(idx);
        self.persist()?;
        tracing::info!(id, "deleted template");
        Ok(removed)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.templates)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

pub fn read_layout_file(path: impl AsRef<Path>) -> Result<LayoutTemplate> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn write_layout_file(path: impl AsRef<Path>, layout: &Layout) -> Result<()> {
    let json = serde_json::to_string_pretty(&layout.to_template())?;
    std::fs::write(path, json)?;
    Ok(())
}
