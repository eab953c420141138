use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures of the file-backed collaborators: template store, layout files,
/// exports and settings. The engine itself has no error paths.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("settings write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("template name is empty")]
    EmptyName,
    #[error("template {0} not found")]
    TemplateNotFound(u64),
}
