//! Site errors

use std::path::PathBuf;

use fos_dom::DomError;
use fos_reveal::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
    #[error("invalid reveal transition: {0}")]
    Reveal(#[from] ConfigError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid analytics measurement id {0:?}")]
    InvalidMeasurementId(String),
    #[error("skill {skill:?} has level {level}, expected 0-100")]
    SkillLevel { skill: String, level: u8 },
    #[error("invalid layout: {0}")]
    Layout(&'static str),
}
