//! Site configuration

use std::path::Path;

use chrono::Datelike;
use fos_reveal::TransitionConfig;
use serde::{Deserialize, Serialize};

use crate::{AnalyticsTag, SiteError};

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0 }
    }
}

/// Everything the page host needs besides the content itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SiteConfig {
    pub title: String,
    pub owner: String,
    /// Copyright year shown in the footer; defaults to the current local year
    pub year: i32,
    pub logo: String,
    /// Google Analytics measurement id; no tag is injected when unset
    pub analytics_id: Option<String>,
    pub viewport: Viewport,
    /// Height of each revealed section
    pub section_height: f64,
    pub reveal: TransitionConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Alessandro Filazzola".to_string(),
            owner: "Alessandro Filazzola".to_string(),
            year: chrono::Local::now().year(),
            logo: "/Filazzola-logo.png".to_string(),
            analytics_id: None,
            viewport: Viewport::default(),
            section_height: 600.0,
            reveal: TransitionConfig::slide_blur(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let json = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.viewport.width) || !positive(self.viewport.height) {
            return Err(SiteError::Layout("viewport must have a positive size"));
        }
        if !positive(self.section_height) {
            return Err(SiteError::Layout("section height must be positive"));
        }
        if let Some(id) = &self.analytics_id {
            AnalyticsTag::new(id)?;
        }
        self.reveal.validate()?;
        Ok(())
    }
}
