//! Transition configuration
//!
//! One [`TransitionConfig`] describes a whole family of reveal effects: the
//! two style snapshots, which one applies before the first intersection
//! report, and the CSS transition that interpolates between them.

use serde::{Deserialize, Serialize};

use crate::{StyleError, StyleMap, VisibilityState};

/// Transition descriptor used when a config does not name one
pub const DEFAULT_TRANSITION: &str = "all 1s";

/// Invalid transition configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed {state} style: {source}")]
    Style {
        state: &'static str,
        #[source]
        source: StyleError,
    },
    #[error("{0} style must not set `transition`; use the transition descriptor")]
    TransitionInStateStyle(&'static str),
    #[error("transition descriptor is empty")]
    EmptyTransition,
    #[error("invalid transition descriptor {0:?}")]
    InvalidTransition(String),
    #[error("failed to parse transition config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable reveal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransitionConfig {
    #[serde(default)]
    initial_visible: bool,
    visible_style: StyleMap,
    hidden_style: StyleMap,
    #[serde(default = "default_transition")]
    transition: String,
}

fn default_transition() -> String {
    DEFAULT_TRANSITION.to_string()
}

impl TransitionConfig {
    /// Build and validate a config that starts hidden
    pub fn new(visible_style: StyleMap, hidden_style: StyleMap) -> Result<Self, ConfigError> {
        let config = Self {
            initial_visible: false,
            visible_style,
            hidden_style,
            transition: default_transition(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Plain opacity fade
    pub fn fade() -> Self {
        Self {
            initial_visible: false,
            visible_style: StyleMap::new().with("opacity", "1"),
            hidden_style: StyleMap::new().with("opacity", "0"),
            transition: default_transition(),
        }
    }

    /// Fade in while sliding from the left and un-blurring
    pub fn slide_blur() -> Self {
        Self {
            initial_visible: false,
            visible_style: StyleMap::new()
                .with("opacity", "1")
                .with("transform", "none")
                .with("filter", "none"),
            hidden_style: StyleMap::new()
                .with("opacity", "0")
                .with("transform", "translateX(-100%)")
                .with("filter", "blur(5px)"),
            transition: default_transition(),
        }
    }

    /// For content that is on screen at load and only fades once scrolled away
    pub fn starts_visible(mut self) -> Self {
        self.initial_visible = true;
        self
    }

    pub fn with_transition(mut self, transition: &str) -> Result<Self, ConfigError> {
        self.transition = transition.trim().to_string();
        self.validate()?;
        Ok(self)
    }

    /// Parse a JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (state, style) in [("visible", &self.visible_style), ("hidden", &self.hidden_style)] {
            style
                .validate()
                .map_err(|source| ConfigError::Style { state, source })?;
            if style.contains("transition") {
                return Err(ConfigError::TransitionInStateStyle(state));
            }
        }

        let transition = self.transition.trim();
        if transition.is_empty() {
            return Err(ConfigError::EmptyTransition);
        }
        // Reuse the declaration checks on the descriptor itself
        StyleMap::new()
            .insert("transition", transition)
            .map_err(|_| ConfigError::InvalidTransition(self.transition.clone()))?;
        Ok(())
    }

    pub fn initial_visible(&self) -> bool {
        self.initial_visible
    }

    pub fn initial_state(&self) -> VisibilityState {
        VisibilityState::from(self.initial_visible)
    }

    pub fn visible_style(&self) -> &StyleMap {
        &self.visible_style
    }

    pub fn hidden_style(&self) -> &StyleMap {
        &self.hidden_style
    }

    pub fn transition(&self) -> &str {
        &self.transition
    }

    /// The style snapshot for `state`, carrying the shared transition
    pub fn style_for(&self, state: VisibilityState) -> StyleMap {
        let base = match state {
            VisibilityState::Visible => &self.visible_style,
            VisibilityState::Hidden => &self.hidden_style,
        };
        base.clone().with("transition", self.transition.as_str())
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::fade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        TransitionConfig::fade().validate().unwrap();
        TransitionConfig::slide_blur().validate().unwrap();
        assert!(!TransitionConfig::default().initial_visible());
        assert!(TransitionConfig::fade().starts_visible().initial_visible());
    }

    #[test]
    fn test_style_for_carries_transition() {
        let config = TransitionConfig::slide_blur();

        let hidden = config.style_for(VisibilityState::Hidden);
        assert_eq!(
            hidden.to_css_text(),
            "filter: blur(5px); opacity: 0; transform: translateX(-100%); transition: all 1s;"
        );

        let visible = config.style_for(VisibilityState::Visible);
        assert_eq!(visible.get("transition"), Some("all 1s"));
        assert_eq!(visible.get("opacity"), Some("1"));
    }

    #[test]
    fn test_from_json_defaults() {
        let config = TransitionConfig::from_json(
            r#"{"hiddenStyle": {"opacity": 0}, "visibleStyle": {"opacity": 1}}"#,
        )
        .unwrap();
        assert!(!config.initial_visible());
        assert_eq!(config.transition(), DEFAULT_TRANSITION);
        assert_eq!(config, TransitionConfig::fade());
    }

    #[test]
    fn test_from_json_full() {
        let config = TransitionConfig::from_json(
            r#"{
                "initialVisible": true,
                "hiddenStyle": {"opacity": 0, "filter": "blur(5px)"},
                "visibleStyle": {"opacity": 1, "filter": "none"},
                "transition": "opacity 600ms ease-out, filter 600ms"
            }"#,
        )
        .unwrap();
        assert!(config.initial_visible());
        assert_eq!(config.hidden_style().get("filter"), Some("blur(5px)"));
        assert_eq!(config.transition(), "opacity 600ms ease-out, filter 600ms");
    }

    #[test]
    fn test_from_json_rejects_unknown_and_missing() {
        assert!(matches!(
            TransitionConfig::from_json(r#"{"visibleStyle": {}, "hiddenStyle": {}, "speed": 2}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            TransitionConfig::from_json(r#"{"visibleStyle": {"opacity": 1}}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            TransitionConfig::from_json(r#"{"visibleStyle": {}, "hiddenStyle": {}, "initialVisible": null}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_transition_must_stay_out_of_state_styles() {
        let visible = StyleMap::new().with("opacity", "1").with("transition", "all 2s");
        let hidden = StyleMap::new().with("opacity", "0");
        assert!(matches!(
            TransitionConfig::new(visible, hidden),
            Err(ConfigError::TransitionInStateStyle("visible"))
        ));
    }

    #[test]
    fn test_bad_transition_descriptor() {
        assert!(matches!(
            TransitionConfig::fade().with_transition("  "),
            Err(ConfigError::EmptyTransition)
        ));
        assert!(matches!(
            TransitionConfig::fade().with_transition("all 1s; color: red"),
            Err(ConfigError::InvalidTransition(_))
        ));
        let config = TransitionConfig::fade().with_transition("opacity 250ms").unwrap();
        assert_eq!(config.transition(), "opacity 250ms");
    }
}
