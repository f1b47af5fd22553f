use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::zone::ZoneThresholds;

/// Behaviour switches for a [`TreeStore`](crate::TreeStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Expand a folder when something is dropped into it.
    pub open_on_drop: bool,
    /// Clicking a folder label toggles it. When disabled the click is
    /// reported as [`TreeEvent::LabelClicked`](crate::TreeEvent::LabelClicked).
    pub label_click_toggles: bool,
    /// Zone split used for pointer drops on rows.
    pub zones: ZoneThresholds,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            open_on_drop: false,
            label_click_toggles: true,
            zones: ZoneThresholds::FOLDER_ROW,
        }
    }
}

impl TreeConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.zones.validate()
    }

    pub fn with_open_on_drop(mut self, open_on_drop: bool) -> Self {
        self.open_on_drop = open_on_drop;
        self
    }

    pub fn with_label_click_toggles(mut self, toggles: bool) -> Self {
        self.label_click_toggles = toggles;
        self
    }

    pub fn with_zones(mut self, zones: ZoneThresholds) -> Self {
        self.zones = zones;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_json_yields_defaults() {
        let config = TreeConfig::from_json("{}").unwrap();

        assert_eq!(config, TreeConfig::default());
    }

    #[test]
    fn json_overrides_selected_fields() {
        let config = TreeConfig::from_json(
            r#"{"open_on_drop": true, "zones": {"top": 0.25, "bottom": 0.66}}"#,
        )
        .unwrap();

        assert!(config.open_on_drop);
        assert!(config.label_click_toggles);
        assert_eq!(config.zones.bottom, 0.66);
    }

    #[test]
    fn invalid_thresholds_are_rejected() {
        let result =
            TreeConfig::from_json(r#"{"zones": {"top": 0.8, "bottom": 0.5}}"#);

        assert!(matches!(result, Err(Error::InvalidThresholds { .. })));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            TreeConfig::from_json("{open_on_drop"),
            Err(Error::Json(_))
        ));
    }
}
