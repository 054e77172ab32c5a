//! The operator-facing knob surface.
//!
//! `PipelineConfig` is the only thing that carries the detector/dedup
//! thresholds; the algorithms themselves stay pure functions parameterized
//! by it rather than hardcoding the constants named in their own specs,
//! which is what lets tests exercise non-default thresholds.

use scrollkeep_dedup::DedupConfig;
use scrollkeep_detect::DetectorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub scrollback_limit: Option<usize>,
    pub fan_out: usize,
    pub max_sections: usize,
    pub min_section_size: usize,
    pub merge_window: usize,
    pub stutter_window: usize,
    pub min_match: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            scrollback_limit: None,
            fan_out: 1,
            max_sections: 50,
            min_section_size: 100,
            merge_window: 50,
            stutter_window: 5,
            min_match: 3,
        }
    }
}

impl PipelineConfig {
    /// Load a config from a TOML file, falling back to defaults for any
    /// key the file omits. Unknown keys are ignored, for forward
    /// compatibility with future fields.
    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<PipelineConfig> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn to_detector_config(self) -> DetectorConfig {
        DetectorConfig {
            merge_window: self.merge_window,
            min_section_size: self.min_section_size,
            max_sections: self.max_sections,
            ..DetectorConfig::default()
        }
    }

    pub fn to_dedup_config(self) -> DedupConfig {
        DedupConfig { min_match: self.min_match, stutter_window: self.stutter_window }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_sections, 50);
        assert_eq!(config.min_section_size, 100);
        assert_eq!(config.merge_window, 50);
        assert_eq!(config.stutter_window, 5);
        assert_eq!(config.min_match, 3);
        assert_eq!(config.fan_out, 1);
    }

    #[test]
    fn toml_round_trip_with_partial_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scrollkeep.toml");
        std::fs::write(&path, "fan_out = 4\nmax_sections = 10\nunknown_future_key = true\n").unwrap();

        let config = PipelineConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.fan_out, 4);
        assert_eq!(config.max_sections, 10);
        assert_eq!(config.min_section_size, 100);
    }
}
