//! Pipeline config schema types.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkilldocConfig {
    /// Skill config files processed when no files are given on the command line.
    pub inputs: Vec<PathBuf>,
    /// Directory generated documents are written to. `None` keeps them in memory.
    pub output_dir: Option<PathBuf>,
    pub report: ReportConfig,
}

/// Console summary settings for `skilldoc run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of leading lines of each document shown in the summary.
    pub preview_lines: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { preview_lines: 10 }
    }
}

impl SkilldocConfig {
    /// Replace configured inputs with `paths` when any were given.
    pub fn with_inputs(mut self, paths: Vec<PathBuf>) -> Self {
        if !paths.is_empty() {
            self.inputs = paths;
        }
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg: SkilldocConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.inputs.is_empty());
        assert!(cfg.output_dir.is_none());
        assert_eq!(cfg.report.preview_lines, 10);
    }

    #[test]
    fn cli_inputs_override_configured_ones() {
        let cfg = SkilldocConfig {
            inputs: vec![PathBuf::from("a.json")],
            ..Default::default()
        };
        let cfg = cfg.with_inputs(vec![PathBuf::from("b.json")]);
        assert_eq!(cfg.inputs, vec![PathBuf::from("b.json")]);
    }

    #[test]
    fn no_cli_inputs_keeps_configured_ones() {
        let cfg = SkilldocConfig {
            inputs: vec![PathBuf::from("a.json")],
            ..Default::default()
        };
        let cfg = cfg.with_inputs(Vec::new());
        assert_eq!(cfg.inputs, vec![PathBuf::from("a.json")]);
    }
}
