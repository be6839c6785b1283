use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use {
    serde::{Deserialize, Serialize, ser::SerializeStruct},
    serde_json::{Map, Value},
};

// ── Read side ────────────────────────────────────────────────────────────────

/// Raw content loaded for one location. `content` is `None` when the read failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub location: PathBuf,
    pub content: Option<String>,
    /// Why the read failed, kept for logs and summaries only.
    pub error: Option<String>,
}

impl ContentRecord {
    pub fn loaded(location: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            content: Some(content.into()),
            error: None,
        }
    }

    pub fn failed(location: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            content: None,
            error: Some(error.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.content.is_some()
    }
}

/// Content records keyed by location. One entry per distinct requested path.
pub type ContentMap = BTreeMap<PathBuf, ContentRecord>;

// ── Skill config schema ──────────────────────────────────────────────────────

/// A skill configuration file that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillConfig {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigMetadata>,
    /// Keys outside the schema, in file order, so the rendered dump shows the
    /// whole file.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Interop metadata block (`metadata` in the JSON file).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    #[serde(
        default,
        rename = "apiVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Outcome of validating one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Valid(SkillConfig),
    /// Always holds at least one error.
    Invalid(Vec<String>),
}

/// Validation result for one location.
///
/// Validity, an empty error list and a present config always agree, since
/// all three are derived from the same [`Verdict`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationVerdict {
    location: PathBuf,
    outcome: Verdict,
}

impl ValidationVerdict {
    pub(crate) fn valid(location: impl Into<PathBuf>, config: SkillConfig) -> Self {
        Self {
            location: location.into(),
            outcome: Verdict::Valid(config),
        }
    }

    pub(crate) fn invalid(location: impl Into<PathBuf>, errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty(), "invalid verdict without errors");
        Self {
            location: location.into(),
            outcome: Verdict::Invalid(errors),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn outcome(&self) -> &Verdict {
        &self.outcome
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, Verdict::Valid(_))
    }

    pub fn errors(&self) -> &[String] {
        match &self.outcome {
            Verdict::Valid(_) => &[],
            Verdict::Invalid(errors) => errors,
        }
    }

    pub fn config(&self) -> Option<&SkillConfig> {
        match &self.outcome {
            Verdict::Valid(config) => Some(config),
            Verdict::Invalid(_) => None,
        }
    }
}

impl Serialize for ValidationVerdict {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationVerdict", 4)?;
        state.serialize_field("location", &self.location)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", self.errors())?;
        state.serialize_field("parsedConfig", &self.config())?;
        state.end()
    }
}

// ── Generated output ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Rendered from a valid config.
    Skill,
    /// Lists the validation errors of an invalid config.
    ErrorReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub location: PathBuf,
    pub kind: DocumentKind,
    pub text: String,
}

/// Result of writing one file. Match outcomes by `location`, not position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub location: PathBuf,
    pub error: Option<String>,
}

impl WriteOutcome {
    pub fn written(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            error: None,
        }
    }

    pub fn failed(location: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            error: Some(error.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}
