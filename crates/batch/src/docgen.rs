//! Markdown rendering for validation verdicts.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    types::{DocumentKind, GeneratedDocument, SkillConfig, ValidationVerdict, Verdict},
    validate::is_truthy,
};

/// Placeholder for optional fields a config leaves out.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Footer tag stamped on every generated document.
pub const GENERATOR_TAG: &str = concat!("skilldoc v", env!("CARGO_PKG_VERSION"));

/// Render one document per verdict, keyed by location.
pub fn batch_generate_docs(
    verdicts: &[ValidationVerdict],
) -> BTreeMap<PathBuf, GeneratedDocument> {
    verdicts
        .iter()
        .map(|verdict| {
            let doc = generate_doc(verdict);
            (doc.location.clone(), doc)
        })
        .collect()
}

/// Render a skill document for a valid verdict or an error report otherwise.
pub fn generate_doc(verdict: &ValidationVerdict) -> GeneratedDocument {
    let (kind, text) = match verdict.outcome() {
        Verdict::Valid(config) => (DocumentKind::Skill, render_skill_doc(config)),
        Verdict::Invalid(errors) => (
            DocumentKind::ErrorReport,
            render_error_doc(verdict.location(), errors),
        ),
    };
    GeneratedDocument {
        location: verdict.location().to_path_buf(),
        kind,
        text,
    }
}

fn render_skill_doc(config: &SkillConfig) -> String {
    let author = non_empty(config.author.as_deref()).unwrap_or(NOT_SPECIFIED);
    let metadata = config.metadata.as_ref();
    let api_version = non_empty(metadata.and_then(|m| m.api_version.as_deref()))
        .unwrap_or(NOT_SPECIFIED);
    let compatibility = metadata
        .and_then(|m| m.compatibility.as_ref())
        .filter(|c| is_truthy(c))
        .map_or_else(|| NOT_SPECIFIED.to_string(), pretty);

    format!(
        "# {name}

## Version
{version}

## Description
{description}

## Author
{author}

## API Version
{api_version}

## Compatibility
{compatibility}

## Configuration
```json
{dump}
```

---
*Generated by {GENERATOR_TAG}*
",
        name = config.name,
        version = config.version,
        description = config.description,
        dump = pretty(config),
    )
}

fn render_error_doc(location: &Path, errors: &[String]) -> String {
    let error_lines = errors
        .iter()
        .map(|e| format!("- {e}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Error Report

## File
{location}

## Errors
{error_lines}

---
*Generated by {GENERATOR_TAG}*
",
        location = location.display(),
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}
