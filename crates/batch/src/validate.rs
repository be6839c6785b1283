//! Schema checks for skill configuration files.
//!
//! Pure and synchronous: validation only looks at already-loaded content.

use std::path::Path;

use serde_json::{Map, Value};

use crate::types::{ContentMap, SkillConfig, ValidationVerdict};

/// Reported when a record has no content to parse.
pub const EMPTY_CONFIG_ERROR: &str = "Configuration file is empty or unreadable";

/// Reported when the document is a bare JSON `null`.
pub const NULL_DOCUMENT_ERROR: &str = "JSON parse error: expected a JSON object, found null";

/// Top-level fields every skill config must carry, in reporting order.
pub const REQUIRED_FIELDS: &[&str] = &["name", "version", "description"];

/// Validate every record, preserving the map's iteration order.
pub fn batch_validate(records: &ContentMap) -> Vec<ValidationVerdict> {
    records
        .iter()
        .map(|(location, record)| validate_content(location, record.content.as_deref()))
        .collect()
}

/// Validate the content loaded for a single location.
pub fn validate_content(location: &Path, content: Option<&str>) -> ValidationVerdict {
    let Some(content) = content.filter(|c| !c.is_empty()) else {
        return ValidationVerdict::invalid(location, vec![EMPTY_CONFIG_ERROR.to_string()]);
    };

    let mut value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            return ValidationVerdict::invalid(location, vec![format!("JSON parse error: {e}")]);
        },
    };

    // Scalars and arrays have no fields, so every required field is missing.
    let no_fields = Map::new();
    let fields = match &value {
        Value::Object(fields) => fields,
        Value::Null => {
            return ValidationVerdict::invalid(location, vec![NULL_DOCUMENT_ERROR.to_string()]);
        },
        _ => &no_fields,
    };

    let mut errors = Vec::new();
    for field in REQUIRED_FIELDS {
        if !is_set(fields.get(*field)) {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    if let Some(metadata) = fields.get("metadata")
        && is_truthy(metadata)
    {
        if !is_set(metadata.get("apiVersion")) {
            errors.push("Missing metadata.apiVersion".to_string());
        }
        if !is_set(metadata.get("compatibility")) {
            errors.push("Missing metadata.compatibility".to_string());
        }
    }

    if !errors.is_empty() {
        return ValidationVerdict::invalid(location, errors);
    }

    // A falsy `metadata` was skipped above and is dropped before typing.
    if let Value::Object(fields) = &mut value {
        fields.retain(|key, v| key != "metadata" || is_truthy(v));
    }

    match serde_json::from_value::<SkillConfig>(value) {
        Ok(config) => ValidationVerdict::valid(location, config),
        Err(e) => ValidationVerdict::invalid(location, vec![format!("Invalid field type: {e}")]),
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy, everything else
/// (including empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_set(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {
        super::*,
        crate::types::{ContentRecord, Verdict},
        rstest::rstest,
        serde_json::json,
    };

    fn check(content: &str) -> ValidationVerdict {
        validate_content(Path::new("skill.json"), Some(content))
    }

    #[test]
    fn minimal_config_is_valid() {
        let verdict = check(r#"{"name":"x","version":"1.0.0","description":"d"}"#);
        assert!(verdict.is_valid());
        assert!(verdict.errors().is_empty());
        let config = verdict.config().unwrap();
        assert_eq!(config.name, "x");
        assert_eq!(config.version, "1.0.0");
        assert!(config.author.is_none());
    }

    #[test]
    fn missing_fields_are_each_reported_in_order() {
        let verdict = check(r#"{"version":"1.0.0"}"#);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.errors(), [
            "Missing required field: name",
            "Missing required field: description",
        ]);
        assert!(verdict.config().is_none());
    }

    #[test]
    fn malformed_json_yields_single_parse_error() {
        let verdict = check("{not json");
        assert_eq!(verdict.errors().len(), 1);
        assert!(verdict.errors()[0].starts_with("JSON parse error: "));
    }

    #[test]
    fn absent_content_is_empty_config() {
        let verdict = validate_content(Path::new("gone.json"), None);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.errors(), [EMPTY_CONFIG_ERROR]);
    }

    #[test]
    fn empty_content_is_empty_config() {
        assert_eq!(check("").errors(), [EMPTY_CONFIG_ERROR]);
    }

    #[test]
    fn null_document_is_a_parse_error() {
        assert_eq!(check("null").errors(), [NULL_DOCUMENT_ERROR]);
    }

    #[rstest]
    #[case("42")]
    #[case("\"skill\"")]
    #[case("[1, 2]")]
    #[case("true")]
    fn non_object_documents_miss_every_required_field(#[case] content: &str) {
        let verdict = check(content);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.errors(), [
            "Missing required field: name",
            "Missing required field: version",
            "Missing required field: description",
        ]);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(""))]
    #[case(json!(0))]
    #[case(json!(false))]
    fn falsy_required_field_counts_as_missing(#[case] name: Value) {
        let content = json!({"name": name, "version": "1.0.0", "description": "d"});
        let verdict = check(&content.to_string());
        assert_eq!(verdict.errors(), ["Missing required field: name"]);
    }

    #[test]
    fn incomplete_metadata_invalidates_record() {
        let verdict = check(r#"{"name":"x","version":"1","description":"d","metadata":{}}"#);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.errors(), [
            "Missing metadata.apiVersion",
            "Missing metadata.compatibility",
        ]);
    }

    #[test]
    fn partial_metadata_reports_only_the_gap() {
        let verdict = check(
            r#"{"name":"x","version":"1","description":"d","metadata":{"apiVersion":"v2"}}"#,
        );
        assert_eq!(verdict.errors(), ["Missing metadata.compatibility"]);
    }

    #[test]
    fn null_metadata_is_treated_as_absent() {
        let verdict = check(r#"{"name":"x","version":"1","description":"d","metadata":null}"#);
        assert!(verdict.is_valid());
    }

    #[rstest]
    #[case(json!(false))]
    #[case(json!(0))]
    #[case(json!(""))]
    fn falsy_metadata_is_treated_as_absent(#[case] metadata: Value) {
        let content = json!({
            "name": "x",
            "version": "1",
            "description": "d",
            "metadata": metadata,
        });
        let verdict = check(&content.to_string());
        assert!(verdict.is_valid(), "errors: {:?}", verdict.errors());
        let config = verdict.config().unwrap();
        assert!(config.metadata.is_none());
        assert!(!config.extra.contains_key("metadata"));
    }

    #[test]
    fn complete_metadata_is_parsed() {
        let verdict = check(
            r#"{"name":"x","version":"1","description":"d","author":"a",
                "metadata":{"apiVersion":"v2","compatibility":{"claude":">=1"}}}"#,
        );
        let config = verdict.config().unwrap();
        let metadata = config.metadata.as_ref().unwrap();
        assert_eq!(metadata.api_version.as_deref(), Some("v2"));
        assert_eq!(metadata.compatibility, Some(json!({"claude": ">=1"})));
        assert_eq!(config.author.as_deref(), Some("a"));
    }

    #[test]
    fn wrong_field_type_is_reported() {
        let verdict = check(r#"{"name":7,"version":"1","description":"d"}"#);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.errors().len(), 1);
        assert!(verdict.errors()[0].starts_with("Invalid field type: "));
    }

    #[test]
    fn batch_preserves_order_and_totality() {
        let records = ContentMap::from([
            (
                "a.json".into(),
                ContentRecord::loaded("a.json", r#"{"name":"a","version":"1","description":"d"}"#),
            ),
            ("b.json".into(), ContentRecord::failed("b.json", "denied")),
            ("c.json".into(), ContentRecord::loaded("c.json", "{")),
        ]);

        let verdicts = batch_validate(&records);
        assert_eq!(verdicts.len(), records.len());
        let locations: Vec<_> = verdicts.iter().map(|v| v.location()).collect();
        assert_eq!(locations, [
            Path::new("a.json"),
            Path::new("b.json"),
            Path::new("c.json")
        ]);
        for verdict in &verdicts {
            assert_eq!(verdict.is_valid(), verdict.errors().is_empty());
            assert_eq!(verdict.is_valid(), verdict.config().is_some());
            assert_eq!(
                verdict.is_valid(),
                matches!(verdict.outcome(), Verdict::Valid(_))
            );
        }
    }

    #[test]
    fn batch_validation_is_idempotent() {
        let records = ContentMap::from([
            (
                "a.json".into(),
                ContentRecord::loaded("a.json", r#"{"version":"1"}"#),
            ),
            (
                "b.json".into(),
                ContentRecord::loaded("b.json", r#"{"name":"b","version":"1","description":"d"}"#),
            ),
        ]);
        assert_eq!(batch_validate(&records), batch_validate(&records));
    }
}
