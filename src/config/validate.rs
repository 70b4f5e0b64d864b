//! Config validation.
//!
//! Checks run in a fixed order: required fields, unknown keys, value types,
//! then the `authDomain` format. Warnings never fail validation. Errors fail it
//! under [`ValidationPolicy::Strict`] and are demoted to warnings under
//! [`ValidationPolicy::Lenient`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::field::Field;
use super::{ConfigError, PartialConfig};

static LOCALHOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^localhost(:[0-9]+)?$").expect("valid regex"));

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}(:[0-9]+)?$").expect("valid regex")
});

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)*$")
        .expect("valid regex")
});

/// How a pipeline run treats missing or malformed fields.
///
/// The same policy drives both backfill during resolution and the outcome of
/// validation, so the two cannot drift apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Any error aborts the run.
    #[default]
    Strict,
    /// Errors are logged as warnings, missing required fields are backfilled
    /// with empty strings, and the run continues.
    Lenient,
    /// No validation and no backfill.
    Disabled,
}

impl ValidationPolicy {
    pub fn from_flags(validate: bool, strict: bool) -> Self {
        match (validate, strict) {
            (false, _) => ValidationPolicy::Disabled,
            (true, true) => ValidationPolicy::Strict,
            (true, false) => ValidationPolicy::Lenient,
        }
    }

    /// Whether absent required fields are filled with `""` during resolution.
    pub fn backfills(self) -> bool {
        self == ValidationPolicy::Lenient
    }
}

/// Errors and warnings collected from one validation pass, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Runs every check and collects the findings without logging anything.
pub fn check_config(config: &PartialConfig) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    for field in Field::REQUIRED {
        if !config.get(field.key()).is_some_and(is_truthy) {
            outcome
                .errors
                .push(format!("Missing required field: {field}"));
        }
    }

    for key in config.keys() {
        if Field::from_key(key).is_none() {
            outcome.warnings.push(format!("Unknown field: {key}"));
        }
    }

    for field in Field::ALL {
        match config.get(field.key()) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => outcome.errors.push(format!(
                "Field {field} must be a string, got {}",
                type_name(other)
            )),
        }
    }

    if let Some(Value::String(domain)) = config.get(Field::AuthDomain.key()) {
        if !domain.is_empty() && !is_valid_auth_domain(domain) {
            outcome.warnings.push(format!(
                "authDomain \"{domain}\" doesn't look like a valid domain. This might cause issues."
            ));
        }
    }

    outcome
}

/// Validates `config` under `policy`, logging every finding.
///
/// Warnings are always logged. Under [`ValidationPolicy::Strict`] any error is
/// logged and returned as [`ConfigError::Validation`]. Under
/// [`ValidationPolicy::Lenient`] errors are logged as warnings and the
/// outcome is returned as success; the caller is expected to have backfilled
/// required fields. [`ValidationPolicy::Disabled`] skips all checks.
pub fn validate_config(
    config: &PartialConfig,
    policy: ValidationPolicy,
) -> Result<ValidationOutcome, ConfigError> {
    if policy == ValidationPolicy::Disabled {
        return Ok(ValidationOutcome::default());
    }

    let outcome = check_config(config);

    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }

    if outcome.errors.is_empty() {
        return Ok(outcome);
    }

    match policy {
        ValidationPolicy::Strict => {
            for error in &outcome.errors {
                tracing::error!("{error}");
            }
            Err(ConfigError::Validation {
                errors: outcome.errors,
            })
        }
        _ => {
            for error in &outcome.errors {
                tracing::warn!("{error}");
            }
            tracing::warn!(
                "Validation errors detected but continuing in non-strict mode. \
                 Empty fields will be filled with empty strings."
            );
            Ok(outcome)
        }
    }
}

/// Accepts `localhost[:port]`, a dotted-quad IPv4 address with an optional
/// port, or a lowercase DNS hostname. Octets are not range checked.
pub fn is_valid_auth_domain(domain: &str) -> bool {
    LOCALHOST.is_match(domain) || IPV4.is_match(domain) || HOSTNAME.is_match(domain)
}

// Mirrors the host's truthiness rules so `""`, `0` and `false` count as missing.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_config() -> PartialConfig {
        match json!({
            "apiKey": "test-api-key",
            "authDomain": "test.firebaseapp.com",
            "projectId": "test-project",
            "storageBucket": "test-project.appspot.com",
            "messagingSenderId": "123456789",
            "appId": "1:123:web:abc",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_valid_config_passes_strict() {
        let outcome = validate_config(&valid_config(), ValidationPolicy::Strict).unwrap();
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_optional_fields_accepted() {
        let mut config = valid_config();
        config.insert("measurementId".into(), json!("G-XXXXXXXXXX"));
        config.insert("databaseURL".into(), json!("https://test.firebaseio.com"));
        assert!(check_config(&config).is_clean());
    }

    #[test]
    fn test_missing_required_field_strict() {
        let mut config = valid_config();
        config.remove("apiKey");

        let err = validate_config(&config, ValidationPolicy::Strict).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Firebase configuration validation failed"));
        assert!(message.contains("Missing required field: apiKey"));
    }

    #[test]
    fn test_missing_required_field_lenient() {
        let mut config = valid_config();
        config.remove("apiKey");

        let outcome = validate_config(&config, ValidationPolicy::Lenient).unwrap();
        assert_eq!(outcome.errors, vec!["Missing required field: apiKey"]);
    }

    #[test]
    fn test_empty_config_lenient_and_strict() {
        let empty = PartialConfig::new();

        let outcome = validate_config(&empty, ValidationPolicy::Lenient).unwrap();
        assert_eq!(outcome.errors.len(), 6);

        match validate_config(&empty, ValidationPolicy::Strict) {
            Err(ConfigError::Validation { errors }) => assert_eq!(errors.len(), 6),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_disabled_skips_checks() {
        let outcome = validate_config(&PartialConfig::new(), ValidationPolicy::Disabled).unwrap();
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut config = valid_config();
        config.insert("appId".into(), json!(""));
        assert_eq!(
            check_config(&config).errors,
            vec!["Missing required field: appId"]
        );
    }

    #[test]
    fn test_unknown_field_is_warning() {
        let mut config = valid_config();
        config.insert("extraThing".into(), json!("x"));

        let outcome = validate_config(&config, ValidationPolicy::Strict).unwrap();
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.warnings, vec!["Unknown field: extraThing"]);
    }

    #[test]
    fn test_non_string_value_is_error() {
        let mut config = valid_config();
        config.insert("messagingSenderId".into(), json!(123456789));
        config.insert("databaseURL".into(), json!(["a"]));

        let outcome = check_config(&config);
        assert_eq!(
            outcome.errors,
            vec![
                "Field messagingSenderId must be a string, got number",
                "Field databaseURL must be a string, got array",
            ]
        );
    }

    #[test]
    fn test_null_known_field_counts_as_absent() {
        let mut config = valid_config();
        config.insert("authDomain".into(), Value::Null);
        config.insert("databaseURL".into(), Value::Null);

        let outcome = check_config(&config);
        assert_eq!(outcome.errors, vec!["Missing required field: authDomain"]);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_falsy_non_string_reports_both_errors() {
        let mut config = valid_config();
        config.insert("projectId".into(), json!(false));

        let outcome = check_config(&config);
        assert_eq!(
            outcome.errors,
            vec![
                "Missing required field: projectId",
                "Field projectId must be a string, got boolean",
            ]
        );
    }

    #[test]
    fn test_suspicious_auth_domain_is_warning() {
        let mut config = valid_config();
        config.insert("authDomain".into(), json!("Example.COM"));

        let outcome = validate_config(&config, ValidationPolicy::Strict).unwrap();
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("Example.COM"));
    }

    #[test]
    fn test_auth_domain_grammar() {
        for ok in [
            "localhost",
            "localhost:5173",
            "192.168.1.1:3000",
            "999.1.1.1",
            "example.com",
            "sub.example.com",
            "my-app.firebaseapp.com",
        ] {
            assert!(is_valid_auth_domain(ok), "{ok} should be accepted");
        }

        for bad in [
            "Example.com",
            "exa_mple.com",
            "-example.com",
            "example-.com",
            "example..com",
            "example.com:8080",
            "localhost:",
            "https://example.com",
            "",
        ] {
            assert!(!is_valid_auth_domain(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_policy_from_flags() {
        assert_eq!(ValidationPolicy::from_flags(true, true), ValidationPolicy::Strict);
        assert_eq!(ValidationPolicy::from_flags(true, false), ValidationPolicy::Lenient);
        assert_eq!(ValidationPolicy::from_flags(false, true), ValidationPolicy::Disabled);
        assert!(ValidationPolicy::Lenient.backfills());
        assert!(!ValidationPolicy::Strict.backfills());
        assert!(!ValidationPolicy::Disabled.backfills());
    }
}
