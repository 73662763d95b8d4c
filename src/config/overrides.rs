//! CLI override parsing
//!
//! Overrides use `section.key=value` form and merge into the raw tree
//! before validation, so every schema constraint applies to overridden
//! values exactly as it does to file values.

use crate::error::{Error, Result};
use serde_yaml::Value;

/// One parsed `section.key=value` override
#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    pub section: String,
    pub key: String,
    pub value: Value,
}

/// Parse a single override argument.
///
/// The value part is interpreted as a YAML scalar, so `64` becomes an
/// integer, `true` a boolean, and `[random_flip, random_crop]` a sequence;
/// anything that fails to parse as YAML is kept as a plain string.
pub fn parse_override(text: &str) -> Result<Override> {
    let malformed = || Error::Override(text.to_string());

    let (path, raw_value) = text.split_once('=').ok_or_else(malformed)?;
    let (section, key) = path.split_once('.').ok_or_else(malformed)?;

    if section.is_empty() || key.is_empty() || key.contains('.') {
        return Err(malformed());
    }

    Ok(Override {
        section: section.to_string(),
        key: key.to_string(),
        value: parse_scalar(raw_value.trim()),
    })
}

/// Parse every override argument, failing on the first malformed one.
pub fn parse_overrides(args: &[String]) -> Result<Vec<Override>> {
    args.iter().map(|arg| parse_override(arg)).collect()
}

fn parse_scalar(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_override() {
        let ov = parse_override("test.batch_size=64").unwrap();
        assert_eq!(ov.section, "test");
        assert_eq!(ov.key, "batch_size");
        assert_eq!(ov.value.as_u64(), Some(64));
    }

    #[test]
    fn test_parse_bool_and_string_overrides() {
        let ov = parse_override("test.rerank=true").unwrap();
        assert_eq!(ov.value.as_bool(), Some(true));

        let ov = parse_override("model.name=bdnet").unwrap();
        assert_eq!(ov.value.as_str(), Some("bdnet"));
    }

    #[test]
    fn test_parse_sequence_override() {
        let ov = parse_override("data.transforms=[random_flip, random_crop]").unwrap();
        let seq = ov.value.as_sequence().unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0].as_str(), Some("random_flip"));
    }

    #[test]
    fn test_malformed_overrides_rejected() {
        for bad in ["batch_size=64", "test.batch_size", "=64", "test.=64", ".key=1", "a.b.c=1"] {
            assert!(
                matches!(parse_override(bad), Err(Error::Override(_))),
                "expected rejection: {bad}"
            );
        }
    }

    #[test]
    fn test_empty_value_becomes_null() {
        let ov = parse_override("test.rerank=").unwrap();
        assert!(ov.value.is_null());
    }

    #[test]
    fn test_parse_overrides_collects_all() {
        let args = vec!["test.batch_size=64".to_string(), "data.height=384".to_string()];
        let parsed = parse_overrides(&args).unwrap();
        assert_eq!(parsed.len(), 2);

        let args = vec!["test.batch_size=64".to_string(), "nodot=1".to_string()];
        assert!(parse_overrides(&args).is_err());
    }
}
