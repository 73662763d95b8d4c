//! Exhaustive document validation
//!
//! Walks every recognized field of the raw tree against the schema table,
//! collecting all violations before failing so one pass is enough to fix a
//! config. Component names resolve against the registry; fixed enumerations
//! (data type, distance metric) against the allow-lists below.

use super::error::{ValidationReport, Violation};
use crate::config::raw::RawDocument;
use crate::config::schema::{
    self, DataConfig, ExperimentConfig, FieldKind, FieldSpec, LossConfig, ModelConfig,
    SamplerConfig, TestConfig,
};
use crate::registry::{Family, Registry};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

/// Valid values for `data.type`
pub const DATA_TYPES: &[&str] = &["image", "video"];

/// Valid values for `test.dist_metric`
pub const DIST_METRICS: &[&str] = &["euclidean", "cosine"];

/// Unknown-key policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Warn about unrecognized sections and keys, then ignore them
    #[default]
    Lenient,
    /// Reject unrecognized sections and keys
    Strict,
}

/// Successful validation result
#[derive(Debug, Clone)]
pub struct Validated {
    /// The immutable typed configuration
    pub config: ExperimentConfig,
    /// Lenient-mode notes about ignored keys, empty under `Strict`
    pub warnings: Vec<String>,
}

/// Validate a raw document into an `ExperimentConfig`.
///
/// All-or-nothing: if any violation exists, no config is produced and the
/// report enumerates every violation found.
pub fn validate_document(
    doc: &RawDocument,
    registry: &Registry,
    strictness: Strictness,
) -> Result<Validated, ValidationReport> {
    let mut report = ValidationReport::default();
    let mut warnings = Vec::new();

    for (key, value) in doc.entries() {
        let name = key_name(key);
        if !schema::SECTIONS.contains(&name.as_str()) {
            match strictness {
                Strictness::Strict => {
                    report.push(Violation::new(&name, None, "unrecognized section"));
                }
                Strictness::Lenient => {
                    warnings.push(format!("ignoring unknown section '{name}'"));
                }
            }
            continue;
        }

        match value {
            Value::Mapping(map) => {
                check_section(&name, map, registry, strictness, &mut report, &mut warnings);
            }
            // bare "sampler:" with no keys parses as null; all defaults
            Value::Null => {}
            other => {
                report.push(Violation::new(
                    &name,
                    None,
                    format!("expected a mapping of keys, got {}", value_repr(other)),
                ));
            }
        }
    }

    if !report.is_empty() {
        return Err(report);
    }

    let model = typed_section::<ModelConfig>(doc, "model", &mut report);
    let data = typed_section::<DataConfig>(doc, "data", &mut report);
    let sampler = typed_section::<SamplerConfig>(doc, "sampler", &mut report);
    let loss = typed_section::<LossConfig>(doc, "loss", &mut report);
    let test = typed_section::<TestConfig>(doc, "test", &mut report);

    let (Some(model), Some(mut data), Some(sampler), Some(loss), Some(test)) =
        (model, data, sampler, loss, test)
    else {
        return Err(report);
    };

    // targets mirrors sources when the key is absent
    if !doc.contains_key("data", "targets") {
        data.targets = data.sources.clone();
    }

    Ok(Validated {
        config: ExperimentConfig::new(model, data, sampler, loss, test),
        warnings,
    })
}

fn check_section(
    section: &str,
    map: &Mapping,
    registry: &Registry,
    strictness: Strictness,
    report: &mut ValidationReport,
    warnings: &mut Vec<String>,
) {
    for (key, value) in map {
        let key_str = key_name(key);
        let Some(spec) = schema::field_spec(section, &key_str) else {
            match strictness {
                Strictness::Strict => {
                    report.push(Violation::new(section, Some(&key_str), "unrecognized key"));
                }
                Strictness::Lenient => {
                    warnings.push(format!("ignoring unknown key '{section}.{key_str}'"));
                }
            }
            continue;
        };

        match check_kind(spec.kind, value) {
            Err(reason) => report.push(Violation::new(section, Some(&key_str), reason)),
            Ok(()) => {
                for reason in check_constraints(spec, value, registry) {
                    report.push(Violation::new(section, Some(&key_str), reason));
                }
            }
        }
    }
}

/// Build one typed section from its raw value, or defaults when absent.
///
/// Kind checks already passed for every recognized key, so failure here is
/// unexpected; it is still reported rather than panicking.
fn typed_section<T: DeserializeOwned + Default>(
    doc: &RawDocument,
    section: &str,
    report: &mut ValidationReport,
) -> Option<T> {
    match doc.section(section) {
        None | Some(Value::Null) => Some(T::default()),
        Some(value) => match serde_yaml::from_value(value.clone()) {
            Ok(typed) => Some(typed),
            Err(err) => {
                report.push(Violation::new(section, None, err.to_string()));
                None
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Kind checks
// ---------------------------------------------------------------------------

fn check_kind(kind: FieldKind, value: &Value) -> Result<(), String> {
    match kind {
        FieldKind::Str => {
            if value.is_string() {
                Ok(())
            } else {
                Err(mismatch("a string", value))
            }
        }
        FieldKind::Bool => {
            if value.is_bool() {
                Ok(())
            } else {
                Err(mismatch("a boolean", value))
            }
        }
        FieldKind::PosInt => check_int(value, 1, "a positive integer"),
        FieldKind::UInt => check_int(value, 0, "a non-negative integer"),
        FieldKind::Float => {
            if value.as_f64().is_some() {
                Ok(())
            } else {
                Err(mismatch("a number", value))
            }
        }
        FieldKind::StrList => check_list(value, Value::is_string, "a list of strings"),
        FieldKind::PosIntList => check_list(
            value,
            |v| v.as_u64().is_some_and(|n| n >= 1),
            "a list of positive integers",
        ),
        FieldKind::FloatList => {
            check_list(value, |v| v.as_f64().is_some(), "a list of numbers")
        }
    }
}

fn check_int(value: &Value, min: i64, expected: &str) -> Result<(), String> {
    match value.as_i64() {
        Some(n) if n >= min => Ok(()),
        Some(n) => Err(format!("must be {expected} (got {n})")),
        None => Err(mismatch(expected, value)),
    }
}

fn check_list(
    value: &Value,
    element_ok: impl Fn(&Value) -> bool,
    expected: &str,
) -> Result<(), String> {
    let Some(seq) = value.as_sequence() else {
        return Err(mismatch(expected, value));
    };
    if seq.iter().all(element_ok) {
        Ok(())
    } else {
        Err(format!("must be {expected}"))
    }
}

fn mismatch(expected: &str, value: &Value) -> String {
    format!("expected {expected}, got {}", value_repr(value))
}

fn value_repr(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Sequence(_) => "a list".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(_) => "a tagged value".to_string(),
    }
}

fn key_name(key: &Value) -> String {
    match key.as_str() {
        Some(s) => s.to_string(),
        None => value_repr(key),
    }
}

// ---------------------------------------------------------------------------
// Per-field constraints
// ---------------------------------------------------------------------------

/// Constraints beyond the primitive kind; runs only after the kind check
/// passed, so the accessors below cannot miss.
fn check_constraints(spec: &FieldSpec, value: &Value, registry: &Registry) -> Vec<String> {
    match (spec.section, spec.key) {
        ("model", "name") => registry_name(registry, Family::Model, value),
        ("data", "type") => allow_list(value, DATA_TYPES),
        ("data", "sources") | ("data", "targets") => {
            let mut reasons = non_empty(value);
            reasons.extend(registry_elements(registry, Family::Dataset, value));
            reasons
        }
        ("data", "transforms") => registry_elements(registry, Family::Transform, value),
        ("data", "norm_mean") | ("data", "norm_std") => channel_triple(value),
        ("sampler", "train_sampler") => registry_name(registry, Family::Sampler, value),
        ("loss", "name") => registry_name(registry, Family::Loss, value),
        ("loss", "margin") | ("loss", "weight_t") | ("loss", "weight_x") => non_negative(value),
        ("test", "dist_metric") => allow_list(value, DIST_METRICS),
        ("test", "maskthr") => unit_interval(value),
        ("test", "ranks") => non_empty(value),
        _ => Vec::new(),
    }
}

fn registry_name(registry: &Registry, family: Family, value: &Value) -> Vec<String> {
    let name = value.as_str().unwrap_or_default();
    if registry.contains(family, name) {
        Vec::new()
    } else {
        vec![format!(
            "unknown {} '{name}' (registered: {})",
            family.noun(),
            registry.names(family).collect::<Vec<_>>().join(", ")
        )]
    }
}

fn registry_elements(registry: &Registry, family: Family, value: &Value) -> Vec<String> {
    let Some(seq) = value.as_sequence() else {
        return Vec::new();
    };
    seq.iter()
        .filter_map(Value::as_str)
        .filter(|name| !registry.contains(family, name))
        .map(|name| {
            format!(
                "unknown {} '{name}' (registered: {})",
                family.noun(),
                registry.names(family).collect::<Vec<_>>().join(", ")
            )
        })
        .collect()
}

fn allow_list(value: &Value, allowed: &[&str]) -> Vec<String> {
    let name = value.as_str().unwrap_or_default();
    if allowed.contains(&name) {
        Vec::new()
    } else {
        vec![format!("must be one of: {}", allowed.join(", "))]
    }
}

fn non_empty(value: &Value) -> Vec<String> {
    match value.as_sequence() {
        Some(seq) if seq.is_empty() => vec!["must not be empty".to_string()],
        _ => Vec::new(),
    }
}

fn channel_triple(value: &Value) -> Vec<String> {
    match value.as_sequence() {
        Some(seq) if seq.len() != 3 => {
            vec![format!("must have exactly 3 channel values (got {})", seq.len())]
        }
        _ => Vec::new(),
    }
}

fn non_negative(value: &Value) -> Vec<String> {
    match value.as_f64() {
        Some(n) if n < 0.0 => vec![format!("must be >= 0 (got {n})")],
        _ => Vec::new(),
    }
}

fn unit_interval(value: &Value) -> Vec<String> {
    match value.as_f64() {
        Some(n) if !(0.0..=1.0).contains(&n) => {
            vec![format!("must be in [0, 1] (got {n})")]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(text: &str) -> Result<Validated, ValidationReport> {
        let doc = RawDocument::parse(text).unwrap();
        validate_document(&doc, &Registry::builtin(), Strictness::default())
    }

    fn validate_strict(text: &str) -> Result<Validated, ValidationReport> {
        let doc = RawDocument::parse(text).unwrap();
        validate_document(&doc, &Registry::builtin(), Strictness::Strict)
    }

    #[test]
    fn test_empty_document_is_all_defaults() {
        let validated = validate("").unwrap();
        let config = validated.config;
        assert_eq!(config.model().name, "resnet50");
        assert_eq!(config.test().batch_size, 32);
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn test_supplied_values_override_defaults() {
        let validated = validate(
            "model:\n  name: bdnet\ntest:\n  batch_size: 100\n  rerank: true\n",
        )
        .unwrap();
        let config = validated.config;
        assert_eq!(config.model().name, "bdnet");
        assert_eq!(config.test().batch_size, 100);
        assert!(config.test().rerank);
        // untouched keys keep their defaults
        assert_eq!(config.test().eval_freq, 20);
        assert!(!config.test().evaluate);
    }

    #[test]
    fn test_targets_mirror_sources_when_omitted() {
        let validated =
            validate("data:\n  sources: [market1501, msmt17]\n").unwrap();
        assert_eq!(validated.config.data().targets, vec!["market1501", "msmt17"]);
    }

    #[test]
    fn test_explicit_targets_kept() {
        let validated = validate(
            "data:\n  sources: [market1501]\n  targets: [dukemtmcreid]\n",
        )
        .unwrap();
        assert_eq!(validated.config.data().targets, vec!["dukemtmcreid"]);
    }

    #[test]
    fn test_empty_sources_rejected() {
        let report = validate("data:\n  sources: []\n").unwrap_err();
        assert!(report.mentions("data", "sources"));
    }

    #[test]
    fn test_unknown_dist_metric_names_section_and_key() {
        let report = validate("test:\n  dist_metric: manhattan\n").unwrap_err();
        assert!(report.mentions("test", "dist_metric"));
        assert!(report.to_string().contains("euclidean"));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let report = validate("test:\n  batch_size: 0\n").unwrap_err();
        assert!(report.mentions("test", "batch_size"));
    }

    #[test]
    fn test_negative_batch_size_rejected() {
        let report = validate("test:\n  batch_size: -5\n").unwrap_err();
        assert!(report.mentions("test", "batch_size"));
    }

    #[test]
    fn test_maskthr_out_of_range_rejected() {
        let report = validate("test:\n  maskthr: 1.5\n").unwrap_err();
        assert!(report.mentions("test", "maskthr"));
    }

    #[test]
    fn test_unknown_model_rejected() {
        let report = validate("model:\n  name: resnet9000\n").unwrap_err();
        assert!(report.mentions("model", "name"));
        assert!(report.to_string().contains("unknown model 'resnet9000'"));
    }

    #[test]
    fn test_unknown_transform_rejected() {
        let report =
            validate("data:\n  transforms: [random_flip, cutmix]\n").unwrap_err();
        assert!(report.mentions("data", "transforms"));
        assert!(report.to_string().contains("cutmix"));
    }

    #[test]
    fn test_all_violations_reported_at_once() {
        let report = validate(
            "model:\n  name: resnet9000\ntest:\n  batch_size: 0\n  dist_metric: manhattan\n  maskthr: 2.0\n",
        )
        .unwrap_err();
        assert_eq!(report.len(), 4);
        assert!(report.mentions("model", "name"));
        assert!(report.mentions("test", "batch_size"));
        assert!(report.mentions("test", "dist_metric"));
        assert!(report.mentions("test", "maskthr"));
    }

    #[test]
    fn test_wrong_type_reported_per_key() {
        let report = validate("data:\n  height: tall\n  combineall: 3\n").unwrap_err();
        assert_eq!(report.len(), 2);
        assert!(report.mentions("data", "height"));
        assert!(report.mentions("data", "combineall"));
    }

    #[test]
    fn test_section_must_be_mapping() {
        let report = validate("model: just a string\n").unwrap_err();
        assert_eq!(report.violations()[0].section, "model");
        assert!(report.violations()[0].key.is_none());
    }

    #[test]
    fn test_lenient_mode_warns_on_unknown_key() {
        let validated = validate("data:\n  cache_images: true\n").unwrap();
        assert_eq!(validated.warnings.len(), 1);
        assert!(validated.warnings[0].contains("data.cache_images"));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_key() {
        let report = validate_strict("data:\n  cache_images: true\n").unwrap_err();
        assert!(report.mentions("data", "cache_images"));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_section() {
        let report = validate_strict("optimizer:\n  lr: 0.001\n").unwrap_err();
        assert_eq!(report.violations()[0].section, "optimizer");
    }

    #[test]
    fn test_lenient_mode_warns_on_unknown_section() {
        let validated = validate("optimizer:\n  lr: 0.001\n").unwrap();
        assert!(validated.warnings[0].contains("optimizer"));
    }

    #[test]
    fn test_registered_component_accepted() {
        let mut registry = Registry::builtin();
        registry.register(
            crate::registry::Family::Model,
            "dropnet",
            crate::registry::Descriptor::new("experimental"),
        );
        let doc = RawDocument::parse("model:\n  name: dropnet\n").unwrap();
        assert!(validate_document(&doc, &registry, Strictness::default()).is_ok());
    }

    #[test]
    fn test_norm_mean_requires_three_channels() {
        let report = validate("data:\n  norm_mean: [0.5, 0.5]\n").unwrap_err();
        assert!(report.mentions("data", "norm_mean"));
    }

    #[test]
    fn test_negative_margin_rejected() {
        let report = validate("loss:\n  margin: -0.3\n").unwrap_err();
        assert!(report.mentions("loss", "margin"));
    }
}
