//! Configuration loading pipeline
//!
//! read file -> parse -> apply overrides -> validate -> filesystem
//! finalization. Loading happens once at process startup; the returned
//! config is immutable and shared read-only from then on.

use super::overrides::Override;
use super::raw::RawDocument;
use super::schema::ExperimentConfig;
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::validate::{validate_document, Strictness};
use std::fs;
use std::path::Path;

/// Knobs for one load
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Unknown-key policy
    pub strictness: Strictness,

    /// CLI overrides merged into the document before validation
    pub overrides: Vec<Override>,
}

/// Result of a successful load
#[derive(Debug, Clone)]
pub struct Loaded {
    /// The immutable experiment configuration
    pub config: ExperimentConfig,

    /// Lenient-mode notes about ignored keys
    pub warnings: Vec<String>,
}

/// Parse and validate a document held in memory.
///
/// No filesystem effects; used by `load_experiment` and directly by tests
/// and embedders that manage files themselves.
pub fn parse_and_validate(
    text: &str,
    registry: &Registry,
    options: &LoadOptions,
) -> Result<Loaded> {
    let mut doc = RawDocument::parse(text)?;
    for ov in &options.overrides {
        doc.set(&ov.section, &ov.key, ov.value.clone());
    }

    let validated = validate_document(&doc, registry, options.strictness)?;
    Ok(Loaded { config: validated.config, warnings: validated.warnings })
}

/// Load an experiment configuration from a file.
///
/// On success the referenced weights/checkpoint files have been confirmed
/// to exist and `save_dir` has been created if it was absent.
pub fn load_experiment(
    path: impl AsRef<Path>,
    registry: &Registry,
    options: &LoadOptions,
) -> Result<Loaded> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let loaded = parse_and_validate(&text, registry, options)?;
    finalize_paths(&loaded.config)?;
    Ok(loaded)
}

/// Filesystem contract: weight paths must exist, `save_dir` is created.
fn finalize_paths(config: &ExperimentConfig) -> Result<()> {
    for weights in [config.model().weights_path(), config.model().resume_path()]
        .into_iter()
        .flatten()
    {
        if !weights.is_file() {
            return Err(Error::MissingWeights(weights.to_path_buf()));
        }
    }

    let save_dir = Path::new(&config.data().save_dir);
    fs::create_dir_all(save_dir).map_err(|source| Error::MissingPath {
        path: save_dir.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::overrides::parse_override;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let dir = TempDir::new().unwrap();
        let save_dir = dir.path().join("log");
        let yaml = format!(
            "model:\n  name: bdnet\ndata:\n  save_dir: {}\ntest:\n  batch_size: 100\n",
            save_dir.display()
        );
        let file = write_config(&yaml);

        let loaded =
            load_experiment(file.path(), &Registry::builtin(), &LoadOptions::default()).unwrap();
        assert_eq!(loaded.config.model().name, "bdnet");
        assert_eq!(loaded.config.test().batch_size, 100);
        assert!(save_dir.is_dir(), "save_dir should be created");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_experiment(
            "/nonexistent/experiment.yaml",
            &Registry::builtin(),
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(Error::Read { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let file = write_config("model: [unclosed");
        let result =
            load_experiment(file.path(), &Registry::builtin(), &LoadOptions::default());
        assert!(matches!(result, Err(Error::Syntax(_))));
    }

    #[test]
    fn test_load_invalid_config_reports_violations() {
        let file = write_config("test:\n  batch_size: 0\n  dist_metric: manhattan\n");
        let result =
            load_experiment(file.path(), &Registry::builtin(), &LoadOptions::default());
        let Err(Error::Validation(report)) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_missing_weights_rejected() {
        let dir = TempDir::new().unwrap();
        let yaml = format!(
            "model:\n  load_weights: /nonexistent/weights.pth\ndata:\n  save_dir: {}\n",
            dir.path().join("log").display()
        );
        let file = write_config(&yaml);

        let result =
            load_experiment(file.path(), &Registry::builtin(), &LoadOptions::default());
        assert!(matches!(result, Err(Error::MissingWeights(_))));
    }

    #[test]
    fn test_existing_weights_accepted() {
        let dir = TempDir::new().unwrap();
        let weights = dir.path().join("bdnet.pth");
        std::fs::write(&weights, b"not a real checkpoint").unwrap();

        let yaml = format!(
            "model:\n  load_weights: {}\ndata:\n  save_dir: {}\n",
            weights.display(),
            dir.path().join("log").display()
        );
        let file = write_config(&yaml);

        assert!(
            load_experiment(file.path(), &Registry::builtin(), &LoadOptions::default()).is_ok()
        );
    }

    #[test]
    fn test_overrides_apply_before_validation() {
        let options = LoadOptions {
            overrides: vec![parse_override("test.batch_size=64").unwrap()],
            ..Default::default()
        };
        let loaded =
            parse_and_validate("test:\n  batch_size: 100\n", &Registry::builtin(), &options)
                .unwrap();
        assert_eq!(loaded.config.test().batch_size, 64);
    }

    #[test]
    fn test_invalid_override_value_caught_by_validation() {
        let options = LoadOptions {
            overrides: vec![parse_override("test.batch_size=0").unwrap()],
            ..Default::default()
        };
        let result = parse_and_validate("", &Registry::builtin(), &options);
        let Err(Error::Validation(report)) = result else {
            panic!("expected validation failure");
        };
        assert!(report.mentions("test", "batch_size"));
    }
}
