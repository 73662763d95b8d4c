//! Reconocer: person re-identification training & evaluation toolkit
//!
//! This crate provides the experiment-configuration layer: a schema for the
//! declarative YAML document that drives a run, an exhaustive validator, a
//! registry of pluggable components (models, losses, samplers, transforms,
//! datasets), CLI override merging, and starter-template generation.
//!
//! Loading is all-or-nothing and happens once at startup; the resulting
//! [`ExperimentConfig`] is immutable and safe to share read-only with
//! whatever workers the training pipeline spawns.
//!
//! # Example
//!
//! ```no_run
//! use reconocer::{load_experiment, LoadOptions, Registry};
//!
//! let loaded = load_experiment(
//!     "experiment.yaml",
//!     &Registry::builtin(),
//!     &LoadOptions::default(),
//! )?;
//! println!("training {}", loaded.config.model().name);
//! # Ok::<(), reconocer::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod templates;
pub mod validate;

pub use config::{load_experiment, ExperimentConfig, LoadOptions, Loaded};
pub use error::{Error, Result};
pub use registry::Registry;
