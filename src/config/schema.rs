//! Experiment document schema
//!
//! The section structs mirror the on-disk YAML layout and carry the
//! documented default for every key. The field table alongside them
//! enumerates each recognized `section.key` with its primitive kind; the
//! validator walks the table for unknown-key detection and raw type
//! checking before the typed structs are built.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recognized top-level sections, in document order
pub const SECTIONS: &[&str] = &["model", "data", "sampler", "loss", "test"];

/// Primitive kind of a field as it appears in the raw document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Bool,
    /// Integer >= 1
    PosInt,
    /// Integer >= 0
    UInt,
    Float,
    StrList,
    /// Non-empty list of integers >= 1
    PosIntList,
    FloatList,
}

/// Schema entry for one recognized `section.key`
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub section: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
}

const fn field(section: &'static str, key: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { section, key, kind }
}

/// Every recognized field of the experiment document
pub const FIELDS: &[FieldSpec] = &[
    field("model", "name", FieldKind::Str),
    field("model", "pretrained", FieldKind::Bool),
    field("model", "load_weights", FieldKind::Str),
    field("model", "resume", FieldKind::Str),
    field("data", "type", FieldKind::Str),
    field("data", "root", FieldKind::Str),
    field("data", "sources", FieldKind::StrList),
    field("data", "targets", FieldKind::StrList),
    field("data", "height", FieldKind::PosInt),
    field("data", "width", FieldKind::PosInt),
    field("data", "combineall", FieldKind::Bool),
    field("data", "transforms", FieldKind::StrList),
    field("data", "norm_mean", FieldKind::FloatList),
    field("data", "norm_std", FieldKind::FloatList),
    field("data", "save_dir", FieldKind::Str),
    field("data", "workers", FieldKind::UInt),
    field("sampler", "train_sampler", FieldKind::Str),
    field("sampler", "num_instances", FieldKind::PosInt),
    field("loss", "name", FieldKind::Str),
    field("loss", "label_smooth", FieldKind::Bool),
    field("loss", "margin", FieldKind::Float),
    field("loss", "weight_t", FieldKind::Float),
    field("loss", "weight_x", FieldKind::Float),
    field("test", "batch_size", FieldKind::PosInt),
    field("test", "dist_metric", FieldKind::Str),
    field("test", "normalize_feature", FieldKind::Bool),
    field("test", "evaluate", FieldKind::Bool),
    field("test", "eval_freq", FieldKind::PosInt),
    field("test", "start_eval", FieldKind::UInt),
    field("test", "rerank", FieldKind::Bool),
    field("test", "ranks", FieldKind::PosIntList),
    field("test", "visactmap", FieldKind::Bool),
    field("test", "visrank", FieldKind::Bool),
    field("test", "visrankactiv", FieldKind::Bool),
    field("test", "visrankactivthr", FieldKind::Bool),
    field("test", "visrank_topk", FieldKind::PosInt),
    field("test", "maskthr", FieldKind::Float),
];

/// Lookup for one `section.key`, `None` if unrecognized
pub fn field_spec(section: &str, key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.section == section && f.key == key)
}

/// Recognized keys of one section
pub fn section_keys(section: &str) -> impl Iterator<Item = &'static str> + '_ {
    FIELDS.iter().filter(move |f| f.section == section).map(|f| f.key)
}

// ---------------------------------------------------------------------------
// Section structs
// ---------------------------------------------------------------------------

/// `model` section: architecture selection and weight sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Registered model architecture name
    pub name: String,

    /// Initialize the backbone from ImageNet-pretrained weights
    pub pretrained: bool,

    /// Path to pretrained ReID weights; empty string means none
    pub load_weights: String,

    /// Path to a checkpoint to resume from; empty string means none
    pub resume: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "resnet50".to_string(),
            pretrained: true,
            load_weights: String::new(),
            resume: String::new(),
        }
    }
}

impl ModelConfig {
    /// `load_weights` as a path, `None` when unset
    pub fn weights_path(&self) -> Option<&Path> {
        (!self.load_weights.is_empty()).then(|| Path::new(&self.load_weights))
    }

    /// `resume` as a path, `None` when unset
    pub fn resume_path(&self) -> Option<&Path> {
        (!self.resume.is_empty()).then(|| Path::new(&self.resume))
    }
}

/// `data` section: dataset selection, geometry, and augmentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Dataset modality: "image" or "video"
    #[serde(rename = "type")]
    pub kind: String,

    /// Root directory datasets are stored under
    pub root: String,

    /// Training datasets
    pub sources: Vec<String>,

    /// Evaluation datasets; mirrors `sources` when omitted
    pub targets: Vec<String>,

    /// Input height in pixels
    pub height: usize,

    /// Input width in pixels
    pub width: usize,

    /// Fold train, query, and gallery splits into one training set
    pub combineall: bool,

    /// Augmentations applied to training images, in order
    pub transforms: Vec<String>,

    /// Channel means for input normalization
    pub norm_mean: Vec<f64>,

    /// Channel standard deviations for input normalization
    pub norm_std: Vec<f64>,

    /// Directory logs and checkpoints are written to
    pub save_dir: String,

    /// Data-loading worker processes
    pub workers: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            kind: "image".to_string(),
            root: "reid-data".to_string(),
            sources: vec!["market1501".to_string()],
            targets: Vec::new(),
            height: 256,
            width: 128,
            combineall: false,
            transforms: vec!["random_flip".to_string()],
            norm_mean: vec![0.485, 0.456, 0.406],
            norm_std: vec![0.229, 0.224, 0.225],
            save_dir: "log".to_string(),
            workers: 4,
        }
    }
}

/// `sampler` section: mini-batch composition during training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Registered sampler name
    pub train_sampler: String,

    /// Instances per identity for identity-balanced sampling
    pub num_instances: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { train_sampler: "RandomSampler".to_string(), num_instances: 4 }
    }
}

/// `loss` section: objective selection and term weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossConfig {
    /// Registered loss name
    pub name: String,

    /// Label-smoothing regularizer for the softmax term
    pub label_smooth: bool,

    /// Triplet margin
    pub margin: f64,

    /// Weight of the triplet term
    pub weight_t: f64,

    /// Weight of the softmax term
    pub weight_x: f64,
}

impl Default for LossConfig {
    fn default() -> Self {
        Self {
            name: "softmax".to_string(),
            label_smooth: true,
            margin: 0.3,
            weight_t: 1.0,
            weight_x: 1.0,
        }
    }
}

/// `test` section: evaluation cadence, metric, and visualization switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    /// Evaluation batch size
    pub batch_size: usize,

    /// Distance metric for ranking: "euclidean" or "cosine"
    pub dist_metric: String,

    /// L2-normalize embeddings before ranking
    pub normalize_feature: bool,

    /// Evaluate only, skip training
    pub evaluate: bool,

    /// Epochs between evaluations
    pub eval_freq: usize,

    /// Epoch to begin evaluating at
    pub start_eval: usize,

    /// Re-rank with k-reciprocal encoding
    pub rerank: bool,

    /// CMC ranks to report
    pub ranks: Vec<usize>,

    /// Dump activation maps of test images
    pub visactmap: bool,

    /// Save ranked result visualizations
    pub visrank: bool,

    /// Save ranked results with activation overlays
    pub visrankactiv: bool,

    /// Save thresholded activation rank visualizations
    pub visrankactivthr: bool,

    /// Top-k retrieved images per visualization
    pub visrank_topk: usize,

    /// Activation mask threshold, in [0, 1]
    pub maskthr: f64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            dist_metric: "euclidean".to_string(),
            normalize_feature: false,
            evaluate: false,
            eval_freq: 20,
            start_eval: 0,
            rerank: false,
            ranks: vec![1, 5, 10, 20],
            visactmap: false,
            visrank: false,
            visrankactiv: false,
            visrankactivthr: false,
            visrank_topk: 10,
            maskthr: 0.7,
        }
    }
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// Validated, immutable experiment configuration
///
/// Produced once by the loader and consumed read-only; fields are private so
/// the only way to obtain one is through validation, and the only access is
/// through section accessors. Plain data with no interior mutability, safe
/// to share across worker threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentConfig {
    model: ModelConfig,
    data: DataConfig,
    sampler: SamplerConfig,
    loss: LossConfig,
    test: TestConfig,
}

impl ExperimentConfig {
    pub(crate) fn new(
        model: ModelConfig,
        data: DataConfig,
        sampler: SamplerConfig,
        loss: LossConfig,
        test: TestConfig,
    ) -> Self {
        Self { model, data, sampler, loss, test }
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    pub fn data(&self) -> &DataConfig {
        &self.data
    }

    pub fn sampler(&self) -> &SamplerConfig {
        &self.sampler
    }

    pub fn loss(&self) -> &LossConfig {
        &self.loss
    }

    pub fn test(&self) -> &TestConfig {
        &self.test
    }

    /// Serialize back to the on-disk document form
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
