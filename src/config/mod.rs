//! Experiment configuration: schema, parsing, overrides, and loading

pub mod cli;
pub mod load;
pub mod overrides;
pub mod raw;
pub mod schema;

pub use cli::{Cli, Command, InfoArgs, InitArgs, InitTemplate, OutputFormat, ValidateArgs};
pub use load::{load_experiment, parse_and_validate, LoadOptions, Loaded};
pub use overrides::{parse_override, parse_overrides, Override};
pub use raw::RawDocument;
pub use schema::{
    DataConfig, ExperimentConfig, LossConfig, ModelConfig, SamplerConfig, TestConfig,
};
