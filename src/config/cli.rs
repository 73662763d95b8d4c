//! CLI argument types

use crate::templates::Template;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reconocer: person re-identification training & evaluation toolkit
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "reconocer")]
#[command(version)]
#[command(about = "Experiment configuration tooling for person re-identification runs")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate an experiment configuration file
    Validate(ValidateArgs),

    /// Display a resolved configuration
    Info(InfoArgs),

    /// Write a starter configuration
    Init(InitArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to the configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override a field before validation
    #[arg(short = 's', long = "set", value_name = "SECTION.KEY=VALUE")]
    pub set: Vec<String>,

    /// Reject unrecognized sections and keys instead of warning
    #[arg(long)]
    pub strict: bool,

    /// Print a per-section summary after validation
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to the configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override a field before validation
    #[arg(short = 's', long = "set", value_name = "SECTION.KEY=VALUE")]
    pub set: Vec<String>,

    /// Reject unrecognized sections and keys instead of warning
    #[arg(long)]
    pub strict: bool,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the init command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitArgs {
    /// Starter template (minimal, image-triplet, video-softmax)
    #[arg(short, long, default_value = "minimal")]
    pub template: InitTemplate,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

/// Output format for the info command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("unknown output format: {s}. Valid formats: text, json, yaml")),
        }
    }
}

/// CLI-facing template names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitTemplate {
    #[default]
    Minimal,
    ImageTriplet,
    VideoSoftmax,
}

impl std::str::FromStr for InitTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(InitTemplate::Minimal),
            "image-triplet" => Ok(InitTemplate::ImageTriplet),
            "video-softmax" => Ok(InitTemplate::VideoSoftmax),
            _ => Err(format!(
                "unknown template: {s}. Valid templates: minimal, image-triplet, video-softmax"
            )),
        }
    }
}

impl From<InitTemplate> for Template {
    fn from(template: InitTemplate) -> Self {
        match template {
            InitTemplate::Minimal => Template::Minimal,
            InitTemplate::ImageTriplet => Template::ImageTriplet,
            InitTemplate::VideoSoftmax => Template::VideoSoftmax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate_command() {
        let cli = Cli::try_parse_from([
            "reconocer",
            "validate",
            "experiment.yaml",
            "--set",
            "test.batch_size=64",
            "--strict",
        ])
        .unwrap();

        let Command::Validate(args) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(args.config, PathBuf::from("experiment.yaml"));
        assert_eq!(args.set, vec!["test.batch_size=64"]);
        assert!(args.strict);
        assert!(!args.detailed);
    }

    #[test]
    fn test_parse_info_format() {
        let cli =
            Cli::try_parse_from(["reconocer", "info", "experiment.yaml", "--format", "json"])
                .unwrap();
        let Command::Info(args) = cli.command else {
            panic!("expected info command");
        };
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_init_template() {
        let cli =
            Cli::try_parse_from(["reconocer", "init", "--template", "image-triplet"]).unwrap();
        let Command::Init(args) = cli.command else {
            panic!("expected init command");
        };
        assert_eq!(args.template, InitTemplate::ImageTriplet);
        assert_eq!(Template::from(args.template), Template::ImageTriplet);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("toml".parse::<OutputFormat>().is_err());
        assert!("ranked".parse::<InitTemplate>().is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["reconocer", "--quiet", "info", "experiment.yaml"]).unwrap();
        assert!(cli.quiet);
        assert!(!cli.verbose);
    }
}
