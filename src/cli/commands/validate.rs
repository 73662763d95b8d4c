//! Validate command implementation

use crate::cli::logging::{log, warn};
use crate::cli::LogLevel;
use crate::config::{load_experiment, ExperimentConfig, ValidateArgs};
use crate::registry::Registry;

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let options = super::load_options(&args.set, args.strict)?;
    let loaded = load_experiment(&args.config, &Registry::builtin(), &options)
        .map_err(|e| e.to_string())?;

    for warning in &loaded.warnings {
        warn(level, warning);
    }

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        print_detailed_summary(&loaded.config);
    }

    Ok(())
}

/// Format model information as a string
pub fn format_model_info(config: &ExperimentConfig) -> String {
    let model = config.model();
    let mut lines = vec![
        format!("  Model: {}", model.name),
        format!("  Pretrained: {}", model.pretrained),
    ];
    if let Some(weights) = model.weights_path() {
        lines.push(format!("  Weights: {}", weights.display()));
    }
    if let Some(resume) = model.resume_path() {
        lines.push(format!("  Resume: {}", resume.display()));
    }
    lines.join("\n")
}

/// Format data configuration as a string
pub fn format_data_info(config: &ExperimentConfig) -> String {
    let data = config.data();
    [
        format!("  Type: {}", data.kind),
        format!("  Sources: {}", data.sources.join(", ")),
        format!("  Targets: {}", data.targets.join(", ")),
        format!("  Input size: {}x{}", data.height, data.width),
        format!("  Transforms: {}", data.transforms.join(", ")),
        format!("  Save dir: {}", data.save_dir),
    ]
    .join("\n")
}

/// Format sampler and loss configuration as a string
pub fn format_training_info(config: &ExperimentConfig) -> String {
    let sampler = config.sampler();
    let loss = config.loss();
    let mut lines = vec![
        format!("  Sampler: {}", sampler.train_sampler),
        format!("  Loss: {}", loss.name),
    ];
    if sampler.train_sampler == "RandomIdentitySampler" {
        lines.push(format!("  Instances per identity: {}", sampler.num_instances));
    }
    lines.join("\n")
}

/// Format test configuration as a string
pub fn format_test_info(config: &ExperimentConfig) -> String {
    let test = config.test();
    let mut lines = vec![
        format!("  Batch size: {}", test.batch_size),
        format!("  Distance metric: {}", test.dist_metric),
        format!("  Eval frequency: every {} epochs", test.eval_freq),
    ];
    if test.rerank {
        lines.push("  Re-ranking: enabled".to_string());
    }
    if test.visrank || test.visrankactiv || test.visactmap {
        lines.push(format!("  Visualization top-k: {}", test.visrank_topk));
    }
    lines.join("\n")
}

/// Print detailed configuration summary
pub fn print_detailed_summary(config: &ExperimentConfig) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_model_info(config));
    println!();
    println!("{}", format_data_info(config));
    println!();
    println!("{}", format_training_info(config));
    println!();
    println!("{}", format_test_info(config));
}
