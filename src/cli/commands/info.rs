//! Info command implementation

use crate::cli::logging::{log, warn};
use crate::cli::LogLevel;
use crate::config::{load_experiment, InfoArgs, OutputFormat};
use crate::registry::Registry;

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let options = super::load_options(&args.set, args.strict)?;
    let loaded = load_experiment(&args.config, &Registry::builtin(), &options)
        .map_err(|e| e.to_string())?;

    for warning in &loaded.warnings {
        warn(level, warning);
    }

    let config = &loaded.config;
    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration Info:");
            println!();
            println!("Model: {}", config.model().name);
            println!(
                "Data: {} ({} -> {})",
                config.data().kind,
                config.data().sources.join(", "),
                config.data().targets.join(", ")
            );
            println!("Input size: {}x{}", config.data().height, config.data().width);
            println!("Sampler: {}", config.sampler().train_sampler);
            println!("Loss: {}", config.loss().name);
            println!("Test batch size: {}", config.test().batch_size);
            println!("Distance metric: {}", config.test().dist_metric);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(config)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = config.to_yaml().map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
