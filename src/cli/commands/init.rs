//! Init command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::InitArgs;
use crate::templates::generate_yaml;

pub fn run_init(args: InitArgs, level: LogLevel) -> Result<(), String> {
    let yaml = generate_yaml(args.template.into());

    match args.output {
        Some(path) => {
            if path.exists() && !args.force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ));
            }
            std::fs::write(&path, &yaml)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            log(
                level,
                LogLevel::Normal,
                &format!("Wrote starter config to {}", path.display()),
            );
        }
        None => {
            println!("{yaml}");
        }
    }

    Ok(())
}
