//! Show or save the effective configuration

use std::path::Path;

use repo_importer::config::ServiceConfig;
use repo_importer::output::{OperationResult, OutputMode};

/// Print the effective configuration, optionally saving it to `path`
pub fn config(
    config: &ServiceConfig,
    path: &Path,
    save: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    if save {
        config.save(path)?;
        OperationResult {
            success: true,
            message: format!("Saved configuration to {}", path.display()),
        }
        .render(mode);
        return Ok(());
    }

    match mode {
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputMode::Human => {
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(config)?);
        },
    }
    Ok(())
}
