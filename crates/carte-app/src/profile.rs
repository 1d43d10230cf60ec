use anyhow::Context;
use carte_config::Config;

use crate::Args;

/// Config from the `--config` profile, or from `CARTE_*` environment
/// variables when none is given, with command line flags applied on top
pub fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config profile {}", path.display());
            Config::from_file(path).context("Failed to load config profile")?
        }
        None => Config::new(),
    };

    if let Some(input) = &args.input {
        config.input_dir = input.clone();
    }
    if let Some(output) = &args.output {
        config.output.dir = output.clone();
    }
    if let Some(vocabulary) = &args.vocabulary {
        config.vocabulary.path = vocabulary.clone();
    }
    if let Some(cross_reference) = &args.cross_reference {
        config.vocabulary.cross_reference_path = Some(cross_reference.clone());
    }
    if let Some(min_count) = args.min_count {
        config.stats.min_count = min_count;
    }

    tracing::debug!("Resolved config: {config:?}");
    Ok(config)
}
