pub mod detect;
pub mod list;

use driftflow_cloud::StackSelection;
use driftflow_cloud_aws::{AwsDriftProvider, AwsSettings};
use driftflow_config::{ConfigOverrides, DriftConfig};
use std::path::Path;

/// Load the config file (explicit path or discovery) and apply CLI overrides
pub fn load_config(path: Option<&Path>, overrides: ConfigOverrides) -> anyhow::Result<DriftConfig> {
    let base = match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            DriftConfig::load(path)?
        }
        None => DriftConfig::discover()?,
    };
    let config = base.with_overrides(overrides);
    config.validate()?;
    Ok(config)
}

pub fn selection(config: &DriftConfig) -> StackSelection {
    StackSelection {
        stack_file: config.stack_file.clone(),
        filter_text: config.filter_text.clone(),
    }
}

pub async fn connect(config: &DriftConfig) -> anyhow::Result<AwsDriftProvider> {
    let settings = AwsSettings::new(&config.region)
        .with_profile(&config.profile)
        .with_max_attempts(config.max_attempts);
    Ok(AwsDriftProvider::connect(&settings).await?)
}
