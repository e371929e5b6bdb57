use colored::Colorize;
use driftflow_cloud::{list_all_stacks, resolve_stack_names};
use driftflow_config::ConfigOverrides;
use futures_util::TryStreamExt;
use futures_util::future;
use std::path::Path;

pub async fn handle(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    json: bool,
) -> anyhow::Result<()> {
    let config = super::load_config(config_path, overrides)?;
    let provider = super::connect(&config).await?;

    if json {
        // Full summaries straight from the listing; the stack file does not apply here
        let filter = config.filter_text.as_deref();
        let stacks = list_all_stacks(&provider).try_filter(|summary| {
            future::ready(filter.is_none_or(|f| summary.stack_name.contains(f)))
        });
        futures_util::pin_mut!(stacks);
        while let Some(summary) = stacks.try_next().await? {
            println!("{}", serde_json::to_string(&summary)?);
        }
        return Ok(());
    }

    let names = resolve_stack_names(&provider, &super::selection(&config)).await?;
    if names.is_empty() {
        println!("{}", "No matching stacks".dimmed());
    }
    for name in &names {
        println!("{}", name);
    }
    tracing::info!("{} stacks", names.len());

    Ok(())
}
