use colored::Colorize;
use driftflow_cloud::{DriftDetector, OutputPaths, PollConfig};
use driftflow_config::ConfigOverrides;
use std::path::Path;

pub async fn handle(config_path: Option<&Path>, overrides: ConfigOverrides) -> anyhow::Result<()> {
    let config = super::load_config(config_path, overrides)?;

    println!("{}", "Starting drift detection...".blue());
    println!(
        "profile: {}  region: {}",
        config.profile.cyan(),
        config.region.cyan()
    );
    let provider = super::connect(&config).await?;

    let detector = DriftDetector::new(provider)
        .with_poll_config(
            PollConfig::default()
                .with_interval(config.poll_interval())
                .with_max_polls(config.max_polls),
        )
        .with_output(OutputPaths::new(
            config.submitted_file.clone(),
            config.results_file.clone(),
        ));

    let summary = detector.process_stacks(&super::selection(&config)).await?;

    println!();
    println!(
        "{} {} checked, {} drifted, {} skipped",
        "✓".green(),
        summary.results.len(),
        summary.drifted().count(),
        summary.skipped.len()
    );
    for result in summary.drifted() {
        println!("  {} {}", "DRIFTED".red().bold(), result.stack_name);
    }
    println!(
        "Results: {}",
        config.results_file.display().to_string().cyan()
    );

    Ok(())
}
