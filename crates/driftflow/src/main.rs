mod commands;

use clap::{Args, Parser, Subcommand};
use driftflow_config::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "driftflow")]
#[command(about = "Detect CloudFormation stack drift and record the results", long_about = None)]
struct Cli {
    /// Config file (default: driftflow.yaml discovery, DRIFTFLOW_CONFIG_PATH)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trigger drift detection on the selected stacks and wait for the results
    Detect(DetectArgs),
    /// List stack names without running detection
    List(ListArgs),
    /// Show version information
    Version,
}

/// AWS connection options
#[derive(Args, Clone, Debug)]
struct AwsArgs {
    /// AWS profile name
    #[arg(short, long, env = "AWS_PROFILE")]
    profile: Option<String>,
    /// AWS region
    #[arg(short, long, env = "AWS_REGION")]
    region: Option<String>,
    /// Attempts per API call (SDK standard retry mode)
    #[arg(long)]
    max_attempts: Option<u32>,
}

/// Stack selection options
#[derive(Args, Clone, Debug)]
struct SelectArgs {
    /// Only stacks whose name contains this text (case-sensitive)
    #[arg(short, long)]
    filter: Option<String>,
    /// File with one stack name per line; wins over --filter when it exists
    #[arg(short = 's', long)]
    stack_file: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
struct DetectArgs {
    #[command(flatten)]
    aws: AwsArgs,
    #[command(flatten)]
    select: SelectArgs,
    /// File receiving the stack → detection id map (default: temp.txt)
    #[arg(long)]
    submitted_file: Option<PathBuf>,
    /// File receiving one line per completed detection (default: result.txt)
    #[arg(long)]
    results_file: Option<PathBuf>,
    /// Seconds between status checks
    #[arg(long)]
    poll_interval: Option<u64>,
    /// Give up on a stack after this many status checks
    #[arg(long)]
    max_polls: Option<u32>,
}

#[derive(Args, Clone, Debug)]
struct ListArgs {
    #[command(flatten)]
    aws: AwsArgs,
    #[command(flatten)]
    select: SelectArgs,
    /// Print full stack summaries as JSON lines
    #[arg(long)]
    json: bool,
}

impl DetectArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            submitted_file: self.submitted_file.clone(),
            results_file: self.results_file.clone(),
            poll_interval_secs: self.poll_interval,
            max_polls: self.max_polls,
            ..base_overrides(&self.aws, &self.select)
        }
    }
}

impl ListArgs {
    fn overrides(&self) -> ConfigOverrides {
        base_overrides(&self.aws, &self.select)
    }
}

fn base_overrides(aws: &AwsArgs, select: &SelectArgs) -> ConfigOverrides {
    ConfigOverrides {
        profile: aws.profile.clone(),
        region: aws.region.clone(),
        max_attempts: aws.max_attempts,
        filter_text: select.filter.clone(),
        stack_file: select.stack_file.clone(),
        ..ConfigOverrides::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries progress lines, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match cli.command {
        Commands::Version => {
            println!("driftflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Detect(args) => {
            commands::detect::handle(cli.config.as_deref(), args.overrides()).await
        }
        Commands::List(args) => {
            commands::list::handle(cli.config.as_deref(), args.overrides(), args.json).await
        }
    }
}
