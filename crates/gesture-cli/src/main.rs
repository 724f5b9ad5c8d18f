use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, warn};
use tracing_subscriber::FmtSubscriber;

use gesture_core::domain::{Detection, FingerStateVector, ParseFingerError};
use gesture_core::impls::{AwsCliCloud, DryRunCloud, DryRunLauncher, SystemLauncher};
use gesture_core::{EngineBuilder, EngineConfig, GestureEngine, Outcome, OutcomeStatus};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // stdout carries outcomes; logs go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = load_config(&cli)?;

    match cli.command {
        Command::Classify { fingers } => {
            let vector: FingerStateVector = fingers.parse()?;
            let classifier = config.classifier()?;
            println!("{}", classifier.classify(Detection::Hand(vector)));
            Ok(ExitCode::SUCCESS)
        }
        Command::Run { capture, dry_run } => {
            let engine = build_engine(&config, dry_run)?;
            let detection = Detection::parse(&capture)?;
            let outcome = engine.process(detection).await;
            print_outcome(&outcome)?;
            Ok(exit_code(&outcome))
        }
        Command::Watch { dry_run } => {
            let engine = build_engine(&config, dry_run)?;
            watch(&engine).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Guide { json } => {
            let engine = build_engine(&config, true)?;
            let guide = engine.guide();
            if json {
                println!("{}", serde_json::to_string_pretty(&guide)?);
            } else {
                for entry in guide {
                    println!(
                        "{}  {:<28} {:<20} {}",
                        entry.pattern.to_compact(),
                        entry.fingers,
                        entry.label,
                        entry.action.unwrap_or_default()
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn build_engine(config: &EngineConfig, dry_run: bool) -> Result<GestureEngine> {
    let builder = EngineBuilder::from_config(config)?;
    let builder = if dry_run {
        builder
            .launcher(Arc::new(DryRunLauncher))
            .cloud(Arc::new(DryRunCloud))
    } else {
        builder
            .launcher(Arc::new(SystemLauncher::new()))
            .cloud(Arc::new(AwsCliCloud::new()))
    };
    Ok(builder.build()?)
}

/// 1 行 1 キャプチャ。不正な行は warn を出して読み飛ばす。
async fn watch(engine: &GestureEngine) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match process_line(engine, &line).await {
            Ok(Some(outcome)) => println!("{}", serde_json::to_string(&outcome)?),
            Ok(None) => {}
            Err(e) => warn!("skipping capture: {e}"),
        }
    }
    Ok(())
}

/// Blank lines are not captures; "no hand" must be sent as `none`.
async fn process_line(
    engine: &GestureEngine,
    line: &str,
) -> Result<Option<Outcome>, ParseFingerError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let detection = Detection::parse(line)?;
    Ok(Some(engine.process(detection).await))
}

fn print_outcome(outcome: &Outcome) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}

fn exit_code(outcome: &Outcome) -> ExitCode {
    match outcome.status {
        OutcomeStatus::Failure => ExitCode::FAILURE,
        OutcomeStatus::Success | OutcomeStatus::Skipped => ExitCode::SUCCESS,
    }
}
