// ABOUTME: Entry point for the hostready CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use hostready::config::Config;
use hostready::error::{Error, Result};
use hostready::exec::{CommandOutput, ProcessRunner};
use hostready::host::{LinuxHost, PathLocator};
use hostready::output::Output;
use hostready::readiness;
use hostready::runtime::{ContainerRuntime, EngineCommand, Probe};
use serde::Serialize;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output);
    if let Err(e) = run(cli, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => Config::discover(&env::current_dir()?),
    }
}

#[derive(Serialize)]
struct DetectResult {
    engine: Option<String>,
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let config = load_config(&cli)?;
    let runner = ProcessRunner::new(config.command_timeout);
    let runtime = ContainerRuntime::with_settings(runner.clone(), config.runtime_settings());

    match cli.command {
        Commands::Detect => match runtime.detect_outcome().await {
            Probe::Present(kind) => {
                output.result(
                    kind.binary(),
                    &DetectResult {
                        engine: Some(kind.to_string()),
                    },
                );
                Ok(())
            }
            Probe::Absent => Err(Error::NoEngine),
            Probe::Indeterminate(reason) => {
                output.warning(&format!("engine detection did not complete: {reason}"));
                Err(Error::NoEngine)
            }
        },
        Commands::Info => {
            let info = runtime.info().await.ok_or(Error::NoEngine)?;
            let network_mode = runtime.network_mode().await;
            output.result(&info.version, &info);
            output.progress(&format!(
                "compose: {}",
                match (info.compose_installed, info.compose_version.as_deref()) {
                    (true, Some(version)) => version.to_string(),
                    (false, Some(version)) => format!("{version} (unsupported, need v2+)"),
                    _ => "not installed".to_string(),
                }
            ));
            output.progress(&format!(
                "network: {}",
                network_mode.map_or("engine default", |mode| mode.as_str())
            ));
            Ok(())
        }
        Commands::Check => {
            let host = LinuxHost::new(runner);
            let locator = PathLocator::new(config.rdp_clients.iter().cloned());
            let report = readiness::gather(
                &runtime,
                &host,
                &locator,
                &config.kernel_modules,
                &config.requirements,
            )
            .await;
            output.report(&report);
            if report.ready {
                Ok(())
            } else {
                Err(Error::NotReady)
            }
        }
        Commands::Exec { args } => {
            let (program, rest) = args.split_first().ok_or(Error::EmptyCommand)?;
            let result = runtime
                .execute(&EngineCommand::new(program.as_str(), rest.iter().cloned()))
                .await?;
            print_raw(&result);
            Ok(())
        }
        Commands::Start { name } => print_line(runtime.start(&name).await?),
        Commands::Stop { name } => print_line(runtime.stop(&name).await?),
        Commands::Pause { name } => print_line(runtime.pause(&name).await?),
        Commands::Unpause { name } => print_line(runtime.unpause(&name).await?),
        Commands::Rm { name } => print_line(runtime.remove(&name).await?),
        Commands::VolumeRm { name } => print_line(runtime.remove_volume(&name).await?),
        Commands::Ps { filter } => {
            let names = runtime.list(filter.as_deref()).await?;
            output.result(&names.join("\n"), &names);
            Ok(())
        }
        Commands::Inspect { name, format } => print_line(runtime.inspect(&name, &format).await?),
        Commands::ComposeUp { file } => {
            print_raw(&runtime.compose_up(&file).await?);
            Ok(())
        }
        Commands::ComposeDown { file } => {
            print_raw(&runtime.compose_down(&file).await?);
            Ok(())
        }
    }
}

fn print_line(line: String) -> Result<()> {
    if !line.is_empty() {
        println!("{line}");
    }
    Ok(())
}

fn print_raw(result: &CommandOutput) {
    print!("{}", result.stdout);
    eprint!("{}", result.stderr);
}
