use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{CommandFactory, Parser};
use fs_err as fs;
use rulefix_cli::argv::route_args;
use rulefix_cli::config::{self, ConfigMerger, OnError};
use rulefix_core::adapters::{CommandCapability, PrintCapability, SourceImportCleanup};
use rulefix_core::ports::FixCapability;
use rulefix_core::{ConfigError, DispatchError, Dispatcher, FsPathProbe, Validator};
use rulefix_types::DispatchReport;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "rulefix",
    version,
    about = "Apply rule-driven source fixes to files and directories.",
    after_help = "Fix options use --name=value form: --rules=A,B, --excludeRules=A,B, \
                  --ignoreTestFiles=true|false. They may appear anywhere among the paths."
)]
struct Cli {
    /// Config file (default: ./rulefix.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Engine program invoked once per call (overrides [engine] command).
    #[arg(long, env = "RULEFIX_ENGINE")]
    engine: Option<String>,

    /// What to do when an engine call fails.
    #[arg(long, value_enum)]
    on_error: Option<OnError>,

    /// Use the single legacy transformation for every path, then clean imports.
    #[arg(long, default_value_t = false)]
    legacy: bool,

    /// Print the engine calls instead of running them.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print the validated plan as JSON and exit.
    #[arg(long, default_value_t = false)]
    print_plan: bool,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,

    /// Paths and --name=value fix options, in any order.
    #[arg(value_name = "ARGS", num_args = 0..)]
    args: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no engine configured: pass --engine, set RULEFIX_ENGINE or [engine] command in rulefix.toml")]
    NoEngine,

    #[error("every engine call failed ({failed} of {attempted})")]
    AllFailed { attempted: u64, failed: u64 },
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::NoEngine => 2,
            CliError::AllFailed { .. } => 1,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(exit_code(&e));
    }
    ExitCode::from(0)
}

fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        e.exit_code()
    } else if let Some(e) = err.downcast_ref::<CliError>() {
        e.exit_code()
    } else if let Some(e) = err.downcast_ref::<DispatchError>() {
        e.exit_code()
    } else {
        1
    }
}

fn real_main() -> anyhow::Result<()> {
    let cli = parse_cli()?;

    let file_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(Utf8Path::new(".")).context("load rulefix.toml config")?,
    };
    let merged =
        ConfigMerger::new(file_config).merge_run_args(cli.engine.as_deref(), cli.on_error);

    let validator = Validator::new(merged.validator_config(cli.legacy));
    let plan = validator.build_plan(&cli.args, &FsPathProbe)?;
    info!(mode = %plan.mode(), paths = plan.paths().len(), "validated plan");

    if cli.print_plan {
        let json = serde_json::to_string_pretty(&plan).context("serialize plan")?;
        println!("{json}");
        return Ok(());
    }

    let mut settings = merged.dispatch_settings();
    let engine: Box<dyn FixCapability> = if cli.dry_run {
        settings.cleanup_imports = false;
        Box::new(PrintCapability)
    } else {
        let command =
            CommandCapability::from_command_line(&merged.engine_command).ok_or(CliError::NoEngine)?;
        info!(program = command.program(), "using engine");
        Box::new(command)
    };

    let cleanup = SourceImportCleanup;
    let outcome = Dispatcher::new(engine.as_ref(), &cleanup, settings).run(&plan);

    let report = match &outcome {
        Ok(report) => report,
        Err(err) => err.report(),
    };
    let report_written = match &cli.report {
        Some(path) => write_json(path, report),
        None => Ok(()),
    };
    log_summary(report);

    let report = match outcome {
        Ok(report) => report,
        Err(err) => {
            if let Err(e) = report_written {
                error!("failed to write report: {:?}", e);
            }
            return Err(err.into());
        }
    };
    report_written?;
    if report.all_failed() {
        return Err(CliError::AllFailed {
            attempted: report.attempted,
            failed: report.failed,
        }
        .into());
    }
    Ok(())
}

/// Parses the process arguments with CLI flags allowed at any position.
fn parse_cli() -> anyhow::Result<Cli> {
    let raw = std::env::args_os()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow::anyhow!("argument is not valid UTF-8: {arg:?}"))
        })
        .collect::<anyhow::Result<Vec<String>>>()?;

    let mut cmd = Cli::command();
    cmd.build();
    Ok(Cli::parse_from(route_args(&cmd, raw)))
}

fn log_summary(report: &DispatchReport) {
    info!(
        mode = %report.mode,
        attempted = report.attempted,
        succeeded = report.succeeded,
        failed = report.failed,
        cleanup_failures = report.cleanup_failures.len(),
        aborted = report.aborted,
        "dispatch finished"
    );
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}
