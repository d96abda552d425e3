use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::Local;
use datacheck_core::{
    readers::{load_path, LoaderConfig, LoaderConfigBuilder},
    Overall, Report, RuleInvocation, Table,
};
use datacheck_reports::{JsonFormatter, Reporter, StdOutFormatter, TableFormatter, TableRole};
use tracing::info;

use crate::{
    errors::CliError,
    parser::{parse_config, resolve_relative},
    writer::{resolve_destination, write_report},
    Args, OutputFormat,
};

/// Everything a run needs, resolved from the config document and CLI flags.
#[derive(Debug)]
pub struct Plan {
    pub dataset: PathBuf,
    pub reference: Option<PathBuf>,
    pub loader: LoaderConfig,
    pub invocations: Vec<RuleInvocation>,
}

pub fn plan(args: &Args) -> Result<Plan> {
    let config_path = args.config.as_deref().ok_or(CliError::MissingConfig)?;
    let config = parse_config(config_path)?;

    let dataset = match (&args.data, &config.dataset.path) {
        (Some(data), _) => data.clone(),
        (None, Some(path)) => resolve_relative(config_path, path),
        (None, None) => return Err(CliError::MissingDataset.into()),
    };
    let reference = match (&args.reference, &config.dataset.reference) {
        (Some(reference), _) => Some(reference.clone()),
        (None, Some(path)) => Some(resolve_relative(config_path, path)),
        (None, None) => None,
    };

    let mut builder = LoaderConfigBuilder::new();
    if let Some(delimiter) = config.dataset.delimiter_byte()? {
        builder = builder.with_delimiter(delimiter);
    }
    if let Some(secs) = config.dataset.timeout_secs {
        builder = builder.with_timeout(Duration::from_secs(secs));
    }

    Ok(Plan {
        dataset,
        reference,
        loader: builder.build(),
        invocations: config.invocations(),
    })
}

pub fn run(args: &Args) -> Result<Overall> {
    let plan = plan(args)?;
    let version = env!("CARGO_PKG_VERSION").to_string();

    let report = match args.output {
        OutputFormat::Stdout => execute(&mut StdOutFormatter::new(version), &plan)?,
        OutputFormat::Table => execute(&mut TableFormatter::new(), &plan)?,
        OutputFormat::Json => {
            let mut formatter = JsonFormatter::new(version);
            let report = execute(&mut formatter, &plan)?;
            let timestamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
            let destination = resolve_destination(&args.out, &timestamp)?;
            let json = formatter
                .to_json()
                .context("Failed to serialize report")?;
            write_report(&destination, &json)?;
            report
        }
    };
    Ok(report.overall())
}

/// Load the tables, run every invocation and feed the reporter.
/// Loader failures abort before any rule runs.
pub fn execute<R: Reporter>(reporter: &mut R, plan: &Plan) -> Result<Report> {
    reporter.on_start();
    reporter.on_loading();

    let primary = load_table(&plan.dataset, &plan.loader)?;
    reporter.on_table_load(
        TableRole::Dataset,
        &plan.dataset.display().to_string(),
        primary.num_rows(),
    );

    let reference = match &plan.reference {
        Some(path) => {
            let table = load_table(path, &plan.loader)?;
            reporter.on_table_load(
                TableRole::Reference,
                &path.display().to_string(),
                table.num_rows(),
            );
            Some(table)
        }
        None => None,
    };

    reporter.on_validation_start();
    let report = datacheck_core::run(&primary, reference.as_ref(), &plan.invocations);
    reporter.on_report(&report);
    reporter.on_summary(report.summary(), report.overall());

    info!(overall = %report.overall(), checks = report.checks().len(), "run complete");
    Ok(report)
}

fn load_table(path: &Path, config: &LoaderConfig) -> Result<Table> {
    if !path.exists() {
        return Err(CliError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    load_path(path, config).with_context(|| format!("Failed to load table: '{}'", path.display()))
}
