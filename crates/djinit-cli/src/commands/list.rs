//! Implementation of the `djinit list` command.

use djinit_core::application::{CatalogService, FeatureInfo};
use tracing::instrument;

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    commands::catalog_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(format = ?args.format))]
pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = catalog_store(&config).catalog()?;
    let features = CatalogService::new(&catalog).list();

    // --output-format json beats the default table.
    let format = if output.format() == OutputFormat::Json && args.format == ListFormat::Table {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header(&format!("Available features ({})", features.len()))?;
            for line in table_lines(&features) {
                output.data(&line)?;
            }
        }
        ListFormat::Json => output.json(&features)?,
        ListFormat::List => {
            for feature in &features {
                output.data(&feature.id)?;
            }
        }
        ListFormat::Csv => {
            for line in csv_lines(&features) {
                output.data(&line)?;
            }
        }
    }

    Ok(())
}

fn table_lines(features: &[FeatureInfo]) -> Vec<String> {
    let width = features.iter().map(|f| f.id.len()).max().unwrap_or(0).max("ID".len());
    let mut lines = vec![format!("  {:<width$}  {:<28}  {:<12}  {}", "ID", "NAME", "REQUIRES", "CONFLICTS")];
    for f in features {
        lines.push(format!(
            "  {:<width$}  {:<28}  {:<12}  {}",
            f.id,
            f.name,
            or_dash(&f.dependencies),
            or_dash(&f.conflicts),
        ));
    }
    lines
}

fn csv_lines(features: &[FeatureInfo]) -> Vec<String> {
    let mut lines = vec!["id,name,dependencies,conflicts".to_string()];
    for f in features {
        lines.push(format!(
            "{},{},{},{}",
            f.id,
            csv_field(&f.name),
            f.dependencies.join(";"),
            f.conflicts.join(";"),
        ));
    }
    lines
}

fn or_dash(ids: &[String]) -> String {
    if ids.is_empty() { "-".into() } else { ids.join(", ") }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
