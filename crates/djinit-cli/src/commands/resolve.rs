//! Implementation of the `djinit resolve` command.
//!
//! Prints the dependency closure of a request without composing any files.

use djinit_core::{application::CatalogService, domain::FeatureRequest};
use tracing::{info, instrument};

use crate::{
    cli::{OutputFormat, ResolveArgs},
    commands::catalog_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ResolveArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = catalog_store(&config).catalog()?;

    let request = request_for(&args, &config);
    let preview = CatalogService::new(&catalog).preview(&request)?;
    info!(resolved = preview.resolved.len(), "request resolved");

    if output.format() == OutputFormat::Json {
        output.json(&preview)?;
        return Ok(());
    }

    if preview.resolved.is_empty() {
        output.info("No features selected: the base project only")?;
        return Ok(());
    }

    output.header("Resolved features")?;
    for id in &preview.resolved {
        let marker = if preview.auto_included.contains(id) {
            " (dependency)"
        } else {
            ""
        };
        output.data(&format!("  {id}{marker}"))?;
    }
    if !preview.auto_included.is_empty() {
        output.info(&format!(
            "Automatically included: {}",
            preview.auto_included.join(", ")
        ))?;
    }

    Ok(())
}

/// Same fallback as `new`: `--features` wins over `defaults.features`.
fn request_for(args: &ResolveArgs, config: &AppConfig) -> FeatureRequest {
    if args.all_features {
        FeatureRequest::All
    } else if args.features.is_empty() {
        FeatureRequest::custom(&config.defaults.features)
    } else {
        FeatureRequest::custom(&args.features)
    }
}
