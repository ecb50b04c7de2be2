//! Implementation of the `djinit new` command.
//!
//! Responsibility: translate CLI arguments into a `FeatureRequest` and a
//! `ProjectSpec`, call the core scaffold service, and display results.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use djinit_adapters::{GitCli, LocalFilesystem, SimpleRenderer};
use djinit_core::{
    application::{ScaffoldService, WriteOptions},
    domain::{FeatureCatalog, FeatureRequest, ProjectSpec, ResolvedSelection},
    error::DjinitError,
};

use crate::{
    cli::NewArgs,
    commands::catalog_store,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `djinit new` command.
///
/// Dispatch sequence:
/// 1. Load the catalog and build the scaffold service
/// 2. Turn flags, config defaults or the interactive selector into a request
/// 3. Resolve it and validate project/app names
/// 4. Refuse an existing directory unless `--force`
/// 5. Confirm with the user unless `--yes`, `--quiet` or not a terminal
/// 6. `--dry-run` lists the planned files; otherwise write them
/// 7. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Service
    let store = catalog_store(&config);
    let service = ScaffoldService::new(
        store.as_ref(),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(GitCli::new()),
    )?;

    // 2-3. Request, selection, spec
    let request = build_request(&args, &config, service.catalog())?;
    let selection = service.resolve(&request)?;
    let auto_included = auto_included(&request, &selection);
    debug!(features = %selection, auto = ?auto_included, "selection resolved");

    let app_name = args.app.clone().unwrap_or_else(|| config.defaults.app_name.clone());
    let init_git = args.git || config.defaults.git;
    let spec = ProjectSpec::new(&args.name, app_name, selection, init_git).map_err(DjinitError::from)?;

    // 4. Existing directory
    let output_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let project_path = output_dir.join(spec.project_name());
    if project_path.exists() && !args.force {
        return Err(CliError::ProjectExists { path: project_path });
    }

    // 5. Show and confirm
    if !output.is_quiet() && !args.yes {
        show_configuration(&spec, &auto_included, &project_path, &output)?;
        if !args.dry_run && output.is_interactive() && !confirm("Create this project?")? {
            return Err(CliError::Cancelled);
        }
    }

    let context = spec.render_context();

    // 6a. Dry run: plan but do not write.
    if args.dry_run {
        let plan = service.plan(&spec, &context, &output_dir)?;
        output.info(&format!(
            "Dry run: would create {} files in {}",
            plan.tree.len(),
            plan.root.display()
        ))?;
        for path in plan.tree.paths() {
            output.data(&format!("  {path}"))?;
        }
        return Ok(());
    }

    // 6b. Write
    if project_path.exists() {
        output.warning(&format!("Replacing existing directory {}", project_path.display()))?;
    }
    info!(path = %project_path.display(), "Scaffold started");

    let spinner = output.spinner(format!("Creating '{}'...", spec.project_name()));
    let result = service.scaffold(&spec, &context, &output_dir, WriteOptions { force: args.force });
    spinner.finish_and_clear();
    let report = result?;

    info!(files = report.files_written, "Scaffold completed");

    // 7. Success + next steps
    output.success(&format!(
        "Project '{}' created with {} files",
        spec.project_name(),
        report.files_written
    ))?;
    if spec.init_git() && !report.git_initialized {
        output.warning("git init failed; run it yourself inside the project")?;
    }

    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        for line in next_steps(&report.root) {
            output.print(&format!("  {line}"))?;
        }
    }

    Ok(())
}

// ── Request construction ─────────────────────────────────────────────────────

/// Flags win over config; `--features` wins over `defaults.features`.
fn build_request(args: &NewArgs, config: &AppConfig, catalog: &FeatureCatalog) -> CliResult<FeatureRequest> {
    if args.minimal {
        return Ok(FeatureRequest::Minimal);
    }
    if args.all_features {
        return Ok(FeatureRequest::All);
    }

    let preset = if args.features.is_empty() {
        &config.defaults.features
    } else {
        &args.features
    };

    if args.interactive {
        let chosen = select_interactively(catalog, preset)?;
        return Ok(FeatureRequest::custom(chosen));
    }

    Ok(FeatureRequest::custom(preset))
}

#[cfg(feature = "interactive")]
fn select_interactively(catalog: &FeatureCatalog, preset: &[String]) -> CliResult<Vec<String>> {
    crate::interactive::select_features(catalog, preset)
}

#[cfg(not(feature = "interactive"))]
fn select_interactively(_catalog: &FeatureCatalog, _preset: &[String]) -> CliResult<Vec<String>> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Ids the resolver added on top of what was asked for.
fn auto_included(request: &FeatureRequest, selection: &ResolvedSelection) -> Vec<String> {
    match request {
        FeatureRequest::Custom(requested) => selection
            .added_beyond(requested)
            .map(ToString::to_string)
            .collect(),
        FeatureRequest::Minimal | FeatureRequest::All => Vec::new(),
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    spec: &ProjectSpec,
    auto_included: &[String],
    project_path: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    let features = if spec.selection().is_empty() {
        "none (base project)".to_string()
    } else {
        spec.selection().to_string()
    };

    out.header("Configuration")?;
    out.field("Project ", spec.project_name())?;
    out.field("App     ", spec.app_name())?;
    out.field("Features", &features)?;
    if !auto_included.is_empty() {
        out.field("Added   ", &format!("{} (dependencies)", auto_included.join(", ")))?;
    }
    out.field("Git     ", if spec.init_git() { "yes" } else { "no" })?;
    out.field("Location", &project_path.display().to_string())?;
    out.print("")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    crate::interactive::confirm(prompt)
}

#[cfg(not(feature = "interactive"))]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    use crate::error::IntoCli;

    print!("{prompt} [Y/n] ");
    io::stdout().flush().with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

fn next_steps(root: &Path) -> Vec<String> {
    vec![
        format!("cd {}", root.display()),
        "python -m venv .venv && source .venv/bin/activate".into(),
        "pip install -r requirements.txt".into(),
        "cp .env.sample .env".into(),
        "python manage.py migrate".into(),
        "python manage.py runserver".into(),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
