//! Install command: orchestrates packages, stubs, project-file patches,
//! environment mutation and migrations as one strict sequence.
//!
//! Any step failure aborts the remaining steps; already-applied mutations are
//! not rolled back. Re-running is safe: every patch is marker-guarded.

use std::fs;

use crate::domain::env_file::mutate_env;
use crate::domain::features::resolve_features;
use crate::domain::manifest::patch_composer_json;
use crate::domain::packages::{installed_packages, missing_packages};
use crate::domain::patch::{
    add_health_check_route, patch_app_service_provider, patch_bootstrap_providers,
    prepend_claude_md,
};
use crate::domain::{AppError, FeatureFlags, FeatureSelection, Project};
use crate::ports::{ProcessRunner, Prompter};
use crate::stubs::{
    self, BASE_STUBS, ESLINT_STUB, HORIZON_PROVIDER_STUB, TELESCOPE_PROVIDER_STUB, WORKFLOW_STUBS,
};

/// Options for the install command.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Project name used for database and display naming; defaults to the
    /// project directory's base name.
    pub name: Option<String>,
    pub flags: FeatureFlags,
    /// Skip publishing GitHub workflow files.
    pub no_workflows: bool,
    /// Overwrite existing stub destinations.
    pub force: bool,
    pub no_interaction: bool,
}

/// Outcome summary returned to the caller.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub project_token: String,
    pub selection: FeatureSelection,
}

/// Execute the install command.
pub fn execute(
    project: &Project,
    options: &InstallOptions,
    runner: &dyn ProcessRunner,
    prompter: &dyn Prompter,
) -> Result<InstallReport, AppError> {
    println!("Installing larkit...");

    let token = project.project_token(options.name.as_deref());
    let selection = resolve_features(options.flags, options.no_interaction, prompter)?;

    install_packages(project, selection, runner)?;
    run_framework_installers(project, selection, runner)?;
    publish_stubs(project, options, selection)?;
    patch_composer_json(project, selection)?;
    patch_bootstrap_providers(project, selection)?;
    update_env_file(project, &token, selection, runner)?;
    run_migrations(project, runner)?;

    report_success(options, selection);
    Ok(InstallReport { project_token: token, selection })
}

/// Composer-require the packages not yet in the manifest, then publish each
/// installed package's assets.
fn install_packages(
    project: &Project,
    selection: FeatureSelection,
    runner: &dyn ProcessRunner,
) -> Result<(), AppError> {
    let installed = installed_packages(&project.composer_json_path());
    let missing = missing_packages(selection, &installed);

    if missing.is_empty() {
        println!("All required Composer packages already installed.");
    } else {
        println!("Installing Composer packages...");
        let mut args = vec!["require"];
        args.extend(missing.iter());
        args.push("--no-interaction");
        runner.run("composer", &args, project.root())?;
    }

    publish_vendor_assets(project, runner, "Laravel\\Fortify\\FortifyServiceProvider", "Fortify")?;
    if selection.horizon {
        publish_vendor_assets(project, runner, "Laravel\\Horizon\\HorizonServiceProvider", "Horizon")?;
    }
    if selection.reverb {
        publish_vendor_assets(project, runner, "Laravel\\Reverb\\ReverbServiceProvider", "Reverb")?;
    }
    if selection.telescope {
        publish_vendor_assets(
            project,
            runner,
            "Laravel\\Telescope\\TelescopeServiceProvider",
            "Telescope",
        )?;
    }

    Ok(())
}

fn publish_vendor_assets(
    project: &Project,
    runner: &dyn ProcessRunner,
    provider: &str,
    label: &str,
) -> Result<(), AppError> {
    println!("Publishing {label} assets...");
    let provider_arg = format!("--provider={provider}");
    runner.run(
        "php",
        &["artisan", "vendor:publish", &provider_arg, "--no-interaction"],
        project.root(),
    )
}

/// Framework sub-installers: API routes always, broadcasting for Reverb.
fn run_framework_installers(
    project: &Project,
    selection: FeatureSelection,
    runner: &dyn ProcessRunner,
) -> Result<(), AppError> {
    println!("Setting up API routes...");
    runner.run(
        "php",
        &["artisan", "install:api", "--without-migration-prompt", "--no-interaction"],
        project.root(),
    )?;

    if selection.reverb {
        println!("Setting up broadcasting...");
        runner.run(
            "php",
            &[
                "artisan",
                "install:broadcasting",
                "--without-reverb",
                "--without-node",
                "--no-interaction",
            ],
            project.root(),
        )?;
    }

    Ok(())
}

/// Copy every stub, create the convention directories and run the nested
/// source-file patch steps that depend on published files.
fn publish_stubs(
    project: &Project,
    options: &InstallOptions,
    selection: FeatureSelection,
) -> Result<(), AppError> {
    for entry in &BASE_STUBS {
        stubs::publish(project, entry, options.force)?;
    }
    stubs::publish(project, &ESLINT_STUB, options.force)?;

    fs::create_dir_all(project.app_path("Actions"))?;
    fs::create_dir_all(project.app_path("DataTransferObjects"))?;
    println!("Created app/Actions and app/DataTransferObjects directories");

    if selection.horizon {
        stubs::publish(project, &HORIZON_PROVIDER_STUB, options.force)?;
    }
    if selection.telescope {
        stubs::publish(project, &TELESCOPE_PROVIDER_STUB, options.force)?;
    }

    prepend_claude_md(project, stubs::claude_md_stub())?;

    if selection.telescope {
        patch_app_service_provider(project)?;
    }

    add_health_check_route(project)?;

    if !options.no_workflows {
        for entry in &WORKFLOW_STUBS {
            stubs::publish(project, entry, options.force)?;
        }
    }

    Ok(())
}

/// Apply the env rule pipeline; write back and clear the cached config only
/// when at least one rule fired. A missing `.env` is a warning, not an error.
fn update_env_file(
    project: &Project,
    token: &str,
    selection: FeatureSelection,
    runner: &dyn ProcessRunner,
) -> Result<(), AppError> {
    let path = project.env_path();
    if !path.exists() {
        eprintln!("Warning: .env file not found, skipping environment setup.");
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;
    let mutation = mutate_env(&content, token, selection);

    if mutation.changed() {
        fs::write(&path, &mutation.content)?;
        println!("Updated .env: {}", mutation.summary());
        runner.run_quiet("php", &["artisan", "config:clear", "--no-interaction"], project.root());
    }

    Ok(())
}

fn run_migrations(project: &Project, runner: &dyn ProcessRunner) -> Result<(), AppError> {
    println!("Running migrations...");
    runner.run("php", &["artisan", "migrate", "--force"], project.root())?;
    println!("Migrations complete");
    Ok(())
}

fn report_success(options: &InstallOptions, selection: FeatureSelection) {
    println!();
    println!("larkit installed successfully!");
    println!();
    println!("  - Run `composer run dev` to start the development server");
    println!("  - Visit /health to check system status");
    if selection.horizon {
        println!("  - Visit /horizon to monitor queues");
    }
    if selection.telescope {
        println!("  - Visit /telescope for debugging");
    }
    println!();
    println!("Remember to add the HasUid trait to your models for ID obfuscation");
    if !options.no_workflows {
        println!("GitHub workflows require the CLAUDE_CODE_OAUTH_TOKEN secret for review automation");
    }
}
