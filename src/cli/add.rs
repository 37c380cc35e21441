//! `spaceui add`: resolve, fetch, transform, and write components.

use std::path::Path;

use clap::Args;

use crate::config::Config;
use crate::install::{InstallOptions, Installer, PackageManager, install_packages};
use crate::prompts::{confirm, print_info, print_success, spinner};
use crate::registry::manifest::EntityKind;
use crate::registry::resolver::ResolvedDependencies;
use crate::registry::source::RegistryClient;

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Component keys to add (e.g. "invoices/create-invoice-form")
    #[arg(value_name = "COMPONENT", required_unless_present = "all")]
    pub components: Vec<String>,

    /// Add every component in the registry
    #[arg(long, conflicts_with = "components")]
    pub all: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite existing files without asking
    #[arg(short, long)]
    pub overwrite: bool,

    /// Write files but do not run the package manager
    #[arg(long)]
    pub skip_install: bool,
}

pub async fn run(args: AddArgs, client: &RegistryClient, project_root: &Path) -> anyhow::Result<()> {
    let config = Config::load(project_root)?;
    let installer = Installer::new(client, &config, project_root);

    let progress = spinner(&format!("Fetching registry from {}", client.location()));
    let manifest = client.manifest().await;
    progress.finish_and_clear();
    let manifest = manifest?;

    let requested: Vec<String> = if args.all {
        manifest.component_keys().iter().map(|k| k.to_string()).collect()
    } else {
        args.components.clone()
    };
    if requested.is_empty() {
        anyhow::bail!("Nothing to add: the registry has no components.");
    }

    let plan = installer.plan(&requested).await?;
    print_plan(&plan);

    if !args.yes {
        let proceed = confirm(
            &format!(
                "Install {} item(s), {} file(s)?",
                plan.items.len(),
                plan.all_files.len()
            ),
            true,
        )?;
        if !proceed {
            print_info("Cancelled.");
            return Ok(());
        }
    }

    // Existing files: ask once for the whole batch, unless --overwrite.
    let mut overwrite = args.overwrite;
    if !overwrite {
        let existing = installer.existing_destinations(&plan);
        if !existing.is_empty() {
            println!("\n{} file(s) already exist:", existing.len());
            for path in &existing {
                print_info(&path.display().to_string());
            }
            overwrite = confirm("Overwrite them?", false)?;
            if !overwrite {
                print_info("Existing files will be kept.");
            }
        }
    }

    let outcome = installer
        .materialize(&plan, InstallOptions { overwrite })
        .await?;
    for file in &outcome.files {
        match file.status {
            crate::install::FileStatus::Written => {
                print_info(&format!("wrote   {}", file.destination.display()));
            }
            crate::install::FileStatus::SkippedExisting => {
                print_info(&format!("kept    {}", file.destination.display()));
            }
        }
    }

    if !args.skip_install && !plan.all_npm_dependencies.is_empty() {
        let manager = PackageManager::detect(project_root);
        println!(
            "\nInstalling {} package(s) with {manager}: {}",
            plan.all_npm_dependencies.len(),
            plan.all_npm_dependencies.join(", ")
        );
        install_packages(manager, &plan.all_npm_dependencies, project_root).await?;
    }

    print_success(&format!(
        "Done: {} file(s) written, {} kept.",
        outcome.written(),
        outcome.skipped()
    ));
    Ok(())
}

fn print_plan(plan: &ResolvedDependencies) {
    let count = |kind: EntityKind| plan.items.iter().filter(|i| i.kind == kind).count();
    println!(
        "\nResolved {} component(s), {} provider(s), {} util(s):",
        count(EntityKind::Component),
        count(EntityKind::Provider),
        count(EntityKind::Util)
    );
    for item in &plan.items {
        print_info(&format!("{} {} ({})", item.kind, item.name, item.key));
    }
    if !plan.all_npm_dependencies.is_empty() {
        println!("Packages: {}", plan.all_npm_dependencies.join(", "));
    }
}
